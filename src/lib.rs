//! Snake on a wrap-around grid.
//!
//! [`engine::Engine`] owns every state transition; the window, keyboard and
//! pixel drawing in the binary only feed it inputs and paint the resulting
//! [`game::Game`].

pub mod config;
pub mod draw;
pub mod engine;
pub mod game;
pub mod grid;
pub mod input;
pub mod pos;
pub mod rng;
