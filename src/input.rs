use crate::pos::Dir;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};

/// Abstract request produced by the keyboard, consumed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Turn(Dir),
    Restart,
    Quit,
}

/// Arrows and WASD steer, Escape quits, modifiers do nothing and any other
/// key counts as a restart request.
pub fn input_for_key(key: VirtualKeyCode) -> Option<Input> {
    let input = match key {
        VirtualKeyCode::Up | VirtualKeyCode::W => Input::Turn(Dir::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S => Input::Turn(Dir::Down),
        VirtualKeyCode::Left | VirtualKeyCode::A => Input::Turn(Dir::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D => Input::Turn(Dir::Right),
        VirtualKeyCode::Escape => Input::Quit,
        VirtualKeyCode::LShift
        | VirtualKeyCode::RShift
        | VirtualKeyCode::LControl
        | VirtualKeyCode::RControl
        | VirtualKeyCode::LAlt
        | VirtualKeyCode::RAlt
        | VirtualKeyCode::LWin
        | VirtualKeyCode::RWin => return None,
        _ => Input::Restart,
    };
    Some(input)
}

/// Inputs collected between two ticks, kept in arrival order.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<Input>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<T>(&mut self, event: &Event<'_, T>) {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.push(Input::Quit),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => {
                if let Some(input) = input_for_key(*key) {
                    self.push(input);
                }
            }
            _ => {}
        }
    }

    pub fn push(&mut self, input: Input) {
        self.pending.push(input);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Input> {
        self.pending.drain(..)
    }
}
