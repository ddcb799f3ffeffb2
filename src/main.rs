use anyhow::{Context, Result};
use clap::Parser;
use pixels::{Pixels, SurfaceTexture};
use std::path::PathBuf;
use std::time::Instant;
use torus_snake::config::Config;
use torus_snake::draw::Renderer;
use torus_snake::engine::Engine;
use torus_snake::game::Lifecycle;
use torus_snake::input::InputQueue;
use tracing::{error, info};
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

#[derive(Parser, Debug)]
#[command(author, version, about = "Snake on a wrap-around grid", long_about = None)]
struct Args {
    /// JSON config file; keys it leaves out keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Simulation steps per second
    #[arg(long)]
    tps: Option<u32>,

    /// On-screen size of one cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let config = Args::parse().into_config()?;
    let grid = config.grid()?;
    let (frame_w, frame_h) = config.frame_size();
    info!(
        width = grid.width(),
        height = grid.height(),
        tps = config.ticks_per_second,
        seed = ?config.seed,
        "starting snake"
    );

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title(1))
        .with_inner_size(LogicalSize::new(frame_w, frame_h))
        .with_resizable(false)
        .build(&event_loop)
        .context("failed to open window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(frame_w, frame_h, surface_texture).context("failed to create pixel surface")?
    };

    let renderer = Renderer::new(grid, config.cell_size);
    let mut engine = Engine::seeded(grid, config.seed);
    let mut game = engine.new_game();
    let mut input = WinitInputHelper::new();
    let mut queue = InputQueue::new();
    let tick_duration = config.tick_duration();
    let mut last_update = Instant::now();
    let mut shown_len = game.snake().len();

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            renderer.draw(&game, pixels.frame_mut());
            if let Err(err) = pixels.render() {
                error!(%err, "render failed");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        queue.record(&event);

        // True once per pass, after the platform has delivered this pass's events.
        if !input.update(&event) {
            return;
        }

        if last_update.elapsed() >= tick_duration {
            last_update = Instant::now();
            engine.handle_inputs(&mut game, queue.drain());
            if game.lifecycle() == Lifecycle::Stopped {
                info!(length = game.snake().len(), "quit requested");
                *control_flow = ControlFlow::Exit;
                return;
            }
            engine.tick(&mut game);
            if game.snake().len() != shown_len {
                shown_len = game.snake().len();
                window.set_title(&title(shown_len));
            }
            window.request_redraw();
        }
        *control_flow = ControlFlow::WaitUntil(last_update + tick_duration);
    });
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn title(len: usize) -> String {
    format!("Snake - length {len}")
}
