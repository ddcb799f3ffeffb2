use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::game::{Game, Lifecycle, Snake};
use crate::grid::Grid;
use crate::input::Input;
use crate::pos::{Dir, Pos};
use crate::rng::RandomSource;

/// What a single [`Engine::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The round is not running; nothing changed.
    Idle,
    Moved,
    Grew,
    /// The head ran into the body. The snake was left as it was.
    Collided,
    Won,
}

/// Transition logic for a [`Game`]. Owns the grid geometry and the random source.
#[derive(Debug)]
pub struct Engine<R = SmallRng> {
    grid: Grid,
    rng: R,
}

impl Engine<SmallRng> {
    pub fn seeded(grid: Grid, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::new(grid, rng)
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn new(grid: Grid, rng: R) -> Self {
        Self { grid, rng }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// A running round with a fresh snake and target.
    pub fn new_game(&mut self) -> Game {
        let snake = self.random_snake();
        self.place(snake)
    }

    /// Single-cell snake at a uniformly random cell, facing a uniformly random way.
    pub fn random_snake(&mut self) -> Snake {
        let dir = Dir::ALL[self.rng.below(Dir::ALL.len())];
        let head = Pos::new(
            self.rng.below(usize::from(self.grid.width())) as u16,
            self.rng.below(usize::from(self.grid.height())) as u16,
        );
        Snake::new(dir, head)
    }

    /// Uniformly random cell not covered by `snake`, or `None` if it covers the grid.
    ///
    /// Draws an index among the free cells and walks to it, so dense boards cost
    /// one pass over the grid instead of an unbounded retry loop.
    pub fn random_target(&mut self, snake: &Snake) -> Option<Pos> {
        let mut occupied = vec![false; self.grid.cell_count()];
        let mut taken = 0;
        for p in snake.body() {
            let slot = &mut occupied[self.grid.index(p)];
            if !*slot {
                *slot = true;
                taken += 1;
            }
        }
        let free = occupied.len() - taken;
        if free == 0 {
            return None;
        }
        let nth = self.rng.below(free);
        occupied
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .nth(nth)
            .map(|(i, _)| self.grid.pos_at(i))
    }

    /// Steers the snake unless the round is over or `dir` would reverse the last move.
    pub fn apply_direction(&self, game: &mut Game, dir: Dir) {
        if game.lifecycle != Lifecycle::Running {
            return;
        }
        if dir != game.snake.heading.opposite() {
            game.snake.dir = dir;
        }
    }

    /// Starts a new round after GameOver or Won. Returns whether it did.
    pub fn request_restart(&mut self, game: &mut Game) -> bool {
        if !game.lifecycle.round_over() {
            return false;
        }
        let previous = game.lifecycle;
        *game = self.new_game();
        info!(?previous, head = ?game.snake.head(), target = ?game.target, "round restarted");
        true
    }

    pub fn stop(&self, game: &mut Game) {
        game.lifecycle = Lifecycle::Stopped;
    }

    /// Applies one frame's worth of inputs in arrival order.
    ///
    /// Quit always wins. Once a round is over, the first key restarts it and the
    /// rest of the frame is dropped.
    pub fn handle_inputs(&mut self, game: &mut Game, inputs: impl IntoIterator<Item = Input>) {
        let inputs: Vec<Input> = inputs.into_iter().collect();
        if inputs.contains(&Input::Quit) {
            self.stop(game);
            return;
        }
        for input in inputs {
            match game.lifecycle {
                Lifecycle::Stopped => return,
                Lifecycle::GameOver | Lifecycle::Won => {
                    self.request_restart(game);
                    return;
                }
                Lifecycle::Running => {
                    if let Input::Turn(dir) = input {
                        self.apply_direction(game, dir);
                    }
                }
            }
        }
    }

    /// Advances the snake by one cell.
    pub fn tick(&mut self, game: &mut Game) -> Step {
        if game.lifecycle != Lifecycle::Running {
            return Step::Idle;
        }

        let snake = &mut game.snake;
        let new_head = self.grid.step(snake.head(), snake.dir);
        if snake.contains(new_head) {
            game.lifecycle = Lifecycle::GameOver;
            info!(length = snake.len(), at = ?new_head, "snake ran into itself");
            return Step::Collided;
        }

        snake.heading = snake.dir;
        snake.body.push_back(new_head);

        if new_head != game.target {
            snake.body.pop_front();
            return Step::Moved;
        }

        if snake.len() == self.grid.cell_count() {
            game.lifecycle = Lifecycle::Won;
            info!(length = snake.len(), "snake fills the grid");
            return Step::Won;
        }

        match self.random_target(&game.snake) {
            Some(target) => {
                game.target = target;
                debug!(length = game.snake.len(), ?target, "snake grew");
                Step::Grew
            }
            // Unreachable while the length is below the cell count.
            None => {
                game.lifecycle = Lifecycle::Won;
                Step::Won
            }
        }
    }

    fn place(&mut self, snake: Snake) -> Game {
        match self.random_target(&snake) {
            Some(target) => Game::new(Lifecycle::Running, snake, target),
            // A snake that already covers the grid has nothing left to eat.
            None => {
                let head = snake.head();
                Game::new(Lifecycle::Won, snake, head)
            }
        }
    }
}
