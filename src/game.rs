use crate::pos::{Dir, Pos};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// The player asked to quit. Terminal.
    Stopped,
    Running,
    /// The snake ran into itself. Only a restart leaves this state.
    GameOver,
    /// The snake fills the whole grid. Only a restart leaves this state.
    Won,
}

impl Lifecycle {
    pub fn round_over(self) -> bool {
        matches!(self, Lifecycle::GameOver | Lifecycle::Won)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    /// Steering applied on the next tick.
    pub(crate) dir: Dir,
    /// Direction of the last move actually made; reversals are checked against it.
    pub(crate) heading: Dir,
    /// Tail at the front, head at the back. Never empty.
    pub(crate) body: VecDeque<Pos>,
}

impl Snake {
    pub fn new(dir: Dir, head: Pos) -> Self {
        Self {
            dir,
            heading: dir,
            body: VecDeque::from([head]),
        }
    }

    /// Builds a snake from cells ordered tail first. `None` if `cells` is empty.
    pub fn with_body(dir: Dir, cells: impl IntoIterator<Item = Pos>) -> Option<Self> {
        let body: VecDeque<Pos> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            dir,
            heading: dir,
            body,
        })
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn heading(&self) -> Dir {
        self.heading
    }

    pub fn head(&self) -> Pos {
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Pos {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Cells from tail to head.
    pub fn body(&self) -> impl ExactSizeIterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, p: Pos) -> bool {
        self.body.iter().any(|&s| s == p)
    }
}

/// Everything the run loop hands to the renderer each frame.
///
/// Only [`crate::engine::Engine`] mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub(crate) lifecycle: Lifecycle,
    pub(crate) snake: Snake,
    pub(crate) target: Pos,
}

impl Game {
    pub fn new(lifecycle: Lifecycle, snake: Snake, target: Pos) -> Self {
        Self {
            lifecycle,
            snake,
            target,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn target(&self) -> Pos {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_ordered_tail_to_head() {
        let snake = Snake::with_body(
            Dir::Right,
            [Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)],
        )
        .unwrap();
        assert_eq!(snake.tail(), Pos::new(0, 0));
        assert_eq!(snake.head(), Pos::new(2, 0));
        assert_eq!(snake.len(), 3);
        assert!(snake.contains(Pos::new(1, 0)));
        assert!(!snake.contains(Pos::new(3, 0)));
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(Snake::with_body(Dir::Up, []).is_none());
    }

    #[test]
    fn fresh_snake_heads_where_it_steers() {
        let snake = Snake::new(Dir::Left, Pos::new(4, 4));
        assert_eq!(snake.dir(), snake.heading());
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn only_game_over_and_won_end_a_round() {
        assert!(Lifecycle::GameOver.round_over());
        assert!(Lifecycle::Won.round_over());
        assert!(!Lifecycle::Running.round_over());
        assert!(!Lifecycle::Stopped.round_over());
    }
}
