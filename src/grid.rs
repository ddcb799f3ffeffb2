use crate::config::ConfigError;
use crate::pos::{Dir, Pos};

/// Fixed-size toroidal grid. Leaving one edge re-enters from the opposite one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Rejects grids that cannot hold a snake and a target at the same time.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || usize::from(width) * usize::from(height) < 2 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells, which is also the longest a snake can get.
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn contains(&self, p: Pos) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, p: Pos) -> usize {
        usize::from(p.y) * usize::from(self.width) + usize::from(p.x)
    }

    pub fn pos_at(&self, index: usize) -> Pos {
        let w = usize::from(self.width);
        Pos::new((index % w) as u16, (index / w) as u16)
    }

    /// One cell in `dir`, wrapping on both axes.
    pub fn step(&self, p: Pos, dir: Dir) -> Pos {
        let (dx, dy) = dir.offset();
        let x = (i32::from(p.x) + dx).rem_euclid(i32::from(self.width));
        let y = (i32::from(p.y) + dy).rem_euclid(i32::from(self.height));
        Pos::new(x as u16, y as u16)
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let grid = *self;
        (0..grid.cell_count()).map(move |i| grid.pos_at(i))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
        }
    }
}
