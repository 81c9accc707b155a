pub mod config;
pub mod direction;
pub mod food;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod render;
pub mod score;
pub mod snake;
pub mod surface;
pub mod term;

pub use config::{Config, Options};
pub use direction::{Direction, Heading};
pub use game::{Collision, Game, TickOutcome};
pub use surface::{DrawCall, MemorySurface, Surface};

pub type GridInt = i32;
pub type PixelInt = i32;

/// A grid position, counted in cells from the top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: GridInt,
    pub y: GridInt,
}

impl Cell {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Cell { x, y }
    }
}
