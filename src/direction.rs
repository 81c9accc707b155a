use crate::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// The neighbouring cell one step away in this direction. `y` grows downwards.
    pub fn step(self, from: Cell) -> Cell {
        match self {
            Up => Cell::new(from.x, from.y - 1),
            Down => Cell::new(from.x, from.y + 1),
            Left => Cell::new(from.x - 1, from.y),
            Right => Cell::new(from.x + 1, from.y),
        }
    }
}

/// Current heading of the snake. Written by the input handler, read by the tick.
///
/// No transition rules live here; the controller decides which turns are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    direction: Direction,
}

impl Heading {
    pub fn new() -> Self {
        Heading { direction: Right }
    }

    pub fn get(&self) -> Direction {
        self.direction
    }

    pub fn set(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::new()
    }
}
