use anyhow::{anyhow, Result};

use crate::{Cell, GridInt};

/// Body segments, head first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    pub fn new(length: usize) -> Self {
        let mut snake = Snake { body: vec![] };
        snake.initialize(length);
        snake
    }

    /// Lays the body out along row 0, head at `x = length - 1` and tail at `x = 0`.
    pub fn initialize(&mut self, length: usize) {
        self.body = (0..length as GridInt).rev()
            .map(|x| Cell::new(x, 0))
            .collect();
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn set_body(&mut self, body: Vec<Cell>) {
        self.body = body;
    }

    pub fn head(&self) -> Result<Cell> {
        self.body.first()
            .copied()
            .ok_or_else(|| anyhow!("snake has no body segments; initialize() was never called"))
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_lays_body_along_first_row() {
        let snake = Snake::new(5);
        let expected: Vec<Cell> = [4, 3, 2, 1, 0].iter().map(|&x| Cell::new(x, 0)).collect();

        assert_eq!(snake.body(), &expected[..]);
        assert_eq!(snake.head().unwrap(), Cell::new(4, 0));
    }

    #[test]
    fn initialize_discards_previous_body() {
        let mut snake = Snake::new(3);
        snake.set_body(vec![Cell::new(7, 7), Cell::new(7, 8)]);

        snake.initialize(2);
        assert_eq!(snake.body(), &[Cell::new(1, 0), Cell::new(0, 0)]);
    }

    #[test]
    fn head_of_empty_body_is_an_error() {
        let snake = Snake::default();
        assert!(snake.is_empty());
        assert!(snake.head().is_err());
    }
}
