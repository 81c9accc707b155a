use crate::Cell;

/// The single piece of food on the board. Placement is decided by the controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    cell: Cell,
}

impl Food {
    pub fn new(cell: Cell) -> Self {
        Food { cell }
    }

    pub fn get(&self) -> Cell {
        self.cell
    }

    pub fn set(&mut self, cell: Cell) {
        self.cell = cell;
    }
}
