#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    count: u32,
}

impl Score {
    pub fn get(&self) -> u32 {
        self.count
    }

    pub fn set(&mut self, count: u32) {
        self.count = count;
    }
}
