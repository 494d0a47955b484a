/// Running address cursor for pass one. It only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationCounter(usize);

impl LocationCounter {
    pub fn new(start: usize) -> Self {
        Self(start)
    }

    pub fn current(self) -> usize {
        self.0
    }

    /// Moves past `size` bytes and returns the address before the move.
    pub fn advance(&mut self, size: usize) -> usize {
        let address = self.0;
        self.0 += size;
        address
    }
}
