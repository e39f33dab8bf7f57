//! Sketch bin representation.

pub(crate) const MAX_BIN_WIDTH: u16 = u16::MAX;

/// A sketch bin: a key and the number of observations it holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bin {
    pub(crate) k: i16,
    pub(crate) n: u16,
}

impl Bin {
    pub fn key(&self) -> i16 {
        self.k
    }

    pub fn count(&self) -> u32 {
        u32::from(self.n)
    }

    /// Adds `n` observations, saturating at the bin width. Returns what did not fit.
    pub(crate) fn increment(&mut self, n: u64) -> u64 {
        let next = n + u64::from(self.n);
        if next > u64::from(MAX_BIN_WIDTH) {
            self.n = MAX_BIN_WIDTH;
            return next - u64::from(MAX_BIN_WIDTH);
        }

        // `next` fits in a u16 here.
        self.n = next as u16;
        0
    }
}
