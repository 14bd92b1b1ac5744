use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::hufftree::Leaf;

/// Occurrence count of every byte value in one input buffer.
///
/// All 256 entries exist; unused symbols simply count zero.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; 256],
}

impl FrequencyTable {
    /// Largest input whose length and counts fit the 4-byte header fields.
    pub const MAX_INPUT_LEN: usize = u32::MAX as usize;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::MAX_INPUT_LEN {
            return Err(HuffmanError::InvalidInput {
                len: bytes.len(),
                max: Self::MAX_INPUT_LEN,
            });
        }

        let mut counts = [0u32; 256];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }
        Ok(FrequencyTable { counts })
    }

    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Symbols with a nonzero count, ordered the way the tree builder
    /// seeds its queue: descending frequency, ties by ascending symbol.
    pub fn leaves(&self) -> Vec<Leaf> {
        let mut leaves: Vec<Leaf> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| Leaf::new(symbol as u8, count))
            .collect();

        // stable sort keeps the ascending-symbol order among equal counts
        leaves.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        leaves
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.counts
                    .iter()
                    .enumerate()
                    .filter(|(_, &count)| count > 0),
            )
            .finish()
    }
}
