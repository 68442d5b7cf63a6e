//! A 256-bit set over 8-bit ids.
//! The cache keeps two of them: data sectors reachable from some file, and
//! file ids already handed out by `create_file` since the last mount.
//! Neither is persisted; both are rebuilt from the directory on mount.

use crate::error::{FsError, Result};

const WORD_BITS: usize = 64;
const NUM_WORDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitmap {
    words: [u64; NUM_WORDS],
}

impl Bitmap {
    pub const fn new() -> Self {
        Self { words: [0; NUM_WORDS] }
    }

    fn locate(id: u8) -> (usize, u64) {
        let id = id as usize;
        (id / WORD_BITS, 1 << (id % WORD_BITS))
    }

    pub fn is_set(&self, id: u8) -> bool {
        let (word, mask) = Self::locate(id);
        self.words[word] & mask != 0
    }

    /// Sets the bit for `id`, which must be below `total_items`.
    /// Returns previously set value of the bit.
    pub fn set(&mut self, id: u8, total_items: usize) -> Result<bool> {
        if id as usize >= total_items {
            return Err(FsError::OutOfBounds);
        }
        let (word, mask) = Self::locate(id);
        let pre_value = self.words[word] & mask != 0;
        self.words[word] |= mask;
        Ok(pre_value)
    }

    /// Returns the lowest clear id below `total_items`, without setting it.
    pub fn first_clear(&self, total_items: usize) -> Option<u8> {
        for (i, &word) in self.words.iter().enumerate() {
            if word == u64::MAX {
                continue;
            }
            let id = i * WORD_BITS + (!word).trailing_zeros() as usize;
            return (id < total_items).then_some(id as u8);
        }
        None
    }

    pub fn count_set(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn clear_all(&mut self) {
        self.words = [0; NUM_WORDS];
    }
}
