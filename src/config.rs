pub const SECTOR_SIZE: usize = 512;
pub const NUM_SECTORS: usize = 256; // Sectors addressable by an 8-bit index
pub const NIL: u8 = 255; // End-of-chain / empty sentinel, shared by files and sectors
pub const METADATA_SECTOR: u8 = 255; // Sector holding the directory and chain table
pub const MAX_FILES: usize = 255; // File ids 0..=254
pub const NUM_DATA_SECTORS: usize = 255; // Sectors 0..=254
pub const MAX_CHAIN_LEN: usize = NUM_DATA_SECTORS; // Longest chain a well-formed volume can hold

pub const TABLE_SIZE: usize = 256; // One byte per entry, reserved slot included
pub const DIRECTORY_OFFSET: usize = 0;
pub const CHAIN_TABLE_OFFSET: usize = TABLE_SIZE;

pub const ERASED_BYTE: u8 = 0xFF; // What a formatted sector reads back as
pub const DEFAULT_DRIVE: u8 = 0;

/// How `append` picks the sector for new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocPolicy {
    /// Lowest sector not reachable from any file, tracked in a bitmap built at mount.
    #[default]
    Bitmap,
    /// One past the highest chain tail among the densely packed files.
    /// Only correct while files are created in order and chains grow monotonically.
    HighWaterMark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsConfig {
    /// Drive number handed to `BlockDevice::init` on mount.
    pub drive: u8,
    pub alloc_policy: AllocPolicy,
}

impl FsConfig {
    pub const fn new(drive: u8, alloc_policy: AllocPolicy) -> Self {
        Self { drive, alloc_policy }
    }

    pub const fn with_policy(self, alloc_policy: AllocPolicy) -> Self {
        Self { alloc_policy, ..self }
    }
}

impl Default for FsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DRIVE, AllocPolicy::Bitmap)
    }
}
