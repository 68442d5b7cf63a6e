use core::fmt;

use crate::config::*;

pub type FileId = u8;
pub type SectorId = u8;

/// The directory and the sector-chain table, laid out exactly as they sit
/// in the metadata sector: directory in the first half, chain table in the second.
#[repr(C)]
#[derive(Clone, PartialEq, Eq)]
pub struct Metadata {
    pub directory: [SectorId; TABLE_SIZE], // File id -> first sector, or NIL if empty
    pub next: [SectorId; TABLE_SIZE],      // Sector -> next sector, or NIL if last/unused
}

const _: () = assert!(core::mem::size_of::<Metadata>() == SECTOR_SIZE);

impl Metadata {
    pub const EMPTY: Self = Self {
        directory: [NIL; TABLE_SIZE],
        next: [NIL; TABLE_SIZE],
    };

    pub fn from_bytes(buf: &[u8; SECTOR_SIZE]) -> Self {
        let mut meta = Self::EMPTY;
        meta.directory
            .copy_from_slice(&buf[DIRECTORY_OFFSET..DIRECTORY_OFFSET + TABLE_SIZE]);
        meta.next
            .copy_from_slice(&buf[CHAIN_TABLE_OFFSET..CHAIN_TABLE_OFFSET + TABLE_SIZE]);
        meta
    }

    pub fn to_bytes(&self) -> [u8; SECTOR_SIZE] {
        let mut buf = [0u8; SECTOR_SIZE];
        buf[DIRECTORY_OFFSET..DIRECTORY_OFFSET + TABLE_SIZE].copy_from_slice(&self.directory);
        buf[CHAIN_TABLE_OFFSET..CHAIN_TABLE_OFFSET + TABLE_SIZE].copy_from_slice(&self.next);
        buf
    }

    pub fn first_sector(&self, file: FileId) -> SectorId {
        self.directory[file as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.directory.iter().all(|&s| s == NIL)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::EMPTY
    }
}

// Only non-NIL entries; the full tables are 512 mostly-empty bytes.
impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = |table: &[SectorId; TABLE_SIZE]| {
            table
                .iter()
                .enumerate()
                .filter(|&(_, &s)| s != NIL)
                .map(|(i, &s)| (i, s))
                .collect::<alloc::vec::Vec<_>>()
        };
        f.debug_struct("Metadata")
            .field("directory", &live(&self.directory))
            .field("next", &live(&self.next))
            .finish()
    }
}
