//! Sector-chain traversal and allocation.
//! Everything here works on the in-memory tables only; no device I/O.
//!
//! Walks are capped at `MAX_CHAIN_LEN` steps. A well-formed volume can never
//! hold a longer chain, so running past the cap means the table has a cycle
//! or a dangling link and the walk reports `CorruptMetadata`.

use log::warn;

use crate::bitmap::Bitmap;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::{FileId, Metadata, SectorId};

fn check_file_id(file: FileId) -> Result<()> {
    if file as usize >= MAX_FILES {
        return Err(FsError::InvalidFileId);
    }
    Ok(())
}

/// Returns the last sector of the chain starting at `start`,
/// or `NIL` if `start` is `NIL` (an empty file has no last sector).
pub fn chain_tail(meta: &Metadata, start: SectorId) -> Result<SectorId> {
    if start == NIL {
        return Ok(NIL);
    }

    let mut current = start;
    for _ in 0..MAX_CHAIN_LEN {
        let next = meta.next[current as usize];
        if next == NIL {
            return Ok(current);
        }
        current = next;
    }

    warn!("chain starting at sector {} does not terminate", start);
    Err(FsError::CorruptMetadata)
}

/// Counts the sectors in a file's chain. Empty files have length 0.
pub fn chain_len(meta: &Metadata, file: FileId) -> Result<u8> {
    check_file_id(file)?;

    let mut len = 0;
    let mut current = meta.first_sector(file);
    while current != NIL {
        if len == MAX_CHAIN_LEN {
            warn!("chain of file {} does not terminate", file);
            return Err(FsError::CorruptMetadata);
        }
        len += 1;
        current = meta.next[current as usize];
    }
    Ok(len as u8)
}

/// Returns the sector holding logical index `n` of a file.
pub fn chain_nth(meta: &Metadata, file: FileId, n: u8) -> Result<SectorId> {
    check_file_id(file)?;

    let mut current = meta.first_sector(file);
    for _ in 0..n {
        if current == NIL {
            break;
        }
        current = meta.next[current as usize];
    }
    if current == NIL {
        return Err(FsError::OutOfBounds);
    }
    Ok(current)
}

/// One past the highest chain tail, scanning file ids upward from 0 and
/// stopping at the first file with no data. Returns `Ok(None)` when that
/// lands on the reserved sector, i.e. the volume is full.
///
/// This never reuses a sector, but it is only right when files were filled
/// in id order and each chain's sectors increase along the chain.
pub fn high_water_mark(meta: &Metadata) -> Result<Option<SectorId>> {
    let mut highest: Option<SectorId> = None;
    for file in 0..MAX_FILES {
        let start = meta.directory[file];
        if start == NIL {
            break;
        }
        let tail = chain_tail(meta, start)?;
        highest = Some(highest.map_or(tail, |h| h.max(tail)));
    }

    match highest {
        None => Ok(Some(0)),
        Some(h) if h + 1 == NIL => Ok(None),
        Some(h) => Ok(Some(h + 1)),
    }
}

/// Picks the sector the next append should write to.
/// `used` must be the bitmap of sectors reachable from the directory.
pub fn find_free_sector(
    meta: &Metadata,
    used: &Bitmap,
    policy: AllocPolicy,
) -> Result<Option<SectorId>> {
    match policy {
        AllocPolicy::Bitmap => Ok(used.first_clear(NUM_DATA_SECTORS)),
        AllocPolicy::HighWaterMark => {
            let Some(sector) = high_water_mark(meta)? else {
                return Ok(None);
            };
            // Non-dense directories or out-of-order chains push the mark
            // onto a sector some file already owns.
            if used.is_set(sector) {
                warn!("high-water mark {} is already part of a chain", sector);
                return Err(FsError::CorruptMetadata);
            }
            Ok(Some(sector))
        }
    }
}

/// Links `sector` onto the end of `file`'s chain.
/// The caller has already written the sector's data; this only edits the tables.
pub fn append_to_chain(meta: &mut Metadata, file: FileId, sector: SectorId) -> Result<()> {
    check_file_id(file)?;
    if sector as usize >= NUM_DATA_SECTORS {
        return Err(FsError::InvalidSector);
    }

    let last = chain_tail(meta, meta.first_sector(file))?;
    if last == NIL {
        meta.directory[file as usize] = sector;
    } else {
        meta.next[last as usize] = sector;
    }
    // A stale link left behind in an unused entry would splice garbage onto the file.
    meta.next[sector as usize] = NIL;
    Ok(())
}

/// Validates the tables and returns the set of sectors owned by some file.
/// Fails with `CorruptMetadata` if a chain is cyclic, two files share a
/// sector, or anything points at the reserved metadata sector.
pub fn check_chains(meta: &Metadata) -> Result<Bitmap> {
    if meta.directory[NIL as usize] != NIL || meta.next[METADATA_SECTOR as usize] != NIL {
        warn!("reserved directory or chain entry is in use");
        return Err(FsError::CorruptMetadata);
    }

    let mut used = Bitmap::new();
    for file in 0..MAX_FILES {
        let mut current = meta.directory[file];
        while current != NIL {
            // A repeat means a cycle or two files sharing a sector; either way
            // the walk is bounded by the number of data sectors.
            if used.set(current, NUM_DATA_SECTORS)? {
                warn!("sector {} reached twice (file {})", current, file);
                return Err(FsError::CorruptMetadata);
            }
            current = meta.next[current as usize];
        }
    }
    Ok(used)
}
