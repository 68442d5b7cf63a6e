//! File operations on top of the chain allocator.
//! All of these expect the cache to be mounted already and fail with
//! `NotMounted` otherwise; `FileSystem` mounts before calling in.

use alloc::vec::Vec;

use log::{trace, warn};

use crate::cache::MetadataCache;
use crate::chain::{append_to_chain, chain_len, chain_nth, find_free_sector};
use crate::config::*;
use crate::error::{FsError, Result};
use crate::{BlockDevice, FileId, SectorId};

/// Hands out the lowest file id with no data that has not been handed out yet.
pub fn fcreate(cache: &mut MetadataCache) -> Result<FileId> {
    let meta = cache.tables()?;
    let file = (0..MAX_FILES as u8)
        .find(|&id| meta.first_sector(id) == NIL && !cache.is_claimed(id))
        .ok_or(FsError::DirectoryFull)?;
    cache.claim(file)?;
    trace!("created file {}", file);
    Ok(file)
}

/// Number of sectors in the file.
pub fn fsize(cache: &MetadataCache, file: FileId) -> Result<u8> {
    chain_len(cache.tables()?, file)
}

/// Writes one sector of data to a fresh sector and links it onto the file.
/// The tables change only after the data write succeeded.
/// Returns the sector that now holds the data.
pub fn fappend(
    device: &impl BlockDevice,
    cache: &mut MetadataCache,
    policy: AllocPolicy,
    file: FileId,
    buffer: &[u8; SECTOR_SIZE],
) -> Result<SectorId> {
    if file as usize >= MAX_FILES {
        return Err(FsError::InvalidFileId);
    }

    let sector = find_free_sector(cache.tables()?, cache.used_sectors()?, policy)?
        .ok_or_else(|| {
            warn!("append to file {}: volume full", file);
            FsError::VolumeFull
        })?;

    device.write_sector(sector, buffer)?;

    append_to_chain(cache.tables_mut()?, file, sector)?;
    cache.mark_used(sector)?;
    trace!("file {}: appended sector {}", file, sector);
    Ok(sector)
}

/// Reads logical sector `location` of the file into `buffer`.
pub fn fread(
    device: &impl BlockDevice,
    cache: &MetadataCache,
    file: FileId,
    location: u8,
    buffer: &mut [u8; SECTOR_SIZE],
) -> Result<()> {
    let meta = cache.tables()?;
    if location >= chain_len(meta, file)? {
        return Err(FsError::OutOfBounds);
    }

    let sector = chain_nth(meta, file, location)?;
    device.read_sector(sector, buffer)?;
    Ok(())
}

/// Sectors of the file in chain order.
pub fn fsectors(cache: &MetadataCache, file: FileId) -> Result<Vec<SectorId>> {
    let meta = cache.tables()?;
    let len = chain_len(meta, file)?;
    let mut sectors = Vec::with_capacity(len as usize);
    let mut current = meta.first_sector(file);
    for _ in 0..len {
        sectors.push(current);
        current = meta.next[current as usize];
    }
    Ok(sectors)
}
