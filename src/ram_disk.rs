//! An in-memory sector store with flash semantics: erased bytes read `0xFF`.
//! A fresh disk reads exactly like a formatted one.

use alloc::vec;
use alloc::vec::Vec;

use log::trace;
use spin::Mutex;

use crate::config::*;
use crate::error::{FsError, Result};
use crate::structs::SectorId;
use crate::BlockDevice;

pub struct RamDisk {
    sectors: Mutex<Vec<[u8; SECTOR_SIZE]>>,
}

impl RamDisk {
    pub fn new() -> Self {
        Self {
            sectors: Mutex::new(vec![[ERASED_BYTE; SECTOR_SIZE]; NUM_SECTORS]),
        }
    }

    /// Loads a disk from a raw image, as produced by `image()`.
    pub fn from_image(image: &[u8]) -> Result<Self> {
        if image.len() != NUM_SECTORS * SECTOR_SIZE {
            return Err(FsError::IoError);
        }
        let sectors = image
            .chunks_exact(SECTOR_SIZE)
            .map(|chunk| {
                let mut sector = [0u8; SECTOR_SIZE];
                sector.copy_from_slice(chunk);
                sector
            })
            .collect();
        Ok(Self {
            sectors: Mutex::new(sectors),
        })
    }

    /// Returns a copy of the whole disk, sector 0 first.
    pub fn image(&self) -> Vec<u8> {
        self.sectors.lock().iter().flatten().copied().collect()
    }
}

impl Default for RamDisk {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDevice for RamDisk {
    fn init(&self, drive: u8) -> Result<()> {
        trace!("ram disk: init drive {}", drive);
        Ok(())
    }

    fn read_sector(&self, sector: SectorId, buf: &mut [u8; SECTOR_SIZE]) -> Result<()> {
        let sectors = self.sectors.lock();
        let data = sectors.get(sector as usize).ok_or(FsError::InvalidSector)?;
        buf.copy_from_slice(data);
        Ok(())
    }

    fn write_sector(&self, sector: SectorId, buf: &[u8; SECTOR_SIZE]) -> Result<()> {
        let mut sectors = self.sectors.lock();
        let data = sectors.get_mut(sector as usize).ok_or(FsError::InvalidSector)?;
        data.copy_from_slice(buf);
        Ok(())
    }

    fn format(&self) -> Result<()> {
        self.sectors
            .lock()
            .iter_mut()
            .for_each(|sector| sector.fill(ERASED_BYTE));
        Ok(())
    }

    fn num_sectors(&self) -> usize {
        self.sectors.lock().len()
    }
}
