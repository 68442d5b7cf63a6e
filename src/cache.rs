//! The in-memory copy of the volume's metadata.
//! Tables are loaded lazily: nothing touches the device until the first
//! operation asks for them, and `invalidate` forces the next access to reload.

use log::debug;

use crate::bitmap::Bitmap;
use crate::chain::check_chains;
use crate::config::*;
use crate::error::{FsError, Result};
use crate::metadata::read_metadata;
use crate::{BlockDevice, FileId, Metadata, SectorId};

#[derive(Debug)]
pub struct MetadataCache {
    mounted: bool,
    meta: Metadata,
    used_sectors: Bitmap,
    claimed_files: Bitmap,
}

impl MetadataCache {
    pub const fn new() -> Self {
        Self {
            mounted: false,
            meta: Metadata::EMPTY,
            used_sectors: Bitmap::new(),
            claimed_files: Bitmap::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Loads the tables from the metadata sector unless they are already loaded.
    /// On any failure the cache stays unmounted and the previous tables are kept.
    pub fn ensure_mounted<D: BlockDevice>(&mut self, device: &D, drive: u8) -> Result<()> {
        if self.mounted {
            return Ok(());
        }

        device.init(drive)?;
        let meta = read_metadata(device)?;
        let used_sectors = check_chains(&meta)?;

        self.meta = meta;
        self.used_sectors = used_sectors;
        self.claimed_files.clear_all();
        self.mounted = true;
        debug!(
            "mounted drive {}: {} of {} data sectors in use",
            drive,
            used_sectors.count_set(),
            NUM_DATA_SECTORS
        );
        Ok(())
    }

    /// Marks the tables stale. The in-memory copy is left as is.
    pub fn invalidate(&mut self) {
        self.mounted = false;
        self.claimed_files.clear_all();
    }

    pub fn tables(&self) -> Result<&Metadata> {
        if !self.mounted {
            return Err(FsError::NotMounted);
        }
        Ok(&self.meta)
    }

    pub fn tables_mut(&mut self) -> Result<&mut Metadata> {
        if !self.mounted {
            return Err(FsError::NotMounted);
        }
        Ok(&mut self.meta)
    }

    pub fn used_sectors(&self) -> Result<&Bitmap> {
        if !self.mounted {
            return Err(FsError::NotMounted);
        }
        Ok(&self.used_sectors)
    }

    pub(crate) fn mark_used(&mut self, sector: SectorId) -> Result<()> {
        self.used_sectors.set(sector, NUM_DATA_SECTORS)?;
        Ok(())
    }

    pub fn is_claimed(&self, file: FileId) -> bool {
        self.claimed_files.is_set(file)
    }

    pub(crate) fn claim(&mut self, file: FileId) -> Result<()> {
        self.claimed_files.set(file, MAX_FILES)?;
        Ok(())
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}
