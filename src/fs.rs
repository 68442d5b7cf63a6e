use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Write;

use log::debug;
use spin::Mutex;

use crate::cache::MetadataCache;
use crate::config::*;
use crate::error::Result;
use crate::file::{fappend, fcreate, fread, fsectors, fsize};
use crate::metadata::write_metadata;
use crate::{BlockDevice, FileId, Metadata, SectorId};

/// A file system handle shared between threads.
/// Every operation holds the lock from mount check to return.
pub type SharedFileSystem<D> = Arc<Mutex<FileSystem<D>>>;

#[derive(Debug)]
pub struct FileSystem<D: BlockDevice> {
    device: Arc<D>,
    cache: MetadataCache,
    config: FsConfig,
}

impl<D: BlockDevice> FileSystem<D> {
    /// Wraps a device without touching it; the metadata is loaded on first use.
    pub fn new(device: Arc<D>) -> Self {
        Self::with_config(device, FsConfig::default())
    }

    pub fn with_config(device: Arc<D>, config: FsConfig) -> Self {
        Self {
            device,
            cache: MetadataCache::new(),
            config,
        }
    }

    pub fn mount(&mut self) -> Result<()> {
        self.cache.ensure_mounted(&*self.device, self.config.drive)
    }

    /// Drops the in-memory tables, unflushed changes included, and reloads them.
    pub fn remount(&mut self) -> Result<()> {
        self.cache.invalidate();
        self.mount()
    }

    pub fn is_mounted(&self) -> bool {
        self.cache.is_mounted()
    }

    // Following methods directly operate on the fs instance, wrap it with `into_shared` if needed.

    pub fn create_file(&mut self) -> Result<FileId> {
        self.mount()?;
        fcreate(&mut self.cache)
    }

    pub fn file_size(&mut self, file: FileId) -> Result<u8> {
        self.mount()?;
        fsize(&self.cache, file)
    }

    /// Appends one sector of data to the file and returns the sector it landed in.
    /// The new sector is durable immediately; the link to it only after `flush`.
    pub fn append(&mut self, file: FileId, buf: &[u8; SECTOR_SIZE]) -> Result<SectorId> {
        self.mount()?;
        fappend(&*self.device, &mut self.cache, self.config.alloc_policy, file, buf)
    }

    pub fn read(&mut self, file: FileId, location: u8, buf: &mut [u8; SECTOR_SIZE]) -> Result<()> {
        self.mount()?;
        fread(&*self.device, &self.cache, file, location, buf)
    }

    /// Writes the directory and chain table back to the metadata sector.
    /// After this returns the volume survives a power loss.
    pub fn flush(&mut self) -> Result<()> {
        // Never write stale tables over the durable copy.
        self.mount()?;
        write_metadata(&*self.device, self.cache.tables()?)?;
        Ok(())
    }

    /// Erases the whole device. The next operation reloads an empty volume.
    /// If the device fails, the file system is left exactly as it was.
    pub fn format(&mut self) -> Result<()> {
        self.device.format()?;
        self.cache.invalidate();
        debug!("volume formatted");
        Ok(())
    }

    pub fn free_sectors(&mut self) -> Result<usize> {
        self.mount()?;
        Ok(NUM_DATA_SECTORS - self.cache.used_sectors()?.count_set())
    }

    pub fn file_sectors(&mut self, file: FileId) -> Result<Vec<SectorId>> {
        self.mount()?;
        fsectors(&self.cache, file)
    }

    pub fn metadata(&self) -> Result<&Metadata> {
        self.cache.tables()
    }

    pub fn config(&self) -> FsConfig {
        self.config
    }

    pub fn device(&self) -> Arc<D> {
        Arc::clone(&self.device)
    }

    pub fn into_shared(self) -> SharedFileSystem<D> {
        Arc::new(Mutex::new(self))
    }

    /// Human-readable summary of the mounted volume: one line per file with data.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let (Ok(meta), Ok(used)) = (self.cache.tables(), self.cache.used_sectors()) else {
            out.push_str("chainfs: not mounted");
            return out;
        };

        let _ = writeln!(
            out,
            "chainfs: drive {}, {:?} allocation, {}/{} sectors used",
            self.config.drive,
            self.config.alloc_policy,
            used.count_set(),
            NUM_DATA_SECTORS
        );
        for file in 0..MAX_FILES as u8 {
            if meta.first_sector(file) == NIL {
                continue;
            }
            let _ = match fsectors(&self.cache, file) {
                Ok(sectors) => writeln!(out, "  file {:3}: {:?}", file, sectors),
                Err(e) => writeln!(out, "  file {:3}: {}", file, e),
            };
        }
        out
    }
}
