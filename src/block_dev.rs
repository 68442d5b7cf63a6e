use crate::config::{NUM_SECTORS, SECTOR_SIZE};
use crate::error::Result;
use crate::structs::SectorId;

/// The sector store the file system sits on.
/// Implementations serialize their own I/O; the file system never retries.
pub trait BlockDevice: Send + Sync {
    /// Brings the device up. Called on every mount, before the metadata sector is read.
    fn init(&self, drive: u8) -> Result<()>;

    /// Reads one whole sector into `buf`.
    fn read_sector(&self, sector: SectorId, buf: &mut [u8; SECTOR_SIZE]) -> Result<()>;

    /// Writes one whole sector from `buf`.
    fn write_sector(&self, sector: SectorId, buf: &[u8; SECTOR_SIZE]) -> Result<()>;

    /// Erases every sector, the metadata sector included.
    /// Afterwards each byte must read back as `ERASED_BYTE`, which the
    /// file system interprets as an empty directory and chain table.
    fn format(&self) -> Result<()>;

    /// Returns the number of sectors on the device.
    fn num_sectors(&self) -> usize {
        NUM_SECTORS
    }
}
