use alloc::boxed::Box;

use log::debug;

use crate::config::*;
use crate::error::Result;
use crate::{BlockDevice, Metadata};

pub fn read_metadata<D: BlockDevice>(device: &D) -> Result<Metadata> {
    let mut buf = Box::new([0u8; SECTOR_SIZE]);
    device.read_sector(METADATA_SECTOR, &mut buf)?;
    Ok(Metadata::from_bytes(&buf))
}

pub fn write_metadata<D: BlockDevice>(device: &D, meta: &Metadata) -> Result<()> {
    let buf = Box::new(meta.to_bytes());
    device.write_sector(METADATA_SECTOR, &buf)?;
    debug!("metadata written to sector {}", METADATA_SECTOR);
    Ok(())
}
