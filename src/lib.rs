//! Chainfs is a flat file system for small sector devices.
//! Files are numbered, not named, and grow one whole sector at a time.
//! No deletion, no directories, no partial-sector I/O.
//!
//! Chainfs's layout on a device of 256 sectors of 512 bytes:
//! - Sectors 0..=254: data, owned by whichever file's chain reaches them
//! - Sector 255: metadata, holding two 256-byte tables back to back
//!   - Directory: file id -> first sector of the file, or 255 if the file is empty
//!   - Chain table: sector -> next sector of the same file, or 255 at the end
//!
//! Chainfs's layers (from bottom to top):
//! 1. Block Device: sector read/write/format.                 | User implemented (hardware-specific), `RamDisk` provided
//! 2. Metadata Cache: lazily mounted copy of both tables.     | Fs implemented
//! 3. Chain: tail lookup, allocation, linking.                | Fs implemented
//! 4. File: create, size, append, read.                       | Fs implemented
//! 5. FileSystem: the handle users hold; flush and format.    | Fs implemented (wrap with `into_shared` for threads)
//!
//! Metadata changes are durable only after `FileSystem::flush`.

#![no_std]

extern crate alloc;

mod config;
mod block_dev;
mod ram_disk;
mod structs;
mod bitmap;
mod metadata;
mod cache;
mod chain;
mod file;
mod fs;
mod error;

pub use block_dev::BlockDevice;
pub use ram_disk::RamDisk;
pub use config::*;
pub use structs::*;
pub use bitmap::Bitmap;
pub use metadata::*;
pub use cache::MetadataCache;
pub use chain::*;
pub use file::*;
pub use fs::*;
pub use error::FsError as Error;
pub use error::Result;
