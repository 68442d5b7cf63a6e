//! Common utilities for tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chainfs::{BlockDevice, Error, RamDisk, Result, SECTOR_SIZE};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr) => {
        println!("{}[test] {}{}", crate::common::ORANGE, $msg, crate::common::RESET)
    };
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

/// Routes the crate's `log` output to the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

/// A sector filled with `byte`.
pub fn payload(byte: u8) -> [u8; SECTOR_SIZE] {
    [byte; SECTOR_SIZE]
}

/// A sector whose content depends on every byte position and on `seed`.
pub fn patterned(seed: u8) -> [u8; SECTOR_SIZE] {
    let mut buf = [0u8; SECTOR_SIZE];
    for (i, b) in buf.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(31).wrapping_add(seed);
    }
    buf
}

/// RamDisk with switchable failures and I/O counters.
pub struct FaultyDisk {
    inner: RamDisk,
    pub fail_init: AtomicBool,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_format: AtomicBool,
    pub inits: AtomicUsize,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl FaultyDisk {
    pub fn new() -> Self {
        Self {
            inner: RamDisk::new(),
            fail_init: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_format: AtomicBool::new(false),
            inits: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn set(flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &RamDisk {
        &self.inner
    }
}

impl BlockDevice for FaultyDisk {
    fn init(&self, drive: u8) -> Result<()> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(Error::IoError);
        }
        self.inner.init(drive)
    }

    fn read_sector(&self, sector: u8, buf: &mut [u8; SECTOR_SIZE]) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::ReadError);
        }
        self.inner.read_sector(sector, buf)
    }

    fn write_sector(&self, sector: u8, buf: &[u8; SECTOR_SIZE]) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::WriteError);
        }
        self.inner.write_sector(sector, buf)
    }

    fn format(&self) -> Result<()> {
        if self.fail_format.load(Ordering::SeqCst) {
            return Err(Error::IoError);
        }
        self.inner.format()
    }
}
