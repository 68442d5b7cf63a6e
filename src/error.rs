use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    IoError,
    ReadError,
    WriteError,
    InvalidSector,
    VolumeFull,
    DirectoryFull,
    InvalidFileId,
    OutOfBounds,
    NotMounted,
    CorruptMetadata,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FsError::IoError => "device I/O error",
            FsError::ReadError => "sector read failed",
            FsError::WriteError => "sector write failed",
            FsError::InvalidSector => "invalid sector index",
            FsError::VolumeFull => "no free data sector",
            FsError::DirectoryFull => "no free file slot",
            FsError::InvalidFileId => "invalid file id",
            FsError::OutOfBounds => "location past end of file",
            FsError::NotMounted => "metadata not mounted",
            FsError::CorruptMetadata => "corrupt directory or chain table",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for FsError {}

pub type Result<T> = core::result::Result<T, FsError>;
