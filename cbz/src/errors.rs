use std::{io, result};

use camino::Utf8PathBuf;
use zip::result::ZipError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error {0}")]
    IO(#[from] io::Error),

    #[error("Zip error {0}")]
    Zip(#[from] ZipError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive file size couldn't be converted")]
    FileSizeConversion,

    #[error("File {0} not found in archive")]
    EntryNotFound(String),

    #[error("{0} doesn't start with a RAR signature")]
    NotRar(Utf8PathBuf),

    #[error("{0} is neither a RAR nor a ZIP archive")]
    NotAnArchive(Utf8PathBuf),

    #[error("UnRAR executable not found")]
    UnrarNotFound,

    #[error("Couldn't run {program}: {source}")]
    UnrarSpawn { program: String, source: io::Error },

    #[error("UnRAR failed ({status}): {stderr}")]
    Unrar { status: String, stderr: String },
}

pub type Result<T, E = Error> = result::Result<T, E>;
