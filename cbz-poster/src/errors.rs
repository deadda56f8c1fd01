use std::{io, path::PathBuf};

use camino::Utf8PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error {0}")]
    IO(#[from] io::Error),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Cbz error: {0}")]
    Cbz(#[from] cbz::Error),

    #[error("{0:?} is not a valid utf-8 path")]
    NonUtf8Path(PathBuf),

    #[error("{0} has no file name")]
    NoFileName(Utf8PathBuf),

    #[error("Thumbnail height must be greater than zero")]
    ZeroHeight,

    #[error("Too many covers for a single poster: {0}")]
    TooManyCovers(usize),

    #[error("Poster dimensions don't fit in 32 bits, lower the height or padding")]
    CanvasTooLarge,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
