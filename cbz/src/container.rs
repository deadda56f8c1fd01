use std::fmt::Display;

use camino::Utf8Path;
use tracing::debug;

use crate::{ArchiveRead, CbrReader, CbzReader, Error, Result, Unrar};

/// Container formats a comic archive can actually be stored in,
/// whatever its extension says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Rar,
    Zip,
}

impl Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Rar => "rar",
                Self::Zip => "zip",
            }
        )
    }
}

impl Container {
    /// `.cbr` files are expected to be RAR archives but are regularly mislabeled ZIP ones
    pub const PROBE_ORDER: [Self; 2] = [Self::Rar, Self::Zip];

    /// Opens `path` as an archive of this container format
    ///
    /// ## Errors
    ///
    /// Fails if `path` can't be read as this container format
    pub fn open(self, path: &Utf8Path, unrar: &Unrar) -> Result<Box<dyn ArchiveRead>> {
        let archive: Box<dyn ArchiveRead> = match self {
            Self::Rar => Box::new(CbrReader::from_path(unrar, path)?),
            Self::Zip => Box::new(CbzReader::from_path(path)?),
        };

        Ok(archive)
    }

    /// Tries every container of `PROBE_ORDER` in turn and returns the first one that opens
    ///
    /// ## Errors
    ///
    /// Fails if none of the containers could open `path`
    pub fn probe(path: &Utf8Path, unrar: &Unrar) -> Result<(Self, Box<dyn ArchiveRead>)> {
        for container in Self::PROBE_ORDER {
            match container.open(path, unrar) {
                Ok(archive) => return Ok((container, archive)),
                Err(err) => debug!("{path} is not a {container} archive: {err}"),
            }
        }

        Err(Error::NotAnArchive(path.to_owned()))
    }
}
