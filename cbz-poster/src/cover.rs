use std::fs;

use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use cbz::{image::Image, is_jpeg_name, Container, Unrar};
use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, error, info, warn};

use crate::errors::{Error, Result};

/// Name of the scratch directory, created in the source directory, that receives the covers
pub static SCRATCH_DIR_NAME: &str = "first_pages";

/// Quality used when a cover has to be re-encoded to jpeg
pub static COVER_JPEG_QUALITY: u8 = 90;

/// What came out of a single archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Cover {
        container: Container,
        path: Utf8PathBuf,
    },
    NoPages {
        container: Container,
    },
}

/// All the `.cbr` files directly under `dir`, sorted by file name.
/// The extension is matched case-sensitively, `a.cbr` and `a.CBR` would share the same cover name.
///
/// ## Errors
///
/// Fails if `dir` can't be read
pub fn list_archives(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let pattern = format!("{}/*.cbr", Pattern::escape(dir.as_str()));
    let mut archives = Vec::new();
    for path in glob_with(&pattern, MatchOptions::new())? {
        let path = match Utf8PathBuf::from_path_buf(path?) {
            Ok(path) => path,
            Err(path) => {
                error!("{}", Error::NonUtf8Path(path));
                continue;
            }
        };
        if path.is_file() {
            archives.push(path);
        }
    }
    archives.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(archives)
}

/// Jpeg pages are kept as is, other formats are re-encoded to jpeg
///
/// ## Errors
///
/// Fails if a non jpeg page can't be decoded
pub fn normalize_to_jpeg(name: &str, bytes: Bytes) -> Result<Bytes> {
    if is_jpeg_name(name) {
        return Ok(bytes);
    }

    debug!("re-encoding {name} to jpeg");
    let jpeg = Image::from_bytes(&bytes)?.to_jpeg_bytes(COVER_JPEG_QUALITY)?;

    Ok(jpeg.into())
}

/// Writes the first page of `archive` to `<dest>/<archive stem>.jpg`
///
/// ## Errors
///
/// Fails if `archive` is neither a RAR nor a ZIP archive,
/// or if its first page can't be read, decoded, or written
pub fn extract_cover(archive: &Utf8Path, dest: &Utf8Path, unrar: &Unrar) -> Result<Extraction> {
    let Some(stem) = archive.file_stem() else {
        return Err(Error::NoFileName(archive.to_owned()));
    };

    let (container, bytes, page) = {
        let (container, mut reader) = Container::probe(archive, unrar)?;
        let Some(page) = reader.first_page_name() else {
            return Ok(Extraction::NoPages { container });
        };
        (container, reader.read_by_name(&page)?, page)
    };

    let path = dest.join(format!("{stem}.jpg"));
    fs::write(&path, normalize_to_jpeg(&page, bytes)?)?;

    Ok(Extraction::Cover { container, path })
}

/// Extracts the covers of all the `.cbr` archives of `src` into `dest`, in archive name order.
/// Archives without pages, or that can't be read, are reported and skipped.
///
/// ## Errors
///
/// Fails if `dest` can't be created or `src` can't be listed
pub fn extract_covers(src: &Utf8Path, dest: &Utf8Path, unrar: &Unrar) -> Result<Vec<Utf8PathBuf>> {
    fs::create_dir_all(dest)?;

    let mut covers = Vec::new();
    for archive in list_archives(src)? {
        let name = archive.file_name().unwrap_or(archive.as_str());
        match extract_cover(&archive, dest, unrar) {
            Ok(Extraction::Cover { container, path }) => {
                info!("extracted cover of {name} ({container})");
                covers.push(path);
            }
            Ok(Extraction::NoPages { .. }) => warn!("no pages in {name}"),
            Err(err) => error!("{name}: {err}"),
        }
    }

    Ok(covers)
}
