#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek},
    path::Path,
};

use bytes::Bytes;
use zip::{read::ZipFile, ZipArchive};

pub use crate::{
    cbr::{CbrReader, Unrar},
    container::Container,
    errors::{Error, Result},
};

pub mod cbr;
pub mod container;
pub mod errors;
pub mod image;

/// Suffixes, lowercased, of the entries treated as comic pages
pub static PAGE_SUFFIXES: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Whether the entry `name` ends with one of the `PAGE_SUFFIXES`, ignoring case
#[must_use]
pub fn is_page_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    PAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Whether the entry `name` is a jpeg file that can be used without re-encoding
#[must_use]
pub fn is_jpeg_name(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.ends_with(".jpg") || name.ends_with(".jpeg")
}

pub trait Archive {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait ArchiveRead: Archive {
    fn file_names(&self) -> Vec<&str>;

    /// Lookup the file by `name` in the archive and returns its whole content
    ///
    /// ## Errors
    ///
    /// Fails if the file doesn't exist or if the content can't be read
    fn read_by_name(&mut self, name: &str) -> Result<Bytes>;

    /// Names of the page entries, sorted
    fn page_names(&self) -> Vec<&str> {
        let mut page_names = self
            .file_names()
            .into_iter()
            .filter(|name| is_page_name(name))
            .collect::<Vec<_>>();
        page_names.sort_unstable();

        page_names
    }

    /// The first page in name order, which is the cover for all well formed comic archives
    fn first_page_name(&self) -> Option<String> {
        self.page_names().first().map(ToString::to_string)
    }
}

pub struct CbzFile<'a>(ZipFile<'a>);

impl CbzFile<'_> {
    pub fn size(&self) -> u64 {
        self.0.size()
    }

    /// Convert the file content to `Bytes`
    ///
    /// ## Errors
    ///
    /// Fails if file size is too large to fit a `usize` on host machine
    /// or if the content can't be read
    pub fn to_bytes(&mut self) -> Result<Bytes> {
        let mut buf = Vec::with_capacity(
            self.size()
                .try_into()
                .map_err(|_| Error::FileSizeConversion)?,
        );

        self.0.read_to_end(&mut buf)?;

        Ok(buf.into())
    }
}

impl<'a> From<ZipFile<'a>> for CbzFile<'a> {
    fn from(zip_file: ZipFile<'a>) -> Self {
        Self(zip_file)
    }
}

#[derive(Debug)]
pub struct CbzReader<R> {
    archive: ZipArchive<R>,
}

impl<R> CbzReader<R> {
    pub fn new(archive: ZipArchive<R>) -> Self {
        Self { archive }
    }
}

impl<R> CbzReader<R>
where
    R: Read + Seek,
{
    /// Creates `CbzReader` from a `Read`
    ///
    /// ## Errors
    ///
    /// Fails if the underlying `ZipArchive` can't be created
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;

        Ok(Self::new(archive))
    }
}

impl CbzReader<BufReader<File>> {
    /// Creates `CbzReader` from a path
    ///
    /// ## Errors
    ///
    /// Fails if the file can't be open or the underlying `ZipArchive` can't be created
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;

        Self::from_reader(BufReader::new(file))
    }
}

impl<'b> CbzReader<Cursor<&'b [u8]>> {
    /// Creates `CbzReader` from a bytes slice
    ///
    /// ## Errors
    ///
    /// Fails if the underlying `ZipArchive` can't be created
    pub fn from_bytes_slice(bytes: &'b [u8]) -> Result<Self> {
        let cursor = Cursor::new(bytes);

        Self::from_reader(cursor)
    }
}

impl<R> Archive for CbzReader<R>
where
    R: Read + Seek,
{
    fn len(&self) -> usize {
        self.archive.len()
    }
}

impl<R> ArchiveRead for CbzReader<R>
where
    R: Read + Seek,
{
    fn file_names(&self) -> Vec<&str> {
        self.archive.file_names().collect()
    }

    fn read_by_name(&mut self, name: &str) -> Result<Bytes> {
        let mut file: CbzFile<'_> = match self.archive.by_name(name) {
            Ok(file) => file.into(),
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(Error::EntryNotFound(name.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        file.to_bytes()
    }
}
