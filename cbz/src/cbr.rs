use std::{
    env,
    ffi::OsStr,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::{Archive, ArchiveRead, Error, Result};

/// Common prefix of the RAR 1.5 to 4.x and RAR 5 signatures
pub const RAR_SIGNATURE: [u8; 6] = *b"Rar!\x1a\x07";

/// Where the UnRAR executable is looked for, in order.
/// Bare names are resolved against the `PATH`.
pub static UNRAR_CANDIDATES: [&str; 6] = [
    r"C:\Program Files\WinRAR\unrar.exe",
    r"C:\Program Files\WinRAR\UnRAR.exe",
    r"C:\Program Files (x86)\WinRAR\unrar.exe",
    r"C:\Program Files (x86)\WinRAR\UnRAR.exe",
    "unrar.exe",
    "unrar",
];

/// Handle on the external UnRAR executable used to read RAR archives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrar {
    program: PathBuf,
}

impl Unrar {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Looks for UnRAR in the well known install locations, then in the `PATH`
    ///
    /// ## Errors
    ///
    /// Fails if none of the `UNRAR_CANDIDATES` exists
    pub fn locate() -> Result<Self> {
        Self::locate_from(&UNRAR_CANDIDATES, env::var_os("PATH").as_deref())
            .ok_or(Error::UnrarNotFound)
    }

    #[must_use]
    pub fn locate_from(candidates: &[&str], search_path: Option<&OsStr>) -> Option<Self> {
        candidates.iter().find_map(|candidate| {
            let candidate = Path::new(candidate);
            if candidate.is_file() {
                return Some(Self::new(candidate));
            }

            // Only bare program names are looked up in the search path
            if candidate.components().count() != 1 {
                return None;
            }

            env::split_paths(search_path?)
                .map(|dir| dir.join(candidate))
                .find(|path| path.is_file())
                .map(Self::new)
        })
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Bare listing of all the entries of `archive`
    ///
    /// ## Errors
    ///
    /// Fails if UnRAR can't be started or exits with an error
    pub fn list(&self, archive: &Utf8Path) -> Result<Vec<String>> {
        let stdout = self.run(&[
            OsStr::new("lb"),
            OsStr::new("-p-"),
            OsStr::new("--"),
            archive.as_os_str(),
        ])?;

        Ok(String::from_utf8_lossy(&stdout)
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Content of the `name` entry of `archive`, as printed by UnRAR on its standard output
    ///
    /// ## Errors
    ///
    /// Fails if UnRAR can't be started or exits with an error
    pub fn print(&self, archive: &Utf8Path, name: &str) -> Result<Bytes> {
        let stdout = self.run(&[
            OsStr::new("p"),
            OsStr::new("-inul"),
            OsStr::new("-p-"),
            OsStr::new("--"),
            archive.as_os_str(),
            OsStr::new(name),
        ])?;

        Ok(stdout.into())
    }

    fn run(&self, args: &[&OsStr]) -> Result<Vec<u8>> {
        debug!(
            "running {} {}",
            self.program.display(),
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::UnrarSpawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::Unrar {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Whether the file at `path` starts with a RAR signature
///
/// ## Errors
///
/// Fails if the file can't be open or read
pub fn has_rar_signature(path: impl AsRef<Path>) -> Result<bool> {
    let mut head = [0; RAR_SIGNATURE.len()];
    match File::open(path)?.read_exact(&mut head) {
        Ok(()) => Ok(head == RAR_SIGNATURE),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// A RAR archive read through UnRAR. The entry list is fetched once, on open.
#[derive(Debug)]
pub struct CbrReader {
    unrar: Unrar,
    path: Utf8PathBuf,
    file_names: Vec<String>,
}

impl CbrReader {
    /// Opens the RAR archive located under `path`
    ///
    /// ## Errors
    ///
    /// Fails if the file isn't a RAR archive, or if UnRAR can't list its content
    pub fn from_path(unrar: &Unrar, path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        if !has_rar_signature(path)? {
            return Err(Error::NotRar(path.to_owned()));
        }

        let file_names = unrar.list(path)?;
        debug!("{path} lists {} entries", file_names.len());

        Ok(Self {
            unrar: unrar.clone(),
            path: path.to_owned(),
            file_names,
        })
    }
}

impl Archive for CbrReader {
    fn len(&self) -> usize {
        self.file_names.len()
    }
}

impl ArchiveRead for CbrReader {
    fn file_names(&self) -> Vec<&str> {
        self.file_names.iter().map(String::as_str).collect()
    }

    fn read_by_name(&mut self, name: &str) -> Result<Bytes> {
        if !self.file_names.iter().any(|file_name| file_name == name) {
            return Err(Error::EntryNotFound(name.to_string()));
        }

        self.unrar.print(&self.path, name)
    }
}
