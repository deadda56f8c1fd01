use std::{fs, io, sync::LazyLock};

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use tracing::debug;

use crate::errors::{Error, Result};

/// Directory, next to the source directory, where the posters end up
pub static POSTER_DIR_NAME: &str = ".poster";

/// A volume number or range ending the name: " 5", "_05", " 01-12", " - 3", " 1 – 7"
static TRAILING_NUMBERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s*[-_–]\s*|\s+)\d+(?:\s*[-–]\s*\d+)?\s*$")
        .expect("trailing numbers regex is valid")
});

static WHITESPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespaces regex is valid"));

/// Turns a series directory name into the stem of its poster:
/// `"Largo Winch 01-12"` becomes `"Largo Winch_poster"`
#[must_use]
pub fn clean_name(folder_name: &str) -> String {
    let stripped = TRAILING_NUMBERS.replace(folder_name, "");
    let mut name = WHITESPACES.replace_all(stripped.trim(), " ").into_owned();
    if name.is_empty() {
        name = folder_name.trim().to_string();
    }

    format!("{name}_poster")
}

/// File name of the poster of the `folder_name` series, safe to use on any platform
#[must_use]
pub fn poster_file_name(folder_name: &str) -> String {
    sanitize_filename::sanitize(format!("{}.jpg", clean_name(folder_name)))
}

/// Moves `poster` to `<parent of source_dir>/.poster/<poster file name>`,
/// replacing any previous poster of the same series
///
/// ## Errors
///
/// Fails if `source_dir` has no name, or if the poster can't be moved
pub fn move_to_poster_dir(poster: &Utf8Path, source_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let Some(folder_name) = source_dir.file_name() else {
        return Err(Error::NoFileName(source_dir.to_owned()));
    };
    let poster_dir = source_dir
        .parent()
        .unwrap_or(source_dir)
        .join(POSTER_DIR_NAME);
    fs::create_dir_all(&poster_dir)?;

    let final_path = poster_dir.join(poster_file_name(folder_name));
    if final_path.exists() {
        debug!("replacing {final_path}");
        fs::remove_file(&final_path)?;
    }

    match fs::rename(poster, &final_path) {
        Ok(()) => {}
        // Renaming can't cross file systems
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            debug!("rename failed ({err}), copying instead");
            fs::copy(poster, &final_path)?;
            fs::remove_file(poster)?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(final_path)
}
