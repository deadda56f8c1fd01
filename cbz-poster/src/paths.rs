use std::path::is_separator;

use camino::{Utf8Path, Utf8PathBuf};

/// Expands a leading `~` of `path` to the home directory of the current user
#[must_use]
pub fn expand_home(path: &str) -> Utf8PathBuf {
    let home = home::home_dir().and_then(|home| Utf8PathBuf::from_path_buf(home).ok());

    expand_home_with(path, home.as_deref())
}

/// `path` is kept as is when `home` is unknown, or for the `~user` form
#[must_use]
pub fn expand_home_with(path: &str, home: Option<&Utf8Path>) -> Utf8PathBuf {
    let (Some(home), Some(rest)) = (home, path.strip_prefix('~')) else {
        return path.into();
    };

    if rest.is_empty() {
        return home.to_owned();
    }

    match rest.strip_prefix(is_separator) {
        Some(rest) => home.join(rest),
        None => path.into(),
    }
}
