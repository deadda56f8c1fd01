#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub use crate::{
    cover::{extract_cover, extract_covers, Extraction, SCRATCH_DIR_NAME},
    errors::{Error, Result},
    layout::{GridShape, Layout},
    naming::{clean_name, move_to_poster_dir, poster_file_name},
    paths::expand_home,
    poster::{build_poster, render_poster, PosterOptions, POSTER_FILE_NAME},
};

pub mod cover;
pub mod errors;
pub mod layout;
pub mod naming;
pub mod paths;
pub mod poster;
