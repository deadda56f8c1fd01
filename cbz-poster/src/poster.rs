use std::fs;

use camino::Utf8Path;
use cbz::image::{encode_jpeg, Image};
use image::{imageops, RgbImage};
use tracing::{debug, info};

use crate::{
    errors::{Error, Result},
    layout::Layout,
};

pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 600;

pub const DEFAULT_PADDING: u32 = 0;

pub static POSTER_JPEG_QUALITY: u8 = 95;

/// Name of the poster file, written in the source directory before being moved
pub static POSTER_FILE_NAME: &str = "poster.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterOptions {
    /// Height every cover is resized to
    pub height: u32,
    /// Space left between rows and columns
    pub padding: u32,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_THUMBNAIL_HEIGHT,
            padding: DEFAULT_PADDING,
        }
    }
}

/// Lays the `covers` out in a grid, row by row, on a black canvas.
/// Returns `None` when there is no cover.
///
/// ## Errors
///
/// Fails if any cover can't be decoded, if the options are invalid,
/// or if the poster would be too large
pub fn render_poster(
    covers: &[impl AsRef<Utf8Path>],
    options: PosterOptions,
) -> Result<Option<RgbImage>> {
    if covers.is_empty() {
        return Ok(None);
    }
    if options.height == 0 {
        return Err(Error::ZeroHeight);
    }
    if u32::try_from(covers.len()).is_err() {
        return Err(Error::TooManyCovers(covers.len()));
    }

    let thumbnails = covers
        .iter()
        .map(|cover| -> Result<RgbImage> {
            let cover = cover.as_ref();
            debug!("resizing {cover}");
            Ok(Image::open(cover)?.resize_to_height(options.height).into_rgb8())
        })
        .collect::<Result<Vec<_>>>()?;

    let widths = thumbnails.iter().map(RgbImage::width).collect::<Vec<_>>();
    let layout = Layout::new(&widths, options.height, options.padding)?;
    let shape = layout.shape();
    debug!(
        "{} covers on {} columns and {} rows",
        thumbnails.len(),
        shape.columns,
        shape.rows
    );

    let mut canvas = RgbImage::new(layout.canvas_width(), layout.canvas_height());
    for (index, thumbnail) in (0_u32..).zip(&thumbnails) {
        let (x, y) = layout.position(index);
        imageops::replace(&mut canvas, thumbnail, i64::from(x), i64::from(y));
    }

    Ok(Some(canvas))
}

/// Renders the poster and writes it to `out_file` as a jpeg.
/// Nothing is written, and `false` is returned, when there is no cover.
///
/// ## Errors
///
/// Fails if the poster can't be rendered or written, in which case `out_file` isn't touched
pub fn build_poster(
    covers: &[impl AsRef<Utf8Path>],
    out_file: &Utf8Path,
    options: PosterOptions,
) -> Result<bool> {
    let Some(poster) = render_poster(covers, options)? else {
        return Ok(false);
    };

    let bytes = encode_jpeg(&poster, POSTER_JPEG_QUALITY)?;
    fs::write(out_file, bytes)?;
    info!(
        "poster saved as {out_file} ({}x{})",
        poster.width(),
        poster.height()
    );

    Ok(true)
}
