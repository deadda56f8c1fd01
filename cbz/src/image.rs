use std::{
    io::{BufRead, Cursor, Seek},
    path::Path,
};

use image::{
    codecs::jpeg::JpegEncoder, imageops::FilterType, io::Reader as ImageReader, ColorType,
    DynamicImage, ImageFormat, RgbImage,
};

use crate::Result;

#[derive(Debug, PartialEq)]
pub struct Image {
    dynamic_image: DynamicImage,
    format: Option<ImageFormat>,
}

impl Image {
    /// ## Errors
    ///
    /// Fails if the image can't be open or decoded
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = ImageReader::open(&path)?.with_guessed_format()?;
        let format = reader.format();
        Ok(Self {
            dynamic_image: reader.decode()?,
            format,
        })
    }

    /// ## Errors
    ///
    /// Fails if the image format can't be guessed or the image can't be decoded
    pub fn from_reader(reader: impl BufRead + Seek) -> Result<Self> {
        let reader = ImageReader::new(reader).with_guessed_format()?;
        let format = reader.format();
        Ok(Self {
            dynamic_image: reader.decode()?,
            format,
        })
    }

    /// ## Errors
    ///
    /// Fails if the image format can't be guessed or the image can't be decoded
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.dynamic_image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.dynamic_image.height()
    }

    #[must_use]
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Resizes the image to exactly `height` pixels tall, keeping its aspect ratio
    #[must_use]
    pub fn resize_to_height(self, height: u32) -> Self {
        let width = scaled_width(self.width(), self.height(), height);
        Self {
            dynamic_image: self
                .dynamic_image
                .resize_exact(width, height, FilterType::Lanczos3),
            format: self.format,
        }
    }

    /// Drops the alpha channel, if any
    #[must_use]
    pub fn into_rgb8(self) -> RgbImage {
        self.dynamic_image.into_rgb8()
    }

    /// ## Errors
    ///
    /// Fails if the encoder fails
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        encode_jpeg(&self.dynamic_image.to_rgb8(), quality)
    }
}

/// Width of a `width`×`height` image once resized to `target_height`, rounded half to even and never null
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    if height == 0 {
        return width.max(1);
    }

    let scaled = (f64::from(width) * f64::from(target_height) / f64::from(height))
        .round_ties_even();

    (scaled as u32).max(1)
}

/// ## Errors
///
/// Fails if the encoder fails
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality).encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgb8,
    )?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image::RgbaImage::new(width, height))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();

        out.into_inner()
    }

    #[test]
    fn scaled_width_rounds() {
        assert_eq!(scaled_width(400, 600, 600), 400);
        assert_eq!(scaled_width(800, 1200, 600), 400);
        assert_eq!(scaled_width(1000, 1500, 600), 400);
        // 333.33...
        assert_eq!(scaled_width(500, 900, 600), 333);
        // 466.66...
        assert_eq!(scaled_width(700, 900, 600), 467);
        // Halves go to the even neighbour
        assert_eq!(scaled_width(1001, 1200, 600), 500);
        assert_eq!(scaled_width(1003, 1200, 600), 502);
        assert_eq!(scaled_width(1, 2, 1), 1);
        assert_eq!(scaled_width(1, 10_000, 600), 1);
    }

    #[test]
    fn resize_to_height_keeps_aspect_ratio() {
        let image = Image::from_bytes(&png_bytes(300, 450)).unwrap();
        assert_eq!(image.format(), Some(ImageFormat::Png));

        let image = image.resize_to_height(600);
        assert_eq!((image.width(), image.height()), (400, 600));
    }

    #[test]
    fn jpeg_encoding_drops_alpha() {
        let image = Image::from_bytes(&png_bytes(20, 10)).unwrap();
        let jpeg = image.to_jpeg_bytes(90).unwrap();

        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let decoded = Image::from_bytes(&jpeg).unwrap();
        assert_eq!(decoded.format(), Some(ImageFormat::Jpeg));
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn encode_jpeg_is_deterministic() {
        let image = RgbImage::from_pixel(16, 16, Rgb([200, 30, 30]));

        assert_eq!(
            encode_jpeg(&image, 95).unwrap(),
            encode_jpeg(&image, 95).unwrap()
        );
    }

    #[test]
    fn garbage_is_not_an_image() {
        assert!(Image::from_bytes(b"not an image").is_err());
    }
}
