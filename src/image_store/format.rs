//! Output file formats and the encoders compiled in for them

use std::fmt;
use std::str::FromStr;

use crate::image_store::common::error::{Result, StoreError};
use crate::image_store::writer::ImageWriter;

/// Raster file format used for stored images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// Portable Network Graphics (`png` feature)
    #[default]
    Png,
    /// Uncompressed TIFF (`tiff` feature)
    Tiff,
}

impl ImageFormat {
    /// Returns the encoder for this format, or `UnsupportedFormat` when the
    /// corresponding feature was disabled at build time.
    pub fn writer(self) -> Result<Box<dyn ImageWriter>> {
        match self {
            ImageFormat::Png => png_writer(),
            ImageFormat::Tiff => tiff_writer(),
        }
    }

    pub fn is_supported(self) -> bool {
        self.writer().is_ok()
    }
}

#[cfg(feature = "png")]
fn png_writer() -> Result<Box<dyn ImageWriter>> {
    Ok(Box::new(crate::image_store::PngWriter))
}

#[cfg(not(feature = "png"))]
fn png_writer() -> Result<Box<dyn ImageWriter>> {
    Err(StoreError::UnsupportedFormat(
        "support for PNG image file format is not compiled in".to_string(),
    ))
}

#[cfg(feature = "tiff")]
fn tiff_writer() -> Result<Box<dyn ImageWriter>> {
    Ok(Box::new(crate::image_store::TiffWriter))
}

#[cfg(not(feature = "tiff"))]
fn tiff_writer() -> Result<Box<dyn ImageWriter>> {
    Err(StoreError::UnsupportedFormat(
        "support for TIFF image file format is not compiled in".to_string(),
    ))
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => f.write_str("png"),
            ImageFormat::Tiff => f.write_str("tiff"),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "tif" | "tiff" => Ok(ImageFormat::Tiff),
            other => Err(format!("unknown image format '{other}' (expected png or tiff)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("png".parse::<ImageFormat>(), Ok(ImageFormat::Png));
        assert_eq!("TIFF".parse::<ImageFormat>(), Ok(ImageFormat::Tiff));
        assert_eq!("tif".parse::<ImageFormat>(), Ok(ImageFormat::Tiff));
        assert!("jpeg".parse::<ImageFormat>().is_err());
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_png_writer_is_available() {
        let writer = ImageFormat::Png.writer().unwrap();
        assert_eq!(writer.extension(), "png");
    }

    #[cfg(not(feature = "tiff"))]
    #[test]
    fn test_missing_tiff_support_is_reported() {
        assert!(matches!(
            ImageFormat::Tiff.writer(),
            Err(StoreError::UnsupportedFormat(_))
        ));
        assert!(!ImageFormat::Tiff.is_supported());
    }
}
