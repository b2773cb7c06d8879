//! Image set data types

use std::fmt;

/// Capture time of an image set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp {
    pub sec: i32,
    pub nsec: i32,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.sec, self.nsec)
    }
}

/// Pixel encoding of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelEncoding {
    /// 8 bit monochrome
    Mono8,
    /// 16 bit monochrome
    Mono16,
    /// Any other encoding label sent by the server
    Other(String),
}

impl PixelEncoding {
    pub fn from_label(label: &str) -> Self {
        match label {
            "mono8" => PixelEncoding::Mono8,
            "mono16" => PixelEncoding::Mono16,
            other => PixelEncoding::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PixelEncoding::Mono8 => "mono8",
            PixelEncoding::Mono16 => "mono16",
            PixelEncoding::Other(label) => label,
        }
    }

    /// Bytes per pixel, `None` for encodings that cannot be stored
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelEncoding::Mono8 => Some(1),
            PixelEncoding::Mono16 => Some(2),
            PixelEncoding::Other(_) => None,
        }
    }
}

impl fmt::Display for PixelEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Digital I/O state at capture time, one bit per line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gpios {
    /// Lines configured as inputs
    pub inputs: u32,
    /// Lines configured as outputs
    pub outputs: u32,
    /// Current value of every line
    pub values: u32,
}

/// A single 2-D raster received from the server
#[derive(Debug, Clone)]
pub struct Image {
    pub encoding: PixelEncoding,
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Row length in bytes, including padding
    pub step: u32,
    /// Byte order of multi-byte samples
    pub is_bigendian: bool,
    pub data: Vec<u8>,
    pub gpios: Gpios,
    pub focal_length: f32,
    pub principal_point_u: f32,
    pub principal_point_v: f32,
    pub exposure_time: f32,
    pub gain: f32,
    pub noise: f32,
    pub out1_reduction: f32,
    pub brightness: f32,
}

impl Image {
    /// Creates a tightly packed image without camera metadata.
    pub fn new(encoding: PixelEncoding, width: u32, height: u32, data: Vec<u8>) -> Self {
        let bpp = encoding.bytes_per_pixel().unwrap_or(1) as u32;
        Self {
            encoding,
            width,
            height,
            step: width * bpp,
            is_bigendian: false,
            data,
            gpios: Gpios::default(),
            focal_length: 0.0,
            principal_point_u: 0.0,
            principal_point_v: 0.0,
            exposure_time: 0.0,
            gain: 0.0,
            noise: 0.0,
            out1_reduction: 0.0,
            brightness: 0.0,
        }
    }

    /// Iterates over the pixel bytes of every row, skipping the row padding.
    ///
    /// The layout must have been checked with [`crate::image_store::validate_layout`].
    pub(crate) fn rows(&self, row_bytes: usize) -> impl Iterator<Item = &[u8]> {
        let step = self.step as usize;
        (0..self.height as usize).map(move |k| &self.data[k * step..k * step + row_bytes])
    }
}

/// Disparity image together with the stereo parameters needed to interpret it
#[derive(Debug, Clone)]
pub struct DisparityImage {
    pub image: Image,
    /// Stereo baseline in meters
    pub baseline: f32,
    pub scale: f32,
    pub offset: f32,
    pub invalid_data_value: f32,
}

/// One bundle of images captured at the same time
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    pub timestamp: Timestamp,
    pub left: Option<Image>,
    pub right: Option<Image>,
    pub disparity: Option<DisparityImage>,
    pub confidence: Option<Image>,
    pub disparity_error: Option<Image>,
}

impl ImageSet {
    /// Presence flags formatted as `[l: 1, r: 0, d: 1, c: 0, e: 0]`
    pub fn presence(&self) -> String {
        format!(
            "[l: {}, r: {}, d: {}, c: {}, e: {}]",
            self.left.is_some() as u8,
            self.right.is_some() as u8,
            self.disparity.is_some() as u8,
            self.confidence.is_some() as u8,
            self.disparity_error.is_some() as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_pads_nanoseconds() {
        let ts = Timestamp { sec: 1612345678, nsec: 4200 };
        assert_eq!(ts.to_string(), "1612345678.000004200");
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(PixelEncoding::from_label("mono8"), PixelEncoding::Mono8);
        assert_eq!(PixelEncoding::from_label("mono16"), PixelEncoding::Mono16);
        assert_eq!(
            PixelEncoding::from_label("rgb8"),
            PixelEncoding::Other("rgb8".to_string())
        );
        assert_eq!(PixelEncoding::Other("yuv422".into()).bytes_per_pixel(), None);
    }

    #[test]
    fn test_rows_skip_padding() {
        let mut image = Image::new(PixelEncoding::Mono8, 2, 2, vec![1, 2, 99, 3, 4, 99]);
        image.step = 3;
        let rows: Vec<&[u8]> = image.rows(2).collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..]]);
    }

    #[test]
    fn test_presence_flags() {
        let set = ImageSet {
            left: Some(Image::new(PixelEncoding::Mono8, 1, 1, vec![0])),
            ..Default::default()
        };
        assert_eq!(set.presence(), "[l: 1, r: 0, d: 0, c: 0, e: 0]");
    }
}
