use std::io::Write;

use crate::image_store::common::error::Result;
use crate::image_store::types::Image;

/// Encoder for one raster file format
pub trait ImageWriter {
    /// File name extension without the leading dot
    fn extension(&self) -> &'static str;

    /// Encodes `image` into `output`.
    ///
    /// Implementations may assume the layout was validated with
    /// [`crate::image_store::validate_layout`].
    fn write_image(&self, image: &Image, output: &mut dyn Write) -> Result<()>;
}
