//! PNG encoder backed by the `png` crate.
//!
//! PNG stores 16 bit samples big-endian, so little-endian sources are
//! byte-swapped row by row while streaming.

use std::io::Write;

use tracing::debug;

use crate::image_store::common::error::{Result, StoreError};
use crate::image_store::store::validate_layout;
use crate::image_store::types::{Image, PixelEncoding};
use crate::image_store::writer::ImageWriter;

pub struct PngWriter;

fn encode_error(e: png::EncodingError) -> StoreError {
    StoreError::EncodeError(e.to_string())
}

impl ImageWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_image(&self, image: &Image, output: &mut dyn Write) -> Result<()> {
        let row_bytes = validate_layout(image)?;
        let (depth, swap) = match &image.encoding {
            PixelEncoding::Mono8 => (png::BitDepth::Eight, false),
            PixelEncoding::Mono16 => (png::BitDepth::Sixteen, !image.is_bigendian),
            PixelEncoding::Other(label) => {
                return Err(StoreError::UnsupportedEncoding(label.clone()));
            }
        };

        debug!(
            "Encoding PNG image: {}x{} {} (swap: {})",
            image.width, image.height, image.encoding, swap
        );

        let mut encoder = png::Encoder::new(output, image.width, image.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(depth);

        let mut writer = encoder.write_header().map_err(encode_error)?;
        let mut stream = writer.stream_writer().map_err(encode_error)?;

        let mut swapped = Vec::with_capacity(if swap { row_bytes } else { 0 });

        for row in image.rows(row_bytes) {
            if swap {
                swapped.clear();
                swapped.extend(row.chunks_exact(2).flat_map(|s| [s[1], s[0]]));
                stream.write_all(&swapped)?;
            } else {
                stream.write_all(row)?;
            }
        }

        stream.finish().map_err(encode_error)?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
