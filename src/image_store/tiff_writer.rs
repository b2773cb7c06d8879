use std::io::{Cursor, Write};

use tiff::encoder::{TiffEncoder, colortype};
use tracing::debug;

use crate::image_store::common::error::{Result, StoreError};
use crate::image_store::store::validate_layout;
use crate::image_store::types::{Image, PixelEncoding};
use crate::image_store::writer::ImageWriter;

/// Uncompressed grayscale TIFF encoder.
///
/// Samples are decoded into native `u16` values using the byte order the
/// image declares; the encoder records its own byte order in the header.
pub struct TiffWriter;

impl ImageWriter for TiffWriter {
    fn extension(&self) -> &'static str {
        "tif"
    }

    fn write_image(&self, image: &Image, output: &mut dyn Write) -> Result<()> {
        let row_bytes = validate_layout(image)?;
        debug!("Encoding TIFF image: {}x{} {}", image.width, image.height, image.encoding);

        let mut buffer = Vec::new();

        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| StoreError::EncodeError(e.to_string()))?;

            let result = match &image.encoding {
                PixelEncoding::Mono8 => {
                    let data: Vec<u8> = image.rows(row_bytes).flatten().copied().collect();
                    encoder.write_image::<colortype::Gray8>(image.width, image.height, &data)
                }
                PixelEncoding::Mono16 => {
                    let data: Vec<u16> = image
                        .rows(row_bytes)
                        .flat_map(|row| row.chunks_exact(2))
                        .map(|s| {
                            if image.is_bigendian {
                                u16::from_be_bytes([s[0], s[1]])
                            } else {
                                u16::from_le_bytes([s[0], s[1]])
                            }
                        })
                        .collect();
                    encoder.write_image::<colortype::Gray16>(image.width, image.height, &data)
                }
                PixelEncoding::Other(label) => {
                    return Err(StoreError::UnsupportedEncoding(label.clone()));
                }
            };
            result.map_err(|e| StoreError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::decoder::{Decoder, DecodingResult};

    #[test]
    fn test_mono16_samples_follow_declared_byte_order() {
        let mut image = Image::new(PixelEncoding::Mono16, 2, 1, vec![0x12, 0x34, 0xAB, 0xCD]);
        image.is_bigendian = true;

        let mut out = Vec::new();
        TiffWriter.write_image(&image, &mut out).unwrap();

        let mut decoder = Decoder::new(Cursor::new(out)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (2, 1));
        match decoder.read_image().unwrap() {
            DecodingResult::U16(samples) => assert_eq!(samples, vec![0x1234, 0xABCD]),
            _ => panic!("expected 16 bit samples"),
        }
    }

    #[test]
    fn test_mono8_skips_row_padding() {
        let mut image = Image::new(PixelEncoding::Mono8, 2, 2, vec![1, 2, 0, 3, 4, 0]);
        image.step = 3;

        let mut out = Vec::new();
        TiffWriter.write_image(&image, &mut out).unwrap();

        let mut decoder = Decoder::new(Cursor::new(out)).unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::U8(samples) => assert_eq!(samples, vec![1, 2, 3, 4]),
            _ => panic!("expected 8 bit samples"),
        }
    }

    #[test]
    fn test_small_stride_is_rejected_without_output() {
        let mut image = Image::new(PixelEncoding::Mono16, 4, 2, vec![0; 16]);
        image.step = 4;

        let mut out = Vec::new();
        let result = TiffWriter.write_image(&image, &mut out);
        assert!(matches!(result, Err(StoreError::InvalidLayout(_))));
        assert!(out.is_empty());
    }
}
