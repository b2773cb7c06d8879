//! Image store module
//!
//! This module persists received image sets: one raster file per present
//! channel, a unique file name per image and a calibration text file for
//! every disparity image.

pub mod common;
pub mod file_name;
pub mod format;
pub mod params;
pub mod types;
mod store;
mod writer;
#[cfg(feature = "png")]
mod png_writer;
#[cfg(feature = "tiff")]
mod tiff_writer;


pub use common::{Result, StoreError};

pub use file_name::{ensure_new_file_name, gpio_suffix};
pub use format::ImageFormat;
pub use params::{format_params, store_param_txt};
pub use store::{ImageSetStore, store_image, store_image_set, store_image_with, validate_layout};
pub use types::{DisparityImage, Gpios, Image, ImageSet, PixelEncoding, Timestamp};
pub use writer::ImageWriter;

#[cfg(feature = "png")]
pub use png_writer::PngWriter;
#[cfg(feature = "tiff")]
pub use tiff_writer::TiffWriter;
