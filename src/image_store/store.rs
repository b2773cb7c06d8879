use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::image_store::{
    common::error::{Result, StoreError},
    file_name::{ensure_new_file_name, gpio_suffix, with_suffix},
    format::ImageFormat,
    params::store_param_txt,
    types::{Image, ImageSet, PixelEncoding},
    writer::ImageWriter,
};

/// Checks that the pixel buffer holds `height` rows of `step` bytes and that
/// every row covers `width` pixels. Returns the pixel bytes per row.
pub fn validate_layout(image: &Image) -> Result<usize> {
    let bpp = match &image.encoding {
        PixelEncoding::Mono8 => 1,
        PixelEncoding::Mono16 => 2,
        PixelEncoding::Other(label) => return Err(StoreError::UnsupportedEncoding(label.clone())),
    };

    if image.width == 0 || image.height == 0 {
        return Err(StoreError::InvalidDimensions(image.width, image.height));
    }

    let row_bytes = image.width as usize * bpp;
    let step = image.step as usize;
    if step < row_bytes {
        return Err(StoreError::InvalidLayout(format!(
            "row stride {step} is smaller than {row_bytes} bytes per row"
        )));
    }

    let required = (image.height as usize - 1) * step + row_bytes;
    if image.data.len() < required {
        return Err(StoreError::InvalidLayout(format!(
            "pixel buffer holds {} bytes, {} required",
            image.data.len(),
            required
        )));
    }

    Ok(row_bytes)
}

/// Stores `image` as `<prefix><gpio-suffix>.<ext>` in the given format.
///
/// Returns the path actually written, which carries an additional `_<n>`
/// counter if the plain name was already taken.
pub fn store_image(prefix: &Path, format: ImageFormat, image: &Image) -> Result<PathBuf> {
    let writer = format.writer()?;
    store_image_with(writer.as_ref(), prefix, image)
}

/// Same as [`store_image`] with an explicit encoder.
///
/// Encoding and layout are checked before the output file is created, so a
/// rejected image leaves nothing on disk. A file that fails while encoding is
/// removed again.
#[instrument(skip(writer, prefix, image), fields(prefix = %prefix.display(), encoding = %image.encoding))]
pub fn store_image_with(writer: &dyn ImageWriter, prefix: &Path, image: &Image) -> Result<PathBuf> {
    validate_layout(image)?;

    let stem = with_suffix(prefix, &gpio_suffix(&image.gpios));
    let path = ensure_new_file_name(&with_suffix(&stem, &format!(".{}", writer.extension())));

    let file = File::create(&path)
        .map_err(|e| StoreError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    let mut output = BufWriter::new(file);

    let result = writer
        .write_image(image, &mut output)
        .and_then(|()| output.flush().map_err(StoreError::from));

    if let Err(e) = result {
        drop(output);
        if let Err(remove_err) = fs::remove_file(&path) {
            warn!(path = %path.display(), "Failed to remove incomplete file: {}", remove_err);
        }
        return Err(e);
    }

    debug!(path = %path.display(), width = image.width, height = image.height, "Stored image");
    Ok(path)
}

/// Writes every channel of an image set below one output directory.
pub struct ImageSetStore {
    output_dir: PathBuf,
    writer: Box<dyn ImageWriter>,
}

impl ImageSetStore {
    /// Resolves the encoder for `format`; fails if it is not compiled in.
    pub fn new(output_dir: impl Into<PathBuf>, format: ImageFormat) -> Result<Self> {
        Ok(Self {
            output_dir: output_dir.into(),
            writer: format.writer()?,
        })
    }

    pub fn with_writer(output_dir: impl Into<PathBuf>, writer: Box<dyn ImageWriter>) -> Self {
        Self {
            output_dir: output_dir.into(),
            writer,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name prefix shared by all channels of `set`:
    /// `<dir>/image_<sec>.<nsec>_`.
    pub fn prefix(&self, set: &ImageSet) -> PathBuf {
        self.output_dir.join(format!("image_{}_", set.timestamp))
    }

    /// Stores all present channels in the order left, right, disparity
    /// (with its parameter file), confidence, error.
    ///
    /// The first failing channel aborts the set; files already written stay.
    #[instrument(skip(self, set), fields(timestamp = %set.timestamp))]
    pub fn store(&self, set: &ImageSet) -> Result<Vec<PathBuf>> {
        let prefix = self.prefix(set);
        let writer = self.writer.as_ref();
        let mut written = Vec::new();

        if let Some(left) = &set.left {
            written.push(store_image_with(writer, &with_suffix(&prefix, "left"), left)?);
        }
        if let Some(right) = &set.right {
            written.push(store_image_with(writer, &with_suffix(&prefix, "right"), right)?);
        }
        if let Some(disparity) = &set.disparity {
            let disparity_prefix = with_suffix(&prefix, "disparity");
            written.push(store_image_with(writer, &disparity_prefix, &disparity.image)?);
            written.push(store_param_txt(&disparity_prefix, disparity)?);
        }
        if let Some(confidence) = &set.confidence {
            written.push(store_image_with(writer, &with_suffix(&prefix, "confidence"), confidence)?);
        }
        if let Some(error) = &set.disparity_error {
            written.push(store_image_with(writer, &with_suffix(&prefix, "error"), error)?);
        }

        info!(files = written.len(), "Stored image set");
        Ok(written)
    }
}

/// Stores all present channels of `set` below `output_dir` in `format`.
pub fn store_image_set(output_dir: &Path, format: ImageFormat, set: &ImageSet) -> Result<Vec<PathBuf>> {
    ImageSetStore::new(output_dir, format)?.store(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_accepts_padded_rows() {
        let mut image = Image::new(PixelEncoding::Mono16, 3, 2, vec![0; 8 + 6]);
        image.step = 8;
        assert_eq!(validate_layout(&image).unwrap(), 6);
    }

    #[test]
    fn test_layout_rejects_short_buffer() {
        let image = Image::new(PixelEncoding::Mono8, 4, 4, vec![0; 15]);
        assert!(matches!(validate_layout(&image), Err(StoreError::InvalidLayout(_))));
    }

    #[test]
    fn test_layout_rejects_small_stride() {
        let mut image = Image::new(PixelEncoding::Mono16, 4, 1, vec![0; 8]);
        image.step = 4;
        assert!(matches!(validate_layout(&image), Err(StoreError::InvalidLayout(_))));
    }

    #[test]
    fn test_layout_rejects_empty_image() {
        let image = Image::new(PixelEncoding::Mono8, 0, 4, Vec::new());
        assert!(matches!(
            validate_layout(&image),
            Err(StoreError::InvalidDimensions(0, 4))
        ));
    }

    #[test]
    fn test_prefix_pads_nanoseconds() {
        let store = ImageSetStore::with_writer("/data/out", Box::new(NullWriter));
        let set = ImageSet {
            timestamp: crate::image_store::Timestamp { sec: 1612345678, nsec: 5 },
            ..Default::default()
        };
        assert_eq!(
            store.prefix(&set),
            PathBuf::from("/data/out/image_1612345678.000000005_")
        );
    }

    struct NullWriter;

    impl ImageWriter for NullWriter {
        fn extension(&self) -> &'static str {
            "raw"
        }

        fn write_image(&self, _image: &Image, _output: &mut dyn Write) -> Result<()> {
            Ok(())
        }
    }
}
