use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported pixel encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Invalid image layout: {0}")]
    InvalidLayout(String),

    #[error("Cannot store file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
