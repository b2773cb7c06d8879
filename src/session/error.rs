use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("StreamImageSets rpc failed with: code {}: {}", .0.code(), .0.message())]
    Status(#[from] tonic::Status),

    #[error("Image store: {0}")]
    Store(#[from] crate::image_store::StoreError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
