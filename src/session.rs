//! Streaming session module
//!
//! Connects to the image interface server, requests a continuous stream of
//! image sets and hands every received set to the image store.

pub mod client;
pub mod config;
pub mod error;
pub mod proto;
mod runner;

pub use client::ImageInterfaceClient;
pub use config::{ChannelSelection, DEFAULT_TARGET, SessionConfig, SessionConfigBuilder, mesh_options};
pub use error::{Result, SessionError};
pub use proto::{BinningMethod, ImageSetRequest, MeshOptions};
pub use runner::{Session, SessionStats};
