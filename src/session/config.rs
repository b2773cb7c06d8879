//! Session configuration types

use std::path::PathBuf;

use crate::image_store::ImageFormat;
use crate::session::proto::{BinningMethod, ImageSetRequest, MeshOptions};

/// Target used when none is given
pub const DEFAULT_TARGET: &str = "172.17.0.1:50051";

/// Which image channels the server should stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSelection {
    pub left: bool,
    pub right: bool,
    pub disparity: bool,
    pub confidence: bool,
    pub disparity_error: bool,
}

impl Default for ChannelSelection {
    fn default() -> Self {
        Self {
            left: true,
            right: false,
            disparity: true,
            confidence: false,
            disparity_error: false,
        }
    }
}

/// Configuration of one streaming session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// `IP:port` or URI of the image interface server
    pub target: String,
    pub channels: ChannelSelection,
    /// Mesh options passed through to the server; `None` disables the mesh
    pub mesh: Option<MeshOptions>,
    /// Request color images where the sensor supports them
    pub color: bool,
    /// Directory to store received images in; `None` only prints them
    pub output_dir: Option<PathBuf>,
    pub format: ImageFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            channels: ChannelSelection::default(),
            mesh: None,
            color: false,
            output_dir: None,
            format: ImageFormat::default(),
        }
    }
}

impl SessionConfig {
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Builds the request sent to the server.
    pub fn request(&self) -> ImageSetRequest {
        ImageSetRequest {
            left_enabled: self.channels.left,
            right_enabled: self.channels.right,
            disparity_enabled: self.channels.disparity,
            confidence_enabled: self.channels.confidence,
            disparity_error_enabled: self.channels.disparity_error,
            mesh_enabled: self.mesh.is_some(),
            mesh_options: self.mesh,
            color: self.color,
        }
    }
}

/// Builder for SessionConfig
#[derive(Default)]
pub struct SessionConfigBuilder {
    target: Option<String>,
    channels: Option<ChannelSelection>,
    mesh: Option<Option<MeshOptions>>,
    color: Option<bool>,
    output_dir: Option<Option<PathBuf>>,
    format: Option<ImageFormat>,
}

impl SessionConfigBuilder {
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn channels(mut self, channels: ChannelSelection) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn mesh(mut self, mesh: Option<MeshOptions>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn color(mut self, enable: bool) -> Self {
        self.color = Some(enable);
        self
    }

    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn build(self) -> SessionConfig {
        let default = SessionConfig::default();
        SessionConfig {
            target: self.target.unwrap_or(default.target),
            channels: self.channels.unwrap_or(default.channels),
            mesh: self.mesh.unwrap_or(default.mesh),
            color: self.color.unwrap_or(default.color),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            format: self.format.unwrap_or(default.format),
        }
    }
}

/// Mesh options with the given binning method
pub fn mesh_options(max_points: u32, binning: BinningMethod, watertight: bool, textured: bool) -> MeshOptions {
    MeshOptions {
        max_points,
        binning_method: binning as i32,
        watertight,
        textured,
    }
}
