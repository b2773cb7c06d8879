use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use grpc_image_client::image_store::ImageFormat;
use grpc_image_client::logger;
use grpc_image_client::session::{
    BinningMethod, ChannelSelection, Session, SessionConfig, mesh_options,
};

use tracing::info;

/// Stream ImageSets via gRPC.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Args {
    /// Target IP:port to connect to (e.g: 172.17.0.1:50051)
    target: String,

    /// Enable left image
    #[arg(
        short = 'l',
        value_name = "0|1",
        default_value = "1",
        action = ArgAction::Set,
        value_parser = parse_toggle
    )]
    left: bool,

    /// Enable right image
    #[arg(
        short = 'r',
        value_name = "0|1",
        default_value = "0",
        action = ArgAction::Set,
        value_parser = parse_toggle
    )]
    right: bool,

    /// Enable disparity image
    #[arg(
        short = 'd',
        value_name = "0|1",
        default_value = "1",
        action = ArgAction::Set,
        value_parser = parse_toggle
    )]
    disparity: bool,

    /// Enable confidence image
    #[arg(
        short = 'c',
        value_name = "0|1",
        default_value = "0",
        action = ArgAction::Set,
        value_parser = parse_toggle
    )]
    confidence: bool,

    /// Enable disparity error image
    #[arg(
        short = 'e',
        value_name = "0|1",
        default_value = "0",
        action = ArgAction::Set,
        value_parser = parse_toggle
    )]
    disparity_error: bool,

    /// Store received images into this directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Image file format for stored images (png, tiff)
    #[arg(short, long, default_value = "png")]
    format: ImageFormat,

    /// Request a mesh with at most this many points
    #[arg(long, value_name = "N")]
    mesh_max_points: Option<u32>,

    /// Binning method used to reduce the mesh
    #[arg(long, value_enum, default_value_t = Binning::Average)]
    mesh_binning: Binning,

    /// Request a watertight mesh
    #[arg(long)]
    mesh_watertight: bool,

    /// Request a textured mesh
    #[arg(long)]
    mesh_textured: bool,

    /// Request color images
    #[arg(long)]
    color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Binning {
    Average,
    Min,
    Max,
}

impl From<Binning> for BinningMethod {
    fn from(b: Binning) -> Self {
        match b {
            Binning::Average => BinningMethod::Average,
            Binning::Min => BinningMethod::Min,
            Binning::Max => BinningMethod::Max,
        }
    }
}

/// Any value other than `0` enables a channel.
fn parse_toggle(s: &str) -> Result<bool, String> {
    Ok(s != "0")
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mesh = self.mesh_max_points.map(|max_points| {
            mesh_options(
                max_points,
                self.mesh_binning.into(),
                self.mesh_watertight,
                self.mesh_textured,
            )
        });

        SessionConfig::builder()
            .target(self.target.clone())
            .channels(ChannelSelection {
                left: self.left,
                right: self.right,
                disparity: self.disparity,
                confidence: self.confidence,
                disparity_error: self.disparity_error,
            })
            .mesh(mesh)
            .color(self.color)
            .output_dir(self.output.clone())
            .format(self.format)
            .build()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let config = args.session_config();
    if let Some(dir) = &config.output_dir {
        info!("Storing {} images to {}", config.format, dir.display());
    }

    let mut session = Session::new(config).context("Failed to set up session")?;

    // streams until the server ends the stream or the client is stopped
    let stats = session.run().await.context("Streaming image sets failed")?;
    info!(
        received = stats.received,
        files = stats.files_written,
        failed = stats.failed,
        "Session finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_defaults() {
        let args = Args::try_parse_from(["grpc_image_client", "10.0.0.1:50051"]).unwrap();
        let config = args.session_config();
        assert_eq!(config.target, "10.0.0.1:50051");
        assert_eq!(config.channels, ChannelSelection::default());
        assert!(config.mesh.is_none());
    }

    #[test]
    fn test_any_non_zero_value_enables() {
        let args = Args::try_parse_from([
            "grpc_image_client",
            "10.0.0.1:50051",
            "-l",
            "0",
            "-r",
            "yes",
            "-e",
            "1",
            "-o",
            "/tmp/out",
        ])
        .unwrap();
        let config = args.session_config();
        assert!(!config.channels.left);
        assert!(config.channels.right);
        assert!(config.channels.disparity_error);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_mesh_options_from_flags() {
        let args = Args::try_parse_from([
            "grpc_image_client",
            "10.0.0.1:50051",
            "--mesh-max-points",
            "5000",
            "--mesh-binning",
            "max",
            "--mesh-watertight",
            "-f",
            "tiff",
        ])
        .unwrap();
        let config = args.session_config();
        let mesh = config.mesh.unwrap();
        assert_eq!(mesh.max_points, 5000);
        assert_eq!(mesh.binning_method(), BinningMethod::Max);
        assert!(mesh.watertight);
        assert!(!mesh.textured);
        assert_eq!(config.format, ImageFormat::Tiff);
    }

    #[test]
    fn test_no_arguments_prints_help() {
        let err = Args::try_parse_from(["grpc_image_client"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }
}
