use std::fs;

use tokio_stream::{Stream, StreamExt};
use tracing::{debug, error, info, instrument};

use crate::image_store::{ImageSet, ImageSetStore, StoreError};
use crate::session::client::ImageInterfaceClient;
use crate::session::config::SessionConfig;
use crate::session::error::Result;
use crate::session::proto::WireImageSet;

/// Counters reported when the stream ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Image sets received
    pub received: u64,
    /// Files written to the output directory
    pub files_written: u64,
    /// Image sets that could not be stored completely
    pub failed: u64,
}

/// Streams image sets from the server and stores them when configured.
pub struct Session {
    config: SessionConfig,
    store: Option<ImageSetStore>,
    stats: SessionStats,
}

impl Session {
    /// Resolves the output encoder and creates the output directory.
    ///
    /// Fails before any connection is made if the format is not compiled in.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let store = match &config.output_dir {
            Some(dir) => {
                let store = ImageSetStore::new(dir.clone(), config.format)?;
                fs::create_dir_all(dir).map_err(StoreError::from)?;
                Some(store)
            }
            None => None,
        };

        Ok(Self {
            config,
            store,
            stats: SessionStats::default(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Connects, sends the request and processes image sets until the
    /// server closes the stream (`Ok`) or reports an error (`Err`).
    #[instrument(skip(self), fields(target = %self.config.target))]
    pub async fn run(&mut self) -> Result<SessionStats> {
        info!("Connecting to target {}", self.config.target);
        let mut client = ImageInterfaceClient::connect(&self.config.target).await?;

        let request = self.config.request();
        let channels = self.config.channels;
        info!(
            "Requesting image sets: [l: {}, r: {}, d: {}, c: {}, e: {}]",
            channels.left as u8,
            channels.right as u8,
            channels.disparity as u8,
            channels.confidence as u8,
            channels.disparity_error as u8,
        );

        let stream = client.stream_image_sets(request).await?.into_inner();
        self.consume(stream).await
    }

    /// Handles every image set of `stream` until it ends (`Ok`) or yields a
    /// status (`Err`). Sets received before the status are still counted.
    pub async fn consume<S>(&mut self, mut stream: S) -> Result<SessionStats>
    where
        S: Stream<Item = std::result::Result<WireImageSet, tonic::Status>> + Unpin,
    {
        loop {
            match stream.next().await {
                Some(Ok(wire)) => self.handle_image_set(ImageSet::from(wire)),
                None => {
                    info!("StreamImageSets rpc succeeded");
                    return Ok(self.stats);
                }
                Some(Err(status)) => {
                    error!(
                        "StreamImageSets rpc failed with: code {:?}: {}",
                        status.code(),
                        status.message()
                    );
                    return Err(status.into());
                }
            }
        }
    }

    /// Logs one image set and stores it if an output directory is set.
    ///
    /// Storage errors are logged and counted; they never end the session.
    pub fn handle_image_set(&mut self, set: ImageSet) {
        self.stats.received += 1;
        info!("ImageSet timestamp {} {}", set.timestamp, set.presence());

        if let Some(disparity) = &set.disparity {
            debug!(
                scale = disparity.scale,
                offset = disparity.offset,
                invalid = disparity.invalid_data_value,
                baseline = disparity.baseline,
                "Disparity parameters"
            );
        }

        let Some(store) = &self.store else {
            return;
        };

        match store.store(&set) {
            Ok(files) => self.stats.files_written += files.len() as u64,
            Err(e) => {
                self.stats.failed += 1;
                error!(timestamp = %set.timestamp, "Failed to store image set: {}", e);
            }
        }
    }
}
