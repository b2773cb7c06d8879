//! Client stub for the `ImageInterface` service, written the way
//! `tonic-build` generates server-streaming methods.

use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::session::error::{Result, SessionError};
use crate::session::proto::{ImageSetRequest, WireImageSet};

const STREAM_IMAGE_SETS: &str = "/ImageInterface/StreamImageSets";

/// Turns `IP:port` into `http://IP:port`; full URIs are kept.
pub fn target_uri(target: &str) -> String {
    if target.contains("://") {
        target.to_string()
    } else {
        format!("http://{target}")
    }
}

#[derive(Debug, Clone)]
pub struct ImageInterfaceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl ImageInterfaceClient {
    /// Opens an insecure channel to `target`.
    pub async fn connect(target: &str) -> Result<Self> {
        let uri = target_uri(target);
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| SessionError::InvalidTarget(format!("{target}: {e}")))?;

        debug!(uri = %uri, "Connecting channel");
        let channel = endpoint.connect().await?;
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Server-streaming call returning one `ImageSet` per capture.
    pub async fn stream_image_sets(
        &mut self,
        request: impl tonic::IntoRequest<ImageSetRequest>,
    ) -> std::result::Result<tonic::Response<Streaming<WireImageSet>>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))?;
        let codec = ProstCodec::default();
        let path = PathAndQuery::from_static(STREAM_IMAGE_SETS);
        self.inner
            .server_streaming(request.into_request(), path, codec)
            .await
    }
}
