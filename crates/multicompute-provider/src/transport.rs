//! HTTP transport seam for the remote data source.
//!
//! The live provider builds complete `http::Request`s and hands them to an
//! [`HttpTransport`]. Production uses [`HyperTransport`]; tests substitute
//! a transport that records requests and replays canned responses.

use async_trait::async_trait;
use bytes::Bytes;
use http::header::HOST;
use http::{HeaderValue, Request, Response, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult, map_err};

/// Sends one request and returns the buffered response.
///
/// Non-2xx statuses are ordinary responses here; the caller decides what
/// counts as failure.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: Request<Bytes>) -> ProviderResult<Response<Bytes>>;
}

/// HTTP/1.1 transport that opens a fresh connection per request.
///
/// No pooling, no timeout, no retry: a refused connection or a reset
/// surfaces immediately as [`ProviderError::Transport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HyperTransport;

#[async_trait]
impl HttpTransport for HyperTransport {
    async fn send(&self, request: Request<Bytes>) -> ProviderResult<Response<Bytes>> {
        let uri = request.uri().clone();
        let authority = uri
            .authority()
            .map(|a| a.to_string())
            .ok_or_else(|| ProviderError::InvalidRequest(format!("no host in {uri}")))?;

        let stream = TcpStream::connect(authority.as_str())
            .await
            .map_err(map_err!(Transport))?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(map_err!(Transport))?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(error = %e, "connection closed with error");
            }
        });

        // Origin-form on the wire, authority in the Host header.
        let (mut parts, body) = request.into_parts();
        if let Some(path) = uri.path_and_query() {
            parts.uri = Uri::from(path.clone());
        }
        let host = HeaderValue::from_str(&authority).map_err(map_err!(InvalidRequest))?;
        parts.headers.entry(HOST).or_insert(host);

        let response = sender
            .send_request(Request::from_parts(parts, Full::new(body)))
            .await
            .map_err(map_err!(Transport))?;

        let (parts, body) = response.into_parts();
        let body = body.collect().await.map_err(map_err!(Transport))?.to_bytes();
        debug!(%uri, status = %parts.status, bytes = body.len(), "response received");
        Ok(Response::from_parts(parts, body))
    }
}
