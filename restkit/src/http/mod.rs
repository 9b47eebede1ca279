// restkit/src/http/mod.rs
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::request::RequestDescriptor;

/// Per-call transfer tuning. Buffering belongs to the call, not to the
/// shared cached client, so concurrent requests to one host with different
/// settings never observe each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Buffer the full response body before returning it.
    pub buffered_read: bool,
    /// Materialize stream bodies before sending instead of streaming them.
    pub buffered_write: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            buffered_read: true,
            buffered_write: true,
        }
    }
}

/// Executes validated requests; the seam to the underlying HTTP library.
/// Implemented by the reqwest-backed `HostClient` — users can substitute
/// their own transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: RequestDescriptor) -> Result<Response>;
}

/// Response passed through from the transport unmodified: status, headers,
/// and either a fully buffered body or a byte stream, depending on the
/// read mode of the call that produced it. Non-2xx statuses are not
/// reinterpreted as errors here.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

pub enum ResponseBody {
    Buffered(Bytes),
    Stream(BoxStream<'static, Result<Bytes>>),
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Buffered(bytes) => {
                f.debug_tuple("Buffered").field(bytes).finish()
            }
            ResponseBody::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the body is still a stream (unbuffered read).
    pub fn is_streaming(&self) -> bool {
        matches!(self.body, ResponseBody::Stream(_))
    }

    /// Full response body, collecting the stream when the read was
    /// unbuffered.
    pub async fn bytes(self) -> Result<Bytes> {
        match self.body {
            ResponseBody::Buffered(bytes) => Ok(bytes),
            ResponseBody::Stream(mut stream) => {
                let mut buf = Vec::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                Ok(Bytes::from(buf))
            }
        }
    }

    /// Body decoded as UTF-8.
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::malformed("response_body", "<non-utf8 bytes>", e))
    }

    /// Body deserialized as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Copy the body into `writer` chunk by chunk. Returns the number of
    /// bytes written. This is the response-writer path for unbuffered
    /// reads; a buffered body is written in one piece.
    pub async fn copy_to<W>(self, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written = 0u64;
        match self.body {
            ResponseBody::Buffered(bytes) => {
                writer.write_all(&bytes).await?;
                written = bytes.len() as u64;
            }
            ResponseBody::Stream(mut stream) => {
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    writer.write_all(&chunk).await?;
                    written += chunk.len() as u64;
                }
            }
        }
        writer.flush().await?;
        Ok(written)
    }
}

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::{ClientRegistry, HostClient};

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn test_default_options_buffer_both_ways() {
        let opts = TransferOptions::default();
        assert!(opts.buffered_read);
        assert!(opts.buffered_write);
    }

    #[tokio::test]
    async fn test_buffered_body_accessors() {
        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            ResponseBody::Buffered(Bytes::from_static(b"{\"ok\":true}")),
        );
        assert!(!resp.is_streaming());
        let value: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_stream_body_collects() {
        let chunks = vec![Ok(Bytes::from_static(b"he")), Ok(Bytes::from_static(b"llo"))];
        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            ResponseBody::Stream(stream::iter(chunks).boxed()),
        );
        assert!(resp.is_streaming());
        assert_eq!(resp.text().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_copy_to_counts_bytes() {
        let chunks = vec![Ok(Bytes::from_static(b"abc")), Ok(Bytes::from_static(b"de"))];
        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            ResponseBody::Stream(stream::iter(chunks).boxed()),
        );
        let mut out = std::io::Cursor::new(Vec::new());
        let written = resp.copy_to(&mut out).await.unwrap();
        assert_eq!(written, 5);
        assert_eq!(out.into_inner(), b"abcde");
    }
}
