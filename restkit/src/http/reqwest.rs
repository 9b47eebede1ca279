// restkit/src/http/reqwest.rs
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use http::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tokio_util::io::ReaderStream;
use tracing::debug;

use super::{Response, ResponseBody, TransferOptions, Transport};
use crate::body::{AttachmentSource, Body, FileAttachment};
use crate::error::{Error, Result};
use crate::host::HostKey;
use crate::method::Method;
use crate::request::RequestDescriptor;
use crate::serializer::{JsonSerializer, Serializer};

/// Owns the per-host client cache. Build one per process or session and
/// inject it into callers. Entries are created lazily on first use, never
/// evicted, and shared by every caller targeting that host; the serializer
/// is fixed for the registry's lifetime.
pub struct ClientRegistry {
    clients: RwLock<HashMap<HostKey, Client>>,
    serializer: Arc<dyn Serializer>,
}

impl ClientRegistry {
    /// Registry with the JSON default codec.
    pub fn new() -> Self {
        Self::with_serializer(Arc::new(JsonSerializer))
    }

    /// Registry with a different codec. Chosen once, here; lookups never
    /// re-bind it.
    pub fn with_serializer(serializer: Arc<dyn Serializer>) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            serializer,
        }
    }

    /// Handle for the host of `host`, an absolute URI of which only scheme,
    /// host, and port are significant. Handles for the same host key share
    /// one cached underlying client and its connection pool; buffering mode
    /// lives on the handle, so differing settings on later handles never
    /// perturb requests already in flight.
    pub fn client(&self, host: &str) -> Result<HostClient> {
        let key = HostKey::derive_named("host", host)?;

        let cached = {
            let clients = self.clients.read().expect("client cache poisoned");
            clients.get(&key).cloned()
        };
        let client = match cached {
            Some(client) => {
                debug!(host = %key, "reusing cached client");
                client
            }
            None => {
                let mut clients = self.clients.write().expect("client cache poisoned");
                // a racing caller may have inserted between the two locks
                let client = clients
                    .entry(key.clone())
                    .or_insert_with(|| {
                        debug!(host = %key, "creating client");
                        Client::new()
                    })
                    .clone();
                client
            }
        };

        Ok(HostClient {
            client,
            host: key,
            options: TransferOptions::default(),
            serializer: Arc::clone(&self.serializer),
        })
    }

    /// `client` with explicit transfer options on the returned handle.
    pub fn client_with(&self, host: &str, options: TransferOptions) -> Result<HostClient> {
        Ok(self.client(host)?.with_options(options))
    }

    /// Number of distinct host keys cached so far.
    pub fn host_count(&self) -> usize {
        self.clients.read().expect("client cache poisoned").len()
    }

    pub fn serializer(&self) -> &Arc<dyn Serializer> {
        &self.serializer
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call handle over a cached client: the shared connection-oriented
/// part (a cheap clone of the pooled client) plus handle-local transfer
/// options.
#[derive(Clone)]
pub struct HostClient {
    client: Client,
    host: HostKey,
    options: TransferOptions,
    serializer: Arc<dyn Serializer>,
}

impl std::fmt::Debug for HostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostClient")
            .field("client", &self.client)
            .field("host", &self.host)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HostClient {
    pub fn host(&self) -> &HostKey {
        &self.host
    }

    pub fn options(&self) -> TransferOptions {
        self.options
    }

    /// Override read/write buffering for requests sent through this handle.
    pub fn with_buffering(self, buffered_read: bool, buffered_write: bool) -> Self {
        self.with_options(TransferOptions {
            buffered_read,
            buffered_write,
        })
    }

    pub fn with_options(mut self, options: TransferOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute `request` against this handle's host. The descriptor's
    /// path-and-query is joined to the host key; transport failures and
    /// non-2xx statuses pass through unmodified.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<Response> {
        let (method, path_and_query, headers, body) = request.into_parts();
        debug!(
            method = %method,
            host = %self.host,
            path = %path_and_query,
            buffered_read = self.options.buffered_read,
            buffered_write = self.options.buffered_write,
            "executing request"
        );

        let mut builder = self.request_builder(method, &path_and_query, headers)?;
        builder = match body {
            Body::Empty => builder,
            Body::Text { kind, content } => builder
                .header(CONTENT_TYPE, kind.content_type())
                .body(content),
            Body::Stream(attachment) => {
                let part = into_part(attachment, self.options.buffered_write).await?;
                builder.multipart(Form::new().part("file", part))
            }
        };
        self.dispatch(builder).await
    }

    /// Serialize `value` through the registry's codec and send it as the
    /// entire body of `request`, tagged with the codec's emitted type. A
    /// bare string parameter goes out raw.
    pub async fn send_payload(
        &self,
        request: RequestDescriptor,
        value: &Value,
    ) -> Result<Response> {
        let body = self.serializer.serialize_parameter(value)?;
        let (method, path_and_query, headers, _) = request.into_parts();
        let builder = self
            .request_builder(method, &path_and_query, headers)?
            .header(CONTENT_TYPE, self.serializer.emits())
            .body(body);
        self.dispatch(builder).await
    }

    fn request_builder(
        &self,
        method: Method,
        path_and_query: &str,
        headers: HeaderMap,
    ) -> Result<reqwest::RequestBuilder> {
        let full = format!("{}{}", self.host, path_and_query);
        let url = reqwest::Url::parse(&full)
            .map_err(|e| Error::malformed("endpoint", full.as_str(), e))?;
        Ok(self.client.request(method.into(), url).headers(headers))
    }

    async fn dispatch(&self, builder: reqwest::RequestBuilder) -> Result<Response> {
        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = if self.options.buffered_read {
            ResponseBody::Buffered(resp.bytes().await?)
        } else {
            ResponseBody::Stream(resp.bytes_stream().map_err(Error::from).boxed())
        };
        debug!(status = %status, host = %self.host, "response received");
        Ok(Response::new(status, headers, body))
    }
}

#[async_trait]
impl Transport for HostClient {
    async fn execute(&self, request: RequestDescriptor) -> Result<Response> {
        HostClient::execute(self, request).await
    }
}

/// Turn an attachment into a multipart part. An unbuffered write streams
/// the source with the length captured at construction; a buffered write
/// materializes it once here.
async fn into_part(attachment: FileAttachment, buffered: bool) -> Result<Part> {
    let (file_name, content_type, length, source) = attachment.into_parts();
    let part = match source {
        AttachmentSource::Bytes(bytes) => {
            Part::stream_with_length(reqwest::Body::from(bytes), length)
        }
        AttachmentSource::Path(path) => {
            if buffered {
                let bytes = tokio::fs::read(&path).await?;
                Part::stream_with_length(reqwest::Body::from(bytes), length)
            } else {
                // opened here, at send time; the file is never fully
                // materialized in memory
                let file = tokio::fs::File::open(&path).await?;
                let stream = ReaderStream::new(file);
                Part::stream_with_length(reqwest::Body::wrap_stream(stream), length)
            }
        }
    };
    part.file_name(file_name)
        .mime_str(&content_type)
        .map_err(|e| Error::malformed("content_type", content_type.as_str(), e))
}
