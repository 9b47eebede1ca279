// restkit/src/request.rs
use std::collections::HashMap;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::body::{Body, BodyKind, FileAttachment};
use crate::error::{Error, Result};
use crate::host::parse_absolute;
use crate::method::Method;

/// A validated request: method, path-and-query (authority stripped), header
/// map, and body. Built and consumed per call; the authority is resolved
/// separately through the host key.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path_and_query: String,
    headers: HeaderMap,
    body: Body,
}

impl RequestDescriptor {
    /// Validate `method` and `endpoint` and build a descriptor with no body.
    ///
    /// Every provided header entry is attached unmodified, one per mapping
    /// entry.
    pub fn new(
        method: &str,
        endpoint: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<Self> {
        let method: Method = method.parse()?;
        let url = parse_absolute("endpoint", endpoint)?;

        let mut header_map = HeaderMap::new();
        if let Some(headers) = headers {
            for (name, value) in headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| Error::malformed("headers", name.as_str(), e))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|e| Error::malformed("headers", value.as_str(), e))?;
                header_map.append(name, value);
            }
        }

        Ok(Self {
            method,
            path_and_query: path_and_query(&url),
            headers: header_map,
            body: Body::Empty,
        })
    }

    /// Attach a string body tagged with its content kind.
    pub fn with_body(mut self, kind: BodyKind, content: impl Into<String>) -> Self {
        self.body = Body::Text {
            kind,
            content: content.into(),
        };
        self
    }

    /// Attach a streamed file body.
    pub fn with_attachment(mut self, attachment: FileAttachment) -> Self {
        self.body = Body::Stream(attachment);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Path plus query of the endpoint, authority stripped.
    pub fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (Method, String, HeaderMap, Body) {
        (self.method, self.path_and_query, self.headers, self.body)
    }
}

fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
