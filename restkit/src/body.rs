// restkit/src/body.rs
use std::path::PathBuf;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{Error, Result};

/// Content category for string request bodies. The content-type mapping is
/// total and fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Xml,
    Json,
    PlainText,
    UrlEncodedForm,
}

impl BodyKind {
    pub fn content_type(self) -> &'static str {
        match self {
            BodyKind::Xml => "text/xml",
            BodyKind::Json => "application/json",
            BodyKind::PlainText => "text/plain",
            BodyKind::UrlEncodedForm => "application/x-www-form-urlencoded",
        }
    }
}

impl FromStr for BodyKind {
    type Err = Error;

    /// Parse the open string tags that scripted call sites supply. Anything
    /// outside the four defined kinds is rejected, never defaulted.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" => Ok(BodyKind::Xml),
            "json" => Ok(BodyKind::Json),
            "plaintext" | "text" => Ok(BodyKind::PlainText),
            "urlencodedform" | "form" => Ok(BodyKind::UrlEncodedForm),
            _ => Err(Error::out_of_range("body_kind", s)),
        }
    }
}

/// Request body, dispatched structurally.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Text { kind: BodyKind, content: String },
    Stream(FileAttachment),
}

/// Where an attachment's bytes come from. A `Path` source is opened only
/// when the request is sent.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    Path(PathBuf),
    Bytes(Bytes),
}

/// A request body sourced from a byte stream plus declared filename and
/// content type. Intended for large payloads: the length is captured up
/// front and the bytes are streamed at send time, not buffered twice.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    file_name: String,
    content_type: String,
    length: u64,
    source: AttachmentSource,
}

impl FileAttachment {
    pub fn new(
        file_name: &str,
        source: AttachmentSource,
        content_type: &str,
    ) -> Result<Self> {
        if file_name.trim().is_empty() {
            return Err(Error::missing("file_name"));
        }
        if content_type.trim().is_empty() {
            return Err(Error::missing("content_type"));
        }
        let length = match &source {
            AttachmentSource::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(Error::missing("body"));
                }
                std::fs::metadata(path)?.len()
            }
            AttachmentSource::Bytes(bytes) => bytes.len() as u64,
        };
        Ok(Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            length,
            source,
        })
    }

    /// Attachment for an on-disk file, named after the file itself.
    pub fn from_path(path: impl Into<PathBuf>, content_type: &str) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::missing("path"));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(&file_name, AttachmentSource::Path(path), content_type)
    }

    /// Attachment over an in-memory buffer.
    pub fn from_bytes(
        file_name: &str,
        bytes: impl Into<Bytes>,
        content_type: &str,
    ) -> Result<Self> {
        Self::new(file_name, AttachmentSource::Bytes(bytes.into()), content_type)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Byte length captured at construction time.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn source(&self) -> &AttachmentSource {
        &self.source
    }

    pub(crate) fn into_parts(self) -> (String, String, u64, AttachmentSource) {
        (self.file_name, self.content_type, self.length, self.source)
    }
}
