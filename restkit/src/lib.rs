// restkit/src/lib.rs
pub mod body;
pub mod error;
pub mod host;
pub mod http;
pub mod method;
pub mod request;
pub mod serializer;

pub use body::{AttachmentSource, Body, BodyKind, FileAttachment};
pub use error::{Error, Result};
pub use host::HostKey;
pub use method::Method;
pub use request::RequestDescriptor;
pub use self::http::{Response, ResponseBody, TransferOptions, Transport};
pub use serializer::{JsonSerializer, Serializer};

// Re-export the reqwest-backed registry when the feature is enabled
#[cfg(feature = "reqwest")]
pub use self::http::{ClientRegistry, HostClient};
