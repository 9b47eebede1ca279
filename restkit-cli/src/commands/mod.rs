// restkit-cli/src/commands/mod.rs
pub mod request;
pub mod upload;

pub use request::{handle_body_request, handle_request, BodyArgs, RequestArgs};
pub use upload::{handle_upload, UploadArgs};
