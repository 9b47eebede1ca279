// restkit-cli/src/commands/upload.rs
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use restkit::{ClientRegistry, FileAttachment, RequestDescriptor};

use super::request::merged_headers;
use crate::config::Config;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct UploadArgs {
    /// Endpoint URL; a bare /path resolves against the configured base URL
    pub url: String,
    /// File to upload
    pub file: PathBuf,
    /// Content type; guessed from the file name when omitted
    #[arg(long)]
    pub content_type: Option<String>,
    /// Buffer the file in memory instead of streaming it
    #[arg(long)]
    pub buffered: bool,
    /// Header entry, `name: value`
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,
}

pub async fn handle_upload(
    registry: &ClientRegistry,
    config: &Config,
    args: &UploadArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let url = config.resolve_url(&args.url);
    let headers = merged_headers(config, &args.headers)?;

    let content_type = match &args.content_type {
        Some(content_type) => content_type.clone(),
        None => mime_guess::from_path(&args.file)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };
    let attachment = FileAttachment::from_path(&args.file, &content_type)?;

    let request =
        RequestDescriptor::new("POST", &url, Some(&headers))?.with_attachment(attachment);
    let client = registry
        .client(&url)?
        .with_buffering(output.is_none(), args.buffered);
    let response = client.execute(request).await?;
    output::render_response(response, format, output).await
}
