// restkit-cli/src/commands/request.rs
use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use clap::Args;
use restkit::{BodyKind, ClientRegistry, Method, RequestDescriptor};

use crate::config::Config;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RequestArgs {
    /// Endpoint URL; a bare /path resolves against the configured base URL
    pub url: String,
    /// Header entry, `name: value`
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,
}

#[derive(Args)]
pub struct BodyArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// Request body string
    #[arg(short, long)]
    pub body: Option<String>,
    /// Body content kind: xml, json, text, form
    #[arg(short, long, default_value = "json")]
    pub kind: String,
}

pub async fn handle_request(
    registry: &ClientRegistry,
    config: &Config,
    method: Method,
    args: &RequestArgs,
    body: Option<(BodyKind, String)>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let url = config.resolve_url(&args.url);
    let headers = merged_headers(config, &args.headers)?;

    let mut request = RequestDescriptor::new(method.as_str(), &url, Some(&headers))?;
    if let Some((kind, content)) = body {
        request = request.with_body(kind, content);
    }

    // stream the response when it is going to a file
    let client = registry.client(&url)?.with_buffering(output.is_none(), true);
    let response = client.execute(request).await?;
    output::render_response(response, format, output).await
}

pub async fn handle_body_request(
    registry: &ClientRegistry,
    config: &Config,
    method: Method,
    args: &BodyArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let body = match &args.body {
        Some(content) => Some((args.kind.parse::<BodyKind>()?, content.clone())),
        None => None,
    };
    handle_request(registry, config, method, &args.request, body, format, output).await
}

pub(crate) fn merged_headers(
    config: &Config,
    cli_headers: &[String],
) -> Result<HashMap<String, String>> {
    let mut headers = config.default_headers.clone();
    for entry in cli_headers {
        let (name, value) = parse_header(entry)?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Split a `name: value` header entry.
fn parse_header(entry: &str) -> Result<(String, String)> {
    let (name, value) = entry
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header (expected `name: value`): {}", entry))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid header (empty name): {}", entry);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_splits_on_first_colon() {
        let (name, value) = parse_header("x-time: 12:30").unwrap();
        assert_eq!(name, "x-time");
        assert_eq!(value, "12:30");
    }

    #[test]
    fn test_parse_header_trims_whitespace() {
        let (name, value) = parse_header("  accept :  application/json ").unwrap();
        assert_eq!(name, "accept");
        assert_eq!(value, "application/json");
    }

    #[test]
    fn test_parse_header_rejects_missing_colon() {
        assert!(parse_header("not-a-header").is_err());
    }

    #[test]
    fn test_parse_header_rejects_empty_name() {
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_cli_headers_override_config_defaults() {
        let mut config = Config::default();
        config
            .default_headers
            .insert("accept".to_string(), "text/plain".to_string());
        let headers =
            merged_headers(&config, &["accept: application/json".to_string()]).unwrap();
        assert_eq!(headers["accept"], "application/json");
    }
}
