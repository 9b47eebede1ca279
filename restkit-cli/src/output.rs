// restkit-cli/src/output.rs
use std::io::IsTerminal;
use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;

use restkit::Response;

/// Output format option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Auto-detect based on TTY
    Auto,
    /// Force the JSON envelope
    Json,
    /// Force human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "json" => Ok(Self::Json),
            "human" => Ok(Self::Human),
            other => Err(format!("unknown format: {}", other)),
        }
    }
}

impl OutputFormat {
    fn human(self) -> bool {
        match self {
            Self::Human => true,
            Self::Json => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Machine-readable envelope printed when the output format is JSON
#[derive(Debug, Serialize)]
struct ResponseReport {
    status: u16,
    headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_written: Option<u64>,
}

/// Print `response` in the requested format, or stream its body into
/// `output` when a file was asked for.
pub async fn render_response(
    response: Response,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let status = response.status();
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("");
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    if let Some(path) = output {
        let mut file = tokio::fs::File::create(path).await?;
        let written = response.copy_to(&mut file).await?;
        if format.human() {
            print_status(code, reason);
            print_success(&format!("{} bytes -> {}", written, path.display()));
        } else {
            let report = ResponseReport {
                status: code,
                headers,
                body: None,
                bytes_written: Some(written),
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        return Ok(());
    }

    let text = response.text().await?;
    if format.human() {
        print_status(code, reason);
        for (name, value) in &headers {
            print_header(name, value);
        }
        println!();
        // pretty-print bodies that parse as JSON, pass the rest through
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{}", text),
        }
    } else {
        let body = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(text),
        };
        let report = ResponseReport {
            status: code,
            headers,
            body: Some(body),
            bytes_written: None,
        };
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

/// Print a styled status line
fn print_status(code: u16, reason: &str) {
    let term = console::Term::stdout();
    let line = format!("{} {}", code, reason);
    let styled = match code {
        200..=299 => console::style(line).green(),
        300..=399 => console::style(line).yellow(),
        _ => console::style(line).red(),
    };
    let _ = term.write_str(&format!("{}\n", styled));
}

/// Print a styled success message
pub fn print_success(message: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{} {}\n", console::style("✓").green(), message));
}

/// Print a styled error message
pub fn print_error(message: &str) {
    let term = console::Term::stderr();
    let _ = term.write_str(&format!("{} {}\n", console::style("Error:").red(), message));
}

/// Print a styled header line
pub fn print_header(key: &str, value: &str) {
    let term = console::Term::stdout();
    let _ = term.write_str(&format!("{}: {}\n", console::style(key).bold(), value));
}

/// Exit codes for script decision making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    TransportError = 1,
    ValidationError = 2,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

/// Map an error to its exit code: bad inputs are distinguishable from
/// transport failures in scripts.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<restkit::Error>() {
        Some(e) if e.is_validation() => ExitCode::ValidationError,
        _ => ExitCode::TransportError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parses_known_values() {
        assert_eq!("auto".parse::<OutputFormat>().unwrap(), OutputFormat::Auto);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "human".parse::<OutputFormat>().unwrap(),
            OutputFormat::Human
        );
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_validation_errors_map_to_their_own_exit_code() {
        let err = anyhow::Error::from(restkit::Error::Missing { name: "host" });
        assert_eq!(exit_code_for(&err), ExitCode::ValidationError);
    }

    #[test]
    fn test_other_errors_map_to_transport_exit_code() {
        let err = anyhow::anyhow!("connection reset");
        assert_eq!(exit_code_for(&err), ExitCode::TransportError);
    }

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::TransportError.code(), 1);
        assert_eq!(ExitCode::ValidationError.code(), 2);
    }
}
