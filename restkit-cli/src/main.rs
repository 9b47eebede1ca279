mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{handle_body_request, handle_request, handle_upload, BodyArgs, RequestArgs, UploadArgs};
use config::Config;
use output::OutputFormat;
use restkit::{ClientRegistry, Method};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restkit")]
#[command(about = "Issue REST calls from scripts and shells", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "auto")]
    format: OutputFormat,
    /// Stream the response body into a file instead of printing it
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a resource
    Get(RequestArgs),
    /// Fetch headers only
    Head(RequestArgs),
    /// Submit with an optional body
    Post(BodyArgs),
    /// Replace with an optional body
    Put(BodyArgs),
    /// Partially update with an optional body
    Patch(BodyArgs),
    /// Delete a resource
    Delete(BodyArgs),
    /// Ask the server which methods it supports
    Options(RequestArgs),
    /// Upload a file as a streamed attachment
    Upload(UploadArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => output::ExitCode::Success,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            output::exit_code_for(&err)
        }
    };
    std::process::exit(code.code());
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let registry = ClientRegistry::new();
    let format = cli.format;
    let output = cli.output.as_deref();

    match cli.command {
        Commands::Get(args) => {
            handle_request(&registry, &config, Method::Get, &args, None, format, output).await
        }
        Commands::Head(args) => {
            handle_request(&registry, &config, Method::Head, &args, None, format, output).await
        }
        Commands::Post(args) => {
            handle_body_request(&registry, &config, Method::Post, &args, format, output).await
        }
        Commands::Put(args) => {
            handle_body_request(&registry, &config, Method::Put, &args, format, output).await
        }
        Commands::Patch(args) => {
            handle_body_request(&registry, &config, Method::Patch, &args, format, output).await
        }
        Commands::Delete(args) => {
            handle_body_request(&registry, &config, Method::Delete, &args, format, output).await
        }
        Commands::Options(args) => {
            handle_request(&registry, &config, Method::Options, &args, None, format, output).await
        }
        Commands::Upload(args) => {
            handle_upload(&registry, &config, &args, format, output).await
        }
    }
}
