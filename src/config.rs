use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
}

/// Command-line + environment configuration.
///
/// Credentials are environment-only so they never show up in process listings.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "HTTP gateway for an S3-compatible object store")]
pub struct Args {
    /// Host to bind to (overrides STORAGE_GATEWAY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides STORAGE_GATEWAY_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Object-storage endpoint URL (overrides S3_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Backend region (overrides S3_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Bucket served by this gateway (overrides S3_BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse())
    }

    /// Merge parsed CLI args over the environment.
    pub fn resolve(args: Args) -> Result<Self> {
        let env_host = env::var("STORAGE_GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("STORAGE_GATEWAY_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing STORAGE_GATEWAY_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading STORAGE_GATEWAY_PORT"),
        };

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            endpoint: match args.endpoint {
                Some(endpoint) => endpoint,
                None => required_var("S3_ENDPOINT")?,
            },
            access_key_id: required_var("S3_ACCESS_KEY_ID")?,
            secret_access_key: required_var("S3_SECRET_ACCESS_KEY")?,
            region: match args.region {
                Some(region) => region,
                None => required_var("S3_REGION")?,
            },
            bucket: match args.bucket {
                Some(bucket) => bucket,
                None => required_var("S3_BUCKET_NAME")?,
            },
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}
