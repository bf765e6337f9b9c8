//! Command-line configuration

use crate::error::{ProxyError, Result};
use clap::Parser;
use status_image_fetcher::DEFAULT_UPSTREAM_URL;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Server configuration, parsed once at startup and passed down explicitly
#[derive(Debug, Clone, Parser)]
#[command(name = "statuscat-proxy", version, about, disable_help_flag = true)]
pub struct Config {
    /// Address to listen on (hostname, IP, or 0.0.0.0 for all interfaces)
    #[arg(short = 'h', long, env = "STATUSCAT_HOST", value_parser = parse_host)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Directory holding cached images; created if missing
    #[arg(short = 'c', long = "cache", env = "CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// Base URL of the upstream image source
    #[arg(long = "upstream", env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL, value_parser = parse_upstream)]
    pub upstream_url: Url,

    /// Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub upstream_timeout_secs: u64,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Config {
    /// Parse configuration from an explicit argument list
    pub fn try_parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| ProxyError::Config(e.to_string()))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// `host:port` as shown in logs
    pub fn listen_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn parse_host(s: &str) -> std::result::Result<String, String> {
    let host = s.trim();
    if host.is_empty() {
        return Err("host must not be empty".to_string());
    }
    Ok(host.to_string())
}

fn parse_upstream(s: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(s).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported upstream scheme: {}", other)),
    }
}
