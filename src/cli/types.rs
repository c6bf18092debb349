use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wfor::validation::{
    clap_duration_validator, clap_http_target_validator, clap_status_codes_validator, HttpTarget,
    StatusCodes,
};

#[derive(Parser, Debug)]
#[command(name = "wfor")]
#[command(about = "Wait for paths, ports and endpoints, then run a command", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Wait for `url` to respond with an accepted status: URL[|CODES[|PATTERN]]
    #[arg(long, value_name = "URL", value_parser = clap_http_target_validator)]
    pub http: Vec<HttpTarget>,

    /// Comma-separated list of accepted HTTP status codes for --http checks
    /// that do not list their own (e.g. 200,204,300-308)
    #[arg(long, value_name = "CODES", value_parser = clap_status_codes_validator)]
    pub http_codes: Option<StatusCodes>,

    /// Wait for `path` to exist
    #[arg(long, value_name = "PATH")]
    pub path: Vec<PathBuf>,

    /// Wait for `host:port` to accept a connection
    #[arg(long, value_name = "HOST:PORT")]
    pub tcp: Vec<String>,

    /// Wait for `host:port` to respond with at least 1 byte
    #[arg(long, value_name = "HOST:PORT")]
    pub udp: Vec<String>,

    /// Max duration to wait for
    #[arg(long, default_value = "5m", value_parser = clap_duration_validator)]
    pub timeout: Duration,

    /// Duration between checks
    #[arg(long, default_value = "10s", value_parser = clap_duration_validator)]
    pub interval: Duration,

    /// AND all conditions (default)
    #[arg(long)]
    pub and: bool,

    /// OR all conditions
    #[arg(long)]
    pub or: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub debug: bool,

    /// Command to run once the conditions are met
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}
