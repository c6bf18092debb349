//! HTTP readiness condition
//!
//! Issues a GET per check with a short request timeout. The status code must
//! be in the accepted set and, when a content pattern is configured, the body
//! must contain a match.

use regex::Regex;
use reqwest::blocking::{Client, Response};
use std::io::Read;
use std::time::Duration;

use super::{CheckError, Probe};
use crate::config::ConfigError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Accepted when no codes are configured: the 2xx family
pub const DEFAULT_ACCEPTED_CODES: &[u16] = &[200, 201, 202, 203, 204, 205, 206, 207, 208, 226];

/// Bodies are only read when matching content, and never past this size
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Prefix `http://` unless the URL already carries an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

#[derive(Debug, Clone)]
pub struct HttpCondition {
    url: String,
    accepted_codes: Vec<u16>,
    content_match: Option<Regex>,
    client: Client,
}

impl HttpCondition {
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        Self::with_request_timeout(url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wfor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            url: normalize_url(url),
            accepted_codes: DEFAULT_ACCEPTED_CODES.to_vec(),
            content_match: None,
            client,
        })
    }

    pub fn with_accepted_codes(mut self, codes: Vec<u16>) -> Self {
        self.accepted_codes = codes;
        self
    }

    pub fn with_content_match(mut self, pattern: Regex) -> Self {
        self.content_match = Some(pattern);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn accepted_codes(&self) -> &[u16] {
        &self.accepted_codes
    }

    pub fn content_match(&self) -> Option<&Regex> {
        self.content_match.as_ref()
    }
}

impl Probe for HttpCondition {
    fn describe(&self) -> String {
        format!("HTTPWait:{}", self.url)
    }

    fn check(&self) -> Result<(), CheckError> {
        let response = self.client.get(&self.url).send()?;

        let status = response.status().as_u16();
        if !self.accepted_codes.contains(&status) {
            return Err(CheckError::Status(status));
        }

        if let Some(pattern) = &self.content_match {
            let body = read_body(response)?;
            if !pattern.is_match(&body) {
                return Err(CheckError::ContentMismatch(pattern.as_str().to_string()));
            }
        }

        Ok(())
    }
}

fn read_body(response: Response) -> Result<String, CheckError> {
    let mut bytes = Vec::new();
    response
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(CheckError::Body)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
