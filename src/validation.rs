//! Parsing and validation of user-supplied condition arguments.
//!
//! These functions turn command-line values into condition inputs and reject
//! malformed ones before any polling starts. The `clap_*` wrappers plug them
//! into clap's `value_parser`.

use regex::Regex;

use crate::conditions::HttpCondition;
use crate::config::ConfigError;

/// Parses a comma-separated list of HTTP status codes.
///
/// Each entry is a three-digit code or an inclusive `start-end` range of two
/// three-digit codes. Whitespace around entries is ignored.
///
/// # Examples
///
/// ```
/// use wfor::validation::parse_status_codes;
///
/// assert_eq!(parse_status_codes("200,201,400-404").unwrap(), vec![200, 201, 400, 401, 402, 403, 404]);
/// assert!(parse_status_codes("300-200").is_err());
/// assert!(parse_status_codes("").is_err());
/// ```
pub fn parse_status_codes(list: &str) -> Result<Vec<u16>, ConfigError> {
    let mut codes = Vec::new();

    for entry in list.split(',').map(str::trim) {
        match entry.split_once('-') {
            None => codes.push(parse_code(entry)?),
            Some((start, end)) => {
                let start = parse_code(start)?;
                let end = parse_code(end)?;
                if start > end {
                    return Err(ConfigError::InvalidStatusRange { start, end });
                }
                codes.extend(start..=end);
            }
        }
    }

    Ok(codes)
}

fn parse_code(s: &str) -> Result<u16, ConfigError> {
    if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidStatusCode(s.to_string()));
    }
    s.parse()
        .map_err(|_| ConfigError::InvalidStatusCode(s.to_string()))
}

/// A parsed `--http` argument: `URL[|CODES[|PATTERN]]`
#[derive(Debug, Clone)]
pub struct HttpTarget {
    pub url: String,
    pub codes: Option<Vec<u16>>,
    pub pattern: Option<Regex>,
}

impl HttpTarget {
    /// Build the condition. `default_codes` applies when the target lists none.
    pub fn into_condition(
        self,
        default_codes: Option<&[u16]>,
    ) -> Result<HttpCondition, ConfigError> {
        let mut condition = HttpCondition::new(&self.url)?;
        if let Some(codes) = self.codes.or_else(|| default_codes.map(<[u16]>::to_vec)) {
            condition = condition.with_accepted_codes(codes);
        }
        if let Some(pattern) = self.pattern {
            condition = condition.with_content_match(pattern);
        }
        Ok(condition)
    }
}

/// Parses an `--http` argument.
///
/// An empty CODES field keeps the defaults. A PATTERN field, when present,
/// must be a non-empty regex.
pub fn parse_http_target(arg: &str) -> Result<HttpTarget, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidHttpTarget {
        target: arg.to_string(),
        reason: reason.to_string(),
    };

    let fields: Vec<&str> = arg.split('|').collect();
    if fields.len() > 3 {
        return Err(invalid("expected URL[|CODES[|PATTERN]]"));
    }

    let url = fields[0].trim();
    if url.is_empty() {
        return Err(invalid("URL is empty"));
    }

    let codes = match fields.get(1).map(|s| s.trim()) {
        Some(list) if !list.is_empty() => Some(parse_status_codes(list)?),
        _ => None,
    };

    let pattern = match fields.get(2) {
        Some(p) if p.is_empty() => return Err(invalid("content match pattern is empty")),
        Some(p) => Some(Regex::new(p)?),
        None => None,
    };

    Ok(HttpTarget {
        url: url.to_string(),
        codes,
        pattern,
    })
}

/// Status codes accepted by every `--http` check that does not list its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodes(pub Vec<u16>);

/// Clap value parser for `--http-codes`.
pub fn clap_status_codes_validator(s: &str) -> Result<StatusCodes, String> {
    parse_status_codes(s)
        .map(StatusCodes)
        .map_err(|e| e.to_string())
}

/// Clap value parser for `--http`.
pub fn clap_http_target_validator(s: &str) -> Result<HttpTarget, String> {
    parse_http_target(s).map_err(|e| e.to_string())
}

/// Clap value parser for durations such as `500ms`, `10s` or `1m 30s`.
pub fn clap_duration_validator(s: &str) -> Result<std::time::Duration, String> {
    humantime::parse_duration(s).map_err(|e| format!("invalid duration '{s}': {e}"))
}
