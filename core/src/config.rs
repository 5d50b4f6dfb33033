//! Connection settings for `UreqDispatcher`.

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.searchads.apple.com/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; request paths are appended to it.
    pub base_url: String,
    /// Sent as `X-AP-Context: orgId=<id>` when set.
    pub org_id: Option<String>,
    pub timeout: Duration,
    /// Largest response body read into memory. Longer bodies fail with
    /// `ResponseTooLarge`.
    pub max_response_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            org_id: None,
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_response_bytes(mut self, limit: u64) -> Self {
        self.max_response_bytes = limit;
        self
    }

    /// Read `SEARCHADS_BASE_URL`, `SEARCHADS_ORG_ID`, `SEARCHADS_TIMEOUT_SECS`
    /// and `SEARCHADS_MAX_RESPONSE_BYTES`, falling back to the defaults.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = match lookup("SEARCHADS_BASE_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };
        if let Some(org_id) = lookup("SEARCHADS_ORG_ID").filter(|v| !v.trim().is_empty()) {
            config.org_id = Some(org_id.trim().to_string());
        }
        if let Some(secs) = lookup("SEARCHADS_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("SEARCHADS_TIMEOUT_SECS is not a number: {secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = lookup("SEARCHADS_MAX_RESPONSE_BYTES") {
            config.max_response_bytes = limit.trim().parse().map_err(|_| {
                ApiError::Config(format!("SEARCHADS_MAX_RESPONSE_BYTES is not a number: {limit}"))
            })?;
        }
        Ok(config)
    }
}
