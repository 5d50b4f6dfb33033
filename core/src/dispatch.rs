//! The seam between request building and network I/O.
//!
//! # Design
//! `CampaignClient` only ever talks to a `Dispatcher`. Production code uses
//! `UreqDispatcher`; tests substitute a recorder that captures requests
//! without sending them. A dispatcher owns everything about the wire:
//! base URL, org context header, timeouts, status handling.

use std::fmt;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a finished `HttpRequest`.
pub trait Dispatcher {
    type Output;

    fn dispatch(&self, request: HttpRequest) -> Result<Self::Output, ApiError>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    type Output = D::Output;

    fn dispatch(&self, request: HttpRequest) -> Result<Self::Output, ApiError> {
        (**self).dispatch(request)
    }
}

/// Blocking HTTP dispatcher backed by `ureq`.
///
/// Returns the raw response for 2xx statuses. Non-2xx statuses become
/// `NotFound` or `HttpError`; the body is never decoded. Bodies longer than
/// `ClientConfig::max_response_bytes` fail with `ResponseTooLarge`.
#[derive(Clone)]
pub struct UreqDispatcher {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl fmt::Debug for UreqDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqDispatcher").field("config", &self.config).finish_non_exhaustive()
    }
}

impl UreqDispatcher {
    pub fn new(config: ClientConfig) -> Self {
        // Status codes are interpreted by `check_status`, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self { config, agent }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn apply_headers<B>(
        &self,
        mut builder: ureq::RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> ureq::RequestBuilder<B> {
        if let Some(org_id) = &self.config.org_id {
            builder = builder.header("X-AP-Context", format!("orgId={org_id}"));
        }
        for (key, value) in headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }
}

impl Dispatcher for UreqDispatcher {
    type Output = HttpResponse;

    fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url(&self.config.base_url);
        let body = request.body_text()?;
        debug!(method = %request.method, url = %url, mode = ?request.mode, "sending request");

        let headers = &request.headers;
        let result = match (request.method, body) {
            (HttpMethod::Get, _) => self.apply_headers(self.agent.get(&url), headers).call(),
            (HttpMethod::Delete, _) => self.apply_headers(self.agent.delete(&url), headers).call(),
            (HttpMethod::Post, Some(body)) => {
                self.apply_headers(self.agent.post(&url), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.apply_headers(self.agent.post(&url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                self.apply_headers(self.agent.put(&url), headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => self.apply_headers(self.agent.put(&url), headers).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let limit = self.config.max_response_bytes;
        let body = response
            .body_mut()
            .with_config()
            .limit(limit)
            .read_to_string()
            .map_err(|e| match e {
                ureq::Error::BodyExceedsLimit(_) => {
                    warn!(status, limit, url = %url, "response body too large");
                    ApiError::ResponseTooLarge { status, limit }
                }
                other => ApiError::Transport(other.to_string()),
            })?;
        debug!(status, url = %url, "response received");

        check_status(HttpResponse { status, headers, body })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    warn!(status = response.status, "request failed");
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_statuses_pass_through() {
        let ok = check_status(response(201, r#"{"data":{}}"#)).unwrap();
        assert_eq!(ok.status, 201);
        assert_eq!(ok.body, r#"{"data":{}}"#);
    }

    #[test]
    fn not_found_maps_to_dedicated_variant() {
        assert!(matches!(check_status(response(404, "")), Err(ApiError::NotFound)));
    }

    #[test]
    fn bad_request_keeps_status_and_body() {
        let err = check_status(response(400, "invalid status")).unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "invalid status");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn dispatcher_keeps_config() {
        let dispatcher = UreqDispatcher::new(ClientConfig::new("http://localhost:3000/").with_org_id("77"));
        assert_eq!(dispatcher.config().base_url, "http://localhost:3000");
        assert_eq!(dispatcher.config().org_id.as_deref(), Some("77"));
    }
}
