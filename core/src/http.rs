//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! request builders in `requests` produce `HttpRequest` values without
//! touching the network; a `Dispatcher` turns them into real I/O. Paths are
//! relative to the API root (`campaigns/42`), so the same request can be
//! sent to production or to a mock server.

use std::fmt;

use crate::error::ApiError;
use crate::types::Payload;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a request only reads remote state or changes it.
///
/// `find` endpoints are POSTs but still `Read`. Dispatchers may use the mode
/// to route or account requests separately; the client never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Read,
    Write,
}

/// An HTTP request described as plain data.
///
/// Built by the functions in `requests`. Immutable once built: the
/// dispatcher receives it by value and nothing else holds a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub mode: RequestMode,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Payload>,
}

impl HttpRequest {
    /// Join the relative path onto `base_url` with exactly one `/`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path)
    }

    /// Serialize the body for the wire, if there is one.
    pub fn body_text(&self) -> Result<Option<String>, ApiError> {
        self.body.as_ref().map(Payload::to_text).transpose()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
