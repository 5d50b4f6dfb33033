//! Error types for the campaign API client.
//!
//! # Design
//! `MissingParameter` is the only error the client raises itself, always
//! before a request leaves the process. Everything else comes from the
//! dispatcher and is passed back to the caller unchanged. `NotFound` gets a
//! dedicated variant because callers frequently distinguish "the resource
//! does not exist" from "the server returned an unexpected status."

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required identifier or payload was blank. Nothing was sent.
    #[error("no {0} is set")]
    MissingParameter(&'static str),

    /// A payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A response body was longer than `ClientConfig::max_response_bytes`.
    #[error("HTTP {status}: response body exceeds {limit} bytes")]
    ResponseTooLarge { status: u16, limit: u64 },

    /// The request never produced a response (DNS, TLS, socket, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
