//! Synchronous client core for the Search Ads campaign API.
//!
//! # Overview
//! Builds `HttpRequest` values for campaign, ad group and creative set
//! operations and hands them to a `Dispatcher` (host-does-IO pattern). The
//! request builders never touch the network, which keeps them deterministic
//! and testable.
//!
//! # Design
//! - `requests` holds one pure builder per endpoint; `CampaignClient` pairs
//!   each builder with a dispatch.
//! - Required identifiers and payloads are validated before any path is
//!   built. Blank values fail with `ApiError::MissingParameter`.
//! - Responses are not decoded. `UreqDispatcher` returns the raw
//!   `HttpResponse` and maps non-2xx statuses to errors.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod requests;
pub mod types;

pub use client::CampaignClient;
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, UreqDispatcher};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestMode};
pub use types::{
    CampaignStatus, Condition, DisplayStatus, Operator, OrderBy, Pagination, Payload, ResourceId,
    Selector, ServingStatus, SortOrder, StatusUpdate,
};
