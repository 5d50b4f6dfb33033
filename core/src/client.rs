//! Campaign, ad group and creative set operations.
//!
//! # Design
//! `CampaignClient` holds only a dispatcher and carries no mutable state
//! between calls. Each operation builds an immutable `HttpRequest` with the
//! matching function in `requests` and hands it to the dispatcher. The
//! dispatcher's result is returned untouched. A validation failure returns
//! before the dispatcher is called, so nothing is sent.

use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::requests;
use crate::types::{Payload, ResourceId};

/// Client for the campaign management endpoints.
#[derive(Debug, Clone)]
pub struct CampaignClient<D> {
    dispatcher: D,
}

impl<D: Dispatcher> CampaignClient<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    fn send(&self, request: HttpRequest) -> Result<D::Output, ApiError> {
        debug!(
            target: "searchads::request",
            method = %request.method,
            path = %request.path,
            mode = ?request.mode,
            "dispatching"
        );
        self.dispatcher.dispatch(request)
    }

    /// List all campaigns, or fetch one when `campaign_id` is set.
    pub fn list_campaigns(&self, campaign_id: Option<ResourceId>) -> Result<D::Output, ApiError> {
        self.send(requests::list_campaigns(campaign_id))
    }

    pub fn create_campaign(&self, model: impl Into<Payload>) -> Result<D::Output, ApiError> {
        self.send(requests::create_campaign(model)?)
    }

    /// Find campaigns with a selector. JSON values are serialized here;
    /// text is sent as given.
    pub fn find_campaigns(&self, selector: impl Into<Payload>) -> Result<D::Output, ApiError> {
        self.send(requests::find_campaigns(selector)?)
    }

    /// Update a campaign. The server answers with the updated campaign, or
    /// 400 when the update is invalid.
    pub fn update_campaign(
        &self,
        campaign_id: impl Into<ResourceId>,
        update: impl Into<Payload>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::update_campaign(campaign_id, update)?)
    }

    pub fn delete_campaign(&self, campaign_id: impl Into<ResourceId>) -> Result<D::Output, ApiError> {
        self.send(requests::delete_campaign(campaign_id)?)
    }

    /// List the ad groups of a campaign, or fetch one when `ad_group_id` is set.
    pub fn list_ad_groups(
        &self,
        campaign_id: impl Into<ResourceId>,
        ad_group_id: Option<ResourceId>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::list_ad_groups(campaign_id, ad_group_id)?)
    }

    pub fn find_ad_groups(
        &self,
        campaign_id: impl Into<ResourceId>,
        selector: impl Into<Payload>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::find_ad_groups(campaign_id, selector)?)
    }

    pub fn create_ad_group(
        &self,
        campaign_id: impl Into<ResourceId>,
        data: impl Into<Payload>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::create_ad_group(campaign_id, data)?)
    }

    pub fn update_ad_group(
        &self,
        campaign_id: impl Into<ResourceId>,
        ad_group_id: impl Into<ResourceId>,
        data: impl Into<Payload>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::update_ad_group(campaign_id, ad_group_id, data)?)
    }

    pub fn delete_ad_group(
        &self,
        campaign_id: impl Into<ResourceId>,
        ad_group_id: impl Into<ResourceId>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::delete_ad_group(campaign_id, ad_group_id)?)
    }

    /// Find ad-group creative sets within a campaign, typically filtered by
    /// `adGroupId`.
    pub fn find_creative_sets_by_campaign(
        &self,
        campaign_id: impl Into<ResourceId>,
        selector: impl Into<Payload>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::find_creative_sets_by_campaign(campaign_id, selector)?)
    }

    pub fn find_creative_sets(&self, selector: impl Into<Payload>) -> Result<D::Output, ApiError> {
        self.send(requests::find_creative_sets(selector))
    }

    pub fn update_creative_set_status(
        &self,
        campaign_id: impl Into<ResourceId>,
        ad_group_id: impl Into<ResourceId>,
        creative_set_id: impl Into<ResourceId>,
        body: impl Into<Payload>,
    ) -> Result<D::Output, ApiError> {
        self.send(requests::update_creative_set_status(
            campaign_id,
            ad_group_id,
            creative_set_id,
            body,
        )?)
    }
}
