//! Request builders, one per campaign API operation.
//!
//! Every builder is pure: it validates its arguments and returns an
//! `HttpRequest` or a `MissingParameter` error. Validation always runs
//! before the path is assembled. Identifiers are concatenated into paths as
//! given, without URL encoding.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, RequestMode};
use crate::types::{Payload, ResourceId};

const CAMPAIGN_ID: &str = "campaign id";
const AD_GROUP_ID: &str = "ad group id";
const CREATIVE_SET_ID: &str = "ad group creative set id";

fn require_id(id: impl Into<ResourceId>, name: &'static str) -> Result<ResourceId, ApiError> {
    let id = id.into();
    if id.is_blank() {
        return Err(ApiError::MissingParameter(name));
    }
    Ok(id)
}

fn require_payload(payload: impl Into<Payload>, name: &'static str) -> Result<Payload, ApiError> {
    let payload = payload.into();
    if payload.is_blank() {
        return Err(ApiError::MissingParameter(name));
    }
    Ok(payload)
}

/// Blank optional identifiers select the collection rather than an item.
fn present(id: Option<ResourceId>) -> Option<ResourceId> {
    id.filter(|id| !id.is_blank())
}

fn without_body(method: HttpMethod, mode: RequestMode, path: String) -> HttpRequest {
    HttpRequest {
        method,
        mode,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_body(method: HttpMethod, mode: RequestMode, path: String, body: Payload) -> HttpRequest {
    HttpRequest {
        method,
        mode,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    }
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

/// `GET campaigns` or `GET campaigns/{id}`.
pub fn list_campaigns(campaign_id: Option<ResourceId>) -> HttpRequest {
    let path = match present(campaign_id) {
        Some(id) => format!("campaigns/{id}"),
        None => "campaigns".to_string(),
    };
    without_body(HttpMethod::Get, RequestMode::Read, path)
}

/// `POST campaigns` with the campaign model as body.
pub fn create_campaign(model: impl Into<Payload>) -> Result<HttpRequest, ApiError> {
    let model = require_payload(model, "campaign data")?;
    Ok(with_body(HttpMethod::Post, RequestMode::Write, "campaigns".to_string(), model))
}

/// `POST campaigns/find`.
///
/// Unlike the other builders this one serializes a JSON selector to text
/// immediately; text selectors, including JSON string values, are assumed to
/// be JSON already.
pub fn find_campaigns(selector: impl Into<Payload>) -> Result<HttpRequest, ApiError> {
    let selector = require_payload(selector, "selector")?;
    let body = Payload::Text(selector.to_text()?);
    Ok(with_body(HttpMethod::Post, RequestMode::Read, "campaigns/find".to_string(), body))
}

/// `PUT campaigns/{id}`.
pub fn update_campaign(
    campaign_id: impl Into<ResourceId>,
    update: impl Into<Payload>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    let update = require_payload(update, "update data")?;
    Ok(with_body(
        HttpMethod::Put,
        RequestMode::Write,
        format!("campaigns/{campaign_id}"),
        update,
    ))
}

/// `DELETE campaigns/{id}`.
pub fn delete_campaign(campaign_id: impl Into<ResourceId>) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    Ok(without_body(
        HttpMethod::Delete,
        RequestMode::Write,
        format!("campaigns/{campaign_id}"),
    ))
}

// ---------------------------------------------------------------------------
// Ad groups
// ---------------------------------------------------------------------------

/// `GET campaigns/{id}/adgroups` or `GET campaigns/{id}/adgroups/{adGroupId}`.
pub fn list_ad_groups(
    campaign_id: impl Into<ResourceId>,
    ad_group_id: Option<ResourceId>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    let path = match present(ad_group_id) {
        Some(ad_group_id) => format!("campaigns/{campaign_id}/adgroups/{ad_group_id}"),
        None => format!("campaigns/{campaign_id}/adgroups"),
    };
    Ok(without_body(HttpMethod::Get, RequestMode::Read, path))
}

/// `POST campaigns/{id}/adgroups/find`. The selector is not validated.
pub fn find_ad_groups(
    campaign_id: impl Into<ResourceId>,
    selector: impl Into<Payload>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    Ok(with_body(
        HttpMethod::Post,
        RequestMode::Read,
        format!("campaigns/{campaign_id}/adgroups/find"),
        selector.into(),
    ))
}

/// `POST campaigns/{id}/adgroups`.
pub fn create_ad_group(
    campaign_id: impl Into<ResourceId>,
    data: impl Into<Payload>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    let data = require_payload(data, "ad group data")?;
    Ok(with_body(
        HttpMethod::Post,
        RequestMode::Write,
        format!("campaigns/{campaign_id}/adgroups"),
        data,
    ))
}

/// `PUT campaigns/{id}/adgroups/{adGroupId}`.
pub fn update_ad_group(
    campaign_id: impl Into<ResourceId>,
    ad_group_id: impl Into<ResourceId>,
    data: impl Into<Payload>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    let ad_group_id = require_id(ad_group_id, AD_GROUP_ID)?;
    let data = require_payload(data, "update data")?;
    Ok(with_body(
        HttpMethod::Put,
        RequestMode::Write,
        format!("campaigns/{campaign_id}/adgroups/{ad_group_id}"),
        data,
    ))
}

/// `DELETE campaigns/{id}/adgroups/{adGroupId}`.
pub fn delete_ad_group(
    campaign_id: impl Into<ResourceId>,
    ad_group_id: impl Into<ResourceId>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    let ad_group_id = require_id(ad_group_id, AD_GROUP_ID)?;
    Ok(without_body(
        HttpMethod::Delete,
        RequestMode::Write,
        format!("campaigns/{campaign_id}/adgroups/{ad_group_id}"),
    ))
}

// ---------------------------------------------------------------------------
// Creative sets
// ---------------------------------------------------------------------------

/// `POST campaigns/{id}/adgroupcreativesets/find`.
pub fn find_creative_sets_by_campaign(
    campaign_id: impl Into<ResourceId>,
    selector: impl Into<Payload>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    Ok(with_body(
        HttpMethod::Post,
        RequestMode::Read,
        format!("campaigns/{campaign_id}/adgroupcreativesets/find"),
        selector.into(),
    ))
}

/// `POST creativesets/find`.
pub fn find_creative_sets(selector: impl Into<Payload>) -> HttpRequest {
    with_body(
        HttpMethod::Post,
        RequestMode::Read,
        "creativesets/find".to_string(),
        selector.into(),
    )
}

/// `PUT campaigns/{id}/adgroup/{adGroupId}/adgroupcreativeset/{setId}`.
///
/// Note the singular `adgroup` segment; the remote API spells this path
/// differently from the ad group endpoints.
pub fn update_creative_set_status(
    campaign_id: impl Into<ResourceId>,
    ad_group_id: impl Into<ResourceId>,
    creative_set_id: impl Into<ResourceId>,
    body: impl Into<Payload>,
) -> Result<HttpRequest, ApiError> {
    let campaign_id = require_id(campaign_id, CAMPAIGN_ID)?;
    let ad_group_id = require_id(ad_group_id, AD_GROUP_ID)?;
    let creative_set_id = require_id(creative_set_id, CREATIVE_SET_ID)?;
    Ok(with_body(
        HttpMethod::Put,
        RequestMode::Write,
        format!("campaigns/{campaign_id}/adgroup/{ad_group_id}/adgroupcreativeset/{creative_set_id}"),
        body.into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn missing(err: ApiError) -> &'static str {
        match err {
            ApiError::MissingParameter(name) => name,
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn list_campaigns_without_id() {
        let req = list_campaigns(None);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.mode, RequestMode::Read);
        assert_eq!(req.path, "campaigns");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn list_campaigns_with_id() {
        assert_eq!(list_campaigns(Some(42u64.into())).path, "campaigns/42");
        assert_eq!(list_campaigns(Some("abc".into())).path, "campaigns/abc");
    }

    #[test]
    fn list_campaigns_blank_id_lists_all() {
        assert_eq!(list_campaigns(Some(0u64.into())).path, "campaigns");
        assert_eq!(list_campaigns(Some("".into())).path, "campaigns");
    }

    #[test]
    fn create_campaign_passes_model_through() {
        let req = create_campaign(json!({"name": "Spring"})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.mode, RequestMode::Write);
        assert_eq!(req.path, "campaigns");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body, Some(Payload::Json(json!({"name": "Spring"}))));
    }

    #[test]
    fn create_campaign_rejects_empty_model() {
        assert_eq!(missing(create_campaign("").unwrap_err()), "campaign data");
    }

    #[test]
    fn find_campaigns_serializes_json_selector() {
        let req = find_campaigns(json!({"a": 1})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.mode, RequestMode::Read);
        assert_eq!(req.path, "campaigns/find");
        assert_eq!(req.body, Some(Payload::Text(r#"{"a":1}"#.to_string())));
    }

    #[test]
    fn find_campaigns_passes_text_selector_unchanged() {
        let req = find_campaigns(r#"{"a":1}"#).unwrap();
        assert_eq!(req.body, Some(Payload::Text(r#"{"a":1}"#.to_string())));

        let odd = "{ \"a\" :   1 }";
        let req = find_campaigns(odd).unwrap();
        assert_eq!(req.body, Some(Payload::Text(odd.to_string())));
    }

    #[test]
    fn find_campaigns_sends_json_string_values_unquoted() {
        let req = find_campaigns(json!(r#"{"a":1}"#)).unwrap();
        assert_eq!(req.body, Some(Payload::Text(r#"{"a":1}"#.to_string())));
        assert_eq!(missing(find_campaigns(json!("0")).unwrap_err()), "selector");
    }

    #[test]
    fn update_campaign_validates_id_before_payload() {
        assert_eq!(missing(update_campaign(0u64, "").unwrap_err()), "campaign id");
        assert_eq!(missing(update_campaign(3u64, json!({})).unwrap_err()), "update data");
        let req = update_campaign(3u64, json!({"status": "PAUSED"})).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "campaigns/3");
    }

    #[test]
    fn delete_campaign_rejects_zero() {
        assert_eq!(missing(delete_campaign(0u64).unwrap_err()), "campaign id");
        assert_eq!(missing(delete_campaign("").unwrap_err()), "campaign id");
        let req = delete_campaign(8u64).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.mode, RequestMode::Write);
        assert_eq!(req.path, "campaigns/8");
        assert!(req.body.is_none());
    }

    #[test]
    fn list_ad_groups_paths() {
        assert_eq!(list_ad_groups(5u64, None).unwrap().path, "campaigns/5/adgroups");
        assert_eq!(
            list_ad_groups(5u64, Some(9u64.into())).unwrap().path,
            "campaigns/5/adgroups/9"
        );
        assert_eq!(missing(list_ad_groups(0u64, None).unwrap_err()), "campaign id");
    }

    #[test]
    fn find_ad_groups_keeps_selector_as_given() {
        let req = find_ad_groups(5u64, json!({"pagination": {"offset": 0, "limit": 5}})).unwrap();
        assert_eq!(req.mode, RequestMode::Read);
        assert_eq!(req.path, "campaigns/5/adgroups/find");
        assert_eq!(
            req.body,
            Some(Payload::Json(json!({"pagination": {"offset": 0, "limit": 5}})))
        );
    }

    #[test]
    fn create_ad_group_requires_data() {
        assert_eq!(missing(create_ad_group(5u64, json!(null)).unwrap_err()), "ad group data");
        let req = create_ad_group(5u64, json!({"name": "Group"})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "campaigns/5/adgroups");
    }

    #[test]
    fn update_ad_group_builds_put() {
        let req = update_ad_group(5u64, 9u64, json!({"status": "PAUSED"})).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.mode, RequestMode::Write);
        assert_eq!(req.path, "campaigns/5/adgroups/9");
        assert_eq!(req.body, Some(Payload::Json(json!({"status": "PAUSED"}))));
        assert_eq!(missing(update_ad_group(5u64, 0u64, "x").unwrap_err()), "ad group id");
    }

    #[test]
    fn delete_ad_group_requires_both_ids() {
        assert_eq!(missing(delete_ad_group(0u64, 0u64).unwrap_err()), "campaign id");
        assert_eq!(missing(delete_ad_group(1u64, "").unwrap_err()), "ad group id");
        assert_eq!(delete_ad_group(1u64, 2u64).unwrap().path, "campaigns/1/adgroups/2");
    }

    #[test]
    fn creative_set_finders() {
        let req = find_creative_sets_by_campaign(7u64, "{}").unwrap();
        assert_eq!(req.path, "campaigns/7/adgroupcreativesets/find");
        assert_eq!(req.mode, RequestMode::Read);

        let req = find_creative_sets("{}");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "creativesets/find");
        assert_eq!(req.mode, RequestMode::Read);
    }

    #[test]
    fn update_creative_set_status_path() {
        let req = update_creative_set_status(1u64, 2u64, 3u64, json!({"status": "PAUSED"})).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "campaigns/1/adgroup/2/adgroupcreativeset/3");
        assert_eq!(
            missing(update_creative_set_status(1u64, 2u64, 0u64, "{}").unwrap_err()),
            "ad group creative set id"
        );
    }

    #[test]
    fn identifiers_are_not_url_encoded() {
        assert_eq!(delete_campaign("a b/c").unwrap().path, "campaigns/a b/c");
    }

    #[test]
    fn read_builders_are_deterministic() {
        assert_eq!(list_campaigns(Some(42u64.into())), list_campaigns(Some(42u64.into())));
        assert_eq!(
            find_campaigns(json!({"a": 1})).unwrap(),
            find_campaigns(json!({"a": 1})).unwrap()
        );
        assert_eq!(find_creative_sets("{}"), find_creative_sets("{}"));
    }
}
