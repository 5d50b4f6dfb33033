use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

pub const API_PREFIX: &str = "/api/v1";

const DEFAULT_PAGE_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Enabled,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Running,
    NotRunning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    Running,
    Paused,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub status: Status,
    pub serving_status: ServingStatus,
    pub display_status: DisplayStatus,
}

impl Campaign {
    fn set_status(&mut self, status: Status) {
        self.status = status;
        (self.serving_status, self.display_status) = match status {
            Status::Enabled => (ServingStatus::Running, DisplayStatus::Running),
            Status::Paused => (ServingStatus::NotRunning, DisplayStatus::Paused),
        };
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub id: u64,
    pub campaign_id: u64,
    pub name: String,
    pub status: Status,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupCreativeSet {
    pub id: u64,
    pub campaign_id: u64,
    pub ad_group_id: u64,
    pub creative_set_id: u64,
    pub status: Status,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateResource {
    pub name: String,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub status: Option<Status>,
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub status: Status,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Operators the mock can evaluate. Anything else fails to parse, so the
/// whole request is rejected before the store is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Operator {
    #[serde(rename = "EQUALS")]
    Equals,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "CONTAINS")]
    Contains,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub values: Vec<String>,
    #[serde(default)]
    pub ignore_case: bool,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDetail {
    pub total_results: usize,
    pub start_index: usize,
    pub items_per_page: usize,
}

#[derive(Serialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageDetail>,
}

fn data<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { data, pagination: None })
}

/// In-memory state shared by every handler.
#[derive(Debug, Default)]
pub struct Store {
    last_id: u64,
    pub campaigns: BTreeMap<u64, Campaign>,
    pub ad_groups: BTreeMap<u64, AdGroup>,
    pub creative_sets: BTreeMap<u64, AdGroupCreativeSet>,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Attach a creative set to an ad group. The API has no create endpoint
    /// for these, so tests seed them directly.
    pub fn insert_creative_set(
        &mut self,
        campaign_id: u64,
        ad_group_id: u64,
        creative_set_id: u64,
    ) -> AdGroupCreativeSet {
        let set = AdGroupCreativeSet {
            id: self.next_id(),
            campaign_id,
            ad_group_id,
            creative_set_id,
            status: Status::Enabled,
        };
        self.creative_sets.insert(set.id, set.clone());
        set
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    let api = Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/find", post(find_campaigns))
        .route(
            "/campaigns/{campaign_id}",
            get(get_campaign).put(update_campaign).delete(delete_campaign),
        )
        .route(
            "/campaigns/{campaign_id}/adgroups",
            get(list_ad_groups).post(create_ad_group),
        )
        .route("/campaigns/{campaign_id}/adgroups/find", post(find_ad_groups))
        .route(
            "/campaigns/{campaign_id}/adgroups/{ad_group_id}",
            get(get_ad_group).put(update_ad_group).delete(delete_ad_group),
        )
        .route(
            "/campaigns/{campaign_id}/adgroupcreativesets/find",
            post(find_creative_sets_by_campaign),
        )
        .route("/creativesets/find", post(find_creative_sets))
        .route(
            "/campaigns/{campaign_id}/adgroup/{ad_group_id}/adgroupcreativeset/{set_id}",
            put(update_creative_set_status),
        )
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Db::default()).await
}

/// Serve against a store the caller keeps a handle to.
pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

/// Invalid bodies answer 400, matching the remote API, instead of axum's 422.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, StatusCode> {
    payload.map(|Json(value)| value).map_err(|_| StatusCode::BAD_REQUEST)
}

fn typed_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, StatusCode> {
    serde_json::from_value(body(payload)?).map_err(|_| StatusCode::BAD_REQUEST)
}

// --- campaigns ---

async fn list_campaigns(State(db): State<Db>) -> Json<Envelope<Vec<Campaign>>> {
    let store = db.read().await;
    data(store.campaigns.values().cloned().collect())
}

async fn get_campaign(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
) -> Result<Json<Envelope<Campaign>>, StatusCode> {
    let store = db.read().await;
    store.campaigns.get(&campaign_id).cloned().map(data).ok_or(StatusCode::NOT_FOUND)
}

async fn create_campaign(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Campaign>>), StatusCode> {
    let input: CreateResource = typed_body(payload)?;
    let mut store = db.write().await;
    let mut campaign = Campaign {
        id: store.next_id(),
        name: input.name,
        status: Status::Enabled,
        serving_status: ServingStatus::Running,
        display_status: DisplayStatus::Running,
    };
    campaign.set_status(input.status.unwrap_or(Status::Enabled));
    store.campaigns.insert(campaign.id, campaign.clone());
    tracing::debug!(id = campaign.id, "campaign created");
    Ok((StatusCode::CREATED, data(campaign)))
}

async fn find_campaigns(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Vec<Value>>>, StatusCode> {
    let selector = parse_selector(body(payload)?)?;
    let store = db.read().await;
    find(store.campaigns.values(), &selector)
}

async fn update_campaign(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Campaign>>, StatusCode> {
    let input: UpdateResource = typed_body(payload)?;
    let mut store = db.write().await;
    let campaign = store.campaigns.get_mut(&campaign_id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        campaign.name = name;
    }
    if let Some(status) = input.status {
        campaign.set_status(status);
    }
    Ok(data(campaign.clone()))
}

async fn delete_campaign(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
) -> Result<Json<Envelope<Campaign>>, StatusCode> {
    let mut store = db.write().await;
    let campaign = store.campaigns.remove(&campaign_id).ok_or(StatusCode::NOT_FOUND)?;
    store.ad_groups.retain(|_, group| group.campaign_id != campaign_id);
    store.creative_sets.retain(|_, set| set.campaign_id != campaign_id);
    Ok(data(campaign))
}

// --- ad groups ---

async fn list_ad_groups(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
) -> Result<Json<Envelope<Vec<AdGroup>>>, StatusCode> {
    let store = db.read().await;
    if !store.campaigns.contains_key(&campaign_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(data(
        store
            .ad_groups
            .values()
            .filter(|group| group.campaign_id == campaign_id)
            .cloned()
            .collect(),
    ))
}

async fn get_ad_group(
    State(db): State<Db>,
    Path((campaign_id, ad_group_id)): Path<(u64, u64)>,
) -> Result<Json<Envelope<AdGroup>>, StatusCode> {
    let store = db.read().await;
    store
        .ad_groups
        .get(&ad_group_id)
        .filter(|group| group.campaign_id == campaign_id)
        .cloned()
        .map(data)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_ad_group(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<AdGroup>>), StatusCode> {
    let input: CreateResource = typed_body(payload)?;
    let mut store = db.write().await;
    if !store.campaigns.contains_key(&campaign_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let group = AdGroup {
        id: store.next_id(),
        campaign_id,
        name: input.name,
        status: input.status.unwrap_or(Status::Enabled),
    };
    store.ad_groups.insert(group.id, group.clone());
    Ok((StatusCode::CREATED, data(group)))
}

async fn find_ad_groups(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Vec<Value>>>, StatusCode> {
    let selector = parse_selector(body(payload)?)?;
    let store = db.read().await;
    if !store.campaigns.contains_key(&campaign_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    find(
        store.ad_groups.values().filter(|group| group.campaign_id == campaign_id),
        &selector,
    )
}

async fn update_ad_group(
    State(db): State<Db>,
    Path((campaign_id, ad_group_id)): Path<(u64, u64)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<AdGroup>>, StatusCode> {
    let input: UpdateResource = typed_body(payload)?;
    let mut store = db.write().await;
    let group = store
        .ad_groups
        .get_mut(&ad_group_id)
        .filter(|group| group.campaign_id == campaign_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        group.name = name;
    }
    if let Some(status) = input.status {
        group.status = status;
    }
    Ok(data(group.clone()))
}

async fn delete_ad_group(
    State(db): State<Db>,
    Path((campaign_id, ad_group_id)): Path<(u64, u64)>,
) -> Result<Json<Envelope<AdGroup>>, StatusCode> {
    let mut store = db.write().await;
    match store.ad_groups.get(&ad_group_id) {
        Some(group) if group.campaign_id == campaign_id => {}
        _ => return Err(StatusCode::NOT_FOUND),
    }
    let group = store.ad_groups.remove(&ad_group_id).ok_or(StatusCode::NOT_FOUND)?;
    store.creative_sets.retain(|_, set| set.ad_group_id != ad_group_id);
    Ok(data(group))
}

// --- creative sets ---

async fn find_creative_sets_by_campaign(
    State(db): State<Db>,
    Path(campaign_id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Vec<Value>>>, StatusCode> {
    let selector = parse_selector(body(payload)?)?;
    let store = db.read().await;
    if !store.campaigns.contains_key(&campaign_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    find(
        store.creative_sets.values().filter(|set| set.campaign_id == campaign_id),
        &selector,
    )
}

async fn find_creative_sets(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<Vec<Value>>>, StatusCode> {
    let selector = parse_selector(body(payload)?)?;
    let store = db.read().await;
    find(store.creative_sets.values(), &selector)
}

async fn update_creative_set_status(
    State(db): State<Db>,
    Path((campaign_id, ad_group_id, set_id)): Path<(u64, u64, u64)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<AdGroupCreativeSet>>, StatusCode> {
    let input: StatusBody = typed_body(payload)?;
    let mut store = db.write().await;
    let set = store
        .creative_sets
        .get_mut(&set_id)
        .filter(|set| set.campaign_id == campaign_id && set.ad_group_id == ad_group_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    set.status = input.status;
    Ok(data(set.clone()))
}

// --- selectors ---

/// Accepts the selector either bare or wrapped as `{"selector": {...}}`.
pub fn parse_selector(value: Value) -> Result<Selector, StatusCode> {
    let value = match value {
        Value::Object(mut map) if map.contains_key("selector") => {
            map.remove("selector").unwrap_or(Value::Null)
        }
        other => other,
    };
    if value.is_null() {
        return Ok(Selector::default());
    }
    serde_json::from_value(value).map_err(|_| StatusCode::BAD_REQUEST)
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(item: &Value, condition: &Condition) -> bool {
    let fold = |s: &str| {
        if condition.ignore_case {
            s.to_lowercase()
        } else {
            s.to_string()
        }
    };
    let Some(actual) = item.get(&condition.field).and_then(field_text) else {
        return false;
    };
    let actual = fold(&actual);
    let mut values = condition.values.iter().map(|v| fold(v.as_str()));
    match condition.operator {
        Operator::Equals => values.next().is_some_and(|v| v == actual),
        Operator::In => values.any(|v| v == actual),
        Operator::Contains => values.next().is_some_and(|v| actual.contains(&v)),
    }
}

fn find<'a, T, I>(items: I, selector: &Selector) -> Result<Json<Envelope<Vec<Value>>>, StatusCode>
where
    T: Serialize + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut found = Vec::new();
    for item in items {
        let item = serde_json::to_value(item).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        if selector.conditions.iter().all(|condition| matches(&item, condition)) {
            found.push(item);
        }
    }

    let (offset, limit) = match &selector.pagination {
        Some(page) => (page.offset, page.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
        None => (0, DEFAULT_PAGE_LIMIT),
    };
    let total_results = found.len();
    let page: Vec<Value> = found.into_iter().skip(offset).take(limit).collect();
    Ok(Json(Envelope {
        pagination: Some(PageDetail {
            total_results,
            start_index: offset,
            items_per_page: page.len(),
        }),
        data: page,
    }))
}
