//! Full campaign lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP through `UreqDispatcher`. The client does not
//! decode responses, so the test parses bodies itself.

use searchads_core::{
    ApiError, CampaignClient, CampaignStatus, ClientConfig, Condition, HttpResponse, Selector,
    StatusUpdate, UreqDispatcher,
};
use serde_json::{json, Value};

fn start_server() -> (String, mock_server::Db) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let db = mock_server::Db::default();
    let server_db = db.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, server_db).await
        })
        .unwrap();
    });

    (format!("http://{addr}{}", mock_server::API_PREFIX), db)
}

fn json_body(response: HttpResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn id_of(response: HttpResponse) -> u64 {
    json_body(response)["data"]["id"].as_u64().unwrap()
}

#[test]
fn campaign_lifecycle() {
    let (base_url, db) = start_server();
    let client = CampaignClient::new(UreqDispatcher::new(ClientConfig::new(&base_url).with_org_id("1234")));

    // Step 1: list, should be empty.
    let resp = client.list_campaigns(None).unwrap();
    assert_eq!(json_body(resp)["data"], json!([]));

    // Step 2: create two campaigns.
    let spring = id_of(client.create_campaign(json!({"name": "Spring"})).unwrap());
    let autumn = id_of(client.create_campaign(r#"{"name":"Autumn","status":"PAUSED"}"#).unwrap());

    // Step 3: get one.
    let resp = client.list_campaigns(Some(spring.into())).unwrap();
    assert_eq!(json_body(resp)["data"]["name"], "Spring");

    // Step 4: find by selector, typed and pre-serialized.
    let selector = Selector::new()
        .condition(Condition::equals("status", "PAUSED"))
        .paginate(0, 20);
    let resp = client.find_campaigns(selector.to_payload().unwrap()).unwrap();
    let found = json_body(resp);
    assert_eq!(found["pagination"]["totalResults"], 1);
    assert_eq!(found["data"][0]["id"], autumn);

    let resp = client.find_campaigns(r#"{"pagination":{"offset":1,"limit":5}}"#).unwrap();
    assert_eq!(json_body(resp)["data"][0]["id"], autumn);

    // Step 5: update status; invalid status is a 400.
    let resp = client
        .update_campaign(spring, StatusUpdate::new(CampaignStatus::Paused).to_payload().unwrap())
        .unwrap();
    let updated = json_body(resp);
    assert_eq!(updated["data"]["status"], "PAUSED");
    assert_eq!(updated["data"]["displayStatus"], "PAUSED");

    let err = client.update_campaign(spring, json!({"status": "BOGUS"})).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));

    // Step 6: ad groups.
    let group = id_of(client.create_ad_group(spring, json!({"name": "Keywords"})).unwrap());
    let resp = client.list_ad_groups(spring, None).unwrap();
    assert_eq!(json_body(resp)["data"].as_array().unwrap().len(), 1);

    let resp = client.list_ad_groups(spring, Some(group.into())).unwrap();
    assert_eq!(json_body(resp)["data"]["name"], "Keywords");

    let resp = client
        .find_ad_groups(spring, json!({"conditions": [{"field": "name", "operator": "EQUALS", "values": ["keywords"], "ignoreCase": true}]}))
        .unwrap();
    assert_eq!(json_body(resp)["data"][0]["id"], group);

    let resp = client.update_ad_group(spring, group, json!({"status": "PAUSED"})).unwrap();
    assert_eq!(json_body(resp)["data"]["status"], "PAUSED");

    // Step 7: creative sets, seeded directly into the server's store.
    let set = db.blocking_write().insert_creative_set(spring, group, 106595061);

    let by_group = Selector::new()
        .condition(Condition::equals("adGroupId", group.to_string()))
        .paginate(0, 20);
    let resp = client
        .find_creative_sets_by_campaign(spring, by_group.to_wrapped_payload().unwrap())
        .unwrap();
    assert_eq!(json_body(resp)["data"][0]["id"], set.id);

    let resp = client.find_creative_sets(json!({"selector": {"pagination": {"offset": 0, "limit": 20}}})).unwrap();
    assert_eq!(json_body(resp)["pagination"]["totalResults"], 1);

    let resp = client
        .update_creative_set_status(spring, group, set.id, json!({"status": "PAUSED"}))
        .unwrap();
    assert_eq!(json_body(resp)["data"]["status"], "PAUSED");

    // Step 8: validation failures never reach the server.
    let err = client.delete_campaign(0u64).unwrap_err();
    assert!(matches!(err, ApiError::MissingParameter("campaign id")));
    let resp = client.list_campaigns(None).unwrap();
    assert_eq!(json_body(resp)["data"].as_array().unwrap().len(), 2);

    // Step 9: delete the ad group, then the campaign.
    client.delete_ad_group(spring, group).unwrap();
    let err = client.list_ad_groups(spring, Some(group.into())).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    let resp = client.delete_campaign(spring).unwrap();
    assert_eq!(json_body(resp)["data"]["id"], spring);
    let err = client.delete_campaign(spring).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: one campaign left.
    let resp = client.list_campaigns(None).unwrap();
    let remaining = json_body(resp);
    assert_eq!(remaining["data"].as_array().unwrap().len(), 1);
    assert_eq!(remaining["data"][0]["id"], autumn);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = CampaignClient::new(UreqDispatcher::new(ClientConfig::new(&format!("http://{addr}/api/v1"))));
    let err = client.list_campaigns(None).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}
