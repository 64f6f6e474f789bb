// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the bridge client against a mock Apps Script
//! endpoint.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zenith_bridge::{BridgeClient, Table};
use zenith_config::model::BridgeConfig;
use zenith_core::types::OrderStatus;

fn connected(url: &str) -> BridgeClient {
    BridgeClient::new(&BridgeConfig {
        url: Some(url.to_string()),
        timeout_secs: 5,
    })
    .unwrap()
}

fn disconnected() -> BridgeClient {
    BridgeClient::new(&BridgeConfig {
        url: None,
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_clients_reads_and_normalizes() {
    let server = MockServer::start().await;

    let body = json!({
        "success": true,
        "data": [
            {"Customer": "Amina", "Phone Number": "0612345678", "Amount": "250", "Statuses": "confirmed"},
            {"client": "Omar", "whatsapp": "212600000001", "price": 99.5, "status": "New"}
        ]
    });

    Mock::given(method("GET"))
        .and(query_param("action", "read"))
        .and(query_param("sheet", "Clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let clients = connected(&server.uri()).fetch_clients().await;
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].client, "Amina");
    assert_eq!(clients[0].phone, "0612345678");
    assert_eq!(clients[0].price, 250.0);
    assert_eq!(clients[0].status, OrderStatus::Confirmed);
    assert_eq!(clients[1].client, "Omar");
    assert_eq!(clients[1].normalized_phone(), "212600000001");
}

#[tokio::test]
async fn remote_failure_serves_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let clients = connected(&server.uri()).fetch_clients().await;
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].client, "Demo User");
}

#[tokio::test]
async fn remote_reported_failure_serves_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "Sheet not found"})),
        )
        .mount(&server)
        .await;

    let templates = connected(&server.uri()).fetch_templates().await;
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "hello_world");
}

#[tokio::test]
async fn unconfigured_url_serves_fallback_without_network() {
    let clients = disconnected().fetch_clients().await;
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].client, "Demo User");
}

#[tokio::test]
async fn create_row_posts_plain_text_json_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("content-type", "text/plain;charset=utf-8"))
        .and(body_string_contains("\"action\":\"create\""))
        .and(body_string_contains("\"sheet\":\"Campaigns\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = connected(&server.uri())
        .create_row(Table::Campaigns, &json!({"campaignid": "OPS-1"}))
        .await;
    assert!(outcome.ok);
}

#[tokio::test]
async fn update_row_carries_id_key_and_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("\"action\":\"update\""))
        .and(body_string_contains("\"idKey\":\"phone\""))
        .and(body_string_contains("\"idValue\":\"212600000001\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = connected(&server.uri())
        .update_row(
            Table::Clients,
            &json!({"status": "Confirmed"}),
            "phone",
            &json!("212600000001"),
        )
        .await;
    assert!(outcome.ok);
}

#[tokio::test]
async fn mutation_failure_reports_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "Row not found"})),
        )
        .mount(&server)
        .await;

    let outcome = connected(&server.uri())
        .delete_row(Table::Clients, "phone", &json!("212600000099"))
        .await;
    assert!(!outcome.ok);
    assert_eq!(outcome.error.as_deref(), Some("Row not found"));
}

#[tokio::test]
async fn demo_mode_mutations() {
    let bridge = disconnected();

    let create = bridge
        .create_row(Table::Clients, &json!({"client": "X"}))
        .await;
    assert!(create.ok);

    let update = bridge
        .update_row(Table::Clients, &json!({"status": "Confirmed"}), "phone", &json!("1"))
        .await;
    assert!(update.ok);

    let delete = bridge.delete_row(Table::Clients, "phone", &json!("1")).await;
    assert!(!delete.ok);
}

#[tokio::test]
async fn record_campaign_creates_row() {
    use zenith_core::traits::CampaignRecorder;
    use zenith_core::types::Campaign;

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("\"sheet\":\"Campaigns\""))
        .and(body_string_contains("OPS-1724800000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let campaign = Campaign {
        campaignid: "OPS-1724800000000".to_string(),
        name: "Argan Oil - Urgency".to_string(),
        date: "2026-08-28".to_string(),
        audience: "3 clients".to_string(),
        template: "direct".to_string(),
        mediaurl: "".to_string(),
        sent: 3,
        failed: 0,
        opened: 0,
        replied: 0,
        status: "Completed".to_string(),
        sender: "primary".to_string(),
    };

    connected(&server.uri())
        .record_campaign(&campaign)
        .await
        .unwrap();
}
