// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Cloud API client against a mock Graph
//! endpoint.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zenith_config::model::WhatsAppConfig;
use zenith_core::ZenithError;
use zenith_core::traits::MessageSender;
use zenith_core::types::{AssetKind, AssetRef, MediaId, TemplateSpec};
use zenith_whatsapp::CloudApiClient;

fn client(base_url: &str) -> CloudApiClient {
    let config = WhatsAppConfig {
        graph_url: base_url.to_string(),
        ..WhatsAppConfig::default()
    };
    CloudApiClient::new(&config, "test-token".into(), "555001".into()).unwrap()
}

#[tokio::test]
async fn send_text_posts_to_messages_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/555001/messages"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "messaging_product": "whatsapp",
            "to": "212612345678",
            "type": "text",
            "text": {"body": "Salam!"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"id": "wamid.test"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri())
        .send_text("212612345678", "Salam!")
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_data_uri_returns_media_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/555001/media"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "media-42"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = format!("data:image/png;base64,{}", STANDARD.encode(b"fake-png"));
    let media_id = client(&server.uri())
        .upload_media(&AssetRef::DataUri {
            kind: AssetKind::Image,
            uri,
        })
        .await
        .unwrap();
    assert_eq!(media_id.0, "media-42");
}

#[tokio::test]
async fn upload_remote_url_fetches_bytes_first() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/asset.mp4"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(b"fake-mp4".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v21.0/555001/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "media-77"})))
        .expect(1)
        .mount(&server)
        .await;

    let media_id = client(&server.uri())
        .upload_media(&AssetRef::RemoteUrl {
            kind: AssetKind::Video,
            url: format!("{}/asset.mp4", server.uri()),
        })
        .await
        .unwrap();
    assert_eq!(media_id.0, "media-77");
}

#[tokio::test]
async fn upload_code_190_maps_to_credential_expired() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/555001/media"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Error validating access token: Session has expired",
                "type": "OAuthException",
                "code": 190
            }
        })))
        .mount(&server)
        .await;

    let uri = format!("data:image/png;base64,{}", STANDARD.encode(b"x"));
    let err = client(&server.uri())
        .upload_media(&AssetRef::DataUri {
            kind: AssetKind::Image,
            uri,
        })
        .await
        .unwrap_err();
    assert!(err.is_credential_expired());
}

#[tokio::test]
async fn send_failure_maps_to_send_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/555001/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "(#131030) Recipient phone number not in allowed list",
                "type": "OAuthException",
                "code": 131030
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .send_text("212612345678", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, ZenithError::Send { .. }));
    assert!(err.to_string().contains("131030"));
}

#[tokio::test]
async fn send_template_includes_header_component() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v21.0/555001/messages"))
        .and(body_partial_json(json!({
            "type": "template",
            "template": {
                "name": "promo_fall",
                "language": {"code": "en_US"},
                "components": [
                    {
                        "type": "header",
                        "parameters": [
                            {"type": "image", "image": {"id": "media-42"}}
                        ]
                    }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"id": "wamid.test"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = TemplateSpec {
        name: "promo_fall".into(),
        locale: "en_US".into(),
        body_params: vec![],
        button_url_suffix: None,
    };
    client(&server.uri())
        .send_template(
            "212612345678",
            &spec,
            Some((AssetKind::Image, &MediaId("media-42".into()))),
        )
        .await
        .unwrap();
}
