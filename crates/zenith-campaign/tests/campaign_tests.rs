// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the broadcast engine and the campaign wizard,
//! run against the mock sender/recorder/generator.

use std::time::Duration;

use zenith_campaign::audience::Segment;
use zenith_campaign::broadcast::{AbortReason, BroadcastEngine, DeliveryMode, MissionSpec};
use zenith_campaign::wizard::{ArchitectForm, Wizard, WizardError, WizardState};
use zenith_core::types::{
    AssetKind, AssetRef, Client, Credentials, KeyRecord, OrderStatus, Product, TemplateSpec,
};
use zenith_test_utils::{MockGenerator, MockRecorder, MockSender, ScriptedFailure, SentMessage};

fn client(name: &str, phone: &str) -> Client {
    Client {
        client: name.to_string(),
        phone: phone.to_string(),
        city: "Casablanca".to_string(),
        address: String::new(),
        items: "Argan Oil".to_string(),
        qty: 1,
        price: 249.0,
        status: OrderStatus::New,
        note: String::new(),
        date: "2026-08-01".to_string(),
    }
}

fn audience() -> Vec<Client> {
    vec![
        client("Amina", "0612345678"),
        client("Karim", "212600000001"),
        client("Leila", "661234567"),
    ]
}

fn spec(audience: Vec<Client>, asset: Option<AssetRef>, mode: DeliveryMode) -> MissionSpec {
    MissionSpec {
        product_name: "Argan Oil".to_string(),
        angle_title: "High Urgency".to_string(),
        message_text: "عرض خاص اليوم فقط".to_string(),
        cta_link: Some("https://shop.example/argan".to_string()),
        asset,
        audience,
        audience_label: Segment::All.to_string(),
        mode,
        sender_alias: "default".to_string(),
    }
}

fn engine(
    sender: &MockSender,
    recorder: &MockRecorder,
) -> BroadcastEngine<MockSender, MockRecorder> {
    BroadcastEngine::new(sender.clone(), recorder.clone(), Duration::ZERO, 10)
}

#[tokio::test]
async fn freeform_text_reaches_every_recipient() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);

    let outcome = engine
        .run(&spec(audience(), None, DeliveryMode::Freeform))
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 3);
    assert_eq!(outcome.summary.failed, 0);
    assert_eq!(outcome.summary.total, 3);
    assert!(outcome.aborted.is_none());

    let sent = sender.sent().await;
    let recipients: Vec<_> = sent.iter().map(|m| m.to().to_string()).collect();
    assert_eq!(recipients, vec!["212612345678", "212600000001", "661234567"]);
    match &sent[0] {
        SentMessage::Text { body, .. } => {
            assert!(body.contains("عرض خاص"));
            assert!(body.contains("🔗 https://shop.example/argan"));
        }
        other => panic!("expected text message, got {other:?}"),
    }

    // Log is most-recent-first.
    let statuses: Vec<_> = outcome.log.entries().map(|e| e.name.as_str()).collect();
    assert_eq!(statuses, vec!["Leila", "Karim", "Amina"]);

    let recorded = recorder.recorded().await;
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].campaignid.starts_with("OPS-"));
    assert_eq!(recorded[0].name, "High Urgency: Argan Oil");
    assert_eq!(recorded[0].sent, 3);
    assert_eq!(recorded[0].failed, 0);
    assert_eq!(recorded[0].mediaurl, "N/A");
    assert_eq!(recorded[0].status, "Completed");
    assert_eq!(outcome.campaign.as_ref().unwrap().sent, 3);
}

#[tokio::test]
async fn unusable_phone_is_skipped_without_a_send_attempt() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);

    let mut clients = audience();
    clients.insert(1, client("Ghost", "no digits here"));

    let outcome = engine
        .run(&spec(clients, None, DeliveryMode::Freeform))
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 3);
    assert_eq!(outcome.summary.failed, 1);
    assert_eq!(sender.sent().await.len(), 3);

    let ghost = outcome
        .log
        .entries()
        .find(|e| e.name == "Ghost")
        .expect("skipped client is logged");
    assert!(ghost.is_error);
    assert_eq!(ghost.status, "Invalid number");
}

#[tokio::test]
async fn rejection_mid_batch_continues_to_the_rest() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    sender.fail_send_at(1, ScriptedFailure::Rejected).await;
    let engine = engine(&sender, &recorder);

    let outcome = engine
        .run(&spec(audience(), None, DeliveryMode::Freeform))
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 2);
    assert_eq!(outcome.summary.failed, 1);
    assert!(outcome.aborted.is_none());

    // The third recipient was still attempted.
    let sent = sender.sent().await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].to(), "661234567");

    // Partial counts land in the campaign record.
    let recorded = recorder.recorded().await;
    assert_eq!(recorded[0].sent, 2);
    assert_eq!(recorded[0].failed, 1);
}

#[tokio::test]
async fn credential_expiry_aborts_the_mission() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    sender
        .fail_send_at(1, ScriptedFailure::CredentialExpired)
        .await;
    let engine = engine(&sender, &recorder);

    let outcome = engine
        .run(&spec(audience(), None, DeliveryMode::Freeform))
        .await
        .unwrap();

    assert_eq!(outcome.aborted, Some(AbortReason::CredentialExpired));
    assert_eq!(outcome.summary.sent, 1);
    assert_eq!(outcome.summary.failed, 1);

    // Nothing after the failing recipient is attempted, and no campaign
    // record is written for an aborted mission.
    assert_eq!(sender.sent().await.len(), 1);
    assert!(outcome.campaign.is_none());
    assert!(recorder.recorded().await.is_empty());

    let newest = outcome.log.entries().next().unwrap();
    assert_eq!(newest.status, "Credential expired");
}

#[tokio::test]
async fn audio_asset_sends_caption_as_follow_up_text() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);

    let asset = AssetRef::DataUri {
        kind: AssetKind::Audio,
        uri: "data:audio/wav;base64,UklGRg==".to_string(),
    };
    let outcome = engine
        .run(&spec(
            vec![client("Amina", "0612345678")],
            Some(asset),
            DeliveryMode::Freeform,
        ))
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 1);
    assert_eq!(sender.uploads().await.len(), 1);

    let sent = sender.sent().await;
    assert_eq!(sent.len(), 2);
    match &sent[0] {
        SentMessage::Media { kind, caption, .. } => {
            assert_eq!(*kind, AssetKind::Audio);
            assert!(caption.is_none());
        }
        other => panic!("expected media message, got {other:?}"),
    }
    match &sent[1] {
        SentMessage::Text { body, .. } => assert!(body.contains("عرض خاص")),
        other => panic!("expected follow-up text, got {other:?}"),
    }
}

#[tokio::test]
async fn image_asset_carries_the_body_as_caption() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);

    let asset = AssetRef::DataUri {
        kind: AssetKind::Image,
        uri: "data:image/png;base64,QUJD".to_string(),
    };
    engine
        .run(&spec(
            vec![client("Amina", "0612345678")],
            Some(asset),
            DeliveryMode::Freeform,
        ))
        .await
        .unwrap();

    let sent = sender.sent().await;
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        SentMessage::Media { kind, caption, .. } => {
            assert_eq!(*kind, AssetKind::Image);
            assert!(caption.as_deref().unwrap().contains("🔗"));
        }
        other => panic!("expected media message, got {other:?}"),
    }
}

#[tokio::test]
async fn template_mode_header_never_carries_audio() {
    let template = TemplateSpec {
        name: "promo_blast".to_string(),
        locale: "en_US".to_string(),
        body_params: vec!["Amina".to_string()],
        button_url_suffix: None,
    };

    // Audio asset: uploaded, but excluded from the template header.
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);
    let audio = AssetRef::DataUri {
        kind: AssetKind::Audio,
        uri: "data:audio/wav;base64,UklGRg==".to_string(),
    };
    engine
        .run(&spec(
            vec![client("Amina", "0612345678")],
            Some(audio),
            DeliveryMode::Template(template.clone()),
        ))
        .await
        .unwrap();
    match &sender.sent().await[0] {
        SentMessage::Template { name, header, .. } => {
            assert_eq!(name, "promo_blast");
            assert!(header.is_none());
        }
        other => panic!("expected template message, got {other:?}"),
    }

    // Image asset: rides in the header.
    let sender = MockSender::new();
    let engine = BroadcastEngine::new(sender.clone(), MockRecorder::new(), Duration::ZERO, 10);
    let image = AssetRef::DataUri {
        kind: AssetKind::Image,
        uri: "data:image/png;base64,QUJD".to_string(),
    };
    engine
        .run(&spec(
            vec![client("Amina", "0612345678")],
            Some(image),
            DeliveryMode::Template(template),
        ))
        .await
        .unwrap();
    match &sender.sent().await[0] {
        SentMessage::Template { header, .. } => assert_eq!(*header, Some(AssetKind::Image)),
        other => panic!("expected template message, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_failure_is_a_preflight_error() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    sender.fail_upload(ScriptedFailure::Rejected).await;
    let engine = engine(&sender, &recorder);

    let asset = AssetRef::DataUri {
        kind: AssetKind::Image,
        uri: "data:image/png;base64,QUJD".to_string(),
    };
    let result = engine
        .run(&spec(audience(), Some(asset), DeliveryMode::Freeform))
        .await;

    assert!(result.is_err());
    assert!(sender.sent().await.is_empty());
    assert!(recorder.recorded().await.is_empty());
}

#[tokio::test]
async fn recorder_failure_does_not_mask_the_outcome() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    recorder.fail_next().await;
    let engine = engine(&sender, &recorder);

    let outcome = engine
        .run(&spec(audience(), None, DeliveryMode::Freeform))
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 3);
    assert!(outcome.campaign.is_some());
    assert!(recorder.recorded().await.is_empty());
}

#[tokio::test]
async fn delivery_log_is_capped() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = BroadcastEngine::new(sender.clone(), recorder.clone(), Duration::ZERO, 2);

    let outcome = engine
        .run(&spec(audience(), None, DeliveryMode::Freeform))
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 3);
    assert_eq!(outcome.log.len(), 2);
    let names: Vec<_> = outcome.log.entries().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Leila", "Karim"]);
}

#[tokio::test(start_paused = true)]
async fn recipients_are_paced_with_the_configured_delay() {
    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = BroadcastEngine::new(
        sender.clone(),
        recorder.clone(),
        Duration::from_millis(450),
        10,
    );

    let start = tokio::time::Instant::now();
    engine
        .run(&spec(audience(), None, DeliveryMode::Freeform))
        .await
        .unwrap();

    // Two gaps for three recipients; no delay after the last.
    assert_eq!(start.elapsed(), Duration::from_millis(900));
}

fn form() -> ArchitectForm {
    ArchitectForm {
        product: Product {
            productid: "P-1".to_string(),
            productname: "Argan Oil".to_string(),
            price: 249.0,
            description: "Cold-pressed argan oil".to_string(),
        },
        language: "Moroccan Darija".to_string(),
        segment: Segment::All,
        audience: audience(),
    }
}

fn credentials() -> Credentials {
    Credentials::from_keys(&[
        KeyRecord {
            key: "whatsapp_access_token".to_string(),
            value: "EAAG-test".to_string(),
        },
        KeyRecord {
            key: "whatsapp_phone_id".to_string(),
            value: "1029384756".to_string(),
        },
    ])
}

#[tokio::test]
async fn wizard_walks_all_five_stages() {
    let generator = MockGenerator::new();
    let mut wizard = Wizard::new();

    wizard
        .submit_architect(&generator, form(), "Scarcity")
        .await
        .unwrap();
    assert!(matches!(wizard.state(), WizardState::Strategy { .. }));

    wizard.select_variation(1).unwrap();
    wizard.set_cta("https://shop.example/argan".to_string()).unwrap();
    wizard.advance_to_transmission().unwrap();

    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);
    let outcome = wizard
        .launch(&engine, &credentials(), None, DeliveryMode::Freeform)
        .await
        .unwrap();

    assert_eq!(outcome.summary.sent, 3);
    assert_eq!(outcome.summary.angle_title, "High Urgency");
    match wizard.state() {
        WizardState::Operation { summary } => assert_eq!(summary.sent, 3),
        other => panic!("expected operation stage, got {other:?}"),
    }

    wizard.reset().unwrap();
    assert!(matches!(wizard.state(), WizardState::Architect));
}

#[tokio::test]
async fn wizard_rejects_an_empty_audience() {
    let generator = MockGenerator::new();
    let mut wizard = Wizard::new();
    let mut form = form();
    form.audience.clear();

    let err = wizard
        .submit_architect(&generator, form, "Scarcity")
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::EmptyAudience));
    assert!(matches!(wizard.state(), WizardState::Architect));
}

#[tokio::test]
async fn wizard_rejects_out_of_range_variation() {
    let generator = MockGenerator::new();
    let mut wizard = Wizard::new();
    wizard
        .submit_architect(&generator, form(), "Scarcity")
        .await
        .unwrap();

    let err = wizard.select_variation(4).unwrap_err();
    assert!(matches!(
        err,
        WizardError::InvalidSelection { index: 4, count: 4 }
    ));
    assert!(matches!(wizard.state(), WizardState::Strategy { .. }));
}

#[tokio::test]
async fn manual_message_skips_the_strategy_stage() {
    let mut wizard = Wizard::new();
    wizard
        .submit_manual(form(), "رسالة يدوية".to_string())
        .unwrap();

    match wizard.state() {
        WizardState::Creative(creative) => {
            assert_eq!(creative.draft.title, "Manual Message");
            assert_eq!(creative.draft.message_text, "رسالة يدوية");
        }
        other => panic!("expected creative stage, got {other:?}"),
    }
}

#[tokio::test]
async fn wizard_launch_requires_credentials() {
    let mut wizard = Wizard::new();
    wizard.submit_manual(form(), "hi".to_string()).unwrap();
    wizard.advance_to_transmission().unwrap();

    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    let engine = engine(&sender, &recorder);

    let err = wizard
        .launch(&engine, &Credentials::default(), None, DeliveryMode::Freeform)
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::MissingCredential(_)));
    assert!(matches!(wizard.state(), WizardState::Transmission { .. }));
    assert!(sender.sent().await.is_empty());
}

#[tokio::test]
async fn wizard_stays_in_transmission_after_an_abort() {
    let mut wizard = Wizard::new();
    wizard.submit_manual(form(), "hi".to_string()).unwrap();
    wizard.advance_to_transmission().unwrap();

    let sender = MockSender::new();
    let recorder = MockRecorder::new();
    sender
        .fail_send_at(0, ScriptedFailure::CredentialExpired)
        .await;
    let engine = engine(&sender, &recorder);

    let outcome = wizard
        .launch(&engine, &credentials(), None, DeliveryMode::Freeform)
        .await
        .unwrap();

    assert_eq!(outcome.aborted, Some(AbortReason::CredentialExpired));
    assert!(matches!(wizard.state(), WizardState::Transmission { .. }));
    // Relaunch succeeds once the scripted failure is spent.
    let outcome = wizard
        .launch(&engine, &credentials(), None, DeliveryMode::Freeform)
        .await
        .unwrap();
    assert!(outcome.aborted.is_none());
    assert!(matches!(wizard.state(), WizardState::Operation { .. }));
}

#[tokio::test]
async fn wizard_guards_stage_order() {
    let mut wizard = Wizard::new();
    assert!(matches!(
        wizard.select_variation(0),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        wizard.advance_to_transmission(),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        wizard.reset(),
        Err(WizardError::InvalidTransition { .. })
    ));
}
