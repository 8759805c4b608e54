//! End-to-end scan flow: decoded text → NV1 parse → verification POST →
//! verdict mapping → session display state, against a wiremock backend.
//!
//! These tests drive the session exactly the way the console driver does,
//! covering the verdict table, the parse-failure branch, operator resume,
//! and the stale-verdict guard.

use nv_client::{CheckinApiConfig, CheckinClient};
use nv_payload::parse_nv1;
use nv_scan::{outcome_for, ScanOutcome, ScanPhase, ScanSession};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(mock_server: &MockServer) -> CheckinClient {
    let config = CheckinApiConfig::local_mock(&mock_server.uri(), "door-key").unwrap();
    CheckinClient::new(config).unwrap()
}

/// One full driver iteration: parse a decoded line, verify it, land the
/// verdict in the session.
async fn drive_scan(session: &mut ScanSession, client: &CheckinClient, decoded: &str) {
    match parse_nv1(decoded) {
        Some(token) => {
            let seq = session.begin_verification(token.clone()).unwrap();
            let verdict = outcome_for(client.check_in(&token).await);
            session.complete(seq, verdict).unwrap();
        }
        None => session.fail_parse("invalid code").unwrap(),
    }
}

#[tokio::test]
async fn valid_code_reaches_success_and_retains_serial() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "serial": "ABC123",
            "status": "valid",
            "checkedInAt": "2026-08-01T21:30:05Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ScanSession::new();

    drive_scan(&mut session, &client, "NV1:t=tok_1&e=evt_42&s=sig_1").await;

    assert_eq!(session.phase().name(), "SUCCESS");
    match session.last_outcome().unwrap() {
        ScanOutcome::Success { serial, .. } => assert_eq!(serial.as_deref(), Some("ABC123")),
        other => panic!("expected Success, got: {other:?}"),
    }
    assert_eq!(session.tally().success, 1);
}

#[tokio::test]
async fn duplicate_code_surfaces_prior_checkin_time() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": false,
            "reason": "duplicate",
            "checkedInAt": "2024-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ScanSession::new();

    drive_scan(&mut session, &client, "NV1:t=tok_1&e=evt_42&s=sig_1").await;

    assert_eq!(session.phase().name(), "DUPLICATE");
    match session.last_outcome().unwrap() {
        ScanOutcome::Duplicate { checked_in_at } => assert_eq!(
            checked_in_at.unwrap().to_canonical_string(),
            "2024-01-01T00:00:00Z"
        ),
        other => panic!("expected Duplicate, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_scanner_key_shows_unauthorized_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkin"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"ok": true, "serial": "IGNORED"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ScanSession::new();

    drive_scan(&mut session, &client, "NV1:t=tok_1&e=evt_42&s=sig_1").await;

    assert_eq!(session.phase().name(), "ERROR");
    match session.last_outcome().unwrap() {
        ScanOutcome::Error { message } => assert_eq!(message, "unauthorized"),
        other => panic!("expected Error, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreadable_code_shows_error_without_posting() {
    let mock_server = MockServer::start().await;
    // No mock mounted: any request would 404 and fail the expectations below.

    let client = client_for(&mock_server);
    let mut session = ScanSession::new();

    drive_scan(&mut session, &client, "just some text").await;

    assert_eq!(session.phase().name(), "ERROR");
    match session.last_outcome().unwrap() {
        ScanOutcome::Error { message } => assert_eq!(message, "invalid code"),
        other => panic!("expected Error, got: {other:?}"),
    }
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn operator_resume_returns_to_scanning_for_the_next_code() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": false, "reason": "invalid"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ScanSession::new();

    drive_scan(&mut session, &client, "NV1:t=a&e=b&s=c").await;
    assert_eq!(session.phase().name(), "INVALID");

    session.resume().unwrap();
    assert_eq!(*session.phase(), ScanPhase::Scanning);
    assert!(session.last_outcome().is_none());

    drive_scan(&mut session, &client, "NV1:t=d&e=b&s=f").await;
    assert_eq!(session.phase().name(), "INVALID");
    assert_eq!(session.tally().invalid, 2);
}

#[tokio::test]
async fn verdict_landing_after_resume_is_dropped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut session = ScanSession::new();

    // The request is sent but the operator gives up on it: the driver lands
    // an error verdict, the operator resumes, and a fresh scan begins.
    let token = parse_nv1("NV1:t=a&e=b&s=c").unwrap();
    let stale_seq = session.begin_verification(token.clone()).unwrap();
    let stale_verdict = outcome_for(client.check_in(&token).await);
    session
        .complete(
            stale_seq,
            ScanOutcome::Error {
                message: "timed out waiting for verdict".to_string(),
            },
        )
        .unwrap();
    session.resume().unwrap();

    // The late verdict must not disturb the resumed session.
    assert!(session.complete(stale_seq, stale_verdict).is_err());
    assert_eq!(*session.phase(), ScanPhase::Scanning);
    assert_eq!(session.tally().success, 0);
}
