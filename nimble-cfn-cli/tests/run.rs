use std::time::Duration;

use serde_json::Value;

use nimble_cfn::{execute, parse_request, parse_seed};
use nimble_cfn_core::{Action, HandlerConfig, InMemoryStore, OperationStatus, Orchestrator};
use nimble_cfn_launchprofile::{InMemoryLaunchProfiles, LaunchProfile, ResourceModel};
use nimble_cfn_streamingimage::{InMemoryStreamingImages, StreamingImage};

const SEED: &str = r#"[
  {
    "studioId": "studioId",
    "record": {
      "launchProfileId": "launchProfileId",
      "name": "artists",
      "ec2SubnetIds": ["subnet-1"],
      "launchProfileProtocolVersions": ["2021-03-31"],
      "studioComponentIds": ["studioComponentId"],
      "state": "READY"
    }
  }
]"#;

fn lines(out: &[u8]) -> Vec<Value> {
    std::str::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

async fn seeded_profiles(settle_polls: u32) -> InMemoryLaunchProfiles {
    let service = InMemoryLaunchProfiles::new(
        InMemoryStore::new("lp").with_settle_polls(Some(settle_polls)),
    );
    for entry in parse_seed::<LaunchProfile>(SEED).unwrap() {
        service.seed(&entry.studio_id, entry.record).await;
    }
    service
}

#[test]
fn test_parse_request_uses_wire_names() {
    let request = parse_request::<ResourceModel>(
        r#"{
          "clientRequestToken": "clientToken",
          "desiredResourceState": {"StudioId": "studioId", "LaunchProfileId": "launchProfileId"}
        }"#,
    )
    .unwrap();

    assert_eq!(request.client_request_token.as_deref(), Some("clientToken"));
    let desired = request.desired_resource_state.unwrap();
    assert_eq!(desired.launch_profile_id.as_deref(), Some("launchProfileId"));
}

#[test]
fn test_invalid_seed_is_reported() {
    let err = parse_seed::<StreamingImage>(r#"{"studioId": "studioId"}"#).unwrap_err();
    assert!(err.to_string().contains("invalid seed file"));
}

#[tokio::test]
async fn test_read_prints_one_terminal_event() {
    let service = seeded_profiles(1).await;
    let handler = nimble_cfn_launchprofile::handler(service, HandlerConfig::default());
    let request = parse_request(
        r#"{"desiredResourceState": {"StudioId": "studioId", "LaunchProfileId": "launchProfileId"}}"#,
    )
    .unwrap();

    let mut out = Vec::new();
    let report = execute(
        &handler,
        &Orchestrator::default(),
        Action::Read,
        &request,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(report.event.status, OperationStatus::Success);
    let events = lines(&out);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["status"], "SUCCESS");
    assert_eq!(events[0]["callbackContext"], Value::Null);
    assert_eq!(events[0]["callbackDelaySeconds"], 0);
    assert_eq!(events[0]["resourceModel"]["Name"], "artists");
    assert_eq!(events[0]["resourceModel"]["StudioId"], "studioId");
}

#[tokio::test]
async fn test_update_without_waiting_prints_progress() {
    let service = seeded_profiles(1).await;
    let handler = nimble_cfn_launchprofile::handler(service, HandlerConfig::default());
    let request = parse_request(
        r#"{
          "clientRequestToken": "clientToken",
          "desiredResourceState": {
            "StudioId": "studioId",
            "LaunchProfileId": "launchProfileId",
            "Description": "lighting team"
          }
        }"#,
    )
    .unwrap();
    let orchestrator =
        Orchestrator::new(Duration::from_secs(60)).with_delay_override(Duration::ZERO);

    let mut out = Vec::new();
    execute(&handler, &orchestrator, Action::Update, &request, &mut out)
        .await
        .unwrap();

    let events = lines(&out);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["status"], "IN_PROGRESS");
    assert_eq!(events[0]["callbackContext"]["mutationIssued"], true);
    assert_eq!(events[0]["callbackDelaySeconds"], 5);
    assert_eq!(events[1]["status"], "SUCCESS");
    assert_eq!(events[1]["resourceModel"]["Description"], "lighting team");
}

#[tokio::test]
async fn test_missing_streaming_image_fails_with_not_found() {
    let service = InMemoryStreamingImages::default();
    let handler = nimble_cfn_streamingimage::handler(service, HandlerConfig::default());
    let request = parse_request(
        r#"{"desiredResourceState": {"StudioId": "studioId", "StreamingImageId": "missing"}}"#,
    )
    .unwrap();

    let mut out = Vec::new();
    let report = execute(
        &handler,
        &Orchestrator::default(),
        Action::Delete,
        &request,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(report.event.status, OperationStatus::Failed);
    let events = lines(&out);
    assert_eq!(events[0]["errorCode"], "NotFound");
}
