//! Shared fixtures for launch profile handler tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use nimble_cfn_core::{HandlerConfig, InMemoryStore, ResourceHandlerRequest};
use nimble_cfn_launchprofile::{
    handler, InMemoryLaunchProfiles, LaunchProfile, LaunchProfileHandler, LaunchProfileState,
    ResourceModel, StreamConfiguration,
};

pub const STUDIO_ID: &str = "studioId";
pub const LAUNCH_PROFILE_ID: &str = "launchProfileId";
pub const CLIENT_TOKEN: &str = "clientToken";

pub fn config() -> HandlerConfig {
    HandlerConfig {
        stabilization_delay_secs: 5,
        transient_base_delay_secs: 2,
        transient_max_delay_secs: 60,
    }
}

/// Service whose states only move through `set_state`.
pub fn frozen_service() -> InMemoryLaunchProfiles {
    InMemoryLaunchProfiles::new(InMemoryStore::new("lp").with_settle_polls(None))
}

/// Service whose transitional states settle after `polls` extra describes.
pub fn settling_service(polls: u32) -> InMemoryLaunchProfiles {
    InMemoryLaunchProfiles::new(InMemoryStore::new("lp").with_settle_polls(Some(polls)))
}

pub fn handler_for(service: &InMemoryLaunchProfiles) -> LaunchProfileHandler<InMemoryLaunchProfiles> {
    handler(service.clone(), config())
}

pub fn stream_configuration() -> StreamConfiguration {
    StreamConfiguration {
        clipboard_mode: "ENABLED".to_string(),
        ec2_instance_types: vec!["g4dn.xlarge".to_string()],
        max_session_length_in_minutes: Some(690),
        max_stopped_session_length_in_minutes: None,
        streaming_image_ids: vec!["streamingImageId".to_string()],
    }
}

pub fn remote_profile(state: LaunchProfileState) -> LaunchProfile {
    LaunchProfile {
        launch_profile_id: LAUNCH_PROFILE_ID.to_string(),
        arn: String::new(),
        name: "name".to_string(),
        description: Some("description".to_string()),
        ec2_subnet_ids: vec!["subnet-1".to_string()],
        launch_profile_protocol_versions: vec!["2021-03-31".to_string()],
        stream_configuration: Some(stream_configuration()),
        studio_component_ids: vec!["studioComponentId".to_string()],
        tags: BTreeMap::from([("owner".to_string(), "render".to_string())]),
        state,
        status_code: None,
        status_message: None,
        created_at: None,
        updated_at: None,
    }
}

/// The model a read of [`remote_profile`] reports.
pub fn expected_model() -> ResourceModel {
    ResourceModel {
        description: Some("description".to_string()),
        ec2_subnet_ids: Some(vec!["subnet-1".to_string()]),
        launch_profile_id: Some(LAUNCH_PROFILE_ID.to_string()),
        launch_profile_protocol_versions: Some(vec!["2021-03-31".to_string()]),
        name: Some("name".to_string()),
        stream_configuration: Some(stream_configuration()),
        studio_component_ids: Some(vec!["studioComponentId".to_string()]),
        studio_id: Some(STUDIO_ID.to_string()),
        tags: Some(BTreeMap::from([("owner".to_string(), "render".to_string())])),
    }
}

pub fn identity() -> ResourceModel {
    ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        launch_profile_id: Some(LAUNCH_PROFILE_ID.to_string()),
        ..Default::default()
    }
}

/// Desired state for a new launch profile (no identifier yet).
pub fn new_profile_model() -> ResourceModel {
    ResourceModel {
        launch_profile_id: None,
        ..expected_model()
    }
}

pub fn request(model: ResourceModel) -> ResourceHandlerRequest<ResourceModel> {
    ResourceHandlerRequest::new(model).with_client_request_token(CLIENT_TOKEN)
}

pub async fn seeded(service: &InMemoryLaunchProfiles, state: LaunchProfileState) {
    service.seed(STUDIO_ID, remote_profile(state)).await;
}
