//! Remote launch profile API.
//!
//! The handler only talks to [`LaunchProfileApi`]. [`InMemoryLaunchProfiles`]
//! simulates the service for tests and local runs.

pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimble_cfn_core::{ResourceState, ServiceError};

use crate::model::StreamConfiguration;

pub use memory::InMemoryLaunchProfiles;

/// Launch profile lifecycle state as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchProfileState {
    CreateInProgress,
    Ready,
    UpdateInProgress,
    DeleteInProgress,
    Deleted,
    DeleteFailed,
    CreateFailed,
    UpdateFailed,
}

impl LaunchProfileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchProfileState::CreateInProgress => "CREATE_IN_PROGRESS",
            LaunchProfileState::Ready => "READY",
            LaunchProfileState::UpdateInProgress => "UPDATE_IN_PROGRESS",
            LaunchProfileState::DeleteInProgress => "DELETE_IN_PROGRESS",
            LaunchProfileState::Deleted => "DELETED",
            LaunchProfileState::DeleteFailed => "DELETE_FAILED",
            LaunchProfileState::CreateFailed => "CREATE_FAILED",
            LaunchProfileState::UpdateFailed => "UPDATE_FAILED",
        }
    }
}

impl From<LaunchProfileState> for ResourceState {
    fn from(state: LaunchProfileState) -> Self {
        match state {
            LaunchProfileState::CreateInProgress => ResourceState::Creating,
            LaunchProfileState::Ready => ResourceState::Ready,
            LaunchProfileState::UpdateInProgress => ResourceState::Updating,
            LaunchProfileState::DeleteInProgress => ResourceState::Deleting,
            LaunchProfileState::Deleted => ResourceState::Deleted,
            LaunchProfileState::DeleteFailed => ResourceState::DeleteFailed,
            LaunchProfileState::CreateFailed => ResourceState::CreateFailed,
            LaunchProfileState::UpdateFailed => ResourceState::UpdateFailed,
        }
    }
}

impl From<ResourceState> for LaunchProfileState {
    fn from(state: ResourceState) -> Self {
        match state {
            ResourceState::Creating => LaunchProfileState::CreateInProgress,
            ResourceState::Ready => LaunchProfileState::Ready,
            ResourceState::Updating => LaunchProfileState::UpdateInProgress,
            ResourceState::Deleting => LaunchProfileState::DeleteInProgress,
            ResourceState::Deleted => LaunchProfileState::Deleted,
            ResourceState::DeleteFailed => LaunchProfileState::DeleteFailed,
            ResourceState::CreateFailed => LaunchProfileState::CreateFailed,
            ResourceState::UpdateFailed => LaunchProfileState::UpdateFailed,
        }
    }
}

/// Launch profile returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchProfile {
    pub launch_profile_id: String,
    #[serde(default)]
    pub arn: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ec2_subnet_ids: Vec<String>,
    #[serde(default)]
    pub launch_profile_protocol_versions: Vec<String>,
    pub stream_configuration: Option<StreamConfiguration>,
    #[serde(default)]
    pub studio_component_ids: Vec<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub state: LaunchProfileState,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create call parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLaunchProfileRequest {
    pub studio_id: String,
    pub client_token: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub ec2_subnet_ids: Vec<String>,
    pub launch_profile_protocol_versions: Vec<String>,
    pub stream_configuration: StreamConfiguration,
    pub studio_component_ids: Vec<String>,
    pub tags: BTreeMap<String, String>,
}

/// Update call parameters. `None` leaves a property unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLaunchProfileRequest {
    pub studio_id: String,
    pub launch_profile_id: String,
    pub client_token: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub launch_profile_protocol_versions: Option<Vec<String>>,
    pub stream_configuration: Option<StreamConfiguration>,
    pub studio_component_ids: Option<Vec<String>>,
}

/// One page of launch profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchProfilePage {
    pub launch_profiles: Vec<LaunchProfile>,
    pub next_token: Option<String>,
}

/// Launch profile operations of the Nimble Studio API.
#[async_trait]
pub trait LaunchProfileApi: Send + Sync {
    async fn get_launch_profile(
        &self,
        studio_id: &str,
        launch_profile_id: &str,
    ) -> Result<LaunchProfile, ServiceError>;

    async fn create_launch_profile(
        &self,
        request: CreateLaunchProfileRequest,
    ) -> Result<LaunchProfile, ServiceError>;

    async fn update_launch_profile(
        &self,
        request: UpdateLaunchProfileRequest,
    ) -> Result<LaunchProfile, ServiceError>;

    async fn delete_launch_profile(
        &self,
        studio_id: &str,
        launch_profile_id: &str,
        client_token: Option<&str>,
    ) -> Result<LaunchProfile, ServiceError>;

    async fn list_launch_profiles(
        &self,
        studio_id: &str,
        next_token: Option<&str>,
    ) -> Result<LaunchProfilePage, ServiceError>;
}
