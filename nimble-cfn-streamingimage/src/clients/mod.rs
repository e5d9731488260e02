//! Remote streaming image API.

pub mod memory;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimble_cfn_core::{ResourceState, ServiceError};

use crate::model::EncryptionConfiguration;

pub use memory::InMemoryStreamingImages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamingImageState {
    CreateInProgress,
    Ready,
    UpdateInProgress,
    DeleteInProgress,
    Deleted,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
}

impl StreamingImageState {
    /// Status code reported alongside the state.
    pub fn status_code(&self) -> &'static str {
        match self {
            StreamingImageState::CreateInProgress => "STREAMING_IMAGE_CREATE_IN_PROGRESS",
            StreamingImageState::Ready => "STREAMING_IMAGE_READY",
            StreamingImageState::UpdateInProgress => "STREAMING_IMAGE_UPDATE_IN_PROGRESS",
            StreamingImageState::DeleteInProgress => "STREAMING_IMAGE_DELETE_IN_PROGRESS",
            StreamingImageState::Deleted => "STREAMING_IMAGE_DELETED",
            StreamingImageState::CreateFailed => "INTERNAL_ERROR",
            StreamingImageState::UpdateFailed => "INTERNAL_ERROR",
            StreamingImageState::DeleteFailed => "INTERNAL_ERROR",
        }
    }
}

impl From<StreamingImageState> for ResourceState {
    fn from(state: StreamingImageState) -> Self {
        match state {
            StreamingImageState::CreateInProgress => ResourceState::Creating,
            StreamingImageState::Ready => ResourceState::Ready,
            StreamingImageState::UpdateInProgress => ResourceState::Updating,
            StreamingImageState::DeleteInProgress => ResourceState::Deleting,
            StreamingImageState::Deleted => ResourceState::Deleted,
            StreamingImageState::CreateFailed => ResourceState::CreateFailed,
            StreamingImageState::UpdateFailed => ResourceState::UpdateFailed,
            StreamingImageState::DeleteFailed => ResourceState::DeleteFailed,
        }
    }
}

impl From<ResourceState> for StreamingImageState {
    fn from(state: ResourceState) -> Self {
        match state {
            ResourceState::Creating => StreamingImageState::CreateInProgress,
            ResourceState::Ready => StreamingImageState::Ready,
            ResourceState::Updating => StreamingImageState::UpdateInProgress,
            ResourceState::Deleting => StreamingImageState::DeleteInProgress,
            ResourceState::Deleted => StreamingImageState::Deleted,
            ResourceState::CreateFailed => StreamingImageState::CreateFailed,
            ResourceState::UpdateFailed => StreamingImageState::UpdateFailed,
            ResourceState::DeleteFailed => StreamingImageState::DeleteFailed,
        }
    }
}

/// Streaming image returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingImage {
    pub streaming_image_id: String,
    #[serde(default)]
    pub arn: String,
    pub name: String,
    pub description: Option<String>,
    pub ec2_image_id: String,
    pub encryption_configuration: Option<EncryptionConfiguration>,
    #[serde(default)]
    pub eula_ids: Vec<String>,
    pub owner: Option<String>,
    pub platform: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub state: StreamingImageState,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStreamingImageRequest {
    pub studio_id: String,
    pub client_token: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub ec2_image_id: String,
    pub tags: BTreeMap<String, String>,
}

/// Only the name and description of an image can change.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStreamingImageRequest {
    pub studio_id: String,
    pub streaming_image_id: String,
    pub client_token: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamingImagePage {
    pub streaming_images: Vec<StreamingImage>,
    pub next_token: Option<String>,
}

/// Streaming image operations of the Nimble Studio API.
#[async_trait]
pub trait StreamingImageApi: Send + Sync {
    async fn get_streaming_image(
        &self,
        studio_id: &str,
        streaming_image_id: &str,
    ) -> Result<StreamingImage, ServiceError>;

    async fn create_streaming_image(
        &self,
        request: CreateStreamingImageRequest,
    ) -> Result<StreamingImage, ServiceError>;

    async fn update_streaming_image(
        &self,
        request: UpdateStreamingImageRequest,
    ) -> Result<StreamingImage, ServiceError>;

    async fn delete_streaming_image(
        &self,
        studio_id: &str,
        streaming_image_id: &str,
        client_token: Option<&str>,
    ) -> Result<StreamingImage, ServiceError>;

    async fn list_streaming_images(
        &self,
        studio_id: &str,
        next_token: Option<&str>,
    ) -> Result<StreamingImagePage, ServiceError>;
}
