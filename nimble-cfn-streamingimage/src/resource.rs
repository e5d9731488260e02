//! Streaming image adapter for the reconciliation handler.

use async_trait::async_trait;

use nimble_cfn_core::{Resource, ResourceState, ServiceError};

use crate::clients::{
    CreateStreamingImageRequest, StreamingImage, StreamingImageApi, UpdateStreamingImageRequest,
};
use crate::model::ResourceModel;

pub const TYPE_NAME: &str = "AWS::NimbleStudio::StreamingImage";

/// `AWS::NimbleStudio::StreamingImage` over a [`StreamingImageApi`] client.
pub struct StreamingImageResource<C> {
    client: C,
}

impl<C: StreamingImageApi> StreamingImageResource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

/// Studio and image id of `model`, or a validation error naming the
/// missing property.
fn address(model: &ResourceModel) -> Result<(&str, &str), ServiceError> {
    let studio_id = model
        .studio_id
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("StudioId is required".to_string()))?;
    let image_id = model
        .streaming_image_id
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("StreamingImageId is required".to_string()))?;
    Ok((studio_id, image_id))
}

#[async_trait]
impl<C: StreamingImageApi> Resource for StreamingImageResource<C> {
    type Model = ResourceModel;
    type Remote = StreamingImage;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn identifier(&self, model: &ResourceModel) -> Option<String> {
        model.streaming_image_id.clone()
    }

    fn with_identifier(&self, model: &ResourceModel, id: &str) -> ResourceModel {
        ResourceModel {
            streaming_image_id: Some(id.to_string()),
            ..model.clone()
        }
    }

    fn validate_identity(&self, model: &ResourceModel) -> Result<(), String> {
        address(model).map(|_| ()).map_err(|e| e.message().to_string())
    }

    fn validate_create(&self, model: &ResourceModel) -> Result<(), String> {
        self.validate_scope(model)?;
        if model.name.is_none() {
            return Err("Name is required".to_string());
        }
        if model.ec2_image_id.is_none() {
            return Err("Ec2ImageId is required".to_string());
        }
        Ok(())
    }

    fn validate_scope(&self, model: &ResourceModel) -> Result<(), String> {
        match model.studio_id {
            Some(_) => Ok(()),
            None => Err("StudioId is required".to_string()),
        }
    }

    async fn describe(&self, model: &ResourceModel) -> Result<StreamingImage, ServiceError> {
        let (studio_id, image_id) = address(model)?;
        self.client.get_streaming_image(studio_id, image_id).await
    }

    async fn create(
        &self,
        model: &ResourceModel,
        client_token: Option<&str>,
    ) -> Result<String, ServiceError> {
        let request = CreateStreamingImageRequest {
            studio_id: model.studio_id.clone().unwrap_or_default(),
            client_token: client_token.map(str::to_string),
            name: model.name.clone().unwrap_or_default(),
            description: model.description.clone(),
            ec2_image_id: model.ec2_image_id.clone().unwrap_or_default(),
            tags: model.tags.clone().unwrap_or_default(),
        };
        let image = self.client.create_streaming_image(request).await?;
        Ok(image.streaming_image_id)
    }

    async fn update(
        &self,
        model: &ResourceModel,
        client_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        let (studio_id, image_id) = address(model)?;
        self.client
            .update_streaming_image(UpdateStreamingImageRequest {
                studio_id: studio_id.to_string(),
                streaming_image_id: image_id.to_string(),
                client_token: client_token.map(str::to_string),
                name: model.name.clone(),
                description: model.description.clone(),
            })
            .await
            .map(|_| ())
    }

    async fn delete(
        &self,
        model: &ResourceModel,
        client_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        let (studio_id, image_id) = address(model)?;
        self.client
            .delete_streaming_image(studio_id, image_id, client_token)
            .await
            .map(|_| ())
    }

    async fn list(
        &self,
        model: &ResourceModel,
        next_token: Option<&str>,
    ) -> Result<(Vec<ResourceModel>, Option<String>), ServiceError> {
        let studio_id = model
            .studio_id
            .as_deref()
            .ok_or_else(|| ServiceError::Validation("StudioId is required".to_string()))?;
        let page = self
            .client
            .list_streaming_images(studio_id, next_token)
            .await?;
        Ok((
            page.streaming_images
                .iter()
                .map(|image| self.to_model(image, model))
                .collect(),
            page.next_token,
        ))
    }

    fn state(&self, remote: &StreamingImage) -> ResourceState {
        ResourceState::from(remote.state)
    }

    fn status_message(&self, remote: &StreamingImage) -> Option<String> {
        remote.status_message.clone()
    }

    fn to_model(&self, remote: &StreamingImage, scope: &ResourceModel) -> ResourceModel {
        ResourceModel {
            description: remote.description.clone(),
            ec2_image_id: Some(remote.ec2_image_id.clone()),
            encryption_configuration: remote.encryption_configuration.clone(),
            eula_ids: Some(remote.eula_ids.clone()),
            name: Some(remote.name.clone()),
            owner: remote.owner.clone(),
            platform: remote.platform.clone(),
            streaming_image_id: Some(remote.streaming_image_id.clone()),
            studio_id: scope.studio_id.clone(),
            tags: if remote.tags.is_empty() {
                None
            } else {
                Some(remote.tags.clone())
            },
        }
    }
}
