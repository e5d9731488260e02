#![allow(dead_code)]

use nimble_cfn_core::{HandlerConfig, InMemoryStore, ResourceHandlerRequest};
use nimble_cfn_streamingimage::{
    handler, EncryptionConfiguration, InMemoryStreamingImages, ResourceModel, StreamingImage,
    StreamingImageHandler, StreamingImageState,
};

pub const STUDIO_ID: &str = "studioId";
pub const STREAMING_IMAGE_ID: &str = "streamingImageId";

pub fn service(settle_polls: Option<u32>) -> InMemoryStreamingImages {
    InMemoryStreamingImages::new(InMemoryStore::new("si").with_settle_polls(settle_polls))
}

pub fn handler_for(service: &InMemoryStreamingImages) -> StreamingImageHandler<InMemoryStreamingImages> {
    handler(service.clone(), HandlerConfig::default())
}

pub fn image(state: StreamingImageState) -> StreamingImage {
    StreamingImage {
        streaming_image_id: STREAMING_IMAGE_ID.to_string(),
        arn: String::new(),
        name: "name".to_string(),
        description: Some("description".to_string()),
        ec2_image_id: "ami-0123456789abcdef0".to_string(),
        encryption_configuration: Some(EncryptionConfiguration {
            key_arn: Some("arn:aws:kms:us-west-2:000000000000:key/keyId".to_string()),
            key_type: "CUSTOMER_MANAGED_KEY".to_string(),
        }),
        eula_ids: vec!["eulaId".to_string()],
        owner: Some("owner".to_string()),
        platform: Some("WINDOWS".to_string()),
        tags: Default::default(),
        state,
        status_code: None,
        status_message: None,
        created_at: None,
        updated_at: None,
    }
}

/// Model reported for [`image`], with name and description overridden.
pub fn model_named(name: &str, description: &str) -> ResourceModel {
    ResourceModel {
        description: Some(description.to_string()),
        ec2_image_id: Some("ami-0123456789abcdef0".to_string()),
        encryption_configuration: Some(EncryptionConfiguration {
            key_arn: Some("arn:aws:kms:us-west-2:000000000000:key/keyId".to_string()),
            key_type: "CUSTOMER_MANAGED_KEY".to_string(),
        }),
        eula_ids: Some(vec!["eulaId".to_string()]),
        name: Some(name.to_string()),
        owner: Some("owner".to_string()),
        platform: Some("WINDOWS".to_string()),
        streaming_image_id: Some(STREAMING_IMAGE_ID.to_string()),
        studio_id: Some(STUDIO_ID.to_string()),
        tags: None,
    }
}

pub fn update_request() -> ResourceHandlerRequest<ResourceModel> {
    ResourceHandlerRequest::new(ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        streaming_image_id: Some(STREAMING_IMAGE_ID.to_string()),
        name: Some("new-name".to_string()),
        description: Some("new-description".to_string()),
        ..Default::default()
    })
    .with_client_request_token("clientToken")
}

pub async fn seeded(settle_polls: Option<u32>, state: StreamingImageState) -> InMemoryStreamingImages {
    let service = service(settle_polls);
    service.seed(STUDIO_ID, image(state)).await;
    service
}
