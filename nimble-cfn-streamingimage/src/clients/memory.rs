//! In-memory streaming image service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use nimble_cfn_core::{InMemoryStore, ResourceState, ServiceError, StoredRecord};

use super::{
    CreateStreamingImageRequest, StreamingImage, StreamingImageApi, StreamingImagePage,
    StreamingImageState, UpdateStreamingImageRequest,
};

const ACCOUNT_ID: &str = "000000000000";

/// Streaming image API backed by an [`InMemoryStore`]. Clones share the store.
#[derive(Clone)]
pub struct InMemoryStreamingImages {
    store: Arc<InMemoryStore<StreamingImage>>,
}

impl Default for InMemoryStreamingImages {
    fn default() -> Self {
        Self::new(InMemoryStore::new("si"))
    }
}

impl InMemoryStreamingImages {
    pub fn new(store: InMemoryStore<StreamingImage>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &InMemoryStore<StreamingImage> {
        &self.store
    }

    /// Seed a streaming image under its own id and state.
    pub async fn seed(&self, studio_id: &str, image: StreamingImage) {
        let id = image.streaming_image_id.clone();
        let state = ResourceState::from(image.state);
        let status_message = image.status_message.clone();
        self.store.insert(studio_id, &id, image, state).await;
        if let Some(message) = status_message {
            self.store.set_state(&id, state, Some(&message)).await;
        }
    }

    fn view(record: StoredRecord<StreamingImage>) -> StreamingImage {
        let state = StreamingImageState::from(record.state);
        let arn = format!(
            "arn:aws:nimble:us-west-2:{}:streaming-image/{}/{}",
            ACCOUNT_ID, record.scope, record.id
        );
        StreamingImage {
            streaming_image_id: record.id,
            arn,
            state,
            status_code: Some(state.status_code().to_string()),
            status_message: record.status_message,
            created_at: Some(record.created_at),
            updated_at: Some(record.updated_at),
            ..record.value
        }
    }
}

#[async_trait]
impl StreamingImageApi for InMemoryStreamingImages {
    async fn get_streaming_image(
        &self,
        studio_id: &str,
        streaming_image_id: &str,
    ) -> Result<StreamingImage, ServiceError> {
        debug!("GetStreamingImage {}/{}", studio_id, streaming_image_id);
        let record = self.store.get(studio_id, streaming_image_id).await?;
        Ok(Self::view(record))
    }

    async fn create_streaming_image(
        &self,
        request: CreateStreamingImageRequest,
    ) -> Result<StreamingImage, ServiceError> {
        debug!(
            "CreateStreamingImage {} from {}",
            request.name, request.ec2_image_id
        );
        let image = StreamingImage {
            streaming_image_id: String::new(),
            arn: String::new(),
            name: request.name,
            description: request.description,
            ec2_image_id: request.ec2_image_id,
            encryption_configuration: None,
            eula_ids: Vec::new(),
            owner: Some(ACCOUNT_ID.to_string()),
            platform: Some("LINUX".to_string()),
            tags: request.tags,
            state: StreamingImageState::CreateInProgress,
            status_code: None,
            status_message: None,
            created_at: None,
            updated_at: None,
        };
        let record = self
            .store
            .create(&request.studio_id, image, request.client_token.as_deref())
            .await?;
        Ok(Self::view(record))
    }

    async fn update_streaming_image(
        &self,
        request: UpdateStreamingImageRequest,
    ) -> Result<StreamingImage, ServiceError> {
        debug!(
            "UpdateStreamingImage {}/{}",
            request.studio_id, request.streaming_image_id
        );
        let name = request.name;
        let description = request.description;
        let record = self
            .store
            .update(&request.studio_id, &request.streaming_image_id, move |image| {
                if let Some(name) = name {
                    image.name = name;
                }
                if description.is_some() {
                    image.description = description;
                }
            })
            .await?;
        Ok(Self::view(record))
    }

    async fn delete_streaming_image(
        &self,
        studio_id: &str,
        streaming_image_id: &str,
        _client_token: Option<&str>,
    ) -> Result<StreamingImage, ServiceError> {
        debug!("DeleteStreamingImage {}/{}", studio_id, streaming_image_id);
        let record = self.store.delete(studio_id, streaming_image_id).await?;
        Ok(Self::view(record))
    }

    async fn list_streaming_images(
        &self,
        studio_id: &str,
        next_token: Option<&str>,
    ) -> Result<StreamingImagePage, ServiceError> {
        debug!("ListStreamingImages in {}", studio_id);
        let (records, next_token) = self.store.list(studio_id, next_token).await?;
        Ok(StreamingImagePage {
            streaming_images: records.into_iter().map(Self::view).collect(),
            next_token,
        })
    }
}
