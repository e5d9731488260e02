//! nimble-cfn-streamingimage: `AWS::NimbleStudio::StreamingImage` handlers.

pub mod clients;
pub mod model;
pub mod resource;

use nimble_cfn_core::{HandlerConfig, ReconciliationHandler};

pub use clients::{InMemoryStreamingImages, StreamingImage, StreamingImageApi, StreamingImageState};
pub use model::{EncryptionConfiguration, ResourceModel};
pub use resource::{StreamingImageResource, TYPE_NAME};

pub type StreamingImageHandler<C> = ReconciliationHandler<StreamingImageResource<C>>;

pub fn handler<C: StreamingImageApi>(client: C, config: HandlerConfig) -> StreamingImageHandler<C> {
    ReconciliationHandler::with_config(StreamingImageResource::new(client), config)
}
