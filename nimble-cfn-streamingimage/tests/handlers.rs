mod common;

use std::time::Duration;

use nimble_cfn_core::{
    Action, CallbackContext, ErrorKind, Operation, OperationStatus, Orchestrator, Outcome,
    ResourceHandlerRequest,
};
use nimble_cfn_streamingimage::{ResourceModel, StreamingImageState};

use common::*;

fn identity() -> ResourceModel {
    ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        streaming_image_id: Some(STREAMING_IMAGE_ID.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_read_reports_service_fields() {
    let service = seeded(None, StreamingImageState::Ready).await;
    let handler = handler_for(&service);

    let outcome = handler.read(&identity(), CallbackContext::default()).await;

    assert_eq!(outcome, Outcome::Success(model_named("name", "description")));
}

#[tokio::test]
async fn test_read_deleted_is_not_found() {
    let service = seeded(None, StreamingImageState::Deleted).await;
    let handler = handler_for(&service);

    let outcome = handler.read(&identity(), CallbackContext::default()).await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::NotFound));
}

#[tokio::test(start_paused = true)]
async fn test_create_from_ec2_image() {
    let service = service(Some(3));
    let handler = handler_for(&service);
    let request = ResourceHandlerRequest::new(ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        name: Some("render-node".to_string()),
        ec2_image_id: Some("ami-0fedcba9876543210".to_string()),
        ..Default::default()
    })
    .with_client_request_token("clientToken");

    let report = Orchestrator::default()
        .run(&handler, Action::Create, &request)
        .await;

    assert_eq!(report.event.status, OperationStatus::Success);
    assert_eq!(report.invocations, 4);
    let model = report.event.resource_model.unwrap();
    assert!(model
        .streaming_image_id
        .as_deref()
        .is_some_and(|id| id.starts_with("si-")));
    assert_eq!(model.name.as_deref(), Some("render-node"));
    assert_eq!(model.platform.as_deref(), Some("LINUX"));
    assert_eq!(model.encryption_configuration, None);
}

#[tokio::test]
async fn test_create_without_ec2_image_is_rejected() {
    let service = service(None);
    let handler = handler_for(&service);
    let request = ResourceHandlerRequest::new(ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        name: Some("render-node".to_string()),
        ..Default::default()
    });

    let outcome = handler
        .handle_request(Action::Create, &request, CallbackContext::default())
        .await;

    assert_eq!(
        outcome,
        Outcome::failed(ErrorKind::InvalidRequest, "Ec2ImageId is required")
    );
    assert_eq!(service.store().calls(Operation::Create).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_delete_then_read_is_not_found() {
    let service = seeded(Some(1), StreamingImageState::Ready).await;
    let handler = handler_for(&service);
    let request = ResourceHandlerRequest::new(identity());

    let report = Orchestrator::new(Duration::from_secs(60))
        .run(&handler, Action::Delete, &request)
        .await;
    assert_eq!(report.event.status, OperationStatus::Success);
    assert_eq!(report.event.resource_model, None);
    assert_eq!(report.invocations, 2);

    let report = Orchestrator::new(Duration::from_secs(60))
        .run(&handler, Action::Delete, &request)
        .await;
    assert_eq!(report.event.error_code, Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_list_images_in_studio() {
    let service = seeded(None, StreamingImageState::Ready).await;
    let mut deleted = image(StreamingImageState::Deleted);
    deleted.streaming_image_id = "retired".to_string();
    service.seed(STUDIO_ID, deleted).await;
    let handler = handler_for(&service);

    let scope = ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        ..Default::default()
    };
    let outcome = handler
        .list(&scope, None, CallbackContext::default())
        .await;

    assert_eq!(
        outcome,
        Outcome::Listed {
            models: vec![model_named("name", "description")],
            next_token: None,
        }
    );
}
