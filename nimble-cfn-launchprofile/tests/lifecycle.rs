//! Create, delete and list driven through the orchestrator.

mod common;

use std::time::Duration;

use nimble_cfn_core::{
    Action, CallbackContext, ErrorKind, Operation, OperationStatus, Orchestrator, Outcome,
    ResourceHandlerRequest, ServiceError,
};
use nimble_cfn_launchprofile::{LaunchProfileState, ResourceModel};

use common::*;

fn orchestrator() -> Orchestrator {
    Orchestrator::new(Duration::from_secs(600))
}

#[tokio::test(start_paused = true)]
async fn test_create_stabilizes() {
    let service = settling_service(1);
    let handler = handler_for(&service);

    let report = orchestrator()
        .run(&handler, Action::Create, &request(new_profile_model()))
        .await;

    assert_eq!(report.event.status, OperationStatus::Success);
    assert_eq!(report.invocations, 2);
    assert!(report.elapsed >= Duration::from_secs(5));

    let model = report.event.resource_model.unwrap();
    let id = model.launch_profile_id.clone().unwrap();
    assert!(id.starts_with("lp-"), "{}", id);
    assert_eq!(
        model,
        ResourceModel {
            launch_profile_id: Some(id.clone()),
            ..new_profile_model()
        }
    );

    let record = service.store().record(&id).await.unwrap();
    assert_eq!(record.scope, STUDIO_ID);
    assert_eq!(service.store().calls(Operation::Create).await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_create_with_same_token_reuses_profile() {
    let service = settling_service(0);
    let handler = handler_for(&service);
    let request = request(new_profile_model());

    let first = orchestrator().run(&handler, Action::Create, &request).await;
    let second = orchestrator().run(&handler, Action::Create, &request).await;

    let first_id = first.event.resource_model.unwrap().launch_profile_id;
    let second_id = second.event.resource_model.unwrap().launch_profile_id;
    assert!(first_id.is_some());
    assert_eq!(first_id, second_id);

    let listed = handler
        .list(&identity(), None, CallbackContext::default())
        .await;
    let Outcome::Listed { models, .. } = listed else {
        panic!("expected listing, got {:?}", listed);
    };
    assert_eq!(models.len(), 1);
}

#[tokio::test]
async fn test_create_requires_properties() {
    let service = frozen_service();
    let handler = handler_for(&service);
    let model = ResourceModel {
        stream_configuration: None,
        ..new_profile_model()
    };

    let outcome = handler
        .handle_request(Action::Create, &request(model), CallbackContext::default())
        .await;

    assert_eq!(
        outcome,
        Outcome::failed(ErrorKind::InvalidRequest, "StreamConfiguration is required")
    );
    assert_eq!(service.store().calls(Operation::Create).await, 0);
}

#[tokio::test]
async fn test_create_quota_exceeded_fails() {
    let service = frozen_service();
    service
        .store()
        .fail_next(
            Operation::Create,
            ServiceError::ServiceQuotaExceeded("too many launch profiles".into()),
        )
        .await;
    let handler = handler_for(&service);

    let event = handler
        .handle_request(
            Action::Create,
            &request(new_profile_model()),
            CallbackContext::default(),
        )
        .await
        .into_event();

    assert_eq!(event.status, OperationStatus::Failed);
    assert_eq!(event.error_code, Some(ErrorKind::ServiceLimitExceeded));
}

#[tokio::test(start_paused = true)]
async fn test_delete_removes_profile() {
    let service = settling_service(2);
    seeded(&service, LaunchProfileState::Ready).await;
    let handler = handler_for(&service);

    let mut statuses = Vec::new();
    let report = orchestrator()
        .run_observed(&handler, Action::Delete, &request(identity()), |event| {
            statuses.push(event.status)
        })
        .await;

    assert_eq!(report.event.status, OperationStatus::Success);
    assert_eq!(report.event.resource_model, None);
    assert_eq!(
        statuses,
        vec![
            OperationStatus::InProgress,
            OperationStatus::InProgress,
            OperationStatus::Success
        ]
    );
    assert_eq!(service.store().calls(Operation::Delete).await, 1);

    let read = handler.read(&identity(), CallbackContext::default()).await;
    assert_eq!(read.error_kind(), Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_delete_already_deleted_is_not_found() {
    let service = frozen_service();
    seeded(&service, LaunchProfileState::Deleted).await;
    let handler = handler_for(&service);

    let outcome = handler
        .handle_request(Action::Delete, &request(identity()), CallbackContext::default())
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::NotFound));
    assert_eq!(service.store().calls(Operation::Delete).await, 0);
}

#[tokio::test]
async fn test_delete_gone_while_polling_is_success() {
    let service = frozen_service();
    service
        .store()
        .fail_next(
            Operation::Get,
            ServiceError::ResourceNotFound("launch profile not found".into()),
        )
        .await;
    let handler = handler_for(&service);

    let context = CallbackContext::default().mark_mutation_issued();
    let outcome = handler.delete(&identity(), Some(CLIENT_TOKEN), context).await;

    assert_eq!(outcome, Outcome::Removed);
}

#[tokio::test]
async fn test_delete_failed_does_not_stabilize() {
    let service = frozen_service();
    seeded(&service, LaunchProfileState::DeleteFailed).await;
    let handler = handler_for(&service);

    let outcome = handler
        .handle_request(Action::Delete, &request(identity()), CallbackContext::default())
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::NotStabilized));
}

#[tokio::test]
async fn test_list_pages_through_studio() {
    let service = nimble_cfn_launchprofile::InMemoryLaunchProfiles::new(
        nimble_cfn_core::InMemoryStore::new("lp").with_page_size(2),
    );
    for i in 0..3 {
        let mut profile = remote_profile(LaunchProfileState::Ready);
        profile.launch_profile_id = format!("lp-{}", i);
        service.seed(STUDIO_ID, profile).await;
    }
    let mut other = remote_profile(LaunchProfileState::Ready);
    other.launch_profile_id = "lp-other".to_string();
    service.seed("otherStudio", other).await;
    let handler = handler_for(&service);

    let scope = ResourceModel {
        studio_id: Some(STUDIO_ID.to_string()),
        ..Default::default()
    };
    let event = handler
        .handle_request(
            Action::List,
            &ResourceHandlerRequest::new(scope.clone()),
            CallbackContext::default(),
        )
        .await
        .into_event();
    assert_eq!(event.status, OperationStatus::Success);
    let models = event.resource_models.unwrap();
    assert_eq!(models.len(), 2);
    assert!(models
        .iter()
        .all(|m| m.studio_id.as_deref() == Some(STUDIO_ID)));
    let token = event.next_token.unwrap();

    let event = handler
        .handle_request(
            Action::List,
            &ResourceHandlerRequest::new(scope).with_next_token(token),
            CallbackContext::default(),
        )
        .await
        .into_event();
    let models = event.resource_models.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].launch_profile_id.as_deref(), Some("lp-2"));
    assert_eq!(event.next_token, None);
}

#[tokio::test]
async fn test_list_requires_studio() {
    let service = frozen_service();
    let handler = handler_for(&service);

    let outcome = handler
        .handle_request(
            Action::List,
            &ResourceHandlerRequest::new(ResourceModel::default()),
            CallbackContext::default(),
        )
        .await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidRequest));
}
