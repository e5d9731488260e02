//! Handler outcomes and their wire shape.

use serde::{Deserialize, Serialize};

use crate::context::CallbackContext;
use crate::error::ErrorKind;

/// Status of a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    InProgress,
    Failed,
}

/// Result of one handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<M> {
    /// Terminal success carrying the current resource model.
    Success(M),
    /// Terminal success of a delete; there is no model left to report.
    Removed,
    /// Terminal success of a list call.
    Listed {
        models: Vec<M>,
        next_token: Option<String>,
    },
    /// Re-invoke after `delay_seconds` with `context`.
    InProgress {
        model: M,
        context: CallbackContext,
        delay_seconds: u32,
    },
    /// Terminal failure.
    Failed { kind: ErrorKind, message: String },
}

impl<M> Outcome<M> {
    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Outcome::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> OperationStatus {
        match self {
            Outcome::Success(_) | Outcome::Removed | Outcome::Listed { .. } => {
                OperationStatus::Success
            }
            Outcome::InProgress { .. } => OperationStatus::InProgress,
            Outcome::Failed { .. } => OperationStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status() != OperationStatus::InProgress
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn into_event(self) -> ProgressEvent<M> {
        ProgressEvent::from(self)
    }
}

/// Serialized progress event handed back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent<M> {
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub callback_context: Option<CallbackContext>,
    pub callback_delay_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<M>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<M> ProgressEvent<M> {
    fn empty(status: OperationStatus) -> Self {
        Self {
            status,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: 0,
            resource_model: None,
            resource_models: None,
            next_token: None,
        }
    }
}

impl<M> From<Outcome<M>> for ProgressEvent<M> {
    fn from(outcome: Outcome<M>) -> Self {
        match outcome {
            Outcome::Success(model) => ProgressEvent {
                resource_model: Some(model),
                ..ProgressEvent::empty(OperationStatus::Success)
            },
            Outcome::Removed => ProgressEvent::empty(OperationStatus::Success),
            Outcome::Listed { models, next_token } => ProgressEvent {
                resource_models: Some(models),
                next_token,
                ..ProgressEvent::empty(OperationStatus::Success)
            },
            Outcome::InProgress {
                model,
                context,
                delay_seconds,
            } => ProgressEvent {
                resource_model: Some(model),
                callback_context: Some(context),
                callback_delay_seconds: delay_seconds,
                ..ProgressEvent::empty(OperationStatus::InProgress)
            },
            Outcome::Failed { kind, message } => ProgressEvent {
                error_code: Some(kind),
                message: Some(message),
                ..ProgressEvent::empty(OperationStatus::Failed)
            },
        }
    }
}
