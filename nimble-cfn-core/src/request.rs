//! Handler requests.

use serde::{Deserialize, Serialize};

/// Operation a handler invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::List => "LIST",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request handed to a handler by the orchestrator.
///
/// Identical across all invocations of one logical operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandlerRequest<M> {
    /// Idempotency token, forwarded to mutating remote calls.
    #[serde(default)]
    pub client_request_token: Option<String>,
    #[serde(default)]
    pub desired_resource_state: Option<M>,
    #[serde(default)]
    pub previous_resource_state: Option<M>,
    #[serde(default)]
    pub logical_resource_identifier: Option<String>,
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub aws_account_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl<M> Default for ResourceHandlerRequest<M> {
    fn default() -> Self {
        Self {
            client_request_token: None,
            desired_resource_state: None,
            previous_resource_state: None,
            logical_resource_identifier: None,
            next_token: None,
            aws_account_id: None,
            region: None,
        }
    }
}

impl<M> ResourceHandlerRequest<M> {
    pub fn new(desired: M) -> Self {
        Self {
            desired_resource_state: Some(desired),
            ..Default::default()
        }
    }

    pub fn with_client_request_token(mut self, token: impl Into<String>) -> Self {
        self.client_request_token = Some(token.into());
        self
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}
