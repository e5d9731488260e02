//! Resource adapter trait.
//!
//! Each resource type translates between its model, its remote client and
//! the generic lifecycle. The state machine itself lives in
//! [`crate::handler::ReconciliationHandler`] and is shared by all types.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ServiceError;
use crate::state::ResourceState;

/// Adapter between a resource model and its remote service.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource model, serialized with the schema property names.
    type Model: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;
    /// Remote view returned by describe.
    type Remote: Debug + Send + Sync;

    /// Resource type name, e.g. `AWS::NimbleStudio::LaunchProfile`.
    fn type_name(&self) -> &'static str;

    /// Primary identifier of the model, if set.
    fn identifier(&self, model: &Self::Model) -> Option<String>;

    /// Copy of the model with the primary identifier set.
    fn with_identifier(&self, model: &Self::Model, id: &str) -> Self::Model;

    /// Check that every identifying field needed to address the remote
    /// resource is present. The error is the user-facing message.
    fn validate_identity(&self, model: &Self::Model) -> Result<(), String>;

    /// Check the properties required to create the resource.
    fn validate_create(&self, model: &Self::Model) -> Result<(), String>;

    /// Check the scope fields needed to list resources.
    fn validate_scope(&self, model: &Self::Model) -> Result<(), String>;

    async fn describe(&self, model: &Self::Model) -> Result<Self::Remote, ServiceError>;

    /// Issue the create call; returns the new primary identifier.
    async fn create(
        &self,
        model: &Self::Model,
        client_token: Option<&str>,
    ) -> Result<String, ServiceError>;

    async fn update(
        &self,
        model: &Self::Model,
        client_token: Option<&str>,
    ) -> Result<(), ServiceError>;

    async fn delete(
        &self,
        model: &Self::Model,
        client_token: Option<&str>,
    ) -> Result<(), ServiceError>;

    /// List the resources in the scope of `model`, one page at a time.
    async fn list(
        &self,
        model: &Self::Model,
        next_token: Option<&str>,
    ) -> Result<(Vec<Self::Model>, Option<String>), ServiceError>;

    fn state(&self, remote: &Self::Remote) -> ResourceState;

    fn status_message(&self, remote: &Self::Remote) -> Option<String>;

    /// Build the model reported back to the caller. `scope` supplies fields
    /// the remote view does not echo back (e.g. the studio id).
    fn to_model(&self, remote: &Self::Remote, scope: &Self::Model) -> Self::Model;
}
