//! Callback context carried between invocations of one logical operation.

use serde::{Deserialize, Serialize};

/// Caller-held progress marker.
///
/// Empty on the first invocation. Only the handler mutates it; the
/// orchestrator passes it back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackContext {
    /// The state-mutating call of this operation has been accepted.
    #[serde(default)]
    pub mutation_issued: bool,

    /// Identifier returned by a create call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_identifier: Option<String>,

    /// Consecutive transient failures; drives backoff.
    #[serde(default)]
    pub transient_retries: u32,
}

impl CallbackContext {
    pub fn is_empty(&self) -> bool {
        *self == CallbackContext::default()
    }

    /// Context after the mutation has been accepted.
    pub fn mark_mutation_issued(mut self) -> Self {
        self.mutation_issued = true;
        self.transient_retries = 0;
        self
    }

    /// Context after a remote call went through.
    pub fn with_retries_reset(mut self) -> Self {
        self.transient_retries = 0;
        self
    }
}
