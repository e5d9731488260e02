//! Reference orchestrator.
//!
//! Re-invokes a handler until it reports a terminal outcome, sleeping for the
//! requested delay in between and enforcing an overall deadline.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::context::CallbackContext;
use crate::error::ErrorKind;
use crate::handler::ReconciliationHandler;
use crate::progress::{Outcome, ProgressEvent};
use crate::request::{Action, ResourceHandlerRequest};
use crate::resource::Resource;

/// Final result of one logical operation.
#[derive(Debug, Clone)]
pub struct OperationReport<M> {
    pub event: ProgressEvent<M>,
    /// Number of handler invocations, including the terminal one.
    pub invocations: u32,
    pub elapsed: Duration,
}

/// Drives handlers to a terminal outcome.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    deadline: Duration,
    delay_override: Option<Duration>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(Duration::from_secs(2 * 60 * 60))
    }
}

impl Orchestrator {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            delay_override: None,
        }
    }

    /// Wait `delay` instead of the handler's requested delay.
    pub fn with_delay_override(mut self, delay: Duration) -> Self {
        self.delay_override = Some(delay);
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub async fn run<R: Resource>(
        &self,
        handler: &ReconciliationHandler<R>,
        action: Action,
        request: &ResourceHandlerRequest<R::Model>,
    ) -> OperationReport<R::Model> {
        self.run_observed(handler, action, request, |_| {}).await
    }

    /// Like [`Orchestrator::run`], handing every progress event to `observe`.
    pub async fn run_observed<R, F>(
        &self,
        handler: &ReconciliationHandler<R>,
        action: Action,
        request: &ResourceHandlerRequest<R::Model>,
        mut observe: F,
    ) -> OperationReport<R::Model>
    where
        R: Resource,
        F: FnMut(&ProgressEvent<R::Model>),
    {
        let started = Instant::now();
        let mut context = CallbackContext::default();
        let mut invocations = 0u32;

        loop {
            let remaining = self.deadline.saturating_sub(started.elapsed());
            invocations += 1;

            let outcome = match tokio::time::timeout(
                remaining,
                handler.handle_request(action, request, context),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Outcome::failed(
                    ErrorKind::NotStabilized,
                    format!(
                        "{} {} exceeded the {}s deadline",
                        action,
                        handler.resource().type_name(),
                        self.deadline.as_secs()
                    ),
                ),
            };

            let (next_context, delay) = match &outcome {
                Outcome::InProgress {
                    context,
                    delay_seconds,
                    ..
                } => (
                    Some(context.clone()),
                    self.delay_override
                        .unwrap_or(Duration::from_secs(u64::from(*delay_seconds))),
                ),
                _ => (None, Duration::ZERO),
            };

            let event = outcome.into_event();
            observe(&event);

            let Some(next_context) = next_context else {
                info!(
                    "{} {} finished with {:?} after {} invocation(s)",
                    action,
                    handler.resource().type_name(),
                    event.status,
                    invocations
                );
                return OperationReport {
                    event,
                    invocations,
                    elapsed: started.elapsed(),
                };
            };

            if started.elapsed() + delay > self.deadline {
                warn!(
                    "{} {} did not finish within {}s",
                    action,
                    handler.resource().type_name(),
                    self.deadline.as_secs()
                );
                let event = Outcome::failed(
                    ErrorKind::NotStabilized,
                    format!(
                        "{} {} exceeded the {}s deadline",
                        action,
                        handler.resource().type_name(),
                        self.deadline.as_secs()
                    ),
                )
                .into_event();
                observe(&event);
                return OperationReport {
                    event,
                    invocations,
                    elapsed: started.elapsed(),
                };
            }

            debug!("Re-invoking {} in {:?}", action, delay);
            tokio::time::sleep(delay).await;
            context = next_context;
        }
    }
}
