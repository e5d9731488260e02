//! Reconciliation handler - one convergence step per invocation.
//!
//! The handler never waits. When the remote resource is still moving it
//! returns [`Outcome::InProgress`] with a delay and a context, and the
//! orchestrator calls back later. Mutating calls are guarded by
//! [`CallbackContext::mutation_issued`] so re-invocations only poll.

use tracing::{debug, info, warn};

use crate::config::HandlerConfig;
use crate::context::CallbackContext;
use crate::error::{classify, Disposition, ErrorKind, ServiceError, ServiceErrorKind};
use crate::progress::Outcome;
use crate::request::{Action, ResourceHandlerRequest};
use crate::resource::Resource;
use crate::state::ResourceState;

/// Generic handler driving a [`Resource`] through its lifecycle.
pub struct ReconciliationHandler<R: Resource> {
    resource: R,
    config: HandlerConfig,
}

impl<R: Resource> ReconciliationHandler<R> {
    pub fn new(resource: R) -> Self {
        Self::with_config(resource, HandlerConfig::default())
    }

    pub fn with_config(resource: R, config: HandlerConfig) -> Self {
        Self { resource, config }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Run one step of `action`.
    pub async fn handle_request(
        &self,
        action: Action,
        request: &ResourceHandlerRequest<R::Model>,
        context: CallbackContext,
    ) -> Outcome<R::Model> {
        let Some(desired) = request.desired_resource_state.as_ref() else {
            return Outcome::failed(
                ErrorKind::InvalidRequest,
                "desired resource state is required",
            );
        };
        let token = request.client_request_token.as_deref();

        debug!(
            "{} {} (mutation issued: {}, retries: {})",
            action,
            self.resource.type_name(),
            context.mutation_issued,
            context.transient_retries
        );

        match action {
            Action::Create => self.create(desired, token, context).await,
            Action::Read => self.read(desired, context).await,
            Action::Update => self.update(desired, token, context).await,
            Action::Delete => self.delete(desired, token, context).await,
            Action::List => {
                self.list(desired, request.next_token.as_deref(), context)
                    .await
            }
        }
    }

    pub async fn read(&self, desired: &R::Model, context: CallbackContext) -> Outcome<R::Model> {
        if let Err(msg) = self.resource.validate_identity(desired) {
            return Outcome::failed(ErrorKind::InvalidRequest, msg);
        }

        let remote = match self.resource.describe(desired).await {
            Ok(remote) => remote,
            Err(e) => return self.remote_failure(e, desired, context),
        };
        let context = context.with_retries_reset();

        match self.resource.state(&remote) {
            ResourceState::Deleted => self.not_found(desired),
            state if state.is_transitional() => {
                debug!(
                    "{} {} is {:?}, read deferred",
                    self.resource.type_name(),
                    self.display_id(desired),
                    state
                );
                self.in_progress(self.resource.to_model(&remote, desired), context)
            }
            _ => Outcome::Success(self.resource.to_model(&remote, desired)),
        }
    }

    pub async fn update(
        &self,
        desired: &R::Model,
        client_token: Option<&str>,
        mut context: CallbackContext,
    ) -> Outcome<R::Model> {
        if let Err(msg) = self.resource.validate_identity(desired) {
            return Outcome::failed(ErrorKind::InvalidRequest, msg);
        }

        if !context.mutation_issued {
            let remote = match self.resource.describe(desired).await {
                Ok(remote) => remote,
                Err(e) => return self.remote_failure(e, desired, context),
            };
            context = context.with_retries_reset();

            let state = self.resource.state(&remote);
            if state == ResourceState::Deleted {
                return self.not_found(desired);
            }
            if state.is_transitional() {
                info!(
                    "{} {} is {:?}, waiting before update",
                    self.resource.type_name(),
                    self.display_id(desired),
                    state
                );
                return self.in_progress(self.resource.to_model(&remote, desired), context);
            }

            info!(
                "Updating {} {}",
                self.resource.type_name(),
                self.display_id(desired)
            );
            if let Err(e) = self.resource.update(desired, client_token).await {
                return self.remote_failure(e, desired, context);
            }
            context = context.mark_mutation_issued();
        }

        self.stabilize(Action::Update, desired, context).await
    }

    pub async fn create(
        &self,
        desired: &R::Model,
        client_token: Option<&str>,
        mut context: CallbackContext,
    ) -> Outcome<R::Model> {
        if let Err(msg) = self.resource.validate_create(desired) {
            return Outcome::failed(ErrorKind::InvalidRequest, msg);
        }

        let model = if context.mutation_issued {
            match context.primary_identifier.as_deref() {
                Some(id) => self.resource.with_identifier(desired, id),
                None => {
                    return Outcome::failed(
                        ErrorKind::GenericInternal,
                        "callback context is missing the created identifier",
                    )
                }
            }
        } else {
            info!("Creating {}", self.resource.type_name());
            match self.resource.create(desired, client_token).await {
                Ok(id) => {
                    info!("Created {} {}", self.resource.type_name(), id);
                    context.primary_identifier = Some(id.clone());
                    context = context.mark_mutation_issued();
                    self.resource.with_identifier(desired, &id)
                }
                Err(e) => return self.remote_failure(e, desired, context),
            }
        };

        self.stabilize(Action::Create, &model, context).await
    }

    pub async fn delete(
        &self,
        desired: &R::Model,
        client_token: Option<&str>,
        mut context: CallbackContext,
    ) -> Outcome<R::Model> {
        if let Err(msg) = self.resource.validate_identity(desired) {
            return Outcome::failed(ErrorKind::InvalidRequest, msg);
        }

        if !context.mutation_issued {
            let remote = match self.resource.describe(desired).await {
                Ok(remote) => remote,
                Err(e) => return self.remote_failure(e, desired, context),
            };
            context = context.with_retries_reset();

            let state = self.resource.state(&remote);
            if state == ResourceState::Deleted {
                return self.not_found(desired);
            }
            if state.is_transitional() {
                info!(
                    "{} {} is {:?}, waiting before delete",
                    self.resource.type_name(),
                    self.display_id(desired),
                    state
                );
                return self.in_progress(self.resource.to_model(&remote, desired), context);
            }

            info!(
                "Deleting {} {}",
                self.resource.type_name(),
                self.display_id(desired)
            );
            if let Err(e) = self.resource.delete(desired, client_token).await {
                return self.remote_failure(e, desired, context);
            }
            context = context.mark_mutation_issued();
        }

        self.stabilize(Action::Delete, desired, context).await
    }

    pub async fn list(
        &self,
        scope: &R::Model,
        next_token: Option<&str>,
        context: CallbackContext,
    ) -> Outcome<R::Model> {
        if let Err(msg) = self.resource.validate_scope(scope) {
            return Outcome::failed(ErrorKind::InvalidRequest, msg);
        }

        match self.resource.list(scope, next_token).await {
            Ok((models, next_token)) => {
                debug!(
                    "Listed {} {} resources",
                    models.len(),
                    self.resource.type_name()
                );
                Outcome::Listed { models, next_token }
            }
            Err(e) => self.remote_failure(e, scope, context),
        }
    }

    /// Poll after (or instead of) the mutation of `action`.
    async fn stabilize(
        &self,
        action: Action,
        model: &R::Model,
        context: CallbackContext,
    ) -> Outcome<R::Model> {
        let remote = match self.resource.describe(model).await {
            Ok(remote) => remote,
            Err(e)
                if action == Action::Delete && e.kind() == ServiceErrorKind::ResourceNotFound =>
            {
                info!(
                    "{} {} is gone",
                    self.resource.type_name(),
                    self.display_id(model)
                );
                return Outcome::Removed;
            }
            Err(e) => return self.remote_failure(e, model, context),
        };
        let context = context.with_retries_reset();
        let state = self.resource.state(&remote);

        match (action, state) {
            (Action::Delete, ResourceState::Deleted) => {
                info!(
                    "{} {} deleted",
                    self.resource.type_name(),
                    self.display_id(model)
                );
                Outcome::Removed
            }
            (Action::Delete, ResourceState::DeleteFailed) => {
                self.not_stabilized(model, state, &remote)
            }
            (Action::Delete, _) => {
                self.in_progress(self.resource.to_model(&remote, model), context)
            }
            (_, ResourceState::Ready) => {
                info!(
                    "{} {} is ready",
                    self.resource.type_name(),
                    self.display_id(model)
                );
                Outcome::Success(self.resource.to_model(&remote, model))
            }
            (Action::Update, ResourceState::Deleted) => self.not_found(model),
            (_, state) if state.is_transitional() => {
                self.in_progress(self.resource.to_model(&remote, model), context)
            }
            (_, state) => self.not_stabilized(model, state, &remote),
        }
    }

    /// Map a remote error through the static table.
    fn remote_failure(
        &self,
        err: ServiceError,
        model: &R::Model,
        mut context: CallbackContext,
    ) -> Outcome<R::Model> {
        match classify(err.kind()) {
            Disposition::Retry(kind) => {
                context.transient_retries = context.transient_retries.saturating_add(1);
                let delay_seconds = self.config.transient_delay(context.transient_retries);
                warn!(
                    "{} call for {} failed with {} ({}), retrying in {}s",
                    self.resource.type_name(),
                    self.display_id(model),
                    kind,
                    err,
                    delay_seconds
                );
                Outcome::InProgress {
                    model: model.clone(),
                    context,
                    delay_seconds,
                }
            }
            Disposition::Fail(ErrorKind::NotFound) => self.not_found(model),
            Disposition::Fail(kind) => {
                warn!(
                    "{} call for {} failed with {}: {}",
                    self.resource.type_name(),
                    self.display_id(model),
                    kind,
                    err
                );
                Outcome::failed(kind, err.to_string())
            }
        }
    }

    fn in_progress(&self, model: R::Model, context: CallbackContext) -> Outcome<R::Model> {
        Outcome::InProgress {
            model,
            context,
            delay_seconds: self.config.stabilization_delay(),
        }
    }

    fn not_found(&self, model: &R::Model) -> Outcome<R::Model> {
        Outcome::failed(
            ErrorKind::NotFound,
            format!(
                "Resource of type '{}' with identifier '{}' was not found.",
                self.resource.type_name(),
                self.display_id(model)
            ),
        )
    }

    fn not_stabilized(
        &self,
        model: &R::Model,
        state: ResourceState,
        remote: &R::Remote,
    ) -> Outcome<R::Model> {
        let mut message = format!(
            "Resource of type '{}' with identifier '{}' did not stabilize (state {:?})",
            self.resource.type_name(),
            self.display_id(model),
            state
        );
        if let Some(status) = self.resource.status_message(remote) {
            message.push_str(": ");
            message.push_str(&status);
        }
        warn!("{}", message);
        Outcome::failed(ErrorKind::NotStabilized, message)
    }

    fn display_id(&self, model: &R::Model) -> String {
        self.resource.identifier(model).unwrap_or_default()
    }
}
