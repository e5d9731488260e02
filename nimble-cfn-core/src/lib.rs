//! nimble-cfn-core: reconciliation handler core for Nimble Studio
//! CloudFormation resources.
//!
//! A resource type implements [`Resource`]; [`ReconciliationHandler`] turns
//! it into a Create/Read/Update/Delete/List handler that performs one
//! convergence step per invocation and reports an [`Outcome`].

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod memory;
pub mod orchestrator;
pub mod progress;
pub mod request;
pub mod resource;
pub mod state;

pub use config::HandlerConfig;
pub use context::CallbackContext;
pub use error::{classify, ConfigError, Disposition, ErrorKind, ServiceError, ServiceErrorKind};
pub use handler::ReconciliationHandler;
pub use memory::{InMemoryStore, Operation, StoredRecord};
pub use orchestrator::{OperationReport, Orchestrator};
pub use progress::{OperationStatus, Outcome, ProgressEvent};
pub use request::{Action, ResourceHandlerRequest};
pub use resource::Resource;
pub use state::ResourceState;
