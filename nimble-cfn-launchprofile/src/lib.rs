//! nimble-cfn-launchprofile: `AWS::NimbleStudio::LaunchProfile` handlers.

pub mod clients;
pub mod model;
pub mod resource;

use nimble_cfn_core::{HandlerConfig, ReconciliationHandler};

pub use clients::{InMemoryLaunchProfiles, LaunchProfile, LaunchProfileApi, LaunchProfileState};
pub use model::{ResourceModel, StreamConfiguration};
pub use resource::{LaunchProfileResource, TYPE_NAME};

/// Create/Read/Update/Delete/List handler for launch profiles.
pub type LaunchProfileHandler<C> = ReconciliationHandler<LaunchProfileResource<C>>;

pub fn handler<C: LaunchProfileApi>(client: C, config: HandlerConfig) -> LaunchProfileHandler<C> {
    ReconciliationHandler::with_config(LaunchProfileResource::new(client), config)
}
