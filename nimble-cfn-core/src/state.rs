//! Generic remote lifecycle state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a remote resource, independent of resource type.
///
/// Resource crates map their SDK state enums onto this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceState {
    Creating,
    Ready,
    Updating,
    Deleting,
    Deleted,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
}

impl ResourceState {
    /// The remote side is still working; poll again later.
    pub fn is_transitional(&self) -> bool {
        matches!(
            self,
            ResourceState::Creating | ResourceState::Updating | ResourceState::Deleting
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            ResourceState::CreateFailed | ResourceState::UpdateFailed | ResourceState::DeleteFailed
        )
    }

    /// State a transitional record settles into.
    pub fn settled(&self) -> ResourceState {
        match self {
            ResourceState::Creating | ResourceState::Updating => ResourceState::Ready,
            ResourceState::Deleting => ResourceState::Deleted,
            other => *other,
        }
    }
}
