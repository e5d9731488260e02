//! In-memory launch profile service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use nimble_cfn_core::{InMemoryStore, ResourceState, ServiceError, StoredRecord};

use super::{
    CreateLaunchProfileRequest, LaunchProfile, LaunchProfileApi, LaunchProfilePage,
    LaunchProfileState, UpdateLaunchProfileRequest,
};

/// Launch profile API backed by an [`InMemoryStore`].
///
/// Clones share the same store, so a test can keep one handle for seeding
/// and inspection while the handler owns another.
#[derive(Clone)]
pub struct InMemoryLaunchProfiles {
    store: Arc<InMemoryStore<LaunchProfile>>,
}

impl Default for InMemoryLaunchProfiles {
    fn default() -> Self {
        Self::new(InMemoryStore::new("lp"))
    }
}

impl InMemoryLaunchProfiles {
    pub fn new(store: InMemoryStore<LaunchProfile>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &InMemoryStore<LaunchProfile> {
        &self.store
    }

    /// Seed a launch profile. Its id and state come from `profile`.
    pub async fn seed(&self, studio_id: &str, profile: LaunchProfile) {
        let id = profile.launch_profile_id.clone();
        let state = ResourceState::from(profile.state);
        let status_message = profile.status_message.clone();
        self.store.insert(studio_id, &id, profile, state).await;
        if status_message.is_some() {
            self.store
                .set_state(&id, state, status_message.as_deref())
                .await;
        }
    }
}

fn arn(studio_id: &str, id: &str) -> String {
    format!(
        "arn:aws:nimble:us-west-2:000000000000:launch-profile/{}/{}",
        studio_id, id
    )
}

/// Service view of a stored record.
fn view(record: StoredRecord<LaunchProfile>) -> LaunchProfile {
    let state = LaunchProfileState::from(record.state);
    LaunchProfile {
        arn: arn(&record.scope, &record.id),
        launch_profile_id: record.id,
        status_code: Some(format!("LAUNCH_PROFILE_{}", state.as_str())),
        status_message: record.status_message,
        state,
        created_at: Some(record.created_at),
        updated_at: Some(record.updated_at),
        ..record.value
    }
}

#[async_trait]
impl LaunchProfileApi for InMemoryLaunchProfiles {
    async fn get_launch_profile(
        &self,
        studio_id: &str,
        launch_profile_id: &str,
    ) -> Result<LaunchProfile, ServiceError> {
        debug!("GetLaunchProfile {}/{}", studio_id, launch_profile_id);
        self.store.get(studio_id, launch_profile_id).await.map(view)
    }

    async fn create_launch_profile(
        &self,
        request: CreateLaunchProfileRequest,
    ) -> Result<LaunchProfile, ServiceError> {
        debug!("CreateLaunchProfile {} in {}", request.name, request.studio_id);
        let value = LaunchProfile {
            launch_profile_id: String::new(),
            arn: String::new(),
            name: request.name,
            description: request.description,
            ec2_subnet_ids: request.ec2_subnet_ids,
            launch_profile_protocol_versions: request.launch_profile_protocol_versions,
            stream_configuration: Some(request.stream_configuration),
            studio_component_ids: request.studio_component_ids,
            tags: request.tags,
            state: LaunchProfileState::CreateInProgress,
            status_code: None,
            status_message: None,
            created_at: None,
            updated_at: None,
        };
        self.store
            .create(&request.studio_id, value, request.client_token.as_deref())
            .await
            .map(view)
    }

    async fn update_launch_profile(
        &self,
        request: UpdateLaunchProfileRequest,
    ) -> Result<LaunchProfile, ServiceError> {
        debug!(
            "UpdateLaunchProfile {}/{}",
            request.studio_id, request.launch_profile_id
        );
        let UpdateLaunchProfileRequest {
            studio_id,
            launch_profile_id,
            name,
            description,
            launch_profile_protocol_versions,
            stream_configuration,
            studio_component_ids,
            ..
        } = request;

        self.store
            .update(&studio_id, &launch_profile_id, move |profile| {
                if let Some(name) = name {
                    profile.name = name;
                }
                if description.is_some() {
                    profile.description = description;
                }
                if let Some(versions) = launch_profile_protocol_versions {
                    profile.launch_profile_protocol_versions = versions;
                }
                if stream_configuration.is_some() {
                    profile.stream_configuration = stream_configuration;
                }
                if let Some(ids) = studio_component_ids {
                    profile.studio_component_ids = ids;
                }
            })
            .await
            .map(view)
    }

    async fn delete_launch_profile(
        &self,
        studio_id: &str,
        launch_profile_id: &str,
        _client_token: Option<&str>,
    ) -> Result<LaunchProfile, ServiceError> {
        debug!("DeleteLaunchProfile {}/{}", studio_id, launch_profile_id);
        self.store.delete(studio_id, launch_profile_id).await.map(view)
    }

    async fn list_launch_profiles(
        &self,
        studio_id: &str,
        next_token: Option<&str>,
    ) -> Result<LaunchProfilePage, ServiceError> {
        debug!("ListLaunchProfiles in {}", studio_id);
        let (records, next_token) = self.store.list(studio_id, next_token).await?;
        Ok(LaunchProfilePage {
            launch_profiles: records.into_iter().map(view).collect(),
            next_token,
        })
    }
}
