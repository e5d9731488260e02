//! Launch profile adapter for the reconciliation handler.

use async_trait::async_trait;

use nimble_cfn_core::{Resource, ResourceState, ServiceError};

use crate::clients::{
    CreateLaunchProfileRequest, LaunchProfile, LaunchProfileApi, UpdateLaunchProfileRequest,
};
use crate::model::ResourceModel;

pub const TYPE_NAME: &str = "AWS::NimbleStudio::LaunchProfile";

/// `AWS::NimbleStudio::LaunchProfile` over a [`LaunchProfileApi`] client.
pub struct LaunchProfileResource<C> {
    client: C,
}

impl<C: LaunchProfileApi> LaunchProfileResource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

fn studio_id(model: &ResourceModel) -> Result<&str, ServiceError> {
    model
        .studio_id
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("StudioId is required".to_string()))
}

fn launch_profile_id(model: &ResourceModel) -> Result<&str, ServiceError> {
    model
        .launch_profile_id
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("LaunchProfileId is required".to_string()))
}

fn require<T>(value: &Option<T>, property: &str) -> Result<(), String> {
    match value {
        Some(_) => Ok(()),
        None => Err(format!("{} is required", property)),
    }
}

#[async_trait]
impl<C: LaunchProfileApi> Resource for LaunchProfileResource<C> {
    type Model = ResourceModel;
    type Remote = LaunchProfile;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn identifier(&self, model: &ResourceModel) -> Option<String> {
        model.launch_profile_id.clone()
    }

    fn with_identifier(&self, model: &ResourceModel, id: &str) -> ResourceModel {
        ResourceModel {
            launch_profile_id: Some(id.to_string()),
            ..model.clone()
        }
    }

    fn validate_identity(&self, model: &ResourceModel) -> Result<(), String> {
        require(&model.studio_id, "StudioId")?;
        require(&model.launch_profile_id, "LaunchProfileId")
    }

    fn validate_create(&self, model: &ResourceModel) -> Result<(), String> {
        require(&model.studio_id, "StudioId")?;
        require(&model.name, "Name")?;
        require(&model.ec2_subnet_ids, "Ec2SubnetIds")?;
        require(
            &model.launch_profile_protocol_versions,
            "LaunchProfileProtocolVersions",
        )?;
        require(&model.stream_configuration, "StreamConfiguration")?;
        require(&model.studio_component_ids, "StudioComponentIds")
    }

    fn validate_scope(&self, model: &ResourceModel) -> Result<(), String> {
        require(&model.studio_id, "StudioId")
    }

    async fn describe(&self, model: &ResourceModel) -> Result<LaunchProfile, ServiceError> {
        self.client
            .get_launch_profile(studio_id(model)?, launch_profile_id(model)?)
            .await
    }

    async fn create(
        &self,
        model: &ResourceModel,
        client_token: Option<&str>,
    ) -> Result<String, ServiceError> {
        let request = CreateLaunchProfileRequest {
            studio_id: studio_id(model)?.to_string(),
            client_token: client_token.map(str::to_string),
            name: model.name.clone().unwrap_or_default(),
            description: model.description.clone(),
            ec2_subnet_ids: model.ec2_subnet_ids.clone().unwrap_or_default(),
            launch_profile_protocol_versions: model
                .launch_profile_protocol_versions
                .clone()
                .unwrap_or_default(),
            stream_configuration: model.stream_configuration.clone().unwrap_or_default(),
            studio_component_ids: model.studio_component_ids.clone().unwrap_or_default(),
            tags: model.tags.clone().unwrap_or_default(),
        };
        let created = self.client.create_launch_profile(request).await?;
        Ok(created.launch_profile_id)
    }

    async fn update(
        &self,
        model: &ResourceModel,
        client_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        let request = UpdateLaunchProfileRequest {
            studio_id: studio_id(model)?.to_string(),
            launch_profile_id: launch_profile_id(model)?.to_string(),
            client_token: client_token.map(str::to_string),
            name: model.name.clone(),
            description: model.description.clone(),
            launch_profile_protocol_versions: model.launch_profile_protocol_versions.clone(),
            stream_configuration: model.stream_configuration.clone(),
            studio_component_ids: model.studio_component_ids.clone(),
        };
        self.client.update_launch_profile(request).await?;
        Ok(())
    }

    async fn delete(
        &self,
        model: &ResourceModel,
        client_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.client
            .delete_launch_profile(studio_id(model)?, launch_profile_id(model)?, client_token)
            .await?;
        Ok(())
    }

    async fn list(
        &self,
        model: &ResourceModel,
        next_token: Option<&str>,
    ) -> Result<(Vec<ResourceModel>, Option<String>), ServiceError> {
        let page = self
            .client
            .list_launch_profiles(studio_id(model)?, next_token)
            .await?;
        let models = page
            .launch_profiles
            .iter()
            .map(|profile| self.to_model(profile, model))
            .collect();
        Ok((models, page.next_token))
    }

    fn state(&self, remote: &LaunchProfile) -> ResourceState {
        remote.state.into()
    }

    fn status_message(&self, remote: &LaunchProfile) -> Option<String> {
        remote.status_message.clone()
    }

    fn to_model(&self, remote: &LaunchProfile, scope: &ResourceModel) -> ResourceModel {
        ResourceModel {
            description: remote.description.clone(),
            ec2_subnet_ids: Some(remote.ec2_subnet_ids.clone()),
            launch_profile_id: Some(remote.launch_profile_id.clone()),
            launch_profile_protocol_versions: Some(remote.launch_profile_protocol_versions.clone()),
            name: Some(remote.name.clone()),
            stream_configuration: remote.stream_configuration.clone(),
            studio_component_ids: Some(remote.studio_component_ids.clone()),
            studio_id: scope.studio_id.clone(),
            tags: (!remote.tags.is_empty()).then(|| remote.tags.clone()),
        }
    }
}
