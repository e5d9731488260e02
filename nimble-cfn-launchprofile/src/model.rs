//! `AWS::NimbleStudio::LaunchProfile` resource model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Launch profile as seen by the CloudFormation caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec2_subnet_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_profile_protocol_versions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_configuration: Option<StreamConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio_component_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

/// Streaming session settings of a launch profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamConfiguration {
    /// `ENABLED` or `DISABLED`.
    pub clipboard_mode: String,
    pub ec2_instance_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_session_length_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stopped_session_length_in_minutes: Option<u32>,
    pub streaming_image_ids: Vec<String>,
}
