//! Application requests and responses

use serde::{Deserialize, Serialize};

use super::common::{EmptyResponse, ErrorDetail, Tag};

/// Whether end users may upload files in chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentsControlMode {
    Enabled,
    Disabled,
}

impl AttachmentsControlMode {
    pub const VALUES: &'static [&'static str] = &["ENABLED", "DISABLED"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentsConfiguration {
    pub attachments_control_mode: AttachmentsControlMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_center_instance_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_configuration: Option<EncryptionConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments_configuration: Option<AttachmentsConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateApplicationResponse {
    pub application_id: Option<String>,
    pub application_arn: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetApplicationRequest {
    #[serde(skip)]
    pub application_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetApplicationResponse {
    pub display_name: Option<String>,
    pub application_id: Option<String>,
    pub application_arn: Option<String>,
    pub identity_center_application_arn: Option<String>,
    pub role_arn: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub encryption_configuration: Option<EncryptionConfiguration>,
    pub created_at: Option<f64>,
    pub updated_at: Option<f64>,
    pub error: Option<ErrorDetail>,
    pub attachments_configuration: Option<AttachmentsConfiguration>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListApplicationsRequest {
    #[serde(skip)]
    pub max_results: Option<i32>,
    #[serde(skip)]
    pub next_token: Option<String>,
}

/// Summary entry returned by `ListApplications`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub display_name: Option<String>,
    pub application_id: Option<String>,
    pub created_at: Option<f64>,
    pub updated_at: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListApplicationsResponse {
    pub next_token: Option<String>,
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_center_instance_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments_configuration: Option<AttachmentsConfiguration>,
}

pub type UpdateApplicationResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteApplicationRequest {
    #[serde(skip)]
    pub application_id: String,
}

pub type DeleteApplicationResponse = EmptyResponse;
