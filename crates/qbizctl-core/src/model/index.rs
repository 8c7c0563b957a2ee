//! Index requests and responses

use serde::{Deserialize, Serialize};

use super::common::{EmptyResponse, ErrorDetail, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexType {
    Enterprise,
    Starter,
}

impl IndexType {
    pub const VALUES: &'static [&'static str] = &["ENTERPRISE", "STARTER"];
}

/// Provisioned capacity for an index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexCapacityConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<i32>,
}

/// Search behaviour of a document attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAttributeConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    #[serde(skip)]
    pub application_id: String,
    pub display_name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub index_type: Option<IndexType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_configuration: Option<IndexCapacityConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateIndexResponse {
    pub index_id: Option<String>,
    pub index_arn: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetIndexRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub index_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextDocumentStatistics {
    pub indexed_text_bytes: Option<i64>,
    pub indexed_text_document_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexStatistics {
    pub text_document_statistics: Option<TextDocumentStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetIndexResponse {
    pub application_id: Option<String>,
    pub index_id: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub index_type: Option<IndexType>,
    pub index_arn: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<f64>,
    pub updated_at: Option<f64>,
    pub capacity_configuration: Option<IndexCapacityConfiguration>,
    pub document_attribute_configurations: Option<Vec<DocumentAttributeConfiguration>>,
    pub error: Option<ErrorDetail>,
    pub index_statistics: Option<IndexStatistics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListIndicesRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub max_results: Option<i32>,
    #[serde(skip)]
    pub next_token: Option<String>,
}

/// Summary entry returned by `ListIndices`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Index {
    pub display_name: Option<String>,
    pub index_id: Option<String>,
    pub created_at: Option<f64>,
    pub updated_at: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListIndicesResponse {
    pub next_token: Option<String>,
    pub indices: Vec<Index>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIndexRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub index_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_configuration: Option<IndexCapacityConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_attribute_configurations: Option<Vec<DocumentAttributeConfiguration>>,
}

pub type UpdateIndexResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteIndexRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub index_id: String,
}

pub type DeleteIndexResponse = EmptyResponse;
