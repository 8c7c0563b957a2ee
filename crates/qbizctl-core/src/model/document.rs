//! Document requests and responses

use serde::{Deserialize, Serialize};

use super::common::ErrorDetail;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

/// Inline (base64 `blob`) or S3-hosted document body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAttributeValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_list_value: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAttribute {
    pub name: String,
    pub value: DocumentAttributeValue,
}

/// A document submitted through `BatchPutDocument`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<DocumentContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<DocumentAttribute>>,
}

/// A document reference submitted through `BatchDeleteDocument`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocument {
    pub document_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListDocumentsRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub index_id: String,
    #[serde(skip)]
    pub data_source_ids: Option<Vec<String>>,
    #[serde(skip)]
    pub max_results: Option<i32>,
    #[serde(skip)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentDetails {
    pub document_id: Option<String>,
    pub status: Option<String>,
    pub error: Option<ErrorDetail>,
    pub created_at: Option<f64>,
    pub updated_at: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDocumentsResponse {
    pub document_detail_list: Vec<DocumentDetails>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPutDocumentRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub index_id: String,
    pub documents: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_sync_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FailedDocument {
    pub id: Option<String>,
    pub error: Option<ErrorDetail>,
    pub data_source_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchPutDocumentResponse {
    pub failed_documents: Vec<FailedDocument>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteDocumentRequest {
    #[serde(skip)]
    pub application_id: String,
    #[serde(skip)]
    pub index_id: String,
    pub documents: Vec<DeleteDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_sync_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchDeleteDocumentResponse {
    pub failed_documents: Vec<FailedDocument>,
}
