//! Document listing and batch ingestion operations

use async_trait::async_trait;

use crate::adapter::{
    ConfirmSpec, InvocationContext, Operation, OperationDescriptor, OutputSelector, ParamKind,
    ParamSpec,
};
use crate::api::{ApiResult, QBusinessApi};
use crate::error::UsageError;
use crate::model::{
    BatchDeleteDocumentRequest, BatchDeleteDocumentResponse, BatchPutDocumentRequest,
    BatchPutDocumentResponse, DeleteDocument, ListDocumentsRequest, ListDocumentsResponse,
};

pub struct ListDocuments;

pub static LIST_DOCUMENTS: OperationDescriptor = OperationDescriptor {
    name: "ListDocuments",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("IndexId", ParamKind::String),
        ParamSpec::optional("DataSourceId", ParamKind::StringList).aliases(&["DataSourceIds"]),
        ParamSpec::optional("MaxResult", ParamKind::Integer).aliases(&["MaxResults", "MaxItems"]),
        ParamSpec::optional("NextToken", ParamKind::String),
    ],
    response_fields: &["DocumentDetailList", "NextToken"],
    default_output: OutputSelector::Field("DocumentDetailList"),
    confirm: None,
};

#[async_trait]
impl Operation for ListDocuments {
    type Request = ListDocumentsRequest;
    type Response = ListDocumentsResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &LIST_DOCUMENTS
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(ListDocumentsRequest {
            application_id: ctx.require("ApplicationId")?,
            index_id: ctx.require("IndexId")?,
            data_source_ids: ctx.get("DataSourceId")?,
            max_results: ctx.get("MaxResult")?,
            next_token: ctx.get("NextToken")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.list_documents(request).await
    }
}

pub struct BatchPutDocument;

pub static BATCH_PUT_DOCUMENT: OperationDescriptor = OperationDescriptor {
    name: "BatchPutDocument",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("IndexId", ParamKind::String),
        ParamSpec::required("Document", ParamKind::RecordList).aliases(&["Documents"]),
        ParamSpec::optional("RoleArn", ParamKind::String),
        ParamSpec::optional("DataSourceSyncId", ParamKind::String),
    ],
    response_fields: &["FailedDocuments"],
    default_output: OutputSelector::Field("FailedDocuments"),
    confirm: Some(ConfirmSpec {
        action: "put documents into index",
        target: "IndexId",
    }),
};

#[async_trait]
impl Operation for BatchPutDocument {
    type Request = BatchPutDocumentRequest;
    type Response = BatchPutDocumentResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &BATCH_PUT_DOCUMENT
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        Ok(BatchPutDocumentRequest {
            application_id: ctx.require("ApplicationId")?,
            index_id: ctx.require("IndexId")?,
            documents: ctx.require("Document")?,
            role_arn: ctx.get("RoleArn")?,
            data_source_sync_id: ctx.get("DataSourceSyncId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.batch_put_document(request).await
    }
}

pub struct BatchDeleteDocument;

pub static BATCH_DELETE_DOCUMENT: OperationDescriptor = OperationDescriptor {
    name: "BatchDeleteDocument",
    params: &[
        ParamSpec::required("ApplicationId", ParamKind::String),
        ParamSpec::required("IndexId", ParamKind::String),
        ParamSpec::required("DocumentId", ParamKind::StringList).aliases(&["DocumentIds"]),
        ParamSpec::optional("DataSourceSyncId", ParamKind::String),
    ],
    response_fields: &["FailedDocuments"],
    default_output: OutputSelector::Field("FailedDocuments"),
    confirm: Some(ConfirmSpec {
        action: "delete documents from index",
        target: "IndexId",
    }),
};

#[async_trait]
impl Operation for BatchDeleteDocument {
    type Request = BatchDeleteDocumentRequest;
    type Response = BatchDeleteDocumentResponse;

    fn descriptor(&self) -> &'static OperationDescriptor {
        &BATCH_DELETE_DOCUMENT
    }

    fn build_request(&self, ctx: &InvocationContext) -> Result<Self::Request, UsageError> {
        let documents = ctx
            .require::<Vec<String>>("DocumentId")?
            .into_iter()
            .map(|document_id| DeleteDocument { document_id })
            .collect();
        Ok(BatchDeleteDocumentRequest {
            application_id: ctx.require("ApplicationId")?,
            index_id: ctx.require("IndexId")?,
            documents,
            data_source_sync_id: ctx.get("DataSourceSyncId")?,
        })
    }

    async fn call(
        &self,
        client: &dyn QBusinessApi,
        request: Self::Request,
    ) -> ApiResult<Self::Response> {
        client.batch_delete_document(request).await
    }
}
