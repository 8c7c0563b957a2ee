//! The API client collaborator
//!
//! Command adapters never talk HTTP themselves. They receive an injected
//! [`QBusinessApi`] handle and call exactly one of its methods per invocation.
//! [`QBusinessClient`] is the bundled REST transport; tests and embedders can
//! supply their own implementation, and synchronous clients are adapted with
//! [`Blocking`].

pub mod blocking;
pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::model::*;

pub use blocking::{Blocking, BlockingQBusinessApi};
pub use error::ApiError;
pub use http::{QBusinessClient, QBusinessClientBuilder};

/// Result of a single API call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// One method per remote operation
#[async_trait]
pub trait QBusinessApi: Send + Sync {
    /// Endpoint this client talks to, used in connectivity diagnostics
    fn endpoint(&self) -> Option<String> {
        None
    }

    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> ApiResult<CreateApplicationResponse>;

    async fn get_application(
        &self,
        request: GetApplicationRequest,
    ) -> ApiResult<GetApplicationResponse>;

    async fn list_applications(
        &self,
        request: ListApplicationsRequest,
    ) -> ApiResult<ListApplicationsResponse>;

    async fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> ApiResult<UpdateApplicationResponse>;

    async fn delete_application(
        &self,
        request: DeleteApplicationRequest,
    ) -> ApiResult<DeleteApplicationResponse>;

    async fn create_index(&self, request: CreateIndexRequest) -> ApiResult<CreateIndexResponse>;

    async fn get_index(&self, request: GetIndexRequest) -> ApiResult<GetIndexResponse>;

    async fn list_indices(&self, request: ListIndicesRequest) -> ApiResult<ListIndicesResponse>;

    async fn update_index(&self, request: UpdateIndexRequest) -> ApiResult<UpdateIndexResponse>;

    async fn delete_index(&self, request: DeleteIndexRequest) -> ApiResult<DeleteIndexResponse>;

    async fn list_documents(
        &self,
        request: ListDocumentsRequest,
    ) -> ApiResult<ListDocumentsResponse>;

    async fn batch_put_document(
        &self,
        request: BatchPutDocumentRequest,
    ) -> ApiResult<BatchPutDocumentResponse>;

    async fn batch_delete_document(
        &self,
        request: BatchDeleteDocumentRequest,
    ) -> ApiResult<BatchDeleteDocumentResponse>;

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> ApiResult<CreateSubscriptionResponse>;

    async fn list_subscriptions(
        &self,
        request: ListSubscriptionsRequest,
    ) -> ApiResult<ListSubscriptionsResponse>;

    async fn cancel_subscription(
        &self,
        request: CancelSubscriptionRequest,
    ) -> ApiResult<CancelSubscriptionResponse>;
}
