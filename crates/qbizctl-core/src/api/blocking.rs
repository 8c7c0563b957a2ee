//! Adapter for synchronous clients
//!
//! A blocking client implements [`BlockingQBusinessApi`]; wrapping it in
//! [`Blocking`] runs each call on tokio's blocking pool so it can be injected
//! wherever a [`QBusinessApi`] is expected.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ApiError, ApiResult, QBusinessApi};
use crate::model::*;

/// Synchronous twin of [`QBusinessApi`]
pub trait BlockingQBusinessApi: Send + Sync + 'static {
    fn endpoint(&self) -> Option<String> {
        None
    }

    fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> ApiResult<CreateApplicationResponse>;
    fn get_application(&self, request: GetApplicationRequest) -> ApiResult<GetApplicationResponse>;
    fn list_applications(
        &self,
        request: ListApplicationsRequest,
    ) -> ApiResult<ListApplicationsResponse>;
    fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> ApiResult<UpdateApplicationResponse>;
    fn delete_application(
        &self,
        request: DeleteApplicationRequest,
    ) -> ApiResult<DeleteApplicationResponse>;
    fn create_index(&self, request: CreateIndexRequest) -> ApiResult<CreateIndexResponse>;
    fn get_index(&self, request: GetIndexRequest) -> ApiResult<GetIndexResponse>;
    fn list_indices(&self, request: ListIndicesRequest) -> ApiResult<ListIndicesResponse>;
    fn update_index(&self, request: UpdateIndexRequest) -> ApiResult<UpdateIndexResponse>;
    fn delete_index(&self, request: DeleteIndexRequest) -> ApiResult<DeleteIndexResponse>;
    fn list_documents(&self, request: ListDocumentsRequest) -> ApiResult<ListDocumentsResponse>;
    fn batch_put_document(
        &self,
        request: BatchPutDocumentRequest,
    ) -> ApiResult<BatchPutDocumentResponse>;
    fn batch_delete_document(
        &self,
        request: BatchDeleteDocumentRequest,
    ) -> ApiResult<BatchDeleteDocumentResponse>;
    fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> ApiResult<CreateSubscriptionResponse>;
    fn list_subscriptions(
        &self,
        request: ListSubscriptionsRequest,
    ) -> ApiResult<ListSubscriptionsResponse>;
    fn cancel_subscription(
        &self,
        request: CancelSubscriptionRequest,
    ) -> ApiResult<CancelSubscriptionResponse>;
}

/// Presents a [`BlockingQBusinessApi`] as an async [`QBusinessApi`]
pub struct Blocking<C> {
    inner: Arc<C>,
}

impl<C> Blocking<C> {
    pub fn new(client: C) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    pub fn from_arc(client: Arc<C>) -> Self {
        Self { inner: client }
    }
}

impl<C> Clone for Blocking<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

macro_rules! impl_blocking_adapter {
    ($($method:ident($request:ty) -> $response:ty;)*) => {
        #[async_trait]
        impl<C: BlockingQBusinessApi> QBusinessApi for Blocking<C> {
            fn endpoint(&self) -> Option<String> {
                self.inner.endpoint()
            }

            $(
                async fn $method(&self, request: $request) -> ApiResult<$response> {
                    let client = Arc::clone(&self.inner);
                    tokio::task::spawn_blocking(move || client.$method(request))
                        .await
                        .map_err(|e| ApiError::Client(format!("blocking client call failed: {}", e)))?
                }
            )*
        }
    };
}

impl_blocking_adapter! {
    create_application(CreateApplicationRequest) -> CreateApplicationResponse;
    get_application(GetApplicationRequest) -> GetApplicationResponse;
    list_applications(ListApplicationsRequest) -> ListApplicationsResponse;
    update_application(UpdateApplicationRequest) -> UpdateApplicationResponse;
    delete_application(DeleteApplicationRequest) -> DeleteApplicationResponse;
    create_index(CreateIndexRequest) -> CreateIndexResponse;
    get_index(GetIndexRequest) -> GetIndexResponse;
    list_indices(ListIndicesRequest) -> ListIndicesResponse;
    update_index(UpdateIndexRequest) -> UpdateIndexResponse;
    delete_index(DeleteIndexRequest) -> DeleteIndexResponse;
    list_documents(ListDocumentsRequest) -> ListDocumentsResponse;
    batch_put_document(BatchPutDocumentRequest) -> BatchPutDocumentResponse;
    batch_delete_document(BatchDeleteDocumentRequest) -> BatchDeleteDocumentResponse;
    create_subscription(CreateSubscriptionRequest) -> CreateSubscriptionResponse;
    list_subscriptions(ListSubscriptionsRequest) -> ListSubscriptionsResponse;
    cancel_subscription(CancelSubscriptionRequest) -> CancelSubscriptionResponse;
}
