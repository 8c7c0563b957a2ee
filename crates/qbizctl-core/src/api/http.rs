//! REST transport for the Q Business API
//!
//! A thin reqwest wrapper: it places path and query parameters, sends the JSON
//! body and maps HTTP failures onto [`ApiError`]. It authenticates with a
//! bearer token and does not sign requests, retry, or paginate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::{ApiError, ApiResult, QBusinessApi};
use crate::model::*;

/// User agent string for qbizctl HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("qbizctl/", env!("CARGO_PKG_VERSION"));

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the service error type on failed responses
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// HTTP client for the Q Business REST API
#[derive(Debug, Clone)]
pub struct QBusinessClient {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

/// Builder for [`QBusinessClient`]
#[derive(Debug, Clone)]
pub struct QBusinessClientBuilder {
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
    user_agent: String,
}

impl QBusinessClientBuilder {
    /// Bearer token sent in the `Authorization` header
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ApiResult<QBusinessClient> {
        let endpoint = Url::parse(&self.endpoint).map_err(|e| {
            ApiError::Client(format!("invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ApiError::Client(format!(
                "invalid endpoint '{}': not a base URL",
                self.endpoint
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;

        Ok(QBusinessClient {
            http,
            endpoint,
            token: self.token,
        })
    }
}

impl QBusinessClient {
    pub fn builder(endpoint: impl Into<String>) -> QBusinessClientBuilder {
        QBusinessClientBuilder {
            endpoint: endpoint.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Endpoint base URL
    pub fn base_url(&self) -> &Url {
        &self.endpoint
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> ApiResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Client(format!("invalid endpoint '{}'", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn send<B, R>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(segments, query)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let error_type = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(normalize_error_type);
        let bytes = response.bytes().await?;
        trace!("Response {} ({} bytes)", status, bytes.len());

        if !status.is_success() {
            return Err(error_from_response(status, error_type, &bytes));
        }

        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<R> {
        self.send::<Value, R>(Method::GET, segments, query, None).await
    }

    async fn delete<R: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<R> {
        self.send::<Value, R>(Method::DELETE, segments, &[], None).await
    }
}

/// Strip the `:http://...` suffix some services append to the error type
fn normalize_error_type(raw: &str) -> String {
    raw.split(':').next().unwrap_or(raw).trim().to_string()
}

fn error_from_response(status: StatusCode, error_type: Option<String>, body: &[u8]) -> ApiError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    let code = error_type.or_else(|| {
        parsed.as_ref().and_then(|v| {
            v.get("__type")
                .or_else(|| v.get("code"))
                .and_then(Value::as_str)
                .map(normalize_error_type)
        })
    });

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("Message")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("no error message returned")
                .to_string()
        });

    ApiError::from_status(status.as_u16(), code, message)
}

fn page_query(max_results: Option<i32>, next_token: Option<&String>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(max) = max_results {
        query.push(("maxResults", max.to_string()));
    }
    if let Some(token) = next_token {
        query.push(("nextToken", token.clone()));
    }
    query
}

#[async_trait]
impl QBusinessApi for QBusinessClient {
    fn endpoint(&self) -> Option<String> {
        Some(self.endpoint.to_string())
    }

    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> ApiResult<CreateApplicationResponse> {
        self.send(Method::POST, &["applications"], &[], Some(&request))
            .await
    }

    async fn get_application(
        &self,
        request: GetApplicationRequest,
    ) -> ApiResult<GetApplicationResponse> {
        self.get(&["applications", request.application_id.as_str()], &[])
            .await
    }

    async fn list_applications(
        &self,
        request: ListApplicationsRequest,
    ) -> ApiResult<ListApplicationsResponse> {
        let query = page_query(request.max_results, request.next_token.as_ref());
        self.get(&["applications"], &query).await
    }

    async fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> ApiResult<UpdateApplicationResponse> {
        let segments = ["applications", request.application_id.as_str()];
        self.send(Method::PUT, &segments, &[], Some(&request)).await
    }

    async fn delete_application(
        &self,
        request: DeleteApplicationRequest,
    ) -> ApiResult<DeleteApplicationResponse> {
        self.delete(&["applications", request.application_id.as_str()])
            .await
    }

    async fn create_index(&self, request: CreateIndexRequest) -> ApiResult<CreateIndexResponse> {
        let segments = ["applications", request.application_id.as_str(), "indices"];
        self.send(Method::POST, &segments, &[], Some(&request)).await
    }

    async fn get_index(&self, request: GetIndexRequest) -> ApiResult<GetIndexResponse> {
        self.get(
            &[
                "applications",
                request.application_id.as_str(),
                "indices",
                request.index_id.as_str(),
            ],
            &[],
        )
        .await
    }

    async fn list_indices(&self, request: ListIndicesRequest) -> ApiResult<ListIndicesResponse> {
        let query = page_query(request.max_results, request.next_token.as_ref());
        self.get(&["applications", request.application_id.as_str(), "indices"], &query)
            .await
    }

    async fn update_index(&self, request: UpdateIndexRequest) -> ApiResult<UpdateIndexResponse> {
        let segments = [
            "applications",
            request.application_id.as_str(),
            "indices",
            request.index_id.as_str(),
        ];
        self.send(Method::PUT, &segments, &[], Some(&request)).await
    }

    async fn delete_index(&self, request: DeleteIndexRequest) -> ApiResult<DeleteIndexResponse> {
        self.delete(&[
            "applications",
            request.application_id.as_str(),
            "indices",
            request.index_id.as_str(),
        ])
        .await
    }

    async fn list_documents(
        &self,
        request: ListDocumentsRequest,
    ) -> ApiResult<ListDocumentsResponse> {
        let mut query: Vec<(&str, String)> = request
            .data_source_ids
            .iter()
            .flatten()
            .map(|id| ("dataSourceIds", id.clone()))
            .collect();
        query.extend(page_query(request.max_results, request.next_token.as_ref()));

        self.get(
            &[
                "applications",
                request.application_id.as_str(),
                "index",
                request.index_id.as_str(),
                "documents",
            ],
            &query,
        )
        .await
    }

    async fn batch_put_document(
        &self,
        request: BatchPutDocumentRequest,
    ) -> ApiResult<BatchPutDocumentResponse> {
        let segments = [
            "applications",
            request.application_id.as_str(),
            "indices",
            request.index_id.as_str(),
            "documents",
        ];
        self.send(Method::POST, &segments, &[], Some(&request)).await
    }

    async fn batch_delete_document(
        &self,
        request: BatchDeleteDocumentRequest,
    ) -> ApiResult<BatchDeleteDocumentResponse> {
        let segments = [
            "applications",
            request.application_id.as_str(),
            "indices",
            request.index_id.as_str(),
            "documents",
            "delete",
        ];
        self.send(Method::POST, &segments, &[], Some(&request)).await
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> ApiResult<CreateSubscriptionResponse> {
        let segments = [
            "applications",
            request.application_id.as_str(),
            "subscriptions",
        ];
        self.send(Method::POST, &segments, &[], Some(&request)).await
    }

    async fn list_subscriptions(
        &self,
        request: ListSubscriptionsRequest,
    ) -> ApiResult<ListSubscriptionsResponse> {
        let query = page_query(request.max_results, request.next_token.as_ref());
        self.get(
            &["applications", request.application_id.as_str(), "subscriptions"],
            &query,
        )
        .await
    }

    async fn cancel_subscription(
        &self,
        request: CancelSubscriptionRequest,
    ) -> ApiResult<CancelSubscriptionResponse> {
        self.delete(&[
            "applications",
            request.application_id.as_str(),
            "subscriptions",
            request.subscription_id.as_str(),
        ])
        .await
    }
}
