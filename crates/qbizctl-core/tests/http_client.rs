//! REST transport tests against a mock server

use std::time::Duration;

use qbizctl_core::adapter::{AssumeYes, Bindings, CommandAdapter, InvocationOptions};
use qbizctl_core::api::{ApiError, QBusinessApi, QBusinessClient};
use qbizctl_core::model::*;
use qbizctl_core::operations::{BatchDeleteDocument, CreateIndex, ListDocuments};
use qbizctl_core::{CoreError, Outcome};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client(server: &MockServer) -> QBusinessClient {
    QBusinessClient::builder(server.uri())
        .token("test-token")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("valid endpoint")
}

#[tokio::test]
async fn test_list_documents_without_optional_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/a/index/i/documents"))
        .and(header("authorization", "Bearer test-token"))
        .and(|req: &Request| req.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentDetailList": [{"documentId": "doc-1", "status": "INDEXED"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invocation = CommandAdapter::new(ListDocuments)
        .invoke(
            &client(&server),
            &AssumeYes,
            Bindings::new().set("ApplicationId", "a").set("IndexId", "i"),
            &InvocationOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    let output = invocation.outcome().output().expect("succeeded");
    assert_eq!(output, &json!([{
        "documentId": "doc-1",
        "status": "INDEXED",
        "error": null,
        "createdAt": null,
        "updatedAt": null
    }]));
}

#[tokio::test]
async fn test_list_documents_with_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/a/index/i/documents"))
        .and(query_param("dataSourceIds", "ds-1"))
        .and(query_param("dataSourceIds", "ds-2"))
        .and(query_param("maxResults", "10"))
        .and(query_param("nextToken", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documentDetailList": [],
            "nextToken": "tok-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .list_documents(ListDocumentsRequest {
            application_id: "a".to_string(),
            index_id: "i".to_string(),
            data_source_ids: Some(vec!["ds-1".to_string(), "ds-2".to_string()]),
            max_results: Some(10),
            next_token: Some("tok".to_string()),
        })
        .await
        .unwrap();

    assert!(response.document_detail_list.is_empty());
    assert_eq!(response.next_token.as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn test_create_index_body_has_only_bound_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/app-1/indices"))
        .and(body_json(json!({"displayName": "My Index"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"indexId": "idx-1", "indexArn": "arn"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let invocation = CommandAdapter::new(CreateIndex)
        .invoke(
            &client(&server),
            &AssumeYes,
            Bindings::new()
                .set("ApplicationId", "app-1")
                .set("DisplayName", "My Index"),
            &InvocationOptions::default().select("^DisplayName"),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(invocation.outcome().output(), Some(&json!("My Index")));
}

#[tokio::test]
async fn test_batch_delete_document_path_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/a/indices/i/documents/delete"))
        .and(body_json(json!({"documents": [{"documentId": "d1"}, {"documentId": "d2"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"failedDocuments": []})))
        .expect(1)
        .mount(&server)
        .await;

    let invocation = CommandAdapter::new(BatchDeleteDocument)
        .invoke(
            &client(&server),
            &AssumeYes,
            Bindings::new()
                .set("ApplicationId", "a")
                .set("IndexId", "i")
                .set("DocumentId", json!(["d1", "d2"])),
            &InvocationOptions::default().force(true),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(invocation.outcome().output(), Some(&json!([])));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/applications/a/indices/i"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .delete_index(DeleteIndexRequest {
            application_id: "a".to_string(),
            index_id: "i".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response, EmptyResponse::default());
}

#[tokio::test]
async fn test_service_error_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header(
                    "x-amzn-ErrorType",
                    "ResourceNotFoundException:http://internal.amazon.com/",
                )
                .set_body_json(json!({"message": "Application missing not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .get_application(GetApplicationRequest {
            application_id: "missing".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.code(), Some("ResourceNotFoundException"));
    assert_eq!(err.to_string(), "Resource not found: Application missing not found");
}

#[tokio::test]
async fn test_throttling_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "__type": "ThrottlingException",
            "message": "Rate exceeded"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_applications(ListApplicationsRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Throttled { .. }));
    assert!(err.is_retryable());
    assert_eq!(err.code(), Some("ThrottlingException"));
}

#[tokio::test]
async fn test_access_denied_through_adapter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/a/index/i/documents"))
        .respond_with(ResponseTemplate::new(403).set_body_string("token expired"))
        .mount(&server)
        .await;

    let invocation = CommandAdapter::new(ListDocuments)
        .invoke(
            &client(&server),
            &AssumeYes,
            Bindings::new().set("ApplicationId", "a").set("IndexId", "i"),
            &InvocationOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    match invocation.outcome() {
        Outcome::Failed(err @ CoreError::Api { .. }) => {
            assert!(err.is_unauthorized());
            assert!(err.to_string().contains("token expired"));
        }
        other => panic!("expected API failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_application(GetApplicationRequest {
            application_id: "a".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unresolvable_host_is_reported_as_name_resolution_failure() {
    let client = QBusinessClient::builder("http://qbizctl-test.invalid")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let invocation = CommandAdapter::new(ListDocuments)
        .invoke(
            &client,
            &AssumeYes,
            Bindings::new().set("ApplicationId", "a").set("IndexId", "i"),
            &InvocationOptions::default(),
            &CancellationToken::new(),
        )
        .await;

    let err = invocation.outcome().error().expect("failed");
    assert!(err.is_connectivity(), "unexpected error: {err}");
    if let CoreError::EndpointUnreachable { endpoint, .. } = err {
        assert_eq!(endpoint.as_deref(), Some("http://qbizctl-test.invalid/"));
        assert!(err.to_string().contains("Name resolution failure"));
    }
}
