//! Transport behavior: auth, header merging, retries, compression and error
//! mapping.

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sccapi::{
    ApiRequest, CallHeaders, CreateScanOptions, DetailedResponse, GetProfileOptions,
    ListProfilesOptions, SccClient, SccError,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SccClient {
    SccClient::new("test-token", &server.uri()).unwrap()
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles/profile-1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "profile-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server)
        .account()
        .get_profile(&GetProfileOptions::new("profile-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_caller_headers_override_client_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles/profile-1"))
        .and(header("x-correlation-id", "from-call"))
        .and(header("x-team", "platform"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "profile-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server);
    let mut defaults = HeaderMap::new();
    defaults.insert(
        HeaderName::from_static("x-correlation-id"),
        HeaderValue::from_static("from-defaults"),
    );
    defaults.insert(
        HeaderName::from_static("x-team"),
        HeaderValue::from_static("platform"),
    );
    client.set_default_headers(defaults);

    let mut options = GetProfileOptions::new("profile-1");
    options.headers = CallHeaders::new().correlation_id("from-call");

    client.account().get_profile(&options).await.unwrap();
}

#[tokio::test]
async fn test_get_is_retried_after_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 0,
            "profiles": []
        })))
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server);
    client.enable_retries(2, Duration::from_millis(10));

    let response = client
        .account()
        .list_profiles(&ListProfilesOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_retries_stop_at_the_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server);
    client.enable_retries(1, Duration::from_millis(10));

    let err = client
        .account()
        .list_profiles(&ListProfilesOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(502));
}

#[tokio::test]
async fn test_post_is_not_retried_after_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/scans"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server);
    client.enable_retries(3, Duration::from_millis(10));

    let err = client
        .account()
        .create_scan(&CreateScanOptions::new("att-1"))
        .await
        .unwrap_err();

    assert!(matches!(err, SccError::Api { status_code: 503, .. }));
}

#[tokio::test]
async fn test_too_many_requests_is_rate_limited_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .account()
        .list_profiles(&ListProfilesOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SccError::RateLimited {
            retry_after_secs: Some(7)
        }
    ));
}

#[tokio::test]
async fn test_plain_text_error_uses_echoed_correlation_id_as_trace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles/profile-1"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-correlation-id", "corr-500")
                .set_body_string("internal failure"),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .account()
        .get_profile(&GetProfileOptions::new("profile-1"))
        .await
        .unwrap_err();

    match err {
        SccError::Api {
            status_code,
            message,
            trace,
            body,
        } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "internal failure");
            assert_eq!(trace.as_deref(), Some("corr-500"));
            assert!(body.is_none());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_falls_back_to_echoed_request_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles/profile-1"))
        .respond_with(
            ResponseTemplate::new(502)
                .insert_header("x-request-id", "req-502")
                .set_body_string("bad gateway"),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .account()
        .get_profile(&GetProfileOptions::new("profile-1"))
        .await
        .unwrap_err();

    match err {
        SccError::Api { trace, .. } => assert_eq!(trace.as_deref(), Some("req-502")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_gzip_compresses_request_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/scans"))
        .and(header("content-encoding", "gzip"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "scan-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client(&mock_server);
    client.set_gzip_compression(true);

    client
        .account()
        .create_scan(&CreateScanOptions::new("att-1"))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let mut decoded = String::new();
    GzDecoder::new(requests[0].body.as_slice())
        .read_to_string(&mut decoded)
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&decoded).unwrap();
    assert_eq!(body, serde_json::json!({"attachment_id": "att-1"}));
}

#[tokio::test]
async fn test_execute_reaches_endpoints_without_a_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/reports/r-1"))
        .and(header(
            "x-scc-sdk-analytics",
            "service_name=security_and_compliance_center;service_version=V3;operation_id=GetReport",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "r-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::get("GetReport", "api/v3/reports/{report_id}").path_param("report_id", "r-1");
    let response: DetailedResponse<serde_json::Value> =
        client(&mock_server).execute(request).await.unwrap();

    assert_eq!(response.result.unwrap()["id"], "r-1");
}

#[tokio::test]
async fn test_unbound_placeholder_is_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::get("GetReport", "api/v3/reports/{report_id}");
    let err = client(&mock_server)
        .execute::<serde_json::Value>(request)
        .await
        .unwrap_err();

    assert!(err.is_client_error());
}
