//! Control library operations against a wiremock stub.

use sccapi::{
    CallHeaders, Control, ControlLibraryPrototype, CreateCustomControlLibraryOptions,
    DeleteCustomControlLibraryOptions, GetControlLibraryOptions, ListControlLibrariesOptions,
    Paginated, SccClient, SccError,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SccClient {
    SccClient::new("test-token", &server.uri()).unwrap()
}

#[tokio::test]
async fn test_get_control_library_populates_only_sent_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries/cl-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cl-123",
            "control_library_name": "X"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .account()
        .get_control_library(&GetControlLibraryOptions::new("cl-123"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let library = response.result.unwrap();
    assert_eq!(library.id.as_deref(), Some("cl-123"));
    assert_eq!(library.control_library_name.as_deref(), Some("X"));
    assert!(library.control_library_description.is_none());
    assert!(library.controls.is_none());
    assert!(library.created_on.is_none());
}

#[tokio::test]
async fn test_list_control_libraries_sends_query_and_reads_next_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries"))
        .and(query_param("limit", "2"))
        .and(query_param("control_library_type", "custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "limit": 2,
            "total_count": 3,
            "first": {"href": "https://example.test/api/v3/control_libraries?limit=2"},
            "next": {"href": "https://example.test/api/v3/control_libraries?limit=2&start=tok-2"},
            "control_libraries": [
                {"id": "cl-1", "control_library_type": "custom"},
                {"id": "cl-2", "control_library_type": "custom"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let options = ListControlLibrariesOptions {
        limit: Some(2),
        control_library_type: Some("custom".to_string()),
        ..Default::default()
    };
    let page = client(&mock_server)
        .account()
        .list_control_libraries(&options)
        .await
        .unwrap()
        .result
        .unwrap();

    assert_eq!(page.total_count(), Some(3));
    assert_eq!(page.control_libraries.as_ref().map(Vec::len), Some(2));
    assert_eq!(page.next_start().as_deref(), Some("tok-2"));
    assert!(page.has_more());
}

#[tokio::test]
async fn test_list_without_options_sends_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 0,
            "control_libraries": []
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let page = client
        .account()
        .list_control_libraries(&ListControlLibrariesOptions::default())
        .await
        .unwrap()
        .result
        .unwrap();
    assert!(!page.has_more());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_create_custom_control_library_omits_unset_fields() {
    let mock_server = MockServer::start().await;

    let control = Control {
        control_name: Some("AC-1".to_string()),
        control_category: Some("Access Control".to_string()),
        ..Default::default()
    };

    Mock::given(method("POST"))
        .and(path("/api/v3/control_libraries"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "control_library_name": "Team Controls",
            "control_library_description": "Controls for the team",
            "control_library_type": "custom",
            "controls": [{"control_name": "AC-1", "control_category": "Access Control"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "cl-new",
            "control_library_type": "custom"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let library = ControlLibraryPrototype::new(
        "Team Controls",
        "Controls for the team",
        "custom",
        vec![control],
    );
    let response = client(&mock_server)
        .account()
        .create_custom_control_library(&CreateCustomControlLibraryOptions::new(library))
        .await
        .unwrap();

    assert_eq!(response.status_code, 201);
    assert!(response.result.unwrap().is_custom());
}

#[tokio::test]
async fn test_empty_id_fails_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .account()
        .get_control_library(&GetControlLibraryOptions::new(""))
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(matches!(
        err,
        SccError::Validation {
            field: "control_libraries_id",
            ..
        }
    ));
}

#[tokio::test]
async fn test_create_with_missing_required_field_fails_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let library = ControlLibraryPrototype::new("", "desc", "custom", vec![Control::default()]);
    let err = client(&mock_server)
        .account()
        .create_custom_control_library(&CreateCustomControlLibraryOptions::new(library))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SccError::Validation {
            field: "control_library_name",
            ..
        }
    ));
}

#[tokio::test]
async fn test_analytics_correlation_and_custom_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries/cl-123"))
        .and(header(
            "x-scc-sdk-analytics",
            "service_name=security_and_compliance_center;service_version=V3;operation_id=GetControlLibrary",
        ))
        .and(header("x-correlation-id", "corr-1"))
        .and(header("x-request-id", "req-1"))
        .and(header("x-team", "platform"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "cl-123"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut options = GetControlLibraryOptions::new("cl-123");
    options.headers = CallHeaders::new()
        .correlation_id("corr-1")
        .request_id("req-1")
        .header(
            reqwest::header::HeaderName::from_static("x-team"),
            reqwest::header::HeaderValue::from_static("platform"),
        );

    client(&mock_server)
        .account()
        .get_control_library(&options)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_id_is_percent_encoded_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/control_libraries/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"deleted": "a/b"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .account()
        .delete_custom_control_library(&DeleteCustomControlLibraryOptions::new("a/b"))
        .await
        .unwrap();

    assert_eq!(response.result.unwrap().deleted.as_deref(), Some("a/b"));
}

#[tokio::test]
async fn test_dot_segment_ids_fail_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    let err = client
        .account()
        .get_control_library(&GetControlLibraryOptions::new(".."))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SccError::Validation {
            field: "control_libraries_id",
            ..
        }
    ));

    let err = client
        .account()
        .delete_custom_control_library(&DeleteCustomControlLibraryOptions::new("."))
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries/cl-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 42"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .account()
        .get_control_library(&GetControlLibraryOptions::new("cl-123"))
        .await
        .unwrap_err();

    assert!(matches!(err, SccError::Decode { status_code: 200, .. }));
}

#[tokio::test]
async fn test_empty_body_yields_no_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries/cl-123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .account()
        .get_control_library(&GetControlLibraryOptions::new("cl-123"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert!(response.result.is_none());
}

#[tokio::test]
async fn test_not_found_maps_to_api_error_with_trace() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/control_libraries/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"code": "not_found", "message": "Control library not found"}],
            "status_code": 404,
            "trace": "trace-abc"
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .account()
        .get_control_library(&GetControlLibraryOptions::new("missing"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    match err {
        SccError::Api {
            message, trace, body, ..
        } => {
            assert_eq!(message, "Control library not found");
            assert_eq!(trace.as_deref(), Some("trace-abc"));
            assert!(body.is_some());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
