//! Profile operations against a wiremock stub.

use sccapi::{
    CreateProfileOptions, DefaultParameter, DeleteCustomProfileOptions, GetProfileOptions,
    ListProfilesOptions, Paginated, ProfileControlRef, ProfilePrototype, ReplaceProfileOptions,
    SccClient, SccError,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> SccClient {
    SccClient::new("test-token", &server.uri()).unwrap()
}

fn prototype() -> ProfilePrototype {
    ProfilePrototype::new(
        "Team Profile",
        "Controls the team cares about",
        "custom",
        vec![ProfileControlRef::new("cl-123", "control-1")],
    )
}

#[tokio::test]
async fn test_create_profile_always_sends_default_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/profiles"))
        .and(body_json(serde_json::json!({
            "profile_name": "Team Profile",
            "profile_description": "Controls the team cares about",
            "profile_type": "custom",
            "controls": [{"control_library_id": "cl-123", "control_id": "control-1"}],
            "default_parameters": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "profile-1",
            "profile_type": "custom",
            "controls_count": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = client(&mock_server)
        .account()
        .create_profile(&CreateProfileOptions::new(prototype()))
        .await
        .unwrap();

    let profile = response.result.unwrap();
    assert!(profile.is_custom());
    assert_eq!(profile.controls_count, Some(1));
}

#[tokio::test]
async fn test_create_profile_without_controls_fails_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut profile = prototype();
    profile.controls.clear();

    let err = client(&mock_server)
        .account()
        .create_profile(&CreateProfileOptions::new(profile))
        .await
        .unwrap_err();

    assert!(matches!(err, SccError::Validation { field: "controls", .. }));
}

#[tokio::test]
async fn test_replace_profile_sends_parameters_to_id_path() {
    let mock_server = MockServer::start().await;

    let parameter = DefaultParameter {
        assessment_type: Some("automated".to_string()),
        assessment_id: Some("rule-1".to_string()),
        parameter_name: Some("tls_version".to_string()),
        parameter_default_value: Some("1.2".to_string()),
        ..Default::default()
    };

    Mock::given(method("PUT"))
        .and(path("/api/v3/profiles/profile-1"))
        .and(body_json(serde_json::json!({
            "profile_name": "Team Profile",
            "profile_description": "Controls the team cares about",
            "profile_type": "custom",
            "controls": [{"control_library_id": "cl-123", "control_id": "control-1"}],
            "default_parameters": [{
                "assessment_type": "automated",
                "assessment_id": "rule-1",
                "parameter_name": "tls_version",
                "parameter_default_value": "1.2"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "profile-1",
            "default_parameters": [{"parameter_name": "tls_version", "parameter_default_value": "1.2"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = ReplaceProfileOptions::new(
        "profile-1",
        prototype().with_default_parameters(vec![parameter]),
    );
    let profile = client(&mock_server)
        .account()
        .replace_profile(&options)
        .await
        .unwrap()
        .result
        .unwrap();

    let parameters = profile.default_parameters.unwrap();
    assert_eq!(parameters[0].parameter_default_value.as_deref(), Some("1.2"));
}

#[tokio::test]
async fn test_list_profiles_follows_relative_next_href() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles"))
        .and(query_param("start", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 3,
            "profiles": [{"id": "profile-3"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 3,
            "next": {"href": "/api/v3/profiles?limit=2&start=page-2"},
            "profiles": [{"id": "profile-1"}, {"id": "profile-2"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let mut options = ListProfilesOptions {
        limit: Some(2),
        ..Default::default()
    };

    let mut ids = Vec::new();
    loop {
        let page = client
            .account()
            .list_profiles(&options)
            .await
            .unwrap()
            .result
            .unwrap();
        ids.extend(page.profiles.iter().flatten().filter_map(|p| p.id.clone()));
        match page.next_start() {
            Some(start) => options.start = Some(start),
            None => break,
        }
    }

    assert_eq!(ids, vec!["profile-1", "profile-2", "profile-3"]);
}

#[tokio::test]
async fn test_get_and_delete_profile_use_profiles_id_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/profiles/profile-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "profile-1",
            "profile_type": "predefined"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/profiles/profile-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "profile-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let profile = client
        .account()
        .get_profile(&GetProfileOptions::new("profile-1"))
        .await
        .unwrap()
        .result
        .unwrap();
    assert!(!profile.is_custom());

    let deleted = client
        .account()
        .delete_custom_profile(&DeleteCustomProfileOptions::new("profile-1"))
        .await
        .unwrap();
    assert_eq!(deleted.status_code, 200);
}
