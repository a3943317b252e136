//! Integration tests for the GitHub tracker.
//!
//! These tests run `GitHubTracker` against a local `wiremock` server and
//! check the requests it sends and how it maps responses.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use compat_reporter::core::config::Repository;
use compat_reporter::forge::github::GitHubTracker;
use compat_reporter::forge::{CreateIssueRequest, IssueTracker, TrackerError};

const ISSUES_PATH: &str = "/repos/acme/widgets/issues";

fn tracker(server: &MockServer) -> GitHubTracker {
    GitHubTracker::with_api_base(
        "ghp_test",
        Repository::parse("acme/widgets").unwrap(),
        server.uri(),
    )
}

fn request() -> CreateIssueRequest {
    CreateIssueRequest {
        title: "CI Future Compatibility Warning: nightly (Linux/x86_64)".into(),
        body: "details\n\nChecksum: `cbf43926`".into(),
        labels: vec!["ci".into()],
    }
}

mod list_issues {
    use super::*;

    #[tokio::test]
    async fn sends_auth_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .and(header("authorization", "token ghp_test"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let issues = tracker(&server).list_issues().await.unwrap();
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn decodes_issues_with_null_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"number": 1, "title": "first", "body": "hello\nChecksum: `abc`", "state": "open"},
                {"number": 2, "title": "second", "body": null, "state": "open"},
            ])))
            .mount(&server)
            .await;

        let issues = tracker(&server).list_issues().await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].body.as_deref(), Some("hello\nChecksum: `abc`"));
        assert_eq!(issues[1].body, None);
    }

    #[tokio::test]
    async fn non_200_keeps_status_and_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"message": "Server Error"})),
            )
            .mount(&server)
            .await;

        let err = tracker(&server).list_issues().await.unwrap_err();
        match &err {
            TrackerError::UnexpectedStatus { status, url, payload } => {
                assert_eq!(*status, 500);
                assert_eq!(url, &format!("{}{}", server.uri(), ISSUES_PATH));
                assert!(payload.contains("Server Error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_success_status_is_still_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = tracker(&server).list_issues().await.unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[tokio::test]
    async fn malformed_listing_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
            .mount(&server)
            .await;

        let err = tracker(&server).list_issues().await.unwrap_err();
        assert!(matches!(err, TrackerError::DecodeError(_)));
    }
}

mod create_issue {
    use super::*;

    #[tokio::test]
    async fn posts_title_body_and_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ISSUES_PATH))
            .and(header("authorization", "token ghp_test"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .and(body_json(json!({
                "title": "CI Future Compatibility Warning: nightly (Linux/x86_64)",
                "body": "details\n\nChecksum: `cbf43926`",
                "labels": ["ci"],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "number": 17,
                "html_url": "https://github.com/acme/widgets/issues/17",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = tracker(&server).create_issue(request()).await.unwrap();
        assert_eq!(created.number, Some(17));
        assert_eq!(
            created.url.as_deref(),
            Some("https://github.com/acme/widgets/issues/17")
        );
    }

    #[tokio::test]
    async fn status_200_is_not_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"number": 1})))
            .mount(&server)
            .await;

        let err = tracker(&server).create_issue(request()).await.unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn validation_failure_keeps_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ISSUES_PATH))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "errors": [{"resource": "Issue", "code": "invalid", "field": "labels"}],
            })))
            .mount(&server)
            .await;

        let err = tracker(&server).create_issue(request()).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        let pretty = err.payload_pretty().unwrap();
        assert!(pretty.contains("\"message\": \"Validation Failed\""));
    }
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let uri = format!("http://127.0.0.1:{}", port);

    let tracker = GitHubTracker::with_api_base(
        "ghp_test",
        Repository::parse("acme/widgets").unwrap(),
        uri,
    );
    let err = tracker.list_issues().await.unwrap_err();
    assert!(matches!(err, TrackerError::NetworkError(_)));
}
