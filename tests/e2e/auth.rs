//! E2E tests for the login handshake and suite setup

use super::fixtures::{FakeOptions, FakeServer, FAKE_TOKEN};
use super::helpers::unreachable_config;
use spoiler_suite::auth::authenticate;
use spoiler_suite::{ApiClient, Suite, SuiteError};

#[test]
fn test_authenticate_returns_token() {
    let server = FakeServer::start();
    let config = server.config();
    let client = ApiClient::new(&config).unwrap();

    let token = authenticate(&client, &config.username, &config.password).unwrap();
    assert_eq!(token, FAKE_TOKEN);
}

/// A 2xx login without `accessToken` is not an error; the token is empty.
#[test]
fn test_missing_access_token_yields_empty_token() {
    let server = FakeServer::start_with(FakeOptions {
        omit_token: true,
        ..FakeOptions::default()
    });
    let config = server.config();
    let client = ApiClient::new(&config).unwrap();

    let token = authenticate(&client, &config.username, &config.password).unwrap();
    assert_eq!(token, "");
}

/// With an empty token every authenticated step fails on its status check,
/// but the run itself completes.
#[test]
fn test_empty_token_fails_every_step_without_aborting() {
    let server = FakeServer::start_with(FakeOptions {
        omit_token: true,
        ..FakeOptions::default()
    });

    let suite = Suite::setup(&server.config()).unwrap();
    let report = suite.run().unwrap();

    assert_eq!(report.results.len(), 7);
    assert_eq!(report.failed_count(), 7);
    for failure in report.failures() {
        assert!(failure.contains("got HTTP 401"), "unexpected failure: {failure}");
    }
}

#[test]
fn test_rejected_credentials_fail_setup() {
    let server = FakeServer::start();
    let mut config = server.config();
    config.password = "wrong".to_string();

    let err = Suite::setup(&config).unwrap_err();
    assert!(matches!(err, SuiteError::Authentication { status: 401, .. }));
}

#[test]
fn test_unreachable_host_fails_setup() {
    let err = Suite::setup(&unreachable_config()).unwrap_err();
    match err {
        SuiteError::Transport { method, url, .. } => {
            assert_eq!(method, "POST");
            assert!(url.ends_with("/api/User/Authentication"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[test]
fn test_setup_attaches_token() {
    let server = FakeServer::start();
    let suite = Suite::setup(&server.config()).unwrap();

    assert!(suite.client().is_authenticated());
    let response = suite.client().list_stories().unwrap();
    assert_eq!(response.status.as_u16(), 200);
}
