//! Tests for the Octocrab GitHub gateway.

use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::SetupError;

use crate::github::token::AccessToken;
use super::{GitHubGateway, OctocrabGitHubGateway};

struct GatewayFixture {
    runtime: Runtime,
    server: MockServer,
    gateway: OctocrabGitHubGateway,
}

impl GatewayFixture {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[fixture]
fn gateway_fixture() -> GatewayFixture {
    let runtime = Runtime::new().expect("runtime should start");
    let server = runtime.block_on(MockServer::start());
    let token = AccessToken::new("gho_valid").expect("token should be valid");
    let gateway = {
        let _guard = runtime.enter();
        OctocrabGitHubGateway::for_token(&token, &server.uri()).expect("should create gateway")
    };
    GatewayFixture {
        runtime,
        server,
        gateway,
    }
}

fn author_body(login: &str) -> serde_json::Value {
    serde_json::json!({
        "login": login,
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://avatars.example.test/u/1",
        "gravatar_id": "",
        "url": "https://api.example.test/users/octocat",
        "html_url": "https://example.test/octocat",
        "followers_url": "https://api.example.test/users/octocat/followers",
        "following_url": "https://api.example.test/users/octocat/following{/other_user}",
        "gists_url": "https://api.example.test/users/octocat/gists{/gist_id}",
        "starred_url": "https://api.example.test/users/octocat/starred{/owner}{/repo}",
        "subscriptions_url": "https://api.example.test/users/octocat/subscriptions",
        "organizations_url": "https://api.example.test/users/octocat/orgs",
        "repos_url": "https://api.example.test/users/octocat/repos",
        "events_url": "https://api.example.test/users/octocat/events{/privacy}",
        "received_events_url": "https://api.example.test/users/octocat/received_events",
        "type": "User",
        "site_admin": false
    })
}

#[rstest]
fn authenticated_login_returns_the_account_name(gateway_fixture: GatewayFixture) {
    gateway_fixture.block_on(
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(author_body("octocat")))
            .mount(&gateway_fixture.server),
    );

    let login = gateway_fixture
        .block_on(gateway_fixture.gateway.authenticated_login())
        .expect("login should resolve");
    assert_eq!(login, "octocat");
}

#[rstest]
fn rejected_token_maps_to_authentication_error(gateway_fixture: GatewayFixture) {
    gateway_fixture.block_on(
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.example.test/rest"
            })))
            .mount(&gateway_fixture.server),
    );

    let error = gateway_fixture
        .block_on(gateway_fixture.gateway.authenticated_login())
        .expect_err("rejected token should error");
    assert!(
        matches!(error, SetupError::Authentication { .. }),
        "expected Authentication, got {error:?}"
    );
}

#[rstest]
fn create_repository_posts_name_and_returns_clone_url(gateway_fixture: GatewayFixture) {
    gateway_fixture.block_on(
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .and(body_partial_json(serde_json::json!({
                "name": "swp2016-1",
                "private": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "name": "swp2016-1",
                "clone_url": "https://github.example.test/octocat/swp2016-1.git"
            })))
            .mount(&gateway_fixture.server),
    );

    let created = gateway_fixture
        .block_on(gateway_fixture.gateway.create_repository("swp2016-1"))
        .expect("creation should succeed");
    assert_eq!(created.name, "swp2016-1");
    assert_eq!(
        created.clone_url,
        "https://github.example.test/octocat/swp2016-1.git"
    );
}

#[rstest]
fn duplicate_repository_name_is_an_api_error(gateway_fixture: GatewayFixture) {
    gateway_fixture.block_on(
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "Repository creation failed.",
                "errors": [{
                    "resource": "Repository",
                    "code": "custom",
                    "field": "name",
                    "message": "name already exists on this account"
                }],
                "documentation_url": "https://docs.example.test/rest/repos"
            })))
            .mount(&gateway_fixture.server),
    );

    let error = gateway_fixture
        .block_on(gateway_fixture.gateway.create_repository("swp2016-1"))
        .expect_err("name collision should error");
    let SetupError::Api { message } = error else {
        panic!("expected Api error, got {error:?}");
    };
    assert!(
        message.contains("rejected"),
        "message should mark the request as rejected, got {message}"
    );
}

#[rstest]
fn create_repository_without_clone_url_is_an_api_error(gateway_fixture: GatewayFixture) {
    gateway_fixture.block_on(
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "name": "swp2016-1"
            })))
            .mount(&gateway_fixture.server),
    );

    let error = gateway_fixture
        .block_on(gateway_fixture.gateway.create_repository("swp2016-1"))
        .expect_err("missing clone URL should error");
    assert!(
        matches!(error, SetupError::Api { .. }),
        "expected Api error, got {error:?}"
    );
}
