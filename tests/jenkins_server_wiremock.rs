//! Integration tests for the build-server client against a mock HTTP server.

use courseforge::{
    CredentialDomain, Credentials, JenkinsGateway, JenkinsServer, JobDescriptor, JobName,
    SetupError,
};
use url::Url;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXPECTED_AUTHORIZATION: &str = "Basic YWxpY2U6czNjcjN0";

async fn start_server() -> (MockServer, JenkinsServer) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).expect("mock server URI should parse");
    let credentials = Credentials::new("alice", "s3cr3t").expect("credentials should be valid");
    let jenkins = JenkinsServer::new(base_url, credentials).expect("client should build");
    (server, jenkins)
}

fn job_descriptor(name: &str, config_xml: &str) -> JobDescriptor {
    let job_name = JobName::new(name).expect("job name should be valid");
    JobDescriptor::new(job_name, config_xml.to_owned())
}

#[tokio::test]
async fn create_job_posts_config_with_basic_auth() {
    let (server, jenkins) = start_server().await;
    let config_xml = "<?xml version='1.1' encoding='UTF-8'?><project/>";

    Mock::given(method("POST"))
        .and(path("/createItem"))
        .and(query_param("name", "swp2016-1"))
        .and(header("Authorization", EXPECTED_AUTHORIZATION))
        .and(header("Content-Type", "application/xml; charset=utf-8"))
        .and(body_string(config_xml))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    jenkins
        .create_job(&job_descriptor("swp2016-1", config_xml))
        .await
        .expect("job creation should succeed");
}

#[tokio::test]
async fn create_job_maps_unauthorised_to_authentication_error() {
    let (server, jenkins) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/createItem"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let error = jenkins
        .create_job(&job_descriptor("swp2016-1", "<project/>"))
        .await
        .expect_err("rejected credentials should error");
    assert!(
        matches!(error, SetupError::Authentication { .. }),
        "expected Authentication, got {error:?}"
    );
}

#[tokio::test]
async fn create_job_surfaces_status_and_body_on_failure() {
    let (server, jenkins) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/createItem"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("A job already exists with that name"),
        )
        .mount(&server)
        .await;

    let error = jenkins
        .create_job(&job_descriptor("swp2016-1", "<project/>"))
        .await
        .expect_err("server failure should error");
    assert_eq!(
        error,
        SetupError::RequestFailed {
            status: 500,
            body: "A job already exists with that name".to_owned(),
        }
    );
}

#[tokio::test]
async fn credential_id_is_first_tag_with_domain_prefix() {
    let (server, jenkins) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/credential-store/domain/GitHub/api/xml"))
        .and(header("Authorization", EXPECTED_AUTHORIZATION))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<credentials><someTag/></credentials>")
                .insert_header("Content-Type", "application/xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let domain = CredentialDomain::new("GitHub").expect("domain should be valid");
    let credential_id = jenkins
        .credential_id(&domain)
        .await
        .expect("lookup should succeed");
    assert_eq!(credential_id, "0someTag");
}

#[tokio::test]
async fn malformed_credential_xml_is_a_parse_error() {
    let (server, jenkins) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/credential-store/domain/GitHub/api/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not an xml document"))
        .mount(&server)
        .await;

    let domain = CredentialDomain::new("GitHub").expect("domain should be valid");
    let error = jenkins
        .credential_id(&domain)
        .await
        .expect_err("malformed XML should error");
    assert!(
        matches!(error, SetupError::Parse { .. }),
        "expected Parse error, got {error:?}"
    );
}

#[tokio::test]
async fn empty_credential_store_is_a_missing_credential_error() {
    let (server, jenkins) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/credential-store/domain/GitHub/api/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<credentials/>"))
        .mount(&server)
        .await;

    let domain = CredentialDomain::new("GitHub").expect("domain should be valid");
    let error = jenkins
        .credential_id(&domain)
        .await
        .expect_err("empty store should error");
    assert_eq!(
        error,
        SetupError::MissingCredentialId {
            domain: "GitHub".to_owned(),
        }
    );
}
