use std::time::Duration;

use critique_engine::{
    AnalysisClient, AnalysisError, AnalysisRequest, ClientSettings, DocumentUpload,
    ReqwestAnalysisClient, SERVER_ERROR,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{any, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    critique_logging::initialize_for_tests();
}

fn client_for(server: &MockServer) -> ReqwestAnalysisClient {
    ReqwestAnalysisClient::new(ClientSettings {
        endpoint: format!("{}/analyze", server.uri()),
        ..ClientSettings::default()
    })
}

fn request(job_description: Option<&str>) -> AnalysisRequest {
    AnalysisRequest {
        document: Some(DocumentUpload {
            file_name: "resume.txt".to_string(),
            bytes: b"Jane Doe\nRust engineer".to_vec(),
        }),
        job_description: job_description.map(ToOwned::to_owned),
    }
}

#[tokio::test]
async fn success_body_decodes_into_result() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_string_contains("name=\"file\"; filename=\"resume.txt\""))
        .and(body_string_contains("Rust engineer"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"candidate_name":"Jane Doe","overall_score":84,"summary":"Solid",
                "strengths":["Rust"],"weaknesses":["MISSING: Kafka"],
                "improvements":[{"original":"Did work","better":"Shipped X","why":"Impact"}],
                "raw_text":"Jane Doe"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).analyze(request(None)).await.expect("analysis ok");

    assert_eq!(result.candidate_name.as_deref(), Some("Jane Doe"));
    assert_eq!(result.overall_score, Some(84));
    assert_eq!(result.weaknesses, Some(vec!["MISSING: Kafka".to_string()]));
    assert_eq!(result.improvements.unwrap()[0].improved, "Shipped X");
}

#[tokio::test]
async fn job_description_is_sent_when_present() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"job_description\""))
        .and(body_string_contains("Needs LDAP"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .analyze(request(Some("  Needs LDAP  ")))
        .await
        .expect("analysis ok");
}

#[tokio::test]
async fn blank_job_description_is_not_sent() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"job_description\""))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .analyze(request(Some("   ")))
        .await
        .expect("analysis ok");
}

#[tokio::test]
async fn missing_document_never_reaches_the_network() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analyze(AnalysisRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err, AnalysisError::NoDocument);
    assert!(err.is_user_input());
}

#[tokio::test]
async fn failure_status_carries_server_detail() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            r#"{"detail":"CRASH: unsupported file"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(request(None)).await.unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Service {
            status: 500,
            message: "CRASH: unsupported file".to_string(),
        }
    );
    assert_eq!(err.to_string(), "CRASH: unsupported file");
}

#[tokio::test]
async fn failure_without_detail_is_generic() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(request(None)).await.unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Service {
            status: 502,
            message: SERVER_ERROR.to_string(),
        }
    );
}

#[tokio::test]
async fn unparseable_success_body_is_malformed() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(request(None)).await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn error_only_success_body_is_a_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"error":"GEMINI_API_KEY not set"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).analyze(request(None)).await.unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Service {
            status: 200,
            message: "GEMINI_API_KEY not set".to_string(),
        }
    );
}

#[tokio::test]
async fn slow_service_times_out() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let client = ReqwestAnalysisClient::new(ClientSettings {
        endpoint: format!("{}/analyze", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    });

    let err = client.analyze(request(None)).await.unwrap_err();
    assert_eq!(err, AnalysisError::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"summary\":\"0123456789\"}"))
        .mount(&server)
        .await;

    let client = ReqwestAnalysisClient::new(ClientSettings {
        endpoint: format!("{}/analyze", server.uri()),
        max_response_bytes: 10,
        ..ClientSettings::default()
    });

    let err = client.analyze(request(None)).await.unwrap_err();
    assert_eq!(err, AnalysisError::TooLarge { max_bytes: 10 });
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    init_logging();
    let client = ReqwestAnalysisClient::new(ClientSettings {
        endpoint: "not a url".to_string(),
        ..ClientSettings::default()
    });

    let err = client.analyze(request(None)).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidEndpoint(_)), "{err:?}");
}
