use std::time::Duration;

use ctxgen_engine::{ClientSettings, ContextGenerator, FailureKind, ReqwestGenerator};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn posts_repo_url_and_reads_file_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "repoUrl": "https://github.com/org/repo"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "filePath": "tmp/abc123/out.json" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(&server.uri(), ClientSettings::default()).unwrap();
    let output = generator
        .generate("https://github.com/org/repo")
        .await
        .expect("generate ok");

    assert_eq!(output.file_path.as_deref(), Some("tmp/abc123/out.json"));
}

#[tokio::test]
async fn empty_repo_url_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .and(body_json(serde_json::json!({ "repoUrl": "" })))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(&server.uri(), ClientSettings::default()).unwrap();
    let err = generator.generate("").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}

#[tokio::test]
async fn server_error_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(&server.uri(), ClientSettings::default()).unwrap();
    let err = generator.generate("https://github.com/org/repo").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn success_without_file_path_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(&server.uri(), ClientSettings::default()).unwrap();
    let output = generator.generate("https://github.com/org/repo").await.unwrap();
    assert_eq!(output.file_path, None);
}

#[tokio::test]
async fn non_json_body_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let generator = ReqwestGenerator::new(&server.uri(), ClientSettings::default()).unwrap();
    let err = generator.generate("https://github.com/org/repo").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidBody);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"filePath":"a/very/long/path/to/file.md"}"#),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_body_bytes: 8,
        ..ClientSettings::default()
    };
    let generator = ReqwestGenerator::new(&server.uri(), settings).unwrap();
    let err = generator.generate("https://github.com/org/repo").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 8, .. }));
}

#[tokio::test]
async fn configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-context"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(serde_json::json!({ "filePath": "a.md" })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    };
    let generator = ReqwestGenerator::new(&server.uri(), settings).unwrap();
    let err = generator.generate("https://github.com/org/repo").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

fn closed_local_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let uri = closed_local_uri();

    let generator = ReqwestGenerator::new(&uri, ClientSettings::default()).unwrap();
    let err = generator.generate("https://github.com/org/repo").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[test]
fn invalid_base_endpoint_is_rejected() {
    let err = ReqwestGenerator::new("not a url", ClientSettings::default()).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[test]
fn endpoint_appends_generate_path() {
    let generator =
        ReqwestGenerator::new("https://api.example.com", ClientSettings::default()).unwrap();
    assert_eq!(
        generator.endpoint().as_str(),
        "https://api.example.com/generate-context"
    );
}
