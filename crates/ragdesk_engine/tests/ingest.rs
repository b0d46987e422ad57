use std::time::Duration;

use ragdesk_core::{Operation, RemoteErrorKind, SourceBatch};
use ragdesk_engine::{ApiSettings, IngestionClient, ReqwestIngestionClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestIngestionClient {
    ReqwestIngestionClient::from_settings(&ApiSettings::with_base_url(server.uri()))
        .expect("client")
}

#[tokio::test]
async fn ingest_posts_urls_and_acknowledges_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "urls": ["https://a.test", "https://b.test/docs"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let batch = SourceBatch::new(["https://a.test", "https://b.test/docs"]).unwrap();
    let ack = client_for(&server).ingest(&batch).await.expect("ingest ok");

    assert_eq!(ack.status, 200);
    assert_eq!(batch.urls(), ["https://a.test", "https://b.test/docs"]);
}

#[tokio::test]
async fn ingest_ignores_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let batch = SourceBatch::new(["https://a.test"]).unwrap();
    let ack = client_for(&server).ingest(&batch).await.expect("ingest ok");
    assert_eq!(ack.status, 204);
}

#[tokio::test]
async fn ingest_rejection_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "fetch failed"})),
        )
        .mount(&server)
        .await;

    let batch = SourceBatch::new(["bad-url"]).unwrap();
    let err = client_for(&server).ingest(&batch).await.unwrap_err();

    assert_eq!(err.operation, Operation::Ingest);
    assert_eq!(err.kind, RemoteErrorKind::Rejected { status: 500 });
    assert_eq!(err.detail.as_deref(), Some("fetch failed"));
}

#[tokio::test]
async fn ingest_rejection_without_json_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let batch = SourceBatch::new(["https://a.test"]).unwrap();
    let err = client_for(&server).ingest(&batch).await.unwrap_err();

    assert_eq!(err.kind, RemoteErrorKind::Rejected { status: 502 });
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn ingest_times_out_as_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::with_base_url(server.uri())
    };
    let client = ReqwestIngestionClient::from_settings(&settings).unwrap();
    let batch = SourceBatch::new(["https://a.test"]).unwrap();

    let err = client.ingest(&batch).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Transport);
    assert_eq!(err.message, "request timed out");
}

#[tokio::test]
async fn ingest_against_closed_port_is_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let settings = ApiSettings::with_base_url(format!("http://127.0.0.1:{port}"));
    let client = ReqwestIngestionClient::from_settings(&settings).unwrap();
    let batch = SourceBatch::new(["https://a.test"]).unwrap();

    let err = client.ingest(&batch).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Transport);
    assert_eq!(err.detail, None);
}
