use ragdesk_core::{Operation, Question, RemoteErrorKind};
use ragdesk_engine::{ApiSettings, ApiTransport, QueryClient, ReqwestQueryClient};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestQueryClient {
    let transport = ApiTransport::new(&ApiSettings::with_base_url(server.uri())).unwrap();
    ReqwestQueryClient::new(transport)
}

#[tokio::test]
async fn query_returns_answer_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/question"))
        .and(body_json(serde_json::json!({"question": "what is a?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "A is a test",
            "sources": ["https://a.test"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let question = Question::new("what is a?").unwrap();
    let answer = client_for(&server).query(&question).await.expect("query ok");
    assert_eq!(answer, "A is a test");
}

#[tokio::test]
async fn query_without_answer_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/question"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "x"})))
        .mount(&server)
        .await;

    let question = Question::new("what is a?").unwrap();
    let err = client_for(&server).query(&question).await.unwrap_err();
    assert_eq!(err.operation, Operation::Query);
    assert_eq!(err.kind, RemoteErrorKind::Malformed);
}

#[tokio::test]
async fn query_with_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/question"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let question = Question::new("what is a?").unwrap();
    let err = client_for(&server).query(&question).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Malformed);
}

#[tokio::test]
async fn query_rejection_carries_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/question"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "Please scrape URLs first"})),
        )
        .mount(&server)
        .await;

    let question = Question::new("what is a?").unwrap();
    let err = client_for(&server).query(&question).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Rejected { status: 400 });
    assert_eq!(err.detail.as_deref(), Some("Please scrape URLs first"));
}

#[tokio::test]
async fn query_rejection_with_validation_array_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/question"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [{"loc": ["body", "question"], "msg": "field required"}]
        })))
        .mount(&server)
        .await;

    let question = Question::new("what is a?").unwrap();
    let err = client_for(&server).query(&question).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Rejected { status: 422 });
    assert_eq!(err.detail, None);
}
