use review_client::{ClientError, ReviewClient};
use review_core::dto::candidate::CreateCandidate;
use review_core::dto::question::QuestionAnswer;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ReviewClient {
    ReviewClient::new(format!("{}/api", server.uri()))
}

#[tokio::test]
async fn questions_are_unwrapped_from_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/design-review/12/questions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "questions": [
                { "id": 1, "question": "How do you shard?", "difficulty": 3 },
                { "id": 2, "question": "What fails first?", "difficulty": 4, "answer": "The cache" }
            ]
        })))
        .mount(&server)
        .await;

    let questions = client_for(&server).await.get_questions(12).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1].answer.as_deref(), Some("The cache"));
}

#[tokio::test]
async fn questions_missing_key_is_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/design-review/5/questions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let questions = client_for(&server).await.get_questions(5).await.unwrap();
    assert!(questions.is_empty());
}

#[tokio::test]
async fn not_found_maps_to_not_found_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/design-review/9/evaluation/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_evaluation(9)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_carries_status_and_reason() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/candidate/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .list_candidates()
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/design-review/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_design_review(3)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ParseError(_)));
}

#[tokio::test]
async fn create_candidate_posts_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/candidate/"))
        .and(body_json(json!({"name": "Ada", "designation": "Staff Engineer"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "Ada",
            "designation": "Staff Engineer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let candidate = client_for(&server)
        .await
        .create_candidate(CreateCandidate {
            name: "Ada".to_string(),
            designation: "Staff Engineer".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(candidate.id, Some(7));
}

#[tokio::test]
async fn trigger_evaluation_posts_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/design-review/12/evaluate/"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .trigger_evaluation(12)
        .await
        .unwrap();
}

#[tokio::test]
async fn answer_all_questions_sends_api_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/design-review/12/questions/answer/"))
        .and(body_json(json!({
            "answers": [{ "questionId": 1, "answer": "Consistent hashing" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .answer_all_questions(
            12,
            vec![QuestionAnswer {
                question_id: 1,
                answer: "Consistent hashing".to_string(),
            }],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_answer_is_rejected_locally() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .await
        .answer_question(1, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
