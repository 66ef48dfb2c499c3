use futures::executor::block_on;

use super::*;
use crate::net::client::{AUTHORIZATION, ApiRequest};
use crate::net::mock::{BASE_URL, fixture};
use crate::net::types::{AnswerValue, JoinAction};

fn sent(request: &ApiRequest) -> (Method, String) {
    (request.method, request.url.trim_start_matches(BASE_URL).to_owned())
}

fn body_json(request: &ApiRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
}

// =============================================================
// Paths
// =============================================================

#[test]
fn questionnaire_path_formats_id() {
    assert_eq!(questionnaire_path(42), "/api/questionnaires/42");
    assert_eq!(questionnaire_subpath("abc", "my-answers"), "/api/questionnaires/abc/my-answers");
    assert_eq!(question_path(1, 2), "/api/questionnaires/1/questions/2");
    assert_eq!(join_path("tok"), "/join/tok");
}

// =============================================================
// Questionnaires
// =============================================================

#[test]
fn get_details_sends_bearer_get() {
    let fx = fixture(Some("abc"), "/questionnaires");
    block_on(fx.client.questionnaires().get_details(42)).unwrap();
    let request = fx.transport.last();
    assert_eq!(sent(&request), (Method::Get, "/api/questionnaires/42".to_owned()));
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer abc"));
    assert_eq!(request.body, None);
}

#[test]
fn questionnaire_routes_map_to_expected_verbs() {
    let fx = fixture(Some("abc"), "/dashboard");
    let api = fx.client.questionnaires();
    let data = NewQuestionnaire { title: "Poll".to_owned(), description: String::new() };
    let question = NewQuestion { theme: "general".to_owned(), text: "Coffee?".to_owned() };

    block_on(async {
        api.get_my_questionnaires().await.unwrap();
        api.create(&data).await.unwrap();
        api.update("q1", &data).await.unwrap();
        api.delete("q1").await.unwrap();
        api.publish("q1").await.unwrap();
        api.get_questions("q1").await.unwrap();
        api.get_my_answers("q1").await.unwrap();
        api.get_members("q1").await.unwrap();
        api.generate_invite("q1").await.unwrap();
        api.create_question("q1", &question).await.unwrap();
        api.update_question("q1", "k9", &question).await.unwrap();
        api.delete_question("q1", "k9").await.unwrap();
    });

    let calls: Vec<_> = fx.transport.requests().iter().map(sent).collect();
    let expected = [
        (Method::Get, "/api/questionnaires"),
        (Method::Post, "/api/questionnaires"),
        (Method::Put, "/api/questionnaires/q1"),
        (Method::Delete, "/api/questionnaires/q1"),
        (Method::Post, "/api/questionnaires/q1/publish"),
        (Method::Get, "/api/questionnaires/q1/questions"),
        (Method::Get, "/api/questionnaires/q1/my-answers"),
        (Method::Get, "/api/questionnaires/q1/members"),
        (Method::Post, "/api/questionnaires/q1/invite"),
        (Method::Post, "/api/questionnaires/q1/question"),
        (Method::Put, "/api/questionnaires/q1/questions/k9"),
        (Method::Delete, "/api/questionnaires/q1/questions/k9"),
    ];
    let expected: Vec<_> = expected.iter().map(|(m, p)| (*m, (*p).to_owned())).collect();
    assert_eq!(calls, expected);
}

#[test]
fn create_sends_payload() {
    let fx = fixture(Some("abc"), "/questionnaire/create");
    let data = NewQuestionnaire { title: "Poll".to_owned(), description: "Weekly".to_owned() };
    block_on(fx.client.questionnaires().create(&data)).unwrap();
    assert_eq!(body_json(&fx.transport.last()), serde_json::json!({ "title": "Poll", "description": "Weekly" }));
}

#[test]
fn with_options_threads_per_call_config() {
    let fx = fixture(Some("abc"), "/dashboard");
    let options = RequestOptions::default()
        .with_timeout(std::time::Duration::from_secs(30))
        .with_header("X-Request-Source", "dashboard");
    block_on(fx.client.questionnaires().with_options(options).get_my_questionnaires()).unwrap();
    let request = fx.transport.last();
    assert_eq!(request.timeout, std::time::Duration::from_secs(30));
    assert_eq!(request.header("x-request-source"), Some("dashboard"));
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer abc"));
}

// =============================================================
// Auth
// =============================================================

#[test]
fn login_posts_credentials() {
    let fx = fixture(None, "/login");
    let credentials = Credentials { username: "ana".to_owned(), password: "secret123".to_owned() };
    block_on(fx.client.auth().login(&credentials)).unwrap();
    let request = fx.transport.last();
    assert_eq!(sent(&request), (Method::Post, "/login".to_owned()));
    assert_eq!(body_json(&request), serde_json::json!({ "username": "ana", "password": "secret123" }));
    assert_eq!(request.header(AUTHORIZATION), None);
}

#[test]
fn register_posts_new_account() {
    let fx = fixture(None, "/register");
    let request = RegisterRequest {
        name: "Ana".to_owned(),
        display_name: "Ana P.".to_owned(),
        username: "ana".to_owned(),
        password: "secret123".to_owned(),
    };
    block_on(fx.client.auth().register(&request)).unwrap();
    assert_eq!(sent(&fx.transport.last()), (Method::Post, "/register".to_owned()));
}

#[test]
fn check_username_wraps_value() {
    let fx = fixture(None, "/register");
    block_on(fx.client.auth().check_username("ana")).unwrap();
    let request = fx.transport.last();
    assert_eq!(sent(&request), (Method::Post, "/check/username".to_owned()));
    assert_eq!(body_json(&request), serde_json::json!({ "value": "ana" }));
}

// =============================================================
// Participation + health
// =============================================================

#[test]
fn participation_routes() {
    let fx = fixture(None, "/");
    let api = fx.client.participation();
    let member = JoinRequest {
        action: JoinAction::Register,
        unique_identifier: "member01".to_owned(),
        display_name: "M".to_owned(),
        passcode: String::new(),
    };

    block_on(async {
        api.join_questionnaire("tok", &member).await.unwrap();
        api.get_invite_info("tok").await.unwrap();
        api.check_member_identifier("tok", "member01").await.unwrap();
        api.answer_question("k9", &AnswerRequest { answer_value: AnswerValue::Yes }).await.unwrap();
    });

    let requests = fx.transport.requests();
    let calls: Vec<_> = requests.iter().map(sent).collect();
    assert_eq!(
        calls,
        vec![
            (Method::Post, "/join/tok".to_owned()),
            (Method::Get, "/join/tok/info".to_owned()),
            (Method::Post, "/check/member/tok".to_owned()),
            (Method::Post, "/api/question/k9".to_owned()),
        ]
    );
    assert_eq!(body_json(&requests[2]), serde_json::json!({ "value": "member01" }));
    assert_eq!(body_json(&requests[3]), serde_json::json!({ "answer_value": "Yes" }));
}

#[test]
fn health_check_gets_health() {
    let fx = fixture(None, "/");
    fx.transport.respond(200, r#"{"status":"up"}"#);
    let resp = block_on(fx.client.health().check()).unwrap();
    assert_eq!(sent(&fx.transport.last()), (Method::Get, "/health".to_owned()));
    assert_eq!(resp.json::<serde_json::Value>().unwrap()["status"], "up");
}
