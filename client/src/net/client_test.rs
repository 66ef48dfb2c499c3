use std::cell::Cell;

use futures::executor::block_on;

use super::*;
use crate::net::mock::{BASE_URL, fixture};
use crate::net::types::User;
use crate::state::auth::{TOKEN_KEY, USER_KEY};
use crate::util::storage::KeyValueStore;

// =============================================================
// Outgoing interceptor
// =============================================================

#[test]
fn token_present_attaches_bearer_header() {
    let fx = fixture(Some("abc"), "/dashboard");
    block_on(fx.client.send_empty(Method::Get, "/health", &RequestOptions::default())).unwrap();
    assert_eq!(fx.transport.last().header(AUTHORIZATION), Some("Bearer abc"));
}

#[test]
fn token_absent_sends_no_authorization_header() {
    let fx = fixture(None, "/");
    block_on(fx.client.send_empty(Method::Get, "/health", &RequestOptions::default())).unwrap();
    assert_eq!(fx.transport.last().header(AUTHORIZATION), None);
}

#[test]
fn token_set_after_construction_is_picked_up() {
    let fx = fixture(None, "/login");
    fx.client.session().login(User::from_username("ana"), "fresh");
    block_on(fx.client.send_empty(Method::Get, "/health", &RequestOptions::default())).unwrap();
    assert_eq!(fx.transport.last().header(AUTHORIZATION), Some("Bearer fresh"));
}

#[test]
fn bearer_replaces_caller_authorization() {
    let fx = fixture(Some("abc"), "/");
    let options = RequestOptions::default().with_header("authorization", "Basic xyz");
    let request = fx.client.prepare::<()>(Method::Get, "/health", None, &options).unwrap();
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer abc"));
    assert_eq!(request.headers.iter().filter(|(k, _)| k.eq_ignore_ascii_case(AUTHORIZATION)).count(), 1);
}

#[test]
fn prepare_builds_url_body_and_json_content_type() {
    let fx = fixture(None, "/");
    let body = serde_json::json!({ "value": "ana" });
    let request = fx
        .client
        .prepare(Method::Post, "/check/username", Some(&body), &RequestOptions::default())
        .unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, format!("{BASE_URL}/check/username"));
    assert_eq!(request.body.as_deref(), Some(r#"{"value":"ana"}"#));
    assert_eq!(request.header(CONTENT_TYPE), Some("application/json"));
}

#[test]
fn default_timeout_is_ten_seconds() {
    let fx = fixture(None, "/");
    let request = fx.client.prepare::<()>(Method::Get, "/health", None, &RequestOptions::default()).unwrap();
    assert_eq!(request.timeout, Duration::from_secs(10));
}

#[test]
fn per_call_timeout_override() {
    let fx = fixture(None, "/");
    let options = RequestOptions::default().with_timeout(Duration::from_secs(2));
    let request = fx.client.prepare::<()>(Method::Get, "/health", None, &options).unwrap();
    assert_eq!(request.timeout, Duration::from_secs(2));
}

#[test]
fn encode_failure_propagates_without_sending() {
    let fx = fixture(None, "/");
    let mut bad = std::collections::HashMap::new();
    bad.insert(vec![1u8], 1);
    let err = block_on(fx.client.send(Method::Post, "/x", Some(&bad), &RequestOptions::default())).unwrap_err();
    assert!(matches!(err, ApiError::Encode(_)));
    assert!(fx.transport.requests().is_empty());
}

// =============================================================
// Incoming interceptor
// =============================================================

#[test]
fn success_passes_through_unchanged() {
    let fx = fixture(Some("abc"), "/dashboard");
    fx.transport.respond(201, r#"{"id":"q1"}"#);
    let resp = block_on(fx.client.send_empty(Method::Post, "/api/questionnaires", &RequestOptions::default())).unwrap();
    assert_eq!(resp, ApiResponse { status: 201, body: r#"{"id":"q1"}"#.to_owned() });
}

#[test]
fn unauthorized_outside_login_clears_session_and_notifies() {
    let fx = fixture(Some("abc"), "/dashboard");
    fx.storage.set_item(USER_KEY, r#"{"username":"ana"}"#);
    fx.client.session().initialize_auth();
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    fx.client.on_unauthorized(move || counter.set(counter.get() + 1));
    fx.transport.respond(401, r#"{"error":"unauthorized, invalid token"}"#);

    let err = block_on(fx.client.send_empty(Method::Get, "/api/questionnaires", &RequestOptions::default())).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "unauthorized, invalid token");
    assert_eq!(fx.storage.get_item(TOKEN_KEY), None);
    assert_eq!(fx.storage.get_item(USER_KEY), None);
    assert!(!fx.client.session().is_authenticated());
    assert_eq!(fired.get(), 1);
}

#[test]
fn unauthorized_on_login_page_is_a_noop() {
    let fx = fixture(Some("abc"), "/login");
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    fx.client.on_unauthorized(move || flag.set(true));
    fx.transport.respond(401, r#"{"error":"invalid credentials"}"#);

    let err = block_on(fx.client.send_empty(Method::Post, "/login", &RequestOptions::default())).unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(fx.storage.get_item(TOKEN_KEY).as_deref(), Some("abc"));
    assert!(fx.client.session().is_authenticated());
    assert!(!fired.get());
}

#[test]
fn repeated_unauthorized_after_redirect_does_not_refire() {
    let fx = fixture(Some("abc"), "/questionnaires");
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    let location = fx.location.clone();
    fx.client.on_unauthorized(move || {
        counter.set(counter.get() + 1);
        location.set("/login");
    });
    fx.transport.respond(401, "");
    fx.transport.respond(401, "");

    let first = block_on(fx.client.send_empty(Method::Get, "/api/questionnaires", &RequestOptions::default()));
    let second = block_on(fx.client.send_empty(Method::Get, "/api/questionnaires", &RequestOptions::default()));

    assert!(first.is_err() && second.is_err());
    assert_eq!(fired.get(), 1);
}

#[test]
fn unauthorized_without_handler_still_logs_out() {
    let fx = fixture(Some("abc"), "/dashboard");
    fx.transport.respond(401, "");
    let _ = block_on(fx.client.send_empty(Method::Get, "/api/questionnaires", &RequestOptions::default()));
    assert!(!fx.client.session().is_authenticated());
}

#[test]
fn other_statuses_pass_through_without_touching_session() {
    let fx = fixture(Some("abc"), "/dashboard");
    fx.transport.respond(403, r#"{"error":"not authorized to invite to this questionnaire"}"#);

    let err = block_on(fx.client.send_empty(Method::Post, "/api/questionnaires/1/invite", &RequestOptions::default()))
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(!err.is_unauthorized());
    assert!(fx.client.session().is_authenticated());
}

#[test]
fn non_json_error_body_is_kept_verbatim() {
    let fx = fixture(None, "/");
    fx.transport.respond(502, "Bad Gateway");
    let err = block_on(fx.client.send_empty(Method::Get, "/health", &RequestOptions::default())).unwrap_err();
    assert_eq!(err.user_message(), "Bad Gateway");
}

#[test]
fn empty_error_body_reports_status() {
    let fx = fixture(None, "/");
    fx.transport.respond(500, "");
    let err = block_on(fx.client.send_empty(Method::Get, "/health", &RequestOptions::default())).unwrap_err();
    assert_eq!(err.to_string(), "request failed with status 500: HTTP 500");
}

#[test]
fn transport_errors_pass_through() {
    let fx = fixture(Some("abc"), "/dashboard");
    fx.transport.fail(TransportError::Timeout(Duration::from_secs(10)));
    let err = block_on(fx.client.send_empty(Method::Get, "/health", &RequestOptions::default())).unwrap_err();
    assert!(matches!(err, ApiError::Transport(TransportError::Timeout(_))));
    assert_eq!(err.to_string(), "request timed out after 10000ms");
    assert!(fx.client.session().is_authenticated());
}

// =============================================================
// ApiResponse
// =============================================================

#[test]
fn response_json_decodes_body() {
    let resp = ApiResponse { status: 200, body: r#"{"available":true}"#.to_owned() };
    let value: serde_json::Value = resp.json().unwrap();
    assert_eq!(value["available"], true);
}

#[test]
fn response_json_reports_decode_error() {
    let resp = ApiResponse { status: 200, body: "not json".to_owned() };
    assert!(matches!(resp.json::<serde_json::Value>(), Err(ApiError::Decode(_))));
}

#[test]
fn method_names() {
    assert_eq!(Method::Get.as_str(), "GET");
    assert_eq!(Method::Post.as_str(), "POST");
    assert_eq!(Method::Put.as_str(), "PUT");
    assert_eq!(Method::Delete.as_str(), "DELETE");
}
