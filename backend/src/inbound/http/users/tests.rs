//! Tests for user registry HTTP handlers.

use super::*;
use crate::domain::ports::{MockUserRegistry, UserRegistry};
use crate::outbound::memory::InMemoryUserRegistry;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

const ALICE_ID: &str = "9d225408-6a94-49e7-8e04-69ff654e0ff4";

#[fixture]
fn alice() -> User {
    User::new(
        Uuid::parse_str(ALICE_ID).expect("valid uuid"),
        "Alice",
        "test1@example.com",
        "1999-12-31",
    )
}

fn test_app(
    registry: Arc<dyn UserRegistry>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(registry)))
        .configure(configure_user_routes)
}

async fn send(
    registry: Arc<dyn UserRegistry>,
    request: actix_test::TestRequest,
) -> (StatusCode, String) {
    let app = actix_test::init_service(test_app(registry)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, String::from_utf8(body.to_vec()).expect("utf8 body"))
}

fn post_user(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post().uri("/user").set_json(body)
}

#[rstest]
#[case("/user")]
#[case("/user/")]
#[actix_web::test]
async fn get_without_email_is_malformed(#[case] uri: &str) {
    let mut registry = MockUserRegistry::new();
    registry.expect_get_user().never();

    let (status, body) = send(Arc::new(registry), actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "malformed URI");
}

#[rstest]
#[actix_web::test]
async fn get_unknown_email_is_not_found() {
    let registry = Arc::new(InMemoryUserRegistry::new());

    let (status, body) = send(
        registry,
        actix_test::TestRequest::get().uri("/user/nobody@example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "user not found");
}

#[rstest]
#[actix_web::test]
async fn get_known_email_returns_json(alice: User) {
    let registry = Arc::new(InMemoryUserRegistry::with_users([alice]));
    let app = actix_test::init_service(test_app(registry)).await;

    let request = actix_test::TestRequest::get()
        .uri("/user/test1@example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .expect("content type");
    assert_eq!(content_type, "application/json");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "ID": ALICE_ID,
            "Name": "Alice",
            "Email": "test1@example.com",
            "Birthday": "1999-12-31",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn get_decodes_percent_encoded_email(alice: User) {
    let registry = Arc::new(InMemoryUserRegistry::with_users([alice]));

    let (status, body) = send(
        registry,
        actix_test::TestRequest::get().uri("/user/test1%40example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).expect("json body");
    assert_eq!(body["Email"], "test1@example.com");
    assert_eq!(body["ID"], ALICE_ID);
}

#[rstest]
#[actix_web::test]
async fn get_uses_second_segment_only() {
    let mut registry = MockUserRegistry::new();
    registry.expect_get_user().times(1).returning(|email| {
        assert_eq!(email, "test1@example.com");
        Err(UserRegistryError::not_found())
    });

    let (status, _) = send(
        Arc::new(registry),
        actix_test::TestRequest::get().uri("/user/test1@example.com/extra"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(UserRegistryError::storage("database error"), "storage error: database error")]
#[case(
    UserRegistryError::cancelled("deadline exceeded"),
    "operation cancelled: deadline exceeded"
)]
#[actix_web::test]
async fn get_failures_are_internal(#[case] failure: UserRegistryError, #[case] expected: &str) {
    let mut registry = MockUserRegistry::new();
    registry
        .expect_get_user()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let (status, body) = send(
        Arc::new(registry),
        actix_test::TestRequest::get().uri("/user/test1@example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);
}

#[rstest]
#[actix_web::test]
async fn post_valid_user_is_created(alice: User) {
    let registry = Arc::new(InMemoryUserRegistry::new());

    let (status, body) = send(
        registry.clone(),
        post_user(serde_json::to_value(&alice).expect("user json")),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert!(registry.contains_email("test1@example.com"));
    let stored = registry.get_user("test1@example.com").await.expect("stored");
    assert_eq!(stored, alice);
}

#[rstest]
#[actix_web::test]
async fn post_malformed_birthday_is_rejected() {
    let mut registry = MockUserRegistry::new();
    registry.expect_create_user().never();

    let (status, body) = send(
        Arc::new(registry),
        post_user(json!({
            "ID": ALICE_ID,
            "Name": "Alice",
            "Email": "test1@example.com",
            "Birthday": "31/12/1999",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "user malformed birthday");
}

#[rstest]
#[case("{not json")]
#[case(r#"{"ID":"not-a-uuid","Name":"A","Email":"a@example.com","Birthday":"1999-12-31"}"#)]
#[case(r#"{"ID":"9d225408-6a94-49e7-8e04-69ff654e0ff4","Name":"A"}"#)]
#[actix_web::test]
async fn post_unparseable_body_is_rejected(#[case] payload: &'static str) {
    let mut registry = MockUserRegistry::new();
    registry.expect_create_user().never();

    let (status, body) = send(
        Arc::new(registry),
        actix_test::TestRequest::post()
            .uri("/user")
            .insert_header(header::ContentType::json())
            .set_payload(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.is_empty());
}

#[rstest]
#[case(json!({"id": ALICE_ID, "name": "Alice", "email": "test1@example.com", "birthday": "1999-12-31"}))]
#[case(json!({"ID": ALICE_ID, "Email": "test1@example.com", "Birthday": "1999-12-31"}))]
#[actix_web::test]
async fn post_accepts_lenient_payloads(#[case] payload: Value) {
    let registry = Arc::new(InMemoryUserRegistry::new());

    let (status, body) = send(registry.clone(), post_user(payload.clone())).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    let stored = registry.get_user("test1@example.com").await.expect("stored");
    assert_eq!(stored.id().to_string(), ALICE_ID);
    assert_eq!(stored.name(), payload.get("name").and_then(Value::as_str).unwrap_or(""));
}

#[rstest]
#[actix_web::test]
async fn post_duplicate_email_conflicts(alice: User) {
    let registry = Arc::new(InMemoryUserRegistry::with_users([alice]));

    let (status, body) = send(
        registry.clone(),
        post_user(json!({
            "ID": Uuid::new_v4(),
            "Name": "Mallory",
            "Email": "test1@example.com",
            "Birthday": "2000-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "user email already exists");
    assert_eq!(registry.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn post_duplicate_id_conflicts(alice: User) {
    let registry = Arc::new(InMemoryUserRegistry::with_users([alice]));

    let (status, body) = send(
        registry,
        post_user(json!({
            "ID": ALICE_ID,
            "Name": "Bob",
            "Email": "test2@example.com",
            "Birthday": "2000-01-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "user UUID already exists");
}

#[rstest]
#[case(
    UserRegistryError::malformed_input("birthday out of range"),
    StatusCode::BAD_REQUEST
)]
#[case(UserRegistryError::conflict("users_name_key"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(UserRegistryError::storage("database error"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    UserRegistryError::cancelled("deadline exceeded"),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[actix_web::test]
async fn post_registry_failures_map_to_status(
    alice: User,
    #[case] failure: UserRegistryError,
    #[case] expected: StatusCode,
) {
    let message = failure.to_string();
    let mut registry = MockUserRegistry::new();
    registry
        .expect_create_user()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let (status, body) = send(
        Arc::new(registry),
        post_user(serde_json::to_value(&alice).expect("user json")),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(body, message);
}

#[rstest]
#[case(UserRegistryError::not_found(), StatusCode::NOT_FOUND)]
#[case(UserRegistryError::email_already_exists(), StatusCode::CONFLICT)]
#[case(UserRegistryError::id_already_exists(), StatusCode::CONFLICT)]
#[case(UserRegistryError::malformed_input("bad"), StatusCode::BAD_REQUEST)]
#[case(UserRegistryError::conflict("other"), StatusCode::INTERNAL_SERVER_ERROR)]
fn registry_errors_map_to_status(#[case] failure: UserRegistryError, #[case] expected: StatusCode) {
    let message = failure.to_string();
    let mapped = map_registry_error(failure);

    assert_eq!(actix_web::ResponseError::status_code(&mapped), expected);
    assert_eq!(mapped.message(), message);
}

#[rstest]
#[case(Some("a@example.com"), Some("a@example.com"))]
#[case(Some("a@example.com/"), Some("a@example.com"))]
#[case(Some("a/b"), Some("a"))]
#[case(Some("/a"), Some(""))]
#[case(Some("//"), None)]
#[case(Some(""), None)]
#[case(None, None)]
fn email_comes_from_first_tail_segment(
    #[case] tail: Option<&str>,
    #[case] expected: Option<&str>,
) {
    assert_eq!(email_from_tail(tail), expected);
}
