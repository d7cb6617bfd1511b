//! Tests for user handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockExerciseLogCommand, MockExerciseLogQuery};
use crate::domain::{Error, UserId, Username};
use crate::inbound::http::test_utils::{mock_state, test_app};

fn summary(id: &str, username: &str) -> UserSummary {
    UserSummary {
        id: UserId::new(id).expect("user id"),
        username: Username::new(username).expect("username"),
    }
}

#[actix_web::test]
async fn create_user_accepts_json() {
    let mut commands = MockExerciseLogCommand::new();
    commands
        .expect_create_user()
        .withf(|request| request.username.as_deref() == Some("alice"))
        .times(1)
        .return_once(|_| Ok(summary("a1", "alice")));
    let app = actix_test::init_service(test_app(mock_state(
        commands,
        MockExerciseLogQuery::new(),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": "alice" }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "_id": "a1", "username": "alice" }));
}

#[actix_web::test]
async fn create_user_accepts_form_posts() {
    let mut commands = MockExerciseLogCommand::new();
    commands
        .expect_create_user()
        .withf(|request| request.username.as_deref() == Some("bob smith"))
        .times(1)
        .return_once(|_| Ok(summary("b2", "bob smith")));
    let app = actix_test::init_service(test_app(mock_state(
        commands,
        MockExerciseLogQuery::new(),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload("username=bob+smith")
        .to_request();
    let body: UserResponseBody = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body.id, "b2");
    assert_eq!(body.username, "bob smith");
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "username": "" }))]
#[actix_web::test]
async fn create_user_surfaces_validation_errors(#[case] payload: Value) {
    let mut commands = MockExerciseLogCommand::new();
    commands
        .expect_create_user()
        .times(1)
        .return_once(|_| Err(Error::invalid_request("username required")));
    let app = actix_test::init_service(test_app(mock_state(
        commands,
        MockExerciseLogQuery::new(),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "username required");
}

#[actix_web::test]
async fn list_users_returns_every_user() {
    let mut queries = MockExerciseLogQuery::new();
    queries
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(vec![summary("a1", "alice"), summary("b2", "bob")]));
    let app = actix_test::init_service(test_app(mock_state(
        MockExerciseLogCommand::new(),
        queries,
    )))
    .await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(
        body,
        json!([
            { "_id": "a1", "username": "alice" },
            { "_id": "b2", "username": "bob" }
        ])
    );
}

#[actix_web::test]
async fn list_users_redacts_internal_failures() {
    let mut queries = MockExerciseLogQuery::new();
    queries
        .expect_list_users()
        .times(1)
        .return_once(|| Err(Error::internal("Failed to retrieve users")));
    let app = actix_test::init_service(test_app(mock_state(
        MockExerciseLogCommand::new(),
        queries,
    )))
    .await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[case("application/json", "{\"username\":")]
#[case("application/json", "[1, 2, 3]")]
#[case("application/x-www-form-urlencoded", "username=a&username=b")]
#[actix_web::test]
async fn malformed_bodies_get_json_client_errors(
    #[case] content_type: &str,
    #[case] raw_body: &'static str,
) {
    let app = actix_test::init_service(test_app(mock_state(
        MockExerciseLogCommand::new(),
        MockExerciseLogQuery::new(),
    )))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", content_type.to_owned()))
        .set_payload(raw_body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "request body must be valid JSON or form data");
}
