//! Handler tests for team endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockTeamCommand, MockTeamQuery};
use crate::domain::ports::{MockPullRequestCommand, MockReviewQuery};
use crate::inbound::http::test_utils::{in_memory_state, test_app};

fn backend_team() -> Value {
    json!({
        "team_name": "backend",
        "members": [
            {"user_id": "u2", "username": "Bob", "is_active": true},
            {"user_id": "u1", "username": "Alice", "is_active": true}
        ]
    })
}

#[rstest]
#[actix_web::test]
async fn add_team_returns_created_team_sorted_by_user_id() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let req = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(backend_team())
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["team"]["team_name"], "backend");
    assert_eq!(body["team"]["members"][0]["user_id"], "u1");
    assert_eq!(body["team"]["members"][1]["user_id"], "u2");
}

#[rstest]
#[actix_web::test]
async fn duplicate_team_is_team_exists() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let req = actix_test::TestRequest::post()
            .uri("/team/add")
            .set_json(backend_team())
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), expected);
        if expected == StatusCode::BAD_REQUEST {
            let body: Value = actix_test::read_body_json(res).await;
            assert_eq!(body["error"]["code"], "TEAM_EXISTS");
        }
    }
}

#[rstest]
#[case(json!({"team_name": "backend", "members": []}), "members must not be empty")]
#[case(json!({"team_name": "  ", "members": [{"user_id": "u1", "username": "A", "is_active": true}]}), "team_name is required")]
#[case(json!({"team_name": "backend", "members": [{"user_id": "u1", "username": "", "is_active": true}]}), "username is required")]
#[case(json!({"members": [{"user_id": "u1", "username": "A", "is_active": true}]}), "team_name is required")]
#[actix_web::test]
async fn invalid_teams_are_bad_requests(#[case] payload: Value, #[case] message: &str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["message"], message);
}

#[rstest]
#[actix_web::test]
async fn unknown_fields_are_rejected() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(json!({"team_name": "backend", "members": [], "owner": "u1"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[rstest]
#[actix_web::test]
async fn get_team_reports_missing_teams_and_parameters() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/team/get?team_name=ghosts")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let req = actix_test::TestRequest::get().uri("/team/get").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn get_team_returns_members() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/team/add")
        .set_json(backend_team())
        .to_request();
    actix_test::call_service(&app, req).await;

    let req = actix_test::TestRequest::get()
        .uri("/team/get?team_name=backend")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["team_name"], "backend");
    assert_eq!(body["members"].as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut query = MockTeamQuery::new();
    query
        .expect_get_team()
        .returning(|_| Err(Error::internal("team repository error: relation missing")));
    let state = HttpState::new(
        Arc::new(MockTeamCommand::new()),
        Arc::new(query),
        Arc::new(MockPullRequestCommand::new()),
        Arc::new(MockReviewQuery::new()),
    );
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::get()
        .uri("/team/get?team_name=backend")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "INTERNAL");
    assert_eq!(body["error"]["message"], "internal server error");
}
