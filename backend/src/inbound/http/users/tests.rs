//! Handler tests for account management routes.

use super::*;
use crate::domain::ports::{MockAccountsService, MockAuthService};
use crate::domain::{AccountId, DeletedAccount, Error, Role};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::test_utils::{auth_accepting, session_cookie, state_with, view_for};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app(
    auth: MockAuthService,
    accounts: MockAccountsService,
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
        .app_data(state_with(auth, accounts))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(list_users)
                .service(get_user)
                .service(put_user)
                .service(patch_user)
                .service(delete_user),
        )
}

fn id(raw: i32) -> AccountId {
    AccountId::new(raw).expect("positive id")
}

#[rstest]
#[actix_web::test]
async fn list_requires_session() {
    let app = actix_test::init_service(test_app(
        MockAuthService::new(),
        MockAccountsService::new(),
    ))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("error"), Some(&json!("Authentication required")));
    assert_eq!(body.get("message"), Some(&json!("No token provided")));
}

#[rstest]
#[actix_web::test]
async fn list_returns_users_with_count() {
    let mut accounts = MockAccountsService::new();
    accounts
        .expect_list()
        .withf(|actor| actor.id == id(1))
        .times(1)
        .returning(|_| Ok(vec![view_for(1, Role::User), view_for(2, Role::Admin)]));
    let app = actix_test::init_service(test_app(auth_accepting(1, Role::User), accounts)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/users")
        .cookie(session_cookie())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message"),
        Some(&json!("Successfully retrieved all users"))
    );
    assert_eq!(body.get("count"), Some(&json!(2)));
    assert_eq!(body.pointer("/users/1/email"), Some(&json!("user2@example.com")));
}

#[rstest]
#[actix_web::test]
async fn get_returns_single_user() {
    let mut accounts = MockAccountsService::new();
    accounts
        .expect_get()
        .withf(|_, target| *target == id(5))
        .returning(|_, _| Ok(view_for(5, Role::User)));
    let app = actix_test::init_service(test_app(auth_accepting(1, Role::User), accounts)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/users/5")
        .cookie(session_cookie())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("User retrieved successfully")));
    assert_eq!(body.pointer("/user/id"), Some(&json!(5)));
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-1")]
#[actix_web::test]
async fn invalid_ids_never_reach_the_service(#[case] raw: &str) {
    let app = actix_test::init_service(test_app(
        auth_accepting(1, Role::Admin),
        MockAccountsService::new(),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{raw}"))
        .cookie(session_cookie())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("id must be a positive integer")));
}

#[rstest]
#[actix_web::test]
async fn missing_user_is_not_found() {
    let mut accounts = MockAccountsService::new();
    accounts
        .expect_get()
        .returning(|_, _| Err(Error::not_found("User not found")));
    let app = actix_test::init_service(test_app(auth_accepting(1, Role::User), accounts)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/users/77")
        .cookie(session_cookie())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(actix_test::TestRequest::put())]
#[case(actix_test::TestRequest::patch())]
#[actix_web::test]
async fn update_passes_validated_fields(#[case] request: actix_test::TestRequest) {
    let mut accounts = MockAccountsService::new();
    accounts
        .expect_update()
        .withf(|actor, target, update| {
            actor.id == id(3)
                && *target == id(3)
                && update.name.as_ref().map(ToString::to_string).as_deref() == Some("Annie")
                && update.role == Some(Role::Admin)
        })
        .times(1)
        .returning(|_, _, _| Ok(view_for(3, Role::User)));
    let app = actix_test::init_service(test_app(auth_accepting(3, Role::User), accounts)).await;

    let request = request
        .uri("/api/users/3")
        .cookie(session_cookie())
        .set_json(json!({ "name": "  Annie ", "role": "admin" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("User updated successfully")));
}

#[rstest]
#[actix_web::test]
async fn empty_update_is_rejected() {
    let app = actix_test::init_service(test_app(
        auth_accepting(3, Role::User),
        MockAccountsService::new(),
    ))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/users/3")
        .cookie(session_cookie())
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message"),
        Some(&json!("at least one field must be provided for update"))
    );
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "name": "A" }))]
#[case(json!({ "email": "bad" }))]
#[case(json!({ "name": 5 }))]
#[case(json!({ "name": "Mallory" }))]
#[actix_web::test]
async fn update_of_another_account_is_forbidden_whatever_the_body(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(
        auth_accepting(3, Role::User),
        MockAccountsService::new(),
    ))
    .await;

    let request = actix_test::TestRequest::put()
        .uri("/api/users/4")
        .cookie(session_cookie())
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code"), Some(&json!("forbidden")));
    assert_eq!(body.get("error"), Some(&json!("Access denied")));
}

#[rstest]
#[actix_web::test]
async fn malformed_body_on_own_account_is_a_validation_error() {
    let app = actix_test::init_service(test_app(
        auth_accepting(3, Role::User),
        MockAccountsService::new(),
    ))
    .await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/users/3")
        .cookie(session_cookie())
        .set_json(json!({ "name": 5 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code"), Some(&json!("invalid_request")));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_minimal_view() {
    let mut accounts = MockAccountsService::new();
    accounts
        .expect_delete()
        .withf(|actor, target| actor.id == id(3) && *target == id(3))
        .returning(|_, _| {
            Ok(DeletedAccount {
                id: 3,
                name: "User 3".to_owned(),
                email: "user3@example.com".to_owned(),
            })
        });
    let app = actix_test::init_service(test_app(auth_accepting(3, Role::User), accounts)).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/users/3")
        .cookie(session_cookie())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "message": "User deleted successfully",
            "user": { "id": 3, "name": "User 3", "email": "user3@example.com" },
        })
    );
}
