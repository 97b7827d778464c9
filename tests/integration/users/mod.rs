//! Account endpoint integration tests
//!
//! - POST /user/login
//! - POST /user/register
//! - POST /user/logout
//! - PUT /user/change
//! - GET /user/me

use axum::http::{header::AUTHORIZATION, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::common::{
    assertions::assert_error_body, body_json, body_text, empty_request, json_request, TestApp,
    TestDatabase, TEST_PASSWORD,
};

mod test_login {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_user_and_working_token() {
        let app = TestApp::new();
        app.create_user("alice@example.com", &["ROLE_USER"]);

        let response = app
            .send(json_request(
                Method::POST,
                "/user/login",
                &json!({"email": "alice@example.com", "password": TEST_PASSWORD}),
                None,
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert!(body["user"].get("password_hash").is_none());

        let token = body["token"].as_str().unwrap().to_string();
        assert_eq!(token.split('.').count(), 3);

        let me = app
            .send(empty_request(
                Method::GET,
                "/user/me",
                Some(&format!("Bearer {}", token)),
            ))
            .await;
        assert_eq!(me.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::new();
        app.create_user("alice@example.com", &["ROLE_USER"]);

        let wrong_password = app
            .send(json_request(
                Method::POST,
                "/user/login",
                &json!({"email": "alice@example.com", "password": "nope"}),
                None,
            ))
            .await;
        let unknown_email = app
            .send(json_request(
                Method::POST,
                "/user/login",
                &json!({"email": "ghost@example.com", "password": TEST_PASSWORD}),
                None,
            ))
            .await;

        assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);

        let message = "Username / password incorrect. Please try again";
        assert_error_body(&body_json(wrong_password).await, message, 400);
        assert_error_body(&body_json(unknown_email).await, message, 400);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email() {
        let app = TestApp::new();

        let response = app
            .send(json_request(
                Method::POST,
                "/user/login",
                &json!({"email": "not-an-email", "password": TEST_PASSWORD}),
                None,
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod test_session {
    use super::*;

    #[tokio::test]
    async fn test_logout_requires_token() {
        let app = TestApp::new();
        let response = app
            .send(empty_request(Method::POST, "/user/logout", None))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_acknowledges() {
        let app = TestApp::new();
        app.create_user("alice@example.com", &["ROLE_USER"]);
        let token = app.token_for("alice@example.com").await;

        let response = app
            .send(empty_request(
                Method::POST,
                "/user/logout",
                Some(&format!("Bearer {}", token)),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "User logged out successfully.");
    }

    #[tokio::test]
    async fn test_me_lists_sorted_authorities() {
        let app = TestApp::new();
        app.create_user("alice@example.com", &["ROLE_USER", "ROLE_ADMIN"]);
        let token = app.token_for("alice@example.com").await;

        let response = app
            .send(empty_request(
                Method::GET,
                "/user/me",
                Some(&format!("Bearer {}", token)),
            ))
            .await;

        let body = body_json(response).await;
        assert_eq!(body["authorities"], json!(["ROLE_ADMIN", "ROLE_USER"]));
        assert_eq!(body["user"]["name"], "Test User");
    }
}

mod test_register_validation {
    use super::*;

    #[tokio::test]
    async fn test_register_rejects_long_name_before_touching_database() {
        let app = TestApp::new();

        let response = app
            .send(json_request(
                Method::POST,
                "/user/register",
                &json!({
                    "name": "x".repeat(31),
                    "email": "fern@example.com",
                    "password": "photosynthesis"
                }),
                None,
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_rejects_overlong_profile_image() {
        let app = TestApp::new();

        let response = app
            .send(json_request(
                Method::POST,
                "/user/register",
                &json!({
                    "name": "Fern",
                    "email": "fern@example.com",
                    "password": "photosynthesis",
                    "profile_image": "p".repeat(1025)
                }),
                None,
            ))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_change_requires_token() {
        let app = TestApp::new();

        let response = app
            .send(json_request(
                Method::PUT,
                "/user/change",
                &json!({"name": "New Name"}),
                None,
            ))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

/// Requires a migrated Postgres at TEST_DATABASE_URL
mod test_with_database {
    use super::*;

    const SUFFIX: &str = "@accounts.plantplanet.test";

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_register_login_change_flow() {
        let db = TestDatabase::connect().await.unwrap();
        db.cleanup(SUFFIX).await.unwrap();
        let email = format!("flow{}", SUFFIX);
        let new_email = format!("flow-renamed{}", SUFFIX);

        let register = db
            .router()
            .oneshot(json_request(
                Method::POST,
                "/user/register",
                &json!({"name": "Flow", "email": email, "password": TEST_PASSWORD}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(register.status(), StatusCode::CREATED);
        assert_eq!(body_json(register).await["email"], email.as_str());

        let duplicate = db
            .router()
            .oneshot(json_request(
                Method::POST,
                "/user/register",
                &json!({"name": "Flow", "email": email, "password": TEST_PASSWORD}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        assert_error_body(&body_json(duplicate).await, "Email already registered", 400);

        let login = db
            .router()
            .oneshot(json_request(
                Method::POST,
                "/user/login",
                &json!({"email": email, "password": TEST_PASSWORD}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::OK);
        let token = body_json(login).await["token"].as_str().unwrap().to_string();

        let me = db
            .router()
            .oneshot(empty_request(
                Method::GET,
                "/user/me",
                Some(&format!("Bearer {}", token)),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(me).await["authorities"], json!(["ROLE_USER"]));

        let change = db
            .router()
            .oneshot(json_request(
                Method::PUT,
                "/user/change",
                &json!({"email": new_email}),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(change.status(), StatusCode::OK);
        let header = change
            .headers()
            .get(AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(change).await;
        assert_eq!(header, format!("Bearer {}", body["token"].as_str().unwrap()));
        assert_eq!(body["user"]["email"], new_email.as_str());

        // The old token names the old email, which no longer resolves
        let stale = db
            .router()
            .oneshot(empty_request(
                Method::GET,
                "/user/me",
                Some(&format!("Bearer {}", token)),
            ))
            .await
            .unwrap();
        assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);

        db.cleanup(SUFFIX).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database"]
    async fn test_change_to_taken_email_conflicts() {
        let db = TestDatabase::connect().await.unwrap();
        let taken = format!("taken{}", SUFFIX);
        let mover = format!("mover{}", SUFFIX);
        db.cleanup(SUFFIX).await.unwrap();

        for email in [&taken, &mover] {
            let response = db
                .router()
                .oneshot(json_request(
                    Method::POST,
                    "/user/register",
                    &json!({"name": "Someone", "email": email, "password": TEST_PASSWORD}),
                    None,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let (_, token) = db.state.auth.login(&mover, TEST_PASSWORD).await.unwrap();
        let response = db
            .router()
            .oneshot(json_request(
                Method::PUT,
                "/user/change",
                &json!({"email": taken}),
                Some(&token),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_error_body(
            &body_json(response).await,
            "Email is already in use. Please try another one.",
            409,
        );

        db.cleanup(SUFFIX).await.unwrap();
    }
}
