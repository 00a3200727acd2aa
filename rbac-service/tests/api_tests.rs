mod common;

use chrono::Utc;
use common::TestApp;
use rbac_service::domain::token::models::NewToken;
use rbac_service::domain::token::ports::TokenRepository;
use rbac_service::domain::user::models::UserId;
use rbac_service::domain::user::ports::UserRepository;
use reqwest::StatusCode;

const PASSWORD: &str = "passw0rd!";

async fn live_token_count(app: &TestApp, user_id: i64) -> usize {
    app.tokens
        .find_live_by_user(&UserId(user_id))
        .await
        .unwrap()
        .len()
}

/// Flip one character in the middle of the signature segment.
fn tamper_signature(token: &str) -> String {
    let signature_start = token.rfind('.').unwrap() + 1;
    let index = signature_start + (token.len() - signature_start) / 2;
    let original = token.as_bytes()[index];
    let replacement = if original == b'A' { 'B' } else { 'A' };

    let mut tampered = token.to_string();
    tampered.replace_range(index..index + 1, &replacement.to_string());
    tampered
}

#[tokio::test]
async fn test_register_login_and_access() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "a@x.io", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        serde_json::json!({
            "id": 1,
            "username": "alice",
            "email": "a@x.io",
            "roles": ["USER"]
        })
    );

    let response = app.login("a@x.io", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.starts_with("Authentication successful for email: a@x.io\nJWT Token: "));
    let token = text.rsplit("JWT Token: ").next().unwrap().to_string();
    assert_eq!(token.split('.').count(), 3);

    let response = app
        .get_authenticated("/api/v1/user", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "GET:: user controller");

    let response = app
        .get_authenticated("/api/v1/admin", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let response = app.register("bob", "b@x.io", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.register("bobby", "b@x.io", "other-password").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["data"]["message"], "Email already exists!");
    assert_eq!(app.users.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_stores_hash_and_issues_token() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;

    let user = app.users.find_by_email("a@x.io").await.unwrap().unwrap();
    assert_ne!(user.password_hash, PASSWORD);
    assert!(user.password_hash.starts_with("$argon2"));
    assert_eq!(live_token_count(&app, user.id.0).await, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "not-an-email", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));

    let response = app.register("alice", "a@x.io", "short").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.register("a", "a@x.io", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.users.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;

    for (email, password) in [("a@x.io", "wrong-password"), ("nobody@x.io", PASSWORD)] {
        let response = app.login(email, password).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["data"]["message"], "Invalid email or password!");
    }
}

#[tokio::test]
async fn test_login_revokes_prior_token() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;

    let first = app.login_token("a@x.io", PASSWORD).await;
    let second = app.login_token("a@x.io", PASSWORD).await;
    assert_ne!(first, second);
    assert_eq!(live_token_count(&app, 1).await, 1);

    let response = app
        .get_authenticated("/api/v1/user", &first)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated("/api/v1/user", &second)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_revokes_token_and_is_idempotent() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;
    let token = app.login_token("a@x.io", PASSWORD).await;

    let response = app
        .post_authenticated("/api/v1/public/logout", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().is_empty());

    let response = app
        .get_authenticated("/api/v1/user", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let before = app.tokens.find_by_token(&token).await.unwrap();
    let response = app
        .post_authenticated("/api/v1/public/logout", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.tokens.find_by_token(&token).await.unwrap(), before);
    assert_eq!(live_token_count(&app, 1).await, 0);
}

#[tokio::test]
async fn test_logout_without_credentials_is_noop() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;
    let token = app.login_token("a@x.io", PASSWORD).await;

    let responses = [
        app.post("/api/v1/public/logout").send().await.unwrap(),
        app.post("/api/v1/public/logout")
            .header("Authorization", format!("Basic {}", token))
            .send()
            .await
            .unwrap(),
        app.post_authenticated("/api/v1/public/logout", "unknown.token.value")
            .send()
            .await
            .unwrap(),
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(live_token_count(&app, 1).await, 1);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;
    let token = app.login_token("a@x.io", PASSWORD).await;

    let tampered = tamper_signature(&token);
    assert_ne!(tampered, token);

    let response = app
        .get_authenticated("/api/v1/user", &tampered)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_registered_token_rejected() {
    let app = TestApp::spawn().await;
    app.register("alice", "a@x.io", PASSWORD).await;

    let expired = app
        .jwt_handler
        .mint_at("a@x.io", Utc::now().timestamp() - 7200)
        .unwrap();
    app.tokens
        .insert(NewToken::bearer(expired.clone(), UserId(1)))
        .await
        .unwrap();

    let response = app
        .get_authenticated("/api/v1/user", &expired)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_matrix() {
    let app = TestApp::spawn().await;

    let response = app
        .register_with_roles("root", "admin@x.io", PASSWORD, &["ADMIN"])
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let admin = app.login_token("admin@x.io", PASSWORD).await;

    for (path, area) in [
        ("/api/v1/admin", "admin"),
        ("/api/v1/moderator", "moderator"),
        ("/api/v1/user", "user"),
    ] {
        let response = app.get_authenticated(path, &admin).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        assert_eq!(
            response.text().await.unwrap(),
            format!("GET:: {} controller", area)
        );
    }

    app.register("carol", "c@x.io", PASSWORD).await;
    let user = app.login_token("c@x.io", PASSWORD).await;

    for (path, expected) in [
        ("/api/v1/admin", StatusCode::FORBIDDEN),
        ("/api/v1/moderator", StatusCode::FORBIDDEN),
        ("/api/v1/user", StatusCode::OK),
    ] {
        let response = app.get_authenticated(path, &user).send().await.unwrap();
        assert_eq!(response.status(), expected, "{}", path);
    }
}

#[tokio::test]
async fn test_stub_methods() {
    let app = TestApp::spawn().await;
    app.register_with_roles("mod", "m@x.io", PASSWORD, &["MODERATOR"])
        .await;
    let token = app.login_token("m@x.io", PASSWORD).await;

    let response = app
        .api_client
        .delete(format!("{}/api/v1/moderator", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "DELETE:: moderator controller");

    let response = app
        .api_client
        .put(format!("{}/api/v1/user", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "PUT:: user controller");
}

#[tokio::test]
async fn test_protected_routes_require_authentication() {
    let app = TestApp::spawn().await;

    for path in ["/api/v1/admin", "/api/v1/moderator", "/api/v1/user"] {
        let response = app.get(path).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status_code"], 401);
    }

    let response = app.get("/api/v1/unmapped").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_lists_users_without_hashes() {
    let app = TestApp::spawn().await;
    app.register_with_roles("root", "admin@x.io", PASSWORD, &["ADMIN"])
        .await;
    app.register("carol", "c@x.io", PASSWORD).await;
    let admin = app.login_token("admin@x.io", PASSWORD).await;

    let response = app
        .get_authenticated("/api/v1/admin/users", &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "admin@x.io");
    assert_eq!(users[0]["roles"], serde_json::json!(["ADMIN"]));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let user = app.login_token("c@x.io", PASSWORD).await;
    let response = app
        .get_authenticated("/api/v1/admin/users", &user)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_malformed_body_returns_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/public/register")
        .json(&serde_json::json!({
            "username": "alice",
            "email": "a@x.io",
            "password": PASSWORD,
            "roles": "ADMIN"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());

    let response = app
        .post("/api/v1/public/register")
        .body(r#"{"username":"alice","email":"a@x.io","password":"passw0rd!"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 400);

    assert!(app.users.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_rejects_display_name_email() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "Alice <a@x.io>", PASSWORD).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.users.list_all().await.unwrap().is_empty());
}
