mod common;

use auth::Claims;
use chrono::Duration;
use common::StubIdentityVerifier;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sign_up_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert!(body["data"].is_null());

    // A pending confirmation code is attached to the stored account
    let code = app.confirmation_code_for("nicola@example.com").await;
    assert_eq!(code.len(), 8);
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let app = TestApp::spawn().await;

    // Create first account
    app.post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Try to sign up with the same email again
    let response = app
        .post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "other_pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));
}

#[tokio::test]
async fn test_sign_up_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/signup")
        .json(&json!({
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_sign_in_unconfirmed_account() {
    let app = TestApp::spawn().await;

    // Create account but never confirm it
    app.post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Correct password, unconfirmed account
    let response = app
        .post("/api/auth/signin")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Account not confirmed");
}

#[tokio::test]
async fn test_sign_in_rejections_are_indistinguishable() {
    let app = TestApp::spawn().await;

    // Registered but unconfirmed account
    app.post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Unknown email
    let unknown_response = app
        .post("/api/auth/signin")
        .json(&json!({
            "email": "nonexistent@example.com",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(unknown_response.status(), StatusCode::UNAUTHORIZED);

    // Wrong password for a registered account. The account is unconfirmed,
    // so a distinguishable reply here would leak which emails exist.
    let wrong_password_response = app
        .post("/api/auth/signin")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "Wrong_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password_response.status(), StatusCode::UNAUTHORIZED);

    // Malformed email, rejected before any lookup
    let malformed_response = app
        .post("/api/auth/signin")
        .json(&json!({
            "email": "not-an-email",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(malformed_response.status(), StatusCode::UNAUTHORIZED);

    let unknown_body: serde_json::Value = unknown_response
        .json()
        .await
        .expect("Failed to parse response");
    let wrong_password_body: serde_json::Value = wrong_password_response
        .json()
        .await
        .expect("Failed to parse response");
    let malformed_body: serde_json::Value = malformed_response
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(unknown_body, wrong_password_body);
    assert_eq!(unknown_body, malformed_body);
    assert_eq!(unknown_body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_full_confirmation_workflow() {
    let app = TestApp::spawn().await;

    // 1. Sign up
    let sign_up_response = app
        .post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(sign_up_response.status(), StatusCode::CREATED);

    // 2. Redeem the confirmation code
    let code = app.confirmation_code_for("nicola@example.com").await;

    let confirm_response = app
        .post("/api/auth/confirm")
        .json(&json!({
            "email": "nicola@example.com",
            "token": code
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(confirm_response.status(), StatusCode::OK);

    let confirm_body: serde_json::Value = confirm_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = confirm_body["data"]["access_token"].as_str().unwrap();

    let claims: Claims = app
        .jwt_handler
        .decode(token)
        .expect("Failed to decode issued token");
    assert_eq!(claims.email, "nicola@example.com");

    // 3. The code is single use
    let replay_response = app
        .post("/api/auth/confirm")
        .json(&json!({
            "email": "nicola@example.com",
            "token": code
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(replay_response.status(), StatusCode::UNAUTHORIZED);

    // 4. Password sign-in now succeeds
    let sign_in_response = app
        .post("/api/auth/signin")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(sign_in_response.status(), StatusCode::OK);

    let sign_in_body: serde_json::Value = sign_in_response
        .json()
        .await
        .expect("Failed to parse response");
    assert!(sign_in_body["data"]["access_token"].is_string());
}

#[tokio::test]
async fn test_confirm_account_wrong_code() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/confirm")
        .json(&json!({
            "email": "nicola@example.com",
            "token": "deadbeef"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid confirmation token");
}

#[tokio::test]
async fn test_get_current_user() {
    let app = TestApp::spawn().await;

    // Sign up and confirm
    app.post("/api/auth/signup")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let code = app.confirmation_code_for("nicola@example.com").await;

    app.post("/api/auth/confirm")
        .json(&json!({
            "email": "nicola@example.com",
            "token": code
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Sign in to get a token
    let sign_in_response = app
        .post("/api/auth/signin")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let sign_in_body: serde_json::Value = sign_in_response
        .json()
        .await
        .expect("Failed to parse response");
    let token = sign_in_body["data"]["access_token"].as_str().unwrap();

    // Access the protected endpoint
    let response = app
        .get_authenticated("/api/auth/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "nicola@example.com");
}

#[tokio::test]
async fn test_get_current_user_rejects_bad_tokens() {
    let app = TestApp::spawn().await;

    // No Authorization header
    let missing_response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(missing_response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let garbage_response = app
        .get_authenticated("/api/auth/me", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(garbage_response.status(), StatusCode::UNAUTHORIZED);

    // Expired token signed with the right secret
    let expired_claims = Claims::for_email("nicola@example.com", Duration::seconds(-60));
    let expired_token = app
        .jwt_handler
        .encode(&expired_claims)
        .expect("Failed to encode token");

    let expired_response = app
        .get_authenticated("/api/auth/me", &expired_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(expired_response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_sign_in_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/signin/google")
        .json(&json!({
            "code": "authorization-code-from-redirect"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["access_token"].as_str().unwrap();

    let claims: Claims = app
        .jwt_handler
        .decode(token)
        .expect("Failed to decode issued token");
    assert_eq!(claims.email, "federated@example.com");

    // The token works against protected routes without any local account
    let me_response = app
        .get_authenticated("/api/auth/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(me_response.status(), StatusCode::OK);

    let me_body: serde_json::Value = me_response
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(me_body["data"]["email"], "federated@example.com");
}

#[tokio::test]
async fn test_google_sign_in_failure() {
    let app =
        TestApp::spawn_with_verifier(StubIdentityVerifier::failing("provider rejected the code"))
            .await;

    let response = app
        .post("/api/auth/signin/google")
        .json(&json!({
            "code": "authorization-code-from-redirect"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Federated authentication failed"));
}
