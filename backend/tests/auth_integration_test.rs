//! Integration tests for authentication and profile endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let email = format!("register_test_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "email": email,
        "password": "SecurePassword123!"
    });

    let (status, response) = app.post("/api/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["access_token"].as_str().unwrap().is_empty());
    assert!(!response["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email_conflicts() {
    let app = common::TestApp::new().await;

    let email = format!("duplicate_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "email": email,
        "password": "SecurePassword123!"
    });

    let (status, _) = app.post("/api/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_invalid_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": "not-an-email",
        "password": "SecurePassword123!"
    });

    let (status, _) = app.post("/api/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_weak_password() {
    let app = common::TestApp::new().await;

    let email = format!("weak_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "email": email,
        "password": "123"
    });

    let (status, _) = app.post("/api/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_form_success() {
    let app = common::TestApp::new().await;

    let email = format!("login_test_{}@example.com", uuid::Uuid::new_v4());
    app.register_user(&email).await;

    let form = format!(
        "email={}&password=SecurePassword123!",
        email.replace('@', "%40")
    );
    let (status, response) = app.post_form("/api/auth/login", &form).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password_is_uniform() {
    let app = common::TestApp::new().await;

    let email = format!("wrong_pass_{}@example.com", uuid::Uuid::new_v4());
    app.register_user(&email).await;

    let wrong = format!("email={}&password=WrongPassword1!", email.replace('@', "%40"));
    let (status, body_known) = app.post_form("/api/auth/login", &wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown email must produce the same message as a wrong password.
    let unknown = "email=nobody%40example.com&password=WrongPassword1!";
    let (status, body_unknown) = app.post_form("/api/auth/login", unknown).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body_known, body_unknown);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_me_requires_token() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_me_returns_profile() {
    let app = common::TestApp::new().await;

    let email = format!("me_{}@example.com", uuid::Uuid::new_v4());
    let token = app.register_user(&email).await;

    let (status, response) = app.get_authed("/api/auth/me", &token).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["email"], email.as_str());
    assert_eq!(response["is_admin"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_update_recalculates_metrics() {
    let app = common::TestApp::new().await;

    let email = format!("metrics_{}@example.com", uuid::Uuid::new_v4());
    let token = app.register_user(&email).await;

    let body = json!({
        "age": 30,
        "gender": "male",
        "height_cm": 180.0,
        "weight_kg": 80.0,
        "activity_level": "moderate",
        "goal": "maintain"
    });
    let (status, response) = app
        .put_authed("/api/users/profile", &body.to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["bmr"], 1805.0);
    assert_eq!(response["tdee"], 2797.75);
    assert_eq!(response["target_calories"], 2797.75);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_empty_update_leaves_metrics_unchanged() {
    let app = common::TestApp::new().await;

    let email = format!("idempotent_{}@example.com", uuid::Uuid::new_v4());
    let token = app.register_user(&email).await;

    let body = json!({
        "age": 30,
        "gender": "male",
        "height_cm": 180.0,
        "weight_kg": 80.0,
        "activity_level": "moderate",
        "goal": "maintain"
    });
    app.put_authed("/api/users/profile", &body.to_string(), &token)
        .await;

    // An empty change set must not disturb the derived metrics.
    let (status, response) = app.put_authed("/api/users/profile", "{}", &token).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["bmr"], 1805.0);
    assert_eq!(response["tdee"], 2797.75);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_stats_endpoint() {
    let app = common::TestApp::new().await;

    let email = format!("stats_{}@example.com", uuid::Uuid::new_v4());
    let token = app.register_user(&email).await;

    let body = json!({
        "age": 30,
        "gender": "male",
        "height_cm": 180.0,
        "weight_kg": 80.0,
        "activity_level": "moderate",
        "goal": "lose_weight"
    });
    app.put_authed("/api/users/profile", &body.to_string(), &token)
        .await;

    let (status, response) = app.get_authed("/api/users/stats", &token).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["target_calories"], 2297.75);
    assert!(response["bmi"].as_f64().unwrap() > 0.0);
    assert!(response["macros"]["protein_g"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_deactivated_account_is_rejected() {
    let app = common::TestApp::new().await;

    let email = format!("deactivate_{}@example.com", uuid::Uuid::new_v4());
    let token = app.register_user(&email).await;

    let (status, _) = app.delete_authed("/api/users/profile", &token).await;
    assert_eq!(status, StatusCode::OK);

    // The still-valid token no longer grants access.
    let (status, _) = app.get_authed("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_change_password_flow() {
    let app = common::TestApp::new().await;

    let email = format!("chpass_{}@example.com", uuid::Uuid::new_v4());
    let token = app.register_user(&email).await;

    let body = json!({
        "current_password": "SecurePassword123!",
        "new_password": "EvenMoreSecure456!"
    });
    let (status, _) = app
        .post_authed("/api/auth/change-password", &body.to_string(), &token)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer works, new one does.
    let old = format!("email={}&password=SecurePassword123!", email.replace('@', "%40"));
    let (status, _) = app.post_form("/api/auth/login", &old).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let new = format!("email={}&password=EvenMoreSecure456!", email.replace('@', "%40"));
    let (status, _) = app.post_form("/api/auth/login", &new).await;
    assert_eq!(status, StatusCode::OK);
}
