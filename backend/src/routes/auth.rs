//! Authentication routes

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use fitcoach_shared::types::{
    AuthTokens, ChangePasswordRequest, LoginForm, RefreshTokenRequest, RegisterRequest,
    UserResponse,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .route("/change-password", post(change_password))
}

/// POST /api/auth/register - create an account
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthTokens>)> {
    let tokens = UserService::register(
        state.db(),
        state.jwt(),
        &req.email,
        &req.password,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(tokens)))
}

/// POST /api/auth/login - form-encoded credentials to a token pair
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::login(state.db(), state.jwt(), &form.email, &form.password).await?;
    Ok(Json(tokens))
}

/// POST /api/auth/refresh - exchange a refresh token
async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthTokens>> {
    let tokens = UserService::refresh(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(tokens))
}

/// GET /api/auth/me - the authenticated user
async fn me(CurrentUser(user): CurrentUser) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserService::to_response(user)?))
}

/// POST /api/auth/change-password
async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    UserService::change_password(state.db(), &user, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(serde_json::json!({
        "message": "Password changed successfully"
    })))
}
