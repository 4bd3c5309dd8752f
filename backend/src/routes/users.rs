//! User profile routes

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use fitcoach_shared::types::{UpdateProfileRequest, UserResponse, UserStatsResponse};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(get_profile).put(update_profile).delete(delete_account),
        )
        .route("/stats", get(get_stats))
}

/// GET /api/users/profile
async fn get_profile(CurrentUser(user): CurrentUser) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserService::to_response(user)?))
}

/// PUT /api/users/profile - partial update, recalculates derived metrics
/// when physical or goal fields change
async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let updated = UserService::update_profile(state.db(), user.id, req).await?;
    Ok(Json(updated))
}

/// DELETE /api/users/profile - soft-deactivate the account
async fn delete_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<serde_json::Value>> {
    UserService::deactivate(state.db(), user.id).await?;
    Ok(Json(serde_json::json!({
        "message": "Account deactivated successfully"
    })))
}

/// GET /api/users/stats - derived metrics summary
async fn get_stats(CurrentUser(user): CurrentUser) -> ApiResult<Json<UserStatsResponse>> {
    Ok(Json(UserService::stats(&user)?))
}
