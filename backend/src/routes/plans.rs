//! Plan routes
//!
//! All plan endpoints operate on the authenticated user's own plans.

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fitcoach_shared::types::{
    CreatePlanRequest, GeneratePlanRequest, PageQuery, PlanResponse, UpdatePlanRequest,
};
use uuid::Uuid;

/// Create plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/generate", post(generate_plan))
        .route("/current/active", get(active_plans))
        .route("/:id", get(get_plan).put(update_plan).delete(delete_plan))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Validation("Invalid plan ID".to_string()))
}

/// GET /api/plans - the user's plans
async fn list_plans(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<PlanResponse>>> {
    Ok(Json(PlanService::list(state.db(), user.id, page).await?))
}

/// GET /api/plans/:id
async fn get_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<PlanResponse>> {
    Ok(Json(
        PlanService::get(state.db(), user.id, parse_id(&id)?).await?,
    ))
}

/// POST /api/plans/generate - rule-based generation from the profile
async fn generate_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<GeneratePlanRequest>,
) -> ApiResult<(StatusCode, Json<PlanResponse>)> {
    let plan = PlanService::generate(state.db(), &user, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// POST /api/plans - create from a user-supplied payload
async fn create_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<PlanResponse>)> {
    let plan = PlanService::create(state.db(), user.id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// PUT /api/plans/:id
async fn update_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePlanRequest>,
) -> ApiResult<Json<PlanResponse>> {
    Ok(Json(
        PlanService::update(state.db(), user.id, parse_id(&id)?, req).await?,
    ))
}

/// DELETE /api/plans/:id - soft delete
async fn delete_plan(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    PlanService::delete(state.db(), user.id, parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({
        "message": "Plan deleted successfully"
    })))
}

/// GET /api/plans/current/active - plans with active status
async fn active_plans(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<PlanResponse>>> {
    Ok(Json(PlanService::list_active(state.db(), user.id).await?))
}
