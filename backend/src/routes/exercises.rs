//! Exercise catalog routes
//!
//! Reads are public; mutations require an admin account.

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fitcoach_shared::types::{
    CreateExerciseRequest, ExerciseListQuery, ExerciseResponse, SearchQuery,
    UpdateExerciseRequest,
};
use uuid::Uuid;

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route(
            "/:id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
        .route("/search/:query", get(search_exercises))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Validation("Invalid exercise ID".to_string()))
}

/// GET /api/exercises - filtered list
async fn list_exercises(
    State(state): State<AppState>,
    Query(query): Query<ExerciseListQuery>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    Ok(Json(ExerciseService::list(state.db(), query).await?))
}

/// GET /api/exercises/:id
async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ExerciseResponse>> {
    Ok(Json(ExerciseService::get(state.db(), parse_id(&id)?).await?))
}

/// POST /api/exercises - admin only
async fn create_exercise(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateExerciseRequest>,
) -> ApiResult<(StatusCode, Json<ExerciseResponse>)> {
    let exercise = ExerciseService::create(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// PUT /api/exercises/:id - admin only
async fn update_exercise(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateExerciseRequest>,
) -> ApiResult<Json<ExerciseResponse>> {
    Ok(Json(
        ExerciseService::update(state.db(), parse_id(&id)?, req).await?,
    ))
}

/// DELETE /api/exercises/:id - admin only, soft delete
async fn delete_exercise(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    ExerciseService::delete(state.db(), parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({
        "message": "Exercise deleted successfully"
    })))
}

/// GET /api/exercises/search/:query - substring search
async fn search_exercises(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ExerciseResponse>>> {
    Ok(Json(
        ExerciseService::search(state.db(), &query, params.limit).await?,
    ))
}
