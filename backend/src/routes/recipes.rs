//! Recipe catalog routes
//!
//! Reads are public; mutations require an admin account.

use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::services::RecipeService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use fitcoach_shared::types::{
    CreateRecipeRequest, RecipeListQuery, RecipeResponse, SearchQuery, UpdateRecipeRequest,
};
use uuid::Uuid;

/// Create recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/search/:query", get(search_recipes))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Validation("Invalid recipe ID".to_string()))
}

/// GET /api/recipes - filtered list
async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    Ok(Json(RecipeService::list(state.db(), query).await?))
}

/// GET /api/recipes/:id
async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecipeResponse>> {
    Ok(Json(RecipeService::get(state.db(), parse_id(&id)?).await?))
}

/// POST /api/recipes - admin only
async fn create_recipe(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateRecipeRequest>,
) -> ApiResult<(StatusCode, Json<RecipeResponse>)> {
    let recipe = RecipeService::create(state.db(), req).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// PUT /api/recipes/:id - admin only
async fn update_recipe(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    Ok(Json(
        RecipeService::update(state.db(), parse_id(&id)?, req).await?,
    ))
}

/// DELETE /api/recipes/:id - admin only, soft delete
async fn delete_recipe(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    RecipeService::delete(state.db(), parse_id(&id)?).await?;
    Ok(Json(serde_json::json!({
        "message": "Recipe deleted successfully"
    })))
}

/// GET /api/recipes/search/:query - substring search
async fn search_recipes(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    Ok(Json(
        RecipeService::search(state.db(), &query, params.limit).await?,
    ))
}
