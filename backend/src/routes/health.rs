//! Health and info endpoints

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Basic health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API metadata response
#[derive(Serialize)]
pub struct ApiInfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Database connectivity response
#[derive(Serialize)]
pub struct DatabaseStatusResponse {
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET / - service banner
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Fitcoach API" }))
}

/// GET /health - process health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/info - API metadata
pub async fn api_info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        name: "Fitcoach API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Personalized fitness and nutrition planning".to_string(),
    })
}

/// GET /database-status - database connectivity probe
///
/// Returns 503 while the database is unreachable (e.g. when the process
/// started in degraded mode).
pub async fn database_status(
    State(state): State<AppState>,
) -> Result<Json<DatabaseStatusResponse>, (StatusCode, Json<DatabaseStatusResponse>)> {
    match db::health_check(state.db()).await {
        Ok(()) => Ok(Json(DatabaseStatusResponse {
            database: "connected".to_string(),
            error: None,
        })),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(DatabaseStatusResponse {
                database: "disconnected".to_string(),
                error: Some(e.to_string()),
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.0.status, "healthy");
        assert!(!response.0.version.is_empty());
    }

    #[tokio::test]
    async fn test_api_info_names_the_service() {
        let response = api_info().await;
        assert_eq!(response.0.name, "Fitcoach API");
    }
}
