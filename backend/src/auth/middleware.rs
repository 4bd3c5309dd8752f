//! Request extractors for authentication
//!
//! `CurrentUser` validates the bearer token and loads the active user
//! row; `AdminUser` additionally requires the admin flag. Deactivated
//! accounts are rejected even when their token is still valid.

use crate::auth::TokenKind;
use crate::error::ApiError;
use crate::repositories::UserRecord;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))
}

async fn authenticated_user_id<S>(parts: &Parts, state: &S) -> Result<(AppState, Uuid), ApiError>
where
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);
    let token = bearer_token(parts)?;

    let claims = app_state
        .jwt()
        .validate_token(token, TokenKind::Access)
        .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

    let user_id = claims
        .user_id()
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    Ok((app_state, user_id))
}

/// The authenticated, active user behind the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (app_state, user_id) = authenticated_user_id(parts, state).await?;

        let user = UserRepository::find_by_id(app_state.db(), user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
        }

        Ok(CurrentUser(user))
    }
}

/// An authenticated user with catalog-administration rights.
///
/// Catalog mutations are gated on this rather than on any signed-in
/// account.
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserRecord);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert!(bearer_token(&parts).is_err());
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic abc"));
        assert!(bearer_token(&parts).is_err());
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer token-value"));
        assert_eq!(bearer_token(&parts).unwrap(), "token-value");
    }
}
