//! User service: authentication, profile management, derived metrics

use crate::auth::{password, JwtService, TokenKind};
use crate::error::ApiError;
use crate::repositories::{UpdateUserProfile, UserRecord, UserRepository};
use fitcoach_shared::enums::{ActivityLevel, Gender, Goal};
use fitcoach_shared::health_metrics::{self, MetricsInput};
use fitcoach_shared::types::{
    AuthTokens, UpdateProfileRequest, UserResponse, UserStatsResponse,
};
use fitcoach_shared::validation;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidateEmail;

/// Stored enum strings are written by this service, so a parse failure on
/// read means corrupted data, not user error.
fn parse_stored<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(str::parse::<T>)
        .transpose()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))
}

/// User service
pub struct UserService;

impl UserService {
    /// Register a new user and hand back a token pair.
    ///
    /// Duplicate emails are rejected with a visible conflict.
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password_plain: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<AuthTokens, ApiError> {
        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validation::validate_password(password_plain).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(pool, email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = password::hash_async(password_plain.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, email, &password_hash, first_name, last_name)
            .await
            .map_err(ApiError::Internal)?;

        Self::issue_tokens(jwt, user.id)
    }

    /// Login with email and password.
    ///
    /// All failure causes produce the same message so the endpoint cannot
    /// be used to probe which emails exist.
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password_plain: &str,
    ) -> Result<AuthTokens, ApiError> {
        let invalid = || ApiError::Unauthorized("Incorrect email or password".to_string());

        let user = UserRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(invalid)?;

        if !user.is_active {
            return Err(invalid());
        }

        let valid = password::verify_async(password_plain.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(invalid());
        }

        Self::issue_tokens(jwt, user.id)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(
        pool: &PgPool,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt
            .validate_token(refresh_token, TokenKind::Refresh)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        if !user.is_active {
            return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
        }

        Self::issue_tokens(jwt, user.id)
    }

    /// Change the password of an authenticated user
    pub async fn change_password(
        pool: &PgPool,
        user: &UserRecord,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let valid = password::verify_async(
            current_password.to_string(),
            user.password_hash.clone(),
        )
        .await
        .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        validation::validate_password(new_password).map_err(ApiError::Validation)?;

        let new_hash = password::hash_async(new_password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        UserRepository::update_password(pool, user.id, &new_hash)
            .await
            .map_err(ApiError::Internal)?;

        Ok(())
    }

    /// Apply a partial profile update, recomputing derived metrics when
    /// any physical/goal field is in the change set. An empty change set
    /// leaves the metrics untouched.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, ApiError> {
        Self::validate_profile_request(&request)?;
        let recalculate = request.touches_metrics();

        let updates = UpdateUserProfile {
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            gender: request.gender.map(|g| g.as_str().to_string()),
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
            activity_level: request.activity_level.map(|a| a.as_str().to_string()),
            goal: request.goal.map(|g| g.as_str().to_string()),
            target_weight_kg: request.target_weight_kg,
            is_vegetarian: request.is_vegetarian,
            is_vegan: request.is_vegan,
            is_paleo: request.is_paleo,
            is_keto: request.is_keto,
            is_gluten_free: request.is_gluten_free,
            allergies: request.allergies.map(Json),
            preferred_workout_types: request.preferred_workout_types.map(Json),
            available_equipment: request.available_equipment.map(Json),
            workout_days_per_week: request.workout_days_per_week,
            workout_duration_minutes: request.workout_duration_minutes,
        };

        let mut user = UserRepository::update_profile(pool, user_id, updates)
            .await
            .map_err(ApiError::Internal)?;

        if recalculate {
            let metrics = health_metrics::calculate(&Self::metrics_input(&user)?);
            user = UserRepository::set_metrics(
                pool,
                user.id,
                metrics.bmr,
                metrics.tdee,
                metrics.target_calories,
            )
            .await
            .map_err(ApiError::Internal)?;
        }

        Self::to_response(user)
    }

    /// Soft-deactivate the account
    pub async fn deactivate(pool: &PgPool, user_id: Uuid) -> Result<(), ApiError> {
        let deactivated = UserRepository::deactivate(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deactivated {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    /// Derived-metric summary for the stats endpoint
    pub fn stats(user: &UserRecord) -> Result<UserStatsResponse, ApiError> {
        let bmi = match (user.weight_kg, user.height_cm) {
            (Some(weight), Some(height)) => Some(health_metrics::bmi(weight, height)),
            _ => None,
        };

        let goal: Option<Goal> = parse_stored(user.goal.as_deref())?;
        let macros = user
            .target_calories
            .map(|target| health_metrics::macro_split(target, goal));

        Ok(UserStatsResponse {
            bmr: user.bmr,
            tdee: user.tdee,
            target_calories: user.target_calories,
            bmi,
            macros,
        })
    }

    /// Metric-calculation inputs from a stored row
    pub fn metrics_input(user: &UserRecord) -> Result<MetricsInput, ApiError> {
        Ok(MetricsInput {
            age: user.age,
            gender: parse_stored::<Gender>(user.gender.as_deref())?,
            height_cm: user.height_cm,
            weight_kg: user.weight_kg,
            activity_level: parse_stored::<ActivityLevel>(user.activity_level.as_deref())?,
            goal: parse_stored::<Goal>(user.goal.as_deref())?,
        })
    }

    /// Shape a stored row into the API response
    pub fn to_response(user: UserRecord) -> Result<UserResponse, ApiError> {
        Ok(UserResponse {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
            gender: parse_stored(user.gender.as_deref())?,
            height_cm: user.height_cm,
            weight_kg: user.weight_kg,
            activity_level: parse_stored(user.activity_level.as_deref())?,
            goal: parse_stored(user.goal.as_deref())?,
            target_weight_kg: user.target_weight_kg,
            is_vegetarian: user.is_vegetarian,
            is_vegan: user.is_vegan,
            is_paleo: user.is_paleo,
            is_keto: user.is_keto,
            is_gluten_free: user.is_gluten_free,
            allergies: user.allergies.0,
            preferred_workout_types: user.preferred_workout_types.0,
            available_equipment: user.available_equipment.0,
            workout_days_per_week: user.workout_days_per_week,
            workout_duration_minutes: user.workout_duration_minutes,
            bmr: user.bmr,
            tdee: user.tdee,
            target_calories: user.target_calories,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    fn validate_profile_request(request: &UpdateProfileRequest) -> Result<(), ApiError> {
        if let Some(age) = request.age {
            validation::validate_age(age).map_err(ApiError::Validation)?;
        }
        if let Some(height) = request.height_cm {
            validation::validate_height_cm(height).map_err(ApiError::Validation)?;
        }
        if let Some(weight) = request.weight_kg {
            validation::validate_weight_kg(weight).map_err(ApiError::Validation)?;
        }
        if let Some(days) = request.workout_days_per_week {
            if !(1..=7).contains(&days) {
                return Err(ApiError::Validation(
                    "Workout days per week must be between 1 and 7".to_string(),
                ));
            }
        }
        if let Some(minutes) = request.workout_duration_minutes {
            if !(10..=300).contains(&minutes) {
                return Err(ApiError::Validation(
                    "Workout duration must be between 10 and 300 minutes".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn issue_tokens(jwt: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let access_token = jwt
            .generate_access_token(user_id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt
            .generate_refresh_token(user_id)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry_secs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record_with_metrics() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_admin: false,
            is_active: true,
            first_name: None,
            last_name: None,
            age: Some(30),
            gender: Some("male".to_string()),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some("moderate".to_string()),
            goal: Some("lose_weight".to_string()),
            target_weight_kg: None,
            is_vegetarian: false,
            is_vegan: false,
            is_paleo: false,
            is_keto: false,
            is_gluten_free: false,
            allergies: Json(vec![]),
            preferred_workout_types: Json(vec![]),
            available_equipment: Json(vec![]),
            workout_days_per_week: 3,
            workout_duration_minutes: 45,
            bmr: Some(1805.0),
            tdee: Some(2797.75),
            target_calories: Some(2297.75),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_includes_bmi_and_macros() {
        let stats = UserService::stats(&record_with_metrics()).unwrap();
        assert_eq!(stats.bmi, Some(24.69));
        let macros = stats.macros.unwrap();
        assert_eq!(macros.carbs_g, 172.33);
    }

    #[test]
    fn test_stats_without_measurements() {
        let mut user = record_with_metrics();
        user.height_cm = None;
        user.target_calories = None;
        let stats = UserService::stats(&user).unwrap();
        assert_eq!(stats.bmi, None);
        assert!(stats.macros.is_none());
    }

    #[test]
    fn test_metrics_input_parses_stored_enums() {
        let input = UserService::metrics_input(&record_with_metrics()).unwrap();
        assert_eq!(input.gender, Some(Gender::Male));
        assert_eq!(input.activity_level, Some(ActivityLevel::Moderate));
        assert_eq!(input.goal, Some(Goal::LoseWeight));
    }

    #[test]
    fn test_corrupted_enum_is_internal_error() {
        let mut user = record_with_metrics();
        user.gender = Some("nonsense".to_string());
        assert!(UserService::metrics_input(&user).is_err());
    }

    #[test]
    fn test_profile_request_range_checks() {
        let bad_age = UpdateProfileRequest {
            age: Some(7),
            ..Default::default()
        };
        assert!(UserService::validate_profile_request(&bad_age).is_err());

        let bad_days = UpdateProfileRequest {
            workout_days_per_week: Some(8),
            ..Default::default()
        };
        assert!(UserService::validate_profile_request(&bad_days).is_err());

        let ok = UpdateProfileRequest {
            age: Some(30),
            workout_days_per_week: Some(4),
            ..Default::default()
        };
        assert!(UserService::validate_profile_request(&ok).is_ok());
    }
}
