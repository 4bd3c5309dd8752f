//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitcoach_shared::enums::{Equipment, WorkoutType};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// User row. Enum-backed columns are stored as their canonical strings
/// and parsed at the service boundary; list-shaped columns are JSONB.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub target_weight_kg: Option<f64>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_paleo: bool,
    pub is_keto: bool,
    pub is_gluten_free: bool,
    pub allergies: Json<Vec<String>>,
    pub preferred_workout_types: Json<Vec<WorkoutType>>,
    pub available_equipment: Json<Vec<Equipment>>,
    pub workout_days_per_week: i32,
    pub workout_duration_minutes: i32,
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub target_calories: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for the partial profile update. `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub target_weight_kg: Option<f64>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_paleo: Option<bool>,
    pub is_keto: Option<bool>,
    pub is_gluten_free: Option<bool>,
    pub allergies: Option<Json<Vec<String>>>,
    pub preferred_workout_types: Option<Json<Vec<WorkoutType>>>,
    pub available_equipment: Option<Json<Vec<Equipment>>>,
    pub workout_days_per_week: Option<i32>,
    pub workout_duration_minutes: Option<i32>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT * FROM users WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT * FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Partial profile update; untouched fields keep their values.
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        updates: UpdateUserProfile,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                age = COALESCE($4, age),
                gender = COALESCE($5, gender),
                height_cm = COALESCE($6, height_cm),
                weight_kg = COALESCE($7, weight_kg),
                activity_level = COALESCE($8, activity_level),
                goal = COALESCE($9, goal),
                target_weight_kg = COALESCE($10, target_weight_kg),
                is_vegetarian = COALESCE($11, is_vegetarian),
                is_vegan = COALESCE($12, is_vegan),
                is_paleo = COALESCE($13, is_paleo),
                is_keto = COALESCE($14, is_keto),
                is_gluten_free = COALESCE($15, is_gluten_free),
                allergies = COALESCE($16, allergies),
                preferred_workout_types = COALESCE($17, preferred_workout_types),
                available_equipment = COALESCE($18, available_equipment),
                workout_days_per_week = COALESCE($19, workout_days_per_week),
                workout_duration_minutes = COALESCE($20, workout_duration_minutes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(updates.first_name)
        .bind(updates.last_name)
        .bind(updates.age)
        .bind(updates.gender)
        .bind(updates.height_cm)
        .bind(updates.weight_kg)
        .bind(updates.activity_level)
        .bind(updates.goal)
        .bind(updates.target_weight_kg)
        .bind(updates.is_vegetarian)
        .bind(updates.is_vegan)
        .bind(updates.is_paleo)
        .bind(updates.is_keto)
        .bind(updates.is_gluten_free)
        .bind(updates.allergies)
        .bind(updates.preferred_workout_types)
        .bind(updates.available_equipment)
        .bind(updates.workout_days_per_week)
        .bind(updates.workout_duration_minutes)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Overwrite the derived metrics. `None` clears a metric (insufficient
    /// data after a profile change).
    pub async fn set_metrics(
        pool: &PgPool,
        user_id: Uuid,
        bmr: Option<f64>,
        tdee: Option<f64>,
        target_calories: Option<f64>,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                bmr = $2,
                tdee = $3,
                target_calories = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(bmr)
        .bind(tdee)
        .bind(target_calories)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Replace the stored password hash
    pub async fn update_password(pool: &PgPool, user_id: Uuid, password_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Soft-deactivate the account
    pub async fn deactivate(pool: &PgPool, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
