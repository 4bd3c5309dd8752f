//! Plan repository
//!
//! Plans are always scoped to their owning user; every query takes the
//! user ID alongside the plan ID.

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitcoach_shared::plan::PlanData;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Plan row. The payload is typed down to the `PlanData` sum type at the
/// database boundary.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub plan_type: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_weeks: i32,
    pub plan_data: Json<PlanData>,
    pub completion_percentage: f64,
    pub user_rating: Option<i32>,
    pub user_feedback: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a plan
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub plan_type: String,
    pub start_date: DateTime<Utc>,
    pub duration_weeks: i32,
    pub plan_data: Json<PlanData>,
}

/// Input for the partial plan update
#[derive(Debug, Clone, Default)]
pub struct UpdatePlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub plan_data: Option<Json<PlanData>>,
    pub completion_percentage: Option<f64>,
    pub user_rating: Option<i32>,
    pub user_feedback: Option<String>,
}

/// Plan repository for database operations
pub struct PlanRepository;

impl PlanRepository {
    /// Create a new plan (status starts at draft)
    pub async fn create(pool: &PgPool, input: NewPlan) -> Result<PlanRecord> {
        let record = sqlx::query_as::<_, PlanRecord>(
            r#"
            INSERT INTO plans (
                user_id, name, description, plan_type, start_date,
                duration_weeks, plan_data
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(input.name)
        .bind(input.description)
        .bind(input.plan_type)
        .bind(input.start_date)
        .bind(input.duration_weeks)
        .bind(input.plan_data)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List the user's active plans, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<PlanRecord>> {
        let records = sqlx::query_as::<_, PlanRecord>(
            r#"
            SELECT * FROM plans
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find one of the user's plans by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<PlanRecord>> {
        let record = sqlx::query_as::<_, PlanRecord>(
            r#"
            SELECT * FROM plans
            WHERE id = $1 AND user_id = $2 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Plans the user is currently running (status = active)
    pub async fn list_active_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<PlanRecord>> {
        let records = sqlx::query_as::<_, PlanRecord>(
            r#"
            SELECT * FROM plans
            WHERE user_id = $1 AND status = 'active' AND is_active = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Partial update of one of the user's plans
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        updates: UpdatePlan,
    ) -> Result<Option<PlanRecord>> {
        let record = sqlx::query_as::<_, PlanRecord>(
            r#"
            UPDATE plans SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                end_date = COALESCE($6, end_date),
                plan_data = COALESCE($7, plan_data),
                completion_percentage = COALESCE($8, completion_percentage),
                user_rating = COALESCE($9, user_rating),
                user_feedback = COALESCE($10, user_feedback),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(updates.name)
        .bind(updates.description)
        .bind(updates.status)
        .bind(updates.end_date)
        .bind(updates.plan_data)
        .bind(updates.completion_percentage)
        .bind(updates.user_rating)
        .bind(updates.user_feedback)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Soft-delete one of the user's plans
    pub async fn soft_delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE plans SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
