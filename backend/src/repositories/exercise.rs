//! Exercise catalog repository

use anyhow::Result;
use fitcoach_shared::enums::MuscleGroup;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Exercise row. Scalar enum columns are canonical strings; list columns
/// are JSONB.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub muscle_group: String,
    pub secondary_muscles: Json<Vec<MuscleGroup>>,
    pub exercise_type: String,
    pub equipment_needed: String,
    pub difficulty_level: String,
    pub calories_per_minute: Option<f64>,
    pub is_compound: bool,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub default_sets: i32,
    pub default_reps_min: Option<i32>,
    pub default_reps_max: Option<i32>,
    pub default_duration_seconds: Option<i32>,
    pub default_rest_seconds: i32,
    pub is_active: bool,
}

/// Input for creating an exercise
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub muscle_group: String,
    pub secondary_muscles: Json<Vec<MuscleGroup>>,
    pub exercise_type: String,
    pub equipment_needed: String,
    pub difficulty_level: String,
    pub calories_per_minute: Option<f64>,
    pub is_compound: bool,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub default_sets: i32,
    pub default_reps_min: Option<i32>,
    pub default_reps_max: Option<i32>,
    pub default_duration_seconds: Option<i32>,
    pub default_rest_seconds: i32,
}

/// Input for the partial exercise update
#[derive(Debug, Clone, Default)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub muscle_group: Option<String>,
    pub secondary_muscles: Option<Json<Vec<MuscleGroup>>>,
    pub exercise_type: Option<String>,
    pub equipment_needed: Option<String>,
    pub difficulty_level: Option<String>,
    pub calories_per_minute: Option<f64>,
    pub is_compound: Option<bool>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Json<Vec<String>>>,
    pub default_sets: Option<i32>,
    pub default_reps_min: Option<i32>,
    pub default_reps_max: Option<i32>,
    pub default_duration_seconds: Option<i32>,
    pub default_rest_seconds: Option<i32>,
}

/// Field-equality filters for the list query. `None` skips the filter.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilters {
    pub muscle_group: Option<String>,
    pub equipment_needed: Option<String>,
    pub difficulty_level: Option<String>,
    pub exercise_type: Option<String>,
    pub is_compound: Option<bool>,
}

/// Exercise repository for database operations
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Filtered list of active exercises
    pub async fn list(
        pool: &PgPool,
        filters: &ExerciseFilters,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT * FROM exercises
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR muscle_group = $1)
              AND ($2::text IS NULL OR equipment_needed = $2)
              AND ($3::text IS NULL OR difficulty_level = $3)
              AND ($4::text IS NULL OR exercise_type = $4)
              AND ($5::boolean IS NULL OR is_compound = $5)
            ORDER BY name
            OFFSET $6 LIMIT $7
            "#,
        )
        .bind(filters.muscle_group.as_deref())
        .bind(filters.equipment_needed.as_deref())
        .bind(filters.difficulty_level.as_deref())
        .bind(filters.exercise_type.as_deref())
        .bind(filters.is_compound)
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find an active exercise by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ExerciseRecord>> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT * FROM exercises WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Create a new exercise
    pub async fn create(pool: &PgPool, input: NewExercise) -> Result<ExerciseRecord> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            INSERT INTO exercises (
                name, description, instructions, muscle_group, secondary_muscles,
                exercise_type, equipment_needed, difficulty_level, calories_per_minute,
                is_compound, video_url, image_url, tags, default_sets,
                default_reps_min, default_reps_max, default_duration_seconds,
                default_rest_seconds
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.instructions)
        .bind(input.muscle_group)
        .bind(input.secondary_muscles)
        .bind(input.exercise_type)
        .bind(input.equipment_needed)
        .bind(input.difficulty_level)
        .bind(input.calories_per_minute)
        .bind(input.is_compound)
        .bind(input.video_url)
        .bind(input.image_url)
        .bind(input.tags)
        .bind(input.default_sets)
        .bind(input.default_reps_min)
        .bind(input.default_reps_max)
        .bind(input.default_duration_seconds)
        .bind(input.default_rest_seconds)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Partial update of an active exercise. Returns `None` when the row
    /// does not exist or is soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateExercise,
    ) -> Result<Option<ExerciseRecord>> {
        let record = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            UPDATE exercises SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                instructions = COALESCE($4, instructions),
                muscle_group = COALESCE($5, muscle_group),
                secondary_muscles = COALESCE($6, secondary_muscles),
                exercise_type = COALESCE($7, exercise_type),
                equipment_needed = COALESCE($8, equipment_needed),
                difficulty_level = COALESCE($9, difficulty_level),
                calories_per_minute = COALESCE($10, calories_per_minute),
                is_compound = COALESCE($11, is_compound),
                video_url = COALESCE($12, video_url),
                image_url = COALESCE($13, image_url),
                tags = COALESCE($14, tags),
                default_sets = COALESCE($15, default_sets),
                default_reps_min = COALESCE($16, default_reps_min),
                default_reps_max = COALESCE($17, default_reps_max),
                default_duration_seconds = COALESCE($18, default_duration_seconds),
                default_rest_seconds = COALESCE($19, default_rest_seconds)
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.description)
        .bind(updates.instructions)
        .bind(updates.muscle_group)
        .bind(updates.secondary_muscles)
        .bind(updates.exercise_type)
        .bind(updates.equipment_needed)
        .bind(updates.difficulty_level)
        .bind(updates.calories_per_minute)
        .bind(updates.is_compound)
        .bind(updates.video_url)
        .bind(updates.image_url)
        .bind(updates.tags)
        .bind(updates.default_sets)
        .bind(updates.default_reps_min)
        .bind(updates.default_reps_max)
        .bind(updates.default_duration_seconds)
        .bind(updates.default_rest_seconds)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Soft-delete. Returns false when nothing was active to delete.
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE exercises SET is_active = FALSE WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Substring search over name, description, and instructions
    pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<Vec<ExerciseRecord>> {
        let pattern = format!("%{}%", query);
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT * FROM exercises
            WHERE is_active = TRUE
              AND (name ILIKE $1 OR description ILIKE $1 OR instructions ILIKE $1)
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Candidates for plan generation: active exercises whose equipment
    /// is in the given set, optionally constrained to one difficulty.
    pub async fn find_for_equipment(
        pool: &PgPool,
        equipment: &[String],
        difficulty_level: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ExerciseRecord>> {
        let records = sqlx::query_as::<_, ExerciseRecord>(
            r#"
            SELECT * FROM exercises
            WHERE is_active = TRUE
              AND equipment_needed = ANY($1)
              AND ($2::text IS NULL OR difficulty_level = $2)
            ORDER BY name
            LIMIT $3
            "#,
        )
        .bind(equipment)
        .bind(difficulty_level)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see tests/ directory
}
