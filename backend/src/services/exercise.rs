//! Exercise catalog service

use crate::error::ApiError;
use crate::repositories::{
    ExerciseFilters, ExerciseRecord, ExerciseRepository, NewExercise, UpdateExercise,
};
use fitcoach_shared::enums::{
    Equipment, ExerciseDifficulty, ExerciseType, MuscleGroup,
};
use fitcoach_shared::types::{
    CreateExerciseRequest, ExerciseListQuery, ExerciseResponse, UpdateExerciseRequest,
};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

fn parse_stored<T>(value: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() || name.len() > 255 {
        return Err(ApiError::Validation(
            "Name must be between 1 and 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Exercise catalog service
pub struct ExerciseService;

impl ExerciseService {
    /// Filtered, paginated list of active exercises
    pub async fn list(
        pool: &PgPool,
        query: ExerciseListQuery,
    ) -> Result<Vec<ExerciseResponse>, ApiError> {
        let filters = ExerciseFilters {
            muscle_group: query.muscle_group.map(|v| v.as_str().to_string()),
            equipment_needed: query.equipment_needed.map(|v| v.as_str().to_string()),
            difficulty_level: query.difficulty_level.map(|v| v.as_str().to_string()),
            exercise_type: query.exercise_type.map(|v| v.as_str().to_string()),
            is_compound: query.is_compound,
        };
        let skip = query.skip.max(0);
        let limit = query.limit.clamp(1, 1000);

        let records = ExerciseRepository::list(pool, &filters, skip, limit)
            .await
            .map_err(ApiError::Internal)?;

        records.into_iter().map(Self::to_response).collect()
    }

    /// Get an active exercise by ID
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<ExerciseResponse, ApiError> {
        let record = ExerciseRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?;

        Self::to_response(record)
    }

    /// Create a catalog exercise
    pub async fn create(
        pool: &PgPool,
        request: CreateExerciseRequest,
    ) -> Result<ExerciseResponse, ApiError> {
        validate_name(&request.name)?;

        let input = NewExercise {
            name: request.name,
            description: request.description,
            instructions: request.instructions,
            muscle_group: request.muscle_group.as_str().to_string(),
            secondary_muscles: Json(request.secondary_muscles),
            exercise_type: request.exercise_type.as_str().to_string(),
            equipment_needed: request.equipment_needed.as_str().to_string(),
            difficulty_level: request.difficulty_level.as_str().to_string(),
            calories_per_minute: request.calories_per_minute,
            is_compound: request.is_compound,
            video_url: request.video_url,
            image_url: request.image_url,
            tags: Json(request.tags),
            default_sets: request.default_sets,
            default_reps_min: request.default_reps_min,
            default_reps_max: request.default_reps_max,
            default_duration_seconds: request.default_duration_seconds,
            default_rest_seconds: request.default_rest_seconds,
        };

        let record = ExerciseRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        Self::to_response(record)
    }

    /// Partial update of a catalog exercise
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        request: UpdateExerciseRequest,
    ) -> Result<ExerciseResponse, ApiError> {
        if let Some(ref name) = request.name {
            validate_name(name)?;
        }

        let updates = UpdateExercise {
            name: request.name,
            description: request.description,
            instructions: request.instructions,
            muscle_group: request.muscle_group.map(|v| v.as_str().to_string()),
            secondary_muscles: request.secondary_muscles.map(Json),
            exercise_type: request.exercise_type.map(|v| v.as_str().to_string()),
            equipment_needed: request.equipment_needed.map(|v| v.as_str().to_string()),
            difficulty_level: request.difficulty_level.map(|v| v.as_str().to_string()),
            calories_per_minute: request.calories_per_minute,
            is_compound: request.is_compound,
            video_url: request.video_url,
            image_url: request.image_url,
            tags: request.tags.map(Json),
            default_sets: request.default_sets,
            default_reps_min: request.default_reps_min,
            default_reps_max: request.default_reps_max,
            default_duration_seconds: request.default_duration_seconds,
            default_rest_seconds: request.default_rest_seconds,
        };

        let record = ExerciseRepository::update(pool, id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Exercise not found".to_string()))?;

        Self::to_response(record)
    }

    /// Soft-delete a catalog exercise
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = ExerciseRepository::soft_delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Exercise not found".to_string()));
        }
        Ok(())
    }

    /// Substring search over the active catalog
    pub async fn search(
        pool: &PgPool,
        query: &str,
        limit: i64,
    ) -> Result<Vec<ExerciseResponse>, ApiError> {
        let records = ExerciseRepository::search(pool, query, limit.clamp(1, 100))
            .await
            .map_err(ApiError::Internal)?;

        records.into_iter().map(Self::to_response).collect()
    }

    /// Candidates for workout-plan generation: exercises doable with the
    /// given equipment (bodyweight and no-equipment are always included)
    /// at the given difficulty. Falls back to bodyweight-only when the
    /// filtered set is empty.
    pub async fn candidates_for_equipment(
        pool: &PgPool,
        available: &[Equipment],
        difficulty: ExerciseDifficulty,
    ) -> Result<Vec<ExerciseRecord>, ApiError> {
        let mut equipment: Vec<String> = available.iter().map(|e| e.as_str().to_string()).collect();
        for implied in [Equipment::Bodyweight, Equipment::None] {
            let s = implied.as_str().to_string();
            if !equipment.contains(&s) {
                equipment.push(s);
            }
        }

        let records = ExerciseRepository::find_for_equipment(
            pool,
            &equipment,
            Some(difficulty.as_str()),
            50,
        )
        .await
        .map_err(ApiError::Internal)?;

        if !records.is_empty() {
            return Ok(records);
        }

        let bodyweight_only = vec![
            Equipment::Bodyweight.as_str().to_string(),
            Equipment::None.as_str().to_string(),
        ];
        ExerciseRepository::find_for_equipment(
            pool,
            &bodyweight_only,
            Some(difficulty.as_str()),
            20,
        )
        .await
        .map_err(ApiError::Internal)
    }

    /// Shape a stored row into the API response
    pub fn to_response(record: ExerciseRecord) -> Result<ExerciseResponse, ApiError> {
        Ok(ExerciseResponse {
            id: record.id,
            name: record.name,
            description: record.description,
            instructions: record.instructions,
            muscle_group: parse_stored::<MuscleGroup>(&record.muscle_group)?,
            secondary_muscles: record.secondary_muscles.0,
            exercise_type: parse_stored::<ExerciseType>(&record.exercise_type)?,
            equipment_needed: parse_stored::<Equipment>(&record.equipment_needed)?,
            difficulty_level: parse_stored::<ExerciseDifficulty>(&record.difficulty_level)?,
            calories_per_minute: record.calories_per_minute,
            is_compound: record.is_compound,
            video_url: record.video_url,
            image_url: record.image_url,
            tags: record.tags.0,
            default_sets: record.default_sets,
            default_reps_min: record.default_reps_min,
            default_reps_max: record.default_reps_max,
            default_duration_seconds: record.default_duration_seconds,
            default_rest_seconds: record.default_rest_seconds,
        })
    }
}
