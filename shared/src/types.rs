//! API request and response types

use crate::enums::{
    ActivityLevel, Cuisine, Equipment, ExerciseDifficulty, ExerciseType, Gender, Goal, MealType,
    MuscleGroup, PlanStatus, PlanType, RecipeDifficulty, WorkoutType,
};
use crate::health_metrics::MacroSplit;
use crate::plan::{Ingredient, PlanData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_limit() -> i64 {
    100
}

fn default_search_limit() -> i64 {
    50
}

/// Offset/limit pagination used by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { skip: 0, limit: default_limit() }
    }
}

impl PageQuery {
    /// Clamp to the documented bounds (skip >= 0, 1 <= limit <= 1000).
    pub fn normalize(self) -> Self {
        Self {
            skip: self.skip.max(0),
            limit: self.limit.clamp(1, 1000),
        }
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login credentials, submitted form-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Refresh token request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Authenticated password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// Users
// ============================================================================

/// Full user profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub target_weight_kg: Option<f64>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_paleo: bool,
    pub is_keto: bool,
    pub is_gluten_free: bool,
    pub allergies: Vec<String>,
    pub preferred_workout_types: Vec<WorkoutType>,
    pub available_equipment: Vec<Equipment>,
    pub workout_days_per_week: i32,
    pub workout_duration_minutes: i32,
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub target_calories: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. Absent fields are left untouched; derived
/// metrics are recomputed when any physical/goal field is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
    pub target_weight_kg: Option<f64>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_paleo: Option<bool>,
    pub is_keto: Option<bool>,
    pub is_gluten_free: Option<bool>,
    pub allergies: Option<Vec<String>>,
    pub preferred_workout_types: Option<Vec<WorkoutType>>,
    pub available_equipment: Option<Vec<Equipment>>,
    pub workout_days_per_week: Option<i32>,
    pub workout_duration_minutes: Option<i32>,
}

impl UpdateProfileRequest {
    /// Whether the change set touches any field that feeds the derived
    /// metrics (BMR/TDEE/target calories).
    pub fn touches_metrics(&self) -> bool {
        self.age.is_some()
            || self.gender.is_some()
            || self.height_cm.is_some()
            || self.weight_kg.is_some()
            || self.activity_level.is_some()
            || self.goal.is_some()
    }
}

/// Derived metrics summary for the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatsResponse {
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub target_calories: Option<f64>,
    pub bmi: Option<f64>,
    pub macros: Option<MacroSplit>,
}

// ============================================================================
// Exercises
// ============================================================================

/// Exercise catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub muscle_group: MuscleGroup,
    pub secondary_muscles: Vec<MuscleGroup>,
    pub exercise_type: ExerciseType,
    pub equipment_needed: Equipment,
    pub difficulty_level: ExerciseDifficulty,
    pub calories_per_minute: Option<f64>,
    pub is_compound: bool,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub default_sets: i32,
    pub default_reps_min: Option<i32>,
    pub default_reps_max: Option<i32>,
    pub default_duration_seconds: Option<i32>,
    pub default_rest_seconds: i32,
}

/// Create a catalog exercise (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    pub muscle_group: MuscleGroup,
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
    pub exercise_type: ExerciseType,
    pub equipment_needed: Equipment,
    pub difficulty_level: ExerciseDifficulty,
    #[serde(default)]
    pub calories_per_minute: Option<f64>,
    #[serde(default)]
    pub is_compound: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_sets")]
    pub default_sets: i32,
    #[serde(default)]
    pub default_reps_min: Option<i32>,
    #[serde(default)]
    pub default_reps_max: Option<i32>,
    #[serde(default)]
    pub default_duration_seconds: Option<i32>,
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: i32,
}

fn default_sets() -> i32 {
    3
}

fn default_rest_seconds() -> i32 {
    60
}

/// Partial exercise update (admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    pub secondary_muscles: Option<Vec<MuscleGroup>>,
    pub exercise_type: Option<ExerciseType>,
    pub equipment_needed: Option<Equipment>,
    pub difficulty_level: Option<ExerciseDifficulty>,
    pub calories_per_minute: Option<f64>,
    pub is_compound: Option<bool>,
    pub video_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub default_sets: Option<i32>,
    pub default_reps_min: Option<i32>,
    pub default_reps_max: Option<i32>,
    pub default_duration_seconds: Option<i32>,
    pub default_rest_seconds: Option<i32>,
}

/// Field-equality filters for the exercise list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment_needed: Option<Equipment>,
    pub difficulty_level: Option<ExerciseDifficulty>,
    pub exercise_type: Option<ExerciseType>,
    pub is_compound: Option<bool>,
}

// ============================================================================
// Recipes
// ============================================================================

/// Recipe catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructions: String,
    pub servings: i32,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub difficulty: RecipeDifficulty,
    pub meal_type: MealType,
    pub cuisine_type: Cuisine,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub ingredients: Vec<Ingredient>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_nut_free: bool,
    pub is_paleo: bool,
    pub is_keto: bool,
    pub is_low_carb: bool,
    pub is_high_protein: bool,
    pub image_url: Option<String>,
    pub recipe_url: Option<String>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub is_meal_prep_friendly: bool,
}

/// Create a catalog recipe (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub instructions: String,
    #[serde(default = "default_servings")]
    pub servings: i32,
    #[serde(default)]
    pub prep_time_minutes: Option<i32>,
    #[serde(default)]
    pub cook_time_minutes: Option<i32>,
    #[serde(default)]
    pub total_time_minutes: Option<i32>,
    #[serde(default = "default_recipe_difficulty")]
    pub difficulty: RecipeDifficulty,
    pub meal_type: MealType,
    #[serde(default = "default_cuisine")]
    pub cuisine_type: Cuisine,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
    #[serde(default)]
    pub fiber_g: Option<f64>,
    #[serde(default)]
    pub sugar_g: Option<f64>,
    #[serde(default)]
    pub sodium_mg: Option<f64>,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    #[serde(default)]
    pub is_dairy_free: bool,
    #[serde(default)]
    pub is_nut_free: bool,
    #[serde(default)]
    pub is_paleo: bool,
    #[serde(default)]
    pub is_keto: bool,
    #[serde(default)]
    pub is_low_carb: bool,
    #[serde(default)]
    pub is_high_protein: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub recipe_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub is_meal_prep_friendly: bool,
}

fn default_servings() -> i32 {
    1
}

fn default_recipe_difficulty() -> RecipeDifficulty {
    RecipeDifficulty::Easy
}

fn default_cuisine() -> Cuisine {
    Cuisine::Other
}

/// Partial recipe update (admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<i32>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub difficulty: Option<RecipeDifficulty>,
    pub meal_type: Option<MealType>,
    pub cuisine_type: Option<Cuisine>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>,
    pub is_dairy_free: Option<bool>,
    pub is_nut_free: Option<bool>,
    pub is_paleo: Option<bool>,
    pub is_keto: Option<bool>,
    pub is_low_carb: Option<bool>,
    pub is_high_protein: Option<bool>,
    pub image_url: Option<String>,
    pub recipe_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub estimated_cost: Option<f64>,
    pub is_meal_prep_friendly: Option<bool>,
}

/// Filters for the recipe list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub meal_type: Option<MealType>,
    pub cuisine_type: Option<Cuisine>,
    pub difficulty: Option<RecipeDifficulty>,
    pub max_calories: Option<f64>,
    pub min_protein: Option<f64>,
    pub max_prep_time: Option<i32>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>,
    pub is_dairy_free: Option<bool>,
    pub is_nut_free: Option<bool>,
    pub is_paleo: Option<bool>,
    pub is_keto: Option<bool>,
    pub is_low_carb: Option<bool>,
    pub is_high_protein: Option<bool>,
    pub is_meal_prep_friendly: Option<bool>,
}

/// Limit parameter for search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self { limit: default_search_limit() }
    }
}

// ============================================================================
// Plans
// ============================================================================

/// Stored plan, including its typed payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub plan_type: PlanType,
    pub status: PlanStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_weeks: i32,
    pub plan_data: PlanData,
    pub completion_percentage: f64,
    pub user_rating: Option<i32>,
    pub user_feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a plan directly from a user-supplied payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub plan_type: PlanType,
    pub start_date: DateTime<Utc>,
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: i32,
    pub plan_data: PlanData,
}

fn default_duration_weeks() -> i32 {
    1
}

/// Partial plan update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<PlanStatus>,
    pub end_date: Option<DateTime<Utc>>,
    pub plan_data: Option<PlanData>,
    pub completion_percentage: Option<f64>,
    pub user_rating: Option<i32>,
    pub user_feedback: Option<String>,
}

/// Request a generated plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePlanRequest {
    pub plan_type: PlanType,
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: i32,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferences: Option<GenerationPreferences>,
}

/// Per-request overrides applied on top of the stored profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationPreferences {
    pub workout_days_per_week: Option<i32>,
    pub workout_duration_minutes: Option<i32>,
    pub target_calories: Option<f64>,
}
