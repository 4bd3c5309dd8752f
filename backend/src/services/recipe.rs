//! Recipe catalog service

use crate::error::ApiError;
use crate::repositories::{
    DietaryConstraints, NewRecipe, RecipeFilters, RecipeRecord, RecipeRepository, UpdateRecipe,
};
use fitcoach_shared::enums::{Cuisine, MealType, RecipeDifficulty};
use fitcoach_shared::types::{
    CreateRecipeRequest, RecipeListQuery, RecipeResponse, UpdateRecipeRequest,
};
use fitcoach_shared::validation;
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
    if name.is_empty() || name.len() > 200 {
        return Err(ApiError::Validation(
            "Name must be between 1 and 200 characters".to_string(),
        ));
    }
    Ok(())
}

/// Recipe catalog service
pub struct RecipeService;

impl RecipeService {
    /// Filtered, paginated list of active recipes
    pub async fn list(
        pool: &PgPool,
        query: RecipeListQuery,
    ) -> Result<Vec<RecipeResponse>, ApiError> {
        let filters = RecipeFilters {
            meal_type: query.meal_type.map(|v| v.as_str().to_string()),
            cuisine_type: query.cuisine_type.map(|v| v.as_str().to_string()),
            difficulty: query.difficulty.map(|v| v.as_str().to_string()),
            max_calories: query.max_calories,
            min_protein: query.min_protein,
            max_prep_time: query.max_prep_time,
            is_vegetarian: query.is_vegetarian,
            is_vegan: query.is_vegan,
            is_gluten_free: query.is_gluten_free,
            is_dairy_free: query.is_dairy_free,
            is_nut_free: query.is_nut_free,
            is_paleo: query.is_paleo,
            is_keto: query.is_keto,
            is_low_carb: query.is_low_carb,
            is_high_protein: query.is_high_protein,
            is_meal_prep_friendly: query.is_meal_prep_friendly,
        };
        let skip = query.skip.max(0);
        let limit = query.limit.clamp(1, 1000);

        let records = RecipeRepository::list(pool, &filters, skip, limit)
            .await
            .map_err(ApiError::Internal)?;

        records.into_iter().map(Self::to_response).collect()
    }

    /// Get an active recipe by ID
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<RecipeResponse, ApiError> {
        let record = RecipeRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

        Self::to_response(record)
    }

    /// Create a catalog recipe
    pub async fn create(
        pool: &PgPool,
        request: CreateRecipeRequest,
    ) -> Result<RecipeResponse, ApiError> {
        validate_name(&request.name)?;
        validation::validate_calories(request.calories).map_err(ApiError::Validation)?;
        if request.instructions.is_empty() {
            return Err(ApiError::Validation(
                "Instructions cannot be empty".to_string(),
            ));
        }
        if request.ingredients.is_empty() {
            return Err(ApiError::Validation(
                "At least one ingredient is required".to_string(),
            ));
        }

        let input = NewRecipe {
            name: request.name,
            description: request.description,
            instructions: request.instructions,
            servings: request.servings,
            prep_time_minutes: request.prep_time_minutes,
            cook_time_minutes: request.cook_time_minutes,
            total_time_minutes: request.total_time_minutes,
            difficulty: request.difficulty.as_str().to_string(),
            meal_type: request.meal_type.as_str().to_string(),
            cuisine_type: request.cuisine_type.as_str().to_string(),
            calories: request.calories,
            protein_g: request.protein_g,
            carbs_g: request.carbs_g,
            fat_g: request.fat_g,
            fiber_g: request.fiber_g,
            sugar_g: request.sugar_g,
            sodium_mg: request.sodium_mg,
            ingredients: Json(request.ingredients),
            is_vegetarian: request.is_vegetarian,
            is_vegan: request.is_vegan,
            is_gluten_free: request.is_gluten_free,
            is_dairy_free: request.is_dairy_free,
            is_nut_free: request.is_nut_free,
            is_paleo: request.is_paleo,
            is_keto: request.is_keto,
            is_low_carb: request.is_low_carb,
            is_high_protein: request.is_high_protein,
            image_url: request.image_url,
            recipe_url: request.recipe_url,
            tags: Json(request.tags),
            estimated_cost: request.estimated_cost,
            is_meal_prep_friendly: request.is_meal_prep_friendly,
        };

        let record = RecipeRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        Self::to_response(record)
    }

    /// Partial update of a catalog recipe
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        request: UpdateRecipeRequest,
    ) -> Result<RecipeResponse, ApiError> {
        if let Some(ref name) = request.name {
            validate_name(name)?;
        }
        if let Some(calories) = request.calories {
            validation::validate_calories(calories).map_err(ApiError::Validation)?;
        }
        if matches!(request.ingredients.as_deref(), Some([])) {
            return Err(ApiError::Validation(
                "At least one ingredient is required".to_string(),
            ));
        }

        let updates = UpdateRecipe {
            name: request.name,
            description: request.description,
            instructions: request.instructions,
            servings: request.servings,
            prep_time_minutes: request.prep_time_minutes,
            cook_time_minutes: request.cook_time_minutes,
            total_time_minutes: request.total_time_minutes,
            difficulty: request.difficulty.map(|v| v.as_str().to_string()),
            meal_type: request.meal_type.map(|v| v.as_str().to_string()),
            cuisine_type: request.cuisine_type.map(|v| v.as_str().to_string()),
            calories: request.calories,
            protein_g: request.protein_g,
            carbs_g: request.carbs_g,
            fat_g: request.fat_g,
            fiber_g: request.fiber_g,
            sugar_g: request.sugar_g,
            sodium_mg: request.sodium_mg,
            ingredients: request.ingredients.map(Json),
            is_vegetarian: request.is_vegetarian,
            is_vegan: request.is_vegan,
            is_gluten_free: request.is_gluten_free,
            is_dairy_free: request.is_dairy_free,
            is_nut_free: request.is_nut_free,
            is_paleo: request.is_paleo,
            is_keto: request.is_keto,
            is_low_carb: request.is_low_carb,
            is_high_protein: request.is_high_protein,
            image_url: request.image_url,
            recipe_url: request.recipe_url,
            tags: request.tags.map(Json),
            estimated_cost: request.estimated_cost,
            is_meal_prep_friendly: request.is_meal_prep_friendly,
        };

        let record = RecipeRepository::update(pool, id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

        Self::to_response(record)
    }

    /// Soft-delete a catalog recipe
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = RecipeRepository::soft_delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Recipe not found".to_string()));
        }
        Ok(())
    }

    /// Substring search over the active catalog
    pub async fn search(
        pool: &PgPool,
        query: &str,
        limit: i64,
    ) -> Result<Vec<RecipeResponse>, ApiError> {
        let records = RecipeRepository::search(pool, query, limit.clamp(1, 100))
            .await
            .map_err(ApiError::Internal)?;

        records.into_iter().map(Self::to_response).collect()
    }

    /// Candidates for meal-plan generation. Falls back to the unfiltered
    /// active catalog when the constrained set is empty.
    pub async fn candidates_for_constraints(
        pool: &PgPool,
        constraints: &DietaryConstraints,
        max_meal_calories: Option<f64>,
    ) -> Result<Vec<RecipeRecord>, ApiError> {
        let records =
            RecipeRepository::find_for_constraints(pool, constraints, max_meal_calories, 100)
                .await
                .map_err(ApiError::Internal)?;

        if !records.is_empty() {
            return Ok(records);
        }

        RecipeRepository::find_for_constraints(pool, &DietaryConstraints::default(), None, 50)
            .await
            .map_err(ApiError::Internal)
    }

    /// Shape a stored row into the API response
    pub fn to_response(record: RecipeRecord) -> Result<RecipeResponse, ApiError> {
        Ok(RecipeResponse {
            id: record.id,
            name: record.name,
            description: record.description,
            instructions: record.instructions,
            servings: record.servings,
            prep_time_minutes: record.prep_time_minutes,
            cook_time_minutes: record.cook_time_minutes,
            total_time_minutes: record.total_time_minutes,
            difficulty: parse_stored::<RecipeDifficulty>(&record.difficulty)?,
            meal_type: parse_stored::<MealType>(&record.meal_type)?,
            cuisine_type: parse_stored::<Cuisine>(&record.cuisine_type)?,
            calories: record.calories,
            protein_g: record.protein_g,
            carbs_g: record.carbs_g,
            fat_g: record.fat_g,
            fiber_g: record.fiber_g,
            sugar_g: record.sugar_g,
            sodium_mg: record.sodium_mg,
            ingredients: record.ingredients.0,
            is_vegetarian: record.is_vegetarian,
            is_vegan: record.is_vegan,
            is_gluten_free: record.is_gluten_free,
            is_dairy_free: record.is_dairy_free,
            is_nut_free: record.is_nut_free,
            is_paleo: record.is_paleo,
            is_keto: record.is_keto,
            is_low_carb: record.is_low_carb,
            is_high_protein: record.is_high_protein,
            image_url: record.image_url,
            recipe_url: record.recipe_url,
            tags: record.tags.0,
            rating: record.rating,
            estimated_cost: record.estimated_cost,
            is_meal_prep_friendly: record.is_meal_prep_friendly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_shared::plan::Ingredient;

    fn record() -> RecipeRecord {
        RecipeRecord {
            id: Uuid::new_v4(),
            name: "Oatmeal".to_string(),
            description: None,
            instructions: "Cook the oats.".to_string(),
            servings: 1,
            prep_time_minutes: Some(5),
            cook_time_minutes: Some(10),
            total_time_minutes: Some(15),
            difficulty: "easy".to_string(),
            meal_type: "breakfast".to_string(),
            cuisine_type: "american".to_string(),
            calories: 350.0,
            protein_g: Some(12.0),
            carbs_g: Some(60.0),
            fat_g: Some(6.0),
            fiber_g: None,
            sugar_g: None,
            sodium_mg: None,
            ingredients: Json(vec![Ingredient {
                name: "rolled oats".to_string(),
                quantity: Some("1 cup".to_string()),
            }]),
            is_vegetarian: true,
            is_vegan: false,
            is_gluten_free: false,
            is_dairy_free: false,
            is_nut_free: true,
            is_paleo: false,
            is_keto: false,
            is_low_carb: false,
            is_high_protein: false,
            image_url: None,
            recipe_url: None,
            tags: Json(vec![]),
            rating: None,
            estimated_cost: None,
            is_meal_prep_friendly: true,
            is_active: true,
        }
    }

    #[test]
    fn test_to_response_parses_enums() {
        let response = RecipeService::to_response(record()).unwrap();
        assert_eq!(response.meal_type, MealType::Breakfast);
        assert_eq!(response.difficulty, RecipeDifficulty::Easy);
        assert_eq!(response.cuisine_type, Cuisine::American);
    }

    #[test]
    fn test_to_response_rejects_corrupted_row() {
        let mut bad = record();
        bad.meal_type = "brunch".to_string();
        assert!(RecipeService::to_response(bad).is_err());
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Oatmeal").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(201)).is_err());
    }
}
