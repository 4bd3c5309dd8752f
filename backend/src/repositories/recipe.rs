//! Recipe catalog repository

use anyhow::Result;
use fitcoach_shared::plan::Ingredient;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Recipe row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub instructions: String,
    pub servings: i32,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub difficulty: String,
    pub meal_type: String,
    pub cuisine_type: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub ingredients: Json<Vec<Ingredient>>,
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
    pub tags: Json<Vec<String>>,
    pub rating: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub is_meal_prep_friendly: bool,
    pub is_active: bool,
}

/// Input for creating a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub description: Option<String>,
    pub instructions: String,
    pub servings: i32,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub difficulty: String,
    pub meal_type: String,
    pub cuisine_type: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub ingredients: Json<Vec<Ingredient>>,
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
    pub tags: Json<Vec<String>>,
    pub estimated_cost: Option<f64>,
    pub is_meal_prep_friendly: bool,
}

/// Input for the partial recipe update
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipe {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<i32>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub difficulty: Option<String>,
    pub meal_type: Option<String>,
    pub cuisine_type: Option<String>,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub fiber_g: Option<f64>,
    pub sugar_g: Option<f64>,
    pub sodium_mg: Option<f64>,
    pub ingredients: Option<Json<Vec<Ingredient>>>,
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
    pub tags: Option<Json<Vec<String>>>,
    pub estimated_cost: Option<f64>,
    pub is_meal_prep_friendly: Option<bool>,
}

/// Filters for the list query. `None` skips the filter.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilters {
    pub meal_type: Option<String>,
    pub cuisine_type: Option<String>,
    pub difficulty: Option<String>,
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

/// Dietary constraints for plan generation. Flags are requirements
/// ("must be vegan"), not equality filters.
#[derive(Debug, Clone, Default)]
pub struct DietaryConstraints {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub paleo: bool,
    pub keto: bool,
    pub nut_free: bool,
    pub dairy_free: bool,
}

/// Recipe repository for database operations
pub struct RecipeRepository;

impl RecipeRepository {
    /// Filtered list of active recipes
    pub async fn list(
        pool: &PgPool,
        filters: &RecipeFilters,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<RecipeRecord>> {
        let records = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT * FROM recipes
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR meal_type = $1)
              AND ($2::text IS NULL OR cuisine_type = $2)
              AND ($3::text IS NULL OR difficulty = $3)
              AND ($4::float8 IS NULL OR calories <= $4)
              AND ($5::float8 IS NULL OR protein_g >= $5)
              AND ($6::int IS NULL OR prep_time_minutes <= $6)
              AND ($7::boolean IS NULL OR is_vegetarian = $7)
              AND ($8::boolean IS NULL OR is_vegan = $8)
              AND ($9::boolean IS NULL OR is_gluten_free = $9)
              AND ($10::boolean IS NULL OR is_dairy_free = $10)
              AND ($11::boolean IS NULL OR is_nut_free = $11)
              AND ($12::boolean IS NULL OR is_paleo = $12)
              AND ($13::boolean IS NULL OR is_keto = $13)
              AND ($14::boolean IS NULL OR is_low_carb = $14)
              AND ($15::boolean IS NULL OR is_high_protein = $15)
              AND ($16::boolean IS NULL OR is_meal_prep_friendly = $16)
            ORDER BY name
            OFFSET $17 LIMIT $18
            "#,
        )
        .bind(filters.meal_type.as_deref())
        .bind(filters.cuisine_type.as_deref())
        .bind(filters.difficulty.as_deref())
        .bind(filters.max_calories)
        .bind(filters.min_protein)
        .bind(filters.max_prep_time)
        .bind(filters.is_vegetarian)
        .bind(filters.is_vegan)
        .bind(filters.is_gluten_free)
        .bind(filters.is_dairy_free)
        .bind(filters.is_nut_free)
        .bind(filters.is_paleo)
        .bind(filters.is_keto)
        .bind(filters.is_low_carb)
        .bind(filters.is_high_protein)
        .bind(filters.is_meal_prep_friendly)
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Find an active recipe by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<RecipeRecord>> {
        let record = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT * FROM recipes WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Create a new recipe
    pub async fn create(pool: &PgPool, input: NewRecipe) -> Result<RecipeRecord> {
        let record = sqlx::query_as::<_, RecipeRecord>(
            r#"
            INSERT INTO recipes (
                name, description, instructions, servings, prep_time_minutes,
                cook_time_minutes, total_time_minutes, difficulty, meal_type,
                cuisine_type, calories, protein_g, carbs_g, fat_g, fiber_g,
                sugar_g, sodium_mg, ingredients, is_vegetarian, is_vegan,
                is_gluten_free, is_dairy_free, is_nut_free, is_paleo, is_keto,
                is_low_carb, is_high_protein, image_url, recipe_url, tags,
                estimated_cost, is_meal_prep_friendly
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                    $27, $28, $29, $30, $31, $32)
            RETURNING *
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.instructions)
        .bind(input.servings)
        .bind(input.prep_time_minutes)
        .bind(input.cook_time_minutes)
        .bind(input.total_time_minutes)
        .bind(input.difficulty)
        .bind(input.meal_type)
        .bind(input.cuisine_type)
        .bind(input.calories)
        .bind(input.protein_g)
        .bind(input.carbs_g)
        .bind(input.fat_g)
        .bind(input.fiber_g)
        .bind(input.sugar_g)
        .bind(input.sodium_mg)
        .bind(input.ingredients)
        .bind(input.is_vegetarian)
        .bind(input.is_vegan)
        .bind(input.is_gluten_free)
        .bind(input.is_dairy_free)
        .bind(input.is_nut_free)
        .bind(input.is_paleo)
        .bind(input.is_keto)
        .bind(input.is_low_carb)
        .bind(input.is_high_protein)
        .bind(input.image_url)
        .bind(input.recipe_url)
        .bind(input.tags)
        .bind(input.estimated_cost)
        .bind(input.is_meal_prep_friendly)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Partial update of an active recipe
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateRecipe,
    ) -> Result<Option<RecipeRecord>> {
        let record = sqlx::query_as::<_, RecipeRecord>(
            r#"
            UPDATE recipes SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                instructions = COALESCE($4, instructions),
                servings = COALESCE($5, servings),
                prep_time_minutes = COALESCE($6, prep_time_minutes),
                cook_time_minutes = COALESCE($7, cook_time_minutes),
                total_time_minutes = COALESCE($8, total_time_minutes),
                difficulty = COALESCE($9, difficulty),
                meal_type = COALESCE($10, meal_type),
                cuisine_type = COALESCE($11, cuisine_type),
                calories = COALESCE($12, calories),
                protein_g = COALESCE($13, protein_g),
                carbs_g = COALESCE($14, carbs_g),
                fat_g = COALESCE($15, fat_g),
                fiber_g = COALESCE($16, fiber_g),
                sugar_g = COALESCE($17, sugar_g),
                sodium_mg = COALESCE($18, sodium_mg),
                ingredients = COALESCE($19, ingredients),
                is_vegetarian = COALESCE($20, is_vegetarian),
                is_vegan = COALESCE($21, is_vegan),
                is_gluten_free = COALESCE($22, is_gluten_free),
                is_dairy_free = COALESCE($23, is_dairy_free),
                is_nut_free = COALESCE($24, is_nut_free),
                is_paleo = COALESCE($25, is_paleo),
                is_keto = COALESCE($26, is_keto),
                is_low_carb = COALESCE($27, is_low_carb),
                is_high_protein = COALESCE($28, is_high_protein),
                image_url = COALESCE($29, image_url),
                recipe_url = COALESCE($30, recipe_url),
                tags = COALESCE($31, tags),
                estimated_cost = COALESCE($32, estimated_cost),
                is_meal_prep_friendly = COALESCE($33, is_meal_prep_friendly)
            WHERE id = $1 AND is_active = TRUE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.description)
        .bind(updates.instructions)
        .bind(updates.servings)
        .bind(updates.prep_time_minutes)
        .bind(updates.cook_time_minutes)
        .bind(updates.total_time_minutes)
        .bind(updates.difficulty)
        .bind(updates.meal_type)
        .bind(updates.cuisine_type)
        .bind(updates.calories)
        .bind(updates.protein_g)
        .bind(updates.carbs_g)
        .bind(updates.fat_g)
        .bind(updates.fiber_g)
        .bind(updates.sugar_g)
        .bind(updates.sodium_mg)
        .bind(updates.ingredients)
        .bind(updates.is_vegetarian)
        .bind(updates.is_vegan)
        .bind(updates.is_gluten_free)
        .bind(updates.is_dairy_free)
        .bind(updates.is_nut_free)
        .bind(updates.is_paleo)
        .bind(updates.is_keto)
        .bind(updates.is_low_carb)
        .bind(updates.is_high_protein)
        .bind(updates.image_url)
        .bind(updates.recipe_url)
        .bind(updates.tags)
        .bind(updates.estimated_cost)
        .bind(updates.is_meal_prep_friendly)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Soft-delete. Returns false when nothing was active to delete.
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE recipes SET is_active = FALSE WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Substring search over name, description, ingredients, instructions
    pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<Vec<RecipeRecord>> {
        let pattern = format!("%{}%", query);
        let records = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT * FROM recipes
            WHERE is_active = TRUE
              AND (name ILIKE $1
                   OR description ILIKE $1
                   OR ingredients::text ILIKE $1
                   OR instructions ILIKE $1)
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

    /// Candidates for meal-plan generation: active recipes honoring the
    /// dietary constraints and an optional per-meal calorie ceiling.
    pub async fn find_for_constraints(
        pool: &PgPool,
        constraints: &DietaryConstraints,
        max_meal_calories: Option<f64>,
        limit: i64,
    ) -> Result<Vec<RecipeRecord>> {
        let records = sqlx::query_as::<_, RecipeRecord>(
            r#"
            SELECT * FROM recipes
            WHERE is_active = TRUE
              AND (NOT $1 OR is_vegetarian)
              AND (NOT $2 OR is_vegan)
              AND (NOT $3 OR is_gluten_free)
              AND (NOT $4 OR is_paleo)
              AND (NOT $5 OR is_keto)
              AND (NOT $6 OR is_nut_free)
              AND (NOT $7 OR is_dairy_free)
              AND ($8::float8 IS NULL OR calories <= $8)
            ORDER BY name
            LIMIT $9
            "#,
        )
        .bind(constraints.vegetarian)
        .bind(constraints.vegan)
        .bind(constraints.gluten_free)
        .bind(constraints.paleo)
        .bind(constraints.keto)
        .bind(constraints.nut_free)
        .bind(constraints.dairy_free)
        .bind(max_meal_calories)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
