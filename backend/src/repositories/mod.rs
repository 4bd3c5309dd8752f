//! Data access layer
//!
//! Repositories own the SQL; they speak in row-shaped records and leave
//! enum parsing and response shaping to the services.

mod exercise;
mod plan;
mod recipe;
mod user;

pub use exercise::{
    ExerciseFilters, ExerciseRecord, ExerciseRepository, NewExercise, UpdateExercise,
};
pub use plan::{NewPlan, PlanRecord, PlanRepository, UpdatePlan};
pub use recipe::{
    DietaryConstraints, NewRecipe, RecipeFilters, RecipeRecord, RecipeRepository, UpdateRecipe,
};
pub use user::{UpdateUserProfile, UserRecord, UserRepository};
