//! Business logic layer

mod exercise;
mod plan;
mod recipe;
mod user;

pub use exercise::ExerciseService;
pub use plan::{
    build_meal_plan, build_workout_plan, derive_difficulty, weekly_split, ExerciseCandidate,
    MealParams, PlanService, RecipeCandidate, WorkoutParams,
};
pub use recipe::RecipeService;
pub use user::UserService;
