//! Typed plan payloads
//!
//! A plan's `plan_data` column is a JSON document whose shape depends on
//! the plan type. Modeling it as a tagged sum type gives compile-time
//! coverage over the two shapes and lets the API layer enforce the
//! "payload matches plan_type" invariant before anything is persisted.

use crate::enums::{Equipment, ExerciseDifficulty, MealType, MuscleGroup, PlanType, WorkoutFocus};
use crate::health_metrics::MacroSplit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The structured payload of a plan, discriminated by a `type` tag that
/// mirrors [`PlanType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanData {
    Workout(WorkoutPlanData),
    Meal(MealPlanData),
}

impl PlanData {
    /// The plan type this payload is shaped for.
    pub fn plan_type(&self) -> PlanType {
        match self {
            PlanData::Workout(_) => PlanType::Workout,
            PlanData::Meal(_) => PlanType::Meal,
        }
    }

    /// Whether this payload may be stored under the given plan type.
    pub fn matches(&self, plan_type: PlanType) -> bool {
        self.plan_type() == plan_type
    }
}

/// A generated or user-authored workout schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlanData {
    pub duration_weeks: u32,
    pub workout_days_per_week: u32,
    pub difficulty: ExerciseDifficulty,
    pub equipment_used: Vec<Equipment>,
    pub weeks: Vec<WorkoutWeek>,
}

/// One week of a workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWeek {
    /// 1-based week number.
    pub week: u32,
    pub days: Vec<WorkoutDay>,
}

/// One training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// 1-based day number within the week.
    pub day: u32,
    pub focus: WorkoutFocus,
    pub duration_minutes: u32,
    pub exercises: Vec<ExercisePrescription>,
}

/// An exercise slotted into a training day, with its default protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub sets: i32,
    /// Rendered rep range, e.g. `"8-12"`, or `"As indicated"` when the
    /// exercise carries no default range.
    pub reps: String,
    pub rest_seconds: i32,
}

/// A generated or user-authored meal schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanData {
    pub duration_weeks: u32,
    pub target_calories_per_day: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroSplit>,
    pub days: Vec<MealDay>,
}

/// One calendar day of a meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDay {
    pub date: NaiveDate,
    pub target_calories: f64,
    pub meals: MealSlots,
}

/// The four meal slots of a day. A slot is `None` when no candidate
/// recipes of that meal type exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSlots {
    pub breakfast: Option<MealSelection>,
    pub lunch: Option<MealSelection>,
    pub dinner: Option<MealSelection>,
    pub snack: Option<MealSelection>,
}

impl MealSlots {
    pub fn get(&self, meal_type: MealType) -> Option<&MealSelection> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
            MealType::Snack => self.snack.as_ref(),
        }
    }
}

/// Projection of a recipe into a meal slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSelection {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub prep_time_minutes: Option<i32>,
    pub servings: i32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
}

/// A single recipe ingredient with an optional quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_workout() -> PlanData {
        PlanData::Workout(WorkoutPlanData {
            duration_weeks: 1,
            workout_days_per_week: 1,
            difficulty: ExerciseDifficulty::Beginner,
            equipment_used: vec![Equipment::Bodyweight],
            weeks: vec![WorkoutWeek {
                week: 1,
                days: vec![WorkoutDay {
                    day: 1,
                    focus: WorkoutFocus::FullBody,
                    duration_minutes: 45,
                    exercises: vec![],
                }],
            }],
        })
    }

    #[test]
    fn test_payload_type_tagging() {
        let data = sample_workout();
        assert!(data.matches(PlanType::Workout));
        assert!(!data.matches(PlanType::Meal));

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "workout");
    }

    #[test]
    fn test_workout_round_trip() {
        let data = sample_workout();
        let json = serde_json::to_string(&data).unwrap();
        let back: PlanData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_meal_round_trip_with_empty_slots() {
        let data = PlanData::Meal(MealPlanData {
            duration_weeks: 1,
            target_calories_per_day: 2000.0,
            macros: None,
            days: vec![MealDay {
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                target_calories: 2000.0,
                meals: MealSlots {
                    breakfast: None,
                    lunch: None,
                    dinner: None,
                    snack: None,
                },
            }],
        });
        let json = serde_json::to_string(&data).unwrap();
        let back: PlanData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_mismatched_tag_is_rejected() {
        // A meal-tagged document must not deserialize into a workout shape.
        let json = r#"{"type":"meal","duration_weeks":1}"#;
        assert!(serde_json::from_str::<PlanData>(json).is_err());
    }
}
