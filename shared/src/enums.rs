//! Canonical domain enums
//!
//! One tagged type per concept, shared by the API layer and the database
//! layer. Values serialize as `snake_case` strings and are stored in the
//! database under the same canonical spelling, so `as_str`/`FromStr` must
//! stay in lockstep with the serde representation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored or user-supplied string is not a known
/// variant of the target enum.
#[derive(Debug, Clone, Error)]
#[error("invalid {expected} value: {value}")]
pub struct ParseEnumError {
    pub value: String,
    pub expected: &'static str,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Canonical string form (matches the serde representation).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        value: s.to_string(),
                        expected: stringify!($name),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Gender used for physiological calculations only.
    Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

string_enum! {
    /// Activity level for TDEE calculation.
    ActivityLevel {
        Sedentary => "sedentary",
        Light => "light",
        Moderate => "moderate",
        Active => "active",
        VeryActive => "very_active",
    }
}

impl ActivityLevel {
    /// Activity multiplier applied to BMR.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

string_enum! {
    /// The user's primary fitness goal.
    Goal {
        LoseWeight => "lose_weight",
        Maintain => "maintain",
        GainMuscle => "gain_muscle",
        ImproveFitness => "improve_fitness",
    }
}

string_enum! {
    /// Primary muscle group targeted by an exercise.
    MuscleGroup {
        Chest => "chest",
        Back => "back",
        Shoulders => "shoulders",
        Arms => "arms",
        Biceps => "biceps",
        Triceps => "triceps",
        Legs => "legs",
        Quads => "quads",
        Hamstrings => "hamstrings",
        Glutes => "glutes",
        Calves => "calves",
        Core => "core",
        Abs => "abs",
        Cardio => "cardio",
        FullBody => "full_body",
    }
}

string_enum! {
    /// Equipment an exercise requires.
    Equipment {
        Bodyweight => "bodyweight",
        Dumbbells => "dumbbells",
        Barbell => "barbell",
        ResistanceBands => "resistance_bands",
        Kettlebell => "kettlebell",
        PullUpBar => "pull_up_bar",
        Bench => "bench",
        CableMachine => "cable_machine",
        Treadmill => "treadmill",
        Bike => "bike",
        YogaMat => "yoga_mat",
        None => "none",
    }
}

string_enum! {
    /// Exercise difficulty tier.
    ExerciseDifficulty {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    /// Broad movement category.
    ExerciseType {
        Strength => "strength",
        Cardio => "cardio",
        Flexibility => "flexibility",
        Balance => "balance",
        Plyometric => "plyometric",
    }
}

string_enum! {
    /// Meal slot a recipe belongs to.
    MealType {
        Breakfast => "breakfast",
        Lunch => "lunch",
        Dinner => "dinner",
        Snack => "snack",
    }
}

string_enum! {
    /// Cuisine classification for recipes.
    Cuisine {
        American => "american",
        Italian => "italian",
        Mexican => "mexican",
        Asian => "asian",
        Indian => "indian",
        Mediterranean => "mediterranean",
        Vegetarian => "vegetarian",
        Vegan => "vegan",
        Other => "other",
    }
}

string_enum! {
    /// Preparation difficulty for recipes.
    RecipeDifficulty {
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
    }
}

string_enum! {
    /// Where the user prefers to train.
    WorkoutType {
        Gym => "gym",
        Home => "home",
        Bodyweight => "bodyweight",
        Outdoor => "outdoor",
    }
}

string_enum! {
    /// Kind of plan a payload describes.
    PlanType {
        Workout => "workout",
        Meal => "meal",
    }
}

string_enum! {
    /// Lifecycle state of a plan.
    PlanStatus {
        Draft => "draft",
        Active => "active",
        Completed => "completed",
        Paused => "paused",
    }
}

string_enum! {
    /// Focus assigned to a single workout day by the weekly split.
    WorkoutFocus {
        FullBody => "full_body",
        UpperBody => "upper_body",
        LowerBody => "lower_body",
        Chest => "chest",
        Back => "back",
        Legs => "legs",
        Shoulders => "shoulders",
        Arms => "arms",
    }
}
