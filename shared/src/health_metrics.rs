//! Energy and body metric calculations
//!
//! Pure functions for BMR (Mifflin-St Jeor), TDEE, goal-adjusted calorie
//! targets, macro splits, and BMI. Stored values are rounded to two
//! decimals; the unrounded functions are exposed for callers that need the
//! exact chain (and for property tests).

use crate::enums::{ActivityLevel, Gender, Goal};
use serde::{Deserialize, Serialize};

/// Inputs for the derived-metric calculation. All fields optional: a
/// partially filled profile yields a partially filled result rather than
/// an error.
#[derive(Debug, Clone, Default)]
pub struct MetricsInput {
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

/// Derived metrics, rounded to 2 decimals for persistence.
///
/// `None` means "insufficient data", never zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedMetrics {
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub target_calories: Option<f64>,
}

/// Recommended macronutrient grams for a calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Basal Metabolic Rate via Mifflin-St Jeor.
///
/// Male: `10w + 6.25h - 5a + 5`; female/other: `10w + 6.25h - 5a - 161`.
pub fn bmr(weight_kg: f64, height_cm: f64, age: i32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by the activity multiplier.
pub fn tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Goal-adjusted daily calorie target.
///
/// Deficit of 500 kcal for weight loss, surplus of 300 kcal for muscle
/// gain, TDEE otherwise.
pub fn target_calories(tdee: f64, goal: Option<Goal>) -> f64 {
    match goal {
        Some(Goal::LoseWeight) => tdee - 500.0,
        Some(Goal::GainMuscle) => tdee + 300.0,
        _ => tdee,
    }
}

/// Goal-based calorie percentages as (protein, carbs, fat).
fn macro_percentages(goal: Option<Goal>) -> (f64, f64, f64) {
    match goal {
        Some(Goal::LoseWeight) => (0.35, 0.30, 0.35),
        Some(Goal::GainMuscle) => (0.30, 0.45, 0.25),
        _ => (0.25, 0.50, 0.25),
    }
}

/// Macro grams for a calorie target: 4 kcal/g for protein and carbs,
/// 9 kcal/g for fat. Grams rounded to 2 decimals.
pub fn macro_split(target_calories: f64, goal: Option<Goal>) -> MacroSplit {
    let (protein_pct, carb_pct, fat_pct) = macro_percentages(goal);
    MacroSplit {
        protein_g: round2(target_calories * protein_pct / 4.0),
        carbs_g: round2(target_calories * carb_pct / 4.0),
        fat_g: round2(target_calories * fat_pct / 9.0),
    }
}

/// Body Mass Index: `weight / (height/100)^2`, rounded to 2 decimals.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Compute the full derived-metric set from a (possibly partial) profile.
///
/// BMR requires age, gender, height, and weight; if any is missing the
/// whole calculation is skipped. TDEE and the calorie target additionally
/// require an activity level. The unrounded chain is used throughout and
/// each stored value is rounded independently.
pub fn calculate(input: &MetricsInput) -> DerivedMetrics {
    let (Some(age), Some(gender), Some(height_cm), Some(weight_kg)) =
        (input.age, input.gender, input.height_cm, input.weight_kg)
    else {
        return DerivedMetrics::default();
    };

    let bmr_value = bmr(weight_kg, height_cm, age, gender);

    let Some(activity_level) = input.activity_level else {
        return DerivedMetrics {
            bmr: Some(round2(bmr_value)),
            ..Default::default()
        };
    };

    let tdee_value = tdee(bmr_value, activity_level);
    let target = target_calories(tdee_value, input.goal);

    DerivedMetrics {
        bmr: Some(round2(bmr_value)),
        tdee: Some(round2(tdee_value)),
        target_calories: Some(round2(target)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_input() -> MetricsInput {
        MetricsInput {
            age: Some(30),
            gender: Some(Gender::Male),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Maintain),
        }
    }

    #[test]
    fn test_reference_male_maintain() {
        // 30y male, 180cm, 80kg, moderate, maintain
        let metrics = calculate(&full_input());
        assert_eq!(metrics.bmr, Some(1805.0));
        assert_eq!(metrics.tdee, Some(2797.75));
        assert_eq!(metrics.target_calories, Some(2797.75));
    }

    #[test]
    fn test_reference_lose_weight() {
        let mut input = full_input();
        input.goal = Some(Goal::LoseWeight);
        let metrics = calculate(&input);
        assert_eq!(metrics.target_calories, Some(2297.75));

        let split = macro_split(metrics.target_calories.unwrap(), input.goal);
        assert_eq!(split.protein_g, 201.05);
        assert_eq!(split.carbs_g, 172.33);
        assert_eq!(split.fat_g, 89.36);
    }

    #[test]
    fn test_female_offset() {
        let bmr_male = bmr(60.0, 165.0, 30, Gender::Male);
        let bmr_female = bmr(60.0, 165.0, 30, Gender::Female);
        let bmr_other = bmr(60.0, 165.0, 30, Gender::Other);
        assert_eq!(bmr_male - bmr_female, 166.0);
        assert_eq!(bmr_female, bmr_other);
    }

    #[test]
    fn test_missing_inputs_skip_calculation() {
        let metrics = calculate(&MetricsInput {
            age: Some(30),
            gender: None,
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some(ActivityLevel::Moderate),
            goal: None,
        });
        assert_eq!(metrics, DerivedMetrics::default());
    }

    #[test]
    fn test_missing_activity_level_leaves_tdee_unset() {
        let mut input = full_input();
        input.activity_level = None;
        let metrics = calculate(&input);
        assert_eq!(metrics.bmr, Some(1805.0));
        assert_eq!(metrics.tdee, None);
        assert_eq!(metrics.target_calories, None);
    }

    #[test]
    fn test_bmi() {
        assert_eq!(bmi(80.0, 180.0), 24.69);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// TDEE is exactly BMR times the activity multiplier.
        #[test]
        fn prop_tdee_is_bmr_times_multiplier(
            weight in 30.0f64..300.0,
            height in 100.0f64..250.0,
            age in 13i32..120,
        ) {
            for level in [
                ActivityLevel::Sedentary,
                ActivityLevel::Light,
                ActivityLevel::Moderate,
                ActivityLevel::Active,
                ActivityLevel::VeryActive,
            ] {
                let base = bmr(weight, height, age, Gender::Male);
                prop_assert_eq!(tdee(base, level), base * level.multiplier());
            }
        }

        /// Target calories are a fixed offset of TDEE per goal.
        #[test]
        fn prop_target_calories_offsets(tdee_value in 1000.0f64..6000.0) {
            prop_assert_eq!(target_calories(tdee_value, Some(Goal::LoseWeight)), tdee_value - 500.0);
            prop_assert_eq!(target_calories(tdee_value, Some(Goal::GainMuscle)), tdee_value + 300.0);
            prop_assert_eq!(target_calories(tdee_value, Some(Goal::Maintain)), tdee_value);
            prop_assert_eq!(target_calories(tdee_value, Some(Goal::ImproveFitness)), tdee_value);
            prop_assert_eq!(target_calories(tdee_value, None), tdee_value);
        }

        /// Macro grams convert back to approximately the calorie target.
        #[test]
        fn prop_macro_calories_sum_to_target(target in 1000.0f64..6000.0) {
            for goal in [None, Some(Goal::LoseWeight), Some(Goal::GainMuscle), Some(Goal::Maintain)] {
                let split = macro_split(target, goal);
                let total = split.protein_g * 4.0 + split.carbs_g * 4.0 + split.fat_g * 9.0;
                // Each gram value is rounded to 2 decimals, so the worst
                // case error is half a cent per macro times its kcal/g.
                prop_assert!((total - target).abs() < 0.1);
            }
        }

        /// BMR is positive over the valid input space.
        #[test]
        fn prop_bmr_positive(
            weight in 30.0f64..300.0,
            height in 100.0f64..250.0,
            age in 13i32..120,
        ) {
            prop_assert!(bmr(weight, height, age, Gender::Male) > 0.0);
            prop_assert!(bmr(weight, height, age, Gender::Female) > 0.0);
        }
    }
}
