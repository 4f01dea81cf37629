//! Macro engine: BMR, TDEE and daily macro targets.
//!
//! All functions are pure arithmetic over a caller-validated profile. None
//! of them validate or fail: a non-positive weight/height/age produces a
//! meaningless number, never an error (validation belongs to the caller).
//!
//! The rounding order in [`calculate_macros`] is deliberate: carbs are
//! derived from the unrounded fat calories and the rounded protein grams,
//! so the macro calories may drift from the target by a few kcal.

use crate::types::{ActivityLevel, Goal, MacroTarget, Sex, UserMacroProfile};

/// Basal metabolic rate via the Mifflin-St Jeor formula, in kcal/day
pub fn calculate_bmr(profile: &UserMacroProfile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Fixed multiplier applied to BMR for each activity level
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

/// Calorie adjustment per goal: 15% deficit, neutral, or 10% surplus
pub fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::Lose => -0.15,
        Goal::Maintain => 0.0,
        Goal::Gain => 0.10,
    }
}

/// Total daily energy expenditure, rounded to the nearest kcal
pub fn calculate_tdee(profile: &UserMacroProfile) -> i32 {
    let bmr = calculate_bmr(profile);
    (bmr * activity_multiplier(profile.activity_level)).round() as i32
}

/// Daily calorie target: TDEE adjusted for the goal
///
/// The adjustment applies to the already-rounded TDEE.
pub fn calculate_target_calories(profile: &UserMacroProfile) -> i32 {
    let tdee = calculate_tdee(profile);
    (f64::from(tdee) * (1.0 + goal_adjustment(profile.goal))).round() as i32
}

/// Daily macro split for a profile
///
/// Protein: 2.2 g/kg when gaining or losing, 2.0 g/kg on maintenance.
/// Fat: 25% of calories when losing, otherwise 28%.
/// Carbs: whatever calories remain.
pub fn calculate_macros(profile: &UserMacroProfile) -> MacroTarget {
    let calories = calculate_target_calories(profile);

    let protein_per_kg = match profile.goal {
        Goal::Gain | Goal::Lose => 2.2,
        Goal::Maintain => 2.0,
    };
    let protein = (profile.weight * protein_per_kg).round() as i32;

    let fat_percent = if profile.goal == Goal::Lose { 0.25 } else { 0.28 };
    let fat_calories = f64::from(calories) * fat_percent;
    let fat = (fat_calories / 9.0).round() as i32;

    // Carbs fill the remainder; fat calories stay unrounded here while
    // protein is already rounded to whole grams.
    let protein_calories = f64::from(protein * 4);
    let used_calories = protein_calories + fat_calories;
    let carb_calories = f64::from(calories) - used_calories;
    let carbs = (carb_calories / 4.0).round() as i32;

    MacroTarget {
        calories,
        protein,
        carbs,
        fat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(goal: Goal) -> UserMacroProfile {
        UserMacroProfile {
            weight: 80.0,
            height: 178.0,
            age: 31,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
            goal,
        }
    }

    #[test]
    fn test_bmr_reference_case() {
        // 10*80 + 6.25*178 - 5*31 + 5 = 1762.5
        let bmr = calculate_bmr(&profile(Goal::Maintain));
        assert!((bmr - 1762.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmr_female_offset() {
        let mut p = profile(Goal::Maintain);
        p.sex = Sex::Female;
        let male = calculate_bmr(&profile(Goal::Maintain));
        let female = calculate_bmr(&p);
        assert!((male - female - 166.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tdee_is_rounded_bmr_times_multiplier() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ] {
            let mut p = profile(Goal::Maintain);
            p.activity_level = level;
            let expected = (calculate_bmr(&p) * activity_multiplier(level)).round() as i32;
            assert_eq!(calculate_tdee(&p), expected);
        }
    }

    #[test]
    fn test_maintain_target_equals_tdee() {
        let p = profile(Goal::Maintain);
        assert_eq!(calculate_target_calories(&p), calculate_tdee(&p));
    }

    #[test]
    fn test_goal_adjustments_direction() {
        let tdee = calculate_tdee(&profile(Goal::Maintain));
        assert!(calculate_target_calories(&profile(Goal::Lose)) < tdee);
        assert!(calculate_target_calories(&profile(Goal::Gain)) > tdee);
    }

    #[test]
    fn test_macros_reference_case() {
        // BMR 1762.5, TDEE round(1762.5*1.55) = 2732, maintain keeps 2732.
        // Protein round(80*2.0) = 160g, fat round(2732*0.28/9) = 85g,
        // carbs round((2732 - 640 - 764.96)/4) = 332g.
        let target = calculate_macros(&profile(Goal::Maintain));
        assert_eq!(
            target,
            MacroTarget {
                calories: 2732,
                protein: 160,
                carbs: 332,
                fat: 85,
            }
        );
    }

    #[test]
    fn test_macros_lose_uses_higher_protein_and_leaner_fat() {
        let target = calculate_macros(&profile(Goal::Lose));
        assert_eq!(target.calories, (2732.0_f64 * 0.85).round() as i32);
        assert_eq!(target.protein, (80.0_f64 * 2.2).round() as i32);
        let fat_calories = f64::from(target.calories) * 0.25;
        assert_eq!(target.fat, (fat_calories / 9.0).round() as i32);
    }

    #[test]
    fn test_macros_non_negative_for_realistic_profiles() {
        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            let target = calculate_macros(&profile(goal));
            assert!(target.protein >= 0);
            assert!(target.carbs >= 0);
            assert!(target.fat >= 0);
            assert_eq!(target.calories, calculate_target_calories(&profile(goal)));
        }
    }

    #[test]
    fn test_idempotent() {
        let p = profile(Goal::Gain);
        assert_eq!(calculate_macros(&p), calculate_macros(&p));
    }
}
