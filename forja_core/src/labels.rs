//! Bilingual display labels.
//!
//! The app is Spanish-first with an English fallback; every label lookup is
//! a pure function over the enum domain.

use crate::types::{ActivityLevel, DayOfWeek, Goal, MealType, MuscleGroup, Sex};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display language
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    /// Pick the variant matching this language
    pub fn text<'a>(&self, es: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Es => es,
            Language::En => en,
        }
    }
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(crate::Error::Parse(format!("unknown language: {}", other))),
        }
    }
}

/// Three-letter day abbreviation
pub fn day_label(day: DayOfWeek, language: Language) -> &'static str {
    match (day, language) {
        (DayOfWeek::Lunes, Language::Es) => "LUN",
        (DayOfWeek::Martes, Language::Es) => "MAR",
        (DayOfWeek::Miercoles, Language::Es) => "MIE",
        (DayOfWeek::Jueves, Language::Es) => "JUE",
        (DayOfWeek::Viernes, Language::Es) => "VIE",
        (DayOfWeek::Sabado, Language::Es) => "SAB",
        (DayOfWeek::Domingo, Language::Es) => "DOM",
        (DayOfWeek::Lunes, Language::En) => "MON",
        (DayOfWeek::Martes, Language::En) => "TUE",
        (DayOfWeek::Miercoles, Language::En) => "WED",
        (DayOfWeek::Jueves, Language::En) => "THU",
        (DayOfWeek::Viernes, Language::En) => "FRI",
        (DayOfWeek::Sabado, Language::En) => "SAT",
        (DayOfWeek::Domingo, Language::En) => "SUN",
    }
}

pub fn muscle_group_label(group: MuscleGroup, language: Language) -> &'static str {
    match (group, language) {
        (MuscleGroup::Pecho, Language::Es) => "Pecho",
        (MuscleGroup::Espalda, Language::Es) => "Espalda",
        (MuscleGroup::Hombros, Language::Es) => "Hombros",
        (MuscleGroup::Biceps, Language::Es) => "Bíceps",
        (MuscleGroup::Triceps, Language::Es) => "Tríceps",
        (MuscleGroup::Piernas, Language::Es) => "Piernas",
        (MuscleGroup::Gluteos, Language::Es) => "Glúteos",
        (MuscleGroup::Core, Language::Es) => "Core",
        (MuscleGroup::Cardio, Language::Es) => "Cardio",
        (MuscleGroup::Descanso, Language::Es) => "Descanso",
        (MuscleGroup::Pecho, Language::En) => "Chest",
        (MuscleGroup::Espalda, Language::En) => "Back",
        (MuscleGroup::Hombros, Language::En) => "Shoulders",
        (MuscleGroup::Biceps, Language::En) => "Biceps",
        (MuscleGroup::Triceps, Language::En) => "Triceps",
        (MuscleGroup::Piernas, Language::En) => "Legs",
        (MuscleGroup::Gluteos, Language::En) => "Glutes",
        (MuscleGroup::Core, Language::En) => "Core",
        (MuscleGroup::Cardio, Language::En) => "Cardio",
        (MuscleGroup::Descanso, Language::En) => "Rest",
    }
}

pub fn activity_label(level: ActivityLevel, language: Language) -> &'static str {
    match (level, language) {
        (ActivityLevel::Sedentary, Language::Es) => "Sedentario (sin ejercicio)",
        (ActivityLevel::Light, Language::Es) => "Ligero (1-3 días/semana)",
        (ActivityLevel::Moderate, Language::Es) => "Moderado (3-5 días/semana)",
        (ActivityLevel::Active, Language::Es) => "Activo (6-7 días/semana)",
        (ActivityLevel::VeryActive, Language::Es) => "Muy activo (2x al día)",
        (ActivityLevel::Sedentary, Language::En) => "Sedentary (no exercise)",
        (ActivityLevel::Light, Language::En) => "Light (1-3 days/week)",
        (ActivityLevel::Moderate, Language::En) => "Moderate (3-5 days/week)",
        (ActivityLevel::Active, Language::En) => "Active (6-7 days/week)",
        (ActivityLevel::VeryActive, Language::En) => "Very active (2x per day)",
    }
}

pub fn goal_label(goal: Goal, language: Language) -> &'static str {
    match (goal, language) {
        (Goal::Lose, Language::Es) => "Perder grasa",
        (Goal::Maintain, Language::Es) => "Mantener",
        (Goal::Gain, Language::Es) => "Ganar músculo",
        (Goal::Lose, Language::En) => "Lose fat",
        (Goal::Maintain, Language::En) => "Maintain",
        (Goal::Gain, Language::En) => "Gain muscle",
    }
}

pub fn sex_label(sex: Sex, language: Language) -> &'static str {
    match (sex, language) {
        (Sex::Male, Language::Es) => "Hombre",
        (Sex::Female, Language::Es) => "Mujer",
        (Sex::Male, Language::En) => "Male",
        (Sex::Female, Language::En) => "Female",
    }
}

pub fn meal_type_label(meal_type: MealType, language: Language) -> &'static str {
    match (meal_type, language) {
        (MealType::Breakfast, Language::Es) => "Desayuno",
        (MealType::Lunch, Language::Es) => "Almuerzo",
        (MealType::Snack, Language::Es) => "Merienda",
        (MealType::Dinner, Language::Es) => "Cena",
        (MealType::Breakfast, Language::En) => "Breakfast",
        (MealType::Lunch, Language::En) => "Lunch",
        (MealType::Snack, Language::En) => "Snack",
        (MealType::Dinner, Language::En) => "Dinner",
    }
}

/// Format a rest duration as `m:ss`
pub fn format_time(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}
