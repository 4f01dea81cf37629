//! Core domain types for the Forja fitness tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Days and muscle groups for weekly planning
//! - Workout logs and their sets
//! - Body weight entries
//! - Nutrition profiles, macro targets and meals
//! - Advisory alerts produced by the progression heuristics
//!
//! Serialized field names keep the original app's JSON casing so existing
//! data files remain readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Days and Muscle Groups
// ============================================================================

/// Day of the week, Spanish names on the wire
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl DayOfWeek {
    /// All days, Monday first (weekly plan display order)
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Lunes,
        DayOfWeek::Martes,
        DayOfWeek::Miercoles,
        DayOfWeek::Jueves,
        DayOfWeek::Viernes,
        DayOfWeek::Sabado,
        DayOfWeek::Domingo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Lunes => "lunes",
            DayOfWeek::Martes => "martes",
            DayOfWeek::Miercoles => "miercoles",
            DayOfWeek::Jueves => "jueves",
            DayOfWeek::Viernes => "viernes",
            DayOfWeek::Sabado => "sabado",
            DayOfWeek::Domingo => "domingo",
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lunes" => Ok(DayOfWeek::Lunes),
            "martes" => Ok(DayOfWeek::Martes),
            "miercoles" => Ok(DayOfWeek::Miercoles),
            "jueves" => Ok(DayOfWeek::Jueves),
            "viernes" => Ok(DayOfWeek::Viernes),
            "sabado" => Ok(DayOfWeek::Sabado),
            "domingo" => Ok(DayOfWeek::Domingo),
            other => Err(crate::Error::Parse(format!("unknown day: {}", other))),
        }
    }
}

/// Muscle group targeted by an exercise or plan day
///
/// `Descanso` marks a rest day rather than an actual muscle group.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Pecho,
    Espalda,
    Hombros,
    Biceps,
    Triceps,
    Piernas,
    Gluteos,
    Core,
    Cardio,
    Descanso,
}

impl MuscleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Pecho => "pecho",
            MuscleGroup::Espalda => "espalda",
            MuscleGroup::Hombros => "hombros",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Piernas => "piernas",
            MuscleGroup::Gluteos => "gluteos",
            MuscleGroup::Core => "core",
            MuscleGroup::Cardio => "cardio",
            MuscleGroup::Descanso => "descanso",
        }
    }
}

impl FromStr for MuscleGroup {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pecho" => Ok(MuscleGroup::Pecho),
            "espalda" => Ok(MuscleGroup::Espalda),
            "hombros" => Ok(MuscleGroup::Hombros),
            "biceps" => Ok(MuscleGroup::Biceps),
            "triceps" => Ok(MuscleGroup::Triceps),
            "piernas" => Ok(MuscleGroup::Piernas),
            "gluteos" => Ok(MuscleGroup::Gluteos),
            "core" => Ok(MuscleGroup::Core),
            "cardio" => Ok(MuscleGroup::Cardio),
            "descanso" => Ok(MuscleGroup::Descanso),
            other => Err(crate::Error::Parse(format!(
                "unknown muscle group: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// A single recorded set within a workout log
///
/// `tempo` is free-form (e.g. "3-1-2", eccentric-pause-concentric) and is
/// never validated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub weight: f64,
    pub reps: u32,
    pub tempo: String,
    pub to_failure: bool,
}

/// A logged exercise session
///
/// Sets are ordered; by convention `sets[0]` is the top set that the
/// progression heuristics compare across sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: String,
    pub date: DateTime<Utc>,
    pub exercise_id: String,
    pub exercise_name: String,
    pub muscle_groups: Vec<MuscleGroup>,
    pub sets: Vec<WorkoutSet>,
    pub suggested_rest: u32,
    pub notes: Option<String>,
}

/// A body weight entry in kilograms
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyWeightLog {
    pub id: String,
    pub date: DateTime<Utc>,
    pub weight: f64,
}

// ============================================================================
// Weekly Plan Types
// ============================================================================

/// An exercise slot inside a weekly plan
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub video_url: Option<String>,
    /// Suggested rest between sets, not user-editable
    pub rest_seconds: u32,
    pub order: u32,
}

/// One day of a weekly plan
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: String,
    pub day: DayOfWeek,
    pub muscle_groups: Vec<MuscleGroup>,
    pub exercises: Vec<Exercise>,
}

/// A named weekly training split
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub items: Vec<PlanItem>,
}

// ============================================================================
// Nutrition Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(crate::Error::Parse(format!("unknown sex: {}", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl FromStr for ActivityLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(crate::Error::Parse(format!(
                "unknown activity level: {}",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl FromStr for Goal {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(crate::Error::Parse(format!("unknown goal: {}", other))),
        }
    }
}

/// Body profile used by the macro engine
///
/// Immutable input, owned by the caller; targets are recomputed on every
/// request and never cached. Validation (positive weight/height/age) is the
/// caller's responsibility.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserMacroProfile {
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// Daily calorie and macro targets, all integer units
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroTarget {
    /// kcal/day
    pub calories: i32,
    /// grams/day
    pub protein: i32,
    /// grams/day
    pub carbs: i32,
    /// grams/day
    pub fat: i32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl FromStr for MealType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "snack" => Ok(MealType::Snack),
            "dinner" => Ok(MealType::Dinner),
            other => Err(crate::Error::Parse(format!("unknown meal type: {}", other))),
        }
    }
}

/// A planned meal with its macro content
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub order: u32,
}

/// The meals planned for one day of the week
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayMealPlan {
    pub day: DayOfWeek,
    pub meals: Vec<Meal>,
}

// ============================================================================
// Advisory Alerts
// ============================================================================

/// Kind of progression alert
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Stagnation,
    Ego,
    Overtraining,
    Blocked,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// Advisory warning raised while logging a workout
///
/// Alerts are display-only: saving a workout is never blocked.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub severity: AlertSeverity,
    pub exercise_id: Option<String>,
}

/// Result of the ego-lifting check
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EgoCheck {
    pub is_ego: bool,
    pub message: Option<String>,
}

/// Result of the stagnation check
///
/// `weeks` counts the most recent sessions considered (at most 4), not
/// calendar weeks; the name is kept from the original data model.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StagnationCheck {
    pub is_stagnant: bool,
    pub weeks: Option<usize>,
}

// ============================================================================
// Persistent User State
// ============================================================================

/// Single-user persistent state: profile, weekly plans and meal plans
///
/// Workout and body weight logs live in the append-only WAL instead, see
/// the `wal` and `history` modules.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFitnessState {
    pub macro_profile: Option<UserMacroProfile>,
    pub weekly_plans: Vec<WeeklyPlan>,
    pub active_plan_id: Option<String>,
    pub meal_plans: Vec<DayMealPlan>,
}

impl Default for UserFitnessState {
    fn default() -> Self {
        Self {
            macro_profile: None,
            weekly_plans: Vec::new(),
            active_plan_id: None,
            meal_plans: empty_meal_week(),
        }
    }
}

/// One empty meal plan per day, Monday first
pub fn empty_meal_week() -> Vec<DayMealPlan> {
    DayOfWeek::ALL
        .iter()
        .map(|day| DayMealPlan {
            day: *day,
            meals: Vec::new(),
        })
        .collect()
}
