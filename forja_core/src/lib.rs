#![forbid(unsafe_code)]

//! Core domain model and business logic for the Forja fitness tracker.
//!
//! This crate provides:
//! - Domain types (workouts, plans, meals, profiles)
//! - Macro engine (BMR, TDEE, macro targets)
//! - Progression heuristics (ego lifting, stagnation, stimulus recency)
//! - Weekly plan and meal plan management
//! - Persistence (WAL, CSV archive, state)
//! - Bilingual display labels

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod labels;
pub mod nutrition;
pub mod heuristics;
pub mod plan;
pub mod meals;
pub mod wal;
pub mod csv_rollup;
pub mod state;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use labels::Language;
pub use wal::{JsonlSink, LogSink};
pub use history::{load_body_weight_logs, load_workout_logs};
pub use heuristics::{
    check_workout, days_since_last_stimulus, detect_ego_progression, detect_stagnation,
};
pub use nutrition::{calculate_bmr, calculate_macros, calculate_target_calories, calculate_tdee};
