//! Weekly training plan management.
//!
//! A plan is a named split with one item per day; `descanso` alone in a
//! day's muscle groups marks a rest day. Exactly one plan is active at a
//! time and the workout flow only offers the active plan's exercises for
//! the current day.

use crate::types::{DayOfWeek, Exercise, MuscleGroup, PlanItem, UserFitnessState, WeeklyPlan};
use chrono::{Datelike, Utc, Weekday};
use uuid::Uuid;

/// Suggested rest between sets for newly created exercises, in seconds
pub const DEFAULT_REST_SECONDS: u32 = 120;

/// Map a chrono weekday onto the plan's day enum
pub fn day_from_weekday(weekday: Weekday) -> DayOfWeek {
    match weekday {
        Weekday::Mon => DayOfWeek::Lunes,
        Weekday::Tue => DayOfWeek::Martes,
        Weekday::Wed => DayOfWeek::Miercoles,
        Weekday::Thu => DayOfWeek::Jueves,
        Weekday::Fri => DayOfWeek::Viernes,
        Weekday::Sat => DayOfWeek::Sabado,
        Weekday::Sun => DayOfWeek::Domingo,
    }
}

/// Today's plan day in local time
pub fn current_day() -> DayOfWeek {
    day_from_weekday(chrono::Local::now().weekday())
}

/// Build a fresh plan with every day set to rest
///
/// This is the "base plan" the app creates on first use.
pub fn base_plan(name: &str) -> WeeklyPlan {
    let items = DayOfWeek::ALL
        .iter()
        .map(|day| PlanItem {
            id: format!("item-{}-{}", day.as_str(), Uuid::new_v4()),
            day: *day,
            muscle_groups: vec![MuscleGroup::Descanso],
            exercises: Vec::new(),
        })
        .collect();

    WeeklyPlan {
        id: format!("plan-{}", Uuid::new_v4()),
        name: name.to_string(),
        created_at: Utc::now(),
        is_active: true,
        items,
    }
}

/// The active plan: the one matching `active_plan_id`, else the first
pub fn active_plan(state: &UserFitnessState) -> Option<&WeeklyPlan> {
    state
        .weekly_plans
        .iter()
        .find(|plan| Some(plan.id.as_str()) == state.active_plan_id.as_deref())
        .or_else(|| state.weekly_plans.first())
}

/// Mark a plan as active, clearing the flag on every other plan
///
/// Returns false when no plan has the given id.
pub fn set_active_plan(state: &mut UserFitnessState, plan_id: &str) -> bool {
    if !state.weekly_plans.iter().any(|plan| plan.id == plan_id) {
        return false;
    }

    for plan in &mut state.weekly_plans {
        plan.is_active = plan.id == plan_id;
    }
    state.active_plan_id = Some(plan_id.to_string());
    true
}

/// The plan item for a given day, if the plan defines one
pub fn item_for_day(plan: &WeeklyPlan, day: DayOfWeek) -> Option<&PlanItem> {
    plan.items.iter().find(|item| item.day == day)
}

/// Exercises scheduled for a day (empty on rest days and missing days)
pub fn exercises_for_day(plan: &WeeklyPlan, day: DayOfWeek) -> &[Exercise] {
    item_for_day(plan, day)
        .map(|item| item.exercises.as_slice())
        .unwrap_or(&[])
}

/// Whether a plan item is a rest day
pub fn is_rest_day(item: &PlanItem) -> bool {
    item.muscle_groups.is_empty() || item.muscle_groups.contains(&MuscleGroup::Descanso)
}

/// Replace a day's muscle groups and exercises
///
/// An empty group selection collapses to a rest day, and a rest day keeps
/// no exercises.
pub fn set_day(
    plan: &mut WeeklyPlan,
    day: DayOfWeek,
    muscle_groups: Vec<MuscleGroup>,
    exercises: Vec<Exercise>,
) {
    let muscle_groups = if muscle_groups.is_empty() {
        vec![MuscleGroup::Descanso]
    } else {
        muscle_groups
    };
    let exercises = if muscle_groups.contains(&MuscleGroup::Descanso) {
        Vec::new()
    } else {
        exercises
    };

    if let Some(item) = plan.items.iter_mut().find(|item| item.day == day) {
        item.muscle_groups = muscle_groups;
        item.exercises = exercises;
    } else {
        plan.items.push(PlanItem {
            id: format!("item-{}-{}", day.as_str(), Uuid::new_v4()),
            day,
            muscle_groups,
            exercises,
        });
    }
}

/// Create an exercise slot with the standard rest suggestion
pub fn new_exercise(
    name: &str,
    muscle_group: MuscleGroup,
    video_url: Option<String>,
    order: u32,
) -> Exercise {
    Exercise {
        id: format!("e-{}", Uuid::new_v4()),
        name: name.to_string(),
        muscle_group,
        video_url,
        rest_seconds: DEFAULT_REST_SECONDS,
        order,
    }
}

/// Find an exercise anywhere in a plan by id or case-insensitive name
pub fn find_exercise<'a>(plan: &'a WeeklyPlan, key: &str) -> Option<&'a Exercise> {
    let lowered = key.to_lowercase();
    plan.items
        .iter()
        .flat_map(|item| item.exercises.iter())
        .find(|exercise| exercise.id == key || exercise.name.to_lowercase() == lowered)
}
