//! Progression heuristics: ego-lifting and stagnation detection.
//!
//! Every function here is a synchronous, side-effect-free fold over a
//! caller-supplied slice of workout logs. The caller is responsible for
//! loading a consistent snapshot of history (see the `history` module);
//! nothing here touches storage or shared state.
//!
//! All checks compare `sets[0]` of each log, the top set by convention.
//! Logs with sets recorded out of weight order are compared as-is.

use crate::labels::Language;
use crate::types::{
    AlertKind, AlertSeverity, EgoCheck, MuscleGroup, ProgressionAlert, StagnationCheck, WorkoutLog,
};
use chrono::{DateTime, Utc};

/// Session-over-session load increase, in percent, above which a lift is
/// flagged as ego lifting
pub const EGO_THRESHOLD_PERCENT: f64 = 10.0;

/// How many recent sessions the stagnation check looks at
pub const STAGNATION_WINDOW: usize = 4;

/// Minimum sessions required before stagnation can be reported
pub const STAGNATION_MIN_SESSIONS: usize = 3;

/// Sentinel returned when a muscle group has never been trained
pub const NEVER_TRAINED: i64 = 999;

/// Logs for one exercise, most recent first
fn logs_for_exercise<'a>(exercise_id: &str, logs: &'a [WorkoutLog]) -> Vec<&'a WorkoutLog> {
    let mut matching: Vec<_> = logs
        .iter()
        .filter(|log| log.exercise_id == exercise_id)
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

/// Top-set weight of a log, 0 when the log has no sets
fn top_set_weight(log: &WorkoutLog) -> f64 {
    log.sets.first().map(|set| set.weight).unwrap_or(0.0)
}

/// Check whether `current_weight` is too large a jump over the last session
///
/// Requires at least two logged sessions for the exercise; with fewer there
/// is nothing to compare against and the check passes. A last top set of
/// zero weight makes the percentage infinite (or NaN for a zero candidate),
/// which flows into the message unchanged; the result stays advisory and
/// never panics.
pub fn detect_ego_progression(
    exercise_id: &str,
    current_weight: f64,
    logs: &[WorkoutLog],
) -> EgoCheck {
    let exercise_logs = logs_for_exercise(exercise_id, logs);

    if exercise_logs.len() < 2 {
        return EgoCheck {
            is_ego: false,
            message: None,
        };
    }

    let last_weight = top_set_weight(exercise_logs[0]);
    let progress_percent = (current_weight - last_weight) / last_weight * 100.0;

    if progress_percent > EGO_THRESHOLD_PERCENT {
        tracing::debug!(
            "Ego check for {}: {:.1}% over last session",
            exercise_id,
            progress_percent
        );
        return EgoCheck {
            is_ego: true,
            message: Some(format!(
                "Aumento de {:.1}% detectado. Riesgo de ego lifting.",
                progress_percent
            )),
        };
    }

    EgoCheck {
        is_ego: false,
        message: None,
    }
}

/// Check whether the top-set weight has been flat across recent sessions
///
/// Looks at the 4 most recent sessions for the exercise and reports
/// stagnation when at least 3 exist and every top-set weight matches the
/// most recent one exactly. The `weeks` field counts sessions considered,
/// not calendar weeks.
pub fn detect_stagnation(exercise_id: &str, logs: &[WorkoutLog]) -> StagnationCheck {
    let mut exercise_logs = logs_for_exercise(exercise_id, logs);
    exercise_logs.truncate(STAGNATION_WINDOW);

    if exercise_logs.len() < STAGNATION_MIN_SESSIONS {
        return StagnationCheck {
            is_stagnant: false,
            weeks: None,
        };
    }

    let weights: Vec<f64> = exercise_logs.iter().map(|log| top_set_weight(log)).collect();
    let all_same = weights.iter().all(|w| *w == weights[0]);

    if all_same {
        tracing::debug!(
            "Stagnation for {}: {} sessions at {}",
            exercise_id,
            exercise_logs.len(),
            weights[0]
        );
        return StagnationCheck {
            is_stagnant: true,
            weeks: Some(exercise_logs.len()),
        };
    }

    StagnationCheck {
        is_stagnant: false,
        weeks: None,
    }
}

/// Whole days since the given muscle group was last trained
///
/// Returns [`NEVER_TRAINED`] (999) when no log mentions the group. The day
/// count is floored, so a workout earlier today reports 0.
pub fn days_since_last_stimulus(
    muscle_group: MuscleGroup,
    logs: &[WorkoutLog],
    now: DateTime<Utc>,
) -> i64 {
    let mut relevant: Vec<_> = logs
        .iter()
        .filter(|log| log.muscle_groups.contains(&muscle_group))
        .collect();

    if relevant.is_empty() {
        return NEVER_TRAINED;
    }

    relevant.sort_by(|a, b| b.date.cmp(&a.date));
    (now - relevant[0].date).num_days()
}

/// Run both advisory checks for a workout about to be saved
///
/// Mirrors the save flow of the app: the candidate top-set weight is
/// checked against history before the new log is appended. Alerts warn,
/// they never block.
pub fn check_workout(
    exercise_id: &str,
    top_set_weight: f64,
    logs: &[WorkoutLog],
    language: Language,
) -> Vec<ProgressionAlert> {
    let mut alerts = Vec::new();

    let ego = detect_ego_progression(exercise_id, top_set_weight, logs);
    if ego.is_ego {
        alerts.push(ProgressionAlert {
            kind: AlertKind::Ego,
            message: ego.message.unwrap_or_default(),
            severity: AlertSeverity::Warning,
            exercise_id: Some(exercise_id.to_string()),
        });
    }

    let stagnation = detect_stagnation(exercise_id, logs);
    if stagnation.is_stagnant {
        let weeks = stagnation.weeks.unwrap_or(0);
        alerts.push(ProgressionAlert {
            kind: AlertKind::Stagnation,
            message: format!(
                "{} {}",
                weeks,
                language.text(
                    "semanas con el mismo peso. Considera variar el estimulo.",
                    "weeks with the same weight. Consider changing the stimulus."
                )
            ),
            severity: AlertSeverity::Warning,
            exercise_id: Some(exercise_id.to_string()),
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkoutSet;
    use chrono::Duration;

    fn make_set(weight: f64) -> WorkoutSet {
        WorkoutSet {
            weight,
            reps: 8,
            tempo: "3-1-2".into(),
            to_failure: false,
        }
    }

    fn make_log(exercise_id: &str, days_ago: i64, top_weight: f64) -> WorkoutLog {
        WorkoutLog {
            id: format!("wl-{}-{}", exercise_id, days_ago),
            date: Utc::now() - Duration::days(days_ago),
            exercise_id: exercise_id.into(),
            exercise_name: exercise_id.into(),
            muscle_groups: vec![MuscleGroup::Pecho],
            sets: vec![make_set(top_weight), make_set(top_weight * 0.9)],
            suggested_rest: 120,
            notes: None,
        }
    }

    #[test]
    fn test_ego_detected_above_threshold() {
        let logs = vec![make_log("press_banca", 3, 100.0), make_log("press_banca", 10, 95.0)];

        let check = detect_ego_progression("press_banca", 115.0, &logs);
        assert!(check.is_ego);
        assert!(check.message.unwrap().contains("15.0%"));
    }

    #[test]
    fn test_no_ego_at_or_below_threshold() {
        let logs = vec![make_log("press_banca", 3, 100.0), make_log("press_banca", 10, 95.0)];

        let check = detect_ego_progression("press_banca", 108.0, &logs);
        assert!(!check.is_ego);
        assert!(check.message.is_none());

        // Exactly 10% is not flagged (strict comparison)
        let check = detect_ego_progression("press_banca", 110.0, &logs);
        assert!(!check.is_ego);
    }

    #[test]
    fn test_ego_requires_two_sessions() {
        let logs = vec![make_log("press_banca", 3, 100.0)];
        let check = detect_ego_progression("press_banca", 200.0, &logs);
        assert!(!check.is_ego);

        let check = detect_ego_progression("press_banca", 200.0, &[]);
        assert!(!check.is_ego);
    }

    #[test]
    fn test_ego_compares_most_recent_session() {
        // Unsorted input: the 2-day-old log at 100 must win over the older 80
        let logs = vec![make_log("sentadilla", 9, 80.0), make_log("sentadilla", 2, 100.0)];

        // 12% over 100, but only 50% over 80; must flag against 100
        let check = detect_ego_progression("sentadilla", 112.0, &logs);
        assert!(check.is_ego);
        assert!(check.message.unwrap().contains("12.0%"));
    }

    #[test]
    fn test_ego_ignores_other_exercises() {
        let logs = vec![make_log("sentadilla", 3, 50.0), make_log("sentadilla", 10, 50.0)];
        let check = detect_ego_progression("press_banca", 500.0, &logs);
        assert!(!check.is_ego);
    }

    #[test]
    fn test_ego_zero_last_weight_does_not_panic() {
        // Inherited edge case: a zero top set divides by zero and the
        // infinite percentage flows into the message
        let mut log = make_log("dominadas", 2, 0.0);
        log.sets = vec![make_set(0.0)];
        let logs = vec![log, make_log("dominadas", 9, 0.0)];

        let check = detect_ego_progression("dominadas", 50.0, &logs);
        assert!(check.is_ego);
        assert!(check.message.unwrap().contains("inf"));

        // Zero candidate over zero last weight is NaN, which never exceeds
        // the threshold
        let logs = vec![make_log("dominadas", 2, 0.0), make_log("dominadas", 9, 0.0)];
        let check = detect_ego_progression("dominadas", 0.0, &logs);
        assert!(!check.is_ego);
    }

    #[test]
    fn test_stagnation_three_flat_sessions() {
        let logs = vec![
            make_log("press_banca", 1, 80.0),
            make_log("press_banca", 8, 80.0),
            make_log("press_banca", 15, 80.0),
        ];

        let check = detect_stagnation("press_banca", &logs);
        assert!(check.is_stagnant);
        assert_eq!(check.weeks, Some(3));
    }

    #[test]
    fn test_stagnation_window_is_four_sessions() {
        // Five sessions; the oldest differs but falls outside the window
        let logs = vec![
            make_log("press_banca", 1, 80.0),
            make_log("press_banca", 8, 80.0),
            make_log("press_banca", 15, 80.0),
            make_log("press_banca", 22, 80.0),
            make_log("press_banca", 29, 70.0),
        ];

        let check = detect_stagnation("press_banca", &logs);
        assert!(check.is_stagnant);
        assert_eq!(check.weeks, Some(4));
    }

    #[test]
    fn test_no_stagnation_when_weight_moved() {
        let logs = vec![
            make_log("press_banca", 1, 82.5),
            make_log("press_banca", 8, 80.0),
            make_log("press_banca", 15, 80.0),
            make_log("press_banca", 22, 80.0),
        ];

        let check = detect_stagnation("press_banca", &logs);
        assert!(!check.is_stagnant);
        assert_eq!(check.weeks, None);
    }

    #[test]
    fn test_stagnation_requires_three_sessions() {
        let logs = vec![make_log("press_banca", 1, 80.0), make_log("press_banca", 8, 80.0)];
        let check = detect_stagnation("press_banca", &logs);
        assert!(!check.is_stagnant);
    }

    #[test]
    fn test_days_since_last_stimulus() {
        let logs = vec![make_log("press_banca", 5, 80.0), make_log("press_banca", 12, 80.0)];

        let days = days_since_last_stimulus(MuscleGroup::Pecho, &logs, Utc::now());
        assert_eq!(days, 5);
    }

    #[test]
    fn test_days_since_never_trained_sentinel() {
        let logs = vec![make_log("press_banca", 5, 80.0)];
        let days = days_since_last_stimulus(MuscleGroup::Piernas, &logs, Utc::now());
        assert_eq!(days, NEVER_TRAINED);

        assert_eq!(
            days_since_last_stimulus(MuscleGroup::Pecho, &[], Utc::now()),
            NEVER_TRAINED
        );
    }

    #[test]
    fn test_check_workout_collects_both_alerts() {
        let logs = vec![
            make_log("press_banca", 1, 80.0),
            make_log("press_banca", 8, 80.0),
            make_log("press_banca", 15, 80.0),
        ];

        // 90 over 80 is a 12.5% jump on top of three flat sessions
        let alerts = check_workout("press_banca", 90.0, &logs, Language::En);
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().any(|a| a.kind == AlertKind::Ego));
        assert!(alerts.iter().any(|a| a.kind == AlertKind::Stagnation));
        for alert in &alerts {
            assert_eq!(alert.severity, AlertSeverity::Warning);
            assert_eq!(alert.exercise_id.as_deref(), Some("press_banca"));
        }
    }

    #[test]
    fn test_check_workout_clean_history() {
        let logs = vec![
            make_log("press_banca", 1, 82.5),
            make_log("press_banca", 8, 80.0),
            make_log("press_banca", 15, 77.5),
        ];

        let alerts = check_workout("press_banca", 85.0, &logs, Language::Es);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_stagnation_message_localized() {
        let logs = vec![
            make_log("press_banca", 1, 80.0),
            make_log("press_banca", 8, 80.0),
            make_log("press_banca", 15, 80.0),
        ];

        let es = check_workout("press_banca", 80.0, &logs, Language::Es);
        assert!(es[0].message.contains("semanas"));

        let en = check_workout("press_banca", 80.0, &logs, Language::En);
        assert!(en[0].message.contains("weeks"));
    }
}
