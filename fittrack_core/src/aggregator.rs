//! Workout completion: summary metrics, log entries and cumulative stats.

use crate::{ActiveWorkout, UserStats, WorkoutLog, WorkoutSession};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Metrics derived from the current state of a workout
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorkoutSummary {
    /// Whole minutes since the workout started
    pub duration_minutes: u32,
    /// Exercises with at least one completed set
    pub exercises_completed: u32,
    pub total_sets: u32,
    /// `weight * reps` over completed sets only
    pub total_volume: f64,
}

/// Summarize a workout, possibly only partially completed
pub fn summarize(workout: &ActiveWorkout, now: DateTime<Utc>) -> WorkoutSummary {
    let minutes = (now - workout.start_time).num_minutes().max(0);
    let duration_minutes = u32::try_from(minutes).unwrap_or(u32::MAX);

    let exercises_completed = workout
        .exercises
        .iter()
        .filter(|e| e.sets.iter().any(|s| s.completed))
        .count() as u32;

    let completed = || workout.exercises.iter().flat_map(|e| &e.sets).filter(|s| s.completed);

    WorkoutSummary {
        duration_minutes,
        exercises_completed,
        total_sets: completed().count() as u32,
        total_volume: completed().map(|s| s.volume()).sum(),
    }
}

/// Fold a finished workout into a new log entry and updated statistics
///
/// The streak grows on every completion; missed days are not checked.
/// `weekly_completed` is clamped to the weekly goal.
pub fn complete(
    workout: &ActiveWorkout,
    template: &WorkoutSession,
    stats: &UserStats,
    now: DateTime<Utc>,
) -> (WorkoutLog, UserStats) {
    let summary = summarize(workout, now);

    let log = WorkoutLog {
        id: Uuid::new_v4(),
        session_id: template.id.clone(),
        session_name: template.name.clone(),
        date: now,
        duration: summary.duration_minutes,
        exercises_completed: summary.exercises_completed,
        total_sets: summary.total_sets,
        total_volume: summary.total_volume,
    };

    let updated = UserStats {
        total_workouts: stats.total_workouts + 1,
        total_duration: stats.total_duration.saturating_add(summary.duration_minutes),
        total_volume: stats.total_volume + summary.total_volume,
        current_streak: stats.current_streak + 1,
        weekly_completed: (stats.weekly_completed + 1).min(stats.weekly_goal),
        ..stats.clone()
    };

    tracing::info!(
        "Completed '{}': {} sets, {} exercises, volume {}, {} min",
        template.name,
        log.total_sets,
        log.exercises_completed,
        log.total_volume,
        log.duration
    );

    (log, updated)
}

/// Throw a workout away without recording anything
pub fn cancel(workout: ActiveWorkout) {
    tracing::info!(
        "Cancelled workout '{}' with {} of {} sets completed",
        workout.session_id,
        workout.completed_sets(),
        workout.total_sets()
    );
}
