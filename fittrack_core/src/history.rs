//! In-memory workout history, newest first.

use crate::WorkoutLog;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Completed workouts, most recent first
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct WorkoutHistory {
    logs: Vec<WorkoutLog>,
}

impl WorkoutHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo history: five workouts over the previous five days
    pub fn sample(now: DateTime<Utc>) -> Self {
        let entries = [
            ("full-body-strength", "Full Body Strength", 1, 42, 6, 18, 8540.0),
            ("upper-body-power", "Upper Body Power", 2, 38, 6, 20, 7200.0),
            ("hiit-cardio", "HIIT Cardio Blast", 3, 25, 4, 12, 0.0),
            ("lower-body-focus", "Lower Body Focus", 4, 35, 4, 14, 12800.0),
            ("full-body-strength", "Full Body Strength", 5, 45, 6, 18, 8900.0),
        ];

        let logs = entries
            .into_iter()
            .map(
                |(session_id, session_name, days_ago, duration, exercises, sets, volume)| {
                    WorkoutLog {
                        id: Uuid::new_v4(),
                        session_id: session_id.into(),
                        session_name: session_name.into(),
                        date: now - Duration::days(days_ago),
                        duration,
                        exercises_completed: exercises,
                        total_sets: sets,
                        total_volume: volume,
                    }
                },
            )
            .collect();

        Self { logs }
    }

    /// Add a log as the most recent entry
    pub fn record(&mut self, log: WorkoutLog) {
        tracing::debug!("Recording workout log {} ({})", log.id, log.session_name);
        self.logs.insert(0, log);
    }

    /// Up to `n` most recent logs
    pub fn recent(&self, n: usize) -> &[WorkoutLog] {
        &self.logs[..n.min(self.logs.len())]
    }

    pub fn latest(&self) -> Option<&WorkoutLog> {
        self.logs.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkoutLog> {
        self.logs.iter()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
