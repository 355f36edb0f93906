//! Active workout state machine.
//!
//! An [`ActiveWorkout`] is a private deep copy of a [`WorkoutSession`]
//! template plus a cursor (exercise index, set index). Every operation takes
//! `&self` and returns a new value, so the caller decides when an update
//! becomes current and the template is never touched.

use crate::{WorkoutExercise, WorkoutSession, WorkoutSet};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Editable fields of a set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
    Reps,
    Weight,
}

/// What happened after completing the current set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// Cursor moved to the next set of the same exercise
    SetAdvanced { rest_seconds: u32 },
    /// Cursor moved to the first set of the next exercise
    ExerciseAdvanced { rest_seconds: u32 },
    /// Last set of the last exercise; cursor unchanged
    WorkoutFinished,
}

impl SetOutcome {
    /// Rest to start after this outcome, if any
    pub fn rest_seconds(&self) -> Option<u32> {
        match self {
            SetOutcome::SetAdvanced { rest_seconds }
            | SetOutcome::ExerciseAdvanced { rest_seconds } => Some(*rest_seconds),
            SetOutcome::WorkoutFinished => None,
        }
    }
}

/// Completion metrics for an active workout
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Progress {
    pub completed_sets: usize,
    pub total_sets: usize,
    pub percent: f64,
}

/// A workout in progress
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActiveWorkout {
    pub session_id: String,
    pub start_time: DateTime<Utc>,
    pub current_exercise_index: usize,
    pub current_set_index: usize,
    pub exercises: Vec<WorkoutExercise>,
    pub is_resting: bool,
    pub rest_end_time: Option<DateTime<Utc>>,
}

impl ActiveWorkout {
    /// Begin a workout from a template
    ///
    /// Exercises and sets are cloned and every set starts incomplete. The
    /// template must have at least one exercise and no exercise without sets
    /// (see [`WorkoutSession::validate`]).
    pub fn start(template: &WorkoutSession, now: DateTime<Utc>) -> Self {
        let exercises = template
            .exercises
            .iter()
            .map(|e| WorkoutExercise {
                sets: e
                    .sets
                    .iter()
                    .map(|s| WorkoutSet {
                        completed: false,
                        ..s.clone()
                    })
                    .collect(),
                ..e.clone()
            })
            .collect();

        tracing::debug!("Starting workout from template '{}'", template.id);

        Self {
            session_id: template.id.clone(),
            start_time: now,
            current_exercise_index: 0,
            current_set_index: 0,
            exercises,
            is_resting: false,
            rest_end_time: None,
        }
    }

    pub fn current_exercise(&self) -> Option<&WorkoutExercise> {
        self.exercises.get(self.current_exercise_index)
    }

    pub fn current_set(&self) -> Option<&WorkoutSet> {
        self.current_exercise()
            .and_then(|e| e.sets.get(self.current_set_index))
    }

    fn current_set_mut(&mut self) -> Option<&mut WorkoutSet> {
        let set_index = self.current_set_index;
        self.exercises
            .get_mut(self.current_exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
    }

    /// First set of the first exercise
    pub fn is_at_start(&self) -> bool {
        self.current_exercise_index == 0 && self.current_set_index == 0
    }

    /// Last set of the last exercise
    pub fn is_at_end(&self) -> bool {
        self.current_exercise_index + 1 >= self.exercises.len()
            && self
                .current_exercise()
                .map_or(true, |e| self.current_set_index + 1 >= e.sets.len())
    }

    /// Replace a field of the current set
    ///
    /// No clamping happens here; `reps` is truncated to a whole number.
    pub fn update_field(&self, field: SetField, value: f64) -> Self {
        let mut next = self.clone();
        if let Some(set) = next.current_set_mut() {
            match field {
                SetField::Reps => set.reps = value as u32,
                SetField::Weight => set.weight = value,
            }
        }
        next
    }

    /// Add `delta` to a field of the current set, never going below zero
    pub fn nudge(&self, field: SetField, delta: f64) -> Self {
        let current = match (self.current_set(), field) {
            (Some(set), SetField::Reps) => f64::from(set.reps),
            (Some(set), SetField::Weight) => set.weight,
            (None, _) => return self.clone(),
        };
        self.update_field(field, (current + delta).max(0.0))
    }

    /// Mark the current set done and move the cursor
    ///
    /// The rest period in the outcome is the one belonging to the exercise
    /// the completed set is part of.
    pub fn complete_current_set(&self) -> (Self, SetOutcome) {
        let mut next = self.clone();

        let rest_seconds = match next.exercises.get_mut(next.current_exercise_index) {
            Some(exercise) => {
                if let Some(set) = exercise.sets.get_mut(next.current_set_index) {
                    set.completed = true;
                }
                exercise.rest_seconds
            }
            None => return (next, SetOutcome::WorkoutFinished),
        };

        let set_count = next.exercises[next.current_exercise_index].sets.len();

        let outcome = if next.current_set_index + 1 < set_count {
            next.current_set_index += 1;
            SetOutcome::SetAdvanced { rest_seconds }
        } else if next.current_exercise_index + 1 < next.exercises.len() {
            next.current_exercise_index += 1;
            next.current_set_index = 0;
            SetOutcome::ExerciseAdvanced { rest_seconds }
        } else {
            SetOutcome::WorkoutFinished
        };

        if outcome != SetOutcome::WorkoutFinished {
            next.is_resting = true;
        }

        tracing::debug!(
            "Completed set; cursor now at exercise {} set {} ({:?})",
            next.current_exercise_index,
            next.current_set_index,
            outcome
        );

        (next, outcome)
    }

    /// Move the cursor back one set, crossing into the previous exercise
    pub fn navigate_previous(&self) -> Self {
        let mut next = self.clone();
        if next.current_set_index > 0 {
            next.current_set_index -= 1;
        } else if next.current_exercise_index > 0 {
            next.current_exercise_index -= 1;
            next.current_set_index = next.exercises[next.current_exercise_index]
                .sets
                .len()
                .saturating_sub(1);
        }
        next
    }

    /// Move the cursor forward one set, crossing into the next exercise
    pub fn navigate_next(&self) -> Self {
        let mut next = self.clone();
        let set_count = next.current_exercise().map_or(0, |e| e.sets.len());
        if next.current_set_index + 1 < set_count {
            next.current_set_index += 1;
        } else if next.current_exercise_index + 1 < next.exercises.len() {
            next.current_exercise_index += 1;
            next.current_set_index = 0;
        }
        next
    }

    /// Record that a rest period of `seconds` started at `now`
    pub fn begin_rest(&self, now: DateTime<Utc>, seconds: u32) -> Self {
        Self {
            is_resting: true,
            rest_end_time: Some(now + Duration::seconds(i64::from(seconds))),
            ..self.clone()
        }
    }

    /// Clear the resting flag
    pub fn end_rest(&self) -> Self {
        Self {
            is_resting: false,
            rest_end_time: None,
            ..self.clone()
        }
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.completed_sets()).sum()
    }

    pub fn progress(&self) -> Progress {
        let completed_sets = self.completed_sets();
        let total_sets = self.total_sets();
        let percent = if total_sets == 0 {
            0.0
        } else {
            completed_sets as f64 / total_sets as f64 * 100.0
        };

        Progress {
            completed_sets,
            total_sets,
            percent,
        }
    }
}
