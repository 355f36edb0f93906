//! Core domain types for FitTrack.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their classification
//! - Workout templates (sessions, exercises, sets)
//! - Workout logs and cumulative user statistics
//! - The catalog holding the fixed library

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Exercise Types
// ============================================================================

/// Broad category of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
    Bodyweight,
}

impl ExerciseCategory {
    /// Parse a category name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Some(Self::Strength),
            "cardio" => Some(Self::Cardio),
            "flexibility" => Some(Self::Flexibility),
            "bodyweight" => Some(Self::Bodyweight),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
            Self::Bodyweight => "bodyweight",
        };
        f.write_str(name)
    }
}

/// Difficulty rating shared by exercises and templates
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// An exercise definition from the library (e.g., "Bench Press")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_groups: Vec<String>,
    pub description: String,
    pub instructions: Vec<String>,
    pub tips: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
    pub difficulty: Difficulty,
}

// ============================================================================
// Workout Template Types
// ============================================================================

/// One unit of work: reps at a weight
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub reps: u32,
    /// Unit-less; pounds by convention
    pub weight: f64,
    pub completed: bool,
}

impl WorkoutSet {
    /// A target set that has not been performed yet
    pub fn target(reps: u32, weight: f64) -> Self {
        Self {
            reps,
            weight,
            completed: false,
        }
    }

    /// Load moved by this set (`weight * reps`)
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// An exercise slot inside a workout, with its own sets and rest period
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub exercise_id: String,
    pub exercise: Arc<Exercise>,
    pub sets: Vec<WorkoutSet>,
    /// Rest applied after each set of this exercise
    pub rest_seconds: u32,
}

impl WorkoutExercise {
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

/// A reusable, immutable workout plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exercises: Vec<WorkoutExercise>,
    /// Minutes
    pub estimated_duration: u32,
    pub difficulty: Difficulty,
    pub category: String,
}

impl WorkoutSession {
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Check that the template can drive an active workout
    ///
    /// Returns a list of problems (empty when the template is usable).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.exercises.is_empty() {
            errors.push(format!("Session '{}' has no exercises", self.id));
        }

        for (idx, entry) in self.exercises.iter().enumerate() {
            if entry.sets.is_empty() {
                errors.push(format!(
                    "Session '{}': exercise #{} ('{}') has no sets",
                    self.id,
                    idx + 1,
                    entry.exercise_id
                ));
            }
            if entry.exercise_id != entry.exercise.id {
                errors.push(format!(
                    "Session '{}': exercise id '{}' does not match embedded exercise '{}'",
                    self.id, entry.exercise_id, entry.exercise.id
                ));
            }
            for set in &entry.sets {
                if set.weight < 0.0 || !set.weight.is_finite() {
                    errors.push(format!(
                        "Session '{}': exercise '{}' has invalid weight {}",
                        self.id, entry.exercise_id, set.weight
                    ));
                }
            }
        }

        errors
    }
}

// ============================================================================
// Log and Statistics Types
// ============================================================================

/// Record of one completed workout
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub session_id: String,
    pub session_name: String,
    pub date: DateTime<Utc>,
    /// Minutes, floored
    pub duration: u32,
    pub exercises_completed: u32,
    pub total_sets: u32,
    pub total_volume: f64,
}

/// Cumulative statistics across all workouts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    pub total_workouts: u32,
    /// Minutes
    pub total_duration: u32,
    pub total_volume: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub weekly_goal: u32,
    pub weekly_completed: u32,
}

impl UserStats {
    /// Fresh statistics with the given weekly goal
    pub fn new(weekly_goal: u32) -> Self {
        Self {
            total_workouts: 0,
            total_duration: 0,
            total_volume: 0.0,
            current_streak: 0,
            longest_streak: 0,
            weekly_goal,
            weekly_completed: 0,
        }
    }

    /// Demo statistics shipped with the app
    pub fn sample() -> Self {
        Self {
            total_workouts: 24,
            total_duration: 1080,
            total_volume: 45600.0,
            current_streak: 5,
            longest_streak: 12,
            weekly_goal: 4,
            weekly_completed: 3,
        }
    }
}

impl Default for UserStats {
    fn default() -> Self {
        Self::new(4)
    }
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The fixed library of exercises and workout templates
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: HashMap<String, Arc<Exercise>>,
    pub sessions: HashMap<String, WorkoutSession>,
}
