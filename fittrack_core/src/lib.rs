#![forbid(unsafe_code)]

//! Core domain model and workout logic for FitTrack.
//!
//! This crate provides:
//! - Domain types (exercises, workout templates, logs, statistics)
//! - The built-in exercise library and workout plans
//! - The active-workout state machine and its timers
//! - Completion aggregation into history and cumulative stats
//! - A session controller owning all mutable state

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod tracker;
pub mod timer;
pub mod aggregator;
pub mod history;
pub mod notify;
pub mod controller;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use tracker::{ActiveWorkout, Progress, SetField, SetOutcome};
pub use timer::{RestState, RestTimer, TickReport, TimeKeeper};
pub use aggregator::WorkoutSummary;
pub use history::WorkoutHistory;
pub use notify::{MemorySink, Notification, NotificationSink, TracingSink};
pub use controller::{ActiveSession, SessionController};
