//! Fire-and-forget workout notifications.
//!
//! The controller reports notable events through a [`NotificationSink`].
//! Delivery is best effort: there is no acknowledgement and no retry.

use serde::Serialize;

/// A user-facing workout event
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    WorkoutStarted { session_name: String },
    SetCompleted { exercise_name: String, set_number: usize },
    RestComplete,
    WorkoutCompleted { session_name: String },
    WorkoutCancelled,
}

impl Notification {
    /// Short message suitable for a toast or terminal line
    pub fn message(&self) -> String {
        match self {
            Notification::WorkoutStarted { session_name } => format!("Started: {}", session_name),
            Notification::SetCompleted {
                exercise_name,
                set_number,
            } => format!("Set {} of {} completed!", set_number, exercise_name),
            Notification::RestComplete => "Rest complete! Next set ready.".into(),
            Notification::WorkoutCompleted { .. } => "Workout completed! Great job!".into(),
            Notification::WorkoutCancelled => "Workout cancelled".into(),
        }
    }
}

/// Receiver for workout notifications
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Sink that writes notifications to the tracing log
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: Notification) {
        tracing::info!("{}", notification.message());
    }
}

/// Sink that keeps notifications in memory until drained
#[derive(Debug, Default)]
pub struct MemorySink {
    pending: Vec<Notification>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification received so far
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, notification: Notification) {
        self.pending.push(notification);
    }
}
