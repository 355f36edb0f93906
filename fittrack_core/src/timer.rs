//! Workout clocks: elapsed time and the rest countdown.
//!
//! Both are driven by a cooperative 1-second tick. The elapsed clock is
//! recomputed from the fixed start time on every tick, so late or missed
//! ticks never make it drift. The rest countdown decrements once per tick.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Resolution of the scheduler tick
pub const TICK_SECONDS: i64 = 1;

/// Default amount added by "+30s"
pub const DEFAULT_REST_EXTENSION_SECONDS: u32 = 30;

/// Counts up from the workout start time
#[derive(Clone, Debug)]
pub struct ElapsedClock {
    start_time: DateTime<Utc>,
    elapsed_seconds: u64,
}

impl ElapsedClock {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            elapsed_seconds: 0,
        }
    }

    /// Recompute elapsed time against `now`; clock skew before start reads as zero
    pub fn update(&mut self, now: DateTime<Utc>) -> u64 {
        let seconds = (now - self.start_time).num_seconds();
        self.elapsed_seconds = u64::try_from(seconds).unwrap_or(0);
        self.elapsed_seconds
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}

/// State of the rest countdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RestState {
    /// No rest running (never started, or skipped)
    Idle,
    /// Counting down; `remaining` is always at least 1
    Resting { remaining: u32 },
    /// Ran down to zero on its own
    Expired,
}

/// Rest countdown state machine
///
/// Transitions: `start` (from any state, resets the duration), `skip`,
/// `extend`, and `tick`.
#[derive(Clone, Debug)]
pub struct RestTimer {
    state: RestState,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    pub fn new() -> Self {
        Self {
            state: RestState::Idle,
        }
    }

    pub fn state(&self) -> RestState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RestState::Resting { .. })
    }

    pub fn remaining(&self) -> u32 {
        match self.state {
            RestState::Resting { remaining } => remaining,
            RestState::Idle | RestState::Expired => 0,
        }
    }

    /// Start a rest period, replacing any rest already running
    ///
    /// A zero duration expires immediately.
    pub fn start(&mut self, seconds: u32) {
        if self.is_active() {
            tracing::debug!(
                "Restarting rest timer ({}s remaining -> {}s)",
                self.remaining(),
                seconds
            );
        }
        self.state = if seconds == 0 {
            RestState::Expired
        } else {
            RestState::Resting { remaining: seconds }
        };
    }

    /// Stop the countdown immediately without reporting completion
    pub fn skip(&mut self) {
        self.state = RestState::Idle;
    }

    /// Add time to a running rest; ignored when no rest is running
    pub fn extend(&mut self, seconds: u32) {
        if let RestState::Resting { remaining } = self.state {
            self.state = RestState::Resting {
                remaining: remaining.saturating_add(seconds),
            };
        }
    }

    /// Advance the countdown by one tick
    ///
    /// Returns `true` exactly once, on the tick that finishes the rest.
    pub fn tick(&mut self) -> bool {
        match self.state {
            RestState::Resting { remaining } if remaining <= 1 => {
                self.state = RestState::Expired;
                true
            }
            RestState::Resting { remaining } => {
                self.state = RestState::Resting {
                    remaining: remaining - 1,
                };
                false
            }
            RestState::Idle | RestState::Expired => false,
        }
    }
}

/// Timer values after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub elapsed_seconds: u64,
    pub rest_remaining: u32,
    pub rest_active: bool,
    /// The rest countdown finished on this tick
    pub rest_completed: bool,
}

/// Drives the elapsed clock and the rest countdown from one tick source
#[derive(Clone, Debug)]
pub struct TimeKeeper {
    elapsed: ElapsedClock,
    rest: RestTimer,
    last_tick: DateTime<Utc>,
}

impl TimeKeeper {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            elapsed: ElapsedClock::new(start_time),
            rest: RestTimer::new(),
            last_tick: start_time,
        }
    }

    pub fn rest(&self) -> &RestTimer {
        &self.rest
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.elapsed_seconds()
    }

    /// Begin a rest at `now`
    ///
    /// The tick schedule restarts at `now`, so time that passed before the
    /// rest began is never taken off the new countdown.
    pub fn start_rest(&mut self, now: DateTime<Utc>, seconds: u32) {
        self.elapsed.update(now);
        self.rest.start(seconds);
        self.last_tick = now;
    }

    pub fn skip_rest(&mut self) {
        self.rest.skip();
    }

    pub fn extend_rest(&mut self, seconds: u32) {
        self.rest.extend(seconds);
    }

    /// Perform a single scheduler tick at `now`
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let elapsed_seconds = self.elapsed.update(now);
        let rest_completed = self.rest.tick();
        self.last_tick = now;

        TickReport {
            elapsed_seconds,
            rest_remaining: self.rest.remaining(),
            rest_active: self.rest.is_active(),
            rest_completed,
        }
    }

    /// Run every tick that should have fired between the last tick and `now`
    ///
    /// Returns the last report, or a report without any countdown change when
    /// less than one tick interval has passed.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> TickReport {
        let interval = Duration::seconds(TICK_SECONDS);
        let due = (now - self.last_tick).num_seconds() / TICK_SECONDS;

        let mut report = TickReport {
            elapsed_seconds: self.elapsed.update(now),
            rest_remaining: self.rest.remaining(),
            rest_active: self.rest.is_active(),
            rest_completed: false,
        };

        let mut completed = false;
        for _ in 0..due.max(0) {
            let at = self.last_tick + interval;
            report = self.tick(at.min(now));
            completed |= report.rest_completed;
        }
        report.rest_completed = completed;

        if due > 1 {
            tracing::debug!("Caught up {} missed ticks", due);
        }

        report
    }
}
