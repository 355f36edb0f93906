//! Session controller: the single owner of mutable workout state.
//!
//! Holds the user statistics, the workout history and the (at most one)
//! active workout together with its timers. Presentation code calls the
//! controller; the controller applies tracker transitions, drives the
//! [`TimeKeeper`], aggregates on completion and emits notifications.

use crate::aggregator;
use crate::notify::{Notification, NotificationSink};
use crate::timer::{TickReport, TimeKeeper};
use crate::{
    ActiveWorkout, Catalog, Config, Error, Progress, Result, SetField, SetOutcome, UserStats,
    WorkoutHistory, WorkoutLog,
};
use chrono::{DateTime, Duration, Utc};

/// An active workout and its clocks
#[derive(Clone, Debug)]
pub struct ActiveSession {
    pub workout: ActiveWorkout,
    pub clock: TimeKeeper,
}

/// Owner of stats, history and the active workout
pub struct SessionController<'c, S: NotificationSink> {
    catalog: &'c Catalog,
    config: Config,
    stats: UserStats,
    history: WorkoutHistory,
    active: Option<ActiveSession>,
    sink: S,
}

impl<'c, S: NotificationSink> SessionController<'c, S> {
    /// Create a controller with statistics seeded according to `config`
    pub fn new(catalog: &'c Catalog, config: Config, sink: S, now: DateTime<Utc>) -> Self {
        let (stats, history) = if config.stats.use_sample_data {
            let mut stats = UserStats::sample();
            stats.weekly_goal = config.stats.weekly_goal;
            stats.weekly_completed = stats.weekly_completed.min(stats.weekly_goal);
            (stats, WorkoutHistory::sample(now))
        } else {
            (UserStats::new(config.stats.weekly_goal), WorkoutHistory::new())
        };

        Self::with_state(catalog, config, stats, history, sink)
    }

    /// Create a controller from explicit statistics and history
    pub fn with_state(
        catalog: &'c Catalog,
        config: Config,
        stats: UserStats,
        history: WorkoutHistory,
        sink: S,
    ) -> Self {
        Self {
            catalog,
            config,
            stats,
            history,
            active: None,
            sink,
        }
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn history(&self) -> &WorkoutHistory {
        &self.history
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn active_workout(&self) -> Option<&ActiveWorkout> {
        self.active.as_ref().map(|a| &a.workout)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.active_workout().map(|w| w.progress())
    }

    fn session_mut(&mut self) -> Result<&mut ActiveSession> {
        self.active.as_mut().ok_or(Error::NoActiveWorkout)
    }

    /// Apply a pure tracker transition to the active workout
    fn apply<F>(&mut self, f: F) -> Result<&ActiveWorkout>
    where
        F: FnOnce(&ActiveWorkout) -> ActiveWorkout,
    {
        let session = self.session_mut()?;
        session.workout = f(&session.workout);
        Ok(&session.workout)
    }

    /// Start the session template `session_id`
    pub fn start_workout(&mut self, session_id: &str, now: DateTime<Utc>) -> Result<&ActiveWorkout> {
        if let Some(active) = &self.active {
            return Err(Error::WorkoutInProgress(active.workout.session_id.clone()));
        }

        let template = self
            .catalog
            .session(session_id)
            .ok_or_else(|| Error::UnknownSession(session_id.to_string()))?;

        let problems = template.validate();
        if !problems.is_empty() {
            return Err(Error::InvalidTemplate {
                id: session_id.to_string(),
                reason: problems.join("; "),
            });
        }

        let workout = ActiveWorkout::start(template, now);
        tracing::info!(
            "Started '{}' ({} exercises, {} sets)",
            template.name,
            workout.exercises.len(),
            workout.total_sets()
        );
        self.sink.notify(Notification::WorkoutStarted {
            session_name: template.name.clone(),
        });

        let session = self.active.insert(ActiveSession {
            clock: TimeKeeper::new(now),
            workout,
        });
        Ok(&session.workout)
    }

    pub fn update_field(&mut self, field: SetField, value: f64) -> Result<&ActiveWorkout> {
        self.apply(|w| w.update_field(field, value))
    }

    pub fn nudge(&mut self, field: SetField, delta: f64) -> Result<&ActiveWorkout> {
        self.apply(|w| w.nudge(field, delta))
    }

    pub fn navigate_previous(&mut self) -> Result<&ActiveWorkout> {
        self.apply(ActiveWorkout::navigate_previous)
    }

    pub fn navigate_next(&mut self) -> Result<&ActiveWorkout> {
        self.apply(ActiveWorkout::navigate_next)
    }

    /// Complete the current set and start the following rest period
    ///
    /// On [`SetOutcome::WorkoutFinished`] no rest starts; call
    /// [`finish`](Self::finish) to record the workout.
    pub fn complete_set(&mut self, now: DateTime<Utc>) -> Result<SetOutcome> {
        let session = self.session_mut()?;

        let (exercise_name, set_number) = match session.workout.current_exercise() {
            Some(e) => (e.exercise.name.clone(), session.workout.current_set_index + 1),
            None => return Ok(SetOutcome::WorkoutFinished),
        };

        let (workout, outcome) = session.workout.complete_current_set();
        session.workout = workout;

        if let Some(rest_seconds) = outcome.rest_seconds() {
            session.clock.start_rest(now, rest_seconds);
            session.workout = if session.clock.rest().is_active() {
                session.workout.begin_rest(now, rest_seconds)
            } else {
                session.workout.end_rest()
            };
        }

        if outcome != SetOutcome::WorkoutFinished {
            self.sink.notify(Notification::SetCompleted {
                exercise_name,
                set_number,
            });
        }

        Ok(outcome)
    }

    /// One scheduler tick
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<TickReport> {
        let report = self.session_mut()?.clock.tick(now);
        self.after_tick(report)
    }

    /// Run every tick due since the previous one
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Result<TickReport> {
        let report = self.session_mut()?.clock.catch_up(now);
        self.after_tick(report)
    }

    fn after_tick(&mut self, report: TickReport) -> Result<TickReport> {
        if report.rest_completed {
            let rest_alerts = self.config.notifications.rest_alerts;
            self.apply(ActiveWorkout::end_rest)?;
            if rest_alerts {
                self.sink.notify(Notification::RestComplete);
            }
        }
        Ok(report)
    }

    /// End the current rest period immediately
    pub fn skip_rest(&mut self) -> Result<()> {
        self.session_mut()?.clock.skip_rest();
        self.apply(ActiveWorkout::end_rest)?;
        tracing::debug!("Rest skipped");
        Ok(())
    }

    /// Add the configured extension to a running rest; returns the new remaining time
    pub fn extend_rest(&mut self) -> Result<u32> {
        let extension = self.config.timer.rest_extension_seconds;
        let session = self.session_mut()?;
        if !session.clock.rest().is_active() {
            return Ok(0);
        }

        session.clock.extend_rest(extension);
        session.workout.rest_end_time = session
            .workout
            .rest_end_time
            .map(|end| end + Duration::seconds(i64::from(extension)));

        Ok(session.clock.rest().remaining())
    }

    /// Record the active workout and fold it into the statistics
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<WorkoutLog> {
        let session = self.active.as_ref().ok_or(Error::NoActiveWorkout)?;
        let template = self
            .catalog
            .session(&session.workout.session_id)
            .ok_or_else(|| Error::UnknownSession(session.workout.session_id.clone()))?;

        let (log, stats) = aggregator::complete(&session.workout, template, &self.stats, now);

        self.active = None;
        self.stats = stats;
        self.history.record(log.clone());
        self.sink.notify(Notification::WorkoutCompleted {
            session_name: log.session_name.clone(),
        });

        Ok(log)
    }

    /// Discard the active workout without recording anything
    pub fn cancel(&mut self) -> Result<()> {
        let session = self.active.take().ok_or(Error::NoActiveWorkout)?;
        aggregator::cancel(session.workout);
        self.sink.notify(Notification::WorkoutCancelled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;
    use crate::timer::RestState;
    use crate::tracker::tests::test_template;
    use crate::{build_default_catalog, WorkoutSession};
    use std::collections::HashMap;

    fn catalog_with(template: WorkoutSession) -> Catalog {
        let mut sessions = HashMap::new();
        sessions.insert(template.id.clone(), template);
        Catalog {
            exercises: HashMap::new(),
            sessions,
        }
    }

    fn controller(catalog: &Catalog) -> SessionController<'_, MemorySink> {
        crate::logging::init_test();
        SessionController::with_state(
            catalog,
            Config::default(),
            UserStats::default(),
            WorkoutHistory::new(),
            MemorySink::new(),
        )
    }

    #[test]
    fn test_start_unknown_session() {
        let catalog = build_default_catalog();
        let mut ctl = controller(&catalog);

        let err = ctl.start_workout("no-such-plan", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::UnknownSession(id) if id == "no-such-plan"));
        assert!(ctl.active().is_none());
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let catalog = build_default_catalog();
        let mut ctl = controller(&catalog);
        ctl.start_workout("hiit-cardio", Utc::now()).unwrap();

        let err = ctl.start_workout("back-strength", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::WorkoutInProgress(_)));
        assert_eq!(ctl.active_workout().unwrap().session_id, "hiit-cardio");
    }

    #[test]
    fn test_start_rejects_exercise_without_sets() {
        let catalog = catalog_with(test_template(&[(2, 60), (0, 60)], 10, 100.0));
        let mut ctl = controller(&catalog);

        let err = ctl.start_workout("test-session", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
    }

    #[test]
    fn test_operations_without_workout() {
        let catalog = build_default_catalog();
        let mut ctl = controller(&catalog);
        let now = Utc::now();

        assert!(matches!(ctl.complete_set(now), Err(Error::NoActiveWorkout)));
        assert!(matches!(ctl.tick(now), Err(Error::NoActiveWorkout)));
        assert!(matches!(ctl.finish(now), Err(Error::NoActiveWorkout)));
        assert!(matches!(ctl.cancel(), Err(Error::NoActiveWorkout)));
        assert!(ctl.progress().is_none());
    }

    #[test]
    fn test_complete_set_starts_rest() {
        let catalog = catalog_with(test_template(&[(2, 60), (2, 90)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let now = Utc::now();
        ctl.start_workout("test-session", now).unwrap();

        let outcome = ctl.complete_set(now).unwrap();

        assert_eq!(outcome, SetOutcome::SetAdvanced { rest_seconds: 60 });
        let session = ctl.active().unwrap();
        assert_eq!(session.clock.rest().state(), RestState::Resting { remaining: 60 });
        assert!(session.workout.is_resting);
        assert_eq!(
            session.workout.rest_end_time,
            Some(now + Duration::seconds(60))
        );
    }

    #[test]
    fn test_rest_completes_on_tick() {
        let catalog = catalog_with(test_template(&[(2, 2)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let start = Utc::now();
        ctl.start_workout("test-session", start).unwrap();
        ctl.complete_set(start).unwrap();
        ctl.sink_mut().drain();

        ctl.tick(start + Duration::seconds(1)).unwrap();
        let report = ctl.tick(start + Duration::seconds(2)).unwrap();

        assert!(report.rest_completed);
        assert!(!ctl.active_workout().unwrap().is_resting);
        assert_eq!(ctl.sink().pending(), &[Notification::RestComplete]);
    }

    #[test]
    fn test_rest_alerts_can_be_muted() {
        let catalog = catalog_with(test_template(&[(2, 1)], 10, 100.0));
        let mut config = Config::default();
        config.notifications.rest_alerts = false;
        let mut ctl = SessionController::with_state(
            &catalog,
            config,
            UserStats::default(),
            WorkoutHistory::new(),
            MemorySink::new(),
        );
        let start = Utc::now();
        ctl.start_workout("test-session", start).unwrap();
        ctl.complete_set(start).unwrap();
        ctl.sink_mut().drain();

        let report = ctl.catch_up(start + Duration::seconds(3)).unwrap();

        assert!(report.rest_completed);
        assert!(ctl.sink().pending().is_empty());
        assert!(!ctl.active_workout().unwrap().is_resting);
    }

    #[test]
    fn test_skip_and_extend_rest() {
        let catalog = catalog_with(test_template(&[(3, 30)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let start = Utc::now();
        ctl.start_workout("test-session", start).unwrap();
        ctl.complete_set(start).unwrap();

        ctl.catch_up(start + Duration::seconds(5)).unwrap();
        assert_eq!(ctl.extend_rest().unwrap(), 55);
        assert_eq!(
            ctl.active_workout().unwrap().rest_end_time,
            Some(start + Duration::seconds(60))
        );

        ctl.skip_rest().unwrap();
        let session = ctl.active().unwrap();
        assert_eq!(session.clock.rest().state(), RestState::Idle);
        assert!(!session.workout.is_resting);
        assert_eq!(ctl.extend_rest().unwrap(), 0);
    }

    #[test]
    fn test_zero_rest_does_not_leave_workout_resting() {
        let catalog = catalog_with(test_template(&[(2, 0)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let now = Utc::now();
        ctl.start_workout("test-session", now).unwrap();

        ctl.complete_set(now).unwrap();

        assert!(!ctl.active_workout().unwrap().is_resting);
    }

    #[test]
    fn test_full_workout_is_recorded() {
        let catalog = build_default_catalog();
        let mut ctl = controller(&catalog);
        let start = Utc::now();
        ctl.start_workout("flexibility-flow", start).unwrap();

        let mut outcome = ctl.complete_set(start).unwrap();
        while outcome != SetOutcome::WorkoutFinished {
            ctl.skip_rest().unwrap();
            outcome = ctl.complete_set(start).unwrap();
        }
        assert_eq!(ctl.progress().unwrap().percent, 100.0);

        let log = ctl.finish(start + Duration::minutes(21)).unwrap();

        assert_eq!(log.session_name, "Flexibility & Recovery");
        assert_eq!(log.total_sets, 6);
        assert_eq!(log.exercises_completed, 3);
        assert_eq!(log.total_volume, 0.0);
        assert_eq!(log.duration, 21);
        assert!(ctl.active().is_none());
        assert_eq!(ctl.history().len(), 1);
        assert_eq!(ctl.stats().total_workouts, 1);
        assert_eq!(ctl.stats().total_duration, 21);
        assert_eq!(
            ctl.sink().pending().last(),
            Some(&Notification::WorkoutCompleted {
                session_name: "Flexibility & Recovery".into()
            })
        );
    }

    #[test]
    fn test_finish_partial_workout() {
        let catalog = catalog_with(test_template(&[(2, 60), (2, 60)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let start = Utc::now();
        ctl.start_workout("test-session", start).unwrap();
        ctl.update_field(SetField::Weight, 120.0).unwrap();
        ctl.complete_set(start).unwrap();

        let log = ctl.finish(start).unwrap();

        assert_eq!(log.total_sets, 1);
        assert_eq!(log.total_volume, 1200.0);
    }

    #[test]
    fn test_cancel_records_nothing() {
        let catalog = catalog_with(test_template(&[(4, 60)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let now = Utc::now();
        let before = ctl.stats().clone();
        ctl.start_workout("test-session", now).unwrap();
        for _ in 0..3 {
            ctl.complete_set(now).unwrap();
        }
        assert_eq!(ctl.progress().unwrap().completed_sets, 3);

        ctl.cancel().unwrap();

        assert!(ctl.active().is_none());
        assert!(ctl.history().is_empty());
        assert_eq!(ctl.stats(), &before);
        assert_eq!(
            ctl.sink().pending().last(),
            Some(&Notification::WorkoutCancelled)
        );
    }

    #[test]
    fn test_sample_stats_respect_configured_goal() {
        let catalog = build_default_catalog();
        let mut config = Config::default();
        config.stats.weekly_goal = 2;

        let ctl = SessionController::new(&catalog, config, MemorySink::new(), Utc::now());

        assert_eq!(ctl.stats().weekly_goal, 2);
        assert_eq!(ctl.stats().weekly_completed, 2);
        assert_eq!(ctl.history().len(), 5);
    }

    #[test]
    fn test_rest_after_long_set_counts_from_completion() {
        let catalog = catalog_with(test_template(&[(3, 60)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let start = Utc::now();
        ctl.start_workout("test-session", start).unwrap();

        let done = start + Duration::seconds(100);
        ctl.complete_set(done).unwrap();
        ctl.sink_mut().drain();

        let report = ctl.catch_up(done + Duration::seconds(1)).unwrap();
        assert_eq!(report.rest_remaining, 59);
        assert!(report.rest_active);
        assert!(!report.rest_completed);
        assert!(ctl.active_workout().unwrap().is_resting);
        assert!(ctl.sink().pending().is_empty());

        let report = ctl.catch_up(done + Duration::seconds(60)).unwrap();
        assert!(report.rest_completed);
        assert_eq!(ctl.sink().pending(), &[Notification::RestComplete]);
    }

    #[test]
    fn test_last_set_does_not_report_set_completed() {
        let catalog = catalog_with(test_template(&[(1, 60)], 10, 100.0));
        let mut ctl = controller(&catalog);
        let now = Utc::now();
        ctl.start_workout("test-session", now).unwrap();
        ctl.sink_mut().drain();

        let outcome = ctl.complete_set(now).unwrap();

        assert_eq!(outcome, SetOutcome::WorkoutFinished);
        assert!(ctl.sink().pending().is_empty());
        assert_eq!(ctl.active().unwrap().clock.rest().state(), RestState::Idle);
    }
}
