use chrono::Utc;
use clap::{Parser, Subcommand};
use fittrack_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Workout tracker with guided sessions and rest timers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the exercise library
    Exercises {
        /// Only show one category (strength, cardio, flexibility, bodyweight)
        #[arg(long)]
        category: Option<String>,
    },

    /// List workout plans
    Plans,

    /// Show the exercises and sets of a workout plan
    Show {
        /// Plan id (see `fittrack plans`)
        plan: String,
    },

    /// Start a workout plan
    Start {
        /// Plan id (see `fittrack plans`)
        plan: String,

        /// Auto-complete (for testing) - complete every set without prompting
        #[arg(long)]
        auto_complete: bool,

        /// Print the resulting log and stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show statistics and recent workouts
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Weight step for `w+` / `w-`
const WEIGHT_STEP: f64 = 5.0;

fn main() {
    fittrack_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation(errors.join("; ")));
    }

    match cli.command {
        Commands::Exercises { category } => cmd_exercises(catalog, category),
        Commands::Plans => {
            cmd_plans(catalog);
            Ok(())
        }
        Commands::Show { plan } => cmd_show(catalog, &plan),
        Commands::Start {
            plan,
            auto_complete,
            json,
        } => cmd_start(catalog, config, &plan, auto_complete, json),
        Commands::Stats { json } => cmd_stats(catalog, config, json),
    }
}

fn cmd_exercises(catalog: &Catalog, category: Option<String>) -> Result<()> {
    let category = match category {
        Some(name) => Some(
            ExerciseCategory::parse(&name)
                .ok_or_else(|| Error::Other(format!("Unknown category: {}", name)))?,
        ),
        None => None,
    };

    for exercise in catalog.exercises_in(category) {
        println!(
            "{:<20} {:<24} {:<12} {:<13} {}",
            exercise.id,
            exercise.name,
            exercise.category,
            exercise.difficulty,
            exercise.muscle_groups.join(", ")
        );
    }
    Ok(())
}

fn cmd_plans(catalog: &Catalog) {
    for session in catalog.sessions_sorted() {
        println!(
            "{:<20} {:<24} {:<12} {:<13} ~{} min, {} exercises",
            session.id,
            session.name,
            session.category,
            session.difficulty,
            session.estimated_duration,
            session.exercises.len()
        );
    }
}

fn cmd_show(catalog: &Catalog, plan: &str) -> Result<()> {
    let session = catalog
        .session(plan)
        .ok_or_else(|| Error::UnknownSession(plan.to_string()))?;

    println!("\n  {} ({}, ~{} min)", session.name, session.difficulty, session.estimated_duration);
    println!("  {}", session.description);
    println!();

    for (idx, entry) in session.exercises.iter().enumerate() {
        let first = entry.sets.first();
        println!(
            "  {}. {} - {} sets x {} reps @ {} lbs, rest {}s",
            idx + 1,
            entry.exercise.name,
            entry.sets.len(),
            first.map_or(0, |s| s.reps),
            first.map_or(0.0, |s| s.weight),
            entry.rest_seconds
        );
    }
    println!();
    Ok(())
}

fn cmd_start(
    catalog: &Catalog,
    config: Config,
    plan: &str,
    auto_complete: bool,
    json: bool,
) -> Result<()> {
    let now = Utc::now();
    let mut ctl = SessionController::new(catalog, config, MemorySink::new(), now);
    ctl.start_workout(plan, now)?;

    let finished = if auto_complete {
        run_auto(&mut ctl)?;
        true
    } else {
        run_interactive(&mut ctl)?
    };

    if !finished {
        flush_notifications(&mut ctl, json);
        return Ok(());
    }

    let log = ctl.finish(Utc::now())?;
    flush_notifications(&mut ctl, json);

    if json {
        let out = serde_json::json!({
            "log": log,
            "stats": ctl.stats(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        display_log(&log);
        display_stats(ctl.stats());
    }
    Ok(())
}

fn cmd_stats(catalog: &Catalog, config: Config, json: bool) -> Result<()> {
    let ctl = SessionController::new(catalog, config, TracingSink, Utc::now());

    if json {
        let out = serde_json::json!({
            "stats": ctl.stats(),
            "history": ctl.history(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    display_stats(ctl.stats());
    if let Some(last) = ctl.history().latest() {
        println!(
            "  Last:      {} on {}",
            last.session_name,
            last.date.format("%Y-%m-%d")
        );
    }
    println!("\n  Recent workouts:");
    if ctl.history().is_empty() {
        println!("    (none yet)");
    }
    for log in ctl.history().recent(5) {
        println!(
            "    {}  {:<24} {:>3} min  {:>3} sets  {:>8} lbs",
            log.date.format("%Y-%m-%d"),
            log.session_name,
            log.duration,
            log.total_sets,
            log.total_volume
        );
    }
    println!();
    Ok(())
}

/// Complete every set, skipping all rest periods
fn run_auto(ctl: &mut SessionController<'_, MemorySink>) -> Result<()> {
    loop {
        let outcome = ctl.complete_set(Utc::now())?;
        if outcome == SetOutcome::WorkoutFinished {
            return Ok(());
        }
        ctl.skip_rest()?;
    }
}

/// Prompt loop; returns `true` when the workout should be recorded
fn run_interactive(ctl: &mut SessionController<'_, MemorySink>) -> Result<bool> {
    print_help();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        ctl.catch_up(Utc::now())?;
        flush_notifications(ctl, false);
        display_state(ctl);

        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            // Input closed: nothing more can be recorded
            ctl.cancel()?;
            return Ok(false);
        };
        ctl.catch_up(Utc::now())?;

        let input = line.trim();
        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, Some(arg.trim())),
            None => (input, None),
        };

        match (cmd, arg) {
            ("", _) => {
                if ctl.active().is_some_and(|a| a.clock.rest().is_active()) {
                    ctl.skip_rest()?;
                }
                if ctl.complete_set(Utc::now())? == SetOutcome::WorkoutFinished {
                    println!("\n🏆 All sets complete!");
                    if confirm("Finish workout? [Y/n] ", &mut lines)? {
                        return Ok(true);
                    }
                }
            }
            ("p", _) => {
                if ctl.navigate_previous()?.is_at_start() {
                    println!("At the first set.");
                }
            }
            ("n", _) => {
                if ctl.navigate_next()?.is_at_end() {
                    println!("At the last set.");
                }
            }
            ("s", _) => ctl.skip_rest()?,
            ("e", _) => {
                let remaining = ctl.extend_rest()?;
                if remaining == 0 {
                    println!("No rest running.");
                }
            }
            ("+", _) => {
                ctl.nudge(SetField::Reps, 1.0)?;
            }
            ("-", _) => {
                ctl.nudge(SetField::Reps, -1.0)?;
            }
            ("w+", _) => {
                ctl.nudge(SetField::Weight, WEIGHT_STEP)?;
            }
            ("w-", _) => {
                ctl.nudge(SetField::Weight, -WEIGHT_STEP)?;
            }
            ("r", Some(value)) | ("w", Some(value)) => match value.parse::<f64>() {
                Ok(v) if v >= 0.0 && v.is_finite() => {
                    let field = if cmd == "r" {
                        SetField::Reps
                    } else {
                        SetField::Weight
                    };
                    ctl.update_field(field, v)?;
                }
                _ => println!("Expected a non-negative number, got '{}'", value),
            },
            ("f", _) => return Ok(true),
            ("q", _) => {
                ctl.cancel()?;
                return Ok(false);
            }
            ("?", _) | ("h", _) => print_help(),
            _ => println!("Unknown command '{}'. Type ? for help.", input),
        }
    }
}

fn confirm<I>(prompt: &str, lines: &mut I) -> Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", prompt);
    io::stdout().flush()?;
    match lines.next().transpose()? {
        Some(answer) => Ok(!answer.trim().eq_ignore_ascii_case("n")),
        None => Ok(true),
    }
}

fn flush_notifications(ctl: &mut SessionController<'_, MemorySink>, quiet: bool) {
    for notification in ctl.sink_mut().drain() {
        tracing::debug!(?notification, "notification");
        if !quiet {
            println!("  ✓ {}", notification.message());
        }
    }
}

fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn display_state(ctl: &SessionController<'_, MemorySink>) {
    let Some(session) = ctl.active() else {
        return;
    };
    let workout = &session.workout;
    let progress = workout.progress();

    println!("\n─────────────────────────────────────────");
    println!(
        "  ⏱ {}   {} of {} sets ({:.0}%)",
        format_time(session.clock.elapsed_seconds()),
        progress.completed_sets,
        progress.total_sets,
        progress.percent
    );

    if session.clock.rest().is_active() {
        println!(
            "  Rest: {}  ('s' skip, 'e' +{}s)",
            format_time(u64::from(session.clock.rest().remaining())),
            ctl.config().timer.rest_extension_seconds
        );
    }

    if let (Some(exercise), Some(set)) = (workout.current_exercise(), workout.current_set()) {
        println!(
            "  Exercise {}/{}: {}",
            workout.current_exercise_index + 1,
            workout.exercises.len(),
            exercise.exercise.name
        );
        println!(
            "  Set {}/{}: {} reps @ {} lbs{}",
            workout.current_set_index + 1,
            exercise.sets.len(),
            set.reps,
            set.weight,
            if set.completed { " (done)" } else { "" }
        );
    }
}

fn print_help() {
    println!("─────────────────────────────────────────");
    println!("Enter      complete set (ends any rest)");
    println!("p / n      previous / next set");
    println!("r <n>      set reps      + / -    reps ±1");
    println!("w <n>      set weight    w+ / w-  weight ±{}", WEIGHT_STEP);
    println!("s / e      skip rest / extend rest");
    println!("f          finish now    q        cancel workout");
    println!("The rest countdown refreshes each time a command is entered.");
}

fn display_log(log: &WorkoutLog) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT COMPLETE");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", log.session_name);
    println!("  Duration:  {} min", log.duration);
    println!("  Exercises: {}", log.exercises_completed);
    println!("  Sets:      {}", log.total_sets);
    println!("  Volume:    {} lbs", log.total_volume);
}

fn display_stats(stats: &UserStats) {
    println!();
    println!("  Workouts:  {}", stats.total_workouts);
    println!("  Time:      {} min", stats.total_duration);
    println!("  Volume:    {} lbs", stats.total_volume);
    println!(
        "  Streak:    {} days (best {})",
        stats.current_streak, stats.longest_streak
    );
    println!(
        "  This week: {}/{}",
        stats.weekly_completed, stats.weekly_goal
    );
}
