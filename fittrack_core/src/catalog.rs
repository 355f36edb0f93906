//! Default catalog of exercises and workout session templates.
//!
//! This module provides the built-in exercise library and workout plans.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in exercises and workout sessions
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

struct ExerciseDef<'a> {
    id: &'a str,
    name: &'a str,
    category: ExerciseCategory,
    muscles: &'a [&'a str],
    description: &'a str,
    instructions: &'a [&'a str],
    tips: &'a [&'a str],
    equipment: &'a [&'a str],
    difficulty: Difficulty,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn exercise(def: ExerciseDef<'_>) -> Exercise {
    Exercise {
        id: def.id.into(),
        name: def.name.into(),
        category: def.category,
        muscle_groups: strings(def.muscles),
        description: def.description.into(),
        instructions: strings(def.instructions),
        tips: Some(strings(def.tips)),
        equipment: Some(strings(def.equipment)),
        difficulty: def.difficulty,
    }
}

/// Template entry: `count` identical target sets
fn entry(
    exercises: &HashMap<String, Arc<Exercise>>,
    id: &str,
    count: usize,
    reps: u32,
    weight: f64,
    rest_seconds: u32,
) -> WorkoutExercise {
    let exercise = exercises
        .get(id)
        .cloned()
        .unwrap_or_else(|| panic!("built-in session references unknown exercise '{}'", id));

    WorkoutExercise {
        exercise_id: id.into(),
        exercise,
        sets: vec![WorkoutSet::target(reps, weight); count],
        rest_seconds,
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    use Difficulty::*;
    use ExerciseCategory::*;

    let defs = [
        ExerciseDef {
            id: "bench-press",
            name: "Bench Press",
            category: Strength,
            muscles: &["chest", "triceps", "shoulders"],
            description: "A classic compound exercise that targets the chest, shoulders, and triceps.",
            instructions: &[
                "Lie flat on a bench with your eyes under the bar",
                "Grip the bar with hands slightly wider than shoulder-width",
                "Lower the bar to your mid-chest",
                "Press the bar back up to the starting position",
            ],
            tips: &["Keep your feet flat on the floor", "Maintain a slight arch in your back"],
            equipment: &["barbell", "bench"],
            difficulty: Intermediate,
        },
        ExerciseDef {
            id: "squat",
            name: "Barbell Squat",
            category: Strength,
            muscles: &["quadriceps", "hamstrings", "glutes", "core"],
            description: "The king of lower body exercises, targeting the entire leg and core.",
            instructions: &[
                "Place the bar on your upper back/shoulders",
                "Stand with feet shoulder-width apart",
                "Lower your hips back and down until thighs are parallel to floor",
                "Drive through your heels to stand back up",
            ],
            tips: &["Keep your chest up", "Don't let knees cave inward"],
            equipment: &["barbell", "squat-rack"],
            difficulty: Intermediate,
        },
        ExerciseDef {
            id: "deadlift",
            name: "Deadlift",
            category: Strength,
            muscles: &["back", "hamstrings", "glutes", "traps"],
            description: "A full-body compound movement that builds overall strength.",
            instructions: &[
                "Stand with feet hip-width apart, bar over mid-foot",
                "Bend at hips and knees to grip the bar",
                "Keep back flat and chest up",
                "Drive through heels to lift the bar, extending hips forward",
            ],
            tips: &["Keep the bar close to your body", "Engage your lats"],
            equipment: &["barbell"],
            difficulty: Advanced,
        },
        ExerciseDef {
            id: "overhead-press",
            name: "Overhead Press",
            category: Strength,
            muscles: &["shoulders", "triceps", "core"],
            description: "Builds strong shoulders and triceps while engaging the core.",
            instructions: &[
                "Stand with bar at shoulder height",
                "Grip slightly wider than shoulders",
                "Press the bar straight up overhead",
                "Lower with control back to shoulders",
            ],
            tips: &["Brace your core", "Don't arch your back excessively"],
            equipment: &["barbell"],
            difficulty: Intermediate,
        },
        ExerciseDef {
            id: "pull-up",
            name: "Pull-Up",
            category: Bodyweight,
            muscles: &["back", "biceps", "core"],
            description: "The ultimate bodyweight back exercise.",
            instructions: &[
                "Hang from a pull-up bar with palms facing away",
                "Pull your body up until chin is over the bar",
                "Lower with control to full arm extension",
            ],
            tips: &["Engage your core", "Focus on pulling with your back"],
            equipment: &["pull-up-bar"],
            difficulty: Intermediate,
        },
        ExerciseDef {
            id: "push-up",
            name: "Push-Up",
            category: Bodyweight,
            muscles: &["chest", "triceps", "shoulders"],
            description: "Classic bodyweight exercise for chest and arms.",
            instructions: &[
                "Start in plank position with hands under shoulders",
                "Lower body until chest nearly touches floor",
                "Push back up to starting position",
            ],
            tips: &["Keep body in a straight line", "Control the descent"],
            equipment: &[],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "lunges",
            name: "Walking Lunges",
            category: Bodyweight,
            muscles: &["quadriceps", "hamstrings", "glutes"],
            description: "Great for leg strength, balance, and mobility.",
            instructions: &[
                "Step forward into a lunge position",
                "Lower back knee toward ground",
                "Push through front heel to stand",
                "Step forward with opposite leg",
            ],
            tips: &["Keep torso upright", "Don't let front knee go past toes"],
            equipment: &[],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "plank",
            name: "Plank",
            category: Bodyweight,
            muscles: &["core", "shoulders"],
            description: "Isometric core exercise for stability and strength.",
            instructions: &[
                "Start in push-up position",
                "Hold body in straight line from head to heels",
                "Engage core and breathe normally",
            ],
            tips: &["Don't let hips sag", "Keep neck neutral"],
            equipment: &[],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "dumbbell-row",
            name: "Dumbbell Row",
            category: Strength,
            muscles: &["back", "biceps"],
            description: "Unilateral back exercise for thickness and strength.",
            instructions: &[
                "Place one knee and hand on bench",
                "Hold dumbbell in opposite hand",
                "Pull dumbbell to hip, squeezing back",
                "Lower with control",
            ],
            tips: &["Keep back flat", "Pull with elbow, not hand"],
            equipment: &["dumbbell", "bench"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "shoulder-press",
            name: "Dumbbell Shoulder Press",
            category: Strength,
            muscles: &["shoulders", "triceps"],
            description: "Seated or standing shoulder press with dumbbells.",
            instructions: &[
                "Hold dumbbells at shoulder height",
                "Press weights overhead until arms extended",
                "Lower with control to starting position",
            ],
            tips: &["Don't arch back excessively", "Control the weight"],
            equipment: &["dumbbell"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "leg-press",
            name: "Leg Press",
            category: Strength,
            muscles: &["quadriceps", "hamstrings", "glutes"],
            description: "Machine-based leg exercise for building lower body strength.",
            instructions: &[
                "Sit in leg press machine",
                "Place feet shoulder-width on platform",
                "Lower weight by bending knees",
                "Press back to starting position",
            ],
            tips: &["Don't lock knees at top", "Keep lower back against pad"],
            equipment: &["leg-press-machine"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "lat-pulldown",
            name: "Lat Pulldown",
            category: Strength,
            muscles: &["back", "biceps"],
            description: "Machine exercise for back width and strength.",
            instructions: &[
                "Sit at lat pulldown machine",
                "Grip bar wider than shoulders",
                "Pull bar down to upper chest",
                "Control the return to starting position",
            ],
            tips: &["Pull with elbows", "Squeeze shoulder blades together"],
            equipment: &["cable-machine"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "running",
            name: "Running",
            category: Cardio,
            muscles: &["legs", "core"],
            description: "Classic cardiovascular exercise for endurance and calorie burn.",
            instructions: &[
                "Start with warm-up walk or light jog",
                "Maintain steady pace",
                "Focus on breathing rhythm",
                "Cool down with walking",
            ],
            tips: &["Land midfoot", "Keep arms relaxed"],
            equipment: &["running-shoes"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "burpees",
            name: "Burpees",
            category: Cardio,
            muscles: &["full-body"],
            description: "High-intensity full-body exercise.",
            instructions: &[
                "Start standing",
                "Drop to squat, hands on floor",
                "Jump feet back to plank",
                "Do push-up, jump feet in, explode up",
            ],
            tips: &["Maintain pace", "Modify by stepping instead of jumping"],
            equipment: &[],
            difficulty: Intermediate,
        },
        ExerciseDef {
            id: "jumping-jacks",
            name: "Jumping Jacks",
            category: Cardio,
            muscles: &["full-body"],
            description: "Simple cardio exercise to elevate heart rate.",
            instructions: &[
                "Start with feet together, arms at sides",
                "Jump feet apart while raising arms overhead",
                "Jump back to starting position",
            ],
            tips: &["Stay light on feet", "Keep rhythm steady"],
            equipment: &[],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "yoga-flow",
            name: "Yoga Flow",
            category: Flexibility,
            muscles: &["full-body"],
            description: "Dynamic stretching and mobility sequence.",
            instructions: &[
                "Start in downward dog",
                "Flow to plank, then upward dog",
                "Return to downward dog",
                "Step forward to forward fold",
            ],
            tips: &["Focus on breath", "Move with intention"],
            equipment: &["yoga-mat"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "hamstring-stretch",
            name: "Hamstring Stretch",
            category: Flexibility,
            muscles: &["hamstrings"],
            description: "Static stretch for hamstring flexibility.",
            instructions: &[
                "Sit with one leg extended",
                "Reach toward toes of extended leg",
                "Hold position, breathing deeply",
                "Switch legs",
            ],
            tips: &["Don't bounce", "Hold for 30 seconds"],
            equipment: &[],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "bicep-curl",
            name: "Bicep Curl",
            category: Strength,
            muscles: &["biceps"],
            description: "Isolation exercise for bicep development.",
            instructions: &[
                "Hold dumbbells at sides, palms forward",
                "Curl weights toward shoulders",
                "Squeeze at top, lower with control",
            ],
            tips: &["Don't swing", "Keep elbows stationary"],
            equipment: &["dumbbell"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "tricep-dip",
            name: "Tricep Dip",
            category: Bodyweight,
            muscles: &["triceps"],
            description: "Bodyweight exercise for tricep strength.",
            instructions: &[
                "Sit on edge of bench or chair",
                "Lower body by bending elbows",
                "Push back up to starting position",
            ],
            tips: &["Keep elbows close to body", "Don't go too low"],
            equipment: &["bench"],
            difficulty: Beginner,
        },
        ExerciseDef {
            id: "calf-raise",
            name: "Calf Raise",
            category: Strength,
            muscles: &["calves"],
            description: "Isolation exercise for calf development.",
            instructions: &[
                "Stand with balls of feet on edge of step",
                "Lower heels below step level",
                "Rise up on toes, squeezing calves",
            ],
            tips: &["Hold at top for squeeze", "Control the descent"],
            equipment: &["step"],
            difficulty: Beginner,
        },
    ];

    let exercises: HashMap<String, Arc<Exercise>> = defs
        .into_iter()
        .map(|def| (def.id.to_string(), Arc::new(exercise(def))))
        .collect();

    // ========================================================================
    // Workout Sessions
    // ========================================================================

    let ex = &exercises;
    let sessions = vec![
        WorkoutSession {
            id: "full-body-strength".into(),
            name: "Full Body Strength".into(),
            description: "Complete full-body workout targeting all major muscle groups.".into(),
            difficulty: Intermediate,
            category: "Strength".into(),
            estimated_duration: 45,
            exercises: vec![
                entry(ex, "squat", 3, 10, 135.0, 90),
                entry(ex, "bench-press", 3, 10, 135.0, 90),
                entry(ex, "dumbbell-row", 3, 12, 40.0, 60),
                entry(ex, "shoulder-press", 3, 10, 30.0, 60),
                entry(ex, "lunges", 3, 12, 0.0, 60),
                entry(ex, "plank", 2, 60, 0.0, 45),
            ],
        },
        WorkoutSession {
            id: "upper-body-power".into(),
            name: "Upper Body Power".into(),
            description: "Focus on chest, back, shoulders, and arms.".into(),
            difficulty: Intermediate,
            category: "Strength".into(),
            estimated_duration: 40,
            exercises: vec![
                entry(ex, "bench-press", 4, 8, 155.0, 120),
                entry(ex, "pull-up", 3, 8, 0.0, 90),
                entry(ex, "overhead-press", 3, 10, 95.0, 90),
                entry(ex, "dumbbell-row", 3, 12, 45.0, 60),
                entry(ex, "bicep-curl", 3, 12, 25.0, 45),
                entry(ex, "tricep-dip", 3, 15, 0.0, 45),
            ],
        },
        WorkoutSession {
            id: "lower-body-focus".into(),
            name: "Lower Body Focus".into(),
            description: "Build strong legs and glutes with this targeted workout.".into(),
            difficulty: Intermediate,
            category: "Strength".into(),
            estimated_duration: 35,
            exercises: vec![
                entry(ex, "squat", 4, 8, 185.0, 120),
                entry(ex, "leg-press", 3, 12, 200.0, 90),
                entry(ex, "lunges", 3, 12, 25.0, 60),
                entry(ex, "calf-raise", 4, 15, 0.0, 45),
            ],
        },
        WorkoutSession {
            id: "hiit-cardio".into(),
            name: "HIIT Cardio Blast".into(),
            description: "High-intensity interval training for maximum calorie burn.".into(),
            difficulty: Intermediate,
            category: "Cardio".into(),
            estimated_duration: 25,
            exercises: vec![
                entry(ex, "jumping-jacks", 3, 45, 0.0, 15),
                entry(ex, "burpees", 3, 15, 0.0, 30),
                entry(ex, "push-up", 3, 20, 0.0, 30),
                entry(ex, "lunges", 3, 20, 0.0, 30),
            ],
        },
        WorkoutSession {
            id: "back-strength".into(),
            name: "Back Strength Builder".into(),
            description: "Develop a strong, muscular back with pulling movements.".into(),
            difficulty: Advanced,
            category: "Strength".into(),
            estimated_duration: 40,
            exercises: vec![
                entry(ex, "deadlift", 4, 5, 225.0, 180),
                entry(ex, "pull-up", 3, 10, 0.0, 90),
                entry(ex, "dumbbell-row", 3, 12, 50.0, 60),
                entry(ex, "lat-pulldown", 3, 12, 120.0, 60),
            ],
        },
        WorkoutSession {
            id: "beginner-fitness".into(),
            name: "Beginner Full Body".into(),
            description: "Perfect starting point for fitness newcomers.".into(),
            difficulty: Beginner,
            category: "General".into(),
            estimated_duration: 30,
            exercises: vec![
                entry(ex, "push-up", 3, 10, 0.0, 60),
                entry(ex, "lunges", 3, 10, 0.0, 60),
                entry(ex, "dumbbell-row", 3, 12, 20.0, 60),
                entry(ex, "shoulder-press", 3, 10, 15.0, 60),
                entry(ex, "plank", 3, 30, 0.0, 45),
            ],
        },
        WorkoutSession {
            id: "flexibility-flow".into(),
            name: "Flexibility & Recovery".into(),
            description: "Stretching and mobility work for recovery days.".into(),
            difficulty: Beginner,
            category: "Flexibility".into(),
            estimated_duration: 20,
            exercises: vec![
                entry(ex, "yoga-flow", 2, 60, 0.0, 30),
                entry(ex, "hamstring-stretch", 2, 30, 0.0, 15),
                entry(ex, "plank", 2, 45, 0.0, 30),
            ],
        },
    ];

    let sessions = sessions.into_iter().map(|s| (s.id.clone(), s)).collect();

    Catalog {
        exercises,
        sessions,
    }
}

impl Catalog {
    /// Look up an exercise by id
    pub fn exercise(&self, id: &str) -> Option<&Arc<Exercise>> {
        self.exercises.get(id)
    }

    /// Look up a workout session template by id
    pub fn session(&self, id: &str) -> Option<&WorkoutSession> {
        self.sessions.get(id)
    }

    /// Exercises sorted by name, optionally restricted to one category
    pub fn exercises_in(&self, category: Option<ExerciseCategory>) -> Vec<&Arc<Exercise>> {
        let mut found: Vec<_> = self
            .exercises
            .values()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Session templates sorted by id
    pub fn sessions_sorted(&self) -> Vec<&WorkoutSession> {
        let mut sessions: Vec<_> = self.sessions.values().collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        sessions
    }

    /// Validate the catalog for internal consistency
    ///
    /// Returns a list of validation errors (empty if valid).
    /// Sessions with an empty exercise or an exercise without sets are
    /// rejected here so an active workout never starts on one.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, exercise) in &self.exercises {
            if key != &exercise.id {
                errors.push(format!(
                    "Exercise key '{}' does not match id '{}'",
                    key, exercise.id
                ));
            }
            if exercise.instructions.is_empty() {
                errors.push(format!("Exercise '{}' has no instructions", exercise.id));
            }
        }

        let mut names = HashSet::new();
        for (key, session) in &self.sessions {
            if key != &session.id {
                errors.push(format!(
                    "Session key '{}' does not match id '{}'",
                    key, session.id
                ));
            }
            if !names.insert(session.name.as_str()) {
                errors.push(format!("Duplicate session name '{}'", session.name));
            }

            for entry in &session.exercises {
                if !self.exercises.contains_key(&entry.exercise_id) {
                    errors.push(format!(
                        "Session '{}' references unknown exercise '{}'",
                        session.id, entry.exercise_id
                    ));
                }
            }

            errors.extend(session.validate());
        }

        if self.sessions.is_empty() {
            errors.push("Catalog has no workout sessions".to_string());
        }

        errors
    }
}
