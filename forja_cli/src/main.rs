use chrono::Utc;
use clap::{Parser, Subcommand};
use forja_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "forja")]
#[command(about = "Personal strength training and nutrition tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override display language (es or en)
    #[arg(long, global = true)]
    lang: Option<Language>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log today's workout for one exercise
    Log {
        /// Exercise id or name from today's plan
        #[arg(long)]
        exercise: String,

        /// A set as WEIGHTxREPS, repeatable; the first set is the top set
        #[arg(long = "set", required = true)]
        sets: Vec<String>,

        /// Tempo applied to every set (eccentric-pause-concentric)
        #[arg(long, default_value = "3-1-2")]
        tempo: String,

        /// Mark the last set as taken to failure
        #[arg(long)]
        to_failure: bool,

        /// Session notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Log body weight, or list recent entries
    Weight {
        /// Weight in kg; omit to list recent entries
        kg: Option<f64>,

        /// List recent entries
        #[arg(long)]
        list: bool,
    },

    /// Compute daily calories and macro targets
    Macros {
        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// male or female
        #[arg(long)]
        sex: Option<Sex>,

        /// sedentary, light, moderate, active or very_active
        #[arg(long)]
        activity: Option<ActivityLevel>,

        /// lose, maintain or gain
        #[arg(long)]
        goal: Option<Goal>,

        /// Save this profile for later runs
        #[arg(long)]
        save: bool,
    },

    /// Manage the weekly plan
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// Manage meal plans
    Meals {
        #[command(subcommand)]
        command: MealCommands,
    },

    /// Show today's training status (default)
    Status,

    /// Roll up WAL workout logs to CSV
    Rollup {
        /// Clean up processed WAL files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Create a fresh all-rest plan and make it active
    Init {
        /// Plan name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the active plan
    Show,

    /// Make a plan active by id
    Activate { id: String },

    /// Set a day's muscle groups and exercises on the active plan
    SetDay {
        #[arg(long)]
        day: DayOfWeek,

        /// Muscle group, repeatable; empty selection means rest
        #[arg(long = "group")]
        groups: Vec<MuscleGroup>,

        /// Exercise name, repeatable
        #[arg(long = "exercise")]
        exercises: Vec<String>,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Show a day's meals and totals
    Show {
        /// Day of the week, defaults to today
        #[arg(long)]
        day: Option<DayOfWeek>,
    },

    /// Add a meal to a day
    Add {
        #[arg(long)]
        day: DayOfWeek,

        /// breakfast, lunch, snack or dinner
        #[arg(long = "type")]
        meal_type: MealType,

        #[arg(long)]
        name: String,

        #[arg(long)]
        calories: i32,

        #[arg(long)]
        protein: i32,

        #[arg(long)]
        carbs: i32,

        #[arg(long)]
        fat: i32,
    },

    /// Remove a meal from a day
    Remove {
        #[arg(long)]
        day: DayOfWeek,

        #[arg(long)]
        id: String,
    },
}

struct Paths {
    state: PathBuf,
    workout_wal: PathBuf,
    body_weight_wal: PathBuf,
    csv: PathBuf,
    wal_dir: PathBuf,
}

impl Paths {
    fn new(data_dir: &Path) -> Self {
        let wal_dir = data_dir.join("wal");
        Self {
            state: wal_dir.join("state.json"),
            workout_wal: wal_dir.join("workout_logs.wal"),
            body_weight_wal: wal_dir.join("body_weight.wal"),
            csv: data_dir.join("workouts.csv"),
            wal_dir,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    forja_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let language = cli.lang.unwrap_or(config.display.language);
    let paths = Paths::new(&data_dir);

    std::fs::create_dir_all(&paths.wal_dir)?;

    match cli.command {
        Some(Commands::Log {
            exercise,
            sets,
            tempo,
            to_failure,
            notes,
        }) => cmd_log(&paths, language, &exercise, &sets, &tempo, to_failure, notes),
        Some(Commands::Weight { kg, list }) => cmd_weight(&paths, language, kg, list),
        Some(Commands::Macros {
            weight,
            height,
            age,
            sex,
            activity,
            goal,
            save,
        }) => cmd_macros(&paths, language, weight, height, age, sex, activity, goal, save),
        Some(Commands::Plan { command }) => cmd_plan(&paths, language, command),
        Some(Commands::Meals { command }) => cmd_meals(&paths, language, command),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
        Some(Commands::Status) | None => cmd_status(&paths, &config, language),
    }
}

/// Parse a set spec of the form WEIGHTxREPS (e.g. "82.5x8")
fn parse_set_spec(spec: &str) -> Result<(f64, u32)> {
    let (weight, reps) = spec
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(|| Error::Parse(format!("invalid set '{}', expected WEIGHTxREPS", spec)))?;

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("invalid weight in set '{}'", spec)))?;
    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| Error::Parse(format!("invalid reps in set '{}'", spec)))?;

    Ok((weight, reps))
}

fn cmd_log(
    paths: &Paths,
    language: Language,
    exercise_key: &str,
    set_specs: &[String],
    tempo: &str,
    to_failure: bool,
    notes: Option<String>,
) -> Result<()> {
    let state = UserFitnessState::load(&paths.state)?;

    let Some(active) = plan::active_plan(&state) else {
        println!(
            "{}",
            language.text(
                "No hay plan semanal. Crea uno con: forja plan init",
                "No weekly plan yet. Create one with: forja plan init"
            )
        );
        return Ok(());
    };

    let today = plan::current_day();
    let today_item = plan::item_for_day(active, today);

    if today_item.map(plan::is_rest_day).unwrap_or(true) {
        println!(
            "{}",
            language.text("Hoy es dia de descanso.", "Today is a rest day.")
        );
        return Ok(());
    }

    let lowered = exercise_key.to_lowercase();
    let exercise = today_item
        .and_then(|item| {
            item.exercises
                .iter()
                .find(|e| e.id == exercise_key || e.name.to_lowercase() == lowered)
        })
        .ok_or_else(|| {
            Error::Plan(format!(
                "exercise '{}' is not scheduled for {}",
                exercise_key,
                today.as_str()
            ))
        })?;

    // Build sets; the first one is the top set
    let mut sets = Vec::with_capacity(set_specs.len());
    for spec in set_specs {
        let (weight, reps) = parse_set_spec(spec)?;
        sets.push(WorkoutSet {
            weight,
            reps,
            tempo: tempo.to_string(),
            to_failure: false,
        });
    }
    if to_failure {
        if let Some(last) = sets.last_mut() {
            last.to_failure = true;
        }
    }

    // Advisory checks against history; warnings never block the save
    let history = load_workout_logs(&paths.workout_wal, &paths.csv)?;
    let top_weight = sets.first().map(|s| s.weight).unwrap_or(0.0);
    let alerts = heuristics::check_workout(&exercise.id, top_weight, &history, language);
    for alert in &alerts {
        println!("⚠ {}", alert.message);
    }

    let log = WorkoutLog {
        id: format!("wl-{}", uuid::Uuid::new_v4()),
        date: Utc::now(),
        exercise_id: exercise.id.clone(),
        exercise_name: exercise.name.clone(),
        muscle_groups: vec![exercise.muscle_group],
        sets,
        suggested_rest: exercise.rest_seconds,
        notes,
    };

    let mut sink = JsonlSink::new(&paths.workout_wal);
    sink.append(&log)?;

    println!(
        "\n✓ {}",
        language.text("Entrenamiento registrado!", "Workout logged!")
    );
    println!(
        "  {}: {} ({})",
        language.text("Descanso sugerido", "Suggested rest"),
        labels::format_time(exercise.rest_seconds),
        labels::muscle_group_label(exercise.muscle_group, language)
    );

    Ok(())
}

fn cmd_weight(paths: &Paths, language: Language, kg: Option<f64>, list: bool) -> Result<()> {
    if let Some(kg) = kg {
        let entry = BodyWeightLog {
            id: format!("bw-{}", uuid::Uuid::new_v4()),
            date: Utc::now(),
            weight: kg,
        };

        let mut sink = JsonlSink::new(&paths.body_weight_wal);
        sink.append(&entry)?;

        println!(
            "✓ {}: {} kg",
            language.text("Peso registrado", "Weight logged"),
            kg
        );
        if !list {
            return Ok(());
        }
    }

    let logs = load_body_weight_logs(&paths.body_weight_wal)?;
    if logs.is_empty() {
        println!(
            "{}",
            language.text("Sin registros de peso.", "No weight entries yet.")
        );
        return Ok(());
    }

    println!("{}:", language.text("Peso corporal", "Body weight"));
    for log in logs.iter().take(10) {
        println!("  {}  {:.1} kg", log.date.format("%Y-%m-%d"), log.weight);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_macros(
    paths: &Paths,
    language: Language,
    weight: Option<f64>,
    height: Option<f64>,
    age: Option<u32>,
    sex: Option<Sex>,
    activity: Option<ActivityLevel>,
    goal: Option<Goal>,
    save: bool,
) -> Result<()> {
    let state = UserFitnessState::load(&paths.state)?;

    let profile = match (weight, height, age, sex, activity, goal) {
        (Some(weight), Some(height), Some(age), Some(sex), Some(activity_level), Some(goal)) => {
            UserMacroProfile {
                weight,
                height,
                age,
                sex,
                activity_level,
                goal,
            }
        }
        _ => {
            let mut profile = state.macro_profile.clone().ok_or_else(|| {
                Error::State(
                    "no saved profile; pass --weight --height --age --sex --activity --goal"
                        .into(),
                )
            })?;
            if let Some(weight) = weight {
                profile.weight = weight;
            }
            if let Some(height) = height {
                profile.height = height;
            }
            if let Some(age) = age {
                profile.age = age;
            }
            if let Some(sex) = sex {
                profile.sex = sex;
            }
            if let Some(activity) = activity {
                profile.activity_level = activity;
            }
            if let Some(goal) = goal {
                profile.goal = goal;
            }
            profile
        }
    };

    // The macro engine itself never validates; the boundary does
    if profile.weight <= 0.0 || profile.height <= 0.0 || profile.age == 0 {
        return Err(Error::Parse(
            "weight, height and age must be positive".into(),
        ));
    }

    let bmr = calculate_bmr(&profile);
    let tdee = calculate_tdee(&profile);
    let target = calculate_macros(&profile);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", language.text("MACROS DIARIOS", "DAILY MACROS"));
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {}: {}",
        language.text("Objetivo", "Goal"),
        labels::goal_label(profile.goal, language)
    );
    println!(
        "  {}: {}",
        language.text("Actividad", "Activity"),
        labels::activity_label(profile.activity_level, language)
    );
    println!(
        "  {}: {}",
        language.text("Sexo", "Sex"),
        labels::sex_label(profile.sex, language)
    );
    println!();
    println!("  BMR:  {:.1} kcal", bmr);
    println!("  TDEE: {} kcal", tdee);
    println!(
        "  {}: {} kcal",
        language.text("Calorias objetivo", "Target calories"),
        target.calories
    );
    println!();
    println!(
        "  {}: {} g",
        language.text("Proteina", "Protein"),
        target.protein
    );
    println!(
        "  {}: {} g",
        language.text("Carbohidratos", "Carbs"),
        target.carbs
    );
    println!("  {}: {} g", language.text("Grasa", "Fat"), target.fat);
    println!();

    if save {
        UserFitnessState::update(&paths.state, |state| {
            state.macro_profile = Some(profile.clone());
            Ok(())
        })?;
        println!(
            "✓ {}",
            language.text("Perfil guardado", "Profile saved")
        );
    }

    Ok(())
}

fn cmd_plan(paths: &Paths, language: Language, command: PlanCommands) -> Result<()> {
    match command {
        PlanCommands::Init { name } => {
            let name = name.unwrap_or_else(|| {
                language.text("Plan base", "Base plan").to_string()
            });

            let new_plan = plan::base_plan(&name);
            let plan_id = new_plan.id.clone();

            UserFitnessState::update(&paths.state, |state| {
                state.weekly_plans.push(new_plan.clone());
                plan::set_active_plan(state, &plan_id);
                Ok(())
            })?;

            println!(
                "✓ {}: {} ({})",
                language.text("Plan semanal creado", "Weekly plan created"),
                name,
                plan_id
            );
            Ok(())
        }

        PlanCommands::Show => {
            let state = UserFitnessState::load(&paths.state)?;
            let Some(active) = plan::active_plan(&state) else {
                println!(
                    "{}",
                    language.text(
                        "No hay plan semanal. Crea uno con: forja plan init",
                        "No weekly plan yet. Create one with: forja plan init"
                    )
                );
                return Ok(());
            };

            println!("\n{} ({})", active.name, active.id);
            for day in DayOfWeek::ALL {
                let label = labels::day_label(day, language);
                match plan::item_for_day(active, day) {
                    Some(item) if !plan::is_rest_day(item) => {
                        let groups: Vec<&str> = item
                            .muscle_groups
                            .iter()
                            .map(|g| labels::muscle_group_label(*g, language))
                            .collect();
                        println!("  {}  {}", label, groups.join(", "));
                        for exercise in &item.exercises {
                            println!(
                                "       - {} ({})",
                                exercise.name,
                                labels::format_time(exercise.rest_seconds)
                            );
                        }
                    }
                    _ => {
                        println!(
                            "  {}  {}",
                            label,
                            labels::muscle_group_label(MuscleGroup::Descanso, language)
                        );
                    }
                }
            }
            Ok(())
        }

        PlanCommands::Activate { id } => {
            let mut found = false;
            UserFitnessState::update(&paths.state, |state| {
                found = plan::set_active_plan(state, &id);
                Ok(())
            })?;

            if !found {
                return Err(Error::Plan(format!("plan not found: {}", id)));
            }

            println!("✓ {}: {}", language.text("Plan activado", "Plan activated"), id);
            Ok(())
        }

        PlanCommands::SetDay {
            day,
            groups,
            exercises,
        } => {
            // The first real muscle group is assigned to new exercises
            let exercise_group = groups
                .iter()
                .copied()
                .find(|g| *g != MuscleGroup::Descanso)
                .unwrap_or(MuscleGroup::Pecho);

            let exercises: Vec<Exercise> = exercises
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    plan::new_exercise(name, exercise_group, None, index as u32 + 1)
                })
                .collect();

            let mut updated = false;
            UserFitnessState::update(&paths.state, |state| {
                let active_id = plan::active_plan(state).map(|p| p.id.clone());
                let Some(active_id) = active_id else {
                    return Ok(());
                };
                if let Some(target) = state
                    .weekly_plans
                    .iter_mut()
                    .find(|plan| plan.id == active_id)
                {
                    plan::set_day(target, day, groups.clone(), exercises.clone());
                    updated = true;
                }
                Ok(())
            })?;

            if !updated {
                return Err(Error::Plan(
                    "no weekly plan yet; create one with: forja plan init".into(),
                ));
            }

            println!(
                "✓ {}: {}",
                language.text("Dia actualizado", "Day updated"),
                labels::day_label(day, language)
            );
            Ok(())
        }
    }
}

fn cmd_meals(paths: &Paths, language: Language, command: MealCommands) -> Result<()> {
    match command {
        MealCommands::Show { day } => {
            let day = day.unwrap_or_else(plan::current_day);
            let state = UserFitnessState::load(&paths.state)?;

            let meals = meals::meals_for_day(&state, day);
            println!(
                "\n{} ({})",
                language.text("Comidas", "Meals"),
                labels::day_label(day, language)
            );

            if meals.is_empty() {
                println!(
                    "  {}",
                    language.text("Sin comidas planificadas.", "No meals planned.")
                );
                return Ok(());
            }

            let mut sorted: Vec<&Meal> = meals.iter().collect();
            sorted.sort_by_key(|meal| meal.order);
            for meal in &sorted {
                println!(
                    "  [{}] {} ({}): {} kcal, P{} C{} G{}",
                    meal.id,
                    meal.name,
                    labels::meal_type_label(meal.meal_type, language),
                    meal.calories,
                    meal.protein,
                    meal.carbs,
                    meal.fat
                );
            }

            if let Some(day_plan) = state.meal_plans.iter().find(|plan| plan.day == day) {
                let totals = meals::day_totals(day_plan);
                println!(
                    "\n  {}: {} kcal, P{} C{} G{}",
                    language.text("Total", "Total"),
                    totals.calories,
                    totals.protein,
                    totals.carbs,
                    totals.fat
                );

                if let Some(profile) = &state.macro_profile {
                    let target = calculate_macros(profile);
                    println!(
                        "  {}: {} kcal, P{} C{} G{}",
                        language.text("Objetivo", "Target"),
                        target.calories,
                        target.protein,
                        target.carbs,
                        target.fat
                    );
                }
            }
            Ok(())
        }

        MealCommands::Add {
            day,
            meal_type,
            name,
            calories,
            protein,
            carbs,
            fat,
        } => {
            let meal = meals::new_meal(&name, meal_type, calories, protein, carbs, fat, 0);
            let meal_id = meal.id.clone();

            UserFitnessState::update(&paths.state, |state| {
                meals::add_meal(state, day, meal.clone());
                Ok(())
            })?;

            println!(
                "✓ {}: {} ({})",
                language.text("Comida agregada", "Meal added"),
                name,
                meal_id
            );
            Ok(())
        }

        MealCommands::Remove { day, id } => {
            let mut removed = false;
            UserFitnessState::update(&paths.state, |state| {
                removed = meals::delete_meal(state, day, &id);
                Ok(())
            })?;

            if !removed {
                return Err(Error::Other(format!("meal not found: {}", id)));
            }

            println!("✓ {}", language.text("Comida eliminada", "Meal removed"));
            Ok(())
        }
    }
}

fn cmd_status(paths: &Paths, config: &Config, language: Language) -> Result<()> {
    let state = UserFitnessState::load(&paths.state)?;
    let history = load_workout_logs(&paths.workout_wal, &paths.csv)?;

    let today = plan::current_day();

    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {} {}",
        labels::day_label(today, language),
        language.text("PANEL DE CONTROL", "DASHBOARD")
    );
    println!("╰─────────────────────────────────────────╯");
    println!();

    match plan::active_plan(&state) {
        Some(active) => {
            let item = plan::item_for_day(active, today);
            match item {
                Some(item) if !plan::is_rest_day(item) => {
                    let groups: Vec<&str> = item
                        .muscle_groups
                        .iter()
                        .map(|g| labels::muscle_group_label(*g, language))
                        .collect();
                    println!(
                        "  {}: {}",
                        language.text("Hoy", "Today"),
                        groups.join(", ")
                    );
                    for exercise in &item.exercises {
                        println!(
                            "    - {} ({})",
                            exercise.name,
                            labels::format_time(exercise.rest_seconds)
                        );
                    }
                }
                _ => {
                    println!(
                        "  {}",
                        language.text("Hoy es dia de descanso.", "Today is a rest day.")
                    );
                }
            }
        }
        None => {
            println!(
                "  {}",
                language.text(
                    "No hay plan semanal. Crea uno con: forja plan init",
                    "No weekly plan yet. Create one with: forja plan init"
                )
            );
        }
    }

    println!();
    println!(
        "  {}:",
        language.text("Dias desde ultimo estimulo", "Days since last stimulus")
    );
    let now = Utc::now();
    for group in &config.dashboard.tracked_groups {
        let days = heuristics::days_since_last_stimulus(*group, &history, now);
        let rendered = if days == heuristics::NEVER_TRAINED {
            language.text("nunca", "never").to_string()
        } else {
            days.to_string()
        };
        println!(
            "    {}: {}",
            labels::muscle_group_label(*group, language),
            rendered
        );
    }
    println!();

    Ok(())
}

fn cmd_rollup(paths: &Paths, cleanup: bool) -> Result<()> {
    if !paths.workout_wal.exists() {
        println!("No WAL file found - nothing to roll up.");
        return Ok(());
    }

    let count = forja_core::csv_rollup::wal_to_csv_and_archive(&paths.workout_wal, &paths.csv)?;

    println!("✓ Rolled up {} workout logs to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = forja_core::csv_rollup::cleanup_processed_wals(&paths.wal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed WAL files", cleaned);
        }
    }

    Ok(())
}
