//! weekplan - Personal weekly workout schedule planner

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use weekplan::exercises::join_sentence;
use weekplan::tui::App;
use weekplan::{
    FocusType, MuscleCatalog, ScheduleBuilder, ScheduleStore, ValidationError, WeekDay,
    WeekSchedule,
};

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(author, version, about = "Plan a weekly workout schedule")]
struct Cli {
    /// Schedule file
    #[arg(long, global = true, env = "WEEKPLAN_SCHEDULE", default_value = "schedule.json")]
    schedule: PathBuf,

    /// Muscle/exercise catalog (JSON); built-in catalog when omitted
    #[arg(long, global = true, env = "WEEKPLAN_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI week view
    Tui,

    /// Print the current schedule
    Show,

    /// Choose workout days (2 to 5); all other days become rest days
    Plan {
        /// Days, e.g. "mon wed fri"
        #[arg(required = true)]
        days: Vec<WeekDay>,
    },

    /// Assign muscle groups to workout days
    Assign {
        /// DAY=GROUP[,GROUP...], e.g. "monday=chest,triceps"
        #[arg(required = true, value_parser = parse_day_groups)]
        days: Vec<(WeekDay, Vec<String>)>,
    },

    /// Add exercises for a muscle group to every day that trains it
    Add {
        /// Muscle group (see `muscles`)
        muscle: String,

        /// NAME[:FOCUS], focus is strength, hypertrophy (default) or endurance
        #[arg(required = true, value_parser = parse_pick)]
        exercises: Vec<(String, Option<FocusType>)>,

        /// Focus for exercises given without one
        #[arg(short, long, default_value = "hypertrophy")]
        focus: FocusType,
    },

    /// Recommend exercises for a muscle group
    Describe {
        muscle: String,
    },

    /// List muscle groups in the catalog
    Muscles,

    /// Clear the schedule back to a week of rest days
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_day_groups(s: &str) -> Result<(WeekDay, Vec<String>), String> {
    let (day, groups) = s
        .split_once('=')
        .ok_or_else(|| format!("expected DAY=GROUP[,GROUP...], got '{}'", s))?;
    let day = day.parse::<WeekDay>().map_err(|e| e.to_string())?;
    let groups = groups
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect();
    Ok((day, groups))
}

fn parse_pick(s: &str) -> Result<(String, Option<FocusType>), String> {
    match s.rsplit_once(':') {
        Some((name, focus)) => {
            let focus = focus.parse::<FocusType>().map_err(|e| e.to_string())?;
            Ok((name.trim().to_string(), Some(focus)))
        }
        None => Ok((s.trim().to_string(), None)),
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => MuscleCatalog::load(path)?,
        None => MuscleCatalog::builtin(),
    };
    let store = ScheduleStore::new(&cli.schedule);
    let builder = ScheduleBuilder::new(&catalog);

    match cli.command {
        Some(Commands::Show) => {
            print_week(&store.load_or_default()?);
        }

        Some(Commands::Plan { days }) => {
            let week = store.load_or_default()?;
            let days: BTreeSet<WeekDay> = days.into_iter().collect();
            let week = builder.set_workout_days(&week, &days)?;
            store.save(&week)?;
            println!("Workout days set. Assign muscle groups next with `weekplan assign`.");
            print_week(&week);
        }

        Some(Commands::Assign { days }) => {
            let week = store.load_or_default()?;
            let per_day = muscle_batch(&catalog, days)?;
            let week = builder.assign_muscle_groups(&week, &per_day)?;
            store.save(&week)?;
            println!("Schedule created successfully!");
            print_week(&week);
        }

        Some(Commands::Add { muscle, exercises, focus }) => {
            let muscle = resolve_muscle(&catalog, &muscle)?;
            let picks = exercises
                .into_iter()
                .map(|(name, f)| {
                    Ok((resolve_exercise(&catalog, &muscle, &name)?, f.unwrap_or(focus)))
                })
                .collect::<Result<Vec<_>>>()?;

            let week = store.load_or_default()?;
            if !week.days().any(|d| d.targets(&muscle)) {
                warn!(muscle = %muscle, "no workout day trains this muscle group");
            }
            let week = builder.add_exercise_assignment(&week, &muscle, &picks)?;
            store.save(&week)?;
            println!("Added {} exercise(s) for {}.", picks.len(), muscle);
            print_week(&week);
        }

        Some(Commands::Describe { muscle }) => {
            let muscle = resolve_muscle(&catalog, &muscle)?;
            println!("{}", catalog.describe(&muscle)?);
            println!();
            for focus in FocusType::ALL {
                let (sets, reps) = focus.volume();
                println!("  {:12} {}x{:<3} {}", focus.name(), sets, reps, focus.summary());
            }
        }

        Some(Commands::Muscles) => {
            println!("Muscle groups:");
            println!("{:-<60}", "");
            for entry in catalog.entries() {
                println!("{:12} | {}", entry.id, entry.exercises.join(", "));
            }
        }

        Some(Commands::Reset { yes }) => {
            if !yes {
                bail!("refusing to reset without --yes");
            }
            let week = builder.reset(&store.load_or_default()?);
            store.save(&week)?;
            println!("All data has been reset.");
        }

        Some(Commands::Tui) | None => {
            let mut app = App::new(store)?;
            app.run()?;
        }
    }

    Ok(())
}

/// Group CLI `DAY=GROUPS` pairs by day with catalog ids; repeated days merge
fn muscle_batch(
    catalog: &MuscleCatalog,
    days: Vec<(WeekDay, Vec<String>)>,
) -> Result<BTreeMap<WeekDay, BTreeSet<String>>, ValidationError> {
    let mut per_day: BTreeMap<WeekDay, BTreeSet<String>> = BTreeMap::new();
    for (day, groups) in days {
        let resolved = groups
            .iter()
            .map(|g| resolve_muscle(catalog, g))
            .collect::<Result<BTreeSet<_>, _>>()?;
        per_day.entry(day).or_default().extend(resolved);
    }
    Ok(per_day)
}

fn resolve_muscle(catalog: &MuscleCatalog, name: &str) -> Result<String, ValidationError> {
    catalog
        .resolve(name)
        .map(String::from)
        .ok_or_else(|| ValidationError::UnknownMuscleGroup {
            muscle_group: name.to_string(),
        })
}

fn resolve_exercise(catalog: &MuscleCatalog, muscle: &str, name: &str) -> Result<String> {
    let entry = catalog
        .get(muscle)
        .with_context(|| format!("muscle group '{}' vanished from catalog", muscle))?;
    match entry.exercises.iter().find(|e| e.eq_ignore_ascii_case(name)) {
        Some(found) => Ok(found.clone()),
        None => {
            debug!(muscle, name, "exercise not in catalog");
            bail!(
                "'{}' is not listed for {}; choose from {}",
                name,
                muscle,
                join_sentence(&entry.exercises)
            )
        }
    }
}

fn print_week(week: &WeekSchedule) {
    let today = WeekDay::today();
    println!("{:-<60}", "");
    for day in week.days() {
        let marker = if day.day() == today { "*" } else { " " };
        if day.is_rest_day() {
            println!("{}{}: Rest Day", marker, day.day());
            continue;
        }
        let muscles: Vec<&str> = day.muscle_groups().iter().map(String::as_str).collect();
        let muscles = if muscles.is_empty() { "(none)".to_string() } else { muscles.join(", ") };
        println!("{}{}: Workout Day -> {}", marker, day.day(), muscles);
        for ex in day.exercises() {
            println!("      {}", ex.descriptor());
        }
    }
}
