use clap::{Parser, Subcommand, ValueEnum};
use liftplan_core::config::GearConfig;
use liftplan_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "5/3/1 training load planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and calculate a seven week progression
    Plan {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Plan in this unit with its default bar and plates (kg, lbs)
        #[arg(long)]
        unit: Option<Unit>,

        /// Movement and training max, e.g. --movement squat=140 (repeatable)
        #[arg(long = "movement", value_name = "NAME=TM", value_parser = parse_movement)]
        movements: Vec<(String, f64)>,

        /// Auxiliary work ("FSL Multiple Sets"/multi, "FSL"/single)
        #[arg(long)]
        strategy: Option<StrategyType>,

        /// Deload week template (deload1..deload5)
        #[arg(long)]
        deload: Option<DeloadType>,

        /// Skip warm-up sets
        #[arg(long)]
        no_warmup: bool,

        /// Skip joker sets
        #[arg(long)]
        no_jokers: bool,

        /// Recommend plates for every set
        #[arg(long)]
        plates: bool,
    },

    /// Round a weight down to what the bar and plates can build
    Round {
        weight: f64,

        /// Use the default bar and plates of this unit
        #[arg(long)]
        unit: Option<Unit>,
    },

    /// Show the plates to load on each side for a total weight
    Plates {
        weight: f64,

        /// Use the default bar and plates of this unit
        #[arg(long)]
        unit: Option<Unit>,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    liftplan_core::logging::init(cli.verbose);

    match cli.command {
        Commands::Init { force } => cmd_init(cli.config, force),
        Commands::Plan {
            format,
            unit,
            movements,
            strategy,
            deload,
            no_warmup,
            no_jokers,
            plates,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(unit) = unit {
                config.gear = gear_config(unit);
            }
            if !movements.is_empty() {
                let unit = config.gear.unit;
                config.movements = movements
                    .into_iter()
                    .map(|(name, tm)| Movement::new(name, tm, unit))
                    .collect();
            }
            if let Some(strategy) = strategy {
                config.plan.strategy = strategy;
            }
            if let Some(deload) = deload {
                config.plan.deload = deload;
            }
            config.plan.warmup &= !no_warmup;
            config.plan.joker_sets &= !no_jokers;
            config.plan.recommend_plates |= plates;

            cmd_plan(&config, format)
        }
        Commands::Round { weight, unit } => {
            let gear = gear_for(cli.config.as_ref(), unit)?;
            let rounded = gear.round(weight)?;
            println!("{} {}", rounded, gear.unit);
            Ok(())
        }
        Commands::Plates { weight, unit } => {
            let gear = gear_for(cli.config.as_ref(), unit)?;
            let plates = gear.recommend(weight)?;
            if plates.is_empty() {
                println!("Empty bar ({} {})", gear.min(), gear.unit);
            } else {
                println!("Per side: {} {}", join(&plates), gear.plates.unit);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn gear_config(unit: Unit) -> GearConfig {
    GearConfig {
        unit,
        bar: None,
        plates: None,
    }
}

fn gear_for(path: Option<&PathBuf>, unit: Option<Unit>) -> Result<Gear> {
    match unit {
        Some(unit) => Ok(Gear::default_for(unit)),
        None => Ok(load_config(path)?.gear.to_gear()),
    }
}

fn parse_movement(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, tm) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=TM, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing movement name in '{}'", s));
    }
    let tm: f64 = tm
        .trim()
        .parse()
        .map_err(|_| format!("invalid training max in '{}'", s))?;
    Ok((name.to_string(), tm))
}

fn cmd_plan(config: &Config, format: Format) -> Result<()> {
    let strategy = config.strategy()?;
    tracing::debug!(
        "Planning {} movements: {}",
        strategy.movements.len(),
        strategy
            .movements
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let progression = strategy.progression()?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&progression)?),
        Format::Text => display_progression(&progression, &strategy),
    }
    Ok(())
}

fn cmd_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target = match &path {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };

    if target.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }

    tracing::debug!("Writing starter config to {:?}", target);
    let config = Config::example();
    match path {
        Some(path) => config.save_to(&path)?,
        None => config.save()?,
    }
    println!("✓ Wrote config to {}", target.display());
    Ok(())
}

fn display_progression(progression: &Progression, strategy: &Strategy) {
    let unit = strategy.gear.unit;

    for (index, week) in progression.weeks.iter().enumerate() {
        println!();
        if week.deload {
            println!("Week {} (deload)", Week::display_number(index));
        } else {
            println!("Week {}", Week::display_number(index));
        }
        println!("─────────────────────────────────────────");

        for session in &week.sessions {
            let Some(first) = session.sets.first() else {
                continue;
            };
            println!(
                "  {} (TM {} {})",
                first.movement.name,
                round_display(first.movement.training_max),
                first.movement.unit
            );

            for set in &session.sets {
                let weight = set
                    .weight
                    .map(|w| format!("{} {}", w, unit))
                    .unwrap_or_else(|| "-".to_string());
                let reps = if set.amrap {
                    format!("{}+", set.reps)
                } else {
                    set.reps.to_string()
                };
                let mut line = format!(
                    "    {:<9} {:>5.1}%  {:>10} x {}",
                    set.set_type.as_str(), set.percent, weight, reps
                );
                if !set.plates.is_empty() {
                    line.push_str(&format!("  [{}]", join(&set.plates)));
                }
                println!("{}", line);
            }
        }
    }
}

fn round_display(weight: f64) -> f64 {
    (weight * 100.0).round() / 100.0
}

fn join(weights: &[f64]) -> String {
    weights
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
