//! # Stair Calculator CLI
//!
//! Terminal front end for `stair_core`.
//!
//! ```text
//! stair_cli calc --total-rise 108 --riser-height "7 1/2" --tread-depth "9 1/4"
//! stair_cli calc --total-rise 274.3 --risers 15 --edited risers --unit cm --json
//! stair_cli prefs set fraction_display_denominator 32
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use stair_core::calculations::{calculate, EditedField, StairInput};
use stair_core::debug::DebugContext;
use stair_core::file_io::{load_or_default, save_preferences, DEFAULT_PREFERENCES_PATH};
use stair_core::preferences::UserPreferences;
use stair_core::thresholds::RegulatoryThresholds;
use stair_core::units::DisplayUnit;

mod report;

#[derive(Debug, Parser)]
#[command(version, about = "Straight stair calculator and code checker")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Preferences file
    #[arg(long, default_value = DEFAULT_PREFERENCES_PATH, global = true)]
    prefs: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Size a stair and check it against the code
    Calc(CalcArgs),

    /// Show or change saved preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Debug, clap::Args)]
struct CalcArgs {
    /// Floor-to-floor rise (e.g. 108, "107 3/4", 3/4)
    #[arg(long)]
    total_rise: String,

    /// Desired riser height
    #[arg(long, default_value = "")]
    riser_height: String,

    /// Desired tread depth (preference default when omitted)
    #[arg(long, default_value = "")]
    tread_depth: String,

    /// Manual tread count
    #[arg(long, default_value = "")]
    treads: String,

    /// Manual riser count
    #[arg(long, default_value = "")]
    risers: String,

    /// Field edited last: risers, treads, riser-height, tread-depth or none.
    /// Inferred from the other flags when omitted.
    #[arg(long)]
    edited: Option<EditedField>,

    /// Upper floor finish thickness
    #[arg(long, default_value = "")]
    upper_floor: String,

    /// Lower floor finish thickness
    #[arg(long, default_value = "")]
    lower_floor: String,

    /// Stairwell opening length
    #[arg(long, default_value = "")]
    opening_depth: String,

    /// Stairwell opening start, from the first nose
    #[arg(long, default_value = "")]
    opening_offset: String,

    /// Floor length available for the stair
    #[arg(long, default_value = "")]
    available_run: String,

    /// Input unit (in or cm); defaults to the preference
    #[arg(long)]
    unit: Option<DisplayUnit>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Trace every calculation step (use with -vv)
    #[arg(long)]
    debug: bool,

    /// TOML file overriding the regulatory thresholds
    #[arg(long)]
    thresholds: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum PrefsCommand {
    /// Print the current preferences
    Show,
    /// Change one preference
    Set {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },
    /// Restore the defaults
    Reset,
}

impl Cli {
    fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        match self.command {
            Command::Calc(args) => args.run(&self.prefs),
            Command::Prefs(cmd) => cmd.run(&self.prefs),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    }
}

impl CalcArgs {
    fn run(self, prefs_path: &Path) -> anyhow::Result<()> {
        let preferences = load_or_default(prefs_path);
        let thresholds = match &self.thresholds {
            Some(path) => RegulatoryThresholds::load(path)
                .with_context(|| format!("failed to load thresholds from {}", path.display()))?,
            None => RegulatoryThresholds::default(),
        };

        let edited = self.edited.unwrap_or_else(|| self.inferred_edit());
        let input = StairInput {
            total_rise: self.total_rise,
            desired_riser_height: self.riser_height,
            desired_tread_depth: self.tread_depth,
            manual_tread_count: self.treads,
            manual_riser_count: self.risers,
            edited,
            floor_thickness_upper: self.upper_floor,
            floor_thickness_lower: self.lower_floor,
            opening_depth: self.opening_depth,
            opening_offset: self.opening_offset,
            available_run: self.available_run,
            unit: self.unit.unwrap_or(preferences.display_unit),
        };

        let result = match calculate(&input, &thresholds, &preferences, DebugContext::from(self.debug)) {
            Ok(result) => result,
            Err(e) => {
                if self.json {
                    eprintln!("{}", serde_json::to_string_pretty(&e)?);
                }
                return Err(anyhow::Error::new(e).context("stair calculation failed"));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{}", report::render(&result));
        }
        Ok(())
    }

    /// A manual count on the command line wins over the riser height
    fn inferred_edit(&self) -> EditedField {
        if !self.risers.trim().is_empty() {
            EditedField::ManualRiserCount
        } else if !self.treads.trim().is_empty() {
            EditedField::ManualTreadCount
        } else if !self.riser_height.trim().is_empty() {
            EditedField::DesiredRiserHeight
        } else {
            EditedField::ColdStart
        }
    }
}

impl PrefsCommand {
    fn run(self, path: &Path) -> anyhow::Result<()> {
        match self {
            PrefsCommand::Show => {
                let preferences = load_or_default(path);
                println!("{}", serde_json::to_string_pretty(&preferences)?);
            }
            PrefsCommand::Set { key, value } => {
                let mut preferences = load_or_default(path);
                preferences
                    .set(&key, &value)
                    .with_context(|| format!("cannot set preference '{}'", key))?;
                save_preferences(&preferences, path)?;
                println!("{} = {}", key, value);
            }
            PrefsCommand::Reset => {
                save_preferences(&UserPreferences::default(), path)?;
                println!("Preferences reset to defaults in {}", path.display());
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
