use std::path::PathBuf;

use chrono::Duration;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::duration::parse_duration_arg;

#[derive(Parser)]
#[command(name = "rudoro")]
#[command(about = "A Pomodoro timer and activity tracker for the terminal")]
#[command(long_about = "rudoro - A Pomodoro timer for the terminal

Runs work and break phases in a fixed cycle, tracks how long you spend on
each activity, and prints a summary when you quit.

QUICK START:
  rudoro                     Open the interactive menu
  rudoro run --work 50m      Use 50 minute work phases
  rudoro config init         Write a default config file

KEYS WHILE A PHASE RUNS:
  Enter      Pause or resume
  Ctrl+C     Interrupt: skip the phase or cancel the set

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  rudoro <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Path to the config file
    ///
    /// Defaults to ~/.rudoro/config.yaml.
    #[arg(long, env = "RUDORO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive Pomodoro menu (default)
    ///
    /// From the menu you can run a Pomodoro set for a category, count up
    /// with the stopwatch, track any other activity by wall-clock time,
    /// or review the session so far. The session summary is printed when
    /// you quit.
    ///
    /// # Examples
    ///
    ///   rudoro run                           Use the configured durations
    ///   rudoro run --work 50m --cycles 3     Longer work, shorter sets
    ///   rudoro run --no-sound --auto-start   Quiet and hands-free
    ///   rudoro run -o json                   Print the summary as JSON
    #[command(alias = "r")]
    Run(RunArgs),

    /// Show or create the config file
    ///
    /// # Examples
    ///
    ///   rudoro config show            Print the effective config
    ///   rudoro config show -o json    As JSON
    ///   rudoro config path            Print where the file lives
    ///   rudoro config init            Write the defaults
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   rudoro completions bash > ~/.local/share/bash-completion/completions/rudoro
    ///   rudoro completions zsh > ~/.zfunc/_rudoro
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides for a single run. Anything not given comes from the config
/// file.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Work phase length (e.g. 25m, 1h30m, 90s; bare numbers are minutes)
    #[arg(long, value_parser = parse_duration_arg)]
    pub work: Option<Duration>,

    /// Short break length
    #[arg(long, value_parser = parse_duration_arg)]
    pub short_break: Option<Duration>,

    /// Long break length
    #[arg(long, value_parser = parse_duration_arg)]
    pub long_break: Option<Duration>,

    /// Work phases before the long break
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub cycles: Option<u32>,

    /// Don't play sounds when a phase ends
    #[arg(long)]
    pub no_sound: bool,

    /// Start each phase without waiting for Enter
    #[arg(long)]
    pub auto_start: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}
