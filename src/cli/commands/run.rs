//! Run command implementation.
//!
//! Merges the config file with command-line overrides, runs the
//! interactive app and renders the final session summary.

use std::io;
use std::path::Path;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::Config;
use crate::error::RudoroError;
use crate::features::focus::{SessionController, SessionSummary, TimerSettings};
use crate::features::notify::{self, Notifier, SilentNotifier};
use crate::output::to_json;
use crate::tui::{self, AppOptions};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the terminal fails.
pub fn run(
    config_path: Option<&Path>,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<String, RudoroError> {
    let config = Config::load(config_path)?;
    let settings = settings_for(&config, args)?;
    log::debug!("Timer settings: {settings:?}");

    let controller = SessionController::new(settings)?;
    let notifier = notifier_for(&config, args);
    let options = options_for(&config, args);

    // JSON callers read stdout, so the screens go to stderr
    let summary = match format {
        OutputFormat::Json => tui::run(controller, notifier, options, io::stderr())?,
        OutputFormat::Pretty => tui::run(controller, notifier, options, io::stdout())?,
    };

    format_summary(&summary, format)
}

/// Timer settings from the config file with command-line overrides applied.
///
/// # Errors
///
/// Returns an error if the merged settings are invalid.
pub fn settings_for(config: &Config, args: &RunArgs) -> Result<TimerSettings, RudoroError> {
    let mut settings = config.timer.to_settings()?;

    if let Some(work) = args.work {
        settings.work = work;
    }
    if let Some(short_break) = args.short_break {
        settings.short_break = short_break;
    }
    if let Some(long_break) = args.long_break {
        settings.long_break = long_break;
    }
    if let Some(cycles) = args.cycles {
        settings.cycles_before_long_break = cycles;
    }

    settings.validate()?;
    Ok(settings)
}

/// App behavior from the config file with command-line overrides applied.
#[must_use]
pub fn options_for(config: &Config, args: &RunArgs) -> AppOptions {
    AppOptions {
        auto_start: args.auto_start || config.timer.auto_start,
        display: config.display.clone(),
        suggestions: config.activities.extra.clone(),
        ..AppOptions::default()
    }
}

/// Pick the notifier; `--no-sound` wins over the config file.
#[must_use]
pub fn notifier_for(config: &Config, args: &RunArgs) -> Box<dyn Notifier> {
    if args.no_sound {
        Box::new(SilentNotifier)
    } else {
        notify::from_config(&config.sound)
    }
}

fn format_summary(summary: &SessionSummary, format: OutputFormat) -> Result<String, RudoroError> {
    match format {
        OutputFormat::Json => to_json(summary),
        OutputFormat::Pretty => Ok(summary.format()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    #[test]
    fn test_settings_from_config() {
        let settings = settings_for(&Config::default(), &RunArgs::default()).unwrap();
        assert_eq!(settings, TimerSettings::default());
    }

    #[test]
    fn test_args_override_config() {
        let mut config = Config::default();
        config.timer.work_minutes = 30;
        config.timer.cycles_before_long_break = 2;

        let args = RunArgs {
            work: Some(Duration::seconds(90)),
            cycles: Some(5),
            ..RunArgs::default()
        };
        let settings = settings_for(&config, &args).unwrap();

        assert_eq!(settings.work, Duration::seconds(90));
        assert_eq!(settings.short_break, Duration::minutes(10));
        assert_eq!(settings.cycles_before_long_break, 5);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.timer.long_break_minutes = 0;

        let err = settings_for(&config, &RunArgs::default()).unwrap_err();
        assert!(matches!(err, RudoroError::Config(_)));
    }

    #[test]
    fn test_options_merge_auto_start() {
        let mut config = Config::default();
        config.activities.extra = vec!["Gym".to_string()];

        let options = options_for(&config, &RunArgs::default());
        assert!(!options.auto_start);
        assert_eq!(options.suggestions, vec!["Gym".to_string()]);

        let args = RunArgs {
            auto_start: true,
            ..RunArgs::default()
        };
        assert!(options_for(&config, &args).auto_start);
    }

    #[test]
    fn test_no_sound_is_silent() {
        let args = RunArgs {
            no_sound: true,
            ..RunArgs::default()
        };
        let notifier = notifier_for(&Config::default(), &args);
        assert!(notifier
            .phase_finished(crate::features::focus::Phase::Work)
            .is_ok());
    }

    #[test]
    fn test_json_summary() {
        let controller = SessionController::new(TimerSettings::default()).unwrap();
        let summary = SessionSummary::from_session(controller.session(), Local::now());

        let json = format_summary(&summary, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["work_cycles"], 0);
        assert!(value["timeline"].as_array().unwrap().is_empty());
    }
}
