use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

use rudoro::cli::args::{Cli, Commands, RunArgs};
use rudoro::cli::commands;
use rudoro::error::RudoroError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // RUST_LOG still wins for per-module filters
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), RudoroError> {
    let format = cli.output;
    let config_path = cli.config.as_deref();

    let output = match cli.command {
        None => commands::run(config_path, &RunArgs::default(), format)?,
        Some(Commands::Run(args)) => commands::run(config_path, &args, format)?,
        Some(Commands::Config(args)) => commands::config(config_path, args.command, format)?,
        Some(Commands::Completions { shell }) => commands::generate_completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
