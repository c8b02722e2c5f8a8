//! Main application entry point.
//!
//! Parses the command line, applies the process-wide settings (configuration
//! directory, file logging) and dispatches to the command handlers in
//! `timepixel::commands`. Errors are logged and turned into a failing exit code.

use anyhow::Result;

use timepixel::args::{self, CliAction, ParsedArgs};
use timepixel::commands;
use timepixel::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use timepixel::config;
use timepixel::logger::Log;
use timepixel::{log_end, log_error, log_pipe};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    // Keep the guard alive until every message has been routed to the file
    let log_guard = match parsed_args.log_file.clone() {
        Some(path) => match Log::start_file_logging(path) {
            Ok(guard) => Some(guard),
            Err(e) => {
                log_error!("Failed to start file logging: {e:#}");
                std::process::exit(EXIT_FAILURE);
            }
        },
        None => None,
    };

    let exit_code = match run(parsed_args) {
        Ok(code) => code,
        Err(e) => {
            Log::set_enabled(true);
            log_pipe!();
            log_error!("{e:#}");
            log_end!();
            EXIT_FAILURE
        }
    };

    drop(log_guard);
    std::process::exit(exit_code);
}

fn run(parsed_args: ParsedArgs) -> Result<i32> {
    config::set_config_dir(parsed_args.config_dir)?;

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(EXIT_FAILURE)
        }
        CliAction::Help { command } => {
            commands::help::run_help_command(command.as_deref())?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Query {
            options,
            day,
            hour,
            json,
        } => {
            commands::query::handle_query_command(&options, day, hour, json)?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Day {
            options,
            day,
            step_minutes,
            json,
        } => {
            commands::day::handle_day_command(&options, day, step_minutes, json)?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Stats { options, json } => {
            commands::stats::handle_stats_command(&options, json)?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Check { options } => {
            commands::check::handle_check_command(&options)?;
            Ok(EXIT_SUCCESS)
        }
    }
}
