//! Command-line argument parsing and processing.
//!
//! This module turns the raw argument list into a [`CliAction`]. Global options
//! may appear anywhere on the line; the first positional argument names the
//! command and the rest are its arguments. Invalid input is reported with a
//! warning and yields [`CliAction::ShowHelpDueToError`].

use crate::commands::{DaySpec, TableOptions, parse_query_hour};
use crate::common::constants::{
    DEFAULT_TIMELINE_STEP_MINUTES, MAXIMUM_TIMELINE_STEP_MINUTES, MINIMUM_TIMELINE_STEP_MINUTES,
};

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Sun, moon and sky at one instant
    Query {
        options: TableOptions,
        day: DaySpec,
        hour: f64,
        json: bool,
    },
    /// Timeline of one day
    Day {
        options: TableOptions,
        day: DaySpec,
        step_minutes: u32,
        json: bool,
    },
    /// Seasonal statistics and data quality
    Stats { options: TableOptions, json: bool },
    /// Validate configuration and tables
    Check { options: TableOptions },
    /// Help for a specific command, or the command list
    Help { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
#[derive(Debug, PartialEq)]
pub struct ParsedArgs {
    pub action: CliAction,
    /// `--config <dir>`
    pub config_dir: Option<String>,
    /// `--log <file>`
    pub log_file: Option<String>,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut json = false;
        let mut step_minutes: Option<u32> = None;
        let mut options = TableOptions::default();
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut positionals: Vec<String> = Vec::new();

        // Convert to vector for easier indexed access
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = args_vec[i].as_str();
            match arg_str {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" => display_version = true,
                "--debug" | "-d" => options.debug_enabled = true,
                "--json" | "-j" => json = true,
                "--config" | "-c" | "--sun" | "--moon" | "--log" | "--step" | "-s" => {
                    let Some(value) = flag_value(&args_vec, i) else {
                        log_warning!("Missing value for {arg_str}");
                        unknown_arg_found = true;
                        i += 1;
                        continue;
                    };
                    match arg_str {
                        "--config" | "-c" => config_dir = Some(value),
                        "--sun" => options.sun_table = Some(value),
                        "--moon" => options.moon_table = Some(value),
                        "--log" => log_file = Some(value),
                        _ => match parse_step(&value) {
                            Some(step) => step_minutes = Some(step),
                            None => {
                                log_warning!(
                                    "Invalid step '{}': must be {}-{} minutes",
                                    value,
                                    MINIMUM_TIMELINE_STEP_MINUTES,
                                    MAXIMUM_TIMELINE_STEP_MINUTES
                                );
                                unknown_arg_found = true;
                            }
                        },
                    }
                    i += 1; // Skip the parsed value
                }
                _ if arg_str.starts_with('-') && arg_str.len() > 1 => {
                    log_warning!("Unknown option: {arg_str}");
                    unknown_arg_found = true;
                }
                _ => positionals.push(arg_str.to_string()),
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            // `timepixel query --help` shows help for that command
            match positionals.first() {
                Some(command) => CliAction::Help {
                    command: Some(command.clone()),
                },
                None => CliAction::ShowHelp,
            }
        } else {
            parse_command(&positionals, options, json, step_minutes)
        };

        ParsedArgs {
            action,
            config_dir,
            log_file,
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Value following the flag at `idx`, unless it is missing or another flag.
fn flag_value(args: &[String], idx: usize) -> Option<String> {
    args.get(idx + 1)
        .filter(|value| !value.starts_with('-'))
        .cloned()
}

fn parse_step(value: &str) -> Option<u32> {
    value
        .parse::<u32>()
        .ok()
        .filter(|step| (MINIMUM_TIMELINE_STEP_MINUTES..=MAXIMUM_TIMELINE_STEP_MINUTES).contains(step))
}

fn parse_command(
    positionals: &[String],
    options: TableOptions,
    json: bool,
    step_minutes: Option<u32>,
) -> CliAction {
    let Some((command, rest)) = positionals.split_first() else {
        return CliAction::ShowHelp;
    };

    let expected_args = match command.as_str() {
        "query" | "q" => 2,
        "day" | "d" => 1,
        "stats" | "s" | "check" | "c" => 0,
        "help" | "h" => {
            if rest.len() > 1 {
                log_warning!("Too many arguments for help");
                return CliAction::ShowHelpDueToError;
            }
            return CliAction::Help {
                command: rest.first().cloned(),
            };
        }
        _ => {
            log_warning!("Unknown command: {}", command);
            return CliAction::ShowHelpDueToError;
        }
    };

    if rest.len() != expected_args {
        log_warning!(
            "'{}' takes {} argument(s), got {}",
            command,
            expected_args,
            rest.len()
        );
        crate::commands::help::show_command_usage(command);
        return CliAction::ShowHelpDueToError;
    }

    if step_minutes.is_some() && !matches!(command.as_str(), "day" | "d") {
        log_warning!("--step only applies to the day command");
        return CliAction::ShowHelpDueToError;
    }

    let day = match rest.first().map(|value| DaySpec::parse(value)) {
        Some(Ok(day)) => Some(day),
        Some(Err(e)) => {
            log_warning!("{}", e);
            return CliAction::ShowHelpDueToError;
        }
        None => None,
    };

    match (command.as_str(), day) {
        ("query" | "q", Some(day)) => match parse_query_hour(&rest[1]) {
            Ok(hour) => CliAction::Query {
                options,
                day,
                hour,
                json,
            },
            Err(e) => {
                log_warning!("{}", e);
                CliAction::ShowHelpDueToError
            }
        },
        ("day" | "d", Some(day)) => CliAction::Day {
            options,
            day,
            step_minutes: step_minutes.unwrap_or(DEFAULT_TIMELINE_STEP_MINUTES),
            json,
        },
        ("stats" | "s", _) => CliAction::Stats { options, json },
        _ => CliAction::Check { options },
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::logger::write_output(&format!("┗ {}\n", env!("CARGO_PKG_DESCRIPTION")));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("timepixel [OPTIONS] <COMMAND>");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("    --sun <csv>        Use this sun rise/set table");
    log_indented!("    --moon <csv>       Use this moon rise/set table");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("    --log <file>       Write output to a file instead of the terminal");
    log_indented!("-j, --json             Output in JSON format (query, day, stats)");
    log_indented!("-s, --step <minutes>   Timeline step for the day command");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("query, q <day> <hour>  Sun, moon and sky at one instant");
    log_indented!("day, d <day>           Timeline of one day");
    log_indented!("stats, s               Seasonal statistics and moon window summary");
    log_indented!("check, c               Validate configuration and tables");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(args: &[&str]) -> ParsedArgs {
        ParsedArgs::parse(std::iter::once("timepixel").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]).action, CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["--help"]).action, CliAction::ShowHelp);
        assert_eq!(parse(&["-h"]).action, CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]).action, CliAction::ShowVersion);
        assert_eq!(parse(&["-V"]).action, CliAction::ShowVersion);
    }

    #[test]
    fn test_version_takes_precedence() {
        assert_eq!(parse(&["--help", "--version"]).action, CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(parse(&["--unknown"]).action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_query() {
        let parsed = parse(&["query", "3", "00:00"]);
        assert_eq!(
            parsed.action,
            CliAction::Query {
                options: TableOptions::default(),
                day: DaySpec::Number(3),
                hour: 0.0,
                json: false,
            }
        );
    }

    #[test]
    fn test_parse_query_with_date_and_json() {
        let parsed = parse(&["q", "2024-06-21", "19.17", "--json"]);
        assert_eq!(
            parsed.action,
            CliAction::Query {
                options: TableOptions::default(),
                day: DaySpec::Date(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()),
                hour: 19.17,
                json: true,
            }
        );
    }

    #[test]
    fn test_parse_query_rejects_out_of_range_hour() {
        assert_eq!(
            parse(&["query", "3", "24"]).action,
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["query", "3", "24:30"]).action,
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_query_missing_hour() {
        assert_eq!(parse(&["query", "3"]).action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_day_with_step_and_overrides() {
        let parsed = parse(&[
            "--debug", "day", "172", "--step", "15", "--sun", "sun.csv", "--moon", "moon.csv",
        ]);
        assert_eq!(
            parsed.action,
            CliAction::Day {
                options: TableOptions {
                    debug_enabled: true,
                    sun_table: Some("sun.csv".to_string()),
                    moon_table: Some("moon.csv".to_string()),
                },
                day: DaySpec::Number(172),
                step_minutes: 15,
                json: false,
            }
        );
    }

    #[test]
    fn test_parse_day_default_step() {
        match parse(&["day", "1"]).action {
            CliAction::Day { step_minutes, .. } => {
                assert_eq!(step_minutes, DEFAULT_TIMELINE_STEP_MINUTES)
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_parse_invalid_step() {
        assert_eq!(
            parse(&["day", "1", "--step", "0"]).action,
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["day", "1", "--step"]).action,
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_step_only_valid_for_day() {
        assert_eq!(
            parse(&["stats", "--step", "30"]).action,
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_stats_and_check() {
        assert_eq!(
            parse(&["stats", "-j"]).action,
            CliAction::Stats {
                options: TableOptions::default(),
                json: true,
            }
        );
        assert_eq!(
            parse(&["check"]).action,
            CliAction::Check {
                options: TableOptions::default(),
            }
        );
    }

    #[test]
    fn test_parse_config_and_log_anywhere() {
        let parsed = parse(&["check", "-c", "/tmp/tp", "--log", "out.log"]);
        assert_eq!(parsed.config_dir, Some("/tmp/tp".to_string()));
        assert_eq!(parsed.log_file, Some("out.log".to_string()));
    }

    #[test]
    fn test_parse_config_missing_directory() {
        assert_eq!(
            parse(&["check", "--config"]).action,
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(parse(&["help"]).action, CliAction::Help { command: None });
        assert_eq!(
            parse(&["help", "query"]).action,
            CliAction::Help {
                command: Some("query".to_string())
            }
        );
        assert_eq!(
            parse(&["day", "--help"]).action,
            CliAction::Help {
                command: Some("day".to_string())
            }
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(parse(&["render"]).action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_extra_arguments() {
        assert_eq!(
            parse(&["stats", "extra"]).action,
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_day_zero_rejected() {
        assert_eq!(parse(&["day", "0"]).action, CliAction::ShowHelpDueToError);
    }
}
