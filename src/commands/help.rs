//! Help command implementation for timepixel.
//!
//! Shows command-specific help or a general command list.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "query" | "q" => log_block_start!("Usage: timepixel query [OPTIONS] <day> <hour>"),
        "day" | "d" => log_block_start!("Usage: timepixel day [OPTIONS] <day>"),
        "stats" | "s" => log_block_start!("Usage: timepixel stats [OPTIONS]"),
        "check" | "c" => log_block_start!("Usage: timepixel check [OPTIONS]"),
        _ => log_block_start!("Usage: timepixel [OPTIONS] [COMMAND]"),
    }
}

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("query") | Some("q") => super::query::display_help(),
        Some("day") | Some("d") => super::day::display_help(),
        Some("stats") | Some("s") => super::stats::display_help(),
        Some("check") | Some("c") => super::check::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("query, q <day> <hour>  Sun, moon and sky at one instant");
    log_indented!("day, d <day>           Timeline of one day");
    log_indented!("stats, s               Seasonal statistics and moon window summary");
    log_indented!("check, c               Validate configuration and tables");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'timepixel help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'timepixel --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: timepixel help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("timepixel help");
    log_indented!("timepixel help query");
    log_end!();
}
