//! Check command: validate configuration and tables without querying anything.

use anyhow::Result;

use super::{Session, TableOptions};
use crate::stats::QualityReport;

/// Handle the check command.
///
/// Loading errors propagate; data gaps are reported as warnings only.
pub fn handle_check_command(options: &TableOptions) -> Result<()> {
    log_version!();

    let session = Session::open(options)?;
    if !options.debug_enabled {
        session.config.log_config();
    }
    // Fails early on a malformed reference instant
    session.config.reference_new_moon()?;

    let table = session.table();
    let quality = QualityReport::from_resolver(session.resolver.as_ref());

    log_block_start!("Loaded {} days", table.len());
    if quality.undated_days > 0 {
        log_indented!("{} row(s) without a date", quality.undated_days);
    }
    if let (Some(first), Some(last)) = (
        table.records().first().and_then(|record| record.date),
        table.records().last().and_then(|record| record.date),
    ) {
        log_indented!("Covers {first} to {last}");
    }

    super::stats::log_quality(table, &quality);

    if quality.is_clean() {
        log_block_start!("Tables are complete");
    }
    log_end!();
    Ok(())
}

/// Display help for the check command.
pub fn display_help() {
    log_version!();
    log_block_start!("check - Validate configuration and rise/set tables");
    log_block_start!("Usage: timepixel check [OPTIONS]");
    log_block_start!("Loads the configuration and both tables, then reports:");
    log_indented!("The resolved configuration and table paths");
    log_indented!("Days whose moon events have no recorded partner");
    log_indented!("Days missing sunrise or sunset");
    log_end!();
}
