//! CLI commands for data export
//!
//! Provides commands for exporting either ledger table as CSV, or a full JSON
//! snapshot of both.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{StockError, StockResult};
use crate::export::{csv, json};
use crate::storage::{LedgerStore, Storage};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export current balances to CSV
    Balances {
        /// Output file path
        output: PathBuf,
    },

    /// Export the movement log to CSV
    Movements {
        /// Output file path
        output: PathBuf,
    },

    /// Export both tables and the summary to JSON
    All {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> StockResult<()> {
    // Exports need the real tables; an unavailable store is an error here
    let ledger = storage.ledger.load()?;

    match cmd {
        ExportCommands::Balances { output } => {
            let mut writer = create_output(&output)?;
            csv::export_balances_csv(&ledger, &mut writer, settings.track_prices)?;
            finish(writer, &output)?;
            println!(
                "Exported {} balance row(s) to: {}",
                ledger.balances.len(),
                output.display()
            );
        }
        ExportCommands::Movements { output } => {
            let mut writer = create_output(&output)?;
            csv::export_movements_csv(&ledger, &mut writer, settings.track_prices)?;
            finish(writer, &output)?;
            println!(
                "Exported {} movement(s) to: {}",
                ledger.movements.len(),
                output.display()
            );
        }
        ExportCommands::All { output, pretty } => {
            let mut writer = create_output(&output)?;
            json::export_full_json(&ledger, &mut writer, pretty)?;
            finish(writer, &output)?;
            println!("Full ledger exported to: {}", output.display());

            // Read the snapshot back so a bad write is caught now
            let written = fs::read_to_string(&output).map_err(|e| {
                StockError::Export(format!("Failed to read back {}: {}", output.display(), e))
            })?;
            let issues = json::import_from_json(&written)?.validate()?;
            if !issues.is_empty() {
                println!("Warning: the exported tables do not reconcile:");
                for issue in &issues {
                    println!("  - {}", issue);
                }
            }
        }
    }

    Ok(())
}

fn create_output(output: &Path) -> StockResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        StockError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>, output: &Path) -> StockResult<()> {
    writer.flush().map_err(|e| {
        StockError::Export(format!("Failed to write {}: {}", output.display(), e))
    })
}
