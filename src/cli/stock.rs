//! Stock CLI commands
//!
//! Implements the movement, rename and read-only commands that sit at the
//! top level of the `stock` binary.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_balance_list, format_movement_list, format_summary};
use crate::error::{StockError, StockResult};
use crate::models::Price;
use crate::services::InventoryService;
use crate::storage::{LedgerStore, Storage};

/// Stock subcommands
#[derive(Subcommand)]
pub enum StockCommands {
    /// Receive stock for an item, creating it if needed
    #[command(name = "in")]
    Inflow {
        /// Item name (matched case-insensitively)
        item: String,
        /// Quantity received
        quantity: u64,
        /// Unit price (e.g., "2.50"); replaces the stored price
        #[arg(short, long)]
        price: Option<String>,
    },
    /// Issue stock for an existing item
    #[command(name = "out")]
    Outflow {
        /// Item name (matched case-insensitively)
        item: String,
        /// Quantity issued
        quantity: u64,
    },
    /// Rename an item, rewriting its movement history
    Rename {
        /// Current item name
        item: String,
        /// New item name
        new_name: String,
        /// New unit price
        #[arg(short, long)]
        price: Option<String>,
    },
    /// List current balances
    #[command(alias = "ls")]
    List,
    /// Show the movement history
    History {
        /// Only show movements for this item
        #[arg(short, long)]
        item: Option<String>,
        /// Number of most recent movements to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show unique items, total quantity and stock value
    Summary,
    /// Verify that balances reconcile with the movement log
    Check,
}

/// Handle a stock command
pub fn handle_stock_command(
    storage: &Storage,
    settings: &Settings,
    cmd: StockCommands,
) -> StockResult<()> {
    let service = InventoryService::new(&storage.ledger).with_audit(&storage.audit);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        StockCommands::Inflow {
            item,
            quantity,
            price,
        } => {
            let unit_price = parse_price_arg(price.as_deref(), settings)?;
            let row = service.receive(&item, quantity, unit_price)?;

            println!("Received {} x {}", quantity, row.name);
            println!("  On hand: {}", row.quantity);
            if let Some(price) = row.unit_price.filter(|_| settings.track_prices) {
                println!("  Unit price: {}", price.format_with_symbol(currency));
            }
        }

        StockCommands::Outflow { item, quantity } => {
            let canonical = service
                .find(&item)
                .map(|row| row.name)
                .unwrap_or_else(|| item.trim().to_string());

            match service.issue(&item, quantity)? {
                Some(row) => {
                    println!("Issued {} x {}", quantity, row.name);
                    println!("  On hand: {}", row.quantity);
                }
                None => {
                    println!("Issued {} x {}", quantity, canonical);
                    println!("  Stock exhausted; item removed from balances.");
                }
            }
        }

        StockCommands::Rename {
            item,
            new_name,
            price,
        } => {
            let new_price = parse_price_arg(price.as_deref(), settings)?;
            let row = service.rename(&item, &new_name, new_price)?;

            println!("Renamed '{}' to '{}'", item.trim(), row.name);
            if let Some(price) = new_price {
                println!("  Unit price: {}", price.format_with_symbol(currency));
            }
        }

        StockCommands::List => {
            let rows = service.balances();
            print!(
                "{}",
                format_balance_list(&rows, currency, settings.track_prices)
            );
            if !rows.is_empty() {
                println!();
            }
        }

        StockCommands::History { item, limit } => {
            let movements = service.movements(item.as_deref(), limit);
            print!(
                "{}",
                format_movement_list(
                    &movements,
                    currency,
                    &settings.date_format,
                    settings.track_prices,
                )
            );
            if !movements.is_empty() {
                println!();
            }
        }

        StockCommands::Summary => {
            let summary = service.summary();
            print!(
                "{}",
                format_summary(&summary, currency, settings.track_prices)
            );
        }

        StockCommands::Check => {
            let issues = service.check()?;
            if issues.is_empty() {
                let ledger = storage.ledger.load()?;
                println!(
                    "Ledger reconciles: {} item(s), {} movement(s).",
                    ledger.balances.len(),
                    ledger.movements.len()
                );
            } else {
                for issue in &issues {
                    println!("  - {}", issue);
                }
                return Err(StockError::Validation(format!(
                    "{} discrepanc{} found",
                    issues.len(),
                    if issues.len() == 1 { "y" } else { "ies" }
                )));
            }
        }
    }

    Ok(())
}

/// Parse a `--price` argument
fn parse_price_arg(raw: Option<&str>, settings: &Settings) -> StockResult<Option<Price>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if !settings.track_prices {
        return Err(StockError::Validation(
            "Price tracking is disabled; set \"track_prices\": true in config.json to record prices"
                .into(),
        ));
    }

    Price::parse(raw).map(Some).map_err(|e| {
        StockError::Validation(format!(
            "Invalid price: '{}'. Use format like '2.50' or '2'. Error: {}",
            raw, e
        ))
    })
}
