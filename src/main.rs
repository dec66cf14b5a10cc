use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stock_ledger::cli::{
    handle_audit_command, handle_export_command, handle_stock_command, ExportCommands,
    StockCommands,
};
use stock_ledger::config::{Settings, StockPaths};
use stock_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "stock",
    version,
    about = "Terminal inventory ledger with balance reconciliation",
    long_about = "Stock Ledger records stock inflows and outflows against a balance \
                  table and a movement log, keeping every balance equal to the sum \
                  of its movements."
)]
struct Cli {
    /// Base directory for settings, data and the audit log
    #[arg(long, global = true, env = "STOCK_LEDGER_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init,

    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Stock(StockCommands),

    /// Export ledger data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.dir {
        Some(dir) => StockPaths::with_base_dir(dir),
        None => StockPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(&settings);

    let storage = Storage::new(&paths, &settings)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Stock Ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            if storage.initialize()? {
                println!("Created empty ledger:");
            } else {
                println!("Ledger already present:");
            }
            println!("  {}", storage.ledger.balances_path().display());
            println!("  {}", storage.ledger.movements_path().display());
            println!();
            println!("Run 'stock in <item> <quantity>' to record your first stock.");
        }
        Some(Commands::Config) => {
            println!("Stock Ledger Configuration");
            println!("==========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Balances file:   {}", paths.balances_file().display());
            println!("Movements file:  {}", paths.movements_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Track prices:    {}", settings.track_prices);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log level:       {}", settings.log_level);
            println!(
                "  Initialized:     {}",
                if storage.is_initialized() { "Yes" } else { "No" }
            );
        }
        Some(Commands::Stock(cmd)) => {
            handle_stock_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        None => {
            println!("Stock Ledger - terminal inventory ledger");
            println!();
            println!("Run 'stock --help' for usage information.");
            println!("Run 'stock init' to create a new ledger.");
        }
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the configured level
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
