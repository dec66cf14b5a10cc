//! Path management for the stock ledger
//!
//! Provides XDG-compliant path resolution for configuration, ledger data and
//! the audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `STOCK_LEDGER_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/stock-ledger` or `~/.config/stock-ledger`
//! 3. Windows: `%APPDATA%\stock-ledger`

use std::path::PathBuf;

use crate::error::StockError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "STOCK_LEDGER_DIR";

/// Manages all paths used by the stock ledger
#[derive(Debug, Clone)]
pub struct StockPaths {
    /// Base directory for all stock ledger files
    base_dir: PathBuf,
}

impl StockPaths {
    /// Create a new StockPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StockError> {
        let base_dir = if let Ok(custom) = std::env::var(DIR_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create StockPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/stock-ledger/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the CSV pair
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to balances.csv
    pub fn balances_file(&self) -> PathBuf {
        self.data_dir().join("balances.csv")
    }

    /// Get the path to movements.csv
    pub fn movements_file(&self) -> PathBuf {
        self.data_dir().join("movements.csv")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), StockError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| StockError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| StockError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, StockError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                StockError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("stock-ledger"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, StockError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| StockError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("stock-ledger"))
}
