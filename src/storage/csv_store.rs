//! Ledger store backed by a pair of local CSV files
//!
//! `balances.csv` and `movements.csv` are always rewritten whole. Each file is
//! replaced atomically, but the pair is not: a failure between the two writes
//! leaves new balances next to the old movement log.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Settings, StockPaths};
use crate::error::{StockError, StockResult};
use crate::models::Ledger;

use super::csv_codec::{read_balances, read_movements, write_balances, write_movements};
use super::file_io::write_atomic;
use super::LedgerStore;

/// CSV pair implementation of [`LedgerStore`]
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    balances_path: PathBuf,
    movements_path: PathBuf,
    with_prices: bool,
}

impl CsvLedgerStore {
    /// Create a store over explicit file paths
    pub fn new(balances_path: PathBuf, movements_path: PathBuf, with_prices: bool) -> Self {
        Self {
            balances_path,
            movements_path,
            with_prices,
        }
    }

    /// Create a store at the configured data directory
    pub fn from_config(paths: &StockPaths, settings: &Settings) -> Self {
        Self::new(
            paths.balances_file(),
            paths.movements_file(),
            settings.track_prices,
        )
    }

    pub fn balances_path(&self) -> &Path {
        &self.balances_path
    }

    pub fn movements_path(&self) -> &Path {
        &self.movements_path
    }

    /// Whether both backing files exist
    pub fn is_initialized(&self) -> bool {
        self.balances_path.exists() && self.movements_path.exists()
    }

    /// Create any missing backing file with just its header line
    ///
    /// Existing files are left untouched. Returns true if anything was created.
    pub fn initialize(&self) -> StockResult<bool> {
        let mut created = false;

        if !self.balances_path.exists() {
            let mut bytes = Vec::new();
            write_balances(&mut bytes, &[], self.with_prices)?;
            write_atomic(&self.balances_path, &bytes)?;
            created = true;
        }

        if !self.movements_path.exists() {
            let mut bytes = Vec::new();
            write_movements(&mut bytes, &[], self.with_prices)?;
            write_atomic(&self.movements_path, &bytes)?;
            created = true;
        }

        Ok(created)
    }

    fn open(&self, path: &Path) -> StockResult<BufReader<File>> {
        File::open(path).map(BufReader::new).map_err(|e| {
            StockError::StoreUnavailable(format!("Failed to open {}: {}", path.display(), e))
        })
    }
}

impl LedgerStore for CsvLedgerStore {
    fn load(&self) -> StockResult<Ledger> {
        if !self.balances_path.exists() && !self.movements_path.exists() {
            let dir = self
                .balances_path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            return Err(StockError::StoreUnavailable(format!(
                "no ledger found in {} (run `stock init`)",
                dir
            )));
        }

        let balances = read_balances(self.open(&self.balances_path)?).map_err(|e| {
            StockError::StoreUnavailable(format!(
                "Failed to parse {}: {}",
                self.balances_path.display(),
                e
            ))
        })?;

        let movements = read_movements(self.open(&self.movements_path)?).map_err(|e| {
            StockError::StoreUnavailable(format!(
                "Failed to parse {}: {}",
                self.movements_path.display(),
                e
            ))
        })?;

        debug!(
            balances = balances.len(),
            movements = movements.len(),
            "loaded ledger from CSV"
        );

        Ok(Ledger::from_parts(balances, movements))
    }

    fn save(&self, ledger: &Ledger) -> StockResult<()> {
        // Prices already on file survive a save with tracking switched off
        let with_prices = self.with_prices || has_prices(ledger);

        // Encode both tables before touching either file
        let mut balances = Vec::new();
        write_balances(&mut balances, &ledger.balances, with_prices)
            .map_err(|e| StockError::StoreUnavailable(format!("Failed to encode balances: {}", e)))?;
        let mut movements = Vec::new();
        write_movements(&mut movements, &ledger.movements, with_prices)
            .map_err(|e| StockError::StoreUnavailable(format!("Failed to encode movements: {}", e)))?;

        write_atomic(&self.balances_path, &balances)
            .map_err(|e| StockError::StoreUnavailable(e.to_string()))?;
        write_atomic(&self.movements_path, &movements)
            .map_err(|e| StockError::StoreUnavailable(e.to_string()))?;

        debug!(
            balances = ledger.balances.len(),
            movements = ledger.movements.len(),
            "saved ledger to CSV"
        );

        Ok(())
    }
}

fn has_prices(ledger: &Ledger) -> bool {
    ledger.balances.iter().any(|row| row.unit_price.is_some())
        || ledger.movements.iter().any(|m| m.unit_price.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceRow, MovementRecord, Price};
    use chrono::{TimeZone, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store(with_prices: bool) -> (TempDir, CsvLedgerStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StockPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = CsvLedgerStore::new(paths.balances_file(), paths.movements_file(), with_prices);
        (temp_dir, store)
    }

    fn sample_ledger() -> Ledger {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        Ledger::from_parts(
            vec![BalanceRow::new("Widget", 6, Some(Price::from_cents(250)))],
            vec![
                MovementRecord::inflow(at, "Widget", 10, Some(Price::from_cents(250))),
                MovementRecord::outflow(at, "Widget", 4, Some(Price::from_cents(250))),
            ],
        )
    }

    #[test]
    fn test_load_uninitialized_is_unavailable() {
        let (_temp_dir, store) = create_test_store(true);
        let err = store.load().unwrap_err();
        assert!(err.is_store_unavailable());
        assert!(err.to_string().contains("stock init"));
    }

    #[test]
    fn test_initialize_writes_headers() {
        let (_temp_dir, store) = create_test_store(true);
        assert!(store.initialize().unwrap());
        assert!(!store.initialize().unwrap());

        assert_eq!(
            fs::read_to_string(store.balances_path()).unwrap(),
            "name,quantity,unit_price\n"
        );
        assert_eq!(store.load().unwrap(), Ledger::new());
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, store) = create_test_store(true);
        let ledger = sample_ledger();

        store.save(&ledger).unwrap();
        assert!(store.is_initialized());
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn test_save_without_prices_omits_price_column() {
        let (_temp_dir, store) = create_test_store(false);
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let ledger = Ledger::from_parts(
            vec![BalanceRow::new("Bolt", 3, None)],
            vec![MovementRecord::inflow(at, "Bolt", 3, None)],
        );
        store.save(&ledger).unwrap();

        assert_eq!(
            fs::read_to_string(store.balances_path()).unwrap(),
            "name,quantity\nBolt,3\n"
        );
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn test_save_failure_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        // A plain file where the data directory should be
        let blocker = temp_dir.path().join("data");
        fs::write(&blocker, "").unwrap();
        let store = CsvLedgerStore::new(
            blocker.join("balances.csv"),
            blocker.join("movements.csv"),
            true,
        );

        let err = store.save(&sample_ledger()).unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_disabling_prices_keeps_stored_prices() {
        let (temp_dir, priced) = create_test_store(true);
        priced.save(&sample_ledger()).unwrap();

        let paths = StockPaths::with_base_dir(temp_dir.path().to_path_buf());
        let unpriced = CsvLedgerStore::new(paths.balances_file(), paths.movements_file(), false);
        let ledger = unpriced.load().unwrap();
        unpriced.save(&ledger).unwrap();

        let reloaded = unpriced.load().unwrap();
        assert_eq!(reloaded.balances[0].unit_price, Some(Price::from_cents(250)));
        assert_eq!(reloaded, sample_ledger());
    }

    #[test]
    fn test_malformed_file_is_unavailable() {
        let (_temp_dir, store) = create_test_store(true);
        store.initialize().unwrap();
        fs::write(store.balances_path(), "name,quantity\nBolt,three\n").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_missing_half_of_pair_is_unavailable() {
        let (_temp_dir, store) = create_test_store(true);
        store.save(&sample_ledger()).unwrap();
        fs::remove_file(store.movements_path()).unwrap();

        assert!(store.load().unwrap_err().is_store_unavailable());
    }
}
