//! In-memory ledger store
//!
//! Behaves like a remote table store: every `load` hands out an independent
//! copy and every `save` overwrites whatever is there. Useful in tests and for
//! showing what happens when two sessions interleave.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{StockError, StockResult};
use crate::models::Ledger;

use super::LedgerStore;

/// Volatile implementation of [`LedgerStore`]
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    data: RwLock<Ledger>,
    offline: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            data: RwLock::new(ledger),
            ..Self::default()
        }
    }

    /// Make every subsequent load and save fail with `StoreUnavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> StockResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StockError::StoreUnavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> StockResult<Ledger> {
        self.check_online()?;
        let data = self.data.read().map_err(|e| {
            StockError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    fn save(&self, ledger: &Ledger) -> StockResult<()> {
        self.check_online()?;
        let mut data = self.data.write().map_err(|e| {
            StockError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = ledger.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BalanceRow;

    #[test]
    fn test_load_returns_independent_copy() {
        let store = MemoryLedgerStore::new();
        let mut copy = store.load().unwrap();
        copy.balances.push(BalanceRow::new("Bolt", 1, None));

        assert!(store.load().unwrap().balances.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryLedgerStore::new();
        let mut ledger = Ledger::new();
        ledger.balances.push(BalanceRow::new("Bolt", 1, None));

        store.save(&ledger).unwrap();
        assert_eq!(store.load().unwrap(), ledger);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_offline_store() {
        let store = MemoryLedgerStore::new();
        store.set_offline(true);

        assert!(store.load().unwrap_err().is_store_unavailable());
        assert!(store.save(&Ledger::new()).unwrap_err().is_store_unavailable());
        assert_eq!(store.load_or_empty(), Ledger::new());
    }
}
