//! In-memory record store.
//!
//! Backs engine and CLI tests: ledgers live in a mutex-guarded map, reads
//! are counted so tests can assert the writer re-reads membership on every
//! save, and failures can be injected to exercise the retry paths.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use cur_core::entities::Record;
use cur_core::ledger::LedgerSnapshot;

use crate::{RecordStore, StoreError};

/// In-memory implementation of [`RecordStore`].
pub struct MemoryStore {
    dataset: Vec<Record>,
    ledgers: Mutex<BTreeMap<String, LedgerSnapshot>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    ledger_reads: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new(dataset: Vec<Record>) -> Self {
        Self {
            dataset,
            ledgers: Mutex::new(BTreeMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            ledger_reads: AtomicUsize::new(0),
        }
    }

    /// Pre-populate a reviewer's ledger.
    pub fn seed_ledger(&self, reviewer: &str, snapshot: LedgerSnapshot) {
        self.ledgers
            .lock()
            .expect("ledger lock")
            .insert(reviewer.to_string(), snapshot);
    }

    /// Current contents of a reviewer's ledger, if any.
    #[must_use]
    pub fn ledger(&self, reviewer: &str) -> Option<LedgerSnapshot> {
        self.ledgers.lock().expect("ledger lock").get(reviewer).cloned()
    }

    /// Make subsequent ledger reads fail with a transport-style error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent appends/creates fail with a transport-style error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of ledger reads performed so far.
    #[must_use]
    pub fn ledger_read_count(&self) -> usize {
        self.ledger_reads.load(Ordering::SeqCst)
    }

    fn injected_failure(what: &str) -> StoreError {
        StoreError::Api {
            status: 503,
            message: format!("injected {what} failure"),
        }
    }
}

impl RecordStore for MemoryStore {
    async fn load_dataset(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.dataset.clone())
    }

    async fn read_ledger(&self, reviewer: &str) -> Result<LedgerSnapshot, StoreError> {
        self.ledger_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("read"));
        }
        self.ledgers
            .lock()
            .expect("ledger lock")
            .get(reviewer)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                reviewer: reviewer.to_string(),
            })
    }

    async fn append_rows(
        &self,
        reviewer: &str,
        rows: &[Vec<String>],
    ) -> Result<usize, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("append"));
        }
        let mut ledgers = self.ledgers.lock().expect("ledger lock");
        let ledger = ledgers
            .get_mut(reviewer)
            .ok_or_else(|| StoreError::NotFound {
                reviewer: reviewer.to_string(),
            })?;
        ledger.rows.extend(rows.iter().cloned());
        Ok(rows.len())
    }

    async fn create_ledger(
        &self,
        reviewer: &str,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::injected_failure("create"));
        }
        let mut ledgers = self.ledgers.lock().expect("ledger lock");
        if ledgers.contains_key(reviewer) {
            return Err(StoreError::Api {
                status: 400,
                message: format!("a sheet named '{reviewer}' already exists"),
            });
        }
        ledgers.insert(
            reviewer.to_string(),
            LedgerSnapshot {
                header: header.to_vec(),
                rows: rows.to_vec(),
            },
        );
        Ok(())
    }
}
