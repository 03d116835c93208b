//! # cur-store
//!
//! Record store adapter for Curator.
//!
//! The review engine sees the remote tabular store only through the
//! [`RecordStore`] trait: a one-shot dataset load plus ledger
//! read/append/create. [`SheetsStore`] implements it against a spreadsheet
//! REST API; [`MemoryStore`] is an in-memory implementation with failure
//! injection for tests.

mod error;
mod memory;
mod sheets;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

use cur_core::entities::Record;
use cur_core::ledger::LedgerSnapshot;

/// Capability set the review engine needs from the remote store.
///
/// A fixed interface: adapters implement exactly these four operations, and
/// the engine performs no other I/O. All calls are blocking from the
/// engine's perspective — no timeout or retry is layered on here; transient
/// failures propagate to the caller as warnings.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Load the full record dataset, once per session. Order is significant
    /// and must be stable within a session.
    async fn load_dataset(&self) -> Result<Vec<Record>, StoreError>;

    /// Read the current contents of a reviewer's ledger.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when no ledger exists yet for this
    /// reviewer.
    async fn read_ledger(&self, reviewer: &str) -> Result<LedgerSnapshot, StoreError>;

    /// Append data rows to an existing ledger. Returns the number of rows
    /// appended.
    async fn append_rows(
        &self,
        reviewer: &str,
        rows: &[Vec<String>],
    ) -> Result<usize, StoreError>;

    /// Create the reviewer's ledger and write the header plus initial rows.
    async fn create_ledger(
        &self,
        reviewer: &str,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<(), StoreError>;
}
