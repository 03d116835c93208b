//! # cur-engine
//!
//! The annotation review engine: navigation state machine, evidence
//! selection, two-axis classification workflow, progress tracking, and the
//! idempotent append protocol that keeps the per-reviewer ledger free of
//! duplicates across retries.
//!
//! The engine performs I/O only through [`cur_store::RecordStore`]. All
//! state transitions except saving are pure: [`reducer::apply`] maps
//! `(state, action)` to a new state plus notices, and display values are
//! derived per render. [`ReviewSession`] ties the pieces together for one
//! reviewer over one dataset.

pub mod action;
pub mod error;
pub mod evidence;
pub mod progress;
pub mod reducer;
pub mod render;
pub mod review;
pub mod session;
pub mod workflow;
pub mod writer;

pub use action::{Action, Notice};
pub use error::EngineError;
pub use evidence::{SentenceTag, TaggedSentence};
pub use progress::{ProgressCounts, ProgressDetail};
pub use render::RenderPayload;
pub use review::ReviewSession;
pub use session::{AxisDraft, SessionState};
pub use writer::SaveOutcome;
