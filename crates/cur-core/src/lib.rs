//! # cur-core
//!
//! Core types shared across all Curator crates:
//! - Entity structs for reviewable records and finalized judgments
//! - Classification enums for the two review axes
//! - The ledger row/column contract (column order, header derivation)
//! - The sentence splitter used for evidence selection
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ledger;
pub mod sentences;
