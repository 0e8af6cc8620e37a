//! Dashboard record shapes and input validation.
//!
//! # Responsibility
//! - Define the record stored by each collection manager.
//! - Turn raw UI input (drafts) into records, or reject it.
//!
//! # Invariants
//! - Every collection record carries a stable `RecordId` assigned at creation.
//! - Budget and subscription amounts are finite and strictly positive.
//! - Required text fields are stored trimmed and never blank.

pub mod budget;
pub mod grocery;
pub mod health;
pub mod lending;
pub mod plant;
pub mod record;
pub mod subscription;
pub mod task;
pub mod validation;
