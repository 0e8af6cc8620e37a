//! Persisted key/value store contracts and implementations.
//!
//! # Responsibility
//! - Define the opaque get/set/clear text store every manager persists to.
//! - Keep SQL details out of the collection managers.
//!
//! # Invariants
//! - Values are opaque UTF-8 text; the store never interprets them.
//! - `set` overwrites, it never merges.

pub mod kv_store;
