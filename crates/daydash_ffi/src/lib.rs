//! Flutter-facing FFI surface for daydash.

pub mod api;
