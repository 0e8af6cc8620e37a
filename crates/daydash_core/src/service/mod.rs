//! Dashboard use-case services.
//!
//! # Responsibility
//! - Wrap the generic collection manager with per-entity operations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod budget_service;
pub mod collection;
pub mod dashboard;
pub mod grocery_service;
pub mod health_service;
pub mod lending_service;
pub mod plant_service;
pub mod prompt;
pub mod settings_service;
pub mod subscription_service;
pub mod task_service;
