//! Daily health snapshot. A single record, overwritten on every save.

use crate::model::validation::{parse_count, parse_hours};
use serde::{Deserialize, Serialize};

/// Missing fields in stored data read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthRecord {
    pub steps: u32,
    /// Glasses of water.
    pub water: u32,
    /// Hours slept last night.
    pub sleep: f64,
}

impl HealthRecord {
    pub const STORAGE_KEY: &'static str = "healthData";

    /// Builds a record from free-form form input.
    pub fn from_input(steps: &str, water: &str, sleep: &str) -> Self {
        Self {
            steps: parse_count(steps),
            water: parse_count(water),
            sleep: parse_hours(sleep),
        }
    }
}
