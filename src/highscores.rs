//! Best run record
//!
//! Persisted through a `KeyValueStore`, one key per field so older saves
//! with only a distance still load.

use serde::{Deserialize, Serialize};

use crate::consts::WORLD_WIDTH;
use crate::persistence::{KeyValueStore, StoreError};

pub const BEST_DISTANCE_KEY: &str = "snowdrift_best_distance";
pub const BEST_X_KEY: &str = "snowdrift_best_x";

/// Furthest distance reached and the column the run ended in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRun {
    pub distance: u32,
    pub x: i32,
}

impl Default for BestRun {
    fn default() -> Self {
        Self {
            distance: 0,
            x: (WORLD_WIDTH / 2.0) as i32,
        }
    }
}

impl BestRun {
    /// Load from a store. Missing or unparsable fields fall back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let distance = read_field(store, BEST_DISTANCE_KEY).unwrap_or(defaults.distance);
        let x = read_field(store, BEST_X_KEY).unwrap_or(defaults.x);
        log::info!("Loaded best run: {} at x {}", distance, x);
        Self { distance, x }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(BEST_DISTANCE_KEY, &self.distance.to_string())?;
        store.set(BEST_X_KEY, &self.x.to_string())?;
        Ok(())
    }

    /// Check if a finished run beats the record
    pub fn qualifies(&self, distance: f32) -> bool {
        distance.is_finite() && distance > self.distance as f32
    }

    /// Take over a finished run if it beats the record. Returns true when updated.
    pub fn record(&mut self, distance: f32, x: f32) -> bool {
        if !self.qualifies(distance) {
            return false;
        }
        self.distance = distance.floor() as u32;
        self.x = if x.is_finite() { x.round() as i32 } else { self.x };
        true
    }
}

fn read_field<T: std::str::FromStr>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring unparsable {}: {:?}", key, raw);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}
