//! Planner tuning knobs.
//!
//! Every constant the planner depends on lives here so deployments can tune
//! them without code changes. All sections deserialize with defaults, so a
//! config file only needs to list what it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::model::{Area, WalkingPace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Manhattan,
    Euclidean,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceMultipliers {
    pub slow: f64,
    pub normal: f64,
    pub brisk: f64,
}

impl Default for PaceMultipliers {
    fn default() -> Self {
        Self {
            slow: 1.5,
            normal: 1.0,
            brisk: 0.7,
        }
    }
}

impl PaceMultipliers {
    pub fn for_pace(&self, pace: WalkingPace) -> f64 {
        match pace {
            WalkingPace::Slow => self.slow,
            WalkingPace::Normal => self.normal,
            WalkingPace::Brisk => self.brisk,
        }
    }
}

/// Flat walking time between two zones, used for zones only reachable by a
/// long perimeter walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatTransfer {
    pub from: Area,
    pub to: Area,
    pub minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    pub metric: DistanceMetric,
    /// Walking minutes per map unit at normal pace.
    pub minutes_per_unit: f64,
    pub pace: PaceMultipliers,
    /// Multiplier for leaving one zone for another (not applied from the entrance).
    pub cross_area_penalty: f64,
    pub flat_transfers: Vec<FlatTransfer>,
    /// Shorter walks are folded into the next step instead of getting a timeline entry.
    pub travel_entry_threshold: i32,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::Manhattan,
            minutes_per_unit: 0.5,
            pace: PaceMultipliers::default(),
            cross_area_penalty: 1.2,
            flat_transfers: Vec::new(),
            travel_entry_threshold: 2,
        }
    }
}

/// Automatic meal break, taken once when an arrival falls inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealBreakConfig {
    /// Minutes from day-open (inclusive).
    pub window_start: i32,
    /// Minutes from day-open (exclusive).
    pub window_end: i32,
    pub duration: i32,
}

impl Default for MealBreakConfig {
    fn default() -> Self {
        Self {
            window_start: 180, // 12:00 for a 09:00 opening
            window_end: 300,
            duration: 45,
        }
    }
}

impl MealBreakConfig {
    pub fn contains(&self, minute: i32) -> bool {
        minute >= self.window_start && minute < self.window_end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    /// How late after the slot opens a visitor may still enter.
    pub grace_minutes: i32,
    /// Added to the annealing cost for a missed or missing reservation.
    pub penalty: f64,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            grace_minutes: 30,
            penalty: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub min_temperature: f64,
    /// Geometric cooling factor applied every iteration, in (0, 1).
    pub cooling_rate: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            min_temperature: 0.1,
            cooling_rate: 0.995,
            iterations: 5000,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub travel: TravelConfig,
    pub meal_break: MealBreakConfig,
    /// Wait charged for an activity visited with priority access.
    pub priority_wait: i32,
    pub reservation: ReservationConfig,
    /// Added to the annealing cost for each visit that ends after closing.
    pub deadline_penalty: f64,
    pub annealing: AnnealingConfig,
    /// Largest candidate count searched exhaustively.
    pub exhaustive_limit: usize,
    /// Return no route rather than a best-effort infeasible annealing plan.
    pub reject_infeasible_plans: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            travel: TravelConfig::default(),
            meal_break: MealBreakConfig::default(),
            priority_wait: 10,
            reservation: ReservationConfig::default(),
            deadline_penalty: 10_000.0,
            annealing: AnnealingConfig::default(),
            exhaustive_limit: 8,
            reject_infeasible_plans: false,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> PlannerResult<Self> {
        let config: PlannerConfig =
            serde_json::from_str(json).map_err(|err| PlannerError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects values that would make the search loop forever or misbehave.
    pub fn validate(&self) -> PlannerResult<()> {
        let annealing = &self.annealing;
        if !(annealing.cooling_rate > 0.0 && annealing.cooling_rate < 1.0) {
            return Err(PlannerError::Config(format!(
                "annealing.cooling_rate must be in (0, 1), got {}",
                annealing.cooling_rate
            )));
        }
        if !(annealing.min_temperature > 0.0) {
            return Err(PlannerError::Config(
                "annealing.min_temperature must be positive".to_string(),
            ));
        }
        if self.travel.minutes_per_unit < 0.0 || self.travel.cross_area_penalty < 1.0 {
            return Err(PlannerError::Config(
                "travel.minutes_per_unit must be >= 0 and travel.cross_area_penalty >= 1"
                    .to_string(),
            ));
        }
        if self.meal_break.duration < 0
            || self.priority_wait < 0
            || self.reservation.grace_minutes < 0
        {
            return Err(PlannerError::Config(
                "meal_break.duration, priority_wait and reservation.grace_minutes must not be negative"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
