//! Core collaborator traits for the itinerary planner.
//!
//! These are intentionally minimal. Catalog data and wait predictions come
//! from outside the planner; concrete apps implement these traits for their
//! own data sources.

use crate::error::OracleError;
use crate::model::{Activity, ActivityId, Conditions, Location};

/// Predicts how long a visitor would queue at an activity.
///
/// Implementations must be side-effect free and deterministic for a given
/// input if reproducible plans are needed. `Send + Sync` lets the exhaustive
/// search evaluate orderings on several threads.
pub trait WaitTimeOracle: Send + Sync {
    /// Predicted wait in minutes when arriving `elapsed_minutes` after day-open.
    fn predict(
        &self,
        activity: &ActivityId,
        conditions: &Conditions,
        elapsed_minutes: i32,
    ) -> Result<i32, OracleError>;
}

/// Read-only reference data about the venue.
pub trait FacilityCatalog: Send + Sync {
    fn lookup(&self, id: &ActivityId) -> Option<&Activity>;

    /// Where every planned day starts.
    fn entrance(&self) -> &Location;
}

impl<T: WaitTimeOracle + ?Sized> WaitTimeOracle for &T {
    fn predict(
        &self,
        activity: &ActivityId,
        conditions: &Conditions,
        elapsed_minutes: i32,
    ) -> Result<i32, OracleError> {
        (**self).predict(activity, conditions, elapsed_minutes)
    }
}

impl<T: FacilityCatalog + ?Sized> FacilityCatalog for &T {
    fn lookup(&self, id: &ActivityId) -> Option<&Activity> {
        (**self).lookup(id)
    }

    fn entrance(&self) -> &Location {
        (**self).entrance()
    }
}
