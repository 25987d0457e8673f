//! itinerary-planner core
//!
//! Plans a single day through a venue's activities: which ones to visit and
//! in what order, given travel, predicted waits, fixed events, reserved
//! slots and a closing deadline.

pub mod traits;
pub mod model;
pub mod error;
pub mod config;
pub mod catalog;
pub mod travel;
pub mod simulate;
pub mod exhaustive;
pub mod annealing;
pub mod engine;
pub mod oracle;
pub mod remote;

pub use catalog::Catalog;
pub use config::PlannerConfig;
pub use engine::{Engine, Itinerary, PlanRequest, SearchStrategy};
pub use error::{OracleError, PlannerError, PlannerResult};
