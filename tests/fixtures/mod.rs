//! Test fixtures for itinerary-planner.
//!
//! Provides a realistic venue:
//! - A harbor-themed park with eight zones and twenty attractions
//! - Crowd profiles for the synthetic wait model

pub mod harbor_park;

pub use harbor_park::*;
