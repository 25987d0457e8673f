//! Walking-time estimate between two points of the venue.
//!
//! Uses map distance scaled by walking pace. Zones are not geometrically
//! contiguous, so leaving one zone for another costs extra, and some zone
//! pairs are only connected by a fixed perimeter walk.

use std::collections::HashMap;

use crate::config::{DistanceMetric, TravelConfig};
use crate::model::{Area, Location, WalkingPace};

/// Travel cost function built from a [`TravelConfig`] and the venue's
/// entrance area.
#[derive(Debug, Clone)]
pub struct TravelModel {
    config: TravelConfig,
    entrance_area: Area,
    flat: HashMap<(Area, Area), i32>,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self::new(TravelConfig::default(), Area::new("entrance"))
    }
}

impl TravelModel {
    /// Walks out of `entrance_area` never pay the cross-area penalty.
    pub fn new(config: TravelConfig, entrance_area: Area) -> Self {
        let flat = config
            .flat_transfers
            .iter()
            .map(|transfer| ((transfer.from.clone(), transfer.to.clone()), transfer.minutes))
            .collect();
        Self {
            config,
            entrance_area,
            flat,
        }
    }

    pub fn config(&self) -> &TravelConfig {
        &self.config
    }

    /// Walking minutes from `from` to `to`, truncated to whole minutes.
    pub fn travel_minutes(&self, from: &Location, to: &Location, pace: WalkingPace) -> i32 {
        if let Some(&minutes) = self.flat.get(&(from.area.clone(), to.area.clone())) {
            return minutes.max(0);
        }

        let distance = match self.config.metric {
            DistanceMetric::Manhattan => from.position.manhattan(&to.position),
            DistanceMetric::Euclidean => from.position.euclidean(&to.position),
        };

        let mut minutes =
            distance * self.config.minutes_per_unit * self.config.pace.for_pace(pace);

        if from.area != to.area && from.area != self.entrance_area {
            minutes *= self.config.cross_area_penalty;
        }

        (minutes as i32).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlatTransfer;
    use crate::model::Position;

    fn at(area: &str, x: f64, y: f64) -> Location {
        Location::new(area, Position::new(x, y))
    }

    #[test]
    fn test_same_point_is_free() {
        let model = TravelModel::default();
        let here = at("harbor", 10.0, 10.0);
        assert_eq!(model.travel_minutes(&here, &here, WalkingPace::Slow), 0);
    }

    #[test]
    fn test_manhattan_from_entrance() {
        let model = TravelModel::default();
        // 20 units * 0.5 min/unit, no cross-area penalty when leaving the entrance
        let minutes = model.travel_minutes(
            &at("entrance", 0.0, 0.0),
            &at("harbor", 10.0, 10.0),
            WalkingPace::Normal,
        );
        assert_eq!(minutes, 10);
    }

    #[test]
    fn test_pace_scales_time() {
        let model = TravelModel::default();
        let from = at("entrance", 0.0, 0.0);
        let to = at("harbor", 10.0, 10.0);
        assert_eq!(model.travel_minutes(&from, &to, WalkingPace::Slow), 15);
        assert_eq!(model.travel_minutes(&from, &to, WalkingPace::Brisk), 7);
    }

    #[test]
    fn test_cross_area_penalty() {
        let model = TravelModel::default();
        let same_zone = model.travel_minutes(
            &at("harbor", 0.0, 0.0),
            &at("harbor", 20.0, 0.0),
            WalkingPace::Normal,
        );
        let other_zone = model.travel_minutes(
            &at("harbor", 0.0, 0.0),
            &at("delta", 20.0, 0.0),
            WalkingPace::Normal,
        );
        assert_eq!(same_zone, 10);
        assert_eq!(other_zone, 12, "10 minutes * 1.2 penalty");
    }

    #[test]
    fn test_flat_transfer_overrides_distance() {
        let config = TravelConfig {
            flat_transfers: vec![FlatTransfer {
                from: Area::new("entrance"),
                to: Area::new("springs"),
                minutes: 25,
            }],
            ..TravelConfig::default()
        };
        let model = TravelModel::new(config, Area::new("entrance"));

        let flat = model.travel_minutes(
            &at("entrance", 0.0, 0.0),
            &at("springs", 1.0, 1.0),
            WalkingPace::Brisk,
        );
        assert_eq!(flat, 25);

        // Only the configured direction is overridden
        let back = model.travel_minutes(
            &at("springs", 1.0, 1.0),
            &at("entrance", 0.0, 0.0),
            WalkingPace::Normal,
        );
        assert_eq!(back, 1);
    }

    #[test]
    fn test_euclidean_metric() {
        let model = TravelModel::new(
            TravelConfig {
                metric: DistanceMetric::Euclidean,
                minutes_per_unit: 1.0,
                ..TravelConfig::default()
            },
            Area::new("entrance"),
        );
        let minutes = model.travel_minutes(
            &at("entrance", 0.0, 0.0),
            &at("harbor", 3.0, 4.0),
            WalkingPace::Normal,
        );
        assert_eq!(minutes, 5);
    }

    #[test]
    fn test_entrance_area_follows_venue() {
        let model = TravelModel::new(TravelConfig::default(), Area::new("gate"));
        let to = at("east", 20.0, 0.0);

        assert_eq!(model.travel_minutes(&at("gate", 0.0, 0.0), &to, WalkingPace::Normal), 10);
        // "entrance" is just another zone at this venue
        assert_eq!(model.travel_minutes(&at("entrance", 0.0, 0.0), &to, WalkingPace::Normal), 12);
    }
}
