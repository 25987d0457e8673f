//! A harbor-themed park laid out on a 2-D grid, entrance at the origin.
//!
//! Coordinates are map units (0.5 walking minutes each at normal pace).
//! The springs zone sits behind the volcano and is reachable from the
//! entrance only by the perimeter path.

use itinerary_planner::catalog::Catalog;
use itinerary_planner::config::{FlatTransfer, PlannerConfig};
use itinerary_planner::model::{Activity, Area, Location, Position};
use itinerary_planner::oracle::{CrowdProfile, SyntheticWaitModel};

/// A named attraction and everything the planner needs to know about it.
#[derive(Debug, Clone)]
pub struct Attraction {
    pub name: &'static str,
    pub area: &'static str,
    pub x: f64,
    pub y: f64,
    pub profile: CrowdProfile,
    pub indoor: bool,
    pub priority_access: bool,
    pub reservation_required: bool,
}

impl Attraction {
    const fn new(name: &'static str, area: &'static str, x: f64, y: f64, profile: CrowdProfile) -> Self {
        Self {
            name,
            area,
            x,
            y,
            profile,
            indoor: false,
            priority_access: false,
            reservation_required: false,
        }
    }

    const fn indoor(mut self) -> Self {
        self.indoor = true;
        self
    }

    const fn priority(mut self) -> Self {
        self.priority_access = true;
        self
    }

    const fn reserved(mut self) -> Self {
        self.reservation_required = true;
        self
    }

    pub fn activity(&self) -> Activity {
        let mut activity = Activity::new(self.name, self.area, Position::new(self.x, self.y));
        activity.indoor = self.indoor;
        activity.priority_access = self.priority_access;
        activity.reservation_required = self.reservation_required;
        activity
    }
}

const fn standard(phase_shift: i32) -> CrowdProfile {
    CrowdProfile::Standard { phase_shift }
}

pub const SPRINGS: &str = "fantasy_springs";

pub const ATTRACTIONS: &[Attraction] = &[
    // Mediterranean Harbor
    Attraction::new("Soaring", "harbor", 10.0, 10.0, CrowdProfile::Headliner).indoor().priority(),
    Attraction::new("Venetian Gondolas", "harbor", 5.0, 5.0, CrowdProfile::FastTurnover),
    // American Waterfront
    Attraction::new("Toy Story Mania", "waterfront", 5.0, 20.0, CrowdProfile::Headliner).indoor().priority(),
    Attraction::new("Tower of Terror", "waterfront", 10.0, 15.0, standard(-40)).indoor().priority(),
    Attraction::new("Turtle Talk", "waterfront", 15.0, 15.0, standard(25)).indoor(),
    // Port Discovery
    Attraction::new("Nemo SeaRider", "port_discovery", -10.0, 30.0, standard(10)).indoor(),
    Attraction::new("Aquatopia", "port_discovery", -15.0, 30.0, standard(-20)),
    // Lost River Delta
    Attraction::new("Indiana Jones Adventure", "lost_river", -20.0, 45.0, standard(50)),
    Attraction::new("Raging Spirits", "lost_river", -15.0, 45.0, standard(-55)),
    // Arabian Coast
    Attraction::new("Magic Lamp Theater", "arabian_coast", 5.0, 50.0, CrowdProfile::FastTurnover).indoor(),
    Attraction::new("Caravan Carousel", "arabian_coast", 10.0, 50.0, CrowdProfile::FastTurnover),
    Attraction::new("Sindbad's Voyage", "arabian_coast", 15.0, 55.0, CrowdProfile::FastTurnover).indoor(),
    // Mermaid Lagoon
    Attraction::new("Jumpin' Jellyfish", "mermaid_lagoon", 25.0, 40.0, CrowdProfile::FastTurnover),
    Attraction::new("Scuttle's Scooters", "mermaid_lagoon", 20.0, 35.0, CrowdProfile::FastTurnover),
    // Mysterious Island
    Attraction::new("Journey to the Center of the Earth", "mysterious_island", 0.0, 30.0, standard(0)),
    Attraction::new("20,000 Leagues Under the Sea", "mysterious_island", 5.0, 25.0, CrowdProfile::FastTurnover).indoor(),
    // Fantasy Springs (entry by reserved slot only)
    Attraction::new("Frozen Journey", SPRINGS, 30.0, 65.0, CrowdProfile::Headliner).indoor().priority().reserved(),
    Attraction::new("Rapunzel's Lantern Festival", SPRINGS, 35.0, 60.0, CrowdProfile::HighDemandZone).priority().reserved(),
    Attraction::new("Peter Pan's Never Land Adventure", SPRINGS, 40.0, 65.0, CrowdProfile::Headliner).indoor().priority().reserved(),
    Attraction::new("Tinker Bell's Busy Buggies", SPRINGS, 45.0, 60.0, CrowdProfile::HighDemandZone).reserved(),
];

pub fn entrance() -> Location {
    Location::new("entrance", Position::new(0.0, 0.0))
}

pub fn catalog() -> Catalog {
    ATTRACTIONS
        .iter()
        .fold(Catalog::new(entrance()), |catalog, attraction| {
            catalog.with_activity(attraction.activity())
        })
}

pub fn wait_model() -> SyntheticWaitModel {
    ATTRACTIONS
        .iter()
        .fold(SyntheticWaitModel::new(), |model, attraction| {
            model.with_profile(attraction.name, attraction.profile)
        })
}

/// Default config plus the perimeter walk into the springs zone.
pub fn park_config() -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.travel.flat_transfers.push(FlatTransfer {
        from: Area::new("entrance"),
        to: Area::new(SPRINGS),
        minutes: 55,
    });
    config
}

/// Attractions outside the reservation-only zone.
pub fn open_attractions() -> Vec<&'static Attraction> {
    ATTRACTIONS
        .iter()
        .filter(|attraction| !attraction.reservation_required)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attraction_count() {
        assert_eq!(ATTRACTIONS.len(), 20);
        assert_eq!(open_attractions().len(), 16);
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = ATTRACTIONS.iter().map(|a| a.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ATTRACTIONS.len());
    }
}
