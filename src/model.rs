//! Plain data types shared by the planner.
//!
//! Everything here is immutable reference or input data, except
//! [`TimelineEntry`] and [`ScoreResult`], which only the simulator produces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a plannable activity (ride, show building, experience).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActivityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A themed zone of the venue. Zones are not geometrically contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area(pub String);

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Area {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Planar map coordinates, in arbitrary map units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: &Position) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn euclidean(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where a visitor stands: a zone plus a point in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub area: Area,
    pub position: Position,
}

impl Location {
    pub fn new(area: impl Into<Area>, position: Position) -> Self {
        Self {
            area: area.into(),
            position,
        }
    }
}

/// Catalog entry for one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub location: Location,
    /// Time spent on the activity itself once the queue is cleared, in minutes.
    pub service_minutes: i32,
    pub indoor: bool,
    /// Whether a priority-access pass can be used here.
    pub priority_access: bool,
    /// Entry only with a reserved slot (restricted areas).
    pub reservation_required: bool,
}

impl Activity {
    /// New outdoor activity with a 10 minute service time and no access options.
    pub fn new(id: impl Into<ActivityId>, area: impl Into<Area>, position: Position) -> Self {
        Self {
            id: id.into(),
            location: Location::new(area, position),
            service_minutes: 10,
            indoor: false,
            priority_access: false,
            reservation_required: false,
        }
    }

    pub fn service_minutes(mut self, minutes: i32) -> Self {
        self.service_minutes = minutes;
        self
    }

    pub fn indoor(mut self) -> Self {
        self.indoor = true;
        self
    }

    pub fn priority_access(mut self) -> Self {
        self.priority_access = true;
        self
    }

    pub fn reservation_required(mut self) -> Self {
        self.reservation_required = true;
        self
    }

    pub fn area(&self) -> &Area {
        &self.location.area
    }
}

/// Ambient conditions for the planned day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: u8,
    /// Holiday or otherwise extra-crowded day.
    pub holiday: bool,
    /// Rain probability, 0..=100.
    pub rain_probability: u8,
    /// Forecast maximum temperature in °C.
    pub max_temperature: f64,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            weekday: 0,
            holiday: false,
            rain_probability: 0,
            max_temperature: 20.0,
        }
    }
}

/// Walking speed chosen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkingPace {
    Slow,
    #[default]
    Normal,
    Brisk,
}

/// Externally scheduled, non-negotiable interval (a show, a dining reservation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedEvent {
    pub name: String,
    /// Minutes from day-open.
    pub start: i32,
    pub duration: i32,
}

impl FixedEvent {
    pub fn new(name: impl Into<String>, start: i32, duration: i32) -> Self {
        Self {
            name: name.into(),
            start,
            duration,
        }
    }

    pub fn end(&self) -> i32 {
        self.start + self.duration
    }

    /// Whether `[from, to)` intersects this event.
    pub fn overlaps(&self, from: i32, to: i32) -> bool {
        !(to <= self.start || from >= self.end())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Travel,
    WaitForSlot,
    Rest,
    Event,
    Ride,
}

/// One step of a simulated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub kind: EntryKind,
    /// Activity id, event name, or a short description of the step.
    pub label: String,
    /// Minute the step begins (for rides: when the visitor reaches the queue).
    pub start: i32,
    /// Minute the visitor arrives at the step's location.
    pub arrival: i32,
    pub wait: i32,
    pub duration: i32,
    pub area: Option<Area>,
    pub priority_access: bool,
}

impl TimelineEntry {
    /// Minute the step is over.
    pub fn end(&self) -> i32 {
        self.start + self.wait + self.duration
    }
}

/// Aggregate figures for one simulated route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_wait: i32,
    /// Simulated clock when the route ends (minutes from day-open).
    pub completion_time: i32,
    pub total_utility: f64,
    pub visited: usize,
    /// Sum of deadline and reservation penalties (penalizing policy only).
    pub penalty: f64,
    pub feasible: bool,
}

impl ScoreResult {
    /// Utility per elapsed minute; 0 when no time has elapsed.
    pub fn efficiency(&self) -> f64 {
        if self.completion_time > 0 {
            self.total_utility / self.completion_time as f64
        } else {
            0.0
        }
    }

    /// Minimization objective used by annealing: wait plus penalties.
    pub fn cost(&self) -> f64 {
        self.total_wait as f64 + self.penalty
    }
}
