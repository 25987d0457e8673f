//! Route replay: turns an ordered list of activities into a timed day.
//!
//! The simulator walks the route in order, charging travel, meal breaks,
//! fixed-event interruptions, queue waits and service time, and records each
//! step as a [`TimelineEntry`]. It is a pure function of the route and the
//! request; the only shared inputs are read-only.

use tracing::trace;

use crate::config::PlannerConfig;
use crate::engine::PlanRequest;
use crate::error::{OracleError, PlannerError, PlannerResult};
use crate::model::{
    Activity, ActivityId, EntryKind, FixedEvent, Location, ScoreResult, TimelineEntry,
};
use crate::traits::{FacilityCatalog, WaitTimeOracle};
use crate::travel::TravelModel;

/// What to do when a visit breaks the closing deadline or a reservation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Mark the route infeasible and stop replaying it.
    Reject,
    /// Add the configured penalty, mark the route infeasible, and keep going.
    Penalize,
}

/// Result of replaying one route.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub score: ScoreResult,
    pub timeline: Vec<TimelineEntry>,
}

/// A route together with its replay, as returned by the searches.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoute {
    pub route: Vec<ActivityId>,
    pub simulation: Simulation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Violation {
    /// Arrived later than the reserved slot plus grace period.
    MissedSlot,
    /// Activity needs a reservation and none is held.
    NoReservation,
}

/// One planned move: walk to an activity, queue, and ride.
#[derive(Debug, Clone)]
struct Leg {
    depart: i32,
    travel: i32,
    /// Minute the walk ends.
    arrival: i32,
    rest_start: Option<i32>,
    /// Minute the visitor joins the queue (after any meal break).
    queue_arrival: i32,
    slot_idle: i32,
    wait: i32,
    finish: i32,
    priority: bool,
    violation: Option<Violation>,
}

pub struct Simulator<'a, C, O> {
    catalog: &'a C,
    oracle: &'a O,
    config: &'a PlannerConfig,
    request: &'a PlanRequest,
    travel: TravelModel,
    events: Vec<FixedEvent>,
}

impl<'a, C, O> Simulator<'a, C, O>
where
    C: FacilityCatalog,
    O: WaitTimeOracle,
{
    pub fn new(catalog: &'a C, oracle: &'a O, config: &'a PlannerConfig, request: &'a PlanRequest) -> Self {
        let mut events = request.fixed_events.clone();
        events.sort_by_key(|event| event.start);

        Self {
            catalog,
            oracle,
            config,
            request,
            travel: TravelModel::new(config.travel.clone(), catalog.entrance().area.clone()),
            events,
        }
    }

    pub fn request(&self) -> &PlanRequest {
        self.request
    }

    /// Replays `route` from the request's start time.
    ///
    /// Unknown activity ids and oracle failures are errors; deadline overruns
    /// and reservation problems are reported through `score.feasible`.
    pub fn simulate(&self, route: &[ActivityId], policy: ViolationPolicy) -> PlannerResult<Simulation> {
        let request = self.request;
        let mut clock = request.start_time;
        let mut here: &Location = self.catalog.entrance();
        let mut rested = !request.auto_break;
        let mut consumed = vec![false; self.events.len()];
        let mut timeline = Vec::with_capacity(route.len() * 2);
        let mut score = ScoreResult {
            feasible: true,
            ..ScoreResult::default()
        };

        for id in route {
            let activity = self
                .catalog
                .lookup(id)
                .ok_or_else(|| PlannerError::UnknownActivity(id.clone()))?;
            let utility = request
                .utilities
                .get(id)
                .copied()
                .ok_or_else(|| PlannerError::MissingUtility(id.clone()))?;

            let mut leg = self.plan_leg(clock, here, activity, rested)?;

            if let Some(index) = self.first_collision(&consumed, leg.arrival, leg.finish) {
                let event = &self.events[index];
                consumed[index] = true;
                timeline.push(TimelineEntry {
                    kind: EntryKind::Event,
                    label: event.name.clone(),
                    start: clock,
                    arrival: clock,
                    wait: 0,
                    duration: event.end() - clock,
                    area: None,
                    priority_access: false,
                });
                clock = event.end();
                leg = self.plan_leg(clock, here, activity, rested)?;
            }

            let mut violated = false;
            if let Some(violation) = leg.violation {
                trace!(activity = %id, ?violation, "reservation rule broken");
                violated = true;
                score.penalty += self.config.reservation.penalty;
            }
            if leg.finish > request.closing_deadline {
                trace!(activity = %id, finish = leg.finish, "visit ends after closing");
                violated = true;
                score.penalty += self.config.deadline_penalty;
            }
            if violated {
                score.feasible = false;
                if policy == ViolationPolicy::Reject {
                    score.completion_time = clock;
                    return Ok(Simulation { score, timeline });
                }
            }

            let area = Some(activity.area().clone());
            if leg.travel >= self.config.travel.travel_entry_threshold {
                timeline.push(TimelineEntry {
                    kind: EntryKind::Travel,
                    label: format!("walk to {}", id),
                    start: leg.depart,
                    arrival: leg.arrival,
                    wait: 0,
                    duration: leg.travel,
                    area: area.clone(),
                    priority_access: false,
                });
            }
            if let Some(rest_start) = leg.rest_start {
                rested = true;
                timeline.push(TimelineEntry {
                    kind: EntryKind::Rest,
                    label: "meal break".to_string(),
                    start: rest_start,
                    arrival: rest_start,
                    wait: 0,
                    duration: self.config.meal_break.duration,
                    area: area.clone(),
                    priority_access: false,
                });
            }
            if leg.slot_idle > 0 {
                timeline.push(TimelineEntry {
                    kind: EntryKind::WaitForSlot,
                    label: id.to_string(),
                    start: leg.queue_arrival,
                    arrival: leg.queue_arrival,
                    wait: leg.slot_idle,
                    duration: 0,
                    area: area.clone(),
                    priority_access: false,
                });
            }
            timeline.push(TimelineEntry {
                kind: EntryKind::Ride,
                label: id.to_string(),
                start: leg.queue_arrival + leg.slot_idle,
                arrival: leg.queue_arrival,
                wait: leg.wait,
                duration: activity.service_minutes,
                area,
                priority_access: leg.priority,
            });

            clock = leg.finish;
            here = &activity.location;
            score.total_wait += leg.slot_idle + leg.wait;
            score.total_utility += utility;
            score.visited += 1;
        }

        score.completion_time = clock;
        if clock > request.closing_deadline {
            score.feasible = false;
        }

        Ok(Simulation { score, timeline })
    }

    fn plan_leg(&self, depart: i32, from: &Location, activity: &Activity, rested: bool) -> PlannerResult<Leg> {
        let request = self.request;
        let travel = self.travel.travel_minutes(from, &activity.location, request.pace);
        let arrival = depart + travel;

        let meal = &self.config.meal_break;
        let rest_start = (!rested && meal.contains(arrival)).then_some(arrival);
        let queue_arrival = arrival + rest_start.map_or(0, |_| meal.duration);

        let priority = request.priority.contains(&activity.id);
        let (slot_idle, wait, violation) = if priority {
            (0, self.config.priority_wait, None)
        } else if let Some(&slot) = request.reserved_slots.get(&activity.id) {
            if queue_arrival < slot {
                (slot - queue_arrival, 0, None)
            } else if queue_arrival > slot + self.config.reservation.grace_minutes {
                (0, 0, Some(Violation::MissedSlot))
            } else {
                (0, 0, None)
            }
        } else if activity.reservation_required {
            (0, 0, Some(Violation::NoReservation))
        } else {
            let wait = self
                .oracle
                .predict(&activity.id, &request.conditions, queue_arrival)?;
            if wait < 0 {
                return Err(OracleError::Invalid(format!(
                    "negative wait {} for {} at minute {}",
                    wait, activity.id, queue_arrival
                ))
                .into());
            }
            (0, wait, None)
        };

        Ok(Leg {
            depart,
            travel,
            arrival,
            rest_start,
            queue_arrival,
            slot_idle,
            wait,
            finish: queue_arrival + slot_idle + wait + activity.service_minutes,
            priority,
            violation,
        })
    }

    /// First unconsumed event, in start order, overlapping `[from, to)`.
    fn first_collision(&self, consumed: &[bool], from: i32, to: i32) -> Option<usize> {
        self.events
            .iter()
            .enumerate()
            .find(|(index, event)| !consumed[*index] && event.overlaps(from, to))
            .map(|(index, _)| index)
    }
}
