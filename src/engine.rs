//! Itinerary planner entry point.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::model::{Activity, ActivityId, Conditions, FixedEvent, TimelineEntry, WalkingPace};
use crate::simulate::{ScoredRoute, Simulation, Simulator, ViolationPolicy};
use crate::traits::{FacilityCatalog, WaitTimeOracle};
use crate::{annealing, exhaustive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Exhaustive up to `exhaustive_limit` candidates, annealing above.
    #[default]
    Auto,
    Exhaustive,
    Annealing,
}

/// Everything the visitor asks for on one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Activities the visitor would like to do, in the order given.
    pub candidates: Vec<ActivityId>,
    /// How much the visitor wants each candidate.
    pub utilities: HashMap<ActivityId, f64>,
    /// Candidates visited with priority access.
    pub priority: HashSet<ActivityId>,
    /// Reserved slot opening minute per activity.
    pub reserved_slots: HashMap<ActivityId, i32>,
    pub fixed_events: Vec<FixedEvent>,
    /// Minutes from day-open when the visitor starts.
    pub start_time: i32,
    /// Every visit must end by this minute.
    pub closing_deadline: i32,
    pub conditions: Conditions,
    pub auto_break: bool,
    pub pace: WalkingPace,
    pub strategy: SearchStrategy,
}

impl PlanRequest {
    pub fn new(closing_deadline: i32) -> Self {
        Self {
            candidates: Vec::new(),
            utilities: HashMap::new(),
            priority: HashSet::new(),
            reserved_slots: HashMap::new(),
            fixed_events: Vec::new(),
            start_time: 0,
            closing_deadline,
            conditions: Conditions::default(),
            auto_break: false,
            pace: WalkingPace::Normal,
            strategy: SearchStrategy::Auto,
        }
    }

    pub fn candidate(mut self, id: impl Into<ActivityId>, utility: f64) -> Self {
        let id = id.into();
        self.utilities.insert(id.clone(), utility);
        self.candidates.push(id);
        self
    }

    pub fn priority(mut self, id: impl Into<ActivityId>) -> Self {
        self.priority.insert(id.into());
        self
    }

    pub fn reserved_slot(mut self, id: impl Into<ActivityId>, minute: i32) -> Self {
        self.reserved_slots.insert(id.into(), minute);
        self
    }

    pub fn fixed_event(mut self, event: FixedEvent) -> Self {
        self.fixed_events.push(event);
        self
    }

    pub fn start_time(mut self, minute: i32) -> Self {
        self.start_time = minute;
        self
    }

    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn auto_break(mut self, enabled: bool) -> Self {
        self.auto_break = enabled;
        self
    }

    pub fn pace(mut self, pace: WalkingPace) -> Self {
        self.pace = pace;
        self
    }

    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// The planned day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// `None` when no acceptable route exists.
    pub route: Option<Vec<ActivityId>>,
    pub timeline: Vec<TimelineEntry>,
    pub total_wait: i32,
    pub completion_time: i32,
    pub efficiency: f64,
    pub feasible: bool,
    /// Strategy that produced the route (never `Auto`).
    pub strategy: SearchStrategy,
}

impl Itinerary {
    fn from_scored(best: ScoredRoute, strategy: SearchStrategy) -> Self {
        let score = best.simulation.score;
        Self {
            route: Some(best.route),
            timeline: best.simulation.timeline,
            total_wait: score.total_wait,
            completion_time: score.completion_time,
            efficiency: score.efficiency(),
            feasible: score.feasible,
            strategy,
        }
    }

    fn empty(strategy: SearchStrategy) -> Self {
        Self {
            route: None,
            timeline: Vec::new(),
            total_wait: 0,
            completion_time: 0,
            efficiency: 0.0,
            feasible: false,
            strategy,
        }
    }
}

/// Planner bound to one venue's catalog and wait oracle.
#[derive(Debug, Clone)]
pub struct Engine<C, O> {
    catalog: C,
    oracle: O,
    config: PlannerConfig,
}

impl<C, O> Engine<C, O>
where
    C: FacilityCatalog,
    O: WaitTimeOracle,
{
    pub fn new(catalog: C, oracle: O, config: PlannerConfig) -> Self {
        Self {
            catalog,
            oracle,
            config,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Chooses which candidates to visit and in what order.
    ///
    /// Input problems are errors. A day that cannot fit any candidate is not:
    /// it comes back with `feasible = false`.
    pub fn optimize(&self, request: &PlanRequest) -> PlannerResult<Itinerary> {
        self.validate(request)?;

        let strategy = match request.strategy {
            SearchStrategy::Auto if request.candidates.len() <= self.config.exhaustive_limit => {
                SearchStrategy::Exhaustive
            }
            SearchStrategy::Auto => SearchStrategy::Annealing,
            explicit => explicit,
        };

        info!(
            candidates = request.candidates.len(),
            ?strategy,
            start = request.start_time,
            deadline = request.closing_deadline,
            "planning itinerary"
        );

        let sim = Simulator::new(&self.catalog, &self.oracle, &self.config, request);

        let itinerary = match strategy {
            SearchStrategy::Annealing => {
                let best = annealing::search(&sim, &request.candidates, &self.config.annealing)?;
                let score = &best.simulation.score;
                if !score.feasible {
                    warn!(
                        completion = score.completion_time,
                        deadline = request.closing_deadline,
                        penalty = score.penalty,
                        "best annealed route is infeasible"
                    );
                    if self.config.reject_infeasible_plans {
                        return Ok(Itinerary::empty(strategy));
                    }
                }
                Itinerary::from_scored(best, strategy)
            }
            _ => match exhaustive::search(&sim, &request.candidates)? {
                Some(best) => Itinerary::from_scored(best, strategy),
                None => Itinerary::empty(strategy),
            },
        };

        info!(
            visited = itinerary.route.as_ref().map_or(0, |route| route.len()),
            feasible = itinerary.feasible,
            efficiency = itinerary.efficiency,
            completion = itinerary.completion_time,
            "itinerary planned"
        );

        Ok(itinerary)
    }

    /// Replays a caller-chosen route without searching.
    ///
    /// Uses the rejecting policy, so an infeasible route stops at its first
    /// violation.
    pub fn evaluate(
        &self,
        request: &PlanRequest,
        route: &[ActivityId],
    ) -> PlannerResult<Simulation> {
        self.validate(request)?;
        Simulator::new(&self.catalog, &self.oracle, &self.config, request)
            .simulate(route, ViolationPolicy::Reject)
    }

    fn validate(&self, request: &PlanRequest) -> PlannerResult<()> {
        self.config.validate()?;

        if request.candidates.is_empty() {
            return Err(PlannerError::EmptyCandidates);
        }

        non_negative("start time", request.start_time)?;
        non_negative("closing deadline", request.closing_deadline)?;

        let mut seen = HashSet::with_capacity(request.candidates.len());
        for id in &request.candidates {
            if !seen.insert(id) {
                return Err(PlannerError::DuplicateCandidate(id.clone()));
            }
            self.known(id)?;
            match request.utilities.get(id) {
                None => return Err(PlannerError::MissingUtility(id.clone())),
                Some(utility) if !utility.is_finite() || *utility < 0.0 => {
                    return Err(PlannerError::InvalidUtility(id.clone()));
                }
                Some(_) => {}
            }
        }

        for id in &request.priority {
            if !self.known(id)?.priority_access {
                return Err(PlannerError::PriorityNotOffered(id.clone()));
            }
        }

        let grace = self.config.reservation.grace_minutes;
        for (id, &minute) in &request.reserved_slots {
            self.known(id)?;
            let what = format!("reserved slot for {}", id);
            non_negative(&what, minute)?;
            fits_clock(what, minute, grace)?;
        }

        for event in &request.fixed_events {
            non_negative(&format!("start of {}", event.name), event.start)?;
            non_negative(&format!("duration of {}", event.name), event.duration)?;
            fits_clock(format!("end of {}", event.name), event.start, event.duration)?;
        }

        let limit = self.config.exhaustive_limit;
        if request.strategy == SearchStrategy::Exhaustive && request.candidates.len() > limit {
            return Err(PlannerError::TooManyCandidates {
                count: request.candidates.len(),
                limit,
            });
        }

        Ok(())
    }

    fn known(&self, id: &ActivityId) -> PlannerResult<&Activity> {
        self.catalog
            .lookup(id)
            .ok_or_else(|| PlannerError::UnknownActivity(id.clone()))
    }
}

fn non_negative(what: &str, value: i32) -> PlannerResult<()> {
    if value < 0 {
        return Err(PlannerError::NegativeTime {
            what: what.to_string(),
            value,
        });
    }
    Ok(())
}

fn fits_clock(what: String, minute: i32, span: i32) -> PlannerResult<()> {
    match minute.checked_add(span) {
        Some(_) => Ok(()),
        None => Err(PlannerError::TimeOverflow { what }),
    }
}
