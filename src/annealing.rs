//! Simulated annealing over orderings of the full candidate set.
//!
//! Unlike the exhaustive search this never drops activities. Routes that
//! overrun the closing deadline or break a reservation rule are replayed
//! with penalties instead of being rejected, so the walk can pass through
//! infeasible orderings on its way to feasible ones. The returned route is
//! the lowest-cost one seen and may still be infeasible.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::AnnealingConfig;
use crate::error::PlannerResult;
use crate::model::ActivityId;
use crate::simulate::{ScoredRoute, Simulator, ViolationPolicy};
use crate::traits::{FacilityCatalog, WaitTimeOracle};

/// Minimizes total wait plus penalties with random pairwise swaps.
pub fn search<C, O>(
    sim: &Simulator<'_, C, O>,
    candidates: &[ActivityId],
    config: &AnnealingConfig,
) -> PlannerResult<ScoredRoute>
where
    C: FacilityCatalog,
    O: WaitTimeOracle,
{
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let mut current = candidates.to_vec();
    current.shuffle(&mut rng);
    let mut current_sim = sim.simulate(&current, ViolationPolicy::Penalize)?;
    let mut best = ScoredRoute {
        route: current.clone(),
        simulation: current_sim.clone(),
    };

    let n = current.len();
    if n < 2 {
        return Ok(best);
    }

    let mut temperature = config.initial_temperature;
    let mut iterations = 0usize;
    let mut accepted = 0usize;

    while temperature >= config.min_temperature && iterations < config.iterations {
        iterations += 1;

        let i = rng.gen_range(0..n);
        let mut j = rng.gen_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        let mut neighbor = current.clone();
        neighbor.swap(i, j);
        let neighbor_sim = sim.simulate(&neighbor, ViolationPolicy::Penalize)?;

        let current_cost = current_sim.score.cost();
        let neighbor_cost = neighbor_sim.score.cost();
        let accept = neighbor_cost < current_cost
            || rng.r#gen::<f64>() < ((current_cost - neighbor_cost) / temperature).exp();

        if accept {
            accepted += 1;
            current = neighbor;
            current_sim = neighbor_sim;
            if current_sim.score.cost() < best.simulation.score.cost() {
                best = ScoredRoute {
                    route: current.clone(),
                    simulation: current_sim.clone(),
                };
            }
        }

        temperature *= config.cooling_rate;
    }

    debug!(
        iterations,
        accepted,
        temperature,
        best_cost = best.simulation.score.cost(),
        feasible = best.simulation.score.feasible,
        "annealing finished"
    );

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PlannerConfig;
    use crate::engine::PlanRequest;
    use crate::model::{Activity, Location, Position};
    use crate::oracle::TableOracle;

    fn ids(route: &[&str]) -> Vec<ActivityId> {
        route.iter().map(|id| ActivityId::new(*id)).collect()
    }

    fn clustered_catalog(names: &[&str]) -> Catalog {
        names
            .iter()
            .map(|name| Activity::new(*name, "zone", Position::new(0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_same_seed_same_route() {
        let catalog = clustered_catalog(&["a", "b", "c", "d", "e"]);
        let oracle = TableOracle::uniform(5)
            .with_steps("a", vec![(0, 0), (20, 60)])
            .with_steps("c", vec![(0, 40), (30, 0)]);
        let config = PlannerConfig::default();
        let request = ["a", "b", "c", "d", "e"]
            .into_iter()
            .fold(PlanRequest::new(600), |req, id| req.candidate(id, 1.0));
        let sim = Simulator::new(&catalog, &oracle, &config, &request);

        let first = search(&sim, &request.candidates, &config.annealing).unwrap();
        let second = search(&sim, &request.candidates, &config.annealing).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.route.len(), 5, "annealing keeps every candidate");
    }

    #[test]
    fn test_finds_time_sensitive_ordering() {
        let catalog = clustered_catalog(&["a", "b", "c", "d"]);
        // "a" is empty at opening and packed from minute 5 on
        let oracle = TableOracle::uniform(0).with_steps("a", vec![(0, 0), (5, 100)]);
        let config = PlannerConfig::default();
        let request = ["a", "b", "c", "d"]
            .into_iter()
            .fold(PlanRequest::new(600), |req, id| req.candidate(id, 1.0));
        let sim = Simulator::new(&catalog, &oracle, &config, &request);

        let best = search(&sim, &request.candidates, &config.annealing).unwrap();
        assert_eq!(best.route[0].as_str(), "a");
        assert_eq!(best.simulation.score.cost(), 0.0);
        assert!(best.simulation.score.feasible);
    }

    #[test]
    fn test_escapes_deadline_violations() {
        let catalog = Catalog::new(Location::new("entrance", Position::new(0.0, 0.0)))
            .with_activity(Activity::new("a", "zone", Position::new(10.0, 0.0)))
            .with_activity(Activity::new("b", "zone", Position::new(20.0, 0.0)))
            .with_activity(Activity::new("c", "zone", Position::new(30.0, 0.0)));
        let oracle = TableOracle::uniform(0);
        let config = PlannerConfig::default();
        // Only a -> b -> c finishes by minute 45
        let request = PlanRequest::new(45)
            .candidate("c", 1.0)
            .candidate("b", 1.0)
            .candidate("a", 1.0);
        let sim = Simulator::new(&catalog, &oracle, &config, &request);

        let best = search(&sim, &request.candidates, &config.annealing).unwrap();
        assert_eq!(best.route, ids(&["a", "b", "c"]));
        assert!(best.simulation.score.feasible);
    }

    #[test]
    fn test_single_candidate_returned_as_is() {
        let catalog = clustered_catalog(&["solo"]);
        let oracle = TableOracle::uniform(0);
        let config = PlannerConfig::default();
        let request = PlanRequest::new(5).candidate("solo", 1.0);
        let sim = Simulator::new(&catalog, &oracle, &config, &request);

        let best = search(&sim, &request.candidates, &config.annealing).unwrap();
        assert_eq!(best.route, ids(&["solo"]));
        assert!(!best.simulation.score.feasible, "10 minute ride misses a 5 minute deadline");
    }
}
