//! Exhaustive subset/permutation search.
//!
//! Tries every ordering of every subset, largest subsets first. The first
//! subset size with any feasible ordering is final: the planner maximizes
//! the number of activities first and efficiency second. Cost is factorial
//! in the subset size, so callers must bound the candidate count.

use rayon::prelude::*;
use tracing::debug;

use crate::error::PlannerResult;
use crate::model::ActivityId;
use crate::simulate::{ScoredRoute, Simulator, ViolationPolicy};
use crate::traits::{FacilityCatalog, WaitTimeOracle};

/// Best feasible route of the largest feasible size, or `None`.
///
/// Subsets of one size are evaluated in parallel. Ties in efficiency go to
/// the ordering enumerated first (subsets in lexicographic order, then
/// orderings in lexicographic order), so the result does not depend on
/// thread scheduling.
pub fn search<C, O>(sim: &Simulator<'_, C, O>, candidates: &[ActivityId]) -> PlannerResult<Option<ScoredRoute>>
where
    C: FacilityCatalog,
    O: WaitTimeOracle,
{
    for size in (1..=candidates.len()).rev() {
        let subsets = combinations(candidates.len(), size);

        let best = subsets
            .par_iter()
            .enumerate()
            .map(|(rank, subset)| {
                best_ordering(sim, candidates, subset).map(|found| found.map(|route| (rank, route)))
            })
            .try_reduce(|| None, |a, b| Ok(pick(a, b)))?;

        debug!(
            size,
            subsets = subsets.len(),
            feasible = best.is_some(),
            "searched subset tier"
        );

        if let Some((_, route)) = best {
            return Ok(Some(route));
        }
    }

    Ok(None)
}

/// Highest-efficiency feasible ordering of one subset.
fn best_ordering<C, O>(
    sim: &Simulator<'_, C, O>,
    candidates: &[ActivityId],
    subset: &[usize],
) -> PlannerResult<Option<ScoredRoute>>
where
    C: FacilityCatalog,
    O: WaitTimeOracle,
{
    let mut order = subset.to_vec();
    let mut best: Option<ScoredRoute> = None;

    loop {
        let route: Vec<ActivityId> = order.iter().map(|&i| candidates[i].clone()).collect();
        let simulation = sim.simulate(&route, ViolationPolicy::Reject)?;

        if simulation.score.feasible {
            let efficiency = simulation.score.efficiency();
            let improves = best
                .as_ref()
                .is_none_or(|current| efficiency > current.simulation.score.efficiency());
            if improves {
                best = Some(ScoredRoute { route, simulation });
            }
        }

        if !next_permutation(&mut order) {
            break;
        }
    }

    Ok(best)
}

fn pick(
    a: Option<(usize, ScoredRoute)>,
    b: Option<(usize, ScoredRoute)>,
) -> Option<(usize, ScoredRoute)> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ea = a.1.simulation.score.efficiency();
            let eb = b.1.simulation.score.efficiency();
            if eb > ea || (eb == ea && b.0 < a.0) {
                Some(b)
            } else {
                Some(a)
            }
        }
        (a, None) => a,
        (None, b) => b,
    }
}

/// All `k`-element index subsets of `0..n`, in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        out.push(indices.clone());

        // Rightmost index that can still move right
        let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            return out;
        };
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

/// Advances `items` to the next lexicographic permutation.
/// Returns false (leaving `items` untouched) when it is already the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    let Some(pivot) = (0..n - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let Some(successor) = (pivot + 1..n).rev().find(|&j| items[j] > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
