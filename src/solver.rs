use log::debug;
use thiserror::Error;

use crate::allocation::Allocation;
use crate::builder::ProblemBuilder;
use crate::network::{Capacity, NetworkError};
use crate::problem::ShiftProblem;

/// Reasons a [`ShiftProblem`] has no allocation.
///
/// Both outcomes are expected answers about the input rather than faults.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Officers are obliged to work more shifts than the organizations need, so no network was built.
    #[error("officers must work {minimum} shifts but only {demand} are needed")]
    MinimumExceedsDemand { minimum: usize, demand: usize },
    /// The maximum flow falls short of the demand.
    #[error("at most {flow} of {demand} shifts can be filled")]
    Unsatisfiable { flow: Capacity, demand: Capacity },
    /// The flow network was malformed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl ShiftProblem {
    /// Solves this problem, yielding an allocation that covers every organization's demand exactly.
    ///
    /// The aggregate pre-check runs first; the max flow then decides. A flow equal to the total demand is
    /// the certificate that the decoded allocation is complete.
    pub fn solve(&self) -> Result<Allocation, SolverFailure> {
        let mut network = self.network().ok_or(SolverFailure::MinimumExceedsDemand {
            minimum: self.guaranteed_supply(),
            demand: self.total_demand(),
        })?;

        let flow = network.solve()?;
        debug!("allocation flow {flow} against demand {}", network.required());

        Allocation::decode(&network).ok_or(SolverFailure::Unsatisfiable {
            flow,
            demand: network.required(),
        })
    }
}

/// Allocate officers to organization shifts for one period.
///
/// `preferences[i]` gives officer `i`'s eligibility per shift type and `demand[c]` the officers organization `c`
/// needs per shift type each day. Every officer works between `min_shifts` and `max_shifts` shifts, at most one a day.
///
/// Returns `None` when no such allocation exists, including when `min_shifts > max_shifts`.
///
/// ```
/// use shiftflow::{allocate, Shift};
///
/// let allocation = allocate(&[[1, 1, 1], [1, 1, 1]], &[[1, 0, 0]], 10, 20).unwrap();
/// for day in 0..30 {
///     assert_eq!(allocation.staffed(0, day, Shift::Morning), 1);
/// }
/// ```
pub fn allocate(
    preferences: &[[usize; 3]],
    demand: &[[usize; 3]],
    min_shifts: usize,
    max_shifts: usize,
) -> Option<Allocation> {
    let mut builder = ProblemBuilder::default();
    builder.with_bounds(min_shifts, max_shifts);
    for eligibility in preferences {
        builder.add_officer(*eligibility);
    }
    for needed in demand {
        builder.add_organization(*needed);
    }

    let problem = match builder.build() {
        Ok(problem) => problem,
        Err(reasons) => {
            debug!("rejected input: {reasons:?}");
            return None;
        }
    };

    problem.solve()
        .inspect_err(|failure| debug!("no allocation: {failure}"))
        .ok()
}
