#![warn(missing_docs)]

//! # `shiftflow`
//!
//! Allocates security officers to the shifts of the organizations they guard over a 30-day period.
//! Begin by describing the problem with a [`ProblemBuilder`]: each officer's eligibility per shift type, each organization's
//! daily requirement per shift type, and the minimum and maximum number of shifts any officer works.
//! Build it into a [`ShiftProblem`], then call [`solve()`](crate::ShiftProblem::solve) to get an [`Allocation`] or learn why none exists.
//! For one-off use, [`allocate`] does all of this from plain arrays.
//!
//! # Internals
//! The problem is reduced to maximum flow on a layered network and solved with shortest augmenting paths (Edmonds-Karp).
//!
//! A high level overview is as follows:
//!
//! Vertices stand for a super-source, a circulation source, every officer, every officer on every day, every shift of every
//! organization on every day, and a sink. See [`Node`](layout::Node) for the full list.
//!
//! 1. Officers receive their minimum from the super-source unconditionally; anything beyond the minimum, up to the maximum,
//! comes through the circulation source, which the super-source only feeds with what the minimums leave of the demand.
//! 2. An officer reaches each of their days through an edge of capacity 1, so nobody works twice on one day.
//! 3. A day reaches the shifts of that day the officer is eligible for, and each shift drains into the sink exactly what
//! its organization needs.
//!
//! A flow equal to the total demand fills every shift, and reading which edges carry flow yields the allocation.
//! Anything less proves that no allocation exists.

pub use allocation::{Allocation, Assignment, Violation};
pub use builder::{BuilderInvalidReason, ProblemBuilder};
pub use problem::{ShiftNetwork, ShiftProblem};
pub use shift::{Day, Shift, ShiftQuota, DAYS};
pub use solver::{allocate, SolverFailure};

pub mod allocation;
pub mod builder;
pub mod layout;
pub mod maxflow;
pub mod network;
pub(crate) mod problem;
pub mod residual;
pub(crate) mod shift;
pub(crate) mod solver;
mod tests;
