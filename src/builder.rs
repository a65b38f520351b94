use strum::EnumCount;
use thiserror::Error;

use crate::problem::ShiftProblem;
use crate::shift::{Shift, ShiftQuota, DAYS};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// The per-officer minimum exceeds the maximum, leaving no room for the optional quota.
    #[error("minimum of {min_shifts} shifts exceeds maximum of {max_shifts}")]
    BoundsInverted { min_shifts: usize, max_shifts: usize },
}

/// Collects officers, organizations and shift bounds for a [`ShiftProblem`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Officers and organizations are numbered in the order they are added, starting from 0.
///
/// ```
/// use shiftflow::ProblemBuilder;
///
/// let problem = ProblemBuilder::default()
///     .with_bounds(10, 20)
///     .add_officer([1, 1, 0])
///     .add_officer([0, 1, 1])
///     .add_organization([0, 1, 0])
///     .build()
///     .unwrap();
///
/// assert_eq!(problem.officers(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ProblemBuilder {
    preferences: Vec<ShiftQuota>,
    demand: Vec<ShiftQuota>,
    min_shifts: usize,
    max_shifts: usize,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for ProblemBuilder {
    /// No officers, no organizations, and bounds that allow anything from 0 to every day of the period.
    fn default() -> Self {
        Self {
            preferences: Default::default(),
            demand: Default::default(),
            min_shifts: 0,
            max_shifts: DAYS,
            invalid_reasons: Default::default(),
        }
    }
}

impl ProblemBuilder {
    /// Set how many shifts each officer must and may work over the period.
    ///
    /// May cause the builder to enter a [`BoundsInverted`](BuilderInvalidReason::BoundsInverted) invalid state
    /// if `min_shifts > max_shifts`.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn with_bounds(&mut self, min_shifts: usize, max_shifts: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if min_shifts > max_shifts {
            self.invalid_reasons.push(BuilderInvalidReason::BoundsInverted { min_shifts, max_shifts });
            return self;
        }

        self.min_shifts = min_shifts;
        self.max_shifts = max_shifts;
        self
    }

    /// Add an officer willing to work the shift types with nonzero `eligibility`.
    ///
    /// If the builder is in an invalid state, this function does nothing.
    pub fn add_officer(&mut self, eligibility: [usize; Shift::COUNT]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.preferences.push(ShiftQuota::from(eligibility));
        self
    }

    /// Remove the most recently added officer.
    ///
    /// If the builder is in an invalid state or no officers are present, this function does nothing.
    pub fn pop_officer(&mut self) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.preferences.pop();
        }
        self
    }

    /// Add an organization needing `demand` officers per shift type on every day of the period.
    ///
    /// If the builder is in an invalid state, this function does nothing.
    pub fn add_organization(&mut self, demand: [usize; Shift::COUNT]) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.demand.push(ShiftQuota::from(demand));
        self
    }

    /// Remove the most recently added organization.
    ///
    /// If the builder is in an invalid state or no organizations are present, this function does nothing.
    pub fn pop_organization(&mut self) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.demand.pop();
        }
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`ShiftProblem`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<ShiftProblem, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(ShiftProblem::new(
            self.preferences.clone(),
            self.demand.clone(),
            self.min_shifts,
            self.max_shifts,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_invalidate() {
        let mut builder = ProblemBuilder::default();
        builder.add_officer([1, 1, 1]).with_bounds(5, 4);

        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::BoundsInverted { min_shifts: 5, max_shifts: 4 }]));
        assert!(builder.build().is_err());

        // further changes are ignored once invalid
        builder.with_bounds(1, 2).add_organization([1, 0, 0]);
        assert_eq!(builder.is_valid().map(Vec::len), Some(1));
    }

    #[test]
    fn pops_remove_latest() {
        let problem = ProblemBuilder::default()
            .add_officer([1, 0, 0])
            .add_officer([0, 0, 1])
            .pop_officer()
            .add_organization([2, 0, 0])
            .add_organization([0, 3, 0])
            .pop_organization()
            .build()
            .unwrap();

        assert_eq!(problem.preferences(), &[ShiftQuota([1, 0, 0])]);
        assert_eq!(problem.demand(), &[ShiftQuota([2, 0, 0])]);
        assert_eq!((problem.min_shifts(), problem.max_shifts()), (0, DAYS));
    }
}
