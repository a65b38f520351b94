use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::{Array4, Axis};
use serde::{Deserialize, Serialize};
use strum::{EnumCount, VariantArray};
use thiserror::Error;

use crate::layout::{Node, OfficerId, OrganizationId};
use crate::problem::{ShiftNetwork, ShiftProblem};
use crate::shift::{Day, Shift, DAYS};

/// One officer working one shift for one organization.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Assignment {
    pub officer: OfficerId,
    pub organization: OrganizationId,
    pub day: Day,
    pub shift: Shift,
}

/// A complete allocation, indexed `[officer][organization][day][shift]` with 1 marking an assignment.
///
/// Only ever produced from a network whose flow meets all demand, so every organization's daily
/// requirement is exactly covered.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    assigned: Array4<u8>,
}

/// A way in which an [`Allocation`] fails its [`ShiftProblem`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    #[error("allocation has shape {found:?}, expected {expected:?}")]
    Shape { expected: [usize; 4], found: [usize; 4] },
    #[error("officer {officer} works {shifts} shifts on day {day}")]
    DoubleBooked { officer: OfficerId, day: Day, shifts: usize },
    #[error("organization {organization} has {assigned} officers on day {day} {shift} shift, needs {required}")]
    Staffing { organization: OrganizationId, day: Day, shift: Shift, assigned: usize, required: usize },
    #[error("officer {officer} works {worked} shifts, allowed {min_shifts} to {max_shifts}")]
    Bounds { officer: OfficerId, worked: usize, min_shifts: usize, max_shifts: usize },
    #[error("officer {} is not eligible for {} shifts", .0.officer, .0.shift)]
    Ineligible(Assignment),
}

impl Allocation {
    /// Read the allocation off a solved network.
    ///
    /// Returns `None` unless the network's flow meets all demand; a short flow never yields a partial allocation.
    /// Reading does not change the network, so decoding twice gives the same allocation.
    pub fn decode(network: &ShiftNetwork) -> Option<Self> {
        if !network.is_certified() {
            return None;
        }

        let flow = network.flow_network();
        let table = network.table();
        let mut assigned = Array4::zeros((network.officers(), network.organizations(), DAYS, Shift::COUNT));

        for officer in 0..network.officers() {
            let working_days = flow.outgoing(table[Node::Officer { officer }])
                .filter(|(_, _, edge)| edge.flow() > 0)
                .map(|(_, officer_day, _)| officer_day);

            for officer_day in working_days {
                let posts = flow.outgoing(officer_day)
                    .filter(|(_, _, edge)| edge.flow() > 0)
                    .filter_map(|(_, post, _)| table.node(post));

                for post in posts {
                    if let Node::PostShift { organization, shift, day } = post {
                        assigned[[officer, organization, day, shift.index()]] = 1;
                    }
                }
            }
        }

        Some(Self { assigned })
    }

    pub fn officers(&self) -> usize {
        self.assigned.len_of(Axis(0))
    }

    pub fn organizations(&self) -> usize {
        self.assigned.len_of(Axis(1))
    }

    /// Panics if any index is out of range.
    pub fn is_assigned(&self, officer: OfficerId, organization: OrganizationId, day: Day, shift: Shift) -> bool {
        self.assigned[[officer, organization, day, shift.index()]] == 1
    }

    /// Shifts `officer` works over the whole period.
    pub fn shifts_worked(&self, officer: OfficerId) -> usize {
        self.assigned.index_axis(Axis(0), officer).iter().map(|v| *v as usize).sum()
    }

    /// Shifts `officer` works on `day`; at most 1 for a decoded allocation.
    pub fn shifts_on(&self, officer: OfficerId, day: Day) -> usize {
        (0..self.organizations())
            .cartesian_product(Shift::VARIANTS)
            .filter(|(organization, shift)| self.is_assigned(officer, *organization, day, **shift))
            .count()
    }

    /// Officers working `organization`'s `shift` on `day`.
    pub fn staffed(&self, organization: OrganizationId, day: Day, shift: Shift) -> usize {
        (0..self.officers())
            .filter(|officer| self.is_assigned(*officer, organization, day, shift))
            .count()
    }

    /// Every assignment, ordered by officer, organization, day, then shift.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.assigned.indexed_iter()
            .filter(|(_, v)| **v == 1)
            .filter_map(|((officer, organization, day, shift), _)| Some(Assignment {
                officer,
                organization,
                day,
                shift: Shift::from_index(shift)?,
            }))
    }

    /// The officer working `organization`'s `shift` on `day`, when exactly one does.
    pub fn officer_on(&self, organization: OrganizationId, day: Day, shift: Shift) -> Option<OfficerId> {
        (0..self.officers())
            .filter(|officer| self.is_assigned(*officer, organization, day, shift))
            .exactly_one()
            .ok()
    }

    pub fn as_array(&self) -> &Array4<u8> {
        &self.assigned
    }

    pub fn into_array(self) -> Array4<u8> {
        self.assigned
    }

    /// Check this allocation against every rule of `problem`, collecting all violations.
    pub fn verify(&self, problem: &ShiftProblem) -> Result<(), Vec<Violation>> {
        let expected = [problem.officers(), problem.organizations(), DAYS, Shift::COUNT];
        let found = <[usize; 4]>::try_from(self.assigned.shape()).unwrap_or_default();
        if found != expected {
            return Err(vec![Violation::Shape { expected, found }]);
        }

        let mut violations = Vec::new();

        for officer in 0..problem.officers() {
            for day in 0..DAYS {
                let shifts = self.shifts_on(officer, day);
                if shifts > 1 {
                    violations.push(Violation::DoubleBooked { officer, day, shifts });
                }
            }

            let worked = self.shifts_worked(officer);
            if !(problem.min_shifts()..=problem.max_shifts()).contains(&worked) {
                violations.push(Violation::Bounds {
                    officer,
                    worked,
                    min_shifts: problem.min_shifts(),
                    max_shifts: problem.max_shifts(),
                });
            }
        }

        for (organization, needed) in problem.demand().iter().enumerate() {
            for day in 0..DAYS {
                for (shift, required) in needed.iter() {
                    let assigned = self.staffed(organization, day, shift);
                    if assigned != required {
                        violations.push(Violation::Staffing { organization, day, shift, assigned, required });
                    }
                }
            }
        }

        violations.extend(self.assignments()
            .filter(|a| problem.preferences()[a.officer][a.shift] == 0)
            .map(Violation::Ineligible));

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl Display for Allocation {
    /// One line per officer and one cell per day: `.` for a day off, otherwise the organization and shift code.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for officer in 0..self.officers() {
            let days = (0..DAYS).map(|day| {
                (0..self.organizations())
                    .cartesian_product(Shift::VARIANTS)
                    .find(|(organization, shift)| self.is_assigned(officer, *organization, day, **shift))
                    .map_or_else(|| ".".to_string(), |(organization, shift)| format!("{organization}{shift}"))
            });
            writeln!(f, "{officer}: {}", days.format(" "))?;
        }

        Ok(())
    }
}
