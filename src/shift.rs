use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{EnumCount, VariantArray};

/// Number of days in one allocation period.
pub const DAYS: usize = 30;

/// Day index within the period, `0..DAYS`.
pub type Day = usize;

/// The three daily shift types, in the fixed order used throughout the network.
#[derive(Copy, Clone, Debug, EnumCount, VariantArray, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    /// Position of this shift within a day, `0..Shift::COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Self::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }

    fn code(self) -> char {
        match self {
            Self::Morning => 'M',
            Self::Afternoon => 'A',
            Self::Night => 'N',
        }
    }
}

impl Display for Shift {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One non-negative count per [`Shift`].
///
/// Used both for an officer's eligibility (units offered per shift type) and for an organization's
/// daily requirement per shift type. Either way it applies uniformly to every day of the period.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ShiftQuota(pub [usize; Shift::COUNT]);

impl ShiftQuota {
    #[inline]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Pairs each shift with its count, in shift order.
    pub fn iter(&self) -> impl Iterator<Item = (Shift, usize)> + '_ {
        Shift::VARIANTS.iter().map(|shift| (*shift, self[*shift]))
    }
}

impl From<[usize; Shift::COUNT]> for ShiftQuota {
    fn from(value: [usize; Shift::COUNT]) -> Self {
        Self(value)
    }
}

impl Index<Shift> for ShiftQuota {
    type Output = usize;

    fn index(&self, shift: Shift) -> &Self::Output {
        &self.0[shift.index()]
    }
}

impl IndexMut<Shift> for ShiftQuota {
    fn index_mut(&mut self, shift: Shift) -> &mut Self::Output {
        &mut self.0[shift.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_order_is_stable() {
        assert_eq!(Shift::COUNT, 3);
        for (i, shift) in Shift::VARIANTS.iter().enumerate() {
            assert_eq!(shift.index(), i);
            assert_eq!(Shift::from_index(i), Some(*shift));
        }
        assert_eq!(Shift::from_index(3), None);
    }

    #[test]
    fn quota_indexing() {
        let mut quota = ShiftQuota([1, 0, 2]);
        assert_eq!(quota[Shift::Night], 2);
        quota[Shift::Afternoon] += 4;
        assert_eq!(quota.total(), 7);
        assert_eq!(quota.iter().map(|(_, n)| n).collect::<Vec<_>>(), vec![1, 4, 2]);
    }
}
