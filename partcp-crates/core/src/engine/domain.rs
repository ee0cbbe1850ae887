use std::fmt::Display;
use std::fmt::Formatter;

use crate::basic_types::ModelError;
use crate::partcp_assert_moderate;

/// Returned by domain operations when the domain is (or became) empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The result of mutating an [`IntervalDomain`]: `Ok(true)` if values were removed, `Ok(false)`
/// if nothing changed and `Err(EmptyDomain)` if the domain is empty afterwards.
pub type DomainUpdate = Result<bool, EmptyDomain>;

/// A closed interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Interval {
    min: i32,
    max: i32,
}

impl Interval {
    fn size(&self) -> u64 {
        (i64::from(self.max) - i64::from(self.min) + 1) as u64
    }
}

/// A finite set of integers stored as a sorted list of disjoint, non-adjacent closed intervals.
///
/// The empty list is the canonical empty domain. Once a domain is empty every mutation reports
/// [`EmptyDomain`]. Apart from [`IntervalDomain::union_with`], which is only used while building
/// a model, no operation adds values to a domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntervalDomain {
    intervals: Vec<Interval>,
}

impl IntervalDomain {
    /// Creates the domain `[lower_bound, upper_bound]`.
    pub fn new(lower_bound: i32, upper_bound: i32) -> Result<IntervalDomain, ModelError> {
        if lower_bound > upper_bound {
            return Err(ModelError::InvalidBounds {
                lower_bound,
                upper_bound,
            });
        }

        Ok(IntervalDomain {
            intervals: vec![Interval {
                min: lower_bound,
                max: upper_bound,
            }],
        })
    }

    /// Creates the domain containing exactly the given values. Duplicates are ignored.
    pub fn from_values(
        values: impl IntoIterator<Item = i32>,
    ) -> Result<IntervalDomain, ModelError> {
        let mut values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return Err(ModelError::EmptyValueSet);
        }
        values.sort_unstable();

        let mut domain = IntervalDomain::empty();
        for value in values {
            match domain.intervals.last_mut() {
                Some(last) if i64::from(value) <= i64::from(last.max) + 1 => {
                    last.max = last.max.max(value);
                }
                _ => domain.intervals.push(Interval {
                    min: value,
                    max: value,
                }),
            }
        }

        Ok(domain)
    }

    pub fn singleton(value: i32) -> IntervalDomain {
        IntervalDomain {
            intervals: vec![Interval {
                min: value,
                max: value,
            }],
        }
    }

    pub fn empty() -> IntervalDomain {
        IntervalDomain { intervals: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.intervals.len() == 1 && self.intervals[0].min == self.intervals[0].max
    }

    /// The value of a singleton domain.
    pub fn fixed_value(&self) -> Option<i32> {
        self.is_singleton().then(|| self.intervals[0].min)
    }

    pub fn min(&self) -> Option<i32> {
        self.intervals.first().map(|interval| interval.min)
    }

    pub fn max(&self) -> Option<i32> {
        self.intervals.last().map(|interval| interval.max)
    }

    /// The smallest value in the domain, or [`i32::MAX`] if the domain is empty.
    pub fn lower_bound(&self) -> i32 {
        self.min().unwrap_or(i32::MAX)
    }

    /// The largest value in the domain, or [`i32::MIN`] if the domain is empty.
    pub fn upper_bound(&self) -> i32 {
        self.max().unwrap_or(i32::MIN)
    }

    /// The number of values in the domain.
    pub fn size(&self) -> u64 {
        self.intervals.iter().map(Interval::size).sum()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.position_of(value).is_ok()
    }

    /// The values in the domain in increasing order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.intervals
            .iter()
            .flat_map(|interval| interval.min..=interval.max)
    }

    /// The intervals of the domain as `(min, max)` pairs in increasing order.
    pub fn intervals(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.intervals
            .iter()
            .map(|interval| (interval.min, interval.max))
    }

    /// The `index`-th smallest value of the domain (starting at 0).
    pub fn nth(&self, mut index: u64) -> Option<i32> {
        for interval in &self.intervals {
            if index < interval.size() {
                return Some((i64::from(interval.min) + index as i64) as i32);
            }
            index -= interval.size();
        }
        None
    }

    /// Whether the two domains have at least one value in common.
    pub fn intersects(&self, other: &IntervalDomain) -> bool {
        let mut left = self.intervals.iter().peekable();
        let mut right = other.intervals.iter().peekable();

        while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
            if a.max < b.min {
                let _ = left.next();
            } else if b.max < a.min {
                let _ = right.next();
            } else {
                return true;
            }
        }

        false
    }

    /// The domain `{ v + offset | v in self }`. Values which would overflow are saturated.
    pub fn shifted(&self, offset: i32) -> IntervalDomain {
        let mut shifted = IntervalDomain {
            intervals: self
                .intervals
                .iter()
                .map(|interval| Interval {
                    min: interval.min.saturating_add(offset),
                    max: interval.max.saturating_add(offset),
                })
                .collect(),
        };
        shifted.normalise();
        shifted
    }

    pub fn remove_value(&mut self, value: i32) -> DomainUpdate {
        if self.is_empty() {
            return Err(EmptyDomain);
        }

        let Ok(position) = self.position_of(value) else {
            return Ok(false);
        };

        let interval = self.intervals[position];
        if interval.min == interval.max {
            let _ = self.intervals.remove(position);
        } else if value == interval.min {
            self.intervals[position].min += 1;
        } else if value == interval.max {
            self.intervals[position].max -= 1;
        } else {
            self.intervals[position].max = value - 1;
            self.intervals.insert(
                position + 1,
                Interval {
                    min: value + 1,
                    max: interval.max,
                },
            );
        }

        self.report_change()
    }

    /// Removes every value smaller than `value`.
    pub fn remove_below(&mut self, value: i32) -> DomainUpdate {
        if self.is_empty() {
            return Err(EmptyDomain);
        }
        if value <= self.lower_bound() {
            return Ok(false);
        }

        self.intervals.retain(|interval| interval.max >= value);
        if let Some(first) = self.intervals.first_mut() {
            first.min = first.min.max(value);
        }

        self.report_change()
    }

    /// Removes every value larger than `value`.
    pub fn remove_above(&mut self, value: i32) -> DomainUpdate {
        if self.is_empty() {
            return Err(EmptyDomain);
        }
        if value >= self.upper_bound() {
            return Ok(false);
        }

        self.intervals.retain(|interval| interval.min <= value);
        if let Some(last) = self.intervals.last_mut() {
            last.max = last.max.min(value);
        }

        self.report_change()
    }

    /// Removes every value which is not in `other`.
    pub fn intersect_with(&mut self, other: &IntervalDomain) -> DomainUpdate {
        if self.is_empty() {
            return Err(EmptyDomain);
        }

        let mut intersection = Vec::with_capacity(self.intervals.len());
        let (mut i, mut j) = (0, 0);
        while i < self.intervals.len() && j < other.intervals.len() {
            let a = self.intervals[i];
            let b = other.intervals[j];

            let min = a.min.max(b.min);
            let max = a.max.min(b.max);
            if min <= max {
                intersection.push(Interval { min, max });
            }

            if a.max < b.max {
                i += 1;
            } else {
                j += 1;
            }
        }

        if intersection == self.intervals {
            return Ok(false);
        }

        self.intervals = intersection;
        self.report_change()
    }

    /// Adds every value of `other` to the domain and returns whether the domain grew.
    ///
    /// This is the only operation which adds values; it exists for declaring sparse domains
    /// incrementally while a model is built.
    pub fn union_with(&mut self, other: &IntervalDomain) -> bool {
        let size_before = self.size();
        self.intervals.extend(other.intervals.iter().copied());
        self.normalise();
        self.size() != size_before
    }

    fn position_of(&self, value: i32) -> Result<usize, usize> {
        self.intervals.binary_search_by(|interval| {
            if interval.max < value {
                std::cmp::Ordering::Less
            } else if interval.min > value {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
    }

    fn report_change(&self) -> DomainUpdate {
        partcp_assert_moderate!(self.is_normalised());

        if self.is_empty() {
            Err(EmptyDomain)
        } else {
            Ok(true)
        }
    }

    /// Sorts the intervals and merges overlapping or adjacent ones.
    fn normalise(&mut self) {
        self.intervals.sort_unstable_by_key(|interval| interval.min);

        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for interval in self.intervals.drain(..) {
            match merged.last_mut() {
                Some(last) if i64::from(interval.min) <= i64::from(last.max) + 1 => {
                    last.max = last.max.max(interval.max);
                }
                _ => merged.push(interval),
            }
        }
        self.intervals = merged;
    }

    fn is_normalised(&self) -> bool {
        self.intervals.iter().all(|interval| interval.min <= interval.max)
            && self
                .intervals
                .windows(2)
                .all(|pair| i64::from(pair[0].max) + 1 < i64::from(pair[1].min))
    }
}

impl Display for IntervalDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(value) = self.fixed_value() {
            return write!(f, "{value}");
        }

        write!(f, "{{")?;
        for (index, interval) in self.intervals.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if interval.min == interval.max {
                write!(f, "{}", interval.min)?;
            } else {
                write!(f, "{}..{}", interval.min, interval.max)?;
            }
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(values: &[i32]) -> IntervalDomain {
        IntervalDomain::from_values(values.iter().copied()).unwrap()
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_eq!(
            Err(ModelError::InvalidBounds {
                lower_bound: 5,
                upper_bound: 2
            }),
            IntervalDomain::new(5, 2)
        );
        assert_eq!(
            Err(ModelError::EmptyValueSet),
            IntervalDomain::from_values([])
        );
    }

    #[test]
    fn values_are_merged_into_intervals() {
        let domain = domain(&[5, 1, 2, 3, 9, 2]);

        assert_eq!(vec![(1, 3), (5, 5), (9, 9)], domain.intervals().collect::<Vec<_>>());
        assert_eq!(5, domain.size());
        assert_eq!(Some(1), domain.min());
        assert_eq!(Some(9), domain.max());
        assert!(domain.contains(5));
        assert!(!domain.contains(4));
    }

    #[test]
    fn removing_a_value_splits_an_interval() {
        let mut domain = IntervalDomain::new(1, 5).unwrap();

        assert_eq!(Ok(true), domain.remove_value(3));
        assert_eq!(vec![1, 2, 4, 5], domain.values().collect::<Vec<_>>());
        assert_eq!(Ok(false), domain.remove_value(3));
        assert_eq!(Ok(false), domain.remove_value(10));
    }

    #[test]
    fn remove_value_is_idempotent() {
        for value in 0..=6 {
            let mut once = domain(&[1, 2, 3, 5]);
            let _ = once.remove_value(value);
            let mut twice = once.clone();
            let _ = twice.remove_value(value);

            assert_eq!(once, twice);
        }
    }

    #[test]
    fn emptied_domain_keeps_reporting_failure() {
        let mut domain = IntervalDomain::singleton(4);

        assert_eq!(Err(EmptyDomain), domain.remove_value(4));
        assert!(domain.is_empty());
        assert_eq!(Err(EmptyDomain), domain.remove_value(4));
        assert_eq!(Err(EmptyDomain), domain.remove_below(0));
        assert_eq!(Err(EmptyDomain), domain.remove_above(10));
        assert_eq!(
            Err(EmptyDomain),
            domain.intersect_with(&IntervalDomain::new(0, 10).unwrap())
        );
    }

    #[test]
    fn bounds_are_tightened_across_holes() {
        let mut domain = domain(&[1, 2, 5, 6, 9]);

        assert_eq!(Ok(true), domain.remove_below(3));
        assert_eq!(Some(5), domain.min());
        assert_eq!(Ok(false), domain.remove_below(5));

        assert_eq!(Ok(true), domain.remove_above(8));
        assert_eq!(vec![5, 6], domain.values().collect::<Vec<_>>());

        assert_eq!(Err(EmptyDomain), domain.remove_above(4));
    }

    #[test]
    fn intersection_keeps_common_values_only() {
        let mut domain = domain(&[1, 2, 3, 7, 8, 9]);
        let other = domain_from_ranges(&[(0, 1), (3, 7), (9, 12)]);

        assert_eq!(Ok(true), domain.intersect_with(&other));
        assert_eq!(vec![1, 3, 7, 9], domain.values().collect::<Vec<_>>());
        assert_eq!(Ok(false), domain.intersect_with(&other));
        assert_eq!(
            Err(EmptyDomain),
            domain.intersect_with(&IntervalDomain::singleton(2))
        );
    }

    #[test]
    fn intersects_detects_shared_values() {
        let domain = domain(&[1, 2, 8]);

        assert!(domain.intersects(&IntervalDomain::new(5, 8).unwrap()));
        assert!(!domain.intersects(&IntervalDomain::new(3, 7).unwrap()));
        assert!(!domain.intersects(&IntervalDomain::empty()));
    }

    #[test]
    fn shifted_moves_every_value() {
        let domain = domain(&[1, 2, 5]);

        assert_eq!(vec![101, 102, 105], domain.shifted(100).values().collect::<Vec<_>>());
        assert_eq!(vec![-1, 0, 3], domain.shifted(-2).values().collect::<Vec<_>>());
    }

    #[test]
    fn nth_walks_over_holes() {
        let domain = domain(&[1, 2, 5, 9]);

        assert_eq!(Some(1), domain.nth(0));
        assert_eq!(Some(5), domain.nth(2));
        assert_eq!(Some(9), domain.nth(3));
        assert_eq!(None, domain.nth(4));
    }

    #[test]
    fn union_merges_adjacent_values() {
        let mut domain = IntervalDomain::singleton(100);

        assert!(domain.union_with(&IntervalDomain::singleton(200)));
        assert!(domain.union_with(&IntervalDomain::singleton(101)));
        assert!(!domain.union_with(&IntervalDomain::singleton(200)));

        assert_eq!(vec![(100, 101), (200, 200)], domain.intervals().collect::<Vec<_>>());
    }

    #[test]
    fn display_lists_intervals() {
        assert_eq!("{1..3, 7}", domain(&[1, 2, 3, 7]).to_string());
        assert_eq!("5", IntervalDomain::singleton(5).to_string());
        assert_eq!("{}", IntervalDomain::empty().to_string());
    }

    fn domain_from_ranges(ranges: &[(i32, i32)]) -> IntervalDomain {
        let mut domain = IntervalDomain::empty();
        for &(min, max) in ranges {
            let _ = domain.union_with(&IntervalDomain::new(min, max).unwrap());
        }
        domain
    }
}
