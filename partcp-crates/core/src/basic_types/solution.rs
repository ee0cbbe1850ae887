use std::fmt::Display;
use std::fmt::Formatter;

use crate::engine::DomainId;

/// The value one variable takes in a [`Solution`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SolutionEntry {
    variable: DomainId,
    name: String,
    value: i32,
}

impl SolutionEntry {
    pub(crate) fn new(variable: DomainId, name: String, value: i32) -> Self {
        SolutionEntry {
            variable,
            name,
            value,
        }
    }

    pub fn variable(&self) -> DomainId {
        self.variable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

/// An assignment of the search variables, in the order in which they were given to the search.
///
/// A solution is an owned copy; it stays valid after the store moved on or was restored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Solution {
    entries: Vec<SolutionEntry>,
}

impl Solution {
    pub(crate) fn new(entries: Vec<SolutionEntry>) -> Self {
        Solution { entries }
    }

    pub fn get_integer_value(&self, var: DomainId) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.variable == var)
            .map(SolutionEntry::value)
    }

    /// The value of the variable declared with `name`.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(SolutionEntry::value)
    }

    /// The values of the search variables in order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(SolutionEntry::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SolutionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", entry.name, entry.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Store;

    #[test]
    fn values_are_found_by_handle_and_name() {
        let mut store = Store::default();
        let x = store.new_named_bounded_integer(0, 5, "x").unwrap();
        let y = store.new_named_bounded_integer(0, 5, "y").unwrap();
        let z = store.new_bounded_integer(0, 5).unwrap();

        let solution = Solution::new(vec![
            SolutionEntry::new(x, "x".to_owned(), 3),
            SolutionEntry::new(y, "y".to_owned(), 1),
        ]);

        assert_eq!(Some(3), solution.get_integer_value(x));
        assert_eq!(Some(1), solution.value_of("y"));
        assert_eq!(None, solution.get_integer_value(z));
        assert_eq!(vec![3, 1], solution.values().collect::<Vec<_>>());
        assert_eq!("x=3, y=1", solution.to_string());
    }
}
