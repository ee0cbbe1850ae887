use crate::basic_types::Random;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;
use crate::engine::Store;

/// The context provided to the selectors of a search; it allows the retrieval of the domains of
/// variables and access to a [`Random`] generator.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    store: &'a Store,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub fn new(store: &'a Store, random_generator: &'a mut dyn Random) -> Self {
        SelectionContext {
            store,
            random_generator,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    pub fn domain(&self, var: DomainId) -> &IntervalDomain {
        self.store.domain(var)
    }

    /// Returns the number of values in the domain of `var`, holes excluded.
    pub fn size_of_domain(&self, var: DomainId) -> u64 {
        self.store.size(var)
    }

    pub fn lower_bound(&self, var: DomainId) -> i32 {
        self.store.lower_bound(var)
    }

    pub fn upper_bound(&self, var: DomainId) -> i32 {
        self.store.upper_bound(var)
    }

    pub fn contains(&self, var: DomainId, value: i32) -> bool {
        self.store.domain(var).contains(value)
    }

    /// Determines whether the domain of `var` is a singleton.
    pub fn is_integer_fixed(&self, var: DomainId) -> bool {
        self.store.is_fixed(var)
    }

    /// The number of constraints imposed on `var`.
    pub fn num_constraints_on(&self, var: DomainId) -> usize {
        self.store.num_constraints_on(var)
    }

    /// Creates a store with an anonymous variable for each of the provided bounds.
    #[cfg(test)]
    pub(crate) fn create_for_testing(domains: &[(i32, i32)]) -> (Store, Vec<DomainId>) {
        let mut store = Store::default();
        let variables = domains
            .iter()
            .map(|&(lower_bound, upper_bound)| {
                store
                    .new_bounded_integer(lower_bound, upper_bound)
                    .expect("valid bounds")
            })
            .collect();
        (store, variables)
    }
}
