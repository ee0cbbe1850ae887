use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::SearchSummary;
use super::SolutionIterator;
use super::SolutionListener;
use crate::basic_types::ModelError;
use crate::basic_types::Random;
use crate::basic_types::Solution;
use crate::branching::value_selection::ValueSelectionStrategy;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelectionStrategy;
use crate::branching::variable_selection::VariableSelector;
use crate::engine::DomainId;
use crate::engine::Store;
use crate::termination::TerminationCondition;

const DEFAULT_SEED: u64 = 42;

/// A backtracking search which labels the variables of its scope one at a time.
///
/// At every node the variable selector picks an unfixed scope variable, after which the values of
/// that variable are tried in the order given by the value selector. Every value is tried exactly
/// once per choice point, so the search enumerates each solution exactly once.
///
/// By default the search stops after the first solution; see
/// [`DepthFirstSearch::with_all_solutions`].
///
/// # Example
/// ```
/// # use partcp_core::constraints;
/// # use partcp_core::branching::value_selection::ValueSelectionStrategy;
/// # use partcp_core::branching::variable_selection::VariableSelectionStrategy;
/// # use partcp_core::search::DepthFirstSearch;
/// # use partcp_core::search::RecordingListener;
/// # use partcp_core::termination::Indefinite;
/// # use partcp_core::Store;
/// let mut store = Store::default();
/// let x = store.new_named_bounded_integer(1, 3, "x").unwrap();
/// let y = store.new_named_bounded_integer(1, 3, "y").unwrap();
/// let _ = store.impose(constraints::less_than(x, y)).unwrap();
///
/// let mut listener = RecordingListener::new();
/// let summary = DepthFirstSearch::with_strategies(
///     [x, y],
///     VariableSelectionStrategy::LargestDomain,
///     ValueSelectionStrategy::InDomainMin,
/// )
/// .with_all_solutions(true)
/// .labeling(&mut store, &mut Indefinite, &mut listener)
/// .unwrap();
///
/// assert_eq!(3, summary.num_solutions());
/// assert!(summary.is_complete());
/// assert_eq!("x=1, y=2", listener.solutions()[0].to_string());
/// ```
#[derive(Debug)]
pub struct DepthFirstSearch<
    VarSel = Box<dyn VariableSelector>,
    ValSel = Box<dyn ValueSelector>,
> {
    pub(super) scope: Box<[DomainId]>,
    pub(super) variable_selector: VarSel,
    pub(super) value_selector: ValSel,
    pub(super) all_solutions: bool,
    pub(super) solution_limit: Option<u64>,
    pub(super) random: Box<dyn Random>,
}

impl DepthFirstSearch {
    /// Creates a search with the selectors corresponding to the given strategies.
    pub fn with_strategies(
        scope: impl Into<Box<[DomainId]>>,
        variable_selection: VariableSelectionStrategy,
        value_selection: ValueSelectionStrategy,
    ) -> DepthFirstSearch {
        DepthFirstSearch::new(scope, variable_selection.create(), value_selection.create())
    }
}

impl<VarSel: VariableSelector, ValSel: ValueSelector> DepthFirstSearch<VarSel, ValSel> {
    pub fn new(
        scope: impl Into<Box<[DomainId]>>,
        variable_selector: VarSel,
        value_selector: ValSel,
    ) -> Self {
        let scope = scope.into();
        if scope.is_empty() {
            warn!("The search scope is empty, the search reports at most one (empty) solution");
        }

        DepthFirstSearch {
            scope,
            variable_selector,
            value_selector,
            all_solutions: false,
            solution_limit: None,
            random: Box::new(SmallRng::seed_from_u64(DEFAULT_SEED)),
        }
    }

    /// Whether the search continues after a solution has been found.
    pub fn with_all_solutions(mut self, all_solutions: bool) -> Self {
        self.all_solutions = all_solutions;
        self
    }

    /// Stops the search once `solution_limit` solutions have been found.
    pub fn with_solution_limit(mut self, solution_limit: Option<u64>) -> Self {
        self.solution_limit = solution_limit;
        self
    }

    /// Seeds the random generator handed to the selectors.
    pub fn with_random_seed(self, seed: u64) -> Self {
        self.with_random(Box::new(SmallRng::seed_from_u64(seed)))
    }

    pub fn with_random(mut self, random: Box<dyn Random>) -> Self {
        self.random = random;
        self
    }

    pub fn scope(&self) -> &[DomainId] {
        &self.scope
    }

    /// Returns an iterator which lazily searches for the solutions in `store`.
    ///
    /// The store is restored to its current state when the iterator is exhausted or dropped. A
    /// scope variable which belongs to another store is rejected with
    /// [`ModelError::OwnershipMismatch`].
    pub fn solutions<'store, 'termination, T: TerminationCondition>(
        self,
        store: &'store mut Store,
        termination: &'termination mut T,
    ) -> Result<SolutionIterator<'store, 'termination, VarSel, ValSel, T>, ModelError> {
        for &var in self.scope.iter() {
            store.check_ownership(var)?;
        }

        Ok(SolutionIterator::new(self, store, termination))
    }

    /// Runs the search to the end, reporting every solution to `listener`.
    pub fn labeling<T: TerminationCondition>(
        self,
        store: &mut Store,
        termination: &mut T,
        listener: &mut impl SolutionListener,
    ) -> Result<SearchSummary, ModelError> {
        let mut iterator = self.solutions(store, termination)?;
        for solution in iterator.by_ref() {
            listener.on_solution(&solution);
        }

        Ok(iterator.into_summary())
    }

    /// Searches for a single solution.
    pub fn first_solution<T: TerminationCondition>(
        self,
        store: &mut Store,
        termination: &mut T,
    ) -> Result<Option<Solution>, ModelError> {
        let mut iterator = self
            .with_all_solutions(false)
            .with_solution_limit(None)
            .solutions(store, termination)?;
        Ok(iterator.next())
    }
}
