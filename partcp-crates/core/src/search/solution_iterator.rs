//! Contains the structures corresponding to solution iterations.

use std::time::Instant;

use log::debug;
use log::trace;

use super::DepthFirstSearch;
use super::SearchStatistics;
use crate::basic_types::Solution;
use crate::basic_types::SolutionEntry;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;
use crate::engine::Snapshot;
use crate::engine::Store;
use crate::partcp_assert_simple;
use crate::termination::TerminationCondition;

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// The whole search space has been explored.
    Complete,
    /// The search stopped after the requested number of solutions.
    SolutionLimitReached,
    /// The termination condition triggered before the search space was exhausted.
    Terminated,
}

/// The outcome of a finished search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    pub status: SearchStatus,
    pub statistics: SearchStatistics,
}

impl SearchSummary {
    pub fn num_solutions(&self) -> u64 {
        self.statistics.num_solutions
    }

    /// Whether the search proved that there is no solution.
    pub fn is_unsatisfiable(&self) -> bool {
        self.status == SearchStatus::Complete && self.statistics.num_solutions == 0
    }

    /// Whether every solution has been reported.
    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Complete
    }
}

/// Enum which specifies the status of the call to [`SolutionIterator::next_solution`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IteratedSolution {
    /// A new solution was identified.
    Solution(Solution),
    /// No more solutions will be reported.
    Finished,
    /// The search space was exhausted without finding a solution.
    Unsatisfiable,
    /// The termination condition stopped the search.
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    /// The store is at a fixpoint and the next decision variable has to be chosen.
    Selecting,
    /// The top choice point has untried values.
    Branching,
    Propagating,
    /// The last decision failed, or a solution has been reported.
    Backtracking,
    Exhausted,
}

#[derive(Debug)]
struct ChoicePoint {
    variable: DomainId,
    /// The values of `variable` which have not been tried yet.
    remaining: IntervalDomain,
    /// The state of the store before the value which is currently tried was assigned.
    snapshot: Option<Snapshot>,
}

/// A struct which allows the retrieval of the solutions found by a [`DepthFirstSearch`].
///
/// The solutions are found lazily: every call to [`SolutionIterator::next_solution`] resumes the
/// search where the previous call left it. When the search stops, or when the iterator is dropped,
/// the store is restored to the state it had before the search.
#[derive(Debug)]
pub struct SolutionIterator<'store, 'termination, VarSel, ValSel, T> {
    search: DepthFirstSearch<VarSel, ValSel>,
    store: &'store mut Store,
    termination: &'termination mut T,

    stack: Vec<ChoicePoint>,
    state: SearchState,
    root: Option<Snapshot>,

    statistics: SearchStatistics,
    status: Option<SearchStatus>,
    started_at: Instant,
    initial_propagations: u64,
}

impl<'store, 'termination, VarSel, ValSel, T>
    SolutionIterator<'store, 'termination, VarSel, ValSel, T>
where
    VarSel: VariableSelector,
    ValSel: ValueSelector,
    T: TerminationCondition,
{
    pub(super) fn new(
        search: DepthFirstSearch<VarSel, ValSel>,
        store: &'store mut Store,
        termination: &'termination mut T,
    ) -> Self {
        debug!(
            "Starting search over {} variables (all solutions: {}, limit: {:?})",
            search.scope.len(),
            search.all_solutions,
            search.solution_limit
        );

        let root = store.snapshot();
        let initial_propagations = store.num_propagations();

        let mut iterator = SolutionIterator {
            search,
            store,
            termination,
            stack: vec![],
            state: SearchState::Propagating,
            root: Some(root),
            statistics: SearchStatistics::default(),
            status: None,
            started_at: Instant::now(),
            initial_propagations,
        };

        if iterator.is_solution_limit_reached() {
            iterator.finish(SearchStatus::SolutionLimitReached);
        }

        iterator
    }

    /// Resumes the search until the next solution is found or the search stops.
    pub fn next_solution(&mut self) -> IteratedSolution {
        loop {
            match self.state {
                SearchState::Propagating => {
                    self.state = match self.store.propagate_to_fixpoint() {
                        Ok(()) => SearchState::Selecting,
                        Err(inconsistency) => {
                            trace!("Propagation failed: {inconsistency:?}");
                            self.statistics.num_failures += 1;
                            SearchState::Backtracking
                        }
                    };
                }

                SearchState::Selecting => {
                    if self.termination.should_stop() {
                        self.finish(SearchStatus::Terminated);
                        continue;
                    }

                    let mut context =
                        SelectionContext::new(self.store, self.search.random.as_mut());
                    let selected = self
                        .search
                        .variable_selector
                        .select_variable(&mut context, &self.search.scope);

                    match selected {
                        Some(variable) => {
                            self.stack.push(ChoicePoint {
                                variable,
                                remaining: self.store.domain(variable).clone(),
                                snapshot: None,
                            });
                            self.statistics.peak_depth =
                                self.statistics.peak_depth.max(self.stack.len() as u64);
                            self.state = SearchState::Branching;
                        }
                        None if self.has_completion() => {
                            return IteratedSolution::Solution(self.report_solution())
                        }
                        None => {
                            trace!("The variables outside the scope cannot be completed");
                            self.statistics.num_failures += 1;
                            self.state = SearchState::Backtracking;
                        }
                    }
                }

                SearchState::Branching => {
                    if self.termination.should_stop() {
                        self.finish(SearchStatus::Terminated);
                        continue;
                    }
                    self.branch();
                }

                SearchState::Backtracking => self.backtrack(),

                SearchState::Exhausted => return self.final_result(),
            }
        }
    }

    /// Tries the next value of the top choice point.
    fn branch(&mut self) {
        let Some(choice) = self.stack.last_mut() else {
            self.state = SearchState::Backtracking;
            return;
        };
        partcp_assert_simple!(choice.snapshot.is_none());
        partcp_assert_simple!(!choice.remaining.is_empty());

        let mut context = SelectionContext::new(self.store, self.search.random.as_mut());
        let value = self.search.value_selector.select_value(
            &mut context,
            choice.variable,
            &choice.remaining,
        );
        partcp_assert_simple!(
            choice.remaining.contains(value),
            "the value selector returned {value}, which is not a candidate of {}",
            choice.variable
        );

        // The last value leaves the candidates empty, which is reported as an error.
        let _ = choice.remaining.remove_value(value);

        choice.snapshot = Some(self.store.snapshot());
        let variable = choice.variable;

        self.statistics.num_decisions += 1;
        self.termination.decision_has_been_made();
        trace!("Decision {variable} = {value} at depth {}", self.stack.len());

        self.state = match self.store.assign(variable, value) {
            Ok(()) => SearchState::Propagating,
            Err(_) => {
                self.statistics.num_failures += 1;
                SearchState::Backtracking
            }
        };
    }

    /// Undoes the last decision and moves to the next untried value, popping exhausted choice
    /// points.
    fn backtrack(&mut self) {
        while let Some(choice) = self.stack.last_mut() {
            if let Some(snapshot) = choice.snapshot.take() {
                self.store.restore_owned(snapshot);
            }

            if !choice.remaining.is_empty() {
                self.state = SearchState::Branching;
                return;
            }

            let _ = self.stack.pop();
        }

        self.finish(SearchStatus::Complete);
    }

    /// Whether the variables outside the scope can be fixed such that every constraint holds.
    ///
    /// Propagation alone does not decide this, so a fixed scope is only reported once such a
    /// completion has been found. The store is left as it was.
    fn has_completion(&mut self) -> bool {
        let Some(variable) = self
            .store
            .undecided_variables()
            .into_iter()
            .min_by_key(|&var| self.store.size(var))
        else {
            return true;
        };

        let candidates = self.store.domain(variable).clone();
        for value in candidates.values() {
            let snapshot = self.store.snapshot();
            let completed = self.store.assign(variable, value).is_ok()
                && self.store.propagate_to_fixpoint().is_ok()
                && self.has_completion();
            self.store.restore_owned(snapshot);

            if completed {
                return true;
            }
        }

        false
    }

    fn report_solution(&mut self) -> Solution {
        let solution = Solution::new(
            self.search
                .scope
                .iter()
                .map(|&var| {
                    let value = self.store.value(var);
                    partcp_assert_simple!(value.is_some(), "{var} is not fixed in a solution");
                    SolutionEntry::new(
                        var,
                        self.store.name(var).to_owned(),
                        value.unwrap_or_else(|| self.store.lower_bound(var)),
                    )
                })
                .collect(),
        );

        self.statistics.num_solutions += 1;
        debug!("Solution {}: {solution}", self.statistics.num_solutions);

        if !self.search.all_solutions || self.is_solution_limit_reached() {
            self.finish(SearchStatus::SolutionLimitReached);
        } else {
            self.state = SearchState::Backtracking;
        }

        solution
    }

    fn is_solution_limit_reached(&self) -> bool {
        self.search
            .solution_limit
            .is_some_and(|limit| self.statistics.num_solutions >= limit)
    }

    fn finish(&mut self, status: SearchStatus) {
        self.stack.clear();
        if let Some(root) = self.root.take() {
            self.store.restore_owned(root);
        }

        self.statistics.num_propagations =
            self.store.num_propagations() - self.initial_propagations;
        self.statistics.time_spent = self.started_at.elapsed();
        self.status = Some(status);
        self.state = SearchState::Exhausted;

        debug!("Search stopped: {status:?} after {} solutions", self.statistics.num_solutions);
    }

    fn final_result(&self) -> IteratedSolution {
        match self.status {
            Some(SearchStatus::Terminated) => IteratedSolution::Unknown,
            Some(SearchStatus::Complete) if self.statistics.num_solutions == 0 => {
                IteratedSolution::Unsatisfiable
            }
            _ => IteratedSolution::Finished,
        }
    }

    /// The statistics of the search so far.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// The reason the search stopped, [`None`] while it can still find solutions.
    pub fn status(&self) -> Option<SearchStatus> {
        self.status
    }

    /// Summarises the search. A search which has not stopped yet is stopped as if it was
    /// terminated.
    pub fn into_summary(mut self) -> SearchSummary {
        let status = match self.status {
            Some(status) => status,
            None => {
                self.finish(SearchStatus::Terminated);
                SearchStatus::Terminated
            }
        };

        SearchSummary {
            status,
            statistics: self.statistics,
        }
    }
}

impl<VarSel, ValSel, T> Iterator for SolutionIterator<'_, '_, VarSel, ValSel, T>
where
    VarSel: VariableSelector,
    ValSel: ValueSelector,
    T: TerminationCondition,
{
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        match self.next_solution() {
            IteratedSolution::Solution(solution) => Some(solution),
            IteratedSolution::Finished
            | IteratedSolution::Unsatisfiable
            | IteratedSolution::Unknown => None,
        }
    }
}

impl<VarSel, ValSel, T> Drop for SolutionIterator<'_, '_, VarSel, ValSel, T> {
    fn drop(&mut self) {
        self.stack.clear();
        if let Some(root) = self.root.take() {
            self.store.restore_owned(root);
        }
    }
}
