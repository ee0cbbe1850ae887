//! Provides the [`VariableSelector`] trait and the selectors which can be used by a search.

mod input_order;
mod largest_domain;
mod most_constrained;
mod smallest_domain;

use std::fmt::Debug;

pub use input_order::InputOrder;
pub use largest_domain::LargestDomain;
pub use most_constrained::MostConstrained;
pub use smallest_domain::SmallestDomain;

use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// Selects the variable a search branches on next.
pub trait VariableSelector: Debug {
    /// Determines which of the `variables` to branch on next. Should only return [`None`] when
    /// all of the `variables` are fixed.
    fn select_variable(
        &mut self,
        context: &mut SelectionContext,
        variables: &[DomainId],
    ) -> Option<DomainId>;
}

impl VariableSelector for Box<dyn VariableSelector> {
    fn select_variable(
        &mut self,
        context: &mut SelectionContext,
        variables: &[DomainId],
    ) -> Option<DomainId> {
        self.as_mut().select_variable(context, variables)
    }
}

/// The variable selectors which can be chosen by name, for example on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelectionStrategy {
    /// See [`LargestDomain`].
    #[default]
    LargestDomain,
    /// See [`SmallestDomain`].
    SmallestDomain,
    /// See [`MostConstrained`].
    MostConstrained,
    /// See [`InputOrder`].
    InputOrder,
}

impl VariableSelectionStrategy {
    pub fn create(self) -> Box<dyn VariableSelector> {
        match self {
            VariableSelectionStrategy::LargestDomain => Box::new(LargestDomain),
            VariableSelectionStrategy::SmallestDomain => Box::new(SmallestDomain),
            VariableSelectionStrategy::MostConstrained => Box::new(MostConstrained),
            VariableSelectionStrategy::InputOrder => Box::new(InputOrder),
        }
    }
}
