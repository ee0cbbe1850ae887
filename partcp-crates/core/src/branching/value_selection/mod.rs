//! Provides the [`ValueSelector`] trait and the selectors which can be used by a search.

mod in_domain_max;
mod in_domain_min;
mod in_domain_random;

use std::fmt::Debug;

pub use in_domain_max::InDomainMax;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;

use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;

/// Selects the value which is assigned to the decision variable of a choice point.
pub trait ValueSelector: Debug {
    /// Selects one of the `candidates`, the values of `decision_variable` which have not been
    /// tried at the current choice point. The candidates are never empty and the returned value
    /// has to be one of them.
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
        candidates: &IntervalDomain,
    ) -> i32;
}

impl ValueSelector for Box<dyn ValueSelector> {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
        candidates: &IntervalDomain,
    ) -> i32 {
        self.as_mut()
            .select_value(context, decision_variable, candidates)
    }
}

/// The value selectors which can be chosen by name, for example on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueSelectionStrategy {
    /// See [`InDomainMin`].
    #[default]
    InDomainMin,
    /// See [`InDomainMax`].
    InDomainMax,
    /// See [`InDomainRandom`].
    InDomainRandom,
}

impl ValueSelectionStrategy {
    pub fn create(self) -> Box<dyn ValueSelector> {
        match self {
            ValueSelectionStrategy::InDomainMin => Box::new(InDomainMin),
            ValueSelectionStrategy::InDomainMax => Box::new(InDomainMax),
            ValueSelectionStrategy::InDomainRandom => Box::new(InDomainRandom),
        }
    }
}
