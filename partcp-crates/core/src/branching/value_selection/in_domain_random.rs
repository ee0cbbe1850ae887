use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;
use crate::partcp_assert_simple;

/// [`ValueSelector`] which picks a uniformly random value among the untried values of the
/// decision variable.
#[derive(Debug, Copy, Clone)]
pub struct InDomainRandom;

impl ValueSelector for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        _decision_variable: DomainId,
        candidates: &IntervalDomain,
    ) -> i32 {
        let index = context
            .random()
            .generate_usize_in_range(0..candidates.size() as usize);
        let value = candidates.nth(index as u64);

        partcp_assert_simple!(value.is_some(), "the candidates are never empty");
        value.unwrap_or_else(|| candidates.lower_bound())
    }
}
