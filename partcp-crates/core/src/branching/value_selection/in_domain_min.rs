use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;

/// [`ValueSelector`] which tries the values of the decision variable in increasing order.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(
        &mut self,
        _context: &mut SelectionContext,
        _decision_variable: DomainId,
        candidates: &IntervalDomain,
    ) -> i32 {
        candidates.lower_bound()
    }
}
