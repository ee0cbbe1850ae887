use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;

/// [`ValueSelector`] which tries the values of the decision variable in decreasing order.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl ValueSelector for InDomainMax {
    fn select_value(
        &mut self,
        _context: &mut SelectionContext,
        _decision_variable: DomainId,
        candidates: &IntervalDomain,
    ) -> i32 {
        candidates.upper_bound()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::random::tests::TestRandom;

    #[test]
    fn largest_candidate_is_selected() {
        let (store, variables) = SelectionContext::create_for_testing(&[(0, 10)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);
        let candidates = IntervalDomain::from_values([4, 7, 9]).unwrap();

        assert_eq!(
            9,
            InDomainMax.select_value(&mut context, variables[0], &candidates)
        );
    }
}
