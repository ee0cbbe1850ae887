use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`VariableSelector`] which selects the unfixed variable with the fewest values in its domain
/// (first-fail). Ties are broken in favour of the variable which comes first.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmallestDomain;

impl VariableSelector for SmallestDomain {
    fn select_variable(
        &mut self,
        context: &mut SelectionContext,
        variables: &[DomainId],
    ) -> Option<DomainId> {
        let mut tie_breaker = InOrderTieBreaker::new(Direction::Minimum);
        variables
            .iter()
            .filter(|&&variable| !context.is_integer_fixed(variable))
            .for_each(|&variable| tie_breaker.consider(variable, context.size_of_domain(variable)));
        tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::random::tests::TestRandom;

    #[test]
    fn smallest_unfixed_domain_is_selected() {
        let (store, variables) =
            SelectionContext::create_for_testing(&[(0, 0), (0, 10), (5, 7), (1, 3)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);

        assert_eq!(
            Some(variables[2]),
            SmallestDomain.select_variable(&mut context, &variables)
        );
    }
}
