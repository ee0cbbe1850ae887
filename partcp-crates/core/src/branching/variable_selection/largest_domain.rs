use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`VariableSelector`] which selects the unfixed variable with the most values in its domain.
/// Ties are broken in favour of the variable which comes first.
#[derive(Clone, Copy, Debug, Default)]
pub struct LargestDomain;

impl VariableSelector for LargestDomain {
    fn select_variable(
        &mut self,
        context: &mut SelectionContext,
        variables: &[DomainId],
    ) -> Option<DomainId> {
        let mut tie_breaker = InOrderTieBreaker::new(Direction::Maximum);
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
    fn largest_domain_is_selected() {
        let (mut store, variables) =
            SelectionContext::create_for_testing(&[(0, 3), (0, 10), (5, 10)]);
        let mut test_rng = TestRandom::default();

        {
            let mut context = SelectionContext::new(&store, &mut test_rng);
            assert_eq!(
                Some(variables[1]),
                LargestDomain.select_variable(&mut context, &variables)
            );
        }

        store.set_upper_bound(variables[1], 4).unwrap();
        let mut context = SelectionContext::new(&store, &mut test_rng);
        assert_eq!(
            Some(variables[2]),
            LargestDomain.select_variable(&mut context, &variables)
        );
    }

    #[test]
    fn ties_go_to_the_first_variable() {
        let (store, variables) = SelectionContext::create_for_testing(&[(0, 3), (4, 7), (1, 4)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);

        assert_eq!(
            Some(variables[0]),
            LargestDomain.select_variable(&mut context, &variables)
        );
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let (store, variables) = SelectionContext::create_for_testing(&[(10, 10), (20, 20)]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(&store, &mut test_rng);

        assert_eq!(None, LargestDomain.select_variable(&mut context, &variables));
    }
}
