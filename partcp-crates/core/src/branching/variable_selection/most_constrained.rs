use std::cmp::Reverse;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`VariableSelector`] which selects the unfixed variable occurring in the most constraints.
/// Among those, the variable with the smallest domain is preferred; remaining ties are broken in
/// favour of the variable which comes first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostConstrained;

impl VariableSelector for MostConstrained {
    fn select_variable(
        &mut self,
        context: &mut SelectionContext,
        variables: &[DomainId],
    ) -> Option<DomainId> {
        let mut tie_breaker = InOrderTieBreaker::new(Direction::Maximum);
        variables
            .iter()
            .filter(|&&variable| !context.is_integer_fixed(variable))
            .for_each(|&variable| {
                tie_breaker.consider(
                    variable,
                    (
                        context.num_constraints_on(variable),
                        Reverse(context.size_of_domain(variable)),
                    ),
                )
            });
        tie_breaker.select()
    }
}
