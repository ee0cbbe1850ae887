use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::DomainId;

/// A [`VariableSelector`] which selects the first unfixed variable in the order in which the
/// variables were provided.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputOrder;

impl VariableSelector for InputOrder {
    fn select_variable(
        &mut self,
        context: &mut SelectionContext,
        variables: &[DomainId],
    ) -> Option<DomainId> {
        variables
            .iter()
            .find(|&&variable| !context.is_integer_fixed(variable))
            .copied()
    }
}
