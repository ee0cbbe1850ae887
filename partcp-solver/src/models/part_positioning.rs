use log::debug;
use partcp_core::constraints;
use partcp_core::DomainId;
use partcp_core::ModelError;
use partcp_core::Store;

use super::declare_decision_variables;
use super::declare_parts;
use super::part_name;
use super::Model;

/// Positions the parts next to each other in the decision variables.
///
/// Every part `i` has an index variable `part-i.index` which points at a decision variable
/// holding `i`, and the index of part `i + 1` directly follows the index of part `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartPositioning {
    pub num_variables: i32,
    pub num_parts: i32,
}

impl Default for PartPositioning {
    fn default() -> Self {
        PartPositioning {
            num_variables: 300,
            num_parts: 300,
        }
    }
}

impl Model for PartPositioning {
    fn build(&self, store: &mut Store) -> Result<Vec<DomainId>, ModelError> {
        let variables = declare_decision_variables(store, self.num_variables, self.num_parts)?;
        let parts = declare_parts(store, self.num_parts)?;

        let mut indices = Vec::with_capacity(parts.len());
        for (part_id, &part) in (1..).zip(&parts) {
            let index = store.new_named_bounded_integer(
                1,
                self.num_variables,
                format!("{}.index", part_name(part_id)),
            )?;
            let _ = store.impose(constraints::element(index, variables.clone(), part))?;
            indices.push(index);
        }

        for window in indices.windows(2) {
            let _ = store.impose(constraints::plus_constant_equals(window[0], 1, window[1]))?;
        }

        debug!("{store}");
        Ok(variables)
    }
}
