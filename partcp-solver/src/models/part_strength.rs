use log::debug;
use partcp_core::constraints;
use partcp_core::DomainId;
use partcp_core::ModelError;
use partcp_core::Store;

use super::declare_decision_variables;
use super::declare_parts;
use super::Model;

/// The strength of a part is a hundred times its identifier.
const STRENGTH_PER_PART: i32 = 100;

/// Selects the parts whose strength reaches a threshold.
///
/// Every decision variable `xj` has a strength `xj.strength`, which is channelled to the part it
/// holds through one boolean per part: `b = 1 <-> xj = part-i <-> xj.strength = 100 * i`. The
/// query states that a decision variable can only hold a part if its strength is at least the
/// threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartStrength {
    pub num_variables: i32,
    pub num_parts: i32,
    /// Without a threshold only the facts are imposed.
    pub strength_threshold: Option<i32>,
}

impl Default for PartStrength {
    fn default() -> Self {
        PartStrength {
            num_variables: 3,
            num_parts: 3,
            strength_threshold: Some(200),
        }
    }
}

impl Model for PartStrength {
    fn build(&self, store: &mut Store) -> Result<Vec<DomainId>, ModelError> {
        let variables = declare_decision_variables(store, self.num_variables, self.num_parts)?;
        let parts = declare_parts(store, self.num_parts)?;

        let mut strengths = Vec::with_capacity(variables.len());
        for (index, &variable) in variables.iter().enumerate() {
            // The strength domain is accumulated one part at a time, before it is constrained.
            let strength = store.new_named_sparse_integer(
                [STRENGTH_PER_PART],
                format!("x{index}.strength"),
            )?;
            for part_id in 2..=self.num_parts {
                let part_strength = part_id.saturating_mul(STRENGTH_PER_PART);
                store.extend_domain(strength, part_strength, part_strength)?;
            }

            for (part_id, &part) in (1_i32..).zip(&parts) {
                let holds_part = store.new_boolean();
                let _ = store.impose(constraints::reified(
                    constraints::equals(strength, part_id.saturating_mul(STRENGTH_PER_PART)),
                    holds_part,
                ))?;
                let _ = store.impose(constraints::reified(
                    constraints::equals(variable, part),
                    holds_part,
                ))?;
            }

            strengths.push(strength);
        }

        if let Some(threshold) = self.strength_threshold {
            for (&variable, &strength) in variables.iter().zip(&strengths) {
                for &part in &parts {
                    let _ = store.impose(constraints::if_then(
                        constraints::equals(variable, part),
                        constraints::greater_or_equal(strength, threshold),
                    ))?;
                }
            }
        }

        debug!("{store}");
        Ok(variables.into_iter().chain(strengths).collect())
    }
}
