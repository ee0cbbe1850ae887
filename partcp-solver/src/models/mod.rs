//! The part models. Each model declares the parts `part-1` to `part-N` as variables fixed to
//! their identifier, together with the "facts" which relate them to their attributes, and a
//! query over the decision variables `x0` to `x{n-1}`.

mod part_positioning;
mod part_strand;
mod part_strength;

pub use part_positioning::PartPositioning;
pub use part_strand::PartStrand;
pub use part_strength::PartStrength;
use partcp_core::DomainId;
use partcp_core::ModelError;
use partcp_core::Store;

/// A model which can be built in a [`Store`].
pub trait Model {
    /// Declares the variables and constraints of the model in `store` and returns the variables
    /// which should be labelled by the search, in the order in which they are reported.
    fn build(&self, store: &mut Store) -> Result<Vec<DomainId>, ModelError>;
}

/// Declares the decision variables `x0` to `x{num_variables - 1}` with domain `[1, num_parts]`.
fn declare_decision_variables(
    store: &mut Store,
    num_variables: i32,
    num_parts: i32,
) -> Result<Vec<DomainId>, ModelError> {
    (0..num_variables)
        .map(|index| store.new_named_bounded_integer(1, num_parts, format!("x{index}")))
        .collect()
}

/// Declares the variables `part-1` to `part-{num_parts}`, each fixed to its identifier.
fn declare_parts(store: &mut Store, num_parts: i32) -> Result<Vec<DomainId>, ModelError> {
    (1..=num_parts)
        .map(|part| store.new_named_bounded_integer(part, part, part_name(part)))
        .collect()
}

fn part_name(part: i32) -> String {
    format!("part-{part}")
}
