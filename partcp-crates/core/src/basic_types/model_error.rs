use thiserror::Error;

#[cfg(doc)]
use crate::engine::Store;
use crate::engine::ConstraintId;

/// Errors related to building a model in a [`Store`].
///
/// Failures that happen during search are never reported through this type; they are recovered
/// by backtracking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A variable was declared with a lower bound larger than its upper bound.
    #[error("the bounds [{lower_bound}, {upper_bound}] do not describe a valid domain")]
    InvalidBounds { lower_bound: i32, upper_bound: i32 },
    /// A variable was declared from an empty set of values.
    #[error("a variable cannot be declared with an empty set of values")]
    EmptyValueSet,
    /// A variable was declared with a name which is already in use.
    #[error("a variable with the name '{0}' already exists")]
    DuplicateVariableName(String),
    /// A variable was declared with a name of the form `_<index>`, which is how anonymous
    /// variables are displayed.
    #[error("the name '{0}' is reserved for anonymous variables")]
    ReservedVariableName(String),
    /// The domain of a variable was extended after a constraint started to depend on it.
    #[error("the domain of '{0}' cannot be extended once a constraint refers to it")]
    DomainFrozen(String),
    /// Imposing the constraint emptied a domain during its initial propagation. The [`Store`] is
    /// marked as failed.
    #[error("imposing {0} empties a domain at the root")]
    ModelInconsistent(ConstraintId),
    /// A constraint was imposed while the [`Store`] was already in a failed state.
    #[error("the store is in an infeasible state")]
    InfeasibleState,
    /// No variable with the provided name exists.
    #[error("no variable with the name '{0}' exists")]
    VariableNotFound(String),
    /// A variable or snapshot created by one [`Store`] was used with another.
    #[error("a variable or snapshot was used with a store which did not create it")]
    OwnershipMismatch,
}
