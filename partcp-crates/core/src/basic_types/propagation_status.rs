use thiserror::Error;

use crate::engine::EmptyDomain;

/// The result of propagating a constraint. The propagation can either succeed or identify that
/// the current partial assignment cannot be extended to a solution.
pub type PropagationStatus = Result<(), Inconsistency>;

/// The reason a propagation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A domain became empty.
    EmptyDomain,
    /// A constraint is violated by the current domains, without any domain being empty.
    Violated,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

/// The reason a change to a domain requested through the [`Store`](crate::Store) was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    /// The variable was created by another store; nothing was changed.
    #[error("a variable was used with a store which did not create it")]
    OwnershipMismatch,
    /// The change empties a domain or violates a constraint.
    #[error("the change is inconsistent: {0:?}")]
    Inconsistent(Inconsistency),
}

impl From<Inconsistency> for UpdateError {
    fn from(inconsistency: Inconsistency) -> Self {
        UpdateError::Inconsistent(inconsistency)
    }
}

/// The observable effect of running a single constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// No domain was changed.
    NoChange,
    /// At least one domain was pruned.
    DomainChanged,
    /// The constraint detected an inconsistency.
    Failed,
}
