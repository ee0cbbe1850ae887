use std::vec::Drain;

use super::domain::DomainUpdate;
use super::variables::VariableId;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::IntervalDomain;
use crate::partcp_assert_simple;

/// The state of a variable before it was first modified at some checkpoint.
#[derive(Clone, Debug)]
struct DomainTrailEntry {
    variable: VariableId,
    previous_domain: IntervalDomain,
    previous_stamp: usize,
}

/// The domains of all variables of a store, together with the trail which allows restoring them
/// to an earlier checkpoint.
///
/// A variable is trailed at most once per checkpoint: the first modification after a checkpoint
/// saves a copy of the domain, later modifications at the same checkpoint are free.
#[derive(Clone, Debug, Default)]
pub(crate) struct Domains {
    domains: KeyedVec<VariableId, IntervalDomain>,
    /// The checkpoint at which each variable was last saved on the trail.
    stamps: KeyedVec<VariableId, usize>,
    trail: Trail<DomainTrailEntry>,
    /// Variables which were pruned since the last call to [`Domains::drain_modified`].
    modified: Vec<VariableId>,
}

impl Domains {
    pub(crate) fn grow(&mut self, domain: IntervalDomain) -> VariableId {
        let _ = self.stamps.push(0);
        self.domains.push(domain)
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn get(&self, variable: VariableId) -> &IntervalDomain {
        &self.domains[variable]
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.trail.checkpoint()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    /// Undoes every modification made after `checkpoint` was the current checkpoint.
    pub(crate) fn restore(&mut self, checkpoint: usize) {
        for entry in self.trail.undo_to(checkpoint) {
            self.domains[entry.variable] = entry.previous_domain;
            self.stamps[entry.variable] = entry.previous_stamp;
        }
        self.modified.clear();
    }

    /// Adds the values of `extra` to the domain of `variable`. Only allowed at the root, as the
    /// growth is not trailed.
    pub(crate) fn extend(&mut self, variable: VariableId, extra: &IntervalDomain) {
        partcp_assert_simple!(
            self.checkpoint() == 0,
            "domains can only be extended at the root"
        );
        let _ = self.domains[variable].union_with(extra);
    }

    pub(crate) fn has_modifications(&self) -> bool {
        !self.modified.is_empty()
    }

    pub(crate) fn drain_modified(&mut self) -> Drain<'_, VariableId> {
        self.modified.drain(..)
    }

    pub(crate) fn remove_value(&mut self, variable: VariableId, value: i32) -> DomainUpdate {
        self.update(variable, |domain| domain.remove_value(value))
    }

    pub(crate) fn remove_below(&mut self, variable: VariableId, value: i32) -> DomainUpdate {
        self.update(variable, |domain| domain.remove_below(value))
    }

    pub(crate) fn remove_above(&mut self, variable: VariableId, value: i32) -> DomainUpdate {
        self.update(variable, |domain| domain.remove_above(value))
    }

    pub(crate) fn intersect_with(
        &mut self,
        variable: VariableId,
        other: &IntervalDomain,
    ) -> DomainUpdate {
        self.update(variable, |domain| domain.intersect_with(other))
    }

    fn update(
        &mut self,
        variable: VariableId,
        operation: impl FnOnce(&mut IntervalDomain) -> DomainUpdate,
    ) -> DomainUpdate {
        let checkpoint = self.trail.checkpoint();
        let needs_trailing = checkpoint > 0 && self.stamps[variable] != checkpoint;
        let previous_domain = needs_trailing.then(|| self.domains[variable].clone());

        let result = operation(&mut self.domains[variable]);

        let changed = match result {
            Ok(changed) => changed,
            Err(_) => previous_domain
                .as_ref()
                .map_or(true, |previous| !previous.is_empty()),
        };

        if changed {
            if let Some(previous_domain) = previous_domain {
                self.trail.push(DomainTrailEntry {
                    variable,
                    previous_domain,
                    previous_stamp: self.stamps[variable],
                });
                self.stamps[variable] = checkpoint;
            }
            self.modified.push(variable);
        }

        result
    }
}
