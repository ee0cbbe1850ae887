use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;
use log::debug;
use log::trace;

use super::domains::Domains;
use super::propagator_queue::PropagatorQueue;
use super::variable_names::VariableNames;
use super::variables::StoreId;
use super::variables::VariableId;
use crate::basic_types::Inconsistency;
use crate::basic_types::ModelError;
use crate::basic_types::PropagationOutcome;
use crate::basic_types::PropagationStatus;
use crate::basic_types::UpdateError;
use crate::constraints::Constraint;
use crate::constraints::Entailment;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::ConstraintId;
use crate::engine::DomainId;
use crate::engine::EmptyDomain;
use crate::engine::IntervalDomain;
use crate::engine::PropagationContext;
use crate::engine::ReadDomains;
use crate::partcp_assert_moderate;
use crate::partcp_assert_simple;

/// The state of a [`Store`] which can be returned to with [`Store::restore`].
///
/// A snapshot is consumed when it is restored; snapshots have to be restored in the reverse order
/// of creation, and restoring a snapshot discards every snapshot taken after it.
#[allow(
    missing_copy_implementations,
    reason = "a snapshot can be restored at most once"
)]
#[derive(Debug)]
#[must_use]
pub struct Snapshot {
    store: StoreId,
    checkpoint: usize,
    failure: Option<Inconsistency>,
}

/// Owns the variables of a model, their domains and the constraints imposed on them.
///
/// Changes to domains are propagated to a fixpoint through the constraints which watch the
/// changed variables. All changes made after a [`Snapshot`] can be undone with
/// [`Store::restore`], which is how a search explores alternatives.
///
/// # Example
/// ```
/// # use partcp_core::constraints;
/// # use partcp_core::Store;
/// let mut store = Store::default();
/// let x = store.new_named_bounded_integer(1, 3, "x").unwrap();
/// let y = store.new_named_bounded_integer(1, 3, "y").unwrap();
/// let _ = store.impose(constraints::plus_constant_equals(x, 1, y)).unwrap();
///
/// let snapshot = store.snapshot();
/// store.assign(x, 2).unwrap();
/// store.propagate_to_fixpoint().unwrap();
/// assert_eq!(Some(3), store.value(y));
///
/// store.restore(snapshot).unwrap();
/// assert_eq!("{2..3}", store.domain(y).to_string());
/// ```
#[derive(Debug)]
pub struct Store {
    id: StoreId,
    domains: Domains,
    names: VariableNames,
    constraints: KeyedVec<ConstraintId, Constraint>,
    /// For every variable, the constraints which have to be propagated when it changes.
    watchers: KeyedVec<VariableId, Vec<ConstraintId>>,
    queue: PropagatorQueue,
    failure: Option<Inconsistency>,
    num_propagations: u64,
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Store {
    pub fn new() -> Store {
        Store {
            id: StoreId::next(),
            domains: Domains::default(),
            names: VariableNames::default(),
            constraints: KeyedVec::default(),
            watchers: KeyedVec::default(),
            queue: PropagatorQueue::default(),
            failure: None,
            num_propagations: 0,
        }
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Creates an anonymous variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, ModelError> {
        self.create_variable(IntervalDomain::new(lower_bound, upper_bound)?, None)
    }

    /// Creates a variable named `name` with the domain `[lower_bound, upper_bound]`.
    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> Result<DomainId, ModelError> {
        self.create_variable(
            IntervalDomain::new(lower_bound, upper_bound)?,
            Some(name.into()),
        )
    }

    /// Creates an anonymous variable whose domain holds exactly the given values.
    pub fn new_sparse_integer(
        &mut self,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<DomainId, ModelError> {
        self.create_variable(IntervalDomain::from_values(values)?, None)
    }

    /// Creates a variable named `name` whose domain holds exactly the given values.
    pub fn new_named_sparse_integer(
        &mut self,
        values: impl IntoIterator<Item = i32>,
        name: impl Into<String>,
    ) -> Result<DomainId, ModelError> {
        self.create_variable(IntervalDomain::from_values(values)?, Some(name.into()))
    }

    /// Creates an anonymous 0/1 variable.
    pub fn new_boolean(&mut self) -> DomainId {
        let variable = self.domains.grow(IntervalDomain::singleton(0));
        self.domains.extend(variable, &IntervalDomain::singleton(1));
        self.register(variable, None)
    }

    /// Creates a 0/1 variable named `name`.
    pub fn new_named_boolean(&mut self, name: impl Into<String>) -> Result<DomainId, ModelError> {
        self.create_variable(IntervalDomain::from_values([0, 1])?, Some(name.into()))
    }

    fn create_variable(
        &mut self,
        domain: IntervalDomain,
        name: Option<String>,
    ) -> Result<DomainId, ModelError> {
        if let Some(name) = &name {
            self.names.check_available(name)?;
        }

        let variable = self.domains.grow(domain);
        Ok(self.register(variable, name))
    }

    fn register(&mut self, variable: VariableId, name: Option<String>) -> DomainId {
        partcp_assert_simple!(
            self.domains.checkpoint() == 0,
            "variables can only be created at the root"
        );

        self.names.add(variable, name);
        self.watchers.accomodate(variable, vec![]);

        trace!(
            "declared {} :: {}",
            self.names.name(variable),
            self.domains.get(variable)
        );

        DomainId::new(self.id, variable)
    }

    /// Adds the values `[lower_bound, upper_bound]` to the domain of `var`.
    ///
    /// This is how sparse domains such as `{100, 200}` are built up one value at a time. It is
    /// rejected with [`ModelError::DomainFrozen`] once a constraint refers to the variable.
    pub fn extend_domain(
        &mut self,
        var: DomainId,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<(), ModelError> {
        self.check_ownership(var)?;
        if !self.watchers[var.variable].is_empty() {
            return Err(ModelError::DomainFrozen(self.name(var).to_owned()));
        }

        let extra = IntervalDomain::new(lower_bound, upper_bound)?;
        self.domains.extend(var.variable, &extra);
        Ok(())
    }

    /// Finds the variable which was declared with `name`.
    pub fn lookup_variable(&self, name: &str) -> Result<DomainId, ModelError> {
        self.names
            .lookup(name)
            .map(|variable| DomainId::new(self.id, variable))
            .ok_or_else(|| ModelError::VariableNotFound(name.to_owned()))
    }

    /// Whether `var` was created by this store.
    pub fn owns(&self, var: DomainId) -> bool {
        var.store == self.id
    }

    pub(crate) fn check_ownership(&self, var: DomainId) -> Result<(), ModelError> {
        if self.owns(var) {
            Ok(())
        } else {
            Err(ModelError::OwnershipMismatch)
        }
    }

    /// The name of `var`; anonymous variables are named `_<index>`.
    ///
    /// # Panics
    /// This and the other accessors taking a [`DomainId`] panic if `var` was created by another
    /// store.
    pub fn name(&self, var: DomainId) -> &str {
        self.assert_owned(var);
        self.names.name(var.variable)
    }

    pub fn domain(&self, var: DomainId) -> &IntervalDomain {
        self.assert_owned(var);
        self.domains.domain(var)
    }

    pub fn lower_bound(&self, var: DomainId) -> i32 {
        self.domain(var).lower_bound()
    }

    pub fn upper_bound(&self, var: DomainId) -> i32 {
        self.domain(var).upper_bound()
    }

    pub fn size(&self, var: DomainId) -> u64 {
        self.domain(var).size()
    }

    pub fn is_fixed(&self, var: DomainId) -> bool {
        self.domain(var).is_singleton()
    }

    /// The value of `var` if its domain is a singleton.
    pub fn value(&self, var: DomainId) -> Option<i32> {
        self.domain(var).fixed_value()
    }

    fn assert_owned(&self, var: DomainId) {
        partcp_assert_simple!(
            self.owns(var),
            "{var} was created by {:?} and used with {:?}",
            var.store,
            self.id
        );
    }

    /// The variables of the store in order of declaration.
    pub fn variables(&self) -> impl Iterator<Item = DomainId> + '_ {
        (0..self.domains.num_domains())
            .map(|index| DomainId::new(self.id, VariableId::create_from_index(index)))
    }

    pub fn num_variables(&self) -> usize {
        self.domains.num_domains()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The number of constraints whose scope contains `var`.
    pub fn num_constraints_on(&self, var: DomainId) -> usize {
        self.assert_owned(var);
        self.watchers[var.variable].len()
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id)
    }

    /// The unfixed variables of the constraints which are neither entailed nor violated by the
    /// current domains, without duplicates.
    pub(crate) fn undecided_variables(&self) -> Vec<DomainId> {
        self.constraints
            .iter()
            .filter(|constraint| constraint.entailment(&self.domains) == Entailment::Unknown)
            .flat_map(|constraint| constraint.scope())
            .filter(|&var| !self.is_fixed(var))
            .unique()
            .collect()
    }

    /// The number of times a constraint has been propagated.
    pub fn num_propagations(&self) -> u64 {
        self.num_propagations
    }

    /// Whether propagation found an inconsistency which has not been undone by
    /// [`Store::restore`].
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Adds `constraint` to the store and propagates to a fixpoint.
    ///
    /// If the propagation empties a domain the store becomes failed and
    /// [`ModelError::ModelInconsistent`] is returned; the constraint stays part of the store. A
    /// store which is already failed rejects new constraints with
    /// [`ModelError::InfeasibleState`].
    pub fn impose(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        if self.is_failed() {
            return Err(ModelError::InfeasibleState);
        }

        let scope = constraint.scope();
        for &var in &scope {
            self.check_ownership(var)?;
        }

        partcp_assert_simple!(
            self.domains.checkpoint() == 0,
            "constraints can only be imposed at the root"
        );

        let priority = constraint.priority();
        debug!("imposing {constraint}");
        let constraint_id = self.constraints.push(constraint);
        for var in scope {
            self.watchers[var.variable].push(constraint_id);
        }
        self.queue.enqueue(constraint_id, priority);

        match self.propagate_to_fixpoint() {
            Ok(()) => Ok(constraint_id),
            Err(inconsistency) => {
                debug!("{constraint_id} is inconsistent at the root: {inconsistency:?}");
                Err(ModelError::ModelInconsistent(constraint_id))
            }
        }
    }

    /// Propagates the queued constraints until no domain changes anymore or a domain becomes
    /// empty. On failure the store is marked as failed until it is restored.
    pub fn propagate_to_fixpoint(&mut self) -> PropagationStatus {
        if let Some(failure) = self.failure {
            return Err(failure);
        }

        while let Some(constraint_id) = self.queue.pop() {
            if let Err(inconsistency) = self.propagate_constraint(constraint_id) {
                self.fail(inconsistency);
                return Err(inconsistency);
            }
        }

        Ok(())
    }

    /// Runs a single constraint until it no longer changes its own domains, then schedules the
    /// other constraints watching the changed variables.
    fn propagate_constraint(&mut self, constraint_id: ConstraintId) -> PropagationStatus {
        loop {
            self.num_propagations += 1;

            let mut context = PropagationContext::new(&mut self.domains);
            let status = self.constraints[constraint_id].propagate(&mut context);

            let outcome = match status {
                Err(_) => PropagationOutcome::Failed,
                Ok(()) if self.domains.has_modifications() => PropagationOutcome::DomainChanged,
                Ok(()) => PropagationOutcome::NoChange,
            };
            trace!("propagated {constraint_id}: {outcome:?}");

            status?;
            if outcome == PropagationOutcome::NoChange {
                break;
            }

            for var in self.domains.drain_modified() {
                for &watcher in &self.watchers[var] {
                    if watcher != constraint_id {
                        self.queue
                            .enqueue(watcher, self.constraints[watcher].priority());
                    }
                }
            }
        }

        Ok(())
    }

    fn fail(&mut self, inconsistency: Inconsistency) {
        self.failure = Some(inconsistency);
        self.queue.clear();
        let _ = self.domains.drain_modified();
    }

    /// Schedules the watchers of every variable changed outside of propagation.
    fn schedule_modified(&mut self) {
        for var in self.domains.drain_modified() {
            for &watcher in &self.watchers[var] {
                self.queue
                    .enqueue(watcher, self.constraints[watcher].priority());
            }
        }
    }

    fn apply(
        &mut self,
        var: DomainId,
        operation: impl FnOnce(&mut PropagationContext<'_>) -> Result<(), EmptyDomain>,
    ) -> Result<(), UpdateError> {
        if let Some(failure) = self.failure {
            return Err(failure.into());
        }

        let mut context = PropagationContext::new(&mut self.domains);
        match operation(&mut context) {
            Ok(()) => {
                self.schedule_modified();
                Ok(())
            }
            Err(empty_domain) => {
                self.fail(empty_domain.into());
                Err(Inconsistency::from(empty_domain).into())
            }
        }
    }

    /// Restricts the domain of `var` to `value`. Fails without changing the store if `value` is
    /// not in the domain. Propagation is deferred to [`Store::propagate_to_fixpoint`].
    ///
    /// This and the other mutators return [`UpdateError::OwnershipMismatch`] for a variable of
    /// another store.
    pub fn assign(&mut self, var: DomainId, value: i32) -> Result<(), UpdateError> {
        if !self.owns(var) {
            return Err(UpdateError::OwnershipMismatch);
        }
        if !self.domain(var).contains(value) {
            return Err(Inconsistency::EmptyDomain.into());
        }
        self.apply(var, |context| context.assign(var, value))
    }

    pub fn remove_value(&mut self, var: DomainId, value: i32) -> Result<(), UpdateError> {
        if !self.owns(var) {
            return Err(UpdateError::OwnershipMismatch);
        }
        self.apply(var, |context| context.remove(var, value))
    }

    pub fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), UpdateError> {
        if !self.owns(var) {
            return Err(UpdateError::OwnershipMismatch);
        }
        self.apply(var, |context| context.set_lower_bound(var, bound))
    }

    pub fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), UpdateError> {
        if !self.owns(var) {
            return Err(UpdateError::OwnershipMismatch);
        }
        self.apply(var, |context| context.set_upper_bound(var, bound))
    }

    /// Records the current state of the store.
    pub fn snapshot(&mut self) -> Snapshot {
        partcp_assert_moderate!(
            self.queue.is_empty(),
            "snapshots are taken at a propagation fixpoint"
        );

        let snapshot = Snapshot {
            store: self.id,
            checkpoint: self.domains.checkpoint(),
            failure: self.failure,
        };
        self.domains.new_checkpoint();
        snapshot
    }

    /// Returns every domain to the state it had when `snapshot` was taken. Pending propagation is
    /// discarded and the failed flag is reset to its value at that time.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), ModelError> {
        if snapshot.store != self.id {
            return Err(ModelError::OwnershipMismatch);
        }

        self.restore_owned(snapshot);
        Ok(())
    }

    pub(crate) fn restore_owned(&mut self, snapshot: Snapshot) {
        partcp_assert_simple!(snapshot.store == self.id);
        partcp_assert_simple!(
            snapshot.checkpoint < self.domains.checkpoint(),
            "a snapshot can only be restored while the snapshots taken after it are not"
        );

        self.domains.restore(snapshot.checkpoint);
        self.queue.clear();
        self.failure = snapshot.failure;
    }

    /// The number of snapshots which have been taken and not yet restored.
    pub fn depth(&self) -> usize {
        self.domains.checkpoint()
    }

    #[cfg(test)]
    pub(crate) fn entailment_of(&self, constraint: &Constraint) -> Entailment {
        constraint.entailment(&self.domains)
    }
}

impl Display for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "*** Store")?;
        for var in self.variables() {
            writeln!(f, "{} :: {}", self.name(var), self.domain(var))?;
        }
        write!(
            f,
            "{} constraints, {}",
            self.num_constraints(),
            if self.is_failed() {
                "failed"
            } else {
                "consistent"
            }
        )
    }
}
