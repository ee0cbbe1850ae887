//! Defines the constraints which can be imposed on a [`Store`].
//!
//! A constraint is a relation over variables. Every constraint is a value of the closed
//! [`Constraint`] enum; composite constraints (reification and the logical connectives) hold
//! their operands by value, so a constraint tree is built bottom-up and imposed once.
//!
//! # Example
//! ```
//! # use partcp_core::constraints;
//! # use partcp_core::Store;
//! let mut store = Store::default();
//!
//! let a = store.new_bounded_integer(0, 3).unwrap();
//! let b = store.new_bounded_integer(0, 3).unwrap();
//!
//! let _ = store.impose(constraints::less_than(a, b)).unwrap();
//! let _ = store.impose(constraints::not_equals(b, 3)).unwrap();
//!
//! assert_eq!(2, store.upper_bound(b));
//! assert_eq!(1, store.upper_bound(a));
//! ```

mod arithmetic;
mod element;
mod logical;
mod reified;

use std::fmt::Display;
use std::fmt::Formatter;

pub use arithmetic::*;
pub use element::*;
use itertools::Itertools;
pub use logical::*;
pub use reified::*;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainId;
use crate::engine::PropagationContext;
use crate::engine::ReadDomains;
#[cfg(doc)]
use crate::engine::Store;

/// The right-hand side of a primitive constraint: either a variable or a constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(DomainId),
    Constant(i32),
}

impl From<DomainId> for Term {
    fn from(value: DomainId) -> Self {
        Term::Variable(value)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::Constant(value)
    }
}

impl Term {
    fn lower_bound(&self, domains: &impl ReadDomains) -> i32 {
        match self {
            Term::Variable(var) => domains.lower_bound(*var),
            Term::Constant(value) => *value,
        }
    }

    fn upper_bound(&self, domains: &impl ReadDomains) -> i32 {
        match self {
            Term::Variable(var) => domains.upper_bound(*var),
            Term::Constant(value) => *value,
        }
    }

    fn fixed_value(&self, domains: &impl ReadDomains) -> Option<i32> {
        match self {
            Term::Variable(var) => domains.fixed_value(*var),
            Term::Constant(value) => Some(*value),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Variable(var) => write!(f, "{var}"),
            Term::Constant(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EqualityRelation {
    Equal,
    NotEqual,
}

impl EqualityRelation {
    pub fn negated(self) -> EqualityRelation {
        match self {
            EqualityRelation::Equal => EqualityRelation::NotEqual,
            EqualityRelation::NotEqual => EqualityRelation::Equal,
        }
    }
}

impl Display for EqualityRelation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EqualityRelation::Equal => write!(f, "="),
            EqualityRelation::NotEqual => write!(f, "!="),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderRelation {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl OrderRelation {
    pub fn negated(self) -> OrderRelation {
        match self {
            OrderRelation::Less => OrderRelation::GreaterOrEqual,
            OrderRelation::LessOrEqual => OrderRelation::Greater,
            OrderRelation::Greater => OrderRelation::LessOrEqual,
            OrderRelation::GreaterOrEqual => OrderRelation::Less,
        }
    }
}

impl Display for OrderRelation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderRelation::Less => write!(f, "<"),
            OrderRelation::LessOrEqual => write!(f, "<="),
            OrderRelation::Greater => write!(f, ">"),
            OrderRelation::GreaterOrEqual => write!(f, ">="),
        }
    }
}

/// Whether a constraint is known to hold or to be violated under the current domains.
///
/// When every variable in the scope of a constraint is fixed, the entailment is never
/// [`Entailment::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entailment {
    Unknown,
    Satisfied,
    Violated,
}

impl Entailment {
    pub fn negated(self) -> Entailment {
        match self {
            Entailment::Unknown => Entailment::Unknown,
            Entailment::Satisfied => Entailment::Violated,
            Entailment::Violated => Entailment::Satisfied,
        }
    }

    fn from_bool(holds: bool) -> Entailment {
        if holds {
            Entailment::Satisfied
        } else {
            Entailment::Violated
        }
    }
}

/// The priority with which a constraint is scheduled for propagation. Cheap constraints are
/// propagated before expensive ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
}

/// A relation over variables which disqualifies the assignments that violate it.
///
/// Constraints are built with the functions in this module (such as [`equals`], [`element`] or
/// [`if_then`]) and imposed with [`Store::impose`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `x = rhs` or `x != rhs`.
    Equality {
        x: DomainId,
        relation: EqualityRelation,
        rhs: Term,
    },
    /// `x < rhs`, `x <= rhs`, `x > rhs` or `x >= rhs`.
    Ordering {
        x: DomainId,
        relation: OrderRelation,
        rhs: Term,
    },
    /// `x + offset = z` or `x + offset != z`.
    Linear {
        x: DomainId,
        offset: i32,
        relation: EqualityRelation,
        z: DomainId,
    },
    /// `array[index] = rhs`, where the first element of `array` is at position `first_index`.
    Element {
        index: DomainId,
        array: Box<[DomainId]>,
        rhs: DomainId,
        first_index: i32,
    },
    /// `reification = 1 <-> constraint`, with `reification` restricted to `{0, 1}`.
    Reified {
        constraint: Box<Constraint>,
        reification: DomainId,
    },
    And(Box<[Constraint]>),
    Or(Box<[Constraint]>),
    /// Exactly one of the operands holds.
    Xor(Box<[Constraint]>),
    /// `antecedent -> consequent`.
    IfThen {
        antecedent: Box<Constraint>,
        consequent: Box<Constraint>,
    },
    Not(Box<Constraint>),
}

impl Constraint {
    /// Returns the constraint which holds exactly when `self` does not.
    pub fn negation(&self) -> Constraint {
        match self {
            Constraint::Equality { x, relation, rhs } => Constraint::Equality {
                x: *x,
                relation: relation.negated(),
                rhs: *rhs,
            },
            Constraint::Ordering { x, relation, rhs } => Constraint::Ordering {
                x: *x,
                relation: relation.negated(),
                rhs: *rhs,
            },
            Constraint::Linear {
                x,
                offset,
                relation,
                z,
            } => Constraint::Linear {
                x: *x,
                offset: *offset,
                relation: relation.negated(),
                z: *z,
            },
            Constraint::Reified {
                constraint,
                reification,
            } => Constraint::Reified {
                constraint: Box::new(constraint.negation()),
                reification: *reification,
            },
            Constraint::And(operands) => {
                Constraint::Or(operands.iter().map(Constraint::negation).collect())
            }
            Constraint::Or(operands) => {
                Constraint::And(operands.iter().map(Constraint::negation).collect())
            }
            Constraint::IfThen {
                antecedent,
                consequent,
            } => Constraint::And(
                [antecedent.as_ref().clone(), consequent.negation()].into(),
            ),
            Constraint::Not(constraint) => constraint.as_ref().clone(),
            Constraint::Element { .. } | Constraint::Xor(_) => {
                Constraint::Not(Box::new(self.clone()))
            }
        }
    }

    /// The variables the constraint refers to, in order of first occurrence and without
    /// duplicates.
    pub fn scope(&self) -> Vec<DomainId> {
        let mut scope = vec![];
        self.collect_scope(&mut scope);
        scope.into_iter().unique().collect()
    }

    fn collect_scope(&self, scope: &mut Vec<DomainId>) {
        match self {
            Constraint::Equality { x, rhs, .. } | Constraint::Ordering { x, rhs, .. } => {
                scope.push(*x);
                if let Term::Variable(var) = rhs {
                    scope.push(*var);
                }
            }
            Constraint::Linear { x, z, .. } => scope.extend([*x, *z]),
            Constraint::Element {
                index, array, rhs, ..
            } => {
                scope.push(*index);
                scope.extend(array.iter().copied());
                scope.push(*rhs);
            }
            Constraint::Reified {
                constraint,
                reification,
            } => {
                constraint.collect_scope(scope);
                scope.push(*reification);
            }
            Constraint::And(operands) | Constraint::Or(operands) | Constraint::Xor(operands) => {
                operands
                    .iter()
                    .for_each(|operand| operand.collect_scope(scope));
            }
            Constraint::IfThen {
                antecedent,
                consequent,
            } => {
                antecedent.collect_scope(scope);
                consequent.collect_scope(scope);
            }
            Constraint::Not(constraint) => constraint.collect_scope(scope),
        }
    }

    pub(crate) fn priority(&self) -> Priority {
        match self {
            Constraint::Equality { .. } | Constraint::Ordering { .. } | Constraint::Linear { .. } => {
                Priority::High
            }
            Constraint::Element { .. } | Constraint::Reified { .. } => Priority::Medium,
            Constraint::And(_)
            | Constraint::Or(_)
            | Constraint::Xor(_)
            | Constraint::IfThen { .. }
            | Constraint::Not(_) => Priority::Low,
        }
    }

    /// Determines whether the constraint holds, is violated or is still undecided under the
    /// given domains.
    pub(crate) fn entailment(&self, domains: &impl ReadDomains) -> Entailment {
        match self {
            Constraint::Equality { x, relation, rhs } => {
                arithmetic::equality_entailment(domains, *x, *relation, *rhs)
            }
            Constraint::Ordering { x, relation, rhs } => {
                arithmetic::ordering_entailment(domains, *x, *relation, *rhs)
            }
            Constraint::Linear {
                x,
                offset,
                relation,
                z,
            } => arithmetic::linear_entailment(domains, *x, *offset, *relation, *z),
            Constraint::Element {
                index,
                array,
                rhs,
                first_index,
            } => element::element_entailment(domains, *index, array, *rhs, *first_index),
            Constraint::Reified {
                constraint,
                reification,
            } => reified::reified_entailment(domains, constraint, *reification),
            Constraint::And(operands) => logical::and_entailment(domains, operands),
            Constraint::Or(operands) => logical::or_entailment(domains, operands),
            Constraint::Xor(operands) => logical::xor_entailment(domains, operands),
            Constraint::IfThen {
                antecedent,
                consequent,
            } => logical::if_then_entailment(domains, antecedent, consequent),
            Constraint::Not(constraint) => constraint.entailment(domains).negated(),
        }
    }

    /// Removes values which cannot be part of any assignment satisfying the constraint.
    ///
    /// The pruning is sound but not necessarily complete; it fails once the constraint is
    /// violated.
    pub(crate) fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationStatus {
        match self {
            Constraint::Equality { x, relation, rhs } => {
                arithmetic::propagate_equality(context, *x, *relation, *rhs)
            }
            Constraint::Ordering { x, relation, rhs } => {
                arithmetic::propagate_ordering(context, *x, *relation, *rhs)
            }
            Constraint::Linear {
                x,
                offset,
                relation,
                z,
            } => arithmetic::propagate_linear(context, *x, *offset, *relation, *z),
            Constraint::Element {
                index,
                array,
                rhs,
                first_index,
            } => element::propagate_element(context, *index, array, *rhs, *first_index),
            Constraint::Reified {
                constraint,
                reification,
            } => reified::propagate_reified(context, constraint, *reification),
            Constraint::And(operands) => logical::propagate_and(context, operands),
            Constraint::Or(operands) => logical::propagate_or(context, operands),
            Constraint::Xor(operands) => logical::propagate_xor(context, operands),
            Constraint::IfThen {
                antecedent,
                consequent,
            } => logical::propagate_if_then(context, antecedent, consequent),
            Constraint::Not(constraint) => match constraint.entailment(context) {
                Entailment::Satisfied => Err(Inconsistency::Violated),
                Entailment::Unknown | Entailment::Violated => Ok(()),
            },
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Equality { x, relation, rhs } => write!(f, "{x} {relation} {rhs}"),
            Constraint::Ordering { x, relation, rhs } => write!(f, "{x} {relation} {rhs}"),
            Constraint::Linear {
                x,
                offset,
                relation,
                z,
            } => write!(f, "{x} + {offset} {relation} {z}"),
            Constraint::Element {
                index,
                array,
                rhs,
                first_index,
            } => write!(
                f,
                "element({index}, [{}], {rhs}, first = {first_index})",
                array.iter().join(", ")
            ),
            Constraint::Reified {
                constraint,
                reification,
            } => write!(f, "{reification} <-> ({constraint})"),
            Constraint::And(operands) => write!(f, "and({})", operands.iter().join(", ")),
            Constraint::Or(operands) => write!(f, "or({})", operands.iter().join(", ")),
            Constraint::Xor(operands) => write!(f, "xor({})", operands.iter().join(", ")),
            Constraint::IfThen {
                antecedent,
                consequent,
            } => write!(f, "({antecedent}) -> ({consequent})"),
            Constraint::Not(constraint) => write!(f, "not({constraint})"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::Store;

    /// Evaluates `constraint` under every assignment of `variables`, checking that the entailment
    /// of the constraint and of its negation are exact and complementary.
    pub(crate) fn check_entailment_is_exact(
        store: &mut Store,
        variables: &[DomainId],
        constraint: &Constraint,
        expected: impl Fn(&[i32]) -> bool,
    ) {
        let negation = constraint.negation();
        for assignment in variables
            .iter()
            .map(|&var| store.domain(var).values().collect::<Vec<_>>())
            .multi_cartesian_product()
        {
            let snapshot = store.snapshot();
            for (&var, &value) in variables.iter().zip(&assignment) {
                let _ = store.assign(var, value);
            }

            let expected_entailment = Entailment::from_bool(expected(&assignment));
            assert_eq!(
                expected_entailment,
                store.entailment_of(constraint),
                "{constraint} under {assignment:?}"
            );
            assert_eq!(
                expected_entailment.negated(),
                store.entailment_of(&negation),
                "{negation} under {assignment:?}"
            );

            store.restore(snapshot).unwrap();
        }
    }

    /// Checks that every value left in the domain of a variable of `checked` is part of an
    /// assignment of the scope of `constraint` which satisfies it.
    fn check_values_are_supported(
        store: &mut Store,
        constraint: &Constraint,
        checked: &[DomainId],
    ) {
        let scope = constraint.scope();
        let domains = scope
            .iter()
            .map(|&var| store.domain(var).values().collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let mut supported = vec![vec![]; scope.len()];
        for assignment in domains.iter().cloned().multi_cartesian_product() {
            let snapshot = store.snapshot();
            for (&var, &value) in scope.iter().zip(&assignment) {
                let _ = store.assign(var, value);
            }
            let satisfied = store.entailment_of(constraint) == Entailment::Satisfied;
            store.restore(snapshot).unwrap();

            if satisfied {
                for (values, &value) in supported.iter_mut().zip(&assignment) {
                    values.push(value);
                }
            }
        }

        for ((var, domain), supported) in scope.iter().zip(&domains).zip(&supported) {
            if !checked.contains(var) {
                continue;
            }
            for value in domain {
                assert!(
                    supported.contains(value),
                    "{var} = {value} has no support in {constraint}, domains {domains:?}"
                );
            }
        }
    }

    fn random_sparse_integer(
        store: &mut Store,
        rng: &mut SmallRng,
        upper_bound: i32,
    ) -> DomainId {
        let mut values = (0..=upper_bound)
            .filter(|_| rng.gen_bool(0.6))
            .collect::<Vec<_>>();
        if values.is_empty() {
            values.push(rng.gen_range(0..=upper_bound));
        }
        store.new_sparse_integer(values).unwrap()
    }

    #[test]
    fn primitive_constraints_leave_only_supported_values() {
        let mut rng = SmallRng::seed_from_u64(3);
        let builders: [fn(DomainId, DomainId) -> Constraint; 12] = [
            |x, y| equals(x, y),
            |x, y| not_equals(x, y),
            |x, _| equals(x, 2),
            |x, _| not_equals(x, 2),
            |x, y| less_than(x, y),
            |x, y| less_or_equal(x, y),
            |x, y| greater_than(x, y),
            |x, y| greater_or_equal(x, y),
            |x, _| less_than(x, 3),
            |x, _| greater_or_equal(x, 2),
            |x, y| plus_constant_equals(x, 1, y),
            |x, y| plus_constant_not_equals(x, -1, y),
        ];

        for _ in 0..40 {
            for build in builders {
                let mut store = Store::default();
                let x = random_sparse_integer(&mut store, &mut rng, 5);
                let y = random_sparse_integer(&mut store, &mut rng, 5);
                let constraint = build(x, y);

                if store.impose(constraint.clone()).is_ok() {
                    check_values_are_supported(&mut store, &constraint, &[x, y]);
                }
            }

            let mut store = Store::default();
            let index = random_sparse_integer(&mut store, &mut rng, 4);
            let array = (0..3)
                .map(|_| random_sparse_integer(&mut store, &mut rng, 4))
                .collect::<Vec<_>>();
            let rhs = random_sparse_integer(&mut store, &mut rng, 4);
            let constraint = element(index, array, rhs);

            if store.impose(constraint.clone()).is_ok() {
                check_values_are_supported(&mut store, &constraint, &[index, rhs]);
            }
        }
    }

    #[test]
    fn scope_is_deduplicated_in_order_of_occurrence() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 3).unwrap();
        let y = store.new_bounded_integer(0, 3).unwrap();
        let b = store.new_boolean();

        let constraint = reified(and([equals(y, 1), less_than(x, y)]), b);

        assert_eq!(vec![y, x, b], constraint.scope());
    }

    #[test]
    fn double_negation_is_equivalent() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 2).unwrap();
        let y = store.new_bounded_integer(0, 2).unwrap();

        let constraint = xor([equals(x, 1), greater_or_equal(y, x)]);
        check_entailment_is_exact(
            &mut store,
            &[x, y],
            &constraint.negation().negation(),
            |values| (values[0] == 1) != (values[1] >= values[0]),
        );
    }

    #[test]
    fn display_shows_structure() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 3).unwrap();
        let y = store.new_bounded_integer(0, 3).unwrap();

        assert_eq!("v0 != 2", not_equals(x, 2).to_string());
        assert_eq!("v0 + 1 = v1", plus_constant_equals(x, 1, y).to_string());
        assert_eq!(
            "(v0 >= 2) -> (v1 = 0)",
            if_then(greater_or_equal(x, 2), equals(y, 0)).to_string()
        );
    }
}
