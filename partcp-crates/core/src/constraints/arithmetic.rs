use super::Constraint;
use super::Entailment;
use super::EqualityRelation;
use super::OrderRelation;
use super::Term;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainId;
use crate::engine::PropagationContext;
use crate::engine::ReadDomains;

/// Creates the [`Constraint`] `x = rhs`.
///
/// Its negation is [`not_equals`].
pub fn equals(x: DomainId, rhs: impl Into<Term>) -> Constraint {
    Constraint::Equality {
        x,
        relation: EqualityRelation::Equal,
        rhs: rhs.into(),
    }
}

/// Creates the [`Constraint`] `x != rhs`.
///
/// Its negation is [`equals`].
pub fn not_equals(x: DomainId, rhs: impl Into<Term>) -> Constraint {
    Constraint::Equality {
        x,
        relation: EqualityRelation::NotEqual,
        rhs: rhs.into(),
    }
}

/// Creates the [`Constraint`] `x < rhs`.
///
/// Its negation is [`greater_or_equal`].
pub fn less_than(x: DomainId, rhs: impl Into<Term>) -> Constraint {
    ordering(x, OrderRelation::Less, rhs)
}

/// Creates the [`Constraint`] `x <= rhs`.
///
/// Its negation is [`greater_than`].
pub fn less_or_equal(x: DomainId, rhs: impl Into<Term>) -> Constraint {
    ordering(x, OrderRelation::LessOrEqual, rhs)
}

/// Creates the [`Constraint`] `x > rhs`.
///
/// Its negation is [`less_or_equal`].
pub fn greater_than(x: DomainId, rhs: impl Into<Term>) -> Constraint {
    ordering(x, OrderRelation::Greater, rhs)
}

/// Creates the [`Constraint`] `x >= rhs`.
///
/// Its negation is [`less_than`].
pub fn greater_or_equal(x: DomainId, rhs: impl Into<Term>) -> Constraint {
    ordering(x, OrderRelation::GreaterOrEqual, rhs)
}

fn ordering(x: DomainId, relation: OrderRelation, rhs: impl Into<Term>) -> Constraint {
    Constraint::Ordering {
        x,
        relation,
        rhs: rhs.into(),
    }
}

/// Creates the [`Constraint`] `x + offset = z`.
///
/// Its negation is [`plus_constant_not_equals`].
pub fn plus_constant_equals(x: DomainId, offset: i32, z: DomainId) -> Constraint {
    Constraint::Linear {
        x,
        offset,
        relation: EqualityRelation::Equal,
        z,
    }
}

/// Creates the [`Constraint`] `x + offset != z`.
///
/// Its negation is [`plus_constant_equals`].
pub fn plus_constant_not_equals(x: DomainId, offset: i32, z: DomainId) -> Constraint {
    Constraint::Linear {
        x,
        offset,
        relation: EqualityRelation::NotEqual,
        z,
    }
}

pub(super) fn equality_entailment(
    domains: &impl ReadDomains,
    x: DomainId,
    relation: EqualityRelation,
    rhs: Term,
) -> Entailment {
    let equal = match rhs {
        Term::Variable(y) if y == x => Entailment::Satisfied,
        Term::Constant(value) => {
            if !domains.contains(x, value) {
                Entailment::Violated
            } else if domains.is_fixed(x) {
                Entailment::Satisfied
            } else {
                Entailment::Unknown
            }
        }
        Term::Variable(y) => {
            if !domains.domain(x).intersects(domains.domain(y)) {
                Entailment::Violated
            } else if domains.is_fixed(x) && domains.is_fixed(y) {
                // The domains intersect, so both hold the same value.
                Entailment::Satisfied
            } else {
                Entailment::Unknown
            }
        }
    };

    match relation {
        EqualityRelation::Equal => equal,
        EqualityRelation::NotEqual => equal.negated(),
    }
}

pub(super) fn propagate_equality(
    context: &mut PropagationContext<'_>,
    x: DomainId,
    relation: EqualityRelation,
    rhs: Term,
) -> PropagationStatus {
    match (relation, rhs) {
        (EqualityRelation::Equal, Term::Variable(y)) if y == x => Ok(()),
        (EqualityRelation::NotEqual, Term::Variable(y)) if y == x => Err(Inconsistency::Violated),

        (EqualityRelation::Equal, Term::Constant(value)) => Ok(context.assign(x, value)?),
        (EqualityRelation::Equal, Term::Variable(y)) => {
            let y_domain = context.domain(y).clone();
            context.intersect(x, &y_domain)?;
            let x_domain = context.domain(x).clone();
            context.intersect(y, &x_domain)?;
            Ok(())
        }

        (EqualityRelation::NotEqual, Term::Constant(value)) => Ok(context.remove(x, value)?),
        (EqualityRelation::NotEqual, Term::Variable(y)) => {
            if let Some(value) = context.fixed_value(x) {
                context.remove(y, value)?;
            }
            if let Some(value) = context.fixed_value(y) {
                context.remove(x, value)?;
            }
            Ok(())
        }
    }
}

/// Rewrites `x relation rhs` into `smaller + gap <= larger`, where `gap` is 1 for strict
/// relations.
fn as_less_or_equal(x: DomainId, relation: OrderRelation, rhs: Term) -> (Term, Term, i32) {
    match relation {
        OrderRelation::Less => (Term::Variable(x), rhs, 1),
        OrderRelation::LessOrEqual => (Term::Variable(x), rhs, 0),
        OrderRelation::Greater => (rhs, Term::Variable(x), 1),
        OrderRelation::GreaterOrEqual => (rhs, Term::Variable(x), 0),
    }
}

pub(super) fn ordering_entailment(
    domains: &impl ReadDomains,
    x: DomainId,
    relation: OrderRelation,
    rhs: Term,
) -> Entailment {
    let (smaller, larger, gap) = as_less_or_equal(x, relation, rhs);
    if smaller == larger {
        return Entailment::from_bool(gap == 0);
    }

    let gap = i64::from(gap);
    if i64::from(smaller.upper_bound(domains)) + gap <= i64::from(larger.lower_bound(domains)) {
        Entailment::Satisfied
    } else if i64::from(smaller.lower_bound(domains)) + gap > i64::from(larger.upper_bound(domains))
    {
        Entailment::Violated
    } else {
        Entailment::Unknown
    }
}

pub(super) fn propagate_ordering(
    context: &mut PropagationContext<'_>,
    x: DomainId,
    relation: OrderRelation,
    rhs: Term,
) -> PropagationStatus {
    let (smaller, larger, gap) = as_less_or_equal(x, relation, rhs);
    if smaller == larger {
        return if gap == 0 {
            Ok(())
        } else {
            Err(Inconsistency::Violated)
        };
    }

    match smaller {
        Term::Variable(var) => {
            context.set_upper_bound(var, larger.upper_bound(&*context).saturating_sub(gap))?
        }
        Term::Constant(value) => {
            if larger.upper_bound(&*context).saturating_sub(gap) < value {
                return Err(Inconsistency::Violated);
            }
        }
    }

    match larger {
        Term::Variable(var) => {
            context.set_lower_bound(var, smaller.lower_bound(&*context).saturating_add(gap))?
        }
        Term::Constant(value) => {
            if smaller.lower_bound(&*context).saturating_add(gap) > value {
                return Err(Inconsistency::Violated);
            }
        }
    }

    Ok(())
}

pub(super) fn linear_entailment(
    domains: &impl ReadDomains,
    x: DomainId,
    offset: i32,
    relation: EqualityRelation,
    z: DomainId,
) -> Entailment {
    let equal = if x == z {
        Entailment::from_bool(offset == 0)
    } else if let (Some(x_value), Some(z_value)) = (domains.fixed_value(x), domains.fixed_value(z))
    {
        Entailment::from_bool(i64::from(x_value) + i64::from(offset) == i64::from(z_value))
    } else if !domains.domain(x).shifted(offset).intersects(domains.domain(z)) {
        Entailment::Violated
    } else {
        Entailment::Unknown
    };

    match relation {
        EqualityRelation::Equal => equal,
        EqualityRelation::NotEqual => equal.negated(),
    }
}

pub(super) fn propagate_linear(
    context: &mut PropagationContext<'_>,
    x: DomainId,
    offset: i32,
    relation: EqualityRelation,
    z: DomainId,
) -> PropagationStatus {
    if x == z {
        return match (relation, offset == 0) {
            (EqualityRelation::Equal, true) | (EqualityRelation::NotEqual, false) => Ok(()),
            _ => Err(Inconsistency::Violated),
        };
    }

    match relation {
        EqualityRelation::Equal => {
            let z_support = context.domain(x).shifted(offset);
            context.intersect(z, &z_support)?;
            let x_support = context.domain(z).shifted(offset.saturating_neg());
            context.intersect(x, &x_support)?;
        }
        EqualityRelation::NotEqual => {
            if let Some(value) = context.fixed_value(x) {
                if let Some(forbidden) = value.checked_add(offset) {
                    context.remove(z, forbidden)?;
                }
            }
            if let Some(value) = context.fixed_value(z) {
                if let Some(forbidden) = value.checked_sub(offset) {
                    context.remove(x, forbidden)?;
                }
            }
        }
    }

    Ok(())
}
