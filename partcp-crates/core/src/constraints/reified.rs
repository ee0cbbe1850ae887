use super::Constraint;
use super::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainId;
use crate::engine::PropagationContext;
use crate::engine::ReadDomains;

/// Creates the [`Constraint`] `reification = 1 <-> constraint`.
///
/// The domain of `reification` is restricted to `{0, 1}` when the constraint is imposed. Its
/// negation is the reification of the negated constraint, `reification = 1 <-> not constraint`.
pub fn reified(constraint: Constraint, reification: DomainId) -> Constraint {
    Constraint::Reified {
        constraint: Box::new(constraint),
        reification,
    }
}

pub(super) fn reified_entailment(
    domains: &impl ReadDomains,
    constraint: &Constraint,
    reification: DomainId,
) -> Entailment {
    let can_be_false = domains.contains(reification, 0);
    let can_be_true = domains.contains(reification, 1);

    match (can_be_false, can_be_true) {
        (false, false) => Entailment::Violated,
        (true, true) => Entailment::Unknown,
        (false, true) => constraint.entailment(domains),
        (true, false) => constraint.entailment(domains).negated(),
    }
}

pub(super) fn propagate_reified(
    context: &mut PropagationContext<'_>,
    constraint: &Constraint,
    reification: DomainId,
) -> PropagationStatus {
    context.set_lower_bound(reification, 0)?;
    context.set_upper_bound(reification, 1)?;

    match context.fixed_value(reification) {
        Some(1) => constraint.propagate(context),
        Some(_) => constraint.negation().propagate(context),
        None => match constraint.entailment(&*context) {
            Entailment::Satisfied => Ok(context.assign(reification, 1)?),
            Entailment::Violated => Ok(context.assign(reification, 0)?),
            Entailment::Unknown => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::equals;
    use crate::constraints::greater_or_equal;
    use crate::constraints::tests::check_entailment_is_exact;
    use crate::engine::IntervalDomain;
    use crate::Store;

    #[test]
    fn reification_is_restricted_to_booleans() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 5).unwrap();
        let b = store.new_bounded_integer(-3, 3).unwrap();

        let _ = store.impose(reified(equals(x, 2), b)).unwrap();

        assert_eq!(&IntervalDomain::new(0, 1).unwrap(), store.domain(b));
    }

    #[test]
    fn fixed_reification_imposes_the_constraint_or_its_negation() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 5).unwrap();
        let y = store.new_bounded_integer(0, 5).unwrap();
        let b = store.new_boolean();
        let c = store.new_boolean();

        let _ = store.impose(reified(equals(x, 2), b)).unwrap();
        let _ = store.impose(reified(greater_or_equal(y, 3), c)).unwrap();

        store.assign(b, 1).unwrap();
        store.assign(c, 0).unwrap();
        store.propagate_to_fixpoint().unwrap();

        assert_eq!(Some(2), store.domain(x).fixed_value());
        assert_eq!(&IntervalDomain::new(0, 2).unwrap(), store.domain(y));
    }

    #[test]
    fn entailment_of_the_constraint_fixes_the_reification() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 5).unwrap();
        let b = store.new_boolean();

        let _ = store.impose(reified(greater_or_equal(x, 3), b)).unwrap();
        assert!(!store.is_fixed(b));

        store.assign(x, 1).unwrap();
        store.propagate_to_fixpoint().unwrap();

        assert_eq!(Some(0), store.domain(b).fixed_value());
    }

    #[test]
    fn entailment_is_exact_for_reification() {
        let mut store = Store::default();
        let x = store.new_bounded_integer(0, 3).unwrap();
        let b = store.new_bounded_integer(0, 1).unwrap();

        check_entailment_is_exact(&mut store, &[x, b], &reified(equals(x, 2), b), |v| {
            (v[1] == 1) == (v[0] == 2)
        });
    }
}
