use super::Constraint;
use super::Entailment;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::engine::PropagationContext;
use crate::engine::ReadDomains;

/// Creates the [`Constraint`] which holds when every operand holds.
///
/// Its negation is the [`or`] of the negated operands.
pub fn and(operands: impl Into<Box<[Constraint]>>) -> Constraint {
    Constraint::And(operands.into())
}

/// Creates the [`Constraint`] which holds when at least one operand holds.
///
/// Its negation is the [`and`] of the negated operands.
pub fn or(operands: impl Into<Box<[Constraint]>>) -> Constraint {
    Constraint::Or(operands.into())
}

/// Creates the [`Constraint`] which holds when exactly one operand holds.
pub fn xor(operands: impl Into<Box<[Constraint]>>) -> Constraint {
    Constraint::Xor(operands.into())
}

/// Creates the [`Constraint`] `antecedent -> consequent`.
///
/// Its negation is `antecedent and not consequent`.
pub fn if_then(antecedent: Constraint, consequent: Constraint) -> Constraint {
    Constraint::IfThen {
        antecedent: Box::new(antecedent),
        consequent: Box::new(consequent),
    }
}

/// Creates the [`Constraint`] which holds when `constraint` does not.
pub fn not(constraint: Constraint) -> Constraint {
    Constraint::Not(Box::new(constraint))
}

pub(super) fn and_entailment(domains: &impl ReadDomains, operands: &[Constraint]) -> Entailment {
    let mut entailment = Entailment::Satisfied;
    for operand in operands {
        match operand.entailment(domains) {
            Entailment::Violated => return Entailment::Violated,
            Entailment::Unknown => entailment = Entailment::Unknown,
            Entailment::Satisfied => {}
        }
    }
    entailment
}

pub(super) fn propagate_and(
    context: &mut PropagationContext<'_>,
    operands: &[Constraint],
) -> PropagationStatus {
    operands
        .iter()
        .try_for_each(|operand| operand.propagate(context))
}

pub(super) fn or_entailment(domains: &impl ReadDomains, operands: &[Constraint]) -> Entailment {
    let mut entailment = Entailment::Violated;
    for operand in operands {
        match operand.entailment(domains) {
            Entailment::Satisfied => return Entailment::Satisfied,
            Entailment::Unknown => entailment = Entailment::Unknown,
            Entailment::Violated => {}
        }
    }
    entailment
}

pub(super) fn propagate_or(
    context: &mut PropagationContext<'_>,
    operands: &[Constraint],
) -> PropagationStatus {
    let mut undecided = None;
    let mut num_undecided = 0;

    for operand in operands {
        match operand.entailment(&*context) {
            Entailment::Satisfied => return Ok(()),
            Entailment::Violated => {}
            Entailment::Unknown => {
                num_undecided += 1;
                undecided = Some(operand);
            }
        }
    }

    match (num_undecided, undecided) {
        (0, _) => Err(Inconsistency::Violated),
        (1, Some(operand)) => operand.propagate(context),
        _ => Ok(()),
    }
}

/// Counts the operands which hold and collects the undecided ones.
fn classify<'a>(
    domains: &impl ReadDomains,
    operands: &'a [Constraint],
) -> (usize, Vec<&'a Constraint>) {
    let mut num_satisfied = 0;
    let mut undecided = vec![];

    for operand in operands {
        match operand.entailment(domains) {
            Entailment::Satisfied => num_satisfied += 1,
            Entailment::Unknown => undecided.push(operand),
            Entailment::Violated => {}
        }
    }

    (num_satisfied, undecided)
}

pub(super) fn xor_entailment(domains: &impl ReadDomains, operands: &[Constraint]) -> Entailment {
    let (num_satisfied, undecided) = classify(domains, operands);

    match (num_satisfied, undecided.len()) {
        (0, 0) => Entailment::Violated,
        (1, 0) => Entailment::Satisfied,
        (satisfied, _) if satisfied > 1 => Entailment::Violated,
        _ => Entailment::Unknown,
    }
}

pub(super) fn propagate_xor(
    context: &mut PropagationContext<'_>,
    operands: &[Constraint],
) -> PropagationStatus {
    let (num_satisfied, undecided) = classify(&*context, operands);

    match (num_satisfied, undecided.as_slice()) {
        (0, []) => Err(Inconsistency::Violated),
        (0, [last]) => last.propagate(context),
        (1, others) => others
            .iter()
            .try_for_each(|operand| operand.negation().propagate(context)),
        (0, _) => Ok(()),
        _ => Err(Inconsistency::Violated),
    }
}

pub(super) fn if_then_entailment(
    domains: &impl ReadDomains,
    antecedent: &Constraint,
    consequent: &Constraint,
) -> Entailment {
    match (antecedent.entailment(domains), consequent.entailment(domains)) {
        (Entailment::Violated, _) | (_, Entailment::Satisfied) => Entailment::Satisfied,
        (Entailment::Satisfied, Entailment::Violated) => Entailment::Violated,
        _ => Entailment::Unknown,
    }
}

pub(super) fn propagate_if_then(
    context: &mut PropagationContext<'_>,
    antecedent: &Constraint,
    consequent: &Constraint,
) -> PropagationStatus {
    match antecedent.entailment(&*context) {
        Entailment::Satisfied => consequent.propagate(context),
        Entailment::Violated => Ok(()),
        Entailment::Unknown => {
            if consequent.entailment(&*context) == Entailment::Violated {
                antecedent.negation().propagate(context)
            } else {
                Ok(())
            }
        }
    }
}
