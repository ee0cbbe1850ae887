use super::Constraint;
use super::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainId;
use crate::engine::IntervalDomain;
use crate::engine::PropagationContext;
use crate::engine::ReadDomains;

/// Creates the element [`Constraint`] which states that `array[index] = rhs`, where the first
/// element of `array` sits at position 1.
///
/// See [`element_with_offset`] for arrays indexed from another position.
pub fn element(
    index: DomainId,
    array: impl Into<Box<[DomainId]>>,
    rhs: DomainId,
) -> Constraint {
    element_with_offset(index, array, rhs, 1)
}

/// Creates the element [`Constraint`] which states that `array[index] = rhs`, where the first
/// element of `array` sits at position `first_index`.
pub fn element_with_offset(
    index: DomainId,
    array: impl Into<Box<[DomainId]>>,
    rhs: DomainId,
    first_index: i32,
) -> Constraint {
    Constraint::Element {
        index,
        array: array.into(),
        rhs,
        first_index,
    }
}

fn array_position(index_value: i32, array: &[DomainId], first_index: i32) -> Option<usize> {
    let position = i64::from(index_value) - i64::from(first_index);
    usize::try_from(position)
        .ok()
        .filter(|&position| position < array.len())
}

/// Whether `array[index_value]` exists and can still be equal to `rhs`.
fn supports(
    domains: &impl ReadDomains,
    index_value: i32,
    array: &[DomainId],
    rhs: DomainId,
    first_index: i32,
) -> bool {
    array_position(index_value, array, first_index)
        .is_some_and(|position| domains.domain(array[position]).intersects(domains.domain(rhs)))
}

pub(super) fn element_entailment(
    domains: &impl ReadDomains,
    index: DomainId,
    array: &[DomainId],
    rhs: DomainId,
    first_index: i32,
) -> Entailment {
    if !domains
        .domain(index)
        .values()
        .any(|value| supports(domains, value, array, rhs, first_index))
    {
        return Entailment::Violated;
    }

    let selected = domains
        .fixed_value(index)
        .and_then(|value| array_position(value, array, first_index))
        .map(|position| array[position]);

    match selected {
        Some(selected)
            if domains.is_fixed(selected)
                && domains.is_fixed(rhs)
                && domains.fixed_value(selected) == domains.fixed_value(rhs) =>
        {
            Entailment::Satisfied
        }
        _ => Entailment::Unknown,
    }
}

pub(super) fn propagate_element(
    context: &mut PropagationContext<'_>,
    index: DomainId,
    array: &[DomainId],
    rhs: DomainId,
    first_index: i32,
) -> PropagationStatus {
    let last_index = (i64::from(first_index) + array.len() as i64 - 1)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    context.set_lower_bound(index, first_index)?;
    context.set_upper_bound(index, last_index)?;

    let unsupported = context
        .domain(index)
        .values()
        .filter(|&value| !supports(&*context, value, array, rhs, first_index))
        .collect::<Vec<_>>();
    for value in unsupported {
        context.remove(index, value)?;
    }

    let mut rhs_support = IntervalDomain::empty();
    for value in context.domain(index).values() {
        if let Some(position) = array_position(value, array, first_index) {
            let _ = rhs_support.union_with(context.domain(array[position]));
        }
    }
    context.intersect(rhs, &rhs_support)?;

    if let Some(position) = context
        .fixed_value(index)
        .and_then(|value| array_position(value, array, first_index))
    {
        let selected = array[position];
        let rhs_domain = context.domain(rhs).clone();
        context.intersect(selected, &rhs_domain)?;
        let selected_domain = context.domain(selected).clone();
        context.intersect(rhs, &selected_domain)?;
    }

    Ok(())
}
