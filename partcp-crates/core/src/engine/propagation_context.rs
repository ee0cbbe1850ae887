use super::domains::Domains;
use crate::engine::DomainId;
use crate::engine::EmptyDomain;
use crate::engine::IntervalDomain;

/// Read access to the current domains of variables.
pub(crate) trait ReadDomains {
    fn domain(&self, var: DomainId) -> &IntervalDomain;

    fn lower_bound(&self, var: DomainId) -> i32 {
        self.domain(var).lower_bound()
    }

    fn upper_bound(&self, var: DomainId) -> i32 {
        self.domain(var).upper_bound()
    }

    fn contains(&self, var: DomainId, value: i32) -> bool {
        self.domain(var).contains(value)
    }

    fn is_fixed(&self, var: DomainId) -> bool {
        self.domain(var).is_singleton()
    }

    fn fixed_value(&self, var: DomainId) -> Option<i32> {
        self.domain(var).fixed_value()
    }
}

impl ReadDomains for Domains {
    fn domain(&self, var: DomainId) -> &IntervalDomain {
        self.get(var.variable)
    }
}

/// The view a constraint has on the store while it propagates: it can read every domain and
/// remove values from them.
#[derive(Debug)]
pub(crate) struct PropagationContext<'a> {
    domains: &'a mut Domains,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(domains: &'a mut Domains) -> Self {
        PropagationContext { domains }
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.domains.remove_value(var.variable, value).map(|_| ())
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.domains.remove_below(var.variable, bound).map(|_| ())
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) -> Result<(), EmptyDomain> {
        self.domains.remove_above(var.variable, bound).map(|_| ())
    }

    pub(crate) fn intersect(
        &mut self,
        var: DomainId,
        values: &IntervalDomain,
    ) -> Result<(), EmptyDomain> {
        self.domains.intersect_with(var.variable, values).map(|_| ())
    }

    pub(crate) fn assign(&mut self, var: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.intersect(var, &IntervalDomain::singleton(value))
    }
}

impl ReadDomains for PropagationContext<'_> {
    fn domain(&self, var: DomainId) -> &IntervalDomain {
        self.domains.domain(var)
    }
}
