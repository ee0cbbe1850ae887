mod constraint_id;
mod domain;
mod domains;
mod propagation_context;
mod propagator_queue;
mod store;
mod variable_names;
mod variables;

pub use constraint_id::ConstraintId;
pub use domain::DomainUpdate;
pub use domain::EmptyDomain;
pub use domain::IntervalDomain;
pub(crate) use propagation_context::PropagationContext;
pub(crate) use propagation_context::ReadDomains;
pub use store::Snapshot;
pub use store::Store;
pub use variables::DomainId;
pub use variables::StoreId;
