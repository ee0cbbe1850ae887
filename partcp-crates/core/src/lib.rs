//! # partcp
//! A finite-domain constraint solver which enumerates the solutions of small combinatorial
//! models, such as the placement and classification of parts on a strand.
//!
//! A model is built in a [`Store`]: integer variables are declared with their initial domains,
//! after which [`constraints`] are imposed on them. Every constraint is propagated as soon as it
//! is imposed, so an inconsistent model is detected while it is being built. The solutions are
//! then enumerated by a [`search::DepthFirstSearch`].
//!
//! # Creating variables
//! ```rust
//! # use partcp_core::Store;
//! let mut store = Store::default();
//!
//! // An integer variable with the domain [0, 10].
//! let x = store.new_named_bounded_integer(0, 10, "x").unwrap();
//! // A variable which can take the values 100 and 300.
//! let strength = store.new_named_sparse_integer([100, 300], "strength").unwrap();
//! // A 0/1 variable.
//! let b = store.new_boolean();
//!
//! assert_eq!(11, store.size(x));
//! assert_eq!("{100, 300}", store.domain(strength).to_string());
//! assert_eq!(1, store.upper_bound(b));
//! ```
//!
//! # Imposing constraints
//! Constraints are created with the functions in [`constraints`] and combined with reification
//! and the logical connectives.
//! ```rust
//! # use partcp_core::constraints;
//! # use partcp_core::Store;
//! let mut store = Store::default();
//! let x = store.new_named_bounded_integer(1, 3, "x").unwrap();
//! let b = store.new_named_boolean("b").unwrap();
//!
//! let _ = store.impose(constraints::reified(constraints::equals(x, 2), b)).unwrap();
//! let _ = store
//!     .impose(constraints::if_then(
//!         constraints::equals(b, 1),
//!         constraints::greater_than(x, 5),
//!     ))
//!     .unwrap();
//!
//! // b = 1 would imply x > 5, so b is false and x differs from 2.
//! assert_eq!(Some(0), store.value(b));
//! assert_eq!("{1, 3}", store.domain(x).to_string());
//! ```
//!
//! # Finding solutions
//! ```rust
//! # use partcp_core::constraints;
//! # use partcp_core::branching::value_selection::ValueSelectionStrategy;
//! # use partcp_core::branching::variable_selection::VariableSelectionStrategy;
//! # use partcp_core::search::DepthFirstSearch;
//! # use partcp_core::termination::Indefinite;
//! # use partcp_core::Store;
//! let mut store = Store::default();
//! let x = store.new_named_bounded_integer(1, 3, "x").unwrap();
//! let y = store.new_named_bounded_integer(1, 3, "y").unwrap();
//! let _ = store.impose(constraints::not_equals(x, y)).unwrap();
//!
//! let search = DepthFirstSearch::with_strategies(
//!     [x, y],
//!     VariableSelectionStrategy::InputOrder,
//!     ValueSelectionStrategy::InDomainMin,
//! )
//! .with_all_solutions(true);
//!
//! let solutions = search
//!     .solutions(&mut store, &mut Indefinite)
//!     .unwrap()
//!     .map(|solution| solution.to_string())
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(6, solutions.len());
//! assert_eq!("x=1, y=2", solutions[0]);
//! ```

pub mod asserts;
pub(crate) mod basic_types;
pub mod branching;
pub mod constraints;
pub mod containers;
pub(crate) mod engine;
pub mod search;
pub mod statistics;
pub mod termination;

pub use convert_case;
pub use rand;

pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::PropagationOutcome;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
pub use crate::basic_types::SolutionEntry;
pub use crate::basic_types::UpdateError;
pub use crate::engine::ConstraintId;
pub use crate::engine::DomainId;
pub use crate::engine::DomainUpdate;
pub use crate::engine::EmptyDomain;
pub use crate::engine::IntervalDomain;
pub use crate::engine::Snapshot;
pub use crate::engine::Store;
pub use crate::engine::StoreId;
