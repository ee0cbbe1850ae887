//! Contains the traits which define how a search makes decisions.
//!
//! A decision consists of two choices:
//! - The [`VariableSelector`] picks which unfixed variable to branch on next; the main method of
//!   this trait is [`VariableSelector::select_variable`]. An example implementation is
//!   [`LargestDomain`].
//! - The [`ValueSelector`] picks which of the untried values of that variable to assign first;
//!   the main method of this trait is [`ValueSelector::select_value`]. An example implementation
//!   is [`InDomainMin`].
//!
//! Both are given a [`SelectionContext`] which provides read access to the domains of the store
//! and to a [`crate::Random`] generator.

mod selection_context;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use selection_context::SelectionContext;

#[cfg(doc)]
use crate::branching::value_selection::InDomainMin;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::LargestDomain;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
