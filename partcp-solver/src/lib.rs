//! # partcp-solver
//! Models for the placement and classification of parts, built on top of [`partcp_core`].
//!
//! Every model in [`models`] declares its variables and constraints in a [`core::Store`] and
//! returns the variables a search should label. The `partcp-solver` binary enumerates the
//! solutions of these models from the command line.

pub use partcp_core as core;

pub mod models;
