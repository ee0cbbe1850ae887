//! Contains the [`TieBreaker`] which decides between variables which a variable selector deems
//! equally good.

mod in_order_tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;

/// Whether a [`TieBreaker`] looks for the variable with the largest or the smallest value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

/// Receives variables together with a value describing how attractive they are and selects one
/// of the variables with the best value.
pub trait TieBreaker<Var, Value> {
    fn consider(&mut self, variable: Var, value: Value);

    /// Returns the selected variable and resets the tie-breaker.
    fn select(&mut self) -> Option<Var>;
}
