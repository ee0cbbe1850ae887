//! A [`TerminationCondition`] is polled by the search before every decision. It indicates when
//! the search should stop, even though the search space has not been exhausted. The most common
//! example is [`TimeBudget`], which gives the search a certain amount of time to complete.

mod cancellation;
mod combinator;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use cancellation::Cancellation;
pub use cancellation::CancellationToken;
pub use combinator::Combinator;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines
/// when the search should give up looking for more solutions.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for Box<T> {
    fn should_stop(&mut self) -> bool {
        self.as_mut().should_stop()
    }

    fn decision_has_been_made(&mut self) {
        self.as_mut().decision_has_been_made()
    }
}
