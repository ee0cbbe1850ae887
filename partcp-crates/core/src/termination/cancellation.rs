use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A handle through which a running search can be cancelled from another thread.
///
/// The search observes the cancellation before its next decision and stops with a terminated
/// status.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// The [`TerminationCondition`] which triggers once this token is cancelled.
    pub fn termination(&self) -> Cancellation {
        Cancellation {
            token: self.clone(),
        }
    }
}

/// A [`TerminationCondition`] which triggers when its [`CancellationToken`] is cancelled.
#[derive(Clone, Debug)]
pub struct Cancellation {
    token: CancellationToken,
}

impl TerminationCondition for Cancellation {
    fn should_stop(&mut self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_any_clone_stops_the_search() {
        let token = CancellationToken::new();
        let mut termination = token.termination();
        assert!(!termination.should_stop());

        let handle = token.clone();
        std::thread::spawn(move || handle.cancel())
            .join()
            .unwrap();

        assert!(termination.should_stop());
    }
}
