mod model_error;
mod propagation_status;
pub(crate) mod random;
mod solution;
mod trail;

pub use model_error::ModelError;
pub use propagation_status::Inconsistency;
pub use propagation_status::PropagationOutcome;
pub use propagation_status::PropagationStatus;
pub use propagation_status::UpdateError;
pub use random::Random;
pub use solution::Solution;
pub use solution::SolutionEntry;
pub(crate) use trail::Trail;
