use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

use crate::partcp_assert_moderate;

/// The source of randomness used by the selectors of a search.
///
/// Tests replace it with a generator which returns a fixed sequence of indices, so that random
/// choices become deterministic.
pub trait Random: Debug {
    /// Generates a random usize in the provided range with equal probability; this can be seen as
    /// sampling from a uniform distribution in the range `[range.start, range.end)`
    ///
    /// # Example
    /// ```rust
    /// # use partcp_core::rand::rngs::SmallRng;
    /// # use partcp_core::rand::SeedableRng;
    /// # use partcp_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let elements = vec!["This", "is", "a", "test"];
    /// let selected_index = rng.generate_usize_in_range(0..elements.len());
    /// assert!(selected_index < elements.len());
    /// ```
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

// Every seedable generator of the `rand` crate, such as `SmallRng`, can be handed to a search.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        partcp_assert_moderate!(!range.is_empty(), "Cannot sample from the empty range {range:?}");
        self.gen_range(range)
    }
}
