use crate::basic_types::Solution;

/// Receives the solutions found by a search, exactly once per solution and in the order in which
/// they are found.
pub trait SolutionListener {
    fn on_solution(&mut self, solution: &Solution);
}

impl<F: FnMut(&Solution)> SolutionListener for F {
    fn on_solution(&mut self, solution: &Solution) {
        self(solution)
    }
}

/// A [`SolutionListener`] which keeps the solutions it receives.
///
/// With a record limit only the first `limit` solutions are kept, but all solutions are counted.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    solutions: Vec<Solution>,
    record_limit: Option<usize>,
    num_solutions: u64,
}

impl RecordingListener {
    pub fn new() -> RecordingListener {
        RecordingListener::default()
    }

    pub fn with_record_limit(record_limit: usize) -> RecordingListener {
        RecordingListener {
            record_limit: Some(record_limit),
            ..Default::default()
        }
    }

    /// The recorded solutions, in the order in which they were found.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    /// The number of solutions received, including those beyond the record limit.
    pub fn num_solutions(&self) -> u64 {
        self.num_solutions
    }
}

impl SolutionListener for RecordingListener {
    fn on_solution(&mut self, solution: &Solution) {
        self.num_solutions += 1;
        if self
            .record_limit
            .map_or(true, |limit| self.solutions.len() < limit)
        {
            self.solutions.push(solution.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_limit_bounds_the_kept_solutions() {
        let mut listener = RecordingListener::with_record_limit(2);

        for _ in 0..5 {
            listener.on_solution(&Solution::default());
        }

        assert_eq!(2, listener.solutions().len());
        assert_eq!(5, listener.num_solutions());
    }

    #[test]
    fn closures_are_listeners() {
        let mut count = 0;
        {
            let mut listener = |_: &Solution| count += 1;
            listener.on_solution(&Solution::default());
            listener.on_solution(&Solution::default());
        }

        assert_eq!(2, count);
    }
}
