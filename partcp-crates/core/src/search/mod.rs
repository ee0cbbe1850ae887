//! Contains the depth-first search which enumerates the solutions of a [`crate::Store`].
//!
//! A [`DepthFirstSearch`] is configured with the variables to label and a pair of selectors. It
//! can be driven lazily through a [`SolutionIterator`], or to completion with
//! [`DepthFirstSearch::labeling`], which reports every solution to a [`SolutionListener`].

mod depth_first_search;
mod search_statistics;
mod solution_iterator;
mod solution_listener;

pub use depth_first_search::DepthFirstSearch;
pub use search_statistics::SearchStatistics;
pub use solution_iterator::IteratedSolution;
pub use solution_iterator::SearchStatus;
pub use solution_iterator::SearchSummary;
pub use solution_iterator::SolutionIterator;
pub use solution_listener::RecordingListener;
pub use solution_listener::SolutionListener;
