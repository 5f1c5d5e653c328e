use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// One page of search or discovery results, in the order the remote
/// returned them (relevance order).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchPage {
    pub movies: Vec<Movie>,
    /// Total result count across all pages. Only trustworthy on page 1;
    /// absent on empty or error-shaped responses.
    pub total_results: Option<u32>,
    /// Error message the remote reported inside an HTTP-success body.
    pub error: Option<String>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
