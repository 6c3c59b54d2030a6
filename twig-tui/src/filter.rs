use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use rayon::prelude::*;

/// Above this many candidates the match runs on the rayon pool
const PARALLEL_THRESHOLD: usize = 4096;

/// Case-insensitive subsequence filter. Scores are ignored: survivors keep their
/// listing order.
pub struct FuzzyFilter {
    matcher: SkimMatcherV2,
}

impl Default for FuzzyFilter {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl FuzzyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, candidate: &str, query: &str) -> bool {
        query.is_empty() || self.matches_folded(candidate, &query.to_lowercase())
    }

    /// The matcher only folds ASCII, so both sides are lowercased here first.
    /// `query` must already be lowercase.
    fn matches_folded(&self, candidate: &str, query: &str) -> bool {
        self.matcher
            .fuzzy_match(&candidate.to_lowercase(), query)
            .is_some()
    }

    pub fn filter<T>(&self, query: &str, candidates: &[T]) -> Vec<T>
    where
        T: AsRef<str> + Clone + Send + Sync,
    {
        if query.is_empty() {
            return candidates.to_vec();
        }
        let query = query.to_lowercase();
        if candidates.len() >= PARALLEL_THRESHOLD {
            // collect() on an indexed parallel iterator keeps input order
            return candidates
                .par_iter()
                .filter(|c| self.matches_folded(c.as_ref(), &query))
                .cloned()
                .collect();
        }
        candidates
            .iter()
            .filter(|c| self.matches_folded(c.as_ref(), &query))
            .cloned()
            .collect()
    }
}
