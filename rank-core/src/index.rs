use std::{future::Future, pin::Pin};

use crate::errors::rank_error::RankError;
use crate::structs::candidate::Candidate;

/// Future returned by [`ProductIndex::search`].
pub type SearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Candidate>, RankError>> + Send + 'a>>;

/// Vector index consumed by the ranker.
///
/// Implementations return candidates best-first by their own similarity
/// metric. That order is the tie-break after lexical scoring, so it must be
/// preserved.
pub trait ProductIndex: Send + Sync {
    fn search<'a>(&'a self, biased_query: &'a str, candidate_count: usize) -> SearchFuture<'a>;
}
