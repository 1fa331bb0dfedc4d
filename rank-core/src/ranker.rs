//! Query → biased query → over-fetched candidates → lexical rerank → payload.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::category_hint::CategoryHintDetector;
use crate::errors::rank_error::RankError;
use crate::index::ProductIndex;
use crate::keyword_score::{hint_bonus, keyword_score};
use crate::sanitize::sanitize_candidate;
use crate::structs::candidate::Candidate;
use crate::structs::product_record::ScoredCandidate;
use crate::structs::ranker_config::{CANDIDATE_LIMIT, RESULT_LIMIT, RankerConfig};
use crate::structs::response_payload::ResponsePayload;

/// Stateless ranking pipeline over an injected vector index.
///
/// `rank` never fails: index errors and timeouts degrade to the no-match
/// payload. Callers that must not search on empty input have to check the
/// query themselves; an empty query still goes to the index.
#[derive(Clone)]
pub struct ProductRanker {
    index: Arc<dyn ProductIndex>,
    hints: CategoryHintDetector,
    cfg: RankerConfig,
}

impl ProductRanker {
    pub fn new(index: Arc<dyn ProductIndex>, cfg: RankerConfig) -> Self {
        Self {
            index,
            hints: CategoryHintDetector::default(),
            cfg,
        }
    }

    /// Ranks catalog products for `query`.
    pub async fn rank(&self, query: &str) -> ResponsePayload {
        let hint = self.hints.detect(query);
        let biased = format!("{query} {hint}").trim().to_string();

        info!(
            target: "rank_core::rank",
            query = query,
            hint = %hint,
            fetch_k = self.cfg.fetch_k,
            "rank: start"
        );

        let mut candidates = match self.fetch(&biased).await {
            Ok(c) => c,
            Err(e) => {
                warn!(target: "rank_core::rank", error = %e, "rank: index unavailable, returning no-match");
                return ResponsePayload::no_match();
            }
        };
        candidates.truncate(CANDIDATE_LIMIT);

        if candidates.is_empty() {
            info!(target: "rank_core::rank", "rank: no candidates");
            return ResponsePayload::no_match();
        }

        let products = rerank(query, &hint, &candidates);

        info!(
            target: "rank_core::rank",
            candidates = candidates.len(),
            returned = products.len(),
            "rank: finished"
        );

        ResponsePayload::best_matches(products)
    }

    /// [`Self::rank`] rendered as the JSON the agent consumes.
    pub async fn rank_json(&self, query: &str) -> String {
        let payload = self.rank(query).await;
        match serde_json::to_string(&payload) {
            Ok(s) => s,
            Err(e) => {
                warn!(target: "rank_core::rank", error = %e, "rank_json: serialization failed");
                serde_json::to_string(&ResponsePayload::no_match()).unwrap_or_default()
            }
        }
    }

    async fn fetch(&self, biased: &str) -> Result<Vec<Candidate>, RankError> {
        let timeout = self.cfg.search_timeout();
        match tokio::time::timeout(timeout, self.index.search(biased, self.cfg.fetch_k)).await {
            Ok(res) => res,
            Err(_) => Err(RankError::Timeout {
                secs: timeout.as_secs(),
            }),
        }
    }
}

/// Sanitizes, scores and orders candidates; keeps the top [`RESULT_LIMIT`].
///
/// Ties keep retrieval order because `sort_by` is stable.
fn rerank(query: &str, hint: &str, candidates: &[Candidate]) -> Vec<crate::ProductRecord> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|c| {
            let record = sanitize_candidate(c);
            let score = keyword_score(query, &record.title, &record.brand, &record.category_path)
                + hint_bonus(&record.category_path, hint);
            ScoredCandidate { record, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    for s in scored.iter().take(RESULT_LIMIT) {
        debug!(
            target: "rank_core::rank",
            title = %s.record.title,
            score = s.score,
            "rerank: kept"
        );
    }

    scored
        .into_iter()
        .take(RESULT_LIMIT)
        .map(|s| s.record)
        .collect()
}
