//! Summary Resolver.
//!
//! Tries an exact-title lookup first and falls back to keyword search plus
//! candidate selection. Never fails: every provider error is logged and
//! reported as `None`.

use pathfinder_core::location::{PageKind, SummaryRecord};
use pathfinder_core::provider::KnowledgeBase;
use tracing::{debug, info, warn};

use crate::domain::candidates::choose_candidate;

/// Returns the best-matching summary for `query`, or `None` if nothing
/// usable was found.
pub async fn get_summary(query: &str, knowledge: &dyn KnowledgeBase) -> Option<SummaryRecord> {
    match knowledge.page_summary(query).await {
        Ok(record) if record.kind == PageKind::Standard => {
            debug!(query, title = %record.title, "exact title lookup hit");
            return Some(record);
        }
        Ok(record) => {
            debug!(query, title = %record.title, "exact title is a disambiguation page");
        }
        Err(err) => {
            debug!(query, error = %err, "exact title lookup missed, falling back to search");
        }
    }

    let hits = match knowledge.search(query).await {
        Ok(hits) => hits,
        Err(err) => {
            warn!(query, error = %err, "knowledge base search failed");
            return None;
        }
    };

    let Some(candidate) = choose_candidate(&hits) else {
        info!(query, "knowledge base search returned no results");
        return None;
    };
    debug!(query, title = %candidate.title, candidates = hits.len(), "search candidate chosen");

    match knowledge.page_summary(&candidate.title).await {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(query, title = %candidate.title, error = %err, "summary fetch failed");
            None
        }
    }
}
