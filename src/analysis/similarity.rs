use crate::error::{Result, TrackerError};
use crate::models::issue::Issue;
use serde::{Deserialize, Serialize};

/// A corpus issue scored at strictly more than this fraction of the query
/// keywords qualifies as a likely duplicate.
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

/// The shortlist is advisory; three entries is enough for a human to scan.
pub const MAX_CANDIDATES: usize = 3;

const MIN_QUERY_CHARS: usize = 3;

/// A likely duplicate of a candidate title. Ephemeral: produced for one
/// creation attempt, shown to the user, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityCandidate {
    pub issue: Issue,
    pub score: f64,
}

/// True when the title is too short to be worth a duplicate check. The
/// creation workflow uses this to skip the corpus fetch entirely;
/// `find_similar` defends the same precondition on its own.
pub fn is_trivial_query(query: &str) -> bool {
    query.trim().chars().count() < MIN_QUERY_CHARS
}

fn query_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(' ')
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Score `query` against every issue title in `corpus` and return up to
/// [`MAX_CANDIDATES`] likely duplicates, best first.
///
/// Each retained query keyword is tested for substring containment in the
/// lower-cased corpus title; the score is the matched fraction of the
/// *query's* keywords, so similarity is deliberately asymmetric. Substring
/// matching over-matches by design ("do" hits "door"): the shortlist is
/// reviewed by a human, so recall beats precision.
///
/// A corpus record with a blank title is a caller contract violation and
/// fails the whole query with [`TrackerError::InvalidRecord`].
pub fn find_similar(query: &str, corpus: &[Issue]) -> Result<Vec<SimilarityCandidate>> {
    if is_trivial_query(query) {
        return Ok(Vec::new());
    }

    let keywords = query_keywords(query);
    if keywords.is_empty() {
        // Only short or whitespace words; nothing to divide by.
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for issue in corpus {
        if issue.title.trim().is_empty() {
            return Err(TrackerError::InvalidRecord(issue.id.clone()));
        }

        let haystack = issue.title.to_lowercase();
        let matched = keywords
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .count();
        let score = matched as f64 / keywords.len() as f64;

        if score > SIMILARITY_THRESHOLD {
            candidates.push(SimilarityCandidate {
                issue: issue.clone(),
                score,
            });
        }
    }

    // Stable sort: equal scores keep their corpus order, first seen wins.
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(MAX_CANDIDATES);

    log::debug!(
        "duplicate check for {query:?}: {} keyword(s), {} candidate(s)",
        keywords.len(),
        candidates.len()
    );

    Ok(candidates)
}
