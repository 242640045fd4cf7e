//! Ranking of rewritten drafts.
//!
//! Rewrites arrive as raw strings from an external generator. Each one is scored in
//! the context of the draft it replaces so that the candidates can be compared.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::{score_post, Grade, PostInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub text: String,
    pub score: i32,
    pub grade: Grade,
}

/// Score every candidate with the draft's media, link, account and time context and
/// return them best first. Ties keep candidate order. Blank candidates are dropped
/// and repeated candidates are kept once. Candidates are scored exactly as given;
/// surrounding whitespace only matters for spotting repeats.
pub fn rank_alternatives(draft: &PostInput, candidates: &[String]) -> Vec<RankedAlternative> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked: Vec<RankedAlternative> = candidates
        .iter()
        .filter(|candidate| !candidate.trim().is_empty())
        .filter(|candidate| seen.insert(normalize_text(candidate)))
        .map(|candidate| {
            let result = score_post(&draft.with_text(candidate.as_str()));
            RankedAlternative {
                text: candidate.clone(),
                score: result.total,
                grade: result.grade,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(candidates = candidates.len(), ranked = ranked.len(), "ranked alternatives");
    ranked
}

fn normalize_text(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_and_spacing() {
        assert_eq!(normalize_text("  Hello   WORLD "), "hello world");
    }
}
