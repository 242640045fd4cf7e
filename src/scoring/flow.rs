//! Narrative flow of a thread as shown next to thread templates.
//!
//! This is a display signal only. The thread score uses its own coherence measure
//! in [`crate::scoring::thread`]; the two are kept apart so that changing one never
//! moves the other.

use regex::Regex;
use std::sync::LazyLock;

use crate::scoring::thread::{mean, std_dev};
use crate::scoring::{matches_any, pattern_ci, pattern_table};

pub const FLOW_MIN: i32 = -10;
pub const FLOW_MAX: i32 = 15;

static TRANSITIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    pattern_table(&[
        r"^but\s",
        r"^however\s",
        r"^so\s",
        r"^therefore\s",
        r"^meanwhile\s",
        r"^next\s",
        r"^then\s",
        r"^first\s",
        r"^second\s",
        r"^finally\s",
        r"^in\s+conclusion\s",
        r"^that\s+said\s",
        r"^here's\s+the\s+thing\s",
    ])
});

static NARRATIVE_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    pattern_table(&[
        r"^let\s+me\s+explain",
        r"^here's\s+why",
        r"^the\s+problem\s+is",
        r"^the\s+solution\s+is",
        r"^remember\s+when",
        r"^going\s+back\s+to",
        r"^as\s+i\s+mentioned",
    ])
});

static PACING_INDICATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    pattern_table(&[
        r"^quick\s",
        r"^wait\s",
        r"^hold\s+on\s",
        r"^pause\s",
        r"^breaking\s+it\s+down",
        r"^tldr",
    ])
});

static OPENS_WITH_WHY_OR_WHAT: LazyLock<Regex> = LazyLock::new(|| pattern_ci(r"^(?:why|what)\s"));
static CLOSING_CTA: LazyLock<Regex> = LazyLock::new(|| pattern_ci(r"(?:reply|comment|share)\s"));

/// Score how well a sequence of posts reads as one piece, in `FLOW_MIN..=FLOW_MAX`.
/// Fewer than two posts have no flow and score 0.
pub fn analyze_flow(posts: &[&str]) -> i32 {
    let (Some(first), Some(last)) = (posts.first(), posts.last()) else {
        return 0;
    };
    if posts.len() < 2 {
        return 0;
    }

    let mut score = 0;

    if posts[1..].iter().any(|post| matches_any(&TRANSITIONS, post)) {
        score += 5;
    }

    if posts.iter().any(|post| matches_any(&NARRATIVE_MARKERS, post)) {
        score += 5;
    }

    if posts.iter().any(|post| matches_any(&PACING_INDICATORS, post)) {
        score += 3;
    }

    let lengths: Vec<f64> = posts
        .iter()
        .map(|post| post.chars().count() as f64)
        .collect();
    let avg_length = mean(&lengths);
    if avg_length > 0.0 {
        let variation = std_dev(&lengths) / avg_length;
        if variation > 0.3 && variation < 0.7 {
            score += 5;
        }
    }

    if first.contains('?') || OPENS_WITH_WHY_OR_WHAT.is_match(first) {
        score += 3;
    }

    if last.contains('?') || CLOSING_CTA.is_match(last) {
        score += 4;
    }

    if posts.len() > 3 {
        if lengths.iter().all(|len| (len - avg_length).abs() < 20.0) {
            score -= 5;
        }
        if lengths.iter().all(|len| *len < 80.0) {
            score -= 5;
        }
    }

    score.clamp(FLOW_MIN, FLOW_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_post_has_no_flow() {
        assert_eq!(analyze_flow(&[]), 0);
        assert_eq!(analyze_flow(&["Why does this matter?"]), 0);
    }

    #[test]
    fn question_opener_and_closer() {
        let posts = ["Why do builds get slow?", "Caches go stale over time.", "Seen this too?"];
        // lengths 23, 26, 14: cv ~0.24, no bonus
        assert_eq!(analyze_flow(&posts), 7);
    }

    #[test]
    fn transitions_only_count_after_the_first_post() {
        let posts = ["But this one opens the thread", "and this one does not"];
        assert_eq!(analyze_flow(&posts), 0);
        let posts = ["This one opens the thread", "But this one follows it"];
        assert_eq!(analyze_flow(&posts), 5);
    }

    #[test]
    fn monotonous_short_threads_are_penalised() {
        let posts = ["aaaa bbbb", "cccc dddd", "eeee ffff", "gggg hhhh"];
        assert_eq!(analyze_flow(&posts), -10);
    }

    #[test]
    fn score_is_clamped_to_max() {
        let posts = [
            "Why most teams ship slowly, a thread?",
            "Let me explain what I saw over the last three years working with a dozen companies of every size.",
            "Quick aside before we go on.",
            "So here is what changed for us once we fixed the review queue and stopped batching merges at the end of each week.",
            "Reply with yours?",
        ];
        assert_eq!(analyze_flow(&posts), FLOW_MAX);
    }
}
