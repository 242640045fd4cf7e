//! Engagement potential: questions, calls to action, emoji and caps use, and
//! self-promotion, all measured over the whole post.

use regex::Regex;
use std::sync::LazyLock;

use crate::scoring::{matches_any, pattern, pattern_ci, pattern_table};

pub const ENGAGEMENT_CAP: i32 = 25;

static CTA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    pattern_table(&[
        r"reply\s",
        r"comment\s",
        r"share\s",
        r"what\s+do\s+you\s+think",
        r"agree\s*\?",
        r"disagree\s*\?",
        r"\[drop\s+your",
    ])
});

static WHAT_DO_YOU_THINK: LazyLock<Regex> = LazyLock::new(|| pattern_ci(r"what\s+do\s+you\s+think"));

static SELF_PROMO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    pattern_table(&[
        r"check\s+out\s+my",
        r"buy\s+my",
        r"get\s+my",
        r"subscribe\s+to\s+my",
        r"follow\s+me",
        r"link\s+in\s+bio",
        r"use\s+(?:my\s+)?code",
        r"(?:50|25|20|10)%\s+off",
    ])
});

// Case-sensitive: only shouted words count. ASCII boundaries, so the ASCII run
// inside an accented word ("CAFÉ") still counts.
static CAPS_WORD: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?-u:\b)[A-Z]{3,}(?-u:\b)"));

/// Emoji in the pictograph block U+1F300..=U+1F9FF.
pub fn emoji_count(text: &str) -> usize {
    text.chars()
        .filter(|ch| (0x1F300..=0x1F9FF).contains(&(*ch as u32)))
        .count()
}

/// Words made of three or more uppercase ASCII letters.
pub fn caps_word_count(text: &str) -> usize {
    CAPS_WORD.find_iter(text).count()
}

pub fn has_call_to_action(text: &str) -> bool {
    matches_any(&CTA_PATTERNS, text)
}

pub fn is_self_promotion(text: &str) -> bool {
    matches_any(&SELF_PROMO_PATTERNS, text)
}

pub fn engagement_score(text: &str) -> i32 {
    let mut score = 0;

    if text.contains('?') {
        score += 10;
    }

    if has_call_to_action(text) {
        score += 10;
    }

    if WHAT_DO_YOU_THINK.is_match(text) {
        score += 5;
    }

    match emoji_count(text) {
        0 => {}
        1..=3 => score += 5,
        _ => score -= 5,
    }

    match caps_word_count(text) {
        0 => {}
        1..=2 => score += 5,
        _ => score -= 10,
    }

    if is_self_promotion(text) {
        score -= 15;
    }

    score.min(ENGAGEMENT_CAP)
}
