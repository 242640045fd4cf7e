use regex::Regex;
use std::sync::LazyLock;

use crate::scoring::{pattern, pattern_ci};

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"#[A-Za-z0-9_]+"));
static THREAD_MARKER: LazyLock<Regex> = LazyLock::new(|| pattern_ci(r"🧵|thread:"));
static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?m)^\s*[0-9•\-]\s"));

pub fn hashtag_count(text: &str) -> usize {
    HASHTAG.find_iter(text).count()
}

fn length_score(char_count: usize) -> i32 {
    match char_count {
        100..=200 => 10,
        1..=49 => -5,
        0..=250 => 0,
        _ => -5,
    }
}

/// Content quality: length band, thread marker, list formatting and hashtag use.
pub fn quality_score(text: &str) -> i32 {
    let mut score = length_score(text.chars().count());

    if THREAD_MARKER.is_match(text) {
        score += 5;
    }

    if LIST_LINE.is_match(text) {
        score += 5;
    }

    match hashtag_count(text) {
        0 => {}
        1..=3 => score += 5,
        _ => score -= 10,
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(quality_score(""), 0);
    }

    #[test]
    fn length_bands() {
        assert_eq!(length_score(10), -5);
        assert_eq!(length_score(49), -5);
        assert_eq!(length_score(50), 0);
        assert_eq!(length_score(99), 0);
        assert_eq!(length_score(100), 10);
        assert_eq!(length_score(200), 10);
        assert_eq!(length_score(250), 0);
        assert_eq!(length_score(251), -5);
    }

    #[test]
    fn length_counts_characters_not_utf16_units() {
        // 49 characters, 50 UTF-16 units: still in the short band
        let text = format!("{}🚀", "a".repeat(48));
        assert_eq!(quality_score(&text), -5);
        let text = format!("{}🚀", "a".repeat(49));
        assert_eq!(quality_score(&text), 0);
    }

    #[test]
    fn thread_marker_and_list_lines() {
        let text = "Thread: lessons\n- ship early\n- ship often";
        // short (-5) + marker (+5) + list (+5)
        assert_eq!(quality_score(text), 5);
    }

    #[test]
    fn numbered_list_needs_space_after_digit() {
        assert_eq!(quality_score("tips\n1 sleep"), 0);
        assert_eq!(quality_score("tips\n1. sleep"), -5);
    }

    #[test]
    fn hashtag_bands() {
        assert_eq!(hashtag_count("#rust #async"), 2);
        assert_eq!(quality_score("#rust #async"), 0);
        assert_eq!(quality_score("#a #b #c #d"), -15);
    }
}
