//! Advice derived from a scored post or thread.
//!
//! Suggestions are structured and prioritised; warnings are plain strings that are
//! always shown. Single-post and thread rules overlap in spirit but are kept as
//! separate tables because they look at different inputs.

use regex::Regex;
use std::sync::LazyLock;

use crate::scoring::{caps_word_count, hashtag_count, pattern_ci};
use crate::{
    MediaType, PostInput, Priority, ScoreBreakdown, ScoreResult, Suggestion, SuggestionKind,
    ThreadScoreBreakdown,
};

/// Most posts a thread can carry before readers drop off.
pub const MAX_THREAD_POSTS: usize = 25;

static THREAD_CLOSING_CTA: LazyLock<Regex> = LazyLock::new(|| {
    pattern_ci(
        r"(?-u:\b)(?:reply|comment|share|retweet|follow|join|subscribe|learn|check|visit|read|download)(?-u:\b)",
    )
});

/// Stable sort by priority: critical first, generation order within a priority.
pub fn sort_by_priority(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(|suggestion| suggestion.priority);
}

pub fn post_suggestions(input: &PostInput, breakdown: &ScoreBreakdown) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if input.media == MediaType::None {
        suggestions.push(Suggestion::new(
            SuggestionKind::Media,
            Priority::High,
            "Add an image or video for +20-40 points",
            "+20 to +40",
        ));
    }

    if input.has_link && !input.is_premium {
        suggestions.push(Suggestion::new(
            SuggestionKind::Critical,
            Priority::Critical,
            "External links get near-zero reach without Premium",
            "-50",
        ));
    }

    if breakdown.hook < 10 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Hook,
            Priority::High,
            "Strengthen your hook with a number, question, or pattern interrupt",
            "+10 to +25",
        ));
    }

    if !input.text.contains('?') {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::Medium,
            "Add a question to increase replies",
            "+10",
        ));
    }

    if breakdown.timing < 0 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Timing,
            Priority::Medium,
            "Consider posting during peak hours (8-11am)",
            "+15",
        ));
    }

    sort_by_priority(&mut suggestions);
    suggestions
}

pub fn post_warnings(input: &PostInput) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.has_link && !input.is_premium {
        warnings.push("CRITICAL: Links without Premium get near-zero reach".to_string());
    }

    if caps_word_count(&input.text) >= 3 {
        warnings.push("Too many ALL CAPS words may trigger spam filters".to_string());
    }

    if hashtag_count(&input.text) >= 4 {
        warnings.push("Too many hashtags signals spam to the algorithm".to_string());
    }

    warnings
}

/// Thread advice. `posts` and `scores` are the non-blank posts in authored order
/// and their individual results; fewer than two posts get no advice.
pub fn thread_suggestions(
    posts: &[&PostInput],
    scores: &[ScoreResult],
    breakdown: &ThreadScoreBreakdown,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if posts.len() < 2 || scores.len() < 2 {
        return suggestions;
    }

    let totals: Vec<i32> = scores.iter().map(|score| score.total).collect();

    // Opening post carries the hook for the whole thread.
    let opening = &scores[0];
    if opening.breakdown.hook < 15 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Hook,
            Priority::High,
            "Strengthen your opening tweet with a compelling hook",
            "+15 to +25",
        ));
    }
    if opening.total < 60 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Hook,
            Priority::High,
            "First tweet sets the tone - aim for 60+ score to hook readers",
            "+20",
        ));
    }

    if posts.len() >= 4 {
        let middle = &totals[1..totals.len() - 1];
        let weak_middle = middle.iter().filter(|total| **total < 50).count();
        let middle_avg = middle.iter().sum::<i32>() as f64 / middle.len() as f64;

        if weak_middle > 0 {
            suggestions.push(Suggestion::new(
                SuggestionKind::Engagement,
                Priority::Medium,
                format!("{} middle tweet(s) are weak - maintain momentum", weak_middle),
                "+10 to +20",
            ));
        }
        if middle_avg < 55.0 {
            suggestions.push(Suggestion::new(
                SuggestionKind::Engagement,
                Priority::Medium,
                "Build momentum in middle tweets with questions or insights",
                "+10",
            ));
        }
    }

    // First occurrence of the best post; the last two positions count as the end.
    let peak_index = peak_position(&totals);
    let peaks_at_end = peak_index + 2 >= totals.len();
    if !peaks_at_end && (peak_index as f64) < totals.len() as f64 * 0.5 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::Medium,
            "Consider building to a climax in the final third of your thread",
            "+10 to +15",
        ));
    }

    let closing_text = posts[posts.len() - 1].text.as_str();
    if !closing_text.contains('?') && !THREAD_CLOSING_CTA.is_match(closing_text) {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::High,
            "Add a call-to-action in your final tweet (question, invite, etc.)",
            "+15 to +20",
        ));
    }

    if totals[totals.len() - 1] < 55 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::High,
            "Strengthen your closing tweet - it drives final engagement",
            "+15",
        ));
    }

    if breakdown.flow_coherence < 0.0 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::Medium,
            "Improve thread flow with consistent length and style",
            "+5 to +10",
        ));
    }

    if breakdown.pacing < 0.0 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::Medium,
            "Build momentum toward the end rather than front-loading quality",
            "+10",
        ));
    }

    if breakdown.consistency < 0.0 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Engagement,
            Priority::Low,
            "Balance tweet quality - avoid big gaps between strong and weak tweets",
            "+5",
        ));
    }

    let critical_posts = totals.iter().filter(|total| **total < 50).count();
    if critical_posts > 0 {
        suggestions.push(Suggestion::new(
            SuggestionKind::Critical,
            Priority::Critical,
            format!(
                "{} tweet(s) have critical scores - revise before posting",
                critical_posts
            ),
            "Thread performance limited by weakest tweets",
        ));
    }

    sort_by_priority(&mut suggestions);
    suggestions
}

/// Structural warnings for a thread, computed over every post the caller supplied,
/// blank ones included.
pub fn thread_warnings(posts: &[PostInput]) -> Vec<String> {
    let mut warnings = Vec::new();

    let blank = posts
        .iter()
        .filter(|post| post.text.trim().is_empty())
        .count();
    let active = posts.len() - blank;

    if active < 2 {
        warnings.push("Threads need at least 2 tweets".to_string());
    }

    if active > MAX_THREAD_POSTS {
        warnings.push(format!(
            "Threads over {} tweets may lose reader attention",
            MAX_THREAD_POSTS
        ));
    }

    if blank > 0 {
        warnings.push(format!("{} empty tweet(s) will be skipped", blank));
    }

    warnings
}

fn peak_position(totals: &[i32]) -> usize {
    let mut peak = 0;
    for (index, total) in totals.iter().enumerate() {
        if *total > totals[peak] {
            peak = index;
        }
    }
    peak
}
