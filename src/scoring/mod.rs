pub mod account;
pub mod engagement;
pub mod flow;
pub mod hook;
pub mod media;
pub mod quality;
pub mod thread;
pub mod timing;

use regex::{Regex, RegexBuilder};

pub use account::account_score;
pub use engagement::{caps_word_count, emoji_count, engagement_score};
pub use flow::analyze_flow;
pub use hook::{hook_score, hook_type, HookType};
pub use media::media_score;
pub use quality::{hashtag_count, quality_score};
pub use timing::timing_score;

/// Compile a fixed pattern table, case-insensitively.
///
/// The tables are literals in this crate, so a pattern that fails to compile is a
/// programming error caught by the analyzer unit tests.
pub(crate) fn pattern_table(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|pattern| pattern_ci(pattern)).collect()
}

pub(crate) fn pattern_ci(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|err| panic!("invalid scoring pattern {pattern:?}: {err}"))
}

pub(crate) fn pattern(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid scoring pattern {pattern:?}: {err}"))
}

pub(crate) fn matches_any(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}
