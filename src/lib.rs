pub mod alternatives;
pub mod config;
pub mod error;
pub mod scoring;
pub mod suggestions;
pub mod voice;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::scoring::{account, engagement, hook, media, quality, thread, timing};

pub use alternatives::{rank_alternatives, RankedAlternative};
pub use error::ScoreError;
pub use scoring::flow::analyze_flow;
pub use scoring::hook::{hook_type, HookType};
pub use voice::{voice_match_score, EmojiUsage, VoiceMatchBreakdown, VoiceMatchResult, VoiceProfile};

/// Every post starts from this many points before any factor is applied.
pub const BASE_SCORE: i32 = 40;

/// Warning carried by the terminal state of a thread with no usable posts.
pub const EMPTY_THREAD_WARNING: &str = "Thread needs at least 2 tweets with content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    None,
    Image,
    Video,
    Gif,
    Poll,
}

impl MediaType {
    pub fn label(self) -> &'static str {
        match self {
            MediaType::None => "none",
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Gif => "gif",
            MediaType::Poll => "poll",
        }
    }

    /// Points awarded for the attachment before any link ceiling is applied.
    pub fn base_score(self) -> i32 {
        match self {
            MediaType::None => 0,
            MediaType::Gif => 15,
            MediaType::Image => 20,
            MediaType::Poll => 20,
            MediaType::Video => 40,
        }
    }
}

impl FromStr for MediaType {
    type Err = ScoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "none" | "text" => Ok(MediaType::None),
            "image" | "photo" | "pic" => Ok(MediaType::Image),
            "video" | "vid" => Ok(MediaType::Video),
            "gif" => Ok(MediaType::Gif),
            "poll" => Ok(MediaType::Poll),
            _ => Err(ScoreError::InvalidMediaType(value.to_string())),
        }
    }
}

/// Everything the engine needs to score one post.
///
/// `post_time` is a local wall-clock time; when absent the post is scored as if it
/// were published now.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostInput {
    pub text: String,
    #[serde(default)]
    pub media: MediaType,
    #[serde(default)]
    pub has_link: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub post_time: Option<NaiveDateTime>,
}

impl PostInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_media(mut self, media: MediaType) -> Self {
        self.media = media;
        self
    }

    pub fn with_link(mut self, has_link: bool) -> Self {
        self.has_link = has_link;
        self
    }

    pub fn premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    pub fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }

    pub fn at(mut self, post_time: NaiveDateTime) -> Self {
        self.post_time = Some(post_time);
        self
    }

    /// Same context, different text. Used when re-scoring rewrites of a draft.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Base,
    Media,
    Hook,
    Engagement,
    Timing,
    Account,
    Quality,
}

impl Factor {
    pub fn label(self) -> &'static str {
        match self {
            Factor::Base => "Base Score",
            Factor::Media => "Media Type",
            Factor::Hook => "Hook Strength",
            Factor::Engagement => "Engagement Potential",
            Factor::Timing => "Post Timing",
            Factor::Account => "Account Status",
            Factor::Quality => "Content Quality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub media: i32,
    pub hook: i32,
    pub engagement: i32,
    pub timing: i32,
    pub account: i32,
    pub quality: i32,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> i32 {
        self.entries().iter().map(|(_, value)| value).sum()
    }

    pub fn entries(&self) -> [(Factor, i32); 7] {
        [
            (Factor::Base, self.base),
            (Factor::Media, self.media),
            (Factor::Hook, self.hook),
            (Factor::Engagement, self.engagement),
            (Factor::Timing, self.timing),
            (Factor::Account, self.account),
            (Factor::Quality, self.quality),
        ]
    }
}

/// Coarse label for a total. Variants are declared worst first so that `Ord`
/// follows the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Grade::Excellent
        } else if score >= 70.0 {
            Grade::Good
        } else if score >= 55.0 {
            Grade::Fair
        } else if score >= 40.0 {
            Grade::Poor
        } else {
            Grade::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Fair => "fair",
            Grade::Poor => "poor",
            Grade::Critical => "critical",
        }
    }
}

/// Suggestion urgency. Sorting ascending puts critical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Media,
    Hook,
    Engagement,
    Timing,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub message: String,
    pub impact: String,
}

impl Suggestion {
    pub fn new(
        kind: SuggestionKind,
        priority: Priority,
        message: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            message: message.into(),
            impact: impact.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: i32,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<Suggestion>,
    pub warnings: Vec<String>,
    pub grade: Grade,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreadScoreBreakdown {
    pub average_individual: f64,
    pub flow_coherence: f64,
    pub pacing: f64,
    pub consistency: f64,
}

impl ThreadScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.average_individual + self.flow_coherence + self.pacing + self.consistency
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadScoreResult {
    pub total: f64,
    pub breakdown: ThreadScoreBreakdown,
    pub individual_scores: Vec<ScoreResult>,
    pub suggestions: Vec<Suggestion>,
    pub warnings: Vec<String>,
    pub grade: Grade,
}

impl ThreadScoreResult {
    /// Terminal state for a thread without a single non-blank post.
    pub fn empty() -> Self {
        Self {
            total: 0.0,
            breakdown: ThreadScoreBreakdown::default(),
            individual_scores: Vec::new(),
            suggestions: Vec::new(),
            warnings: vec![EMPTY_THREAD_WARNING.to_string()],
            grade: Grade::Critical,
        }
    }
}

/// Score a single post.
///
/// Pure apart from the `post_time` default: identical input with an explicit time
/// always yields an identical result.
pub fn score_post(input: &PostInput) -> ScoreResult {
    let post_time = input
        .post_time
        .unwrap_or_else(|| Local::now().naive_local());

    let breakdown = ScoreBreakdown {
        base: BASE_SCORE,
        media: media::media_score(input.media, input.has_link, input.is_premium),
        hook: hook::hook_score(&input.text),
        engagement: engagement::engagement_score(&input.text),
        timing: timing::timing_score(post_time),
        account: account::account_score(input.is_premium, input.is_verified),
        quality: quality::quality_score(&input.text),
    };

    let total = breakdown.sum().clamp(0, 100);
    debug!(total, ?breakdown, "scored post");

    ScoreResult {
        total,
        breakdown,
        suggestions: suggestions::post_suggestions(input, &breakdown),
        warnings: suggestions::post_warnings(input),
        grade: Grade::from_score(total as f64),
    }
}

/// Score an ordered thread. Blank posts are skipped; the order of the remaining
/// posts is the authored order and drives pacing and positional advice.
pub fn score_thread(posts: &[PostInput]) -> ThreadScoreResult {
    let active: Vec<&PostInput> = posts
        .iter()
        .filter(|post| !post.text.trim().is_empty())
        .collect();

    if active.is_empty() {
        debug!(posts = posts.len(), "thread has no content");
        return ThreadScoreResult::empty();
    }

    let individual_scores: Vec<ScoreResult> = active.iter().map(|post| score_post(post)).collect();
    let totals: Vec<f64> = individual_scores
        .iter()
        .map(|result| result.total as f64)
        .collect();
    let texts: Vec<&str> = active.iter().map(|post| post.text.as_str()).collect();

    let breakdown = ThreadScoreBreakdown {
        average_individual: thread::mean(&totals),
        flow_coherence: thread::flow_coherence(&texts, &totals),
        pacing: thread::pacing(&totals),
        consistency: thread::consistency(&totals),
    };

    let total = breakdown.sum().clamp(0.0, 100.0);
    debug!(total, posts = active.len(), ?breakdown, "scored thread");

    let suggestions = suggestions::thread_suggestions(&active, &individual_scores, &breakdown);
    let warnings = suggestions::thread_warnings(posts);

    ThreadScoreResult {
        total,
        breakdown,
        individual_scores,
        suggestions,
        warnings,
        grade: Grade::from_score(total),
    }
}

/// Parse a local wall-clock timestamp such as `2024-06-04T09:30` or
/// `2024-06-04 09:30:15`.
pub fn parse_post_time(value: &str) -> Result<NaiveDateTime, ScoreError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    let trimmed = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ScoreError::InvalidTimestamp(value.to_string()))
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

/// Render a factor contribution with an explicit sign, e.g. `+15` or `-50`.
pub fn format_signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
