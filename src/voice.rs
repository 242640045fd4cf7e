//! Voice match: how closely a draft resembles the author's own writing.
//!
//! Four sub-scores of up to 25 points each compare the draft with example posts
//! (or, without examples, with the author's declared emoji habit).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::ScoreError;

const PART_MAX: f64 = 25.0;
const NEUTRAL_PART: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiUsage {
    Never,
    #[default]
    Rarely,
    Often,
    Always,
}

impl EmojiUsage {
    /// Expected emoji per character.
    pub fn expected_frequency(self) -> f64 {
        match self {
            EmojiUsage::Never => 0.0,
            EmojiUsage::Rarely => 0.01,
            EmojiUsage::Often => 0.03,
            EmojiUsage::Always => 0.05,
        }
    }
}

impl FromStr for EmojiUsage {
    type Err = ScoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "never" => Ok(EmojiUsage::Never),
            "rarely" => Ok(EmojiUsage::Rarely),
            "often" => Ok(EmojiUsage::Often),
            "always" => Ok(EmojiUsage::Always),
            _ => Err(ScoreError::InvalidEmojiUsage(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceProfile {
    #[serde(default)]
    pub emoji_usage: EmojiUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceMatchBreakdown {
    pub similarity: f64,
    pub emoji_match: f64,
    pub length_match: f64,
    pub punctuation_match: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoiceMatchResult {
    pub total: f64,
    pub breakdown: VoiceMatchBreakdown,
}

pub fn voice_match_score(
    text: &str,
    examples: &[String],
    profile: Option<&VoiceProfile>,
) -> VoiceMatchResult {
    if text.trim().is_empty() {
        return VoiceMatchResult::default();
    }

    let breakdown = VoiceMatchBreakdown {
        similarity: similarity_part(text, examples),
        emoji_match: emoji_part(text, examples, profile),
        length_match: length_part(text, examples),
        punctuation_match: punctuation_part(text, examples),
    };

    let total = (breakdown.similarity
        + breakdown.emoji_match
        + breakdown.length_match
        + breakdown.punctuation_match)
        .clamp(0.0, 100.0);

    VoiceMatchResult { total, breakdown }
}

/// Dice coefficient over character bigrams, case-insensitive, in `0.0..=1.0`.
pub fn bigram_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut counts: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *counts.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = counts.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    (matches * 2) as f64 / (a.len() + b.len() - 2) as f64
}

fn similarity_part(text: &str, examples: &[String]) -> f64 {
    examples
        .iter()
        .map(|example| bigram_similarity(text, example))
        .fold(0.0, f64::max)
        * PART_MAX
}

fn is_voice_emoji(ch: char) -> bool {
    matches!(ch as u32, 0x1F300..=0x1F9FF | 0x2600..=0x26FF | 0x2700..=0x27BF)
}

fn emoji_frequency(text: &str) -> f64 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    text.chars().filter(|ch| is_voice_emoji(*ch)).count() as f64 / chars as f64
}

fn emoji_part(text: &str, examples: &[String], profile: Option<&VoiceProfile>) -> f64 {
    let frequency = emoji_frequency(text);

    if !examples.is_empty() {
        let expected = average(examples, |example| emoji_frequency(example));
        return (PART_MAX - (frequency - expected).abs() * 1000.0).max(0.0);
    }

    match profile {
        Some(profile) => {
            let expected = profile.emoji_usage.expected_frequency();
            (PART_MAX - (frequency - expected).abs() * 500.0).max(0.0)
        }
        None => NEUTRAL_PART,
    }
}

fn average_sentence_length(text: &str) -> f64 {
    let lengths: Vec<usize> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(|sentence| sentence.chars().count())
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }
    lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
}

fn length_part(text: &str, examples: &[String]) -> f64 {
    if examples.is_empty() {
        return NEUTRAL_PART;
    }
    let expected = average(examples, |example| average_sentence_length(example));
    (PART_MAX - (average_sentence_length(text) - expected).abs() * 0.5).max(0.0)
}

fn punctuation_density(text: &str) -> f64 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let marks = text
        .chars()
        .filter(|ch| matches!(ch, '!' | '?' | '.' | ',' | ';' | ':'))
        .count();
    marks as f64 / chars as f64
}

fn punctuation_part(text: &str, examples: &[String]) -> f64 {
    if examples.is_empty() {
        return NEUTRAL_PART;
    }
    let expected = average(examples, |example| punctuation_density(example));
    (PART_MAX - (punctuation_density(text) - expected).abs() * 100.0).max(0.0)
}

fn average(examples: &[String], measure: impl Fn(&str) -> f64) -> f64 {
    if examples.is_empty() {
        return 0.0;
    }
    examples.iter().map(|example| measure(example)).sum::<f64>() / examples.len() as f64
}
