//! Hook strength: how hard the first line of a post grabs attention.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::scoring::{matches_any, pattern_table};

/// Upper bound for the hook factor, however many bonuses stack.
pub const HOOK_CAP: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    PatternInterrupt,
    CuriosityGap,
    Contrarian,
    StoryOpener,
    GenericOpener,
    Question,
    Number,
    Generic,
}

impl HookType {
    pub fn label(self) -> &'static str {
        match self {
            HookType::PatternInterrupt => "pattern interrupt",
            HookType::CuriosityGap => "curiosity gap",
            HookType::Contrarian => "contrarian",
            HookType::StoryOpener => "story opener",
            HookType::GenericOpener => "generic opener",
            HookType::Question => "question",
            HookType::Number => "number",
            HookType::Generic => "generic",
        }
    }

    fn family_bonus(self) -> i32 {
        match self {
            HookType::PatternInterrupt | HookType::Contrarian => 15,
            HookType::CuriosityGap | HookType::StoryOpener => 10,
            HookType::GenericOpener => -5,
            HookType::Question | HookType::Number | HookType::Generic => 0,
        }
    }
}

struct HookFamily {
    kind: HookType,
    patterns: Vec<Regex>,
}

// Priority order: the first family with a matching pattern wins. "unpopular
// opinion", "hot take" and "controversial" appear in both the pattern-interrupt and
// contrarian tables and always resolve to pattern interrupt.
static HOOK_FAMILIES: LazyLock<Vec<HookFamily>> = LazyLock::new(|| {
    vec![
        HookFamily {
            kind: HookType::PatternInterrupt,
            patterns: pattern_table(&[
                r"^stop\s",
                r"^wait\s",
                r"^hold\s+on",
                r"^hear\s+me\s+out",
                r"^unpopular\s+opinion",
                r"^hot\s+take",
                r"^controversial",
            ]),
        },
        HookFamily {
            kind: HookType::CuriosityGap,
            patterns: pattern_table(&[
                r"^the\s+(?:real|actual|true)\s+reason",
                r"^what\s+(?:nobody|no\s+one)\s+tells",
                r"^the\s+secret\s+to",
                r"^why\s+(?:most|everyone)",
            ]),
        },
        HookFamily {
            kind: HookType::Contrarian,
            patterns: pattern_table(&[
                r"^actually,?\s",
                r"^unpopular\s+opinion",
                r"^hot\s+take",
                r"^controversial",
                r"^i\s+(?:disagree|don't\s+think)",
            ]),
        },
        HookFamily {
            kind: HookType::StoryOpener,
            patterns: pattern_table(&[
                r"^i\s+just",
                r"^yesterday",
                r"^last\s+(?:week|month|year)",
                r"^(?:[2-9]|10)\s+(?:years?|months?|weeks?)\s+ago",
                r"^when\s+i\s+(?:was|started)",
            ]),
        },
        HookFamily {
            kind: HookType::GenericOpener,
            patterns: pattern_table(&[
                r"^just\s+wanted\s+to",
                r"^here(?:'s|\s+is)\s+(?:some|a)",
                r"^sharing\s",
                r"^thought\s+(?:i'd|i\s+would)",
                r"^check\s+out",
            ]),
        },
    ]
});

pub(crate) fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}

fn matched_family(line: &str) -> Option<HookType> {
    HOOK_FAMILIES
        .iter()
        .find(|family| matches_any(&family.patterns, line))
        .map(|family| family.kind)
}

/// Score the first line of `text`. Blank text scores 0.
pub fn hook_score(text: &str) -> i32 {
    if text.trim().is_empty() {
        return 0;
    }

    let line = first_line(text);
    let words = line.split_whitespace().count();
    let mut score = 0;

    if words <= 10 {
        score += 10;
    } else if words > 20 {
        score -= 5;
    }

    if line.trim().ends_with('?') {
        score += 10;
    }

    if line.chars().any(|ch| ch.is_ascii_digit()) {
        score += 10;
    }

    if let Some(kind) = matched_family(line) {
        score += kind.family_bonus();
    }

    score.min(HOOK_CAP)
}

/// Name the kind of hook the first line uses. Shares the pattern tables with
/// [`hook_score`], so a line scored as a pattern interrupt is also classified as one.
pub fn hook_type(text: &str) -> HookType {
    let line = first_line(text);

    if let Some(kind) = matched_family(line) {
        return kind;
    }
    if line.trim().ends_with('?') {
        return HookType::Question;
    }
    if line.chars().any(|ch| ch.is_ascii_digit()) {
        return HookType::Number;
    }
    HookType::Generic
}
