//! Chapter text segmentation into narration and attributed dialogue.
//!
//! Dialogue is anything enclosed in curly double quotes, straight double
//! quotes or guillemets. Each dialogue span gets a speaker guess from the
//! text right around it, and a gender guess from the name gazetteers or,
//! failing that, from nearby pronouns. The heuristics are English-only.

use crate::gazetteer::{gender_for_name, gender_from_pronouns};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// Characters of surrounding text inspected on each side of a quote.
pub const DEFAULT_CONTEXT_CHARS: usize = 150;

const SPEECH_VERBS: &[&str] = &[
    "said", "asked", "replied", "whispered", "shouted", "cried", "exclaimed", "muttered",
    "murmured", "called", "yelled", "screamed", "answered", "responded", "continued", "added",
    "insisted", "demanded", "suggested", "explained", "warned", "promised", "admitted", "declared",
    "announced", "sighed", "groaned", "laughed", "snapped", "hissed", "growled", "barked", "roared",
    "bellowed", "gasped", "breathed", "pleaded", "begged", "urged", "commanded", "ordered",
    "interrupted", "protested", "objected", "agreed", "conceded", "acknowledged", "noted",
    "observed", "remarked", "commented", "mentioned",
];

// `Name verb, "...` is only recognised for the common verbs.
const LEADING_SPEECH_VERBS: &[&str] = &[
    "said", "asked", "replied", "whispered", "shouted", "cried", "exclaimed", "muttered",
    "murmured", "called", "yelled", "screamed", "answered", "responded", "continued", "added",
    "insisted", "demanded", "suggested", "explained", "warned", "promised",
];

// Capitalised words that open a clause but never name a speaker.
const NOT_A_NAME: &[&str] = &[
    "the", "then", "he", "she", "they", "it", "i", "we", "you", "a", "an", "and", "but", "his",
    "her", "when", "as", "so", "now",
];

// One or two capitalised words; inner capitals (McGonagall) and all-caps
// names (DUMBLEDORE) included.
const NAME: &str = r"\b\p{Lu}\p{L}+\b(?:\s+\p{Lu}\p{L}+\b)?";

static RE_DIALOGUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?s)[“"«](.*?)[”"»]"#).unwrap());
static RE_VERB_THEN_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*[,.]?\s*(?i:{})\s+(?P<name>{NAME})",
        SPEECH_VERBS.join("|")
    ))
    .unwrap()
});
static RE_NAME_THEN_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^\s*[,.]?\s*(?P<name>{NAME})\s+(?i:{})\b",
        SPEECH_VERBS.join("|")
    ))
    .unwrap()
});
static RE_LEADING_ATTRIBUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<name>{NAME})\s+(?i:{})\s*[,:]\s*$",
        LEADING_SPEECH_VERBS.join("|")
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// A classified span of chapter text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "lowercase")]
#[ts(export)]
pub enum Segment {
    Narration {
        text: String,
    },
    Dialogue {
        text: String,
        speaker: Option<String>,
        gender: Gender,
    },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Narration { text } | Segment::Dialogue { text, .. } => text,
        }
    }

    pub fn speaker(&self) -> Option<&str> {
        match self {
            Segment::Narration { .. } => None,
            Segment::Dialogue { speaker, .. } => speaker.as_deref(),
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            Segment::Narration { .. } => Gender::Unknown,
            Segment::Dialogue { gender, .. } => *gender,
        }
    }

    pub fn is_dialogue(&self) -> bool {
        matches!(self, Segment::Dialogue { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribution {
    speaker: Option<String>,
    gender: Gender,
}

pub fn parse_chapter_text(raw_text: &str) -> Vec<Segment> {
    parse_chapter_text_with(raw_text, DEFAULT_CONTEXT_CHARS)
}

/// Splits `raw_text` into segments in source order, looking at up to
/// `context_chars` characters on each side of a quote for attribution.
pub fn parse_chapter_text_with(raw_text: &str, context_chars: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in RE_DIALOGUE.captures_iter(raw_text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_narration(&mut segments, &raw_text[last_end..whole.start()]);

        let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
        if !inner.is_empty() {
            let before = window_before(raw_text, whole.start(), context_chars);
            let after = window_after(raw_text, whole.end(), context_chars);
            let Attribution { speaker, gender } = attribute_speaker(before, after);
            segments.push(Segment::Dialogue {
                text: inner.to_string(),
                speaker,
                gender,
            });
        }
        last_end = whole.end();
    }
    push_narration(&mut segments, &raw_text[last_end..]);

    if segments.is_empty() {
        push_narration(&mut segments, raw_text);
    }

    debug!(
        segments = segments.len(),
        dialogue = segments.iter().filter(|s| s.is_dialogue()).count(),
        "Parsed chapter text"
    );
    segments
}

fn push_narration(segments: &mut Vec<Segment>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::Narration {
            text: trimmed.to_string(),
        });
    }
}

fn window_before(text: &str, end: usize, chars: usize) -> &str {
    let head = &text[..end];
    let start = match chars.checked_sub(1) {
        Some(skip) => head.char_indices().rev().nth(skip).map_or(0, |(idx, _)| idx),
        None => end,
    };
    &head[start..]
}

fn window_after(text: &str, start: usize, chars: usize) -> &str {
    let tail = &text[start..];
    let end = tail.char_indices().nth(chars).map_or(tail.len(), |(idx, _)| idx);
    &tail[..end]
}

fn attribute_speaker(before: &str, after: &str) -> Attribution {
    let speaker = [&*RE_VERB_THEN_NAME, &*RE_NAME_THEN_VERB]
        .into_iter()
        .find_map(|re| capture_name(re, after))
        .or_else(|| capture_name(&RE_LEADING_ATTRIBUTION, before));

    let gender = speaker
        .as_deref()
        .and_then(gender_for_name)
        .unwrap_or_else(|| gender_from_pronouns(&format!("{before} {after}")));

    Attribution { speaker, gender }
}

fn capture_name(re: &Regex, context: &str) -> Option<String> {
    let name = re.captures(context)?.name("name")?.as_str();
    clean_speaker(name)
}

fn clean_speaker(name: &str) -> Option<String> {
    let tokens: Vec<&str> = name
        .split_whitespace()
        .skip_while(|token| NOT_A_NAME.contains(&token.to_lowercase().as_str()))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}
