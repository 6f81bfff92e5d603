//! Voice catalog helpers and per-category voice assignment.

use crate::chunks::VoiceType;
use crate::segmenter::Gender;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_LANGUAGE: &str = "en";

const FEMALE_VOICE_HINTS: &[&str] = &[
    "samantha", "victoria", "karen", "moira", "tessa", "siri", "catherine", "alice", "veena",
    "meijia",
];
const MALE_VOICE_HINTS: &[&str] = &[
    "daniel", "arthur", "rishi", "aaron", "fred", "alex", "nathan", "clara",
];

/// A synthesis voice offered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
        }
    }

    fn matches_language(&self, prefix: &str) -> bool {
        self.language.starts_with(prefix)
    }
}

/// Selected voice per category. `None` (or an empty id) means the backend
/// default for the configured language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct VoiceAssignment {
    pub narrator: Option<String>,
    pub male: Option<String>,
    pub female: Option<String>,
}

impl VoiceAssignment {
    pub fn for_voice_type(&self, voice_type: VoiceType) -> Option<&str> {
        let selected = match voice_type {
            VoiceType::Narrator => &self.narrator,
            VoiceType::Male => &self.male,
            VoiceType::Female => &self.female,
        };
        selected.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Fills unset categories from `catalog`, guessing voice gender from
    /// voice names. Explicit choices are left alone.
    pub fn suggest(&self, catalog: &[Voice], language: &str) -> Self {
        let candidates = voices_for_language(catalog, language);
        let pick = |gender: Gender| {
            candidates
                .iter()
                .find(|voice| guess_voice_gender(&voice.name) == gender)
                .map(|voice| voice.id.clone())
        };

        let mut suggested = self.clone();
        if suggested.for_voice_type(VoiceType::Female).is_none() {
            suggested.female = pick(Gender::Female);
        }
        if suggested.for_voice_type(VoiceType::Male).is_none() {
            suggested.male = pick(Gender::Male);
        }
        if suggested.for_voice_type(VoiceType::Narrator).is_none() {
            suggested.narrator = candidates.first().map(|voice| voice.id.clone());
        }
        suggested
    }
}

/// Voices whose language tag starts with `prefix`.
pub fn voices_for_language<'a>(catalog: &'a [Voice], prefix: &str) -> Vec<&'a Voice> {
    catalog
        .iter()
        .filter(|voice| voice.matches_language(prefix))
        .collect()
}

/// Guesses the gender of a system voice from its display name.
pub fn guess_voice_gender(voice_name: &str) -> Gender {
    let name = voice_name.to_lowercase();
    if FEMALE_VOICE_HINTS.iter().any(|hint| name.contains(hint)) {
        return Gender::Female;
    }
    if MALE_VOICE_HINTS.iter().any(|hint| name.contains(hint)) {
        return Gender::Male;
    }
    if name.contains("female") {
        Gender::Female
    } else if name.contains("male") {
        Gender::Male
    } else {
        Gender::Unknown
    }
}

/// Picks the voice to use for a requested id or name, falling back to the
/// first voice of `language`, then to any voice. `None` leaves the choice to
/// the backend.
pub fn resolve_voice<'a>(
    catalog: &'a [Voice],
    requested: Option<&str>,
    language: &str,
) -> Option<&'a Voice> {
    requested
        .and_then(|wanted| {
            catalog
                .iter()
                .find(|voice| voice.id == wanted)
                .or_else(|| catalog.iter().find(|voice| voice.name == wanted))
        })
        .or_else(|| catalog.iter().find(|voice| voice.matches_language(language)))
        .or_else(|| catalog.first())
}
