use serde::{Deserialize, Serialize};

use crate::dictionary::DictRef;
use crate::freq::FrequencyScore;

/// Kanji-only metadata carried by results from kanji dictionary families.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KanjiInfo {
    pub on_readings: Option<Vec<String>>,
    pub kun_readings: Option<Vec<String>>,
    pub nanori_readings: Option<Vec<String>>,
    pub radical_names: Option<Vec<String>>,
    pub stroke_count: Option<u8>,
    pub grade: Option<u8>,
    /// Kanjidic's own corpus rank.
    pub frequency: Option<i32>,
}

/// Name-only metadata carried by results from name dictionary families.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NameInfo {
    pub name_types: Vec<String>,
    pub extra_info: Option<String>,
}

/// One final, immutable output record of a lookup.
///
/// Created once per raw entry surviving materialization and consumed only
/// for sorting and display. Absent data is `None`, never an empty
/// collection standing in for "not found".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub primary_spelling: String,
    pub readings: Option<Vec<String>>,
    pub alternative_spellings: Option<Vec<String>>,
    /// The input prefix this result matched.
    pub matched_text: String,
    /// The dictionary form the matched text deconjugated to, when the match
    /// went through the deconjugation path.
    pub deconjugated_matched_text: Option<String>,
    /// Display string for the deconjugation trail, e.g. `～わかる→polite→past`.
    pub deconjugation_process_text: Option<String>,
    /// Source entry id for families that carry one (JMdict, JMnedict).
    pub entry_id: Option<u64>,
    pub word_classes: Option<Vec<String>>,
    pub dict: DictRef,
    pub formatted_definitions: Option<String>,
    /// One score per active frequency source; never partially populated.
    pub frequencies: Option<Vec<FrequencyScore>>,
    /// Pitch-drop mora positions aligned 1:1 with `readings`; `u8::MAX`
    /// marks a reading with no known accent.
    pub pitch_positions: Option<Vec<u8>>,
    pub kanji_info: Option<KanjiInfo>,
    pub name_info: Option<NameInfo>,
    /// Orthography markers on the primary spelling, kept for ranking.
    pub primary_spelling_orthography_info: Option<Vec<String>>,
    /// Per-reading orthography markers aligned with `readings`, kept for
    /// ranking.
    pub readings_orthography_info: Option<Vec<Vec<String>>>,
    /// Per-sense miscellany tags ("uk" drives reading-rarity ranking).
    pub misc: Option<Vec<Vec<String>>>,
}

impl LookupResult {
    /// Blank record pointing at `dict`; builders fill in what their family
    /// provides.
    pub(crate) fn new(
        primary_spelling: impl Into<String>,
        matched_text: impl Into<String>,
        dict: DictRef,
    ) -> Self {
        Self {
            primary_spelling: primary_spelling.into(),
            readings: None,
            alternative_spellings: None,
            matched_text: matched_text.into(),
            deconjugated_matched_text: None,
            deconjugation_process_text: None,
            entry_id: None,
            word_classes: None,
            dict,
            formatted_definitions: None,
            frequencies: None,
            pitch_positions: None,
            kanji_info: None,
            name_info: None,
            primary_spelling_orthography_info: None,
            readings_orthography_info: None,
            misc: None,
        }
    }
}
