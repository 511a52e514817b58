use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dictionary::RawDictionaryEntry;
use crate::kana::katakana_to_hiragana;

/// In-memory key → entry-list store for one dictionary.
///
/// Word and name dictionaries are keyed by the hiragana-normalized spelling
/// or reading, kanji dictionaries by the bare character. Entries are shared
/// out by `Arc` and never mutated after loading.
#[derive(Clone, Debug, Default)]
pub struct EntryStore {
    map: IndexMap<String, Vec<Arc<RawDictionaryEntry>>>,
}

impl EntryStore {
    pub fn insert(&mut self, key: impl Into<String>, entry: RawDictionaryEntry) {
        self.map
            .entry(key.into())
            .or_default()
            .push(Arc::new(entry));
    }

    pub fn get(&self, key: &str) -> Option<&[Arc<RawDictionaryEntry>]> {
        self.map.get(key).map(Vec::as_slice)
    }

    /// Batch shape for callers that resolve many keys at once.
    pub fn get_many<'a, 'k>(
        &'a self,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> IndexMap<&'k str, &'a [Arc<RawDictionaryEntry>]> {
        keys.into_iter()
            .filter_map(|key| self.get(key).map(|entries| (key, entries)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// One row of a frequency source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub spelling: String,
    pub reading: Option<String>,
    pub frequency: i32,
}

/// A frequency source: hiragana-normalized spelling/reading → rows.
#[derive(Clone, Debug)]
pub struct FreqDict {
    pub name: String,
    pub active: bool,
    /// Display/ranking polarity of this source's values. Row selection
    /// always takes the minimum raw value regardless of this flag.
    pub higher_value_means_higher_frequency: bool,
    map: IndexMap<String, Vec<FrequencyRecord>>,
}

impl FreqDict {
    pub fn new(name: impl Into<String>, higher_value_means_higher_frequency: bool) -> Self {
        Self {
            name: name.into(),
            active: true,
            higher_value_means_higher_frequency,
            map: IndexMap::new(),
        }
    }

    /// Inserts a row under the hiragana-normalized key.
    pub fn insert(&mut self, key: &str, record: FrequencyRecord) {
        self.map
            .entry(katakana_to_hiragana(key))
            .or_default()
            .push(record);
    }

    pub fn get(&self, key: &str) -> Option<&[FrequencyRecord]> {
        self.map.get(key).map(Vec::as_slice)
    }
}

/// One pitch-accent row: the mora index after which pitch drops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchAccentRecord {
    pub spelling: String,
    pub reading: Option<String>,
    pub position: u8,
}

/// Pitch dictionary keyed by hiragana-normalized spelling or reading.
#[derive(Clone, Debug, Default)]
pub struct PitchDict {
    map: IndexMap<String, Vec<PitchAccentRecord>>,
}

impl PitchDict {
    pub fn insert(&mut self, key: &str, record: PitchAccentRecord) {
        self.map
            .entry(katakana_to_hiragana(key))
            .or_default()
            .push(record);
    }

    pub fn get(&self, key: &str) -> Option<&[PitchAccentRecord]> {
        self.map.get(key).map(Vec::as_slice)
    }
}

/// Word classes for a spelling/reading pair, sourced from a richer
/// dictionary. Backs word-class filtering for families that store no tags
/// of their own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordClassRecord {
    pub spelling: String,
    pub readings: Option<Vec<String>>,
    pub word_classes: Vec<String>,
}

/// Cross-reference table: spelling → word-class rows.
#[derive(Clone, Debug, Default)]
pub struct WordClassTable {
    map: IndexMap<String, Vec<WordClassRecord>>,
}

impl WordClassTable {
    pub fn insert(&mut self, record: WordClassRecord) {
        self.map
            .entry(record.spelling.clone())
            .or_default()
            .push(record);
    }

    /// Whether any row for `spelling` covers `reading` and contains `tag`.
    pub fn matches(&self, spelling: &str, reading: Option<&str>, tag: &str) -> bool {
        let Some(records) = self.map.get(spelling) else {
            return false;
        };
        records.iter().any(|record| {
            let reading_matches = match (&record.readings, reading) {
                (Some(readings), Some(reading)) => readings.iter().any(|r| r == reading),
                (None, _) => true,
                (Some(_), None) => false,
            };
            reading_matches && record.word_classes.iter().any(|wc| wc == tag)
        })
    }
}
