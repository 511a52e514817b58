use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::EntryStore;

/// Every dictionary schema family the pipeline can query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DictType {
    Jmdict,
    Jmnedict,
    Kanjidic,
    CustomWord,
    CustomName,
    /// Word dictionary converted from the Yomichan term-bank format.
    Yomichan,
    /// Kanji dictionary converted from the Yomichan kanji-bank format.
    YomichanKanji,
    /// Word dictionary converted from the Nazeka EPWING export format.
    Nazeka,
}

impl DictType {
    pub fn is_word_type(self) -> bool {
        matches!(
            self,
            DictType::Jmdict | DictType::CustomWord | DictType::Yomichan | DictType::Nazeka
        )
    }

    pub fn is_name_type(self) -> bool {
        matches!(self, DictType::Jmnedict | DictType::CustomName)
    }

    pub fn is_kanji_type(self) -> bool {
        matches!(self, DictType::Kanjidic | DictType::YomichanKanji)
    }
}

/// An active dictionary: its entry store plus the metadata the ranking
/// comparator and the fan-out need.
#[derive(Clone, Debug)]
pub struct Dict {
    pub name: String,
    pub dict_type: DictType,
    /// Lower wins at ranking rule 5.
    pub priority: u32,
    pub active: bool,
    pub entries: EntryStore,
}

impl Dict {
    pub fn new(name: impl Into<String>, dict_type: DictType, priority: u32) -> Self {
        Self {
            name: name.into(),
            dict_type,
            priority,
            active: true,
            entries: EntryStore::default(),
        }
    }
}

/// Lightweight handle to the dictionary a result came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictRef {
    pub name: String,
    pub dict_type: DictType,
    pub priority: u32,
}

impl From<&Dict> for DictRef {
    fn from(dict: &Dict) -> Self {
        Self {
            name: dict.name.clone(),
            dict_type: dict.dict_type,
            priority: dict.priority,
        }
    }
}

/// A raw entry, polymorphic over the dictionary family that loaded it.
///
/// Entries are immutable once loaded and owned by their store; the pipeline
/// only shares them by reference. Dispatch over this enum is exhaustive at
/// the filter, query and materialize stages so a new family cannot be added
/// without covering all three.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RawDictionaryEntry {
    Jmdict(JmdictRecord),
    Jmnedict(JmnedictRecord),
    Kanjidic(KanjidicRecord),
    CustomWord(CustomWordRecord),
    CustomName(CustomNameRecord),
    Yomichan(YomichanRecord),
    YomichanKanji(YomichanKanjiRecord),
    Nazeka(NazekaRecord),
}

impl RawDictionaryEntry {
    pub fn family(&self) -> &'static str {
        match self {
            RawDictionaryEntry::Jmdict(_) => "Jmdict",
            RawDictionaryEntry::Jmnedict(_) => "Jmnedict",
            RawDictionaryEntry::Kanjidic(_) => "Kanjidic",
            RawDictionaryEntry::CustomWord(_) => "CustomWord",
            RawDictionaryEntry::CustomName(_) => "CustomName",
            RawDictionaryEntry::Yomichan(_) => "Yomichan",
            RawDictionaryEntry::YomichanKanji(_) => "YomichanKanji",
            RawDictionaryEntry::Nazeka(_) => "Nazeka",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JmdictRecord {
    pub id: u64,
    pub primary_spelling: String,
    /// Orthography markers on the primary spelling (iK, oK, rK, io style).
    pub primary_spelling_orthography_info: Option<Vec<String>>,
    pub readings: Option<Vec<String>>,
    /// Per-reading orthography markers (ik, ok, rk style), aligned with
    /// `readings`.
    pub readings_orthography_info: Option<Vec<Vec<String>>>,
    pub alternative_spellings: Option<Vec<String>>,
    pub alternative_spellings_orthography_info: Option<Vec<Vec<String>>>,
    /// Glosses per sense.
    pub definitions: Vec<Vec<String>>,
    /// Word classes per sense.
    pub word_classes: Vec<Vec<String>>,
    /// Miscellany tags per sense ("uk" and friends).
    pub misc: Option<Vec<Vec<String>>>,
    /// Field-of-use tags per sense ("comp", "med", ...).
    pub fields: Option<Vec<Vec<String>>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JmnedictRecord {
    pub id: u64,
    pub primary_spelling: String,
    pub readings: Option<Vec<String>>,
    pub alternative_spellings: Option<Vec<String>>,
    pub definitions: Vec<String>,
    /// "surname", "fem", "place" and the like.
    pub name_types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KanjidicRecord {
    pub on_readings: Option<Vec<String>>,
    pub kun_readings: Option<Vec<String>>,
    pub nanori_readings: Option<Vec<String>>,
    pub radical_names: Option<Vec<String>>,
    pub definitions: Option<Vec<String>>,
    pub stroke_count: u8,
    /// School grade, 0 when ungraded.
    pub grade: u8,
    /// Corpus rank from kanjidic itself, not a frequency source.
    pub frequency: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomWordRecord {
    pub primary_spelling: String,
    pub readings: Option<Vec<String>>,
    pub alternative_spellings: Option<Vec<String>>,
    pub definitions: Vec<String>,
    pub word_classes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomNameRecord {
    pub primary_spelling: String,
    pub reading: Option<String>,
    pub name_type: String,
    pub extra_info: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YomichanRecord {
    pub primary_spelling: String,
    pub reading: Option<String>,
    pub definitions: Vec<String>,
    /// Coarse definition tags doubling as word classes ("v5", "adj-i").
    pub word_classes: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YomichanKanjiRecord {
    pub on_readings: Option<Vec<String>>,
    pub kun_readings: Option<Vec<String>>,
    pub definitions: Option<Vec<String>>,
    /// Misc stats from the kanji bank (stroke counts, codepoints, ...).
    pub stats: Option<IndexMap<String, String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NazekaRecord {
    pub primary_spelling: String,
    pub reading: Option<String>,
    pub alternative_spellings: Option<Vec<String>>,
    pub definitions: Vec<String>,
}
