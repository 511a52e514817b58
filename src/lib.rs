//! Morphological dictionary lookup and ranking for Japanese text.
//!
//! Given a span of source text, [LookupEngine::lookup_text] finds every
//! dictionary entry matching some prefix of it — including conjugated
//! forms, long-vowel-mark variants and katakana/hiragana normalizations —
//! merges duplicates across dictionary schema families, attaches frequency
//! and pitch-accent metadata, and returns one deterministically ordered
//! result list.
//!
//! Deconjugation itself is an external collaborator: install anything
//! implementing [Deconjugator]. Dictionary parsing and persistence are also
//! out of scope; entries are loaded into in-memory [EntryStore]s.

mod deconjugation;
mod dictionary;
mod errors;
mod freq;
pub mod kana;
mod lookup;
mod pitch;
mod store;

pub use deconjugation::{DeconjugatedForm, Deconjugator, NullDeconjugator};
pub use dictionary::{
    CustomNameRecord, CustomWordRecord, Dict, DictRef, DictType, JmdictRecord, JmnedictRecord,
    KanjidicRecord, NazekaRecord, RawDictionaryEntry, YomichanKanjiRecord, YomichanRecord,
};
pub use errors::LookupError;
pub use freq::{resolve_frequency, FrequencyScore, FREQUENCY_NOT_FOUND};
pub use lookup::result::{KanjiInfo, LookupResult, NameInfo};
pub use lookup::LookupEngine;
pub use pitch::{resolve_pitch_positions, PITCH_NOT_FOUND};
pub use store::{
    EntryStore, FreqDict, FrequencyRecord, PitchAccentRecord, PitchDict, WordClassRecord,
    WordClassTable,
};
