use std::sync::Arc;

use crate::deconjugation::DeconjugatedForm;
use crate::dictionary::RawDictionaryEntry;
use crate::store::WordClassTable;

/// Keeps the entries whose word classes are compatible with the conjugation
/// path that produced `form`.
///
/// An empty tag path means no deconjugation happened, so everything passes.
/// Each family has its own rule: JMdict and custom words carry exact
/// per-sense tag sets, Yomichan-style entries carry coarser tags matched by
/// string prefix with the cross-reference table as fallback, and
/// Nazeka-style entries have no native tags at all. Kanji and name families
/// never enter the deconjugation path, so a record from one of them simply
/// never matches.
pub fn filter_compatible_entries(
    form: &DeconjugatedForm,
    entries: &[Arc<RawDictionaryEntry>],
    word_class_table: Option<&WordClassTable>,
) -> Vec<Arc<RawDictionaryEntry>> {
    let Some(tag) = form.last_tag() else {
        return entries.to_vec();
    };
    entries
        .iter()
        .filter(|entry| entry_is_compatible(entry, tag, word_class_table))
        .cloned()
        .collect()
}

fn entry_is_compatible(
    entry: &RawDictionaryEntry,
    tag: &str,
    word_class_table: Option<&WordClassTable>,
) -> bool {
    match entry {
        RawDictionaryEntry::Jmdict(record) => record
            .word_classes
            .iter()
            .any(|sense| sense.iter().any(|wc| wc == tag)),
        RawDictionaryEntry::CustomWord(record) => record.word_classes.iter().any(|wc| wc == tag),
        RawDictionaryEntry::Yomichan(record) => match &record.word_classes {
            Some(word_classes) if !word_classes.is_empty() => {
                word_classes.iter().any(|wc| tag.starts_with(wc.as_str()))
            }
            _ => table_matches(
                word_class_table,
                &record.primary_spelling,
                record.reading.as_deref(),
                tag,
            ),
        },
        RawDictionaryEntry::Nazeka(record) => table_matches(
            word_class_table,
            &record.primary_spelling,
            record.reading.as_deref(),
            tag,
        ),
        RawDictionaryEntry::Jmnedict(_)
        | RawDictionaryEntry::CustomName(_)
        | RawDictionaryEntry::Kanjidic(_)
        | RawDictionaryEntry::YomichanKanji(_) => false,
    }
}

fn table_matches(
    table: Option<&WordClassTable>,
    spelling: &str,
    reading: Option<&str>,
    tag: &str,
) -> bool {
    table.is_some_and(|table| table.matches(spelling, reading, tag))
}
