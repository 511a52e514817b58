use std::sync::Arc;

use crate::dictionary::{
    CustomNameRecord, CustomWordRecord, Dict, DictRef, DictType, JmdictRecord, JmnedictRecord,
    KanjidicRecord, NazekaRecord, RawDictionaryEntry, YomichanKanjiRecord, YomichanRecord,
};
use crate::errors::LookupError;
use crate::lookup::query::{BucketMap, IntermediaryResult};
use crate::lookup::result::{KanjiInfo, LookupResult, NameInfo};

/// Flattens a dictionary's intermediary buckets into final records.
///
/// Dispatch is per dictionary family; a record whose family does not match
/// its dictionary's declared type is a loaded-data contract violation,
/// logged and returned as an error rather than silently skipped.
pub fn materialize(dict: &Dict, buckets: &BucketMap) -> Result<Vec<LookupResult>, LookupError> {
    let mut results = Vec::new();
    for bucket in buckets.values() {
        for (group_index, group) in bucket.result_groups.iter().enumerate() {
            let chains = bucket
                .process_chains
                .as_ref()
                .and_then(|chains| chains.get(group_index))
                .map(Vec::as_slice);
            for entry in group {
                results.push(entry_to_result(dict, bucket, chains, entry)?);
            }
        }
    }
    Ok(results)
}

fn entry_to_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    chains: Option<&[Vec<String>]>,
    entry: &Arc<RawDictionaryEntry>,
) -> Result<LookupResult, LookupError> {
    match (dict.dict_type, entry.as_ref()) {
        (DictType::Jmdict, RawDictionaryEntry::Jmdict(record)) => {
            Ok(jmdict_result(dict, bucket, chains, record))
        }
        (DictType::CustomWord, RawDictionaryEntry::CustomWord(record)) => {
            Ok(custom_word_result(dict, bucket, chains, record))
        }
        (DictType::Yomichan, RawDictionaryEntry::Yomichan(record)) => {
            Ok(yomichan_result(dict, bucket, chains, record))
        }
        (DictType::Nazeka, RawDictionaryEntry::Nazeka(record)) => {
            Ok(nazeka_result(dict, bucket, chains, record))
        }
        (DictType::Jmnedict, RawDictionaryEntry::Jmnedict(record)) => {
            Ok(jmnedict_result(dict, bucket, record))
        }
        (DictType::CustomName, RawDictionaryEntry::CustomName(record)) => {
            Ok(custom_name_result(dict, bucket, record))
        }
        (DictType::Kanjidic, RawDictionaryEntry::Kanjidic(record)) => {
            Ok(kanjidic_result(dict, bucket, record))
        }
        (DictType::YomichanKanji, RawDictionaryEntry::YomichanKanji(record)) => {
            Ok(yomichan_kanji_result(dict, bucket, record))
        }
        (dict_type, entry) => {
            let err = LookupError::SchemaMismatch {
                dict_name: dict.name.clone(),
                dict_type,
                family: entry.family(),
                stage: "materialize",
            };
            log::error!("{err}");
            Err(err)
        }
    }
}

fn base_result(dict: &Dict, bucket: &IntermediaryResult, primary_spelling: &str) -> LookupResult {
    LookupResult::new(primary_spelling, bucket.matched_text.clone(), DictRef::from(dict))
}

fn with_deconjugation(
    mut result: LookupResult,
    bucket: &IntermediaryResult,
    chains: Option<&[Vec<String>]>,
) -> LookupResult {
    result.deconjugated_matched_text = bucket.deconjugated_text.clone();
    if let (Some(base), Some(chains)) = (&bucket.deconjugated_text, chains) {
        result.deconjugation_process_text = render_process_text(base, chains);
    }
    result
}

fn jmdict_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    chains: Option<&[Vec<String>]>,
    record: &JmdictRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &record.primary_spelling);
    result.readings = record.readings.clone();
    result.alternative_spellings = record.alternative_spellings.clone();
    result.entry_id = Some(record.id);
    result.word_classes = Some(flatten_unique(&record.word_classes));
    result.formatted_definitions = Some(format_jmdict_definitions(record));
    result.primary_spelling_orthography_info = record.primary_spelling_orthography_info.clone();
    result.readings_orthography_info = record.readings_orthography_info.clone();
    result.misc = record.misc.clone();
    with_deconjugation(result, bucket, chains)
}

fn custom_word_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    chains: Option<&[Vec<String>]>,
    record: &CustomWordRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &record.primary_spelling);
    result.readings = record.readings.clone();
    result.alternative_spellings = record.alternative_spellings.clone();
    result.word_classes = Some(record.word_classes.clone());
    result.formatted_definitions = Some(format_numbered(&record.definitions));
    with_deconjugation(result, bucket, chains)
}

fn yomichan_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    chains: Option<&[Vec<String>]>,
    record: &YomichanRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &record.primary_spelling);
    result.readings = record.reading.clone().map(|reading| vec![reading]);
    result.word_classes = record.word_classes.clone();
    result.formatted_definitions = non_empty(record.definitions.join("\n"));
    with_deconjugation(result, bucket, chains)
}

fn nazeka_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    chains: Option<&[Vec<String>]>,
    record: &NazekaRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &record.primary_spelling);
    result.readings = record.reading.clone().map(|reading| vec![reading]);
    result.alternative_spellings = record.alternative_spellings.clone();
    result.formatted_definitions = non_empty(record.definitions.join("; "));
    with_deconjugation(result, bucket, chains)
}

fn jmnedict_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    record: &JmnedictRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &record.primary_spelling);
    result.readings = record.readings.clone();
    result.alternative_spellings = record.alternative_spellings.clone();
    result.entry_id = Some(record.id);
    result.formatted_definitions = Some(format_jmnedict_definitions(record));
    result.name_info = Some(NameInfo {
        name_types: record.name_types.clone(),
        extra_info: None,
    });
    result
}

fn custom_name_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    record: &CustomNameRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &record.primary_spelling);
    result.readings = record.reading.clone().map(|reading| vec![reading]);
    result.formatted_definitions = Some(match &record.extra_info {
        Some(extra_info) => format!("({}) {extra_info}", record.name_type),
        None => format!("({})", record.name_type),
    });
    result.name_info = Some(NameInfo {
        name_types: vec![record.name_type.clone()],
        extra_info: record.extra_info.clone(),
    });
    result
}

fn kanjidic_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    record: &KanjidicRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &bucket.matched_text);
    result.readings = concat_kanji_readings(&[
        record.on_readings.as_deref(),
        record.kun_readings.as_deref(),
        record.nanori_readings.as_deref(),
    ]);
    result.formatted_definitions = record
        .definitions
        .as_ref()
        .and_then(|definitions| non_empty(definitions.join(", ")));
    result.kanji_info = Some(KanjiInfo {
        on_readings: record.on_readings.clone(),
        kun_readings: record.kun_readings.clone(),
        nanori_readings: record.nanori_readings.clone(),
        radical_names: record.radical_names.clone(),
        stroke_count: Some(record.stroke_count),
        grade: Some(record.grade),
        frequency: record.frequency,
    });
    result
}

fn yomichan_kanji_result(
    dict: &Dict,
    bucket: &IntermediaryResult,
    record: &YomichanKanjiRecord,
) -> LookupResult {
    let mut result = base_result(dict, bucket, &bucket.matched_text);
    result.readings =
        concat_kanji_readings(&[record.on_readings.as_deref(), record.kun_readings.as_deref()]);
    let mut lines: Vec<String> = record.definitions.clone().unwrap_or_default();
    if let Some(stats) = &record.stats {
        lines.extend(stats.iter().map(|(name, value)| format!("{name}: {value}")));
    }
    result.formatted_definitions = non_empty(lines.join("\n"));
    result.kanji_info = Some(KanjiInfo {
        on_readings: record.on_readings.clone(),
        kun_readings: record.kun_readings.clone(),
        nanori_readings: None,
        radical_names: None,
        stroke_count: None,
        grade: None,
        frequency: None,
    });
    result
}

/// Joins deconjugation chains into the display trail, one `～{base}` run per
/// alternative chain, alternatives joined with `; `.
///
/// Steps are walked right to left. A parenthesized step is an annotation: it
/// renders only when it is the sole step of its chain, and is skipped
/// otherwise.
fn render_process_text(base: &str, chains: &[Vec<String>]) -> Option<String> {
    let mut rendered: Vec<String> = Vec::new();
    for chain in chains {
        let steps: Vec<&str> = chain
            .iter()
            .map(String::as_str)
            .filter(|step| !step.is_empty())
            .collect();
        if steps.is_empty() {
            continue;
        }
        let mut text = format!("～{base}");
        if steps.len() == 1 && is_parenthesized(steps[0]) {
            text.push_str(steps[0]);
            push_unique(&mut rendered, text);
            continue;
        }
        for &step in steps.iter().rev() {
            if is_parenthesized(step) {
                continue;
            }
            text.push('→');
            text.push_str(step);
        }
        push_unique(&mut rendered, text);
    }
    (!rendered.is_empty()).then(|| rendered.join("; "))
}

fn is_parenthesized(step: &str) -> bool {
    (step.starts_with('(') && step.ends_with(')'))
        || (step.starts_with('（') && step.ends_with('）'))
}

fn push_unique(rendered: &mut Vec<String>, text: String) {
    if !rendered.contains(&text) {
        rendered.push(text);
    }
}

fn format_jmdict_definitions(record: &JmdictRecord) -> String {
    let numbered = record.definitions.len() > 1;
    let mut senses = Vec::with_capacity(record.definitions.len());
    for (i, glosses) in record.definitions.iter().enumerate() {
        let mut sense = String::new();
        if numbered {
            sense.push_str(&format!("({}) ", i + 1));
        }
        let mut annotations: Vec<&str> = Vec::new();
        if let Some(word_classes) = record.word_classes.get(i) {
            annotations.extend(word_classes.iter().map(String::as_str));
        }
        if let Some(misc) = record.misc.as_ref().and_then(|misc| misc.get(i)) {
            annotations.extend(misc.iter().map(String::as_str));
        }
        if let Some(fields) = record.fields.as_ref().and_then(|fields| fields.get(i)) {
            annotations.extend(fields.iter().map(String::as_str));
        }
        if !annotations.is_empty() {
            sense.push_str(&format!("[{}] ", annotations.join(", ")));
        }
        sense.push_str(&glosses.join("; "));
        senses.push(sense);
    }
    senses.join(" ")
}

fn format_jmnedict_definitions(record: &JmnedictRecord) -> String {
    let definitions = record.definitions.join("; ");
    if record.name_types.is_empty() {
        definitions
    } else {
        format!("({}) {definitions}", record.name_types.join(", "))
    }
}

fn format_numbered(definitions: &[String]) -> String {
    if definitions.len() > 1 {
        definitions
            .iter()
            .enumerate()
            .map(|(i, definition)| format!("({}) {definition}", i + 1))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        definitions.join("")
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn flatten_unique(word_classes: &[Vec<String>]) -> Vec<String> {
    let mut flattened: Vec<String> = Vec::new();
    for sense in word_classes {
        for word_class in sense {
            if !flattened.contains(word_class) {
                flattened.push(word_class.clone());
            }
        }
    }
    flattened
}

fn concat_kanji_readings(reading_lists: &[Option<&[String]>]) -> Option<Vec<String>> {
    let readings: Vec<String> = reading_lists
        .iter()
        .flatten()
        .flat_map(|readings| readings.iter().cloned())
        .collect();
    (!readings.is_empty()).then_some(readings)
}
