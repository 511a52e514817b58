use std::sync::Arc;

use indexmap::IndexMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::dictionary::{Dict, RawDictionaryEntry};
use crate::lookup::candidate::CandidateText;
use crate::lookup::wordclass::filter_compatible_entries;
use crate::store::WordClassTable;

/// Per-(dictionary, matched-key) accumulator.
///
/// All raw entries and process chains matching one key are merged here
/// before materialization. `process_chains` runs parallel to
/// `result_groups` when present; buckets created by exact or long-vowel
/// lookups carry no chains, because no deconjugation happened.
#[derive(Clone, Debug, PartialEq)]
pub struct IntermediaryResult {
    /// The input prefix that produced this bucket.
    pub matched_text: String,
    /// The derived dictionary form, when the match came through
    /// deconjugation.
    pub deconjugated_text: Option<String>,
    pub result_groups: Vec<Vec<Arc<RawDictionaryEntry>>>,
    pub process_chains: Option<Vec<Vec<Vec<String>>>>,
}

pub type BucketMap = IndexMap<String, IntermediaryResult>;

/// Runs the word-dictionary query stage: exact, deconjugated and
/// long-vowel-variant lookups over every candidate, merged into one bucket
/// map.
///
/// Invariant: at most one bucket per key. A deconjugated hit whose entry
/// group already exists (by content equality) only appends its process
/// chain, deduplicated by exact sequence equality, so re-running the stage
/// over the same candidates changes nothing.
pub fn query_word_dict(
    dict: &Dict,
    candidates: &[CandidateText],
    word_class_table: Option<&WordClassTable>,
) -> BucketMap {
    let mut buckets = BucketMap::new();
    for candidate in candidates {
        if let Some(entries) = dict.entries.get(&candidate.hiragana_form) {
            // a longer prefix may already own this key through deconjugation
            buckets
                .entry(candidate.hiragana_form.clone())
                .or_insert_with(|| IntermediaryResult {
                    matched_text: candidate.text.clone(),
                    deconjugated_text: None,
                    result_groups: vec![entries.to_vec()],
                    process_chains: None,
                });
        }

        for form in &candidate.deconjugations {
            let Some(entries) = dict.entries.get(&form.derived_text) else {
                continue;
            };
            let valid = filter_compatible_entries(form, entries, word_class_table);
            if valid.is_empty() {
                continue;
            }
            merge_deconjugated(
                &mut buckets,
                &candidate.text,
                &form.derived_text,
                &form.process,
                valid,
            );
        }

        if let Some(variants) = &candidate.long_vowel_variants {
            for variant in variants {
                let Some(entries) = dict.entries.get(variant) else {
                    continue;
                };
                // not deconjugation, so no grammatical trail is attached
                buckets
                    .entry(variant.clone())
                    .or_insert_with(|| IntermediaryResult {
                        matched_text: candidate.text.clone(),
                        deconjugated_text: None,
                        result_groups: vec![entries.to_vec()],
                        process_chains: None,
                    });
            }
        }
    }
    buckets
}

fn merge_deconjugated(
    buckets: &mut BucketMap,
    matched_text: &str,
    derived_text: &str,
    process: &[String],
    valid: Vec<Arc<RawDictionaryEntry>>,
) {
    match buckets.get_mut(derived_text) {
        Some(bucket) if bucket.matched_text == matched_text => {
            if let Some(index) = bucket.result_groups.iter().position(|group| *group == valid) {
                if let Some(chains) = bucket.process_chains.as_mut() {
                    if let Some(chain_list) = chains.get_mut(index) {
                        if !chain_list.iter().any(|chain| chain == process) {
                            chain_list.push(process.to_vec());
                        }
                    }
                }
            } else {
                bucket.result_groups.push(valid);
                if let Some(chains) = bucket.process_chains.as_mut() {
                    chains.push(vec![process.to_vec()]);
                }
            }
        }
        // a bucket from a longer prefix owns this key; drop the merge
        Some(_) => {}
        None => {
            buckets.insert(
                derived_text.to_string(),
                IntermediaryResult {
                    matched_text: matched_text.to_string(),
                    deconjugated_text: Some(derived_text.to_string()),
                    result_groups: vec![valid],
                    process_chains: Some(vec![vec![process.to_vec()]]),
                },
            );
        }
    }
}

/// Name dictionaries take every candidate prefix as a single exact key,
/// with no deconjugation stage.
pub fn query_name_dict(dict: &Dict, candidates: &[CandidateText]) -> BucketMap {
    let mut buckets = BucketMap::new();
    for candidate in candidates {
        if let Some(entries) = dict.entries.get(&candidate.hiragana_form) {
            buckets
                .entry(candidate.hiragana_form.clone())
                .or_insert_with(|| IntermediaryResult {
                    matched_text: candidate.text.clone(),
                    deconjugated_text: None,
                    result_groups: vec![entries.to_vec()],
                    process_chains: None,
                });
        }
    }
    buckets
}

/// Kanji dictionaries are keyed by the first character of the raw input
/// only.
pub fn query_kanji_dict(dict: &Dict, text: &str) -> BucketMap {
    let mut buckets = BucketMap::new();
    let Some(first) = text.graphemes(true).next() else {
        return buckets;
    };
    if let Some(entries) = dict.entries.get(first) {
        buckets.insert(
            first.to_string(),
            IntermediaryResult {
                matched_text: first.to_string(),
                deconjugated_text: None,
                result_groups: vec![entries.to_vec()],
                process_chains: None,
            },
        );
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deconjugation::DeconjugatedForm;
    use crate::dictionary::{DictType, JmdictRecord};
    use pretty_assertions::assert_eq;

    fn jmdict_record(id: u64, spelling: &str, reading: &str, tag: &str) -> RawDictionaryEntry {
        RawDictionaryEntry::Jmdict(JmdictRecord {
            id,
            primary_spelling: spelling.to_string(),
            primary_spelling_orthography_info: None,
            readings: Some(vec![reading.to_string()]),
            readings_orthography_info: None,
            alternative_spellings: None,
            alternative_spellings_orthography_info: None,
            definitions: vec![vec!["def".to_string()]],
            word_classes: vec![vec![tag.to_string()]],
            misc: None,
            fields: None,
        })
    }

    fn word_dict() -> Dict {
        let mut dict = Dict::new("JMdict", DictType::Jmdict, 1);
        dict.entries
            .insert("わかる", jmdict_record(1, "分かる", "わかる", "v5r"));
        dict
    }

    fn candidate(text: &str, forms: Vec<DeconjugatedForm>) -> CandidateText {
        CandidateText {
            text: text.to_string(),
            hiragana_form: text.to_string(),
            deconjugations: forms,
            long_vowel_variants: None,
        }
    }

    fn wakarimashita_form(process: Vec<&str>) -> DeconjugatedForm {
        DeconjugatedForm {
            derived_text: "わかる".to_string(),
            original_text: "わかりました".to_string(),
            tag_path: vec!["v5r".to_string()],
            process: process.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn deconjugated_hit_creates_one_bucket_per_key() {
        let dict = word_dict();
        let candidates = vec![candidate(
            "わかりました",
            vec![wakarimashita_form(vec!["past", "polite"])],
        )];
        let buckets = query_word_dict(&dict, &candidates, None);

        assert_eq!(buckets.len(), 1);
        let bucket = &buckets["わかる"];
        assert_eq!(bucket.matched_text, "わかりました");
        assert_eq!(bucket.deconjugated_text.as_deref(), Some("わかる"));
        assert_eq!(bucket.result_groups.len(), 1);
        assert_eq!(
            bucket.process_chains,
            Some(vec![vec![vec!["past".to_string(), "polite".to_string()]]])
        );
    }

    #[test]
    fn identical_groups_merge_by_appending_the_process_chain() {
        let dict = word_dict();
        let candidates = vec![candidate(
            "わかりました",
            vec![
                wakarimashita_form(vec!["past", "polite"]),
                wakarimashita_form(vec!["formal past"]),
            ],
        )];
        let buckets = query_word_dict(&dict, &candidates, None);

        let bucket = &buckets["わかる"];
        assert_eq!(bucket.result_groups.len(), 1);
        assert_eq!(
            bucket.process_chains,
            Some(vec![vec![
                vec!["past".to_string(), "polite".to_string()],
                vec!["formal past".to_string()],
            ]])
        );
    }

    #[test]
    fn duplicate_process_chains_are_dropped() {
        let dict = word_dict();
        let candidates = vec![candidate(
            "わかりました",
            vec![
                wakarimashita_form(vec!["past", "polite"]),
                wakarimashita_form(vec!["past", "polite"]),
            ],
        )];
        let buckets = query_word_dict(&dict, &candidates, None);

        let bucket = &buckets["わかる"];
        assert_eq!(bucket.result_groups.len(), 1);
        assert_eq!(
            bucket.process_chains,
            Some(vec![vec![vec!["past".to_string(), "polite".to_string()]]])
        );
    }

    #[test]
    fn querying_twice_is_idempotent() {
        let dict = word_dict();
        let candidates = vec![candidate(
            "わかりました",
            vec![wakarimashita_form(vec!["past", "polite"])],
        )];
        let first = query_word_dict(&dict, &candidates, None);
        let second = query_word_dict(&dict, &candidates, None);
        assert_eq!(first, second);
    }

    #[test]
    fn longer_prefix_bucket_wins_the_key() {
        let dict = word_dict();
        let candidates = vec![
            candidate(
                "わかりました",
                vec![wakarimashita_form(vec!["past", "polite"])],
            ),
            candidate(
                "わかりまし",
                vec![DeconjugatedForm {
                    derived_text: "わかる".to_string(),
                    original_text: "わかりまし".to_string(),
                    tag_path: vec!["v5r".to_string()],
                    process: vec!["other".to_string()],
                }],
            ),
        ];
        let buckets = query_word_dict(&dict, &candidates, None);

        let bucket = &buckets["わかる"];
        assert_eq!(bucket.matched_text, "わかりました");
        assert_eq!(
            bucket.process_chains,
            Some(vec![vec![vec!["past".to_string(), "polite".to_string()]]])
        );
    }

    #[test]
    fn long_vowel_variants_query_exact_without_chains() {
        let mut dict = Dict::new("JMdict", DictType::Jmdict, 1);
        dict.entries
            .insert("けいき", jmdict_record(2, "景気", "けいき", "n"));

        let candidates = vec![CandidateText {
            text: "ケーキ".to_string(),
            hiragana_form: "けーき".to_string(),
            deconjugations: vec![],
            long_vowel_variants: Some(vec!["けえき".to_string(), "けいき".to_string()]),
        }];
        let buckets = query_word_dict(&dict, &candidates, None);

        assert_eq!(buckets.len(), 1);
        let bucket = &buckets["けいき"];
        assert_eq!(bucket.matched_text, "ケーキ");
        assert_eq!(bucket.deconjugated_text, None);
        assert_eq!(bucket.process_chains, None);
    }

    #[test]
    fn kanji_query_uses_first_character_only() {
        use crate::dictionary::KanjidicRecord;
        let mut dict = Dict::new("Kanjidic", DictType::Kanjidic, 1);
        dict.entries.insert(
            "妹",
            RawDictionaryEntry::Kanjidic(KanjidicRecord {
                on_readings: Some(vec!["マイ".to_string()]),
                kun_readings: Some(vec!["いもうと".to_string()]),
                nanori_readings: None,
                radical_names: None,
                definitions: Some(vec!["younger sister".to_string()]),
                stroke_count: 8,
                grade: 2,
                frequency: None,
            }),
        );

        let buckets = query_kanji_dict(&dict, "妹が来た");
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets["妹"].matched_text, "妹");

        assert!(query_kanji_dict(&dict, "犬").is_empty());
    }
}
