pub mod candidate;
pub mod materialize;
pub mod ordering;
pub mod query;
pub mod result;
pub mod wordclass;

use std::sync::Arc;

use rayon::prelude::*;

use crate::deconjugation::Deconjugator;
use crate::dictionary::Dict;
use crate::errors::LookupError;
use crate::freq::add_frequencies;
use crate::pitch::add_pitch_positions;
use crate::store::{FreqDict, PitchDict, WordClassTable};

use candidate::{generate_candidates, CandidateText};
use ordering::compare_lookup_results;
use result::LookupResult;

/// Finds, merges and ranks dictionary entries matching prefixes of a span
/// of text.
///
/// Holds every long-lived collaborator of the pipeline: the active
/// dictionaries, the external deconjugation engine, the frequency sources,
/// and the optional pitch and word-class stores. One engine serves any
/// number of lookups; nothing it owns is mutated by a lookup.
pub struct LookupEngine {
    dicts: Vec<Dict>,
    deconjugator: Arc<dyn Deconjugator>,
    freq_dicts: Vec<FreqDict>,
    pitch_dict: Option<PitchDict>,
    word_class_table: Option<WordClassTable>,
}

impl LookupEngine {
    pub fn new(deconjugator: Arc<dyn Deconjugator>) -> Self {
        Self {
            dicts: Vec::new(),
            deconjugator,
            freq_dicts: Vec::new(),
            pitch_dict: None,
            word_class_table: None,
        }
    }

    pub fn add_dict(&mut self, dict: Dict) -> &mut Self {
        self.dicts.push(dict);
        self
    }

    pub fn add_freq_dict(&mut self, freq_dict: FreqDict) -> &mut Self {
        self.freq_dicts.push(freq_dict);
        self
    }

    pub fn set_pitch_dict(&mut self, pitch_dict: PitchDict) -> &mut Self {
        self.pitch_dict = Some(pitch_dict);
        self
    }

    /// Installs the spelling/reading → word-class cross-reference table
    /// used to filter deconjugated hits in families without native tags.
    pub fn set_word_class_table(&mut self, table: WordClassTable) -> &mut Self {
        self.word_class_table = Some(table);
        self
    }

    /// Looks up every dictionary entry plausibly matching a prefix of
    /// `text`, merged and sorted. Returns `None` when no dictionary
    /// produced any match.
    ///
    /// Candidate generation runs once up front; each active dictionary is
    /// then queried on its own rayon task against the shared immutable
    /// candidate list, and a failing dictionary only costs its own results.
    pub fn lookup_text(&self, text: &str) -> Option<Vec<LookupResult>> {
        if text.is_empty() {
            return None;
        }
        let candidates = generate_candidates(text, self.deconjugator.as_ref());
        if candidates.is_empty() {
            return None;
        }

        let mut results: Vec<LookupResult> = self
            .dicts
            .par_iter()
            .filter(|dict| dict.active)
            .flat_map_iter(|dict| {
                match run_dict_stage(dict, text, &candidates, self.word_class_table.as_ref()) {
                    Ok(results) => results,
                    Err(err) => {
                        log::error!(
                            "dictionary `{}` dropped from this lookup: {err}",
                            dict.name
                        );
                        Vec::new()
                    }
                }
            })
            .collect();
        if results.is_empty() {
            return None;
        }

        add_frequencies(&mut results, &self.freq_dicts);
        if let Some(pitch_dict) = &self.pitch_dict {
            add_pitch_positions(&mut results, pitch_dict);
        }
        results.sort_by(compare_lookup_results);
        Some(results)
    }
}

fn run_dict_stage(
    dict: &Dict,
    text: &str,
    candidates: &[CandidateText],
    word_class_table: Option<&WordClassTable>,
) -> Result<Vec<LookupResult>, LookupError> {
    let buckets = if dict.dict_type.is_kanji_type() {
        query::query_kanji_dict(dict, text)
    } else if dict.dict_type.is_name_type() {
        query::query_name_dict(dict, candidates)
    } else {
        query::query_word_dict(dict, candidates, word_class_table)
    };
    materialize::materialize(dict, &buckets)
}
