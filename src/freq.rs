use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::kana::{is_all_katakana, katakana_to_hiragana};
use crate::lookup::result::LookupResult;
use crate::store::FreqDict;

/// Sentinel for "this source has no row for that record". Only surfaces at
/// the record boundary; resolution itself works in `Option`.
pub const FREQUENCY_NOT_FOUND: i32 = i32::MAX;

/// Resolved frequency of one record in one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyScore {
    pub source_name: String,
    pub value: i32,
    pub higher_value_means_higher_frequency: bool,
}

impl FrequencyScore {
    /// Value used by ranking rule 8: polarity-inverted when the source
    /// counts upwards, with the sentinel left untouched.
    pub fn ranking_value(&self) -> i32 {
        if self.value == FREQUENCY_NOT_FOUND {
            FREQUENCY_NOT_FOUND
        } else if self.higher_value_means_higher_frequency {
            FREQUENCY_NOT_FOUND - self.value
        } else {
            self.value
        }
    }
}

/// Attaches one [FrequencyScore] per active source to every record.
pub(crate) fn add_frequencies(results: &mut [LookupResult], freq_dicts: &[FreqDict]) {
    let active: Vec<&FreqDict> = freq_dicts.iter().filter(|freq| freq.active).collect();
    if active.is_empty() {
        return;
    }
    results.par_iter_mut().for_each(|result| {
        let scores = active
            .iter()
            .map(|freq| FrequencyScore {
                source_name: freq.name.clone(),
                value: resolve_frequency(freq, result).unwrap_or(FREQUENCY_NOT_FOUND),
                higher_value_means_higher_frequency: freq.higher_value_means_higher_frequency,
            })
            .collect();
        result.frequencies = Some(scores);
    });
}

/// Resolves the frequency of `result` in one source.
///
/// Spelling-keyed resolution runs first (primary, then alternative
/// spellings), filtered by reading equality; only if both fail entirely does
/// the reading-keyed fallback run, which covers katakana-only rows and
/// alternative-spelling cross-references. The minimum value across matching
/// rows of the stage that hit wins.
pub fn resolve_frequency(freq: &FreqDict, result: &LookupResult) -> Option<i32> {
    let mut best = resolve_by_spelling(freq, &result.primary_spelling, result);
    if best.is_none() {
        if let Some(alternative_spellings) = &result.alternative_spellings {
            for spelling in alternative_spellings {
                track_min(&mut best, resolve_by_spelling(freq, spelling, result));
            }
        }
    }
    if best.is_none() {
        best = resolve_by_reading(freq, result);
    }
    best
}

fn resolve_by_spelling(freq: &FreqDict, spelling: &str, result: &LookupResult) -> Option<i32> {
    let rows = freq.get(&katakana_to_hiragana(spelling))?;
    let mut best = None;
    for row in rows {
        let row_matches = match (&result.readings, &row.reading) {
            (Some(readings), Some(row_reading)) => readings.iter().any(|r| r == row_reading),
            (None, _) => row.spelling == spelling,
            (Some(_), None) => false,
        };
        if row_matches {
            track_min(&mut best, Some(row.frequency));
        }
    }
    best
}

fn resolve_by_reading(freq: &FreqDict, result: &LookupResult) -> Option<i32> {
    let readings = result.readings.as_ref()?;
    let mut best = None;
    for reading in readings {
        let Some(rows) = freq.get(&katakana_to_hiragana(reading)) else {
            continue;
        };
        for row in rows {
            let exact_katakana_match = row.spelling == *reading && is_all_katakana(reading);
            let alternative_spelling_match = result
                .alternative_spellings
                .as_ref()
                .is_some_and(|alts| alts.iter().any(|alt| *alt == row.spelling));
            if exact_katakana_match || alternative_spelling_match {
                track_min(&mut best, Some(row.frequency));
            }
        }
    }
    best
}

fn track_min(best: &mut Option<i32>, candidate: Option<i32>) {
    if let Some(candidate) = candidate {
        *best = Some(best.map_or(candidate, |current| current.min(candidate)));
    }
}
