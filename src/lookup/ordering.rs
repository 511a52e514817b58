use std::cmp::Ordering;

use crate::freq::FREQUENCY_NOT_FOUND;
use crate::lookup::result::LookupResult;

/// Orthography markers that make a spelling irregular, outdated or rare.
const SPELLING_RARITY_MARKERS: [&str; 4] = ["iK", "io", "oK", "rK"];

/// Orthography markers that make a reading irregular, outdated or rare.
const READING_RARITY_MARKERS: [&str; 3] = ["ik", "ok", "rk"];

/// "Usually written using kana alone".
const USUALLY_KANA_MARKER: &str = "uk";

/// The total order over final records: nine keys, each breaking the ties of
/// the one before it. Derived entirely from per-record key values, so it is
/// total and free of cycles by construction.
pub fn compare_lookup_results(a: &LookupResult, b: &LookupResult) -> Ordering {
    // 1. longer matched text first
    b.matched_text
        .len()
        .cmp(&a.matched_text.len())
        // 2. exact primary-spelling match preferred
        .then_with(|| exact_spelling_rank(a).cmp(&exact_spelling_rank(b)))
        // 3. matched text being one of the readings preferred
        .then_with(|| reading_match_rank(a).cmp(&reading_match_rank(b)))
        // 4. shorter or absent deconjugation trail preferred
        .then_with(|| process_length(a).cmp(&process_length(b)))
        // 5. dictionary priority, lower wins
        .then_with(|| a.dict.priority.cmp(&b.dict.priority))
        // 6. rare orthography penalized, but only for exact spelling matches
        .then_with(|| spelling_rarity_rank(a).cmp(&spelling_rarity_rank(b)))
        // 7. reading rarity
        .then_with(|| reading_rarity_rank(a).cmp(&reading_rarity_rank(b)))
        // 8. frequency, polarity-adjusted per source
        .then_with(|| frequency_rank(a).cmp(&frequency_rank(b)))
        // 9. position of the matched text in the reading list
        .then_with(|| reading_index(a).cmp(&reading_index(b)))
}

fn exact_spelling_rank(result: &LookupResult) -> u8 {
    u8::from(result.primary_spelling != result.matched_text)
}

fn matched_reading_index(result: &LookupResult) -> Option<usize> {
    result
        .readings
        .as_ref()?
        .iter()
        .position(|reading| *reading == result.matched_text)
}

fn reading_match_rank(result: &LookupResult) -> u8 {
    u8::from(matched_reading_index(result).is_none())
}

fn process_length(result: &LookupResult) -> usize {
    result
        .deconjugation_process_text
        .as_ref()
        .map_or(0, |text| text.chars().count())
}

fn spelling_rarity_rank(result: &LookupResult) -> u8 {
    if result.primary_spelling != result.matched_text {
        return 0;
    }
    let rare = result
        .primary_spelling_orthography_info
        .as_ref()
        .is_some_and(|info| {
            info.iter()
                .any(|marker| SPELLING_RARITY_MARKERS.contains(&marker.as_str()))
        });
    u8::from(rare)
}

fn reading_rarity_rank(result: &LookupResult) -> u8 {
    let Some(index) = matched_reading_index(result) else {
        return 3;
    };
    let usually_kana = result.misc.as_ref().is_some_and(|misc| {
        misc.iter()
            .any(|sense| sense.iter().any(|tag| tag == USUALLY_KANA_MARKER))
    });
    if usually_kana {
        return 0;
    }
    let rare_reading = result
        .readings_orthography_info
        .as_ref()
        .and_then(|info| info.get(index))
        .is_some_and(|markers| {
            markers
                .iter()
                .any(|marker| READING_RARITY_MARKERS.contains(&marker.as_str()))
        });
    if rare_reading {
        2
    } else {
        1
    }
}

fn frequency_rank(result: &LookupResult) -> i32 {
    result
        .frequencies
        .as_ref()
        .and_then(|scores| scores.iter().map(|score| score.ranking_value()).min())
        .unwrap_or(FREQUENCY_NOT_FOUND)
}

fn reading_index(result: &LookupResult) -> usize {
    matched_reading_index(result).unwrap_or(usize::MAX)
}
