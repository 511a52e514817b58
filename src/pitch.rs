use rayon::prelude::*;

use crate::kana::{is_all_katakana, katakana_to_hiragana};
use crate::lookup::result::LookupResult;
use crate::store::PitchDict;

/// Marks a reading slot with no known accent. The output array exists only
/// once at least one slot resolved.
pub const PITCH_NOT_FOUND: u8 = u8::MAX;

pub(crate) fn add_pitch_positions(results: &mut [LookupResult], pitch: &PitchDict) {
    results.par_iter_mut().for_each(|result| {
        result.pitch_positions = resolve_pitch_positions(
            pitch,
            &result.primary_spelling,
            result.readings.as_deref(),
        );
    });
}

/// Resolves per-reading pitch-drop positions.
///
/// Spelling-keyed lookup runs first; each reading slot scans that bucket
/// for a row whose reading matches under hiragana folding. Only when the
/// spelling key misses entirely does the per-reading key path run, which
/// accepts a row for the same spelling, or a reading-only row for purely
/// katakana readings. The returned array is aligned 1:1 with `readings`.
pub fn resolve_pitch_positions(
    pitch: &PitchDict,
    primary_spelling: &str,
    readings: Option<&[String]>,
) -> Option<Vec<u8>> {
    let spelling_key = katakana_to_hiragana(primary_spelling);
    let Some(readings) = readings else {
        let rows = pitch.get(&spelling_key)?;
        return rows
            .iter()
            .find(|row| row.reading.is_none() && row.spelling == primary_spelling)
            .map(|row| vec![row.position]);
    };

    let mut positions = vec![PITCH_NOT_FOUND; readings.len()];
    let mut found = false;

    if let Some(rows) = pitch.get(&spelling_key) {
        for (i, reading) in readings.iter().enumerate() {
            let reading_key = katakana_to_hiragana(reading);
            let position = rows.iter().find_map(|row| {
                let row_reading = row.reading.as_deref()?;
                (katakana_to_hiragana(row_reading) == reading_key).then_some(row.position)
            });
            if let Some(position) = position {
                positions[i] = position;
                found = true;
            }
        }
    } else {
        for (i, reading) in readings.iter().enumerate() {
            let Some(rows) = pitch.get(&katakana_to_hiragana(reading)) else {
                continue;
            };
            let position = rows.iter().find_map(|row| {
                let spelling_match = row.spelling == primary_spelling;
                let katakana_reading_match =
                    row.reading.is_none() && is_all_katakana(reading) && row.spelling == *reading;
                (spelling_match || katakana_reading_match).then_some(row.position)
            });
            if let Some(position) = position {
                positions[i] = position;
                found = true;
            }
        }
    }

    found.then_some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PitchAccentRecord;
    use pretty_assertions::assert_eq;

    fn row(spelling: &str, reading: Option<&str>, position: u8) -> PitchAccentRecord {
        PitchAccentRecord {
            spelling: spelling.to_string(),
            reading: reading.map(String::from),
            position,
        }
    }

    #[test]
    fn no_readings_requires_reading_free_exact_row() {
        let mut pitch = PitchDict::default();
        pitch.insert("はい", row("はい", None, 1));
        pitch.insert("はい", row("灰", Some("はい"), 0));

        assert_eq!(
            resolve_pitch_positions(&pitch, "はい", None),
            Some(vec![1])
        );
        assert_eq!(resolve_pitch_positions(&pitch, "ない", None), None);
    }

    #[test]
    fn positions_align_with_readings_and_fill_sentinel() {
        let mut pitch = PitchDict::default();
        pitch.insert("日", row("日", Some("ひ"), 0));

        let readings = vec!["ひ".to_string(), "にち".to_string()];
        assert_eq!(
            resolve_pitch_positions(&pitch, "日", Some(&readings)),
            Some(vec![0, PITCH_NOT_FOUND])
        );
    }

    #[test]
    fn all_misses_allocate_nothing() {
        let pitch = PitchDict::default();
        let readings = vec!["ひ".to_string()];
        assert_eq!(resolve_pitch_positions(&pitch, "日", Some(&readings)), None);
    }

    #[test]
    fn reading_keyed_fallback_matches_spelling() {
        let mut pitch = PitchDict::default();
        pitch.insert("わかる", row("分かる", Some("わかる"), 2));

        let readings = vec!["わかる".to_string()];
        assert_eq!(
            resolve_pitch_positions(&pitch, "分かる", Some(&readings)),
            Some(vec![2])
        );
    }

    #[test]
    fn reading_keyed_fallback_accepts_katakana_reading_only_rows() {
        let mut pitch = PitchDict::default();
        pitch.insert("ネコ", row("ネコ", None, 1));

        let readings = vec!["ネコ".to_string()];
        assert_eq!(
            resolve_pitch_positions(&pitch, "猫", Some(&readings)),
            Some(vec![1])
        );

        // hiragana readings do not take the reading-only path
        let mut pitch = PitchDict::default();
        pitch.insert("ねこ", row("ねこ", None, 1));
        let readings = vec!["ねこ".to_string()];
        assert_eq!(resolve_pitch_positions(&pitch, "猫", Some(&readings)), None);
    }

    #[test]
    fn readings_match_under_hiragana_folding() {
        let mut pitch = PitchDict::default();
        pitch.insert("珈琲", row("珈琲", Some("コーヒー"), 1));

        let readings = vec!["こーひー".to_string()];
        assert_eq!(
            resolve_pitch_positions(&pitch, "珈琲", Some(&readings)),
            Some(vec![1])
        );
    }
}
