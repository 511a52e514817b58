use unicode_segmentation::UnicodeSegmentation;

use crate::deconjugation::{DeconjugatedForm, Deconjugator};
use crate::kana::{
    contains_long_vowel_mark, expandable_long_vowel_mark_count, expand_long_vowel_marks,
    katakana_to_hiragana,
};

/// Expanding more marks than this is combinatorially unproductive (e/o-row
/// marks double the variant count each).
const MAX_EXPANDABLE_LONG_VOWEL_MARKS: usize = 4;

/// One input prefix plus its normalized and deconjugated variants.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateText {
    pub text: String,
    pub hiragana_form: String,
    pub deconjugations: Vec<DeconjugatedForm>,
    pub long_vowel_variants: Option<Vec<String>>,
}

/// Expands raw input into candidates, one per prefix, longest first.
///
/// Truncation steps by grapheme cluster so a multi-code-unit character is
/// never split. Long-vowel expansion stops for the rest of the call once a
/// prefix with no marks at all is seen; shorter prefixes of a mark-free
/// prefix are assumed mark-free too. That is a performance shortcut carried
/// over from the original engine, not a correctness guarantee.
pub fn generate_candidates(text: &str, deconjugator: &dyn Deconjugator) -> Vec<CandidateText> {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let mut candidates = Vec::with_capacity(graphemes.len());
    let mut try_long_vowel_expansion = true;

    for cut in 0..graphemes.len() {
        let prefix: String = graphemes[..graphemes.len() - cut].concat();
        let hiragana_form = katakana_to_hiragana(&prefix);
        let deconjugations = deconjugator.deconjugate(&hiragana_form);

        let long_vowel_variants = if try_long_vowel_expansion {
            let expandable = expandable_long_vowel_mark_count(&hiragana_form);
            if expandable == 0 {
                if !contains_long_vowel_mark(&hiragana_form) {
                    try_long_vowel_expansion = false;
                }
                None
            } else if expandable > MAX_EXPANDABLE_LONG_VOWEL_MARKS {
                None
            } else {
                Some(expand_long_vowel_marks(&hiragana_form))
            }
        } else {
            None
        };

        candidates.push(CandidateText {
            text: prefix,
            hiragana_form,
            deconjugations,
            long_vowel_variants,
        });
    }
    candidates
}
