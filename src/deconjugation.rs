use serde::{Deserialize, Serialize};

/// One way of undoing grammatical inflection on a piece of text.
///
/// Produced by an external conjugation-rule engine; this crate only consumes
/// the tuples. `tag_path` records the grammatical tags walked while
/// stripping inflections and its last element is the tag used for word-class
/// compatibility filtering. `process` is the human-readable derivation trail
/// (e.g. "past", "polite"), kept for display and as a merge-dedup key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeconjugatedForm {
    /// The dictionary base form recovered from the inflected text.
    pub derived_text: String,
    /// The inflected text this form was derived from.
    pub original_text: String,
    pub tag_path: Vec<String>,
    pub process: Vec<String>,
}

impl DeconjugatedForm {
    pub fn last_tag(&self) -> Option<&str> {
        self.tag_path.last().map(String::as_str)
    }
}

/// The external deconjugation engine seam.
///
/// Given a hiragana-normalized string, returns every plausible way of
/// reversing its inflections. The rule tables behind this are not part of
/// this crate.
pub trait Deconjugator: Send + Sync {
    fn deconjugate(&self, text: &str) -> Vec<DeconjugatedForm>;
}

impl<F> Deconjugator for F
where
    F: Fn(&str) -> Vec<DeconjugatedForm> + Send + Sync,
{
    fn deconjugate(&self, text: &str) -> Vec<DeconjugatedForm> {
        self(text)
    }
}

/// Engine stand-in that never deconjugates anything. Exact-form lookups
/// still work with this installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDeconjugator;

impl Deconjugator for NullDeconjugator {
    fn deconjugate(&self, _text: &str) -> Vec<DeconjugatedForm> {
        Vec::new()
    }
}
