use std::{collections::HashMap, sync::LazyLock};

pub const HIRAGANA_CONVERSION_RANGE: (u32, u32) = (0x3041, 0x3096);
pub const KATAKANA_CONVERSION_RANGE: (u32, u32) = (0x30a1, 0x30f6);
pub const KATAKANA_RANGE: (u32, u32) = (0x30a0, 0x30ff);
pub const HALFWIDTH_KATAKANA_RANGE: (u32, u32) = (0xff66, 0xff9f);

/// Offset between a katakana codepoint and its hiragana counterpart.
const KATAKANA_HIRAGANA_OFFSET: u32 = 0x60;

/// The katakana-hiragana prolonged sound mark (`ー`), which elongates the
/// vowel of the preceding kana.
pub const PROLONGED_SOUND_MARK: char = '\u{30fc}';

const HALFWIDTH_VOICED_MARK: char = 'ﾞ';
const HALFWIDTH_SEMI_VOICED_MARK: char = 'ﾟ';

/// Halfwidth katakana and their fullwidth forms.
/// Each value holds up to three variants: plain, dakuten, handakuten.
#[rustfmt::skip]
static HALFWIDTH_KATAKANA_MAP: LazyLock<HashMap<char, &str>> = LazyLock::new(|| {
    HashMap::from([
        ('･', "・"),('ｦ', "ヲヺ"),('ｧ', "ァ"),('ｨ', "ィ"),('ｩ', "ゥ"),('ｪ', "ェ"),
        ('ｫ', "ォ"),('ｬ', "ャ"),('ｭ', "ュ"),('ｮ', "ョ"),('ｯ', "ッ"),('ｰ', "ー"),
        ('ｱ', "ア"),('ｲ', "イ"),('ｳ', "ウヴ"),('ｴ', "エ"),('ｵ', "オ"),('ｶ', "カガ"),
        ('ｷ', "キギ"),('ｸ', "クグ"),('ｹ', "ケゲ"),('ｺ', "コゴ"),('ｻ', "サザ"),
        ('ｼ', "シジ"),('ｽ', "スズ"),('ｾ', "セゼ"),('ｿ', "ソゾ"),('ﾀ', "タダ"),('ﾁ', "チヂ"),
        ('ﾂ', "ツヅ"),('ﾃ', "テデ"),('ﾄ', "トド"),('ﾅ', "ナ"),('ﾆ', "ニ"),('ﾇ', "ヌ"),
        ('ﾈ', "ネ"),('ﾉ', "ノ"),('ﾊ', "ハバパ"),('ﾋ', "ヒビピ"),('ﾌ', "フブプ"),
        ('ﾍ', "ヘベペ"),('ﾎ', "ホボポ"),('ﾏ', "マ"),('ﾐ', "ミ"),('ﾑ', "ム"),
        ('ﾒ', "メ"),('ﾓ', "モ"),('ﾔ', "ヤ"),('ﾕ', "ユ"),('ﾖ', "ヨ"),('ﾗ', "ラ"),
        ('ﾘ', "リ"),('ﾙ', "ル"),('ﾚ', "レ"),('ﾛ', "ロ"),('ﾜ', "ワ"),('ﾝ', "ン"),
    ])
});

#[rustfmt::skip]
static VOWEL_TO_KANA_MAPPING: LazyLock<HashMap<char, &str>> = LazyLock::new(|| {
    HashMap::from([
        ('a', "ぁあかがさざただなはばぱまゃやらゎわヵァアカガサザタダナハバパマャヤラヮワヵヷ"),
        ('i', "ぃいきぎしじちぢにひびぴみりゐィイキギシジチヂニヒビピミリヰヸ"),
        ('u', "ぅうくぐすずっつづぬふぶぷむゅゆるゥウクグスズッツヅヌフブプムュユルヴ"),
        ('e', "ぇえけげせぜてでねへべぺめれゑヶェエケゲセゼテデネヘベペメレヱヶヹ"),
        ('o', "ぉおこごそぞとどのほぼぽもょよろをォオコゴソゾトドノホボポモョヨロヲヺ"),
    ])
});

static KANA_TO_VOWEL_MAPPING: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (&vowel, characters) in VOWEL_TO_KANA_MAPPING.iter() {
        for char in characters.chars() {
            map.insert(char, vowel);
        }
    }
    map
});

fn is_code_point_in_range(code_point: u32, (min, max): (u32, u32)) -> bool {
    (min..=max).contains(&code_point)
}

pub fn is_katakana(char: char) -> bool {
    is_code_point_in_range(char as u32, KATAKANA_RANGE)
        || is_code_point_in_range(char as u32, HALFWIDTH_KATAKANA_RANGE)
}

pub fn is_all_katakana(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_katakana)
}

/// Converts katakana (fullwidth and halfwidth) to hiragana, leaving every
/// other character untouched. The prolonged sound mark is preserved; its
/// expansion is a separate step ([expand_long_vowel_marks]).
pub fn katakana_to_hiragana(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(char) = chars.next() {
        let char = match HALFWIDTH_KATAKANA_MAP.get(&char) {
            Some(variants) => {
                let variants: Vec<char> = variants.chars().collect();
                match chars.peek() {
                    Some(&HALFWIDTH_VOICED_MARK) if variants.len() > 1 => {
                        chars.next();
                        variants[1]
                    }
                    Some(&HALFWIDTH_SEMI_VOICED_MARK) if variants.len() > 2 => {
                        chars.next();
                        variants[2]
                    }
                    _ => variants[0],
                }
            }
            None => char,
        };
        let code_point = char as u32;
        // ァ..ヶ sit exactly 0x60 above ぁ..ゖ
        match is_code_point_in_range(code_point, KATAKANA_CONVERSION_RANGE)
            .then(|| char::from_u32(code_point - KATAKANA_HIRAGANA_OFFSET))
            .flatten()
        {
            Some(converted) => result.push(converted),
            None => result.push(char),
        }
    }
    result
}

/// Number of prolonged sound marks past the first character. A mark in
/// leading position has no preceding kana and cannot be expanded.
pub fn expandable_long_vowel_mark_count(text: &str) -> usize {
    text.chars()
        .skip(1)
        .filter(|&c| c == PROLONGED_SOUND_MARK)
        .count()
}

pub fn contains_long_vowel_mark(text: &str) -> bool {
    text.contains(PROLONGED_SOUND_MARK)
}

/// Vowel kana a prolonged sound mark can stand in for, given the vowel row
/// of the preceding kana. The e row elongates as either え or い and the o
/// row as either お or う, so a single mark can branch into two variants.
fn long_vowel_mark_expansions(previous: char) -> Option<&'static [char]> {
    match KANA_TO_VOWEL_MAPPING.get(&previous) {
        Some('a') => Some(&['あ']),
        Some('i') => Some(&['い']),
        Some('u') => Some(&['う']),
        Some('e') => Some(&['え', 'い']),
        Some('o') => Some(&['お', 'う']),
        _ => None,
    }
}

/// Produces every reading of `text` with each expandable prolonged sound
/// mark replaced by a concrete vowel kana. A mark whose preceding character
/// has no vowel row is kept as-is. The caller bounds the mark count; the
/// variant count doubles per e/o-row mark.
pub fn expand_long_vowel_marks(text: &str) -> Vec<String> {
    let mut variants: Vec<String> = vec![String::with_capacity(text.len())];
    for (i, char) in text.chars().enumerate() {
        if char != PROLONGED_SOUND_MARK || i == 0 {
            for variant in &mut variants {
                variant.push(char);
            }
            continue;
        }
        let mut next_variants = Vec::with_capacity(variants.len());
        for variant in &variants {
            // expand against the concrete kana chosen so far, so ーー
            // chains elongate the vowel picked for the previous mark
            let expansions = variant
                .chars()
                .next_back()
                .and_then(long_vowel_mark_expansions);
            match expansions {
                Some(expansions) => {
                    for &expansion in expansions {
                        let mut next = variant.clone();
                        next.push(expansion);
                        next_variants.push(next);
                    }
                }
                None => {
                    let mut next = variant.clone();
                    next.push(char);
                    next_variants.push(next);
                }
            }
        }
        variants = next_variants;
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn katakana_folds_to_hiragana() {
        assert_eq!(katakana_to_hiragana("カタカナ"), "かたかな");
        assert_eq!(katakana_to_hiragana("わかる"), "わかる");
        assert_eq!(katakana_to_hiragana("分カル"), "分かる");
        assert_eq!(katakana_to_hiragana("ヴ"), "ゔ");
    }

    #[test]
    fn halfwidth_katakana_folds_with_voicing_marks() {
        assert_eq!(katakana_to_hiragana("ｶﾞｷﾞ"), "がぎ");
        assert_eq!(katakana_to_hiragana("ﾊﾟﾝ"), "ぱん");
        assert_eq!(katakana_to_hiragana("ｱｲｳ"), "あいう");
    }

    #[test]
    fn prolonged_sound_mark_survives_folding() {
        assert_eq!(katakana_to_hiragana("ケーキ"), "けーき");
    }

    #[test]
    fn expandable_mark_count_skips_leading_mark() {
        assert_eq!(expandable_long_vowel_mark_count("ーけき"), 0);
        assert_eq!(expandable_long_vowel_mark_count("けーきー"), 2);
        assert_eq!(expandable_long_vowel_mark_count("けき"), 0);
    }

    #[test]
    fn long_vowel_marks_expand_by_vowel_row() {
        assert_eq!(expand_long_vowel_marks("かー"), vec!["かあ"]);
        let mut expanded = expand_long_vowel_marks("けーき");
        expanded.sort();
        assert_eq!(expanded, vec!["けいき", "けえき"]);
        let mut expanded = expand_long_vowel_marks("ろーど");
        expanded.sort();
        assert_eq!(expanded, vec!["ろうど", "ろおど"]);
    }

    #[test]
    fn chained_marks_expand_against_the_chosen_vowel() {
        // the second mark sees the kana picked for the first, and an お pick
        // branches again
        let mut expanded = expand_long_vowel_marks("こーー");
        expanded.sort();
        assert_eq!(expanded, vec!["こうう", "こおう", "こおお"]);
    }

    #[test]
    fn unexpandable_mark_is_kept() {
        assert_eq!(expand_long_vowel_marks("んー"), vec!["んー"]);
    }

    #[test]
    fn katakana_classification() {
        assert!(is_all_katakana("カタカナ"));
        assert!(is_all_katakana("ｶﾀｶﾅ"));
        assert!(!is_all_katakana("かたかな"));
        assert!(!is_all_katakana(""));
        assert!(is_katakana('ー'));
    }
}
