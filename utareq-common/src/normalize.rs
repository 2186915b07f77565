//! Text normalization for catalogue search and input validation
//!
//! Search matching must treat "ｶﾀｶﾅ", "カタカナ", and "かたかな" as the same
//! key, and fold full-width ASCII ("ＹＯＡＳＯＢＩ") to half-width. Queries
//! and catalogue fields are both normalized before substring comparison.

/// Half-width katakana base characters (U+FF66..U+FF9D) to full-width
const HALFWIDTH_KANA: [(char, char); 56] = [
    ('ｦ', 'ヲ'),
    ('ｧ', 'ァ'),
    ('ｨ', 'ィ'),
    ('ｩ', 'ゥ'),
    ('ｪ', 'ェ'),
    ('ｫ', 'ォ'),
    ('ｬ', 'ャ'),
    ('ｭ', 'ュ'),
    ('ｮ', 'ョ'),
    ('ｯ', 'ッ'),
    ('ｰ', 'ー'),
    ('ｱ', 'ア'),
    ('ｲ', 'イ'),
    ('ｳ', 'ウ'),
    ('ｴ', 'エ'),
    ('ｵ', 'オ'),
    ('ｶ', 'カ'),
    ('ｷ', 'キ'),
    ('ｸ', 'ク'),
    ('ｹ', 'ケ'),
    ('ｺ', 'コ'),
    ('ｻ', 'サ'),
    ('ｼ', 'シ'),
    ('ｽ', 'ス'),
    ('ｾ', 'セ'),
    ('ｿ', 'ソ'),
    ('ﾀ', 'タ'),
    ('ﾁ', 'チ'),
    ('ﾂ', 'ツ'),
    ('ﾃ', 'テ'),
    ('ﾄ', 'ト'),
    ('ﾅ', 'ナ'),
    ('ﾆ', 'ニ'),
    ('ﾇ', 'ヌ'),
    ('ﾈ', 'ネ'),
    ('ﾉ', 'ノ'),
    ('ﾊ', 'ハ'),
    ('ﾋ', 'ヒ'),
    ('ﾌ', 'フ'),
    ('ﾍ', 'ヘ'),
    ('ﾎ', 'ホ'),
    ('ﾏ', 'マ'),
    ('ﾐ', 'ミ'),
    ('ﾑ', 'ム'),
    ('ﾒ', 'メ'),
    ('ﾓ', 'モ'),
    ('ﾔ', 'ヤ'),
    ('ﾕ', 'ユ'),
    ('ﾖ', 'ヨ'),
    ('ﾗ', 'ラ'),
    ('ﾘ', 'リ'),
    ('ﾙ', 'ル'),
    ('ﾚ', 'レ'),
    ('ﾛ', 'ロ'),
    ('ﾜ', 'ワ'),
    ('ﾝ', 'ン'),
];

fn halfwidth_kana_to_fullwidth(c: char) -> Option<char> {
    HALFWIDTH_KANA
        .iter()
        .find(|(half, _)| *half == c)
        .map(|(_, full)| *full)
}

/// Apply a dakuten (voiced sound mark) to a full-width katakana base char
fn voiced(c: char) -> Option<char> {
    match c {
        'カ' | 'キ' | 'ク' | 'ケ' | 'コ' | 'サ' | 'シ' | 'ス' | 'セ' | 'ソ' | 'タ' | 'チ'
        | 'ツ' | 'テ' | 'ト' | 'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => {
            char::from_u32(c as u32 + 1)
        }
        'ウ' => Some('ヴ'),
        _ => None,
    }
}

/// Apply a handakuten (semi-voiced sound mark) to a full-width katakana char
fn semi_voiced(c: char) -> Option<char> {
    match c {
        'ハ' | 'ヒ' | 'フ' | 'ヘ' | 'ホ' => char::from_u32(c as u32 + 2),
        _ => None,
    }
}

/// Fold full-width ASCII (U+FF01..U+FF5E) to half-width
fn fold_ascii_width(c: char) -> char {
    if ('\u{ff01}'..='\u{ff5e}').contains(&c) {
        char::from_u32(c as u32 - 0xfee0).unwrap_or(c)
    } else {
        c
    }
}

/// Fold katakana (U+30A1..U+30F6) to hiragana
fn katakana_to_hiragana(c: char) -> char {
    if ('ァ'..='ヶ').contains(&c) {
        char::from_u32(c as u32 - 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// Normalize a string for catalogue search matching.
///
/// Half-width katakana is folded to full-width (composing voiced marks),
/// katakana to hiragana, full-width ASCII to half-width, everything
/// lowercased, and all whitespace (including U+3000) removed.
pub fn normalize_for_search(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(raw) = chars.next() {
        let c = match halfwidth_kana_to_fullwidth(raw) {
            Some(full) => match chars.peek() {
                Some('ﾞ') => {
                    if let Some(v) = voiced(full) {
                        chars.next();
                        v
                    } else {
                        full
                    }
                }
                Some('ﾟ') => {
                    if let Some(v) = semi_voiced(full) {
                        chars.next();
                        v
                    } else {
                        full
                    }
                }
                _ => full,
            },
            None => raw,
        };

        let c = katakana_to_hiragana(fold_ascii_width(c));
        if c.is_whitespace() {
            continue;
        }
        for lower in c.to_lowercase() {
            out.push(lower);
        }
    }

    out
}

/// Normalize a string for NG-word checking: lowercase, full-width ASCII to
/// half-width, whitespace removed. Kana scripts are left as-is.
pub fn normalize_for_validation(text: &str) -> String {
    text.chars()
        .map(fold_ascii_width)
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_widths_and_hiragana_normalize_identically() {
        let full = normalize_for_search("カタカナ");
        assert_eq!(normalize_for_search("ｶﾀｶﾅ"), full);
        assert_eq!(normalize_for_search("かたかな"), full);
        assert_eq!(full, "かたかな");
    }

    #[test]
    fn halfwidth_voiced_marks_compose() {
        assert_eq!(normalize_for_search("ｶﾞｷﾞｭｳ"), "がぎゅう");
        assert_eq!(normalize_for_search("ﾊﾟﾝ"), "ぱん");
        assert_eq!(normalize_for_search("ｳﾞ"), "ゔ");
    }

    #[test]
    fn fullwidth_ascii_folds_and_lowercases() {
        assert_eq!(normalize_for_search("ＹＯＡＳＯＢＩ"), "yoasobi");
        assert_eq!(normalize_for_search("Ｌｅｍｏｎ"), "lemon");
    }

    #[test]
    fn whitespace_is_stripped() {
        assert_eq!(normalize_for_search("King　Gnu"), "kinggnu");
        assert_eq!(normalize_for_search(" back  number "), "backnumber");
    }

    #[test]
    fn long_vowel_mark_is_preserved() {
        assert_eq!(normalize_for_search("ﾗｰﾒﾝ"), "らーめん");
        assert_eq!(normalize_for_search("ラーメン"), "らーめん");
    }

    #[test]
    fn validation_folds_width_but_not_kana() {
        assert_eq!(normalize_for_validation("ＦＵＣＫ"), "fuck");
        assert_eq!(normalize_for_validation("バ カ"), "バカ");
    }
}
