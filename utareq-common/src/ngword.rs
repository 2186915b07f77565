//! NG-word filtering for user-submitted text
//!
//! Requester names, comments, and suggestion text are checked before they
//! are persisted. Matching is substring-based over the validation-normalized
//! form of the input.

use crate::normalize::normalize_for_validation;

/// Words rejected in user-submitted free text
const NG_WORDS: &[&str] = &[
    // Japanese profanity and insults
    "死ね",
    "殺す",
    "しね",
    "ころす",
    "キチガイ",
    "基地外",
    "気違い",
    "きちがい",
    "ガイジ",
    "がいじ",
    "ばか",
    "バカ",
    "馬鹿",
    "アホ",
    "あほ",
    "くそ",
    "クソ",
    "糞",
    "カス",
    "かす",
    "ごみ",
    "ゴミ",
    "雑魚",
    "ざこ",
    "ブス",
    "ぶす",
    "デブ",
    "でぶ",
    "ちんこ",
    "まんこ",
    "うんこ",
    "セックス",
    "sex",
    "レイプ",
    "売春",
    "援交",
    // Common English profanity
    "fuck",
    "shit",
    "bitch",
    "cunt",
    "asshole",
    "dick",
];

/// Returns true if the text contains any NG word after normalization
pub fn contains_ng_word(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let normalized = normalize_for_validation(text);
    NG_WORDS.iter().any(|word| normalized.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        assert!(!contains_ng_word(""));
        assert!(!contains_ng_word("ともかな"));
        assert!(!contains_ng_word("夜に駆けるをお願いします"));
    }

    #[test]
    fn japanese_ng_words_detected() {
        assert!(contains_ng_word("ばか"));
        assert!(contains_ng_word("おまえはバカだ"));
        assert!(contains_ng_word("し　ね"));
    }

    #[test]
    fn english_ng_words_detected_despite_width_and_case() {
        assert!(contains_ng_word("FUCK"));
        assert!(contains_ng_word("ＦＵＣＫ"));
        assert!(contains_ng_word("what the f u c k"));
    }
}
