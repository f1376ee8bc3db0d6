use unicode_normalization::UnicodeNormalization;
use unicode_script::{Script, UnicodeScript};

/// Writing systems that legitimately combine Han with another script.
const HAN_COMBINATIONS: &[&[Script]] = &[
    &[Script::Han, Script::Hiragana, Script::Katakana],
    &[Script::Han, Script::Bopomofo],
    &[Script::Han, Script::Hangul],
];

/// Scripts used by `label` in first-seen order, after NFC normalization.
/// Common and Inherited characters (digits, punctuation, combining marks)
/// belong to no script.
pub fn scripts(label: &str) -> Vec<Script> {
    let normalized: String = label.nfc().collect();
    let mut scripts = Vec::new();
    for ch in normalized.chars() {
        let script = ch.script();
        if matches!(script, Script::Common | Script::Inherited | Script::Unknown) {
            continue;
        }
        if !scripts.contains(&script) {
            scripts.push(script);
        }
    }
    scripts
}

/// Check if `label` mixes scripts, the usual companion of a homograph.
/// Japanese, Chinese and Korean combinations with Han count as one system.
pub fn is_mixed_script(label: &str) -> bool {
    let used = scripts(label);
    if used.len() <= 1 {
        return false;
    }
    !HAN_COMBINATIONS
        .iter()
        .any(|allowed| used.iter().all(|s| allowed.contains(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_only() {
        assert_eq!(scripts("paypal"), vec![Script::Latin]);
        assert!(!is_mixed_script("paypal"));
    }

    #[test]
    fn test_cyrillic_in_latin_label() {
        assert!(is_mixed_script("p\u{0430}ypal"));
        assert_eq!(scripts("p\u{0430}ypal"), vec![Script::Latin, Script::Cyrillic]);
    }

    #[test]
    fn test_digits_and_hyphen_ignored() {
        assert!(!is_mixed_script("web-3-app"));
    }

    #[test]
    fn test_japanese_is_one_system() {
        // Han + Katakana
        assert!(!is_mixed_script("\u{534A}\u{89D2}\u{30AB}\u{30CA}"));
    }

    #[test]
    fn test_han_with_latin_is_mixed() {
        assert!(is_mixed_script("\u{65E5}\u{672C}x"));
    }

    #[test]
    fn test_empty_and_emoji() {
        assert!(scripts("").is_empty());
        assert!(!is_mixed_script("\u{1F47B}"));
    }
}
