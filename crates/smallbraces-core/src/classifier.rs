// ABOUTME: Line classifier mapping raw line text to a LineCategory
// ABOUTME: Long-line guard first, then whitespace, cruft allow-list and punctuation pattern in order

use crate::error::ClassifierError;
use regex::Regex;
use smallbraces_logging::debug;
use smallbraces_types::{ClassifierConfig, LineCategory};
use std::collections::HashSet;
use std::sync::LazyLock;

static DEFAULT_CLASSIFIER: LazyLock<LineClassifier> = LazyLock::new(|| {
    LineClassifier::new(&ClassifierConfig::default())
        .expect("default punctuation set compiles to a valid pattern")
});

/// Classify `text` with the default cruft list and punctuation set.
pub fn classify(text: &str, max_classifiable_length: usize) -> LineCategory {
    DEFAULT_CLASSIFIER.classify_with_limit(text, max_classifiable_length)
}

/// Pure, deterministic line classifier built from configuration
#[derive(Debug, Clone)]
pub struct LineClassifier {
    max_classifiable_length: usize,
    cruft: HashSet<String>,
    punctuation_only: Regex,
}

impl LineClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let cruft = config
            .cruft
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect::<HashSet<_>>();

        debug!(
            max_classifiable_length = config.max_classifiable_length,
            cruft_entries = cruft.len(),
            punctuation = %config.punctuation,
            "Building line classifier"
        );

        Ok(Self {
            max_classifiable_length: config.max_classifiable_length,
            cruft,
            punctuation_only: punctuation_pattern(&config.punctuation)?,
        })
    }

    pub fn max_classifiable_length(&self) -> usize {
        self.max_classifiable_length
    }

    pub fn is_cruft(&self, trimmed: &str) -> bool {
        self.cruft.contains(trimmed)
    }

    pub fn classify(&self, text: &str) -> LineCategory {
        self.classify_with_limit(text, self.max_classifiable_length)
    }

    fn classify_with_limit(&self, text: &str, max_classifiable_length: usize) -> LineCategory {
        // Stops counting as soon as the limit is passed
        if text.chars().nth(max_classifiable_length).is_some() {
            return LineCategory::Default;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            LineCategory::Whitespace
        } else if self.is_cruft(trimmed) {
            LineCategory::CommentCruft
        } else if self.punctuation_only.is_match(trimmed) {
            LineCategory::PunctuationOnly
        } else {
            LineCategory::Default
        }
    }
}

/// `^[<chars>\s]+$` with every configured character escaped
fn punctuation_pattern(punctuation: &str) -> Result<Regex, regex::Error> {
    let class: String = punctuation
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    Regex::new(&format!(r"^[{class}\s]+$"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new(&ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_whitespace() {
        let c = classifier();
        assert_eq!(c.classify(""), LineCategory::Whitespace);
        assert_eq!(c.classify("   "), LineCategory::Whitespace);
        assert_eq!(c.classify("\t \t"), LineCategory::Whitespace);
    }

    #[test]
    fn test_comment_cruft() {
        let c = classifier();
        assert_eq!(c.classify("/// <summary>"), LineCategory::CommentCruft);
        assert_eq!(c.classify("    /// </summary>  "), LineCategory::CommentCruft);
        assert_eq!(c.classify("\t#region"), LineCategory::CommentCruft);
        assert_eq!(c.classify("[Pure]"), LineCategory::CommentCruft);
        assert_eq!(c.classify("        break;"), LineCategory::CommentCruft);
        // Exact match only
        assert_eq!(c.classify("/// <summary>Text"), LineCategory::Default);
    }

    #[test]
    fn test_punctuation_only() {
        let c = classifier();
        assert_eq!(c.classify("{"), LineCategory::PunctuationOnly);
        assert_eq!(c.classify("   }   {  ;"), LineCategory::PunctuationOnly);
        assert_eq!(c.classify("});"), LineCategory::PunctuationOnly);
        assert_eq!(c.classify("  ),"), LineCategory::PunctuationOnly);
        assert_eq!(c.classify("} else {"), LineCategory::Default);
        assert_eq!(c.classify("]"), LineCategory::Default);
    }

    #[test]
    fn test_default() {
        let c = classifier();
        assert_eq!(c.classify("let x = 1;"), LineCategory::Default);
        assert_eq!(c.classify("// a comment"), LineCategory::Default);
    }

    #[test]
    fn test_long_lines_are_default() {
        let c = classifier();
        let braces = "{".repeat(150);
        assert_eq!(c.classify(&braces), LineCategory::Default);

        let blank = " ".repeat(101);
        assert_eq!(c.classify(&blank), LineCategory::Default);

        // Exactly at the threshold is still classified
        let at_limit = "}".repeat(100);
        assert_eq!(c.classify(&at_limit), LineCategory::PunctuationOnly);
    }

    /// Every string over `alphabet` with up to `max_len` characters
    fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut strings = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max_len {
            frontier = frontier
                .iter()
                .flat_map(|prefix| {
                    alphabet.iter().map(move |c| {
                        let mut next = prefix.clone();
                        next.push(*c);
                        next
                    })
                })
                .collect();
            strings.extend(frontier.iter().cloned());
        }
        strings
    }

    #[test]
    fn test_any_line_past_threshold_is_default() {
        let c = classifier();
        let fillers = [" ", "\t", "{", ";", "/// <summary>", "x", "\u{3000}"];

        for filler in fillers {
            for len in 95..=105 {
                let text: String = filler.chars().cycle().take(len).collect();
                let category = c.classify(&text);
                if len > 100 {
                    assert_eq!(category, LineCategory::Default, "{len} chars of {filler:?}");
                } else {
                    assert_eq!(category, classify(&text, 100), "{len} chars of {filler:?}");
                }
            }
        }

        for limit in [1, 5, 20] {
            for len in 0..=limit + 3 {
                let text = "}".repeat(len);
                let expected = match len {
                    0 => LineCategory::Whitespace,
                    n if n > limit => LineCategory::Default,
                    _ => LineCategory::PunctuationOnly,
                };
                assert_eq!(classify(&text, limit), expected, "limit {limit}, len {len}");
            }
        }
    }

    #[test]
    fn test_all_punctuation_and_whitespace_strings() {
        let c = classifier();
        let alphabet = ['(', ')', '{', '}', ';', ',', ' ', '\t'];

        for text in all_strings(&alphabet, 4) {
            let expected = if text.trim().is_empty() {
                LineCategory::Whitespace
            } else {
                LineCategory::PunctuationOnly
            };
            assert_eq!(c.classify(&text), expected, "text: {text:?}");

            // Any other visible character disqualifies the line
            for intruder in ['a', '7', '[', '.', '_'] {
                let mixed = format!("{text}{intruder}");
                assert_eq!(c.classify(&mixed), LineCategory::Default, "text: {mixed:?}");
            }
        }
    }

    #[test]
    fn test_lines_trimming_to_empty_are_whitespace() {
        let c = classifier();
        let alphabet = [' ', '\t', '\r', '\u{a0}', '\u{3000}'];

        for text in all_strings(&alphabet, 5) {
            assert_eq!(c.classify(&text), LineCategory::Whitespace, "text: {text:?}");
        }
    }

    #[test]
    fn test_threshold_counts_characters() {
        let c = classifier();
        // 60 three-byte characters: 180 bytes but only 60 chars
        let wide = "\u{3000}".repeat(60);
        assert_eq!(c.classify(&wide), LineCategory::Whitespace);
    }

    #[test]
    fn test_custom_cruft_changes_only_membership() {
        let base = classifier();
        let custom = LineClassifier::new(&ClassifierConfig {
            cruft: vec!["// ----".to_string(), "  ".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(custom.classify("  // ----"), LineCategory::CommentCruft);
        assert_eq!(base.classify("  // ----"), LineCategory::Default);
        assert_eq!(custom.classify("/// <summary>"), LineCategory::Default);

        for text in ["", "  ", "{", " } ;", "fn main() {", "x"] {
            assert_eq!(custom.classify(text), base.classify(text), "text: {:?}", text);
        }
    }

    #[test]
    fn test_custom_punctuation_is_escaped() {
        let c = LineClassifier::new(&ClassifierConfig {
            punctuation: "[]^-\\".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(c.classify(" [ ] "), LineCategory::PunctuationOnly);
        assert_eq!(c.classify("^-\\"), LineCategory::PunctuationOnly);
        assert_eq!(c.classify("{"), LineCategory::Default);
    }

    #[test]
    fn test_empty_punctuation_set() {
        let c = LineClassifier::new(&ClassifierConfig {
            punctuation: String::new(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(c.classify("{"), LineCategory::Default);
        assert_eq!(c.classify("   "), LineCategory::Whitespace);
    }

    #[test]
    fn test_idempotent() {
        let c = classifier();
        for text in ["", "{", "/// <summary>", "let a = b;", "   }   {  ;"] {
            assert_eq!(c.classify(text), c.classify(text));
        }
    }

    #[test]
    fn test_free_function_uses_given_limit() {
        assert_eq!(classify("{ }", 100), LineCategory::PunctuationOnly);
        assert_eq!(classify("{ }", 2), LineCategory::Default);
        assert_eq!(classify("/// </summary>", 100), LineCategory::CommentCruft);
    }
}
