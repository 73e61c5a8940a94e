//! @ai:module:intent Locate, count and fill blank markers in kata code
//! @ai:module:layer domain
//! @ai:module:public_api BlankMarker, BlankPosition, DEFAULT_BLANK_MARKER
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use regex::Regex;

pub const DEFAULT_BLANK_MARKER: &str = "__";

/// @ai:intent Position of a single blank inside a code snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankPosition {
    /// 1-based
    pub line: usize,
    /// 1-based, counted in chars
    pub column: usize,
    pub offset: usize,
}

/// @ai:intent Literal token scanner for blank markers
/// @ai:invariant a token that starts or ends with a word character only matches at a word boundary on that side
#[derive(Debug, Clone)]
pub struct BlankMarker {
    token: String,
    pattern: Regex,
}

impl BlankMarker {
    /// @ai:intent Build a scanner for the given token
    /// @ai:pre token is not empty
    /// @ai:effects pure
    pub fn new(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::Config("blank marker must not be empty".to_string()));
        }

        let is_word = |c: char| c.is_alphanumeric() || c == '_';
        let mut pattern = String::new();
        if token.starts_with(is_word) {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(token));
        if token.ends_with(is_word) {
            pattern.push_str(r"\b");
        }

        let pattern = Regex::new(&pattern).map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            token: token.to_string(),
            pattern,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// @ai:intent Count blank markers in code
    /// @ai:effects pure
    pub fn count(&self, code: &str) -> usize {
        self.pattern.find_iter(code).count()
    }

    /// @ai:intent List blank markers in reading order
    /// @ai:post positions are sorted by offset
    /// @ai:effects pure
    pub fn positions(&self, code: &str) -> Vec<BlankPosition> {
        self.pattern
            .find_iter(code)
            .map(|m| {
                let before = &code[..m.start()];
                let line = before.matches('\n').count() + 1;
                let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
                BlankPosition {
                    line,
                    column: code[line_start..m.start()].chars().count() + 1,
                    offset: m.start(),
                }
            })
            .collect()
    }

    /// @ai:intent Substitute answers for blanks, in order
    /// @ai:pre answers.len() == self.count(code)
    /// @ai:post result contains no blank markers introduced by the original code
    /// @ai:effects pure
    pub fn fill<S: AsRef<str>>(&self, code: &str, answers: &[S]) -> Result<String> {
        let expected = self.count(code);
        if expected != answers.len() {
            return Err(Error::AnswerCount {
                expected,
                found: answers.len(),
            });
        }

        let mut filled = String::with_capacity(code.len());
        let mut last = 0;
        for (m, answer) in self.pattern.find_iter(code).zip(answers) {
            filled.push_str(&code[last..m.start()]);
            filled.push_str(answer.as_ref());
            last = m.end();
        }
        filled.push_str(&code[last..]);

        Ok(filled)
    }
}

impl Default for BlankMarker {
    fn default() -> Self {
        Self::new(DEFAULT_BLANK_MARKER).expect("default blank marker is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_standalone_blanks() {
        let marker = BlankMarker::default();
        assert_eq!(marker.count("a should be(__)\nb should be(__)"), 2);
        assert_eq!(marker.count("val x = __"), 1);
    }

    #[test]
    fn test_ignores_wildcards_and_identifiers() {
        let marker = BlankMarker::default();
        assert_eq!(marker.count("case Employee(\"Robin\", _) => 1"), 0);
        assert_eq!(marker.count("def __init__(self): x__y ___"), 0);
    }

    #[test]
    fn test_positions() {
        let marker = BlankMarker::default();
        let positions = marker.positions("x should be(__)\n  y(__)");
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], BlankPosition { line: 1, column: 13, offset: 12 });
        assert_eq!(positions[1].line, 2);
        assert_eq!(positions[1].column, 5);
    }

    #[test]
    fn test_fill_in_order() {
        let marker = BlankMarker::default();
        let filled = marker
            .fill("a should be(__)\nb should be(__)", &["\"Chevy\"", "1978"])
            .unwrap();
        assert_eq!(filled, "a should be(\"Chevy\")\nb should be(1978)");
    }

    #[test]
    fn test_fill_answer_count_mismatch() {
        let marker = BlankMarker::default();
        let err = marker.fill("x(__) y(__)", &["1"]).unwrap_err();
        assert!(matches!(err, Error::AnswerCount { expected: 2, found: 1 }));
    }

    #[test]
    fn test_custom_symbol_marker() {
        let marker = BlankMarker::new("???").unwrap();
        assert_eq!(marker.count("x shouldBe ??? and y shouldBe ???"), 2);
        assert_eq!(marker.fill("f(???)", &["42"]).unwrap(), "f(42)");
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert!(matches!(BlankMarker::new(""), Err(Error::Config(_))));
    }
}
