//! `ILIKE` patterns built from user input
//!
//! User text is escaped so `%`, `_` and `\` match literally, then wrapped
//! with the wildcards of the query. The in-memory store evaluates the same
//! patterns with [`LikePattern::matches`].

use regionscan_core::error::{RegionscanError, Result};

/// A case-insensitive `ILIKE` pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    needle: String,
    kind: PatternKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    Contains,
    Prefix,
}

impl LikePattern {
    /// `%text%`: matches values containing `text`
    pub fn contains(field: &str, text: &str) -> Result<Self> {
        Self::build(field, text, PatternKind::Contains)
    }

    /// `text%`: matches values starting with `text`
    pub fn prefix(field: &str, text: &str) -> Result<Self> {
        Self::build(field, text, PatternKind::Prefix)
    }

    fn build(field: &str, text: &str, kind: PatternKind) -> Result<Self> {
        let needle = text.trim();
        if needle.is_empty() {
            return Err(RegionscanError::InvalidQuery {
                reason: format!("{} cannot be empty", field),
            });
        }
        Ok(Self { needle: needle.to_string(), kind })
    }

    /// The pattern to bind to an `ILIKE` parameter
    pub fn to_sql(&self) -> String {
        let escaped = escape_like(&self.needle);
        match self.kind {
            PatternKind::Contains => format!("%{}%", escaped),
            PatternKind::Prefix => format!("{}%", escaped),
        }
    }

    /// Evaluate the pattern against a value, ignoring case
    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        let needle = self.needle.to_lowercase();
        match self.kind {
            PatternKind::Contains => value.contains(&needle),
            PatternKind::Prefix => value.starts_with(&needle),
        }
    }
}

/// Escape the `LIKE` metacharacters of `text` with a backslash
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("Berlin"), "Berlin");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_contains_pattern() {
        let pattern = LikePattern::contains("name", " york ").unwrap();
        assert_eq!(pattern.to_sql(), "%york%");
        assert!(pattern.matches("New York"));
        assert!(pattern.matches("YORKSHIRE"));
        assert!(!pattern.matches("Newark"));
    }

    #[test]
    fn test_prefix_pattern() {
        let pattern = LikePattern::prefix("sector", "II").unwrap();
        assert_eq!(pattern.to_sql(), "II%");
        assert!(pattern.matches("II.1.1"));
        assert!(pattern.matches("ii.2"));
        assert!(!pattern.matches("I.1.1"));

        // A one-character sector also matches longer sector names
        assert!(LikePattern::prefix("sector", "I").unwrap().matches("II.1"));
    }

    #[test]
    fn test_wildcards_in_input_match_literally() {
        let pattern = LikePattern::contains("name", "a_b").unwrap();
        assert!(pattern.matches("xa_bx"));
        assert!(!pattern.matches("axb"));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            LikePattern::contains("name", "  "),
            Err(RegionscanError::InvalidQuery { .. })
        ));
    }
}
