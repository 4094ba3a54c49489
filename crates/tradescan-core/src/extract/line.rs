//! Transcript line with a whitespace-collapsed view for pattern matching.

/// One line of an OCR transcript.
///
/// `raw` is the line as recognized and is used for marker checks;
/// `normalized` collapses whitespace runs to single spaces and maps OCR dash
/// variants to ASCII minus, and is used for numeric patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub raw: &'a str,
    pub normalized: String,
}

impl<'a> Line<'a> {
    pub fn new(raw: &'a str) -> Self {
        let normalized = raw
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(['\u{2212}', '\u{2013}'], "-");

        Self { raw, normalized }
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whitespace-separated tokens of the normalized line.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized.split(' ').filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapsed() {
        let line = Line::new("  EURUSD \t sell   1.00 ");
        assert_eq!(line.normalized, "EURUSD sell 1.00");
        assert_eq!(line.raw, "  EURUSD \t sell   1.00 ");
        assert_eq!(line.tokens().count(), 3);
    }

    #[test]
    fn test_unicode_minus_mapped() {
        let line = Line::new("Profit: \u{2212}12.34 USD");
        assert_eq!(line.normalized, "Profit: -12.34 USD");
    }

    #[test]
    fn test_blank_line() {
        assert!(Line::new(" \t ").is_blank());
        assert!(!Line::new("x").is_blank());
    }
}
