//! Search input widget.

use super::Intent;
use crate::domain::{KindFilter, ReelfinderError, Result};

/// Longest query accepted from the keyboard.
const MAX_QUERY_CHARS: usize = 120;

/// Validates a raw query, returning it trimmed.
///
/// # Errors
///
/// Returns [`ReelfinderError::Validation`] for empty or whitespace-only input.
pub fn validate_query(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ReelfinderError::Validation(
            "Enter a title to search for".to_string(),
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Text input plus the kind filter it submits with.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    query: String,
    kind_filter: KindFilter,
}

impl SearchForm {
    #[must_use]
    pub fn new(kind_filter: KindFilter) -> Self {
        Self {
            query: String::new(),
            kind_filter,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn kind_filter(&self) -> KindFilter {
        self.kind_filter
    }

    /// Appends a typed character. Control characters and overlong input are ignored.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() || self.query.chars().count() >= MAX_QUERY_CHARS {
            return false;
        }
        self.query.push(c);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub fn cycle_kind(&mut self) -> KindFilter {
        self.kind_filter = self.kind_filter.next();
        self.kind_filter
    }

    /// Produces a search intent for the current input.
    ///
    /// # Errors
    ///
    /// Returns [`ReelfinderError::Validation`] when the input is blank; nothing is
    /// emitted in that case.
    pub fn submit(&self) -> Result<Intent> {
        let query = validate_query(&self.query)?;
        tracing::debug!(query = %query, kind = self.kind_filter.label(), "search form submitted");
        Ok(Intent::SearchSubmitted {
            query,
            kind_filter: self.kind_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> SearchForm {
        let mut form = SearchForm::default();
        for c in text.chars() {
            form.insert_char(c);
        }
        form
    }

    #[test]
    fn submit_trims_the_query() {
        let form = typed("  batman ");
        assert_eq!(
            form.submit().unwrap(),
            Intent::SearchSubmitted {
                query: "batman".into(),
                kind_filter: KindFilter::All
            }
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(
            typed("   ").submit(),
            Err(ReelfinderError::Validation(_))
        ));
        assert!(matches!(
            SearchForm::default().submit(),
            Err(ReelfinderError::Validation(_))
        ));
    }

    #[test]
    fn editing_and_filter_cycling() {
        let mut form = typed("alien");
        assert!(form.backspace());
        assert_eq!(form.query(), "alie");
        assert!(!form.insert_char('\u{7}'));
        assert_eq!(form.cycle_kind(), KindFilter::Movie);
        for _ in 0..4 {
            assert!(form.backspace());
        }
        assert!(!form.backspace());
    }

    #[test]
    fn input_length_is_capped() {
        let form = typed(&"x".repeat(MAX_QUERY_CHARS + 10));
        assert_eq!(form.query().chars().count(), MAX_QUERY_CHARS);
    }
}
