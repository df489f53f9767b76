//! Selecting entries by title

use regex::Regex;

use crate::domain::DomainError;

/// Matches entry titles against the titles given on the command line.
///
/// With no titles every entry matches. In regex mode each title is a
/// pattern that must match the whole entry title; otherwise titles
/// compare exactly.
#[derive(Debug)]
pub enum TitleMatcher {
    Any,
    Exact(Vec<String>),
    Patterns(Vec<Regex>),
}

impl TitleMatcher {
    pub fn new(titles: &[Option<String>], regex: bool) -> Result<Self, DomainError> {
        let titles: Vec<&String> = titles.iter().flatten().collect();
        if titles.is_empty() {
            return Ok(TitleMatcher::Any);
        }
        if !regex {
            return Ok(TitleMatcher::Exact(titles.into_iter().cloned().collect()));
        }
        let patterns = titles
            .into_iter()
            .map(|t| {
                Regex::new(&format!("^(?:{})$", t)).map_err(|e| DomainError::InvalidPattern {
                    pattern: t.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TitleMatcher::Patterns(patterns))
    }

    pub fn matches(&self, title: &str) -> bool {
        match self {
            TitleMatcher::Any => true,
            TitleMatcher::Exact(titles) => titles.iter().any(|t| t == title),
            TitleMatcher::Patterns(patterns) => patterns.iter().any(|p| p.is_match(title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_titles_when_matching_then_everything_matches() {
        let matcher = TitleMatcher::new(&[None], true).unwrap();
        assert!(matcher.matches("anything"));
    }

    #[test]
    fn given_regex_mode_when_matching_then_whole_title_must_match() {
        let matcher = TitleMatcher::new(&[Some("Silly post, number [0-9]*".into())], true).unwrap();
        assert!(matcher.matches("Silly post, number 42"));
        assert!(!matcher.matches("Silly post, number 42 (draft)"));
    }

    #[test]
    fn given_exact_mode_when_matching_then_metacharacters_are_literal() {
        let matcher = TitleMatcher::new(&[Some(".*".into())], false).unwrap();
        assert!(matcher.matches(".*"));
        assert!(!matcher.matches("cats"));
    }

    #[test]
    fn given_broken_pattern_when_building_then_invalid_pattern_error() {
        let err = TitleMatcher::new(&[Some("(".into())], true).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPattern { .. }));
    }
}
