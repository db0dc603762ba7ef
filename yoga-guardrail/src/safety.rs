//! Denylist screening of user queries.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Terms that block a query, checked in this order.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "pregnant",
    "pregnancy",
    "trimester",
    "hernia",
    "glaucoma",
    "blood pressure",
    "surgery",
    "operation",
    "injury",
    "pain",
    "medical",
    "doctor",
    "disease",
];

/// Outcome of screening a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SafetyVerdict {
    /// No denylisted term found.
    Safe,
    /// The query mentions `term`.
    Unsafe { term: String },
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }

    pub fn is_unsafe(&self) -> bool {
        !self.is_safe()
    }

    /// The term that triggered the gate, if any.
    pub fn matched_term(&self) -> Option<&str> {
        match self {
            Self::Safe => None,
            Self::Unsafe { term } => Some(term),
        }
    }
}

/// Case-insensitive substring denylist.
///
/// Terms are matched anywhere in the query, so "pain" also matches
/// "painful". The first term in list order that occurs wins, regardless of
/// where it appears in the query.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    terms: Vec<String>,
}

impl SafetyFilter {
    /// Build a filter over `terms`. Empty terms are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Append `term` to the end of the denylist.
    pub fn with_term(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim().to_lowercase();
        if !term.is_empty() {
            self.terms.push(term);
        }
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn classify(&self, query: &str) -> SafetyVerdict {
        let query = query.to_lowercase();
        match self.terms.iter().find(|term| query.contains(term.as_str())) {
            Some(term) => {
                debug!(term = %term, "query matched safety denylist");
                SafetyVerdict::Unsafe { term: term.clone() }
            }
            None => SafetyVerdict::Safe,
        }
    }
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pregnancy_query_matches_pregnancy_not_pregnant() {
        let verdict = SafetyFilter::default().classify("Is it safe to do backbends during pregnancy?");
        assert_eq!(verdict.matched_term(), Some("pregnancy"));
    }

    #[test]
    fn match_is_case_insensitive() {
        let verdict = SafetyFilter::default().classify("My DOCTOR said rest");
        assert_eq!(verdict.matched_term(), Some("doctor"));
    }

    #[test]
    fn list_order_beats_query_order() {
        // "pain" appears first in the query, "surgery" first in the list.
        let verdict = SafetyFilter::default().classify("pain after knee surgery");
        assert_eq!(verdict.matched_term(), Some("surgery"));
    }

    #[test]
    fn substring_matches_inside_words() {
        let verdict = SafetyFilter::default().classify("Painful hamstrings in forward folds");
        assert_eq!(verdict.matched_term(), Some("pain"));
    }

    #[test]
    fn multi_word_term() {
        let verdict = SafetyFilter::default().classify("inversions with high blood pressure");
        assert_eq!(verdict.matched_term(), Some("blood pressure"));
    }

    #[test]
    fn plain_pose_question_is_safe() {
        let verdict = SafetyFilter::default().classify("How do I do downward dog?");
        assert!(verdict.is_safe());
        assert_eq!(verdict.matched_term(), None);
    }

    #[test]
    fn empty_query_is_safe() {
        assert!(SafetyFilter::default().classify("").is_safe());
    }

    #[test]
    fn custom_terms_are_normalized() {
        let filter = SafetyFilter::new(["  Sciatica ", ""]).with_term("Vertigo");
        assert_eq!(filter.terms(), ["sciatica", "vertigo"]);
        assert!(filter.classify("twists with sciatica").is_unsafe());
        assert!(filter.classify("balance and VERTIGO").is_unsafe());
        assert!(filter.classify("pregnant").is_safe());
    }
}
