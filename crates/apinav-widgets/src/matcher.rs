#![forbid(unsafe_code)]

//! Plain-text search predicate for hosts without their own matcher.

use crate::visibility::MatchPredicate;
use apinav_core::model::PathEntry;

/// Case-insensitive substring match over the context name, the method, the
/// path template, and the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMatcher;

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl MatchPredicate for TextMatcher {
    fn matches(&self, term: &str, entry: &PathEntry, context_name: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        contains_folded(context_name, &needle)
            || entry.method.as_lower().contains(needle.as_str())
            || contains_folded(&entry.path, &needle)
            || entry
                .summary
                .as_deref()
                .is_some_and(|summary| contains_folded(summary, &needle))
    }
}
