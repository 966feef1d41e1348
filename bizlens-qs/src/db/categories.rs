//! Category token helpers
//!
//! Categories are stored on the business row as a single ", "-delimited
//! string; tokens are derived by splitting at query time. Category filtering
//! elsewhere uses substring containment against the stored string, which is
//! a deliberate compatibility choice: a category name that is a substring of
//! a longer category name also matches.

use std::collections::HashMap;

/// Split a stored category string into its tokens
///
/// Splits on the exact ", " delimiter with no further trimming. Empty
/// tokens (from an empty or malformed string) are dropped.
pub fn split_category_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(", ").filter(|token| !token.is_empty())
}

/// Count category token occurrences across many stored category strings
pub fn count_category_tokens<'a, I>(category_strings: I) -> HashMap<String, i64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, i64> = HashMap::new();
    for raw in category_strings {
        for token in split_category_tokens(raw) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_exact_delimiter() {
        let tokens: Vec<&str> = split_category_tokens("Coffee, Bakery, Food").collect();
        assert_eq!(tokens, vec!["Coffee", "Bakery", "Food"]);
    }

    #[test]
    fn test_split_does_not_trim_other_whitespace() {
        // A bare comma is not the delimiter; the token keeps it
        let tokens: Vec<&str> = split_category_tokens("Coffee,Bakery").collect();
        assert_eq!(tokens, vec!["Coffee,Bakery"]);
    }

    #[test]
    fn test_split_empty_string_yields_nothing() {
        assert_eq!(split_category_tokens("").count(), 0);
    }

    #[test]
    fn test_single_category() {
        let tokens: Vec<&str> = split_category_tokens("Coffee").collect();
        assert_eq!(tokens, vec!["Coffee"]);
    }

    #[test]
    fn test_count_across_businesses() {
        let counts = count_category_tokens(["Coffee, Bakery", "Coffee"]);
        assert_eq!(counts.get("Coffee"), Some(&2));
        assert_eq!(counts.get("Bakery"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
