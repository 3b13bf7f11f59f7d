use anyhow::{Context, Result};
use regex::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;

/// Literal token matcher shared by every mode
///
/// The token is always treated as plain text. Case-insensitive matching goes through
/// an escaped regex so that non-matched regions keep their exact bytes.
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: String,
    folded: Option<Regex>,
}

impl Matcher {
    /// Build a matcher for `needle`
    ///
    /// # Arguments
    /// * `needle` - Literal token to look for
    /// * `case_sensitive` - Whether letter case must match exactly
    ///
    /// # Returns
    /// * `Result<Matcher>` - The matcher, or an error if the token is too large to compile
    pub fn new(needle: &str, case_sensitive: bool) -> Result<Self> {
        let folded = if case_sensitive || needle.is_empty() {
            None
        } else {
            let re = RegexBuilder::new(&regex::escape(needle))
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Failed to build matcher for {:?}", needle))?;
            Some(re)
        };

        Ok(Self {
            needle: needle.to_string(),
            folded,
        })
    }

    /// Whether the token occurs in `haystack`. An empty token matches everything.
    pub fn occurs(&self, haystack: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        match &self.folded {
            Some(re) => re.is_match(haystack),
            None => haystack.contains(&self.needle),
        }
    }

    /// Replace every leftmost, non-overlapping occurrence of the token
    ///
    /// # Arguments
    /// * `haystack` - Text to replace in
    /// * `replacement` - Literal replacement text (`$` is not expanded)
    ///
    /// # Returns
    /// * `Cow<str>` - Borrowed when nothing matched, owned otherwise
    pub fn replace_all<'a>(&self, haystack: &'a str, replacement: &str) -> Cow<'a, str> {
        if self.needle.is_empty() {
            return Cow::Borrowed(haystack);
        }
        match &self.folded {
            Some(re) => re.replace_all(haystack, NoExpand(replacement)),
            None if haystack.contains(&self.needle) => {
                Cow::Owned(haystack.replace(&self.needle, replacement))
            }
            None => Cow::Borrowed(haystack),
        }
    }
}
