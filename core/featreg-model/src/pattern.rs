use std::fmt;

/// A name pattern where `*` matches any run of characters, including none.
///
/// A pattern without `*` only matches itself, so exact names and wildcards
/// share one type. `f*` is a prefix match and `*` matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The pattern that matches every name.
    pub fn match_all() -> Self {
        Self("*".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the pattern contains at least one `*`.
    pub fn is_wildcard(&self) -> bool {
        self.0.contains('*')
    }

    /// Returns true if the pattern matches every name.
    pub fn is_match_all(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c == '*')
    }

    pub fn matches(&self, candidate: &str) -> bool {
        if !self.is_wildcard() {
            return self.0 == candidate;
        }

        let segments: Vec<&str> = self.0.split('*').collect();
        let (Some((first, rest)), Some(last)) = (segments.split_first(), segments.last()) else {
            return false;
        };
        let middle = &rest[..rest.len().saturating_sub(1)];

        let Some(remaining) = candidate.strip_prefix(first) else {
            return false;
        };
        let Some(mut remaining) = remaining.strip_suffix(last) else {
            return false;
        };

        for segment in middle.iter().filter(|s| !s.is_empty()) {
            match remaining.find(segment) {
                Some(idx) => remaining = &remaining[idx + segment.len()..],
                None => return false,
            }
        }
        true
    }

    /// Renders the pattern for SQLite's case-sensitive `GLOB` operator.
    ///
    /// `?` and `[` are GLOB metacharacters and are escaped as one-character
    /// classes; `*` keeps its meaning.
    pub fn to_sqlite_glob(&self) -> String {
        let mut glob = String::with_capacity(self.0.len());
        for c in self.0.chars() {
            match c {
                '?' => glob.push_str("[?]"),
                '[' => glob.push_str("[[]"),
                other => glob.push(other),
            }
        }
        glob
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Self(s)
    }
}
