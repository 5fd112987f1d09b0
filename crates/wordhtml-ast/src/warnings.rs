//! Accumulated, de-duplicated warning messages

use indexmap::IndexSet;

/// An insertion-ordered set of human-readable warnings
///
/// Identical messages collapse into one entry; nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    messages: IndexSet<String>,
}

impl Warnings {
    /// Create an empty warning set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding a single message
    pub fn single(message: impl Into<String>) -> Self {
        let mut warnings = Self::new();
        warnings.push(message);
        warnings
    }

    /// Add a message (no-op if already present)
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.insert(message.into());
    }

    /// Add every message of `other`, preserving order
    pub fn extend(&mut self, other: Warnings) {
        self.messages.extend(other.messages);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.contains(message)
    }

    /// Iterate over messages in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|s| s.as_str())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages.into_iter().collect()
    }
}

impl FromIterator<String> for Warnings {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Warnings {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

/// A value together with the warnings raised while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct WithWarnings<T> {
    pub value: T,
    pub warnings: Warnings,
}

impl<T> WithWarnings<T> {
    pub fn new(value: T, warnings: Warnings) -> Self {
        Self { value, warnings }
    }

    /// Wrap a value that produced no warnings
    pub fn ok(value: T) -> Self {
        Self::new(value, Warnings::new())
    }

    /// Transform the value, keeping the warnings
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithWarnings<U> {
        WithWarnings {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
