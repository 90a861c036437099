//! Keys addressing entries of mappings and sequences.

use std::fmt;

/// Address of a single entry inside a container.
///
/// Mappings are addressed by field name and sequences by position. A
/// sequence is treated as a mapping from index to element, so the two kinds
/// are interchangeable when a [`crate::Replacer`] is looked up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Key<'a> {
    /// Named field of a mapping.
    Field(&'a str),
    /// Position inside a sequence.
    Index(usize),
}

impl Key<'_> {
    /// Returns the index this key addresses when read as a sequence position.
    ///
    /// Field names are accepted only in canonical decimal form, so `"1"`
    /// addresses index 1 while `"01"` and `"+1"` address nothing.
    #[must_use]
    pub fn as_index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::Field(name) => name
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == name),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}
