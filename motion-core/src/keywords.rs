//! Ordered keyword tables.
//!
//! Each table is a list of `(needles, value)` rows evaluated top to bottom against a
//! lower-cased haystack. The first row with any needle contained in the haystack wins.

/// One row: any of `needles` maps to `value`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup<T: 'static> {
    pub needles: &'static [&'static str],
    pub value: T,
}

/// A precedence-ordered set of keyword groups.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable<T: 'static> {
    pub groups: &'static [KeywordGroup<T>],
}

impl<T: Copy + 'static> KeywordTable<T> {
    pub const fn new(groups: &'static [KeywordGroup<T>]) -> Self {
        Self { groups }
    }

    /// Case-insensitive substring match; `None` when no group applies.
    pub fn resolve(&self, text: &str) -> Option<T> {
        let lower = text.to_lowercase();
        self.resolve_lowered(&lower)
    }

    /// Same as [`resolve`](Self::resolve) for input that is already lower-cased.
    pub fn resolve_lowered(&self, lower: &str) -> Option<T> {
        self.groups
            .iter()
            .find(|g| g.needles.iter().any(|n| lower.contains(*n)))
            .map(|g| g.value)
    }

    /// Every needle across all groups, in table order.
    pub fn needles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.needles.iter().copied())
    }
}

pub const fn group<T: 'static>(needles: &'static [&'static str], value: T) -> KeywordGroup<T> {
    KeywordGroup { needles, value }
}

/// True if any needle occurs in `text` (case-insensitive).
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(*n))
}
