//! # Domain Model
//!
//! The data a list mode keeps per channel: [`ListEntry`] items collected in a
//! [`ModeList`], bounded by [`ListLimit`] rules.
//!
//! ## Entries
//!
//! An entry records the mask itself, who set it and when. Entries are never
//! edited in place: a mask is added once and removed by exact match.
//!
//! ```text
//! #rust  ┬─ *!*@spam.example   set by alice  1760000000
//!        ├─ *!bot@*            set by bob    1760000123
//!        └─ troll!*@*          set by alice  1760000456
//! ```
//!
//! Order is insertion order, and it is the order in which lists are shown to
//! users and replayed to peer servers.
//!
//! ## Limits
//!
//! A [`ListLimit`] pairs a channel-name mask with the maximum number of entries
//! a matching channel may hold. The limit table is ordered and the first
//! matching rule wins. [`ListLimit::fallback`] is the rule installed when the
//! configuration yields nothing usable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mask used by the fallback limit rule.
pub const FALLBACK_LIMIT_MASK: &str = "*";

/// Capacity granted by the fallback limit rule.
pub const FALLBACK_LIMIT: usize = 64;

/// One item in a channel's list (a single ban mask, exception mask, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// The normalized mask
    pub mask: String,
    /// Nick of whoever set the entry
    pub setter: String,
    /// When the entry was set
    pub set_at: DateTime<Utc>,
}

impl ListEntry {
    /// Creates an entry stamped with the current time.
    ///
    /// The mask is stored as given; callers normalize it first.
    pub fn new(mask: impl Into<String>, setter: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            setter: setter.into(),
            set_at: Utc::now(),
        }
    }

    /// Seconds since the Unix epoch, the form used on the wire.
    pub fn set_at_unix(&self) -> i64 {
        self.set_at.timestamp()
    }
}

/// A capacity rule: channels whose name matches `mask` may hold `limit` entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListLimit {
    pub mask: String,
    pub limit: usize,
}

impl ListLimit {
    pub fn new(mask: impl Into<String>, limit: usize) -> Self {
        Self {
            mask: mask.into(),
            limit,
        }
    }

    /// The `{"*", 64}` rule that keeps the limit table from ever being empty.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_LIMIT_MASK, FALLBACK_LIMIT)
    }
}

/// The entries of one channel's list, in insertion order.
///
/// Masks are unique within a list; [`ModeList::push`] does not check this,
/// the add command does before it pushes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeList {
    entries: Vec<ListEntry>,
}

impl ModeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, mask: &str) -> bool {
        self.entries.iter().any(|e| e.mask == mask)
    }

    pub fn push(&mut self, entry: ListEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry whose mask equals `mask` exactly.
    pub fn remove(&mut self, mask: &str) -> Option<ListEntry> {
        let pos = self.entries.iter().position(|e| e.mask == mask)?;
        Some(self.entries.remove(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ListEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ModeList {
    type Item = &'a ListEntry;
    type IntoIter = std::slice::Iter<'a, ListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What a cleanup sweep is asking the list mode to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupTarget<'a> {
    Channel(&'a str),
    User(&'a str),
}
