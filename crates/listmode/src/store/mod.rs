//! # Storage Layer
//!
//! This module defines where channel lists live. The [`ListStore`] trait lets
//! a server keep them wherever suits it (a side table, a field on its channel
//! struct) while the command layer stays the same.
//!
//! ## Ownership
//!
//! A channel owns at most one list per list kind. The list exists only while
//! it holds entries:
//!
//! ```text
//!   Absent ──add──▶ Populated ──remove last──▶ Absent
//!                      │
//!                      └──channel destroyed / cleanup──▶ Absent
//! ```
//!
//! An emptied list is detached right away, so "has a list" and "has entries"
//! always mean the same thing.
//!
//! ## Atomicity
//!
//! [`ListStore::modify`] runs a closure with exclusive access to one channel's
//! slot. The duplicate check, the capacity check and the insert all happen
//! inside one call, so concurrent mode changes on the same channel cannot
//! push a list past its limit or store a mask twice. Reads
//! ([`ListStore::snapshot`]) take the same lock and hand back a copy.
//!
//! ## Keys
//!
//! Every call names the list kind by its info key
//! ([`crate::config::ListModeSpec::info_key`], e.g.
//! `exceptionbase_mode_b_list`) as well as the channel. One store can then
//! hold the bans and the exceptions of every channel without the lists
//! mixing.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryListStore`]: kind → channel → list maps behind one lock.
//!
//! `Arc<S>` is a store too, so several [`crate::api::ListMode`] instances can
//! share one.

use crate::model::ModeList;
use std::sync::Arc;

pub mod memory;

pub trait ListStore: Send + Sync {
    /// Runs `f` with exclusive access to `channel`'s slot for list kind `key`.
    ///
    /// The slot is `None` when no list is attached. Whatever `f` leaves in the
    /// slot is kept, except that an empty list is detached.
    fn modify<R>(
        &self,
        key: &str,
        channel: &str,
        f: impl FnOnce(&mut Option<ModeList>) -> R,
    ) -> R;

    /// Copy of the channel's list, if it has one.
    fn snapshot(&self, key: &str, channel: &str) -> Option<ModeList>;

    /// Detaches and returns the channel's list.
    fn detach(&self, key: &str, channel: &str) -> Option<ModeList>;

    /// Channels that currently hold a list of kind `key`.
    fn channels(&self, key: &str) -> Vec<String>;
}

impl<S: ListStore> ListStore for Arc<S> {
    fn modify<R>(
        &self,
        key: &str,
        channel: &str,
        f: impl FnOnce(&mut Option<ModeList>) -> R,
    ) -> R {
        (**self).modify(key, channel, f)
    }

    fn snapshot(&self, key: &str, channel: &str) -> Option<ModeList> {
        (**self).snapshot(key, channel)
    }

    fn detach(&self, key: &str, channel: &str) -> Option<ModeList> {
        (**self).detach(key, channel)
    }

    fn channels(&self, key: &str) -> Vec<String> {
        (**self).channels(key)
    }
}
