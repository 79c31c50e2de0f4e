//! # API Facade
//!
//! [`ListMode`] is the single entry point a server uses for one list kind.
//! Build one per kind (bans, exceptions, invite exceptions) and route the
//! matching mode letter and lifecycle hooks to it.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Owns** the kind's settings, limit table, store and collaborators
//! - **Dispatches** each call to the command layer
//! - **Returns structured types** ([`ModeChange`], [`Reply`], [`ListEntry`])
//!
//! ## Server Hooks
//!
//! | Server event | Method |
//! |--------------|--------|
//! | `+x mask` / `-x mask` | [`ListMode::on_mode_change`] (or [`ListMode::add`] / [`ListMode::remove`]) |
//! | `MODE #chan x` with no parameter | [`ListMode::display_list`] |
//! | Rehash | [`ListMode::reload_limits`] |
//! | Channel destroyed | [`ListMode::on_channel_delete`] |
//! | Cleanup sweep | [`ListMode::on_cleanup`] |
//! | Module unload | [`ListMode::unload`] |
//! | Burst to a new server link | [`ListMode::on_sync_channel`] |
//!
//! ## Generic Over ListStore
//!
//! `ListMode<S: ListStore>` works with any store. [`ListMode::new`] uses
//! [`InMemoryListStore`]; [`ListMode::with_store`] takes any other.
//!
//! Lists are stored under the kind's info key, so several kinds can share one
//! store through an `Arc`:
//!
//! ```
//! use listmode::api::ListMode;
//! use listmode::config::ListModeSpec;
//! use listmode::store::memory::InMemoryListStore;
//! use std::sync::Arc;
//!
//! let shared = Arc::new(InMemoryListStore::new());
//! let bans = ListMode::with_store(ListModeSpec::ban_list(), Arc::clone(&shared));
//! let excepts = ListMode::with_store(ListModeSpec::exception_list(), Arc::clone(&shared));
//!
//! bans.add("op", "#rust", "troll");
//! excepts.add("op", "#rust", "friend");
//! assert_eq!(shared.len(), 2);
//! ```
//!
//! ## Threading
//!
//! Every method takes `&self`. Mode changes on a channel are serialized by the
//! store, and limit reloads swap the whole table at once, so a `ListMode` can
//! be shared between threads behind an `Arc`.

use crate::commands::{self, ModeChange, ModeContext, Reply};
use crate::commands::sync::SyncEmitter;
use crate::config::{ConfigSource, ListModeSpec};
use crate::limits::{LimitTable, RehashReport};
use crate::matcher::{CleanMask, MaskNormalizer, PatternMatcher, WildcardMatcher};
use crate::model::{CleanupTarget, ListEntry, ListLimit};
use crate::store::memory::InMemoryListStore;
use crate::store::ListStore;
use std::sync::Arc;

pub struct ListMode<S: ListStore = InMemoryListStore> {
    spec: ListModeSpec,
    limits: LimitTable,
    store: S,
    matcher: Arc<dyn PatternMatcher>,
    normalizer: Arc<dyn MaskNormalizer>,
}

impl ListMode<InMemoryListStore> {
    /// A list mode backed by an in-memory store, with the fallback limit only.
    /// Call [`ListMode::reload_limits`] to read configured limits.
    pub fn new(spec: ListModeSpec) -> Self {
        Self::with_store(spec, InMemoryListStore::new())
    }
}

impl<S: ListStore> ListMode<S> {
    pub fn with_store(spec: ListModeSpec, store: S) -> Self {
        Self {
            spec,
            limits: LimitTable::default(),
            store,
            matcher: Arc::new(WildcardMatcher),
            normalizer: Arc::new(CleanMask),
        }
    }

    /// Replaces the wildcard matcher used for limit rules.
    pub fn with_matcher(mut self, matcher: impl PatternMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    /// Replaces the mask normalizer.
    pub fn with_normalizer(mut self, normalizer: impl MaskNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Starts from the given rules instead of the fallback.
    pub fn with_limits(mut self, rules: Vec<ListLimit>) -> Self {
        self.limits = LimitTable::from_rules(rules);
        self
    }

    fn ctx(&self) -> ModeContext<'_, S> {
        ModeContext {
            spec: &self.spec,
            limits: &self.limits,
            store: &self.store,
            matcher: self.matcher.as_ref(),
            normalizer: self.normalizer.as_ref(),
        }
    }

    pub fn spec(&self) -> &ListModeSpec {
        &self.spec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active limit rules.
    pub fn limits(&self) -> Arc<Vec<ListLimit>> {
        self.limits.rules()
    }

    /// The rule governing `channel`'s capacity.
    pub fn capacity_for(&self, channel: &str) -> Option<ListLimit> {
        self.limits.capacity_for(channel, self.matcher.as_ref())
    }

    pub fn add(&self, source: &str, channel: &str, parameter: &str) -> ModeChange {
        commands::add::run(&self.ctx(), source, channel, parameter)
    }

    pub fn remove(&self, source: &str, channel: &str, parameter: &str) -> ModeChange {
        commands::remove::run(&self.ctx(), source, channel, parameter)
    }

    /// Applies `+mode parameter` when `adding`, `-mode parameter` otherwise.
    pub fn on_mode_change(
        &self,
        source: &str,
        channel: &str,
        parameter: &str,
        adding: bool,
    ) -> ModeChange {
        if adding {
            self.add(source, channel, parameter)
        } else {
            self.remove(source, channel, parameter)
        }
    }

    pub fn entries(&self, channel: &str) -> Vec<ListEntry> {
        commands::list::entries(&self.ctx(), channel)
    }

    pub fn display_list(&self, channel: &str) -> Vec<Reply> {
        commands::list::display(&self.ctx(), channel)
    }

    /// Re-reads limit rules from the kind's config tag.
    pub fn reload_limits(&self, source: &dyn ConfigSource) -> RehashReport {
        self.limits.reload(source, &self.spec.config_tag)
    }

    pub fn on_channel_delete(&self, channel: &str) -> bool {
        commands::cleanup::channel_delete(&self.ctx(), channel)
    }

    pub fn on_cleanup(&self, target: CleanupTarget<'_>) -> bool {
        commands::cleanup::on_cleanup(&self.ctx(), target)
    }

    pub fn unload(&self) -> usize {
        commands::cleanup::unload(&self.ctx())
    }

    pub fn on_sync_channel(&self, channel: &str, emitter: &mut dyn SyncEmitter) -> usize {
        commands::sync::run(&self.ctx(), channel, emitter)
    }
}
