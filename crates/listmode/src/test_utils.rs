use crate::commands::ModeContext;
use crate::config::ListModeSpec;
use crate::limits::LimitTable;
use crate::matcher::{CleanMask, WildcardMatcher};
use crate::model::{ListLimit, ModeList};
use crate::store::memory::InMemoryListStore;
use crate::store::ListStore;

/// Owned parts of a ban list, for driving commands directly.
pub struct TestEnv {
    pub spec: ListModeSpec,
    pub limits: LimitTable,
    pub store: InMemoryListStore,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_limits(Vec::new())
    }

    pub fn with_limits(rules: Vec<ListLimit>) -> Self {
        Self {
            spec: ListModeSpec::ban_list(),
            limits: LimitTable::from_rules(rules),
            store: InMemoryListStore::new(),
        }
    }

    /// Copy of `channel`'s list as stored, bypassing the commands.
    pub fn list(&self, channel: &str) -> Option<ModeList> {
        self.store.snapshot(&self.spec.info_key(), channel)
    }

    pub fn ctx(&self) -> ModeContext<'_, InMemoryListStore> {
        ModeContext {
            spec: &self.spec,
            limits: &self.limits,
            store: &self.store,
            matcher: &WildcardMatcher,
            normalizer: &CleanMask,
        }
    }
}
