use super::ListStore;
use crate::model::ModeList;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Channel lists kept in maps behind a single lock: list kind, then channel.
///
/// Mode changes are short (a scan of at most a few dozen entries) so one lock
/// for every channel keeps things simple without hurting throughput.
#[derive(Default)]
pub struct InMemoryListStore {
    lists: Mutex<HashMap<String, HashMap<String, ModeList>>>,
}

impl InMemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists held, over all kinds and channels.
    pub fn len(&self) -> usize {
        self.lists.lock().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ListStore for InMemoryListStore {
    fn modify<R>(
        &self,
        key: &str,
        channel: &str,
        f: impl FnOnce(&mut Option<ModeList>) -> R,
    ) -> R {
        let mut lists = self.lists.lock();
        let mut slot = lists.get_mut(key).and_then(|kind| kind.remove(channel));
        let result = f(&mut slot);
        match slot.filter(|l| !l.is_empty()) {
            Some(list) => {
                lists
                    .entry(key.to_string())
                    .or_default()
                    .insert(channel.to_string(), list);
            }
            None => {
                if lists.get(key).is_some_and(HashMap::is_empty) {
                    lists.remove(key);
                }
            }
        }
        result
    }

    fn snapshot(&self, key: &str, channel: &str) -> Option<ModeList> {
        self.lists.lock().get(key)?.get(channel).cloned()
    }

    fn detach(&self, key: &str, channel: &str) -> Option<ModeList> {
        let mut lists = self.lists.lock();
        let kind = lists.get_mut(key)?;
        let list = kind.remove(channel);
        if kind.is_empty() {
            lists.remove(key);
        }
        list
    }

    fn channels(&self, key: &str) -> Vec<String> {
        self.lists
            .lock()
            .get(key)
            .map(|kind| kind.keys().cloned().collect())
            .unwrap_or_default()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ListEntry;

    /// Info key of the default ban list.
    pub const BAN_KEY: &str = "exceptionbase_mode_b_list";

    pub struct StoreFixture {
        pub store: InMemoryListStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryListStore::new(),
            }
        }

        /// Adds `count` ban masks of the form `user<N>!*@host.example`.
        pub fn with_entries(self, channel: &str, count: usize) -> Self {
            self.store.modify(BAN_KEY, channel, |slot| {
                let list = slot.get_or_insert_with(ModeList::new);
                for i in 0..count {
                    list.push(ListEntry::new(
                        format!("user{}!*@host.example", i + 1),
                        "fixture",
                    ));
                }
            });
            self
        }

        pub fn with_mask(self, key: &str, channel: &str, mask: &str, setter: &str) -> Self {
            self.store.modify(key, channel, |slot| {
                slot.get_or_insert_with(ModeList::new)
                    .push(ListEntry::new(mask, setter));
            });
            self
        }
    }
}
