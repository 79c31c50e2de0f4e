//! # Limit Table
//!
//! The ordered set of [`ListLimit`] rules that caps how long a channel's list
//! may grow.
//!
//! ## Lookup
//!
//! [`LimitTable::capacity_for`] walks the rules in configured order and returns
//! the first whose mask matches the channel name. First match wins, not best
//! match: with `#priv-*` ahead of `*`, `#priv-team` gets the `#priv-*` limit
//! even though `*` matches as well.
//!
//! ## Reload
//!
//! [`LimitTable::reload`] builds a complete new rule list from a
//! [`ConfigSource`] and publishes it with a single pointer swap
//! ([`arc_swap::ArcSwap`]). Readers never block and always see either the old
//! table or the new one in full.
//!
//! The table is never empty. When configuration yields no valid rule the
//! fallback `{"*", 64}` is installed.

use crate::config::ConfigSource;
use crate::error::ListModeError;
use crate::matcher::PatternMatcher;
use crate::model::ListLimit;
use arc_swap::ArcSwap;
use log::debug;
use std::sync::Arc;

/// Outcome of a reload.
#[derive(Debug, Default)]
pub struct RehashReport {
    /// Valid rules read from configuration
    pub loaded: usize,
    /// Rows that were skipped, one `ConfigInvalid` each
    pub skipped: Vec<ListModeError>,
    /// Whether the fallback rule had to be installed
    pub used_fallback: bool,
}

pub struct LimitTable {
    rules: ArcSwap<Vec<ListLimit>>,
}

impl Default for LimitTable {
    fn default() -> Self {
        Self::from_rules(Vec::new())
    }
}

impl LimitTable {
    /// Builds a table from already-validated rules, adding the fallback if
    /// `rules` is empty.
    pub fn from_rules(rules: Vec<ListLimit>) -> Self {
        Self {
            rules: ArcSwap::from_pointee(with_fallback(rules)),
        }
    }

    /// Snapshot of the active rules.
    pub fn rules(&self) -> Arc<Vec<ListLimit>> {
        self.rules.load_full()
    }

    /// The first rule whose mask matches `channel`.
    pub fn capacity_for(&self, channel: &str, matcher: &dyn PatternMatcher) -> Option<ListLimit> {
        self.rules
            .load()
            .iter()
            .find(|rule| matcher.matches(channel, &rule.mask))
            .cloned()
    }

    /// Replaces the active rules with the rows configured under `tag`.
    pub fn reload(&self, source: &dyn ConfigSource, tag: &str) -> RehashReport {
        let mut report = RehashReport::default();
        let mut rules = Vec::new();

        for (index, row) in source.read_section(tag).into_iter().enumerate() {
            match parse_limit(row.get("chan"), row.get("limit")) {
                Ok(limit) => {
                    debug!(
                        "Read channel listmode limit of {} for mask '{}'",
                        limit.limit, limit.mask
                    );
                    rules.push(limit);
                }
                Err(reason) => {
                    debug!("Invalid <{}> tag #{}: {}", tag, index, reason);
                    report.skipped.push(ListModeError::ConfigInvalid {
                        tag: tag.to_string(),
                        index,
                        reason,
                    });
                }
            }
        }

        report.loaded = rules.len();
        report.used_fallback = rules.is_empty();
        self.rules.store(Arc::new(with_fallback(rules)));
        report
    }
}

fn with_fallback(mut rules: Vec<ListLimit>) -> Vec<ListLimit> {
    if rules.is_empty() {
        rules.push(ListLimit::fallback());
    }
    rules
}

fn parse_limit(chan: Option<&str>, limit: Option<&str>) -> Result<ListLimit, String> {
    let mask = match chan {
        Some(mask) if !mask.is_empty() => mask,
        _ => return Err("missing or empty 'chan'".to_string()),
    };
    let raw = limit.ok_or_else(|| "missing 'limit'".to_string())?;
    let limit: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'limit' is not a number: '{}'", raw))?;
    if limit <= 0 {
        return Err(format!("'limit' must be positive, got {}", limit));
    }
    let limit = usize::try_from(limit).map_err(|_| format!("'limit' too large: {}", limit))?;
    Ok(ListLimit::new(mask, limit))
}
