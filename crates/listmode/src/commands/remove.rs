use crate::commands::{DenyReason, ModeChange, ModeContext};
use crate::store::ListStore;
use log::debug;

/// Removes `parameter` from `channel`'s list.
///
/// Matching is exact on the normalized mask. Removing from a channel that has
/// no list is refused like any other miss. Taking out the last entry detaches
/// the list.
pub fn run<S: ListStore>(
    ctx: &ModeContext<'_, S>,
    source: &str,
    channel: &str,
    parameter: &str,
) -> ModeChange {
    let mask = ctx.normalizer.normalize(parameter);

    let key = ctx.spec.info_key();
    let removed = ctx.store.modify(&key, channel, |slot| {
        let list = slot.as_mut()?;
        let entry = list.remove(&mask)?;
        if list.is_empty() {
            *slot = None;
        }
        Some(entry)
    });

    match removed {
        Some(entry) => {
            debug!("{} set -{} {} on {}", source, ctx.spec.mode, entry.mask, channel);
            ModeChange::allow(entry)
        }
        None => {
            debug!("-{} {} refused on {}: not listed", ctx.spec.mode, mask, channel);
            ModeChange::deny(DenyReason::NotFound)
        }
    }
}
