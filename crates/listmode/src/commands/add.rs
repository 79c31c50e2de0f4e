use crate::commands::{DenyReason, ModeChange, ModeContext, Reply};
use crate::error::ListModeError;
use crate::model::{ListEntry, ModeList};
use crate::store::ListStore;
use log::{debug, error};

/// Adds `parameter` to `channel`'s list on behalf of `source`.
///
/// The parameter is normalized first. The add is refused if the normalized
/// mask is already listed or the list has reached the limit of the first rule
/// matching the channel name. Both checks and the insert run under the store
/// lock.
pub fn run<S: ListStore>(
    ctx: &ModeContext<'_, S>,
    source: &str,
    channel: &str,
    parameter: &str,
) -> ModeChange {
    let mask = ctx.normalizer.normalize(parameter);

    let limit = ctx.limits.capacity_for(channel, ctx.matcher);
    if limit.is_none() {
        error!("{}", ListModeError::NoMatchingLimit(channel.to_string()));
    }
    let capacity = limit.map_or(0, |rule| rule.limit);

    let key = ctx.spec.info_key();
    let outcome = ctx.store.modify(&key, channel, |slot| {
        let list = slot.get_or_insert_with(ModeList::new);
        if list.contains(&mask) {
            return Err(DenyReason::Duplicate);
        }
        if list.len() >= capacity {
            return Err(DenyReason::ListFull { capacity });
        }
        let entry = ListEntry::new(mask.as_str(), source);
        list.push(entry.clone());
        Ok(entry)
    });

    match outcome {
        Ok(entry) => {
            debug!("{} set +{} {} on {}", source, ctx.spec.mode, entry.mask, channel);
            ModeChange::allow(entry)
        }
        Err(reason @ DenyReason::ListFull { .. }) => {
            debug!("+{} {} refused on {}: {}", ctx.spec.mode, mask, channel, reason);
            ModeChange::deny(reason).with_reply(Reply::ListFull {
                numeric: ctx.spec.full_numeric,
                channel: channel.to_string(),
                mask,
                text: ctx.spec.full_text.clone(),
            })
        }
        Err(reason) => {
            debug!("+{} {} refused on {}: {}", ctx.spec.mode, mask, channel, reason);
            ModeChange::deny(reason)
        }
    }
}
