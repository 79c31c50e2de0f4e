use crate::commands::ModeContext;
use crate::model::CleanupTarget;
use crate::store::ListStore;
use log::debug;

/// Releases `channel`'s list. Returns whether there was one.
pub fn channel_delete<S: ListStore>(ctx: &ModeContext<'_, S>, channel: &str) -> bool {
    match ctx.store.detach(&ctx.spec.info_key(), channel) {
        Some(list) => {
            debug!(
                "Released +{} list of {} ({} entries)",
                ctx.spec.mode,
                channel,
                list.len()
            );
            true
        }
        None => false,
    }
}

/// Cleanup sweep hook. Only channel targets hold list state.
pub fn on_cleanup<S: ListStore>(ctx: &ModeContext<'_, S>, target: CleanupTarget<'_>) -> bool {
    match target {
        CleanupTarget::Channel(channel) => channel_delete(ctx, channel),
        CleanupTarget::User(_) => false,
    }
}

/// Releases every channel's list of this kind. Returns how many were released.
pub fn unload<S: ListStore>(ctx: &ModeContext<'_, S>) -> usize {
    ctx.store
        .channels(&ctx.spec.info_key())
        .iter()
        .filter(|channel| channel_delete(ctx, channel))
        .count()
}
