use crate::commands::{ModeContext, Reply};
use crate::model::ListEntry;
use crate::store::ListStore;

/// The channel's entries in insertion order. Empty when the channel has no list.
pub fn entries<S: ListStore>(ctx: &ModeContext<'_, S>, channel: &str) -> Vec<ListEntry> {
    ctx.store
        .snapshot(&ctx.spec.info_key(), channel)
        .map(|list| list.into_entries())
        .unwrap_or_default()
}

/// One [`Reply::Entry`] per entry followed by [`Reply::EndOfList`].
///
/// The end marker is always sent, also for a channel with no list.
pub fn display<S: ListStore>(ctx: &ModeContext<'_, S>, channel: &str) -> Vec<Reply> {
    let mut replies: Vec<Reply> = entries(ctx, channel)
        .into_iter()
        .map(|entry| Reply::Entry {
            numeric: ctx.spec.list_numeric,
            channel: channel.to_string(),
            entry,
        })
        .collect();

    replies.push(Reply::EndOfList {
        numeric: ctx.spec.end_numeric,
        channel: channel.to_string(),
        text: ctx.spec.end_text.clone(),
    });
    replies
}
