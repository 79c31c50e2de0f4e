use crate::commands::ModeContext;
use crate::store::ListStore;
use chrono::{DateTime, Utc};
use std::fmt;

/// A mode change as sent to a peer server.
///
/// Peers only need `adding`, `mode` and `parameter` to rebuild the list;
/// setter and time ride along for protocols that can carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoMode {
    pub adding: bool,
    pub mode: char,
    pub parameter: String,
    pub setter: Option<String>,
    pub set_at: Option<DateTime<Utc>>,
}

impl fmt::Display for ProtoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.adding { '+' } else { '-' };
        write!(f, "{}{} {}", sign, self.mode, self.parameter)
    }
}

/// Receives the mode changes that replay a channel's list to a peer.
pub trait SyncEmitter {
    fn send_mode(&mut self, channel: &str, mode: &ProtoMode);
}

impl<F> SyncEmitter for F
where
    F: FnMut(&str, &ProtoMode),
{
    fn send_mode(&mut self, channel: &str, mode: &ProtoMode) {
        self(channel, mode)
    }
}

/// Emits one `+<mode> <mask>` per entry of `channel`'s list, in insertion
/// order. Returns how many were sent.
///
/// The list is copied under the store lock before anything is emitted, so the
/// peer gets the list exactly as it stood at one instant.
pub fn run<S: ListStore>(
    ctx: &ModeContext<'_, S>,
    channel: &str,
    emitter: &mut dyn SyncEmitter,
) -> usize {
    let Some(list) = ctx.store.snapshot(&ctx.spec.info_key(), channel) else {
        return 0;
    };

    let mode = ctx.spec.mode_char();
    for entry in &list {
        emitter.send_mode(
            channel,
            &ProtoMode {
                adding: true,
                mode,
                parameter: entry.mask.clone(),
                setter: Some(entry.setter.clone()),
                set_at: Some(entry.set_at),
            },
        );
    }
    list.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::test_utils::TestEnv;

    #[test]
    fn replays_entries_in_order_once_each() {
        let env = TestEnv::new();
        add::run(&env.ctx(), "alice", "#rust", "*!*@bad1.example");
        add::run(&env.ctx(), "bob", "#rust", "*!*@bad2.example");

        let mut sent: Vec<(String, String)> = Vec::new();
        let mut emitter = |channel: &str, mode: &ProtoMode| {
            sent.push((channel.to_string(), mode.to_string()));
        };
        let count = run(&env.ctx(), "#rust", &mut emitter);

        assert_eq!(count, 2);
        assert_eq!(
            sent,
            vec![
                ("#rust".to_string(), "+b *!*@bad1.example".to_string()),
                ("#rust".to_string(), "+b *!*@bad2.example".to_string()),
            ]
        );
    }

    #[test]
    fn carries_setter_and_time() {
        let env = TestEnv::new();
        let added = add::run(&env.ctx(), "alice", "#rust", "a").entry.unwrap();

        let mut modes = Vec::new();
        run(&env.ctx(), "#rust", &mut |_: &str, mode: &ProtoMode| {
            modes.push(mode.clone())
        });

        assert_eq!(modes.len(), 1);
        assert!(modes[0].adding);
        assert_eq!(modes[0].setter.as_deref(), Some("alice"));
        assert_eq!(modes[0].set_at, Some(added.set_at));
    }

    #[test]
    fn channel_without_list_sends_nothing() {
        let env = TestEnv::new();
        let mut calls = 0;
        let count = run(&env.ctx(), "#quiet", &mut |_: &str, _: &ProtoMode| calls += 1);
        assert_eq!(count, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn display_of_removal() {
        let mode = ProtoMode {
            adding: false,
            mode: 'e',
            parameter: "a!*@*".to_string(),
            setter: None,
            set_at: None,
        };
        assert_eq!(mode.to_string(), "-e a!*@*");
    }
}
