//! # Command Layer
//!
//! This module contains the **core logic** of a list mode. Each operation lives
//! in its own submodule as plain functions over a borrowed [`ModeContext`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Apply add/remove requests to a channel's list (dedup, capacity, timestamps)
//! - Enumerate lists for display and for replay to peer servers
//! - Release lists when channels go away
//! - Return structured values ([`ModeChange`], [`Reply`]) and leave formatting
//!   and delivery to the caller
//!
//! ## What Commands Do NOT Do
//!
//! - **Authorization**: whoever calls in has already been allowed to
//! - **Parsing mode strings**: the dispatcher hands over one parameter at a time
//! - **Socket I/O**: replies are values; [`Reply::format`] only builds the line
//!
//! ## Outcomes
//!
//! Denials are ordinary results, not errors. A refused change comes back as
//! [`ModeAction::Deny`] with a [`DenyReason`], and its parameter is cleared so
//! the dispatcher does not echo it to the channel.
//!
//! ## Command Modules
//!
//! - [`add`]: Add a mask, enforcing uniqueness and the channel's limit
//! - [`remove`]: Remove a mask by exact match
//! - [`list`]: Read the list, or build the reply lines that show it
//! - [`sync`]: Replay the list to a peer server
//! - [`cleanup`]: Release lists on channel deletion, cleanup and unload

use crate::config::ListModeSpec;
use crate::limits::LimitTable;
use crate::matcher::{MaskNormalizer, PatternMatcher};
use crate::model::ListEntry;
use crate::store::ListStore;
use thiserror::Error;

pub mod add;
pub mod cleanup;
pub mod list;
pub mod remove;
pub mod sync;

/// Everything a command needs, borrowed from the owning [`crate::api::ListMode`].
pub struct ModeContext<'a, S: ListStore> {
    pub spec: &'a ListModeSpec,
    pub limits: &'a LimitTable,
    pub store: &'a S,
    pub matcher: &'a dyn PatternMatcher,
    pub normalizer: &'a dyn MaskNormalizer,
}

/// Why a mode change was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    #[error("mask is already on the list")]
    Duplicate,

    #[error("list is full ({capacity} entries)")]
    ListFull { capacity: usize },

    #[error("mask is not on the list")]
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeAction {
    Allow,
    Deny(DenyReason),
}

impl ModeAction {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ModeAction::Allow)
    }
}

/// Result of an add or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub action: ModeAction,
    /// The normalized mask to propagate, `None` when the change was refused
    pub parameter: Option<String>,
    /// The entry that was added or removed
    pub entry: Option<ListEntry>,
    /// Lines for the requesting user
    pub replies: Vec<Reply>,
}

impl ModeChange {
    pub fn allow(entry: ListEntry) -> Self {
        Self {
            action: ModeAction::Allow,
            parameter: Some(entry.mask.clone()),
            entry: Some(entry),
            replies: Vec::new(),
        }
    }

    pub fn deny(reason: DenyReason) -> Self {
        Self {
            action: ModeAction::Deny(reason),
            parameter: None,
            entry: None,
            replies: Vec::new(),
        }
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.replies.push(reply);
        self
    }

    pub fn is_allowed(&self) -> bool {
        self.action.is_allowed()
    }

    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match &self.action {
            ModeAction::Deny(reason) => Some(reason),
            ModeAction::Allow => None,
        }
    }
}

/// A line for the requesting user. Numerics and texts come from the list
/// kind's [`ListModeSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Entry {
        numeric: u16,
        channel: String,
        entry: ListEntry,
    },
    EndOfList {
        numeric: u16,
        channel: String,
        text: String,
    },
    ListFull {
        numeric: u16,
        channel: String,
        mask: String,
        text: String,
    },
}

impl Reply {
    pub fn numeric(&self) -> u16 {
        match self {
            Reply::Entry { numeric, .. }
            | Reply::EndOfList { numeric, .. }
            | Reply::ListFull { numeric, .. } => *numeric,
        }
    }

    pub fn channel(&self) -> &str {
        match self {
            Reply::Entry { channel, .. }
            | Reply::EndOfList { channel, .. }
            | Reply::ListFull { channel, .. } => channel,
        }
    }

    /// Renders the reply as sent to `target` (without the server prefix).
    pub fn format(&self, target: &str) -> String {
        match self {
            Reply::Entry {
                numeric,
                channel,
                entry,
            } => format!(
                "{:03} {} {} {} {} {}",
                numeric,
                target,
                channel,
                entry.mask,
                entry.setter,
                entry.set_at_unix()
            ),
            Reply::EndOfList {
                numeric,
                channel,
                text,
            } => format!("{:03} {} {} :{}", numeric, target, channel, text),
            Reply::ListFull {
                numeric,
                channel,
                mask,
                text,
            } => format!("{:03} {} {} {} :{}", numeric, target, channel, mask, text),
        }
    }
}
