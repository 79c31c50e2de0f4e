//! # listmode Architecture
//!
//! `listmode` is the engine behind **channel list modes** on an IRC network:
//! bans (`+b`), ban exceptions (`+e`), invite exceptions (`+I`) and any other
//! mode that collects `(mask, setter, time)` entries on a channel.
//!
//! A list is bounded by limit rules selected by channel name, deduplicated by
//! mask, shown to users with an explicit end marker, and replayed to peer
//! servers so every server on the network holds the same list.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ListMode<S>: one instance per list kind                  │
//! │  - Server hooks: mode change, rehash, delete, sync, cleanup │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / remove / list / sync / cleanup                     │
//! │  - Returns ModeChange and Reply values, never writes lines  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/) + Limit Table (limits.rs)           │
//! │  - ListStore trait, InMemoryListStore                       │
//! │  - Ordered limit rules, swapped whole on rehash             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Kinds Are Data
//!
//! A ban list and an exception list run the same code. What differs (mode
//! letter, numerics, end-of-list text, config tag) lives in
//! [`config::ListModeSpec`].
//!
//! ## Key Principle: The Server Keeps Its Own Concerns
//!
//! The engine does not parse mode strings, check privileges or write to
//! sockets. Wildcard matching and mask normalization are pluggable
//! ([`matcher::PatternMatcher`], [`matcher::MaskNormalizer`]); the defaults
//! follow classic ircd behaviour.
//!
//! ## Example
//!
//! ```
//! use listmode::api::ListMode;
//! use listmode::config::{ListModeSpec, StaticConfig};
//!
//! let bans = ListMode::new(ListModeSpec::ban_list());
//! bans.reload_limits(&StaticConfig::new().with_limit("banlist", "*", 2));
//!
//! assert!(bans.add("alice", "#rust", "spam.example").is_allowed());
//! assert!(bans.add("alice", "#rust", "troll").is_allowed());
//! assert!(!bans.add("alice", "#rust", "another").is_allowed());
//!
//! let lines: Vec<String> = bans
//!     .display_list("#rust")
//!     .iter()
//!     .map(|reply| reply.format("bob"))
//!     .collect();
//! assert_eq!(lines.len(), 3);
//! assert_eq!(lines[2], "368 bob #rust :End of channel ban list");
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The `ListMode` facade
//! - [`commands`]: Add, remove, list, sync and cleanup logic
//! - [`limits`]: Limit rule table and reload
//! - [`store`]: Per-channel list storage
//! - [`model`]: Core data types (`ListEntry`, `ListLimit`, `ModeList`)
//! - [`config`]: Kind settings and limit rule sources
//! - [`matcher`]: Wildcard matching and mask normalization
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod limits;
pub mod matcher;
pub mod model;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use api::ListMode;
pub use commands::{DenyReason, ModeAction, ModeChange, Reply};
pub use error::{ListModeError, Result};
pub use model::{ListEntry, ListLimit};
