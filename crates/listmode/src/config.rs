//! # Configuration
//!
//! Two kinds of configuration feed a list mode:
//!
//! 1. **Kind settings** ([`ListModeSpec`]): which mode letter the list answers
//!    to, the numerics and texts used in replies, and the config tag its limit
//!    rules are read from. Managed by [`confique`], loadable from TOML, with
//!    compiled defaults describing the channel ban list.
//! 2. **Limit rules**: rows of the form `chan`/`limit` read through a
//!    [`ConfigSource`] under the kind's tag. [`TomlConfig`] reads them from an
//!    ircd-style TOML file, [`StaticConfig`] holds them in memory.
//!
//! ## Limit Rules File
//!
//! ```toml
//! [[banlist]]
//! chan = "#priv-*"
//! limit = 10
//!
//! [[banlist]]
//! chan = "*"
//! limit = 64
//! ```
//!
//! Row order is significant: the first rule whose `chan` matches a channel
//! decides its capacity.
//!
//! ## Kind Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `mode` | `b` | Mode letter |
//! | `list_numeric` | `367` | Numeric of each list line |
//! | `end_numeric` | `368` | Numeric of the end-of-list line |
//! | `end_text` | `End of channel ban list` | Trailing text of the end-of-list line |
//! | `full_numeric` | `478` | Numeric of the list-full diagnostic |
//! | `full_text` | `Channel ban/ignore list is full` | Text of the list-full diagnostic |
//! | `config_tag` | `banlist` | Tag the limit rules are read from |

use crate::error::{ListModeError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_TAG: &str = "banlist";

/// Settings that make a list mode a ban list, an exception list, and so on.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListModeSpec {
    /// Mode letter, exactly one character
    #[config(default = "b")]
    pub mode: String,

    /// Numeric sent for each entry when the list is shown
    #[config(default = 367)]
    pub list_numeric: u16,

    /// Numeric sent after the last entry
    #[config(default = 368)]
    pub end_numeric: u16,

    /// Text of the end-of-list line
    #[config(default = "End of channel ban list")]
    pub end_text: String,

    /// Numeric sent when an add is refused because the list is full
    #[config(default = 478)]
    pub full_numeric: u16,

    /// Text of the list-full diagnostic
    #[config(default = "Channel ban/ignore list is full")]
    pub full_text: String,

    /// Config tag the limit rules are read from
    #[config(default = "banlist")]
    pub config_tag: String,
}

impl Default for ListModeSpec {
    fn default() -> Self {
        Self::ban_list()
    }
}

impl ListModeSpec {
    /// Channel bans (`+b`).
    pub fn ban_list() -> Self {
        Self {
            mode: "b".to_string(),
            list_numeric: 367,
            end_numeric: 368,
            end_text: "End of channel ban list".to_string(),
            full_numeric: 478,
            full_text: "Channel ban/ignore list is full".to_string(),
            config_tag: DEFAULT_CONFIG_TAG.to_string(),
        }
    }

    /// Ban exceptions (`+e`).
    pub fn exception_list() -> Self {
        Self {
            mode: "e".to_string(),
            list_numeric: 348,
            end_numeric: 349,
            end_text: "End of Channel Exception List".to_string(),
            ..Self::ban_list()
        }
    }

    /// Invite exceptions (`+I`).
    pub fn invite_exception_list() -> Self {
        Self {
            mode: "I".to_string(),
            list_numeric: 346,
            end_numeric: 347,
            end_text: "End of Channel Invite Exception List".to_string(),
            ..Self::ban_list()
        }
    }

    /// Loads settings from a TOML file, falling back to the ban list defaults
    /// for anything the file leaves out.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let spec = Self::builder().file(path.as_ref()).load()?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mode.chars().count() != 1 {
            return Err(ListModeError::ConfigInvalid {
                tag: "listmode".to_string(),
                index: 0,
                reason: format!("mode must be a single character, got '{}'", self.mode),
            });
        }
        if self.config_tag.is_empty() {
            return Err(ListModeError::ConfigInvalid {
                tag: "listmode".to_string(),
                index: 0,
                reason: "config_tag cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn mode_char(&self) -> char {
        self.mode.chars().next().unwrap_or_default()
    }

    /// Key under which channels store this kind's list.
    pub fn info_key(&self) -> String {
        format!("exceptionbase_mode_{}_list", self.mode)
    }
}

/// One configuration row, e.g. a single `<banlist chan="#x" limit="10">` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRow {
    fields: BTreeMap<String, String>,
}

impl ConfigRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Where limit rules come from.
pub trait ConfigSource {
    /// All rows configured under `tag`, in file order.
    fn read_section(&self, tag: &str) -> Vec<ConfigRow>;
}

/// Rows held in memory, keyed by tag.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    sections: BTreeMap<String, Vec<ConfigRow>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, tag: impl Into<String>, row: ConfigRow) -> Self {
        self.sections.entry(tag.into()).or_default().push(row);
        self
    }

    /// Shorthand for a `chan`/`limit` row.
    pub fn with_limit(self, tag: impl Into<String>, chan: &str, limit: i64) -> Self {
        self.with_row(
            tag,
            ConfigRow::new()
                .with("chan", chan)
                .with("limit", limit.to_string()),
        )
    }
}

impl ConfigSource for StaticConfig {
    fn read_section(&self, tag: &str) -> Vec<ConfigRow> {
        self.sections.get(tag).cloned().unwrap_or_default()
    }
}

/// Rows read from a TOML document.
///
/// Each tag is an array of tables (`[[banlist]]`); a lone `[banlist]` table
/// counts as a single row. Scalar fields are kept as their text form so
/// validation sees exactly what the operator wrote.
#[derive(Debug, Clone, Default)]
pub struct TomlConfig {
    table: toml::Table,
}

impl TomlConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = content.parse()?;
        Ok(Self { table })
    }
}

impl ConfigSource for TomlConfig {
    fn read_section(&self, tag: &str) -> Vec<ConfigRow> {
        match self.table.get(tag) {
            Some(toml::Value::Array(items)) => items.iter().map(row_from_value).collect(),
            Some(value @ toml::Value::Table(_)) => vec![row_from_value(value)],
            _ => Vec::new(),
        }
    }
}

fn row_from_value(value: &toml::Value) -> ConfigRow {
    let mut row = ConfigRow::new();
    if let toml::Value::Table(fields) = value {
        for (key, field) in fields {
            let text = match field {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            row = row.with(key.as_str(), text);
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_ban_list() {
        let spec = ListModeSpec::default();
        assert_eq!(spec.mode_char(), 'b');
        assert_eq!(spec.list_numeric, 367);
        assert_eq!(spec.end_numeric, 368);
        assert_eq!(spec.config_tag, "banlist");
        assert_eq!(spec.info_key(), "exceptionbase_mode_b_list");
    }

    #[test]
    fn exception_kinds_share_full_diagnostic() {
        let excepts = ListModeSpec::exception_list();
        let invex = ListModeSpec::invite_exception_list();
        assert_eq!(excepts.mode_char(), 'e');
        assert_eq!(excepts.list_numeric, 348);
        assert_eq!(invex.mode_char(), 'I');
        assert_eq!(invex.end_numeric, 347);
        assert_eq!(excepts.full_numeric, 478);
        assert_eq!(invex.full_text, ListModeSpec::ban_list().full_text);
    }

    #[test]
    fn validate_rejects_multi_char_mode() {
        let spec = ListModeSpec {
            mode: "be".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(ListModeError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_tag() {
        let spec = ListModeSpec {
            config_tag: String::new(),
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn load_spec_overrides_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exempt.toml");
        fs::write(
            &path,
            "mode = \"e\"\nlist_numeric = 348\nend_numeric = 349\nend_text = \"End of Channel Exception List\"\n",
        )
        .unwrap();

        let spec = ListModeSpec::load(&path).unwrap();
        assert_eq!(spec.mode_char(), 'e');
        assert_eq!(spec.list_numeric, 348);
        assert_eq!(spec.full_numeric, 478);
        assert_eq!(spec.config_tag, "banlist");
    }

    #[test]
    fn toml_rows_keep_file_order() {
        let config = TomlConfig::parse(
            r##"
            [[banlist]]
            chan = "#priv-*"
            limit = 10

            [[banlist]]
            chan = "*"
            limit = 64
            "##,
        )
        .unwrap();

        let rows = config.read_section("banlist");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("chan"), Some("#priv-*"));
        assert_eq!(rows[0].get("limit"), Some("10"));
        assert_eq!(rows[1].get("chan"), Some("*"));
    }

    #[test]
    fn toml_single_table_is_one_row() {
        let config = TomlConfig::parse("[banlist]\nchan = \"#a\"\nlimit = 3\n").unwrap();
        let rows = config.read_section("banlist");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("limit"), Some("3"));
    }

    #[test]
    fn toml_missing_tag_is_empty() {
        let config = TomlConfig::parse("[other]\nx = 1\n").unwrap();
        assert!(config.read_section("banlist").is_empty());
    }

    #[test]
    fn toml_parse_error_is_reported() {
        assert!(matches!(
            TomlConfig::parse("[[banlist]\nchan ="),
            Err(ListModeError::Toml(_))
        ));
    }

    #[test]
    fn static_config_sections_are_separate() {
        let config = StaticConfig::new()
            .with_limit("banlist", "#a", 5)
            .with_limit("exemptlist", "#b", 7);
        assert_eq!(config.read_section("banlist").len(), 1);
        assert_eq!(
            config.read_section("exemptlist")[0].get("limit"),
            Some("7")
        );
        assert!(config.read_section("nothing").is_empty());
    }
}
