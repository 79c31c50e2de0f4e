use listmode::commands::sync::ProtoMode;
use listmode::config::{ListModeSpec, StaticConfig, TomlConfig};
use listmode::{DenyReason, ListLimit, ListMode};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn ban_list() -> ListMode {
    ListMode::new(ListModeSpec::ban_list())
}

#[test]
fn default_limit_fills_at_64_and_frees_on_remove() {
    let bans = ban_list();

    for i in 0..64 {
        let change = bans.add("op", "#test", &format!("*!*@host{}.example", i));
        assert!(change.is_allowed(), "add #{} should be accepted", i);
    }

    let change = bans.add("op", "#test", "*!*@host64.example");
    assert_eq!(
        change.deny_reason(),
        Some(&DenyReason::ListFull { capacity: 64 })
    );
    assert_eq!(bans.entries("#test").len(), 64);

    assert!(bans.remove("op", "#test", "*!*@host0.example").is_allowed());
    assert_eq!(bans.entries("#test").len(), 63);

    assert!(bans.add("op", "#test", "*!*@host64.example").is_allowed());
    assert_eq!(bans.entries("#test").len(), 64);
}

#[test]
fn sync_replays_list_to_peer() {
    let bans = ban_list();
    bans.add("alice", "#net", "*!*@bad1.example");
    bans.add("bob", "#net", "*!*@bad2.example");

    let mut burst = Vec::new();
    let sent = bans.on_sync_channel("#net", &mut |channel: &str, mode: &ProtoMode| {
        burst.push(format!("{} {}", channel, mode));
    });

    assert_eq!(sent, 2);
    assert_eq!(
        burst,
        vec!["#net +b *!*@bad1.example", "#net +b *!*@bad2.example"]
    );
}

#[test]
fn peer_rebuilds_identical_list_from_sync() {
    let local = ban_list();
    let remote = ban_list();
    for mask in ["troll", "*!*@spam.example", "bot@*"] {
        local.add("op", "#net", mask);
    }

    local.on_sync_channel("#net", &mut |channel: &str, mode: &ProtoMode| {
        remote.on_mode_change("peer.server", channel, &mode.parameter, mode.adding);
    });

    let masks = |mode: &ListMode| -> Vec<String> {
        mode.entries("#net").into_iter().map(|e| e.mask).collect()
    };
    assert_eq!(masks(&local), masks(&remote));

    // a second burst must not duplicate anything
    local.on_sync_channel("#net", &mut |channel: &str, mode: &ProtoMode| {
        let change = remote.on_mode_change("peer.server", channel, &mode.parameter, mode.adding);
        assert_eq!(change.deny_reason(), Some(&DenyReason::Duplicate));
    });
    assert_eq!(remote.entries("#net").len(), 3);
}

#[test]
fn destroyed_channel_leaves_no_state() {
    let bans = ban_list();
    bans.add("op", "#gone", "a");
    bans.add("op", "#gone", "b");

    assert!(bans.on_channel_delete("#gone"));
    assert!(bans.entries("#gone").is_empty());
    assert!(bans.store().is_empty());
    assert!(!bans.on_channel_delete("#gone"));
}

#[test]
fn limits_from_toml_file_first_match_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("limits.toml");
    fs::write(
        &path,
        r##"
[[banlist]]
chan = "#priv-*"
limit = 10

[[banlist]]
chan = "*"
limit = 64

[[banlist]]
chan = "#broken"
limit = "many"
"##,
    )
    .unwrap();

    let bans = ban_list();
    let report = bans.reload_limits(&TomlConfig::load(&path).unwrap());

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(bans.capacity_for("#priv-team").map(|l| l.limit), Some(10));
    assert_eq!(bans.capacity_for("#public").map(|l| l.limit), Some(64));

    for i in 0..10 {
        assert!(bans.add("op", "#priv-team", &format!("u{}", i)).is_allowed());
    }
    assert!(!bans.add("op", "#priv-team", "u10").is_allowed());
}

#[test]
fn empty_configuration_keeps_fallback() {
    let bans = ban_list().with_limits(vec![ListLimit::new("#x", 1)]);
    let report = bans.reload_limits(&StaticConfig::new());

    assert!(report.used_fallback);
    assert_eq!(*bans.limits(), vec![ListLimit::new("*", 64)]);
}

#[test]
fn size_never_exceeds_capacity_over_mixed_operations() {
    let bans = ban_list().with_limits(vec![ListLimit::new("*", 8)]);

    // xorshift keeps the sequence reproducible
    let mut seed: u32 = 0x9e37_79b9;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };

    for _ in 0..2_000 {
        let mask = format!("m{}", next() % 16);
        if next() % 3 == 0 {
            bans.remove("op", "#chaos", &mask);
        } else {
            bans.add("op", "#chaos", &mask);
        }

        let entries = bans.entries("#chaos");
        assert!(entries.len() <= 8);
        let mut masks: Vec<_> = entries.iter().map(|e| e.mask.as_str()).collect();
        masks.sort();
        masks.dedup();
        assert_eq!(masks.len(), entries.len(), "duplicate mask stored");
    }
}

#[test]
fn concurrent_adds_respect_capacity() {
    let bans = Arc::new(ban_list().with_limits(vec![ListLimit::new("*", 20)]));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let bans = Arc::clone(&bans);
            thread::spawn(move || {
                (0..10)
                    .filter(|i| {
                        bans.add("op", "#busy", &format!("t{}-{}", t, i))
                            .is_allowed()
                    })
                    .count()
            })
        })
        .collect();

    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(accepted, 20);
    assert_eq!(bans.entries("#busy").len(), 20);
}

#[test]
fn concurrent_same_mask_is_stored_once() {
    let bans = Arc::new(ban_list());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let bans = Arc::clone(&bans);
            thread::spawn(move || bans.add("op", "#race", "troll").is_allowed())
        })
        .collect();

    let accepted = handles
        .into_iter()
        .filter_map(|h| h.join().ok())
        .filter(|ok| *ok)
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(bans.entries("#race").len(), 1);
}

#[test]
fn readers_see_whole_tables_during_reload() {
    let bans = Arc::new(ban_list());
    let three_rules = StaticConfig::new()
        .with_limit("banlist", "#a*", 1)
        .with_limit("banlist", "#b*", 2)
        .with_limit("banlist", "*", 3);

    let reader = {
        let bans = Arc::clone(&bans);
        thread::spawn(move || {
            for _ in 0..1_000 {
                let len = bans.limits().len();
                assert!(len == 1 || len == 3, "saw partial table of {} rules", len);
                assert!(bans.capacity_for("#zzz").is_some());
            }
        })
    };

    for i in 0..200 {
        if i % 2 == 0 {
            bans.reload_limits(&three_rules);
        } else {
            bans.reload_limits(&StaticConfig::new());
        }
    }
    reader.join().unwrap();
}
