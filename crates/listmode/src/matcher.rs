//! Mask matching and normalization.
//!
//! The list engine needs two services from the surrounding server: a wildcard
//! matcher (to pick the limit rule for a channel name) and a mask normalizer
//! (to bring `nick`, `user@host` and friends into full `nick!user@host` form
//! before they are stored). Both are traits so a server can plug in its own;
//! any `Fn` with the right signature works too.
//!
//! The defaults here follow classic ircd behaviour: [`WildcardMatcher`] is a
//! `*`/`?` glob under RFC 1459 casemapping, [`CleanMask`] completes partial
//! masks.

/// Wildcard matcher used to select limit rules by channel name.
pub trait PatternMatcher: Send + Sync {
    fn matches(&self, subject: &str, pattern: &str) -> bool;
}

impl<F> PatternMatcher for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn matches(&self, subject: &str, pattern: &str) -> bool {
        self(subject, pattern)
    }
}

/// Canonicalizes a raw mode parameter into the mask that gets stored.
pub trait MaskNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

impl<F> MaskNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, raw: &str) -> String {
        self(raw)
    }
}

/// `*` and `?` glob matching, case-insensitive under RFC 1459 casemapping.
///
/// ```
/// use listmode::matcher::{PatternMatcher, WildcardMatcher};
///
/// assert!(WildcardMatcher.matches("#a*b", "#a*"));
/// assert!(WildcardMatcher.matches("#what?", "#what?"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WildcardMatcher;

impl PatternMatcher for WildcardMatcher {
    fn matches(&self, subject: &str, pattern: &str) -> bool {
        wildcard_match(subject, pattern)
    }
}

/// Matches `subject` against `pattern`.
///
/// `*` matches any run of characters (including none), `?` exactly one.
/// Wildcard characters in `subject` are plain text.
///
/// # Examples
/// ```
/// use listmode::matcher::wildcard_match;
///
/// assert!(wildcard_match("#priv-team", "#priv-*"));
/// assert!(wildcard_match("#Rust", "#rust"));
/// assert!(wildcard_match("#a[b]", "#A{B}"));
/// assert!(!wildcard_match("#public", "#priv-*"));
///
/// // `*` and `?` in the subject are matched like any other character
/// assert!(wildcard_match("#a*b", "#a*"));
/// assert!(wildcard_match("#*x", "#*"));
/// assert!(wildcard_match("#x?y", "#x?y"));
/// ```
pub fn wildcard_match(subject: &str, pattern: &str) -> bool {
    let s: Vec<char> = subject.chars().map(irc_lower).collect();
    let p: Vec<char> = pattern.chars().map(irc_lower).collect();

    let (mut si, mut pi) = (0, 0);
    // Position of the last `*` seen and the subject index it was tried at
    let mut backtrack: Option<(usize, usize)> = None;

    while si < s.len() {
        // A `*` in the pattern is always a wildcard, even facing a `*` in the subject
        if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, si));
            pi += 1;
        } else if pi < p.len() && (p[pi] == '?' || p[pi] == s[si]) {
            si += 1;
            pi += 1;
        } else if let Some((star, mark)) = backtrack {
            pi = star + 1;
            si = mark + 1;
            backtrack = Some((star, mark + 1));
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// RFC 1459 lowercasing: `[]\~` are the uppercase forms of `{}|^`.
fn irc_lower(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c.to_ascii_lowercase(),
    }
}

/// Completes partial masks into `nick!user@host` form.
///
/// | Input            | Stored as           |
/// |------------------|---------------------|
/// | `troll`          | `troll!*@*`         |
/// | `spam.example`   | `*!*@spam.example`  |
/// | `2001:db8::1`    | `*!*@2001:db8::1`   |
/// | `bot@*`          | `*!bot@*`           |
/// | `troll!bot`      | `troll!bot@*`       |
/// | `a!b@c`          | `a!b@c`             |
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanMask;

impl MaskNormalizer for CleanMask {
    fn normalize(&self, raw: &str) -> String {
        clean_mask(raw)
    }
}

pub fn clean_mask(raw: &str) -> String {
    let mask = raw.trim();
    let has_pling = mask.contains('!');
    let has_at = mask.contains('@');

    match (has_pling, has_at) {
        (false, false) if mask.contains('.') || mask.contains(':') => format!("*!*@{}", mask),
        (false, false) => format!("{}!*@*", mask),
        (false, true) => format!("*!{}", mask),
        (true, false) => format!("{}@*", mask),
        (true, true) => mask.to_string(),
    }
}
