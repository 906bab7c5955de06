//! Branch ordering - pure functions for deriving merge paths
//!
//! No I/O happens here. Branch names are split into tokens on `_ - + . /`
//! and compared token by token:
//! - the shorter token list sorts first when one is a prefix of the other
//! - numeric tokens (starting with a digit) compare by the value of their
//!   leading digits and sort before textual tokens
//! - textual tokens compare as plain strings
//!
//! Names that still compare equal (`1.01` vs `1.1`, `5a` vs `5`) fall back to
//! comparing the full names, so the order is total.

use std::cmp::Ordering;
use std::fmt;

/// Characters that split a branch name into tokens
pub const TOKEN_SEPARATORS: [char; 5] = ['_', '-', '+', '.', '/'];

/// An ordered run of branches to cascade through
///
/// The first branch is the anchor the path was computed from; every hop
/// merges one branch into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePath(Vec<String>);

impl MergePath {
    /// Build a path from branches that are already in cascade order
    pub const fn new(branches: Vec<String>) -> Self {
        Self(branches)
    }

    /// Branches in cascade order
    pub fn branches(&self) -> &[String] {
        &self.0
    }

    /// The branch the path starts from
    pub fn anchor(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Whether the path contains no branches at all
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of branches in the path
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Adjacent `(head, base)` pairs, in order
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.windows(2).map(|w| (w[0].as_str(), w[1].as_str()))
    }

    /// Number of hops (create + merge steps) in the path
    pub const fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Append the trunk branch as the final destination
    fn push_trunk(&mut self, trunk: &str) {
        if self.0.last().is_some_and(|last| last == trunk) {
            return;
        }
        self.0.push(trunk.to_string());
    }
}

impl From<MergePath> for Vec<String> {
    fn from(path: MergePath) -> Self {
        path.0
    }
}

impl fmt::Display for MergePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" -> "))
    }
}

/// Run of ASCII digits with leading zeros removed
///
/// Compared by length first, so values of any size order correctly without
/// parsing into a fixed-width integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Digits<'a>(&'a str);

impl Ord for Digits<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for Digits<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A classified token. Variant order matters: numeric sorts before text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Token<'a> {
    Numeric(Digits<'a>),
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// A token starting with a digit is numeric, valued by its leading
    /// digit run (`05a` is 5). Trailing characters only matter to the
    /// full-name tiebreak.
    fn classify(raw: &'a str) -> Self {
        let digits = raw
            .find(|c: char| !c.is_ascii_digit())
            .map_or(raw, |end| &raw[..end]);
        if digits.is_empty() {
            Self::Text(raw)
        } else {
            Self::Numeric(Digits(digits.trim_start_matches('0')))
        }
    }
}

/// Split a branch name into tokens
pub fn tokenize(name: &str) -> Vec<&str> {
    name.split(TOKEN_SEPARATORS).collect()
}

fn sort_key(name: &str) -> Vec<Token<'_>> {
    name.split(TOKEN_SEPARATORS).map(Token::classify).collect()
}

/// Compare two branch names in cascade order
pub fn compare_branches(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// The part of `anchor` before its first digit
///
/// Returns `None` when the anchor has no digit, or starts with one: neither
/// gives a prefix that can select a release series.
pub fn matching_prefix(anchor: &str) -> Option<&str> {
    let first_digit = anchor.find(|c: char| c.is_ascii_digit())?;
    (first_digit > 0).then(|| &anchor[..first_digit])
}

/// Order the branches of one release series, starting at `anchor`
///
/// Keeps branches that start with both `prefix` and the anchor's
/// [`matching_prefix`], sorts them with [`compare_branches`] and returns the
/// slice from the anchor onwards. An anchor without a usable prefix, or one
/// missing from `all_branches`, yields an empty path.
pub fn order_branches<S: AsRef<str>>(prefix: &str, anchor: &str, all_branches: &[S]) -> MergePath {
    let Some(series) = matching_prefix(anchor) else {
        return MergePath::default();
    };

    let mut candidates: Vec<&str> = all_branches
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.starts_with(prefix) && name.starts_with(series))
        .collect();
    candidates.sort_by(|a, b| compare_branches(a, b));
    candidates.dedup();

    let Some(start) = candidates.iter().position(|name| *name == anchor) else {
        return MergePath::default();
    };

    MergePath(
        candidates[start..]
            .iter()
            .map(|name| (*name).to_string())
            .collect(),
    )
}

/// Compute the merge paths for a merged pull request
///
/// Returns two paths, in execution order:
/// 1. ordered from `head`, if `head` matches one of `prefixes`
/// 2. ordered from `base`, if `base` matches one of `prefixes`, with `trunk`
///    appended as the final destination
///
/// When several prefixes match, the last one wins. A path for a branch that
/// matches no prefix is empty.
pub fn merge_paths<S: AsRef<str>>(
    prefixes: &[String],
    trunk: &str,
    head: &str,
    base: &str,
    all_branches: &[S],
) -> Vec<MergePath> {
    let mut head_path = MergePath::default();
    let mut base_path = MergePath::default();

    for prefix in prefixes {
        if head.starts_with(prefix.as_str()) {
            head_path = order_branches(prefix, head, all_branches);
        }
        if base.starts_with(prefix.as_str()) {
            base_path = order_branches(prefix, base, all_branches);
            if !base_path.is_empty() {
                base_path.push_trunk(trunk);
            }
        }
    }

    vec![head_path, base_path]
}
