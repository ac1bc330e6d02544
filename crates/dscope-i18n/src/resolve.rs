//! Cascading key-to-label resolution.
//!
//! Device configuration XML names channels, measurements, and states with
//! short internal tokens (`"voltage S1"`, `"type_outlet_1"`,
//! `"altitude(relative)"`). The active locale's catalog maps base tokens to
//! display labels, but generated configurations attach ordinals and suffixes
//! the catalog does not enumerate. Resolution therefore tries the exact key
//! first and then a fixed cascade of progressively more generic sub-keys,
//! reattaching whatever was stripped once one of them matches.
//!
//! # Invariants
//!
//! 1. **First match wins**: truncation rules run in a fixed order with no
//!    scoring; results are deterministic for a given snapshot.
//!
//! 2. **Truncation is cumulative**: each rule operates on the previous
//!    rule's candidate, so candidates strictly shorten.
//!
//! 3. **The key is always a safe fallback**: a total miss returns the key
//!    unchanged and logs one warning; resolution never fails the caller.

use std::sync::Arc;

use crate::catalog::{LabelCatalog, SharedCatalog};

/// A delimiter must sit at or past this byte index of its candidate to
/// count as a truncation point; anything earlier is treated as absent.
/// Historical tuning constant from the device key naming conventions.
const MIN_STEM: usize = 3;

/// One truncation rule of the cascade, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Truncation {
    /// Cut at the first space: `"voltage S1"` → `"voltage"`.
    FirstSpace,
    /// Cut at the last underscore: `"type_outlet_1"` → `"type_outlet"`.
    LastUnderscore,
    /// Cut at the last opening paren: `"altitude(relative)"` → `"altitude"`.
    LastParen,
}

const CASCADE: [Truncation; 3] = [
    Truncation::FirstSpace,
    Truncation::LastUnderscore,
    Truncation::LastParen,
];

impl Truncation {
    /// Byte index to cut `candidate` at, or `None` when the delimiter is
    /// missing or implausibly early.
    fn cut(self, candidate: &str) -> Option<usize> {
        let at = match self {
            Self::FirstSpace => candidate.find(' ')?,
            Self::LastUnderscore => candidate.rfind('_')?,
            Self::LastParen => candidate.rfind('(')?,
        };
        (at >= MIN_STEM).then_some(at)
    }
}

/// Split an ordinal prefix of the exact form `"<digits>) "` off the key.
///
/// Returns `(prefix, stem)`; a missing marker or a non-numeric prefix
/// leaves the key whole.
fn split_ordinal_prefix(key: &str) -> (&str, &str) {
    match key.find(") ") {
        Some(at) if at >= 1 && key[..at].bytes().all(|b| b.is_ascii_digit()) => {
            key.split_at(at + 2)
        }
        _ => ("", key),
    }
}

/// Whether a stem is an identifier eligible for replacement.
///
/// Empty stems and stems starting with an uppercase letter or a decimal
/// digit read as already-resolved display text and are never replaced.
fn eligible(stem: &str) -> bool {
    stem.chars()
        .next()
        .is_some_and(|c| !c.is_uppercase() && !c.is_ascii_digit())
}

/// Resolve one key against one snapshot.
///
/// Pure in `(key, catalog)`; the only side effect is a single warning
/// event when the whole cascade misses.
#[must_use]
pub fn resolve_with(catalog: &LabelCatalog, key: &str) -> String {
    // Exact-match fast path covers the majority of calls.
    if let Some(label) = catalog.get(key) {
        return label.to_string();
    }

    let (prefix, stem) = split_ordinal_prefix(key);
    if !eligible(stem) {
        return key.to_string();
    }

    // The bare stem differs from the key only when a prefix was split off.
    if !prefix.is_empty()
        && let Some(label) = catalog.get(stem)
    {
        return format!("{prefix}{label}");
    }

    let mut cut = stem.len();
    for rule in CASCADE {
        if let Some(at) = rule.cut(&stem[..cut]) {
            cut = at;
            if let Some(label) = catalog.get(&stem[..cut]) {
                // Reattach everything stripped to reach this candidate,
                // delimiter included.
                return format!("{prefix}{label}{}", &stem[cut..]);
            }
        }
    }

    tracing::warn!(key = %key, locale = %catalog.locale(), "unresolved device property key");
    key.to_string()
}

/// Resolves device-property keys against the active locale snapshot.
///
/// # Example
///
/// ```
/// use dscope_i18n::{LabelCatalog, LabelResolver};
///
/// let catalog = LabelCatalog::from_entries(
///     "en",
///     [("voltage", "Voltage"), ("type_outlet", "Outlet Type")],
/// )
/// .unwrap();
/// let resolver = LabelResolver::new(catalog);
///
/// assert_eq!(resolver.resolve("voltage"), "Voltage");
/// assert_eq!(resolver.resolve("voltage S1"), "Voltage S1");
/// assert_eq!(resolver.resolve("type_outlet_1"), "Outlet Type_1");
/// assert_eq!(resolver.resolve("unknown_key"), "unknown_key");
/// ```
#[derive(Debug)]
pub struct LabelResolver {
    catalog: SharedCatalog,
}

impl LabelResolver {
    /// Create a resolver over an initial catalog snapshot.
    #[must_use]
    pub fn new(initial: LabelCatalog) -> Self {
        Self {
            catalog: SharedCatalog::new(initial),
        }
    }

    /// Resolve a single key to its best available display label.
    #[must_use]
    pub fn resolve(&self, key: &str) -> String {
        resolve_with(&self.snapshot(), key)
    }

    /// Resolve a sequence of keys element-wise.
    ///
    /// Same length and order as the input; elements are independent and
    /// the whole batch runs against one snapshot.
    pub fn resolve_all<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let snapshot = self.snapshot();
        keys.into_iter()
            .map(|key| resolve_with(&snapshot, key))
            .collect()
    }

    /// Swap in the catalog for a changed locale.
    ///
    /// Resolutions in flight complete against the snapshot they started
    /// with.
    pub fn reload(&self, next: LabelCatalog) {
        self.catalog.replace(next);
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LabelCatalog> {
        self.catalog.snapshot()
    }
}
