//! Label catalog snapshots and the shared swappable handle.
//!
//! # Invariants
//!
//! 1. **Snapshots are immutable**: a `LabelCatalog` never changes after
//!    construction. A locale change builds a whole new catalog and swaps
//!    it in; nothing is patched in place.
//!
//! 2. **Swap is atomic**: `SharedCatalog::replace` exchanges the entire
//!    snapshot. A resolution that already took its snapshot completes
//!    against it, never against a half-updated table.
//!
//! 3. **Lookups are pure**: `has`/`get` have no side effects and never
//!    fail on missing keys — a miss is an expected, frequent case.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | No entry for the key | `get` returns `None` |
//! | Duplicate key | Loader supplied a key twice | `CatalogError::DuplicateKey` |
//! | Empty key | Loader supplied `""` as a key | `CatalogError::EmptyKey` |
//! | Poisoned lock | Panic in another thread mid-swap | Swap/snapshot proceed on the recovered value |

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Errors from catalog construction.
///
/// These surface loader bugs at the load boundary instead of as silent
/// lookup misses later. The resolution path itself never produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same key appeared twice in one locale's entries.
    DuplicateKey { locale: String, key: String },
    /// An entry key was empty.
    EmptyKey { locale: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey { locale, key } => {
                write!(f, "duplicate key '{key}' in locale '{locale}'")
            }
            Self::EmptyKey { locale } => write!(f, "empty key in locale '{locale}'"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable key → label mapping for one active locale.
///
/// Supplied wholesale by an external loader; this crate only consumes it.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl LabelCatalog {
    /// Build a catalog from loader-supplied `(key, label)` entries.
    ///
    /// Rejects duplicate and empty keys.
    pub fn from_entries<K, V>(
        locale: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, CatalogError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let locale = locale.into();
        let entries = entries.into_iter();
        let mut map = HashMap::with_capacity(entries.size_hint().0);
        for (key, label) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(CatalogError::EmptyKey { locale });
            }
            if map.insert(key.clone(), label.into()).is_some() {
                return Err(CatalogError::DuplicateKey { locale, key });
            }
        }
        Ok(Self {
            locale,
            entries: map,
        })
    }

    /// Create a catalog with no entries.
    #[must_use]
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    /// Locale tag this snapshot was loaded for (e.g. `"en"`, `"de"`).
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether an exact entry exists for `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up the label for an exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all keys in this catalog.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Single logical owner of the active snapshot.
///
/// Hands out [`Arc`] snapshots for resolution and swaps the whole catalog
/// on locale change. Reads never block other reads; `replace` is the only
/// writer.
#[derive(Debug)]
pub struct SharedCatalog {
    active: RwLock<Arc<LabelCatalog>>,
}

impl SharedCatalog {
    /// Wrap an initial snapshot.
    ///
    /// Requiring one up front makes "resolve before first load" a
    /// compile-time impossibility rather than a runtime precondition.
    #[must_use]
    pub fn new(initial: LabelCatalog) -> Self {
        Self {
            active: RwLock::new(Arc::new(initial)),
        }
    }

    /// The current snapshot.
    ///
    /// A concurrent `replace` does not affect a snapshot already handed
    /// out; callers finish their resolution against it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LabelCatalog> {
        match self.active.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swap in the catalog for the (possibly changed) active locale.
    ///
    /// Returns the displaced snapshot.
    pub fn replace(&self, next: LabelCatalog) -> Arc<LabelCatalog> {
        tracing::debug!(
            locale = %next.locale(),
            entries = next.len(),
            "label catalog replaced"
        );
        let next = Arc::new(next);
        let mut guard = match self.active.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
