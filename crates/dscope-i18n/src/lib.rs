#![forbid(unsafe_code)]

//! Localized device-property labels for Datascope.
//!
//! Device configurations name channels, measurements, and states with short
//! internal tokens (`"voltage S1"`, `"type_outlet_1"`). An external loader
//! supplies a [`LabelCatalog`] snapshot for the active locale;
//! [`LabelResolver`] answers exact lookups and otherwise falls back through
//! a fixed cascade of progressively more generic sub-keys, with the raw key
//! itself as the final, always-displayable fallback.
//!
//! Snapshots are immutable and swapped wholesale on locale change, so
//! resolution is freely concurrent and never observes a partially updated
//! table.

pub mod catalog;
pub mod resolve;

pub use catalog::{CatalogError, LabelCatalog, SharedCatalog};
pub use resolve::{LabelResolver, resolve_with};
