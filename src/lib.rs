//! `curation-checkr` — look up package curations on ClearlyDefined and normalize them.
//!
//! # Flow of a lookup
//! 1. Map the package's ecosystem to a ClearlyDefined `(type, provider)` pair
//!    ([`clearlydefined::type_and_provider`]); unsupported ecosystems stop here.
//! 2. Fetch the curation document through a [`clearlydefined::CurationService`].
//! 3. Normalize the declared license ([`license::normalize_declared`]) and map the
//!    source location ([`curation::source_location`]).
//! 4. Assemble the [`models::PackageCuration`] ([`curation::clearly_defined::assemble`]).
//!
//! Lookups never fail: every problem degrades to an empty result and, where it is
//! unexpected, a `tracing` warning.

pub mod clearlydefined;
pub mod config;
pub mod curation;
pub mod error;
pub mod license;
pub mod models;
pub mod report;

pub use curation::{ClearlyDefinedPackageCurationProvider, PackageCurationProvider};
pub use models::{Identifier, PackageCuration};
