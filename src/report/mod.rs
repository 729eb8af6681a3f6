//! Report renderers for curation lookups.
//!
//! - [`terminal`] — colored table with a summary box; respects `--quiet`.
//!
//! JSON output is a pretty-printed list of [`PackageCuration`](crate::models::PackageCuration)s.

pub mod terminal;
