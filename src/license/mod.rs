//! SPDX license expressions and the normalization applied to declared licenses.
//!
//! - [`spdx`] — parser and validator for SPDX expressions with strictness levels.
//! - [`ids`] — lookups against the SPDX license and exception list.
//! - [`classifier`] — maps a parsed expression to a [`LicenseRisk`](crate::models::LicenseRisk).

pub mod classifier;
pub mod ids;
pub mod spdx;

use tracing::debug;

use spdx::{SpdxExpression, Strictness};

/// Normalize a declared license as reported by a curation service.
///
/// Only expressions made of current SPDX identifiers survive. Deprecated identifiers
/// and catch-all tokens such as `OTHER` make the whole expression absent, so a
/// low-quality curation never reaches license calculations.
pub fn normalize_declared(declared: Option<&str>) -> Option<SpdxExpression> {
    let declared = declared?;
    match SpdxExpression::parse(declared, Strictness::AllowCurrent) {
        Ok(expr) => Some(expr),
        Err(e) => {
            debug!(declared, error = %e, "Ignoring declared license");
            None
        }
    }
}
