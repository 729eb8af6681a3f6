//! Package curation providers.
//!
//! A provider answers "which curations exist for this package?". Lookups are
//! best-effort: a provider never fails, it returns an empty list and logs why.
//!
//! - [`clearly_defined`] — curations from the ClearlyDefined service.
//! - [`source_location`] — maps reported source locations onto VCS info or artifacts.

pub mod clearly_defined;
pub mod source_location;

pub use clearly_defined::ClearlyDefinedPackageCurationProvider;

use std::future::Future;

use futures::future::join_all;
use indicatif::ProgressBar;

use crate::models::{Identifier, PackageCuration};

pub trait PackageCurationProvider {
    /// Return the curations for `id`, or an empty list if there are none or the
    /// lookup failed.
    fn get_curations_for(
        &self,
        id: &Identifier,
    ) -> impl Future<Output = Vec<PackageCuration>> + Send;
}

/// Look up curations for many packages, running up to `batch_size` lookups at once.
///
/// Results keep the order of `ids`; packages without curations contribute nothing.
pub async fn get_curations_for_all<P: PackageCurationProvider + Sync>(
    provider: &P,
    ids: &[Identifier],
    batch_size: usize,
    progress: Option<&ProgressBar>,
) -> Vec<PackageCuration> {
    let mut curations = Vec::new();

    for batch in ids.chunks(batch_size.max(1)) {
        let results = join_all(batch.iter().map(|id| provider.get_curations_for(id))).await;

        for result in results {
            curations.extend(result);
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }
    }

    curations
}
