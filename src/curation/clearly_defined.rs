use tracing::{debug, warn};

use super::source_location::{map_source_location, NormalizedSourceLocation};
use super::PackageCurationProvider;
use crate::clearlydefined::service::CurationCoordinates;
use crate::clearlydefined::{type_and_provider, ClearlyDefinedService, Curation, CurationService};
use crate::error::ServiceError;
use crate::license::normalize_declared;
use crate::license::spdx::SpdxExpression;
use crate::models::{Identifier, PackageCuration};

/// Provenance note attached to every curation from this provider.
pub const COMMENT: &str = "Provided by ClearlyDefined.";

/// ClearlyDefined stands in `-` for an empty namespace, the path segment must not be empty.
const EMPTY_NAMESPACE: &str = "-";

/// Curations from the [ClearlyDefined](https://clearlydefined.io/) service.
#[derive(Debug, Clone)]
pub struct ClearlyDefinedPackageCurationProvider<S = ClearlyDefinedService> {
    service: S,
}

impl<S: CurationService + Sync> ClearlyDefinedPackageCurationProvider<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetch and decode the curation document for `id`.
    ///
    /// `None` covers unsupported ecosystems, missing curations and every failure;
    /// failures other than a 404 are logged as warnings.
    async fn fetch_curation(&self, id: &Identifier) -> Option<Curation> {
        let (component_type, provider) = type_and_provider(id)?;
        let namespace = if id.namespace.is_empty() {
            EMPTY_NAMESPACE
        } else {
            id.namespace.as_str()
        };

        let coordinates = CurationCoordinates {
            component_type,
            provider,
            namespace,
            name: &id.name,
            revision: &id.version,
        };

        let body = match self.service.get_curation(&coordinates).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                debug!(package = %id, "No ClearlyDefined curation");
                return None;
            }
            Err(e) => {
                warn!("{}", failure_message(id, &e));
                return None;
            }
        };

        match serde_json::from_str(&body) {
            Ok(curation) => Some(curation),
            Err(e) => {
                debug!(package = %id, error = %e, "Unexpected curation payload");
                warn!("Deserializing the ClearlyDefined curation for '{}' failed.", id);
                None
            }
        }
    }
}

impl<S: CurationService + Sync> PackageCurationProvider
    for ClearlyDefinedPackageCurationProvider<S>
{
    async fn get_curations_for(&self, id: &Identifier) -> Vec<PackageCuration> {
        let Some(curation) = self.fetch_curation(id).await else {
            return Vec::new();
        };

        let described = curation.described.as_ref();
        let declared = curation
            .licensed
            .as_ref()
            .and_then(|licensed| licensed.declared.as_deref());

        let concluded_license = normalize_declared(declared);
        let source_location =
            map_source_location(described.and_then(|d| d.source_location.as_ref()));
        let homepage_url = described.and_then(|d| d.project_website.clone());

        vec![assemble(id, concluded_license, source_location, homepage_url)]
    }
}

/// Combine the normalized pieces of a curation into the record handed to callers.
pub fn assemble(
    id: &Identifier,
    concluded_license: Option<SpdxExpression>,
    source_location: Option<NormalizedSourceLocation>,
    homepage_url: Option<String>,
) -> PackageCuration {
    let (source_artifact, vcs) = match source_location {
        Some(NormalizedSourceLocation::Artifact(artifact)) => (Some(artifact), None),
        Some(NormalizedSourceLocation::Vcs(vcs)) => (None, Some(vcs)),
        None => (None, None),
    };

    PackageCuration {
        id: id.clone(),
        concluded_license,
        homepage_url,
        source_artifact,
        vcs,
        comment: COMMENT.to_string(),
    }
}

/// Describe a failed request: the status code plus the error body when the service
/// sent one, otherwise the chain of error messages.
fn failure_message(id: &Identifier, error: &ServiceError) -> String {
    match error {
        ServiceError::Status {
            status,
            body: Some(body),
        } => format!(
            "Getting curations for '{}' failed with code {}: {}",
            id, status, body
        ),
        ServiceError::Status { status, body: None } => format!(
            "Getting curations for '{}' failed with code {}: {}",
            id,
            status,
            error_chain(error)
        ),
        _ => format!("Getting curations for '{}' failed: {}", id, error_chain(error)),
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(error), |e| e.source())
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
