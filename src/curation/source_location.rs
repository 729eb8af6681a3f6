use tracing::debug;

use crate::clearlydefined::{ComponentType, SourceLocation};
use crate::models::{Hash, RemoteArtifact, VcsInfoCurationData, VcsType};

/// A ClearlyDefined source location, resolved into exactly one curation shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedSourceLocation {
    Vcs(VcsInfoCurationData),
    Artifact(RemoteArtifact),
}

/// Map a reported source location onto VCS info or a remote artifact.
///
/// Git locations are taken over verbatim. Everything else becomes a remote artifact
/// without a hash, since ClearlyDefined exposes no checksum for those. A non-VCS
/// location without a URL yields `None`: deriving the URL from the provider is not
/// supported.
pub fn map_source_location(location: Option<&SourceLocation>) -> Option<NormalizedSourceLocation> {
    let location = location?;

    match location.component_type {
        ComponentType::Git => Some(NormalizedSourceLocation::Vcs(VcsInfoCurationData {
            vcs_type: Some(VcsType::Git),
            url: location.url.clone(),
            revision: location.revision.clone(),
            path: location.path.clone(),
        })),
        _ => match &location.url {
            Some(url) => Some(NormalizedSourceLocation::Artifact(RemoteArtifact {
                url: url.clone(),
                hash: Hash::none(),
            })),
            None => {
                debug!(
                    kind = %location.component_type,
                    provider = location.provider.as_deref().unwrap_or("<none>"),
                    "Source location has no URL and its provider cannot be mapped"
                );
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(kind: &str, url: Option<&str>) -> SourceLocation {
        let json = serde_json::json!({
            "type": kind,
            "url": url,
            "revision": "abc",
            "path": "sub",
            "provider": "github",
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_absent_location() {
        assert_eq!(map_source_location(None), None);
    }

    #[test]
    fn test_git_maps_to_vcs() {
        let mapped = map_source_location(Some(&location("git", Some("https://x/y"))));
        assert_eq!(
            mapped,
            Some(NormalizedSourceLocation::Vcs(VcsInfoCurationData {
                vcs_type: Some(VcsType::Git),
                url: Some("https://x/y".to_string()),
                revision: Some("abc".to_string()),
                path: Some("sub".to_string()),
            }))
        );
    }

    #[test]
    fn test_git_without_url_is_still_vcs() {
        let mapped = map_source_location(Some(&location("git", None)));
        assert!(matches!(
            mapped,
            Some(NormalizedSourceLocation::Vcs(VcsInfoCurationData { url: None, .. }))
        ));
    }

    #[test]
    fn test_package_maps_to_artifact() {
        let mapped = map_source_location(Some(&location("npm", Some("https://x/pkg.tgz"))));
        assert_eq!(
            mapped,
            Some(NormalizedSourceLocation::Artifact(RemoteArtifact {
                url: "https://x/pkg.tgz".to_string(),
                hash: Hash::none(),
            }))
        );
    }

    #[test]
    fn test_unknown_kind_maps_to_artifact() {
        let mapped = map_source_location(Some(&location("conda", Some("https://x/pkg.tar.bz2"))));
        assert!(matches!(mapped, Some(NormalizedSourceLocation::Artifact(_))));
    }

    #[test]
    fn test_artifact_without_url_is_unsupported() {
        assert_eq!(map_source_location(Some(&location("sourcearchive", None))), None);
    }
}
