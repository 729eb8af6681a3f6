use std::str::FromStr;

use serde::Serialize;

use crate::error::IdentifierError;
use crate::license::spdx::SpdxExpression;

/// A package identifier in `Type:Namespace:Name:Version` coordinates form.
///
/// The namespace may be empty, e.g. `Crate::serde:1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub package_type: String,
    pub namespace: String,
    pub name: String,
    pub version: String,
}

impl Identifier {
    pub fn new(
        package_type: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            package_type: package_type.into(),
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coordinates = s.trim();
        let parts: Vec<&str> = coordinates.splitn(4, ':').collect();
        if parts.len() != 4 {
            return Err(IdentifierError::WrongPartCount {
                coordinates: coordinates.to_string(),
                found: parts.len(),
            });
        }

        let [package_type, namespace, name, version] = [parts[0], parts[1], parts[2], parts[3]];
        for (field, value) in [("type", package_type), ("name", name), ("version", version)] {
            if value.is_empty() {
                return Err(IdentifierError::EmptyField {
                    coordinates: coordinates.to_string(),
                    field,
                });
            }
        }

        Ok(Identifier::new(package_type, namespace, name, version))
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.package_type, self.namespace, self.name, self.version
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VcsType {
    Git,
}

impl std::fmt::Display for VcsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsType::Git => write!(f, "Git"),
        }
    }
}

/// Curated version control information. Fields left `None` are not curated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VcsInfoCurationData {
    #[serde(rename = "type")]
    pub vcs_type: Option<VcsType>,
    pub url: Option<String>,
    pub revision: Option<String>,
    pub path: Option<String>,
}

/// ClearlyDefined curations never carry a checksum, so only the sentinel exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hash {
    pub value: String,
    pub algorithm: HashAlgorithm,
}

impl Hash {
    /// The "no hash available" sentinel.
    pub fn none() -> Self {
        Hash {
            value: String::new(),
            algorithm: HashAlgorithm::None,
        }
    }
}

/// A downloadable file plus the hash to verify it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteArtifact {
    pub url: String,
    pub hash: Hash,
}

/// A curation for a single package, as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCuration {
    pub id: Identifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concluded_license: Option<SpdxExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_artifact: Option<RemoteArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs: Option<VcsInfoCurationData>,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LicenseRisk {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Proprietary,
    Unknown,
}

impl std::fmt::Display for LicenseRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseRisk::Permissive => write!(f, "Permissive"),
            LicenseRisk::WeakCopyleft => write!(f, "Weak Copyleft"),
            LicenseRisk::StrongCopyleft => write!(f, "Strong Copyleft"),
            LicenseRisk::Proprietary => write!(f, "Proprietary"),
            LicenseRisk::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let id: Identifier = "Maven:com.google.guava:guava:31.1-jre".parse().unwrap();
        assert_eq!(id, Identifier::new("Maven", "com.google.guava", "guava", "31.1-jre"));
    }

    #[test]
    fn test_parse_empty_namespace() {
        let id: Identifier = "Crate::serde:1.0.0".parse().unwrap();
        assert_eq!(id.namespace, "");
        assert_eq!(id.to_string(), "Crate::serde:1.0.0");
    }

    #[test]
    fn test_version_may_contain_colons() {
        let id: Identifier = "Debian::libc6:2:2.36-9".parse().unwrap();
        assert_eq!(id.version, "2:2.36-9");
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!(matches!(
            "NPM:lodash:4.17.21".parse::<Identifier>(),
            Err(IdentifierError::WrongPartCount { found: 3, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!(matches!(
            "NPM:::1.0.0".parse::<Identifier>(),
            Err(IdentifierError::EmptyField { field: "name", .. })
        ));
    }

    #[test]
    fn test_hash_none_sentinel() {
        let hash = Hash::none();
        assert_eq!(hash.algorithm, HashAlgorithm::None);
        assert!(hash.value.is_empty());
        assert_eq!(
            serde_json::to_value(&hash).unwrap(),
            serde_json::json!({ "value": "", "algorithm": "NONE" })
        );
    }
}
