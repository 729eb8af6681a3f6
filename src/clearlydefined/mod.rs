//! The ClearlyDefined metadata service: servers, coordinates and response schema.
//!
//! Only the parts of a curation document that end up in a
//! [`PackageCuration`](crate::models::PackageCuration) are modelled; everything else
//! in the payload is ignored during deserialization.

pub mod service;

pub use service::{ClearlyDefinedService, CurationService};

use serde::{Deserialize, Serialize};

use crate::models::Identifier;

/// A ClearlyDefined API deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    #[default]
    Production,
    Development,
    Localhost,
}

impl Server {
    pub fn url(&self) -> &'static str {
        match self {
            Server::Production => "https://api.clearlydefined.io",
            Server::Development => "https://dev-api.clearlydefined.io",
            Server::Localhost => "http://localhost:4000",
        }
    }
}

/// The kind of component a ClearlyDefined coordinate or source location refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Npm,
    Crate,
    Git,
    Maven,
    Composer,
    Nuget,
    Gem,
    Go,
    Pod,
    Pypi,
    SourceArchive,
    Deb,
    DebSrc,
    /// Any type this client does not know about yet.
    #[serde(other)]
    Other,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Npm => "npm",
            ComponentType::Crate => "crate",
            ComponentType::Git => "git",
            ComponentType::Maven => "maven",
            ComponentType::Composer => "composer",
            ComponentType::Nuget => "nuget",
            ComponentType::Gem => "gem",
            ComponentType::Go => "go",
            ComponentType::Pod => "pod",
            ComponentType::Pypi => "pypi",
            ComponentType::SourceArchive => "sourcearchive",
            ComponentType::Deb => "deb",
            ComponentType::DebSrc => "debsrc",
            ComponentType::Other => "other",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The registry or forge hosting a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    CocoaPods,
    CratesIo,
    Debian,
    GitHub,
    Golang,
    MavenCentral,
    NpmJs,
    NuGet,
    Packagist,
    PyPi,
    RubyGems,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::CocoaPods => "cocoapods",
            Provider::CratesIo => "cratesio",
            Provider::Debian => "debian",
            Provider::GitHub => "github",
            Provider::Golang => "golang",
            Provider::MavenCentral => "mavencentral",
            Provider::NpmJs => "npmjs",
            Provider::NuGet => "nuget",
            Provider::Packagist => "packagist",
            Provider::PyPi => "pypi",
            Provider::RubyGems => "rubygems",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a package's ecosystem onto the ClearlyDefined `(type, provider)` pair.
///
/// Returns `None` for ecosystems ClearlyDefined does not cover.
pub fn type_and_provider(id: &Identifier) -> Option<(ComponentType, Provider)> {
    let pair = match id.package_type.as_str() {
        "Bower" => (ComponentType::Git, Provider::GitHub),
        "Bundler" | "Gem" => (ComponentType::Gem, Provider::RubyGems),
        "Cargo" | "Crate" => (ComponentType::Crate, Provider::CratesIo),
        "Carthage" | "CocoaPods" | "Pod" => (ComponentType::Pod, Provider::CocoaPods),
        "Composer" => (ComponentType::Composer, Provider::Packagist),
        "DotNet" | "NuGet" => (ComponentType::Nuget, Provider::NuGet),
        "GoDep" | "GoMod" | "Go" => (ComponentType::Go, Provider::Golang),
        "Gradle" | "Maven" | "SBT" => (ComponentType::Maven, Provider::MavenCentral),
        "NPM" | "Yarn" | "PNPM" => (ComponentType::Npm, Provider::NpmJs),
        "PIP" | "Pipenv" | "PyPI" | "Poetry" => (ComponentType::Pypi, Provider::PyPi),
        "Debian" => (ComponentType::Deb, Provider::Debian),
        _ => return None,
    };
    Some(pair)
}

/// A curation document as returned by `GET /curations/...`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Curation {
    #[serde(default)]
    pub described: Option<CurationDescribed>,
    #[serde(default)]
    pub licensed: Option<CurationLicensed>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationDescribed {
    #[serde(default)]
    pub project_website: Option<String>,
    #[serde(default)]
    pub source_location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CurationLicensed {
    #[serde(default)]
    pub declared: Option<String>,
}

/// Where the sources of a component live, as reported by ClearlyDefined.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceLocation {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    /// Only needed to locate sources when `url` is absent.
    #[serde(default)]
    pub provider: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_and_provider() {
        let id = Identifier::new("NPM", "@babel", "core", "7.0.0");
        assert_eq!(
            type_and_provider(&id),
            Some((ComponentType::Npm, Provider::NpmJs))
        );

        let id = Identifier::new("Gradle", "org.slf4j", "slf4j-api", "2.0.0");
        assert_eq!(
            type_and_provider(&id),
            Some((ComponentType::Maven, Provider::MavenCentral))
        );
    }

    #[test]
    fn test_unsupported_ecosystem() {
        let id = Identifier::new("Unmanaged", "", "my-project", "1.0");
        assert_eq!(type_and_provider(&id), None);
    }

    #[test]
    fn test_deserialize_full_curation() {
        let json = r#"{
            "described": {
                "projectWebsite": "https://lodash.com/",
                "releaseDate": "2021-02-20",
                "sourceLocation": {
                    "type": "git",
                    "provider": "github",
                    "namespace": "lodash",
                    "name": "lodash",
                    "revision": "f299b52f39486275a9e6483b60a410e06520c538",
                    "url": "https://github.com/lodash/lodash"
                }
            },
            "licensed": { "declared": "MIT" }
        }"#;

        let curation: Curation = serde_json::from_str(json).unwrap();
        let described = curation.described.unwrap();
        assert_eq!(described.project_website.as_deref(), Some("https://lodash.com/"));
        let location = described.source_location.unwrap();
        assert_eq!(location.component_type, ComponentType::Git);
        assert_eq!(location.provider.as_deref(), Some("github"));
        assert_eq!(curation.licensed.unwrap().declared.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_deserialize_empty_curation() {
        let curation: Curation = serde_json::from_str("{}").unwrap();
        assert_eq!(curation, Curation::default());
    }

    #[test]
    fn test_unknown_component_type() {
        let location: SourceLocation =
            serde_json::from_str(r#"{ "type": "conda", "url": "https://x/y.tar.bz2" }"#).unwrap();
        assert_eq!(location.component_type, ComponentType::Other);
    }

    #[test]
    fn test_source_location_requires_type() {
        assert!(serde_json::from_str::<SourceLocation>(r#"{ "url": "https://x" }"#).is_err());
    }
}
