use std::future::Future;

use reqwest::{Client, Url};
use tracing::debug;

use super::{ComponentType, Provider};
use crate::error::ServiceError;

/// Address of a single curation: `/curations/{type}/{provider}/{namespace}/{name}/{revision}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationCoordinates<'a> {
    pub component_type: ComponentType,
    pub provider: Provider,
    pub namespace: &'a str,
    pub name: &'a str,
    pub revision: &'a str,
}

/// Transport for fetching raw curation documents.
///
/// Implementations return the response body on success and a [`ServiceError`] for
/// non-success statuses and transport failures. Interpreting the body is left to the
/// caller. The returned future is `Send` so lookups can run on spawned tasks.
pub trait CurationService {
    fn get_curation(
        &self,
        coordinates: &CurationCoordinates<'_>,
    ) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// [`CurationService`] backed by the ClearlyDefined REST API.
///
/// The `reqwest::Client` is supplied by the caller so its connection pool and timeout
/// can be shared across providers.
#[derive(Debug, Clone)]
pub struct ClearlyDefinedService {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl ClearlyDefinedService {
    pub fn new(client: Client, base_url: Url, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            base_url,
            user_agent: user_agent.into(),
        }
    }

    /// Build the request URL, percent-encoding each coordinate as its own path segment.
    ///
    /// `.` and `..` survive percent-encoding and would be resolved as dot-segments,
    /// so they are rejected.
    pub fn curation_url(&self, coordinates: &CurationCoordinates<'_>) -> Result<Url, ServiceError> {
        let segments = [coordinates.namespace, coordinates.name, coordinates.revision];
        if let Some(dot) = segments.into_iter().find(|s| *s == "." || *s == "..") {
            return Err(ServiceError::InvalidCoordinate(dot.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([
                "curations",
                coordinates.component_type.as_str(),
                coordinates.provider.as_str(),
            ])
            .extend(segments);
        Ok(url)
    }
}

impl CurationService for ClearlyDefinedService {
    async fn get_curation(&self, coordinates: &CurationCoordinates<'_>) -> Result<String, ServiceError> {
        let url = self.curation_url(coordinates)?;
        debug!(%url, "Requesting curation");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The error body is best effort, a broken body still reports the status.
            let body = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty());
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    fn service(base: &str) -> ClearlyDefinedService {
        ClearlyDefinedService::new(Client::new(), Url::parse(base).unwrap(), "curation-checkr/test")
    }

    fn local_service(base: Url) -> ClearlyDefinedService {
        let client = Client::builder().no_proxy().build().unwrap();
        ClearlyDefinedService::new(client, base, "curation-checkr/test")
    }

    fn coordinates<'a>(namespace: &'a str, name: &'a str) -> CurationCoordinates<'a> {
        CurationCoordinates {
            component_type: ComponentType::Npm,
            provider: Provider::NpmJs,
            namespace,
            name,
            revision: "7.0.0",
        }
    }

    #[test]
    fn test_curation_url() {
        let url = service("https://api.clearlydefined.io")
            .curation_url(&coordinates("@babel", "core"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.clearlydefined.io/curations/npm/npmjs/@babel/core/7.0.0"
        );
    }

    #[test]
    fn test_curation_url_keeps_base_path() {
        let url = service("http://localhost:4000/api/")
            .curation_url(&coordinates("-", "lodash"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/api/curations/npm/npmjs/-/lodash/7.0.0"
        );
    }

    #[test]
    fn test_curation_url_encodes_segments() {
        let url = service("https://api.clearlydefined.io")
            .curation_url(&coordinates("-", "a/b c"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.clearlydefined.io/curations/npm/npmjs/-/a%2Fb%20c/7.0.0"
        );
    }

    #[test]
    fn test_not_found_detection() {
        let not_found = ServiceError::Status {
            status: 404,
            body: None,
        };
        let failure = ServiceError::Status {
            status: 500,
            body: None,
        };
        assert!(not_found.is_not_found());
        assert!(!failure.is_not_found());
    }

    #[test]
    fn test_curation_url_rejects_dot_segments() {
        let service = service("https://api.clearlydefined.io/v1/");

        for name in [".", ".."] {
            assert!(matches!(
                service.curation_url(&coordinates("-", name)),
                Err(ServiceError::InvalidCoordinate(segment)) if segment == name
            ));
        }
        assert!(matches!(
            service.curation_url(&coordinates("..", "lodash")),
            Err(ServiceError::InvalidCoordinate(_))
        ));
        // Dots inside a segment are ordinary characters.
        let url = service.curation_url(&coordinates("-", "..foo")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.clearlydefined.io/v1/curations/npm/npmjs/-/..foo/7.0.0"
        );
    }

    #[tokio::test]
    async fn test_get_curation_returns_body() {
        let (base, server) = serve_once("200 OK", r#"{"licensed":{"declared":"MIT"}}"#).await;

        let body = local_service(base)
            .get_curation(&coordinates("-", "lodash"))
            .await
            .unwrap();
        assert_eq!(body, r#"{"licensed":{"declared":"MIT"}}"#);

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /curations/npm/npmjs/-/lodash/7.0.0 http/1.1"));
        assert!(request.contains("user-agent: curation-checkr/test"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_get_curation_server_error_keeps_body() {
        let (base, _server) = serve_once("500 Internal Server Error", "boom").await;

        let err = local_service(base)
            .get_curation(&coordinates("-", "lodash"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Status { status: 500, body: Some(ref body) } if body == "boom"
        ));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_curation_not_found_without_body() {
        let (base, _server) = serve_once("404 Not Found", "").await;

        let err = local_service(base)
            .get_curation(&coordinates("-", "lodash"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(err, ServiceError::Status { status: 404, body: None }));
    }
}
