use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::clearlydefined::Server;

/// Root configuration structure, deserialized from `.curation-checkr/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where and how to reach ClearlyDefined.
    pub service: ServiceConfig,
    /// How lookups are scheduled.
    pub lookup: LookupConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Which ClearlyDefined deployment to query. Ignored when `url` is set.
    pub server: Server,
    /// Explicit base URL, e.g. for a self-hosted mirror.
    pub url: Option<String>,
    /// Per-request timeout in seconds. A timed out request counts as a failed lookup.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            server: Server::Production,
            url: None,
            timeout_secs: 10,
            user_agent: format!("curation-checkr/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceConfig {
    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_else(|| self.server.url())
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LookupConfig {
    /// Number of lookups in flight at once.
    pub batch_size: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig { batch_size: 75 }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<working_dir>/.curation-checkr/config.toml`
/// 3. `~/.config/curation-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = working_dir.join(".curation-checkr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("curation-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.service.base_url(), "https://api.clearlydefined.io");
        assert_eq!(cfg.service.timeout_secs, 10);
        assert_eq!(cfg.lookup.batch_size, 75);
        assert!(cfg.service.user_agent.starts_with("curation-checkr/"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [service]
            server = "development"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.service.base_url(), "https://dev-api.clearlydefined.io");
        assert_eq!(cfg.service.timeout_secs, 10);
        assert_eq!(cfg.lookup, LookupConfig::default());
    }

    #[test]
    fn test_url_overrides_server() {
        let cfg: Config = toml::from_str(
            r#"
            [service]
            server = "development"
            url = "https://cd.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.service.base_url(), "https://cd.example.com");
    }

    #[test]
    fn test_override_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join(".curation-checkr");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("config.toml"), "[lookup]\nbatch_size = 5\n").unwrap();

        let override_path = dir.path().join("custom.toml");
        std::fs::write(&override_path, "[lookup]\nbatch_size = 9\n").unwrap();

        let cfg = load_config(dir.path(), Some(&override_path)).unwrap();
        assert_eq!(cfg.lookup.batch_size, 9);

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.lookup.batch_size, 5);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[service]\nserver = \"staging\"\n").unwrap();

        let err = load_config(dir.path(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
