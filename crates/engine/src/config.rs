//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! is a valid configuration. The copy-service API key can also come from
//! the `LODGEWISE_COPY_API_KEY` environment variable, which wins over the
//! file.

use crate::copy::{CopyService, DEFAULT_COPY_ENDPOINT, DEFAULT_COPY_MODEL, MistralCopyClient};
use anyhow::{Context, Result};
use catalog::{Catalog, Coordinate};
use routing::{DEFAULT_OSRM_ENDPOINT, OsrmProvider, RoutePlanner};
use serde::{Deserialize, Serialize};
use sources::{CandidateSource, DEFAULT_OVERPASS_ENDPOINT, OverpassProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const COPY_API_KEY_ENV: &str = "LODGEWISE_COPY_API_KEY";

/// Kathmandu city center, used when the device will not report a position.
pub const DEFAULT_FALLBACK_ANCHOR: Coordinate = Coordinate {
    latitude: 27.7172,
    longitude: 85.3240,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COPY_ENDPOINT.to_string(),
            model: DEFAULT_COPY_MODEL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub poi_endpoint: String,
    pub routing_endpoint: String,
    pub search_radius_m: u32,
    pub request_timeout_secs: u64,
    /// Fall back to synthetic lodgings when the POI provider misses
    pub fail_open_to_synthetic: bool,
    /// Maximum hotels in one conversation reply
    pub result_cap: usize,
    pub fallback_anchor: Coordinate,
    /// JSON catalog file; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    pub copy: Option<CopyConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poi_endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            routing_endpoint: DEFAULT_OSRM_ENDPOINT.to_string(),
            search_radius_m: 5000,
            request_timeout_secs: 10,
            fail_open_to_synthetic: true,
            result_cap: 6,
            fallback_anchor: DEFAULT_FALLBACK_ANCHOR,
            catalog_path: None,
            copy: None,
        }
    }
}

impl EngineConfig {
    /// Load from an optional JSON file, then apply the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Reading config file {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env(std::env::var(COPY_API_KEY_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Add or override the copy API key.
    pub fn apply_env(&mut self, copy_api_key: Option<String>) {
        if let Some(key) = copy_api_key.filter(|k| !k.trim().is_empty()) {
            self.copy.get_or_insert_with(CopyConfig::default).api_key = Some(key);
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.fallback_anchor.is_valid(),
            "fallback_anchor {} is out of range",
            self.fallback_anchor
        );
        anyhow::ensure!(self.result_cap > 0, "result_cap must be at least 1");
        anyhow::ensure!(self.search_radius_m > 0, "search_radius_m must be at least 1");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured catalog file, or the built-in catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => sources::load_catalog(path)
                .with_context(|| format!("Loading catalog {}", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Candidate source for this configuration. `offline` skips the provider.
    pub fn candidate_source(&self, offline: bool) -> CandidateSource {
        let source = if offline {
            CandidateSource::offline()
        } else {
            let provider =
                OverpassProvider::new(&self.poi_endpoint).with_timeout(self.request_timeout());
            CandidateSource::new(Arc::new(provider))
        };
        source.with_fail_open(self.fail_open_to_synthetic)
    }

    pub fn route_planner(&self, offline: bool) -> RoutePlanner {
        if offline {
            return RoutePlanner::offline();
        }
        let provider =
            OsrmProvider::new(&self.routing_endpoint).with_timeout(self.request_timeout());
        RoutePlanner::new(Arc::new(provider))
    }

    /// The copy service, if one is configured with a key.
    pub fn copy_service(&self, offline: bool) -> Option<Box<dyn CopyService>> {
        if offline {
            return None;
        }
        let copy = self.copy.as_ref()?;
        let key = copy.api_key.as_deref()?;
        info!("Copy service enabled ({})", copy.model);
        Some(Box::new(
            MistralCopyClient::new(key)
                .with_endpoint(&copy.endpoint)
                .with_model(&copy.model)
                .with_timeout(self.request_timeout()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.search_radius_m, 5000);
        assert_eq!(config.result_cap, 6);
        assert!(config.fail_open_to_synthetic);
        assert_eq!(config.fallback_anchor, DEFAULT_FALLBACK_ANCHOR);
        assert!(config.copy.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "result_cap": 4, "fail_open_to_synthetic": false }"#)
            .unwrap();

        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.result_cap, 4);
        assert!(!config.fail_open_to_synthetic);
        assert_eq!(config.search_radius_m, 5000);
        assert_eq!(config.routing_endpoint, DEFAULT_OSRM_ENDPOINT);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(EngineConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_zero_result_cap_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "result_cap": 0 }"#).unwrap();
        assert!(EngineConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_env_key_creates_copy_config() {
        let mut config = EngineConfig::default();
        config.apply_env(Some("secret".to_string()));

        let copy = config.copy.as_ref().unwrap();
        assert_eq!(copy.api_key.as_deref(), Some("secret"));
        assert_eq!(copy.model, DEFAULT_COPY_MODEL);
        assert!(config.copy_service(false).is_some());
        assert!(config.copy_service(true).is_none());
    }

    #[test]
    fn test_blank_env_key_ignored() {
        let mut config = EngineConfig::default();
        config.apply_env(Some("  ".to_string()));
        assert!(config.copy.is_none());
        assert!(config.copy_service(false).is_none());
    }

    #[test]
    fn test_builtin_catalog_when_no_path() {
        let catalog = EngineConfig::default().catalog().unwrap();
        assert_eq!(catalog.len(), Catalog::builtin().len());
    }

    #[test]
    fn test_offline_source_respects_flag() {
        let mut config = EngineConfig::default();
        config.fail_open_to_synthetic = false;
        assert!(!config.candidate_source(true).fail_open());
    }
}
