//! PyPI registry client for resolving canonical Python package names

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::DEFAULT_PYPI_REGISTRY;
use crate::version::error::LookupError;
use crate::version::registry::NameResolver;

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    base_url: String,
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PYPI_REGISTRY.to_string())
    }
}

impl PypiRegistry {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
}

/// Package information from PyPI
#[derive(Debug, Deserialize)]
struct PypiInfo {
    /// Name as declared by the package itself
    name: String,
}

#[async_trait]
impl NameResolver for PypiRegistry {
    async fn canonical_name(&self, package_key: &str) -> Result<String, LookupError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package_key);
        debug!("Resolving PyPI package name: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(package_key.to_string()));
        }

        if !response.status().is_success() {
            return Err(LookupError::InvalidResponse(format!(
                "PyPI API returned status {}",
                response.status()
            )));
        }

        let pypi_response: PypiResponse = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        debug!(
            "Resolved {} to canonical name {}",
            package_key, pypi_response.info.name
        );

        Ok(pypi_response.info.name)
    }
}
