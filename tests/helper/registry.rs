//! Resolver test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use pin_report::version::error::LookupError;
use pin_report::version::registry::NameResolver;

/// Resolver backed by a fixed table of key -> canonical name
#[derive(Default)]
pub struct StaticResolver {
    names: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, key: &str, canonical: &str) -> Self {
        self.names.insert(key.to_string(), canonical.to_string());
        self
    }

    /// Keys looked up so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameResolver for StaticResolver {
    async fn canonical_name(&self, package_key: &str) -> Result<String, LookupError> {
        self.lookups.lock().unwrap().push(package_key.to_string());
        self.names
            .get(package_key)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(package_key.to_string()))
    }
}
