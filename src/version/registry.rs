//! Registry trait for resolving canonical package names

#[cfg(test)]
use mockall::automock;

use crate::version::error::LookupError;

/// Resolves the name a package is published under
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait NameResolver: Send + Sync {
    /// Returns the canonical name for a package key as written in a requirements file
    ///
    /// Registries accept several spellings of the same package (`Flask`, `flask`,
    /// `zope-interface`, `zope.interface`); the canonical name is the one the
    /// registry itself declares, so changes to differently spelled pins merge.
    ///
    /// # Returns
    /// * `Ok(String)` - The registry's declared package name
    /// * `Err(LookupError)` - If the lookup fails
    async fn canonical_name(&self, package_key: &str) -> Result<String, LookupError>;
}
