//! In-memory key store for testing and software fallback

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    descriptor::{missing_alias, KeyDescriptor, KeyDescriptorParams},
    error::{KeyInfoError, KeyInfoResult},
    traits::KeyInfoSource,
};

/// Key store keeping key metadata in memory
///
/// Nothing here is hardware-backed; entries report whatever metadata they were registered with.
pub struct MockKeyStore {
    name: String,
    entries: Arc<RwLock<HashMap<String, KeyDescriptorParams>>>,
}

impl Default for MockKeyStore {
    fn default() -> Self {
        Self::new("mock-keystore")
    }
}

impl MockKeyStore {
    pub fn new(name: &str) -> Self {
        info!("Initializing mock key store: {}", name);
        Self { name: name.to_string(), entries: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Register key metadata under its alias, replacing any previous entry
    pub async fn insert(&self, params: KeyDescriptorParams) -> KeyInfoResult<()> {
        let alias = params.alias.clone().ok_or_else(missing_alias)?;

        debug!("Registering key metadata for '{}' in {}", alias, self.name);
        self.entries.write().await.insert(alias, params);
        Ok(())
    }

    /// Remove an entry
    pub async fn remove(&self, alias: &str) -> KeyInfoResult<()> {
        self.entries
            .write()
            .await
            .remove(alias)
            .map(|_| ())
            .ok_or_else(|| KeyInfoError::KeyNotFound(alias.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyInfoSource for MockKeyStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn key_info(&self, alias: &str) -> KeyInfoResult<KeyDescriptor> {
        debug!("Resolving key info for '{}' in {}", alias, self.name);

        let entries = self.entries.read().await;
        let params = entries.get(alias).ok_or_else(|| KeyInfoError::KeyNotFound(alias.to_string()))?;
        KeyDescriptor::new(params)
    }

    async fn aliases(&self) -> KeyInfoResult<Vec<String>> {
        let mut aliases: Vec<String> = self.entries.read().await.keys().cloned().collect();
        aliases.sort();
        Ok(aliases)
    }
}
