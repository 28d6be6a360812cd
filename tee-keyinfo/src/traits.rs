//! Key store trait definitions

use async_trait::async_trait;

use crate::{descriptor::KeyDescriptor, error::KeyInfoResult};

/// Interface a hardware-backed key store provides to hand out key descriptors
///
/// Implementations resolve an alias to the metadata of the stored key and build a fresh
/// [`KeyDescriptor`] for every call.
#[async_trait]
pub trait KeyInfoSource: Send + Sync {
    /// Name of the backing key store
    fn name(&self) -> &str;

    /// Describe the key stored under `alias`
    async fn key_info(&self, alias: &str) -> KeyInfoResult<KeyDescriptor>;

    /// List the aliases of all entries in the key store
    async fn aliases(&self) -> KeyInfoResult<Vec<String>>;

    /// Check whether an entry exists under `alias`
    async fn contains_alias(&self, alias: &str) -> bool {
        self.key_info(alias).await.is_ok()
    }
}
