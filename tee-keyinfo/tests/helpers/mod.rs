//! Test helpers and fixtures for key descriptor testing

use std::time::{Duration, SystemTime};

use tee_keyinfo::{
    block_mode, digest, encryption_padding, signature_padding, KeyDescriptorParams, KeyOrigin,
    KeyPurpose, MockKeyStore,
};

/// Fixed reference instant so that tests are reproducible
pub fn reference_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Predefined key metadata fixtures
pub struct TestKeyConfigs;

impl TestKeyConfigs {
    /// AES key generated in secure hardware for GCM encryption
    pub fn aes_gcm(alias: &str) -> KeyDescriptorParams {
        KeyDescriptorParams {
            alias: Some(alias.to_string()),
            key_size: 256,
            inside_secure_hardware: true,
            origin: KeyOrigin::Generated,
            purposes: KeyPurpose::ENCRYPT | KeyPurpose::DECRYPT,
            encryption_paddings: Some(tokens(&[encryption_padding::NONE])),
            block_modes: Some(tokens(&[block_mode::GCM])),
            ..Default::default()
        }
    }

    /// Imported RSA signing key bound to user authentication with a validity window
    pub fn rsa_signing(alias: &str) -> KeyDescriptorParams {
        let start = reference_time();
        KeyDescriptorParams {
            alias: Some(alias.to_string()),
            key_size: 2048,
            inside_secure_hardware: true,
            origin: KeyOrigin::Imported,
            key_validity_start: Some(start),
            key_validity_for_origination_end: Some(start + Duration::from_secs(30 * 86_400)),
            key_validity_for_consumption_end: Some(start + Duration::from_secs(365 * 86_400)),
            purposes: KeyPurpose::SIGN | KeyPurpose::VERIFY,
            signature_paddings: Some(tokens(&[signature_padding::RSA_PSS, signature_padding::RSA_PKCS1])),
            digests: Some(tokens(&[digest::SHA256, digest::SHA512])),
            user_authentication_required: true,
            user_authentication_validity_duration_seconds: 30,
            user_authentication_requirement_enforced_by_secure_hardware: true,
            ..Default::default()
        }
    }

    /// Software-only key of unknown origin with no reported restrictions
    pub fn legacy_software(alias: &str) -> KeyDescriptorParams {
        KeyDescriptorParams {
            alias: Some(alias.to_string()),
            key_size: 128,
            origin: KeyOrigin::Unknown,
            purposes: KeyPurpose::ENCRYPT,
            ..Default::default()
        }
    }
}

/// Build a mock key store pre-populated with the standard fixtures
pub async fn populated_store() -> MockKeyStore {
    let store = MockKeyStore::new("integration-store");
    for params in [
        TestKeyConfigs::aes_gcm("aes-key"),
        TestKeyConfigs::rsa_signing("rsa-key"),
        TestKeyConfigs::legacy_software("legacy-key"),
    ] {
        store.insert(params).await.expect("fixture registration should succeed");
    }
    store
}
