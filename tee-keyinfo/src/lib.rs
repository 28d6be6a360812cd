//! Key descriptors for hardware-backed key stores
//!
//! This crate describes keys held by a hardware-backed key store: where the key material
//! lives, what operations the key is authorized for, and which time and user-authentication
//! constraints govern its use. Key stores build a [`KeyDescriptor`] once per lookup;
//! application code reads it to decide whether a key meets its security policy.

pub mod descriptor;
pub mod error;
#[cfg(any(test, feature = "software-fallback"))]
pub mod mock;
pub mod traits;
pub mod types;

pub use descriptor::{KeyDescriptor, KeyDescriptorParams, AUTH_EVERY_USE};
pub use error::{KeyInfoError, KeyInfoResult};
pub use traits::KeyInfoSource;
pub use types::{block_mode, digest, encryption_padding, signature_padding, KeyOrigin, KeyPurpose};

#[cfg(any(test, feature = "software-fallback"))]
pub use mock::MockKeyStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
