//! Key descriptor
//!
//! A [`KeyDescriptor`] is a snapshot of the security and usage properties of a key held by a
//! hardware-backed key store: whether the key material stays inside secure hardware, what the
//! key is authorized for, when it may be used, and whether user authentication gates its use.
//!
//! Descriptors are built once by the key store and are read-only afterwards. Timestamps and
//! token lists are copied on the way in and on every read, so nothing a caller does with a
//! returned value can reach the descriptor's own state.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use tracing::debug;

use crate::{
    error::{KeyInfoError, KeyInfoResult},
    types::{KeyOrigin, KeyPurpose},
};

/// Authentication validity meaning the user must authenticate for every use of the key
pub const AUTH_EVERY_USE: i32 = -1;

/// Construction input for a [`KeyDescriptor`]
///
/// Absent timestamps mean "not restricted"; absent token lists are stored as empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptorParams {
    /// Key store alias of the entry. Required.
    pub alias: Option<String>,

    /// Key size in bits
    pub key_size: u32,

    /// Whether the key material lives only inside secure hardware
    pub inside_secure_hardware: bool,

    /// How the key entered the key store
    pub origin: KeyOrigin,

    /// Instant before which the key is not yet valid
    #[serde(default, with = "epoch_time")]
    pub key_validity_start: Option<SystemTime>,

    /// Instant after which the key may no longer encrypt or sign
    #[serde(default, with = "epoch_time")]
    pub key_validity_for_origination_end: Option<SystemTime>,

    /// Instant after which the key may no longer decrypt or verify
    #[serde(default, with = "epoch_time")]
    pub key_validity_for_consumption_end: Option<SystemTime>,

    /// Authorized purposes
    pub purposes: KeyPurpose,

    pub encryption_paddings: Option<Vec<String>>,
    pub signature_paddings: Option<Vec<String>>,
    pub digests: Option<Vec<String>>,
    pub block_modes: Option<Vec<String>>,

    /// Whether use of the key requires user authentication
    pub user_authentication_required: bool,

    /// Seconds a successful authentication keeps the key usable, or [`AUTH_EVERY_USE`]
    pub user_authentication_validity_duration_seconds: i32,

    /// Whether secure hardware enforces the authentication requirement
    pub user_authentication_requirement_enforced_by_secure_hardware: bool,
}

impl Default for KeyDescriptorParams {
    fn default() -> Self {
        Self {
            alias: None,
            key_size: 0,
            inside_secure_hardware: false,
            origin: KeyOrigin::Unknown,
            key_validity_start: None,
            key_validity_for_origination_end: None,
            key_validity_for_consumption_end: None,
            purposes: KeyPurpose::empty(),
            encryption_paddings: None,
            signature_paddings: None,
            digests: None,
            block_modes: None,
            user_authentication_required: false,
            user_authentication_validity_duration_seconds: AUTH_EVERY_USE,
            user_authentication_requirement_enforced_by_secure_hardware: false,
        }
    }
}

/// Read-only description of a key in a hardware-backed key store
///
/// Enumerated values are stored as reported by the key store. The descriptor does not check
/// them against the known vocabularies, nor does it check that validity windows are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyDescriptorParams", into = "KeyDescriptorParams")]
pub struct KeyDescriptor {
    alias: String,
    key_size: u32,
    inside_secure_hardware: bool,
    origin: KeyOrigin,
    key_validity_start: Option<SystemTime>,
    key_validity_for_origination_end: Option<SystemTime>,
    key_validity_for_consumption_end: Option<SystemTime>,
    purposes: KeyPurpose,
    encryption_paddings: Vec<String>,
    signature_paddings: Vec<String>,
    digests: Vec<String>,
    block_modes: Vec<String>,
    user_authentication_required: bool,
    user_authentication_validity_duration_seconds: i32,
    user_authentication_requirement_enforced_by_secure_hardware: bool,
}

impl KeyDescriptor {
    /// Builds a descriptor from borrowed parameters.
    ///
    /// Every timestamp and token list is copied; later changes to `params` are not seen by
    /// the descriptor. Fails with [`KeyInfoError::InvalidArgument`] when no alias is given.
    pub fn new(params: &KeyDescriptorParams) -> KeyInfoResult<Self> {
        let alias = params.alias.as_deref().ok_or_else(missing_alias)?;

        let descriptor = Self {
            alias: alias.to_string(),
            key_size: params.key_size,
            inside_secure_hardware: params.inside_secure_hardware,
            origin: params.origin,
            key_validity_start: params.key_validity_start,
            key_validity_for_origination_end: params.key_validity_for_origination_end,
            key_validity_for_consumption_end: params.key_validity_for_consumption_end,
            purposes: params.purposes,
            encryption_paddings: copy_tokens(params.encryption_paddings.as_deref()),
            signature_paddings: copy_tokens(params.signature_paddings.as_deref()),
            digests: copy_tokens(params.digests.as_deref()),
            block_modes: copy_tokens(params.block_modes.as_deref()),
            user_authentication_required: params.user_authentication_required,
            user_authentication_validity_duration_seconds: params
                .user_authentication_validity_duration_seconds,
            user_authentication_requirement_enforced_by_secure_hardware: params
                .user_authentication_requirement_enforced_by_secure_hardware,
        };

        debug!(
            "Built key descriptor for '{}': origin={}, purposes={:?}, secure_hw={}",
            descriptor.alias, descriptor.origin, descriptor.purposes, descriptor.inside_secure_hardware
        );

        Ok(descriptor)
    }

    /// Alias under which the key is stored in the key store
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Key size in bits
    pub fn key_size(&self) -> u32 {
        self.key_size
    }

    /// Returns `true` if the key resides inside secure hardware (e.g., a Trusted Execution
    /// Environment or Secure Element). Key material of such keys is available in plaintext
    /// only inside the secure hardware.
    pub fn is_inside_secure_hardware(&self) -> bool {
        self.inside_secure_hardware
    }

    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Instant before which the key is not yet valid, `None` if not restricted
    pub fn key_validity_start(&self) -> Option<SystemTime> {
        self.key_validity_start
    }

    /// Instant after which the key is no longer valid for encryption and signing, `None` if
    /// not restricted
    pub fn key_validity_for_origination_end(&self) -> Option<SystemTime> {
        self.key_validity_for_origination_end
    }

    /// Instant after which the key is no longer valid for decryption and verification, `None`
    /// if not restricted
    pub fn key_validity_for_consumption_end(&self) -> Option<SystemTime> {
        self.key_validity_for_consumption_end
    }

    /// Purposes the key is authorized for. Use for any other purpose is rejected by the key
    /// store.
    pub fn purposes(&self) -> KeyPurpose {
        self.purposes
    }

    /// Padding schemes (e.g., `PKCS7Padding`, `NoPadding`) usable when encrypting or
    /// decrypting, in the order the key store reported them
    pub fn encryption_paddings(&self) -> Vec<String> {
        self.encryption_paddings.clone()
    }

    /// Padding schemes (e.g., `PSS`, `PKCS1`) usable when signing or verifying
    pub fn signature_paddings(&self) -> Vec<String> {
        self.signature_paddings.clone()
    }

    /// Digest algorithms (e.g., `SHA-256`) the key can be used with
    pub fn digests(&self) -> Vec<String> {
        self.digests.clone()
    }

    /// Block modes (e.g., `GCM`, `CBC`) usable when encrypting or decrypting
    pub fn block_modes(&self) -> Vec<String> {
        self.block_modes.clone()
    }

    /// Returns `true` if the key may only be used after the user has authenticated.
    ///
    /// Applies to secret and private key operations only; public key operations are not
    /// restricted.
    pub fn is_user_authentication_required(&self) -> bool {
        self.user_authentication_required
    }

    /// Seconds the key stays usable after a successful user authentication, or
    /// [`AUTH_EVERY_USE`] if authentication is required for every use.
    ///
    /// Only meaningful when [`is_user_authentication_required`](Self::is_user_authentication_required)
    /// is `true`.
    pub fn user_authentication_validity_duration_seconds(&self) -> i32 {
        self.user_authentication_validity_duration_seconds
    }

    /// Returns `true` if the user authentication requirement is enforced by secure hardware
    /// rather than by software.
    pub fn is_user_authentication_requirement_enforced_by_secure_hardware(&self) -> bool {
        self.user_authentication_requirement_enforced_by_secure_hardware
    }
}

impl TryFrom<KeyDescriptorParams> for KeyDescriptor {
    type Error = KeyInfoError;

    fn try_from(params: KeyDescriptorParams) -> KeyInfoResult<Self> {
        Self::new(&params)
    }
}

impl From<KeyDescriptor> for KeyDescriptorParams {
    fn from(descriptor: KeyDescriptor) -> Self {
        Self {
            alias: Some(descriptor.alias),
            key_size: descriptor.key_size,
            inside_secure_hardware: descriptor.inside_secure_hardware,
            origin: descriptor.origin,
            key_validity_start: descriptor.key_validity_start,
            key_validity_for_origination_end: descriptor.key_validity_for_origination_end,
            key_validity_for_consumption_end: descriptor.key_validity_for_consumption_end,
            purposes: descriptor.purposes,
            encryption_paddings: Some(descriptor.encryption_paddings),
            signature_paddings: Some(descriptor.signature_paddings),
            digests: Some(descriptor.digests),
            block_modes: Some(descriptor.block_modes),
            user_authentication_required: descriptor.user_authentication_required,
            user_authentication_validity_duration_seconds: descriptor
                .user_authentication_validity_duration_seconds,
            user_authentication_requirement_enforced_by_secure_hardware: descriptor
                .user_authentication_requirement_enforced_by_secure_hardware,
        }
    }
}

pub(crate) fn missing_alias() -> KeyInfoError {
    KeyInfoError::InvalidArgument("key store alias must be provided".to_string())
}

fn copy_tokens(tokens: Option<&[String]>) -> Vec<String> {
    tokens.map(<[String]>::to_vec).unwrap_or_default()
}

/// Signed offsets from the Unix epoch, so instants before 1970 serialize as well
mod epoch_time {
    use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const NANOS_PER_SEC: u32 = 1_000_000_000;

    /// `secs` is floored, `nanos` is always in `0..NANOS_PER_SEC`
    #[derive(Serialize, Deserialize)]
    struct EpochTime {
        secs: i64,
        nanos: u32,
    }

    pub fn serialize<S: Serializer>(
        value: &Option<SystemTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let epoch_time = match value {
            Some(time) => Some(to_epoch_time(*time).ok_or_else(|| {
                <S::Error as ser::Error>::custom("timestamp out of range for epoch offset")
            })?),
            None => None,
        };
        epoch_time.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SystemTime>, D::Error> {
        match Option::<EpochTime>::deserialize(deserializer)? {
            Some(epoch_time) => from_epoch_time(&epoch_time)
                .map(Some)
                .ok_or_else(|| de::Error::custom("epoch offset out of range for timestamp")),
            None => Ok(None),
        }
    }

    fn to_epoch_time(time: SystemTime) -> Option<EpochTime> {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Some(EpochTime {
                secs: i64::try_from(after.as_secs()).ok()?,
                nanos: after.subsec_nanos(),
            }),
            Err(err) => {
                let before = err.duration();
                let secs = i64::try_from(before.as_secs()).ok()?;
                if before.subsec_nanos() == 0 {
                    Some(EpochTime { secs: -secs, nanos: 0 })
                } else {
                    Some(EpochTime {
                        secs: secs.checked_neg()?.checked_sub(1)?,
                        nanos: NANOS_PER_SEC - before.subsec_nanos(),
                    })
                }
            }
        }
    }

    fn from_epoch_time(epoch_time: &EpochTime) -> Option<SystemTime> {
        if epoch_time.nanos >= NANOS_PER_SEC {
            return None;
        }
        let nanos = Duration::from_nanos(u64::from(epoch_time.nanos));
        let whole = Duration::from_secs(epoch_time.secs.unsigned_abs());
        if epoch_time.secs >= 0 {
            UNIX_EPOCH.checked_add(whole)?.checked_add(nanos)
        } else {
            UNIX_EPOCH.checked_sub(whole)?.checked_add(nanos)
        }
    }
}
