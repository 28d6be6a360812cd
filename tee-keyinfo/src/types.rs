//! Key property vocabularies shared by key stores and descriptor consumers

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a key came to exist in the key store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyOrigin {
    /// Generated inside the key store
    Generated,

    /// Imported into the key store
    Imported,

    /// Origin could not be determined, typically a key created by an older
    /// key store implementation
    Unknown,

    /// Imported under a secure wrapping key so that the plaintext never left
    /// secure hardware
    SecurelyImported,
}

impl KeyOrigin {
    /// Raw origin code as reported by the key store
    pub fn as_raw(self) -> u32 {
        match self {
            KeyOrigin::Generated => 1,
            KeyOrigin::Imported => 2,
            KeyOrigin::Unknown => 4,
            KeyOrigin::SecurelyImported => 8,
        }
    }

    /// Maps a raw origin code back to its variant, `None` for codes outside
    /// the known set
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(KeyOrigin::Generated),
            2 => Some(KeyOrigin::Imported),
            4 => Some(KeyOrigin::Unknown),
            8 => Some(KeyOrigin::SecurelyImported),
            _ => None,
        }
    }
}

impl fmt::Display for KeyOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyOrigin::Generated => "generated",
            KeyOrigin::Imported => "imported",
            KeyOrigin::Unknown => "unknown",
            KeyOrigin::SecurelyImported => "securely-imported",
        };
        f.write_str(name)
    }
}

bitflags::bitflags! {
    /// Operations a key is authorized for.
    ///
    /// Bit values match the key store's purpose codes. Bits outside the named
    /// flags are kept as-is when built with [`KeyPurpose::from_bits_retain`].
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KeyPurpose: u32 {
        const ENCRYPT = 1 << 0;
        const DECRYPT = 1 << 1;
        const SIGN = 1 << 2;
        const VERIFY = 1 << 3;
        const WRAP_KEY = 1 << 5;
        const AGREE_KEY = 1 << 6;
        const ATTEST_KEY = 1 << 7;
    }
}

impl KeyPurpose {
    /// Returns whether the key can be used for encryption.
    pub fn can_encrypt(&self) -> bool {
        self.contains(KeyPurpose::ENCRYPT)
    }

    /// Returns whether the key can be used for decryption.
    pub fn can_decrypt(&self) -> bool {
        self.contains(KeyPurpose::DECRYPT)
    }

    /// Returns whether the key can be used for signing.
    pub fn can_sign(&self) -> bool {
        self.contains(KeyPurpose::SIGN)
    }

    /// Returns whether the key can be used for verification.
    pub fn can_verify(&self) -> bool {
        self.contains(KeyPurpose::VERIFY)
    }

    /// Returns whether the key can wrap other keys for secure import.
    pub fn can_wrap_key(&self) -> bool {
        self.contains(KeyPurpose::WRAP_KEY)
    }

    /// Returns whether the key can be used for key agreement.
    pub fn can_agree_key(&self) -> bool {
        self.contains(KeyPurpose::AGREE_KEY)
    }

    /// Returns whether the key can sign attestations for other keys.
    pub fn can_attest_key(&self) -> bool {
        self.contains(KeyPurpose::ATTEST_KEY)
    }
}

/// Padding schemes for encryption and decryption
pub mod encryption_padding {
    pub const NONE: &str = "NoPadding";
    pub const PKCS7: &str = "PKCS7Padding";
    pub const RSA_PKCS1: &str = "PKCS1Padding";
    pub const RSA_OAEP: &str = "OAEPPadding";

    pub const ALL: &[&str] = &[NONE, PKCS7, RSA_PKCS1, RSA_OAEP];
}

/// Padding schemes for signing and verification
pub mod signature_padding {
    pub const RSA_PKCS1: &str = "PKCS1";
    pub const RSA_PSS: &str = "PSS";

    pub const ALL: &[&str] = &[RSA_PKCS1, RSA_PSS];
}

/// Digest algorithms
pub mod digest {
    pub const NONE: &str = "NONE";
    pub const MD5: &str = "MD5";
    pub const SHA1: &str = "SHA-1";
    pub const SHA224: &str = "SHA-224";
    pub const SHA256: &str = "SHA-256";
    pub const SHA384: &str = "SHA-384";
    pub const SHA512: &str = "SHA-512";

    pub const ALL: &[&str] = &[NONE, MD5, SHA1, SHA224, SHA256, SHA384, SHA512];
}

/// Block modes for symmetric ciphers
pub mod block_mode {
    pub const ECB: &str = "ECB";
    pub const CBC: &str = "CBC";
    pub const CTR: &str = "CTR";
    pub const GCM: &str = "GCM";

    pub const ALL: &[&str] = &[ECB, CBC, CTR, GCM];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_raw_codes() {
        for origin in [
            KeyOrigin::Generated,
            KeyOrigin::Imported,
            KeyOrigin::Unknown,
            KeyOrigin::SecurelyImported,
        ] {
            assert_eq!(KeyOrigin::from_raw(origin.as_raw()), Some(origin));
        }

        assert_eq!(KeyOrigin::Generated.as_raw(), 1);
        assert_eq!(KeyOrigin::SecurelyImported.as_raw(), 8);
        assert_eq!(KeyOrigin::from_raw(0), None);
        assert_eq!(KeyOrigin::from_raw(3), None);
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(KeyOrigin::Generated.to_string(), "generated");
        assert_eq!(KeyOrigin::SecurelyImported.to_string(), "securely-imported");
    }

    #[test]
    fn test_purpose_bits() {
        assert_eq!(KeyPurpose::ENCRYPT.bits(), 1);
        assert_eq!(KeyPurpose::DECRYPT.bits(), 2);
        assert_eq!(KeyPurpose::SIGN.bits(), 4);
        assert_eq!(KeyPurpose::VERIFY.bits(), 8);
        assert_eq!(KeyPurpose::WRAP_KEY.bits(), 32);
        assert_eq!(KeyPurpose::AGREE_KEY.bits(), 64);
        assert_eq!(KeyPurpose::ATTEST_KEY.bits(), 128);
    }

    #[test]
    fn test_purpose_predicates() {
        let purposes = KeyPurpose::SIGN | KeyPurpose::VERIFY;
        assert!(purposes.can_sign());
        assert!(purposes.can_verify());
        assert!(!purposes.can_encrypt());
        assert!(!purposes.can_attest_key());
        assert!(KeyPurpose::empty().is_empty());
    }

    #[test]
    fn test_purpose_retains_unknown_bits() {
        let purposes = KeyPurpose::from_bits_retain(0x100 | 0x1);
        assert_eq!(purposes.bits(), 0x101);
        assert!(purposes.can_encrypt());
        assert_eq!(KeyPurpose::from_bits(0x100), None);
    }

    #[test]
    fn test_token_vocabularies() {
        assert!(encryption_padding::ALL.contains(&"PKCS7Padding"));
        assert!(signature_padding::ALL.contains(&"PSS"));
        assert!(digest::ALL.contains(&"SHA-256"));
        assert_eq!(block_mode::ALL, &["ECB", "CBC", "CTR", "GCM"]);
    }
}
