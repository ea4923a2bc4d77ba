use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

pub mod diagnostics;
pub mod functions;
pub mod provider;
pub mod type_compatibility;
pub mod types;

#[cfg(test)]
mod tests;

pub const FINGERPRINT_SIZE: usize = 32;

/// A SHA-256 digest used as an exact-match identity or content fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Fingerprint(pub [u8; FINGERPRINT_SIZE]);

impl Fingerprint {
    /// Hashes the components in order, without any framing between them.
    pub fn from_components(comps: Vec<impl AsRef<[u8]>>) -> Self {
        let mut hasher = Sha256::new();
        for comp in comps {
            hasher.update(comp);
        }
        let hash = hasher.finalize();
        Fingerprint(hash.into())
    }

    pub fn from_hex_string(source_bytes_str: &str) -> Result<Self, String> {
        let stripped = source_bytes_str.strip_prefix("0x").unwrap_or(source_bytes_str);
        let bytes = hex::decode(stripped)
            .map_err(|e| format!("invalid fingerprint '{}': {}", source_bytes_str, e))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(source_bytes: &[u8]) -> Result<Self, String> {
        let bytes: [u8; FINGERPRINT_SIZE] = source_bytes.try_into().map_err(|_| {
            format!(
                "invalid fingerprint length: expected {} bytes, got {}",
                FINGERPRINT_SIZE,
                source_bytes.len()
            )
        })?;
        Ok(Fingerprint(bytes))
    }

    pub fn zero() -> Self {
        Self([0u8; FINGERPRINT_SIZE])
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Fingerprint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes_hex: String = serde::Deserialize::deserialize(deserializer)?;
        Fingerprint::from_hex_string(&bytes_hex).map_err(D::Error::custom)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}
