//! Strong-name public key tokens.

use crate::error::{DecodeErrorKind, OfflineError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Eight-byte identity derived from a code-signing public key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKeyToken([u8; PublicKeyToken::LEN]);

impl PublicKeyToken {
    /// Token length in bytes
    pub const LEN: usize = 8;

    /// Token of an unsigned assembly
    pub const EMPTY: Self = Self([0; Self::LEN]);

    #[must_use]
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl FromStr for PublicKeyToken {
    type Err = OfflineError;

    /// Parse sixteen hex digits, e.g. `b77a5c561934e089`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| {
            OfflineError::decode(
                "public key token",
                DecodeErrorKind::InvalidToken {
                    token: s.to_string(),
                    reason: reason.to_string(),
                },
            )
        };

        let hex = s.trim();
        if hex.len() != Self::LEN * 2 {
            return Err(invalid("expected 16 hex digits"));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("non-hex character"));
        }
        let mut bytes = [0_u8; Self::LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| invalid("non-hex character"))?;
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for PublicKeyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for PublicKeyToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKeyToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let token: PublicKeyToken = "B77A5C561934E089".parse().expect("valid token");
        assert_eq!(token.as_bytes()[0], 0xb7);
        assert_eq!(token.to_string(), "b77a5c561934e089");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!("b77a5c561934e0".parse::<PublicKeyToken>().is_err());
        assert!("zz7a5c561934e089".parse::<PublicKeyToken>().is_err());
        assert!("b77a5c561934e0é".parse::<PublicKeyToken>().is_err());
    }

    #[test]
    fn test_empty() {
        assert!(PublicKeyToken::EMPTY.is_empty());
        assert!(PublicKeyToken::default().is_empty());
    }
}
