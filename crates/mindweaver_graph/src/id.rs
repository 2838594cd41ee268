// SPDX-License-Identifier: MIT OR Apache-2.0
//! Globally unique identifiers for graph elements.
//!
//! Every node, pin and link is addressed by a 128-bit random [`Identifier`].
//! Widget layers that only understand small integers get a derived 32-bit
//! projection through [`Identifier::to_widget_int`]; that projection is an
//! interop aid and never a model-level key.

use std::fmt;
use uuid::Uuid;

/// FNV-1a 32-bit offset basis
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
/// FNV-1a 32-bit prime
const FNV_PRIME: u32 = 0x0100_0193;

/// A 128-bit random identifier (RFC 4122 version 4).
///
/// Equality and ordering are byte-wise, so identifiers can key both hashed
/// and sorted containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap raw bytes
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Raw bytes of the identifier
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Integer projection for widget layers that address items by `i32`.
    ///
    /// FNV-1a over the canonical hyphenated string, so the value is stable
    /// across runs and platforms. Distinct identifiers may collide here.
    pub fn to_widget_int(&self) -> i32 {
        let mut buf = Uuid::encode_buffer();
        let canonical = self.0.hyphenated().encode_lower(&mut buf);
        let hash = canonical.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        });
        hash as i32
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Declares a typed identifier wrapping [`Identifier`].
macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub Identifier);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Identifier::generate())
            }

            /// The underlying identifier
            pub fn identifier(&self) -> Identifier {
                self.0
            }

            /// Integer projection for the widget layer
            pub fn to_widget_int(&self) -> i32 {
                self.0.to_widget_int()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Identifier> for $name {
            fn from(id: Identifier) -> Self {
                Self(id)
            }
        }
    };
}

typed_id!(
    /// Unique identifier for a node
    NodeId
);
typed_id!(
    /// Unique identifier for a pin
    PinId
);
typed_id!(
    /// Unique identifier for a link
    LinkId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_identifiers_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| Identifier::generate().to_string()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_canonical_form() {
        let id = Identifier::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        for (i, c) in text.chars().enumerate() {
            if matches!(i, 8 | 13 | 18 | 23) {
                assert_eq!(c, '-');
            } else {
                assert!(c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn test_version_and_variant_bits() {
        let bytes = *Identifier::generate().as_bytes();
        assert_eq!(bytes[6] & 0xF0, 0x40);
        assert_eq!(bytes[8] & 0xC0, 0x80);
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let mut low = [0u8; 16];
        let mut high = [0u8; 16];
        low[15] = 1;
        high[0] = 1;
        assert!(Identifier::from_bytes(low) < Identifier::from_bytes(high));
        assert_eq!(Identifier::from_bytes(low), Identifier::from_bytes(low));
    }

    #[test]
    fn test_widget_int_is_deterministic() {
        let id = Identifier::from_bytes([0xAB; 16]);
        assert_eq!(id.to_widget_int(), Identifier::from_bytes([0xAB; 16]).to_widget_int());

        // FNV-1a of the empty-uuid canonical string, computed independently
        let nil = Identifier::from_bytes([0; 16]);
        let expected = "00000000-0000-0000-0000-000000000000"
            .bytes()
            .fold(0x811c_9dc5u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
        assert_eq!(nil.to_widget_int(), expected as i32);
    }

    #[test]
    fn test_typed_ids_display_like_identifier() {
        let node = NodeId::new();
        assert_eq!(node.to_string(), node.identifier().to_string());
        assert_eq!(node.to_widget_int(), node.identifier().to_widget_int());
    }
}
