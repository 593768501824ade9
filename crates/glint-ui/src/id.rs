//! Control identity: stable 64-bit keys naming one persistent control
//! across frames.
//!
//! Identities are derived deterministically from the label text, the control
//! kind, and an optional disambiguating scope string (usually the parent
//! window label), so the same widget call resolves to the same record on
//! every frame of a run. Collisions are not handled; the first writer wins.

use std::fmt;

use crate::control::ControlKind;

/// A stable identifier for one control, persisting across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    /// The absent/root sentinel. No real control ever hashes to this.
    pub const NONE: Self = Self(0);

    /// Derive an identity from a label, a control kind, and an optional
    /// scope string.
    ///
    /// Uses FNV-1a for fast, consistent hashing.
    pub fn new(label: &str, kind: ControlKind, scope: &str) -> Self {
        let mut hash = Self::fnv1a(FNV_OFFSET_BASIS, label.as_bytes());
        hash = Self::fnv1a(hash, &[kind as u8]);
        hash = Self::fnv1a(hash, scope.as_bytes());
        // Reserve 0 for the sentinel.
        if hash == 0 {
            hash = FNV_PRIME;
        }
        Self(hash)
    }

    /// Create an identity from a raw u64 (for generated ids).
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this is the absent sentinel.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Whether this names a real control.
    pub const fn is_some(&self) -> bool {
        self.0 != 0
    }

    fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
        for byte in bytes {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControlId(0x{:016x})", self.0)
    }
}

impl Default for ControlId {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_identical_identity() {
        let a = ControlId::new("OK", ControlKind::Button, "Settings");
        let b = ControlId::new("OK", ControlKind::Button, "Settings");
        assert_eq!(a, b);
    }

    #[test]
    fn kind_and_scope_disambiguate() {
        let a = ControlId::new("OK", ControlKind::Button, "Settings");
        let b = ControlId::new("OK", ControlKind::Label, "Settings");
        let c = ControlId::new("OK", ControlKind::Button, "About");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sentinel_is_never_produced() {
        let id = ControlId::new("", ControlKind::Window, "");
        assert!(id.is_some());
    }
}
