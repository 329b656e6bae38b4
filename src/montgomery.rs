// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! The \\(u\\)-coordinate wire format of the Montgomery form of
//! Curve25519, \\( v\^2 = u\^3 + 486662 u\^2 + u \\).
//!
//! The birational map between the curve models sends an Edwards point
//! \\( (x, y) \\) to \\( u = (1+y)/(1-y) \\); the map forgets the sign
//! of \\( x \\), and is undefined at \\( y = 1 \\).  The projection is
//! exposed as [`crate::edwards::EdwardsPoint::to_montgomery`].
//!
//! No Montgomery-ladder key agreement is provided; this type exists
//! only as the image of the one-way projection.

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConstantTimeEq;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// The \\(u\\)-coordinate of a point on the Montgomery form of the
/// curve, as 32 little-endian bytes.
#[derive(Copy, Clone, Default, Eq, Hash)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MontgomeryPoint: {:?}", self.as_bytes())
    }
}

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl MontgomeryPoint {
    /// View this `MontgomeryPoint` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Encode this `MontgomeryPoint` as a 64-character lowercase hex
    /// string.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}
