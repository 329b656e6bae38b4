// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! An ed25519 signature.

use core::fmt::Debug;

#[cfg(feature = "alloc")]
use alloc::string::String;

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::edwards::CompressedEdwardsY;
use crate::errors::InternalError;
use crate::errors::SignatureError;
use crate::scalar::Scalar;
use crate::SIGNATURE_LENGTH;

/// An ed25519 signature.
///
/// The wire format is the 64-byte concatenation `R ‖ s`, where `R` is
/// a compressed Edwards point and `s` a scalar in little-endian form.
///
/// # Note
///
/// These signatures, unlike the ed25519 signature reference
/// implementation, are "detached" — that is, they do **not** include a
/// copy of the message which has been signed.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is an `EdwardsPoint`, formed by hashing the nonce half of
    /// the expanded secret key together with the message, reducing the
    /// digest to a scalar `r`, and multiplying the basepoint by it.
    pub(crate) R: CompressedEdwardsY,

    /// `s ≡ r + H(R ‖ A ‖ M)·a (mod l)`, where `a` is the signing
    /// scalar.  Parsing enforces `s < l`.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s.as_bytes()[..]);
        signature_bytes
    }

    /// Encode this `Signature` as a 128-character lowercase hex string.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// # Scalar Malleability Checking
    ///
    /// The `s` half of the signature is required to be a canonical
    /// scalar, i.e. strictly below the group order \\( \ell \\); any
    /// other value is rejected here, before verification.  This is the
    /// strict check of RFC 8032 §5.1.7.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            }
            .into());
        }
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let s = Scalar::from_canonical_bytes(upper).ok_or(InternalError::ScalarFormatError)?;

        Ok(Signature {
            R: CompressedEdwardsY(lower),
            s,
        })
    }

    /// Construct a `Signature` from a 128-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Signature, SignatureError> {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        hex::decode_to_slice(hex_str, &mut bytes)
            .map_err(|_| InternalError::HexFormatError { name: "Signature" })?;
        Signature::from_bytes(&bytes)
    }

    /// Construct a `Signature` from its `(R, s)` components.
    pub fn from_components(R: CompressedEdwardsY, s: Scalar) -> Signature {
        Signature { R, s }
    }

    /// View the `(R, s)` components of this `Signature`.
    pub fn to_components(&self) -> (CompressedEdwardsY, Scalar) {
        (self.R, self.s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct SignatureVisitor;

        impl<'d> Visitor<'d> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 signature as 64 bytes, as specified in RFC8032.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Signature, E>
            where
                E: SerdeError,
            {
                Signature::from_bytes(bytes).map_err(SerdeError::custom)
            }
        }
        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    #[test]
    fn signature_byte_round_trip() {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(constants::ED25519_BASEPOINT_COMPRESSED.as_bytes());
        bytes[32] = 7;
        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.to_bytes(), bytes);

        let (R, s) = sig.to_components();
        assert_eq!(Signature::from_components(R, s), sig);
    }

    /// s components at or above the group order are rejected at parse
    /// time.
    #[test]
    fn signature_with_s_at_group_order_is_rejected() {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(constants::ED25519_BASEPOINT_COMPRESSED.as_bytes());
        bytes[32..].copy_from_slice(&constants::BASEPOINT_ORDER.bytes);
        assert!(Signature::from_bytes(&bytes).is_err());
    }

    /// The legacy "three high bits clear" check is not enough; a value
    /// between l and 2^253 must also be rejected.
    #[test]
    fn signature_with_s_above_group_order_is_rejected() {
        let mut s_bytes = constants::BASEPOINT_ORDER.bytes;
        s_bytes[0] += 1; // l + 1, still below 2^253
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(constants::ED25519_BASEPOINT_COMPRESSED.as_bytes());
        bytes[32..].copy_from_slice(&s_bytes);
        assert!(Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn signature_wrong_length_is_rejected() {
        assert!(Signature::from_bytes(&[0u8; 63]).is_err());
        assert!(Signature::from_bytes(&[0u8; 65]).is_err());
    }
}
