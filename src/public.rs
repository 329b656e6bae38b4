// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! ed25519 public keys and signature verification.

use core::fmt::Debug;

#[cfg(feature = "alloc")]
use alloc::string::String;

use sha2::{Digest, Sha512};

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::edwards::CompressedEdwardsY;
use crate::edwards::EdwardsPoint;
use crate::errors::InternalError;
use crate::errors::SignatureError;
use crate::scalar::Scalar;
use crate::secret::ExpandedSecretKey;
use crate::secret::SecretKey;
use crate::signature::Signature;
use crate::PUBLIC_KEY_LENGTH;

/// An ed25519 public key.
///
/// Holds both the compressed wire form and the decompressed point, so
/// that construction performs (and caches) the strict decoding once.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct PublicKey(pub(crate) CompressedEdwardsY, pub(crate) EdwardsPoint);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({:?}), {:?})", self.0, self.1)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &(self.0).0
    }

    /// Encode this public key as a 64-character lowercase hex string.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// View the point of this public key.
    pub fn point(&self) -> &EdwardsPoint {
        &self.1
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// The encoding is checked strictly: the length must be 32, the
    /// \\(y\\)-coordinate canonical, and the point on the curve.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `PublicKey` or whose
    /// error value is a `SignatureError` describing the error that
    /// occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "PublicKey",
                length: PUBLIC_KEY_LENGTH,
            }
            .into());
        }
        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(&bytes[..32]);

        let compressed = CompressedEdwardsY(bits);
        let point = compressed
            .decompress()
            .ok_or(InternalError::PointDecompressionError)?;

        Ok(PublicKey(compressed, point))
    }

    /// Construct a `PublicKey` from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<PublicKey, SignatureError> {
        let mut bits = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bits)
            .map_err(|_| InternalError::HexFormatError { name: "PublicKey" })?;
        PublicKey::from_bytes(&bits)
    }

    /// Verify a signature on a message with this public key.
    ///
    /// # Return
    ///
    /// * `Ok(true)` if the signature is valid;
    /// * `Ok(false)` if the signature is well-formed but does not
    ///   satisfy the verification equation \\( [s]B = R + [k]A \\);
    /// * `Err(_)` if the signature's `R` component is not the
    ///   canonical encoding of a curve point (i.e. the input is
    ///   malformed, as opposed to merely wrong).
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool, SignatureError> {
        // Decode failures indicate malformed input and are surfaced as
        // errors; an unsatisfied equation is an ordinary `false`.
        let R = signature
            .R
            .decompress()
            .ok_or(InternalError::PointDecompressionError)?;

        let mut h: Sha512 = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        // [s]B == R + [k]A  rearranged as  [k](-A) + [s]B == R.
        let minus_A: EdwardsPoint = -self.1;
        let R_prime = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &signature.s);

        Ok(R_prime == R)
    }

    /// Strictly verify a signature on a message with this public key,
    /// additionally rejecting public keys and `R` values of small
    /// order.
    ///
    /// Such keys admit signatures which verify for more than one
    /// message; applications that require strong unforgeability (e.g.
    /// consensus systems) should use this variant.
    ///
    /// # Return
    ///
    /// As [`PublicKey::verify`], with an additional error case for
    /// small-order inputs.
    #[allow(non_snake_case)]
    pub fn verify_strict(
        &self,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool, SignatureError> {
        let R = signature
            .R
            .decompress()
            .ok_or(InternalError::PointDecompressionError)?;

        if self.1.is_small_order() || R.is_small_order() {
            return Err(InternalError::SmallOrderKeyError.into());
        }

        let mut h: Sha512 = Sha512::new();
        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        let minus_A: EdwardsPoint = -self.1;
        let R_prime = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &signature.s);

        Ok(R_prime == R)
    }
}

impl<'a> From<&'a SecretKey> for PublicKey {
    /// Derive this public key from its corresponding `SecretKey`: hash
    /// the seed, clamp the lower half of the digest, and multiply the
    /// basepoint by the resulting scalar.
    fn from(secret_key: &SecretKey) -> PublicKey {
        let expanded: ExpandedSecretKey = secret_key.into();
        expanded.public_key()
    }
}

impl From<EdwardsPoint> for PublicKey {
    /// Wrap an already-decoded point as a public key.
    fn from(point: EdwardsPoint) -> PublicKey {
        PublicKey(point.compress(), point)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct PublicKeyVisitor;

        impl<'d> Visitor<'d> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str(
                    "An ed25519 public key as a 32-byte compressed point, as specified in RFC8032",
                )
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<PublicKey, E>
            where
                E: SerdeError,
            {
                PublicKey::from_bytes(bytes).map_err(SerdeError::custom)
            }
        }
        deserializer.deserialize_bytes(PublicKeyVisitor)
    }
}
