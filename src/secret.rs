// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! ed25519 secret key types.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::edwards::CompressedEdwardsY;
use crate::edwards::EdwardsPoint;
use crate::errors::InternalError;
use crate::errors::SignatureError;
use crate::public::PublicKey;
use crate::scalar::clamp_integer;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::SECRET_KEY_LENGTH;

/// An EdDSA secret key, i.e. the 32-byte seed from which the signing
/// scalar and nonce prefix are derived.
///
/// Instances of this secret are automatically overwritten with zeroes
/// when they fall out of scope.
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

#[cfg(feature = "zeroize")]
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretKey: {:?}", &self.0[..])
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Clone for SecretKey {
    fn clone(&self) -> SecretKey {
        SecretKey(self.0)
    }
}

impl SecretKey {
    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Construct a `SecretKey` from a slice of bytes.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `SecretKey` or whose
    /// error value is a `SignatureError` wrapping the internal error
    /// that occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, SignatureError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "SecretKey",
                length: SECRET_KEY_LENGTH,
            }
            .into());
        }
        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(&bytes[..32]);

        Ok(SecretKey(bits))
    }

    /// Construct a `SecretKey` from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<SecretKey, SignatureError> {
        let mut bits = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bits)
            .map_err(|_| InternalError::HexFormatError { name: "SecretKey" })?;
        Ok(SecretKey(bits))
    }

    /// Generate a `SecretKey` from a cryptographically secure RNG.
    #[cfg(feature = "rand_core")]
    pub fn generate<T>(csprng: &mut T) -> SecretKey
    where
        T: CryptoRng + RngCore,
    {
        let mut sk: SecretKey = SecretKey([0u8; 32]);

        csprng.fill_bytes(&mut sk.0);

        sk
    }
}

// A seed supplied as an unsigned integer is serialized little-endian
// and zero-padded to 32 bytes.  (Wider integers than 32 bytes are not
// representable, so the out-of-range case cannot arise.)
macro_rules! impl_secret_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SecretKey {
                fn from(x: $t) -> SecretKey {
                    let mut bits = [0u8; 32];
                    let x_bytes = x.to_le_bytes();
                    bits[..x_bytes.len()].copy_from_slice(&x_bytes);
                    SecretKey(bits)
                }
            }
        )*
    }
}

impl_secret_from_uint! { u8, u16, u32, u64, u128 }

#[cfg(feature = "serde")]
impl Serialize for SecretKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for SecretKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct SecretKeyVisitor;

        impl<'d> Visitor<'d> for SecretKeyVisitor {
            type Value = SecretKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 secret key as 32 bytes.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<SecretKey, E>
            where
                E: SerdeError,
            {
                SecretKey::from_bytes(bytes).map_err(SerdeError::custom)
            }
        }
        deserializer.deserialize_bytes(SecretKeyVisitor)
    }
}

/// An "expanded" secret key: the clamped signing scalar together with
/// the 32-byte "prefix" used to derive the deterministic nonce.
///
/// This is produced by hashing the seed with SHA-512 and splitting the
/// 64-byte digest in half: the lower half is clamped and reduced to
/// the signing scalar, the upper half becomes the nonce prefix.
///
/// Instances of this secret are automatically overwritten with zeroes
/// when they fall out of scope.
pub(crate) struct ExpandedSecretKey {
    pub(crate) key: Scalar,
    pub(crate) nonce: [u8; 32],
}

#[cfg(feature = "zeroize")]
impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.nonce.zeroize()
    }
}

impl<'a> From<&'a SecretKey> for ExpandedSecretKey {
    /// Construct an `ExpandedSecretKey` from a `SecretKey`.
    fn from(secret_key: &'a SecretKey) -> ExpandedSecretKey {
        let mut h: Sha512 = Sha512::default();
        let mut hash: [u8; 64] = [0u8; 64];
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        h.update(secret_key.as_bytes());
        hash.copy_from_slice(h.finalize().as_slice());

        lower.copy_from_slice(&hash[00..32]);
        upper.copy_from_slice(&hash[32..64]);

        // Clamp the lower half and reduce it into the scalar ring; the
        // reduced value generates the same multiple of the basepoint.
        ExpandedSecretKey {
            key: Scalar::from_bytes_mod_order(clamp_integer(lower)),
            nonce: upper,
        }
    }
}

impl ExpandedSecretKey {
    /// Sign a message with this `ExpandedSecretKey`.
    #[allow(non_snake_case)]
    pub(crate) fn sign(&self, message: &[u8], public_key: &PublicKey) -> Signature {
        let mut h: Sha512 = Sha512::new();

        h.update(self.nonce);
        h.update(message);

        let r = Scalar::from_hash(h);
        let R: CompressedEdwardsY = EdwardsPoint::mul_base(&r).compress();

        h = Sha512::new();
        h.update(R.as_bytes());
        h.update(public_key.as_bytes());
        h.update(message);

        let k = Scalar::from_hash(h);
        let s: Scalar = &(&k * &self.key) + &r;

        Signature { R, s }
    }

    /// Derive the public key that corresponds to this expanded key.
    pub(crate) fn public_key(&self) -> PublicKey {
        let point = EdwardsPoint::mul_base(&self.key);
        PublicKey(point.compress(), point)
    }
}
