// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! ed25519 keypairs.

use core::fmt::Debug;

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::InternalError;
use crate::errors::SignatureError;
use crate::public::PublicKey;
use crate::secret::ExpandedSecretKey;
use crate::secret::SecretKey;
use crate::signature::Signature;
use crate::{KEYPAIR_LENGTH, SECRET_KEY_LENGTH};

/// An ed25519 keypair.
#[derive(Debug)]
pub struct Keypair {
    /// The secret half of this keypair.
    pub secret: SecretKey,
    /// The public half of this keypair.
    pub public: PublicKey,
}

impl Keypair {
    /// Convert this keypair to bytes.
    ///
    /// # Returns
    ///
    /// An array of bytes, `[u8; KEYPAIR_LENGTH]`.  The first
    /// `SECRET_KEY_LENGTH` of bytes is the `SecretKey`, and the next
    /// `PUBLIC_KEY_LENGTH` bytes is the `PublicKey`.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes: [u8; KEYPAIR_LENGTH] = [0u8; KEYPAIR_LENGTH];

        bytes[..SECRET_KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        bytes
    }

    /// Construct a `Keypair` from the bytes of a `PublicKey` and
    /// `SecretKey`.
    ///
    /// # Warning
    ///
    /// The public half is checked to be a decodable curve point, but
    /// *not* to correspond to the secret half; if you give this
    /// function bytes which do not represent corresponding parts of a
    /// keypair, your `Keypair` will be broken and it will be your
    /// fault.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, SignatureError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "Keypair",
                length: KEYPAIR_LENGTH,
            }
            .into());
        }
        let secret = SecretKey::from_bytes(&bytes[..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;

        Ok(Keypair { secret, public })
    }

    /// Construct a `Keypair` from a `SecretKey`, deriving the public
    /// half.
    pub fn from_secret(secret: SecretKey) -> Keypair {
        let public = PublicKey::from(&secret);
        Keypair { secret, public }
    }

    /// Generate an ed25519 keypair.
    ///
    /// # Input
    ///
    /// A CSPRNG with a `fill_bytes()` method, e.g. `rand::rngs::OsRng`.
    #[cfg(feature = "rand_core")]
    pub fn generate<R>(csprng: &mut R) -> Keypair
    where
        R: CryptoRng + RngCore,
    {
        let secret: SecretKey = SecretKey::generate(csprng);
        let public: PublicKey = (&secret).into();

        Keypair { secret, public }
    }

    /// Sign a message with this keypair's secret key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded: ExpandedSecretKey = (&self.secret).into();

        expanded.sign(message, &self.public)
    }

    /// Verify a signature on a message with this keypair's public key.
    ///
    /// See [`PublicKey::verify`] for the result convention.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool, SignatureError> {
        self.public.verify(message, signature)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Keypair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Keypair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct KeypairVisitor;

        impl<'d> Visitor<'d> for KeypairVisitor {
            type Value = Keypair;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str(
                    "An ed25519 keypair, 64 bytes in total, where the secret key is \
                     the first 32 bytes and is in unexpanded form, and the second \
                     32 bytes is a compressed point for a public key.",
                )
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Keypair, E>
            where
                E: SerdeError,
            {
                Keypair::from_bytes(bytes).map_err(SerdeError::custom)
            }
        }
        deserializer.deserialize_bytes(KeypairVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keypair_round_trips_through_bytes() {
        let keypair = Keypair::from_secret(SecretKey::from(99u64));
        let bytes = keypair.to_bytes();
        let parsed = Keypair::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.public, keypair.public);
        assert_eq!(parsed.secret.as_bytes(), keypair.secret.as_bytes());
    }

    #[test]
    fn sign_and_verify() {
        let keypair = Keypair::from_secret(SecretKey::from(0xfeedfaceu64));
        let msg = b"test message";
        let sig = keypair.sign(msg);
        assert_eq!(keypair.verify(msg, &sig), Ok(true));
        assert_eq!(keypair.verify(b"wrong message", &sig), Ok(false));
    }
}
