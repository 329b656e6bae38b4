// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

#![no_std]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/fennec25519/0.1.0")]

//! # fennec25519
//!
//! A compact pure-Rust implementation of the Ed25519 signature scheme
//! (RFC 8032) and the Ristretto255 prime-order group, built on a
//! single serial implementation of the field
//! \\( \mathbb F\_{2\^{255} - 19} \\) and the twisted Edwards form of
//! Curve25519.
//!
//! The crate provides:
//!
//! * key derivation, signing, and verification
//!   ([`SecretKey`], [`PublicKey`], [`Keypair`], [`Signature`]);
//! * the underlying group: [`edwards::EdwardsPoint`] with compressed
//!   (de)serialization, addition, subtraction, negation, and
//!   variable-time scalar multiplication;
//! * [`ristretto::RistrettoPoint`], a prime-order quotient group with
//!   a canonical 32-byte encoding;
//! * [`scalar::Scalar`] arithmetic modulo the group order;
//! * a one-way projection to the Montgomery \\(u\\)-coordinate
//!   ([`montgomery::MontgomeryPoint`]).
//!
//! All inputs are accepted as raw bytes or as hex strings, and the
//! seed additionally as an unsigned integer; outputs are available in
//! the matching forms (`to_bytes` / `to_hex`).
//!
//! ## Example
//!
//! ```
//! use fennec25519::{Keypair, PublicKey, SecretKey, Signature};
//!
//! let secret = SecretKey::from_hex(
//!     "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
//! )
//! .unwrap();
//! let keypair = Keypair::from_secret(secret);
//!
//! let message: &[u8] = b"All I want is to pet all of the dogs.";
//! let signature: Signature = keypair.sign(message);
//!
//! assert_eq!(keypair.verify(message, &signature), Ok(true));
//!
//! // Verification with a standalone public key parsed from bytes:
//! let public = PublicKey::from_bytes(keypair.public.as_bytes()).unwrap();
//! assert_eq!(public.verify(message, &signature), Ok(true));
//! ```
//!
//! ## A note on timing
//!
//! Scalar multiplication branches on the bits of the scalar and the
//! limb arithmetic is not hardened against side channels beyond
//! branchless selection of field elements.  This crate is intended
//! for settings where the running time of signing may be observed by
//! an attacker only through the network; see the `edwards` module
//! documentation.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod macros;

pub mod constants;
pub mod edwards;
pub mod errors;
pub mod montgomery;
pub mod ristretto;
pub mod scalar;
pub mod traits;

mod curve_models;
mod field;

mod keypair;
mod public;
mod secret;
mod signature;

pub use crate::errors::SignatureError;
pub use crate::keypair::Keypair;
pub use crate::public::PublicKey;
pub use crate::secret::SecretKey;
pub use crate::signature::Signature;

pub use sha2::Sha512;

/// The length of an ed25519 seed (`SecretKey`), in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an ed25519 `PublicKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an ed25519 `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// The length of an ed25519 `Keypair`, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;
