// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! Errors which may occur when parsing keys, points, and signatures to or
//! from wire formats.

// rustc seems to think the typenames in match statements (e.g. in
// Display) should be snake cased, for some reason.
#![allow(non_snake_case)]

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum InternalError {
    /// A compressed point was not the canonical encoding of a curve point.
    PointDecompressionError,
    /// A scalar was out of range: either a signature `s` component at or
    /// above the group order, or a digest which could not be interpreted.
    ScalarFormatError,
    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type which is
    /// returning the error, and the `length` in bytes which its constructor
    /// expects.
    BytesLengthError {
        name: &'static str,
        length: usize,
    },
    /// A hex string contained non-hex characters or had the wrong length.
    HexFormatError {
        name: &'static str,
    },
    /// The Edwards point has `y = 1` and therefore no Montgomery
    /// u-coordinate.
    MontgomeryMapError,
    /// The public key is a point of small order, rejected by strict
    /// verification.
    SmallOrderKeyError,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::PointDecompressionError => {
                write!(f, "Cannot decompress Edwards point")
            }
            InternalError::ScalarFormatError => {
                write!(f, "Cannot use scalar at or above the group order")
            }
            InternalError::BytesLengthError { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::HexFormatError { name: n } => {
                write!(f, "{} hex string is malformed", n)
            }
            InternalError::MontgomeryMapError => {
                write!(f, "Point with y = 1 has no Montgomery u-coordinate")
            }
            InternalError::SmallOrderKeyError => {
                write!(f, "Public key is a point of small order")
            }
        }
    }
}

impl core::error::Error for InternalError {}

/// Errors which may occur while processing points, keys, and signatures.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing a curve point: the `R` component of a
///   `Signature`, the point of a `PublicKey`, or a Ristretto encoding.
///
/// * A problem with the format of `s`, a scalar, in the `Signature`: a value
///   at or above the group order is rejected outright.
///
/// * A hex string which could not be parsed.
///
/// Note that failure of a well-formed signature to satisfy the verification
/// equation is *not* an error: [`crate::PublicKey::verify`] resolves to
/// `Ok(false)` in that case.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SignatureError(pub(crate) InternalError);

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl core::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError(err)
    }
}
