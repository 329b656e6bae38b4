// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.  Yeah, you heard me, rustc, I'm gonna have my
// affine and projective cakes and eat both of them too.
#![allow(non_snake_case)]

//! An implementation of Ristretto, which provides a prime-order group.
//!
//! Ristretto is a modification of Mike Hamburg's Decaf scheme to work
//! with cofactor-8 curves, such as Curve25519.  Rather than requiring
//! a protocol to handle the cofactor, it implements a prime-order
//! group as the quotient of the curve group by its 8-torsion subgroup,
//! together with a canonical encoding of each equivalence class.
//!
//! Internally, each coset is represented by a curve point; two points
//! may represent the same coset in the same way that two points with
//! different \\(X, Y, Z\\) coordinates may represent the same point.
//! The group operations are carried out with no overhead using the
//! Edwards formulas, and only the encoding, decoding, and equality
//! functions know about the quotient:
//!
//! 1. equality checking treats two representatives of the same coset
//!    as equal (and can be done in projective coordinates, without an
//!    inversion, so it is *faster* than Edwards equality);
//! 2. encoding produces identical bitstrings for representatives of
//!    the same coset;
//! 3. decoding accepts only the canonical encoding of a coset.
//!
//! The encoding and decoding routines below follow the published
//! Ristretto255 field-operation sequence byte for byte, so encodings
//! interoperate.

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Neg, Sub, SubAssign};

#[cfg(feature = "alloc")]
use alloc::string::String;

use digest::generic_array::typenum::U64;
use digest::Digest;

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::CompletedPoint;
use crate::edwards::EdwardsPoint;
use crate::errors::InternalError;
use crate::errors::SignatureError;
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::Identity;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// A Ristretto point, in compressed wire format.
///
/// The Ristretto encoding is canonical, so two points are equal if and
/// only if their encodings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedRistretto(pub [u8; 32]);

impl CompressedRistretto {
    /// Copy the bytes of this `CompressedRistretto`.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// View this `CompressedRistretto` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Construct a `CompressedRistretto` from a slice of bytes.
    ///
    /// Fails if the input is not 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedRistretto, SignatureError> {
        if bytes.len() != 32 {
            return Err(InternalError::BytesLengthError {
                name: "CompressedRistretto",
                length: 32,
            }
            .into());
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(CompressedRistretto(arr))
    }

    /// Construct a `CompressedRistretto` from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<CompressedRistretto, SignatureError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|_| InternalError::HexFormatError {
            name: "CompressedRistretto",
        })?;
        Ok(CompressedRistretto(bytes))
    }

    /// Encode this point to a 64-character lowercase hex string.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Attempt to decompress to a `RistrettoPoint`.
    ///
    /// # Return
    ///
    /// - `Some(RistrettoPoint)` if `self` was the canonical encoding of a point;
    ///
    /// - `None` if `self` was not the canonical encoding of a point.
    pub fn decompress(&self) -> Option<RistrettoPoint> {
        // Step 1. Check s for validity:
        // 1.a) s must be 32 bytes (we get this from the type system)
        // 1.b) s < p
        // 1.c) s is nonnegative
        //
        // Our decoding routine ignores the high bit, so the only
        // possible failure for 1.b) is if someone encodes s in 0..18
        // as s+p in 2^255-19..2^255-1.  We can check this by
        // converting back to bytes, and checking that we get the
        // original input, since our encoding routine is canonical.
        let s = FieldElement::from_bytes(self.as_bytes());
        let s_bytes_check = s.to_bytes();
        let s_encoding_is_canonical = s_bytes_check[..].ct_eq(self.as_bytes());
        let s_is_negative = s.is_negative();

        if (!bool::from(s_encoding_is_canonical)) || bool::from(s_is_negative) {
            return None;
        }

        // Step 2. Compute (X:Y:Z:T).
        let one = FieldElement::ONE;
        let ss = s.square();
        let u1 = &one - &ss; //  1 + as², with a = -1
        let u2 = &one + &ss; //  1 - as²
        let u2_sqr = u2.square();

        // v == ad(1+as²)² - (1-as²)²
        let v = &(&(-&constants::EDWARDS_D) * &u1.square()) - &u2_sqr;

        let (ok, I) = (&v * &u2_sqr).invsqrt(); // 1/sqrt(v*u_2²)

        let Dx = &I * &u2; // 1/sqrt(v)
        let Dy = &I * &(&Dx * &v); // 1/u2

        // x == | 2s/sqrt(v) | == + sqrt(4s²/(ad(1+as²)² - (1-as²)²))
        let mut x = &(&s + &s) * &Dx;
        let x_neg = x.is_negative();
        x.conditional_negate(x_neg);

        // y == (1-as²)/(1+as²)
        let y = &u1 * &Dy;

        // t == ((1+as²) sqrt(4s²/(ad(1+as²)² - (1-as²)²)))/(1-as²)
        let t = &x * &y;

        if (!bool::from(ok)) || bool::from(t.is_negative()) || bool::from(y.is_zero()) {
            None
        } else {
            Some(RistrettoPoint(EdwardsPoint {
                X: x,
                Y: y,
                Z: one,
                T: t,
            }))
        }
    }
}

impl Identity for CompressedRistretto {
    fn identity() -> CompressedRistretto {
        CompressedRistretto([0u8; 32])
    }
}

impl Debug for CompressedRistretto {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedRistretto: {:?}", self.as_bytes())
    }
}

// ------------------------------------------------------------------------
// Internal point representation
// ------------------------------------------------------------------------

/// A `RistrettoPoint` represents a point in the Ristretto group for
/// Curve25519, a prime-order group of order
/// \\( \ell = 2\^{252} + \cdots \\).
///
/// Internally, a `RistrettoPoint` is implemented as a wrapper type
/// around `EdwardsPoint`, with custom equality, compression, and
/// decompression routines to account for the quotient.  This means
/// that operations on `RistrettoPoint`s are exactly as fast as
/// operations on `EdwardsPoint`s.
#[derive(Copy, Clone)]
pub struct RistrettoPoint(pub(crate) EdwardsPoint);

impl RistrettoPoint {
    /// Compress this point using the Ristretto encoding.
    ///
    /// The encoding of the canonical coset representative \\((x, y)\\)
    /// is the byte string of \\( s = (Z - Y)/\sqrt{Z\^2 - Y\^2} \\).
    /// Selecting that representative needs the affine coordinates, and
    /// computing \\(s\\) needs an inverse square root, so both are
    /// batched through a single `invsqrt` call.
    pub fn compress(&self) -> CompressedRistretto {
        let mut X = self.0.X;
        let mut Y = self.0.Y;
        let Z = &self.0.Z;
        let T = &self.0.T;

        let u1 = &(Z + &Y) * &(Z - &Y); // Z² - Y²
        let u2 = &X * &Y; // X·Y = T·Z

        // u1·u2² is always square (zero on the identity coset, where
        // the whole computation degenerates to s = 0), so the validity
        // bit can be dropped.
        let (_, I) = (&u1 * &u2.square()).invsqrt(); // 1/(u2·sqrt(u1))
        let D1 = &I * &u1; // sqrt(Z² - Y²)/u2
        let D2 = &I * &u2; // 1/sqrt(Z² - Y²)
        let Zinv = &D1 * &(&D2 * T); // u1·u2·T/(u1·u2²) = T/u2 = 1/Z

        // If x·y = T·Z⁻¹ is negative, torque the point by the
        // 4-torsion rotation (x, y) ↦ (iy, ix); the denominator then
        // picks up the 1/sqrt(a-d) factor, since the rotated point has
        // Z² + X² where this one has Z² - Y².
        let needs_rotation = (T * &Zinv).is_negative();

        let rotated_X = &Y * &constants::SQRT_M1;
        let rotated_Y = &X * &constants::SQRT_M1;
        let rotated_D = &D1 * &constants::INVSQRT_A_MINUS_D;

        let mut den = D2;
        X.conditional_assign(&rotated_X, needs_rotation);
        Y.conditional_assign(&rotated_Y, needs_rotation);
        den.conditional_assign(&rotated_D, needs_rotation);

        // The second sign choice: negate y if x is negative, so that
        // s/t comes out nonnegative.
        Y.conditional_negate((&X * &Zinv).is_negative());

        // s = (Z - Y)/sqrt(Z² - Y²), emitted as the nonnegative root.
        let mut s = &den * &(Z - &Y);
        let s_is_negative = s.is_negative();
        s.conditional_negate(s_is_negative);

        CompressedRistretto(s.to_bytes())
    }

    /// Return the coset self + E[4], for debugging.
    #[cfg(test)]
    fn coset4(&self) -> [EdwardsPoint; 4] {
        [
            self.0,
            &self.0 + &constants::EIGHT_TORSION[2],
            &self.0 + &constants::EIGHT_TORSION[4],
            &self.0 + &constants::EIGHT_TORSION[6],
        ]
    }

    /// Computes the Ristretto Elligator map.
    ///
    /// # Note
    ///
    /// This method is not public because it's just used for hashing
    /// to a point -- proper elligator support is deferred for now.
    pub(crate) fn elligator_ristretto_flavor(r_0: &FieldElement) -> RistrettoPoint {
        let i = &constants::SQRT_M1;
        let d = &constants::EDWARDS_D;
        let one = FieldElement::ONE;

        let r = i * &r_0.square();

        // The input selects a Jacobi-quartic point with
        //
        //    s² = num/den,  num = -(r + 1)(d² - 1),
        //                   den = -(dr + 1)(r + d).
        //
        // When num/den is square, take the nonnegative root and
        // c = -1; otherwise switch to the twist, s = -sqrt(r·num/den)
        // and c = r.  Since r = i·r_0² is nonsquare for nonzero r_0,
        // exactly one of the two ratios is square.
        let num = -&(&(&r + &one) * &(&d.square() - &one));
        let den = -&(&(&(d * &r) + &one) * &(&r + d));

        let (is_square, root) = FieldElement::sqrt_ratio_i(&num, &den);
        let (is_twist_square, twist_root) = FieldElement::sqrt_ratio_i(&(&r * &num), &den);
        debug_assert_eq!((is_square ^ is_twist_square).unwrap_u8(), 1u8);

        let mut s = FieldElement::ZERO;
        s.conditional_assign(&root, is_square);
        s.conditional_assign(&(-&twist_root), is_twist_square);

        let mut c = -&one;
        c.conditional_assign(&r, is_twist_square);

        let t = &(&c * &(&(&r - &one) * &((d - &one).square()))) - &den;

        // Push (s, t) through the 2-isogeny onto the curve:
        //
        //    x = 2s·den / (t·sqrt(ad - 1)),  y = (1 - s²)/(1 + s²),
        //
        // expressed as a completed point to defer the divisions.
        let ss = s.square();
        let completed = CompletedPoint {
            X: &(&s + &s) * &den,
            Z: &t * &constants::SQRT_AD_MINUS_ONE,
            Y: &one - &ss,
            T: &one + &ss,
        };

        RistrettoPoint(completed.to_extended())
    }

    /// Construct a `RistrettoPoint` from 64 bytes of uniformly random
    /// data.
    ///
    /// Applies the Elligator map to each 32-byte half and adds the
    /// results, so that the output distribution is uniform and the
    /// discrete log of the output with respect to any other point is
    /// unknown.
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> RistrettoPoint {
        let mut r_1_bytes = [0u8; 32];
        r_1_bytes.copy_from_slice(&bytes[0..32]);
        let r_1 = FieldElement::from_bytes(&r_1_bytes);
        let R_1 = RistrettoPoint::elligator_ristretto_flavor(&r_1);

        let mut r_2_bytes = [0u8; 32];
        r_2_bytes.copy_from_slice(&bytes[32..64]);
        let r_2 = FieldElement::from_bytes(&r_2_bytes);
        let R_2 = RistrettoPoint::elligator_ristretto_flavor(&r_2);

        &R_1 + &R_2
    }

    /// Return a `RistrettoPoint` chosen uniformly at random using a
    /// user-provided RNG.
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut uniform_bytes = [0u8; 64];
        rng.fill_bytes(&mut uniform_bytes);

        RistrettoPoint::from_uniform_bytes(&uniform_bytes)
    }

    /// Hash a slice of bytes into a `RistrettoPoint`.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes of output.
    ///
    /// Convenience wrapper around `from_hash`.
    pub fn hash_from_bytes<D>(input: &[u8]) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64>,
    {
        let mut hash = D::new();
        hash.update(input);
        RistrettoPoint::from_hash(hash)
    }

    /// Construct a `RistrettoPoint` from an existing `Digest` instance.
    ///
    /// Use this instead of `hash_from_bytes` if it is more convenient
    /// to stream data into the `Digest` than to pass a single byte
    /// slice.
    pub fn from_hash<D>(hash: D) -> RistrettoPoint
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());

        RistrettoPoint::from_uniform_bytes(&output)
    }

    /// Compute `scalar * B`, where `B` is the Ristretto basepoint.
    pub fn mul_base(scalar: &Scalar) -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::mul_base(scalar))
    }
}

impl Identity for RistrettoPoint {
    fn identity() -> RistrettoPoint {
        RistrettoPoint(EdwardsPoint::identity())
    }
}

impl Default for RistrettoPoint {
    fn default() -> RistrettoPoint {
        RistrettoPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------------

impl PartialEq for RistrettoPoint {
    fn eq(&self, other: &RistrettoPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for RistrettoPoint {
    /// Test equality between two `RistrettoPoint`s.
    ///
    /// Two representatives are in the same coset, hence equal as group
    /// elements, iff \\( X\_1 Y\_2 = Y\_1 X\_2 \\) or
    /// \\( X\_1 X\_2 = Y\_1 Y\_2 \\).
    fn ct_eq(&self, other: &RistrettoPoint) -> Choice {
        let X1Y2 = &self.0.X * &other.0.Y;
        let Y1X2 = &self.0.Y * &other.0.X;
        let X1X2 = &self.0.X * &other.0.X;
        let Y1Y2 = &self.0.Y * &other.0.Y;

        X1Y2.ct_eq(&Y1X2) | X1X2.ct_eq(&Y1Y2)
    }
}

impl Eq for RistrettoPoint {}

// ------------------------------------------------------------------------
// Arithmetic
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn add(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 + &other.0)
    }
}

define_add_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'b> AddAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn add_assign(&mut self, _rhs: &RistrettoPoint) {
        *self = (self as &RistrettoPoint) + _rhs;
    }
}

define_add_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<'a, 'b> Sub<&'b RistrettoPoint> for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn sub(self, other: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(&self.0 - &other.0)
    }
}

define_sub_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint, Output = RistrettoPoint);

impl<'b> SubAssign<&'b RistrettoPoint> for RistrettoPoint {
    fn sub_assign(&mut self, _rhs: &RistrettoPoint) {
        *self = (self as &RistrettoPoint) - _rhs;
    }
}

define_sub_assign_variants!(LHS = RistrettoPoint, RHS = RistrettoPoint);

impl<'a> Neg for &'a RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        RistrettoPoint(-&self.0)
    }
}

impl Neg for RistrettoPoint {
    type Output = RistrettoPoint;

    fn neg(self) -> RistrettoPoint {
        -&self
    }
}

impl<'b> MulAssign<&'b Scalar> for RistrettoPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        let result = (self as &RistrettoPoint) * scalar;
        *self = result;
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a RistrettoPoint {
    type Output = RistrettoPoint;
    /// Scalar multiplication: compute `scalar * self`.
    fn mul(self, scalar: &'b Scalar) -> RistrettoPoint {
        RistrettoPoint(&self.0 * scalar)
    }
}

impl<'a, 'b> Mul<&'b RistrettoPoint> for &'a Scalar {
    type Output = RistrettoPoint;

    /// Scalar multiplication: compute `self * point`.
    fn mul(self, point: &'b RistrettoPoint) -> RistrettoPoint {
        RistrettoPoint(self * &point.0)
    }
}

define_mul_assign_variants!(LHS = RistrettoPoint, RHS = Scalar);

define_mul_variants!(LHS = RistrettoPoint, RHS = Scalar, Output = RistrettoPoint);
define_mul_variants!(LHS = Scalar, RHS = RistrettoPoint, Output = RistrettoPoint);

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for RistrettoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RistrettoPoint: {:?}", self.0)
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
