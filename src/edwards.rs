// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! Group operations on the twisted Edwards form of Curve25519,
//! \\( -x\^2 + y\^2 = 1 + d x\^2 y\^2 \\) over
//! \\( \mathbb F\_{2\^{255} - 19} \\) with
//! \\( d = -121665/121666 \\).
//!
//! Points are held in extended twisted Edwards coordinates
//! \\( (X : Y : Z : T) \\) with \\( x = X/Z \\), \\( y = Y/Z \\),
//! \\( T = XY/Z \\); the redundant \\( T \\) coordinate makes the
//! addition law complete.  Points are immutable values: arithmetic
//! returns fresh points.
//!
//! Scalar multiplication of an arbitrary point is plain left-to-right
//! double-and-add over the bits of the scalar and is **variable
//! time**; multiples of the basepoint use a small cache of precomputed
//! odd multiples instead, with identical results.

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.  Yeah, you heard me, rustc, I'm gonna have my
// affine and projective cakes and eat both of them too.
#![allow(non_snake_case)]

#[cfg(feature = "alloc")]
use alloc::string::String;

use core::fmt::Debug;
use core::ops::Index;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Neg, Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::curve_models::{AffineNielsPoint, CompletedPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::errors::InternalError;
use crate::errors::SignatureError;
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::traits::ValidityCheck;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte is the sign bit
/// of \\(x\\), i.e. \\(x \bmod 2\\).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Construct a `CompressedEdwardsY` from a slice of bytes.
    ///
    /// Fails if the input is not 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<CompressedEdwardsY, SignatureError> {
        if bytes.len() != 32 {
            return Err(InternalError::BytesLengthError {
                name: "CompressedEdwardsY",
                length: 32,
            }
            .into());
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(CompressedEdwardsY(arr))
    }

    /// Construct a `CompressedEdwardsY` from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<CompressedEdwardsY, SignatureError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes).map_err(|_| InternalError::HexFormatError {
            name: "CompressedEdwardsY",
        })?;
        Ok(CompressedEdwardsY(bytes))
    }

    /// Encode this point to a 64-character lowercase hex string.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// The decoding is strict:
    ///
    /// * a \\(y\\)-coordinate at or above \\(p\\) is rejected as
    ///   non-canonical;
    /// * a \\(y\\)-coordinate for which
    ///   \\( x\^2 = (y\^2 - 1)/(dy\^2 + 1) \\) has no square root is
    ///   rejected as off-curve;
    /// * a set sign bit accompanying \\(x = 0\\) or \\(y = 0\\) is
    ///   rejected as non-canonical (there is no "negative zero"
    ///   coordinate).
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        let Y = FieldElement::from_bytes(self.as_bytes());

        // `from_bytes` masks the sign bit; re-encoding and comparing
        // catches a y-coordinate at or above p.
        let mut y_bytes = self.to_bytes();
        y_bytes[31] &= 0b0111_1111;
        if !bool::from(Y.to_bytes().ct_eq(&y_bytes)) {
            return None;
        }

        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; // u =  y² - 1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; // v = dy² + 1
        let (is_valid_y_coord, mut X) = FieldElement::sqrt_ratio_i(&u, &v);

        if !bool::from(is_valid_y_coord) {
            return None;
        }

        // sqrt_ratio_i always returns the nonnegative square root, so
        // the sign of X is currently 0.
        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);

        // A sign bit attached to a zero coordinate would decode to the
        // same point as the sign-0 form; accept only the latter.
        if bool::from(compressed_sign_bit & (X.is_zero() | Y.is_zero())) {
            return None;
        }

        X.conditional_negate(compressed_sign_bit);

        let point = EdwardsPoint {
            X,
            Y,
            Z,
            T: &X * &Y,
        };
        debug_assert!(point.is_valid());

        Some(point)
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ])
    }
}

// ------------------------------------------------------------------------
// Internal point representation
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of Curve25519,
/// in extended twisted Edwards coordinates (Hisil, Wong, Carter, Dawson).
///
/// The coordinates satisfy the invariants \\( Z \neq 0 \\) and
/// \\( T Z = X Y \\); every constructor and arithmetic operation
/// maintains them.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Validity checks (for debugging, not CT)
// ------------------------------------------------------------------------

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        let point_on_curve = self.to_projective().is_valid();
        let on_segre_image = (&self.X * &self.Y) == (&self.Z * &self.T);

        point_on_curve && on_segre_image
    }
}

// ------------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------------

impl ConstantTimeEq for EdwardsPoint {
    /// Test equality of the affine images by cross-multiplying, to
    /// avoid an inversion: \\( (X\_1 : Z\_1) = (X\_2 : Z\_2) \\) iff
    /// \\( X\_1 Z\_2 = X\_2 Z\_1 \\), and likewise for \\(Y\\).
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Convert to a ProjectiveNielsPoint.
    pub(crate) fn to_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Convert the representation of this point from extended
    /// coordinates to projective coordinates.
    ///
    /// Free.
    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Dehomogenize to an AffineNielsPoint.
    pub(crate) fn to_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    /// Project this point to the \\(u\\)-coordinate of the
    /// corresponding point on the Montgomery form of the curve,
    /// \\( u = (1+y)/(1-y) \\).
    ///
    /// This is a one-way conversion: the Montgomery model does not
    /// retain sign information.
    ///
    /// # Return
    ///
    /// An error if \\( y = 1 \\), i.e. if `self` is the identity, which
    /// has no affine image on the Montgomery curve.
    pub fn to_montgomery(&self) -> Result<MontgomeryPoint, SignatureError> {
        // u = (1 + y) / (1 - y) = (Z + Y) / (Z - Y)
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        if bool::from(W.is_zero()) {
            return Err(InternalError::MontgomeryMapError.into());
        }
        let u = &U * &W.invert();
        Ok(MontgomeryPoint(u.to_bytes()))
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s: [u8; 32];

        s = y.to_bytes();
        s[31] ^= (x.is_negative().unwrap_u8() << 7) as u8;
        CompressedEdwardsY(s)
    }

    /// Encode this point to a 64-character lowercase hex string.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        self.compress().to_hex()
    }

    /// Decode a point from a 64-character hex string in compressed
    /// Edwards y format.
    pub fn from_hex(hex_str: &str) -> Result<EdwardsPoint, SignatureError> {
        CompressedEdwardsY::from_hex(hex_str)?
            .decompress()
            .ok_or_else(|| InternalError::PointDecompressionError.into())
    }

    /// Attempt to construct a point from affine coordinates, given as
    /// canonical little-endian byte encodings of \\(x\\) and \\(y\\).
    ///
    /// # Return
    ///
    /// `None` if either encoding is non-canonical or if \\((x, y)\\)
    /// does not satisfy the curve equation.
    pub fn from_affine(x_bytes: &[u8; 32], y_bytes: &[u8; 32]) -> Option<EdwardsPoint> {
        let x = FieldElement::from_bytes(x_bytes);
        let y = FieldElement::from_bytes(y_bytes);

        let canonical = x.to_bytes().ct_eq(x_bytes) & y.to_bytes().ct_eq(y_bytes);
        if !bool::from(canonical) {
            return None;
        }

        let point = EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: &x * &y,
        };

        if point.is_valid() {
            Some(point)
        } else {
            None
        }
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.to_projective().double().to_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.to_projective_niels()).to_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, _rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) + _rhs;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.to_projective_niels()).to_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, _rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) - _rhs;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        let result = (self as &EdwardsPoint) * scalar;
        *self = result;
    }
}

define_mul_assign_variants!(LHS = EdwardsPoint, RHS = Scalar);

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);
define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `scalar * self`, walking the
    /// binary expansion of the scalar from the most significant bit
    /// down:
    ///
    /// ```text
    /// Q = identity
    /// for bit in high-to-low(scalar):
    ///     Q = double(Q)
    ///     if bit == 1: Q = Q + P
    /// ```
    ///
    /// The scalar is *not* reduced first, so multiplying by the raw
    /// (unreduced) group order gives the identity.  This runs in time
    /// variable in the scalar; see the module documentation.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        let bits = scalar.bits();
        let P = self.to_projective_niels();

        let mut Q = EdwardsPoint::identity();
        for i in (0..256).rev() {
            Q = Q.double();
            if bits[i] == 1 {
                Q = (&Q + &P).to_extended();
            }
        }

        Q
    }
}

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `self * point`.
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

/// Holds odd multiples 1A, 3A, ..., 15A of a point A.
struct OddMultiples([ProjectiveNielsPoint; 8]);

impl OddMultiples {
    fn create(A: &EdwardsPoint) -> OddMultiples {
        let mut Ai = [A.to_projective_niels(); 8];
        let A2 = A.double();
        for i in 0..7 {
            Ai[i + 1] = (&A2 + &Ai[i]).to_extended().to_projective_niels();
        }
        // Now Ai = [A, 3A, 5A, 7A, 9A, 11A, 13A, 15A]
        OddMultiples(Ai)
    }
}

impl Index<usize> for OddMultiples {
    type Output = ProjectiveNielsPoint;

    fn index(&self, _index: usize) -> &ProjectiveNielsPoint {
        &(self.0[_index])
    }
}

impl EdwardsPoint {
    /// Compute `scalar * B`, where `B` is the Ed25519 basepoint.
    ///
    /// Uses a width-5 non-adjacent form of the scalar against the
    /// precomputed odd multiples \\([B, 3B, \ldots, 15B]\\); the result
    /// is identical to `&constants::ED25519_BASEPOINT_POINT * scalar`.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        let naf = scalar.non_adjacent_form();

        // Find the index of the most significant nonzero NAF digit.
        let mut i: usize = 255;
        for j in (0..256).rev() {
            i = j;
            if naf[i] != 0 {
                break;
            }
        }

        let odd_multiples_of_B = &constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

        let mut r = ProjectivePoint::identity();
        loop {
            let mut t = r.double();

            if naf[i] > 0 {
                t = &t.to_extended() + &odd_multiples_of_B[(naf[i] / 2) as usize];
            } else if naf[i] < 0 {
                t = &t.to_extended() - &odd_multiples_of_B[(-naf[i] / 2) as usize];
            }

            r = t.to_projective();

            if i == 0 {
                break;
            }
            i -= 1;
        }

        r.to_extended()
    }

    /// Given a point \\(A\\) and scalars \\(a\\) and \\(b\\), compute
    /// the point \\(aA + bB\\), where \\(B\\) is the Ed25519 basepoint.
    ///
    /// Variable time; used for signature verification, where all
    /// inputs are public.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        let a_naf = a.non_adjacent_form();
        let b_naf = b.non_adjacent_form();

        // Find starting index
        let mut i: usize = 255;
        for j in (0..256).rev() {
            i = j;
            if a_naf[i] != 0 || b_naf[i] != 0 {
                break;
            }
        }

        let odd_multiples_of_A = OddMultiples::create(A);
        let odd_multiples_of_B = &constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

        let mut r = ProjectivePoint::identity();
        loop {
            let mut t = r.double();

            if a_naf[i] > 0 {
                t = &t.to_extended() + &odd_multiples_of_A[(a_naf[i] / 2) as usize];
            } else if a_naf[i] < 0 {
                t = &t.to_extended() - &odd_multiples_of_A[(-a_naf[i] / 2) as usize];
            }

            if b_naf[i] > 0 {
                t = &t.to_extended() + &odd_multiples_of_B[(b_naf[i] / 2) as usize];
            } else if b_naf[i] < 0 {
                t = &t.to_extended() - &odd_multiples_of_B[(-b_naf[i] / 2) as usize];
            }

            r = t.to_projective();

            if i == 0 {
                break;
            }
            i -= 1;
        }

        r.to_extended()
    }

    /// Multiply by the cofactor: return \\( [8]P \\).
    pub fn mult_by_cofactor(&self) -> EdwardsPoint {
        self.mult_by_pow_2(3)
    }

    /// Compute \\( [2\^k]P \\) by successive doublings.
    /// Requires \\( k > 0 \\).
    pub(crate) fn mult_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.to_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.to_projective();
        }
        // Unroll last iteration so we can go directly to_extended()
        s.double().to_extended()
    }

    /// Determine if this point is of small order.
    ///
    /// The curve group has order \\( 8\ell \\); this returns true for
    /// the eight points of the torsion subgroup \\( \mathcal E[8] \\)
    /// and false for points of order \\( \ell \\) or \\( 8\ell \\).
    ///
    /// Verifiers that want strong unforgeability reject public keys
    /// for which this is true; see `PublicKey::verify_strict`.
    pub fn is_small_order(&self) -> bool {
        use crate::traits::IsIdentity;
        self.mult_by_cofactor().is_identity()
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use crate::field::FieldElement;
    use crate::scalar::Scalar;
    use crate::traits::IsIdentity;

    /// X coordinate of the basepoint.
    /// = 15112221349535400772501151409588531511454012693041857206046113283949847762202
    static BASE_X_COORD_BYTES: [u8; 32] = [
        0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c,
        0x69, 0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36,
        0x69, 0x21,
    ];

    /// Compressed Edwards Y form of 2*basepoint.
    static BASE2_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xc9, 0xa3, 0xf8, 0x6a, 0xae, 0x46, 0x5f, 0x0e, 0x56, 0x51, 0x38, 0x64, 0x51, 0x0f, 0x39,
        0x97, 0x56, 0x1f, 0xa2, 0xc9, 0xe8, 0x5e, 0xa2, 0x1d, 0xc2, 0x29, 0x23, 0x09, 0xf3, 0xcd,
        0x60, 0x22,
    ]);

    /// Compressed Edwards Y form of 16*basepoint.
    static BASE16_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xeb, 0x27, 0x67, 0xc1, 0x37, 0xab, 0x7a, 0xd8, 0x27, 0x9c, 0x07, 0x8e, 0xff, 0x11, 0x6a,
        0xb0, 0x78, 0x6e, 0xad, 0x3a, 0x2e, 0x0f, 0x98, 0x9f, 0x72, 0xc3, 0x7f, 0x82, 0xf2, 0x96,
        0x96, 0x70,
    ]);

    /// 4493907448824000747700850167940867464579944529806937181821189941592931634714
    static A_SCALAR: Scalar = Scalar {
        bytes: [
            0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
            0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
            0x23, 0x76, 0xef, 0x09,
        ],
    };

    /// 2506056684125797857694181776241676200180934651973138769173342316833279714961
    static B_SCALAR: Scalar = Scalar {
        bytes: [
            0x91, 0x26, 0x7a, 0xcf, 0x25, 0xc2, 0x09, 0x1b, 0xa2, 0x17, 0x74, 0x7b, 0x66, 0xf0,
            0xb3, 0x2e, 0x9d, 0xf2, 0xa5, 0x67, 0x41, 0xcf, 0xda, 0xc4, 0x56, 0xa7, 0xd4, 0xaa,
            0xb8, 0x60, 0x8a, 0x05,
        ],
    };

    /// A_SCALAR * basepoint, computed with ed25519.py
    static A_TIMES_BASEPOINT: CompressedEdwardsY = CompressedEdwardsY([
        0xea, 0x27, 0xe2, 0x60, 0x53, 0xdf, 0x1b, 0x59, 0x56, 0xf1, 0x4d, 0x5d, 0xec, 0x3c, 0x34,
        0xc3, 0x84, 0xa2, 0x69, 0xb7, 0x4c, 0xc3, 0x80, 0x3e, 0xa8, 0xe2, 0xe7, 0xc9, 0x42, 0x5e,
        0x40, 0xa5,
    ]);

    /// A_SCALAR * (A_TIMES_BASEPOINT) + B_SCALAR * BASEPOINT
    /// computed with ed25519.py
    static DOUBLE_SCALAR_MULT_RESULT: CompressedEdwardsY = CompressedEdwardsY([
        0x7d, 0xfd, 0x6c, 0x45, 0xaf, 0x6d, 0x6e, 0x0e, 0xba, 0x20, 0x37, 0x1a, 0x23, 0x64, 0x59,
        0xc4, 0xc0, 0x46, 0x83, 0x43, 0xde, 0x70, 0x4b, 0x85, 0x09, 0x6f, 0xfe, 0x35, 0x4f, 0x13,
        0x2b, 0x42,
    ]);

    /// Test round-trip decompression for the basepoint.
    #[test]
    fn basepoint_decompression_compression() {
        let base_X = FieldElement::from_bytes(&BASE_X_COORD_BYTES);
        let bp = constants::ED25519_BASEPOINT_COMPRESSED.decompress().unwrap();
        assert!(bp.is_valid());
        // Check that decompression actually gives the correct X coordinate
        assert_eq!(base_X, bp.X);
        assert_eq!(bp.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
    }

    /// Test sign handling in decompression
    #[test]
    fn decompression_sign_handling() {
        // Manually set the high bit of the last byte to flip the sign
        let mut minus_basepoint_bytes = *constants::ED25519_BASEPOINT_COMPRESSED.as_bytes();
        minus_basepoint_bytes[31] |= 1 << 7;
        let minus_basepoint = CompressedEdwardsY(minus_basepoint_bytes)
            .decompress()
            .unwrap();
        // Test projective coordinates exactly since we know they should
        // only differ by a flipped sign.
        assert_eq!(minus_basepoint.X, -(&constants::ED25519_BASEPOINT_POINT.X));
        assert_eq!(minus_basepoint.Y, constants::ED25519_BASEPOINT_POINT.Y);
        assert_eq!(minus_basepoint.Z, constants::ED25519_BASEPOINT_POINT.Z);
        assert_eq!(minus_basepoint.T, -(&constants::ED25519_BASEPOINT_POINT.T));
    }

    /// A y-coordinate at or above p must be rejected as non-canonical.
    #[test]
    fn decompression_rejects_noncanonical_y() {
        // 2^255 - 18 = p + 1, which would decode to y = 1 if the check
        // were missing.
        let mut p_plus_one_bytes = [0xffu8; 32];
        p_plus_one_bytes[0] = 0xee;
        p_plus_one_bytes[31] = 0x7f;
        assert!(CompressedEdwardsY(p_plus_one_bytes).decompress().is_none());
    }

    /// y = 0 with the sign bit set must be rejected.
    #[test]
    fn decompression_rejects_negative_zero_y() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x80;
        assert!(CompressedEdwardsY(bytes).decompress().is_none());
        // ... while the sign-0 form of the same y decodes fine.
        assert!(CompressedEdwardsY([0u8; 32]).decompress().is_some());
    }

    /// x = 0 (i.e. y = 1, the identity) with the sign bit set must be
    /// rejected.
    #[test]
    fn decompression_rejects_negative_zero_x() {
        let mut bytes = *CompressedEdwardsY::identity().as_bytes();
        bytes[31] |= 1 << 7;
        assert!(CompressedEdwardsY(bytes).decompress().is_none());
    }

    /// Test `impl Add<EdwardsPoint> for EdwardsPoint`
    /// using basepoint + basepoint versus the 2*basepoint constant.
    #[test]
    fn basepoint_plus_basepoint_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = &bp + &bp;
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Test `impl Add<ProjectiveNielsPoint> for EdwardsPoint`
    /// using the basepoint, basepoint2 constants
    #[test]
    fn basepoint_plus_basepoint_projective_niels_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = (&bp + &bp.to_projective_niels()).to_extended();
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Test `impl Add<AffineNielsPoint> for EdwardsPoint`
    /// using the basepoint, basepoint2 constants
    #[test]
    fn basepoint_plus_basepoint_affine_niels_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_affine_niels = bp.to_affine_niels();
        let bp_added = (&bp + &bp_affine_niels).to_extended();
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Check that equality of `EdwardsPoints` handles projective
    /// coordinates correctly.
    #[test]
    fn extended_point_equality_handles_scaling() {
        let mut two_bytes = [0u8; 32];
        two_bytes[0] = 2;
        let id1 = EdwardsPoint::identity();
        let id2 = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::from_bytes(&two_bytes),
            Z: FieldElement::from_bytes(&two_bytes),
            T: FieldElement::ZERO,
        };
        assert!(bool::from(id1.ct_eq(&id2)));
    }

    /// Sanity check for conversion to precomputed points
    #[test]
    fn to_affine_niels_clears_denominators() {
        // construct a point as aB so it has denominators (ie. Z != 1)
        let aB = &constants::ED25519_BASEPOINT_POINT * &A_SCALAR;
        let aB_affine_niels = aB.to_affine_niels();
        let also_aB = (&EdwardsPoint::identity() + &aB_affine_niels).to_extended();
        assert_eq!(aB.compress(), also_aB.compress());
    }

    /// Test double-and-add versus a known scalar multiple from ed25519.py
    #[test]
    fn scalar_mult_vs_ed25519py() {
        let aB = &constants::ED25519_BASEPOINT_POINT * &A_SCALAR;
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    /// Test the NAF basepoint path against the same known multiple.
    #[test]
    fn mul_base_vs_ed25519py() {
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    /// The basepoint paths must agree on random-ish scalars.
    #[test]
    fn mul_base_vs_generic_mul() {
        let aB_1 = &constants::ED25519_BASEPOINT_POINT * &B_SCALAR;
        let aB_2 = EdwardsPoint::mul_base(&B_SCALAR);
        assert_eq!(aB_1.compress(), aB_2.compress());
    }

    /// Test that multiplication by the basepoint order kills the basepoint
    #[test]
    fn basepoint_mult_by_basepoint_order() {
        let should_be_id = &constants::ED25519_BASEPOINT_POINT * &constants::BASEPOINT_ORDER;
        assert!(should_be_id.is_identity());
        let should_be_id = EdwardsPoint::mul_base(&constants::BASEPOINT_ORDER);
        assert!(should_be_id.is_identity());
    }

    /// Test basepoint.double() versus the 2*basepoint constant.
    #[test]
    fn basepoint_double_vs_basepoint2() {
        assert_eq!(
            constants::ED25519_BASEPOINT_POINT.double().compress(),
            BASE2_CMPRSSD
        );
    }

    /// Test computing 16*basepoint vs mult_by_pow_2(4)
    #[test]
    fn basepoint16_vs_mult_by_pow_2_4() {
        let bp16 = constants::ED25519_BASEPOINT_POINT.mult_by_pow_2(4);
        assert_eq!(bp16.compress(), BASE16_CMPRSSD);
    }

    /// Group laws: associativity, identity, inverses.
    #[test]
    fn group_axioms() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let P = &B * &A_SCALAR;
        let Q = &B * &B_SCALAR;
        let R = B.double();

        // (P + Q) + R == P + (Q + R)
        assert_eq!(&(&P + &Q) + &R, &P + &(&Q + &R));
        // P + identity == P
        assert_eq!(&P + &EdwardsPoint::identity(), P);
        // P + (-P) == identity
        assert!((&P + &(-&P)).is_identity());
        // P - P == identity
        assert!((&P - &P).is_identity());
    }

    /// Scalar distributivity over the group operations.
    #[test]
    fn scalar_distributivity() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let P = &B * &A_SCALAR;
        let Q = B.double();
        let k = B_SCALAR;
        let m = A_SCALAR;

        // [k](P + Q) == [k]P + [k]Q
        assert_eq!(&(&P + &Q) * &k, &(&P * &k) + &(&Q * &k));
        // [k + m]P == [k]P + [m]P
        assert_eq!(&P * &(&k + &m), &(&P * &k) + &(&P * &m));
        // [k]([m]P) == [k * m]P
        assert_eq!(&(&P * &m) * &k, &P * &(&k * &m));
    }

    /// Compressed encodings round-trip through decompression.
    #[test]
    fn compress_decompress_round_trip() {
        let mut P = constants::ED25519_BASEPOINT_POINT;
        for _ in 0..16 {
            let compressed = P.compress();
            let Q = compressed.decompress().unwrap();
            assert_eq!(P, Q);
            assert_eq!(Q.compress(), compressed);
            P = &P + &constants::ED25519_BASEPOINT_POINT;
        }
    }

    #[test]
    fn double_scalar_mul_basepoint_vs_ed25519py() {
        let A = A_TIMES_BASEPOINT.decompress().unwrap();
        let result = EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &A, &B_SCALAR);
        assert_eq!(result.compress(), DOUBLE_SCALAR_MULT_RESULT);
    }

    #[test]
    fn is_small_order() {
        // The basepoint has large prime order
        assert!(!constants::ED25519_BASEPOINT_POINT.is_small_order());
        // constants::EIGHT_TORSION has all points of small order.
        for torsion_point in &constants::EIGHT_TORSION {
            assert!(torsion_point.is_small_order());
        }
    }

    #[test]
    fn compressed_identity() {
        assert_eq!(
            EdwardsPoint::identity().compress(),
            CompressedEdwardsY::identity()
        );
    }

    #[test]
    fn is_identity() {
        assert!(EdwardsPoint::identity().is_identity());
        assert!(!constants::ED25519_BASEPOINT_POINT.is_identity());
    }

    #[test]
    fn scalarmult_extended_point_works_both_ways() {
        let G: EdwardsPoint = constants::ED25519_BASEPOINT_POINT;
        let s: Scalar = A_SCALAR;

        let P1 = &G * &s;
        let P2 = &s * &G;

        assert!(P1.compress().to_bytes() == P2.compress().to_bytes());
    }

    /// The basepoint maps to Montgomery u = 9.
    #[test]
    fn basepoint_to_montgomery_u_is_nine() {
        let mut nine = [0u8; 32];
        nine[0] = 9;
        let u = constants::ED25519_BASEPOINT_POINT.to_montgomery().unwrap();
        assert_eq!(u.to_bytes(), nine);
    }

    /// The identity (y = 1) has no Montgomery image.
    #[test]
    fn identity_to_montgomery_fails() {
        assert!(EdwardsPoint::identity().to_montgomery().is_err());
    }

    #[test]
    fn hex_round_trip() {
        let bp_hex = "5866666666666666666666666666666666666666666666666666666666666666";
        let bp = EdwardsPoint::from_hex(bp_hex).unwrap();
        assert_eq!(bp, constants::ED25519_BASEPOINT_POINT);
        #[cfg(feature = "alloc")]
        assert_eq!(bp.to_hex(), bp_hex);
    }

    #[test]
    fn from_affine_constructs_basepoint() {
        let y_bytes = constants::ED25519_BASEPOINT_POINT.Y.to_bytes();
        let bp = EdwardsPoint::from_affine(&BASE_X_COORD_BYTES, &y_bytes).unwrap();
        assert_eq!(bp, constants::ED25519_BASEPOINT_POINT);

        // Perturbing x off the curve must fail.
        let mut bad_x = BASE_X_COORD_BYTES;
        bad_x[0] ^= 1;
        assert!(EdwardsPoint::from_affine(&bad_x, &y_bytes).is_none());
    }
}
