// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! Arithmetic on scalars (integers mod the group order).
//!
//! The basepoint of the curve has prime order
//!
//! l = 2^252 + 27742317777372353535851937790883648493,
//!
//! so a multiple `[a]P` of a point in the prime-order subgroup depends
//! only on `a mod l`.  The [`Scalar`] struct represents an element of
//! \\(\mathbb Z / \ell \mathbb Z\\), stored in memory as 32 bytes in
//! little-endian order so that the bits of the scalar are directly
//! accessible during point multiplication.  For arithmetic between
//! scalars, the private `UnpackedScalar` holds five 52-bit limbs and
//! multiplies with Montgomery reduction.
//!
//! 51-bit limbs would cover the desired bit range (253 bits), but
//! aren't large enough to reduce a 512-bit number with Montgomery
//! multiplication, so 52 bits are used instead.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use digest::generic_array::typenum::U64;
use digest::Digest;

use subtle::Choice;
use subtle::ConstantTimeEq;

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;

/// The `Scalar` struct holds an element of
/// \\(\mathbb Z / \ell \mathbb Z\\), where
///
/// l = 2^252 + 27742317777372353535851937790883648493
///
/// is the order of the basepoint, as 32 little-endian bytes.
///
/// Values produced by the constructors and the arithmetic operators
/// are fully reduced; [`Scalar::from_bits`] can additionally hold any
/// 255-bit integer, which is meaningful only as an input to point
/// multiplication (which walks the raw bits).
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, _rhs: &'b Scalar) {
        *self = UnpackedScalar::mul(&self.unpack(), &_rhs.unpack()).pack();
    }
}

define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, _rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::mul(&self.unpack(), &_rhs.unpack()).pack()
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, _rhs: &'b Scalar) {
        *self = *self + _rhs;
    }
}

define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, _rhs: &'b Scalar) -> Scalar {
        // The UnpackedScalar::add function produces reduced outputs
        // if the inputs are reduced.
        UnpackedScalar::add(&self.unpack(), &_rhs.unpack()).pack()
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> SubAssign<&'b Scalar> for Scalar {
    fn sub_assign(&mut self, _rhs: &'b Scalar) {
        *self = *self - _rhs;
    }
}

define_sub_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, _rhs: &'b Scalar) -> Scalar {
        UnpackedScalar::sub(&self.unpack(), &_rhs.unpack()).pack()
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        UnpackedScalar::sub(&UnpackedScalar::ZERO, &self.unpack()).pack()
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

macro_rules! impl_scalar_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(x: $t) -> Scalar {
                    let mut bytes = [0u8; 32];
                    let x_bytes = x.to_le_bytes();
                    bytes[..x_bytes.len()].copy_from_slice(&x_bytes);
                    Scalar { bytes }
                }
            }
        )*
    }
}

impl_scalar_from_uint! { u8, u16, u32, u64, u128 }

impl Scalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };

    /// The scalar \\( 1 \\).
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0,
        ],
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        // Temporarily allow s_unreduced.bytes > 2^255 ...
        let s_unreduced = Scalar { bytes };

        // Then reduce mod the group order and return the reduced scalar.
        let s = s_unreduced.reduce();
        debug_assert_eq!(0u8, s.bytes[31] >> 7);

        s
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    ///
    /// This is the reduction applied to 64-byte digests in the signing
    /// protocol.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        UnpackedScalar::from_bytes_wide(input).pack()
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical byte representation (i.e. the value
    ///   is below \\( \ell \\));
    /// - `None` if `bytes` is not a canonical byte representation.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Scalar> {
        // Check that the high bit is not set
        if bytes[31] >> 7 != 0u8 {
            return None;
        }
        let candidate = Scalar::from_bits(bytes);

        if candidate.is_canonical() {
            Some(candidate)
        } else {
            None
        }
    }

    /// Construct a `Scalar` from the low 255 bits of a 256-bit integer,
    /// without reducing mod \\( \ell \\).
    ///
    /// Point multiplication accepts arbitrary non-negative
    /// multipliers; this constructor is how such a raw (possibly
    /// unreduced) multiplier enters the API.  The multiplication walks
    /// the bits directly, so e.g. multiplying by the unreduced group
    /// order is well-defined and yields the identity.
    pub fn from_bits(bytes: [u8; 32]) -> Scalar {
        let mut s = Scalar { bytes };
        // Ensure that s < 2^255 by masking the high bit
        s.bytes[31] &= 0b0111_1111;

        s
    }

    /// Return a `Scalar` chosen uniformly at random using a
    /// user-provided RNG.
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut scalar_bytes = [0u8; 64];
        rng.fill_bytes(&mut scalar_bytes);
        Scalar::from_bytes_mod_order_wide(&scalar_bytes)
    }

    /// Hash a slice of bytes into a scalar.
    ///
    /// Takes a type parameter `D`, which is any `Digest` producing 64
    /// bytes (512 bits) of output.
    ///
    /// Convenience wrapper around `from_hash`.
    pub fn hash_from_bytes<D>(input: &[u8]) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut hash = D::new();
        hash.update(input);
        Scalar::from_hash(hash)
    }

    /// Construct a scalar from an existing `Digest` instance.
    ///
    /// Use this instead of `hash_from_bytes` if it is more convenient
    /// to stream data into the `Digest` than to pass a single byte
    /// slice.
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// View the little-endian byte encoding of this `Scalar`.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Convert this `Scalar` to its underlying sequence of bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Check whether this `Scalar` is the canonical representative mod
    /// \\( \ell \\).
    pub fn is_canonical(&self) -> bool {
        *self == self.reduce()
    }

    /// Reduce this `Scalar` modulo \\( \ell \\).
    fn reduce(&self) -> Scalar {
        let x = self.unpack();
        let x_times_r = UnpackedScalar::mul_internal(&x, &constants::R);
        let x_mod_l = UnpackedScalar::montgomery_reduce(&x_times_r);
        x_mod_l.pack()
    }

    /// Unpack this `Scalar` to an `UnpackedScalar` for faster arithmetic.
    pub(crate) fn unpack(&self) -> UnpackedScalar {
        UnpackedScalar::from_bytes(&self.bytes)
    }

    /// Get the bits of the scalar, in little-endian order.
    pub(crate) fn bits(&self) -> [i8; 256] {
        let mut bits = [0i8; 256];
        for i in 0..256 {
            // As i runs from 0..256, the bottom 3 bits index the bit,
            // while the upper bits index the byte.
            bits[i] = ((self.bytes[i >> 3] >> (i & 7)) & 1u8) as i8;
        }
        bits
    }

    /// Compute a width-5 "Non-Adjacent Form" of this scalar.
    ///
    /// A width-`w` NAF of a positive integer `k` is an expression
    /// `k = sum(k[i]*2^i for i in range(l))`, where each nonzero
    /// coefficient `k[i]` is odd and bounded by `|k[i]| < 2^(w-1)`,
    /// `k[l-1]` is nonzero, and at most one of any `w` consecutive
    /// coefficients is nonzero.  (Hankerson, Menezes, Vanstone; def 3.32).
    ///
    /// Intuitively, this is like a binary expansion, except that we
    /// allow some coefficients to grow in magnitude up to `2^(w-1)` so
    /// that the nonzero coefficients are as sparse as possible.
    pub(crate) fn non_adjacent_form(&self) -> [i8; 256] {
        // Step 1: write out bits of the scalar
        let mut naf = self.bits();

        // Step 2: zero coefficients by carrying them upwards or downwards
        'bits: for i in 0..256 {
            if naf[i] == 0 {
                continue 'bits;
            }
            'window: for b in 1..6 {
                if i + b >= 256 {
                    break 'window;
                }
                if naf[i + b] == 0 {
                    continue 'window;
                }
                let potential_carry = naf[i + b] << b;
                if naf[i] + potential_carry <= 15 {
                    // Eliminate naf[i+b] by carrying its value onto naf[i]
                    naf[i] += potential_carry;
                    naf[i + b] = 0;
                } else if naf[i] - potential_carry >= -15 {
                    // Eliminate naf[i+b] by carrying its value upwards.
                    naf[i] -= potential_carry; // Subtract 2^(i+b)
                    'carry: for k in i + b..256 {
                        if naf[k] != 0 {
                            // Since naf[k] = 0 or 1 for k > i, naf[k] == 1.
                            naf[k] = 0; // Subtract 2^k
                        } else {
                            // By now we have subtracted 2^k =
                            // 2^(i+b) + 2^(i+b) + 2^(i+b+1) + ... + 2^(k-1).
                            naf[k] = 1; // Add back 2^k.
                            break 'carry;
                        }
                    }
                }
            }
        }

        naf
    }
}

/// Clamp the bytes of a 256-bit little-endian integer as prescribed for
/// Ed25519 secret scalars: clear the low three bits, clear the top bit,
/// set the second-highest bit.
///
/// The result, read as an integer, is a multiple of 8 in the range
/// \\( [2\^{253}, 2\^{254}) \\).
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;

    bytes
}

// ------------------------------------------------------------------------
// Unpacked representation
// ------------------------------------------------------------------------

/// u64 * u64 = u128 multiply helper
#[inline(always)]
const fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// The `UnpackedScalar` struct represents an element in
/// \\(\mathbb Z / \ell \mathbb Z\\) as 5 52-bit limbs.
#[derive(Copy, Clone)]
pub(crate) struct UnpackedScalar(pub(crate) [u64; 5]);

impl Debug for UnpackedScalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UnpackedScalar: {:?}", &self.0[..])
    }
}

impl UnpackedScalar {
    /// The scalar \\( 0 \\).
    pub(crate) const ZERO: UnpackedScalar = UnpackedScalar([0, 0, 0, 0, 0]);

    /// Unpack a 32 byte / 256 bit scalar into 5 52-bit limbs.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> UnpackedScalar {
        let mut words = [0u64; 4];
        for i in 0..4 {
            for j in 0..8 {
                words[i] |= (bytes[(i * 8) + j] as u64) << (j * 8);
            }
        }

        let mask = (1u64 << 52) - 1;
        let top_mask = (1u64 << 48) - 1;
        let mut s = UnpackedScalar::ZERO;

        s.0[0] = words[0] & mask;
        s.0[1] = ((words[0] >> 52) | (words[1] << 12)) & mask;
        s.0[2] = ((words[1] >> 40) | (words[2] << 24)) & mask;
        s.0[3] = ((words[2] >> 28) | (words[3] << 36)) & mask;
        s.0[4] = (words[3] >> 16) & top_mask;

        s
    }

    /// Reduce a 64 byte / 512 bit scalar mod l.
    pub(crate) fn from_bytes_wide(bytes: &[u8; 64]) -> UnpackedScalar {
        let mut words = [0u64; 8];
        for i in 0..8 {
            for j in 0..8 {
                words[i] |= (bytes[(i * 8) + j] as u64) << (j * 8);
            }
        }

        let mask = (1u64 << 52) - 1;
        let mut lo = UnpackedScalar::ZERO;
        let mut hi = UnpackedScalar::ZERO;

        lo.0[0] = words[0] & mask;
        lo.0[1] = ((words[0] >> 52) | (words[1] << 12)) & mask;
        lo.0[2] = ((words[1] >> 40) | (words[2] << 24)) & mask;
        lo.0[3] = ((words[2] >> 28) | (words[3] << 36)) & mask;
        lo.0[4] = ((words[3] >> 16) | (words[4] << 48)) & mask;

        hi.0[0] = (words[4] >> 4) & mask;
        hi.0[1] = ((words[4] >> 56) | (words[5] << 8)) & mask;
        hi.0[2] = ((words[5] >> 44) | (words[6] << 20)) & mask;
        hi.0[3] = ((words[6] >> 32) | (words[7] << 32)) & mask;
        hi.0[4] = words[7] >> 20;

        lo = UnpackedScalar::montgomery_mul(&lo, &constants::R); // (lo * R) / R = lo
        hi = UnpackedScalar::montgomery_mul(&hi, &constants::RR); // (hi * R^2) / R = hi * R

        UnpackedScalar::add(&hi, &lo)
    }

    /// Pack the limbs of this `UnpackedScalar` into a `Scalar`.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn pack(&self) -> Scalar {
        let mut s = Scalar::ZERO;

        s.bytes[ 0] =  (self.0[0] >>  0)                    as u8;
        s.bytes[ 1] =  (self.0[0] >>  8)                    as u8;
        s.bytes[ 2] =  (self.0[0] >> 16)                    as u8;
        s.bytes[ 3] =  (self.0[0] >> 24)                    as u8;
        s.bytes[ 4] =  (self.0[0] >> 32)                    as u8;
        s.bytes[ 5] =  (self.0[0] >> 40)                    as u8;
        s.bytes[ 6] = ((self.0[0] >> 48) | (self.0[1] << 4)) as u8;
        s.bytes[ 7] =  (self.0[1] >>  4)                    as u8;
        s.bytes[ 8] =  (self.0[1] >> 12)                    as u8;
        s.bytes[ 9] =  (self.0[1] >> 20)                    as u8;
        s.bytes[10] =  (self.0[1] >> 28)                    as u8;
        s.bytes[11] =  (self.0[1] >> 36)                    as u8;
        s.bytes[12] =  (self.0[1] >> 44)                    as u8;
        s.bytes[13] =  (self.0[2] >>  0)                    as u8;
        s.bytes[14] =  (self.0[2] >>  8)                    as u8;
        s.bytes[15] =  (self.0[2] >> 16)                    as u8;
        s.bytes[16] =  (self.0[2] >> 24)                    as u8;
        s.bytes[17] =  (self.0[2] >> 32)                    as u8;
        s.bytes[18] =  (self.0[2] >> 40)                    as u8;
        s.bytes[19] = ((self.0[2] >> 48) | (self.0[3] << 4)) as u8;
        s.bytes[20] =  (self.0[3] >>  4)                    as u8;
        s.bytes[21] =  (self.0[3] >> 12)                    as u8;
        s.bytes[22] =  (self.0[3] >> 20)                    as u8;
        s.bytes[23] =  (self.0[3] >> 28)                    as u8;
        s.bytes[24] =  (self.0[3] >> 36)                    as u8;
        s.bytes[25] =  (self.0[3] >> 44)                    as u8;
        s.bytes[26] =  (self.0[4] >>  0)                    as u8;
        s.bytes[27] =  (self.0[4] >>  8)                    as u8;
        s.bytes[28] =  (self.0[4] >> 16)                    as u8;
        s.bytes[29] =  (self.0[4] >> 24)                    as u8;
        s.bytes[30] =  (self.0[4] >> 32)                    as u8;
        s.bytes[31] =  (self.0[4] >> 40)                    as u8;

        s
    }

    /// Compute `a + b` (mod l).
    pub(crate) fn add(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut sum = UnpackedScalar::ZERO;
        let mask = (1u64 << 52) - 1;

        // a + b
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & mask;
        }

        // subtract l if the sum is >= l
        UnpackedScalar::sub(&sum, &constants::L)
    }

    /// Compute `a - b` (mod l).
    pub(crate) fn sub(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let mut difference = UnpackedScalar::ZERO;
        let mask = (1u64 << 52) - 1;

        // a - b
        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & mask;
        }

        // conditionally add l if the difference is negative
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (constants::L.0[i] & underflow_mask);
            difference.0[i] = carry & mask;
        }

        difference
    }

    /// Compute `a * b` as the full 9-limb double-width product.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of z[*] calculations
    pub(crate) fn mul_internal(a: &UnpackedScalar, b: &UnpackedScalar) -> [u128; 9] {
        let a = &a.0;
        let b = &b.0;
        let mut z = [0u128; 9];

        z[0] = m(a[0], b[0]);
        z[1] = m(a[0], b[1]) + m(a[1], b[0]);
        z[2] = m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]);
        z[3] = m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]);
        z[4] = m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]);
        z[5] =                 m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]);
        z[6] =                                 m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]);
        z[7] =                                                 m(a[3], b[4]) + m(a[4], b[3]);
        z[8] =                                                                 m(a[4], b[4]);

        z
    }

    /// Compute `limbs/R` (mod l), where R is the Montgomery modulus 2^260.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of n* and r* calculations
    pub(crate) fn montgomery_reduce(limbs: &[u128; 9]) -> UnpackedScalar {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(constants::LFACTOR) & ((1u64 << 52) - 1);
            ((sum + m(p, constants::L.0[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & ((1u64 << 52) - 1);
            (sum >> 52, w)
        }

        // note: l[3] is zero, so its multiples can be skipped
        let l = &constants::L.0;

        // the first half computes the Montgomery adjustment factor n,
        // and begins adding n*l to make limbs divisible by R
        let (carry, n0) = part1(        limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3]               + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4])               + m(n2, l[2]) + m(n3, l[1]));

        // limbs is divisible by R now, so we can divide by R by simply
        // storing the upper half as the result
        let (carry, r0) = part2(carry + limbs[5]               + m(n1, l[4])               + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6]                             + m(n2, l[4])               + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7]                                           + m(n3, l[4])             );
        let (carry, r3) = part2(carry + limbs[8]                                                         + m(n4, l[4]));
        let         r4 = carry as u64;

        // result may be >= l, so attempt to subtract l
        UnpackedScalar::sub(&UnpackedScalar([r0, r1, r2, r3, r4]), &constants::L)
    }

    /// Compute `a * b` (mod l).
    #[inline(never)]
    pub(crate) fn mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        let ab = UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b));
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(&ab, &constants::RR))
    }

    /// Compute `(a * b) / R` (mod l), where R is the Montgomery modulus 2^260.
    #[inline(never)]
    pub(crate) fn montgomery_mul(a: &UnpackedScalar, b: &UnpackedScalar) -> UnpackedScalar {
        UnpackedScalar::montgomery_reduce(&UnpackedScalar::mul_internal(a, b))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// x = 2238329342913194256032495932344128051776374960164957527413114840482143558222
    pub static X: Scalar = Scalar {
        bytes: [
            0x4e, 0x5a, 0xb4, 0x34, 0x5d, 0x47, 0x08, 0x84, 0x59, 0x13, 0xb4, 0x64, 0x1b, 0xc2,
            0x7d, 0x52, 0x52, 0xa5, 0x85, 0x10, 0x1b, 0xcc, 0x42, 0x44, 0xd4, 0x49, 0xf4, 0xa8,
            0x79, 0xd9, 0xf2, 0x04,
        ],
    };
    /// y = 2592331292931086675770238855846338635550719849568364935475441891787804997264
    pub static Y: Scalar = Scalar {
        bytes: [
            0x90, 0x76, 0x33, 0xfe, 0x1c, 0x4b, 0x66, 0xa4, 0xa2, 0x8d, 0x2d, 0xd7, 0x67, 0x83,
            0x86, 0xc3, 0x53, 0xd0, 0xde, 0x54, 0x55, 0xd4, 0xfc, 0x9d, 0xe8, 0xef, 0x7a, 0xc3,
            0x1f, 0x35, 0xbb, 0x05,
        ],
    };

    /// x*y = 5690045403673944803228348699031245560686958845067437804563560795922180092780
    static X_TIMES_Y: Scalar = Scalar {
        bytes: [
            0x6c, 0x33, 0x74, 0xa1, 0x89, 0x4f, 0x62, 0x21, 0x0a, 0xaa, 0x2f, 0xe1, 0x86, 0xa6,
            0xf9, 0x2c, 0xe0, 0xaa, 0x75, 0xc2, 0x77, 0x95, 0x81, 0xc2, 0x95, 0xfc, 0x08, 0x17,
            0x9a, 0x73, 0x94, 0x0c,
        ],
    };

    pub static A_SCALAR: Scalar = Scalar {
        bytes: [
            0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8,
            0x26, 0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f,
            0x23, 0x76, 0xef, 0x09,
        ],
    };

    static A_NAF: [i8; 256] = [
        0, 13, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, -11, 0, 0, 0, 0, 3, 0,
        0, 0, 0, 1, 0, 0, 0, 0, 9, 0, 0, 0, 0, -5, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 11, 0, 0, 0,
        0, 11, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, -3, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0,
        0, 0, -1, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0, -15, 0, 0, 0, 0, -7, 0, 0, 0, 0, -9, 0, 0, 0, 0,
        0, 5, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, -3, 0, 0, 0, 0, -11, 0, 0, 0, 0, -7, 0, 0, 0, 0,
        -13, 0, 0, 0, 0, 11, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, -15, 0, 0, 0, 0, 1,
        0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, 0, 11, 0, 0,
        0, 0, 0, 15, 0, 0, 0, 0, 0, -9, 0, 0, 0, 0, 0, 0, 0, -1, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0,
        0, 0, -15, 0, 0, 0, 0, 0, 15, 0, 0, 0, 0, 15, 0, 0, 0, 0, 15, 0, 0, 0, 0, 0, 1, 0, 0, 0,
        0,
    ];

    #[test]
    fn non_adjacent_form() {
        let naf = A_SCALAR.non_adjacent_form();
        for i in 0..256 {
            assert_eq!(naf[i], A_NAF[i]);
        }
    }

    #[test]
    fn from_unsigned() {
        let val: u64 = 0xdeadbeefdeadbeef;
        let s = Scalar::from(val);
        assert_eq!(s.bytes[7], 0xde);
        assert_eq!(s.bytes[6], 0xad);
        assert_eq!(s.bytes[5], 0xbe);
        assert_eq!(s.bytes[4], 0xef);
        assert_eq!(s.bytes[3], 0xde);
        assert_eq!(s.bytes[2], 0xad);
        assert_eq!(s.bytes[1], 0xbe);
        assert_eq!(s.bytes[0], 0xef);
    }

    #[test]
    fn impl_add() {
        let two = Scalar::from(2u8);
        let one = Scalar::ONE;
        let should_be_two = &one + &one;
        assert_eq!(should_be_two, two);
    }

    #[allow(non_snake_case)]
    #[test]
    fn impl_mul() {
        let should_be_X_times_Y = &X * &Y;
        assert_eq!(should_be_X_times_Y, X_TIMES_Y);
    }

    #[test]
    fn impl_sub_self_is_zero() {
        assert_eq!(&X - &X, Scalar::ZERO);
    }

    // Negating a scalar twice should result in the original scalar.
    #[allow(non_snake_case)]
    #[test]
    fn neg_twice_is_identity() {
        let negative_X = -&X;
        let should_be_X = -&negative_X;

        assert_eq!(should_be_X, X);
    }

    #[test]
    fn scalar_reduce_wide() {
        let mut bignum = [0u8; 64];
        // set bignum = x + 2^256 x
        for i in 0..32 {
            bignum[i] = X.bytes[i];
            bignum[32 + i] = X.bytes[i];
        }
        // 3958878930004874126169954872055634648693766179881526445624823978500314864344
        // = x + 2^256 x (mod l)
        let reduced = Scalar {
            bytes: [
                216, 154, 179, 139, 210, 121, 2, 71, 69, 99, 158, 216, 23, 173, 63, 100, 204, 0,
                91, 50, 219, 153, 57, 249, 28, 82, 31, 197, 100, 165, 192, 8,
            ],
        };
        let test_red = Scalar::from_bytes_mod_order_wide(&bignum);
        for i in 0..32 {
            assert!(test_red.bytes[i] == reduced.bytes[i]);
        }
    }

    #[test]
    fn from_bytes_wide_of_all_ones() {
        // 2^512 - 1 mod l
        // = 1627715501170711445284395025044413883736156588369414752970002579683115011840
        let bignum = [255u8; 64];
        let reduced = Scalar::from_bytes_mod_order_wide(&bignum);
        let unpacked = reduced.unpack();
        let expected = UnpackedScalar([
            0x000611e3449c0f00,
            0x000a768859347a40,
            0x0007f5be65d00e1b,
            0x0009a3dceec73d21,
            0x00000399411b7c30,
        ]);
        for i in 0..5 {
            assert!(unpacked.0[i] == expected.0[i]);
        }
    }

    #[test]
    fn canonical_decoding() {
        // The group order l itself is the smallest non-canonical encoding.
        let non_canonical_bytes = constants::BASEPOINT_ORDER.bytes;
        assert!(Scalar::from_canonical_bytes(non_canonical_bytes).is_none());

        // l - 1 is canonical.
        let mut l_minus_one = constants::BASEPOINT_ORDER.bytes;
        l_minus_one[0] -= 1;
        assert!(Scalar::from_canonical_bytes(l_minus_one).is_some());

        // Anything with the high bit set is rejected outright.
        let mut high_bit = [0u8; 32];
        high_bit[31] = 0x80;
        assert!(Scalar::from_canonical_bytes(high_bit).is_none());
    }

    #[test]
    fn clamping_bounds() {
        let clamped = clamp_integer([0xff; 32]);
        // multiple of eight, high bit clear, second-highest bit set
        assert_eq!(clamped[0] & 0b0000_0111, 0);
        assert_eq!(clamped[31] & 0b1000_0000, 0);
        assert_eq!(clamped[31] & 0b0100_0000, 0b0100_0000);

        // Clamping all-zeroes still lands in [2^253, 2^254).
        let clamped_zero = clamp_integer([0u8; 32]);
        assert_eq!(clamped_zero[31], 0b0100_0000);
    }

    // Vectors for the unpacked 52-bit limb arithmetic.
    //
    // x is 2^253 - 1, which is slightly larger than the largest scalar
    // produced by this implementation (l - 1), and should show there
    // are no overflows for valid scalars.
    //
    // x = 14474011154664524427946373126085988481658748083205070504932198000989141204991
    // x = 7237005577332262213973186563042994240801631723825162898930247062703686954002 mod l
    pub static UX: UnpackedScalar = UnpackedScalar([
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x00001fffffffffff,
    ]);

    /// x^2 = 3078544782642840487852506753550082162405942681916160040940637093560259278169 mod l
    pub static UXX: UnpackedScalar = UnpackedScalar([
        0x0001668020217559,
        0x000531640ffd0ec0,
        0x00085fd6f9f38a31,
        0x000c268f73bb1cf4,
        0x000006ce65046df0,
    ]);

    /// a = 2351415481556538453565687241199399922945659411799870114962672658845158063753
    pub static UA: UnpackedScalar = UnpackedScalar([
        0x0005236c07b3be89,
        0x0001bc3d2a67c0c4,
        0x000a4aa782aae3ee,
        0x0006b3f6e4fec4c4,
        0x00000532da9fab8c,
    ]);

    /// b = 4885590095775723760407499321843594317911456947580037491039278279440296187236
    pub static UB: UnpackedScalar = UnpackedScalar([
        0x000d3fae55421564,
        0x000c2df24f65a4bc,
        0x0005b5587d69fb0b,
        0x00094c091b013b3b,
        0x00000acd25605473,
    ]);

    /// a+b = 0
    /// a-b = 4702830963113076907131374482398799845891318823599740229925345317690316127506
    pub static UAB: UnpackedScalar = UnpackedScalar([
        0x000a46d80f677d12,
        0x0003787a54cf8188,
        0x0004954f0555c7dc,
        0x000d67edc9fd8989,
        0x00000a65b53f5718,
    ]);

    #[test]
    fn unpacked_mul_max() {
        let res = UnpackedScalar::mul(&UX, &UX);
        for i in 0..5 {
            assert!(res.0[i] == UXX.0[i]);
        }
    }

    #[test]
    fn unpacked_add() {
        let res = UnpackedScalar::add(&UA, &UB);
        for i in 0..5 {
            assert!(res.0[i] == 0);
        }
    }

    #[test]
    fn unpacked_sub() {
        let res = UnpackedScalar::sub(&UA, &UB);
        for i in 0..5 {
            assert!(res.0[i] == UAB.0[i]);
        }
    }

    #[test]
    fn pack_unpack_round_trips() {
        assert_eq!(X.unpack().pack(), X);
        assert_eq!(Y.unpack().pack(), Y);
        assert_eq!(A_SCALAR.unpack().pack(), A_SCALAR);
    }
}
