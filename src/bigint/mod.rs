//! Fixed-width 256-bit integer with the modular arithmetic the curve needs
//!
//! All curve values fit in 256 bits; products are carried in 512-bit
//! intermediates before reduction. Little-endian 32-bit limbs, big-endian
//! byte serialization.

use crate::error::{Error, Result};
use core::cmp::Ordering;
use zeroize::Zeroize;

/// Number of 32-bit limbs in a [`U256`]
pub const NLIMBS: usize = 8;

/// Unsigned 256-bit integer stored as 8 little-endian 32-bit limbs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Zeroize)]
pub struct U256(pub(crate) [u32; NLIMBS]);

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..NLIMBS).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl U256 {
    /// The additive identity: 0
    pub const ZERO: U256 = U256([0; NLIMBS]);

    /// The multiplicative identity: 1
    pub const ONE: U256 = U256([1, 0, 0, 0, 0, 0, 0, 0]);

    /// Build from a small literal (`0 <= n < 2^32`)
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = n;
        U256(limbs)
    }

    /// Parse 32 big-endian bytes
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        U256(limbs)
    }

    /// Serialize to 32 big-endian bytes
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, &limb) in self.0.iter().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Check whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Return true if the least-significant bit is set
    pub fn is_odd(&self) -> bool {
        (self.0[0] & 1) == 1
    }

    /// Read bit `index` (0 = least significant)
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        if index >= 256 {
            return false;
        }
        (self.0[index / 32] >> (index % 32)) & 1 == 1
    }

    #[inline]
    fn set_bit(&mut self, index: usize) {
        self.0[index / 32] |= 1 << (index % 32);
    }

    /// Number of significant bits (0 for zero)
    pub fn bit_len(&self) -> usize {
        for i in (0..NLIMBS).rev() {
            if self.0[i] != 0 {
                return i * 32 + (32 - self.0[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Shift left by `shift` bits, dropping bits shifted past 256
    pub fn shl(&self, shift: usize) -> Self {
        if shift >= 256 {
            return Self::ZERO;
        }
        let limb_shift = shift / 32;
        let bit_shift = shift % 32;
        let mut out = [0u32; NLIMBS];
        for i in (limb_shift..NLIMBS).rev() {
            let lo = self.0[i - limb_shift] << bit_shift;
            let hi = if bit_shift > 0 && i > limb_shift {
                self.0[i - limb_shift - 1] >> (32 - bit_shift)
            } else {
                0
            };
            out[i] = lo | hi;
        }
        U256(out)
    }

    /// Shift right by `shift` bits
    pub fn shr(&self, shift: usize) -> Self {
        if shift >= 256 {
            return Self::ZERO;
        }
        let limb_shift = shift / 32;
        let bit_shift = shift % 32;
        let mut out = [0u32; NLIMBS];
        for i in 0..(NLIMBS - limb_shift) {
            let lo = self.0[i + limb_shift] >> bit_shift;
            let hi = if bit_shift > 0 && i + limb_shift + 1 < NLIMBS {
                self.0[i + limb_shift + 1] << (32 - bit_shift)
            } else {
                0
            };
            out[i] = lo | hi;
        }
        U256(out)
    }

    /// Full addition, returning the carry-out flag
    pub fn overflowing_add(&self, other: &Self) -> (Self, bool) {
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;
        for ((&a, &b), out) in self.0.iter().zip(other.0.iter()).zip(r.iter_mut()) {
            let tmp = (a as u64) + (b as u64) + carry;
            *out = (tmp & 0xFFFF_FFFF) as u32;
            carry = tmp >> 32;
        }
        (U256(r), carry != 0)
    }

    /// Full subtraction, returning the borrow-out flag
    pub fn borrowing_sub(&self, other: &Self) -> (Self, bool) {
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0u64;
        for ((&a, &b), out) in self.0.iter().zip(other.0.iter()).zip(r.iter_mut()) {
            let ai = a as u64;
            let bi = b as u64;
            let tmp = ai.wrapping_sub(bi + borrow);
            *out = tmp as u32;
            borrow = (ai < bi + borrow) as u64;
        }
        (U256(r), borrow != 0)
    }

    /// Subtraction modulo 2^256
    pub fn wrapping_sub(&self, other: &Self) -> Self {
        self.borrowing_sub(other).0
    }

    /// Shift left one bit, returning the bit shifted out
    fn shl1_carry(&self) -> (Self, bool) {
        let carry = self.bit(255);
        (self.shl(1), carry)
    }

    /// Schoolbook 8x8 -> 16-limb widening multiplication
    pub fn mul_wide(&self, other: &Self) -> [u32; NLIMBS * 2] {
        let mut t = [0u128; NLIMBS * 2];
        for i in 0..NLIMBS {
            for j in 0..NLIMBS {
                t[i + j] += (self.0[i] as u128) * (other.0[j] as u128);
            }
        }
        let mut wide = [0u32; NLIMBS * 2];
        let mut carry: u128 = 0;
        for i in 0..(NLIMBS * 2) {
            let v = t[i] + carry;
            wide[i] = (v & 0xFFFF_FFFF) as u32;
            carry = v >> 32;
        }
        wide
    }

    /// Reduce a 512-bit product modulo `m` by binary long division.
    ///
    /// Generic over the modulus; the hot field path uses the specialized
    /// fold in `ec::field` instead.
    pub fn mod_wide(wide: &[u32; NLIMBS * 2], m: &Self) -> Self {
        debug_assert!(!m.is_zero());
        let mut rem = Self::ZERO;
        for i in (0..512).rev() {
            let (mut shifted, carry) = rem.shl1_carry();
            if (wide[i / 32] >> (i % 32)) & 1 == 1 {
                shifted.0[0] |= 1;
            }
            // rem < m, so rem*2 + bit < 2m: a single subtraction restores the range
            if carry || shifted >= *m {
                shifted = shifted.wrapping_sub(m);
            }
            rem = shifted;
        }
        rem
    }

    /// Reduce this value modulo `m`
    pub fn reduce(&self, m: &Self) -> Self {
        if self < m {
            return *self;
        }
        let mut wide = [0u32; NLIMBS * 2];
        wide[..NLIMBS].copy_from_slice(&self.0);
        Self::mod_wide(&wide, m)
    }

    /// Euclidean division: returns `(self / divisor, self % divisor)`
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(Error::Math {
                operation: "div_rem",
                reason: "division by zero",
            });
        }
        let mut quotient = Self::ZERO;
        let mut rem = Self::ZERO;
        for i in (0..self.bit_len()).rev() {
            let (mut shifted, carry) = rem.shl1_carry();
            if self.bit(i) {
                shifted.0[0] |= 1;
            }
            if carry || shifted >= *divisor {
                shifted = shifted.wrapping_sub(divisor);
                quotient.set_bit(i);
            }
            rem = shifted;
        }
        Ok((quotient, rem))
    }

    /// `(self + other) mod m`; both operands must already be below `m`
    pub fn add_mod(&self, other: &Self, m: &Self) -> Self {
        let (sum, carry) = self.overflowing_add(other);
        if carry || sum >= *m {
            sum.wrapping_sub(m)
        } else {
            sum
        }
    }

    /// `(self - other) mod m`; both operands must already be below `m`
    pub fn sub_mod(&self, other: &Self, m: &Self) -> Self {
        let (diff, borrow) = self.borrowing_sub(other);
        if borrow {
            diff.overflowing_add(m).0
        } else {
            diff
        }
    }

    /// `(self * other) mod m` with a full 512-bit intermediate
    pub fn mul_mod(&self, other: &Self, m: &Self) -> Self {
        Self::mod_wide(&self.mul_wide(other), m)
    }

    /// Modular exponentiation `self^exp mod m` by square-and-multiply,
    /// most-significant bit first
    pub fn pow_mod(&self, exp: &Self, m: &Self) -> Self {
        let base = self.reduce(m);
        let mut result = Self::ONE.reduce(m);
        for i in (0..exp.bit_len()).rev() {
            result = result.mul_mod(&result, m);
            if exp.bit(i) {
                result = result.mul_mod(&base, m);
            }
        }
        result
    }

    /// Modular inverse by the extended Euclidean algorithm.
    ///
    /// The Bezout coefficients are kept reduced into `[0, m)` throughout, so
    /// no signed intermediates arise. Fails when `gcd(self, m) != 1`.
    pub fn inv_mod(&self, m: &Self) -> Result<Self> {
        if m.bit_len() < 2 {
            return Err(Error::Math {
                operation: "modular inverse",
                reason: "modulus must be at least 2",
            });
        }
        let a = self.reduce(m);
        if a.is_zero() {
            return Err(Error::Math {
                operation: "modular inverse",
                reason: "value is not invertible",
            });
        }

        let mut r0 = *m;
        let mut r1 = a;
        let mut t0 = Self::ZERO;
        let mut t1 = Self::ONE;
        while !r1.is_zero() {
            let (q, r2) = r0.div_rem(&r1)?;
            let t2 = t0.sub_mod(&q.mul_mod(&t1, m), m);
            r0 = r1;
            r1 = r2;
            t0 = t1;
            t1 = t2;
        }

        if r0 != Self::ONE {
            return Err(Error::Math {
                operation: "modular inverse",
                reason: "gcd(value, modulus) != 1",
            });
        }
        Ok(t0)
    }

    /// Legendre symbol of `self` modulo the odd prime `p` via Euler's
    /// criterion: 1 for a quadratic residue, -1 for a non-residue, 0 when
    /// `self` is a multiple of `p`
    pub fn legendre(&self, p: &Self) -> i32 {
        let exp = p.wrapping_sub(&Self::ONE).shr(1);
        let e = self.pow_mod(&exp, p);
        if e.is_zero() {
            0
        } else if e == Self::ONE {
            1
        } else {
            -1
        }
    }

    /// Both square roots `{r, p-r}` of `self` modulo `p`, or `None` when
    /// `self` is not a quadratic residue.
    ///
    /// Only supports `p = 3 (mod 4)`, where the root is `self^((p+1)/4)`;
    /// any other modulus is a [`Error::Math`] failure. The secp256k1 prime
    /// satisfies the congruence.
    pub fn sqrt_mod(&self, p: &Self) -> Result<Option<(Self, Self)>> {
        if p.0[0] & 3 != 3 {
            return Err(Error::Math {
                operation: "sqrt_mod",
                reason: "modulus is not congruent to 3 mod 4",
            });
        }
        if self.legendre(p) != 1 {
            return Ok(None);
        }
        let exp = p.overflowing_add(&Self::ONE).0.shr(2);
        let root = self.pow_mod(&exp, p);
        let other = p.wrapping_sub(&root);
        Ok(Some((root, other)))
    }
}
