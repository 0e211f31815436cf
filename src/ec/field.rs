//! secp256k1 field arithmetic
//!
//! Elements of F_p for p = 2^256 - 2^32 - 977. The hot multiplication path
//! reduces 512-bit products with the fold 2^256 = 2^32 + 977 (mod p); the
//! generic square-root and inverse contracts live in [`crate::bigint`].

use crate::bigint::{U256, NLIMBS};
use crate::error::{Error, Result};
use crate::ec::FIELD_ELEMENT_SIZE;

/// p = 0xFFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F,
/// stored as little-endian 32-bit limbs
pub(crate) const P: U256 = U256([
    0xFFFF_FC2F,
    0xFFFF_FFFE,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
]);

/// p - 2, the Fermat inversion exponent, big-endian
const P_MINUS_2: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
    0xFC, 0x2D,
];

/// secp256k1 field element, always reduced below `p`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) U256);

impl FieldElement {
    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement(U256::ZERO)
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        FieldElement(U256::ONE)
    }

    /// Build a field element from a small literal (`0 <= n < 2^32`)
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        FieldElement(U256::from_u32(n))
    }

    /// Create a field element from big-endian bytes.
    ///
    /// Returns an error if the value is not below `p`.
    pub fn from_bytes(bytes: &[u8; FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let value = U256::from_be_bytes(bytes);
        if value >= P {
            return Err(Error::InvalidPoint {
                reason: "field element is not below the curve prime",
            });
        }
        Ok(FieldElement(value))
    }

    /// Convert to big-endian bytes
    pub fn to_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.0.to_be_bytes()
    }

    /// Check if the element is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Return true if the element is odd (least-significant bit = 1)
    pub fn is_odd(&self) -> bool {
        self.0.is_odd()
    }

    /// `(self + other) mod p`
    pub fn add(&self, other: &Self) -> Self {
        FieldElement(self.0.add_mod(&other.0, &P))
    }

    /// `(self - other) mod p`
    pub fn sub(&self, other: &Self) -> Self {
        FieldElement(self.0.sub_mod(&other.0, &P))
    }

    /// `2 * self mod p`
    #[inline]
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// `(self * other) mod p`
    pub fn mul(&self, other: &Self) -> Self {
        Self::reduce_wide(self.0.mul_wide(&other.0))
    }

    /// `self^2 mod p`
    #[inline]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Additive inverse: `p - self` for non-zero values
    pub fn negate(&self) -> Self {
        FieldElement(U256::ZERO.sub_mod(&self.0, &P))
    }

    /// Multiplicative inverse via Fermat: `self^(p-2) mod p`.
    ///
    /// Fails with a math error for zero.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::Math {
                operation: "field inverse",
                reason: "value is not invertible",
            });
        }
        let mut result = Self::one();
        for &byte in P_MINUS_2.iter() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(self);
                }
            }
        }
        Ok(result)
    }

    /// Both square roots `{r, p-r}` of this element, or `None` when it is
    /// not a quadratic residue
    pub fn sqrt(&self) -> Option<(Self, Self)> {
        let roots = self
            .0
            .sqrt_mod(&P)
            .expect("secp256k1 prime is congruent to 3 mod 4");
        roots.map(|(r1, r2)| (FieldElement(r1), FieldElement(r2)))
    }

    /// Reduce a 512-bit product modulo p using 2^256 = 2^32 + 977 (mod p)
    fn reduce_wide(wide: [u32; NLIMBS * 2]) -> Self {
        // fold the high half: lo + hi*977 + (hi << 32)
        let mut acc = [0u64; NLIMBS + 1];
        for i in 0..NLIMBS {
            acc[i] = wide[i] as u64;
        }
        for i in 0..NLIMBS {
            let hi = wide[NLIMBS + i] as u64;
            acc[i] += hi * 977;
            acc[i + 1] += hi;
        }

        let mut carry = 0u64;
        for limb in acc.iter_mut() {
            let v = *limb + carry;
            *limb = v & 0xFFFF_FFFF;
            carry = v >> 32;
        }

        let mut limbs = [0u32; NLIMBS];
        for (out, &limb) in limbs.iter_mut().zip(acc.iter()) {
            *out = limb as u32;
        }
        let mut value = U256(limbs);
        let mut overflow = (carry << 32) | acc[NLIMBS];

        // fold the residual overflow, at most twice
        while overflow != 0 {
            let contribution = (overflow as u128) * 977 + ((overflow as u128) << 32);
            let mut rest = contribution;
            let mut carry2 = 0u128;
            let mut v = value.0;
            for limb in v.iter_mut() {
                let tmp = *limb as u128 + (rest & 0xFFFF_FFFF) + carry2;
                *limb = (tmp & 0xFFFF_FFFF) as u32;
                carry2 = tmp >> 32;
                rest >>= 32;
            }
            value = U256(v);
            overflow = carry2 as u64;
        }

        // at most two conditional subtractions of p
        for _ in 0..2 {
            if value >= P {
                value = value.wrapping_sub(&P);
            }
        }
        FieldElement(value)
    }
}
