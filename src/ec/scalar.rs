//! secp256k1 scalar arithmetic modulo the group order n

use crate::bigint::U256;
use crate::ec::SCALAR_SIZE;
use crate::error::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// n = 0xFFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141,
/// stored as little-endian 32-bit limbs
pub(crate) const N: U256 = U256([
    0xD036_4141,
    0xBFD2_5E8C,
    0xAF48_A03B,
    0xBAAE_DCE6,
    0xFFFF_FFFE,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
]);

/// floor(n / 2), the BIP62 low-S boundary
const N_HALF: U256 = U256([
    0x681B_20A0,
    0xDFE9_2F46,
    0x57A4_501D,
    0x5D57_6E73,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0x7FFF_FFFF,
]);

/// Integer modulo the secp256k1 group order.
///
/// Private keys, nonces and the signature components r and s are all
/// scalars; values are wiped when dropped. The strict constructor enforces
/// the `[1, n-1]` range those uses require;
/// [`Scalar::reduce_from_bytes`] wraps arbitrary 256-bit values instead
/// and may produce zero.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Scalar(pub(crate) U256);

impl Scalar {
    /// Parse 32 big-endian bytes, requiring the value to lie in `[1, n-1]`
    pub fn from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<Self> {
        let value = U256::from_be_bytes(bytes);
        if value.is_zero() || value >= N {
            return Err(Error::Math {
                operation: "scalar decode",
                reason: "value is zero or exceeds the group order",
            });
        }
        Ok(Scalar(value))
    }

    /// Parse 32 big-endian bytes, reducing modulo n. May produce zero.
    pub fn reduce_from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Self {
        Scalar(U256::from_be_bytes(bytes).reduce(&N))
    }

    /// Serialize to 32 big-endian bytes
    pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
        self.0.to_be_bytes()
    }

    /// Check if this scalar is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the value exceeds n/2 and is therefore a high-S candidate
    /// under BIP62
    pub fn is_high(&self) -> bool {
        self.0 > N_HALF
    }

    pub(crate) fn as_u256(&self) -> &U256 {
        &self.0
    }

    /// `(self + other) mod n`
    pub fn add(&self, other: &Self) -> Self {
        Scalar(self.0.add_mod(&other.0, &N))
    }

    /// `(self * other) mod n`
    pub fn mul(&self, other: &Self) -> Self {
        Scalar(self.0.mul_mod(&other.0, &N))
    }

    /// Additive inverse `n - self`; zero stays zero
    pub fn negate(&self) -> Self {
        Scalar(U256::ZERO.sub_mod(&self.0, &N))
    }

    /// Multiplicative inverse modulo n by the extended Euclidean algorithm
    pub fn invert(&self) -> Result<Self> {
        Ok(Scalar(self.0.inv_mod(&N)?))
    }

    /// Number of significant bits
    pub(crate) fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Read bit `index` (0 = least significant)
    pub(crate) fn bit(&self, index: usize) -> bool {
        self.0.bit(index)
    }
}
