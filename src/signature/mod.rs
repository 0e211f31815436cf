//! ECDSA signature type and its wire encodings
//!
//! A signature carries the scalar pair (r, s) and, when produced by
//! recoverable signing, a recovery id selecting which of the four candidate
//! points public-key recovery should use. Two serializations are supported:
//! ASN.1 DER (SEQUENCE of two INTEGERs) and a fixed 65-byte compact form.

pub mod rfc6979;

use crate::ec::scalar::Scalar;
use crate::ec::SCALAR_SIZE;
use crate::error::{validate, Error, Result};
use core::fmt;
use subtle::ConstantTimeEq;

/// Size of a compact signature: recovery byte + r + s
pub const SIGNATURE_COMPACT_SIZE: usize = 1 + 2 * SCALAR_SIZE;

/// Largest DER signature this crate produces: 6 header bytes plus two
/// 33-byte integers (32 significant bytes and a sign pad each)
pub const SIGNATURE_DER_MAX_SIZE: usize = 72;

/// Identifies which of the four candidate points public-key recovery
/// should reconstruct.
///
/// Bit 0 is the parity of R.y; bit 1 is set in the rare case where R.x
/// overflowed the group order and was reduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Wrap a raw recovery id, which must be in `0..=3`.
    pub fn new(id: u8) -> Result<Self> {
        if id > 3 {
            return Err(Error::Signature {
                reason: "recovery id must be in 0..=3",
            });
        }
        Ok(RecoveryId(id))
    }

    pub(crate) fn from_parts(is_x_reduced: bool, is_y_odd: bool) -> Self {
        RecoveryId((u8::from(is_x_reduced) << 1) | u8::from(is_y_odd))
    }

    /// The raw id byte (0, 1, 2 or 3).
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Parity of the ephemeral point's y-coordinate.
    pub fn is_y_odd(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether the ephemeral point's x-coordinate exceeded the group order.
    pub fn is_x_reduced(self) -> bool {
        self.0 & 2 != 0
    }

    pub(crate) fn flip_parity(self) -> Self {
        RecoveryId(self.0 ^ 1)
    }
}

/// An ECDSA signature (r, s) with an optional recovery id.
///
/// Both scalars are guaranteed to be in `[1, n-1]`; every decoding path
/// enforces the range. Immutable once constructed.
#[derive(Clone)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
    recovery_id: Option<RecoveryId>,
}

impl Signature {
    /// Assemble a signature from already-validated scalars.
    pub fn new(r: Scalar, s: Scalar) -> Self {
        Signature {
            r,
            s,
            recovery_id: None,
        }
    }

    /// Assemble a recoverable signature.
    pub fn new_recoverable(r: Scalar, s: Scalar, recovery_id: RecoveryId) -> Self {
        Signature {
            r,
            s,
            recovery_id: Some(recovery_id),
        }
    }

    /// Build a signature from 32-byte big-endian r and s components.
    pub fn from_components(
        r: &[u8; SCALAR_SIZE],
        s: &[u8; SCALAR_SIZE],
    ) -> Result<Self> {
        let r = Scalar::from_bytes(r).map_err(|_| Error::Signature {
            reason: "r is zero or not below the group order",
        })?;
        let s = Scalar::from_bytes(s).map_err(|_| Error::Signature {
            reason: "s is zero or not below the group order",
        })?;
        Ok(Signature::new(r, s))
    }

    /// The r component.
    pub fn r(&self) -> &Scalar {
        &self.r
    }

    /// The s component.
    pub fn s(&self) -> &Scalar {
        &self.s
    }

    /// The recovery id, when one was computed at signing time or decoded
    /// from a compact signature.
    pub fn recovery_id(&self) -> Option<RecoveryId> {
        self.recovery_id
    }

    /// Copy of this signature with the given recovery id attached.
    pub fn with_recovery_id(&self, recovery_id: RecoveryId) -> Self {
        Signature {
            r: self.r.clone(),
            s: self.s.clone(),
            recovery_id: Some(recovery_id),
        }
    }

    /// Serialize to ASN.1 DER: `0x30 len 0x02 lenR R 0x02 lenS S`.
    ///
    /// Integers are minimal-length big-endian with a 0x00 pad byte when
    /// the leading byte has its high bit set.
    pub fn to_der(&self) -> Vec<u8> {
        let r_bytes = der_integer(&self.r.to_bytes());
        let s_bytes = der_integer(&self.s.to_bytes());

        let mut der = Vec::with_capacity(SIGNATURE_DER_MAX_SIZE);
        der.push(0x30);
        der.push((4 + r_bytes.len() + s_bytes.len()) as u8);
        der.push(0x02);
        der.push(r_bytes.len() as u8);
        der.extend_from_slice(&r_bytes);
        der.push(0x02);
        der.push(s_bytes.len() as u8);
        der.extend_from_slice(&s_bytes);
        der
    }

    /// Parse an ASN.1 DER signature.
    ///
    /// The parse is strict: the outer length must cover the whole input,
    /// both integers must fit in 32 significant bytes, and trailing bytes
    /// are rejected. The result never carries a recovery id.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        if der.len() < 8 || der.len() > SIGNATURE_DER_MAX_SIZE {
            return Err(Error::Signature {
                reason: "DER signature has an impossible length",
            });
        }
        if der[0] != 0x30 {
            return Err(Error::Signature {
                reason: "DER signature does not start with a SEQUENCE tag",
            });
        }
        if der[1] as usize != der.len() - 2 {
            return Err(Error::Signature {
                reason: "DER SEQUENCE length does not match the input",
            });
        }

        let mut pos = 2;
        let r = der_read_integer(der, &mut pos)?;
        let s = der_read_integer(der, &mut pos)?;
        if pos != der.len() {
            return Err(Error::Signature {
                reason: "trailing bytes after the DER SEQUENCE",
            });
        }
        Self::from_components(&r, &s)
    }

    /// Serialize to the 65-byte compact form: `recoveryId || r || s`.
    ///
    /// The leading byte is the raw recovery id (0 to 3, no legacy 27+
    /// offset). Fails when the signature carries no recovery id.
    pub fn to_compact(&self) -> Result<[u8; SIGNATURE_COMPACT_SIZE]> {
        let recovery_id = self.recovery_id.ok_or(Error::Signature {
            reason: "compact serialization requires a recovery id",
        })?;
        let mut out = [0u8; SIGNATURE_COMPACT_SIZE];
        out[0] = recovery_id.to_byte();
        out[1..33].copy_from_slice(&self.r.to_bytes());
        out[33..].copy_from_slice(&self.s.to_bytes());
        Ok(out)
    }

    /// Parse a 65-byte compact signature.
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        validate::length("compact signature", bytes.len(), SIGNATURE_COMPACT_SIZE)?;
        let recovery_id = RecoveryId::new(bytes[0])?;
        let mut r = [0u8; SCALAR_SIZE];
        let mut s = [0u8; SCALAR_SIZE];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..]);
        Ok(Self::from_components(&r, &s)?.with_recovery_id(recovery_id))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        // constant-time over the scalar pair; the recovery id is public
        let scalars_eq: bool = (self.r.to_bytes()[..].ct_eq(&other.r.to_bytes())
            & self.s.to_bytes()[..].ct_eq(&other.s.to_bytes()))
        .into();
        scalars_eq && self.recovery_id == other.recovery_id
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Signature");
        dbg.field("r", &format_args!("0x{}", hex::encode(self.r.to_bytes())))
            .field("s", &format_args!("0x{}", hex::encode(self.s.to_bytes())));
        if let Some(recovery_id) = self.recovery_id {
            dbg.field("recovery_id", &recovery_id.to_byte());
        }
        dbg.finish()
    }
}

/// Minimal-length DER INTEGER body for a 32-byte big-endian scalar
fn der_integer(bytes: &[u8; SCALAR_SIZE]) -> Vec<u8> {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(SCALAR_SIZE - 1);
    let mut out = Vec::with_capacity(SCALAR_SIZE + 1);
    if bytes[start] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(&bytes[start..]);
    out
}

/// Read one INTEGER from `der` at `pos`, returning it left-padded to
/// 32 bytes
fn der_read_integer(der: &[u8], pos: &mut usize) -> Result<[u8; SCALAR_SIZE]> {
    if *pos + 2 > der.len() {
        return Err(Error::Signature {
            reason: "DER INTEGER header is truncated",
        });
    }
    if der[*pos] != 0x02 {
        return Err(Error::Signature {
            reason: "expected a DER INTEGER tag",
        });
    }
    let len = der[*pos + 1] as usize;
    *pos += 2;
    if len == 0 || *pos + len > der.len() {
        return Err(Error::Signature {
            reason: "DER INTEGER length is out of bounds",
        });
    }
    let raw = &der[*pos..*pos + len];
    *pos += len;

    // strip sign padding and leading zeros
    let significant = match raw.iter().position(|&b| b != 0) {
        Some(i) => &raw[i..],
        None => &raw[raw.len() - 1..],
    };
    if significant.len() > SCALAR_SIZE {
        return Err(Error::Signature {
            reason: "DER INTEGER does not fit in 32 bytes",
        });
    }
    let mut out = [0u8; SCALAR_SIZE];
    out[SCALAR_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(out)
}
