//! Error handling for the secp256k1 ECDSA primitives

use core::fmt;

/// The error type for all curve, signature and key operations.
///
/// Every failure in this crate is returned as one of these variants; nothing
/// panics on untrusted input. The bounded RFC6979 retry loop and the 4-way
/// recovery-id search are the only internal retries, both deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Private key is not exactly 32 bytes or its scalar value is outside `[1, n-1]`
    InvalidPrivateKey {
        /// Reason why the private key was rejected
        reason: &'static str,
    },

    /// Coordinates do not satisfy the curve equation, or a point operation
    /// produced a point that fails re-validation
    InvalidPoint {
        /// Reason why the point was rejected
        reason: &'static str,
    },

    /// Malformed signature material: zero or out-of-range r/s, bad DER
    /// structure, wrong byte length, missing recovery id
    Signature {
        /// Reason why the signature was rejected
        reason: &'static str,
    },

    /// Modular arithmetic failure (non-invertible value, unsupported modulus
    /// for square root extraction, division by zero)
    Math {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        reason: &'static str,
    },

    /// RFC6979 exhausted its bounded retry loop without producing a valid
    /// nonce. Practically unreachable, but a defined condition rather than
    /// a panic.
    NonceGeneration {
        /// Reason why nonce derivation failed
        reason: &'static str,
    },

    /// Public key recovery produced no valid point, or the recovered key
    /// does not validate the original signature
    PointRecovery {
        /// Reason why recovery failed
        reason: &'static str,
    },

    /// None of the four candidate recovery ids reproduced the expected
    /// public key
    RecoveryIdNotFound,

    /// Byte-length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

/// Result type for all operations in this crate
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPrivateKey { reason } => {
                write!(f, "Invalid private key: {}", reason)
            }
            Error::InvalidPoint { reason } => {
                write!(f, "Invalid curve point: {}", reason)
            }
            Error::Signature { reason } => {
                write!(f, "Invalid signature: {}", reason)
            }
            Error::Math { operation, reason } => {
                write!(f, "Math error in {}: {}", operation, reason)
            }
            Error::NonceGeneration { reason } => {
                write!(f, "RFC6979 nonce generation failed: {}", reason)
            }
            Error::PointRecovery { reason } => {
                write!(f, "Public key recovery failed: {}", reason)
            }
            Error::RecoveryIdNotFound => {
                write!(f, "No recovery id in 0..=3 matches the public key")
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// Validation helpers shared across modules
pub(crate) mod validate {
    use super::{Error, Result};

    /// Validate an exact byte length
    #[inline(always)]
    pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(Error::Length {
                context,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
