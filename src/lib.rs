//! # ecdsa-secp256k1
//!
//! ECDSA over the secp256k1 curve: key derivation, RFC 6979 deterministic
//! nonces, low-S signing, verification and public-key recovery, together
//! with the DER, compact and SEC1 wire encodings.
//!
//! Message hashing is the caller's responsibility; every signing and
//! verification entry point consumes a pre-hashed 32-byte value.
//!
//! ## Example
//!
//! ```
//! use ecdsa_secp256k1::ecdsa::{EllipticCurve, KeyPair, SECP256K1};
//! use sha2::{Digest, Sha256};
//!
//! # fn main() -> ecdsa_secp256k1::Result<()> {
//! let keypair = KeyPair::generate(SECP256K1, &mut rand::rngs::OsRng)?;
//! let msg_hash: [u8; 32] = Sha256::digest(b"message").into();
//!
//! let signature = keypair.sign_recoverable(&msg_hash)?;
//! assert!(keypair.verify(&signature, &msg_hash)?);
//!
//! let recovered = SECP256K1.recover(
//!     &signature,
//!     signature.recovery_id().unwrap(),
//!     &msg_hash,
//! )?;
//! assert_eq!(&recovered, keypair.public_key());
//! # Ok(())
//! # }
//! ```

pub mod bigint;
pub mod ec;
pub mod ecdsa;
pub mod error;
pub mod signature;

pub use ec::{Point, PublicKey, Scalar};
pub use ecdsa::{EllipticCurve, KeyPair, Secp256k1, SECP256K1};
pub use error::{Error, Result};
pub use signature::{RecoveryId, Signature};
