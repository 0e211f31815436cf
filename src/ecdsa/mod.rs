//! ECDSA signing, verification and public-key recovery over secp256k1
//!
//! The protocol logic is stateless: every operation is a pure function of
//! the curve constants and its inputs, so calls can run concurrently
//! without coordination. Message hashing is the caller's job; all
//! operations consume a pre-hashed 32-byte value.

mod keypair;

pub use keypair::KeyPair;

use crate::bigint::U256;
use crate::ec::field::FieldElement;
use crate::ec::point::Point;
use crate::ec::public_key::PublicKey;
use crate::ec::scalar::{Scalar, N};
use crate::ec::{base_point_g, curve_equation_rhs, SCALAR_SIZE};
use crate::error::{Error, Result};
use crate::signature::{rfc6979, RecoveryId, Signature};
use sha2::Sha256;
use zeroize::Zeroize;

/// The one polymorphic seam of the crate: an ECDSA-capable curve.
///
/// [`Secp256k1`] is the native implementation. An out-of-process signer
/// (for example a JSON-RPC adapter) would implement the same trait and be
/// indistinguishable to callers.
pub trait EllipticCurve {
    /// Check that a private key is exactly 32 bytes encoding a scalar in
    /// `[1, n-1]`, returning the scalar.
    fn validate_private_key(&self, private_key: &[u8]) -> Result<Scalar>;

    /// Derive the public key `d * G` for a private key.
    fn public_key(&self, private_key: &[u8]) -> Result<PublicKey>;

    /// Produce a recoverable low-S signature over a 32-byte message hash.
    ///
    /// When `nonce` is `None` the nonce is derived deterministically with
    /// RFC 6979 over HMAC-SHA-256; a caller wanting a different digest can
    /// derive k with [`rfc6979::generate_nonce`] and pass it in.
    fn sign(
        &self,
        private_key: &[u8],
        msg_hash: &[u8; SCALAR_SIZE],
        nonce: Option<&Scalar>,
    ) -> Result<Signature>;

    /// Check a signature against a public key and message hash.
    ///
    /// A well-formed but non-matching signature yields `Ok(false)`, not an
    /// error; errors are reserved for inputs that cannot be processed at
    /// all.
    fn verify(
        &self,
        public_key: &PublicKey,
        signature: &Signature,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<bool>;

    /// Reconstruct the signing public key from a signature, a recovery id
    /// and the message hash.
    fn recover(
        &self,
        signature: &Signature,
        recovery_id: RecoveryId,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<PublicKey>;

    /// Search `0..=3` for the recovery id that reconstructs the given
    /// public key.
    fn find_recovery_id(
        &self,
        public_key: &PublicKey,
        signature: &Signature,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<RecoveryId>;
}

/// Native secp256k1 ECDSA implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1;

/// Process-wide curve instance; the curve carries no state, so a shared
/// constant is all that is needed.
pub const SECP256K1: Secp256k1 = Secp256k1;

impl EllipticCurve for Secp256k1 {
    fn validate_private_key(&self, private_key: &[u8]) -> Result<Scalar> {
        if private_key.len() != SCALAR_SIZE {
            return Err(Error::InvalidPrivateKey {
                reason: "private key must be exactly 32 bytes",
            });
        }
        let mut bytes = [0u8; SCALAR_SIZE];
        bytes.copy_from_slice(private_key);
        let scalar = Scalar::from_bytes(&bytes).map_err(|_| Error::InvalidPrivateKey {
            reason: "private key scalar is not in [1, n-1]",
        });
        bytes.zeroize();
        scalar
    }

    fn public_key(&self, private_key: &[u8]) -> Result<PublicKey> {
        let d = self.validate_private_key(private_key)?;
        let point = base_point_g().mul(&d)?;
        PublicKey::from_point(&point)
    }

    fn sign(
        &self,
        private_key: &[u8],
        msg_hash: &[u8; SCALAR_SIZE],
        nonce: Option<&Scalar>,
    ) -> Result<Signature> {
        let d = self.validate_private_key(private_key)?;
        let k = match nonce {
            Some(k) => k.clone(),
            None => rfc6979::generate_nonce::<Sha256>(msg_hash, &d)?,
        };
        if k.is_zero() {
            return Err(Error::Signature {
                reason: "nonce must be in [1, n-1]",
            });
        }

        // R = k * G; r = R.x mod n
        let r_point = base_point_g().mul(&k)?;
        if r_point.is_identity() {
            return Err(Error::Signature {
                reason: "nonce produced the point at infinity",
            });
        }
        let x_bytes = r_point.x_coordinate_bytes();
        let is_x_reduced = U256::from_be_bytes(&x_bytes) >= N;
        let r = Scalar::reduce_from_bytes(&x_bytes);
        if r.is_zero() {
            return Err(Error::Signature { reason: "r is zero" });
        }

        // s = k^-1 * (e + d*r) mod n
        let e = Scalar::reduce_from_bytes(msg_hash);
        let mut s = k.invert()?.mul(&e.add(&d.mul(&r)));
        if s.is_zero() {
            return Err(Error::Signature { reason: "s is zero" });
        }

        let mut recovery_id = RecoveryId::from_parts(is_x_reduced, r_point.y_field().is_odd());

        // BIP62 low-S: replacing s with n-s negates R's y-coordinate
        if s.is_high() {
            s = s.negate();
            recovery_id = recovery_id.flip_parity();
        }

        Ok(Signature::new_recoverable(r, s, recovery_id))
    }

    fn verify(
        &self,
        public_key: &PublicKey,
        signature: &Signature,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<bool> {
        let q = public_key.to_point()?;

        // u1 = e * s^-1, u2 = r * s^-1
        let s_inv = signature.s().invert()?;
        let e = Scalar::reduce_from_bytes(msg_hash);
        let u1 = e.mul(&s_inv);
        let u2 = signature.r().mul(&s_inv);

        // P = u1*G + u2*Q
        let p = base_point_g().mul(&u1)?.add(&q.mul(&u2)?)?;
        if p.is_identity() {
            return Ok(false);
        }
        let candidate = Scalar::reduce_from_bytes(&p.x_coordinate_bytes());
        Ok(&candidate == signature.r())
    }

    fn recover(
        &self,
        signature: &Signature,
        recovery_id: RecoveryId,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<PublicKey> {
        // x = r, or r + n when R.x overflowed the order at signing time
        let x = if recovery_id.is_x_reduced() {
            let (sum, carry) = signature.r().as_u256().overflowing_add(&N);
            if carry {
                return Err(Error::PointRecovery {
                    reason: "reduced x-coordinate does not fit the field",
                });
            }
            sum
        } else {
            *signature.r().as_u256()
        };
        let x_fe = FieldElement::from_bytes(&x.to_be_bytes()).map_err(|_| {
            Error::PointRecovery {
                reason: "candidate x-coordinate is not a field element",
            }
        })?;

        // reconstruct R with the parity the recovery id selects
        let (even_root, odd_root) = match curve_equation_rhs(&x_fe).sqrt() {
            Some((r1, r2)) => {
                if r1.is_odd() {
                    (r2, r1)
                } else {
                    (r1, r2)
                }
            }
            None => {
                return Err(Error::PointRecovery {
                    reason: "candidate x-coordinate is not on the curve",
                })
            }
        };
        let y_fe = if recovery_id.is_y_odd() {
            odd_root
        } else {
            even_root
        };
        let r_point = Point::from_field_elements(x_fe, y_fe)?;

        // Q = r^-1 * (s*R - e*G)
        let r_inv = signature.r().invert()?;
        let e = Scalar::reduce_from_bytes(msg_hash);
        let s_r = r_point.mul(signature.s())?;
        let e_g = base_point_g().mul(&e)?;
        let q = s_r.add(&e_g.negate())?.mul(&r_inv)?;
        if q.is_identity() {
            return Err(Error::PointRecovery {
                reason: "recovery produced the point at infinity",
            });
        }
        let public_key = PublicKey::from_point(&q)?;

        // a wrong recovery id can still produce a well-formed point;
        // only a key that validates the signature is returned
        if !self.verify(&public_key, signature, msg_hash)? {
            return Err(Error::PointRecovery {
                reason: "recovered key does not validate the signature",
            });
        }
        Ok(public_key)
    }

    fn find_recovery_id(
        &self,
        public_key: &PublicKey,
        signature: &Signature,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<RecoveryId> {
        for id in 0u8..=3 {
            let candidate = RecoveryId::new(id)?;
            match self.recover(signature, candidate, msg_hash) {
                Ok(recovered) if &recovered == public_key => return Ok(candidate),
                Ok(_) | Err(_) => continue,
            }
        }
        Err(Error::RecoveryIdNotFound)
    }
}
