//! Key pair convenience wrapper
//!
//! Holds a validated private key together with its derived public key so
//! repeated signing does not re-run the base-point multiplication.

use crate::ec::public_key::PublicKey;
use crate::ec::scalar::Scalar;
use crate::ec::SCALAR_SIZE;
use crate::error::Result;
use crate::signature::{RecoveryId, Signature};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::EllipticCurve;

/// A validated private key and its cached public key, bound to a curve
/// implementation.
///
/// The private scalar and its byte form are wiped on drop.
pub struct KeyPair<C: EllipticCurve> {
    curve: C,
    private_key: Scalar,
    private_bytes: [u8; SCALAR_SIZE],
    public_key: PublicKey,
}

impl<C: EllipticCurve> KeyPair<C> {
    /// Validate a 32-byte private key and derive its public key.
    pub fn new(curve: C, private_key: &[u8]) -> Result<Self> {
        let scalar = curve.validate_private_key(private_key)?;
        let public_key = curve.public_key(private_key)?;
        let mut private_bytes = [0u8; SCALAR_SIZE];
        private_bytes.copy_from_slice(private_key);
        Ok(KeyPair {
            curve,
            private_key: scalar,
            private_bytes,
            public_key,
        })
    }

    /// Generate a fresh random key pair.
    pub fn generate<R: CryptoRng + RngCore>(curve: C, rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; SCALAR_SIZE];
        loop {
            rng.fill_bytes(&mut bytes);
            if curve.validate_private_key(&bytes).is_ok() {
                let keypair = Self::new(curve, &bytes);
                bytes.zeroize();
                return keypair;
            }
        }
    }

    /// The derived public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The private scalar.
    pub fn private_key(&self) -> &Scalar {
        &self.private_key
    }

    /// Sign a 32-byte message hash, discarding the recovery id.
    pub fn sign(&self, msg_hash: &[u8; SCALAR_SIZE]) -> Result<Signature> {
        let signature = self.curve.sign(&self.private_bytes, msg_hash, None)?;
        Ok(Signature::new(signature.r().clone(), signature.s().clone()))
    }

    /// Sign a 32-byte message hash, keeping the recovery id for later
    /// public-key recovery.
    pub fn sign_recoverable(&self, msg_hash: &[u8; SCALAR_SIZE]) -> Result<Signature> {
        self.curve.sign(&self.private_bytes, msg_hash, None)
    }

    /// Verify a signature over a message hash against this key pair's
    /// public key.
    pub fn verify(&self, signature: &Signature, msg_hash: &[u8; SCALAR_SIZE]) -> Result<bool> {
        self.curve.verify(&self.public_key, signature, msg_hash)
    }

    /// Brute-force the recovery id of a signature made by this key pair.
    pub fn find_recovery_id(
        &self,
        signature: &Signature,
        msg_hash: &[u8; SCALAR_SIZE],
    ) -> Result<RecoveryId> {
        self.curve
            .find_recovery_id(&self.public_key, signature, msg_hash)
    }
}

impl<C: EllipticCurve> Zeroize for KeyPair<C> {
    fn zeroize(&mut self) {
        self.private_key.zeroize();
        self.private_bytes.zeroize();
    }
}

impl<C: EllipticCurve> Drop for KeyPair<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}
