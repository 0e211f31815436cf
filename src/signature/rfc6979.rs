//! RFC 6979 deterministic nonce derivation
//!
//! Derives the per-signature scalar k from the private key and message hash
//! with an HMAC-DRBG, so the same (key, hash) pair always signs with the
//! same nonce and no RNG is involved. Generic over the HMAC hash; SHA-1,
//! SHA-256 and SHA-512 are the supported instantiations and SHA-256 is the
//! signing default.

use crate::ec::scalar::Scalar;
use crate::ec::SCALAR_SIZE;
use crate::error::{Error, Result};
use hmac::{Mac, SimpleHmac};
use sha2::digest::{core_api::BlockSizeUser, Digest};
use zeroize::Zeroize;

/// Retry bound for the candidate loop. Each round succeeds with
/// overwhelming probability, so hitting the bound indicates corrupted
/// inputs rather than bad luck.
const MAX_ROUNDS: usize = 100;

/// Derive a deterministic nonce k in `[1, n-1]` per RFC 6979 §3.2.
pub fn generate_nonce<D>(
    msg_hash: &[u8; SCALAR_SIZE],
    private_key: &Scalar,
) -> Result<Scalar>
where
    D: Digest + BlockSizeUser + Clone,
{
    let mut x = private_key.to_bytes();
    let holen = <D as Digest>::output_size();

    // V = 0x01..01, K = 0x00..00, each one hash-output long
    let mut v = vec![0x01u8; holen];
    let mut k = vec![0x00u8; holen];

    // K = HMAC_K(V || 0x00 || x || h1); V = HMAC_K(V)
    k = hmac_chain::<D>(&k, &[&v, &[0x00], &x, msg_hash]);
    v = hmac_chain::<D>(&k, &[&v]);

    // K = HMAC_K(V || 0x01 || x || h1); V = HMAC_K(V)
    k = hmac_chain::<D>(&k, &[&v, &[0x01], &x, msg_hash]);
    v = hmac_chain::<D>(&k, &[&v]);
    x.zeroize();

    for _ in 0..MAX_ROUNDS {
        // build T until it holds at least qlen = 256 bits
        let mut t = Vec::with_capacity(SCALAR_SIZE);
        while t.len() < SCALAR_SIZE {
            v = hmac_chain::<D>(&k, &[&v]);
            t.extend_from_slice(&v);
        }

        // bits2int: keep the 256 most significant bits of T
        let mut candidate = [0u8; SCALAR_SIZE];
        candidate.copy_from_slice(&t[..SCALAR_SIZE]);
        t.zeroize();
        if let Ok(nonce) = Scalar::from_bytes(&candidate) {
            candidate.zeroize();
            return Ok(nonce);
        }

        // candidate out of range: K = HMAC_K(V || 0x00); V = HMAC_K(V)
        k = hmac_chain::<D>(&k, &[&v, &[0x00]]);
        v = hmac_chain::<D>(&k, &[&v]);
    }

    Err(Error::NonceGeneration {
        reason: "no candidate in range after 100 rounds",
    })
}

fn hmac_chain<D>(key: &[u8], parts: &[&[u8]]) -> Vec<u8>
where
    D: Digest + BlockSizeUser + Clone,
{
    let mut mac = SimpleHmac::<D>::new_from_slice(key)
        .expect("HMAC accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().as_slice().to_vec()
}
