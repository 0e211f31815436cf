//! Integration tests for the full sign / verify / recover pipeline

use ecdsa_secp256k1::ecdsa::{EllipticCurve, KeyPair, SECP256K1};
use ecdsa_secp256k1::{PublicKey, Scalar, Signature};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

fn sha256(msg: &[u8]) -> [u8; 32] {
    Sha256::digest(msg).into()
}

#[test]
fn private_key_one_yields_the_generator() {
    let mut key = [0u8; 32];
    key[31] = 1;
    let pk = SECP256K1.public_key(&key).unwrap();
    assert_eq!(
        hex::encode(pk.to_uncompressed()),
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
         483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );
}

#[test]
fn compressed_and_uncompressed_keys_agree() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    for _ in 0..4 {
        let keypair = KeyPair::generate(SECP256K1, &mut rng).unwrap();
        let compressed = keypair.public_key().to_compressed();
        let decompressed = PublicKey::from_compressed(&compressed).unwrap();
        assert_eq!(
            decompressed.to_uncompressed(),
            keypair.public_key().to_uncompressed()
        );
    }
}

#[test]
fn end_to_end_sign_verify_recover() {
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    for round in 0u32..4 {
        let keypair = KeyPair::generate(SECP256K1, &mut rng).unwrap();
        let hash = sha256(format!("message {round}").as_bytes());

        let signature = keypair.sign_recoverable(&hash).unwrap();
        assert!(!signature.s().is_high());
        assert!(keypair.verify(&signature, &hash).unwrap());

        let recovered = SECP256K1
            .recover(&signature, signature.recovery_id().unwrap(), &hash)
            .unwrap();
        assert_eq!(&recovered, keypair.public_key());
    }
}

#[test]
fn der_and_compact_encodings_interoperate() {
    let mut key = [0u8; 32];
    key[31] = 1;
    let keypair = KeyPair::new(SECP256K1, &key).unwrap();
    let hash = sha256(b"Satoshi Nakamoto");

    let signature = keypair.sign_recoverable(&hash).unwrap();

    let from_der = Signature::from_der(&signature.to_der()).unwrap();
    assert_eq!(from_der.r(), signature.r());
    assert_eq!(from_der.s(), signature.s());

    let from_compact = Signature::from_compact(&signature.to_compact().unwrap()).unwrap();
    assert_eq!(from_compact, signature);

    // a decoded DER signature has no recovery id until brute force finds it
    let found = keypair.find_recovery_id(&from_der, &hash).unwrap();
    assert_eq!(Some(found), signature.recovery_id());
}

#[test]
fn der_round_trips_random_scalars() {
    // exercise the codec alone over 1000 signatures, covering high-bit
    // padding and leading-zero stripping without paying for point math
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    for i in 0..1000 {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        rng.fill(&mut r[..]);
        rng.fill(&mut s[..]);
        // force short integers every few rounds
        if i % 7 == 0 {
            r[..24].fill(0);
        }
        if i % 11 == 0 {
            s[..31].fill(0);
            s[31] |= 1;
        }
        let (r, s) = match (Scalar::from_bytes(&r), Scalar::from_bytes(&s)) {
            (Ok(r), Ok(s)) => (r, s),
            _ => continue, // out-of-range draw, astronomically rare
        };

        let sig = Signature::new(r.clone(), s.clone());
        let decoded = Signature::from_der(&sig.to_der()).unwrap();
        assert_eq!(decoded.r(), &r);
        assert_eq!(decoded.s(), &s);
    }
}

#[test]
fn deterministic_signatures_are_reproducible() {
    let mut key = [0u8; 32];
    key[31] = 1;
    let hash = sha256(b"determinism");

    let first = SECP256K1.sign(&key, &hash, None).unwrap();
    let second = SECP256K1.sign(&key, &hash, None).unwrap();
    assert_eq!(first, second);
}
