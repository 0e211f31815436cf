//! secp256k1 curve unit tests

use super::*;
use crate::error::Error;
use rand::rngs::OsRng;

fn fe(hex_str: &str) -> FieldElement {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hex::decode(hex_str).unwrap());
    FieldElement::from_bytes(&bytes).unwrap()
}

fn scalar_from_u32(n: u32) -> Scalar {
    let mut bytes = [0u8; 32];
    bytes[28..].copy_from_slice(&n.to_be_bytes());
    Scalar::from_bytes(&bytes).unwrap()
}

// x- and y-coordinates of 2G and 3G from the SEC2 test vectors
const G2_X: &str = "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";
const G2_Y: &str = "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a";
const G3_X: &str = "f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9";
const G3_Y: &str = "388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672";

#[test]
fn test_field_arithmetic() {
    let one = FieldElement::one();
    let two = FieldElement::from_u32(2);
    let three = FieldElement::from_u32(3);

    assert_eq!(one.add(&one), two);
    assert_eq!(three.sub(&one), two);
    assert_eq!(two.mul(&one), two);
    assert_eq!(two.double(), FieldElement::from_u32(4));
    assert_eq!(three.square(), FieldElement::from_u32(9));

    // a + (-a) = 0
    assert!(three.add(&three.negate()).is_zero());
}

#[test]
fn test_field_mul_wraps_the_prime() {
    // (p - 1)^2 mod p = 1
    let p_minus_1 = FieldElement::one().negate();
    assert_eq!(p_minus_1.square(), FieldElement::one());

    // (p - 1) * 2 mod p = p - 2
    let p_minus_2 = FieldElement::from_u32(2).negate();
    assert_eq!(p_minus_1.mul(&FieldElement::from_u32(2)), p_minus_2);
}

#[test]
fn test_field_inversion() {
    let x = fe(G2_X);
    let inv = x.invert().unwrap();
    assert_eq!(x.mul(&inv), FieldElement::one());

    assert!(FieldElement::zero().invert().is_err());
}

#[test]
fn test_field_rejects_values_above_prime() {
    let p_bytes = hex::decode("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")
        .unwrap();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&p_bytes);
    assert!(FieldElement::from_bytes(&bytes).is_err());

    bytes[31] -= 1; // p - 1 is fine
    assert!(FieldElement::from_bytes(&bytes).is_ok());
}

#[test]
fn test_field_sqrt_recovers_generator_y() {
    let g = base_point_g();
    let rhs = curve_equation_rhs(g.x_field());
    let (r1, r2) = rhs.sqrt().unwrap();
    let gy = *g.y_field();
    assert!(r1 == gy || r2 == gy);
    assert_eq!(r1.negate(), r2);

    // p = 3 mod 4, so the negation of a residue is a non-residue
    assert!(rhs.negate().sqrt().is_none());
}

#[test]
fn test_scalar_range_checks() {
    assert!(Scalar::from_bytes(&[0u8; 32]).is_err());

    let n_bytes = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
        .unwrap();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&n_bytes);
    assert!(Scalar::from_bytes(&bytes).is_err());

    bytes[31] -= 1; // n - 1 is the largest valid scalar
    let max = Scalar::from_bytes(&bytes).unwrap();
    assert!(max.is_high());
    assert!(!scalar_from_u32(1).is_high());

    // reducing constructor wraps n to zero
    bytes[31] += 1;
    assert!(Scalar::reduce_from_bytes(&bytes).is_zero());
}

#[test]
fn test_scalar_arithmetic() {
    let two = scalar_from_u32(2);
    let three = scalar_from_u32(3);
    assert_eq!(two.add(&three), scalar_from_u32(5));
    assert_eq!(two.mul(&three), scalar_from_u32(6));

    // s + (-s) = 0
    assert!(three.add(&three.negate()).is_zero());

    // s * s^-1 = 1
    let inv = three.invert().unwrap();
    assert_eq!(three.mul(&inv), scalar_from_u32(1));
}

#[test]
fn test_scalar_is_wiped() {
    // secrets passing through signing must not outlive their drop
    fn assert_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}
    assert_zeroize_on_drop::<Scalar>();

    let mut secret = scalar_from_u32(7);
    zeroize::Zeroize::zeroize(&mut secret);
    assert!(secret.is_zero());
}

#[test]
fn test_point_identity_laws() {
    let g = base_point_g();
    let o = Point::identity();

    assert_eq!(g.add(&o).unwrap(), g);
    assert_eq!(o.add(&g).unwrap(), g);
    assert!(o.add(&o).unwrap().is_identity());
    assert!(o.double().unwrap().is_identity());

    // G + (-G) = O
    assert!(g.add(&g.negate()).unwrap().is_identity());
}

#[test]
fn test_point_doubling_matches_vector() {
    let g = base_point_g();
    let g2 = g.double().unwrap();
    assert_eq!(g2.x_field(), &fe(G2_X));
    assert_eq!(g2.y_field(), &fe(G2_Y));

    // G + G takes the doubling path
    assert_eq!(g.add(&g).unwrap(), g2);
}

#[test]
fn test_point_addition_matches_vector() {
    // the reference coordinates must themselves lie on the curve
    let expected = Point::new(&fe(G3_X).to_bytes(), &fe(G3_Y).to_bytes()).unwrap();

    let g = base_point_g();
    let g3 = g.double().unwrap().add(&g).unwrap();
    assert_eq!(g3, expected);
    assert_eq!(g.mul(&scalar_from_u32(3)).unwrap(), expected);
}

#[test]
fn test_scalar_multiplication() {
    let g = base_point_g();

    assert_eq!(g.mul(&scalar_from_u32(1)).unwrap(), g);
    assert_eq!(g.mul(&scalar_from_u32(2)).unwrap(), g.double().unwrap());
    assert_eq!(
        g.mul(&scalar_from_u32(3)).unwrap().x_field(),
        &fe(G3_X)
    );

    // (n - 1) * G = -G
    let n_minus_1 = scalar_from_u32(1).negate();
    assert_eq!(g.mul(&n_minus_1).unwrap(), g.negate());

    // identity absorbs everything
    assert!(Point::identity().mul(&scalar_from_u32(7)).unwrap().is_identity());
}

#[test]
fn test_point_uncompressed_roundtrip() {
    let g2 = base_point_g().double().unwrap();
    let encoded = g2.serialize_uncompressed();
    assert_eq!(encoded[0], 0x04);
    assert_eq!(Point::deserialize_uncompressed(&encoded).unwrap(), g2);

    // off-curve coordinates are rejected
    let mut tampered = encoded;
    tampered[64] ^= 1;
    assert!(Point::deserialize_uncompressed(&tampered).is_err());
}

#[test]
fn test_point_compressed_roundtrip() {
    let g = base_point_g();
    let compressed = g.serialize_compressed();
    assert_eq!(compressed[0], 0x02); // Gy is even
    assert_eq!(Point::deserialize_compressed(&compressed).unwrap(), g);

    let neg_g = g.negate();
    let compressed_neg = neg_g.serialize_compressed();
    assert_eq!(compressed_neg[0], 0x03);
    assert_eq!(Point::deserialize_compressed(&compressed_neg).unwrap(), neg_g);
}

#[test]
fn test_point_decompression_rejects_bad_x() {
    // scan for a small x whose x^3 + 7 is a non-residue and make sure
    // decompression reports it instead of inventing a y
    let mut rejected = false;
    for x in 1u8..=32 {
        let rhs = curve_equation_rhs(&FieldElement::from_u32(x as u32));
        if rhs.sqrt().is_none() {
            let mut bytes = [0u8; 33];
            bytes[0] = 0x02;
            bytes[32] = x;
            assert!(matches!(
                Point::deserialize_compressed(&bytes),
                Err(Error::InvalidPoint { .. })
            ));
            rejected = true;
            break;
        }
    }
    assert!(rejected, "no non-residue x in 1..=32");
}

#[test]
fn test_point_length_validation() {
    assert!(matches!(
        Point::deserialize_compressed(&[0x02; 32]),
        Err(Error::Length { .. })
    ));
    assert!(matches!(
        Point::deserialize_uncompressed(&[0x04; 64]),
        Err(Error::Length { .. })
    ));
}

#[test]
fn test_keypair_generation() {
    let (sk, pk) = generate_keypair(&mut OsRng).unwrap();
    assert!(pk.is_valid());
    assert!(!pk.is_identity());
    let recomputed = scalar_mult_base_g(&sk).unwrap();
    assert_eq!(pk, recomputed);
}

#[test]
fn test_public_key_encodings() {
    let g = base_point_g();
    let pk = PublicKey::from_point(&g).unwrap();

    let uncompressed = pk.to_uncompressed();
    assert_eq!(PublicKey::from_uncompressed(&uncompressed).unwrap(), pk);

    let compressed = pk.to_compressed();
    assert_eq!(compressed[0], 0x02);
    assert_eq!(PublicKey::from_compressed(&compressed).unwrap(), pk);

    // identity is not a public key
    assert!(PublicKey::from_point(&Point::identity()).is_err());
}

#[test]
fn test_public_key_matches_generator_for_key_one() {
    let one = scalar_from_u32(1);
    let point = scalar_mult_base_g(&one).unwrap();
    let pk = PublicKey::from_point(&point).unwrap();
    assert_eq!(
        hex::encode(pk.x()),
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
    );
    assert_eq!(
        hex::encode(pk.y()),
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );
}
