//! secp256k1 elliptic curve primitives
//!
//! The curve equation is y² = x³ + 7 over the prime field F_p where:
//! - p = 2^256 - 2^32 - 977
//! - the group order n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
//!
//! Field and scalar arithmetic live in the `field` and `scalar` submodules,
//! affine point operations in `point`, and the SEC1 key encodings in
//! `public_key`.

pub mod field;
pub mod point;
pub mod public_key;
pub mod scalar;

pub use field::FieldElement;
pub use point::Point;
pub use public_key::PublicKey;
pub use scalar::Scalar;

use crate::error::Result;
use rand::{CryptoRng, RngCore};

/// Size of a scalar in bytes (32 bytes = 256 bits)
pub const SCALAR_SIZE: usize = 32;

/// Size of a field element in bytes (32 bytes = 256 bits)
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of an uncompressed point in bytes: format byte (0x04) + x-coordinate + y-coordinate
pub const POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * FIELD_ELEMENT_SIZE;

/// Size of a compressed point in bytes: format byte (0x02/0x03) + x-coordinate
pub const POINT_COMPRESSED_SIZE: usize = 1 + FIELD_ELEMENT_SIZE;

/// secp256k1 curve parameters (base point G)
struct Secp256k1Params {
    g_x: [u8; FIELD_ELEMENT_SIZE],
    g_y: [u8; FIELD_ELEMENT_SIZE],
}

const PARAMS: Secp256k1Params = Secp256k1Params {
    g_x: [
        0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B,
        0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8,
        0x17, 0x98,
    ],
    g_y: [
        0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08,
        0xA8, 0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10,
        0xD4, 0xB8,
    ],
};

/// Get the standard base point G of the secp256k1 curve
pub fn base_point_g() -> Point {
    Point::new(&PARAMS.g_x, &PARAMS.g_y).expect("Standard base point must be valid")
}

/// Construct a point from affine coordinates, validating the curve equation
pub fn point_from_coordinates(
    x: &[u8; FIELD_ELEMENT_SIZE],
    y: &[u8; FIELD_ELEMENT_SIZE],
) -> Result<Point> {
    Point::new(x, y)
}

/// Scalar multiplication with the base point: scalar * G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Result<Point> {
    base_point_g().mul(scalar)
}

/// General scalar multiplication: compute scalar * point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Result<Point> {
    point.mul(scalar)
}

/// Generate a random keypair: a private scalar and its public point
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    let mut scalar_bytes = [0u8; SCALAR_SIZE];
    loop {
        rng.fill_bytes(&mut scalar_bytes);
        match Scalar::from_bytes(&scalar_bytes) {
            Ok(private_key) => {
                let public_key = scalar_mult_base_g(&private_key)?;
                return Ok((private_key, public_key));
            }
            Err(_) => continue,
        }
    }
}

/// Right-hand side of the curve equation: x³ + 7
pub(crate) fn curve_equation_rhs(x: &FieldElement) -> FieldElement {
    x.square().mul(x).add(&FieldElement::from_u32(7))
}

#[cfg(test)]
mod tests;
