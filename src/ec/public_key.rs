//! Public key representation and SEC1 encodings

use crate::ec::point::Point;
use crate::ec::{FIELD_ELEMENT_SIZE, POINT_COMPRESSED_SIZE, POINT_UNCOMPRESSED_SIZE};
use crate::error::{Error, Result};
use core::fmt;
use subtle::ConstantTimeEq;

/// An affine secp256k1 public key.
///
/// Always a finite, validated point; the identity is never a public key.
/// Immutable once constructed.
#[derive(Clone)]
pub struct PublicKey {
    x: [u8; FIELD_ELEMENT_SIZE],
    y: [u8; FIELD_ELEMENT_SIZE],
}

impl PublicKey {
    /// Build a public key from a curve point.
    ///
    /// Fails if the point is the identity.
    pub fn from_point(point: &Point) -> Result<Self> {
        if point.is_identity() {
            return Err(Error::InvalidPoint {
                reason: "public key cannot be the point at infinity",
            });
        }
        Ok(PublicKey {
            x: point.x_coordinate_bytes(),
            y: point.y_coordinate_bytes(),
        })
    }

    /// Build a public key from raw affine coordinates, validating the
    /// curve equation.
    pub fn from_coordinates(
        x: &[u8; FIELD_ELEMENT_SIZE],
        y: &[u8; FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let point = Point::new(x, y)?;
        Self::from_point(&point)
    }

    /// The x-coordinate as 32 big-endian bytes.
    pub fn x(&self) -> &[u8; FIELD_ELEMENT_SIZE] {
        &self.x
    }

    /// The y-coordinate as 32 big-endian bytes.
    pub fn y(&self) -> &[u8; FIELD_ELEMENT_SIZE] {
        &self.y
    }

    /// Reconstruct the curve point for this key.
    pub fn to_point(&self) -> Result<Point> {
        Point::new(&self.x, &self.y)
    }

    /// SEC1 compressed encoding: 0x02/0x03 || x (33 bytes).
    pub fn to_compressed(&self) -> [u8; POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; POINT_COMPRESSED_SIZE];
        out[0] = if self.y[FIELD_ELEMENT_SIZE - 1] & 1 == 1 {
            0x03
        } else {
            0x02
        };
        out[1..].copy_from_slice(&self.x);
        out
    }

    /// SEC1 uncompressed encoding: 0x04 || x || y (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; POINT_UNCOMPRESSED_SIZE];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x);
        out[33..].copy_from_slice(&self.y);
        out
    }

    /// Decode a compressed public key, recovering y by square root.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self> {
        let point = Point::deserialize_compressed(bytes)?;
        Self::from_point(&point)
    }

    /// Decode an uncompressed public key.
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self> {
        let point = Point::deserialize_uncompressed(bytes)?;
        Self::from_point(&point)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        // constant-time over both coordinates
        (self.x[..].ct_eq(&other.x) & self.y[..].ct_eq(&other.y)).into()
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("x", &format_args!("0x{}", hex::encode(self.x)))
            .field("y", &format_args!("0x{}", hex::encode(self.y)))
            .finish()
    }
}
