//! secp256k1 elliptic curve point operations
//!
//! Points are kept in affine coordinates with an explicit identity flag.
//! The curve is y² = x³ + 7, so the `a·x` term of the general Weierstrass
//! form drops out of the tangent slope.

use crate::ec::field::FieldElement;
use crate::ec::scalar::Scalar;
use crate::ec::{curve_equation_rhs, FIELD_ELEMENT_SIZE, POINT_COMPRESSED_SIZE, POINT_UNCOMPRESSED_SIZE};
use crate::error::{validate, Error, Result};
use subtle::Choice;

/// A point on the secp256k1 curve in affine coordinates.
///
/// The point at infinity (the group identity) is a distinguished state
/// carried by `is_identity`; the coordinate fields of an identity point
/// are zero and never read.
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let self_is_identity: bool = self.is_identity.into();
        let other_is_identity: bool = other.is_identity.into();
        if self_is_identity || other_is_identity {
            return self_is_identity == other_is_identity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Point {
    /// Create a new point from affine coordinates.
    ///
    /// Returns an error if the coordinates don't satisfy the curve equation.
    pub fn new(
        x: &[u8; FIELD_ELEMENT_SIZE],
        y: &[u8; FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x_fe = FieldElement::from_bytes(x)?;
        let y_fe = FieldElement::from_bytes(y)?;
        if !Self::is_on_curve(&x_fe, &y_fe) {
            return Err(Error::InvalidPoint {
                reason: "coordinates do not satisfy the curve equation",
            });
        }
        Ok(Point {
            is_identity: Choice::from(0),
            x: x_fe,
            y: y_fe,
        })
    }

    pub(crate) fn from_field_elements(x: FieldElement, y: FieldElement) -> Result<Self> {
        if !Self::is_on_curve(&x, &y) {
            return Err(Error::InvalidPoint {
                reason: "coordinates do not satisfy the curve equation",
            });
        }
        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// Create the identity point (point at infinity).
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Check if this point is the identity element.
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Check if this point is valid (identity, or on the curve).
    pub fn is_valid(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        Self::is_on_curve(&self.x, &self.y)
    }

    /// Get the x-coordinate of this point as bytes.
    pub fn x_coordinate_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Get the y-coordinate of this point as bytes.
    pub fn y_coordinate_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    pub(crate) fn x_field(&self) -> &FieldElement {
        &self.x
    }

    pub(crate) fn y_field(&self) -> &FieldElement {
        &self.y
    }

    /// Serialize this point in uncompressed format: 0x04 || x || y.
    ///
    /// The identity point serializes to all zeros.
    pub fn serialize_uncompressed(&self) -> [u8; POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; POINT_UNCOMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Deserialize a point from uncompressed format.
    ///
    /// Returns an error if the bytes don't represent a valid point.
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length("uncompressed point", bytes.len(), POINT_UNCOMPRESSED_SIZE)?;
        if bytes.iter().all(|&b| b == 0) {
            return Ok(Self::identity());
        }
        if bytes[0] != 0x04 {
            return Err(Error::InvalidPoint {
                reason: "uncompressed point prefix is not 0x04",
            });
        }
        let mut x_bytes = [0u8; FIELD_ELEMENT_SIZE];
        let mut y_bytes = [0u8; FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..33]);
        y_bytes.copy_from_slice(&bytes[33..65]);
        Self::new(&x_bytes, &y_bytes)
    }

    /// Serialize this point in compressed format: 0x02/0x03 || x.
    ///
    /// The identity point serializes to all zeros.
    pub fn serialize_compressed(&self) -> [u8; POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; POINT_COMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// Deserialize a point from compressed format.
    ///
    /// The y coordinate is recovered as a square root of x³ + 7; of the two
    /// roots, the one whose parity matches the prefix byte is selected.
    pub fn deserialize_compressed(bytes: &[u8]) -> Result<Self> {
        validate::length("compressed point", bytes.len(), POINT_COMPRESSED_SIZE)?;
        if bytes.iter().all(|&b| b == 0) {
            return Ok(Self::identity());
        }
        let tag = bytes[0];
        if tag != 0x02 && tag != 0x03 {
            return Err(Error::InvalidPoint {
                reason: "compressed point prefix is not 0x02 or 0x03",
            });
        }
        let mut x_bytes = [0u8; FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x_fe = FieldElement::from_bytes(&x_bytes)?;
        let rhs = curve_equation_rhs(&x_fe);
        let (even_root, odd_root) = match rhs.sqrt() {
            Some((r1, r2)) => {
                if r1.is_odd() {
                    (r2, r1)
                } else {
                    (r1, r2)
                }
            }
            None => {
                return Err(Error::InvalidPoint {
                    reason: "x-coordinate has no matching y on the curve",
                })
            }
        };
        let y_fe = if tag == 0x03 { odd_root } else { even_root };
        Ok(Point {
            is_identity: Choice::from(0),
            x: x_fe,
            y: y_fe,
        })
    }

    /// Additive inverse: reflect across the x-axis.
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return Self::identity();
        }
        Point {
            is_identity: Choice::from(0),
            x: self.x,
            y: self.y.negate(),
        }
    }

    /// Add two points using the affine group law.
    ///
    /// The identity laws and the inverse case (same x, different y) are
    /// handled explicitly before the chord formula.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.is_identity() {
            return Ok(other.clone());
        }
        if other.is_identity() {
            return Ok(self.clone());
        }
        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            }
            // P + (-P)
            return Ok(Self::identity());
        }

        // λ = (y₂ − y₁) / (x₂ − x₁)
        let lambda = other
            .y
            .sub(&self.y)
            .mul(&other.x.sub(&self.x).invert()?);

        // x₃ = λ² − x₁ − x₂
        let x3 = lambda.square().sub(&self.x).sub(&other.x);

        // y₃ = λ·(x₁ − x₃) − y₁
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Ok(Point {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
        })
    }

    /// Double a point (add it to itself).
    ///
    /// A point with y = 0 is its own inverse; doubling it yields the
    /// identity since the tangent slope 1/(2y) is undefined.
    pub fn double(&self) -> Result<Self> {
        if self.is_identity() || self.y.is_zero() {
            return Ok(Self::identity());
        }

        // λ = 3·x² / (2·y), with a = 0 on secp256k1
        let x_sq = self.x.square();
        let three_x_sq = x_sq.double().add(&x_sq);
        let lambda = three_x_sq.mul(&self.y.double().invert()?);

        // x₂ = λ² − 2·x₁
        let x3 = lambda.square().sub(&self.x.double());

        // y₂ = λ·(x₁ − x₂) − y₁
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Ok(Point {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
        })
    }

    /// Scalar multiplication: compute scalar * self.
    ///
    /// Double-and-add over the scalar bits, most significant first; the
    /// leading 1 bit seeds the accumulator with the base point instead of
    /// a doubling from the identity. The result is re-checked against the
    /// curve equation before being returned.
    pub fn mul(&self, scalar: &Scalar) -> Result<Self> {
        if scalar.is_zero() || self.is_identity() {
            return Ok(Self::identity());
        }

        let mut result = self.clone();
        for index in (0..scalar.bit_len() - 1).rev() {
            result = result.double()?;
            if scalar.bit(index) {
                result = result.add(self)?;
            }
        }

        if !result.is_valid() {
            return Err(Error::InvalidPoint {
                reason: "scalar multiplication produced a point off the curve",
            });
        }
        Ok(result)
    }

    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        y.square() == curve_equation_rhs(x)
    }
}
