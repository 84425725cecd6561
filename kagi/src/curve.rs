//! secp256k1 domain parameters and the curve engine seam.
//!
//! Point arithmetic is consumed from `k256` through the [`CurveEngine`]
//! trait. Codecs only ever ask the engine for generator multiplication,
//! square-root recovery of `y`, on-curve checks and point addition, so an
//! alternative engine (or a test double) can be swapped in without touching
//! the encodings.

use k256::elliptic_curve::bigint::Encoding;
use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint, U256};

/// Field prime `p = 2^256 - 2^32 - 977`.
pub const FIELD_PRIME: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");

/// Curve coefficient `a` in `y^2 = x^3 + ax + b`.
pub const COEFFICIENT_A: U256 = U256::ZERO;

/// Curve coefficient `b` in `y^2 = x^3 + ax + b`.
pub const COEFFICIENT_B: U256 = U256::from_u8(7);

/// x-coordinate of the generator point.
pub const GENERATOR_X: U256 =
    U256::from_be_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

/// y-coordinate of the generator point.
pub const GENERATOR_Y: U256 =
    U256::from_be_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");

/// Order `n` of the generator point.
pub const CURVE_ORDER: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

/// Cofactor of the curve group.
pub const COFACTOR: U256 = U256::ONE;

/// An affine curve point with fixed-width big-endian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// x-coordinate, 32 bytes big-endian.
    pub x: [u8; 32],
    /// y-coordinate, 32 bytes big-endian.
    pub y: [u8; 32],
}

impl Point {
    /// The generator point `G`.
    pub fn generator() -> Self {
        Self {
            x: GENERATOR_X.to_be_bytes(),
            y: GENERATOR_Y.to_be_bytes(),
        }
    }

    /// Returns `true` if the y-coordinate is odd.
    #[inline]
    pub const fn y_is_odd(&self) -> bool {
        self.y[31] & 1 == 1
    }
}

/// Elliptic-curve capabilities the key codecs rely on.
pub trait CurveEngine {
    /// Multiply the generator by `scalar`.
    ///
    /// Returns `None` if the product is the point at infinity.
    fn mul_generator(&self, scalar: &NonZeroScalar) -> Option<Point>;

    /// Recover one square root `y` of `x^3 + 7 mod p`.
    ///
    /// The parity of the returned root is unspecified. Returns `None` when
    /// `x` is not the x-coordinate of any curve point.
    fn recover_y(&self, x: &[u8; 32]) -> Option<[u8; 32]>;

    /// Check that `point` satisfies the curve equation.
    fn is_on_curve(&self, point: &Point) -> bool;

    /// Add two points. Returns `None` for the point at infinity.
    fn add_points(&self, a: &Point, b: &Point) -> Option<Point>;

    /// Negate a coordinate modulo the field prime.
    fn negate_y(&self, y: &[u8; 32]) -> [u8; 32] {
        U256::from_be_slice(y).neg_mod(&FIELD_PRIME).to_be_bytes()
    }
}

/// Default [`CurveEngine`] backed by `k256`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Secp256k1;

impl Secp256k1 {
    fn to_affine(point: &Point) -> Option<AffinePoint> {
        let encoded = EncodedPoint::from_affine_coordinates(
            &FieldBytes::from(point.x),
            &FieldBytes::from(point.y),
            false,
        );
        AffinePoint::from_encoded_point(&encoded).into()
    }

    fn from_affine(affine: &AffinePoint) -> Option<Point> {
        let encoded = affine.to_encoded_point(false);
        let x = <[u8; 32]>::try_from(encoded.x()?.as_slice()).ok()?;
        let y = <[u8; 32]>::try_from(encoded.y()?.as_slice()).ok()?;
        Some(Point { x, y })
    }
}

impl CurveEngine for Secp256k1 {
    fn mul_generator(&self, scalar: &NonZeroScalar) -> Option<Point> {
        let product = ProjectivePoint::GENERATOR * *scalar.as_ref();
        Self::from_affine(&product.to_affine())
    }

    fn recover_y(&self, x: &[u8; 32]) -> Option<[u8; 32]> {
        let affine: Option<AffinePoint> =
            AffinePoint::decompress(&FieldBytes::from(*x), Choice::from(0)).into();
        Self::from_affine(&affine?).map(|point| point.y)
    }

    fn is_on_curve(&self, point: &Point) -> bool {
        Self::to_affine(point).is_some()
    }

    fn add_points(&self, a: &Point, b: &Point) -> Option<Point> {
        let sum =
            ProjectivePoint::from(Self::to_affine(a)?) + ProjectivePoint::from(Self::to_affine(b)?);
        Self::from_affine(&sum.to_affine())
    }
}
