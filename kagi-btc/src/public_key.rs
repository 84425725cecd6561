//! Bitcoin public key implementation.
//!
//! Public keys are stored as an affine point and serialized on demand in the
//! SEC1 compressed (`0x02`/`0x03` + x) or uncompressed (`0x04` + x + y) form.

use kagi::hash::hash160;
use kagi::{CurveEngine, Error, Point, Result, Secp256k1};
use tracing::trace;

use crate::address::Address;
use crate::network::NetworkProfile;
use crate::private_key::PrivateKey;

/// Length of a compressed public key.
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key.
pub const UNCOMPRESSED_LEN: usize = 65;

const EVEN_PREFIX: u8 = 0x02;
const ODD_PREFIX: u8 = 0x03;
const UNCOMPRESSED_PREFIX: u8 = 0x04;

/// Bitcoin public key based on secp256k1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: Point,
    network: NetworkProfile,
}

impl PublicKey {
    /// Derive from a private key using `engine`.
    pub fn from_private_key_with<E: CurveEngine>(engine: &E, key: &PrivateKey) -> Result<Self> {
        let point = engine
            .mul_generator(key.secret())
            .ok_or(Error::PointAtInfinity)?;

        Ok(Self {
            point,
            network: key.network(),
        })
    }

    /// Create from an affine point, verifying it lies on the curve.
    pub fn from_point(point: Point, network: impl Into<NetworkProfile>) -> Result<Self> {
        if !Secp256k1.is_on_curve(&point) {
            return Err(Error::PointNotOnCurve);
        }

        Ok(Self {
            point,
            network: network.into(),
        })
    }

    /// Parse SEC1 bytes, compressed or uncompressed.
    pub fn from_bytes(bytes: &[u8], network: impl Into<NetworkProfile>) -> Result<Self> {
        Self::from_bytes_with(&Secp256k1, bytes, network)
    }

    /// Parse SEC1 bytes using `engine` for point recovery.
    ///
    /// The leading byte selects the form. For compressed input the recovered
    /// `y` is negated when its parity disagrees with the prefix.
    pub fn from_bytes_with<E: CurveEngine>(
        engine: &E,
        bytes: &[u8],
        network: impl Into<NetworkProfile>,
    ) -> Result<Self> {
        let Some(&prefix) = bytes.first() else {
            return Err(Error::InvalidLength {
                expected: COMPRESSED_LEN,
                actual: 0,
            });
        };

        let point = match prefix {
            UNCOMPRESSED_PREFIX => {
                expect_len(bytes, UNCOMPRESSED_LEN)?;
                Point {
                    x: coordinate(&bytes[1..33])?,
                    y: coordinate(&bytes[33..65])?,
                }
            }
            EVEN_PREFIX | ODD_PREFIX => {
                expect_len(bytes, COMPRESSED_LEN)?;
                let x = coordinate(&bytes[1..33])?;
                let y = engine.recover_y(&x).ok_or(Error::PointNotOnCurve)?;

                let mut point = Point { x, y };
                if point.y_is_odd() != (prefix == ODD_PREFIX) {
                    trace!(prefix, "recovered root has wrong parity, negating y");
                    point.y = engine.negate_y(&point.y);
                }
                point
            }
            other => return Err(Error::UnsupportedFormat(other)),
        };

        if !engine.is_on_curve(&point) {
            return Err(Error::PointNotOnCurve);
        }

        Ok(Self {
            point,
            network: network.into(),
        })
    }

    /// Parse a hex-encoded SEC1 public key.
    pub fn from_hex(hex: &str, network: impl Into<NetworkProfile>) -> Result<Self> {
        let bytes = hex::decode(hex).map_err(|_| Error::InvalidEncoding)?;
        Self::from_bytes(&bytes, network)
    }

    /// Serialize to compressed bytes (33 bytes).
    pub fn to_compressed_bytes(&self) -> [u8; COMPRESSED_LEN] {
        let mut out = [0u8; COMPRESSED_LEN];
        out[0] = if self.point.y_is_odd() {
            ODD_PREFIX
        } else {
            EVEN_PREFIX
        };
        out[1..].copy_from_slice(&self.point.x);
        out
    }

    /// Serialize to uncompressed bytes (65 bytes).
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_LEN] {
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out[0] = UNCOMPRESSED_PREFIX;
        out[1..33].copy_from_slice(&self.point.x);
        out[33..].copy_from_slice(&self.point.y);
        out
    }

    /// Serialize in the requested form.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.to_compressed_bytes().to_vec()
        } else {
            self.to_uncompressed_bytes().to_vec()
        }
    }

    /// Serialize to lowercase hex in the requested form.
    pub fn to_hex(&self, compressed: bool) -> String {
        hex::encode(self.to_bytes(compressed))
    }

    /// HASH160 of the serialized key.
    pub fn hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.to_bytes(compressed))
    }

    /// P2PKH address for this key.
    pub fn address(&self, compressed: bool) -> Address {
        Address::from_public_key(self, compressed)
    }

    /// Add two public keys as curve points.
    pub fn combine(&self, other: &Self) -> Result<Self> {
        self.combine_with(&Secp256k1, other)
    }

    /// Add two public keys as curve points using `engine`.
    pub fn combine_with<E: CurveEngine>(&self, engine: &E, other: &Self) -> Result<Self> {
        if self.network != other.network {
            return Err(Error::NetworkMismatch {
                expected: self.network.name(),
                actual: other.network.name(),
            });
        }

        let point = engine
            .add_points(&self.point, &other.point)
            .ok_or(Error::PointAtInfinity)?;

        Ok(Self {
            point,
            network: self.network,
        })
    }

    /// The affine point.
    #[inline]
    pub const fn point(&self) -> &Point {
        &self.point
    }

    /// x-coordinate, 32 bytes big-endian.
    #[inline]
    pub const fn x(&self) -> &[u8; 32] {
        &self.point.x
    }

    /// y-coordinate, 32 bytes big-endian.
    #[inline]
    pub const fn y(&self) -> &[u8; 32] {
        &self.point.y
    }

    /// The network this key belongs to.
    #[inline]
    pub const fn network(&self) -> NetworkProfile {
        self.network
    }
}

fn expect_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            expected,
            actual: bytes.len(),
        })
    }
}

fn coordinate(bytes: &[u8]) -> Result<[u8; 32]> {
    bytes.try_into().map_err(|_| Error::InvalidLength {
        expected: 32,
        actual: bytes.len(),
    })
}
