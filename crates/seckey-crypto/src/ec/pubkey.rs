//! Public keys and their SEC encoding.
//!
//! Uncompressed: [0x04][x: 32 bytes BE][y: 32 bytes BE]
//! Compressed:   [prefix][x: 32 bytes BE]
//! - prefix: 0x02 if y is even, 0x03 if y is odd

#![forbid(unsafe_code)]

use seckey_core::{Error, Result};
use tracing::trace;

use super::params::CurveParams;
use super::point::{AffinePoint, Point};
use super::secret::SecretKey;
use crate::uint::U256;

pub const TAG_EVEN: u8 = 0x02;
pub const TAG_ODD: u8 = 0x03;
pub const TAG_UNCOMPRESSED: u8 = 0x04;

pub const COMPRESSED_LEN: usize = 33;
pub const UNCOMPRESSED_LEN: usize = 65;

/// A curve point used as a public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Promote a point to a public key.
    pub fn from_point(point: AffinePoint) -> Self {
        Self { point }
    }

    /// Derive sk * G.
    pub fn from_secret_key(curve: &CurveParams, secret: &SecretKey) -> Result<Self> {
        let point = Point::mul_generator(secret.value(), curve)
            .to_affine(curve)
            .ok_or(Error::PointAtInfinity)?;
        Ok(Self { point })
    }

    pub fn point(&self) -> &AffinePoint {
        &self.point
    }

    pub fn x(&self) -> &U256 {
        self.point.x()
    }

    pub fn y(&self) -> &U256 {
        self.point.y()
    }

    /// Whether the point satisfies the curve equation.
    ///
    /// [`PublicKey::decode`] never calls this, so a caller that accepts
    /// compressed keys from untrusted input should.
    pub fn is_on_curve(&self, curve: &CurveParams) -> bool {
        curve.contains(&self.point)
    }

    /// SEC encoding, 33 bytes if `compressed`, otherwise 65.
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.to_compressed().to_vec()
        } else {
            self.to_uncompressed().to_vec()
        }
    }

    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let mut bytes = [0u8; COMPRESSED_LEN];
        bytes[0] = if self.y().is_odd() { TAG_ODD } else { TAG_EVEN };
        bytes[1..33].copy_from_slice(&self.x().to_be_bytes());
        bytes
    }

    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let mut bytes = [0u8; UNCOMPRESSED_LEN];
        bytes[0] = TAG_UNCOMPRESSED;
        bytes[1..33].copy_from_slice(&self.x().to_be_bytes());
        bytes[33..65].copy_from_slice(&self.y().to_be_bytes());
        bytes
    }

    /// Decode SEC bytes.
    ///
    /// Fails on an empty buffer, an unknown prefix, or a length that does not
    /// match the prefix. Nothing else is validated: coordinates are taken as
    /// raw 256-bit integers and, for compressed input, the recovered root is
    /// trusted without squaring it back. An `x` with no point on the curve
    /// therefore decodes to an off-curve point instead of an error; see
    /// [`PublicKey::is_on_curve`].
    pub fn decode(curve: &CurveParams, bytes: &[u8]) -> Result<Self> {
        let (&prefix, body) = bytes.split_first().ok_or(Error::EmptyEncoding)?;

        let expected = match prefix {
            TAG_EVEN | TAG_ODD => COMPRESSED_LEN,
            TAG_UNCOMPRESSED => UNCOMPRESSED_LEN,
            other => return Err(Error::InvalidPrefix(other)),
        };
        if bytes.len() != expected {
            return Err(Error::InvalidLength {
                prefix,
                expected,
                got: bytes.len(),
            });
        }

        let x = read_coord(&body[0..32]);

        if prefix == TAG_UNCOMPRESSED {
            trace!("decoding uncompressed public key");
            let y = read_coord(&body[32..64]);
            return Ok(Self::from_point(AffinePoint::new(x, y)));
        }

        trace!(odd = prefix == TAG_ODD, "decompressing public key");
        let y = decompress_y(curve, &x, prefix == TAG_ODD)?;
        Ok(Self::from_point(AffinePoint::new(x, y)))
    }
}

/// Solve y² = x³ + b for the root with the requested parity.
fn decompress_y(curve: &CurveParams, x: &U256, want_odd: bool) -> Result<U256> {
    let y2 = curve.rhs(x);
    let y0 = curve.field().sqrt(&y2)?;
    if y0.is_odd() == want_odd {
        Ok(y0)
    } else {
        Ok(curve.field().neg(&y0))
    }
}

/// Big-endian coordinate from a 32-byte slice (length checked by the caller).
fn read_coord(slice: &[u8]) -> U256 {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(slice);
    U256::from_be_bytes(&buf)
}
