//! Curve parameters for short Weierstrass curves y² = x³ + b (a = 0).

#![forbid(unsafe_code)]

use seckey_core::{Error, Result};

use super::field::PrimeField;
use super::point::AffinePoint;
use crate::uint::U256;

/// secp256k1 field prime p = 2^256 - 2^32 - 977.
const SECP256K1_P: [u64; 4] = [
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// secp256k1 group order n.
const SECP256K1_N: [u64; 4] = [
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
];

/// Generator point G (affine x-coordinate).
const SECP256K1_GX: [u64; 4] = [
    0x59F2815B16F81798,
    0x029BFCDB2DCE28D9,
    0x55A06295CE870B07,
    0x79BE667EF9DCBBAC,
];

/// Generator point G (affine y-coordinate).
const SECP256K1_GY: [u64; 4] = [
    0x9C47D08FFB10D4B8,
    0xFD17B448A6855419,
    0x5DA4FBFC0E1108A8,
    0x483ADA7726A3C465,
];

/// Parameters of a curve y² = x³ + b over GF(p) with a generator of order n.
///
/// Passed by reference to every operation that needs the curve; there is no
/// process-wide default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveParams {
    field: PrimeField,
    b: U256,
    generator: AffinePoint,
    order: U256,
}

impl CurveParams {
    /// Build a custom curve.
    ///
    /// Checks that p is odd and greater than 3, that `b < p`, that n is
    /// nonzero and that G satisfies the curve equation. Neither primality of
    /// p nor the order of G is verified.
    pub fn new(p: U256, b: U256, generator: AffinePoint, order: U256) -> Result<Self> {
        let field = PrimeField::new(p)?;
        if b >= p {
            return Err(Error::InvalidCurve("b must be reduced modulo p".into()));
        }
        if order.is_zero() {
            return Err(Error::InvalidCurve("group order must be nonzero".into()));
        }

        let curve = Self {
            field,
            b,
            generator,
            order,
        };
        if !curve.contains(&generator) {
            return Err(Error::InvalidCurve("generator is not on the curve".into()));
        }
        Ok(curve)
    }

    /// The secp256k1 curve used by Bitcoin.
    pub fn secp256k1() -> Self {
        let field = match PrimeField::new(U256::from_limbs(SECP256K1_P)) {
            Ok(field) => field,
            Err(_) => unreachable!("secp256k1 prime is odd"),
        };
        Self {
            field,
            b: U256::from_u64(7),
            generator: AffinePoint::new(
                U256::from_limbs(SECP256K1_GX),
                U256::from_limbs(SECP256K1_GY),
            ),
            order: U256::from_limbs(SECP256K1_N),
        }
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Field modulus p.
    pub fn p(&self) -> &U256 {
        self.field.modulus()
    }

    /// Curve constant b.
    pub fn b(&self) -> &U256 {
        &self.b
    }

    /// Generator point G.
    pub fn generator(&self) -> &AffinePoint {
        &self.generator
    }

    /// Order n of the generator.
    pub fn order(&self) -> &U256 {
        &self.order
    }

    /// x³ + b (mod p).
    pub fn rhs(&self, x: &U256) -> U256 {
        let f = &self.field;
        let x = f.reduce(x);
        f.add(&f.mul(&f.square(&x), &x), &self.b)
    }

    /// Check y² = x³ + b (mod p) with both coordinates in range.
    pub fn contains(&self, point: &AffinePoint) -> bool {
        let p = self.p();
        if point.x() >= p || point.y() >= p {
            return false;
        }
        self.field.square(point.y()) == self.rhs(point.x())
    }
}
