//! Elliptic curve point operations in Jacobian coordinates.
//!
//! Curve: y² = x³ + b over GF(p)
//! Jacobian: (X, Y, Z) represents affine (X/Z², Y/Z³)

#![forbid(unsafe_code)]

use super::params::CurveParams;
use crate::uint::U256;

/// Affine point (x, y). Never the point at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    x: U256,
    y: U256,
}

impl AffinePoint {
    /// Does not validate that the point is on any curve.
    pub const fn new(x: U256, y: U256) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &U256 {
        &self.x
    }

    pub fn y(&self) -> &U256 {
        &self.y
    }

    /// The mirror point (x, p - y).
    pub fn negate(&self, curve: &CurveParams) -> Self {
        Self {
            x: self.x,
            y: curve.field().neg(&self.y),
        }
    }
}

/// Point in Jacobian coordinates.
/// Point at infinity has Z = 0.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    x: U256,
    y: U256,
    z: U256,
}

impl Point {
    /// Point at infinity (identity element).
    pub const INFINITY: Self = Self {
        x: U256::ONE,
        y: U256::ONE,
        z: U256::ZERO,
    };

    pub fn from_affine(p: &AffinePoint) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: U256::ONE,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates.
    /// Returns None for point at infinity.
    pub fn to_affine(&self, curve: &CurveParams) -> Option<AffinePoint> {
        if self.is_infinity() {
            return None;
        }
        let f = curve.field();

        let z_inv = f.inv(&self.z)?;
        let z_inv2 = f.square(&z_inv);
        let z_inv3 = f.mul(&z_inv2, &z_inv);

        Some(AffinePoint {
            x: f.mul(&self.x, &z_inv2),
            y: f.mul(&self.y, &z_inv3),
        })
    }

    /// Point doubling: 2P, with the a = 0 formulas.
    pub fn double(&self, curve: &CurveParams) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::INFINITY;
        }
        let f = curve.field();

        // S = 4*X*Y²
        let y2 = f.square(&self.y);
        let xy2 = f.mul(&self.x, &y2);
        let xy2_2 = f.add(&xy2, &xy2);
        let s = f.add(&xy2_2, &xy2_2);

        // M = 3*X²
        let x2 = f.square(&self.x);
        let m = f.add(&f.add(&x2, &x2), &x2);

        // X3 = M² - 2*S
        let x3 = f.sub(&f.sub(&f.square(&m), &s), &s);

        // Y3 = M*(S - X3) - 8*Y⁴
        let y4 = f.square(&y2);
        let y4_2 = f.add(&y4, &y4);
        let y4_4 = f.add(&y4_2, &y4_2);
        let y4_8 = f.add(&y4_4, &y4_4);
        let y3 = f.sub(&f.mul(&m, &f.sub(&s, &x3)), &y4_8);

        // Z3 = 2*Y*Z
        let yz = f.mul(&self.y, &self.z);
        let z3 = f.add(&yz, &yz);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Point addition: P1 + P2.
    pub fn add(&self, other: &Self, curve: &CurveParams) -> Self {
        if self.is_infinity() {
            return *other;
        }
        if other.is_infinity() {
            return *self;
        }
        let f = curve.field();

        let z1_2 = f.square(&self.z);
        let z2_2 = f.square(&other.z);
        let z1_3 = f.mul(&z1_2, &self.z);
        let z2_3 = f.mul(&z2_2, &other.z);

        // U1 = X1*Z2², U2 = X2*Z1²
        let u1 = f.mul(&self.x, &z2_2);
        let u2 = f.mul(&other.x, &z1_2);

        // S1 = Y1*Z2³, S2 = Y2*Z1³
        let s1 = f.mul(&self.y, &z2_3);
        let s2 = f.mul(&other.y, &z1_3);

        let h = f.sub(&u2, &u1);
        let r = f.sub(&s2, &s1);

        if h.is_zero() {
            if r.is_zero() {
                return self.double(curve);
            }
            return Self::INFINITY;
        }

        let h2 = f.square(&h);
        let h3 = f.mul(&h2, &h);

        // X3 = R² - H³ - 2*U1*H²
        let u1_h2 = f.mul(&u1, &h2);
        let x3 = f.sub(&f.sub(&f.sub(&f.square(&r), &h3), &u1_h2), &u1_h2);

        // Y3 = R*(U1*H² - X3) - S1*H³
        let y3 = f.sub(&f.mul(&r, &f.sub(&u1_h2, &x3)), &f.mul(&s1, &h3));

        // Z3 = H*Z1*Z2
        let z3 = f.mul(&f.mul(&h, &self.z), &other.z);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Scalar multiplication: k * P (double-and-add, LSB first).
    pub fn mul(&self, k: &U256, curve: &CurveParams) -> Self {
        if k.is_zero() || self.is_infinity() {
            return Self::INFINITY;
        }

        let mut result = Self::INFINITY;
        let mut base = *self;
        for i in 0..k.bits() {
            if k.bit(i) {
                result = result.add(&base, curve);
            }
            base = base.double(curve);
        }
        result
    }

    /// k * G for the curve's generator.
    pub fn mul_generator(k: &U256, curve: &CurveParams) -> Self {
        Self::from_affine(curve.generator()).mul(k, curve)
    }
}
