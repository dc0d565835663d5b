//! Arithmetic in a prime field GF(p) for an odd 256-bit modulus.
//!
//! Values are plain `U256` residues in `[0, p)`. Multiplication goes through
//! Montgomery form internally (R = 2^256), so any odd modulus works without a
//! curve-specific reduction.

#![forbid(unsafe_code)]

use seckey_core::{Error, Result};

use crate::uint::U256;

/// Prime field context: modulus plus precomputed Montgomery constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: U256,
    /// -p^(-1) mod 2^64.
    m_inv: u64,
    /// R^2 mod p.
    r2: U256,
}

impl PrimeField {
    /// Build a field context. The modulus must be odd and greater than 3.
    /// Primality is not checked.
    pub fn new(modulus: U256) -> Result<Self> {
        if !modulus.is_odd() || modulus <= U256::from_u64(3) {
            return Err(Error::InvalidCurve(format!(
                "field modulus must be odd and greater than 3, got 0x{:x}",
                modulus
            )));
        }

        // Newton iteration doubles the correct low bits each step: 1 -> 64.
        let p0 = modulus.limbs()[0];
        let mut inv: u64 = 1;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(p0.wrapping_mul(inv)));
        }

        let mut field = Self {
            modulus,
            m_inv: inv.wrapping_neg(),
            r2: U256::ZERO,
        };

        // R^2 mod p by doubling 1 512 times.
        let mut r2 = U256::ONE;
        for _ in 0..512 {
            r2 = field.add(&r2, &r2);
        }
        field.r2 = r2;

        Ok(field)
    }

    pub fn modulus(&self) -> &U256 {
        &self.modulus
    }

    /// Reduce an arbitrary 256-bit value into `[0, p)`.
    pub fn reduce(&self, a: &U256) -> U256 {
        if *a < self.modulus {
            return *a;
        }
        // one Montgomery operand may be any 256-bit value
        self.mul(a, &U256::ONE)
    }

    /// Addition: a + b (mod p).
    pub fn add(&self, a: &U256, b: &U256) -> U256 {
        let (sum, carry) = a.overflowing_add(b);
        if carry || sum >= self.modulus {
            sum.overflowing_sub(&self.modulus).0
        } else {
            sum
        }
    }

    /// Subtraction: a - b (mod p).
    pub fn sub(&self, a: &U256, b: &U256) -> U256 {
        let (diff, borrow) = a.overflowing_sub(b);
        if borrow {
            diff.overflowing_add(&self.modulus).0
        } else {
            diff
        }
    }

    /// Negation: -a (mod p).
    pub fn neg(&self, a: &U256) -> U256 {
        if a.is_zero() {
            *a
        } else {
            self.modulus.overflowing_sub(a).0
        }
    }

    /// Montgomery product a * b * R^(-1) mod p (CIOS).
    fn mont_mul(&self, a: &U256, b: &U256) -> U256 {
        let a = a.limbs();
        let b = b.limbs();
        let m = self.modulus.limbs();
        let mut t = [0u64; 6];

        for i in 0..4 {
            // t += a * b[i]
            let mut carry: u64 = 0;
            for j in 0..4 {
                let acc = (t[j] as u128) + (a[j] as u128) * (b[i] as u128) + (carry as u128);
                t[j] = acc as u64;
                carry = (acc >> 64) as u64;
            }
            let acc = (t[4] as u128) + (carry as u128);
            t[4] = acc as u64;
            t[5] = (acc >> 64) as u64;

            // t = (t + q * m) / 2^64, with q chosen so the low limb vanishes
            let q = t[0].wrapping_mul(self.m_inv);
            let acc = (t[0] as u128) + (q as u128) * (m[0] as u128);
            let mut carry = (acc >> 64) as u64;
            for j in 1..4 {
                let acc = (t[j] as u128) + (q as u128) * (m[j] as u128) + (carry as u128);
                t[j - 1] = acc as u64;
                carry = (acc >> 64) as u64;
            }
            let acc = (t[4] as u128) + (carry as u128);
            t[3] = acc as u64;
            t[4] = t[5] + ((acc >> 64) as u64);
        }

        let r = U256::from_limbs([t[0], t[1], t[2], t[3]]);
        if t[4] != 0 || r >= self.modulus {
            r.overflowing_sub(&self.modulus).0
        } else {
            r
        }
    }

    /// Multiplication: a * b (mod p).
    pub fn mul(&self, a: &U256, b: &U256) -> U256 {
        // (a*b*R^-1) * R^2 * R^-1 = a*b
        self.mont_mul(&self.mont_mul(a, b), &self.r2)
    }

    /// Square: a^2 (mod p).
    pub fn square(&self, a: &U256) -> U256 {
        self.mul(a, a)
    }

    /// Exponentiation: base^exp (mod p).
    /// Square-and-multiply kept in Montgomery form for the whole ladder.
    pub fn pow(&self, base: &U256, exp: &U256) -> U256 {
        let mut result = self.mont_mul(&U256::ONE, &self.r2);
        let mut base = self.mont_mul(base, &self.r2);

        for i in 0..exp.bits() {
            if exp.bit(i) {
                result = self.mont_mul(&result, &base);
            }
            base = self.mont_mul(&base, &base);
        }

        self.mont_mul(&result, &U256::ONE)
    }

    /// Multiplicative inverse: a^(-1) (mod p).
    /// Uses Fermat's little theorem: a^(-1) = a^(p-2) mod p.
    pub fn inv(&self, a: &U256) -> Option<U256> {
        if a.is_zero() {
            return None;
        }
        let p_minus_2 = self.modulus.overflowing_sub(&U256::from_u64(2)).0;
        Some(self.pow(a, &p_minus_2))
    }

    /// Candidate square root a^((p+1)/4) (mod p).
    ///
    /// Only valid when p ≡ 3 (mod 4); any other modulus is rejected. The
    /// result is not checked: if `a` is not a quadratic residue the returned
    /// value squares to `-a` instead of `a`.
    pub fn sqrt(&self, a: &U256) -> Result<U256> {
        if self.modulus.low_bits2() != 3 {
            return Err(Error::UnsupportedModulus);
        }
        // p ≡ 3 (mod 4) so (p+1)/4 = (p >> 2) + 1 without overflow
        let exp = self.modulus.shr(2).overflowing_add(&U256::ONE).0;
        Ok(self.pow(a, &exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";

    fn secp_field() -> PrimeField {
        PrimeField::new(U256::from_hex(P_HEX).unwrap()).unwrap()
    }

    fn fe(s: &str) -> U256 {
        U256::from_hex(s).unwrap()
    }

    #[test]
    fn test_rejects_bad_modulus() {
        assert!(PrimeField::new(U256::from_u64(100)).is_err());
        assert!(PrimeField::new(U256::from_u64(3)).is_err());
        assert!(PrimeField::new(U256::from_u64(103)).is_ok());
    }

    #[test]
    fn test_add_sub_identity() {
        let f = secp_field();
        let a = fe("deadbeefcafebabedeadbeefcafebabedeadbeefcafebabedeadbeefcafebabe");
        let b = fe("1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef");

        assert_eq!(f.sub(&f.add(&a, &b), &b), a);
        assert_eq!(f.add(&f.sub(&a, &b), &b), a);
        assert_eq!(f.add(&a, &f.neg(&a)), U256::ZERO);
    }

    #[test]
    fn test_add_wraps_past_2_256() {
        let f = secp_field();
        let p_minus_1 = f.sub(&U256::ZERO, &U256::ONE);
        assert_eq!(f.add(&p_minus_1, &U256::from_u64(2)), U256::ONE);
    }

    #[test]
    fn test_mul_small() {
        let f = secp_field();
        assert_eq!(
            f.mul(&U256::from_u64(2), &U256::from_u64(3)),
            U256::from_u64(6)
        );
        assert_eq!(f.square(&U256::from_u64(3)), U256::from_u64(9));
    }

    #[test]
    fn test_mul_distributive() {
        let f = secp_field();
        let a = fe("deadbeefcafebabedeadbeefcafebabedeadbeefcafebabedeadbeefcafebabe");
        let b = fe("1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef");
        let c = fe("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFF0000");

        assert_eq!(
            f.mul(&a, &f.add(&b, &c)),
            f.add(&f.mul(&a, &b), &f.mul(&a, &c))
        );
        assert_eq!(f.mul(&a, &b), f.mul(&b, &a));
    }

    #[test]
    fn test_inv() {
        let f = secp_field();
        let a = fe("deadbeefcafebabedeadbeefcafebabedeadbeefcafebabedeadbeefcafebabe");
        assert_eq!(f.mul(&a, &f.inv(&a).unwrap()), U256::ONE);
        assert!(f.inv(&U256::ZERO).is_none());
    }

    #[test]
    fn test_small_field() {
        let f = PrimeField::new(U256::from_u64(103)).unwrap();
        assert_eq!(f.mul(&U256::from_u64(50), &U256::from_u64(60)), U256::from_u64(13));
        assert_eq!(f.inv(&U256::from_u64(2)).unwrap(), U256::from_u64(52));
        assert_eq!(f.pow(&U256::from_u64(5), &U256::from_u64(102)), U256::ONE);
        assert_eq!(f.reduce(&U256::from_u64(300)), U256::from_u64(94));
        // 2^256 - 1 ≡ 1 (mod 103)
        assert_eq!(f.reduce(&U256::from_limbs([u64::MAX; 4])), U256::ONE);
    }

    #[test]
    fn test_sqrt_of_square() {
        let f = secp_field();
        let a = fe("1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef");
        let a2 = f.square(&a);
        let root = f.sqrt(&a2).unwrap();
        assert!(root == a || root == f.neg(&a));
    }

    #[test]
    fn test_sqrt_requires_3_mod_4() {
        // 101 ≡ 1 (mod 4)
        let f = PrimeField::new(U256::from_u64(101)).unwrap();
        assert!(matches!(
            f.sqrt(&U256::from_u64(4)),
            Err(Error::UnsupportedModulus)
        ));
    }

    #[test]
    fn test_against_k256() {
        use k256::elliptic_curve::ff::PrimeField as _;
        use k256::{FieldBytes, FieldElement as K256Fe};

        fn k256_from(v: &U256) -> K256Fe {
            Option::<K256Fe>::from(K256Fe::from_repr(FieldBytes::from(v.to_be_bytes()))).unwrap()
        }

        let f = secp_field();
        let test_values = [
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "deadbeefcafebabedeadbeefcafebabedeadbeefcafebabedeadbeefcafebabe",
            "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFF0000",
        ];

        for hex_a in &test_values {
            for hex_b in &test_values {
                let a = fe(hex_a);
                let b = fe(hex_b);

                let k256_mul: [u8; 32] = (k256_from(&a) * k256_from(&b)).to_repr().into();
                assert_eq!(
                    f.mul(&a, &b).to_be_bytes(),
                    k256_mul,
                    "mul mismatch for {hex_a} * {hex_b}"
                );

                let k256_sub: [u8; 32] = (k256_from(&a) - k256_from(&b)).to_repr().into();
                assert_eq!(
                    f.sub(&a, &b).to_be_bytes(),
                    k256_sub,
                    "sub mismatch for {hex_a} - {hex_b}"
                );
            }
        }
    }
}
