//! 256-bit unsigned integers.
//! Stored as 4 x 64-bit limbs in little-endian order.

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;

use zeroize::Zeroize;

/// Add with carry: returns (a + b + carry, carry_out).
#[inline]
pub(crate) fn adc(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (s0, c0) = a.overflowing_add(b);
    let (s1, c1) = s0.overflowing_add(carry as u64);
    (s1, c0 | c1)
}

/// Subtract with borrow: returns (a - b - borrow, borrow_out).
#[inline]
pub(crate) fn sbb(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (d0, b0) = a.overflowing_sub(b);
    let (d1, b1) = d0.overflowing_sub(borrow as u64);
    (d1, b0 | b1)
}

/// Unsigned 256-bit integer.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U256 {
    limbs: [u64; 4],
}

impl U256 {
    pub const ZERO: Self = Self { limbs: [0; 4] };
    pub const ONE: Self = Self {
        limbs: [1, 0, 0, 0],
    };

    /// Create from 4 limbs (little-endian).
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self { limbs }
    }

    pub const fn from_u64(v: u64) -> Self {
        Self {
            limbs: [v, 0, 0, 0],
        }
    }

    pub const fn limbs(&self) -> &[u64; 4] {
        &self.limbs
    }

    /// Create from exactly 32 big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        Self { limbs }
    }

    /// Interpret an arbitrary-length big-endian byte string as an integer.
    /// Returns None if the value does not fit in 256 bits.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let (high, low) = if bytes.len() > 32 {
            bytes.split_at(bytes.len() - 32)
        } else {
            (&[][..], bytes)
        };
        if high.iter().any(|&b| b != 0) {
            return None;
        }

        let mut padded = [0u8; 32];
        padded[32 - low.len()..].copy_from_slice(low);
        Some(Self::from_be_bytes(&padded))
    }

    /// Convert to 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[0..8].copy_from_slice(&self.limbs[3].to_be_bytes());
        bytes[8..16].copy_from_slice(&self.limbs[2].to_be_bytes());
        bytes[16..24].copy_from_slice(&self.limbs[1].to_be_bytes());
        bytes[24..32].copy_from_slice(&self.limbs[0].to_be_bytes());
        bytes
    }

    /// Parse a big-endian hex string of at most 64 digits.
    /// Accepts an optional `0x` prefix and odd digit counts.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(hex::FromHexError::InvalidStringLength);
        }

        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(padded)?;
        Self::from_be_slice(&bytes).ok_or(hex::FromHexError::InvalidStringLength)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    /// Value of bit `i` (0 = least significant).
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < 256);
        (self.limbs[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Number of significant bits.
    pub fn bits(&self) -> usize {
        for i in (0..4).rev() {
            if self.limbs[i] != 0 {
                return i * 64 + 64 - self.limbs[i].leading_zeros() as usize;
            }
        }
        0
    }

    /// Remainder modulo 4.
    pub fn low_bits2(&self) -> u64 {
        self.limbs[0] & 3
    }

    /// Wrapping addition. Returns (sum, carry).
    pub fn overflowing_add(&self, other: &Self) -> (Self, bool) {
        let (r0, c0) = adc(self.limbs[0], other.limbs[0], false);
        let (r1, c1) = adc(self.limbs[1], other.limbs[1], c0);
        let (r2, c2) = adc(self.limbs[2], other.limbs[2], c1);
        let (r3, c3) = adc(self.limbs[3], other.limbs[3], c2);
        (
            Self {
                limbs: [r0, r1, r2, r3],
            },
            c3,
        )
    }

    /// Wrapping subtraction. Returns (difference, borrow).
    pub fn overflowing_sub(&self, other: &Self) -> (Self, bool) {
        let (r0, b0) = sbb(self.limbs[0], other.limbs[0], false);
        let (r1, b1) = sbb(self.limbs[1], other.limbs[1], b0);
        let (r2, b2) = sbb(self.limbs[2], other.limbs[2], b1);
        let (r3, b3) = sbb(self.limbs[3], other.limbs[3], b2);
        (
            Self {
                limbs: [r0, r1, r2, r3],
            },
            b3,
        )
    }

    /// Logical right shift by `n < 64` bits.
    pub fn shr(&self, n: u32) -> Self {
        debug_assert!(n < 64);
        if n == 0 {
            return *self;
        }
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            limbs[i] = self.limbs[i] >> n;
            if i < 3 {
                limbs[i] |= self.limbs[i + 1] << (64 - n);
            }
        }
        Self { limbs }
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for U256 {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

impl Zeroize for U256 {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256(0x{:x})", self)
    }
}
