//! Secret keys: scalars in [1, n).

#![forbid(unsafe_code)]

use std::fmt;

use seckey_core::{Error, Result};
use zeroize::Zeroize;

use super::params::CurveParams;
use crate::uint::U256;

/// A secret scalar `sk` with `1 <= sk < n`.
///
/// Zeroized on drop. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    value: U256,
}

/// A secret key given either as an integer or as a hex string.
#[derive(Clone, Copy)]
pub enum SecretInput<'a> {
    Scalar(U256),
    Hex(&'a str),
}

impl From<U256> for SecretInput<'_> {
    fn from(v: U256) -> Self {
        SecretInput::Scalar(v)
    }
}

impl<'a> From<&'a str> for SecretInput<'a> {
    fn from(s: &'a str) -> Self {
        SecretInput::Hex(s)
    }
}

impl SecretKey {
    /// Wrap a scalar, checking `1 <= value < n`.
    pub fn new(curve: &CurveParams, value: U256) -> Result<Self> {
        if value.is_zero() || value >= *curve.order() {
            return Err(Error::SecretKeyOutOfRange);
        }
        Ok(Self { value })
    }

    /// Parse a base-16 secret key (optional `0x` prefix).
    pub fn from_hex(curve: &CurveParams, s: &str) -> Result<Self> {
        let value = U256::from_hex(s.trim()).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Self::new(curve, value)
    }

    /// Accept either an integer or a hex string.
    pub fn parse<'a>(curve: &CurveParams, input: impl Into<SecretInput<'a>>) -> Result<Self> {
        match input.into() {
            SecretInput::Scalar(v) => Self::new(curve, v),
            SecretInput::Hex(s) => Self::from_hex(curve, s),
        }
    }

    pub fn value(&self) -> &U256 {
        &self.value
    }

    /// 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.value.to_be_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}
