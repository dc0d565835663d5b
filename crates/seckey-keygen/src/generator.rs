//! Secret key sampling and key pair generation.
//!
//! Pipeline: entropy sample → rejection check against n → sk · G → public key

#![forbid(unsafe_code)]

use seckey_core::{Error, Result};
use seckey_crypto::{CurveParams, PublicKey, SecretInput, SecretKey, U256};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::entropy::{EntropySource, SourceKind};

/// A secret key and the public key derived from it.
#[derive(Clone, Debug)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Derive the public half of `secret`.
    pub fn from_secret(curve: &CurveParams, secret: SecretKey) -> Result<Self> {
        let public = PublicKey::from_secret_key(curve, &secret)?;
        Ok(Self { secret, public })
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn into_parts(self) -> (SecretKey, PublicKey) {
        (self.secret, self.public)
    }
}

/// Draw a uniform integer in `[1, upper_bound)`.
///
/// Each sample is read as a big-endian integer and kept only if it already
/// lies in range; anything else is discarded and a fresh sample drawn. There
/// is no reduction mod `upper_bound`, which would bias the result. For
/// secp256k1 a 32-byte sample is rejected with probability about 2^-128.
///
/// A deterministic source whose sample is out of range never terminates.
pub fn generate_secret_key(
    upper_bound: &U256,
    source: &mut dyn EntropySource,
) -> Result<U256> {
    if *upper_bound <= U256::ONE {
        return Err(Error::InvalidCurve(
            "secret key upper bound must be greater than 1".into(),
        ));
    }

    let mut rejected: u64 = 0;
    loop {
        let mut sample = source.sample()?;
        let candidate = U256::from_be_slice(&sample);
        sample.zeroize();

        match candidate {
            Some(key) if !key.is_zero() && key < *upper_bound => {
                if rejected > 0 {
                    debug!(source = source.name(), rejected, "accepted secret key after resampling");
                }
                return Ok(key);
            }
            _ => {
                rejected += 1;
                debug!(source = source.name(), rejected, "sample outside [1, n), resampling");
            }
        }
    }
}

/// Generate a key pair on `curve` from `source`.
pub fn generate_key_pair(curve: &CurveParams, source: &mut dyn EntropySource) -> Result<KeyPair> {
    if source.is_test_vector() {
        warn!(
            source = source.name(),
            "generating a key pair from a fixed test vector; do not use it for real funds"
        );
    }
    let value = generate_secret_key(curve.order(), source)?;
    KeyPair::from_secret(curve, SecretKey::new(curve, value)?)
}

/// Generate a key pair from a source selected by name (`os`, `user`, `mastering`).
pub fn generate_key_pair_named(curve: &CurveParams, source: &str) -> Result<KeyPair> {
    let kind: SourceKind = source.parse()?;
    let mut source = kind.open_stdio();
    generate_key_pair(curve, source.as_mut())
}

/// Build a key pair from an integer or hex secret key.
pub fn key_pair_from<'a>(curve: &CurveParams, secret: impl Into<SecretInput<'a>>) -> Result<KeyPair> {
    KeyPair::from_secret(curve, SecretKey::parse(curve, secret)?)
}
