use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown entropy source '{0}': expected one of os, user, or mastering")]
    UnknownEntropySource(String),

    #[error("empty public key encoding")]
    EmptyEncoding,

    #[error("invalid public key prefix 0x{0:02x}: expected 0x02, 0x03, or 0x04")]
    InvalidPrefix(u8),

    #[error("invalid public key length {got} for prefix 0x{prefix:02x}: expected {expected} bytes")]
    InvalidLength {
        prefix: u8,
        expected: usize,
        got: usize,
    },

    #[error("invalid hex secret key: {0}")]
    InvalidHex(String),

    #[error("secret key out of range [1, n)")]
    SecretKeyOutOfRange,

    #[error("square root requires a modulus congruent to 3 mod 4")]
    UnsupportedModulus,

    #[error("invalid curve parameters: {0}")]
    InvalidCurve(String),

    #[error("point at infinity")]
    PointAtInfinity,

    #[error("entropy input failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration, e.g. an unknown entropy source name.
    Configuration,
    /// Malformed SEC bytes.
    InvalidEncoding,
    /// Malformed or out-of-range secret key value.
    Value,
    /// Curve parameters that the requested operation cannot handle.
    Curve,
    /// Console or OS failure while collecting entropy.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownEntropySource(_) => ErrorKind::Configuration,
            Error::EmptyEncoding | Error::InvalidPrefix(_) | Error::InvalidLength { .. } => {
                ErrorKind::InvalidEncoding
            }
            Error::InvalidHex(_) | Error::SecretKeyOutOfRange => ErrorKind::Value,
            Error::UnsupportedModulus | Error::InvalidCurve(_) | Error::PointAtInfinity => {
                ErrorKind::Curve
            }
            Error::Io(_) => ErrorKind::Io,
        }
    }
}
