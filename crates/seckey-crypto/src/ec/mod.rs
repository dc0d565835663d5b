//! Curves of the form y² = x³ + b and SEC-encoded keys on them.

#![forbid(unsafe_code)]

pub mod field;
pub mod params;
pub mod point;
pub mod pubkey;
pub mod secret;

pub use params::CurveParams;
pub use point::{AffinePoint, Point};
pub use pubkey::PublicKey;
pub use secret::{SecretInput, SecretKey};
