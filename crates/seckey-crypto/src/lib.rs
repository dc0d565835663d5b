//! Curve arithmetic and SEC public key encoding for seckey.
//!
//! Field and group arithmetic are written from scratch over an explicit
//! `CurveParams` value. `k256` is a dev-dependency used only to cross-check.

#![forbid(unsafe_code)]

pub mod ec;
pub mod uint;

pub use ec::{AffinePoint, CurveParams, PublicKey, SecretInput, SecretKey};
pub use uint::U256;
