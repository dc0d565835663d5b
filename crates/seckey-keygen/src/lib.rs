//! Secret key sampling and key pair generation for seckey.

#![forbid(unsafe_code)]

pub mod entropy;
pub mod generator;

pub use entropy::{EntropySource, FixedTestVector, InteractiveEntropy, OsEntropy, SourceKind};
pub use generator::{
    generate_key_pair, generate_key_pair_named, generate_secret_key, key_pair_from, KeyPair,
};
