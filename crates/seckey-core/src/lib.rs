//! Core error types for seckey.

#![forbid(unsafe_code)]

mod error;

pub use error::{Error, ErrorKind};

pub type Result<T> = std::result::Result<T, Error>;
