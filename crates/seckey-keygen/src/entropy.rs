//! Entropy sources for secret key sampling.
//!
//! - `os`: 32 bytes from the operating system CSPRNG
//! - `user`: five typed words mixed with timestamps, hashed with SHA-256
//! - `mastering`: the fixed Mastering Bitcoin ch. 4 secret (tests only)

#![forbid(unsafe_code)]

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use seckey_core::{Error, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Number of words requested by the interactive source.
pub const USER_WORDS: usize = 5;

/// Secret key from Mastering Bitcoin, chapter 4.
pub const MASTERING_BITCOIN_SECRET: [u8; 32] = [
    0x3a, 0xba, 0x41, 0x62, 0xc7, 0x25, 0x1c, 0x89,
    0x12, 0x07, 0xb7, 0x47, 0x84, 0x05, 0x51, 0xa7,
    0x19, 0x39, 0xb0, 0xde, 0x08, 0x1f, 0x85, 0xc4,
    0xe4, 0x4c, 0xf7, 0xc1, 0x3e, 0x41, 0xda, 0xa6,
];

/// A source of raw samples, read as big-endian integers by the sampler.
pub trait EntropySource {
    /// Draw one fresh sample.
    fn sample(&mut self) -> Result<Vec<u8>>;

    /// Canonical source name for logs.
    fn name(&self) -> &'static str;

    /// True for sources that must never produce real key material.
    fn is_test_vector(&self) -> bool {
        false
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn sample(&mut self) -> Result<Vec<u8>> {
        (**self).sample()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_test_vector(&self) -> bool {
        (**self).is_test_vector()
    }
}

/// Operating system randomness. Generic so tests can substitute a seeded RNG.
#[derive(Debug, Default)]
pub struct OsEntropy<R = OsRng> {
    rng: R,
}

impl OsEntropy<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> OsEntropy<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + CryptoRng> EntropySource for OsEntropy<R> {
    fn sample(&mut self) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; 32];
        self.rng.fill_bytes(&mut bytes);
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "os"
    }
}

/// Prompts for words on `output`, reads them from `input`, and hashes them
/// together with the time each answer arrived.
///
/// Blocks until every line is read. End of input is an error.
pub struct InteractiveEntropy<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveEntropy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_word(&mut self, index: usize) -> Result<String> {
        write!(self.output, "Enter some word #{}/{}: ", index + 1, USER_WORDS)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before all words were entered",
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> EntropySource for InteractiveEntropy<R, W> {
    fn sample(&mut self) -> Result<Vec<u8>> {
        let mut entropy = String::new();
        for i in 0..USER_WORDS {
            let word = self.read_word(i)?;
            entropy.push_str(&word);
            entropy.push('|');
            entropy.push_str(&timestamp_nanos().to_string());
            entropy.push('|');
        }
        Ok(Sha256::digest(entropy.as_bytes()).to_vec())
    }

    fn name(&self) -> &'static str {
        "user"
    }
}

impl<R, W> fmt::Debug for InteractiveEntropy<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveEntropy").finish_non_exhaustive()
    }
}

fn timestamp_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

/// Always returns [`MASTERING_BITCOIN_SECRET`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedTestVector;

impl EntropySource for FixedTestVector {
    fn sample(&mut self) -> Result<Vec<u8>> {
        Ok(MASTERING_BITCOIN_SECRET.to_vec())
    }

    fn name(&self) -> &'static str {
        "mastering"
    }

    fn is_test_vector(&self) -> bool {
        true
    }
}

/// Entropy source selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Os,
    User,
    Mastering,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Os, SourceKind::User, SourceKind::Mastering];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Os => "os",
            SourceKind::User => "user",
            SourceKind::Mastering => "mastering",
        }
    }

    /// Open the source, wiring the interactive one to stdin and stderr.
    pub fn open_stdio(self) -> Box<dyn EntropySource> {
        debug!(source = self.as_str(), "opening entropy source");
        match self {
            SourceKind::Os => Box::new(OsEntropy::new()),
            SourceKind::User => Box::new(InteractiveEntropy::new(
                io::stdin().lock(),
                io::stderr(),
            )),
            SourceKind::Mastering => Box::new(FixedTestVector),
        }
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "os" | "system" => Ok(SourceKind::Os),
            "user" | "interactive" => Ok(SourceKind::User),
            "mastering" | "fixed-test-vector" => Ok(SourceKind::Mastering),
            _ => Err(Error::UnknownEntropySource(s.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
