use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use seckey_core::ErrorKind;
use seckey_crypto::{CurveParams, PublicKey};
use seckey_keygen::{generate_key_pair_named, key_pair_from, KeyPair};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "seckey",
    about = "secp256k1 key pair generator and SEC public key inspector"
)]
struct Args {
    /// Log verbosity: -v for debug, -vv for trace (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new secret/public key pair
    Generate {
        /// Entropy source: os, user, or mastering (test vector)
        #[arg(short = 's', long = "source", default_value = "os")]
        source: String,

        /// Print the 65-byte uncompressed public key
        #[arg(long = "uncompressed", default_value_t = false)]
        uncompressed: bool,
    },

    /// Derive the public key of a hex secret key
    Pubkey {
        /// Secret key as hex (optional 0x prefix)
        secret: String,

        /// Print the 65-byte uncompressed public key
        #[arg(long = "uncompressed", default_value_t = false)]
        uncompressed: bool,
    },

    /// Decode a hex SEC public key and show its coordinates
    Decode {
        /// 33- or 65-byte SEC encoding as hex
        encoded: String,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn render_key_pair(pair: &KeyPair, uncompressed: bool) -> String {
    format!(
        "secret key: {}\npublic key: {}",
        pair.secret().to_hex(),
        hex::encode(pair.public().encode(!uncompressed))
    )
}

fn describe_public_key(curve: &CurveParams, pk: &PublicKey) -> String {
    let on_curve = pk.is_on_curve(curve);
    if !on_curve {
        warn!("decoded point does not satisfy the curve equation");
    }
    format!(
        "x:            {:x}\ny:            {:x}\ncompressed:   {}\nuncompressed: {}\non curve:     {}",
        pk.x(),
        pk.y(),
        hex::encode(pk.encode(true)),
        hex::encode(pk.encode(false)),
        if on_curve { "yes" } else { "NO" }
    )
}

fn decode_hex_arg(s: &str) -> anyhow::Result<Vec<u8>> {
    let digits = s.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    hex::decode(digits).with_context(|| format!("'{}' is not valid hex", s))
}

fn run(args: Args) -> anyhow::Result<String> {
    let curve = CurveParams::secp256k1();

    match args.command {
        Command::Generate {
            source,
            uncompressed,
        } => {
            debug!(%source, "generating key pair");
            let pair = generate_key_pair_named(&curve, &source)?;
            Ok(render_key_pair(&pair, uncompressed))
        }
        Command::Pubkey {
            secret,
            uncompressed,
        } => {
            let pair = key_pair_from(&curve, secret.as_str())?;
            Ok(hex::encode(pair.public().encode(!uncompressed)))
        }
        Command::Decode { encoded } => {
            let bytes = decode_hex_arg(&encoded)?;
            let pk = PublicKey::decode(&curve, &bytes)?;
            Ok(describe_public_key(&curve, &pk))
        }
    }
}

/// Exit status: 2 for bad input, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<seckey_core::Error>().map(|e| e.kind()) {
        Some(ErrorKind::Configuration | ErrorKind::InvalidEncoding | ErrorKind::Value) => 2,
        Some(_) => 1,
        None if err.downcast_ref::<hex::FromHexError>().is_some() => 2,
        None => 1,
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(exit_code(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTERING: &str = "3aba4162c7251c891207b747840551a71939b0de081f85c4e44cf7c13e41daa6";
    const MASTERING_COMPRESSED: &str =
        "025c0de3b9c8ab18dd04e3511243ec2952002dbfadc864b9628910169d9b9b00ec";

    fn run_args(argv: &[&str]) -> anyhow::Result<String> {
        let args = Args::try_parse_from(std::iter::once("seckey").chain(argv.iter().copied()))?;
        run(args)
    }

    #[test]
    fn test_generate_mastering() {
        let out = run_args(&["generate", "--source", "mastering"]).unwrap();
        assert_eq!(
            out,
            format!("secret key: {MASTERING}\npublic key: {MASTERING_COMPRESSED}")
        );
    }

    #[test]
    fn test_generate_os_uncompressed() {
        let out = run_args(&["generate", "--uncompressed"]).unwrap();
        let public = out.lines().nth(1).unwrap();
        let hex_part = public.strip_prefix("public key: ").unwrap();
        assert_eq!(hex_part.len(), 130);
        assert!(hex_part.starts_with("04"));
    }

    #[test]
    fn test_generate_unknown_source_exit_code() {
        let err = run_args(&["generate", "-s", "dice"]).unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert!(err.to_string().contains("dice"));
    }

    #[test]
    fn test_pubkey_command() {
        let out = run_args(&["pubkey", MASTERING]).unwrap();
        assert_eq!(out, MASTERING_COMPRESSED);

        let err = run_args(&["pubkey", "nothex"]).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_decode_command() {
        let out = run_args(&["decode", MASTERING_COMPRESSED]).unwrap();
        assert!(out.contains("on curve:     yes"));
        assert!(out.contains(
            "y:            243bcefdd4347074d44bd7356d6a53c495737dd96295e2a9374bf5f02ebfc176"
        ));
    }

    #[test]
    fn test_decode_off_curve_point() {
        let encoded = format!("02{}", "00".repeat(32));
        let out = run_args(&["decode", &encoded]).unwrap();
        assert!(out.contains("on curve:     NO"));
    }

    #[test]
    fn test_decode_bad_input() {
        let err = run_args(&["decode", &format!("05{}", "00".repeat(32))]).unwrap_err();
        assert_eq!(exit_code(&err), 2);

        let err = run_args(&["decode", &format!("04{}", "00".repeat(63))]).unwrap_err();
        assert_eq!(exit_code(&err), 2);

        let err = run_args(&["decode", "zz"]).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }
}
