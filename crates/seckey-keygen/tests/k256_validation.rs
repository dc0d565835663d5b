//! Validate generated key pairs against k256 0.13
//!
//! Both sides derive the public key from the SAME secret independently. Any
//! difference in the SEC bytes means our arithmetic or encoding is wrong.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use seckey_crypto::{CurveParams, PublicKey};
use seckey_keygen::{generate_key_pair, FixedTestVector, OsEntropy};

fn reference_encoding(secret: &[u8; 32], compressed: bool) -> Vec<u8> {
    let sk = k256::SecretKey::from_slice(secret).unwrap();
    sk.public_key().to_encoded_point(compressed).as_bytes().to_vec()
}

#[test]
fn test_mastering_vector_matches_reference() {
    let curve = CurveParams::secp256k1();
    let pair = generate_key_pair(&curve, &mut FixedTestVector).unwrap();
    let secret = pair.secret().to_bytes();

    for compressed in [true, false] {
        assert_eq!(
            pair.public().encode(compressed),
            reference_encoding(&secret, compressed),
            "compressed = {compressed}"
        );
    }
}

#[test]
fn test_seeded_pairs_match_reference() {
    let curve = CurveParams::secp256k1();
    let mut src = OsEntropy::with_rng(ChaCha20Rng::seed_from_u64(2024));

    for _ in 0..16 {
        let pair = generate_key_pair(&curve, &mut src).unwrap();
        let secret = pair.secret().to_bytes();

        for compressed in [true, false] {
            let ours = pair.public().encode(compressed);
            let theirs = reference_encoding(&secret, compressed);
            assert_eq!(
                ours,
                theirs,
                "mismatch for secret {}, compressed = {compressed}",
                hex::encode(secret)
            );
        }
    }
}

#[test]
fn test_reference_encodings_decode_to_our_keys() {
    let curve = CurveParams::secp256k1();
    let mut src = OsEntropy::with_rng(ChaCha20Rng::seed_from_u64(7));

    for _ in 0..16 {
        let pair = generate_key_pair(&curve, &mut src).unwrap();
        let secret = pair.secret().to_bytes();

        let from_compressed = PublicKey::decode(&curve, &reference_encoding(&secret, true)).unwrap();
        let from_uncompressed =
            PublicKey::decode(&curve, &reference_encoding(&secret, false)).unwrap();

        assert_eq!(&from_compressed, pair.public());
        assert_eq!(from_compressed, from_uncompressed);
    }
}

#[test]
fn test_reference_accepts_our_encodings() {
    let curve = CurveParams::secp256k1();
    let mut src = OsEntropy::with_rng(ChaCha20Rng::seed_from_u64(11));

    for _ in 0..8 {
        let pair = generate_key_pair(&curve, &mut src).unwrap();
        let compressed = k256::PublicKey::from_sec1_bytes(&pair.public().encode(true)).unwrap();
        let uncompressed = k256::PublicKey::from_sec1_bytes(&pair.public().encode(false)).unwrap();
        assert_eq!(compressed, uncompressed);
    }
}
