//! BLS12-381 suite adapter.
//!
//! Validator keys and share public keys live on G1 (48-byte compressed
//! points); signatures live on G2 (96-byte compressed points) — the
//! "min-pubkey-size" variant used by the Ethereum consensus spec.

use crate::error::CryptoError;
use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use group::{Curve, Group};
use rand_core::RngCore;

pub const G1_COMPRESSED_SIZE: usize = 48;
pub const G2_COMPRESSED_SIZE: usize = 96;

/// Picks this node's ephemeral long-term DKG secret.
pub fn random_scalar(rng: &mut (impl RngCore + rand_core::CryptoRng)) -> Scalar {
    Scalar::random(rng)
}

pub fn scalar_to_g1(s: &Scalar) -> G1Affine {
    (G1Affine::generator() * s).to_affine()
}

pub fn compress_g1(p: &G1Affine) -> [u8; G1_COMPRESSED_SIZE] {
    p.to_compressed()
}

pub fn decompress_g1(bytes: &[u8]) -> Result<G1Affine, CryptoError> {
    if bytes.len() != G1_COMPRESSED_SIZE {
        return Err(CryptoError::BadPointLength {
            expected: G1_COMPRESSED_SIZE,
            got: bytes.len(),
        });
    }
    let mut buf = [0u8; G1_COMPRESSED_SIZE];
    buf.copy_from_slice(bytes);
    Option::from(G1Affine::from_compressed(&buf)).ok_or(CryptoError::InvalidPoint)
}

pub fn compress_g2(p: &G2Affine) -> [u8; G2_COMPRESSED_SIZE] {
    p.to_compressed()
}

pub fn decompress_g2(bytes: &[u8]) -> Result<G2Affine, CryptoError> {
    if bytes.len() != G2_COMPRESSED_SIZE {
        return Err(CryptoError::BadPointLength {
            expected: G2_COMPRESSED_SIZE,
            got: bytes.len(),
        });
    }
    let mut buf = [0u8; G2_COMPRESSED_SIZE];
    buf.copy_from_slice(bytes);
    Option::from(G2Affine::from_compressed(&buf)).ok_or(CryptoError::InvalidPoint)
}

/// Sums G1 points, used to combine qualified dealers' commitment vectors.
pub fn sum_g1(points: impl IntoIterator<Item = G1Affine>) -> G1Affine {
    points
        .into_iter()
        .fold(G1Projective::identity(), |acc, p| acc + p)
        .to_affine()
}

/// Sums scalars, used to combine qualified dealers' share evaluations.
pub fn sum_scalars(scalars: impl IntoIterator<Item = Scalar>) -> Scalar {
    scalars.into_iter().fold(Scalar::ZERO, |acc, s| acc + s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn g1_compress_round_trips() {
        let mut rng = OsRng;
        let s = random_scalar(&mut rng);
        let p = scalar_to_g1(&s);
        let bytes = compress_g1(&p);
        let back = decompress_g1(&bytes).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn decompress_rejects_wrong_length() {
        let err = decompress_g1(&[0u8; 10]).unwrap_err();
        matches!(err, CryptoError::BadPointLength { .. });
    }
}
