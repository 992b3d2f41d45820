//! Minimal ECIES over G1: an ephemeral-key Diffie-Hellman shared secret
//! hashed into a one-time pad for a single 32-byte scalar. Used to encrypt
//! one dealer's share evaluation to one recipient's DKG exchange key.

use crate::error::CryptoError;
use crate::suite::{compress_g1, decompress_g1, G1_COMPRESSED_SIZE};
use bls12_381::{G1Affine, G1Projective, Scalar};
use ff::Field;
use group::Curve;
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

const CIPHERTEXT_LEN: usize = G1_COMPRESSED_SIZE + 32;

fn derive_pad(shared: &G1Affine) -> [u8; 32] {
    let digest = Sha256::digest(compress_g1(shared));
    let mut pad = [0u8; 32];
    pad.copy_from_slice(&digest);
    pad
}

fn xor32(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Encrypts `plaintext` so only the holder of `recipient_secret` (whose
/// public counterpart is `recipient_public`) can recover it.
pub fn encrypt_scalar(
    recipient_public: &G1Affine,
    plaintext: &Scalar,
    rng: &mut (impl RngCore + CryptoRng),
) -> Vec<u8> {
    let ephemeral_secret = Scalar::random(rng);
    let ephemeral_public = (G1Affine::generator() * ephemeral_secret).to_affine();
    let shared = (G1Projective::from(*recipient_public) * ephemeral_secret).to_affine();
    let pad = derive_pad(&shared);
    let ct = xor32(&plaintext.to_bytes(), &pad);

    let mut out = Vec::with_capacity(CIPHERTEXT_LEN);
    out.extend_from_slice(&compress_g1(&ephemeral_public));
    out.extend_from_slice(&ct);
    out
}

pub fn decrypt_scalar(recipient_secret: &Scalar, ciphertext: &[u8]) -> Result<Scalar, CryptoError> {
    if ciphertext.len() != CIPHERTEXT_LEN {
        return Err(CryptoError::BadPointLength {
            expected: CIPHERTEXT_LEN,
            got: ciphertext.len(),
        });
    }
    let ephemeral_public = decompress_g1(&ciphertext[..G1_COMPRESSED_SIZE])?;
    let shared = (G1Projective::from(ephemeral_public) * recipient_secret).to_affine();
    let pad = derive_pad(&shared);
    let mut ct = [0u8; 32];
    ct.copy_from_slice(&ciphertext[G1_COMPRESSED_SIZE..]);
    let pt_bytes = xor32(&ct, &pad);
    Option::from(Scalar::from_bytes(&pt_bytes)).ok_or(CryptoError::InvalidPoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::scalar_to_g1;
    use rand::rngs::OsRng;

    #[test]
    fn encrypt_decrypt_round_trips() {
        let secret = Scalar::random(OsRng);
        let public = scalar_to_g1(&secret);
        let plaintext = Scalar::random(OsRng);

        let ct = encrypt_scalar(&public, &plaintext, &mut OsRng);
        let pt = decrypt_scalar(&secret, &ct).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn wrong_recipient_secret_does_not_recover_plaintext() {
        let secret = Scalar::random(OsRng);
        let public = scalar_to_g1(&secret);
        let plaintext = Scalar::random(OsRng);
        let ct = encrypt_scalar(&public, &plaintext, &mut OsRng);

        let other_secret = Scalar::random(OsRng);
        let recovered = decrypt_scalar(&other_secret, &ct);
        assert!(recovered.is_err() || recovered.unwrap() != plaintext);
    }
}
