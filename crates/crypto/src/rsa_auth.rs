//! RSA-PKCS#1-v1.5-SHA256 over the wire, and RSA-PKCS#1-v1.5 encryption for
//! at-rest share protection. Every node authenticates every message it sends
//! with its own key and verifies every message it receives against the
//! sender's key embedded in (or already known from) the ceremony's operator
//! set.

use crate::error::CryptoError;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

pub fn sign(private_key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let digest = Sha256::digest(data);
    private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::Rsa(e.to_string()))
}

pub fn verify(public_key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    let digest = Sha256::digest(data);
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .map_err(|_| CryptoError::AuthFailed)
}

pub fn encrypt(
    public_key: &RsaPublicKey,
    rng: &mut (impl rand_core::CryptoRng + rand_core::RngCore),
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    public_key
        .encrypt(rng, Pkcs1v15Encrypt, plaintext)
        .map_err(|e| CryptoError::Rsa(e.to_string()))
}

pub fn decrypt(private_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    private_key
        .decrypt(Pkcs1v15Encrypt, ciphertext)
        .map_err(|e| CryptoError::Rsa(e.to_string()))
}

/// Decodes an operator's public key as shipped in the wire format: DER,
/// SubjectPublicKeyInfo wrapping PKCS#1 RSAPublicKey, falling back to bare
/// PKCS#1 DER for keys minted by tooling that skips the SPKI wrapper.
pub fn decode_public_key_der(der: &[u8]) -> Result<RsaPublicKey, CryptoError> {
    RsaPublicKey::from_public_key_der(der)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(der))
        .map_err(|e| CryptoError::Rsa(e.to_string()))
}

pub fn load_private_key_pem(pem: &str) -> Result<RsaPrivateKey, CryptoError> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| CryptoError::Rsa(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use rsa::pkcs8::EncodePublicKey;

    fn test_keypair() -> (RsaPrivateKey, RsaPublicKey) {
        let priv_key = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
        let pub_key = RsaPublicKey::from(&priv_key);
        (priv_key, pub_key)
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (priv_key, pub_key) = test_keypair();
        let sig = sign(&priv_key, b"canonical transport bytes").unwrap();
        assert!(verify(&pub_key, b"canonical transport bytes", &sig).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_data() {
        let (priv_key, pub_key) = test_keypair();
        let sig = sign(&priv_key, b"original").unwrap();
        assert!(verify(&pub_key, b"tampered", &sig).is_err());
    }

    #[test]
    fn encrypt_decrypt_round_trips_share_bytes() {
        let (priv_key, pub_key) = test_keypair();
        let share = b"0123456789abcdef0123456789abcdef";
        let ct = encrypt(&pub_key, &mut OsRng, share).unwrap();
        let pt = decrypt(&priv_key, &ct).unwrap();
        assert_eq!(pt, share);
    }

    #[test]
    fn decode_public_key_der_accepts_spki_encoding() {
        let (_priv_key, pub_key) = test_keypair();
        let der = pub_key.to_public_key_der().unwrap();
        let decoded = decode_public_key_der(der.as_bytes()).unwrap();
        assert_eq!(decoded, pub_key);
    }
}
