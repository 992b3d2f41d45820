//! The cryptographic suite adapter: BLS12-381 curve arithmetic, RSA
//! authentication and encryption, Keccak-256, and the deposit message
//! signing root. Every other crate goes through here rather than touching
//! `bls12_381`/`rsa`/`sha3` directly.

pub mod bls_sign;
pub mod deposit;
pub mod ecies;
pub mod error;
pub mod keccak;
pub mod rsa_auth;
pub mod suite;

pub use error::CryptoError;
