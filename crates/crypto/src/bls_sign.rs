//! BLS signing: pubkeys on G1, signatures on G2, pairing-checked against
//! the G1 generator.

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{pairing, G1Affine, G2Affine, G2Projective, Scalar};
use group::Curve;

/// Domain separation tag for deposit/owner-nonce partial signatures,
/// following the `BLS_SIG_*_POP_` naming convention used by the Ethereum
/// consensus BLS signature suite.
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

fn hash_to_g2(msg: &[u8]) -> G2Affine {
    let point: G2Projective = <G2Projective as HashToCurve<ExpandMsgXmd<sha2::Sha256>>>::hash_to_curve(
        [msg],
        DST,
    );
    point.to_affine()
}

/// Produces a signature share over `msg` using this node's share secret.
pub fn sign(share_secret: &Scalar, msg: &[u8]) -> G2Affine {
    (hash_to_g2(msg) * share_secret).to_affine()
}

/// Verifies a signature share against the corresponding share public key.
pub fn verify(share_public: &G1Affine, msg: &[u8], sig: &G2Affine) -> bool {
    let hm = hash_to_g2(msg);
    pairing(share_public, &hm) == pairing(&G1Affine::generator(), sig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::scalar_to_g1;
    use ff::Field;
    use rand::rngs::OsRng;

    #[test]
    fn sign_and_verify_round_trip() {
        let secret = Scalar::random(OsRng);
        let public = scalar_to_g1(&secret);
        let sig = sign(&secret, b"hello world");
        assert!(verify(&public, b"hello world", &sig));
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let secret = Scalar::random(OsRng);
        let public = scalar_to_g1(&secret);
        let sig = sign(&secret, b"hello world");
        assert!(!verify(&public, b"goodbye", &sig));
    }
}
