use crate::bundles::{DealBundle, SignedDealBundle};
use crate::error::ProtocolError;
use bls12_381::{G1Affine, Scalar};
use dkg_crypto::suite::{compress_g2, decompress_g2};
use dkg_crypto::{bls_sign, CryptoError};

fn nonce_bound_bytes(nonce: &[u8; 32], bundle: &DealBundle) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + 256);
    out.extend_from_slice(nonce);
    bincode::serialize_into(&mut out, bundle).expect("DealBundle always serializes");
    out
}

/// Authenticates a dealer's bundle to this DKG session: a BLS-on-G2
/// signature over the nonce-bound canonical bytes, keyed by the dealer's
/// long-term exchange scalar. This is independent of (and in addition to)
/// the RSA signature over the outer transport envelope.
pub fn sign_deal_bundle(dealer_secret: &Scalar, nonce: &[u8; 32], bundle: DealBundle) -> SignedDealBundle {
    let msg = nonce_bound_bytes(nonce, &bundle);
    let sig = bls_sign::sign(dealer_secret, &msg);
    SignedDealBundle {
        bundle,
        signature: compress_g2(&sig).to_vec(),
    }
}

pub fn verify_deal_bundle(
    dealer_public: &G1Affine,
    nonce: &[u8; 32],
    signed: &SignedDealBundle,
) -> Result<(), ProtocolError> {
    let decode = |_: CryptoError| ProtocolError::BadDealSignature {
        dealer_idx: signed.bundle.dealer_idx,
    };
    let sig = decompress_g2(&signed.signature).map_err(decode)?;
    let msg = nonce_bound_bytes(nonce, &signed.bundle);
    if bls_sign::verify(dealer_public, &msg, &sig) {
        Ok(())
    } else {
        Err(ProtocolError::BadDealSignature {
            dealer_idx: signed.bundle.dealer_idx,
        })
    }
}
