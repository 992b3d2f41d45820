//! The post-DKG signer: turns a raw `DkgResult` into the `Output` an
//! operator publishes — the validator's aggregate public key, this node's
//! share (RSA-sealed for storage), and partial signatures over both the
//! deposit message and the owner/nonce ownership proof.
//!
//! Every self-check below is load-bearing: a BLS share that cannot sign its
//! own proof, or an RSA round trip that does not recover its own plaintext,
//! means the DKG produced a share this node cannot actually use. A
//! self-check failure is fatal and aborts the ceremony instance.

use crate::error::CeremonyError;
use dkg_crypto::{bls_sign, deposit, keccak, rsa_auth, suite};
use dkg_observability::{CeremonyMetrics, EventType, LogEvent};
use dkg_protocol::DkgResult;
use dkg_types::{EthNetwork, InitMessage, OperatorId, Output, RequestId};
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;

pub fn derive_output(
    request_id: &RequestId,
    own_operator_id: OperatorId,
    rsa_private_key: &RsaPrivateKey,
    init: &InitMessage,
    dkg_result: &DkgResult,
    metrics: &CeremonyMetrics,
) -> Result<Output, CeremonyError> {
    let validator_public_key_affine = *dkg_result
        .qualifying_commitments
        .first()
        .ok_or_else(|| CeremonyError::CryptoFatal("dkg result carries no commitments".into()))?;
    let validator_public_key = suite::compress_g1(&validator_public_key_affine);

    let share_public_key_affine = suite::scalar_to_g1(&dkg_result.share_secret);
    let share_public_key = suite::compress_g1(&share_public_key_affine);

    let network = EthNetwork::from_fork_version(init.fork_version);
    let deposit_message =
        deposit::DepositMessage::new(validator_public_key, init.withdrawal_credentials);
    let deposit_root = deposit::deposit_signing_root(&deposit_message, network);

    let deposit_partial_signature = self_checked_signature(
        request_id,
        metrics,
        &dkg_result.share_secret,
        &share_public_key_affine,
        &deposit_root,
    )?;

    let owner_nonce_digest = keccak::owner_nonce_digest(&init.owner, init.nonce);
    let owner_nonce_partial_signature = self_checked_signature(
        request_id,
        metrics,
        &dkg_result.share_secret,
        &share_public_key_affine,
        &owner_nonce_digest,
    )?;

    let encrypted_share = seal_share(rsa_private_key, &dkg_result.share_secret)?;

    Ok(Output {
        request_id: *request_id,
        operator_id: own_operator_id,
        operator_rsa_public_key_der: init
            .operators
            .iter()
            .find(|op| op.id == own_operator_id)
            .map(|op| op.rsa_public_key_der.clone())
            .unwrap_or_default(),
        encrypted_share,
        share_public_key: share_public_key.to_vec(),
        validator_public_key: validator_public_key.to_vec(),
        deposit_partial_signature,
        owner_nonce_partial_signature,
    })
}

fn self_checked_signature(
    request_id: &RequestId,
    metrics: &CeremonyMetrics,
    share_secret: &bls12_381::Scalar,
    share_public: &bls12_381::G1Affine,
    msg: &[u8],
) -> Result<Vec<u8>, CeremonyError> {
    let sig = bls_sign::sign(share_secret, msg);
    if !bls_sign::verify(share_public, msg, &sig) {
        metrics.inc_signature_self_check_failures();
        LogEvent::new(EventType::SignatureSelfCheckFailed)
            .with_request_id(request_id.to_hex())
            .emit();
        return Err(CeremonyError::CryptoFatal(
            "partial signature failed its own self-verification".into(),
        ));
    }
    Ok(suite::compress_g2(&sig).to_vec())
}

/// RSA-PKCS1v15-encrypts the hex-encoded share scalar under this operator's
/// own public key and decrypts it straight back, so a mismatch is caught
/// before the share is ever handed off for storage. The hex encoding (not
/// the raw 32 bytes) is what downstream tooling expects to recover on
/// decrypt.
fn seal_share(
    rsa_private_key: &RsaPrivateKey,
    share_secret: &bls12_381::Scalar,
) -> Result<Vec<u8>, CeremonyError> {
    use rsa::RsaPublicKey;
    let rsa_public_key = RsaPublicKey::from(rsa_private_key);
    let plaintext = hex::encode(share_secret.to_bytes()).into_bytes();
    let ciphertext = rsa_auth::encrypt(&rsa_public_key, &mut OsRng, &plaintext)?;
    let recovered = rsa_auth::decrypt(rsa_private_key, &ciphertext)?;
    if recovered != plaintext {
        return Err(CeremonyError::CryptoFatal(
            "rsa share encryption did not round-trip".into(),
        ));
    }
    Ok(ciphertext)
}
