//! Keccak-256, used only to bind a key share to the staking registry's
//! owner address and nonce.

use sha3::{Digest, Keccak256};

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let out = hasher.finalize();
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&out);
    buf
}

/// `keccak256("0x<owner-hex>:<nonce>")`, matching the registry's own
/// ownership-proof digest.
pub fn owner_nonce_digest(owner: &[u8; 20], nonce: u64) -> [u8; 32] {
    let msg = format!("0x{}:{}", hex::encode(owner), nonce);
    keccak256(msg.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_nonce_digest_is_deterministic() {
        let owner = [0x11u8; 20];
        assert_eq!(
            owner_nonce_digest(&owner, 4),
            owner_nonce_digest(&owner, 4)
        );
        assert_ne!(
            owner_nonce_digest(&owner, 4),
            owner_nonce_digest(&owner, 5)
        );
    }
}
