use crate::error::TypesError;
use crate::operator::Operator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The `Init` message that kicks off a ceremony: the full operator set,
/// validator withdrawal credentials, fork version, owner/nonce the resulting
/// share will be bound to, the initiator's own key, and the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitMessage {
    pub operators: Vec<Operator>,
    pub withdrawal_credentials: [u8; 32],
    pub fork_version: [u8; 4],
    pub owner: [u8; 20],
    pub nonce: u64,
    /// DER-encoded RSA public key of the initiator, used to authenticate
    /// this very message.
    pub initiator_public_key_der: Vec<u8>,
    pub threshold: u64,
}

impl InitMessage {
    /// Minimum threshold for `n` operators: `ceil(2n/3)`.
    pub fn min_threshold(n: usize) -> u64 {
        ((2 * n as u64) + 2) / 3
    }

    /// Maximum threshold for `n` operators: `n - 1`.
    pub fn max_threshold(n: usize) -> u64 {
        n.saturating_sub(1) as u64
    }

    /// Structural validation: distinct, non-zero operator ids and a
    /// threshold within `[ceil(2n/3), n-1]`. Does not touch key material —
    /// that validation belongs to `dkg-crypto`.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.operators.is_empty() {
            return Err(TypesError::EmptyOperatorSet);
        }

        let mut seen = HashSet::with_capacity(self.operators.len());
        for op in &self.operators {
            if op.id.get() == 0 {
                return Err(TypesError::ZeroOperatorId(op.id.get()));
            }
            if !seen.insert(op.id) {
                return Err(TypesError::DuplicateOperatorId(op.id.get()));
            }
        }

        let n = self.operators.len();
        let (lo, hi) = (Self::min_threshold(n), Self::max_threshold(n));
        if self.threshold < lo || self.threshold > hi {
            return Err(TypesError::ThresholdOutOfRange {
                threshold: self.threshold,
                n,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: u64) -> Operator {
        Operator {
            id: crate::operator::OperatorId(id),
            address: format!("127.0.0.1:300{id}"),
            rsa_public_key_der: vec![0u8; 4],
        }
    }

    fn init_with(n: u64, threshold: u64) -> InitMessage {
        InitMessage {
            operators: (1..=n).map(op).collect(),
            withdrawal_credentials: [0u8; 32],
            fork_version: [0u8; 4],
            owner: [0u8; 20],
            nonce: 0,
            initiator_public_key_der: vec![0u8; 4],
            threshold,
        }
    }

    #[test]
    fn accepts_valid_4_of_4_threshold_3() {
        assert!(init_with(4, 3).validate().is_ok());
    }

    #[test]
    fn rejects_threshold_too_low() {
        assert_eq!(
            init_with(4, 2).validate(),
            Err(TypesError::ThresholdOutOfRange {
                threshold: 2,
                n: 4
            })
        );
    }

    #[test]
    fn rejects_threshold_equal_to_n() {
        assert!(init_with(4, 4).validate().is_err());
    }

    #[test]
    fn rejects_duplicate_operator_ids() {
        let mut m = init_with(3, 2);
        m.operators[2].id = m.operators[0].id;
        assert_eq!(
            m.validate(),
            Err(TypesError::DuplicateOperatorId(m.operators[0].id.get()))
        );
    }

    #[test]
    fn rejects_empty_operator_set() {
        let mut m = init_with(1, 1);
        m.operators.clear();
        assert_eq!(m.validate(), Err(TypesError::EmptyOperatorSet));
    }
}
