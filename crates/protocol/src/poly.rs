use bls12_381::{G1Affine, G1Projective, Scalar};
use dkg_crypto::suite::scalar_to_g1;
use ff::Field;
use group::{Curve, Group};
use rand_core::{CryptoRng, RngCore};

/// A degree-`(threshold - 1)` secret polynomial, constant term first.
pub struct PrivatePoly(Vec<Scalar>);

/// The evaluation point used for share index `i`: `i + 1`, so `x = 0` stays
/// reserved for the polynomial's secret (the constant term).
fn eval_point(index: u32) -> Scalar {
    Scalar::from(index as u64 + 1)
}

impl PrivatePoly {
    pub fn random(threshold: usize, rng: &mut (impl RngCore + CryptoRng)) -> Self {
        Self((0..threshold).map(|_| Scalar::random(&mut *rng)).collect())
    }

    pub fn secret(&self) -> Scalar {
        self.0[0]
    }

    pub fn eval(&self, index: u32) -> Scalar {
        let x = eval_point(index);
        self.0
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, coeff| acc * x + coeff)
    }

    pub fn commit(&self) -> Vec<G1Affine> {
        self.0.iter().map(scalar_to_g1).collect()
    }
}

/// Evaluates a public commitment vector at `index` and checks it matches
/// `share * G1` — the Feldman VSS verification equation.
pub fn verify_share_against_commitments(index: u32, share: &Scalar, commitments: &[G1Affine]) -> bool {
    let x = eval_point(index);
    let mut acc = G1Projective::identity();
    let mut x_pow = Scalar::ONE;
    for c in commitments {
        acc += G1Projective::from(*c) * x_pow;
        x_pow *= x;
    }
    scalar_to_g1(share) == acc.to_affine()
}

/// Element-wise sum of qualified dealers' commitment vectors, i.e. the
/// aggregate public polynomial. The constant term (`sum_commitments[0]`) is
/// the validator's BLS public key.
pub fn sum_commitment_vectors(vectors: &[Vec<G1Affine>]) -> Vec<G1Affine> {
    let len = vectors.first().map(|v| v.len()).unwrap_or(0);
    (0..len)
        .map(|i| {
            let sum = vectors
                .iter()
                .fold(G1Projective::identity(), |acc, v| acc + v[i]);
            sum.to_affine()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn share_verifies_against_its_own_commitments() {
        let poly = PrivatePoly::random(3, &mut OsRng);
        let commitments = poly.commit();
        for idx in 0..5u32 {
            let share = poly.eval(idx);
            assert!(verify_share_against_commitments(idx, &share, &commitments));
        }
    }

    #[test]
    fn tampered_share_fails_verification() {
        let poly = PrivatePoly::random(3, &mut OsRng);
        let commitments = poly.commit();
        let share = poly.eval(0) + Scalar::ONE;
        assert!(!verify_share_against_commitments(0, &share, &commitments));
    }

    #[test]
    fn sum_of_commitments_constant_term_matches_sum_of_secrets() {
        let p1 = PrivatePoly::random(2, &mut OsRng);
        let p2 = PrivatePoly::random(2, &mut OsRng);
        let summed = sum_commitment_vectors(&[p1.commit(), p2.commit()]);
        let expected = scalar_to_g1(&(p1.secret() + p2.secret()));
        assert_eq!(summed[0], expected);
    }
}
