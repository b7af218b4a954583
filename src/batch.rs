//! Batch verification of independent proof envelopes.

use rayon::prelude::*;
use tracing::debug;

use crate::proof::verify_bytes;

pub struct BatchVerifier {
    max_batch_size: usize,
}

impl BatchVerifier {
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: max_batch_size.max(1),
        }
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Verifies every envelope, at most `max_batch_size` in flight at a
    /// time. One bad proof does not affect the outcome of the others.
    pub fn verify_all(&self, proofs: &[Vec<u8>]) -> Vec<bool> {
        let mut outcomes = Vec::with_capacity(proofs.len());
        for chunk in proofs.chunks(self.max_batch_size) {
            outcomes.extend(
                chunk
                    .par_iter()
                    .map(|bytes| verify_bytes(bytes).is_ok())
                    .collect::<Vec<_>>(),
            );
        }
        debug!(
            total = proofs.len(),
            accepted = outcomes.iter().filter(|&&ok| ok).count(),
            "batch verified"
        );
        outcomes
    }
}

impl Default for BatchVerifier {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::create_proof;

    #[test]
    fn test_mixed_batch() {
        let good_a = create_proof(&[1, 2, 3]).unwrap().to_bytes().unwrap();
        let good_b = create_proof(&[]).unwrap().to_bytes().unwrap();
        let bad = good_a[..good_a.len() / 2].to_vec();

        let verifier = BatchVerifier::new(8);
        let outcomes = verifier.verify_all(&[good_a, bad, good_b]);
        assert_eq!(outcomes, vec![true, false, true]);
    }

    #[test]
    fn test_chunked_batch() {
        let proof = create_proof(&[7]).unwrap().to_bytes().unwrap();
        let batch = vec![proof.clone(), proof.clone(), proof];

        let verifier = BatchVerifier::new(1);
        assert_eq!(verifier.verify_all(&batch), vec![true, true, true]);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let verifier = BatchVerifier::new(0);
        assert_eq!(verifier.max_batch_size(), 1);
        assert!(verifier.verify_all(&[]).is_empty());
    }
}
