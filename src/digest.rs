//! The statement behind the byte-array API: knowledge of an input whose
//! folded digest matches the public value.
//!
//! Every input byte is split into eight bit witnesses, each bit pinned by
//! b * b = b, and the byte rebuilt from its bits. A running accumulator
//! folds the bytes in Horner form and the final accumulator is bound to
//! the single public input.

use curve25519_dalek::Scalar;

use crate::circuit::{solve, Gate, Id};
use crate::compiler::{eq, flatten, Expression};
use crate::error::Result;
use crate::protocol::Statement;

/// Horner base for the digest accumulator. Must exceed any byte value so
/// short inputs pack injectively.
pub const DIGEST_BASE: i64 = 257;

pub struct ByteDigest {
    bytes: Vec<u8>,
}

// ids are laid out as: 8 bits per byte, then one accumulator per byte,
// then flattening temporaries
fn bit_id(i: usize, j: usize) -> Id {
    8 * i + j
}

fn acc_id(len: usize, i: usize) -> Id {
    8 * len + i
}

impl ByteDigest {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// acc_i = acc_{i-1} * BASE + byte_i over the scalar field.
    pub fn digest(&self) -> Scalar {
        let base = Scalar::from(DIGEST_BASE as u64);
        self.bytes
            .iter()
            .fold(Scalar::ZERO, |acc, &b| acc * base + Scalar::from(u64::from(b)))
    }

    /// The canonical gate list for an input of `len` bytes. Identical on
    /// the proving and verifying sides, which is what lets a verifier
    /// rebuild parameters from the length alone.
    pub fn shape(len: usize) -> Vec<Gate> {
        let mut gates = Vec::new();
        if len == 0 {
            // a single accumulator pinned to zero and exposed as the digest
            let (next, flat) = flatten(eq(Expression::Var(0), Expression::Const(0)), 1);
            gates.extend(flat);
            let (_, flat) = flatten(eq(Expression::Var(0), Expression::Public(0)), next);
            gates.extend(flat);
            return gates;
        }

        let mut next = 9 * len;
        for i in 0..len {
            // b * b = b keeps every bit in {0, 1}
            for j in 0..8 {
                let b = Expression::Var(bit_id(i, j));
                let (after, flat) =
                    flatten(eq(b.clone(), Expression::Product(vec![b.clone(), b])), next);
                next = after;
                gates.extend(flat);
            }

            // byte_i = sum of bit_j * 2^j
            let byte = Expression::Sum(
                (0..8)
                    .map(|j| {
                        Expression::Product(vec![
                            Expression::Var(bit_id(i, j)),
                            Expression::Const(1 << j),
                        ])
                    })
                    .collect(),
            );
            let folded = if i == 0 {
                byte
            } else {
                Expression::Sum(vec![
                    Expression::Product(vec![
                        Expression::Var(acc_id(len, i - 1)),
                        Expression::Const(DIGEST_BASE),
                    ]),
                    byte,
                ])
            };
            let (after, flat) = flatten(eq(Expression::Var(acc_id(len, i)), folded), next);
            next = after;
            gates.extend(flat);
        }

        let (_, flat) = flatten(
            eq(
                Expression::Var(acc_id(len, len - 1)),
                Expression::Public(0),
            ),
            next,
        );
        gates.extend(flat);
        gates
    }

    fn bit_seeds(&self) -> Vec<(Id, Scalar)> {
        let mut seeds = Vec::with_capacity(self.bytes.len() * 8);
        for (i, &byte) in self.bytes.iter().enumerate() {
            for j in 0..8 {
                seeds.push((bit_id(i, j), Scalar::from(u64::from((byte >> j) & 1))));
            }
        }
        seeds
    }
}

impl Statement for ByteDigest {
    fn gates(&self) -> Result<Vec<Gate>> {
        Ok(Self::shape(self.bytes.len()))
    }

    fn public_inputs(&self) -> Result<Vec<Scalar>> {
        Ok(vec![self.digest()])
    }

    fn witness(&self, gates: &[Gate]) -> Result<Vec<Scalar>> {
        solve(gates, &[self.digest()], &self.bit_seeds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::check_sat;
    use crate::error::Error;
    use crate::r1cs::into_r1cs;
    use libspartan::{InputsAssignment, VarsAssignment};

    #[test]
    fn test_digest_value() {
        assert_eq!(ByteDigest::new([]).digest(), Scalar::ZERO);
        assert_eq!(ByteDigest::new([5]).digest(), Scalar::from(5u64));
        // 1 * 257 + 2
        assert_eq!(ByteDigest::new([1, 2]).digest(), Scalar::from(259u64));
    }

    #[test]
    fn test_shape_is_deterministic() {
        assert_eq!(ByteDigest::shape(3), ByteDigest::shape(3));
        assert_ne!(ByteDigest::shape(2), ByteDigest::shape(3));
    }

    #[test]
    fn test_witness_satisfies_gates() {
        let statement = ByteDigest::new([0u8, 1, 127, 128, 255]);
        let gates = statement.gates().unwrap();
        let publics = statement.public_inputs().unwrap();
        let vars = statement.witness(&gates).unwrap();
        assert!(check_sat(&gates, &vars, &publics));
    }

    #[test]
    fn test_witness_satisfies_instance() {
        let statement = ByteDigest::new([1u8, 2, 3]);
        let gates = statement.gates().unwrap();
        let r1cs = into_r1cs(&gates, 1).unwrap();
        let mut vars = statement.witness(&gates).unwrap();
        vars.resize(r1cs.num_vars, Scalar::ZERO);
        let vars = VarsAssignment::new(
            &vars.iter().map(Scalar::to_bytes).collect::<Vec<_>>(),
        )
        .unwrap();
        let inputs =
            InputsAssignment::new(&[statement.digest().to_bytes()]).unwrap();
        assert_eq!(r1cs.instance.is_sat(&vars, &inputs), Ok(true));
    }

    #[test]
    fn test_empty_input() {
        let statement = ByteDigest::new([]);
        let gates = statement.gates().unwrap();
        let vars = statement.witness(&gates).unwrap();
        assert!(check_sat(&gates, &vars, &[Scalar::ZERO]));
    }

    #[test]
    fn test_wrong_digest_is_unsatisfiable() {
        let statement = ByteDigest::new([9u8, 9]);
        let gates = statement.gates().unwrap();
        let wrong = Scalar::from(1u64);
        assert!(matches!(
            solve(&gates, &[wrong], &statement.bit_seeds()),
            Err(Error::InvalidStatement(_))
        ));
    }
}
