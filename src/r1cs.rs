use curve25519_dalek::Scalar;
use libspartan::Instance;

use crate::circuit::{self, Gate, Operand};
use crate::error::{Error, Result};
use crate::scalar::from_i64;

pub struct R1cs {
    pub num_cons: usize,
    pub num_vars: usize,
    pub num_inputs: usize,
    pub num_non_zero_entries: usize,
    pub instance: Instance,
}

/// Lowers a gate list into the backend's sparse A/B/C form. Column layout
/// follows libspartan: variables first, then the constant one, then the
/// public inputs.
pub fn into_r1cs(gates: &[Gate], num_inputs: usize) -> Result<R1cs> {
    if gates.is_empty() {
        return Err(Error::Synthesis("cannot build an empty instance".into()));
    }
    if circuit::num_publics(gates) > num_inputs {
        return Err(Error::Synthesis(format!(
            "gates reference public input i{} but only {num_inputs} were given",
            circuit::num_publics(gates) - 1
        )));
    }
    // the backend expects strictly more variable columns than inputs
    let num_vars = circuit::num_vars(gates).max(num_inputs + 1);

    let mut a: Vec<(usize, usize, [u8; 32])> = Vec::new();
    let mut b: Vec<(usize, usize, [u8; 32])> = Vec::new();
    let mut c: Vec<(usize, usize, [u8; 32])> = Vec::new();

    let one = Scalar::ONE.to_bytes();
    let entry = |row: usize, operand: Operand| match operand {
        Operand::Const(value) => (row, num_vars, from_i64(value).to_bytes()),
        Operand::Var(id) => (row, id, one),
        Operand::Public(id) => (row, num_vars + 1 + id, one),
    };

    for (i, gate) in gates.iter().enumerate() {
        match *gate {
            Gate::Bind(y, v) => {
                a.push(entry(i, v));
                b.push((i, num_vars, one));
                c.push((i, y, one));
            }
            Gate::Mul(y, x1, x2) => {
                a.push(entry(i, x1));
                b.push(entry(i, x2));
                c.push((i, y, one));
            }
            Gate::Add(y, x1, x2) => {
                a.push(entry(i, x1));
                a.push(entry(i, x2));
                b.push((i, num_vars, one));
                c.push((i, y, one));
            }
        }
    }

    let num_cons = gates.len();
    let num_non_zero_entries = a.len().max(b.len()).max(c.len());
    let instance = Instance::new(num_cons, num_vars, num_inputs, &a, &b, &c)
        .map_err(|e| Error::Synthesis(format!("instance rejected by backend: {e:?}")))?;

    Ok(R1cs {
        num_cons,
        num_vars,
        num_inputs,
        num_non_zero_entries,
        instance,
    })
}
