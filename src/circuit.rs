use curve25519_dalek::Scalar;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scalar::from_i64;

pub type Id = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Operand {
    Var(Id),
    Public(Id),
    Const(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Gate {
    // y = v
    Bind(Id, Operand),
    // y = a + b
    Add(Id, Operand, Operand),
    // y = a * b
    Mul(Id, Operand, Operand),
}

impl Gate {
    fn output(&self) -> Id {
        match *self {
            Gate::Bind(y, _) | Gate::Add(y, _, _) | Gate::Mul(y, _, _) => y,
        }
    }

    fn operands(&self) -> [Option<Operand>; 2] {
        match *self {
            Gate::Bind(_, v) => [Some(v), None],
            Gate::Add(_, a, b) | Gate::Mul(_, a, b) => [Some(a), Some(b)],
        }
    }
}

pub fn num_vars(gates: &[Gate]) -> usize {
    let mut max_id = None;
    for gate in gates {
        max_id = max_id.max(Some(gate.output()));
        for operand in gate.operands().into_iter().flatten() {
            if let Operand::Var(id) = operand {
                max_id = max_id.max(Some(id));
            }
        }
    }
    max_id.map_or(0, |id| id + 1)
}

pub fn num_publics(gates: &[Gate]) -> usize {
    let mut max_id = None;
    for gate in gates {
        for operand in gate.operands().into_iter().flatten() {
            if let Operand::Public(id) = operand {
                max_id = max_id.max(Some(id));
            }
        }
    }
    max_id.map_or(0, |id| id + 1)
}

fn operand_value(operand: Operand, vars: &[Option<Scalar>], publics: &[Scalar]) -> Result<Scalar> {
    match operand {
        Operand::Var(id) => vars
            .get(id)
            .copied()
            .flatten()
            .ok_or_else(|| Error::Synthesis(format!("variable v{id} used before assignment"))),
        Operand::Public(id) => publics
            .get(id)
            .copied()
            .ok_or_else(|| Error::Synthesis(format!("public input i{id} out of range"))),
        Operand::Const(c) => Ok(from_i64(c)),
    }
}

/// Walks the gates in order, deriving each output variable from its
/// operands. Free witnesses (variables no gate derives, such as bit
/// choices) are supplied through `seeds`. A gate whose output is already
/// assigned acts as an equality constraint on the existing value.
pub fn solve(gates: &[Gate], publics: &[Scalar], seeds: &[(Id, Scalar)]) -> Result<Vec<Scalar>> {
    let mut vars: Vec<Option<Scalar>> = vec![None; num_vars(gates)];
    for &(id, value) in seeds {
        match vars.get_mut(id) {
            Some(slot) => *slot = Some(value),
            None => {
                return Err(Error::Synthesis(format!(
                    "seed for v{id} does not appear in any gate"
                )))
            }
        }
    }
    for gate in gates {
        let value = match *gate {
            Gate::Bind(_, v) => operand_value(v, &vars, publics)?,
            Gate::Add(_, a, b) => {
                operand_value(a, &vars, publics)? + operand_value(b, &vars, publics)?
            }
            Gate::Mul(_, a, b) => {
                operand_value(a, &vars, publics)? * operand_value(b, &vars, publics)?
            }
        };
        let y = gate.output();
        match vars[y] {
            None => vars[y] = Some(value),
            Some(existing) if existing == value => {}
            Some(_) => {
                return Err(Error::InvalidStatement(format!(
                    "conflicting assignments for v{y}"
                )))
            }
        }
    }
    // variables referenced by no gate are unconstrained, zero works
    Ok(vars.into_iter().map(|v| v.unwrap_or(Scalar::ZERO)).collect())
}

pub fn check_sat(gates: &[Gate], vars: &[Scalar], publics: &[Scalar]) -> bool {
    let value = |operand: Operand| match operand {
        Operand::Var(id) => vars.get(id).copied(),
        Operand::Public(id) => publics.get(id).copied(),
        Operand::Const(c) => Some(from_i64(c)),
    };
    gates.iter().all(|gate| {
        let lhs = vars.get(gate.output()).copied();
        let rhs = match *gate {
            Gate::Bind(_, v) => value(v),
            Gate::Add(_, a, b) => value(a).zip(value(b)).map(|(a, b)| a + b),
            Gate::Mul(_, a, b) => value(a).zip(value(b)).map(|(a, b)| a * b),
        };
        lhs.is_some() && lhs == rhs
    })
}
