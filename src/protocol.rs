/// Proving flow, shared-parameter style:
///
/// 1. setup
///     Statement -> gates -> R1CS
///     R1CS -> gens
///     R1CS, gens -> commitment, decommitment
///
/// 2. prover
///     Statement -> witness, publics
///     R1CS, commitment, decommitment, witness, publics -> proof
///
/// 3. verifier
///     commitment, gens, publics, proof -> accept / reject
use std::rc::Rc;

use curve25519_dalek::Scalar;
use libspartan::{Assignment, ComputationCommitment, ComputationDecommitment, SNARKGens, SNARK};
use merlin::Transcript;
use tracing::{debug, info};

use crate::circuit::Gate;
use crate::error::{Error, Result};
use crate::r1cs::{into_r1cs, R1cs};

const TRANSCRIPT_LABEL: &[u8] = b"zk-proof SNARK";

/// A provable statement: the gates it compiles to, the public assignment,
/// and a full witness satisfying the gates.
pub trait Statement {
    fn gates(&self) -> Result<Vec<Gate>>;
    fn public_inputs(&self) -> Result<Vec<Scalar>>;
    fn witness(&self, gates: &[Gate]) -> Result<Vec<Scalar>>;
}

pub struct ProofSystem {
    gates: Vec<Gate>,
    r1cs: Rc<R1cs>,
    gens: Rc<SNARKGens>,
    commitment: Rc<ComputationCommitment>,
    decommitment: Rc<ComputationDecommitment>,
}

impl ProofSystem {
    pub fn setup<S: Statement>(statement: &S) -> Result<Self> {
        let gates = statement.gates()?;
        let num_inputs = statement.public_inputs()?.len();
        Self::from_gates(gates, num_inputs)
    }

    /// Derives the full parameter set from a gate list alone. The verifier
    /// side uses this to rebuild parameters without knowing any witness.
    pub fn from_gates(gates: Vec<Gate>, num_inputs: usize) -> Result<Self> {
        let r1cs = into_r1cs(&gates, num_inputs)?;
        let gens = SNARKGens::new(
            r1cs.num_cons,
            r1cs.num_vars,
            r1cs.num_inputs,
            r1cs.num_non_zero_entries,
        );
        let (commitment, decommitment) = SNARK::encode(&r1cs.instance, &gens);
        info!(
            num_cons = r1cs.num_cons,
            num_vars = r1cs.num_vars,
            num_inputs = r1cs.num_inputs,
            "proof system parameters ready"
        );
        Ok(Self {
            gates,
            r1cs: Rc::new(r1cs),
            gens: Rc::new(gens),
            commitment: Rc::new(commitment),
            decommitment: Rc::new(decommitment),
        })
    }

    pub fn num_constraints(&self) -> usize {
        self.r1cs.num_cons
    }

    pub fn prove<S: Statement>(&self, statement: &S) -> Result<SNARK> {
        let publics = statement.public_inputs()?;
        if publics.len() != self.r1cs.num_inputs {
            return Err(Error::Synthesis(format!(
                "statement supplies {} public inputs, parameters expect {}",
                publics.len(),
                self.r1cs.num_inputs
            )));
        }
        let mut vars = statement.witness(&self.gates)?;
        // padding columns introduced by the instance are unconstrained
        vars.resize(self.r1cs.num_vars, Scalar::ZERO);
        debug!(witness_len = vars.len(), "witness solved");

        let vars = to_assignment(&vars)?;
        let inputs = to_assignment(&publics)?;
        let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
        Ok(SNARK::prove(
            &self.r1cs.instance,
            &self.commitment,
            &self.decommitment,
            vars,
            &inputs,
            &self.gens,
            &mut transcript,
        ))
    }

    pub fn verify(&self, proof: &SNARK, publics: &[Scalar]) -> Result<()> {
        let inputs = to_assignment(publics)?;
        let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
        proof
            .verify(&self.commitment, &inputs, &mut transcript, &self.gens)
            .map_err(|e| Error::Verification(format!("{e:?}")))
    }
}

fn to_assignment(scalars: &[Scalar]) -> Result<Assignment> {
    Assignment::new(&scalars.iter().map(Scalar::to_bytes).collect::<Vec<_>>())
        .map_err(|e| Error::Synthesis(format!("assignment rejected by backend: {e:?}")))
}
