//! Proof envelope carried across the FFI and WASM boundaries.
//!
//! The envelope is self-contained: it names the input length (which fixes
//! the canonical gate list) and the public digest, so verification needs
//! nothing beyond these bytes.

use std::fs;
use std::path::Path;

use libspartan::SNARK;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digest::ByteDigest;
use crate::error::{Error, Result};
use crate::protocol::ProofSystem;
use crate::scalar;

/// Upper bound on input size for the byte-array API. Keeps a hostile
/// envelope from making the verifier synthesize an enormous instance.
pub const MAX_INPUT_BYTES: usize = 1 << 16;

#[derive(Serialize, Deserialize)]
pub struct Proof {
    input_len: u64,
    digest: [u8; 32],
    snark: SNARK,
}

impl Proof {
    pub fn input_len(&self) -> usize {
        self.input_len as usize
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Encodes into a caller-provided buffer, reporting the required size
    /// when the buffer cannot hold the proof.
    pub fn write_into(&self, buf: &mut [u8]) -> Result<usize> {
        let bytes = self.to_bytes()?;
        if bytes.len() > buf.len() {
            return Err(Error::BufferTooSmall {
                needed: bytes.len(),
                capacity: buf.len(),
            });
        }
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(fs::write(path, self.to_bytes()?)?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(&fs::read(path)?)
    }
}

pub fn create_proof(input: &[u8]) -> Result<Proof> {
    if input.len() > MAX_INPUT_BYTES {
        return Err(Error::Synthesis(format!(
            "input of {} bytes exceeds the {MAX_INPUT_BYTES} byte limit",
            input.len()
        )));
    }
    let statement = ByteDigest::new(input);
    let system = ProofSystem::setup(&statement)?;
    let snark = system.prove(&statement)?;
    debug!(
        input_len = input.len(),
        num_cons = system.num_constraints(),
        "proof created"
    );
    Ok(Proof {
        input_len: input.len() as u64,
        digest: statement.digest().to_bytes(),
        snark,
    })
}

pub fn verify_proof(proof: &Proof) -> Result<()> {
    let input_len = usize::try_from(proof.input_len)
        .ok()
        .filter(|&len| len <= MAX_INPUT_BYTES)
        .ok_or_else(|| Error::Verification("claimed input length out of range".into()))?;
    let digest = scalar::from_bytes(proof.digest)
        .ok_or_else(|| Error::Verification("digest is not a canonical scalar".into()))?;
    let system = ProofSystem::from_gates(ByteDigest::shape(input_len), 1)?;
    // the backend indexes proof components by the instance dimensions; a
    // proof built for a different shape must reject, not unwind
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        system.verify(&proof.snark, &[digest])
    }))
    .unwrap_or_else(|_| Err(Error::Verification("proof does not match the instance shape".into())))
}

pub fn verify_bytes(bytes: &[u8]) -> Result<()> {
    verify_proof(&Proof::from_bytes(bytes)?)
}
