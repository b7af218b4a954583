//! Zero-knowledge proofs over byte inputs.
//!
//! A statement is lowered through expressions into flat gates, the gates
//! into a rank-1 constraint system, and proving is delegated to the
//! Spartan SNARK over the ristretto255 scalar field. The byte-array API
//! proves knowledge of an input whose folded digest matches the public
//! value, and ships the result as a self-contained envelope that the C
//! and WASM bindings move across language boundaries.

pub mod batch;
pub mod circuit;
pub mod compiler;
pub mod digest;
pub mod error;
pub mod ffi;
pub mod proof;
pub mod protocol;
pub mod r1cs;
pub mod scalar;
pub mod wasm;

pub use error::{Error, Result};
pub use proof::{create_proof, verify_bytes, verify_proof, Proof};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::BatchVerifier;
    pub use crate::compiler::{eq, Expression, ExprStatement};
    pub use crate::digest::ByteDigest;
    pub use crate::protocol::{ProofSystem, Statement};
    pub use curve25519_dalek::Scalar;
}
