//! C-compatible bindings.
//!
//! Both entry points are stateless: `zk_proof_create` derives parameters,
//! proves, and serializes the envelope; `zk_proof_verify` rebuilds the
//! parameters from the envelope and checks the proof.

use std::slice;

use tracing::warn;

use crate::error::Error;
use crate::proof::{create_proof, verify_bytes};

/// C-compatible status codes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Success
    Success = 0,
    /// Invalid parameter
    InvalidParameter = 1,
    /// Verification failed
    VerificationFailed = 2,
    /// Output buffer too small, required size reported through output_len
    BufferTooSmall = 3,
    /// Unknown error
    Unknown = 99,
}

/// Create a proof over `input_len` bytes of `input`, writing the encoded
/// envelope into `output`. On entry `*output_len` holds the buffer
/// capacity; on success it is updated to the number of bytes written. If
/// the buffer is too small, the required size is stored there instead.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers. `input`
/// must be valid for `input_len` bytes and `output` for `*output_len`.
#[no_mangle]
pub unsafe extern "C" fn zk_proof_create(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: *mut usize,
) -> i32 {
    if input.is_null() || output.is_null() || output_len.is_null() {
        return -1;
    }
    let input = slice::from_raw_parts(input, input_len);
    let capacity = *output_len;
    let buf = slice::from_raw_parts_mut(output, capacity);

    let written = create_proof(input).and_then(|proof| proof.write_into(buf));
    match written {
        Ok(written) => {
            *output_len = written;
            ErrorCode::Success as i32
        }
        Err(Error::BufferTooSmall { needed, .. }) => {
            *output_len = needed;
            ErrorCode::BufferTooSmall as i32
        }
        Err(err) => {
            warn!(%err, "proof creation failed");
            ErrorCode::Unknown as i32
        }
    }
}

/// Verify an encoded proof envelope.
///
/// # Safety
///
/// This function is unsafe because it dereferences raw pointers. `proof`
/// must be valid for `proof_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn zk_proof_verify(proof: *const u8, proof_len: usize) -> i32 {
    if proof.is_null() {
        return -1;
    }
    let bytes = slice::from_raw_parts(proof, proof_len);
    match verify_bytes(bytes) {
        Ok(()) => ErrorCode::Success as i32,
        Err(err) => {
            warn!(%err, "proof rejected");
            ErrorCode::VerificationFailed as i32
        }
    }
}
