//! WebAssembly bindings.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM wrapper for proof creation
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn create_proof(input: &[u8]) -> Result<Vec<u8>, JsError> {
    let proof = crate::proof::create_proof(input)?;
    Ok(proof.to_bytes()?)
}

/// WASM wrapper for proof verification
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn verify_proof(proof: &[u8]) -> bool {
    crate::proof::verify_bytes(proof).is_ok()
}
