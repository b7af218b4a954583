use curve25519_dalek::Scalar;

pub fn from_i64(x: i64) -> Scalar {
    let x_abs = x.unsigned_abs();
    if x < 0 {
        -Scalar::from(x_abs)
    } else {
        Scalar::from(x_abs)
    }
}

pub fn from_bytes(bytes: [u8; 32]) -> Option<Scalar> {
    Scalar::from_canonical_bytes(bytes).into()
}
