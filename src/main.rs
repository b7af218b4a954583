use tracing_subscriber::EnvFilter;
use zk_proof::prelude::*;
use zk_proof::{create_proof, verify_bytes};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // byte-array path, the same flow the C bindings drive
    let input = [1u8, 2, 3, 4, 5];
    let proof = create_proof(&input).unwrap();
    let bytes = proof.to_bytes().unwrap();
    println!("proof created, size: {} bytes", bytes.len());

    match verify_bytes(&bytes) {
        Ok(()) => println!("proof verified"),
        Err(err) => println!("proof rejected: {err}"),
    }

    // custom statement path: v0 = i0 * i1, v0 = i2
    let statement = ExprStatement::new(
        vec![
            eq(
                Expression::Var(0),
                Expression::Product(vec![Expression::Public(0), Expression::Public(1)]),
            ),
            eq(Expression::Var(0), Expression::Public(2)),
        ],
        vec![Scalar::from(6u64), Scalar::from(7u64), Scalar::from(42u64)],
    );
    let system = ProofSystem::setup(&statement).unwrap();
    let snark = system.prove(&statement).unwrap();
    let publics = statement.public_inputs().unwrap();
    match system.verify(&snark, &publics) {
        Ok(()) => println!("custom statement verified"),
        Err(err) => println!("custom statement rejected: {err}"),
    }
}
