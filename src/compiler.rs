use curve25519_dalek::Scalar;

use crate::circuit::{solve, Gate, Id, Operand};
use crate::error::{Error, Result};
use crate::protocol::Statement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Var(Id),
    Public(Id),
    Const(i64),
    Eq(Box<Expression>, Box<Expression>),
    Sum(Vec<Expression>),
    Product(Vec<Expression>),
}

pub fn eq(lhs: Expression, rhs: Expression) -> Expression {
    Expression::Eq(Box::new(lhs), Box::new(rhs))
}

/// Lowers an expression into flat gates. Temporaries are allocated from
/// `next_var`; the caller threads the returned counter through successive
/// calls so ids stay unique across a statement.
pub fn flatten(expr: Expression, next_var: Id) -> (Id, Vec<Gate>) {
    let mut gates = Vec::new();
    let mut next = next_var;
    flatten_expr(expr, &mut next, &mut gates);
    (next, gates)
}

fn flatten_expr(expr: Expression, next: &mut Id, gates: &mut Vec<Gate>) -> Operand {
    match expr {
        Expression::Const(value) => Operand::Const(value),
        Expression::Var(id) => Operand::Var(id),
        Expression::Public(id) => Operand::Public(id),

        Expression::Eq(lhs, rhs) => {
            let lhs_val = flatten_expr(*lhs, next, gates);
            let rhs_val = flatten_expr(*rhs, next, gates);
            let lhs_var = match lhs_val {
                Operand::Var(id) => id,
                other => {
                    let tmp = *next;
                    *next += 1;
                    gates.push(Gate::Bind(tmp, other));
                    tmp
                }
            };
            gates.push(Gate::Bind(lhs_var, rhs_val));
            lhs_val
        }

        Expression::Sum(exprs) => {
            let mut sum = None;
            for expr in exprs {
                let val = flatten_expr(expr, next, gates);
                sum = Some(match sum {
                    Some(current) => {
                        let tmp = *next;
                        *next += 1;
                        gates.push(Gate::Add(tmp, current, val));
                        Operand::Var(tmp)
                    }
                    None => val,
                });
            }
            sum.unwrap_or(Operand::Const(0))
        }

        Expression::Product(exprs) => {
            let mut product = None;
            for expr in exprs {
                let val = flatten_expr(expr, next, gates);
                product = Some(match product {
                    Some(current) => {
                        let tmp = *next;
                        *next += 1;
                        gates.push(Gate::Mul(tmp, current, val));
                        Operand::Var(tmp)
                    }
                    None => val,
                });
            }
            product.unwrap_or(Operand::Const(1))
        }
    }
}

pub fn max_var_id(exprs: &[Expression]) -> Id {
    exprs.iter().map(expr_max_var).max().unwrap_or(0)
}

fn expr_max_var(expr: &Expression) -> Id {
    match expr {
        Expression::Var(id) => *id,
        Expression::Eq(a, b) => expr_max_var(a).max(expr_max_var(b)),
        Expression::Sum(inner) | Expression::Product(inner) => {
            inner.iter().map(expr_max_var).max().unwrap_or(0)
        }
        Expression::Public(_) | Expression::Const(_) => 0,
    }
}

pub fn max_public_id(exprs: &[Expression]) -> Id {
    exprs.iter().map(expr_max_public).max().unwrap_or(0)
}

fn expr_max_public(expr: &Expression) -> Id {
    match expr {
        Expression::Public(id) => *id,
        Expression::Eq(a, b) => expr_max_public(a).max(expr_max_public(b)),
        Expression::Sum(inner) | Expression::Product(inner) => {
            inner.iter().map(expr_max_public).max().unwrap_or(0)
        }
        Expression::Var(_) | Expression::Const(_) => 0,
    }
}

/// A statement given directly as equations plus the full public
/// assignment (inputs and expected outputs alike).
#[derive(Debug, Clone)]
pub struct ExprStatement {
    exprs: Vec<Expression>,
    publics: Vec<Scalar>,
}

impl ExprStatement {
    pub fn new(exprs: Vec<Expression>, publics: Vec<Scalar>) -> Self {
        Self { exprs, publics }
    }
}

impl Statement for ExprStatement {
    fn gates(&self) -> Result<Vec<Gate>> {
        let mut next = max_var_id(&self.exprs) + 1;
        let mut gates = Vec::new();
        for expr in &self.exprs {
            let (after, flat) = flatten(expr.clone(), next);
            next = after;
            gates.extend(flat);
        }
        if gates.is_empty() {
            return Err(Error::Synthesis("statement produced no gates".into()));
        }
        Ok(gates)
    }

    fn public_inputs(&self) -> Result<Vec<Scalar>> {
        Ok(self.publics.clone())
    }

    fn witness(&self, gates: &[Gate]) -> Result<Vec<Scalar>> {
        solve(gates, &self.publics, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cons(value: i64) -> Expression {
        Expression::Const(value)
    }

    fn var(id: Id) -> Expression {
        Expression::Var(id)
    }

    fn public(id: Id) -> Expression {
        Expression::Public(id)
    }

    fn sum(exprs: &[Expression]) -> Expression {
        Expression::Sum(exprs.to_vec())
    }

    fn prod(exprs: &[Expression]) -> Expression {
        Expression::Product(exprs.to_vec())
    }

    fn gbind(y: Id, v: Operand) -> Gate {
        Gate::Bind(y, v)
    }

    fn gadd(y: Id, a: Operand, b: Operand) -> Gate {
        Gate::Add(y, a, b)
    }

    fn gmul(y: Id, a: Operand, b: Operand) -> Gate {
        Gate::Mul(y, a, b)
    }

    fn ovar(id: Id) -> Operand {
        Operand::Var(id)
    }

    fn opub(id: Id) -> Operand {
        Operand::Public(id)
    }

    fn ocons(value: i64) -> Operand {
        Operand::Const(value)
    }

    #[test]
    fn test_flatten() {
        // v0 = i0 * 1 + i1 * 2 + 3
        let expr = eq(
            var(0),
            sum(&[
                prod(&[public(0), cons(1)]),
                prod(&[public(1), cons(2)]),
                cons(3),
            ]),
        );
        let (next, gates) = flatten(expr, 10);
        // v10 = i0 * 1
        // v11 = i1 * 2
        // v12 = v10 + v11
        // v13 = v12 + 3
        // v0 = v13
        assert_eq!(next, 14);
        assert_eq!(
            gates,
            vec![
                gmul(10, opub(0), ocons(1)),
                gmul(11, opub(1), ocons(2)),
                gadd(12, ovar(10), ovar(11)),
                gadd(13, ovar(12), ocons(3)),
                gbind(0, ovar(13)),
            ]
        );
    }

    #[test]
    fn test_flatten_non_var_lhs() {
        // 5 = i0 becomes a temporary pinned from both sides
        let (next, gates) = flatten(eq(cons(5), public(0)), 0);
        assert_eq!(next, 1);
        assert_eq!(gates, vec![gbind(0, ocons(5)), gbind(0, opub(0))]);
    }

    #[test]
    fn test_flatten_single_element_chains() {
        let (next, gates) = flatten(eq(var(0), sum(&[public(0)])), 1);
        assert_eq!(next, 1);
        assert_eq!(gates, vec![gbind(0, opub(0))]);

        let (_, gates) = flatten(eq(var(0), prod(&[cons(4)])), 1);
        assert_eq!(gates, vec![gbind(0, ocons(4))]);
    }

    #[test]
    fn test_flatten_empty_chains() {
        let (_, gates) = flatten(eq(var(0), sum(&[])), 1);
        assert_eq!(gates, vec![gbind(0, ocons(0))]);
        let (_, gates) = flatten(eq(var(0), prod(&[])), 1);
        assert_eq!(gates, vec![gbind(0, ocons(1))]);
    }

    #[test]
    fn test_max_ids() {
        let exprs = vec![
            eq(var(3), sum(&[prod(&[public(1), cons(2)]), var(7)])),
            eq(var(0), public(4)),
        ];
        assert_eq!(max_var_id(&exprs), 7);
        assert_eq!(max_public_id(&exprs), 4);
        assert_eq!(max_var_id(&[]), 0);
    }

    #[test]
    fn test_expr_statement_witness() {
        use crate::circuit::check_sat;
        use crate::scalar::from_i64;

        // v0 = i0 * i1
        // v0 = i2
        let statement = ExprStatement::new(
            vec![
                eq(var(0), prod(&[public(0), public(1)])),
                eq(var(0), public(2)),
            ],
            vec![from_i64(6), from_i64(7), from_i64(42)],
        );
        let gates = statement.gates().unwrap();
        let vars = statement.witness(&gates).unwrap();
        assert!(check_sat(&gates, &vars, &statement.public_inputs().unwrap()));

        let bad = ExprStatement::new(
            vec![
                eq(var(0), prod(&[public(0), public(1)])),
                eq(var(0), public(2)),
            ],
            vec![from_i64(6), from_i64(7), from_i64(41)],
        );
        let gates = bad.gates().unwrap();
        assert!(bad.witness(&gates).is_err());
    }

    #[test]
    fn test_empty_statement_rejected() {
        let statement = ExprStatement::new(vec![], vec![]);
        assert!(statement.gates().is_err());
    }
}
