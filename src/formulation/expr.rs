//! Linear expressions and constraints.

use std::fmt;

use serde::Serialize;

use crate::selection::ConstraintFamily;

/// Index of a variable in its [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position in the model's variable list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// `coefficient × variable`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Term {
    /// The variable.
    pub var: VarId,
    /// Its non-zero coefficient.
    pub coefficient: f64,
}

/// A sum of terms. Constants live on the constraint's right-hand side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    terms: Vec<Term>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coefficient × var`. Zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push(Term { var, coefficient });
        }
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns `true` if the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `values` (indexed by [`VarId`]).
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient * values[t.var.0])
            .sum()
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    /// `==`
    Eq,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl Comparison {
    /// Returns `true` if `lhs <relation> rhs` holds within `tol`.
    pub fn holds(self, lhs: f64, rhs: f64, tol: f64) -> bool {
        match self {
            Comparison::Eq => (lhs - rhs).abs() <= tol,
            Comparison::Le => lhs <= rhs + tol,
            Comparison::Ge => lhs >= rhs - tol,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Eq => "==",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
        })
    }
}

/// A named linear relation `expr <comparison> rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearConstraint {
    /// Human-readable name, e.g. `visit_once[k=2]`.
    pub name: String,
    /// Family that emitted the row.
    pub family: ConstraintFamily,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation between the sides.
    pub comparison: Comparison,
    /// Constant right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Returns `true` if the constraint holds under `values`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        self.comparison
            .holds(self.expr.evaluate(values), self.rhs, tol)
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    /// Smaller is better.
    Minimize,
    /// Larger is better.
    Maximize,
}

/// Linear objective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objective {
    /// Direction.
    pub sense: Sense,
    /// Objective function.
    pub expr: LinearExpr,
}

impl Default for Objective {
    fn default() -> Self {
        Self {
            sense: Sense::Minimize,
            expr: LinearExpr::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_coefficient_dropped() {
        let mut e = LinearExpr::new();
        e.add_term(VarId(0), 0.0);
        assert!(e.is_empty());
        e.add_term(VarId(1), 2.0);
        assert_eq!(e.terms().len(), 1);
    }

    #[test]
    fn test_evaluate() {
        let mut e = LinearExpr::new();
        e.add_term(VarId(0), 3.0);
        e.add_term(VarId(2), -1.0);
        assert!((e.evaluate(&[1.0, 5.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_comparison_holds() {
        assert!(Comparison::Eq.holds(1.0, 1.0 + 1e-9, 1e-6));
        assert!(Comparison::Le.holds(0.0, 1.0, 0.0));
        assert!(!Comparison::Le.holds(2.0, 1.0, 1e-6));
        assert!(Comparison::Ge.holds(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_constraint() {
        let c = LinearConstraint {
            name: "empty".into(),
            family: ConstraintFamily::DemandSatisfaction,
            expr: LinearExpr::new(),
            comparison: Comparison::Eq,
            rhs: 2.0,
        };
        assert!(!c.is_satisfied(&[], 1e-6));
    }
}
