//! Flat model handed to a solver.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::expr::{Comparison, LinearConstraint, LinearExpr, Objective, Sense, VarId};
use super::variables::VariableKey;
use crate::selection::ConstraintFamily;

/// A binary decision variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// Structured key.
    pub key: VariableKey,
    /// Display name handed to the solver.
    pub name: String,
}

/// Binary variables, linear constraints, and one objective.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::formulation::{Comparison, LinearExpr, Model, RoutingKey, VariableKey};
/// use u_3lcvrp::selection::ConstraintFamily;
///
/// let mut model = Model::new("toy");
/// let d = model.add_binary(VariableKey::Routing(RoutingKey::new(1, 2, 0, 1)));
/// let mut expr = LinearExpr::new();
/// expr.add_term(d, 1.0);
/// model.add_constraint("pick", ConstraintFamily::VisitOnce, expr, Comparison::Eq, 1.0);
///
/// assert_eq!(model.num_variables(), 1);
/// assert_eq!(model.num_constraints(), 1);
/// assert_eq!(model.variable(d).name, "d[1,2,0,1]");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: Objective,
}

impl Model {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::default(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a binary variable named after its key and returns its id.
    pub fn add_binary(&mut self, key: VariableKey) -> VarId {
        let name = key.to_string();
        self.add_named_binary(key, name)
    }

    /// Declares a binary variable with an explicit display name.
    pub fn add_named_binary(&mut self, key: VariableKey, name: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            key,
            name: name.into(),
        });
        id
    }

    /// Appends a named constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        family: ConstraintFamily,
        expr: LinearExpr,
        comparison: Comparison,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            family,
            expr,
            comparison,
            rhs,
        });
    }

    /// Replaces the objective with `minimize expr`.
    pub fn set_minimize(&mut self, expr: LinearExpr) {
        self.objective = Objective {
            sense: Sense::Minimize,
            expr,
        };
    }

    /// All variables, indexed by [`VarId`].
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The variable with id `id`.
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    /// All constraints in build order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints belonging to `family`.
    pub fn constraints_of(&self, family: ConstraintFamily) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.family == family)
    }

    /// Constraint count per family.
    pub fn family_counts(&self) -> BTreeMap<ConstraintFamily, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.constraints {
            *counts.entry(c.family).or_insert(0) += 1;
        }
        counts
    }

    /// Names of the constraints violated by `values`.
    pub fn violated(&self, values: &[f64], tol: f64) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied(values, tol))
            .map(|c| c.name.as_str())
            .collect()
    }
}

impl fmt::Display for Model {
    /// Writes the model in a readable LP-like form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_expr = |f: &mut fmt::Formatter<'_>, expr: &LinearExpr| -> fmt::Result {
            if expr.is_empty() {
                return write!(f, "0");
            }
            for (i, t) in expr.terms().iter().enumerate() {
                let sign = if t.coefficient < 0.0 { "-" } else if i > 0 { "+" } else { "" };
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{sign}{} {}", t.coefficient.abs(), self.variables[t.var.0].name)?;
            }
            Ok(())
        };

        writeln!(f, "\\ model {}", self.name)?;
        match self.objective.sense {
            Sense::Minimize => writeln!(f, "minimize")?,
            Sense::Maximize => writeln!(f, "maximize")?,
        }
        write!(f, "  obj: ")?;
        write_expr(f, &self.objective.expr)?;
        writeln!(f)?;
        writeln!(f, "subject to")?;
        for c in &self.constraints {
            write!(f, "  {}: ", c.name)?;
            write_expr(f, &c.expr)?;
            writeln!(f, " {} {}", c.comparison, c.rhs)?;
        }
        writeln!(f, "binary")?;
        for v in &self.variables {
            writeln!(f, "  {}", v.name)?;
        }
        write!(f, "end")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::RoutingKey;

    fn toy() -> (Model, VarId, VarId) {
        let mut m = Model::new("toy");
        let a = m.add_binary(VariableKey::Routing(RoutingKey::new(1, 2, 0, 1)));
        let b = m.add_binary(VariableKey::Routing(RoutingKey::new(2, 1, 0, 2)));
        let mut e = LinearExpr::new();
        e.add_term(a, 1.0);
        e.add_term(b, -1.0);
        m.add_constraint("balance", ConstraintFamily::StageContinuity, e, Comparison::Eq, 0.0);
        (m, a, b)
    }

    #[test]
    fn test_violated() {
        let (m, _, _) = toy();
        assert!(m.violated(&[1.0, 1.0], 1e-6).is_empty());
        assert_eq!(m.violated(&[1.0, 0.0], 1e-6), vec!["balance"]);
    }

    #[test]
    fn test_family_counts() {
        let (m, _, _) = toy();
        let counts = m.family_counts();
        assert_eq!(counts.get(&ConstraintFamily::StageContinuity), Some(&1));
        assert_eq!(m.constraints_of(ConstraintFamily::VisitOnce).count(), 0);
    }

    #[test]
    fn test_display() {
        let (mut m, a, _) = toy();
        let mut obj = LinearExpr::new();
        obj.add_term(a, 10.0);
        m.set_minimize(obj);
        let text = m.to_string();
        assert!(text.contains("obj: 10 d[1,2,0,1]"));
        assert!(text.contains("balance: 1 d[1,2,0,1] -1 d[2,1,0,2] == 0"));
        assert!(text.ends_with("end"));
    }
}
