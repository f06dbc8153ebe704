//! Pure-Rust branch-and-bound backend through `good_lp`.

use std::time::Instant;

use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable as LpVariable,
};
use tracing::{debug, info, warn};

use super::{SolveOutcome, Solver, TOLERANCE};
use crate::formulation::{Comparison, LinearExpr, Model, Sense};

/// Solves models with the `microlp` solver bundled in `good_lp`.
///
/// Every model variable becomes a binary column. Rows without terms are
/// checked directly: a violated one makes the model infeasible before the
/// backend is called, a satisfied one is dropped.
///
/// `microlp` has no time limit, so this adapter never reports
/// [`SolveStatus::TimeLimitReached`](super::SolveStatus::TimeLimitReached).
///
/// # Examples
///
/// ```
/// use u_3lcvrp::formulation::{Comparison, LinearExpr, Model};
/// use u_3lcvrp::formulation::VariableKey;
/// use u_3lcvrp::formulation::RoutingKey;
/// use u_3lcvrp::selection::ConstraintFamily;
/// use u_3lcvrp::solver::{MicroLpSolver, SolveStatus, Solver};
///
/// let mut model = Model::new("tiny");
/// let a = model.add_binary(VariableKey::Routing(RoutingKey::new(1, 2, 0, 1)));
/// let b = model.add_binary(VariableKey::Routing(RoutingKey::new(1, 3, 0, 1)));
///
/// let mut cost = LinearExpr::new();
/// cost.add_term(a, 4.0);
/// cost.add_term(b, 1.0);
/// model.set_minimize(cost);
///
/// let mut pick_one = LinearExpr::new();
/// pick_one.add_term(a, 1.0);
/// pick_one.add_term(b, 1.0);
/// model.add_constraint("pick", ConstraintFamily::VisitOnce, pick_one, Comparison::Eq, 1.0);
///
/// let outcome = MicroLpSolver::new().solve(&model);
/// assert_eq!(outcome.status, SolveStatus::Optimal);
/// assert_eq!(outcome.values, Some(vec![0.0, 1.0]));
/// assert_eq!(outcome.objective, Some(1.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, columns: &[LpVariable]) -> Expression {
    expr.terms()
        .iter()
        .map(|t| t.coefficient * columns[t.var.index()])
        .sum()
}

impl Solver for MicroLpSolver {
    fn solve(&self, model: &Model) -> SolveOutcome {
        let start = Instant::now();

        let mut rows = Vec::with_capacity(model.num_constraints());
        for c in model.constraints() {
            if !c.expr.is_empty() {
                rows.push(c);
            } else if !c.comparison.holds(0.0, c.rhs, TOLERANCE) {
                debug!(constraint = %c.name, "empty row cannot hold");
                info!(model = model.name(), status = "infeasible", "solve finished");
                return SolveOutcome::infeasible();
            }
        }

        let mut vars = ProblemVariables::new();
        let columns: Vec<LpVariable> = model
            .variables()
            .iter()
            .map(|v| vars.add(variable().binary().name(v.name.clone())))
            .collect();

        let objective = to_expression(&model.objective().expr, &columns);
        let unsolved = match model.objective().sense {
            Sense::Minimize => vars.minimise(objective),
            Sense::Maximize => vars.maximise(objective),
        };
        let mut problem = unsolved.using(good_lp::microlp);
        for c in &rows {
            let lhs = to_expression(&c.expr, &columns);
            let row = match c.comparison {
                Comparison::Eq => constraint::eq(lhs, c.rhs),
                Comparison::Le => constraint::leq(lhs, c.rhs),
                Comparison::Ge => constraint::geq(lhs, c.rhs),
            };
            problem = problem.with(row);
        }

        let outcome = match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = columns
                    .iter()
                    .map(|&col| solution.value(col).round().clamp(0.0, 1.0))
                    .collect();
                let objective = model.objective().expr.evaluate(&values);
                SolveOutcome::optimal(values, objective)
            }
            Err(ResolutionError::Infeasible) => SolveOutcome::infeasible(),
            Err(e) => {
                warn!(error = %e, "solver failed");
                SolveOutcome::error(e.to_string())
            }
        };

        info!(
            model = model.name(),
            variables = columns.len(),
            rows = rows.len(),
            status = %outcome.status,
            objective = outcome.objective,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "solve finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::{RoutingKey, VariableKey};
    use crate::selection::ConstraintFamily;
    use crate::solver::SolveStatus;

    fn key(to: usize) -> VariableKey {
        VariableKey::Routing(RoutingKey::new(1, to, 0, 1))
    }

    #[test]
    fn test_infeasible_rows() {
        let mut model = Model::new("infeasible");
        let a = model.add_binary(key(2));
        let mut e = LinearExpr::new();
        e.add_term(a, 1.0);
        model.add_constraint("ge2", ConstraintFamily::Capacity, e, Comparison::Ge, 2.0);
        let outcome = MicroLpSolver::new().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_empty_row_violated() {
        let mut model = Model::new("empty-row");
        model.add_binary(key(2));
        model.add_constraint(
            "needs_one",
            ConstraintFamily::DemandSatisfaction,
            LinearExpr::new(),
            Comparison::Eq,
            1.0,
        );
        let outcome = MicroLpSolver::new().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_empty_row_satisfied_is_dropped() {
        let mut model = Model::new("empty-row");
        model.add_binary(key(2));
        model.add_constraint(
            "zero",
            ConstraintFamily::DemandSatisfaction,
            LinearExpr::new(),
            Comparison::Eq,
            0.0,
        );
        let outcome = MicroLpSolver::new().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Optimal);
    }

    #[test]
    fn test_values_satisfy_model() {
        let mut model = Model::new("cover");
        let ids: Vec<_> = (2..6).map(|t| model.add_binary(key(t))).collect();
        let mut cost = LinearExpr::new();
        for (i, &id) in ids.iter().enumerate() {
            cost.add_term(id, (i + 1) as f64);
        }
        model.set_minimize(cost);
        let mut at_least_two = LinearExpr::new();
        for &id in &ids {
            at_least_two.add_term(id, 1.0);
        }
        model.add_constraint(
            "two",
            ConstraintFamily::VisitOnce,
            at_least_two,
            Comparison::Ge,
            2.0,
        );

        let outcome = MicroLpSolver::new().solve(&model);
        let values = outcome.values.clone().unwrap();
        assert!(model.violated(&values, TOLERANCE).is_empty());
        assert_eq!(outcome.objective, Some(3.0));
    }
}
