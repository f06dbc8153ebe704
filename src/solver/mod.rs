//! Solver interface.
//!
//! A [`Solver`] receives a flat [`Model`] and returns a [`SolveOutcome`]. The
//! crate formulates models only; solving is delegated to an adapter such as
//! [`MicroLpSolver`] (feature `microlp`).

#[cfg(feature = "microlp")]
mod microlp;

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::formulation::Model;

#[cfg(feature = "microlp")]
pub use microlp::MicroLpSolver;

/// Tolerance used when reading binary values and checking rows.
pub const TOLERANCE: f64 = 1e-6;

/// Termination status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// No assignment satisfies every constraint.
    Infeasible,
    /// Stopped at the time limit, possibly with an incumbent.
    TimeLimitReached,
    /// The backend failed.
    Error,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::TimeLimitReached => write!(f, "time_limit_reached"),
            SolveStatus::Error => write!(f, "error"),
        }
    }
}

/// What a solver returns.
///
/// `values` holds one entry per model variable, indexed by
/// [`VarId`](crate::formulation::VarId), when the status is optimal or the
/// time limit was hit with an incumbent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveOutcome {
    /// Termination status.
    pub status: SolveStatus,
    /// One value per model variable.
    pub values: Option<Vec<f64>>,
    /// Objective value of `values`.
    pub objective: Option<f64>,
    /// Backend message on failure.
    pub message: Option<String>,
}

impl SolveOutcome {
    /// An optimal outcome.
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values: Some(values),
            objective: Some(objective),
            message: None,
        }
    }

    /// An infeasible outcome.
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            values: None,
            objective: None,
            message: None,
        }
    }

    /// A time-limited outcome, with the incumbent if one was found.
    pub fn time_limit(incumbent: Option<(Vec<f64>, f64)>) -> Self {
        let (values, objective) = match incumbent {
            Some((values, objective)) => (Some(values), Some(objective)),
            None => (None, None),
        };
        Self {
            status: SolveStatus::TimeLimitReached,
            values,
            objective,
            message: None,
        }
    }

    /// A failed solve.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SolveStatus::Error,
            values: None,
            objective: None,
            message: Some(message.into()),
        }
    }

    /// Returns the variable values and objective, or the status as an error.
    pub fn into_values(self) -> Result<(Vec<f64>, f64)> {
        match (self.status, self.values, self.objective) {
            (SolveStatus::Optimal | SolveStatus::TimeLimitReached, Some(v), Some(obj)) => {
                Ok((v, obj))
            }
            (SolveStatus::Infeasible, _, _) => Err(Error::Infeasible),
            (SolveStatus::TimeLimitReached, _, _) => Err(Error::TimeLimitReached),
            (SolveStatus::Optimal, _, _) => {
                Err(Error::Solver("optimal status without values".into()))
            }
            (SolveStatus::Error, _, _) => Err(Error::Solver(
                self.message.unwrap_or_else(|| "unknown failure".into()),
            )),
        }
    }
}

/// Solves a formulated model.
pub trait Solver {
    /// Solves `model`.
    fn solve(&self, model: &Model) -> SolveOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_values() {
        let (v, obj) = SolveOutcome::optimal(vec![1.0, 0.0], 3.0)
            .into_values()
            .unwrap();
        assert_eq!(v, vec![1.0, 0.0]);
        assert_eq!(obj, 3.0);
    }

    #[test]
    fn test_infeasible_surfaces() {
        assert!(matches!(
            SolveOutcome::infeasible().into_values(),
            Err(Error::Infeasible)
        ));
    }

    #[test]
    fn test_time_limit() {
        assert!(matches!(
            SolveOutcome::time_limit(None).into_values(),
            Err(Error::TimeLimitReached)
        ));
        let (v, _) = SolveOutcome::time_limit(Some((vec![1.0], 2.0)))
            .into_values()
            .unwrap();
        assert_eq!(v, vec![1.0]);
    }

    #[test]
    fn test_error_message_verbatim() {
        match SolveOutcome::error("backend exploded").into_values() {
            Err(Error::Solver(msg)) => assert_eq!(msg, "backend exploded"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::TimeLimitReached.to_string(), "time_limit_reached");
    }
}
