//! Crate error type.
//!
//! Every fallible operation returns [`Result<T>`]. Solver statuses other than
//! optimal are carried through [`Error::Infeasible`], [`Error::TimeLimitReached`]
//! and [`Error::Solver`] unchanged; the crate never retries a solve.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural defects in problem input data.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// The node list is empty (there is no depot).
    EmptyNodeSet,
    /// A node id appears more than once.
    DuplicateNode(usize),
    /// The vehicle roster is empty.
    EmptyFleet,
    /// A vehicle id appears more than once.
    DuplicateVehicle(usize),
    /// No link exists for an ordered node pair.
    MissingLink {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
    },
    /// A link references a node outside the node list.
    UnknownLinkNode {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
    },
    /// A link cost is negative or not finite.
    InvalidCost {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
        /// Offending cost.
        cost: f64,
    },
    /// A cargo or box dimension is zero.
    NonPositiveDimension(String),
    /// A box type id appears more than once in the catalog.
    DuplicateBoxType(String),
    /// Demand references a box type missing from the catalog.
    UnknownBoxType(String),
    /// Demand references a node that is not a customer.
    UnknownCustomer {
        /// Box type of the demand entry.
        box_type: String,
        /// Referenced node.
        node: usize,
    },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::EmptyNodeSet => write!(f, "node set is empty"),
            ProblemError::DuplicateNode(id) => write!(f, "duplicate node id {id}"),
            ProblemError::EmptyFleet => write!(f, "vehicle roster is empty"),
            ProblemError::DuplicateVehicle(id) => write!(f, "duplicate vehicle id {id}"),
            ProblemError::MissingLink { from, to } => {
                write!(f, "missing link ({from}, {to})")
            }
            ProblemError::UnknownLinkNode { from, to } => {
                write!(f, "link ({from}, {to}) references an unknown node")
            }
            ProblemError::InvalidCost { from, to, cost } => {
                write!(f, "link ({from}, {to}) has invalid cost {cost}")
            }
            ProblemError::NonPositiveDimension(what) => {
                write!(f, "dimension of {what} must be positive")
            }
            ProblemError::DuplicateBoxType(id) => write!(f, "duplicate box type '{id}'"),
            ProblemError::UnknownBoxType(id) => {
                write!(f, "demand references unknown box type '{id}'")
            }
            ProblemError::UnknownCustomer { box_type, node } => {
                write!(f, "demand for '{box_type}' references non-customer node {node}")
            }
        }
    }
}

/// Errors raised while building or reading a model.
#[derive(Debug)]
pub enum Error {
    /// The constraint activation input is neither a range nor a list.
    InvalidConstraintSelector(String),
    /// A builder asked for a variable key outside the declared domain.
    MissingVariableDomain {
        /// Display form of the requested key.
        key: String,
    },
    /// Problem data failed validation.
    InvalidProblem(ProblemError),
    /// The solver proved the model infeasible.
    Infeasible,
    /// The solver hit its time limit without an incumbent.
    TimeLimitReached,
    /// The solver failed.
    Solver(String),
    /// JSON input could not be parsed.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConstraintSelector(input) => write!(
                f,
                "invalid constraint selector '{input}': provide a range or a list"
            ),
            Error::MissingVariableDomain { key } => {
                write!(f, "variable {key} is outside the declared domain")
            }
            Error::InvalidProblem(e) => write!(f, "invalid problem: {e}"),
            Error::Infeasible => write!(f, "model is infeasible"),
            Error::TimeLimitReached => write!(f, "time limit reached without a solution"),
            Error::Solver(msg) => write!(f, "solver error: {msg}"),
            Error::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProblemError> for Error {
    fn from(e: ProblemError) -> Self {
        Error::InvalidProblem(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_link() {
        let e = Error::from(ProblemError::MissingLink { from: 1, to: 3 });
        assert_eq!(e.to_string(), "invalid problem: missing link (1, 3)");
    }

    #[test]
    fn test_display_missing_variable() {
        let e = Error::MissingVariableDomain {
            key: "d[1,2,0,0]".into(),
        };
        assert!(e.to_string().contains("d[1,2,0,0]"));
    }

    #[test]
    fn test_json_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let e = Error::from(parse);
        assert!(std::error::Error::source(&e).is_some());
    }
}
