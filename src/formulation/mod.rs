//! MILP formulation of the 3L-CVRP.
//!
//! - [`VariableSpace`] — routing `d[i,j,v,t]` and loading `a[x,y,z,i,k,v,t]` binaries
//! - [`build_objective`] — total travel cost, minimized
//! - [`constraints`] — one builder per constraint family, in a static [`REGISTRY`]
//! - [`ModelBuilder`] — orchestrates the above under a constraint selection
//!
//! The output is a flat [`Model`] for any [`Solver`](crate::solver::Solver).

mod assembly;
pub mod constraints;
mod expr;
mod model;
mod objective;
mod variables;

pub use assembly::{AssembledModel, ModelBuilder};
pub use constraints::{ConstraintBuilder, FormulationContext, REGISTRY};
pub use expr::{Comparison, LinearConstraint, LinearExpr, Objective, Sense, Term, VarId};
pub use model::{Model, Variable};
pub use objective::build_objective;
pub use variables::{LoadingKey, RoutingKey, VariableKey, VariableSpace};
