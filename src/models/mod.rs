//! Domain model types for the 3L-CVRP.
//!
//! Problem input (nodes, link costs, fleet, cargo space, box catalog and
//! demand) and decoded output (per-vehicle routes and a loading plan).

mod cargo;
mod demand;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use cargo::{Axis, BoxType, CargoSpace, Position};
pub use demand::Demand;
pub use problem::{Problem, ProblemData};
pub use route::{Leg, Route};
pub use solution::{LoadingPlan, PlacedBox, Solution, Violation, ViolationType, Visualization};
pub use vehicle::Vehicle;
