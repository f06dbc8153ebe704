//! # u-3lcvrp
//!
//! MILP formulation of the three-dimensional loading capacitated vehicle
//! routing problem (3L-CVRP): a fleet of identical vehicles leaves a depot,
//! serves every customer once, and carries cuboid boxes that must fit
//! without overlap in each vehicle's cargo space.
//!
//! ## Modules
//!
//! - [`models`] — Problem input (nodes, fleet, cargo, boxes, demand) and decoded solutions
//! - [`distance`] — Link cost table and seeded random costs
//! - [`selection`] — Constraint slot activation and the canonical slot table
//! - [`packing`] — Candidate box positions on the unit grid
//! - [`formulation`] — Variables, objective, constraint families, and model assembly
//! - [`solver`] — Solver interface and the `microlp` adapter
//! - [`evaluation`] — Decoding solver values into routes and a loading plan
//! - [`config`] — Model assembly settings
//!
//! ## Example
//!
//! ```
//! use u_3lcvrp::distance::{LinkTable, FORBIDDEN_COST};
//! use u_3lcvrp::evaluation::SolutionDecoder;
//! use u_3lcvrp::formulation::ModelBuilder;
//! use u_3lcvrp::models::{BoxType, CargoSpace, Demand, Problem, ProblemData, Vehicle};
//! use u_3lcvrp::solver::{MicroLpSolver, Solver};
//!
//! let nodes = vec![1, 2, 3];
//! let problem = Problem::new(ProblemData {
//!     links: LinkTable::new()
//!         .with_symmetric(1, 2, 10.0)
//!         .with_symmetric(1, 3, 30.0)
//!         .with_symmetric(2, 3, 15.0)
//!         .with_forbidden_self_links(&nodes, FORBIDDEN_COST),
//!     nodes,
//!     vehicles: vec![Vehicle::new(0)],
//!     cargo: CargoSpace::new(2, 1, 1),
//!     boxes: vec![BoxType::new("box1", 1, 1, 1)],
//!     demand: Demand::new().with("box1", 2, 1),
//! })
//! .unwrap();
//!
//! let built = ModelBuilder::new(&problem).with_activation(2..=5).build().unwrap();
//! let outcome = MicroLpSolver::new().solve(&built.model);
//! let solution = SolutionDecoder::new(&problem, &built).decode_outcome(outcome).unwrap();
//! assert!((solution.total_cost() - 55.0).abs() < 1e-6);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod formulation;
pub mod models;
pub mod packing;
pub mod selection;
pub mod solver;

pub use error::{Error, Result};
