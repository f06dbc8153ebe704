//! Model assembly.

use tracing::{debug, info};

use super::constraints::{FormulationContext, REGISTRY};
use super::model::Model;
use super::objective::build_objective;
use super::variables::VariableSpace;
use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::Problem;
use crate::packing::PositionGrid;
use crate::selection::{select, Activation, ConstraintFamily, ConstraintSelection};

/// A built model together with the structures needed to read its solution.
#[derive(Debug, Clone)]
pub struct AssembledModel {
    /// The flat model for the solver.
    pub model: Model,
    /// Keyed access to the model's variables.
    pub space: VariableSpace,
    /// Candidate positions the loading variables were built over.
    pub grid: PositionGrid,
    /// Which families were requested.
    pub selection: ConstraintSelection,
    /// Constraints added per enabled family, in canonical order.
    pub report: Vec<(ConstraintFamily, usize)>,
}

/// Builds a 3L-CVRP model from a problem instance.
///
/// Positions are enumerated and both variable families declared first; the
/// objective follows, then every enabled constraint family in canonical order.
/// Disabled families are skipped, so partial models stay consistent.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::distance::{LinkTable, FORBIDDEN_COST};
/// use u_3lcvrp::formulation::ModelBuilder;
/// use u_3lcvrp::models::{BoxType, CargoSpace, Demand, Problem, ProblemData, Vehicle};
/// use u_3lcvrp::selection::{Activation, ConstraintFamily};
///
/// let nodes = vec![1, 2, 3];
/// let problem = Problem::new(ProblemData {
///     links: LinkTable::new()
///         .with_symmetric(1, 2, 10.0)
///         .with_symmetric(1, 3, 30.0)
///         .with_symmetric(2, 3, 15.0)
///         .with_forbidden_self_links(&nodes, FORBIDDEN_COST),
///     nodes,
///     vehicles: vec![Vehicle::new(0)],
///     cargo: CargoSpace::new(2, 1, 1),
///     boxes: vec![BoxType::new("box1", 1, 1, 1)],
///     demand: Demand::new().with("box1", 2, 1),
/// })
/// .unwrap();
///
/// let built = ModelBuilder::new(&problem)
///     .with_activation(Activation::from(2..=5))
///     .build()
///     .unwrap();
///
/// assert_eq!(built.model.constraints_of(ConstraintFamily::VisitOnce).count(), 2);
/// assert_eq!(built.model.constraints_of(ConstraintFamily::Capacity).count(), 0);
/// ```
pub struct ModelBuilder<'a> {
    problem: &'a Problem,
    config: ModelConfig,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            config: ModelConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets which constraint slots are active.
    pub fn with_activation(mut self, activation: impl Into<Activation>) -> Self {
        self.config.activation = activation.into();
        self
    }

    /// Assembles the model.
    pub fn build(&self) -> Result<AssembledModel> {
        let problem = self.problem;
        let selection = select(&self.config.activation);
        let grid = PositionGrid::enumerate(problem.cargo(), problem.boxes(), &problem.box_totals());

        let mut model = Model::new(self.config.name.clone());
        let space = VariableSpace::build(problem, &grid, &mut model);
        debug!(
            routing = space.num_routing(),
            loading = space.num_loading(),
            "declared variables"
        );

        build_objective(problem, &space, &mut model)?;

        let ctx = FormulationContext {
            problem,
            grid: &grid,
            space: &space,
        };
        let mut report = Vec::new();
        for (family, builder) in REGISTRY {
            if !selection.is_enabled(family) {
                continue;
            }
            let added = builder(&ctx, &mut model)?;
            debug!(family = family.name(), constraints = added, "built constraint family");
            report.push((family, added));
        }

        info!(
            model = model.name(),
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            families = report.len(),
            "assembled model"
        );

        Ok(AssembledModel {
            model,
            space,
            grid,
            selection,
            report,
        })
    }
}
