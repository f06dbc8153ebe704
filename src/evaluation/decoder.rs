//! Reads solver values back into routes and a loading plan.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::formulation::{AssembledModel, VariableKey};
use crate::models::{Axis, Leg, LoadingPlan, PlacedBox, Problem, Route, Solution};
use crate::solver::SolveOutcome;

/// Values above this are read as 1.
const ACTIVE: f64 = 0.5;

/// Decodes variable values of an assembled model into a [`Solution`].
///
/// Every vehicle gets a route, possibly empty. A loading variable becomes a
/// placement only if its position is admissible for its box type; other
/// loading variables carry no meaning and are ignored.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::distance::{LinkTable, FORBIDDEN_COST};
/// use u_3lcvrp::evaluation::SolutionDecoder;
/// use u_3lcvrp::formulation::ModelBuilder;
/// use u_3lcvrp::models::{BoxType, CargoSpace, Demand, Problem, ProblemData, Vehicle};
///
/// let nodes = vec![1, 2];
/// let problem = Problem::new(ProblemData {
///     links: LinkTable::new()
///         .with_symmetric(1, 2, 5.0)
///         .with_forbidden_self_links(&nodes, FORBIDDEN_COST),
///     nodes,
///     vehicles: vec![Vehicle::new(0)],
///     cargo: CargoSpace::new(1, 1, 1),
///     boxes: vec![BoxType::new("b", 1, 1, 1)],
///     demand: Demand::new(),
/// })
/// .unwrap();
/// let built = ModelBuilder::new(&problem).with_activation(Vec::<usize>::new()).build().unwrap();
///
/// let values = vec![0.0; built.model.num_variables()];
/// let solution = SolutionDecoder::new(&problem, &built).decode(&values, 0.0).unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert!(solution.routes()[0].is_empty());
/// ```
pub struct SolutionDecoder<'a> {
    problem: &'a Problem,
    assembled: &'a AssembledModel,
}

impl<'a> SolutionDecoder<'a> {
    /// Creates a decoder for a model built from `problem`.
    pub fn new(problem: &'a Problem, assembled: &'a AssembledModel) -> Self {
        Self { problem, assembled }
    }

    /// Decodes one value per model variable.
    pub fn decode(&self, values: &[f64], objective: f64) -> Result<Solution> {
        let model = &self.assembled.model;
        if values.len() != model.num_variables() {
            return Err(Error::Solver(format!(
                "expected {} values, got {}",
                model.num_variables(),
                values.len()
            )));
        }

        let mut routes: BTreeMap<usize, Route> = self
            .problem
            .vehicles()
            .iter()
            .map(|v| (v.id(), Route::new(v.id())))
            .collect();
        let mut plan = LoadingPlan::new();
        let mut ignored = 0usize;

        for (var, &value) in model.variables().iter().zip(values) {
            if value <= ACTIVE {
                continue;
            }
            match var.key {
                VariableKey::Routing(k) => {
                    if let Some(route) = routes.get_mut(&k.vehicle) {
                        route.push_leg(Leg {
                            stage: k.stage,
                            from: k.from,
                            to: k.to,
                        });
                    }
                }
                VariableKey::Loading(k) => {
                    if !self.assembled.grid.is_admissible(k.box_index, k.position) {
                        ignored += 1;
                        continue;
                    }
                    let b = &self.problem.boxes()[k.box_index];
                    plan.push(
                        k.vehicle,
                        PlacedBox {
                            box_type: b.id().to_string(),
                            customer: k.customer,
                            stage: k.stage,
                            position: k.position,
                            extents: [b.extent(Axis::X), b.extent(Axis::Y), b.extent(Axis::Z)],
                        },
                    );
                }
            }
        }
        if ignored > 0 {
            debug!(ignored, "skipped loading values at non-admissible positions");
        }

        let links = self.problem.links();
        let mut solution = Solution::new();
        for (_, mut route) in routes {
            let cost: f64 = route
                .legs()
                .iter()
                .filter_map(|l| links.get(l.from, l.to))
                .sum();
            route.set_total_cost(cost);
            solution.add_route(route);
        }
        solution.set_loading(plan);
        solution.set_total_cost(objective);
        Ok(solution)
    }

    /// Decodes a solver outcome, surfacing its failure status as an error.
    pub fn decode_outcome(&self, outcome: SolveOutcome) -> Result<Solution> {
        let (values, objective) = outcome.into_values()?;
        self.decode(&values, objective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{LinkTable, FORBIDDEN_COST};
    use crate::formulation::{LoadingKey, ModelBuilder};
    use crate::models::{BoxType, CargoSpace, Demand, Position, ProblemData, Vehicle};

    fn problem() -> Problem {
        let nodes = vec![1, 2, 3];
        Problem::new(ProblemData {
            links: LinkTable::new()
                .with_symmetric(1, 2, 10.0)
                .with_symmetric(1, 3, 30.0)
                .with_symmetric(2, 3, 15.0)
                .with_forbidden_self_links(&nodes, FORBIDDEN_COST),
            nodes,
            vehicles: vec![Vehicle::new(0), Vehicle::new(1)],
            cargo: CargoSpace::new(3, 1, 1),
            boxes: vec![BoxType::new("u", 1, 1, 1), BoxType::new("l", 2, 1, 1)],
            demand: Demand::new().with("u", 2, 1).with("l", 3, 1),
        })
        .expect("valid")
    }

    fn set(values: &mut [f64], built: &AssembledModel, id: crate::formulation::VarId) {
        assert!(id.index() < built.model.num_variables());
        values[id.index()] = 1.0;
    }

    #[test]
    fn test_decode_route() {
        let p = problem();
        let built = ModelBuilder::new(&p).build().expect("builds");
        let mut values = vec![0.0; built.model.num_variables()];
        for (from, to, stage) in [(1, 2, 1), (2, 3, 2), (3, 1, 3)] {
            let id = built.space.routing(from, to, 0, stage).expect("declared");
            set(&mut values, &built, id);
        }

        let sol = SolutionDecoder::new(&p, &built)
            .decode(&values, 55.0)
            .expect("decodes");
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].nodes(), vec![1, 2, 3, 1]);
        assert!((sol.routes()[0].total_cost() - 55.0).abs() < 1e-9);
        assert!(sol.routes()[1].is_empty());
        assert_eq!(sol.total_cost(), 55.0);
    }

    #[test]
    fn test_decode_skips_non_admissible() {
        let p = problem();
        let built = ModelBuilder::new(&p).build().expect("builds");
        let mut values = vec![0.0; built.model.num_variables()];
        let key = LoadingKey {
            position: Position::new(0, 0, 0),
            box_index: 0,
            customer: 2,
            vehicle: 0,
            stage: 1,
        };
        let ok = built
            .space
            .loading(key.position, key.box_index, key.customer, key.vehicle, key.stage)
            .expect("declared");
        set(&mut values, &built, ok);

        // The long box cannot start at x = 2 in a length-3 cargo.
        if let Ok(bad) = built.space.loading(Position::new(2, 0, 0), 1, 3, 0, 1) {
            assert!(!built.grid.is_admissible(1, Position::new(2, 0, 0)));
            set(&mut values, &built, bad);
        }

        let sol = SolutionDecoder::new(&p, &built)
            .decode(&values, 0.0)
            .expect("decodes");
        assert_eq!(sol.loading().len(), 1);
        assert_eq!(sol.loading().vehicle(0)[0].box_type, "u");
        assert_eq!(sol.loading().vehicle(0)[0].extents, [1, 1, 1]);
    }

    #[test]
    fn test_value_count_mismatch() {
        let p = problem();
        let built = ModelBuilder::new(&p).build().expect("builds");
        let err = SolutionDecoder::new(&p, &built)
            .decode(&[1.0], 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::Solver(_)));
    }

    #[test]
    fn test_decode_infeasible_outcome() {
        let p = problem();
        let built = ModelBuilder::new(&p).build().expect("builds");
        let err = SolutionDecoder::new(&p, &built)
            .decode_outcome(SolveOutcome::infeasible())
            .unwrap_err();
        assert!(matches!(err, Error::Infeasible));
    }
}
