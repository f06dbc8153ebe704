//! Routing and loading decision-variable families.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::expr::VarId;
use super::model::Model;
use crate::error::{Error, Result};
use crate::models::{Position, Problem};
use crate::packing::PositionGrid;

/// Key of routing variable `d[from, to, vehicle, stage]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoutingKey {
    /// Origin node.
    pub from: usize,
    /// Destination node.
    pub to: usize,
    /// Vehicle id.
    pub vehicle: usize,
    /// Stage, `1..=|N|`.
    pub stage: usize,
}

impl RoutingKey {
    /// Creates a routing key.
    pub fn new(from: usize, to: usize, vehicle: usize, stage: usize) -> Self {
        Self {
            from,
            to,
            vehicle,
            stage,
        }
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d[{},{},{},{}]", self.from, self.to, self.vehicle, self.stage)
    }
}

/// Key of loading variable `a[x, y, z, box, customer, vehicle, stage]`.
///
/// `box_index` is the box type's position in the problem catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LoadingKey {
    /// Lower corner.
    pub position: Position,
    /// Catalog index of the box type.
    pub box_index: usize,
    /// Customer the box is for.
    pub customer: usize,
    /// Vehicle id.
    pub vehicle: usize,
    /// Stage, `1..|N|`.
    pub stage: usize,
}

impl fmt::Display for LoadingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a[{},{},{},#{},{},{},{}]",
            self.position.x,
            self.position.y,
            self.position.z,
            self.box_index,
            self.customer,
            self.vehicle,
            self.stage
        )
    }
}

/// Key of any model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariableKey {
    /// A `d[i,j,v,t]` variable.
    Routing(RoutingKey),
    /// An `a[x,y,z,i,k,v,t]` variable.
    Loading(LoadingKey),
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKey::Routing(k) => k.fmt(f),
            VariableKey::Loading(k) => k.fmt(f),
        }
    }
}

/// The two binary variable families, addressable by full key.
///
/// Routing variables span nodes × nodes × vehicles × stages `1..=|N|`.
/// Loading variables span the axis-wide position grid (not filtered per
/// type) × box types × customers × vehicles × stages `1..|N|`. Lookups
/// outside these domains fail with [`Error::MissingVariableDomain`].
#[derive(Debug, Clone, Default)]
pub struct VariableSpace {
    routing: HashMap<RoutingKey, VarId>,
    loading: HashMap<LoadingKey, VarId>,
}

impl VariableSpace {
    /// Declares every variable of both families in `model`.
    pub fn build(problem: &Problem, grid: &PositionGrid, model: &mut Model) -> Self {
        let mut space = Self::default();
        let stages = problem.num_stages();

        for &from in problem.nodes() {
            for &to in problem.nodes() {
                for vehicle in problem.vehicles() {
                    for stage in 1..=stages {
                        let key = RoutingKey::new(from, to, vehicle.id(), stage);
                        let id = model.add_binary(VariableKey::Routing(key));
                        space.routing.insert(key, id);
                    }
                }
            }
        }

        let anchors: Vec<Position> = grid.anchors().collect();
        for position in anchors {
            for (box_index, b) in problem.boxes().iter().enumerate() {
                for &customer in problem.customers() {
                    for vehicle in problem.vehicles() {
                        for stage in 1..stages {
                            let key = LoadingKey {
                                position,
                                box_index,
                                customer,
                                vehicle: vehicle.id(),
                                stage,
                            };
                            let name = format!(
                                "a[{},{},{},{},{},{},{}]",
                                position.x,
                                position.y,
                                position.z,
                                b.id(),
                                customer,
                                vehicle.id(),
                                stage
                            );
                            let id = model.add_named_binary(VariableKey::Loading(key), name);
                            space.loading.insert(key, id);
                        }
                    }
                }
            }
        }

        space
    }

    /// Routing variable `d[from, to, vehicle, stage]`.
    pub fn routing(&self, from: usize, to: usize, vehicle: usize, stage: usize) -> Result<VarId> {
        let key = RoutingKey::new(from, to, vehicle, stage);
        self.routing
            .get(&key)
            .copied()
            .ok_or_else(|| Error::MissingVariableDomain {
                key: key.to_string(),
            })
    }

    /// Loading variable for `box_index` at `position`.
    pub fn loading(
        &self,
        position: Position,
        box_index: usize,
        customer: usize,
        vehicle: usize,
        stage: usize,
    ) -> Result<VarId> {
        let key = LoadingKey {
            position,
            box_index,
            customer,
            vehicle,
            stage,
        };
        self.loading
            .get(&key)
            .copied()
            .ok_or_else(|| Error::MissingVariableDomain {
                key: key.to_string(),
            })
    }

    /// Number of routing variables.
    pub fn num_routing(&self) -> usize {
        self.routing.len()
    }

    /// Number of loading variables.
    pub fn num_loading(&self) -> usize {
        self.loading.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{LinkTable, FORBIDDEN_COST};
    use crate::models::{BoxType, CargoSpace, Demand, ProblemData, Vehicle};

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
            cargo: CargoSpace::new(2, 1, 1),
            boxes: vec![BoxType::new("box1", 1, 1, 1)],
            demand: Demand::new().with("box1", 2, 1).with("box1", 3, 1),
        })
        .expect("valid problem")
    }

    fn build() -> (Problem, Model, VariableSpace) {
        let p = problem();
        let grid = PositionGrid::enumerate(p.cargo(), p.boxes(), &p.box_totals());
        let mut model = Model::new("test");
        let space = VariableSpace::build(&p, &grid, &mut model);
        (p, model, space)
    }

    #[test]
    fn test_domain_sizes() {
        let (_, model, space) = build();
        // 3 × 3 nodes × 2 vehicles × 3 stages
        assert_eq!(space.num_routing(), 54);
        // x ∈ {0, 1} × 1 box × 2 customers × 2 vehicles × 2 stages
        assert_eq!(space.num_loading(), 16);
        assert_eq!(model.num_variables(), 70);
    }

    #[test]
    fn test_routing_lookup() {
        let (_, model, space) = build();
        let id = space.routing(1, 2, 1, 3).expect("in domain");
        assert_eq!(model.variable(id).name, "d[1,2,1,3]");
    }

    #[test]
    fn test_stage_zero_missing() {
        let (_, _, space) = build();
        assert!(matches!(
            space.routing(1, 2, 0, 0),
            Err(Error::MissingVariableDomain { .. })
        ));
        assert!(space.routing(1, 2, 0, 4).is_err());
        assert!(space.routing(1, 9, 0, 1).is_err());
    }

    #[test]
    fn test_loading_domain_excludes_final_stage_and_depot() {
        let (_, model, space) = build();
        let id = space
            .loading(Position::new(1, 0, 0), 0, 3, 0, 2)
            .expect("in domain");
        assert_eq!(model.variable(id).name, "a[1,0,0,box1,3,0,2]");
        assert!(space.loading(Position::new(0, 0, 0), 0, 3, 0, 3).is_err());
        assert!(space.loading(Position::new(0, 0, 0), 0, 1, 0, 1).is_err());
        assert!(space.loading(Position::new(2, 0, 0), 0, 2, 0, 1).is_err());
    }
}
