//! 3L-CVRP problem instance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{BoxType, CargoSpace, Demand, Vehicle};
use crate::distance::LinkTable;
use crate::error::{ProblemError, Result};

/// Raw problem input as it appears in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemData {
    /// Node ids; the first one is the depot.
    pub nodes: Vec<usize>,
    /// Costs for every ordered node pair, self-pairs included.
    pub links: LinkTable,
    /// Vehicle roster.
    pub vehicles: Vec<Vehicle>,
    /// Cargo dimensions shared by all vehicles.
    pub cargo: CargoSpace,
    /// Box catalog.
    pub boxes: Vec<BoxType>,
    /// Box-type → customer → count.
    #[serde(default)]
    pub demand: Demand,
}

/// A validated 3L-CVRP instance.
///
/// The first node is the depot; every other node is a customer. Stages run
/// from 1 to the number of nodes.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::distance::{LinkTable, FORBIDDEN_COST};
/// use u_3lcvrp::models::{BoxType, CargoSpace, Demand, Problem, ProblemData, Vehicle};
///
/// let nodes = vec![1, 2, 3];
/// let links = LinkTable::new()
///     .with_symmetric(1, 2, 10.0)
///     .with_symmetric(1, 3, 30.0)
///     .with_symmetric(2, 3, 15.0)
///     .with_forbidden_self_links(&nodes, FORBIDDEN_COST);
///
/// let problem = Problem::new(ProblemData {
///     nodes,
///     links,
///     vehicles: vec![Vehicle::new(0)],
///     cargo: CargoSpace::new(10, 5, 5),
///     boxes: vec![BoxType::new("box1", 1, 1, 1)],
///     demand: Demand::new().with("box1", 2, 2),
/// })
/// .unwrap();
///
/// assert_eq!(problem.depot(), 1);
/// assert_eq!(problem.customers(), &[2, 3]);
/// assert_eq!(problem.num_stages(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProblemData", into = "ProblemData")]
pub struct Problem {
    nodes: Vec<usize>,
    links: LinkTable,
    vehicles: Vec<Vehicle>,
    cargo: CargoSpace,
    boxes: Vec<BoxType>,
    demand: Demand,
}

impl Problem {
    /// Validates the raw data and builds an instance.
    pub fn new(data: ProblemData) -> std::result::Result<Self, ProblemError> {
        validate(&data)?;

        if !data.links.is_symmetric(1e-9) {
            warn!("link costs are asymmetric; accepting them as given");
        }
        for b in &data.boxes {
            if !b.fits_in(&data.cargo) {
                warn!(box_type = b.id(), "box exceeds the cargo space and can never be placed");
            }
        }

        Ok(Self {
            nodes: data.nodes,
            links: data.links,
            vehicles: data.vehicles,
            cargo: data.cargo,
            boxes: data.boxes,
            demand: data.demand,
        })
    }

    /// Parses and validates an instance from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: ProblemData = serde_json::from_str(json)?;
        Ok(Self::new(data)?)
    }

    /// All node ids, depot first.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// The depot node.
    pub fn depot(&self) -> usize {
        self.nodes[0]
    }

    /// Customer nodes (every node but the depot).
    pub fn customers(&self) -> &[usize] {
        &self.nodes[1..]
    }

    /// Number of stages (equals the node count).
    pub fn num_stages(&self) -> usize {
        self.nodes.len()
    }

    /// Link cost table.
    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Vehicle roster.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Cargo space shared by all vehicles.
    pub fn cargo(&self) -> &CargoSpace {
        &self.cargo
    }

    /// Box catalog.
    pub fn boxes(&self) -> &[BoxType] {
        &self.boxes
    }

    /// Demand table.
    pub fn demand(&self) -> &Demand {
        &self.demand
    }

    /// Demand of catalog entry `box_index` at `customer`.
    pub fn demand_of(&self, box_index: usize, customer: usize) -> u32 {
        self.demand.get(self.boxes[box_index].id(), customer)
    }

    /// Total count of each catalog entry across customers, in catalog order.
    pub fn box_totals(&self) -> Vec<u64> {
        self.boxes
            .iter()
            .map(|b| self.demand.total_for_box(b.id()))
            .collect()
    }

    /// Total cargo volume demanded by `customer`.
    pub fn customer_volume(&self, customer: usize) -> u64 {
        self.boxes
            .iter()
            .map(|b| b.volume() * u64::from(self.demand.get(b.id(), customer)))
            .sum()
    }

    /// Total boxes demanded by `customer`, across types.
    pub fn customer_box_count(&self, customer: usize) -> u64 {
        self.boxes
            .iter()
            .map(|b| u64::from(self.demand.get(b.id(), customer)))
            .sum()
    }
}

impl TryFrom<ProblemData> for Problem {
    type Error = ProblemError;

    fn try_from(data: ProblemData) -> std::result::Result<Self, Self::Error> {
        Problem::new(data)
    }
}

impl From<Problem> for ProblemData {
    fn from(p: Problem) -> Self {
        ProblemData {
            nodes: p.nodes,
            links: p.links,
            vehicles: p.vehicles,
            cargo: p.cargo,
            boxes: p.boxes,
            demand: p.demand,
        }
    }
}

/// Checks structural integrity; returns the first defect found.
fn validate(data: &ProblemData) -> std::result::Result<(), ProblemError> {
    if data.nodes.is_empty() {
        return Err(ProblemError::EmptyNodeSet);
    }
    let mut node_ids = HashSet::new();
    for &n in &data.nodes {
        if !node_ids.insert(n) {
            return Err(ProblemError::DuplicateNode(n));
        }
    }

    if data.vehicles.is_empty() {
        return Err(ProblemError::EmptyFleet);
    }
    let mut vehicle_ids = HashSet::new();
    for v in &data.vehicles {
        if !vehicle_ids.insert(v.id()) {
            return Err(ProblemError::DuplicateVehicle(v.id()));
        }
    }

    for link in data.links.iter() {
        if !node_ids.contains(&link.from) || !node_ids.contains(&link.to) {
            return Err(ProblemError::UnknownLinkNode {
                from: link.from,
                to: link.to,
            });
        }
        if !link.cost.is_finite() || link.cost < 0.0 {
            return Err(ProblemError::InvalidCost {
                from: link.from,
                to: link.to,
                cost: link.cost,
            });
        }
    }
    for &from in &data.nodes {
        for &to in &data.nodes {
            if !data.links.contains(from, to) {
                return Err(ProblemError::MissingLink { from, to });
            }
        }
    }

    let cargo = &data.cargo;
    if cargo.length == 0 || cargo.width == 0 || cargo.height == 0 {
        return Err(ProblemError::NonPositiveDimension("cargo".into()));
    }

    let mut box_ids = HashSet::new();
    for b in &data.boxes {
        if !box_ids.insert(b.id()) {
            return Err(ProblemError::DuplicateBoxType(b.id().to_string()));
        }
        if b.volume() == 0 {
            return Err(ProblemError::NonPositiveDimension(format!("box '{}'", b.id())));
        }
    }

    let customers: HashSet<usize> = data.nodes[1..].iter().copied().collect();
    for (box_type, node, _) in data.demand.entries() {
        if !box_ids.contains(box_type) {
            return Err(ProblemError::UnknownBoxType(box_type.to_string()));
        }
        if !customers.contains(&node) {
            return Err(ProblemError::UnknownCustomer {
                box_type: box_type.to_string(),
                node,
            });
        }
    }

    Ok(())
}
