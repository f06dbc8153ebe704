//! Solution, loading plan, and violation types.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Axis, BoxType, CargoSpace, Position, Problem, Route};

/// A box placed in a vehicle's cargo space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedBox {
    /// Box type identifier.
    pub box_type: String,
    /// Customer the box is delivered to.
    pub customer: usize,
    /// Stage at which the box is loaded for delivery.
    pub stage: usize,
    /// Lower corner.
    pub position: Position,
    /// Extent along x, y and z.
    pub extents: [u32; 3],
}

impl PlacedBox {
    /// Exclusive upper coordinate along `axis`.
    pub fn end(&self, axis: Axis) -> u32 {
        self.position.coord(axis) + self.extents[axis as usize]
    }

    /// Returns `true` if the two boxes share interior volume.
    ///
    /// Boxes that only touch on a face do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_3lcvrp::models::{PlacedBox, Position};
    ///
    /// let unit = |x| PlacedBox {
    ///     box_type: "b".into(),
    ///     customer: 2,
    ///     stage: 1,
    ///     position: Position::new(x, 0, 0),
    ///     extents: [1, 1, 1],
    /// };
    /// assert!(!unit(0).overlaps(&unit(1)));
    /// assert!(unit(0).overlaps(&unit(0)));
    /// ```
    pub fn overlaps(&self, other: &PlacedBox) -> bool {
        Axis::ALL.iter().all(|&axis| {
            self.position.coord(axis) < other.end(axis)
                && other.position.coord(axis) < self.end(axis)
        })
    }
}

/// Placements per vehicle. [`Solution::visualization`] adds the cargo and catalog.
///
/// Serializes as a map from vehicle id to its boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LoadingPlan {
    placements: BTreeMap<usize, Vec<PlacedBox>>,
}

impl LoadingPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement to a vehicle.
    pub fn push(&mut self, vehicle: usize, placed: PlacedBox) {
        self.placements.entry(vehicle).or_default().push(placed);
    }

    /// Boxes placed in `vehicle`.
    pub fn vehicle(&self, vehicle: usize) -> &[PlacedBox] {
        self.placements.get(&vehicle).map_or(&[], Vec::as_slice)
    }

    /// Iterates over `(vehicle, boxes)` in vehicle order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[PlacedBox])> + '_ {
        self.placements.iter().map(|(&v, boxes)| (v, boxes.as_slice()))
    }

    /// Total number of placed boxes.
    pub fn len(&self) -> usize {
        self.placements.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of boxes of `box_type` placed for `customer` over all vehicles.
    pub fn count(&self, box_type: &str, customer: usize) -> u64 {
        self.placements
            .values()
            .flatten()
            .filter(|p| p.box_type == box_type && p.customer == customer)
            .count() as u64
    }

    /// Serializes the plan to JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Everything a renderer needs: cargo dimensions, box catalog and placements.
///
/// Borrowed from a [`Problem`] and a [`Solution`] via
/// [`Solution::visualization`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Visualization<'a> {
    /// Cargo dimensions shared by every vehicle.
    pub cargo: &'a CargoSpace,
    /// Box catalog the placements refer to by id.
    pub boxes: &'a [BoxType],
    /// Vehicle id to placed boxes.
    pub placements: &'a LoadingPlan,
}

impl Visualization<'_> {
    /// Serializes the hand-off to JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A type of violation found in a decoded solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// Two boxes in the same vehicle share volume.
    Overlap {
        /// Vehicle id.
        vehicle: usize,
        /// Index of the first box in the vehicle's placements.
        first: usize,
        /// Index of the second box.
        second: usize,
    },
    /// A box sticks out of the cargo space.
    OutOfBounds {
        /// Vehicle id.
        vehicle: usize,
        /// Index of the box in the vehicle's placements.
        index: usize,
    },
    /// Placed count differs from the demand.
    DemandMismatch {
        /// Box type identifier.
        box_type: String,
        /// Customer node.
        customer: usize,
        /// Demanded count.
        expected: u64,
        /// Placed count.
        loaded: u64,
    },
}

/// A violation in a decoded solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A decoded solution: one route per vehicle plus the loading plan.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(0));
/// assert_eq!(sol.num_routes(), 1);
/// assert!(sol.loading().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    loading: LoadingPlan,
    total_cost: f64,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Routes that travel at least one link.
    pub fn used_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| !r.is_empty())
    }

    /// Returns the loading plan.
    pub fn loading(&self) -> &LoadingPlan {
        &self.loading
    }

    /// Replaces the loading plan.
    pub fn set_loading(&mut self, loading: LoadingPlan) {
        self.loading = loading;
    }

    /// Returns the objective value reported with this solution.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the total cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }

    /// Bundles the loading plan with `problem`'s cargo and catalog for rendering.
    pub fn visualization<'a>(&'a self, problem: &'a Problem) -> Visualization<'a> {
        Visualization {
            cargo: problem.cargo(),
            boxes: problem.boxes(),
            placements: &self.loading,
        }
    }

    /// Sum of the route costs.
    pub fn travel_cost(&self) -> f64 {
        self.routes.iter().map(Route::total_cost).sum()
    }
}
