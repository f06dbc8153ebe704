//! Route and leg types.

use serde::Serialize;

/// One traversed link of a route, taken at a given stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Leg {
    /// Stage at which the link is traversed (1-based).
    pub stage: usize,
    /// Tail node.
    pub from: usize,
    /// Head node.
    pub to: usize,
}

/// The legs a single vehicle travels, ordered by stage.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::{Leg, Route};
///
/// let mut route = Route::new(0);
/// route.push_leg(Leg { stage: 2, from: 2, to: 3 });
/// route.push_leg(Leg { stage: 1, from: 1, to: 2 });
/// route.push_leg(Leg { stage: 3, from: 3, to: 1 });
/// assert_eq!(route.nodes(), vec![1, 2, 3, 1]);
/// assert_eq!(route.customer_ids(1), vec![2, 3]);
/// assert!(route.is_chained());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    vehicle_id: usize,
    legs: Vec<Leg>,
    total_cost: f64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            legs: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// Inserts a leg, keeping legs ordered by stage.
    pub fn push_leg(&mut self, leg: Leg) {
        let at = self.legs.partition_point(|l| *l <= leg);
        self.legs.insert(at, leg);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the legs ordered by stage.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns `true` if the vehicle travels no link.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Node sequence in stage order: the first tail followed by every head.
    pub fn nodes(&self) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.legs.len() + 1);
        if let Some(first) = self.legs.first() {
            nodes.push(first.from);
        }
        nodes.extend(self.legs.iter().map(|l| l.to));
        nodes
    }

    /// Visited nodes other than `depot`, in stage order.
    pub fn customer_ids(&self, depot: usize) -> Vec<usize> {
        self.legs
            .iter()
            .map(|l| l.to)
            .filter(|&n| n != depot)
            .collect()
    }

    /// Returns `true` if every leg starts where the previous one ended.
    pub fn is_chained(&self) -> bool {
        self.legs.windows(2).all(|w| w[0].to == w[1].from)
    }

    /// Travel cost of this route (set by the decoder).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sets the travel cost.
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 0);
        assert!(r.nodes().is_empty());
        assert!(r.is_chained());
    }

    #[test]
    fn test_legs_sorted_by_stage() {
        let mut r = Route::new(1);
        r.push_leg(Leg { stage: 3, from: 3, to: 1 });
        r.push_leg(Leg { stage: 1, from: 1, to: 2 });
        r.push_leg(Leg { stage: 2, from: 2, to: 3 });
        let stages: Vec<_> = r.legs().iter().map(|l| l.stage).collect();
        assert_eq!(stages, vec![1, 2, 3]);
        assert_eq!(r.nodes(), vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_broken_chain() {
        let mut r = Route::new(0);
        r.push_leg(Leg { stage: 1, from: 1, to: 2 });
        r.push_leg(Leg { stage: 2, from: 3, to: 1 });
        assert!(!r.is_chained());
        assert_eq!(r.customer_ids(1), vec![2]);
    }
}
