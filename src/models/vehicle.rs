//! Vehicle type.

use serde::{Deserialize, Serialize};

/// A vehicle of the homogeneous fleet.
///
/// All vehicles share the problem's [`CargoSpace`](super::CargoSpace); a
/// vehicle only carries its identifier.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::Vehicle;
///
/// let v = Vehicle::new(0);
/// assert_eq!(v.id(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vehicle {
    id: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given ID.
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(3);
        assert_eq!(v.id(), 3);
    }

    #[test]
    fn test_vehicle_json() {
        let vs: Vec<Vehicle> = serde_json::from_str("[0, 1]").expect("valid");
        assert_eq!(vs, vec![Vehicle::new(0), Vehicle::new(1)]);
    }
}
