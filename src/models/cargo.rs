//! Cargo space, box types, and positions on the unit grid.

use serde::{Deserialize, Serialize};

/// A spatial axis of the cargo volume.
///
/// `X` runs along the length, `Y` along the width, `Z` along the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Length.
    X,
    /// Width.
    Y,
    /// Height.
    Z,
}

impl Axis {
    /// All three axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// The cuboid cargo volume shared by every vehicle of the fleet.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::{Axis, CargoSpace};
///
/// let cargo = CargoSpace::new(10, 5, 5);
/// assert_eq!(cargo.volume(), 250);
/// assert_eq!(cargo.extent(Axis::X), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoSpace {
    /// Extent along x.
    pub length: u32,
    /// Extent along y.
    pub width: u32,
    /// Extent along z.
    pub height: u32,
}

impl CargoSpace {
    /// Creates a cargo space from its three dimensions.
    pub fn new(length: u32, width: u32, height: u32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Dimension along the given axis.
    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.length,
            Axis::Y => self.width,
            Axis::Z => self.height,
        }
    }

    /// Number of unit cells.
    pub fn volume(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width) * u64::from(self.height)
    }
}

/// A rigid, axis-aligned box type from the catalog.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::{Axis, BoxType};
///
/// let b = BoxType::new("pallet", 2, 1, 3);
/// assert_eq!(b.id(), "pallet");
/// assert_eq!(b.volume(), 6);
/// assert_eq!(b.extent(Axis::Z), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxType {
    id: String,
    length: u32,
    width: u32,
    height: u32,
}

impl BoxType {
    /// Creates a box type.
    pub fn new(id: impl Into<String>, length: u32, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            length,
            width,
            height,
        }
    }

    /// Catalog identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Footprint along the given axis.
    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.length,
            Axis::Y => self.width,
            Axis::Z => self.height,
        }
    }

    /// Number of unit cells the box occupies.
    pub fn volume(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width) * u64::from(self.height)
    }

    /// Returns `true` if the box fits inside the cargo in its fixed orientation.
    pub fn fits_in(&self, cargo: &CargoSpace) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.extent(axis) <= cargo.extent(axis))
    }
}

/// Lower-corner coordinates of a box on the unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Offset along the length.
    pub x: u32,
    /// Offset along the width.
    pub y: u32,
    /// Offset along the height.
    pub z: u32,
}

impl Position {
    /// Creates a position.
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along the given axis.
    pub fn coord(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_volume() {
        let c = CargoSpace::new(10, 5, 5);
        assert_eq!(c.volume(), 250);
        assert_eq!(c.extent(Axis::Y), 5);
    }

    #[test]
    fn test_box_fits() {
        let c = CargoSpace::new(4, 2, 2);
        assert!(BoxType::new("a", 4, 2, 2).fits_in(&c));
        assert!(!BoxType::new("b", 1, 3, 1).fits_in(&c));
    }

    #[test]
    fn test_position_coord() {
        let p = Position::new(1, 2, 3);
        assert_eq!(p.coord(Axis::X), 1);
        assert_eq!(p.coord(Axis::Y), 2);
        assert_eq!(p.coord(Axis::Z), 3);
    }

    #[test]
    fn test_box_json() {
        let b: BoxType =
            serde_json::from_str(r#"{"id":"box1","length":1,"width":2,"height":3}"#)
                .expect("valid json");
        assert_eq!(b.volume(), 6);
    }
}
