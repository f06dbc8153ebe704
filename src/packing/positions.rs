//! Candidate placement offsets on the cargo grid.
//!
//! # Algorithm
//!
//! Along one axis, a box can only start where a stack of previously placed
//! boxes ends. The candidate offsets are therefore the sums
//! Σ nᵢ·fᵢ with 0 ≤ nᵢ ≤ cᵢ, where fᵢ is the footprint of type i on that
//! axis and cᵢ its total demanded count, capped at the axis bound
//! `cargo − min fᵢ`. This is a bounded subset-sum reachability table,
//! filled one copy of each box at a time.
//!
//! The result is a superset of the offsets any packing needs; it prunes the
//! full grid down to a combinatorially relevant subset.
//!
//! # Complexity
//!
//! O(B · Σcᵢ) per axis, where B is the axis bound.
//!
//! # Reference
//!
//! Junqueira, Morabito & Yamashita (2012), "Three-dimensional container
//! loading models with cargo stability and load bearing constraints",
//! *Computers & Operations Research* 39(1), 74-85 (normal patterns).

use tracing::debug;

use crate::models::{Axis, BoxType, CargoSpace, Position};

/// Offsets reachable as bounded sums of `footprints`, capped at `bound`.
///
/// `counts[i]` bounds how many copies of `footprints[i]` may be summed.
/// The result is sorted and always contains 0 unless `bound` is negative.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::packing::reachable_offsets;
///
/// // Two boxes of length 3 and one of length 2 on a 10-unit axis (bound 8).
/// assert_eq!(reachable_offsets(&[3, 2], &[2, 1], 8), vec![0, 2, 3, 5, 6, 8]);
/// assert!(reachable_offsets(&[4], &[1], -1).is_empty());
/// ```
pub fn reachable_offsets(footprints: &[u32], counts: &[u64], bound: i64) -> Vec<u32> {
    if bound < 0 {
        return Vec::new();
    }
    let bound = bound as usize;
    let mut reach = vec![false; bound + 1];
    reach[0] = true;

    for (&footprint, &count) in footprints.iter().zip(counts) {
        let f = footprint as usize;
        if f == 0 || f > bound {
            continue;
        }
        for _ in 0..count {
            let mut changed = false;
            // Descending so each pass adds at most one copy.
            for s in (f..=bound).rev() {
                if reach[s - f] && !reach[s] {
                    reach[s] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    reach
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r)
        .map(|(s, _)| s as u32)
        .collect()
}

/// Candidate offsets along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisPositions {
    all: Vec<u32>,
    per_type: Vec<Vec<u32>>,
}

impl AxisPositions {
    /// Enumerates the axis-wide set and each box type's admissible subset.
    pub fn enumerate(axis: Axis, cargo: &CargoSpace, boxes: &[BoxType], totals: &[u64]) -> Self {
        let extent = cargo.extent(axis);
        let footprints: Vec<u32> = boxes.iter().map(|b| b.extent(axis)).collect();
        let bound = footprints
            .iter()
            .min()
            .map_or(-1, |&min| i64::from(extent) - i64::from(min));

        let all = reachable_offsets(&footprints, totals, bound);
        let per_type = footprints
            .iter()
            .map(|&f| match extent.checked_sub(f) {
                Some(limit) => all.iter().copied().filter(|&p| p <= limit).collect(),
                None => Vec::new(),
            })
            .collect();

        Self { all, per_type }
    }

    /// The axis-wide reachable set, sorted.
    pub fn all(&self) -> &[u32] {
        &self.all
    }

    /// Admissible offsets of catalog entry `box_index`, sorted.
    pub fn admissible(&self, box_index: usize) -> &[u32] {
        &self.per_type[box_index]
    }
}

/// Candidate offsets on all three axes.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::{Axis, BoxType, CargoSpace};
/// use u_3lcvrp::packing::PositionGrid;
///
/// let cargo = CargoSpace::new(4, 2, 1);
/// let boxes = vec![BoxType::new("a", 2, 1, 1), BoxType::new("b", 3, 1, 1)];
/// let grid = PositionGrid::enumerate(&cargo, &boxes, &[2, 1]);
///
/// assert_eq!(grid.axis(Axis::X).all(), &[0, 2]);
/// assert_eq!(grid.axis(Axis::X).admissible(0), &[0, 2]);
/// assert_eq!(grid.axis(Axis::X).admissible(1), &[0]);
/// assert_eq!(grid.axis(Axis::Y).all(), &[0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGrid {
    x: AxisPositions,
    y: AxisPositions,
    z: AxisPositions,
}

impl PositionGrid {
    /// Enumerates positions for `boxes` in `cargo`, with `totals[i]` the
    /// summed demand of catalog entry `i`.
    pub fn enumerate(cargo: &CargoSpace, boxes: &[BoxType], totals: &[u64]) -> Self {
        let grid = Self {
            x: AxisPositions::enumerate(Axis::X, cargo, boxes, totals),
            y: AxisPositions::enumerate(Axis::Y, cargo, boxes, totals),
            z: AxisPositions::enumerate(Axis::Z, cargo, boxes, totals),
        };
        debug!(
            x = ?grid.x.all,
            y = ?grid.y.all,
            z = ?grid.z.all,
            "enumerated candidate positions"
        );
        grid
    }

    /// Positions along `axis`.
    pub fn axis(&self, axis: Axis) -> &AxisPositions {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Every point of the axis-wide grid, x-major.
    pub fn anchors(&self) -> impl Iterator<Item = Position> + '_ {
        self.x.all.iter().flat_map(move |&x| {
            self.y.all.iter().flat_map(move |&y| {
                self.z.all.iter().map(move |&z| Position::new(x, y, z))
            })
        })
    }

    /// Number of points in the axis-wide grid.
    pub fn num_anchors(&self) -> usize {
        self.x.all.len() * self.y.all.len() * self.z.all.len()
    }

    /// Admissible positions of catalog entry `box_index`, x-major.
    pub fn admissible(&self, box_index: usize) -> impl Iterator<Item = Position> + '_ {
        let xs = self.x.admissible(box_index);
        let ys = self.y.admissible(box_index);
        let zs = self.z.admissible(box_index);
        xs.iter().flat_map(move |&x| {
            ys.iter()
                .flat_map(move |&y| zs.iter().map(move |&z| Position::new(x, y, z)))
        })
    }

    /// Returns `true` if `pos` is admissible for catalog entry `box_index`.
    pub fn is_admissible(&self, box_index: usize, pos: Position) -> bool {
        Axis::ALL.iter().all(|&axis| {
            self.axis(axis)
                .admissible(box_index)
                .binary_search(&pos.coord(axis))
                .is_ok()
        })
    }

    /// Admissible positions of `box_index` whose box covers the unit cell at
    /// `cell`, i.e. `cell − extent + 1 ≤ p ≤ cell` on every axis.
    pub fn covering<'a>(
        &'a self,
        box_index: usize,
        extents: [u32; 3],
        cell: Position,
    ) -> impl Iterator<Item = Position> + 'a {
        let window = |axis: Axis, extent: u32| -> &'a [u32] {
            let offsets = self.axis(axis).admissible(box_index);
            let c = cell.coord(axis);
            let low = (c + 1).saturating_sub(extent);
            let start = offsets.partition_point(|&p| p < low);
            let end = offsets.partition_point(|&p| p <= c);
            &offsets[start..end]
        };
        let xs = window(Axis::X, extents[0]);
        let ys = window(Axis::Y, extents[1]);
        let zs = window(Axis::Z, extents[2]);
        xs.iter().flat_map(move |&x| {
            ys.iter()
                .flat_map(move |&y| zs.iter().map(move |&z| Position::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reachable_single_type() {
        assert_eq!(reachable_offsets(&[1], &[3], 9), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reachable_bounded_by_count() {
        // One box of 4 cannot reach 8.
        assert_eq!(reachable_offsets(&[4], &[1], 9), vec![0, 4]);
    }

    #[test]
    fn test_reachable_zero_count() {
        assert_eq!(reachable_offsets(&[2], &[0], 9), vec![0]);
    }

    #[test]
    fn test_reachable_capped() {
        assert_eq!(reachable_offsets(&[1], &[20], 4), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_oversized_box_has_no_positions() {
        let cargo = CargoSpace::new(4, 2, 2);
        let boxes = vec![BoxType::new("a", 1, 1, 1), BoxType::new("big", 5, 1, 1)];
        let grid = PositionGrid::enumerate(&cargo, &boxes, &[2, 1]);
        assert!(grid.axis(Axis::X).admissible(1).is_empty());
        assert_eq!(grid.admissible(1).count(), 0);
        assert_eq!(grid.admissible(0).count(), 3 * 2 * 2);
    }

    #[test]
    fn test_all_boxes_oversized() {
        let cargo = CargoSpace::new(2, 2, 2);
        let boxes = vec![BoxType::new("big", 3, 1, 1)];
        let grid = PositionGrid::enumerate(&cargo, &boxes, &[1]);
        assert!(grid.axis(Axis::X).all().is_empty());
        assert_eq!(grid.num_anchors(), 0);
        assert_eq!(grid.anchors().count(), 0);
    }

    #[test]
    fn test_empty_catalog() {
        let grid = PositionGrid::enumerate(&CargoSpace::new(2, 2, 2), &[], &[]);
        assert_eq!(grid.num_anchors(), 0);
    }

    #[test]
    fn test_is_admissible() {
        let cargo = CargoSpace::new(4, 1, 1);
        let boxes = vec![BoxType::new("a", 2, 1, 1)];
        let grid = PositionGrid::enumerate(&cargo, &boxes, &[2]);
        assert!(grid.is_admissible(0, Position::new(2, 0, 0)));
        assert!(!grid.is_admissible(0, Position::new(1, 0, 0)));
        assert!(!grid.is_admissible(0, Position::new(4, 0, 0)));
    }

    #[test]
    fn test_covering_window() {
        let cargo = CargoSpace::new(4, 1, 1);
        let boxes = vec![BoxType::new("a", 1, 1, 1), BoxType::new("b", 2, 1, 1)];
        let grid = PositionGrid::enumerate(&cargo, &boxes, &[4, 1]);
        // Box b (length 2) covers cell x=2 when placed at x=1 or x=2.
        let cover: Vec<_> = grid.covering(1, [2, 1, 1], Position::new(2, 0, 0)).collect();
        assert_eq!(cover, vec![Position::new(1, 0, 0), Position::new(2, 0, 0)]);
        let cover: Vec<_> = grid.covering(1, [2, 1, 1], Position::new(0, 0, 0)).collect();
        assert_eq!(cover, vec![Position::new(0, 0, 0)]);
    }

    proptest! {
        #[test]
        fn prop_admissible_within_bounds(
            cargo in (1u32..8, 1u32..6, 1u32..6),
            dims in prop::collection::vec((1u32..9, 1u32..7, 1u32..7, 0u32..4), 1..4),
        ) {
            let cargo = CargoSpace::new(cargo.0, cargo.1, cargo.2);
            let boxes: Vec<BoxType> = dims
                .iter()
                .enumerate()
                .map(|(i, &(l, w, h, _))| BoxType::new(format!("b{i}"), l, w, h))
                .collect();
            let totals: Vec<u64> = dims.iter().map(|d| u64::from(d.3)).collect();
            let grid = PositionGrid::enumerate(&cargo, &boxes, &totals);

            for axis in Axis::ALL {
                let positions = grid.axis(axis);
                for (i, b) in boxes.iter().enumerate() {
                    for &p in positions.admissible(i) {
                        prop_assert!(positions.all().contains(&p));
                        prop_assert!(p + b.extent(axis) <= cargo.extent(axis));
                    }
                    if b.extent(axis) > cargo.extent(axis) {
                        prop_assert!(positions.admissible(i).is_empty());
                    }
                }
            }
        }

        #[test]
        fn prop_reachable_sorted_and_bounded(
            footprints in prop::collection::vec(1u32..6, 0..4),
            bound in 0i64..20,
        ) {
            let counts = vec![3; footprints.len()];
            let offsets = reachable_offsets(&footprints, &counts, bound);
            prop_assert_eq!(offsets.first().copied(), Some(0));
            prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(offsets.iter().all(|&o| i64::from(o) <= bound));
        }
    }
}
