//! Constraint selection over the canonical slot ordering.
//!
//! The model's constraints are numbered 1 to 11. Eight numbers name a
//! toggleable [`ConstraintFamily`]; slots 1, 6 and 11 are structural
//! [`Marker`]s that stand for parts of the model built unconditionally
//! (the two variable domains and the model close). They keep the numbering
//! stable and are never toggled.
//!
//! | Slot | Entry |
//! |---|---|
//! | 1 | routing variable domain (marker) |
//! | 2–5 | VisitOnce, Connectivity, DepotDepartureLimit, StageContinuity |
//! | 6 | loading variable domain (marker) |
//! | 7–10 | Capacity, FullUnpack, NoOverlap, DemandSatisfaction |
//! | 11 | model close (marker) |

mod activation;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use activation::Activation;

/// Number of canonical slots.
pub const SLOT_COUNT: usize = 11;

/// A toggleable constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConstraintFamily {
    /// Every customer is left exactly once.
    VisitOnce,
    /// Departure stage equals arrival stage plus one.
    Connectivity,
    /// Each vehicle leaves the depot at most once, at stage 1.
    DepotDepartureLimit,
    /// Arriving at stage t implies departing at stage t + 1.
    StageContinuity,
    /// Carried volume fits the cargo space.
    Capacity,
    /// Boxes loaded for a customer match what the arrival delivers.
    FullUnpack,
    /// Each unit cell is covered by at most one box per vehicle.
    NoOverlap,
    /// Placed boxes per type and customer equal demand.
    DemandSatisfaction,
}

impl ConstraintFamily {
    /// All families in canonical order.
    pub const ALL: [ConstraintFamily; 8] = [
        ConstraintFamily::VisitOnce,
        ConstraintFamily::Connectivity,
        ConstraintFamily::DepotDepartureLimit,
        ConstraintFamily::StageContinuity,
        ConstraintFamily::Capacity,
        ConstraintFamily::FullUnpack,
        ConstraintFamily::NoOverlap,
        ConstraintFamily::DemandSatisfaction,
    ];

    /// Snake-case name used as the prefix of constraint names.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintFamily::VisitOnce => "visit_once",
            ConstraintFamily::Connectivity => "connectivity",
            ConstraintFamily::DepotDepartureLimit => "depot_departure_limit",
            ConstraintFamily::StageContinuity => "stage_continuity",
            ConstraintFamily::Capacity => "capacity",
            ConstraintFamily::FullUnpack => "full_unpack",
            ConstraintFamily::NoOverlap => "no_overlap",
            ConstraintFamily::DemandSatisfaction => "demand_satisfaction",
        }
    }

    /// 1-based canonical slot number.
    pub fn slot(self) -> usize {
        CANONICAL_SLOTS
            .iter()
            .position(|s| *s == Slot::Family(self))
            .map_or(0, |i| i + 1)
    }
}

impl fmt::Display for ConstraintFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structural slot that is part of every model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Routing variables are allocated.
    RoutingDomain,
    /// Loading variables are allocated.
    LoadingDomain,
    /// The model is closed and handed off.
    ModelClose,
}

/// One entry of the canonical ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Structural placeholder.
    Marker(Marker),
    /// Toggleable constraint family.
    Family(ConstraintFamily),
}

/// The fixed canonical ordering, slot 1 first.
pub const CANONICAL_SLOTS: [Slot; SLOT_COUNT] = [
    Slot::Marker(Marker::RoutingDomain),
    Slot::Family(ConstraintFamily::VisitOnce),
    Slot::Family(ConstraintFamily::Connectivity),
    Slot::Family(ConstraintFamily::DepotDepartureLimit),
    Slot::Family(ConstraintFamily::StageContinuity),
    Slot::Marker(Marker::LoadingDomain),
    Slot::Family(ConstraintFamily::Capacity),
    Slot::Family(ConstraintFamily::FullUnpack),
    Slot::Family(ConstraintFamily::NoOverlap),
    Slot::Family(ConstraintFamily::DemandSatisfaction),
    Slot::Marker(Marker::ModelClose),
];

/// State of a slot after selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// Structural; not toggleable.
    Marker,
    /// A family with its enabled flag.
    Enabled(bool),
}

/// Ordered enable map over the canonical slots.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::selection::{select, Activation, ConstraintFamily};
///
/// let selection = select(&Activation::from(2..=5));
/// assert!(selection.is_enabled(ConstraintFamily::VisitOnce));
/// assert!(!selection.is_enabled(ConstraintFamily::Capacity));
/// assert_eq!(selection.enabled().count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSelection {
    entries: [(Slot, SlotState); SLOT_COUNT],
}

impl ConstraintSelection {
    /// Slots and their states in canonical order.
    pub fn entries(&self) -> &[(Slot, SlotState)] {
        &self.entries
    }

    /// Returns `true` if `family` is enabled.
    pub fn is_enabled(&self, family: ConstraintFamily) -> bool {
        self.entries
            .iter()
            .any(|&(slot, state)| slot == Slot::Family(family) && state == SlotState::Enabled(true))
    }

    /// Enabled families in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = ConstraintFamily> + '_ {
        self.entries.iter().filter_map(|&(slot, state)| match (slot, state) {
            (Slot::Family(f), SlotState::Enabled(true)) => Some(f),
            _ => None,
        })
    }
}

/// Builds the enable map for `activation`.
///
/// Marker slots stay [`SlotState::Marker`]; a family slot is enabled iff its
/// 1-based position is requested.
pub fn select(activation: &Activation) -> ConstraintSelection {
    let mut entries = [(Slot::Marker(Marker::RoutingDomain), SlotState::Marker); SLOT_COUNT];
    for (i, &slot) in CANONICAL_SLOTS.iter().enumerate() {
        let state = match slot {
            Slot::Marker(_) => SlotState::Marker,
            Slot::Family(_) => SlotState::Enabled(activation.contains(i + 1)),
        };
        entries[i] = (slot, state);
    }
    ConstraintSelection { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_markers_untouched() {
        let selection = select(&Activation::all());
        for &i in &[0, 5, 10] {
            assert_eq!(selection.entries()[i].1, SlotState::Marker);
        }
        assert_eq!(selection.enabled().count(), 8);
    }

    #[test]
    fn test_range_one_to_eight() {
        let selection = select(&Activation::from(1..9));
        let enabled: Vec<_> = selection.enabled().collect();
        assert_eq!(
            enabled,
            vec![
                ConstraintFamily::VisitOnce,
                ConstraintFamily::Connectivity,
                ConstraintFamily::DepotDepartureLimit,
                ConstraintFamily::StageContinuity,
                ConstraintFamily::Capacity,
                ConstraintFamily::FullUnpack,
            ]
        );
    }

    #[test]
    fn test_list_selection() {
        let selection = select(&Activation::from(vec![2, 3, 5, 8]));
        let enabled: Vec<_> = selection.enabled().collect();
        assert_eq!(
            enabled,
            vec![
                ConstraintFamily::VisitOnce,
                ConstraintFamily::Connectivity,
                ConstraintFamily::StageContinuity,
                ConstraintFamily::FullUnpack,
            ]
        );
    }

    #[test]
    fn test_marker_numbers_ignored() {
        let selection = select(&Activation::from(vec![1, 6, 11, 42]));
        assert_eq!(selection.enabled().count(), 0);
    }

    #[test]
    fn test_family_slots() {
        assert_eq!(ConstraintFamily::VisitOnce.slot(), 2);
        assert_eq!(ConstraintFamily::StageContinuity.slot(), 5);
        assert_eq!(ConstraintFamily::Capacity.slot(), 7);
        assert_eq!(ConstraintFamily::DemandSatisfaction.slot(), 10);
    }

    #[test]
    fn test_canonical_order_preserved() {
        let selection = select(&Activation::from(vec![10, 2]));
        let slots: Vec<_> = selection.entries().iter().map(|e| e.0).collect();
        assert_eq!(slots, CANONICAL_SLOTS.to_vec());
    }

    proptest! {
        #[test]
        fn prop_range_equals_list(start in 0usize..13, end in 0usize..13) {
            let from_range = select(&Activation::Range(start..=end));
            let list: Vec<usize> = (start..=end)
                .filter(|&n| n >= 1 && n <= SLOT_COUNT)
                .filter(|&n| matches!(CANONICAL_SLOTS[n - 1], Slot::Family(_)))
                .collect();
            let from_list = select(&Activation::List(list));
            prop_assert_eq!(from_range, from_list);
        }
    }
}
