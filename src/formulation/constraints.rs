//! The eight constraint families.
//!
//! Each builder reads the problem, the position grid, and the variable space,
//! appends its constraints to the model, and returns how many it added.
//! Builders are independent: any subset may run, in any combination, and
//! every summation tolerates an empty admissible position set.
//!
//! | Family | Rows |
//! |---|---|
//! | VisitOnce | one per customer |
//! | Connectivity | one per customer |
//! | DepotDepartureLimit | one per vehicle |
//! | StageContinuity | customer × vehicle × non-final stage |
//! | Capacity | one per vehicle |
//! | FullUnpack | customer × vehicle × non-final stage |
//! | NoOverlap | anchor cell × vehicle (trivial rows skipped) |
//! | DemandSatisfaction | box type × customer |
//!
//! # Reference
//!
//! Bortfeldt & Wäscher (2013), "Constraints in container loading – A
//! state-of-the-art review", *EJOR* 229(1), 1-20.

use super::expr::{Comparison, LinearExpr};
use super::model::Model;
use super::variables::VariableSpace;
use crate::error::Result;
use crate::models::{Axis, Problem};
use crate::packing::PositionGrid;
use crate::selection::ConstraintFamily;

/// Read-only inputs shared by all builders.
#[derive(Debug, Clone, Copy)]
pub struct FormulationContext<'a> {
    /// The instance.
    pub problem: &'a Problem,
    /// Candidate box positions.
    pub grid: &'a PositionGrid,
    /// Declared variables.
    pub space: &'a VariableSpace,
}

/// A constraint-family builder. Returns the number of constraints added.
pub type ConstraintBuilder = fn(&FormulationContext<'_>, &mut Model) -> Result<usize>;

/// Builders in canonical order.
pub const REGISTRY: [(ConstraintFamily, ConstraintBuilder); 8] = [
    (ConstraintFamily::VisitOnce, visit_once),
    (ConstraintFamily::Connectivity, connectivity),
    (ConstraintFamily::DepotDepartureLimit, depot_departure_limit),
    (ConstraintFamily::StageContinuity, stage_continuity),
    (ConstraintFamily::Capacity, capacity),
    (ConstraintFamily::FullUnpack, full_unpack),
    (ConstraintFamily::NoOverlap, no_overlap),
    (ConstraintFamily::DemandSatisfaction, demand_satisfaction),
];

/// Every customer is left exactly once, by one vehicle, at one stage:
/// `Σ_{l,v,t} d[k,l,v,t] = 1`.
pub fn visit_once(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let mut added = 0;
    for &k in p.customers() {
        let mut expr = LinearExpr::new();
        for &l in p.nodes() {
            for v in p.vehicles() {
                for t in 1..=p.num_stages() {
                    expr.add_term(ctx.space.routing(k, l, v.id(), t)?, 1.0);
                }
            }
        }
        model.add_constraint(
            format!("visit_once[k={k}]"),
            ConstraintFamily::VisitOnce,
            expr,
            Comparison::Eq,
            1.0,
        );
        added += 1;
    }
    Ok(added)
}

/// Departure stage equals arrival stage plus one:
/// `Σ_{l,v,t≥2} t·d[k,l,v,t] − Σ_{p,v,t≥1} t·d[p,k,v,t] = 1`.
pub fn connectivity(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let mut added = 0;
    for &k in p.customers() {
        let mut expr = LinearExpr::new();
        for &other in p.nodes() {
            for v in p.vehicles() {
                for t in 1..=p.num_stages() {
                    if t >= 2 {
                        expr.add_term(ctx.space.routing(k, other, v.id(), t)?, t as f64);
                    }
                    expr.add_term(ctx.space.routing(other, k, v.id(), t)?, -(t as f64));
                }
            }
        }
        model.add_constraint(
            format!("connectivity[k={k}]"),
            ConstraintFamily::Connectivity,
            expr,
            Comparison::Eq,
            1.0,
        );
        added += 1;
    }
    Ok(added)
}

/// Each vehicle leaves the depot at most once at stage 1:
/// `Σ_{customers l} d[depot,l,v,1] ≤ 1`.
pub fn depot_departure_limit(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let depot = p.depot();
    let mut added = 0;
    for v in p.vehicles() {
        let mut expr = LinearExpr::new();
        for &l in p.customers() {
            expr.add_term(ctx.space.routing(depot, l, v.id(), 1)?, 1.0);
        }
        model.add_constraint(
            format!("depot_departure_limit[v={}]", v.id()),
            ConstraintFamily::DepotDepartureLimit,
            expr,
            Comparison::Le,
            1.0,
        );
        added += 1;
    }
    Ok(added)
}

/// Arriving at `k` during stage t means leaving `k` during stage t + 1:
/// `Σ_l d[k,l,v,t+1] − Σ_p d[p,k,v,t] = 0` for every non-final t.
pub fn stage_continuity(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let mut added = 0;
    for &k in p.customers() {
        for t in 1..p.num_stages() {
            for v in p.vehicles() {
                let mut expr = LinearExpr::new();
                for &other in p.nodes() {
                    expr.add_term(ctx.space.routing(k, other, v.id(), t + 1)?, 1.0);
                    expr.add_term(ctx.space.routing(other, k, v.id(), t)?, -1.0);
                }
                model.add_constraint(
                    format!("stage_continuity[k={k},t={t},v={}]", v.id()),
                    ConstraintFamily::StageContinuity,
                    expr,
                    Comparison::Eq,
                    0.0,
                );
                added += 1;
            }
        }
    }
    Ok(added)
}

/// Volume demanded by the customers a vehicle leaves at stage ≥ 2 fits the
/// cargo: `Σ_{t≥2,l,k,i} vol(i)·demand[i][k]·d[k,l,v,t] ≤ cargo volume`.
///
/// Counts a customer's whole demand whenever the vehicle serves it, which
/// bounds the total carried over the route rather than the load on each leg.
pub fn capacity(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let cargo_volume = p.cargo().volume() as f64;
    let mut added = 0;
    for v in p.vehicles() {
        let mut expr = LinearExpr::new();
        for &k in p.customers() {
            let volume = p.customer_volume(k) as f64;
            for &l in p.nodes() {
                for t in 2..=p.num_stages() {
                    expr.add_term(ctx.space.routing(k, l, v.id(), t)?, volume);
                }
            }
        }
        model.add_constraint(
            format!("capacity[v={}]", v.id()),
            ConstraintFamily::Capacity,
            expr,
            Comparison::Le,
            cargo_volume,
        );
        added += 1;
    }
    Ok(added)
}

/// Boxes loaded for `k` at stage t equal what arriving at `k` delivers:
/// `Σ_{i,pos} a[pos,i,k,v,t] − Σ_{i,p} demand[i][k]·d[p,k,v,t] = 0`.
///
/// Positions range over each box type's admissible set.
pub fn full_unpack(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let mut added = 0;
    for &k in p.customers() {
        let boxes = p.customer_box_count(k) as f64;
        for t in 1..p.num_stages() {
            for v in p.vehicles() {
                let mut expr = LinearExpr::new();
                for box_index in 0..p.boxes().len() {
                    for pos in ctx.grid.admissible(box_index) {
                        expr.add_term(ctx.space.loading(pos, box_index, k, v.id(), t)?, 1.0);
                    }
                }
                for &origin in p.nodes() {
                    expr.add_term(ctx.space.routing(origin, k, v.id(), t)?, -boxes);
                }
                model.add_constraint(
                    format!("full_unpack[k={k},t={t},v={}]", v.id()),
                    ConstraintFamily::FullUnpack,
                    expr,
                    Comparison::Eq,
                    0.0,
                );
                added += 1;
            }
        }
    }
    Ok(added)
}

/// Each anchor cell of a vehicle is covered by at most one box over the whole
/// route: `Σ_{i,k,t} Σ_{pos covering cell} a[pos,i,k,v,t] ≤ 1`.
///
/// Two boxes intersect iff they share the cell at the componentwise maximum
/// of their lower corners, which is always a grid anchor. Rows with no
/// covering position are trivially satisfied and not emitted.
pub fn no_overlap(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let extents: Vec<[u32; 3]> = p
        .boxes()
        .iter()
        .map(|b| [b.extent(Axis::X), b.extent(Axis::Y), b.extent(Axis::Z)])
        .collect();
    let mut added = 0;
    for cell in ctx.grid.anchors() {
        for v in p.vehicles() {
            let mut expr = LinearExpr::new();
            for (box_index, &ext) in extents.iter().enumerate() {
                for pos in ctx.grid.covering(box_index, ext, cell) {
                    for &k in p.customers() {
                        for t in 1..p.num_stages() {
                            expr.add_term(ctx.space.loading(pos, box_index, k, v.id(), t)?, 1.0);
                        }
                    }
                }
            }
            if expr.is_empty() {
                continue;
            }
            model.add_constraint(
                format!("no_overlap[x={},y={},z={},v={}]", cell.x, cell.y, cell.z, v.id()),
                ConstraintFamily::NoOverlap,
                expr,
                Comparison::Le,
                1.0,
            );
            added += 1;
        }
    }
    Ok(added)
}

/// Boxes of each type placed for each customer equal its demand:
/// `Σ_{pos,v,t} a[pos,i,k,v,t] = demand[i][k]`.
pub fn demand_satisfaction(ctx: &FormulationContext<'_>, model: &mut Model) -> Result<usize> {
    let p = ctx.problem;
    let mut added = 0;
    for (box_index, b) in p.boxes().iter().enumerate() {
        for &k in p.customers() {
            let mut expr = LinearExpr::new();
            for pos in ctx.grid.admissible(box_index) {
                for v in p.vehicles() {
                    for t in 1..p.num_stages() {
                        expr.add_term(ctx.space.loading(pos, box_index, k, v.id(), t)?, 1.0);
                    }
                }
            }
            model.add_constraint(
                format!("demand_satisfaction[i={},k={k}]", b.id()),
                ConstraintFamily::DemandSatisfaction,
                expr,
                Comparison::Eq,
                f64::from(p.demand_of(box_index, k)),
            );
            added += 1;
        }
    }
    Ok(added)
}
