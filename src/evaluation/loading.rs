//! Geometric and demand checks on a loading plan.

use crate::models::{Axis, LoadingPlan, Problem, Violation, ViolationType};

/// Checks a loading plan against the cargo space and demand.
///
/// Reports boxes leaving the cargo space, pairs of boxes sharing volume
/// within one vehicle, and every (box type, customer) pair whose placed
/// count differs from its demand.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::distance::{LinkTable, FORBIDDEN_COST};
/// use u_3lcvrp::evaluation::check_loading;
/// use u_3lcvrp::models::{
///     BoxType, CargoSpace, Demand, LoadingPlan, PlacedBox, Position, Problem, ProblemData,
///     Vehicle,
/// };
///
/// let nodes = vec![1, 2];
/// let problem = Problem::new(ProblemData {
///     links: LinkTable::new()
///         .with_symmetric(1, 2, 5.0)
///         .with_forbidden_self_links(&nodes, FORBIDDEN_COST),
///     nodes,
///     vehicles: vec![Vehicle::new(0)],
///     cargo: CargoSpace::new(2, 1, 1),
///     boxes: vec![BoxType::new("b", 1, 1, 1)],
///     demand: Demand::new().with("b", 2, 1),
/// })
/// .unwrap();
///
/// let mut plan = LoadingPlan::new();
/// plan.push(0, PlacedBox {
///     box_type: "b".into(),
///     customer: 2,
///     stage: 1,
///     position: Position::new(1, 0, 0),
///     extents: [1, 1, 1],
/// });
/// assert!(check_loading(&problem, &plan).is_empty());
/// ```
pub fn check_loading(problem: &Problem, plan: &LoadingPlan) -> Vec<Violation> {
    let cargo = problem.cargo();
    let mut violations = Vec::new();

    for (vehicle, boxes) in plan.iter() {
        for (index, b) in boxes.iter().enumerate() {
            if Axis::ALL.iter().any(|&axis| b.end(axis) > cargo.extent(axis)) {
                violations.push(Violation::new(ViolationType::OutOfBounds { vehicle, index }));
            }
        }
        for first in 0..boxes.len() {
            for second in first + 1..boxes.len() {
                if boxes[first].overlaps(&boxes[second]) {
                    violations.push(Violation::new(ViolationType::Overlap {
                        vehicle,
                        first,
                        second,
                    }));
                }
            }
        }
    }

    for b in problem.boxes() {
        for &customer in problem.customers() {
            let expected = u64::from(problem.demand().get(b.id(), customer));
            let loaded = plan.count(b.id(), customer);
            if expected != loaded {
                violations.push(Violation::new(ViolationType::DemandMismatch {
                    box_type: b.id().to_string(),
                    customer,
                    expected,
                    loaded,
                }));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{LinkTable, FORBIDDEN_COST};
    use crate::models::{BoxType, CargoSpace, Demand, PlacedBox, Position, ProblemData, Vehicle};

    fn problem() -> Problem {
        let nodes = vec![1, 2, 3];
        Problem::new(ProblemData {
            links: LinkTable::new()
                .with_symmetric(1, 2, 1.0)
                .with_symmetric(1, 3, 1.0)
                .with_symmetric(2, 3, 1.0)
                .with_forbidden_self_links(&nodes, FORBIDDEN_COST),
            nodes,
            vehicles: vec![Vehicle::new(0)],
            cargo: CargoSpace::new(3, 1, 1),
            boxes: vec![BoxType::new("u", 1, 1, 1)],
            demand: Demand::new().with("u", 2, 1).with("u", 3, 1),
        })
        .expect("valid")
    }

    fn unit(x: u32, customer: usize) -> PlacedBox {
        PlacedBox {
            box_type: "u".into(),
            customer,
            stage: 1,
            position: Position::new(x, 0, 0),
            extents: [1, 1, 1],
        }
    }

    #[test]
    fn test_valid_plan() {
        let mut plan = LoadingPlan::new();
        plan.push(0, unit(0, 2));
        plan.push(0, unit(1, 3));
        assert!(check_loading(&problem(), &plan).is_empty());
    }

    #[test]
    fn test_overlap_detected() {
        let mut plan = LoadingPlan::new();
        plan.push(0, unit(1, 2));
        plan.push(0, unit(1, 3));
        let v = check_loading(&problem(), &plan);
        assert_eq!(
            v,
            vec![Violation::new(ViolationType::Overlap {
                vehicle: 0,
                first: 0,
                second: 1
            })]
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let mut plan = LoadingPlan::new();
        plan.push(0, unit(3, 2));
        plan.push(0, unit(0, 3));
        let v = check_loading(&problem(), &plan);
        assert_eq!(v.len(), 1);
        assert!(matches!(v[0].kind, ViolationType::OutOfBounds { index: 0, .. }));
    }

    #[test]
    fn test_demand_mismatch() {
        let mut plan = LoadingPlan::new();
        plan.push(0, unit(0, 2));
        let v = check_loading(&problem(), &plan);
        assert_eq!(
            v,
            vec![Violation::new(ViolationType::DemandMismatch {
                box_type: "u".into(),
                customer: 3,
                expected: 1,
                loaded: 0
            })]
        );
    }
}
