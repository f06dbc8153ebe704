//! Travel-cost objective.

use super::expr::LinearExpr;
use super::model::Model;
use super::variables::VariableSpace;
use crate::error::Result;
use crate::models::Problem;

/// Sets `minimize Σ cost(i,j) · d[i,j,v,t]` over every link in the table,
/// every vehicle, and every stage.
pub fn build_objective(problem: &Problem, space: &VariableSpace, model: &mut Model) -> Result<()> {
    let mut expr = LinearExpr::new();
    for link in problem.links().iter() {
        for vehicle in problem.vehicles() {
            for stage in 1..=problem.num_stages() {
                let d = space.routing(link.from, link.to, vehicle.id(), stage)?;
                expr.add_term(d, link.cost);
            }
        }
    }
    model.set_minimize(expr);
    Ok(())
}
