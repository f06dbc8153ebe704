//! Travel costs between nodes.
//!
//! Provides the link cost table consumed by the objective and a seeded
//! generator for synthetic fixtures.

mod links;
mod random;

pub use links::{Link, LinkTable, FORBIDDEN_COST};
pub use random::random_links;
