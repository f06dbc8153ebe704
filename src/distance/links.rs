//! Link cost table keyed by ordered node pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cost placed on self-links so the model never selects them.
///
/// Finite because the objective must stay linear.
pub const FORBIDDEN_COST: f64 = 9999.0;

/// A directed link with its travel cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Origin node.
    pub from: usize,
    /// Destination node.
    pub to: usize,
    /// Travel cost.
    pub cost: f64,
}

/// Travel costs for ordered node pairs.
///
/// Nodes are addressed by their ids, not by position. Iteration follows
/// `(from, to)` order so models built from the same table are identical.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::distance::{LinkTable, FORBIDDEN_COST};
///
/// let links = LinkTable::new()
///     .with_symmetric(1, 2, 10.0)
///     .with_forbidden_self_links(&[1, 2], FORBIDDEN_COST);
/// assert_eq!(links.get(2, 1), Some(10.0));
/// assert_eq!(links.get(1, 1), Some(FORBIDDEN_COST));
/// assert_eq!(links.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Link>", into = "Vec<Link>")]
pub struct LinkTable {
    costs: BTreeMap<(usize, usize), f64>,
}

impl LinkTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cost of link `from → to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.costs.insert((from, to), cost);
    }

    /// Sets both `a → b` and `b → a`.
    pub fn set_symmetric(&mut self, a: usize, b: usize, cost: f64) {
        self.set(a, b, cost);
        self.set(b, a, cost);
    }

    /// Builder form of [`LinkTable::set`].
    pub fn with(mut self, from: usize, to: usize, cost: f64) -> Self {
        self.set(from, to, cost);
        self
    }

    /// Builder form of [`LinkTable::set_symmetric`].
    pub fn with_symmetric(mut self, a: usize, b: usize, cost: f64) -> Self {
        self.set_symmetric(a, b, cost);
        self
    }

    /// Adds a self-link carrying `cost` for every node.
    pub fn with_forbidden_self_links(mut self, nodes: &[usize], cost: f64) -> Self {
        for &n in nodes {
            self.set(n, n, cost);
        }
        self
    }

    /// Cost of link `from → to`, if present.
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.costs.get(&(from, to)).copied()
    }

    /// Returns `true` if link `from → to` is present.
    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.costs.contains_key(&(from, to))
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns `true` if the table has no links.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Iterates over links in `(from, to)` order.
    pub fn iter(&self) -> impl Iterator<Item = Link> + '_ {
        self.costs
            .iter()
            .map(|(&(from, to), &cost)| Link { from, to, cost })
    }

    /// Returns `true` if every link with a present reverse has the same cost
    /// within `tol`, and every link has a reverse.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.costs.iter().all(|(&(from, to), &cost)| {
            self.get(to, from)
                .is_some_and(|reverse| (reverse - cost).abs() <= tol)
        })
    }
}

impl From<Vec<Link>> for LinkTable {
    fn from(links: Vec<Link>) -> Self {
        let mut table = LinkTable::new();
        for link in links {
            table.set(link.from, link.to, link.cost);
        }
        table
    }
}

impl From<LinkTable> for Vec<Link> {
    fn from(table: LinkTable) -> Self {
        table.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut t = LinkTable::new();
        t.set(1, 2, 7.5);
        assert_eq!(t.get(1, 2), Some(7.5));
        assert_eq!(t.get(2, 1), None);
        assert!(t.contains(1, 2));
    }

    #[test]
    fn test_symmetric() {
        let t = LinkTable::new().with_symmetric(1, 2, 10.0).with_symmetric(2, 3, 5.0);
        assert!(t.is_symmetric(1e-10));

        let t = t.with(1, 2, 11.0);
        assert!(!t.is_symmetric(1e-10));
    }

    #[test]
    fn test_missing_reverse_not_symmetric() {
        let t = LinkTable::new().with(1, 2, 1.0);
        assert!(!t.is_symmetric(1e-10));
    }

    #[test]
    fn test_iter_order() {
        let t = LinkTable::new().with(2, 1, 3.0).with(1, 2, 4.0);
        let pairs: Vec<_> = t.iter().map(|l| (l.from, l.to)).collect();
        assert_eq!(pairs, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn test_json_list() {
        let t: LinkTable = serde_json::from_str(
            r#"[{"from":1,"to":2,"cost":10.0},{"from":2,"to":1,"cost":10.0}]"#,
        )
        .expect("valid");
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(2, 1), Some(10.0));
    }
}
