//! Seeded synthetic link costs for fixtures.

use std::ops::Range;

use rand::Rng;

use super::{LinkTable, FORBIDDEN_COST};

/// Generates a symmetric link table with integer costs drawn from `range`.
///
/// Self-links carry [`FORBIDDEN_COST`]. The random source is passed in so
/// callers control seeding and independent fixtures never share a sequence.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_3lcvrp::distance::random_links;
///
/// let nodes = [1, 2, 3];
/// let a = random_links(&nodes, &mut StdRng::seed_from_u64(42), 5..100);
/// let b = random_links(&nodes, &mut StdRng::seed_from_u64(42), 5..100);
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 9);
/// assert!(a.is_symmetric(0.0));
/// ```
pub fn random_links<R: Rng + ?Sized>(nodes: &[usize], rng: &mut R, range: Range<u32>) -> LinkTable {
    let mut links = LinkTable::new();
    for (i, &a) in nodes.iter().enumerate() {
        links.set(a, a, FORBIDDEN_COST);
        for &b in &nodes[i + 1..] {
            let cost = rng.random_range(range.clone());
            links.set_symmetric(a, b, f64::from(cost));
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_costs_in_range() {
        let nodes: Vec<usize> = (1..=6).collect();
        let links = random_links(&nodes, &mut StdRng::seed_from_u64(7), 5..100);
        assert_eq!(links.len(), 36);
        for link in links.iter() {
            if link.from == link.to {
                assert_eq!(link.cost, FORBIDDEN_COST);
            } else {
                assert!((5.0..100.0).contains(&link.cost));
            }
        }
    }

    #[test]
    fn test_independent_seeds() {
        let nodes: Vec<usize> = (1..=20).collect();
        let a = random_links(&nodes, &mut StdRng::seed_from_u64(1), 5..100);
        let b = random_links(&nodes, &mut StdRng::seed_from_u64(2), 5..100);
        assert_ne!(a, b);
    }
}
