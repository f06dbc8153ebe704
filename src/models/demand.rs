//! Per-customer box demand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Box-type → customer → count table.
///
/// Missing entries read as zero.
///
/// # Examples
///
/// ```
/// use u_3lcvrp::models::Demand;
///
/// let demand = Demand::new().with("box1", 2, 3).with("box1", 3, 1);
/// assert_eq!(demand.get("box1", 2), 3);
/// assert_eq!(demand.get("box1", 4), 0);
/// assert_eq!(demand.total_for_box("box1"), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demand {
    table: BTreeMap<String, BTreeMap<usize, u32>>,
}

impl Demand {
    /// Creates an empty demand table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the demand of `customer` for `box_type`.
    pub fn set(&mut self, box_type: impl Into<String>, customer: usize, count: u32) {
        self.table
            .entry(box_type.into())
            .or_default()
            .insert(customer, count);
    }

    /// Builder form of [`Demand::set`].
    pub fn with(mut self, box_type: impl Into<String>, customer: usize, count: u32) -> Self {
        self.set(box_type, customer, count);
        self
    }

    /// Count of `box_type` required at `customer`.
    pub fn get(&self, box_type: &str, customer: usize) -> u32 {
        self.table
            .get(box_type)
            .and_then(|per_customer| per_customer.get(&customer))
            .copied()
            .unwrap_or(0)
    }

    /// Total count of `box_type` across all customers.
    pub fn total_for_box(&self, box_type: &str) -> u64 {
        self.table
            .get(box_type)
            .map(|per_customer| per_customer.values().map(|&c| u64::from(c)).sum())
            .unwrap_or(0)
    }

    /// Iterates over `(box_type, customer, count)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize, u32)> + '_ {
        self.table.iter().flat_map(|(box_type, per_customer)| {
            per_customer
                .iter()
                .map(move |(&customer, &count)| (box_type.as_str(), customer, count))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reads_zero() {
        let d = Demand::new();
        assert_eq!(d.get("x", 1), 0);
        assert_eq!(d.total_for_box("x"), 0);
    }

    #[test]
    fn test_total_exceeds_u32() {
        let d = Demand::new().with("a", 2, u32::MAX).with("a", 3, 2);
        assert_eq!(d.total_for_box("a"), u64::from(u32::MAX) + 2);
    }

    #[test]
    fn test_entries() {
        let d = Demand::new().with("a", 2, 1).with("b", 3, 4);
        let entries: Vec<_> = d.entries().collect();
        assert_eq!(entries, vec![("a", 2, 1), ("b", 3, 4)]);
    }

    #[test]
    fn test_json_numeric_keys() {
        let d: Demand = serde_json::from_str(r#"{"box1": {"2": 3, "3": 1}}"#).expect("valid");
        assert_eq!(d.get("box1", 2), 3);
        assert_eq!(d.total_for_box("box1"), 4);
    }
}
