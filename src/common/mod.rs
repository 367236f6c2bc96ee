//! Core data model shared by the client and the collector.

use serde::Deserialize;
use serde::Serialize;

pub mod error;

/// An opaque product record. The harvester never inspects the contents;
/// whatever the endpoint returned is passed through untouched.
pub type Product = serde_json::Value;

/// A closed interval `[low, high]` over the price domain, used as a query
/// filter. Both bounds are inclusive. Ranges are plain values with no
/// identity beyond their bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    /// Inclusive lower bound.
    pub low: u64,
    /// Inclusive upper bound.
    pub high: u64,
}

impl PriceRange {
    /// Create a range over `[low, high]`. Inverted bounds are accepted here;
    /// the collector discards such ranges without querying them.
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Whether the bounds are inverted (`low > high`). An inverted range
    /// matches nothing and must not be sent to the endpoint.
    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Whether the range has collapsed to a single price point.
    pub fn is_single_point(&self) -> bool {
        self.low == self.high
    }

    /// Split at the midpoint into `([low, mid], [mid + 1, high])` where
    /// `mid = floor((low + high) / 2)`. The two halves cover the input
    /// exactly, with no overlap and no gap.
    ///
    /// Callers must not split a range that has already collapsed to a
    /// single point.
    pub fn split(self) -> (PriceRange, PriceRange) {
        debug_assert!(self.low < self.high);
        let mid = self.low + (self.high - self.low) / 2;
        (Self::new(self.low, mid), Self::new(mid + 1, self.high))
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// One page of search results, as returned by the endpoint for a single
/// range query.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Server-side count of all products matching the queried range. This is
    /// authoritative and may exceed `products.len()` when the range matches
    /// more than the endpoint's per-query cap.
    pub total: u64,
    /// Number of products in this response. Informational only; control flow
    /// never branches on it.
    pub count: u64,
    /// The batch of products the server chose to return, at most the
    /// endpoint's cap of them. No selection or ordering guarantee.
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use test_case::test_case;

    use super::*;

    #[test_case(0, 100_000 => ((0, 50_000), (50_001, 100_000)); "reference domain")]
    #[test_case(0, 1 => ((0, 0), (1, 1)); "adjacent points")]
    #[test_case(5, 6 => ((5, 5), (6, 6)); "adjacent points offset")]
    #[test_case(7, 9 => ((7, 8), (9, 9)); "odd width")]
    #[test_case(10, 20 => ((10, 15), (16, 20)); "even width")]
    fn splitting_a_range(low: u64, high: u64) -> ((u64, u64), (u64, u64)) {
        let (lower, upper) = PriceRange::new(low, high).split();
        ((lower.low, lower.high), (upper.low, upper.high))
    }

    #[test]
    fn split_partitions_exactly() {
        let mut rng = rand::thread_rng();

        for _ in 0..1000 {
            let low: u64 = rng.gen_range(0..1_000_000_000);
            let width: u64 = rng.gen_range(1..=1_000_000);
            let high = low + width;

            let (lower, upper) = PriceRange::new(low, high).split();
            let mid = lower.high;

            // The midpoint is floor((low + high) / 2) and lies strictly
            // below the upper bound.
            assert_eq!(mid as u128, (low as u128 + high as u128) / 2);
            assert!(low <= mid && mid < high);

            // The two halves partition the input: no overlap, no gap.
            assert_eq!(lower.low, low);
            assert_eq!(upper.high, high);
            assert_eq!(upper.low, mid + 1);
        }
    }

    #[test]
    fn range_classification() {
        assert!(PriceRange::new(10, 5).is_inverted());
        assert!(!PriceRange::new(5, 10).is_inverted());
        assert!(PriceRange::new(7, 7).is_single_point());
        assert!(!PriceRange::new(7, 8).is_single_point());
    }

    #[test]
    fn response_decodes_from_endpoint_shape() {
        let body = r#"{"total": 25, "count": 2, "products": [{"id": 1}, {"id": 2}]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.total, 25);
        assert_eq!(response.count, 2);
        assert_eq!(response.products.len(), 2);
    }
}
