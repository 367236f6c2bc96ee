//! Top-level error type for the catalog harvester.

use reqwest::StatusCode;

/// Errors occurring while querying the search endpoint or partitioning the
/// price domain. None of these are retried or swallowed: the algorithm's
/// correctness depends on every query's reported total being trustworthy,
/// so the first failure aborts the whole collection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure reaching the search endpoint.
    #[error("network error reaching the search endpoint: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status code.
    #[error("search endpoint returned status code {0}")]
    HttpStatus(StatusCode),

    /// The response body did not decode into the expected
    /// `{total, count, products}` shape.
    #[error("could not decode the search response: {0}")]
    Decode(#[source] reqwest::Error),

    /// A single price point matches more products than the endpoint returns
    /// per query. Range filtering alone cannot enumerate these products; a
    /// secondary discriminating filter is needed.
    #[error("price point {value} matches {total} products, over the per-query cap of {cap}")]
    UnresolvableRange {
        /// The price point that cannot be narrowed any further.
        value: u64,
        /// Total matches the endpoint reported for that point.
        total: u64,
        /// The endpoint's per-query result cap.
        cap: u64,
    },
}
