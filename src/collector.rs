//! Adaptive partitioning of the price domain.
//!
//! The collector owns a work stack of pending ranges and the accumulated
//! result set. Each pending range is queried once; depending on the
//! server-reported total the range is discarded (empty or inverted),
//! accepted wholesale (total within the cap), or split at its midpoint into
//! two disjoint halves that go back on the stack. The stack is seeded with
//! the full domain and the run ends when it empties.
//!
//! Every split strictly shrinks range width, and a width-one range either
//! resolves or fails, so the run terminates for any finite domain.

use tracing::debug;
use tracing::info;

use crate::client::SearchProducts;
use crate::common::error::Error;
use crate::common::PriceRange;
use crate::common::Product;

/// Collects every product in the catalog by partitioning the price domain
/// into ranges whose totals fit the endpoint's per-query cap.
#[derive(Debug)]
pub struct Collector<C> {
    client: C,
    cap: u64,
}

impl<C: SearchProducts> Collector<C> {
    /// Create a collector driving `client` against an endpoint that returns
    /// at most `cap` products per query.
    pub fn new(client: C, cap: u64) -> Self {
        Self { client, cap }
    }

    /// Enumerate every product whose price lies in `domain`.
    ///
    /// Ranges are processed strictly one at a time and the collected set is
    /// returned only once the work stack is exhausted. The first query
    /// failure aborts the run and drops anything accumulated so far; a
    /// single price point whose total exceeds the cap cannot be narrowed
    /// further and fails the run with [`Error::UnresolvableRange`].
    pub async fn collect_all(&self, domain: PriceRange) -> Result<Vec<Product>, Error> {
        let mut pending = vec![domain];
        let mut products: Vec<Product> = Vec::new();

        info!(cap = self.cap, "collecting all products in {domain}");

        while let Some(range) = pending.pop() {
            // An inverted range matches nothing, and querying it would be
            // ambiguous upstream. Dropped without a request.
            if range.is_inverted() {
                debug!("discarding inverted range {range}");
                continue;
            }

            let page = self.client.search(range).await?;

            if page.total == 0 {
                debug!("discarding empty range {range}");
                continue;
            }

            if page.total <= self.cap {
                // The batch is the complete answer for this range. The
                // server-reported total is the contract here; the batch
                // length is not independently verified against it.
                debug!(total = page.total, "accepting range {range}");
                products.extend(page.products);
                continue;
            }

            if range.is_single_point() {
                // Over the cap with nothing left to split. Failing beats
                // silently losing the products at this price point.
                return Err(Error::UnresolvableRange {
                    value: range.low,
                    total: page.total,
                    cap: self.cap,
                });
            }

            // Over the cap: the returned batch is necessarily incomplete,
            // so none of it is kept. The upper half goes on the stack first
            // so the lower half is processed next.
            let (lower, upper) = range.split();
            debug!(total = page.total, "splitting range {range} at {}", lower.high);
            pending.push(upper);
            pending.push(lower);
        }

        info!(products = products.len(), "collection finished");
        Ok(products)
    }
}
