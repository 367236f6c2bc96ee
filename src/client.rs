//! The query leaf of the harvester: one bounded search against the catalog
//! endpoint, reporting the server-side total plus a capped batch of matching
//! products.
//!
//! The module issues exactly one request per call. There is no caching and
//! no retrying here; every failure is mapped to an application error and
//! propagated unchanged so the collector's accept/split/discard decisions
//! stay error-free.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::common::error::Error;
use crate::common::PriceRange;
use crate::common::SearchResponse;

const PRODUCTS_PATH: &str = "/products";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A source of range-filtered product searches.
///
/// The one production implementation is [`ProductsClient`]; tests drive the
/// collector with in-memory fakes answering from a synthetic catalog.
pub trait SearchProducts {
    /// Count the products with a price in `range` and fetch up to the
    /// endpoint's per-query cap of them.
    fn search(
        &self,
        range: PriceRange,
    ) -> impl Future<Output = Result<SearchResponse, Error>> + Send;
}

/// HTTP client for the product search endpoint.
#[derive(Debug, Clone)]
pub struct ProductsClient {
    client: Client,
    base_url: String,
}

impl ProductsClient {
    /// Create a client for the search endpoint at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl SearchProducts for ProductsClient {
    /// Issue one GET with `minPrice`/`maxPrice` query parameters carrying the
    /// range bounds.
    async fn search(&self, range: PriceRange) -> Result<SearchResponse, Error> {
        let url = products_path(&self.base_url);
        debug!("querying products in {range}");

        let response = self
            .client
            .get(&url)
            .query(&[("minPrice", range.low), ("maxPrice", range.high)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status));
        }

        let page: SearchResponse = response.json().await.map_err(|error| {
            if error.is_decode() {
                Error::Decode(error)
            } else {
                Error::Transport(error)
            }
        })?;

        debug!(
            total = page.total,
            count = page.count,
            "search response for {range}"
        );
        Ok(page)
    }
}

fn products_path(base_url: &str) -> String {
    format!("{}{}", base_url, PRODUCTS_PATH)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use mockito::Server;
    use mockito::ServerGuard;

    use super::*;

    fn setup_client(server: &ServerGuard) -> ProductsClient {
        ProductsClient::new(Client::new(), server.url())
    }

    fn bounds_matcher(low: u64, high: u64) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("minPrice".into(), low.to_string()),
            Matcher::UrlEncoded("maxPrice".into(), high.to_string()),
        ])
    }

    #[tokio::test]
    async fn search_decodes_a_successful_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PRODUCTS_PATH)
            .match_query(bounds_matcher(0, 100))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 2, "count": 2, "products": [{"id": 1}, {"id": 2}]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = setup_client(&server);
        let page = client.search(PriceRange::new(0, 100)).await.unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.count, 2);
        assert_eq!(page.products.len(), 2);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_reports_totals_above_the_batch_size() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PRODUCTS_PATH)
            .match_query(bounds_matcher(0, 100_000))
            .with_status(200)
            .with_body(r#"{"total": 2500, "count": 1, "products": [{"id": 7}]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = setup_client(&server);
        let page = client.search(PriceRange::new(0, 100_000)).await.unwrap();

        assert_eq!(page.total, 2500);
        assert_eq!(page.products.len(), 1);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_maps_non_success_statuses() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PRODUCTS_PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = setup_client(&server);
        let result = client.search(PriceRange::new(0, 100)).await;

        assert!(matches!(
            result,
            Err(Error::HttpStatus(reqwest::StatusCode::SERVICE_UNAVAILABLE))
        ));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn search_maps_malformed_bodies_to_decode_errors() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PRODUCTS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"entries": []}"#)
            .expect(1)
            .create_async()
            .await;

        let client = setup_client(&server);
        let result = client.search(PriceRange::new(0, 100)).await;

        assert!(matches!(result, Err(Error::Decode(_))));

        mock.assert_async().await;
    }
}
