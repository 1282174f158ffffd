//! HTTP client for the storefront catalog API (`/api/products`).
//!
//! Two layers: `fetch_*` methods return typed [`CatalogError`]s, while
//! `list_products`/`get_product` and friends log failures and degrade to an
//! empty result so page code never has to handle transport errors.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{AppConfig, Product, ProductQuery};

use crate::error::CatalogError;

/// Related products shown under a product page.
pub const DEFAULT_RELATED_LIMIT: u32 = 6;

/// Product ids pre-rendered ahead of time.
pub const DEFAULT_PRERENDER_LIMIT: u32 = 50;

/// Client for the catalog REST API.
///
/// Use [`CatalogClient::from_config`] in the binary and
/// [`CatalogClient::new`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url` (an `http(s)` origin, optionally
    /// with a path prefix).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidBaseUrl`] if `base_url` is not an `http(s)` URL.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        // A trailing slash makes later path joins append instead of replace.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the product collection matching `query`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] on HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`CatalogError::Http`] on network or TLS failure.
    /// - [`CatalogError::Deserialize`] if the body is not a JSON array.
    ///
    /// Elements that do not decode as a [`Product`] are logged and skipped;
    /// one bad record never empties the list.
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url(query)?;
        let records: Vec<serde_json::Value> = self.get_json(url, "product list").await?;
        Ok(decode_products(records))
    }

    /// Fetches one product. A 404 is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_products`], except that 404 is not an
    /// error.
    pub async fn fetch_product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        let url = self.product_url(id)?;
        match self.get_json(url, &format!("product {id}")).await {
            Ok(product) => Ok(Some(product)),
            Err(CatalogError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`CatalogClient::fetch_products`], but any failure is logged and
    /// yields an empty list.
    pub async fn list_products(&self, query: &ProductQuery) -> Vec<Product> {
        match self.fetch_products(query).await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                Vec::new()
            }
        }
    }

    /// Like [`CatalogClient::fetch_product`], but any failure is logged and
    /// yields `None`.
    pub async fn get_product(&self, id: &str) -> Option<Product> {
        match self.fetch_product(id).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "failed to load product");
                None
            }
        }
    }

    /// Up to `limit` other products from `category_id`.
    ///
    /// One extra product is requested so that dropping the current one
    /// still leaves a full row.
    pub async fn related_products(
        &self,
        category_id: &str,
        current_product_id: &str,
        limit: u32,
    ) -> Vec<Product> {
        let products = self.list_products(&related_query(category_id, limit)).await;
        select_related(products, current_product_id, limit)
    }

    /// Ids of the first `limit` products, for pre-rendering product pages.
    pub async fn product_ids(&self, limit: u32) -> Vec<String> {
        let query = ProductQuery::default().with_limit(limit);
        self.list_products(&query)
            .await
            .into_iter()
            .map(|p| p.id)
            .filter(|id| !id.is_empty())
            .collect()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, CatalogError> {
        tracing::debug!(%url, "catalog request");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// `{base}/api/products` with the query's non-default filters.
    fn products_url(&self, query: &ProductQuery) -> Result<Url, CatalogError> {
        let mut url = self.endpoint(&["api", "products"])?;
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in &pairs {
                serializer.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `{base}/api/products/{id}`, with `id` percent-encoded as one segment.
    fn product_url(&self, id: &str) -> Result<Url, CatalogError> {
        self.endpoint(&["api", "products", id])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Decodes each record on its own, dropping the ones that fail.
fn decode_products(records: Vec<serde_json::Value>) -> Vec<Product> {
    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let id = record
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned();
            match serde_json::from_value::<Product>(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(index, product_id = %id, error = %e, "skipping malformed product record");
                    None
                }
            }
        })
        .collect();
    if products.len() < total {
        tracing::debug!(kept = products.len(), total, "product list partially decoded");
    }
    products
}

/// Query for the related-products row: the category plus one spare slot.
#[must_use]
pub fn related_query(category_id: &str, limit: u32) -> ProductQuery {
    ProductQuery::in_category(category_id).with_limit(limit.saturating_add(1))
}

/// Drops the current product and keeps at most `limit` of the rest.
#[must_use]
pub fn select_related(mut products: Vec<Product>, current_product_id: &str, limit: u32) -> Vec<Product> {
    products.retain(|p| p.id != current_product_id);
    products.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    products
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
