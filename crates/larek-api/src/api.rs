//! # Shop API Adapter
//!
//! Catalog and order calls on top of [`HttpClient`].
//!
//! ## Endpoints
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │  GET  /product        → {total, items: Product[]}  → Vec<Product>      │
//! │  GET  /product/{id}   → Product                                        │
//! │  POST /order          ← Order  → {id, total}       → OrderResult       │
//! │                                                                        │
//! │  Every returned Product has `image` rewritten to `cdn + image`.        │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tracing::{info, instrument};

use larek_core::{Order, OrderResult, Product, ProductList};

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::http::HttpClient;

/// Operations the storefront needs from the shop backend.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetches the full catalog.
    async fn get_product_list(&self) -> ApiResult<Vec<Product>>;

    /// Fetches one product by id.
    async fn get_product_item(&self, id: &str) -> ApiResult<Product>;

    /// Places an order.
    async fn order_products(&self, order: &Order) -> ApiResult<OrderResult>;
}

/// The real shop API.
#[derive(Debug, Clone)]
pub struct LarekApi {
    http: HttpClient,
    cdn: String,
}

impl LarekApi {
    /// Builds the adapter from an explicit CDN prefix and API base URL.
    pub fn new(cdn: &str, base_url: &str, config: &ApiConfig) -> ApiResult<Self> {
        Ok(LarekApi {
            http: HttpClient::new(base_url, config)?,
            cdn: cdn.to_string(),
        })
    }

    /// Builds the adapter from configuration.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;
        Self::new(&config.cdn_url(), &config.api_url(), config)
    }

    /// CDN prefix applied to image paths.
    pub fn cdn(&self) -> &str {
        &self.cdn
    }

    fn with_cdn_image(&self, mut product: Product) -> Product {
        product.image = format!("{}{}", self.cdn, product.image);
        product
    }
}

#[async_trait]
impl StoreApi for LarekApi {
    #[instrument(skip(self))]
    async fn get_product_list(&self) -> ApiResult<Vec<Product>> {
        let list: ProductList = self.http.get("/product").await?;
        info!(count = list.items.len(), "Catalog fetched");
        Ok(list
            .items
            .into_iter()
            .map(|item| self.with_cdn_image(item))
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_product_item(&self, id: &str) -> ApiResult<Product> {
        let item: Product = self.http.get(&format!("/product/{}", id)).await?;
        Ok(self.with_cdn_image(item))
    }

    #[instrument(skip(self, order), fields(items = order.items.len(), total = order.total.units()))]
    async fn order_products(&self, order: &Order) -> ApiResult<OrderResult> {
        let result: OrderResult = self.http.post("/order", order).await?;
        info!(order_id = %result.id, total = result.total.units(), "Order accepted");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_prefix() {
        let config = ApiConfig::with_origin("http://localhost:3000");
        let api = LarekApi::from_config(&config).unwrap();
        assert_eq!(api.cdn(), "http://localhost:3000/content/weblarek");

        let product = Product {
            image: "/Shell.svg".to_string(),
            ..Product::new("1", "Бэкенд-антистресс", None)
        };
        assert_eq!(
            api.with_cdn_image(product).image,
            "http://localhost:3000/content/weblarek/Shell.svg"
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_origin() {
        let config = ApiConfig::with_origin("localhost");
        assert!(LarekApi::from_config(&config).is_err());
    }
}
