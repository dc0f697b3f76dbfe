//! # HTTP Catalog
//!
//! [`HttpCatalog`] speaks the catalog's JSON protocol over HTTP:
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | list      | GET    | `/products` |
//! | create    | POST   | `/products` |
//! | update    | PUT    | `/products/{id}` |
//! | delete    | DELETE | `/products/{id}` |
//!
//! Every response is checked for a success status before its body is looked at,
//! and bodies are validated against the [`Product`] schema before they are
//! handed back.

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Collection segment appended to the base URL.
pub const PRODUCTS_PATH: &str = "products";

/// Catalog client backed by `reqwest`.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base: Url,
}

impl HttpCatalog {
    /// Builds a client for the catalog rooted at `base`.
    ///
    /// `timeout` bounds each request from connect to the end of the body.
    pub fn new(base: Url, timeout: Duration) -> CatalogResult<Self> {
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidEndpoint(base.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/products`
    pub fn collection_url(&self) -> CatalogResult<Url> {
        self.endpoint(None)
    }

    /// `{base}/products/{id}`, with `id` percent-encoded as a single segment.
    pub fn item_url(&self, id: &ProductId) -> CatalogResult<Url> {
        self.endpoint(Some(id))
    }

    fn endpoint(&self, id: Option<&ProductId>) -> CatalogResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CatalogError::InvalidEndpoint(self.base.to_string()))?;
            segments.pop_if_empty().push(PRODUCTS_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let url = self.collection_url()?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(transport)?;
        let body = read_body(check_status(response).await?).await?;
        decode_products(&body)
    }

    #[instrument(skip(self, draft), fields(id = %draft.id))]
    async fn create(&self, draft: &ProductDraft) -> CatalogResult<Product> {
        let url = self.collection_url()?;
        debug!(%url, ?draft, "POST");
        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(check_status(response).await?).await?;
        decode_product(&body)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> CatalogResult<Product> {
        let url = self.item_url(id)?;
        debug!(%url, ?draft, "PUT");
        let response = self
            .client
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(check_status(response).await?).await?;
        decode_product(&body)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> CatalogResult<()> {
        let url = self.item_url(id)?;
        debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await.map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> CatalogError {
    CatalogError::Transport(e.to_string())
}

/// Turns any non-2xx answer into [`CatalogError::Service`] without decoding it.
async fn check_status(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %body, "Catalog rejected request");
    Err(CatalogError::Service {
        status: status.as_u16(),
        body,
    })
}

async fn read_body(response: Response) -> CatalogResult<Vec<u8>> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(transport)
}

/// Parses a single product and checks it against the schema.
pub fn decode_product(body: &[u8]) -> CatalogResult<Product> {
    let product: Product =
        serde_json::from_slice(body).map_err(|e| CatalogError::Decode(e.to_string()))?;
    product.validate().map_err(CatalogError::Decode)?;
    Ok(product)
}

/// Parses a product array; one invalid element rejects the whole list.
pub fn decode_products(body: &[u8]) -> CatalogResult<Vec<Product>> {
    let products: Vec<Product> =
        serde_json::from_slice(body).map_err(|e| CatalogError::Decode(e.to_string()))?;
    for (index, product) in products.iter().enumerate() {
        product
            .validate()
            .map_err(|e| CatalogError::Decode(format!("element {index}: {e}")))?;
    }
    Ok(products)
}
