use crate::catalog::{Product, ProductDraft};
use crate::event::AppEvent;
use std::sync::mpsc;
use tokio::runtime::Handle;
use tracing::{debug, warn};

mod error;

pub use error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tx: mpsc::Sender<AppEvent>) -> Result<Self, ApiError> {
        let runtime_handle =
            Handle::try_current().map_err(|err| ApiError::Runtime(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            tx,
            runtime_handle,
        })
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http
            .get(format!("{}/products", self.base_url))
            .send()
            .await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let response = self
            .http
            .get(format!("{}/products/categories", self.base_url))
            .send()
            .await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let response = self
            .http
            .post(format!("{}/products", self.base_url))
            .json(draft)
            .send()
            .await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    pub async fn update_product(&self, product: &Product) -> Result<(), ApiError> {
        let response = self
            .http
            .put(format!("{}/products/{}", self.base_url, product.id))
            .json(product)
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    // Startup fetches: two independent tasks, no ordering between them. Each
    // outcome comes back as exactly one event.
    pub fn spawn_initial_load(&self) {
        let client = self.clone();
        self.runtime_handle.spawn(async move {
            match client.list_products().await {
                Ok(products) => {
                    debug!(count = products.len(), "product fetch complete");
                    let _ = client.tx.send(AppEvent::ProductsLoaded(products));
                }
                Err(err) => {
                    warn!(%err, "product fetch failed");
                    let _ = client
                        .tx
                        .send(AppEvent::ProductsFailed(format!(
                            "Error fetching products: {err}"
                        )));
                }
            }
        });

        let client = self.clone();
        self.runtime_handle.spawn(async move {
            match client.list_categories().await {
                Ok(categories) => {
                    debug!(count = categories.len(), "category fetch complete");
                    let _ = client.tx.send(AppEvent::CategoriesLoaded(categories));
                }
                Err(err) => {
                    warn!(%err, "category fetch failed");
                    let _ = client
                        .tx
                        .send(AppEvent::CategoriesFailed(format!(
                            "Error fetching categories: {err}"
                        )));
                }
            }
        });
    }

    pub fn spawn_create(&self, draft: ProductDraft) {
        let client = self.clone();
        self.runtime_handle.spawn(async move {
            match client.create_product(&draft).await {
                Ok(product) => {
                    debug!(id = product.id, "product created");
                    let _ = client.tx.send(AppEvent::ProductCreated(product));
                }
                Err(err) => {
                    warn!(%err, "product create failed");
                    let _ = client
                        .tx
                        .send(AppEvent::CreateFailed(format!(
                            "Error adding product: {err}"
                        )));
                }
            }
        });
    }

    pub fn spawn_update(&self, product: Product) {
        let client = self.clone();
        self.runtime_handle.spawn(async move {
            let id = product.id;
            let title = product.title.clone();
            match client.update_product(&product).await {
                Ok(()) => {
                    debug!(id, "product updated");
                    let _ = client.tx.send(AppEvent::ProductUpdated { id, title });
                }
                Err(err) => {
                    warn!(id, %err, "product update failed");
                    let _ = client.tx.send(AppEvent::UpdateFailed {
                        id,
                        message: format!("Error updating product: {err}"),
                    });
                }
            }
        });
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(status))
    }
}
