use async_trait::async_trait;
use backoffice_application::ProductCatalog;
use backoffice_core::AppResult;
use backoffice_domain::{Product, RecordStatus};
use tokio::sync::RwLock;

/// In-memory product list backing purchase order forms.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductCatalog {
    /// Creates a catalog seeded with products of any status.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Adds a product to the catalog.
    pub async fn add(&self, product: Product) {
        self.products.write().await.push(product);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn list_active_products(&self) -> AppResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .filter(|product| product.status == RecordStatus::Active)
            .cloned()
            .collect())
    }
}
