use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
///
/// Implemented by [`PgProductRepository`](crate::PgProductRepository) and by
/// [`InMemoryProductRepository`] for tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its assigned id and timestamps
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products within the filter's price bounds, newest id first
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Apply the supplied fields. Writes nothing when no value changes.
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns `false` when no product had this id
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        // Like a sequence, ids keep increasing after deletes
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product::new(id, input);
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        if product.apply_update(input) {
            tracing::info!(product_id = id, "Updated product");
        }

        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn input(name: &str, price: i64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: Decimal::new(price, 0),
            stock: 1,
        }
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(input("a", 1)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        let second = repo.create(input("b", 1)).await.unwrap();

        assert!(second.id > first.id);
        assert!(repo.get_by_id(first.id).await.unwrap().is_none());
        assert!(!repo.delete(first.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_by_id_desc() {
        let repo = InMemoryProductRepository::new();
        for price in [50, 100, 150] {
            repo.create(input("p", price)).await.unwrap();
        }

        let all = repo.list(ProductFilter::default()).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let filtered = repo
            .list(ProductFilter {
                min_price: Some(Decimal::new(60, 0)),
                max_price: Some(Decimal::new(120, 0)),
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].price, Decimal::new(100, 0));

        let inverted = repo
            .list(ProductFilter {
                min_price: Some(Decimal::new(120, 0)),
                max_price: Some(Decimal::new(60, 0)),
            })
            .await
            .unwrap();
        assert!(inverted.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();
        let result = repo.update(9, UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(9))));
    }
}
