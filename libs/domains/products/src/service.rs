use observability::ProductMetrics;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let _timer = ProductMetrics::start_timer("list");

        let products = self.repository.list(filter).await?;

        ProductMetrics::record_operation("list");
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        let _timer = ProductMetrics::start_timer("show");

        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        ProductMetrics::record_operation("show");
        Ok(product)
    }

    /// `NotFound` unless `id` exists. Records no operation metrics.
    #[instrument(skip(self))]
    pub async fn ensure_exists(&self, id: i64) -> ProductResult<()> {
        match self.repository.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::NotFound(id)),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let _timer = ProductMetrics::start_timer("create");

        if let Err(errors) = input.validate() {
            ProductMetrics::record_validation_failure("create", errors.field_errors().len());
            return Err(ProductError::Validation(errors));
        }

        let product = self.repository.create(input).await?;

        ProductMetrics::record_operation("create");
        Ok(product)
    }

    /// Partial update; an empty update returns the stored product unchanged
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let _timer = ProductMetrics::start_timer("update");

        if let Err(errors) = input.validate() {
            ProductMetrics::record_validation_failure("update", errors.field_errors().len());
            return Err(ProductError::Validation(errors));
        }

        let product = if input.is_empty() {
            self.repository
                .get_by_id(id)
                .await?
                .ok_or(ProductError::NotFound(id))?
        } else {
            self.repository.update(id, input).await?
        };

        ProductMetrics::record_operation("update");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let _timer = ProductMetrics::start_timer("delete");

        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        ProductMetrics::record_operation("delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn stored(id: i64) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: "Chair".to_string(),
            price: Decimal::new(4999, 2),
            stock: 4,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_create_rejects_long_name_without_touching_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(CreateProduct {
                name: "n".repeat(256),
                price: Decimal::ONE,
                stock: 1,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_update_reads_instead_of_writing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();
        mock_repo
            .expect_get_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(stored(id))));

        let service = ProductService::new(mock_repo);
        let product = service
            .update_product(7, UpdateProduct::default())
            .await
            .unwrap();

        assert_eq!(product.id, 7);
    }

    #[tokio::test]
    async fn test_update_passes_fields_to_repository() {
        let mut mock_repo = MockProductRepository::new();
        let update = UpdateProduct {
            stock: Some(9),
            ..Default::default()
        };
        mock_repo
            .expect_update()
            .with(eq(3), eq(update.clone()))
            .returning(|id, input| {
                let mut product = stored(id);
                product.apply_update(input);
                Ok(product)
            });

        let service = ProductService::new(mock_repo);
        let product = service.update_product(3, update).await.unwrap();

        assert_eq!(product.stock, 9);
        assert_eq!(product.name, "Chair");
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().with(eq(5)).returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(5).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_ensure_exists() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(stored(id))));
        mock_repo.expect_get_by_id().with(eq(2)).returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);

        assert!(service.ensure_exists(1).await.is_ok());
        assert!(matches!(
            service.ensure_exists(2).await,
            Err(ProductError::NotFound(2))
        ));
    }
}
