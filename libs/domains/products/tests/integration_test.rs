//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Migrations produce the expected `products` table
//! - Decimal prices survive the round trip exactly
//! - Price filtering and ordering happen in SQL
//!
//! They need a Docker daemon: `cargo test -p domain_products -- --ignored`

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn input(builder: &TestDataBuilder, suffix: &str, cents: i64) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", suffix),
        price: builder.price(cents),
        stock: builder.stock(),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = input(&builder, "main", 9_999);
    let created = repo.create(input.clone()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, input.name);
    assert_decimal_eq(created.price, input.price, "created price");
    assert_eq!(created.stock, input.stock);
    assert_eq!(created.created_at, created.updated_at);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_eq!(retrieved.id, created.id);
    assert_decimal_eq(retrieved.price, Decimal::new(9_999, 2), "stored price");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_filters_in_sql_and_orders_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_filters");

    for (suffix, cents) in [("cheap", 5_000), ("mid", 10_000), ("dear", 15_000)] {
        repo.create(input(&builder, suffix, cents)).await.unwrap();
    }

    let all = repo.list(ProductFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|pair| pair[0].id > pair[1].id));

    let filtered = repo
        .list(ProductFilter {
            min_price: Some(Decimal::new(60, 0)),
            max_price: Some(Decimal::new(120, 0)),
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, builder.name("product", "mid"));

    // Bounds are inclusive
    let at_bound = repo
        .list(ProductFilter {
            min_price: Some(Decimal::new(150, 0)),
            max_price: None,
        })
        .await
        .unwrap();
    assert_eq!(at_bound.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_partial_update_touches_updated_at() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("partial_update");

    let created = repo.create(input(&builder, "main", 2_500)).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                stock: Some(created.stock + 1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.stock, created.stock + 1);
    assert_eq!(updated.name, created.name);
    assert_decimal_eq(updated.price, created.price, "price unchanged");
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unchanged_update_does_not_write() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unchanged_update");

    let created = repo.create(input(&builder, "main", 1_000)).await.unwrap();

    // 10 and 10.00 are the same price
    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                price: Some(Decimal::new(10, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.updated_at, created.updated_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let result = repo
        .update(
            404,
            UpdateProduct {
                stock: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ProductError::NotFound(404))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_is_permanent() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo.create(input(&builder, "main", 700)).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    assert!(!repo.delete(created.id).await.unwrap());

    // Ids come from a sequence and are not reused
    let next = repo.create(input(&builder, "next", 700)).await.unwrap();
    assert!(next.id > created.id);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_reports_missing_product() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    let result = service.get_product(12_345).await;
    assert!(matches!(result, Err(ProductError::NotFound(12_345))));

    let result = service.delete_product(12_345).await;
    assert!(matches!(result, Err(ProductError::NotFound(12_345))));
}
