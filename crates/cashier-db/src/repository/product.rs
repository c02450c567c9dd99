//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Paged listing with a case-insensitive name filter
//! - CRUD operations
//!
//! Every read joins the category so callers get `category_name` without a
//! second query:
//!
//! ```text
//! products p ──LEFT JOIN── categories c ON c.id = p.category_id
//!   id │ name       │ price_cents │ stock │ category_id │ category_name
//!    1 │ Smartphone │       69999 │    50 │           1 │ Electronics
//!    3 │ Gift card  │        2500 │   100 │        NULL │ NULL
//! ```
//!
//! Stock is only ever decremented by checkout; `update` replaces it
//! wholesale (restocking, corrections).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cashier_core::{NewProduct, Product, ProductQuery};

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price_cents,
        p.stock,
        p.category_id,
        c.name AS category_name,
        p.created_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let page = repo.list(&ProductQuery { name: Some("phone".into()), ..Default::default() }).await?;
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id.
    ///
    /// ## Filtering
    /// `query.name` matches anywhere in the product name, ignoring ASCII
    /// case. `%` and `_` in the filter are matched literally.
    pub async fn list(&self, query: &ProductQuery) -> DbResult<Vec<Product>> {
        let pattern = query.name.as_deref().map(like_pattern);
        debug!(name = ?query.name, page = query.page, limit = query.limit, "Listing products");

        let sql = format!(
            r#"{SELECT_PRODUCT}
            WHERE (?1 IS NULL OR p.name LIKE ?1 ESCAPE '\')
            ORDER BY p.id
            LIMIT ?2 OFFSET ?3
            "#
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Finds the first product with exactly this name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE p.name = ?1 ORDER BY p.id LIMIT 1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// The stored product, including its generated id and category name.
    ///
    /// ## Errors
    /// `ForeignKeyViolation` if `category_id` names no category.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, price_cents = product.price_cents, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price_cents, stock, category_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.category_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Replaces every mutable field of a product.
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(id, name = %product.name, stock = product.stock, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price_cents = ?3,
                stock = ?4,
                category_id = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Historical lines keep their snapshot and subtotal; their product
    /// reference becomes NULL.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use cashier_core::NewCategory;

    fn new_product(name: &str, category_id: Option<i64>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents: 1_000,
            stock: 5,
            category_id,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("phone"), "%phone%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[tokio::test]
    async fn test_crud_round() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .insert(&NewCategory {
                name: "Electronics".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let created = db
            .products()
            .insert(&new_product("Smartphone", Some(category.id)))
            .await
            .unwrap();
        assert_eq!(created.category_name.as_deref(), Some("Electronics"));

        let updated = db
            .products()
            .update(
                created.id,
                &NewProduct {
                    price_cents: 59_999,
                    stock: 12,
                    ..new_product("Smartphone X", None)
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Smartphone X");
        assert_eq!(updated.stock, 12);
        assert_eq!(updated.category_name, None);
        assert_eq!(updated.created_at, created.created_at);

        db.products().delete(created.id).await.unwrap();
        assert!(db.products().get_by_id(created.id).await.unwrap().is_none());
        assert!(db.products().delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .products()
            .update(42, &new_product("Nothing", None))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .products()
            .insert(&new_product("Orphan", Some(999)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for name in ["Smartphone", "Laptop", "Phone case", "Headphones", "Desk"] {
            db.products().insert(&new_product(name, None)).await.unwrap();
        }

        let phones = db
            .products()
            .list(&ProductQuery {
                name: Some("PHONE".to_string()),
                ..ProductQuery::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = phones.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Smartphone", "Phone case", "Headphones"]);

        let second_page = db
            .products()
            .list(&ProductQuery {
                name: None,
                page: 2,
                limit: 2,
            })
            .await
            .unwrap();
        let names: Vec<_> = second_page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Phone case", "Headphones"]);

        assert_eq!(db.products().count().await.unwrap(), 5);
    }
}
