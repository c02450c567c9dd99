//! # Catalog Seeding
//!
//! Inserts a small starter catalog for development and demos.
//!
//! Entries are matched by exact name, so running the seeder twice leaves the
//! catalog unchanged and never resets stock that checkouts have consumed.

use cashier_core::{Money, NewCategory, NewProduct};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;

/// `(name, description)`
const CATEGORIES: &[(&str, &str)] = &[
    ("Electronics", "Gadgets and devices"),
    ("Clothing", "Apparel and accessories"),
    ("Food & Beverage", "Consumables"),
];

/// `(name, price, stock, category)`
const PRODUCTS: &[(&str, &str, i64, &str)] = &[
    ("Smartphone", "699.99", 50, "Electronics"),
    ("Laptop", "1299.99", 20, "Electronics"),
];

/// What a seeding run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub products_created: usize,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.categories_created == 0 && self.products_created == 0
    }
}

/// Inserts every missing starter category and product.
pub async fn seed_catalog(db: &Database) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();

    for &(name, description) in CATEGORIES {
        if db.categories().get_by_name(name).await?.is_some() {
            debug!(name, "Category already present");
            continue;
        }
        let category = NewCategory {
            name: name.to_string(),
            description: Some(description.to_string()),
        }
        .validated()?;
        db.categories().insert(&category).await?;
        report.categories_created += 1;
    }

    for &(name, price, stock, category_name) in PRODUCTS {
        if db.products().get_by_name(name).await?.is_some() {
            debug!(name, "Product already present");
            continue;
        }
        let category_id = db
            .categories()
            .get_by_name(category_name)
            .await?
            .map(|c| c.id);
        let product = NewProduct {
            name: name.to_string(),
            price_cents: Money::from_decimal_str(price)?.cents(),
            stock,
            category_id,
        }
        .validated()?;
        db.products().insert(&product).await?;
        report.products_created += 1;
    }

    info!(
        categories = report.categories_created,
        products = report.products_created,
        "Catalog seeded"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use cashier_core::{CheckoutItem, LockMode, ProductQuery};

    #[tokio::test]
    async fn test_seed_populates_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let report = seed_catalog(&db).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                categories_created: 3,
                products_created: 2,
            }
        );

        let phone = db.products().get_by_name("Smartphone").await.unwrap().unwrap();
        assert_eq!(phone.price_cents, 69_999);
        assert_eq!(phone.stock, 50);
        assert_eq!(phone.category_name.as_deref(), Some("Electronics"));

        let laptop = db.products().get_by_name("Laptop").await.unwrap().unwrap();
        assert_eq!(laptop.price_cents, 129_999);
        assert_eq!(laptop.stock, 20);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_catalog(&db).await.unwrap();

        let phone = db.products().get_by_name("Smartphone").await.unwrap().unwrap();
        db.checkout()
            .checkout(&[CheckoutItem::new(phone.id, 5)], LockMode::Pessimistic)
            .await
            .unwrap();

        let again = seed_catalog(&db).await.unwrap();
        assert!(again.is_noop());
        assert_eq!(db.categories().list().await.unwrap().len(), 3);
        assert_eq!(
            db.products().list(&ProductQuery::default()).await.unwrap().len(),
            2
        );
        let phone = db.products().get_by_id(phone.id).await.unwrap().unwrap();
        assert_eq!(phone.stock, 45);
    }
}
