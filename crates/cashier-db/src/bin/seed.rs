//! # Seed Data Generator
//!
//! Loads the starter catalog into a database file.
//!
//! ## Usage
//! ```bash
//! # Seed ./cashier_dev.db (default)
//! cargo run -p cashier-db --bin seed
//!
//! # Specify database path
//! cargo run -p cashier-db --bin seed -- --db ./data/cashier.db
//! ```
//!
//! Safe to re-run: existing categories and products are left alone.

use std::env;

use cashier_db::seed::seed_catalog;
use cashier_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./cashier_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cashier Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./cashier_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other} (try --help)");
            }
        }
        i += 1;
    }

    println!("🌱 Cashier Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let report = seed_catalog(&db).await?;
    if report.is_noop() {
        println!("⚠ Catalog already seeded, nothing to do");
    } else {
        println!("✓ Categories created: {}", report.categories_created);
        println!("✓ Products created:   {}", report.products_created);
    }

    println!();
    println!("Catalog now holds {} products", db.products().count().await?);

    db.close().await;
    Ok(())
}
