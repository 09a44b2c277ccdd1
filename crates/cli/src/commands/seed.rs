//! Seed the database with the demo catalog.
//!
//! Inserts are idempotent (`INSERT OR IGNORE`), so re-running never
//! clobbers live stock counters.

use super::CliError;

/// The demo catalog: (id, name, price, description, sku, image, stock).
const PRODUCTS: &[(&str, &str, i64, &str, &str, &str, i64)] = &[
    ("p1", "Solaria", 150, "collier", "B001", "/o2.jpg", 10),
    ("p2", "Aurelia", 150, "collier", "T002", "/o3.jpg", 10),
    ("p3", "Bloom", 144, "collier", "S003", "/o4.jpg", 10),
    ("p4", "Fiora", 144, "collier", "C004", "/o5.jpg", 10),
    ("p5", "Eclipsia", 189, "gourmette", "H005", "/gour00.jpeg", 10),
    ("p6", "Lunaria", 189, "gourmette", "Z006", "/gour02.jpeg", 10),
];

/// Insert the demo products.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    for (id, name, price, description, sku, image, stock) in PRODUCTS {
        sqlx::query(
            r"
            INSERT OR IGNORE INTO products (id, name, price, description, sku, image, stock)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(sku)
        .bind(image)
        .bind(stock)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeded {} products", PRODUCTS.len());
    Ok(())
}
