//! Shared fixtures for integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;

use oraya_storefront::config::StorefrontConfig;
use oraya_storefront::db;

/// A migrated on-disk test database.
///
/// File-backed (WAL) rather than in-memory so concurrent connections see
/// the same database. The temp directory is dropped with this struct.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

#[allow(clippy::expect_used)]
pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}", dir.path().join("store.db").display());

    let pool = db::create_pool(&SecretString::from(url))
        .await
        .expect("create pool");
    db::MIGRATOR.run(&pool).await.expect("run migrations");

    TestDb { pool, _dir: dir }
}

/// Insert a product row directly.
#[allow(clippy::expect_used)]
pub async fn insert_product(pool: &SqlitePool, id: &str, name: &str, price: i64, stock: i64) {
    sqlx::query(
        r"
        INSERT INTO products (id, name, price, description, sku, image, stock)
        VALUES (?1, ?2, ?3, 'collier', ?1, '/img.jpg', ?4)
        ",
    )
    .bind(id)
    .bind(name)
    .bind(price)
    .bind(stock)
    .execute(pool)
    .await
    .expect("insert product");
}

/// Read a product's stock counter directly.
#[allow(clippy::expect_used)]
pub async fn stock_of(pool: &SqlitePool, id: &str) -> i64 {
    sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("read stock")
}

/// Count rows in the orders table.
#[allow(clippy::expect_used)]
pub async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("count orders")
}

/// A config good enough for tests (the pool is passed separately).
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        admin_password_hash: None,
        sentry_dsn: None,
    }
}
