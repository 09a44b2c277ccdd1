//! Integration tests for the order placement transaction.
//!
//! These exercise the real database path: guarded decrements, all-or-nothing
//! commits, and the last-unit race between concurrent checkouts.

#![allow(clippy::unwrap_used)]

mod common;

use oraya_core::{OrderStatus, Price, ProductId};
use oraya_storefront::db::RepositoryError;
use oraya_storefront::db::orders::OrderRepository;
use oraya_storefront::models::Cart;
use oraya_storefront::services::{CheckoutError, CheckoutService, CustomerDetails, DELIVERY_FEE};

use common::{insert_product, order_count, stock_of, test_db};

fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Ana".to_owned(),
        address: "Rue X".to_owned(),
        phone: "0612345678".to_owned(),
    }
}

fn cart_with(entries: &[(&str, i64)]) -> Cart {
    let mut cart = Cart::new();
    for (id, qty) in entries {
        cart.add(&ProductId::new(*id), *qty);
    }
    cart
}

#[tokio::test]
async fn place_order_decrements_stock_and_totals_with_delivery_fee() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;

    let cart = cart_with(&[("p1", 2)]);
    let order_id = CheckoutService::new(&db.pool)
        .place_order(&customer(), &cart)
        .await
        .unwrap();

    assert_eq!(stock_of(&db.pool, "p1").await, 8);

    let orders = OrderRepository::new(&db.pool).list_all().await.unwrap();
    assert_eq!(orders.len(), 1);

    let order = &orders[0];
    assert_eq!(order.id, order_id);
    assert_eq!(order.customer_name, "Ana");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Price::new(2 * 150) + DELIVERY_FEE);
    assert_eq!(order.total, Price::new(345));

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name, "Solaria");
    assert_eq!(order.items[0].unit_price, Price::new(150));
    assert_eq!(order.items[0].quantity, 2);
}

#[tokio::test]
async fn order_total_matches_line_items_across_products() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;
    insert_product(&db.pool, "p5", "Eclipsia", 189, 10).await;

    let cart = cart_with(&[("p5", 1), ("p1", 3)]);
    CheckoutService::new(&db.pool)
        .place_order(&customer(), &cart)
        .await
        .unwrap();

    let orders = OrderRepository::new(&db.pool).list_all().await.unwrap();
    let order = &orders[0];

    let line_sum: Price = order.items.iter().map(|i| i.unit_price * i.quantity).sum();
    assert_eq!(order.total, line_sum + DELIVERY_FEE);

    // Line items follow the cart's ascending product id order
    assert_eq!(order.items[0].product_id, ProductId::new("p1"));
    assert_eq!(order.items[1].product_id, ProductId::new("p5"));
}

#[tokio::test]
async fn empty_cart_is_rejected_without_side_effects() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;

    let result = CheckoutService::new(&db.pool)
        .place_order(&customer(), &Cart::new())
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert_eq!(stock_of(&db.pool, "p1").await, 10);
    assert_eq!(order_count(&db.pool).await, 0);
}

#[tokio::test]
async fn invalid_phone_is_rejected_before_touching_the_database() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;

    let details = CustomerDetails {
        phone: "12345".to_owned(),
        ..customer()
    };
    let result = CheckoutService::new(&db.pool)
        .place_order(&details, &cart_with(&[("p1", 1)]))
        .await;

    assert!(matches!(
        result,
        Err(CheckoutError::Validation { field: "phone", .. })
    ));
    assert_eq!(stock_of(&db.pool, "p1").await, 10);
    assert_eq!(order_count(&db.pool).await, 0);
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;
    let cart = cart_with(&[("p1", 1)]);
    let service = CheckoutService::new(&db.pool);

    for (field, details) in [
        (
            "name",
            CustomerDetails {
                name: "   ".to_owned(),
                ..customer()
            },
        ),
        (
            "address",
            CustomerDetails {
                address: String::new(),
                ..customer()
            },
        ),
        (
            "phone",
            CustomerDetails {
                phone: String::new(),
                ..customer()
            },
        ),
    ] {
        let result = service.place_order(&details, &cart).await;
        match result {
            Err(CheckoutError::Validation { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected validation error for {field}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn one_failing_line_rolls_back_every_decrement() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;
    insert_product(&db.pool, "p2", "Aurelia", 150, 3).await;

    // p1 passes, p2 fails: the p1 decrement must be rolled back
    let cart = cart_with(&[("p1", 2), ("p2", 5)]);
    let result = CheckoutService::new(&db.pool)
        .place_order(&customer(), &cart)
        .await;

    match result {
        Err(CheckoutError::InsufficientStock(id)) => assert_eq!(id, ProductId::new("p2")),
        other => panic!("expected insufficient stock, got {other:?}"),
    }

    assert_eq!(stock_of(&db.pool, "p1").await, 10);
    assert_eq!(stock_of(&db.pool, "p2").await, 3);
    assert_eq!(order_count(&db.pool).await, 0);
}

#[tokio::test]
async fn unknown_product_aborts_the_whole_order() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;

    let cart = cart_with(&[("p1", 1), ("p9", 1)]);
    let result = CheckoutService::new(&db.pool)
        .place_order(&customer(), &cart)
        .await;

    match result {
        Err(CheckoutError::UnknownProduct(id)) => assert_eq!(id, ProductId::new("p9")),
        other => panic!("expected unknown product, got {other:?}"),
    }

    assert_eq!(stock_of(&db.pool, "p1").await, 10);
    assert_eq!(order_count(&db.pool).await, 0);
}

#[tokio::test]
async fn concurrent_checkouts_for_the_last_unit_serialize() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 1).await;

    let spawn_checkout = |pool: sqlx::SqlitePool| {
        tokio::spawn(async move {
            CheckoutService::new(&pool)
                .place_order(&customer(), &cart_with(&[("p1", 1)]))
                .await
        })
    };

    let first = spawn_checkout(db.pool.clone());
    let second = spawn_checkout(db.pool.clone());

    let results = [first.await.unwrap(), second.await.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(CheckoutError::InsufficientStock(_))))
        .count();

    assert_eq!(successes, 1, "exactly one checkout must win: {results:?}");
    assert_eq!(conflicts, 1, "the loser must see a stock conflict: {results:?}");
    assert_eq!(stock_of(&db.pool, "p1").await, 0);
    assert_eq!(order_count(&db.pool).await, 1);
}

#[tokio::test]
async fn orders_list_newest_first_and_admin_updates() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 10).await;

    let service = CheckoutService::new(&db.pool);
    let first = service
        .place_order(&customer(), &cart_with(&[("p1", 1)]))
        .await
        .unwrap();
    let second = service
        .place_order(&customer(), &cart_with(&[("p1", 2)]))
        .await
        .unwrap();

    let repo = OrderRepository::new(&db.pool);
    let orders = repo.list_all().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second);
    assert_eq!(orders[1].id, first);

    // Status may jump to any value in the closed set
    repo.update_status(&first, OrderStatus::Delivered)
        .await
        .unwrap();
    repo.update_status(&first, OrderStatus::Pending).await.unwrap();

    let orders = repo.list_all().await.unwrap();
    assert_eq!(orders[1].status, OrderStatus::Pending);

    repo.delete(&second).await.unwrap();
    assert_eq!(order_count(&db.pool).await, 1);
}

#[tokio::test]
async fn update_status_on_unknown_order_is_not_found() {
    let db = test_db().await;

    let repo = OrderRepository::new(&db.pool);
    let missing = oraya_core::OrderId::new("does-not-exist");

    assert!(matches!(
        repo.update_status(&missing, OrderStatus::Shipped).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete(&missing).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn cart_service_rejects_overdraw_and_unknown_products() {
    let db = test_db().await;
    insert_product(&db.pool, "p1", "Solaria", 150, 0).await;
    insert_product(&db.pool, "p2", "Aurelia", 150, 3).await;

    let service = oraya_storefront::services::CartService::new(&db.pool);
    let mut cart = Cart::new();

    // Scenario C: zero stock, add one
    let result = service.add(&mut cart, &ProductId::new("p1"), 1).await;
    assert!(matches!(
        result,
        Err(oraya_storefront::services::CartError::InsufficientStock { .. })
    ));
    assert!(cart.is_empty(), "failed add must leave the cart unchanged");

    // Unknown product
    let result = service.add(&mut cart, &ProductId::new("p9"), 1).await;
    assert!(matches!(
        result,
        Err(oraya_storefront::services::CartError::UnknownProduct(_))
    ));

    // Cumulative check: 2 + 2 exceeds stock of 3
    assert_eq!(
        service.add(&mut cart, &ProductId::new("p2"), 2).await.unwrap(),
        2
    );
    let result = service.add(&mut cart, &ProductId::new("p2"), 2).await;
    assert!(matches!(
        result,
        Err(oraya_storefront::services::CartError::InsufficientStock { .. })
    ));
    assert_eq!(cart.quantity(&ProductId::new("p2")), 2);

    // Removal skips the stock check and drops the key at zero
    assert_eq!(
        service.add(&mut cart, &ProductId::new("p2"), -2).await.unwrap(),
        0
    );
    assert!(cart.is_empty());
}
