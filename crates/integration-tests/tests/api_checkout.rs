//! Checkout flow: cart, addresses, order placement, and its failure modes.

use lamore_integration_tests::TestContext;
use serde_json::{Value, json};

async fn create_address(ctx: &TestContext) -> i64 {
    let address: Value = ctx
        .client
        .post(ctx.url("/api/addresses"))
        .json(&json!({
            "recipientName": "Maria Silva",
            "street": "Rua das Flores",
            "number": "123",
            "neighborhood": "Centro",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "01000-000",
            "isDefault": true,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    address["id"].as_i64().expect("address id")
}

async fn first_product(ctx: &TestContext) -> Value {
    let products: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    products.into_iter().next().expect("seeded product")
}

#[tokio::test]
#[ignore = "requires a running server and a seeded database"]
async fn cart_roundtrip() {
    let ctx = TestContext::new();
    let product = first_product(&ctx).await;
    let product_id = product["id"].as_i64().unwrap();

    let cart: Value = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({"productId": product_id, "quantity": 2}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["itemCount"], 2);
    assert_eq!(
        cart["subtotal"].as_i64().unwrap(),
        product["price"].as_i64().unwrap() * 2
    );

    // Adding the same product merges quantities
    let cart: Value = ctx
        .client
        .post(ctx.url("/api/cart/items"))
        .json(&json!({"productId": product_id, "quantity": 1}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["itemCount"], 3);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    // The wire format is the same shape the server stores in the session
    let lines: lamore_core::cart::Cart = serde_json::from_value(cart["items"].clone()).unwrap();
    assert_eq!(lines.item_count(), 3);

    // Zero quantity removes the line
    let cart: Value = ctx
        .client
        .patch(ctx.url(&format!("/api/cart/items/{product_id}")))
        .json(&json!({"quantity": 0}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["itemCount"], 0);
}

#[tokio::test]
#[ignore = "requires a running server and a seeded database"]
async fn only_one_default_address_survives() {
    let ctx = TestContext::new();
    let email = TestContext::unique_email("addresses");
    ctx.register(&email, "Maria Silva", "hunter2-hunter2").await;

    let first_id = create_address(&ctx).await;

    // A second default address demotes the first
    let second: Value = ctx
        .client
        .post(ctx.url("/api/addresses"))
        .json(&json!({
            "recipientName": "Maria Silva",
            "street": "Avenida Paulista",
            "number": "1000",
            "neighborhood": "Bela Vista",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "01310-100",
            "isDefault": true,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second_id = second["id"].as_i64().expect("address id");

    let addresses: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/addresses"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(addresses.len(), 2);
    let defaults: Vec<i64> = addresses
        .iter()
        .filter(|a| a["isDefault"] == true)
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(defaults, vec![second_id]);

    // Promoting the first via update demotes the second in turn
    let resp = ctx
        .client
        .put(ctx.url(&format!("/api/addresses/{first_id}")))
        .json(&json!({"isDefault": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let addresses: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/addresses"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let defaults: Vec<i64> = addresses
        .iter()
        .filter(|a| a["isDefault"] == true)
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(defaults, vec![first_id]);
}

#[tokio::test]
#[ignore = "requires a running server and a seeded database"]
async fn order_totals_and_stock_decrement() {
    let ctx = TestContext::new();
    let email = TestContext::unique_email("checkout");
    ctx.register(&email, "Maria Silva", "hunter2-hunter2").await;

    let address_id = create_address(&ctx).await;
    let product = first_product(&ctx).await;
    let product_id = product["id"].as_i64().unwrap();
    let price = product["price"].as_i64().unwrap();
    let stock_before = product["stock"].as_i64().unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/api/orders"))
        .json(&json!({
            "addressId": address_id,
            "paymentMethod": "pix",
            "items": [{"productId": product_id, "quantity": 2}],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let order: Value = resp.json().await.unwrap();
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"].as_i64().unwrap(), price * 2);
    assert_eq!(order["shippingFee"].as_i64().unwrap(), 1500);
    assert_eq!(order["total"].as_i64().unwrap(), price * 2 + 1500);

    // Stock dropped by exactly the purchased quantity
    let refreshed: Value = ctx
        .client
        .get(ctx.url(&format!("/api/products/{product_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(refreshed["stock"].as_i64().unwrap(), stock_before - 2);

    // Detail carries the line-item snapshot and the address
    let order_id = order["id"].as_i64().unwrap();
    let detail: Value = ctx
        .client
        .get(ctx.url(&format!("/api/orders/{order_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["productPrice"].as_i64().unwrap(), price);
    assert_eq!(detail["address"]["id"].as_i64().unwrap(), address_id);
}

#[tokio::test]
#[ignore = "requires a running server and a seeded database"]
async fn insufficient_stock_persists_nothing() {
    let ctx = TestContext::new();
    let email = TestContext::unique_email("checkout");
    ctx.register(&email, "Maria Silva", "hunter2-hunter2").await;

    let address_id = create_address(&ctx).await;
    let product = first_product(&ctx).await;
    let product_id = product["id"].as_i64().unwrap();
    let stock_before = product["stock"].as_i64().unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/api/orders"))
        .json(&json!({
            "addressId": address_id,
            "paymentMethod": "credit_card",
            "items": [{"productId": product_id, "quantity": stock_before + 1}],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let orders: Vec<Value> = ctx
        .client
        .get(ctx.url("/api/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(orders.is_empty(), "failed checkout must not persist an order");

    let refreshed: Value = ctx
        .client
        .get(ctx.url(&format!("/api/products/{product_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(refreshed["stock"].as_i64().unwrap(), stock_before);
}

#[tokio::test]
#[ignore = "requires a running server and a seeded database"]
async fn foreign_address_is_rejected() {
    // First user owns the address
    let owner = TestContext::new();
    let owner_email = TestContext::unique_email("owner");
    owner
        .register(&owner_email, "Owner", "hunter2-hunter2")
        .await;
    let address_id = create_address(&owner).await;

    // Second user tries to ship to it
    let intruder = TestContext::new();
    let intruder_email = TestContext::unique_email("intruder");
    intruder
        .register(&intruder_email, "Intruder", "hunter2-hunter2")
        .await;

    let product = first_product(&intruder).await;
    let resp = intruder
        .client
        .post(intruder.url("/api/orders"))
        .json(&json!({
            "addressId": address_id,
            "paymentMethod": "pix",
            "items": [{"productId": product["id"], "quantity": 1}],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    // And cannot read it either; visibility failures look like 404
    let resp = intruder
        .client
        .get(intruder.url(&format!("/api/addresses/{address_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
