//! Black-box tests over the HTTP surface: the same router the binary
//! serves, bound to an ephemeral port and driven with a real client.

use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let app = timberledger_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: Value,
) -> (StatusCode, Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

/// Creates a supplier and an item, returning their ids.
async fn seed_supplier_and_item(client: &reqwest::Client, base: &str) -> (String, String) {
    let (status, supplier) = post_json(
        client,
        format!("{base}/suppliers"),
        json!({ "name": "Karelia Timber" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, item) = post_json(
        client,
        format!("{base}/items"),
        json!({ "name": "pine saw logs", "unit": "cubicmeters" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (
        supplier["id"].as_str().unwrap().to_string(),
        item["id"].as_str().unwrap().to_string(),
    )
}

/// Seeds available cash as an administrator loan.
async fn seed_cash(client: &reqwest::Client, base: &str, amount: i64) {
    let (status, _) = post_json(
        client,
        format!("{base}/loans"),
        json!({
            "from_administrator": true,
            "amount": amount,
            "description": "starting capital"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_endpoint_responds() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn full_order_lifecycle_over_http() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let client = reqwest::Client::new();

    let (supplier_id, item_id) = seed_supplier_and_item(&client, base).await;
    seed_cash(&client, base, 600_000).await;

    let (status, balance) = get_json(&client, format!("{base}/balance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["balance"].as_i64().unwrap(), 600_000);

    // Company-funded order: 100 m³ at $50/m³.
    let (status, order) = post_json(
        &client,
        format!("{base}/orders"),
        json!({
            "supplier_id": supplier_id,
            "item_id": item_id,
            "number": "ORD-100",
            "quantity": 100,
            "price_per_unit": 5_000,
            "company_funded": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "loan");
    assert_eq!(order["total_price"].as_i64().unwrap(), 500_000);
    let order_id = order["id"].as_str().unwrap().to_string();

    // The funding loan counts as cash until the order is paid out.
    let (_, balance) = get_json(&client, format!("{base}/balance")).await;
    assert_eq!(balance["balance"].as_i64().unwrap(), 1_100_000);

    let (status, order) = post_json(
        &client,
        format!("{base}/orders/{order_id}/pay-loan"),
        json!({ "containers": [{ "quantity": 100, "cost": 520_000 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "paid");
    assert_eq!(order["total_price"].as_i64().unwrap(), 520_000);

    let (_, balance) = get_json(&client, format!("{base}/balance")).await;
    assert_eq!(balance["balance"].as_i64().unwrap(), 580_000);

    let (status, order) = post_json(
        &client,
        format!("{base}/orders/{order_id}/pay-transportation"),
        json!({ "cost": 10_000, "container_indices": [1], "quantity": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "on_way");

    // Partial customs clearance: 40 of 100 m³ splits the order.
    let (status, body) = post_json(
        &client,
        format!("{base}/orders/{order_id}/pay-customs"),
        json!({ "cost": 20_000, "quantity": 40 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["status"], "on_way");
    assert_eq!(body["order"]["value"].as_i64().unwrap(), 60);
    let split = &body["split"];
    assert_eq!(split["status"], "warehouse");
    assert_eq!(split["value"].as_i64().unwrap(), 40);
    assert_eq!(split["number"], "ORD-100-1");
    let split_id = split["id"].as_str().unwrap().to_string();

    // Sell the cleared 40 m³ at $70/m³.
    let (status, sale) = post_json(
        &client,
        format!("{base}/orders/{split_id}/sell"),
        json!({ "quantity": 40, "unit_price": 7_000, "buyer": "Sawmill LLC" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["sale_price"].as_i64().unwrap(), 280_000);
    assert_eq!(sale["buyer"], "Sawmill LLC");

    let (status, order) = get_json(&client, format!("{base}/orders/{split_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "sold");

    // Every committed mutation left an audit entry.
    let (status, audit) = get_json(&client, format!("{base}/audit")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(audit["items"].as_array().unwrap().len() >= 6);
}

#[tokio::test]
async fn insufficient_funds_maps_to_unprocessable_entity() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let client = reqwest::Client::new();

    let (supplier_id, item_id) = seed_supplier_and_item(&client, base).await;
    seed_cash(&client, base, 1_000_000).await;

    let (status, body) = post_json(
        &client,
        format!("{base}/orders"),
        json!({
            "supplier_id": supplier_id,
            "item_id": item_id,
            "number": "ORD-1",
            "quantity": 120,
            "price_per_unit": 10_000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "insufficient_funds");

    // The guard aborted the whole transaction.
    let (_, balance) = get_json(&client, format!("{base}/balance")).await;
    assert_eq!(balance["balance"].as_i64().unwrap(), 1_000_000);
    let (_, orders) = get_json(&client, format!("{base}/orders")).await;
    assert!(orders["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_and_bad_input_map_to_4xx() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let client = reqwest::Client::new();

    let (status, body) = get_json(
        &client,
        format!("{base}/orders/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (supplier_id, item_id) = seed_supplier_and_item(&client, base).await;
    let (status, body) = post_json(
        &client,
        format!("{base}/orders"),
        json!({
            "supplier_id": supplier_id,
            "item_id": item_id,
            "number": "ORD-2",
            "quantity": -5,
            "price_per_unit": 1_000,
            "company_funded": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // A loan needs a lender.
    let (status, body) = post_json(
        &client,
        format!("{base}/loans"),
        json!({ "amount": 1_000 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn deciding_a_transfer_twice_conflicts() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let client = reqwest::Client::new();

    let (status, manager) = post_json(
        &client,
        format!("{base}/managers"),
        json!({ "name": "Oleg" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let manager_id = manager["id"].as_str().unwrap().to_string();

    let (status, transfer) = post_json(
        &client,
        format!("{base}/transfers"),
        json!({
            "manager_id": manager_id,
            "destination": { "kind": "company" },
            "amount": 5_000,
            "description": "returning proceeds"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(transfer["status"], "pending");
    let transfer_id = transfer["id"].as_str().unwrap().to_string();

    let approver = json!({ "approver": "00000000-0000-7000-8000-000000000001" });
    let (status, decided) = post_json(
        &client,
        format!("{base}/transfers/{transfer_id}/approve"),
        approver.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["status"], "approved");

    let (status, body) = post_json(
        &client,
        format!("{base}/transfers/{transfer_id}/reject"),
        approver,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn manager_stock_is_served_from_the_sub_ledger() {
    let srv = TestServer::spawn().await;
    let base = &srv.base_url;
    let client = reqwest::Client::new();

    let (supplier_id, item_id) = seed_supplier_and_item(&client, base).await;
    let (_, partner) = post_json(
        &client,
        format!("{base}/partners"),
        json!({ "name": "Oleg Petrov" }),
    )
    .await;
    let (_, manager) = post_json(
        &client,
        format!("{base}/managers"),
        json!({ "name": "Oleg", "partner_id": partner["id"] }),
    )
    .await;
    let manager_id = manager["id"].as_str().unwrap().to_string();

    // March a zero-cost order to the warehouse and sell it to the manager.
    let (_, order) = post_json(
        &client,
        format!("{base}/orders"),
        json!({
            "supplier_id": supplier_id,
            "item_id": item_id,
            "number": "ORD-3",
            "quantity": 10,
            "price_per_unit": 0,
            "company_funded": true
        }),
    )
    .await;
    let order_id = order["id"].as_str().unwrap().to_string();
    post_json(
        &client,
        format!("{base}/orders/{order_id}/pay-loan"),
        json!({ "containers": [{ "quantity": 10, "cost": 0 }] }),
    )
    .await;
    post_json(
        &client,
        format!("{base}/orders/{order_id}/pay-transportation"),
        json!({ "cost": 0, "container_indices": [1], "quantity": 10 }),
    )
    .await;
    post_json(
        &client,
        format!("{base}/orders/{order_id}/pay-customs"),
        json!({ "cost": 0 }),
    )
    .await;
    let (status, sale) = post_json(
        &client,
        format!("{base}/orders/{order_id}/sell"),
        json!({
            "quantity": 10,
            "unit_price": 0,
            "buyer": "ignored",
            "manager_id": manager_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // The sale carries the manager's display name as the buyer.
    assert_eq!(sale["buyer"], "Oleg");

    let (_, stock) = get_json(&client, format!("{base}/managers/{manager_id}/stock")).await;
    assert_eq!(stock["available_stock"].as_i64().unwrap(), 10);

    let (status, resale) = post_json(
        &client,
        format!("{base}/managers/{manager_id}/resales"),
        json!({
            "sale_id": sale["id"],
            "quantity": 6,
            "unit_price": 1_500,
            "buyer": "Sawmill LLC"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resale["sale_price"].as_i64().unwrap(), 9_000);

    let (_, stock) = get_json(&client, format!("{base}/managers/{manager_id}/stock")).await;
    assert_eq!(stock["available_stock"].as_i64().unwrap(), 4);
}
