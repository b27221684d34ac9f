//! Gateway tests against an in-process stub of the back-office API
//!
//! The stub answers canned JSON per (method, path) and records every request
//! it receives, so tests can assert exactly what the dashboard sent upstream.
//! A route registered with a query string only answers that exact query.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use rbo_backend::{create_app, AppState, Config};
use serde_json::{json, Value};

const TOKEN: &str = "staff-token-1";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    token: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Stub {
    routes: Arc<HashMap<(Method, String), (u16, Value)>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

async fn answer(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let path = uri.path().to_string();
    stub.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        token: headers
            .get("token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let exact = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let route = stub
        .routes
        .get(&(method.clone(), exact))
        .or_else(|| stub.routes.get(&(method.clone(), path.clone())));

    match route {
        Some((status, value)) => (
            StatusCode::from_u16(*status).unwrap(),
            Json(value.clone()),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("no stub for {} {}", method, path) })),
        ),
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

/// Start the stub API and the dashboard in front of it
async fn start(routes: Vec<(Method, &str, u16, Value)>) -> (Stub, String) {
    let stub = Stub {
        routes: Arc::new(
            routes
                .into_iter()
                .map(|(m, p, s, v)| ((m, p.to_string()), (s, v)))
                .collect(),
        ),
        requests: Arc::default(),
    };
    let upstream = serve(Router::new().fallback(answer).with_state(stub.clone())).await;

    let config = Config::for_api(format!("http://{}/api", upstream));
    let state = AppState::new(config).expect("app state");
    let dashboard = serve(create_app(state)).await;
    (stub, format!("http://{}/api/v1", dashboard))
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn cancel_issues_exactly_one_put() {
    let (stub, base) = start(vec![
        (
            Method::GET,
            "/api/order/o1",
            200,
            json!({"_id": "o1", "OrderNumber": 12, "status": "preparing", "items": []}),
        ),
        (
            Method::PUT,
            "/api/order/o1",
            200,
            json!({"message": "Order cancelled"}),
        ),
    ])
    .await;

    let response = client()
        .post(format!("{}/orders/o1/cancel", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let puts: Vec<Recorded> = stub
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::PUT)
        .collect();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, "/api/order/o1");
    assert_eq!(puts[0].body, json!({"status": "cancelled"}));
    assert_eq!(puts[0].token.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn cancelling_a_completed_order_never_reaches_the_api() {
    let (stub, base) = start(vec![(
        Method::GET,
        "/api/order/o2",
        200,
        json!({"data": {"_id": "o2", "OrderNumber": 13, "status": "completed"}}),
    )])
    .await;

    let response = client()
        .post(format!("{}/orders/o2/cancel", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_STATE_TRANSITION");
    assert_eq!(stub.count(Method::PUT, "/api/order/o2"), 0);
}

#[tokio::test]
async fn item_advance_defaults_to_next_step() {
    let (stub, base) = start(vec![
        (
            Method::GET,
            "/api/order/o3",
            200,
            json!({
                "_id": "o3",
                "OrderNumber": 14,
                "status": "preparing",
                "items": [{"_id": "line1", "product": {"_id": "p1", "name": "Soup"}, "quantity": 2, "innerStatus": "preparing"}]
            }),
        ),
        (
            Method::PATCH,
            "/api/order/o3/item/line1/status",
            200,
            json!({"message": "updated"}),
        ),
    ])
    .await;

    let response = client()
        .patch(format!("{}/orders/o3/items/line1/status", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let patch = stub
        .requests()
        .into_iter()
        .find(|r| r.method == Method::PATCH)
        .unwrap();
    assert_eq!(patch.body, json!({"innerStatus": "ready"}));
}

// ============================================================================
// Inventory
// ============================================================================

#[tokio::test]
async fn inventory_rows_carry_status_badges() {
    let (_stub, base) = start(vec![(
        Method::GET,
        "/api/inventory",
        200,
        json!({
            "data": [
                {"_id": "i1", "productName": "Flour", "quantity": 40, "status": "in-stock", "totalValue": 80},
                {"_id": "i2", "productName": "Eggs", "quantity": 3, "status": "low-stock", "totalValue": 6},
                {"_id": "i3", "productName": "Basil", "quantity": 0, "status": "out-of-stock", "totalValue": 0}
            ],
            "pagination": {"page": 1, "limit": 10, "total": 3, "totalPages": 1}
        }),
    )])
    .await;

    let body: Value = client()
        .get(format!("{}/inventory", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let badges: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| {
            (
                r["badge"]["label"].as_str().unwrap(),
                r["badge"]["tone"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        badges,
        vec![
            ("In stock", "success"),
            ("Low stock", "warning"),
            ("Out of stock", "danger")
        ]
    );
    assert_eq!(body["summary"]["lowStock"], 1);
    assert_eq!(body["summary"]["outOfStock"], 1);
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn transfer_over_available_issues_no_post() {
    let (stub, base) = start(vec![
        (
            Method::GET,
            "/api/inventory/inv1",
            200,
            json!({"data": {"_id": "inv1", "productName": "Rice", "quantity": 5, "status": "low-stock"}}),
        ),
        (
            Method::POST,
            "/api/sub-inventory/transfer",
            201,
            json!({"message": "Transfer completed"}),
        ),
    ])
    .await;

    let response = client()
        .post(format!("{}/sub-inventory/transfers", base))
        .header("token", TOKEN)
        .json(&json!({"mainInventoryId": "inv1", "kitchenId": "k1", "quantity": 6}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INSUFFICIENT_INVENTORY");
    assert_eq!(
        body["error"]["message"],
        "Quantity exceeds available stock (5 available)"
    );
    assert_eq!(stub.count(Method::POST, "/api/sub-inventory/transfer"), 0);

    let response = client()
        .post(format!("{}/sub-inventory/transfers", base))
        .header("token", TOKEN)
        .json(&json!({"mainInventoryId": "inv1", "kitchenId": "k1", "quantity": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(stub.count(Method::POST, "/api/sub-inventory/transfer"), 1);
    // Stock is re-read for every transfer, never served from the cache
    assert_eq!(stub.count(Method::GET, "/api/inventory/inv1"), 2);
}

// ============================================================================
// Errors and caching
// ============================================================================

#[tokio::test]
async fn upstream_message_is_surfaced() {
    let (_stub, base) = start(vec![(
        Method::POST,
        "/api/supplier",
        400,
        json!({"message": "Supplier code already exists"}),
    )])
    .await;

    let response = client()
        .post(format!("{}/suppliers", base))
        .header("token", TOKEN)
        .json(&json!({
            "name": "Green Farms",
            "type": "vegetables",
            "code": "GF-01",
            "email": "orders@greenfarms.example"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Supplier code already exists");
}

#[tokio::test]
async fn invalid_supplier_code_is_rejected_before_the_api() {
    let (stub, base) = start(vec![]).await;

    let response = client()
        .post(format!("{}/suppliers", base))
        .header("token", TOKEN)
        .json(&json!({
            "name": "Green Farms",
            "type": "vegetables",
            "code": "gf",
            "email": "orders@greenfarms.example"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["field"], "code");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let (stub, base) = start(vec![]).await;

    let response = client().get(format!("{}/inventory", base)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 401);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn mutation_invalidates_cached_reads() {
    let (stub, base) = start(vec![
        (
            Method::GET,
            "/api/supplier",
            200,
            json!([{"_id": "s1", "name": "Green Farms", "status": "active"}]),
        ),
        (
            Method::DELETE,
            "/api/supplier/s1",
            200,
            json!({"message": "deleted"}),
        ),
    ])
    .await;

    for _ in 0..2 {
        let response = client()
            .get(format!("{}/suppliers", base))
            .header("token", TOKEN)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }
    assert_eq!(stub.count(Method::GET, "/api/supplier"), 1);

    client()
        .delete(format!("{}/suppliers/s1", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    client()
        .get(format!("{}/suppliers", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(stub.count(Method::GET, "/api/supplier"), 2);
}

#[tokio::test]
async fn order_report_exports_csv() {
    let (_stub, base) = start(vec![(
        Method::GET,
        "/api/order/report",
        200,
        json!({"data": [
            {"_id": "o1", "OrderNumber": 1, "orderType": "takeaway", "status": "completed", "paymentStatus": "paid", "totalPrice": 18.5,
             "createdAt": "2024-05-01T10:00:00Z", "items": [{"_id": "l1", "product": "p1", "quantity": 2}]}
        ]}),
    )])
    .await;

    let response = client()
        .get(format!("{}/reports/orders?format=csv", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/csv")
    );
    let csv = response.text().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "orderNumber,createdAt,orderType,status,payment,items,totalPrice");
    assert_eq!(lines[1], "1,2024-05-01 10:00,takeaway,completed,Paid,2,18.5");
}

// ============================================================================
// Order actions
// ============================================================================

fn order_body(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "OrderNumber": 21,
        "status": status,
        "items": [{"_id": "line1", "product": "p1", "quantity": 1, "innerStatus": "pending"}]
    })
}

#[tokio::test]
async fn unknown_item_target_sends_no_patch() {
    let (stub, base) = start(vec![
        (Method::GET, "/api/order/o3", 200, order_body("o3", "pending")),
        (
            Method::PATCH,
            "/api/order/o3/item/line1/status",
            200,
            json!({"message": "updated"}),
        ),
    ])
    .await;
    let url = format!("{}/orders/o3/items/line1/status", base);

    let response = client()
        .patch(&url)
        .header("token", TOKEN)
        .json(&json!({"innerStatus": "redy"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let response = client()
        .patch(&url)
        .header("token", TOKEN)
        .header("content-type", "application/json")
        .body("{\"innerStatus\":")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(stub.count(Method::PATCH, "/api/order/o3/item/line1/status"), 0);

    // An explicit target may skip ahead
    let response = client()
        .patch(&url)
        .header("token", TOKEN)
        .json(&json!({"innerStatus": "ready"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let patches: Vec<Recorded> = stub
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::PATCH)
        .collect();
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].body, json!({"innerStatus": "ready"}));
}

#[tokio::test]
async fn checkout_validates_body_and_order_state() {
    let (stub, base) = start(vec![
        (Method::GET, "/api/order/o4", 200, order_body("o4", "ready")),
        (Method::GET, "/api/order/o5", 200, order_body("o5", "completed")),
        (
            Method::POST,
            "/api/order/o4/checkout",
            200,
            json!({"message": "checked out"}),
        ),
    ])
    .await;

    let response = client()
        .post(format!("{}/orders/o4/checkout", base))
        .header("token", TOKEN)
        .header("content-type", "application/json")
        .body("{\"paidAmount\": twenty}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(stub.count(Method::POST, "/api/order/o4/checkout"), 0);

    let response = client()
        .post(format!("{}/orders/o5/checkout", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(stub.count(Method::POST, "/api/order/o5/checkout"), 0);

    let response = client()
        .post(format!("{}/orders/o4/checkout", base))
        .header("token", TOKEN)
        .json(&json!({"paymentMethod": "cash", "paidAmount": 20}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let post = stub
        .requests()
        .into_iter()
        .find(|r| r.method == Method::POST)
        .unwrap();
    assert_eq!(post.path, "/api/order/o4/checkout");
    assert_eq!(post.body["paymentMethod"], "cash");
    assert_eq!(post.body["paidAmount"].as_f64(), Some(20.0));
}

#[tokio::test]
async fn status_changes_follow_the_order_workflow() {
    let (stub, base) = start(vec![
        (Method::GET, "/api/order/o6", 200, order_body("o6", "preparing")),
        (
            Method::PATCH,
            "/api/order/o6/status",
            200,
            json!({"message": "updated"}),
        ),
        (Method::PUT, "/api/order/o6", 200, json!({"message": "cancelled"})),
    ])
    .await;
    let url = format!("{}/orders/o6/status", base);

    let response = client()
        .patch(&url)
        .header("token", TOKEN)
        .json(&json!({"status": "ready"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client()
        .patch(&url)
        .header("token", TOKEN)
        .json(&json!({"status": "completed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_STATE_TRANSITION");

    let response = client()
        .patch(&url)
        .header("token", TOKEN)
        .json(&json!({"status": "cancelled"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let writes: Vec<Recorded> = stub
        .requests()
        .into_iter()
        .filter(|r| r.method != Method::GET)
        .collect();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].method, Method::PATCH);
    assert_eq!(writes[0].path, "/api/order/o6/status");
    assert_eq!(writes[0].body, json!({"status": "ready"}));
    assert_eq!(writes[1].method, Method::PUT);
    assert_eq!(writes[1].path, "/api/order/o6");
    assert_eq!(writes[1].body, json!({"status": "cancelled"}));
}

#[tokio::test]
async fn merge_needs_two_distinct_orders() {
    let (stub, base) = start(vec![(
        Method::POST,
        "/api/order/merge",
        200,
        json!({"message": "merged"}),
    )])
    .await;

    let response = client()
        .post(format!("{}/orders/merge", base))
        .header("token", TOKEN)
        .json(&json!({"orderIds": [" o1 ", "o1", ""]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["field"], "orderIds");
    assert!(stub.requests().is_empty());

    let response = client()
        .post(format!("{}/orders/merge", base))
        .header("token", TOKEN)
        .json(&json!({"orderIds": ["o1", " o2 ", "o1"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, json!({"orderIds": ["o1", "o2"]}));
}

#[tokio::test]
async fn ids_cannot_escape_their_path_segment() {
    let (stub, base) = start(vec![]).await;

    let response = client()
        .get(format!("{}/orders/a%2F..%2Fsupplier", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client()
        .post(format!("{}/sub-inventory/transfers", base))
        .header("token", TOKEN)
        .json(&json!({"mainInventoryId": "inv1/../../order", "kitchenId": "k1", "quantity": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert!(stub.requests().is_empty());
}

// ============================================================================
// Forms
// ============================================================================

#[tokio::test]
async fn duplicate_recipe_ingredient_is_rejected_before_the_api() {
    let (stub, base) = start(vec![]).await;

    let response = client()
        .post(format!("{}/recipes", base))
        .header("token", TOKEN)
        .json(&json!({
            "product": "p1",
            "ingredients": [
                {"ingredientType": "inventory", "ingredient": "flour", "quantity": 0.2},
                {"ingredientType": "inventory", "ingredient": "flour", "quantity": 0.1}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["field"], "ingredients[1].ingredient");
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn oversized_purchase_amount_is_rejected() {
    let (stub, base) = start(vec![]).await;

    let response = client()
        .post(format!("{}/purchases", base))
        .header("token", TOKEN)
        .json(&json!({
            "title": "Saffron",
            "items": [{"inventoryId": "inv1", "price": "79228162514264337593543950335", "quantity": 2}],
            "paidAmount": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["field"], "items[0].price");
    assert_eq!(body["error"]["message"], "Amount is too large");
    assert!(stub.requests().is_empty());
}

// ============================================================================
// Full lists
// ============================================================================

#[tokio::test]
async fn inventory_summary_reads_every_page() {
    let (stub, base) = start(vec![
        (
            Method::GET,
            "/api/inventory?page=1&limit=100",
            200,
            json!({
                "data": [
                    {"_id": "i1", "productName": "Flour", "quantity": 40, "status": "in-stock", "totalValue": 80},
                    {"_id": "i2", "productName": "Eggs", "quantity": 3, "status": "low-stock", "totalValue": 6}
                ],
                "pagination": {"page": 1, "limit": 100, "total": 3, "totalPages": 2}
            }),
        ),
        (
            Method::GET,
            "/api/inventory?page=2&limit=100",
            200,
            json!({
                "data": [
                    {"_id": "i3", "productName": "Basil", "quantity": 0, "status": "out-of-stock", "totalValue": 0}
                ],
                "pagination": {"page": 2, "limit": 100, "total": 3, "totalPages": 2}
            }),
        ),
    ])
    .await;

    let body: Value = client()
        .get(format!("{}/inventory/summary", base))
        .header("token", TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["totalItems"], 3);
    assert_eq!(body["lowStock"], 1);
    assert_eq!(body["outOfStock"], 1);
    assert_eq!(stub.count(Method::GET, "/api/inventory"), 2);
}

#[tokio::test]
async fn responses_are_compressed_on_request() {
    let (_stub, base) = start(vec![]).await;
    let root = base.trim_end_matches("/api/v1");

    let response = client()
        .get(format!("{}/", root))
        .header("accept-encoding", "gzip")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-encoding")
            .and_then(|v| v.to_str().ok()),
        Some("gzip")
    );
}
