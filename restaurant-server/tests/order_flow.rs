//! Menus, foods, tables, orders with items, aggregation and invoices

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::{Value, json};

/// Menu + food + table; returns (food_id, table_id)
async fn seed(app: &TestApp, token: &str, price: f64, table_number: i32) -> (String, String) {
    let (status, menu) = app
        .post("/menus", Some(token), json!({"name": "Lunch", "category": "Main"}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{menu}");

    let (status, food) = app
        .post(
            "/foods",
            Some(token),
            json!({
                "name": "Pho", "price": price, "food_image": "pho.png",
                "menu_id": menu["menu_id"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{food}");

    let (status, table) = app
        .post(
            "/tables",
            Some(token),
            json!({"number_of_guests": 4, "table_number": table_number}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{table}");

    (
        food["food_id"].as_str().unwrap().to_string(),
        table["table_id"].as_str().unwrap().to_string(),
    )
}

fn as_str(value: &Value) -> &str {
    value.as_str().unwrap()
}

#[tokio::test]
async fn test_order_with_items_and_summary() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = seed(&app, &token, 12.5, 7).await;

    let (status, created) = app
        .post(
            "/orderItems",
            Some(&token),
            json!({
                "table_id": table_id,
                "order_items": [{"food_id": food_id, "quantity": 2, "unit_price": 9.999}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    let order_id = as_str(&created["order_id"]);
    let inserted = created["inserted_ids"].as_array().unwrap();
    assert_eq!(inserted.len(), 1);

    let (status, item) = app
        .get(&format!("/orderItems/item/{}", as_str(&inserted[0])), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["unit_price"], 10.0);
    assert_eq!(item["order_id"], order_id);

    let (status, summaries) = app.get(&format!("/orderItems/{order_id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let summaries = summaries.as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["payment_due"], 12.5);
    assert_eq!(summaries[0]["total_count"], 1);
    assert_eq!(summaries[0]["table_number"], 7);
    assert_eq!(summaries[0]["order_items"][0]["food_name"], "Pho");
    assert_eq!(summaries[0]["order_items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_invalid_item_leaves_order_without_items() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = seed(&app, &token, 5.0, 1).await;

    let (status, body) = app
        .post(
            "/orderItems",
            Some(&token),
            json!({
                "table_id": table_id,
                "order_items": [
                    {"food_id": food_id, "quantity": 1, "unit_price": 5.0},
                    {"food_id": food_id, "quantity": 1}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["index"], 1);

    // the order write is not rolled back
    let (_, orders) = app.get("/orders", &token).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["table_id"], Value::String(table_id));

    // but none of its items were stored
    let (_, items) = app.get("/orderItems", &token).await;
    assert!(items.as_array().unwrap().is_empty());
    let order_id = as_str(&orders[0]["order_id"]);
    let (_, summaries) = app.get(&format!("/orderItems/{order_id}"), &token).await;
    assert_eq!(summaries, json!([]));
}

#[tokio::test]
async fn test_unknown_table_creates_nothing() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (status, _) = app
        .post(
            "/orderItems",
            Some(&token),
            json!({
                "table_id": "no-such-table",
                "order_items": [{"food_id": "F1", "quantity": 1, "unit_price": 1.0}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, orders) = app.get("/orders", &token).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_summary_of_unknown_order_is_empty() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (status, body) = app.get("/orderItems/does-not-exist", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_invoice_lifecycle() {
    let app = TestApp::new().await;
    let token = app.token().await;
    let (food_id, table_id) = seed(&app, &token, 8.25, 3).await;

    let (_, created) = app
        .post(
            "/orderItems",
            Some(&token),
            json!({
                "table_id": table_id,
                "order_items": [
                    {"food_id": food_id, "quantity": 1, "unit_price": 8.25},
                    {"food_id": food_id, "quantity": 3, "unit_price": 8.25}
                ]
            }),
        )
        .await;
    let order_id = as_str(&created["order_id"]).to_string();

    let (status, invoice) = app
        .post(
            "/invoices",
            Some(&token),
            json!({"order_id": order_id, "payment_method": "CARD"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{invoice}");
    assert_eq!(invoice["payment_status"], "PENDING");
    let one_day = 24 * 60 * 60 * 1000;
    assert_eq!(
        invoice["payment_due_date"].as_i64().unwrap() - invoice["created_at"].as_i64().unwrap(),
        one_day
    );

    let invoice_id = as_str(&invoice["invoice_id"]);
    let (status, view) = app.get(&format!("/invoices/{invoice_id}"), &token).await;
    assert_eq!(status, StatusCode::OK, "{view}");
    assert_eq!(view["payment_due"], 16.5);
    assert_eq!(view["table_number"], 3);
    assert_eq!(view["order_details"].as_array().unwrap().len(), 2);

    let (status, result) = app
        .patch(
            &format!("/invoices/{invoice_id}"),
            &token,
            json!({"payment_status": "PAID"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["matched_count"], 1);

    let (status, _) = app
        .patch(
            &format!("/invoices/{invoice_id}"),
            &token,
            json!({"payment_method": "CHEQUE"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invoice_references_must_exist() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (status, _) = app
        .post("/invoices", Some(&token), json!({"order_id": "ghost"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // an order without items has nothing to bill
    let (_, order) = app.post("/orders", Some(&token), json!({})).await;
    let (status, invoice) = app
        .post("/invoices", Some(&token), json!({"order_id": order["order_id"]}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app
        .get(&format!("/invoices/{}", as_str(&invoice["invoice_id"])), &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_food_rules() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (status, _) = app
        .post(
            "/foods",
            Some(&token),
            json!({"name": "Pho", "price": 1.0, "food_image": "x.png", "menu_id": "ghost"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (food_id, _) = seed(&app, &token, 19.995, 1).await;
    let (_, food) = app.get(&format!("/foods/{food_id}"), &token).await;
    assert_eq!(food["price"], 20.0);

    let (status, result) = app
        .patch(&format!("/foods/{food_id}"), &token, json!({"price": 10.001}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["modified_count"], 1);
    let (_, food) = app.get(&format!("/foods/{food_id}"), &token).await;
    assert_eq!(food["price"], 10.0);
    assert_eq!(food["name"], "Pho");

    let (status, page) = app.get("/foods?page=1&recordPerPage=5", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["food_items"].as_array().unwrap().len(), 1);

    let (status, _) = app.get("/foods/ghost", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_upserts_except_menus() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (status, result) = app
        .patch("/tables/fresh-table", &token, json!({"table_number": 9}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["upserted_count"], 1);
    assert_eq!(result["upserted_id"], "fresh-table");
    let (status, table) = app.get("/tables/fresh-table", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["table_number"], 9);

    let (status, _) = app
        .patch("/menus/fresh-menu", &token, json!({"name": "Brunch"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_menu_window_validation() {
    let app = TestApp::new().await;
    let token = app.token().await;

    let (status, _) = app
        .post(
            "/menus",
            Some(&token),
            json!({"name": "Late", "category": "Bar", "start_date": 2000, "end_date": 1000}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, menu) = app
        .post(
            "/menus",
            Some(&token),
            json!({"name": "Late", "category": "Bar", "start_date": 1000, "end_date": 2000}),
        )
        .await;
    let uri = format!("/menus/{}", as_str(&menu["menu_id"]));

    // end_date before the stored start_date
    let (status, _) = app.patch(&uri, &token, json!({"end_date": 500})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, result) = app.patch(&uri, &token, json!({"category": "Drinks"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["matched_count"], 1);
    let (_, menu) = app.get(&uri, &token).await;
    assert_eq!(menu["category"], "Drinks");
    assert_eq!(menu["end_date"], 2000);
}
