//! HTTP tests for the router over the in-memory ports

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_billing::ports::mock::MockBillPort;
use domain_catalog::ports::mock::MockCatalog;
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{CustomerFixtures, ProductFixtures};

fn server() -> TestServer {
    let catalog = Arc::new(MockCatalog::new());
    let bills = Arc::new(MockBillPort::new(catalog.clone()));
    let state = AppState::new(catalog.clone(), catalog, bills);
    TestServer::new(create_router(state, &ApiConfig::default())).unwrap()
}

async fn create_product(server: &TestServer) -> i64 {
    let response = server.post("/product").json(&ProductFixtures::tea()).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn create_customer(server: &TestServer) -> i64 {
    let response = server.post("/customer").json(&CustomerFixtures::ada()).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

// ============================================================================
// Health
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_and_readiness() {
        let server = server();

        let live = server.get("/health").await;
        live.assert_status_ok();
        assert_eq!(live.json::<Value>()["status"], "healthy");

        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        let body = ready.json::<Value>();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"].as_array().unwrap().len(), 3);
    }
}

// ============================================================================
// Catalog
// ============================================================================

mod catalog_tests {
    use super::*;

    #[tokio::test]
    async fn test_product_endpoints() {
        let server = server();
        let id = create_product(&server).await;

        let fetched = server.get(&format!("/product/{}", id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["name"], "Green tea");

        let updated = server
            .patch(&format!("/product/{}", id))
            .json(&json!({ "name": "Tea", "description": "Sencha", "price": 500, "quantity": 3 }))
            .await;
        updated.assert_status_ok();
        assert_eq!(updated.json::<Value>(), Value::Null);

        let listed = server.get("/product").await.json::<Value>();
        assert_eq!(listed[0]["price"], 500);

        server.delete(&format!("/product/{}", id)).await.assert_status_ok();
        server
            .get(&format!("/product/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_product_id_is_bad_request() {
        let response = server().get("/product/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Invalid product's id");
    }

    #[tokio::test]
    async fn test_product_validation_errors() {
        let server = server();

        let missing = server
            .post("/product")
            .json(&json!({ "name": "Tea", "description": "Sencha", "price": 500 }))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        let body = missing.json::<Value>();
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().starts_with("Invalid passed data err:"));

        let negative = server
            .post("/product")
            .json(&json!({ "name": "Tea", "description": "Sencha", "price": -1, "quantity": 1 }))
            .await;
        negative.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = server()
            .post("/customer")
            .text("{not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Cannot parse json data");
    }

    #[tokio::test]
    async fn test_customer_endpoints() {
        let server = server();
        let id = create_customer(&server).await;

        server
            .patch(&format!("/customer/{}", id))
            .json(&json!({ "first_name": "Augusta", "last_name": "King" }))
            .await
            .assert_status_ok();

        let customer = server.get(&format!("/customer/{}", id)).await.json::<Value>();
        assert_eq!(customer["first_name"], "Augusta");

        server
            .patch("/customer/99")
            .json(&json!({ "first_name": "A", "last_name": "B" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Bills
// ============================================================================

mod bill_tests {
    use super::*;

    #[tokio::test]
    async fn test_bill_lifecycle() {
        let server = server();
        let customer = create_customer(&server).await;
        let product = create_product(&server).await;

        let created = server
            .post("/bill")
            .json(&json!({ "customer": customer, "products": [{ "product": product, "quantity": 2 }] }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let bill = created.json::<Value>();
        assert_eq!(bill["customer"], customer);
        assert!(bill["number"].is_string());
        let id = bill["id"].as_i64().unwrap();

        let detail = server.get(&format!("/bill/{}", id)).await.json::<Value>();
        assert_eq!(detail["customer"]["first_name"], "Ada");
        assert_eq!(detail["products"], json!([{ "product": product, "quantity": 2 }]));

        server
            .patch(&format!("/bill/{}", id))
            .json(&json!({ "customer": customer, "products": [] }))
            .await
            .assert_status_ok();
        let detail = server.get(&format!("/bill/{}", id)).await.json::<Value>();
        assert_eq!(detail["products"], json!([]));

        server.delete(&format!("/bill/{}", id)).await.assert_status_ok();
        server
            .get(&format!("/bill/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        assert_eq!(server.get("/bill").await.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_unknown_references_are_bad_request() {
        let server = server();
        let customer = create_customer(&server).await;

        let response = server
            .post("/bill")
            .json(&json!({ "customer": customer, "products": [{ "product": 41, "quantity": 1 }] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["message"].as_str().unwrap().contains("41"));

        server
            .post("/bill")
            .json(&json!({ "customer": 999, "products": [] }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(server.get("/bill").await.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_bill_without_products_fails_validation() {
        let server = server();
        let customer = create_customer(&server).await;

        let response = server.post("/bill").json(&json!({ "customer": customer })).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains("products"));
    }

    #[tokio::test]
    async fn test_duplicate_products_in_request() {
        let server = server();
        let customer = create_customer(&server).await;
        let product = create_product(&server).await;

        let response = server
            .post("/bill")
            .json(&json!({
                "customer": customer,
                "products": [
                    { "product": product, "quantity": 1 },
                    { "product": product, "quantity": 2 }
                ]
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_bill_product_endpoints() {
        let server = server();
        let customer = create_customer(&server).await;
        let product = create_product(&server).await;
        let bill = server
            .post("/bill")
            .json(&json!({ "customer": customer, "products": [] }))
            .await
            .json::<Value>()["id"]
            .as_i64()
            .unwrap();

        let path = format!("/bill/{}/product", bill);
        server
            .post(&path)
            .json(&json!({ "product": product, "quantity": 4 }))
            .await
            .assert_status(StatusCode::CREATED);

        let again = server
            .post(&path)
            .json(&json!({ "product": product, "quantity": 4 }))
            .await;
        again.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(again.json::<Value>()["message"], "Passed product already exists in bill");

        let products = server.get(&path).await.json::<Value>();
        assert_eq!(products[0]["id"], product);
        assert_eq!(products[0]["name"], "Green tea");

        server
            .delete(&format!("/bill/{}/product/{}", bill, product))
            .await
            .assert_status_ok();
        server
            .delete(&format!("/bill/{}/product/{}", bill, product))
            .await
            .assert_status_ok();
        assert_eq!(server.get(&path).await.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_invalid_bill_product_path() {
        let response = server().delete("/bill/1/product/x").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Invalid product's id");
    }

    #[tokio::test]
    async fn test_referenced_product_delete_is_rejected() {
        let server = server();
        let customer = create_customer(&server).await;
        let product = create_product(&server).await;
        server
            .post("/bill")
            .json(&json!({ "customer": customer, "products": [{ "product": product, "quantity": 1 }] }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.delete(&format!("/product/{}", product)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "conflict");
    }
}
