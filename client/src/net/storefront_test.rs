use std::sync::Arc;

use super::*;
use crate::config::ClientConfig;
use crate::net::transport::scripted::ScriptedTransport;
use crate::state::storage::MemoryStore;

fn test_client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    let config = ClientConfig { base_url: "http://studio.test".to_owned(), ..ClientConfig::default() };
    ApiClient::new(config, transport.clone())
}

fn logged_in() -> SessionContext {
    let mut ctx = SessionContext::new(MemoryStore::new());
    ctx.establish(Session {
        access_token: Some("T".to_owned()),
        refresh_token: Some("R".to_owned()),
        user: Some(SessionUser { username: "a".to_owned() }),
    })
    .unwrap();
    ctx
}

fn sent_json(transport: &ScriptedTransport, index: usize) -> Value {
    let body = transport.requests()[index].body.clone().unwrap();
    serde_json::from_str(&body).unwrap()
}

// =============================================================
// Endpoint helpers
// =============================================================

#[test]
fn my_designs_endpoint_encodes_category() {
    assert_eq!(my_designs_endpoint(None), "/designs/my-designs");
    assert_eq!(my_designs_endpoint(Some("")), "/designs/my-designs");
    assert_eq!(my_designs_endpoint(Some("t shirt&x")), "/designs/my-designs?category=t+shirt%26x");
}

#[test]
fn products_endpoint_switches_to_category_route() {
    assert_eq!(products_endpoint(None), "/products");
    assert_eq!(products_endpoint(Some("  ")), "/products");
    assert_eq!(products_endpoint(Some("poster")), "/products/category?category=poster");
}

#[test]
fn id_endpoints_format_paths() {
    assert_eq!(product_endpoint(12), "/products/12");
    assert_eq!(cart_item_endpoint(3), "/cart/3");
}

#[test]
fn collection_accepts_wrapped_bare_and_garbage() {
    let wrapped: Vec<Product> =
        collection(serde_json::json!({ "products": [{ "id": 1 }], "count": 1 }), "products").unwrap();
    assert_eq!(wrapped.len(), 1);
    let bare: Vec<Product> = collection(serde_json::json!([{ "id": 1 }, { "id": 2 }]), "products").unwrap();
    assert_eq!(bare.len(), 2);
    let garbage: Vec<Product> = collection(serde_json::json!({ "products": "nope" }), "products").unwrap();
    assert!(garbage.is_empty());
    let null: Vec<Product> = collection(Value::Null, "products").unwrap();
    assert!(null.is_empty());
}

#[test]
fn entity_accepts_wrapped_or_bare() {
    let wrapped: Product = entity(serde_json::json!({ "product": { "id": 4, "name": "Tee" } }), "product").unwrap();
    assert_eq!(wrapped.id, 4);
    let bare: Product = entity(serde_json::json!({ "id": 5, "name": "Mug" }), "product").unwrap();
    assert_eq!(bare.name, "Mug");
}

// =============================================================
// Auth
// =============================================================

#[tokio::test]
async fn login_persists_session_from_response() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(
        200,
        serde_json::json!({ "token": "T", "refresh_token": "R", "user": { "username": "a" } }),
    );
    let client = test_client(&transport);
    let mut session = SessionContext::new(MemoryStore::new());

    let user = client.login(&mut session, "a", "b").await.unwrap();

    assert_eq!(user.username, "a");
    assert_eq!(
        session.session(),
        &Session {
            access_token: Some("T".to_owned()),
            refresh_token: Some("R".to_owned()),
            user: Some(SessionUser { username: "a".to_owned() }),
        }
    );
    assert_eq!(session.store().get("authToken").as_deref(), Some("T"));
    assert_eq!(session.store().get("refreshToken").as_deref(), Some("R"));
    assert_eq!(session.store().get("currentUser").as_deref(), Some(r#"{"username":"a"}"#));
    assert_eq!(sent_json(&transport, 0), serde_json::json!({ "username": "a", "password": "b" }));
    assert_eq!(transport.requests()[0].header("authorization"), None);
}

#[tokio::test]
async fn register_falls_back_to_submitted_username() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, serde_json::json!({ "token": "T", "refresh_token": "R" }));
    let client = test_client(&transport);
    let mut session = SessionContext::new(MemoryStore::new());

    let user = client.register(&mut session, "neo", "secret1", "neo@example.com").await.unwrap();

    assert_eq!(user.username, "neo");
    assert!(session.is_authenticated());
    assert_eq!(
        sent_json(&transport, 0),
        serde_json::json!({ "username": "neo", "password": "secret1", "email": "neo@example.com" })
    );
}

#[tokio::test]
async fn login_without_token_leaves_session_untouched() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, serde_json::json!({ "message": "ok" }));
    let client = test_client(&transport);
    let mut session = SessionContext::new(MemoryStore::new());

    let err = client.login(&mut session, "a", "b").await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_rejection_reports_server_message() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(401, serde_json::json!({ "error": "invalid username or password" }));
    let client = test_client(&transport);
    let mut session = SessionContext::new(MemoryStore::new());

    let err = client.login(&mut session, "a", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "invalid username or password");
}

// =============================================================
// Designs / catalog
// =============================================================

#[tokio::test]
async fn generate_design_posts_prompt_and_reads_image_url() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, serde_json::json!({ "image_url": "/images/1.png", "message": "done" }));
    let client = test_client(&transport);
    let mut session = logged_in();

    let design = client.generate_design(&mut session, "a cat", "poster", "ink").await.unwrap();

    assert_eq!(design.image_url, "/images/1.png");
    assert_eq!(design.id, None);
    assert_eq!(
        sent_json(&transport, 0),
        serde_json::json!({ "prompt": "a cat", "category": "poster", "style": "ink" })
    );
}

#[tokio::test]
async fn my_designs_reads_wrapped_list() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(
        200,
        serde_json::json!({ "designs": [{ "id": 1, "prompt": "x", "image_url": "/1.png", "category": "poster" }] }),
    );
    let client = test_client(&transport);
    let mut session = logged_in();

    let designs = client.my_designs(&mut session, Some("poster")).await.unwrap();
    assert_eq!(designs.len(), 1);
    assert_eq!(transport.requests()[0].url, "http://studio.test/api/v1/designs/my-designs?category=poster");
}

#[tokio::test]
async fn publish_design_sends_product_fields() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(201, serde_json::json!({ "product": { "id": 9, "name": "Cat Tee" }, "message": "ok" }));
    let client = test_client(&transport);
    let mut session = logged_in();

    let product = client.publish_design(&mut session, 3, "Cat Tee", "soft", 19.5).await.unwrap();

    assert_eq!(product.map(|p| p.id), Some(9));
    assert_eq!(
        sent_json(&transport, 0),
        serde_json::json!({ "design_id": 3, "product_name": "Cat Tee", "description": "soft", "price": 19.5 })
    );
}

#[tokio::test]
async fn products_are_public_requests() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, serde_json::json!({ "products": [{ "id": 1 }] }));
    transport.push_json(200, serde_json::json!({ "product": { "id": 1, "name": "Tee", "base_price": 10.0 } }));
    let client = test_client(&transport);
    let mut session = logged_in();

    let products = client.list_products(&mut session, None).await.unwrap();
    let product = client.get_product(&mut session, 1).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(product.name, "Tee");
    for request in transport.requests() {
        assert_eq!(request.header("authorization"), None);
    }
}

// =============================================================
// Cart / orders
// =============================================================

#[tokio::test]
async fn cart_mutations_hit_expected_routes() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, serde_json::json!({ "message": "added" }));
    transport.push_json(200, serde_json::json!({ "message": "updated" }));
    transport.push_json(200, serde_json::json!({ "message": "removed" }));
    let client = test_client(&transport);
    let mut session = logged_in();

    client.add_to_cart(&mut session, 4, 2, 1).await.unwrap();
    client.update_cart_item(&mut session, 8, 3).await.unwrap();
    client.remove_cart_item(&mut session, 8).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "http://studio.test/api/v1/cart/add");
    assert_eq!(sent_json(&transport, 0), serde_json::json!({ "product_id": 4, "design_id": 2, "quantity": 1 }));
    assert_eq!(requests[1].method, Method::Put);
    assert_eq!(requests[1].url, "http://studio.test/api/v1/cart/8");
    assert_eq!(sent_json(&transport, 1), serde_json::json!({ "quantity": 3 }));
    assert_eq!(requests[2].method, Method::Delete);
    assert_eq!(requests[2].body, None);
}

#[tokio::test]
async fn get_cart_parses_totals() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(
        200,
        serde_json::json!({
            "items": [{ "id": 1, "quantity": 2, "product": { "id": 4, "name": "Tee", "base_price": 10.0 }, "design": null }],
            "total_items": 2,
            "total_value": 20.0
        }),
    );
    let client = test_client(&transport);
    let mut session = logged_in();

    let cart = client.get_cart(&mut session).await.unwrap();
    assert_eq!(cart.total_items, 2);
    assert_eq!(cart.items[0].product.as_ref().map(|p| p.name.as_str()), Some("Tee"));
    assert!(cart.items[0].design.is_none());
}

#[tokio::test]
async fn create_order_and_list_orders() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(201, serde_json::json!({ "order": { "id": 1, "order_sn": "SN1", "status": "pending" } }));
    transport.push_json(200, serde_json::json!({ "orders": [{ "order_sn": "SN1", "status": "pending" }], "count": 1 }));
    let client = test_client(&transport);
    let mut session = logged_in();

    let order = client.create_order(&mut session, &[1, 2]).await.unwrap();
    let orders = client.list_orders(&mut session).await.unwrap();

    assert_eq!(order.map(|o| o.order_sn), Some("SN1".to_owned()));
    assert_eq!(sent_json(&transport, 0), serde_json::json!({ "cart_item_ids": [1, 2] }));
    assert_eq!(orders.len(), 1);
}
