use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use server::identity::{issue_token, AUTH_COOKIE};
use server::startup::build_app;
use server::state::{ServerAuthConfig, ServerState};

const SECRET: &str = "router-test-secret";

fn app() -> Router {
    build_app(ServerState::in_memory(ServerAuthConfig { jwt_secret: SECRET.into() }))
}

fn token_for(id: Uuid) -> String {
    issue_token(SECRET, id, chrono::Duration::hours(1)).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, user: Option<Uuid>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(id)));
    }
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().call(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

fn listing(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title}, still fresh"),
        "category": category,
        "quantity": 2.0,
        "unit": "pieces",
        "expiryDate": "2030-05-01",
        "location": "Student Union",
        "allergens": []
    })
}

#[tokio::test]
async fn health_and_catalog_are_public() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/api/catalog", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allCategories"], "all");
    assert!(body["categories"].as_array().unwrap().iter().any(|c| c == "Bakery"));
}

#[tokio::test]
async fn anonymous_mutations_are_unauthorized() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/items", None, Some(listing("Rolls", "Bakery"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
    assert_eq!(body["code"], 2001);

    let (status, _) = send(&app, Method::POST, &format!("/api/items/{}/claim", Uuid::new_v4()), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/items/seed", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::PATCH, "/api/me", None, Some(json!({"name": "Ann"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_get_and_absent_optionals() {
    let app = app();
    let donor = Uuid::new_v4();
    let (status, body) = send(&app, Method::POST, "/api/items", Some(donor), Some(listing("Rolls", "Bakery"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, item) = send(&app, Method::GET, &format!("/api/items/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["status"], "available");
    assert_eq!(item["donorId"], donor.to_string());
    assert_eq!(item["expiryDate"], "2030-05-01");
    let obj = item.as_object().unwrap();
    assert!(!obj.contains_key("claimedBy"));
    assert!(!obj.contains_key("claimedAt"));
    assert!(!obj.contains_key("imageUrl"));
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = app();
    let (status, body) = send(&app, Method::GET, &format!("/api/items/{}", Uuid::new_v4()), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = send(&app, Method::GET, "/api/items/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let (status, _) = send(&app, Method::POST, &format!("/api/items/{}/claim", Uuid::new_v4()), Some(Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_scenario() {
    let app = app();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let mut ids = Vec::new();
    for (title, category) in [("Apples", "Fruits & Vegetables"), ("Bread", "Bakery"), ("Milk", "Dairy & Eggs")] {
        let (status, body) = send(&app, Method::POST, "/api/items", Some(alice), Some(listing(title, category))).await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let (status, body) = send(&app, Method::POST, &format!("/api/items/{}/claim", ids[0]), Some(bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = send(&app, Method::POST, &format!("/api/items/{}/claim", ids[0]), Some(alice), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2003);

    let (_, stats) = send(&app, Method::GET, "/api/stats", None, None).await;
    assert_eq!(stats, json!({"totalDonated": 3, "totalClaimed": 1, "totalAvailable": 2, "wastePreventedKg": 0.5}));

    let (_, available) = send(&app, Method::GET, "/api/items?status=available", None, None).await;
    assert_eq!(available.as_array().unwrap().len(), 2);

    let (_, claims) = send(&app, Method::GET, "/api/me/claims", Some(bob), None).await;
    let claims = claims.as_array().unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0]["id"], ids[0].as_str());
    assert_eq!(claims[0]["claimedBy"], bob.to_string());

    let (_, donations) = send(&app, Method::GET, "/api/me/donations", Some(alice), None).await;
    assert_eq!(donations.as_array().unwrap().len(), 3);

    let (_, anon) = send(&app, Method::GET, "/api/me/donations", None, None).await;
    assert_eq!(anon, json!([]));
}

#[tokio::test]
async fn list_filters_combine() {
    let app = app();
    let donor = Uuid::new_v4();
    for (title, category) in [("Sourdough loaf", "Bakery"), ("Bread pudding", "Prepared Foods"), ("Oranges", "Fruits & Vegetables")] {
        send(&app, Method::POST, "/api/items", Some(donor), Some(listing(title, category))).await;
    }

    let (_, hits) = send(&app, Method::GET, "/api/items?search=BREAD", None, None).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (_, hits) = send(&app, Method::GET, "/api/items?category=all&search=%20bread%20", None, None).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (_, hits) = send(&app, Method::GET, "/api/items?category=Bakery", None, None).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (_, hits) = send(&app, Method::GET, "/api/items?status=claimed", None, None).await;
    assert_eq!(hits, json!([]));

    let (status, body) = send(&app, Method::GET, "/api/items?status=gone", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["code"], 1001);
    assert!(body["detail"].as_str().unwrap().contains("gone"));
}

#[tokio::test]
async fn seed_returns_ids_owned_by_caller() {
    let app = app();
    let me = Uuid::new_v4();
    let (status, body) = send(&app, Method::POST, "/api/items/seed", Some(me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemIds"].as_array().unwrap().len(), 5);
    assert_eq!(body["message"], "Sample food items created successfully");

    let (_, donations) = send(&app, Method::GET, "/api/me/donations", Some(me), None).await;
    assert_eq!(donations.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn profile_and_demo_login() {
    let app = app();
    let me = Uuid::new_v4();

    let (status, body) = send(&app, Method::GET, "/api/me", Some(me), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::PATCH, "/api/me", Some(me), Some(json!({"name": "Grace"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/api/demo-login", Some(me), Some(json!({"email": "", "password": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, _) = send(&app, Method::POST, "/api/demo-login", Some(me), Some(json!({"email": " grace@uni.edu ", "password": "pw"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, profile) = send(&app, Method::GET, "/api/me", Some(me), None).await;
    assert_eq!(profile["name"], "Grace");
    assert_eq!(profile["email"], "grace@uni.edu");
}

#[tokio::test]
async fn cookie_token_identifies_caller() {
    let app = app();
    let me = Uuid::new_v4();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/items")
        .header(header::COOKIE, format!("{AUTH_COOKIE}={}", token_for(me)))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(listing("Yogurt", "Dairy & Eggs").to_string()))
        .unwrap();
    let res = app.clone().call(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = app();
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/items/{id}/claim").is_some());
    assert!(doc["paths"].get("/api/stats").is_some());
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/items")
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(Uuid::new_v4())))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"title": "no other fields"}"#))
        .unwrap();
    let res = app.clone().call(req).await.unwrap();
    assert!(res.status().is_client_error());
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn simultaneous_claims_over_http_have_one_winner() {
    let app = app();
    let (_, body) = send(&app, Method::POST, "/api/items", Some(Uuid::new_v4()), Some(listing("Falafel", "Prepared Foods"))).await;
    let uri = format!("/api/items/{}/claim", body["id"].as_str().unwrap());

    let (b, c) = (Uuid::new_v4(), Uuid::new_v4());
    let ((sb, _), (sc, _)) = tokio::join!(
        send(&app, Method::POST, &uri, Some(b), None),
        send(&app, Method::POST, &uri, Some(c), None),
    );
    let mut statuses = [sb, sc];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}
