//! Exercises `LarekApi` and `HttpClient` against an in-process axum server
//! that mimics the shop API.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use larek_api::http::REQUEST_ID_HEADER;
use larek_api::{ApiConfig, ApiError, HttpClient, LarekApi, StoreApi};
use larek_core::{Money, Order, PaymentMethod};

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

async fn product_list() -> Json<Value> {
    Json(json!({
        "total": 2,
        "items": [
            {
                "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
                "description": "Если планируете решать задачи в тренажёре, берите два.",
                "image": "/5_Dots.svg",
                "title": "+1 час в сутках",
                "category": "софт-скил",
                "price": 750
            },
            {
                "id": "b06cde61-912f-4663-9751-09956c0eed67",
                "description": "Будет стоять над душой и не давать прокрастинировать.",
                "image": "/Asterisk_2.svg",
                "title": "Мамка-таймер",
                "category": "софт-скил",
                "price": null
            }
        ]
    }))
}

async fn product_item(Path(id): Path<String>) -> Reply {
    if id == "missing" {
        return Err((StatusCode::NOT_FOUND, Json(json!({ "error": "NotFound" }))));
    }
    Ok(Json(json!({
        "id": id,
        "description": "",
        "image": "/Shell.svg",
        "title": "Бэкенд-антистресс",
        "category": "другое",
        "price": 1000
    })))
}

async fn place_order(Json(body): Json<Value>) -> Reply {
    if body["total"] == json!(0) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Неверная сумма заказа" })),
        ));
    }
    Ok(Json(json!({
        "id": format!("{}-{}", body["payment"].as_str().unwrap_or(""), body["items"].as_array().map_or(0, Vec::len)),
        "total": body["total"]
    })))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn garbage() -> &'static str {
    "this is not json"
}

async fn echo_request_id(headers: HeaderMap) -> Json<Value> {
    let id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Json(json!({ "request_id": id }))
}

/// Starts the fake shop API and returns its origin.
async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/weblarek/product", get(product_list))
        .route("/api/weblarek/product/{id}", get(product_item))
        .route("/api/weblarek/order", post(place_order))
        .route("/api/weblarek/broken", get(broken))
        .route("/api/weblarek/garbage", get(garbage))
        .route("/api/weblarek/whoami", get(echo_request_id).post(echo_request_id));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn api_for(origin: &str) -> LarekApi {
    LarekApi::from_config(&ApiConfig::with_origin(origin)).unwrap()
}

#[tokio::test]
async fn test_product_list_rewrites_images() {
    let origin = spawn_server().await;
    let api = api_for(&origin);

    let products = api.get_product_list().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(
        products[0].image,
        format!("{}/content/weblarek/5_Dots.svg", origin)
    );
    assert_eq!(products[0].price, Some(Money::from_units(750)));
    assert_eq!(products[1].price, None);
}

#[tokio::test]
async fn test_product_item() {
    let origin = spawn_server().await;
    let api = api_for(&origin);

    let product = api.get_product_item("abc").await.unwrap();

    assert_eq!(product.id, "abc");
    assert_eq!(product.image, format!("{}/content/weblarek/Shell.svg", origin));
}

#[tokio::test]
async fn test_missing_product_surfaces_server_error() {
    let origin = spawn_server().await;
    let api = api_for(&origin);

    let err = api.get_product_item("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "NotFound");
}

#[tokio::test]
async fn test_order_round_trip() {
    let origin = spawn_server().await;
    let api = api_for(&origin);

    let order = Order {
        payment: PaymentMethod::Cash,
        email: "a@b.com".to_string(),
        phone: "1".to_string(),
        address: "x".to_string(),
        items: vec!["854cef69-976d-4c2a-a18c-2aa45046c390".to_string()],
        total: Money::from_units(750),
    };

    let result = api.order_products(&order).await.unwrap();

    assert_eq!(result.id, "cash-1");
    assert_eq!(result.total, Money::from_units(750));
}

#[tokio::test]
async fn test_rejected_order_carries_server_message() {
    let origin = spawn_server().await;
    let api = api_for(&origin);

    let err = api.order_products(&Order::default()).await.unwrap_err();

    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Неверная сумма заказа");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_json_body_uses_status_reason() {
    let origin = spawn_server().await;
    let config = ApiConfig::with_origin(&origin);
    let http = HttpClient::new(&config.api_url(), &config).unwrap();

    let err = http.get::<Value>("/broken").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let origin = spawn_server().await;
    let config = ApiConfig::with_origin(&origin);
    let http = HttpClient::new(&config.api_url(), &config).unwrap();

    let err = http.get::<Value>("/garbage").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = api_for(&origin).get_product_list().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_every_request_carries_a_fresh_request_id() {
    let origin = spawn_server().await;
    let config = ApiConfig::with_origin(&origin);
    let http = HttpClient::new(&config.api_url(), &config).unwrap();

    let first: Value = http.get("/whoami").await.unwrap();
    let second: Value = http.post("/whoami", &json!({})).await.unwrap();

    let first = first["request_id"].as_str().expect("GET sent no request id");
    let second = second["request_id"].as_str().expect("POST sent no request id");
    assert!(uuid::Uuid::parse_str(first).is_ok());
    assert!(uuid::Uuid::parse_str(second).is_ok());
    assert_ne!(first, second);
}
