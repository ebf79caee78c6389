use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use bus_station::config::environment::EnvironmentConfig;
use bus_station::repositories::{MemoryRouteRepository, RouteStorage};
use bus_station::routes::create_route_router;
use bus_station::state::AppState;

// Función helper para crear la app de test sobre storage en memoria
fn create_test_app() -> Router {
    let storage: Arc<dyn RouteStorage> = Arc::new(MemoryRouteRepository::new());
    Router::new()
        .merge(create_route_router())
        .with_state(AppState::new(storage, EnvironmentConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn seed_route(
    app: &Router,
    start_point: &str,
    end_point: &str,
    start: DateTime<Utc>,
    free_seats: i32,
    all_seats: i32,
) -> i64 {
    let payload = json!({
        "start_point": start_point,
        "end_point": end_point,
        "start": start.to_rfc3339(),
        "cost": 1000,
        "free_seats": free_seats,
        "all_seats": all_seats,
    });

    let (status, body) = send(app, "POST", "/routes/add", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "bus-station");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_routes() {
    let app = create_test_app();
    let start = Utc::now() + Duration::days(30);

    let id = seed_route(&app, "Vitebsk", "Minsk", start, 12, 13).await;
    assert_eq!(id, 1);

    let (status, body) = send(&app, "GET", "/routes", None).await;
    assert_eq!(status, StatusCode::OK);

    let routes = body.as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["points"]["start_point"], "Vitebsk");
    assert_eq!(routes[0]["points"]["end_point"], "Minsk");
    assert_eq!(routes[0]["free_seats"], 12);
    assert_eq!(routes[0]["all_seats"], 13);
}

#[tokio::test]
async fn test_create_route_with_past_date() {
    let app = create_test_app();
    let start = Utc::now() - Duration::days(1);

    let payload = json!({
        "start_point": "Vitebsk",
        "end_point": "Minsk",
        "start": start.to_rfc3339(),
        "cost": 1000,
        "free_seats": 12,
        "all_seats": 13,
    });

    let (status, body) = send(&app, "POST", "/routes/add", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE");

    // El rechazo no debe persistir nada
    let (_, routes) = send(&app, "GET", "/routes", None).await;
    assert_eq!(routes.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_route_with_invalid_seats() {
    let app = create_test_app();
    let start = Utc::now() + Duration::days(30);

    let payload = json!({
        "start_point": "Vitebsk",
        "end_point": "Minsk",
        "start": start.to_rfc3339(),
        "cost": 1000,
        "free_seats": 14,
        "all_seats": 13,
    });

    let (status, body) = send(&app, "POST", "/routes/add", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_route() {
    let app = create_test_app();
    let start = Utc::now() + Duration::days(30);
    let id = seed_route(&app, "Vitebsk", "Minsk", start, 12, 13).await;

    let (status, body) = send(&app, "GET", &format!("/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["points"]["end_point"], "Minsk");

    let (status, body) = send(&app, "GET", "/routes/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_ROUTES");

    // Un id no numérico se rechaza en el extractor, antes del dominio
    let (status, _) = send(&app, "GET", "/routes/df2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_route() {
    let app = create_test_app();
    let start = Utc::now() + Duration::days(30);
    let id = seed_route(&app, "Vitebsk", "Minsk", start, 12, 13).await;

    let (status, body) = send(&app, "DELETE", &format!("/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Borrar un id inexistente es un error, no un no-op
    let (status, body) = send(&app, "DELETE", &format!("/routes/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_ROUTES");
}

#[tokio::test]
async fn test_search_routes() {
    let app = create_test_app();
    let first = Utc::now() + Duration::days(40);
    let second = Utc::now() + Duration::days(52);
    let third = Utc::now() + Duration::days(60);

    seed_route(&app, "Vitebsk", "Minsk", first, 12, 13).await;
    seed_route(&app, "Grodno", "Minsk", second, 12, 13).await;
    seed_route(&app, "Pinsk", "Mir", third, 12, 13).await;

    let date = second.date_naive().format("%Y-%m-%d").to_string();
    let (status, body) = send(
        &app,
        "GET",
        &format!("/route_search?date={}&point=Minsk", date),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let routes = body.as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["points"]["start_point"], "Grodno");

    // Destino sin rutas en esa fecha
    let (status, body) = send(
        &app,
        "GET",
        &format!("/route_search?date={}&point=Grodno", date),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_ROUTES_BY_ENDPOINT");

    // Fecha mal formada: falla sin tocar el storage
    let (status, body) = send(&app, "GET", "/route_search?date=2019-04&point=Minsk", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE_FORMAT");
}

#[tokio::test]
async fn test_buy_ticket() {
    let app = create_test_app();
    let start = Utc::now() + Duration::days(30);
    let id = seed_route(&app, "Minsk", "Vitebsk", start, 13, 13).await;

    let (status, ticket) = send(&app, "POST", &format!("/routes/buy/{}", id), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ticket["place"], 1);
    assert_eq!(ticket["points"]["start_point"], "Minsk");
    assert_eq!(ticket["points"]["end_point"], "Vitebsk");
    assert!(ticket["id"].as_str().is_some());

    // La compra decrementa los asientos libres de la ruta
    let (_, route) = send(&app, "GET", &format!("/routes/{}", id), None).await;
    assert_eq!(route["free_seats"], 12);
}

#[tokio::test]
async fn test_buy_ticket_sold_out() {
    let app = create_test_app();
    let start = Utc::now() + Duration::days(30);
    let id = seed_route(&app, "Minsk", "Vitebsk", start, 1, 1).await;

    let (status, _) = send(&app, "POST", &format!("/routes/buy/{}", id), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", &format!("/routes/buy/{}", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SOLD_OUT");
}

#[tokio::test]
async fn test_buy_ticket_errors() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/routes/buy/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_ROUTES");

    let (status, _) = send(&app, "POST", "/routes/buy/sdvsd", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
