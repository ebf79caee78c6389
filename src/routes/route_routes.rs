use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{ApiResponse, CreateRouteRequest, RouteResponse, SearchQuery};
use crate::dto::ticket_dto::TicketResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes))
        .route("/routes/add", post(create_route))
        .route("/routes/:id", get(get_route))
        .route("/routes/:id", delete(delete_route))
        .route("/routes/buy/:id", post(buy_ticket))
        .route("/route_search", get(search_routes))
}

/// Endpoint de salud simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "bus-station",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    let response = controller.list_routes().await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    let response = controller.get_route(id).await?;
    Ok(Json(response))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    let response = controller.create_route(request).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    controller.remove_route(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Ruta eliminada exitosamente"
    })))
}

async fn search_routes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.storage.clone());
    let response = controller.search_routes(&query.date, &query.point).await?;
    Ok(Json(response))
}

async fn buy_ticket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<TicketResponse>), AppError> {
    let controller = RouteController::new(state.storage.clone());
    let response = controller.purchase_ticket(id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
