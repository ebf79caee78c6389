//! DTOs de rutas
//!
//! Requests y responses de la API de rutas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::route::{Points, Route};

/// Request para crear una nueva ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1))]
    pub start_point: String,

    #[validate(length(min = 1))]
    pub end_point: String,

    /// Fecha de salida; debe ser estrictamente futura
    pub start: DateTime<Utc>,

    pub cost: Decimal,

    #[validate(range(min = 0))]
    pub free_seats: i32,

    #[validate(range(min = 1))]
    pub all_seats: i32,
}

/// Parámetros de búsqueda: fecha (YYYY-MM-DD) y punto de destino
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub date: String,
    pub point: String,
}

/// Response de ruta para la API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: i32,
    pub points: Points,
    pub start: String,
    pub cost: Decimal,
    pub free_seats: i32,
    pub all_seats: i32,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            points: route.points,
            start: route.start.to_rfc3339(),
            cost: route.cost,
            free_seats: route.free_seats,
            all_seats: route.all_seats,
        }
    }
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
