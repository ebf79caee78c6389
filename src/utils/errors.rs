//! Sistema de manejo de errores
//!
//! Este módulo define los errores de dominio del sistema y su conversión
//! a respuestas HTTP. Cada condición de fallo tiene un centinela estable:
//! la capa de transporte aplica un mapeo fijo de error a status sin
//! inspeccionar el texto del error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errores de dominio de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("route not found")]
    NoRoutes,

    #[error("departure date must be in the future")]
    InvalidDate,

    #[error("invalid date format, expected YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("no routes to this end point")]
    NoRoutesByEndPoint,

    #[error("no free seats left")]
    SoldOut,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::NoRoutes => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: "Ruta no encontrada".to_string(),
                    code: "NO_ROUTES".to_string(),
                },
            ),

            AppError::InvalidDate => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Date".to_string(),
                    message: "La fecha de salida debe ser futura".to_string(),
                    code: "INVALID_DATE".to_string(),
                },
            ),

            AppError::InvalidDateFormat => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Date Format".to_string(),
                    message: "Formato de fecha inválido, se espera YYYY-MM-DD".to_string(),
                    code: "INVALID_DATE_FORMAT".to_string(),
                },
            ),

            AppError::NoRoutesByEndPoint => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: "No hay rutas hacia ese destino en esa fecha".to_string(),
                    code: "NO_ROUTES_BY_ENDPOINT".to_string(),
                },
            ),

            AppError::SoldOut => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Sold Out".to_string(),
                    message: "No quedan asientos libres en esta ruta".to_string(),
                    code: "SOLD_OUT".to_string(),
                },
            ),

            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: msg,
                    code: "VALIDATION_ERROR".to_string(),
                },
            ),

            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        code: "DB_ERROR".to_string(),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
