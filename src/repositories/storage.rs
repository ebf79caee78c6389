//! Abstracción de almacenamiento de rutas
//!
//! Este módulo define el contrato que cumplen tanto el storage PostgreSQL
//! como el storage en memoria. La implementación se elige al construir el
//! estado de la aplicación.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::models::route::Route;
use crate::models::ticket::Ticket;

/// Errores a nivel de storage
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("route not found")]
    NotFound,

    #[error("no free seats left")]
    SoldOut,

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Capacidades del storage de rutas: listar, buscar, crear, borrar y
/// asignar asientos.
#[async_trait]
pub trait RouteStorage: Send + Sync {
    /// Devuelve todas las rutas, sin orden garantizado.
    async fn get_all_routes(&self) -> Result<Vec<Route>, StorageError>;

    /// Devuelve la ruta con el id dado, o `NotFound`.
    async fn route_by_id(&self, id: i32) -> Result<Route, StorageError>;

    /// Valida y persiste una ruta nueva; devuelve el id asignado.
    /// Una ruta inválida (fecha pasada, puntos mal formados) se rechaza
    /// con `InvalidRoute` sin mutar el storage.
    async fn add_route(&self, route: &Route) -> Result<i32, StorageError>;

    /// Borra la ruta con el id dado. Borrar un id inexistente es
    /// `NotFound`, no un no-op.
    async fn delete_route(&self, id: i32) -> Result<(), StorageError>;

    /// Devuelve todas las rutas cuyo punto de destino coincide.
    /// Un resultado vacío se señala como `NotFound`, no como secuencia
    /// vacía (convención heredada de la API original, ver DESIGN.md).
    async fn routes_by_end_point(&self, end_point: &str)
        -> Result<Vec<Route>, StorageError>;

    /// Decrementa `free_seats` en exactamente 1 y emite un ticket con un
    /// asiento no asignado a ninguna otra compra concurrente de la misma
    /// ruta. Con `free_seats == 0` falla con `SoldOut` sin mutar nada.
    ///
    /// La operación se ejecuta como unidad atómica contra el storage:
    /// llamadas concurrentes sobre la misma ruta observan una secuencia
    /// linealizable de decrementos.
    async fn allocate_seat(&self, route_id: i32) -> Result<Ticket, StorageError>;
}

/// Reglas de validación de una ruta nueva, compartidas por todas las
/// implementaciones. El storage es el dueño de estas reglas; el controller
/// repite el chequeo de fecha solo como guarda redundante.
pub(crate) fn validate_new_route(route: &Route) -> Result<(), StorageError> {
    if route.points.start_point.trim().is_empty() || route.points.end_point.trim().is_empty() {
        return Err(StorageError::InvalidRoute(
            "start and end points are required".to_string(),
        ));
    }
    if route.points.start_point == route.points.end_point {
        return Err(StorageError::InvalidRoute(
            "start and end points must differ".to_string(),
        ));
    }
    if route.cost.is_sign_negative() {
        return Err(StorageError::InvalidRoute(
            "cost must be non-negative".to_string(),
        ));
    }
    if route.all_seats < 1 {
        return Err(StorageError::InvalidRoute(
            "route must have at least one seat".to_string(),
        ));
    }
    if route.free_seats < 0 || route.free_seats > route.all_seats {
        return Err(StorageError::InvalidRoute(
            "free seats must be between 0 and the seat capacity".to_string(),
        ));
    }
    if route.start <= Utc::now() {
        return Err(StorageError::InvalidRoute(
            "departure date must be in the future".to_string(),
        ));
    }
    Ok(())
}
