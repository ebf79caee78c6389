//! Modelo de Route
//!
//! Este módulo contiene el struct Route y sus tipos asociados.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Par ordenado de puntos de una ruta (origen, destino)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub start_point: String,
    pub end_point: String,
}

/// Route principal - una salida programada de autobús
///
/// Invariante: `0 <= free_seats <= all_seats` en todo momento,
/// incluso bajo asignación concurrente de asientos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Asignado por el storage al crear; cero antes de la creación
    pub id: i32,
    pub points: Points,
    /// Fecha de salida; estrictamente en el futuro al crear la ruta
    pub start: DateTime<Utc>,
    pub cost: Decimal,
    /// Mutado únicamente por la asignación de asientos
    pub free_seats: i32,
    /// Capacidad fija, definida al crear la ruta
    pub all_seats: i32,
}
