//! Modelo de Ticket
//!
//! Un ticket es la prueba de compra de un asiento. Copia los datos de la
//! ruta en el momento de la asignación, por lo que mutaciones posteriores
//! de la ruta no lo afectan.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::route::Points;

/// Ticket emitido por una asignación de asiento exitosa.
///
/// Nunca se muta después de su creación; la cancelación o el reembolso
/// no forman parte de este sistema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Referencia estable para el cliente
    pub id: Uuid,
    /// Snapshot de los puntos de la ruta al momento de la compra
    pub points: Points,
    pub start_time: DateTime<Utc>,
    pub cost: Decimal,
    /// Número de asiento asignado, `1 <= place <= all_seats`,
    /// único por ruta entre tickets activos
    pub place: i32,
}
