//! Utilidades de validación
//!
//! Este módulo contiene el parseo de fechas de calendario usado por la
//! búsqueda de rutas.

use chrono::NaiveDate;

use super::errors::AppError;

/// Validar y convertir string a fecha de calendario (YYYY-MM-DD).
/// Falla con `InvalidDateFormat` antes de tocar el storage.
pub fn validate_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| AppError::InvalidDateFormat)
}
