//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::RouteStorage;

/// Estado compartido: el storage de rutas (PostgreSQL o memoria, elegido
/// al arrancar) y la configuración del entorno.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn RouteStorage>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn RouteStorage>, config: EnvironmentConfig) -> Self {
        Self { storage, config }
    }
}
