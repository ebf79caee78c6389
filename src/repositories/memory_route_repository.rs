//! Storage de rutas en memoria
//!
//! Implementación de `RouteStorage` sobre un HashMap protegido por mutex.
//! Es el doble de test del repositorio PostgreSQL y sirve también para
//! desarrollo local sin base de datos.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::route::Route;
use crate::models::ticket::Ticket;

use super::storage::{validate_new_route, RouteStorage, StorageError};

#[derive(Default)]
struct MemoryState {
    routes: HashMap<i32, Route>,
    next_id: i32,
}

/// Storage en memoria. Clonar comparte el mismo estado subyacente.
#[derive(Clone, Default)]
pub struct MemoryRouteRepository {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryRouteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RouteStorage for MemoryRouteRepository {
    async fn get_all_routes(&self) -> Result<Vec<Route>, StorageError> {
        let state = self.inner.lock().await;
        Ok(state.routes.values().cloned().collect())
    }

    async fn route_by_id(&self, id: i32) -> Result<Route, StorageError> {
        let state = self.inner.lock().await;
        state.routes.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn add_route(&self, route: &Route) -> Result<i32, StorageError> {
        validate_new_route(route)?;

        let mut state = self.inner.lock().await;
        state.next_id += 1;
        let id = state.next_id;

        let mut stored = route.clone();
        stored.id = id;
        state.routes.insert(id, stored);

        Ok(id)
    }

    async fn delete_route(&self, id: i32) -> Result<(), StorageError> {
        let mut state = self.inner.lock().await;
        state.routes.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn routes_by_end_point(&self, end_point: &str) -> Result<Vec<Route>, StorageError> {
        let state = self.inner.lock().await;
        let routes: Vec<Route> = state
            .routes
            .values()
            .filter(|r| r.points.end_point == end_point)
            .cloned()
            .collect();

        if routes.is_empty() {
            return Err(StorageError::NotFound);
        }
        Ok(routes)
    }

    async fn allocate_seat(&self, route_id: i32) -> Result<Ticket, StorageError> {
        // Sección crítica sin puntos de await: o la asignación completa
        // ocurre, o no ocurre nada. Un future cancelado antes de adquirir
        // el lock no deja ningún decremento parcial.
        let mut state = self.inner.lock().await;
        let route = state
            .routes
            .get_mut(&route_id)
            .ok_or(StorageError::NotFound)?;

        if route.free_seats == 0 {
            return Err(StorageError::SoldOut);
        }

        let place = route.all_seats - route.free_seats + 1;
        route.free_seats -= 1;

        Ok(Ticket {
            id: Uuid::new_v4(),
            points: route.points.clone(),
            start_time: route.start,
            cost: route.cost,
            place,
        })
    }
}
