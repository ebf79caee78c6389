use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::dto::route_dto::{ApiResponse, CreateRouteRequest, RouteResponse};
use crate::dto::ticket_dto::TicketResponse;
use crate::models::route::{Points, Route};
use crate::repositories::{RouteStorage, StorageError};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_date;

/// Capa de reglas de negocio sobre el storage de rutas: valida entradas,
/// traduce errores de storage a centinelas de dominio y coordina la
/// búsqueda y el protocolo de compra.
pub struct RouteController {
    storage: Arc<dyn RouteStorage>,
}

impl RouteController {
    pub fn new(storage: Arc<dyn RouteStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_routes(&self) -> Result<Vec<RouteResponse>, AppError> {
        let routes = self
            .storage
            .get_all_routes()
            .await
            .map_err(Self::storage_error)?;

        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn get_route(&self, id: i32) -> Result<RouteResponse, AppError> {
        if id < 1 {
            return Err(AppError::NoRoutes);
        }

        let route = self
            .storage
            .route_by_id(id)
            .await
            .map_err(Self::storage_error)?;

        Ok(RouteResponse::from(route))
    }

    pub async fn create_route(
        &self,
        request: CreateRouteRequest,
    ) -> Result<ApiResponse<RouteResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if request.start_point == request.end_point {
            return Err(AppError::Validation(
                "El punto de origen y el de destino deben ser distintos".to_string(),
            ));
        }
        if request.cost.is_sign_negative() {
            return Err(AppError::Validation(
                "El coste no puede ser negativo".to_string(),
            ));
        }
        if request.free_seats > request.all_seats {
            return Err(AppError::Validation(
                "Los asientos libres no pueden superar la capacidad".to_string(),
            ));
        }
        // El storage es el dueño de la regla de fecha; este chequeo solo
        // corta la petición antes de tocar la base de datos.
        if request.start <= Utc::now() {
            return Err(AppError::InvalidDate);
        }

        let mut route = Route {
            id: 0,
            points: Points {
                start_point: request.start_point,
                end_point: request.end_point,
            },
            start: request.start,
            cost: request.cost,
            free_seats: request.free_seats,
            all_seats: request.all_seats,
        };

        let id = self.storage.add_route(&route).await.map_err(|e| match e {
            StorageError::InvalidRoute(_) => AppError::InvalidDate,
            other => Self::storage_error(other),
        })?;
        route.id = id;

        Ok(ApiResponse::success_with_message(
            RouteResponse::from(route),
            "Ruta creada exitosamente".to_string(),
        ))
    }

    pub async fn remove_route(&self, id: i32) -> Result<(), AppError> {
        if id < 1 {
            return Err(AppError::NoRoutes);
        }

        self.storage
            .delete_route(id)
            .await
            .map_err(Self::storage_error)
    }

    /// Busca rutas hacia `point` que salgan el día `date` (YYYY-MM-DD).
    /// La hora de salida se ignora: solo cuenta la fecha de calendario.
    pub async fn search_routes(
        &self,
        date: &str,
        point: &str,
    ) -> Result<Vec<RouteResponse>, AppError> {
        let date = validate_date(date)?;

        let routes = self
            .storage
            .routes_by_end_point(point)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => AppError::NoRoutesByEndPoint,
                other => Self::storage_error(other),
            })?;

        let matches: Vec<RouteResponse> = routes
            .into_iter()
            .filter(|route| route.start.date_naive() == date)
            .map(RouteResponse::from)
            .collect();

        if matches.is_empty() {
            return Err(AppError::NoRoutesByEndPoint);
        }
        Ok(matches)
    }

    pub async fn purchase_ticket(&self, route_id: i32) -> Result<TicketResponse, AppError> {
        if route_id < 1 {
            return Err(AppError::NoRoutes);
        }

        let ticket = self
            .storage
            .allocate_seat(route_id)
            .await
            .map_err(Self::storage_error)?;

        Ok(TicketResponse::from(ticket))
    }

    /// Traducción por defecto de errores de storage a centinelas de
    /// dominio. No inventa condiciones de fallo nuevas.
    fn storage_error(err: StorageError) -> AppError {
        match err {
            StorageError::NotFound => AppError::NoRoutes,
            StorageError::SoldOut => AppError::SoldOut,
            StorageError::InvalidRoute(msg) => AppError::Validation(msg),
            StorageError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}
