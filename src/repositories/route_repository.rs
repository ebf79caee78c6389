use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::route::{Points, Route};
use crate::models::ticket::Ticket;

use super::storage::{validate_new_route, RouteStorage, StorageError};

#[derive(FromRow)]
struct RouteRow {
    id: i32,
    start_point: String,
    end_point: String,
    start_time: DateTime<Utc>,
    cost: Decimal,
    free_seats: i32,
    all_seats: i32,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Self {
            id: row.id,
            points: Points {
                start_point: row.start_point,
                end_point: row.end_point,
            },
            start: row.start_time,
            cost: row.cost,
            free_seats: row.free_seats,
            all_seats: row.all_seats,
        }
    }
}

#[derive(Clone)]
pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteStorage for RouteRepository {
    async fn get_all_routes(&self) -> Result<Vec<Route>, StorageError> {
        let rows = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT id, start_point, end_point, start_time, cost, free_seats, all_seats
            FROM routes
            ORDER BY start_time
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn route_by_id(&self, id: i32) -> Result<Route, StorageError> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT id, start_point, end_point, start_time, cost, free_seats, all_seats
            FROM routes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Route::from).ok_or(StorageError::NotFound)
    }

    async fn add_route(&self, route: &Route) -> Result<i32, StorageError> {
        validate_new_route(route)?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO routes (start_point, end_point, start_time, cost, free_seats, all_seats)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&route.points.start_point)
        .bind(&route.points.end_point)
        .bind(route.start)
        .bind(route.cost)
        .bind(route.free_seats)
        .bind(route.all_seats)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete_route(&self, id: i32) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn routes_by_end_point(&self, end_point: &str) -> Result<Vec<Route>, StorageError> {
        let rows = sqlx::query_as::<_, RouteRow>(
            r#"
            SELECT id, start_point, end_point, start_time, cost, free_seats, all_seats
            FROM routes
            WHERE end_point = $1
            ORDER BY start_time
            "#,
        )
        .bind(end_point)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(StorageError::NotFound);
        }
        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn allocate_seat(&self, route_id: i32) -> Result<Ticket, StorageError> {
        // Decremento condicional en una sola sentencia: el backend
        // serializa las escrituras sobre la fila, así que dos compradores
        // concurrentes nunca observan el mismo free_seats.
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            UPDATE routes
            SET free_seats = free_seats - 1
            WHERE id = $1 AND free_seats > 0
            RETURNING id, start_point, end_point, start_time, cost, free_seats, all_seats
            "#,
        )
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Ticket {
                id: Uuid::new_v4(),
                points: Points {
                    start_point: row.start_point,
                    end_point: row.end_point,
                },
                start_time: row.start_time,
                cost: row.cost,
                // free_seats ya está decrementado en la fila devuelta
                place: row.all_seats - row.free_seats,
            }),
            None => {
                let (exists,): (bool,) =
                    sqlx::query_as("SELECT EXISTS(SELECT 1 FROM routes WHERE id = $1)")
                        .bind(route_id)
                        .fetch_one(&self.pool)
                        .await?;

                if exists {
                    Err(StorageError::SoldOut)
                } else {
                    Err(StorageError::NotFound)
                }
            }
        }
    }
}
