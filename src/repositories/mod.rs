//! Repositorios de acceso a datos
//!
//! Este módulo contiene la abstracción de storage de rutas y sus dos
//! implementaciones: PostgreSQL (producción) y memoria (tests/desarrollo).

pub mod memory_route_repository;
pub mod route_repository;
pub mod storage;

pub use memory_route_repository::MemoryRouteRepository;
pub use route_repository::RouteRepository;
pub use storage::{RouteStorage, StorageError};
