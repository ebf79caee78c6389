//! Controllers del sistema
//!
//! Este módulo contiene la lógica de negocio que media entre la capa HTTP
//! y los repositorios.

pub mod route_controller;

pub use route_controller::RouteController;
