//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio: rutas y tickets.

pub mod route;
pub mod ticket;
