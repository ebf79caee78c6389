//! DTOs de tickets

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::route::Points;
use crate::models::ticket::Ticket;

/// Response de ticket (sin datos internos del storage)
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub points: Points,
    pub start_time: String,
    pub cost: Decimal,
    pub place: i32,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            points: ticket.points,
            start_time: ticket.start_time.to_rfc3339(),
            cost: ticket.cost,
            place: ticket.place,
        }
    }
}
