// src/models/reservation.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// Solicitud de reserva de una mini bodega
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub company_id: Uuid,
    pub requester_id: Uuid,
    pub requester_document: String,
    pub requester_phone: String,
    pub start_date: NaiveDate,
    pub services: Vec<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

// Máquina de estados de la reserva: 'pending' es el único estado no terminal.
// Aceptada o rechazada, no hay vuelta atrás.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ReservationStatus {
    pub fn can_transition(self, to: ReservationStatus) -> bool {
        matches!(
            (self, to),
            (ReservationStatus::Pending, ReservationStatus::Accepted)
                | (ReservationStatus::Pending, ReservationStatus::Rejected)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Accepted => "accepted",
            ReservationStatus::Rejected => "rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_puede_aceptarse_o_rechazarse() {
        assert!(ReservationStatus::Pending.can_transition(ReservationStatus::Accepted));
        assert!(ReservationStatus::Pending.can_transition(ReservationStatus::Rejected));
    }

    #[test]
    fn los_estados_terminales_no_transicionan() {
        use ReservationStatus::*;

        for from in [Accepted, Rejected] {
            for to in [Pending, Accepted, Rejected] {
                assert!(!from.can_transition(to), "{from:?} -> {to:?} debería estar prohibido");
            }
        }
    }

    #[test]
    fn pending_no_vuelve_a_pending() {
        assert!(!ReservationStatus::Pending.can_transition(ReservationStatus::Pending));
    }
}
