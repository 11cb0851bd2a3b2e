// src/db/reservation_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reservation::{Reservation, ReservationStatus},
};

#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crea la solicitud; el estado inicial 'pending' lo pone el esquema.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        unit_id: Uuid,
        company_id: Uuid,
        requester_id: Uuid,
        requester_document: &str,
        requester_phone: &str,
        start_date: NaiveDate,
        services: &[String],
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (unit_id, company_id, requester_id, requester_document,
                                      requester_phone, start_date, services)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, unit_id, company_id, requester_id, requester_document,
                      requester_phone, start_date, services, status, created_at
            "#,
        )
        .bind(unit_id)
        .bind(company_id)
        .bind(requester_id)
        .bind(requester_document)
        .bind(requester_phone)
        .bind(start_date)
        .bind(services)
        .fetch_one(&self.pool)
        .await?;
        Ok(reservation)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, unit_id, company_id, requester_id, requester_document,
                   requester_phone, start_date, services, status, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }

    pub async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, unit_id, company_id, requester_id, requester_document,
                   requester_phone, start_date, services, status, created_at
            FROM reservations
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1
            RETURNING id, unit_id, company_id, requester_id, requester_document,
                      requester_phone, start_date, services, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(reservation)
    }
}
