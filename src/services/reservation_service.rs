// src/services/reservation_service.rs

//! Solicitudes de reserva: alta con estado implícito 'pending' y transición
//! vigilada por la tabla de la máquina de estados. Aceptada o rechazada son
//! terminales; la API no ofrece nada más desde ahí.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, ReservationRepository},
    models::{
        auth::AuthUser,
        reservation::{Reservation, ReservationStatus},
    },
};

#[derive(Clone)]
pub struct ReservationService {
    reservation_repo: ReservationRepository,
    company_repo: CompanyRepository,
}

impl ReservationService {
    pub fn new(reservation_repo: ReservationRepository, company_repo: CompanyRepository) -> Self {
        Self {
            reservation_repo,
            company_repo,
        }
    }

    /// La empresa se deriva de la unidad; el solicitante nunca la manda.
    pub async fn create(
        &self,
        user: &AuthUser,
        unit_id: Uuid,
        document: &str,
        phone: &str,
        start_date: NaiveDate,
        services: &[String],
    ) -> Result<Reservation, AppError> {
        let unit = self
            .company_repo
            .find_unit(unit_id)
            .await?
            .ok_or(AppError::UnitNotFound)?;

        let reservation = self
            .reservation_repo
            .create(
                unit.id,
                unit.company_id,
                user.id,
                document,
                phone,
                start_date,
                services,
            )
            .await?;

        tracing::info!(reservation_id = %reservation.id, "Solicitud de reserva creada");
        Ok(reservation)
    }

    pub async fn list_for_company(
        &self,
        user: &AuthUser,
        company_id: Uuid,
    ) -> Result<Vec<Reservation>, AppError> {
        self.ensure_owner_or_admin(user, company_id).await?;
        self.reservation_repo.list_for_company(company_id).await
    }

    pub async fn transition(
        &self,
        user: &AuthUser,
        reservation_id: Uuid,
        to: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        let reservation = self
            .reservation_repo
            .find(reservation_id)
            .await?
            .ok_or(AppError::ReservationNotFound)?;

        self.ensure_owner_or_admin(user, reservation.company_id)
            .await?;

        if !reservation.status.can_transition(to) {
            return Err(AppError::InvalidStatusTransition {
                from: reservation.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        self.reservation_repo
            .set_status(reservation_id, to)
            .await?
            .ok_or(AppError::ReservationNotFound)
    }

    async fn ensure_owner_or_admin(
        &self,
        user: &AuthUser,
        company_id: Uuid,
    ) -> Result<(), AppError> {
        let company = self
            .company_repo
            .find_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if company.owner_id != user.id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}
