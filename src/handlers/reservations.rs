// src/handlers/reservations.rs

//! Solicitudes de reserva: alta por el usuario final y gestión del estado por
//! la empresa.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::reservation::ReservationStatus,
};

// ---
// Payload: CreateReservation
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationPayload {
    pub unit_id: Uuid,

    #[validate(length(min = 5, message = "El documento es obligatorio."))]
    pub requester_document: String,

    #[validate(length(min = 7, message = "El teléfono es obligatorio."))]
    pub requester_phone: String,

    /// Fecha de inicio solicitada, formato YYYY-MM-DD.
    pub start_date: NaiveDate,

    /// Servicios adicionales solicitados (transporte, embalaje, ...).
    #[serde(default)]
    pub services: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "reservations",
    request_body = CreateReservationPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Solicitud creada en estado 'pending'", body = crate::models::reservation::Reservation),
        (status = 404, description = "Mini bodega no encontrada")
    )
)]
pub async fn create_reservation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateReservationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let reservation = app_state
        .reservation_service
        .create(
            &user.0,
            payload.unit_id,
            &payload.requester_document,
            &payload.requester_phone,
            payload.start_date,
            &payload.services,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}/reservations",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reservas recibidas por la empresa", body = [crate::models::reservation::Reservation])
    )
)]
pub async fn list_company_reservations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reservations = app_state
        .reservation_service
        .list_for_company(&user.0, company_id)
        .await?;
    Ok((StatusCode::OK, Json(reservations)))
}

// ---
// Payload: ReservationStatus
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusPayload {
    pub status: ReservationStatus,
}

#[utoipa::path(
    patch,
    path = "/api/reservations/{id}/status",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Id de la reserva")),
    request_body = ReservationStatusPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reserva con el nuevo estado", body = crate::models::reservation::Reservation),
        (status = 409, description = "Transición no permitida")
    )
)]
pub async fn transition_reservation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(reservation_id): Path<Uuid>,
    Json(payload): Json<ReservationStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = app_state
        .reservation_service
        .transition(&user.0, reservation_id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(reservation)))
}
