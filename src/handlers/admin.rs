// src/handlers/admin.rs

//! Pantallas del administrador: verificación de documentación de empresas y
//! asignación de roles. El chequeo de rol vive en el servicio.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{auth::UserRole, catalog::VerificationStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCompaniesQuery {
    /// pending | verified | rejected; ausente = todas.
    pub status: Option<VerificationStatus>,
}

#[utoipa::path(
    get,
    path = "/api/admin/companies",
    tag = "admin",
    params(ListCompaniesQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Empresas, opcionalmente por estado de verificación", body = [crate::models::catalog::Company]),
        (status = 403, description = "Solo administradores")
    )
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state
        .company_service
        .list_by_verification(&user.0, query.status)
        .await?;
    Ok((StatusCode::OK, Json(companies)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub status: VerificationStatus,
}

#[utoipa::path(
    patch,
    path = "/api/admin/companies/{id}/verification",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    request_body = VerificationPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Empresa con el nuevo estado", body = crate::models::catalog::Company),
        (status = 409, description = "Transición no permitida")
    )
)]
pub async fn set_verification(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<VerificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .company_service
        .set_verification(&user.0, company_id, payload.status)
        .await?;
    Ok((StatusCode::OK, Json(company)))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    pub role: UserRole,
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{user_id}/role",
    tag = "admin",
    params(("user_id" = Uuid, Path, description = "Id del usuario")),
    request_body = RolePayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Rol asignado"),
        (status = 404, description = "Usuario sin perfil")
    )
)]
pub async fn assign_role(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<RolePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .company_service
        .assign_role(&user.0, user_id, payload.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
