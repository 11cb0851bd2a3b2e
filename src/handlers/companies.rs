// src/handlers/companies.rs

//! CRUD del proveedor: su empresa, sus sedes y sus mini bodegas.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::UnitStatus,
};

// ---
// Payload: CreateCompany
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "companies",
    request_body = CreateCompanyPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Empresa registrada", body = crate::models::catalog::Company),
        (status = 409, description = "El usuario ya tiene empresa")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = app_state
        .company_service
        .create_company(
            &user.0,
            &payload.name,
            payload.city.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    get,
    path = "/api/companies/me",
    tag = "companies",
    security(("bearer_auth" = [])),
    responses(
        // 'null' cuando el usuario aún no registró empresa: estado vacío, no error.
        (status = 200, description = "La empresa del usuario, o null", body = Option<crate::models::catalog::Company>)
    )
)]
pub async fn get_my_company(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.company_service.my_company(&user.0).await?;
    Ok((StatusCode::OK, Json(company)))
}

// ---
// Payload: UpdateCompany
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub name: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    tag = "companies",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    request_body = UpdateCompanyPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Empresa actualizada", body = crate::models::catalog::Company)
    )
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = app_state
        .company_service
        .update_company(
            &user.0,
            company_id,
            payload.name.as_deref(),
            payload.city.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(company)))
}

// ---
// Payload: CreateSite
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSitePayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub zone: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[utoipa::path(
    post,
    path = "/api/companies/{id}/sites",
    tag = "sites",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    request_body = CreateSitePayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Sede creada", body = crate::models::catalog::Site)
    )
)]
pub async fn create_site(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateSitePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let site = app_state
        .company_service
        .create_site(
            &user.0,
            company_id,
            &payload.name,
            payload.city.as_deref(),
            payload.address.as_deref(),
            payload.zone.as_deref(),
            payload.is_primary,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(site)))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}/sites",
    tag = "sites",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sedes de la empresa", body = [crate::models::catalog::Site])
    )
)]
pub async fn list_sites(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sites = app_state
        .company_service
        .list_sites(&user.0, company_id)
        .await?;
    Ok((StatusCode::OK, Json(sites)))
}

// ---
// Payload: UpdateSite
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSitePayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub zone: Option<String>,
    pub is_primary: Option<bool>,
}

#[utoipa::path(
    patch,
    path = "/api/sites/{id}",
    tag = "sites",
    params(("id" = Uuid, Path, description = "Id de la sede")),
    request_body = UpdateSitePayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sede actualizada", body = crate::models::catalog::Site)
    )
)]
pub async fn update_site(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(site_id): Path<Uuid>,
    Json(payload): Json<UpdateSitePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let site = app_state
        .company_service
        .update_site(
            &user.0,
            site_id,
            payload.name.as_deref(),
            payload.city.as_deref(),
            payload.address.as_deref(),
            payload.zone.as_deref(),
            payload.is_primary,
        )
        .await?;

    Ok((StatusCode::OK, Json(site)))
}

#[utoipa::path(
    delete,
    path = "/api/sites/{id}",
    tag = "sites",
    params(("id" = Uuid, Path, description = "Id de la sede")),
    security(("bearer_auth" = [])),
    responses((status = 204, description = "Sede eliminada"))
)]
pub async fn delete_site(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(site_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.company_service.delete_site(&user.0, site_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: CreateUnit
// ---
// price y size viajan como texto: el pipeline descarta en silencio lo que no
// sea numérico, igual que hace el sistema de origen.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitPayload {
    pub site_id: Option<Uuid>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1."))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub image_url: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

#[utoipa::path(
    post,
    path = "/api/companies/{id}/units",
    tag = "units",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    request_body = CreateUnitPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Mini bodega creada", body = crate::models::catalog::Unit)
    )
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .company_service
        .create_unit(
            &user.0,
            company_id,
            payload.site_id,
            payload.name.as_deref(),
            payload.size.as_deref(),
            payload.price.as_deref(),
            payload.city.as_deref(),
            payload.zone.as_deref(),
            payload.address.as_deref(),
            &payload.features,
            payload.quantity,
            payload.image_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(unit)))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}/units",
    tag = "units",
    params(("id" = Uuid, Path, description = "Id de la empresa")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Mini bodegas de la empresa", body = [crate::models::catalog::Unit])
    )
)]
pub async fn list_units(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state
        .company_service
        .list_units(&user.0, company_id)
        .await?;
    Ok((StatusCode::OK, Json(units)))
}

// ---
// Payload: UpdateUnit
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUnitPayload {
    pub site_id: Option<Uuid>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub address: Option<String>,
    pub features: Option<Vec<String>>,
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1."))]
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/units/{id}",
    tag = "units",
    params(("id" = Uuid, Path, description = "Id de la mini bodega")),
    request_body = UpdateUnitPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Mini bodega actualizada", body = crate::models::catalog::Unit)
    )
)]
pub async fn update_unit(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(unit_id): Path<Uuid>,
    Json(payload): Json<UpdateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .company_service
        .update_unit(
            &user.0,
            unit_id,
            payload.site_id,
            payload.name.as_deref(),
            payload.size.as_deref(),
            payload.price.as_deref(),
            payload.city.as_deref(),
            payload.zone.as_deref(),
            payload.address.as_deref(),
            payload.features.as_deref(),
            payload.quantity,
            payload.image_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(unit)))
}

// ---
// Payload: UnitStatus
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitStatusPayload {
    pub status: UnitStatus,
    pub available: bool,
    pub unavailable_reason: Option<String>,
}

#[utoipa::path(
    patch,
    path = "/api/units/{id}/status",
    tag = "units",
    params(("id" = Uuid, Path, description = "Id de la mini bodega")),
    request_body = UnitStatusPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Estado actualizado", body = crate::models::catalog::Unit)
    )
)]
pub async fn set_unit_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(unit_id): Path<Uuid>,
    Json(payload): Json<UnitStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state
        .company_service
        .set_unit_status(
            &user.0,
            unit_id,
            payload.status,
            payload.available,
            payload.unavailable_reason.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(unit)))
}

#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    tag = "units",
    params(("id" = Uuid, Path, description = "Id de la mini bodega")),
    security(("bearer_auth" = [])),
    responses((status = 204, description = "Mini bodega eliminada"))
)]
pub async fn delete_unit(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(unit_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.company_service.delete_unit(&user.0, unit_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
