// src/handlers/catalog.rs

//! Las dos pantallas públicas del marketplace: listado de bodegas con filtros
//! y detalle de una bodega con sede resuelta.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::warehouse::{CatalogFilters, SiteHints, SizeBucket, UnitFilters},
};

// ---
// Query: listado
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Texto libre buscado en la ubicación agregada.
    pub city: Option<String>,
    /// Techo de precio mensual; ausente = sin filtro.
    pub max_price: Option<f64>,
    /// Balde de tamaño: small | medium | large.
    pub size: Option<SizeBucket>,
    /// Palabras clave de características, separadas por comas.
    pub features: Option<String>,
}

impl CatalogQuery {
    fn into_filters(self) -> CatalogFilters {
        CatalogFilters {
            city: self.city,
            max_price: self.max_price,
            size: self.size,
            features: self
                .features
                .map(|raw| {
                    raw.split(',')
                        .map(|f| f.trim().to_string())
                        .filter(|f| !f.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/bodegas",
    tag = "catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Listado de bodegas ya filtrado", body = [crate::models::warehouse::Warehouse])
    )
)]
pub async fn list_warehouses(
    State(app_state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse, AppError> {
    let warehouses = app_state
        .warehouse_service
        .list_catalog(&query.into_filters())
        .await?;
    Ok((StatusCode::OK, Json(warehouses)))
}

// ---
// Query: detalle
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DetailQuery {
    /// Pista explícita de sede (parámetro de URL).
    pub site_id: Option<Uuid>,
    /// Ciudad: pista para resolver la sede y filtro de unidades a la vez.
    pub city: Option<String>,
    /// Zona: solo filtro de unidades.
    pub zone: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/bodegas/{company_id}",
    tag = "catalog",
    params(
        ("company_id" = Uuid, Path, description = "Id de la empresa"),
        DetailQuery
    ),
    responses(
        (status = 200, description = "Detalle con sede resuelta y unidades filtradas", body = crate::models::warehouse::WarehouseDetail),
        (status = 404, description = "Empresa no encontrada")
    )
)]
pub async fn get_warehouse(
    State(app_state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(query): Query<DetailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hints = SiteHints {
        site_id: query.site_id,
        city: query.city.clone(),
    };
    let unit_filters = UnitFilters {
        city: query.city,
        zone: query.zone,
    };

    let detail = app_state
        .warehouse_service
        .detail(company_id, &hints, &unit_filters)
        .await?;
    Ok((StatusCode::OK, Json(detail)))
}
