// src/services/warehouse_service.rs

//! Orquestación del pipeline: fetch → agregación por empresa → filtro de
//! catálogo (listado) o resolución de sede + filtro de unidades (detalle).
//! Toda la lógica vive en las funciones puras; aquí solo se encadenan.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::warehouse::{CatalogFilters, SiteHints, UnitFilters, Warehouse, WarehouseDetail},
    services::{aggregation, filters, site_resolver},
};

#[derive(Clone)]
pub struct WarehouseService {
    catalog_repo: CatalogRepository,
}

impl WarehouseService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    /// Pantalla de listado: todas las bodegas, ya filtradas por los criterios
    /// del usuario. Sin orden adicional al de llegada.
    pub async fn list_catalog(
        &self,
        catalog_filters: &CatalogFilters,
    ) -> Result<Vec<Warehouse>, AppError> {
        let bundles = self.catalog_repo.fetch_company_bundles().await?;
        let warehouses = bundles.iter().map(aggregation::build_warehouse).collect();
        Ok(filters::filter_catalog(warehouses, catalog_filters))
    }

    /// Pantalla de detalle: el modelo de vista, la sede resuelta según las
    /// pistas de la URL y las unidades de esa sede.
    pub async fn detail(
        &self,
        company_id: Uuid,
        hints: &SiteHints,
        unit_filters: &UnitFilters,
    ) -> Result<WarehouseDetail, AppError> {
        let bundle = self
            .catalog_repo
            .fetch_company_bundle(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        let warehouse = aggregation::build_warehouse(&bundle);
        let site = site_resolver::resolve_site(&bundle.sites, hints).cloned();
        let units = filters::filter_units(&bundle.units, site.as_ref(), unit_filters);

        Ok(WarehouseDetail {
            warehouse,
            site,
            units,
        })
    }
}
