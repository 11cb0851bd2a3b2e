// src/db/catalog_repo.rs

//! El "Row Fetcher": la lectura con joins que alimenta el pipeline. Trae
//! empresas, descripciones, sedes, unidades e imágenes en lecturas masivas y
//! las agrupa en memoria en paquetes tipados por empresa.

use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{CarouselImage, Company, CompanyBundle, Site, Unit, UnitRow},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

// Proyección tipada de la lectura empresa + descripción.
#[derive(Debug, FromRow)]
struct CompanyWithDescriptionRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    city: Option<String>,
    verification_status: crate::models::catalog::VerificationStatus,
    created_at: chrono::DateTime<chrono::Utc>,
    description: Option<String>,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas las empresas con sus relaciones ya agrupadas (pantalla de listado).
    pub async fn fetch_company_bundles(&self) -> Result<Vec<CompanyBundle>, AppError> {
        let companies: Vec<CompanyWithDescriptionRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.owner_id, c.name, c.city, c.verification_status, c.created_at,
                   d.content AS description
            FROM companies c
            LEFT JOIN company_descriptions d ON d.company_id = c.id
            ORDER BY c.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let sites: Vec<Site> = sqlx::query_as(
            r#"
            SELECT id, company_id, name, city, address, zone, is_primary, created_at
            FROM sites
            ORDER BY is_primary DESC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let units: Vec<UnitRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, site_id, name, size, price, city, zone, address,
                   available, status, features, quantity, unavailable_reason, image_url,
                   created_at
            FROM units
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let images: Vec<CarouselImage> = sqlx::query_as(
            r#"
            SELECT id, company_id, url, position
            FROM carousel_images
            ORDER BY position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_bundles(companies, sites, units, images))
    }

    /// Una empresa concreta con sus relaciones (pantalla de detalle).
    pub async fn fetch_company_bundle(
        &self,
        company_id: Uuid,
    ) -> Result<Option<CompanyBundle>, AppError> {
        let company: Option<CompanyWithDescriptionRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.owner_id, c.name, c.city, c.verification_status, c.created_at,
                   d.content AS description
            FROM companies c
            LEFT JOIN company_descriptions d ON d.company_id = c.id
            WHERE c.id = $1
            "#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(company) = company else {
            return Ok(None);
        };

        let sites: Vec<Site> = sqlx::query_as(
            r#"
            SELECT id, company_id, name, city, address, zone, is_primary, created_at
            FROM sites
            WHERE company_id = $1
            ORDER BY is_primary DESC, created_at ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        let units: Vec<UnitRow> = sqlx::query_as(
            r#"
            SELECT id, company_id, site_id, name, size, price, city, zone, address,
                   available, status, features, quantity, unavailable_reason, image_url,
                   created_at
            FROM units
            WHERE company_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        let images: Vec<CarouselImage> = sqlx::query_as(
            r#"
            SELECT id, company_id, url, position
            FROM carousel_images
            WHERE company_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_bundles(vec![company], sites, units, images).pop())
    }
}

// Agrupa las filas por empresa. Las relaciones que apuntan a una empresa
// desconocida se descartan en silencio; las ausentes quedan como vectores
// vacíos.
fn assemble_bundles(
    companies: Vec<CompanyWithDescriptionRow>,
    sites: Vec<Site>,
    units: Vec<UnitRow>,
    images: Vec<CarouselImage>,
) -> Vec<CompanyBundle> {
    let mut bundles: Vec<CompanyBundle> = companies
        .into_iter()
        .map(|row| CompanyBundle {
            company: Company {
                id: row.id,
                owner_id: row.owner_id,
                name: row.name,
                city: row.city,
                verification_status: row.verification_status,
                created_at: row.created_at,
            },
            description: row.description,
            sites: vec![],
            units: vec![],
            images: vec![],
        })
        .collect();

    let index: HashMap<Uuid, usize> = bundles
        .iter()
        .enumerate()
        .map(|(i, b)| (b.company.id, i))
        .collect();

    for site in sites {
        if let Some(&i) = index.get(&site.company_id) {
            bundles[i].sites.push(site);
        }
    }
    for unit in units {
        if let Some(&i) = index.get(&unit.company_id) {
            bundles[i].units.push(Unit::from(unit));
        }
    }
    for image in images {
        if let Some(&i) = index.get(&image.company_id) {
            bundles[i].images.push(image);
        }
    }

    bundles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{UnitStatus, VerificationStatus};
    use chrono::Utc;

    fn company_row(id: Uuid) -> CompanyWithDescriptionRow {
        CompanyWithDescriptionRow {
            id,
            owner_id: Uuid::new_v4(),
            name: "Bodegas del Valle".to_string(),
            city: Some("Cali".to_string()),
            verification_status: VerificationStatus::Pending,
            created_at: Utc::now(),
            description: None,
        }
    }

    fn unit_row(company_id: Uuid) -> UnitRow {
        UnitRow {
            id: Uuid::new_v4(),
            company_id,
            site_id: None,
            name: None,
            size: None,
            price: None,
            city: None,
            zone: None,
            address: None,
            available: true,
            status: UnitStatus::Active,
            features: vec![],
            quantity: 1,
            unavailable_reason: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn agrupa_las_relaciones_por_empresa() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let bundles = assemble_bundles(
            vec![company_row(a), company_row(b)],
            vec![],
            vec![unit_row(a), unit_row(a), unit_row(b)],
            vec![],
        );

        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[0].units.len(), 2);
        assert_eq!(bundles[1].units.len(), 1);
        assert!(bundles[0].sites.is_empty());
    }

    #[test]
    fn las_filas_huerfanas_no_rompen_el_agrupado() {
        let a = Uuid::new_v4();
        let bundles = assemble_bundles(
            vec![company_row(a)],
            vec![],
            vec![unit_row(Uuid::new_v4())],
            vec![
                CarouselImage {
                    id: Uuid::new_v4(),
                    company_id: Uuid::new_v4(),
                    url: "x.jpg".to_string(),
                    position: 0,
                },
            ],
        );

        assert_eq!(bundles.len(), 1);
        assert!(bundles[0].units.is_empty());
        assert!(bundles[0].images.is_empty());
    }
}
