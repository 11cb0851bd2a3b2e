// src/db/company_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Company, Site, UnitRow, UnitStatus, VerificationStatus},
};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Empresas
    // ---

    pub async fn create_company(
        &self,
        owner_id: Uuid,
        name: &str,
        city: Option<&str>,
    ) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (owner_id, name, city)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, city, verification_status, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CompanyAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn find_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT id, owner_id, name, city, verification_status, created_at FROM companies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT id, owner_id, name, city, verification_status, created_at FROM companies WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    /// Actualización parcial: los campos ausentes conservan su valor.
    pub async fn update_company(
        &self,
        id: Uuid,
        name: Option<&str>,
        city: Option<&str>,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = COALESCE($2, name),
                city = COALESCE($3, city)
            WHERE id = $1
            RETURNING id, owner_id, name, city, verification_status, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn upsert_description(&self, company_id: Uuid, content: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO company_descriptions (company_id, content)
            VALUES ($1, $2)
            ON CONFLICT (company_id) DO UPDATE SET content = EXCLUDED.content
            "#,
        )
        .bind(company_id)
        .bind(content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_verification_status(
        &self,
        id: Uuid,
        status: VerificationStatus,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET verification_status = $2
            WHERE id = $1
            RETURNING id, owner_id, name, city, verification_status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn list_by_verification(
        &self,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, owner_id, name, city, verification_status, created_at
            FROM companies
            WHERE $1::verification_status IS NULL OR verification_status = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }

    // ---
    // Sedes
    // ---

    pub async fn create_site(
        &self,
        company_id: Uuid,
        name: &str,
        city: Option<&str>,
        address: Option<&str>,
        zone: Option<&str>,
        is_primary: bool,
    ) -> Result<Site, AppError> {
        let site = sqlx::query_as::<_, Site>(
            r#"
            INSERT INTO sites (company_id, name, city, address, zone, is_primary)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company_id, name, city, address, zone, is_primary, created_at
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(city)
        .bind(address)
        .bind(zone)
        .bind(is_primary)
        .fetch_one(&self.pool)
        .await?;
        Ok(site)
    }

    pub async fn find_site(&self, id: Uuid) -> Result<Option<Site>, AppError> {
        let site = sqlx::query_as::<_, Site>(
            "SELECT id, company_id, name, city, address, zone, is_primary, created_at FROM sites WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(site)
    }

    pub async fn list_sites(&self, company_id: Uuid) -> Result<Vec<Site>, AppError> {
        let sites = sqlx::query_as::<_, Site>(
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
        Ok(sites)
    }

    pub async fn update_site(
        &self,
        id: Uuid,
        name: Option<&str>,
        city: Option<&str>,
        address: Option<&str>,
        zone: Option<&str>,
        is_primary: Option<bool>,
    ) -> Result<Option<Site>, AppError> {
        let site = sqlx::query_as::<_, Site>(
            r#"
            UPDATE sites
            SET name = COALESCE($2, name),
                city = COALESCE($3, city),
                address = COALESCE($4, address),
                zone = COALESCE($5, zone),
                is_primary = COALESCE($6, is_primary)
            WHERE id = $1
            RETURNING id, company_id, name, city, address, zone, is_primary, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .bind(address)
        .bind(zone)
        .bind(is_primary)
        .fetch_optional(&self.pool)
        .await?;
        Ok(site)
    }

    pub async fn delete_site(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Mini bodegas
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_unit(
        &self,
        company_id: Uuid,
        site_id: Option<Uuid>,
        name: Option<&str>,
        size: Option<&str>,
        price: Option<&str>,
        city: Option<&str>,
        zone: Option<&str>,
        address: Option<&str>,
        features: &[String],
        quantity: i32,
        image_url: Option<&str>,
    ) -> Result<UnitRow, AppError> {
        let unit = sqlx::query_as::<_, UnitRow>(
            r#"
            INSERT INTO units (company_id, site_id, name, size, price, city, zone, address,
                               features, quantity, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, company_id, site_id, name, size, price, city, zone, address,
                      available, status, features, quantity, unavailable_reason, image_url,
                      created_at
            "#,
        )
        .bind(company_id)
        .bind(site_id)
        .bind(name)
        .bind(size)
        .bind(price)
        .bind(city)
        .bind(zone)
        .bind(address)
        .bind(features)
        .bind(quantity)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(unit)
    }

    pub async fn find_unit(&self, id: Uuid) -> Result<Option<UnitRow>, AppError> {
        let unit = sqlx::query_as::<_, UnitRow>(
            r#"
            SELECT id, company_id, site_id, name, size, price, city, zone, address,
                   available, status, features, quantity, unavailable_reason, image_url,
                   created_at
            FROM units
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    pub async fn list_units(&self, company_id: Uuid) -> Result<Vec<UnitRow>, AppError> {
        let units = sqlx::query_as::<_, UnitRow>(
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
        Ok(units)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_unit(
        &self,
        id: Uuid,
        site_id: Option<Uuid>,
        name: Option<&str>,
        size: Option<&str>,
        price: Option<&str>,
        city: Option<&str>,
        zone: Option<&str>,
        address: Option<&str>,
        features: Option<&[String]>,
        quantity: Option<i32>,
        image_url: Option<&str>,
    ) -> Result<Option<UnitRow>, AppError> {
        let unit = sqlx::query_as::<_, UnitRow>(
            r#"
            UPDATE units
            SET site_id = COALESCE($2, site_id),
                name = COALESCE($3, name),
                size = COALESCE($4, size),
                price = COALESCE($5, price),
                city = COALESCE($6, city),
                zone = COALESCE($7, zone),
                address = COALESCE($8, address),
                features = COALESCE($9, features),
                quantity = COALESCE($10, quantity),
                image_url = COALESCE($11, image_url)
            WHERE id = $1
            RETURNING id, company_id, site_id, name, size, price, city, zone, address,
                      available, status, features, quantity, unavailable_reason, image_url,
                      created_at
            "#,
        )
        .bind(id)
        .bind(site_id)
        .bind(name)
        .bind(size)
        .bind(price)
        .bind(city)
        .bind(zone)
        .bind(address)
        .bind(features)
        .bind(quantity)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    /// El estado, la bandera de disponibilidad y el motivo viajan juntos.
    pub async fn set_unit_status(
        &self,
        id: Uuid,
        status: UnitStatus,
        available: bool,
        unavailable_reason: Option<&str>,
    ) -> Result<Option<UnitRow>, AppError> {
        let unit = sqlx::query_as::<_, UnitRow>(
            r#"
            UPDATE units
            SET status = $2,
                available = $3,
                unavailable_reason = $4
            WHERE id = $1
            RETURNING id, company_id, site_id, name, size, price, city, zone, address,
                      available, status, features, quantity, unavailable_reason, image_url,
                      created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(available)
        .bind(unavailable_reason)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    pub async fn delete_unit(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
