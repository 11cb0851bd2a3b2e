// src/services/company_service.rs

//! Reglas de negocio de empresas, sedes y mini bodegas: propiedad
//! (dueño o administrador), alta con rol de proveedor y la transición
//! vigilada del estado de verificación.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, ProfileRepository},
    models::{
        auth::{AuthUser, UserRole},
        catalog::{Company, Site, Unit, UnitRow, UnitStatus, VerificationStatus},
    },
};

#[derive(Clone)]
pub struct CompanyService {
    company_repo: CompanyRepository,
    profile_repo: ProfileRepository,
}

impl CompanyService {
    pub fn new(company_repo: CompanyRepository, profile_repo: ProfileRepository) -> Self {
        Self {
            company_repo,
            profile_repo,
        }
    }

    // ---
    // Empresas
    // ---

    pub async fn create_company(
        &self,
        user: &AuthUser,
        name: &str,
        city: Option<&str>,
        description: Option<&str>,
    ) -> Result<Company, AppError> {
        if self.company_repo.find_by_owner(user.id).await?.is_some() {
            return Err(AppError::CompanyAlreadyExists);
        }

        let company = self.company_repo.create_company(user.id, name, city).await?;

        if let Some(content) = description {
            self.company_repo
                .upsert_description(company.id, content)
                .await?;
        }

        // El alta convierte al usuario en proveedor; un administrador puede
        // cambiarlo después.
        if user.role == UserRole::User {
            self.profile_repo.set_role(user.id, UserRole::Company).await?;
        }

        tracing::info!(company_id = %company.id, "Empresa registrada");
        Ok(company)
    }

    /// La ausencia de empresa es un estado vacío válido ("aún sin registrar"),
    /// no un error.
    pub async fn my_company(&self, user: &AuthUser) -> Result<Option<Company>, AppError> {
        self.company_repo.find_by_owner(user.id).await
    }

    pub async fn update_company(
        &self,
        user: &AuthUser,
        company_id: Uuid,
        name: Option<&str>,
        city: Option<&str>,
        description: Option<&str>,
    ) -> Result<Company, AppError> {
        self.ensure_owner_or_admin(user, company_id).await?;

        let company = self
            .company_repo
            .update_company(company_id, name, city)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if let Some(content) = description {
            self.company_repo
                .upsert_description(company.id, content)
                .await?;
        }

        Ok(company)
    }

    // ---
    // Verificación (solo administradores)
    // ---

    pub async fn set_verification(
        &self,
        admin: &AuthUser,
        company_id: Uuid,
        to: VerificationStatus,
    ) -> Result<Company, AppError> {
        if !admin.is_admin() {
            return Err(AppError::Forbidden);
        }

        let company = self
            .company_repo
            .find_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if !company.verification_status.can_transition(to) {
            return Err(AppError::InvalidStatusTransition {
                from: company.verification_status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        self.company_repo
            .set_verification_status(company_id, to)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn list_by_verification(
        &self,
        admin: &AuthUser,
        status: Option<VerificationStatus>,
    ) -> Result<Vec<Company>, AppError> {
        if !admin.is_admin() {
            return Err(AppError::Forbidden);
        }
        self.company_repo.list_by_verification(status).await
    }

    pub async fn assign_role(
        &self,
        admin: &AuthUser,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<(), AppError> {
        if !admin.is_admin() {
            return Err(AppError::Forbidden);
        }
        self.profile_repo
            .set_role(user_id, role)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(())
    }

    // ---
    // Sedes
    // ---

    pub async fn create_site(
        &self,
        user: &AuthUser,
        company_id: Uuid,
        name: &str,
        city: Option<&str>,
        address: Option<&str>,
        zone: Option<&str>,
        is_primary: bool,
    ) -> Result<Site, AppError> {
        self.ensure_owner_or_admin(user, company_id).await?;
        self.company_repo
            .create_site(company_id, name, city, address, zone, is_primary)
            .await
    }

    pub async fn list_sites(
        &self,
        user: &AuthUser,
        company_id: Uuid,
    ) -> Result<Vec<Site>, AppError> {
        self.ensure_owner_or_admin(user, company_id).await?;
        self.company_repo.list_sites(company_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_site(
        &self,
        user: &AuthUser,
        site_id: Uuid,
        name: Option<&str>,
        city: Option<&str>,
        address: Option<&str>,
        zone: Option<&str>,
        is_primary: Option<bool>,
    ) -> Result<Site, AppError> {
        let site = self
            .company_repo
            .find_site(site_id)
            .await?
            .ok_or(AppError::SiteNotFound)?;
        self.ensure_owner_or_admin(user, site.company_id).await?;

        self.company_repo
            .update_site(site_id, name, city, address, zone, is_primary)
            .await?
            .ok_or(AppError::SiteNotFound)
    }

    pub async fn delete_site(&self, user: &AuthUser, site_id: Uuid) -> Result<(), AppError> {
        let site = self
            .company_repo
            .find_site(site_id)
            .await?
            .ok_or(AppError::SiteNotFound)?;
        self.ensure_owner_or_admin(user, site.company_id).await?;

        if !self.company_repo.delete_site(site_id).await? {
            return Err(AppError::SiteNotFound);
        }
        Ok(())
    }

    // ---
    // Mini bodegas
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_unit(
        &self,
        user: &AuthUser,
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
    ) -> Result<Unit, AppError> {
        self.ensure_owner_or_admin(user, company_id).await?;

        // Si la unidad referencia una sede, debe ser de la misma empresa.
        if let Some(site_id) = site_id {
            let site = self
                .company_repo
                .find_site(site_id)
                .await?
                .ok_or(AppError::SiteNotFound)?;
            if site.company_id != company_id {
                return Err(AppError::SiteNotFound);
            }
        }

        let row = self
            .company_repo
            .create_unit(
                company_id, site_id, name, size, price, city, zone, address, features, quantity,
                image_url,
            )
            .await?;
        Ok(Unit::from(row))
    }

    pub async fn list_units(
        &self,
        user: &AuthUser,
        company_id: Uuid,
    ) -> Result<Vec<Unit>, AppError> {
        self.ensure_owner_or_admin(user, company_id).await?;
        let rows = self.company_repo.list_units(company_id).await?;
        Ok(rows.into_iter().map(Unit::from).collect())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_unit(
        &self,
        user: &AuthUser,
        unit_id: Uuid,
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
    ) -> Result<Unit, AppError> {
        let unit = self.owned_unit(user, unit_id).await?;

        if let Some(site_id) = site_id {
            let site = self
                .company_repo
                .find_site(site_id)
                .await?
                .ok_or(AppError::SiteNotFound)?;
            if site.company_id != unit.company_id {
                return Err(AppError::SiteNotFound);
            }
        }

        let row = self
            .company_repo
            .update_unit(
                unit_id, site_id, name, size, price, city, zone, address, features, quantity,
                image_url,
            )
            .await?
            .ok_or(AppError::UnitNotFound)?;
        Ok(Unit::from(row))
    }

    /// Cambio de estado de la unidad. El enum es plano: cualquier estado puede
    /// asignarse desde cualquier otro, siempre por acción directa del dueño.
    pub async fn set_unit_status(
        &self,
        user: &AuthUser,
        unit_id: Uuid,
        status: UnitStatus,
        available: bool,
        unavailable_reason: Option<&str>,
    ) -> Result<Unit, AppError> {
        self.owned_unit(user, unit_id).await?;

        let row = self
            .company_repo
            .set_unit_status(unit_id, status, available, unavailable_reason)
            .await?
            .ok_or(AppError::UnitNotFound)?;
        Ok(Unit::from(row))
    }

    pub async fn delete_unit(&self, user: &AuthUser, unit_id: Uuid) -> Result<(), AppError> {
        self.owned_unit(user, unit_id).await?;

        if !self.company_repo.delete_unit(unit_id).await? {
            return Err(AppError::UnitNotFound);
        }
        Ok(())
    }

    // ---
    // Propiedad
    // ---

    pub async fn ensure_owner_or_admin(
        &self,
        user: &AuthUser,
        company_id: Uuid,
    ) -> Result<Company, AppError> {
        let company = self
            .company_repo
            .find_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound)?;

        if company.owner_id != user.id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(company)
    }

    async fn owned_unit(&self, user: &AuthUser, unit_id: Uuid) -> Result<UnitRow, AppError> {
        let unit = self
            .company_repo
            .find_unit(unit_id)
            .await?
            .ok_or(AppError::UnitNotFound)?;
        self.ensure_owner_or_admin(user, unit.company_id).await?;
        Ok(unit)
    }
}
