// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo (público) ---
        handlers::catalog::list_warehouses,
        handlers::catalog::get_warehouse,

        // --- Empresas ---
        handlers::companies::create_company,
        handlers::companies::get_my_company,
        handlers::companies::update_company,

        // --- Sedes ---
        handlers::companies::create_site,
        handlers::companies::list_sites,
        handlers::companies::update_site,
        handlers::companies::delete_site,

        // --- Mini bodegas ---
        handlers::companies::create_unit,
        handlers::companies::list_units,
        handlers::companies::update_unit,
        handlers::companies::set_unit_status,
        handlers::companies::delete_unit,

        // --- Reservas ---
        handlers::reservations::create_reservation,
        handlers::reservations::list_company_reservations,
        handlers::reservations::transition_reservation,

        // --- Administración ---
        handlers::admin::list_companies,
        handlers::admin::set_verification,
        handlers::admin::assign_role,
    ),
    components(
        schemas(
            models::catalog::Company,
            models::catalog::VerificationStatus,
            models::catalog::Site,
            models::catalog::Unit,
            models::catalog::UnitStatus,
            models::catalog::CarouselImage,
            models::warehouse::Warehouse,
            models::warehouse::WarehouseDetail,
            models::warehouse::PriceRange,
            models::warehouse::SizeBucket,
            models::reservation::Reservation,
            models::reservation::ReservationStatus,
            models::auth::Profile,
            models::auth::UserRole,
            handlers::companies::CreateCompanyPayload,
            handlers::companies::UpdateCompanyPayload,
            handlers::companies::CreateSitePayload,
            handlers::companies::UpdateSitePayload,
            handlers::companies::CreateUnitPayload,
            handlers::companies::UpdateUnitPayload,
            handlers::companies::UnitStatusPayload,
            handlers::reservations::CreateReservationPayload,
            handlers::reservations::ReservationStatusPayload,
            handlers::admin::VerificationPayload,
            handlers::admin::RolePayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "catalog", description = "Listado y detalle público de bodegas"),
        (name = "companies", description = "Gestión de la empresa del proveedor"),
        (name = "sites", description = "Sedes de una empresa"),
        (name = "units", description = "Mini bodegas de una empresa"),
        (name = "reservations", description = "Solicitudes de reserva"),
        (name = "admin", description = "Verificación y roles"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
