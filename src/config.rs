// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CatalogRepository, CompanyRepository, ProfileRepository, ReservationRepository},
    services::{CompanyService, ReservationService, WarehouseService},
};

// El estado compartido, construido explícitamente y pasado a todo: nada de
// clientes globales ambientales.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub profile_repo: ProfileRepository,
    pub warehouse_service: WarehouseService,
    pub company_service: CompanyService,
    pub reservation_service: ReservationService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        // Conecta a la base de datos, propagando errores con '?'
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida con éxito!");

        // --- Monta el grafo de dependencias ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let reservation_repo = ReservationRepository::new(db_pool.clone());
        let profile_repo = ProfileRepository::new(db_pool.clone());

        let warehouse_service = WarehouseService::new(catalog_repo);
        let company_service = CompanyService::new(company_repo.clone(), profile_repo.clone());
        let reservation_service = ReservationService::new(reservation_repo, company_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            profile_repo,
            warehouse_service,
            company_service,
            reservation_service,
        })
    }
}
