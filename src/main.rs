//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la aplicación no
    // debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al ejecutar las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    // Rutas públicas: el catálogo no exige sesión.
    let catalog_routes = Router::new()
        .route("/bodegas", get(handlers::catalog::list_warehouses))
        .route("/bodegas/{company_id}", get(handlers::catalog::get_warehouse));

    // Rutas de proveedor/usuario autenticado.
    let marketplace_routes = Router::new()
        .route("/companies", post(handlers::companies::create_company))
        .route("/companies/me", get(handlers::companies::get_my_company))
        .route("/companies/{id}", patch(handlers::companies::update_company))
        .route(
            "/companies/{id}/sites",
            post(handlers::companies::create_site).get(handlers::companies::list_sites),
        )
        .route(
            "/companies/{id}/units",
            post(handlers::companies::create_unit).get(handlers::companies::list_units),
        )
        .route(
            "/companies/{id}/reservations",
            get(handlers::reservations::list_company_reservations),
        )
        .route(
            "/sites/{id}",
            patch(handlers::companies::update_site).delete(handlers::companies::delete_site),
        )
        .route(
            "/units/{id}",
            patch(handlers::companies::update_unit).delete(handlers::companies::delete_unit),
        )
        .route("/units/{id}/status", patch(handlers::companies::set_unit_status))
        .route("/reservations", post(handlers::reservations::create_reservation))
        .route(
            "/reservations/{id}/status",
            patch(handlers::reservations::transition_reservation),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rutas de administración; el chequeo de rol vive en los servicios.
    let admin_routes = Router::new()
        .route("/companies", get(handlers::admin::list_companies))
        .route(
            "/companies/{id}/verification",
            patch(handlers::admin::set_verification),
        )
        .route("/users/{user_id}/role", patch(handlers::admin::assign_role))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", catalog_routes)
        .nest("/api", marketplace_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
