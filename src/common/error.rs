// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// El tipo de error de toda la aplicación, con `thiserror` para mejor ergonomía.
// Cada llamada asíncrona se envuelve una sola vez; nada se reintenta.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Operación no permitida para este usuario")]
    Forbidden,

    #[error("Empresa no encontrada")]
    CompanyNotFound,

    #[error("Sede no encontrada")]
    SiteNotFound,

    #[error("Mini bodega no encontrada")]
    UnitNotFound,

    #[error("Reserva no encontrada")]
    ReservationNotFound,

    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("Ya existe una empresa para este usuario")]
    CompanyAlreadyExists,

    #[error("Transición de estado no permitida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    // Variante para errores de base de datos
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devuelve todos los detalles de la validación, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidToken | AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "No tienes permiso para realizar esta operación.".to_string(),
            ),
            AppError::CompanyNotFound => {
                (StatusCode::NOT_FOUND, "Empresa no encontrada.".to_string())
            }
            AppError::SiteNotFound => (StatusCode::NOT_FOUND, "Sede no encontrada.".to_string()),
            AppError::UnitNotFound => {
                (StatusCode::NOT_FOUND, "Mini bodega no encontrada.".to_string())
            }
            AppError::ReservationNotFound => {
                (StatusCode::NOT_FOUND, "Reserva no encontrada.".to_string())
            }
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuario no encontrado.".to_string())
            }
            AppError::CompanyAlreadyExists => (
                StatusCode::CONFLICT,
                "Ya existe una empresa registrada para este usuario.".to_string(),
            ),
            AppError::InvalidStatusTransition { ref from, ref to } => (
                StatusCode::CONFLICT,
                format!("No se puede pasar del estado '{from}' al estado '{to}'."),
            ),
            // Todo lo demás (DatabaseError, InternalServerError) es un 500.
            // `tracing` deja registrado el detalle que `thiserror` nos da.
            ref e => {
                tracing::error!("Error interno del servidor: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
