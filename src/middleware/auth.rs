// src/middleware/auth.rs

//! Verificación de los JWT que emite el proveedor de identidad externo.
//! Esta API nunca registra ni loguea usuarios: solo valida el token,
//! resuelve el rol en `profiles` y deja el usuario en las extensiones
//! de la petición.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{AuthUser, Claims},
};

// El middleware en sí
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(app_state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims;

    // El rol vive en la base, no en el token: un cambio de rol aplica en la
    // siguiente petición sin reemitir el token.
    let profile = app_state.profile_repo.get_or_create(claims.sub).await?;

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role: profile.role,
    });
    Ok(next.run(request).await)
}

// Extractor para obtener el usuario autenticado directamente en los handlers
pub struct AuthenticatedUser(pub AuthUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
