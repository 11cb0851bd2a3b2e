// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Empresa (el "dueño" de las mini bodegas)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

// Verificación de documentación por parte del administrador.
// 'pending' es el único estado desde el cual se permite transicionar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "verification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn can_transition(self, to: VerificationStatus) -> bool {
        matches!(
            (self, to),
            (VerificationStatus::Pending, VerificationStatus::Verified)
                | (VerificationStatus::Pending, VerificationStatus::Rejected)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

// ---
// 2. Sede (la ubicación física de una empresa)
// ---
// Una empresa puede tener varias sedes; a lo sumo una debería ser principal,
// pero el pipeline no depende de que eso se cumpla.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub zone: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl Site {
    pub fn has_address(&self) -> bool {
        self.address
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty())
    }
}

// ---
// 3. Estado de una mini bodega
// ---
// Enum plano: el proveedor/administrador lo asigna libremente, no hay grafo
// de transiciones con sentido para las unidades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "unit_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Active,
    Disabled,
    Occupied,
    Maintenance,
}

// ---
// 4. Mini bodega: fila cruda vs. modelo canónico
// ---
// El sistema de origen guarda price/size como texto libre. La fila cruda
// conserva ese texto y la conversión a número pasa UNA sola vez, aquí en la
// frontera, antes de que el resto del código la vea.
#[derive(Debug, Clone, FromRow)]
pub struct UnitRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub site_id: Option<Uuid>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub price: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub address: Option<String>,
    pub available: bool,
    pub status: UnitStatus,
    pub features: Vec<String>,
    pub quantity: i32,
    pub unavailable_reason: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: Uuid,
    pub company_id: Uuid,
    pub site_id: Option<Uuid>,
    pub name: Option<String>,
    /// Tamaño en m³, si el texto original era numérico.
    pub size_m3: Option<f64>,
    /// Precio mensual, si el texto original era numérico.
    pub price: Option<f64>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub address: Option<String>,
    pub available: bool,
    pub status: UnitStatus,
    pub features: Vec<String>,
    pub quantity: i32,
    pub unavailable_reason: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UnitRow> for Unit {
    fn from(row: UnitRow) -> Self {
        Unit {
            id: row.id,
            company_id: row.company_id,
            site_id: row.site_id,
            name: row.name,
            size_m3: parse_finite(row.size.as_deref()),
            price: parse_finite(row.price.as_deref()),
            city: row.city,
            zone: row.zone,
            address: row.address,
            available: row.available,
            status: row.status,
            features: row.features,
            quantity: row.quantity,
            unavailable_reason: row.unavailable_reason,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Intenta leer un número finito de un campo de texto libre.
/// Los valores no numéricos quedan fuera de los agregados, sin error.
pub fn parse_finite(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

// ---
// 5. Imagen del carrusel de una empresa
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    pub id: Uuid,
    pub company_id: Uuid,
    pub url: String,
    pub position: i32,
}

// ---
// 6. Paquete de filas de una empresa (salida del Row Fetcher)
// ---
// Proyección tipada del read con joins: una empresa con todas sus relaciones
// ya agrupadas. Las relaciones ausentes son vectores vacíos, nunca un error.
#[derive(Debug, Clone)]
pub struct CompanyBundle {
    pub company: Company,
    pub description: Option<String>,
    pub sites: Vec<Site>,
    pub units: Vec<Unit>,
    pub images: Vec<CarouselImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_finite_acepta_numeros_con_espacios() {
        assert_eq!(parse_finite(Some(" 900000 ")), Some(900000.0));
        assert_eq!(parse_finite(Some("12.5")), Some(12.5));
    }

    #[test]
    fn parse_finite_descarta_basura() {
        assert_eq!(parse_finite(Some("consultar")), None);
        assert_eq!(parse_finite(Some("")), None);
        assert_eq!(parse_finite(Some("NaN")), None);
        assert_eq!(parse_finite(Some("inf")), None);
        assert_eq!(parse_finite(None), None);
    }

    #[test]
    fn verificacion_solo_transiciona_desde_pending() {
        use VerificationStatus::*;

        assert!(Pending.can_transition(Verified));
        assert!(Pending.can_transition(Rejected));
        assert!(!Verified.can_transition(Rejected));
        assert!(!Rejected.can_transition(Verified));
        assert!(!Verified.can_transition(Pending));
    }
}
