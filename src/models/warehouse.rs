// src/models/warehouse.rs
//
// El modelo de vista "bodega": una proyección pura por empresa, recalculada en
// cada fetch. No se persiste nunca.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::catalog::{Site, Unit};

/// Imagen de respaldo cuando ni el carrusel ni las unidades aportan una.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1565610222536-ef125c59da2e?w=800&q=80";

/// Etiqueta cuando ninguna unidad tiene zona ni ciudad.
pub const LOCATION_UNSPECIFIED: &str = "Ubicación no especificada";

/// Sustituto de la mitad faltante en "zona - ciudad".
pub const LOCATION_MISSING_PART: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const ZERO: PriceRange = PriceRange { min: 0.0, max: 0.0 };
}

// Rangos fijos y disjuntos sobre el tamaño numérico en m³.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub fn contains(self, size_m3: f64) -> bool {
        match self {
            SizeBucket::Small => size_m3 < 5.0,
            SizeBucket::Medium => (5.0..15.0).contains(&size_m3),
            SizeBucket::Large => size_m3 >= 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Primera combinación "zona - ciudad" encontrada entre las unidades.
    pub location: String,
    pub cities: Vec<String>,
    pub zones: Vec<String>,
    pub price_range: PriceRange,
    pub sizes: Vec<f64>,
    pub size_labels: Vec<String>,
    /// Nunca vacía: carrusel, o imágenes de unidades, o el placeholder.
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub units: Vec<Unit>,
    pub available: bool,
    pub total_units: i32,
}

// Respuesta del detalle: el modelo de vista más la sede resuelta y las
// unidades ya filtradas para esa sede.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDetail {
    pub warehouse: Warehouse,
    pub site: Option<Site>,
    pub units: Vec<Unit>,
}

// ---
// Criterios de filtrado
// ---

/// Criterios del catálogo (pantalla de listado). Un criterio ausente no
/// excluye nada; los activos se combinan con AND.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilters {
    pub city: Option<String>,
    pub max_price: Option<f64>,
    pub size: Option<SizeBucket>,
    pub features: Vec<String>,
}

/// Filtros de unidades en la pantalla de detalle.
#[derive(Debug, Clone, Default)]
pub struct UnitFilters {
    pub city: Option<String>,
    pub zone: Option<String>,
}

/// Pistas opcionales (parámetros de URL) para resolver la sede "actual".
#[derive(Debug, Clone, Default)]
pub struct SiteHints {
    pub site_id: Option<Uuid>,
    pub city: Option<String>,
}
