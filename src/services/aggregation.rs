// src/services/aggregation.rs

//! El agregador: colapsa las N filas de unidades de una empresa en un único
//! modelo de vista "bodega" listo para mostrar. Es una proyección pura, se
//! recalcula en cada fetch y tolera cualquier relación ausente o valor basura.

use crate::{
    common::{resolver::first_some, text::non_empty},
    models::{
        catalog::{CompanyBundle, Unit},
        warehouse::{
            LOCATION_MISSING_PART, LOCATION_UNSPECIFIED, PLACEHOLDER_IMAGE_URL, PriceRange,
            Warehouse,
        },
    },
};

pub fn build_warehouse(bundle: &CompanyBundle) -> Warehouse {
    let units = &bundle.units;
    let sizes = finite_sizes(units);

    Warehouse {
        id: bundle.company.id,
        name: bundle.company.name.clone(),
        description: bundle.description.clone(),
        location: location_label(units),
        cities: distinct_trimmed(units.iter().filter_map(|u| u.city.as_deref())),
        zones: distinct_trimmed(units.iter().filter_map(|u| u.zone.as_deref())),
        price_range: price_range(units),
        size_labels: sizes.iter().map(|s| format!("{s} m³")).collect(),
        sizes,
        images: image_list(bundle),
        features: distinct_trimmed(units.iter().flat_map(|u| u.features.iter().map(String::as_str))),
        units: units.clone(),
        // Sin unidades no hay nada que bloquee: disponible por defecto.
        available: units.is_empty() || units.iter().any(|u| u.available),
        total_units: units.iter().map(|u| u.quantity.max(1)).sum(),
    }
}

/// Rango de precios sobre las unidades con precio numérico; sin ninguna, {0,0}.
pub fn price_range(units: &[Unit]) -> PriceRange {
    let prices: Vec<f64> = units.iter().filter_map(|u| u.price).collect();
    if prices.is_empty() {
        return PriceRange::ZERO;
    }
    PriceRange {
        min: prices.iter().copied().fold(f64::INFINITY, f64::min),
        max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

fn finite_sizes(units: &[Unit]) -> Vec<f64> {
    units.iter().filter_map(|u| u.size_m3).collect()
}

/// Primera combinación "zona - ciudad" no vacía entre las unidades; la mitad
/// faltante se sustituye por un guion largo.
fn location_label(units: &[Unit]) -> String {
    units
        .iter()
        .find_map(|u| {
            let zone = non_empty(u.zone.as_deref());
            let city = non_empty(u.city.as_deref());
            if zone.is_none() && city.is_none() {
                return None;
            }
            Some(format!(
                "{} - {}",
                zone.unwrap_or(LOCATION_MISSING_PART),
                city.unwrap_or(LOCATION_MISSING_PART)
            ))
        })
        .unwrap_or_else(|| LOCATION_UNSPECIFIED.to_string())
}

/// Cadena de respaldo de imágenes: carrusel ordenado por posición, luego las
/// imágenes de las unidades, luego el placeholder. Nunca devuelve vacío.
fn image_list(bundle: &CompanyBundle) -> Vec<String> {
    let carousel = {
        let mut images = bundle.images.clone();
        images.sort_by_key(|i| i.position);
        let urls: Vec<String> = images.into_iter().map(|i| i.url).collect();
        (!urls.is_empty()).then_some(urls)
    };
    let unit_images = {
        let urls: Vec<String> = bundle
            .units
            .iter()
            .filter_map(|u| u.image_url.clone())
            .collect();
        (!urls.is_empty()).then_some(urls)
    };

    first_some([carousel, unit_images])
        .unwrap_or_else(|| vec![PLACEHOLDER_IMAGE_URL.to_string()])
}

/// Deduplica preservando el orden de llegada (recortado, sensible a mayúsculas).
fn distinct_trimmed<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.iter().any(|seen| seen == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{
        CarouselImage, Company, UnitRow, UnitStatus, VerificationStatus,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn company() -> Company {
        Company {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Bodegas del Valle".to_string(),
            city: Some("Cali".to_string()),
            verification_status: VerificationStatus::Verified,
            created_at: Utc::now(),
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

    fn bundle_with(units: Vec<UnitRow>) -> CompanyBundle {
        let company = company();
        CompanyBundle {
            units: units.into_iter().map(Unit::from).collect(),
            company,
            description: None,
            sites: vec![],
            images: vec![],
        }
    }

    #[test]
    fn rango_de_precios_ignora_valores_no_numericos() {
        let company_id = Uuid::new_v4();
        let mut a = unit_row(company_id);
        a.price = Some("900000".to_string());
        let mut b = unit_row(company_id);
        b.price = Some("1200000".to_string());
        let mut c = unit_row(company_id);
        c.price = Some("consultar".to_string());

        let warehouse = build_warehouse(&bundle_with(vec![a, b, c]));
        assert_eq!(
            warehouse.price_range,
            PriceRange { min: 900000.0, max: 1200000.0 }
        );
        assert!(warehouse.price_range.min <= warehouse.price_range.max);
    }

    #[test]
    fn sin_precios_numericos_el_rango_es_cero_cero() {
        let company_id = Uuid::new_v4();
        let mut a = unit_row(company_id);
        a.price = Some("a convenir".to_string());
        let b = unit_row(company_id);

        let warehouse = build_warehouse(&bundle_with(vec![a, b]));
        assert_eq!(warehouse.price_range, PriceRange::ZERO);

        let empty = build_warehouse(&bundle_with(vec![]));
        assert_eq!(empty.price_range, PriceRange::ZERO);
    }

    #[test]
    fn la_imagen_nunca_queda_vacia() {
        // Sin sedes, sin carrusel, sin unidades: cae al placeholder.
        let warehouse = build_warehouse(&bundle_with(vec![]));
        assert_eq!(warehouse.images, vec![PLACEHOLDER_IMAGE_URL.to_string()]);
    }

    #[test]
    fn el_carrusel_ordenado_gana_sobre_las_imagenes_de_unidades() {
        let company_id = Uuid::new_v4();
        let mut unit = unit_row(company_id);
        unit.image_url = Some("unidad.jpg".to_string());

        let mut bundle = bundle_with(vec![unit]);
        bundle.images = vec![
            CarouselImage {
                id: Uuid::new_v4(),
                company_id,
                url: "segunda.jpg".to_string(),
                position: 2,
            },
            CarouselImage {
                id: Uuid::new_v4(),
                company_id,
                url: "primera.jpg".to_string(),
                position: 1,
            },
        ];

        let warehouse = build_warehouse(&bundle);
        assert_eq!(warehouse.images, vec!["primera.jpg", "segunda.jpg"]);
    }

    #[test]
    fn sin_carrusel_se_usan_las_imagenes_de_las_unidades() {
        let company_id = Uuid::new_v4();
        let mut unit = unit_row(company_id);
        unit.image_url = Some("unidad.jpg".to_string());

        let warehouse = build_warehouse(&bundle_with(vec![unit]));
        assert_eq!(warehouse.images, vec!["unidad.jpg"]);
    }

    #[test]
    fn la_ubicacion_sustituye_la_mitad_faltante() {
        let company_id = Uuid::new_v4();
        let mut solo_zona = unit_row(company_id);
        solo_zona.zone = Some("Norte".to_string());

        let warehouse = build_warehouse(&bundle_with(vec![solo_zona]));
        assert_eq!(warehouse.location, "Norte - —");

        let mut completa = unit_row(company_id);
        completa.zone = Some("Norte".to_string());
        completa.city = Some("Cali".to_string());
        let warehouse = build_warehouse(&bundle_with(vec![completa]));
        assert_eq!(warehouse.location, "Norte - Cali");
    }

    #[test]
    fn sin_zona_ni_ciudad_la_ubicacion_es_no_especificada() {
        let warehouse = build_warehouse(&bundle_with(vec![]));
        assert_eq!(warehouse.location, LOCATION_UNSPECIFIED);
    }

    #[test]
    fn disponibilidad_por_defecto_sin_unidades() {
        assert!(build_warehouse(&bundle_with(vec![])).available);

        let company_id = Uuid::new_v4();
        let mut ocupada = unit_row(company_id);
        ocupada.available = false;
        assert!(!build_warehouse(&bundle_with(vec![ocupada])).available);

        let mut ocupada = unit_row(company_id);
        ocupada.available = false;
        let libre = unit_row(company_id);
        assert!(build_warehouse(&bundle_with(vec![ocupada, libre])).available);
    }

    #[test]
    fn ciudades_y_zonas_se_deduplican_recortadas() {
        let company_id = Uuid::new_v4();
        let mut a = unit_row(company_id);
        a.city = Some(" Cali".to_string());
        a.zone = Some("Norte".to_string());
        let mut b = unit_row(company_id);
        b.city = Some("Cali ".to_string());
        b.zone = Some("Sur".to_string());

        let warehouse = build_warehouse(&bundle_with(vec![a, b]));
        assert_eq!(warehouse.cities, vec!["Cali"]);
        assert_eq!(warehouse.zones, vec!["Norte", "Sur"]);
    }

    #[test]
    fn los_tamanos_no_numericos_quedan_fuera() {
        let company_id = Uuid::new_v4();
        let mut a = unit_row(company_id);
        a.size = Some("12".to_string());
        let mut b = unit_row(company_id);
        b.size = Some("grande".to_string());

        let warehouse = build_warehouse(&bundle_with(vec![a, b]));
        assert_eq!(warehouse.sizes, vec![12.0]);
        assert_eq!(warehouse.size_labels, vec!["12 m³"]);
    }

    #[test]
    fn el_total_cuenta_la_cantidad_de_cada_fila() {
        let company_id = Uuid::new_v4();
        let mut a = unit_row(company_id);
        a.quantity = 3;
        let b = unit_row(company_id);

        let warehouse = build_warehouse(&bundle_with(vec![a, b]));
        assert_eq!(warehouse.total_units, 4);
    }
}
