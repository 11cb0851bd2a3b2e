// src/services/filters.rs

//! Los dos filtros del pipeline: unidades (pantalla de detalle) y catálogo
//! (pantalla de listado). Todos los criterios activos se combinan con AND y
//! un criterio ausente no excluye nada, así que el orden de aplicación no
//! puede cambiar el resultado.

use crate::{
    common::text::{contains_ci, eq_ci, non_empty},
    models::{
        catalog::{Site, Unit},
        warehouse::{CatalogFilters, UnitFilters, Warehouse},
    },
};

// ---
// Filtro de unidades
// ---

pub fn filter_units(units: &[Unit], site: Option<&Site>, filters: &UnitFilters) -> Vec<Unit> {
    units
        .iter()
        .filter(|u| unit_matches(u, site, filters))
        .cloned()
        .collect()
}

fn unit_matches(unit: &Unit, site: Option<&Site>, filters: &UnitFilters) -> bool {
    if let Some(site) = site {
        // Una unidad sin referencia de sede no puede coincidir con una sede
        // concreta: queda fuera siempre que hay sede resuelta.
        if unit.site_id != Some(site.id) {
            return false;
        }
    }
    if let Some(city) = non_empty(filters.city.as_deref()) {
        if !unit.city.as_deref().is_some_and(|c| eq_ci(c, city)) {
            return false;
        }
    }
    if let Some(zone) = non_empty(filters.zone.as_deref()) {
        if !unit.zone.as_deref().is_some_and(|z| eq_ci(z, zone)) {
            return false;
        }
    }
    true
}

// ---
// Filtro de catálogo
// ---

pub fn filter_catalog(warehouses: Vec<Warehouse>, filters: &CatalogFilters) -> Vec<Warehouse> {
    warehouses
        .into_iter()
        .filter(|w| warehouse_matches(w, filters))
        .collect()
}

fn warehouse_matches(warehouse: &Warehouse, filters: &CatalogFilters) -> bool {
    if let Some(city) = non_empty(filters.city.as_deref()) {
        if !contains_ci(&warehouse.location, city) {
            return false;
        }
    }
    if let Some(max_price) = filters.max_price {
        // El techo se compara contra el precio mínimo: la bodega pasa si al
        // menos una unidad es asequible.
        if warehouse.price_range.min > max_price {
            return false;
        }
    }
    if let Some(bucket) = filters.size {
        if !warehouse.sizes.iter().any(|s| bucket.contains(*s)) {
            return false;
        }
    }
    let keywords: Vec<&str> = filters
        .features
        .iter()
        .filter_map(|f| non_empty(Some(f)))
        .collect();
    if !keywords.is_empty() {
        let any_match = keywords.iter().any(|keyword| {
            warehouse
                .features
                .iter()
                .any(|feature| contains_ci(feature, keyword))
        });
        if !any_match {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        catalog::UnitStatus,
        warehouse::{PriceRange, SizeBucket},
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn unit(site_id: Option<Uuid>, city: Option<&str>, zone: Option<&str>) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            site_id,
            name: None,
            size_m3: None,
            price: None,
            city: city.map(str::to_string),
            zone: zone.map(str::to_string),
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

    fn site(id: Uuid) -> Site {
        Site {
            id,
            company_id: Uuid::new_v4(),
            name: "sede".to_string(),
            city: None,
            address: None,
            zone: None,
            is_primary: false,
            created_at: Utc::now(),
        }
    }

    fn warehouse(location: &str, max: f64, sizes: Vec<f64>, features: Vec<&str>) -> Warehouse {
        Warehouse {
            id: Uuid::new_v4(),
            name: "bodega".to_string(),
            description: None,
            location: location.to_string(),
            cities: vec![],
            zones: vec![],
            price_range: PriceRange { min: max / 2.0, max },
            size_labels: sizes.iter().map(|s| format!("{s} m³")).collect(),
            sizes,
            images: vec![],
            features: features.into_iter().map(str::to_string).collect(),
            units: vec![],
            available: true,
            total_units: 0,
        }
    }

    #[test]
    fn sin_filtros_activos_es_la_identidad() {
        let units = vec![
            unit(None, Some("Cali"), None),
            unit(Some(Uuid::new_v4()), None, Some("Norte")),
        ];
        let result = filter_units(&units, None, &UnitFilters::default());
        let ids: Vec<Uuid> = result.iter().map(|u| u.id).collect();
        let expected: Vec<Uuid> = units.iter().map(|u| u.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn con_sede_resuelta_nunca_pasa_una_unidad_sin_sede() {
        let site_id = Uuid::new_v4();
        let units = vec![
            unit(Some(site_id), None, None),
            unit(None, None, None),
            unit(Some(Uuid::new_v4()), None, None),
        ];
        let result = filter_units(&units, Some(&site(site_id)), &UnitFilters::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].site_id, Some(site_id));
        assert!(result.iter().all(|u| u.site_id.is_some()));
    }

    #[test]
    fn ciudad_y_zona_componen_con_and() {
        let units = vec![
            unit(None, Some("Cali"), Some("Norte")),
            unit(None, Some("Cali"), Some("Sur")),
            unit(None, Some("Bogotá"), Some("Norte")),
        ];
        let filters = UnitFilters {
            city: Some("cali".to_string()),
            zone: Some("NORTE".to_string()),
        };
        let result = filter_units(&units, None, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city.as_deref(), Some("Cali"));
        assert_eq!(result[0].zone.as_deref(), Some("Norte"));
    }

    #[test]
    fn el_techo_de_precio_excluye_solo_los_rangos_que_empiezan_por_encima() {
        let filters = CatalogFilters {
            max_price: Some(1000000.0),
            ..Default::default()
        };

        // min 1_250_000: ni la unidad más barata es asequible.
        let list = vec![warehouse("Norte - Cali", 2500000.0, vec![], vec![])];
        assert!(filter_catalog(list, &filters).is_empty());

        // min 900_000: pasa aunque el máximo supere el techo.
        let list = vec![warehouse("Sur - Cali", 1800000.0, vec![], vec![])];
        assert_eq!(filter_catalog(list, &filters).len(), 1);
    }

    #[test]
    fn el_techo_de_precio_compara_contra_el_minimo_del_rango() {
        let mut asequible = warehouse("Sur - Cali", 1800000.0, vec![], vec![]);
        asequible.price_range = PriceRange {
            min: 900000.0,
            max: 1800000.0,
        };
        let mut cara = warehouse("Norte - Cali", 2500000.0, vec![], vec![]);
        cara.price_range = PriceRange {
            min: 1200000.0,
            max: 2500000.0,
        };

        let filters = CatalogFilters {
            max_price: Some(1000000.0),
            ..Default::default()
        };
        let result = filter_catalog(vec![asequible, cara], &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].location, "Sur - Cali");
    }

    #[test]
    fn la_ciudad_filtra_por_subcadena_sobre_la_ubicacion() {
        let list = vec![
            warehouse("Norte - Cali", 100.0, vec![], vec![]),
            warehouse("Chapinero - Bogotá", 100.0, vec![], vec![]),
        ];
        let filters = CatalogFilters {
            city: Some("cali".to_string()),
            ..Default::default()
        };
        let result = filter_catalog(list, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].location, "Norte - Cali");
    }

    #[test]
    fn el_balde_de_tamano_acepta_cualquier_tamano_dentro_del_rango() {
        let list = vec![
            warehouse("a", 100.0, vec![3.0], vec![]),
            warehouse("b", 100.0, vec![8.0, 20.0], vec![]),
        ];
        let filters = CatalogFilters {
            size: Some(SizeBucket::Medium),
            ..Default::default()
        };
        let result = filter_catalog(list, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].location, "b");
    }

    #[test]
    fn los_baldes_de_tamano_son_disjuntos() {
        for (size, expected) in [
            (4.9, SizeBucket::Small),
            (5.0, SizeBucket::Medium),
            (14.9, SizeBucket::Medium),
            (15.0, SizeBucket::Large),
        ] {
            for bucket in [SizeBucket::Small, SizeBucket::Medium, SizeBucket::Large] {
                assert_eq!(bucket.contains(size), bucket == expected);
            }
        }
    }

    #[test]
    fn basta_una_palabra_clave_que_coincida_con_una_caracteristica() {
        let list = vec![
            warehouse("a", 100.0, vec![], vec!["Vigilancia 24 horas", "Seguro incluido"]),
            warehouse("b", 100.0, vec![], vec!["Acceso vehicular"]),
        ];
        let filters = CatalogFilters {
            features: vec!["vigilancia".to_string(), "montacargas".to_string()],
            ..Default::default()
        };
        let result = filter_catalog(list, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].location, "a");
    }

    #[test]
    fn el_orden_de_aplicacion_no_cambia_el_resultado() {
        let list = vec![
            warehouse("Norte - Cali", 900000.0, vec![], vec![]),
            warehouse("Sur - Cali", 2500000.0, vec![], vec![]),
            warehouse("Chapinero - Bogotá", 800000.0, vec![], vec![]),
        ];

        let solo_ciudad = CatalogFilters {
            city: Some("cali".to_string()),
            ..Default::default()
        };
        let solo_precio = CatalogFilters {
            max_price: Some(1000000.0),
            ..Default::default()
        };

        let ciudad_luego_precio: Vec<Uuid> =
            filter_catalog(filter_catalog(list.clone(), &solo_ciudad), &solo_precio)
                .iter()
                .map(|w| w.id)
                .collect();
        let precio_luego_ciudad: Vec<Uuid> =
            filter_catalog(filter_catalog(list, &solo_precio), &solo_ciudad)
                .iter()
                .map(|w| w.id)
                .collect();

        assert_eq!(ciudad_luego_precio, precio_luego_ciudad);
        assert_eq!(ciudad_luego_precio.len(), 1);
    }
}
