// src/services/site_resolver.rs

//! Elige la sede "actual" de una empresa a partir de pistas opcionales de la
//! URL. Función pura y determinista: devuelve `None` solo si la empresa no
//! tiene sedes. La cadena de prioridades, primer acierto gana:
//!
//! 1. sede cuyo id coincide con la pista,
//! 2. sede en la ciudad pista (preferida una con dirección),
//! 3. sede con dirección,
//! 4. sede marcada como principal,
//! 5. la primera de la lista.

use crate::{
    common::{
        resolver::first_some,
        text::{eq_ci, non_empty},
    },
    models::{catalog::Site, warehouse::SiteHints},
};

pub fn resolve_site<'a>(sites: &'a [Site], hints: &SiteHints) -> Option<&'a Site> {
    first_some([
        hints
            .site_id
            .and_then(|id| sites.iter().find(|s| s.id == id)),
        // Una pista de ciudad en blanco cuenta como ausente, igual que en el
        // filtro de unidades.
        non_empty(hints.city.as_deref()).and_then(|city| site_by_city(sites, city)),
        sites.iter().find(|s| s.has_address()),
        sites.iter().find(|s| s.is_primary),
        sites.first(),
    ])
}

fn site_by_city<'a>(sites: &'a [Site], city: &str) -> Option<&'a Site> {
    first_some([
        sites
            .iter()
            .find(|s| in_city(s, city) && s.has_address()),
        sites.iter().find(|s| in_city(s, city)),
    ])
}

fn in_city(site: &Site, city: &str) -> bool {
    site.city.as_deref().is_some_and(|c| eq_ci(c, city))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn site(name: &str, city: Option<&str>, address: Option<&str>, is_primary: bool) -> Site {
        Site {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: name.to_string(),
            city: city.map(str::to_string),
            address: address.map(str::to_string),
            zone: None,
            is_primary,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sin_sedes_devuelve_none() {
        assert!(resolve_site(&[], &SiteHints::default()).is_none());
        let hints = SiteHints {
            site_id: Some(Uuid::new_v4()),
            city: Some("Cali".to_string()),
        };
        assert!(resolve_site(&[], &hints).is_none());
    }

    #[test]
    fn la_pista_de_id_gana_sobre_todo() {
        let sites = vec![
            site("principal", Some("Cali"), Some("Cra 1"), true),
            site("secundaria", Some("Bogotá"), None, false),
        ];
        let hints = SiteHints {
            site_id: Some(sites[1].id),
            city: Some("Cali".to_string()),
        };
        assert_eq!(resolve_site(&sites, &hints).unwrap().id, sites[1].id);
    }

    #[test]
    fn en_la_ciudad_pista_se_prefiere_la_sede_con_direccion() {
        // Dos sedes en Cali, gana la que tiene dirección.
        let sites = vec![
            site("A", Some("Cali"), Some(""), false),
            site("B", Some("Cali"), Some("Cra 1"), false),
        ];
        let hints = SiteHints {
            site_id: None,
            city: Some("Cali".to_string()),
        };
        assert_eq!(resolve_site(&sites, &hints).unwrap().name, "B");
    }

    #[test]
    fn una_ciudad_en_blanco_cuenta_como_ausente() {
        // Con ?city= vacío no debe activarse el paso de ciudad: sin la
        // normalización ganaría la sede cuya ciudad también está en blanco.
        let sites = vec![
            site("fantasma", Some(""), None, false),
            site("real", Some("Cali"), Some("Cra 1"), false),
        ];
        for city in ["", "   "] {
            let hints = SiteHints {
                site_id: None,
                city: Some(city.to_string()),
            };
            assert_eq!(resolve_site(&sites, &hints).unwrap().name, "real");
        }
    }

    #[test]
    fn la_ciudad_se_compara_sin_mayusculas() {
        let sites = vec![
            site("lejos", Some("Bogotá"), Some("Calle 9"), false),
            site("cerca", Some("Cali"), None, false),
        ];
        let hints = SiteHints {
            site_id: None,
            city: Some("  CALI ".to_string()),
        };
        assert_eq!(resolve_site(&sites, &hints).unwrap().name, "cerca");
    }

    #[test]
    fn sin_pistas_gana_la_direccion_luego_la_principal_luego_la_primera() {
        let con_direccion = vec![
            site("sin dir", None, None, false),
            site("con dir", None, Some("Av 3 # 4-5"), false),
        ];
        assert_eq!(
            resolve_site(&con_direccion, &SiteHints::default()).unwrap().name,
            "con dir"
        );

        let solo_principal = vec![
            site("a", None, None, false),
            site("b", None, Some("   "), true),
        ];
        assert_eq!(
            resolve_site(&solo_principal, &SiteHints::default()).unwrap().name,
            "b"
        );

        let ninguna = vec![site("primera", None, None, false), site("otra", None, None, false)];
        assert_eq!(
            resolve_site(&ninguna, &SiteHints::default()).unwrap().name,
            "primera"
        );
    }

    #[test]
    fn la_resolucion_es_determinista() {
        let sites = vec![
            site("A", Some("Cali"), None, false),
            site("B", Some("Cali"), Some("Cra 1"), true),
        ];
        let hints = SiteHints {
            site_id: None,
            city: Some("Cali".to_string()),
        };
        let first = resolve_site(&sites, &hints).unwrap().id;
        for _ in 0..5 {
            assert_eq!(resolve_site(&sites, &hints).unwrap().id, first);
        }
    }
}
