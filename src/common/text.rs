// src/common/text.rs

//! Comparaciones tolerantes sobre texto libre.
//!
//! Los campos de ciudad/zona/características llegan escritos a mano; todas
//! las comparaciones del pipeline recortan espacios e ignoran mayúsculas.

/// Recorta espacios y descarta cadenas vacías.
pub fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

/// Igualdad recortada e insensible a mayúsculas.
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Búsqueda de subcadena insensible a mayúsculas.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_descarta_espacios() {
        assert_eq!(non_empty(Some("  Cali ")), Some("Cali"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn eq_ci_ignora_mayusculas_y_bordes() {
        assert!(eq_ci(" CALI", "cali "));
        assert!(!eq_ci("Cali", "Bogotá"));
    }

    #[test]
    fn contains_ci_busca_subcadenas() {
        assert!(contains_ci("Norte - Cali", "cali"));
        assert!(contains_ci("Norte - Cali", " NORTE"));
        assert!(!contains_ci("Norte - Cali", "bogotá"));
    }
}
