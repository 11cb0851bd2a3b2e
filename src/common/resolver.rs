// src/common/resolver.rs

//! Resolución por primer acierto.
//!
//! Varias partes del dominio eligen "el primero que sirva" dentro de una
//! cadena ordenada de alternativas: la sede actual, la imagen principal.
//! En vez de repetir cadenas de `if let` en cada sitio, las alternativas se
//! expresan como una lista ordenada de `Option` y gana el primer `Some`.

/// Devuelve el primer `Some` de una secuencia ordenada de candidatos.
pub fn first_some<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    candidates.into_iter().flatten().next()
}

#[cfg(test)]
mod tests {
    use super::first_some;

    #[test]
    fn gana_el_primer_some() {
        assert_eq!(first_some([None, Some(2), Some(3)]), Some(2));
        assert_eq!(first_some([Some(1), Some(2)]), Some(1));
    }

    #[test]
    fn sin_aciertos_devuelve_none() {
        assert_eq!(first_some::<i32>([None, None, None]), None);
        assert_eq!(first_some::<i32>([]), None);
    }
}
