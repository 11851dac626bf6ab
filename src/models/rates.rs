// ============================================================================
// Structure : RateTable
// ============================================================================
// Table immuable des taux de change, exprimés par rapport à une devise
// de référence (USD, taux 1.0)
//
// CONCEPTS RUST :
// 1. Vec<T> ordonné : garde l'ordre d'insertion pour l'affichage
// 2. Constructeur faillible : Result<Self, E> valide les invariants
// 3. Pas de méthode &mut self : la table ne change plus après création
// ============================================================================

use thiserror::Error;

/// Devise de référence de la table standard
pub const REFERENCE_CURRENCY: &str = "USD";

/// Taux standards : unités de chaque devise pour 1 USD
///
/// CONCEPT RUST : const array de tuples
/// - Stocké dans le binaire, aucune allocation
/// - L'ordre est celui des sélecteurs de l'interface
pub const STANDARD_RATES: [(&str, f64); 9] = [
    ("USD", 1.0),
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("JPY", 110.0),
    ("CAD", 1.25),
    ("AUD", 1.35),
    ("CHF", 0.92),
    ("CNY", 6.45),
    ("UAH", 37.0),
];

/// Une entrée de la table : code devise + taux
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    /// Code de la devise (ex: "EUR")
    pub code: String,

    /// Unités de cette devise pour une unité de la devise de référence
    pub rate: f64,
}

/// Erreurs de construction d'une table de taux
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateTableError {
    #[error("devise en double dans la table : {0}")]
    DuplicateCurrency(String),

    #[error("taux invalide pour {code} : {rate} (doit être fini et > 0)")]
    InvalidRate { code: String, rate: f64 },

    #[error("devise de référence absente de la table : {0}")]
    MissingReference(String),

    #[error("la devise de référence {code} doit avoir un taux de 1.0 (trouvé {rate})")]
    ReferenceNotUnit { code: String, rate: f64 },
}

/// Table des taux de change
#[derive(Debug, Clone)]
pub struct RateTable {
    reference: String,
    entries: Vec<RateEntry>,
}

impl RateTable {
    /// Construit une table en vérifiant ses invariants
    ///
    /// - chaque code est unique
    /// - chaque taux est fini et strictement positif
    /// - la devise de référence est présente avec un taux de 1.0
    pub fn new<I, S>(reference: &str, entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table: Vec<RateEntry> = Vec::new();

        for (code, rate) in entries {
            let code = code.into();

            if table.iter().any(|entry| entry.code == code) {
                return Err(RateTableError::DuplicateCurrency(code));
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(RateTableError::InvalidRate { code, rate });
            }

            table.push(RateEntry { code, rate });
        }

        match table.iter().find(|entry| entry.code == reference) {
            None => return Err(RateTableError::MissingReference(reference.to_string())),
            Some(entry) if entry.rate != 1.0 => {
                return Err(RateTableError::ReferenceNotUnit {
                    code: entry.code.clone(),
                    rate: entry.rate,
                })
            }
            Some(_) => {}
        }

        Ok(Self {
            reference: reference.to_string(),
            entries: table,
        })
    }

    /// Table standard à neuf devises (USD de référence)
    pub fn standard() -> Self {
        Self {
            reference: REFERENCE_CURRENCY.to_string(),
            entries: STANDARD_RATES
                .iter()
                .map(|&(code, rate)| RateEntry {
                    code: code.to_string(),
                    rate,
                })
                .collect(),
        }
    }

    /// Retourne le taux d'une devise, None si elle est inconnue
    ///
    /// CONCEPT RUST : Option<T> plutôt qu'une erreur
    /// - Le moteur transforme None en UnknownCurrency
    /// - La table ne connaît pas les erreurs de conversion
    pub fn get(&self, code: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.rate)
    }

    /// Vérifie si une devise est dans la table
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Codes des devises dans l'ordre d'insertion
    pub fn codes(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.code.as_str()).collect()
    }

    /// Code de la devise de référence
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Nombre de devises
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = RateTable::standard();

        assert_eq!(table.len(), 9);
        assert_eq!(table.reference(), "USD");
        assert_eq!(table.get("USD"), Some(1.0));
        assert_eq!(table.get("JPY"), Some(110.0));
        assert_eq!(table.get("UAH"), Some(37.0));
        assert_eq!(
            table.codes(),
            vec!["USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "UAH"]
        );
    }

    #[test]
    fn test_standard_table_satisfies_invariants() {
        // Reconstruire la table standard via new() ne doit pas échouer
        let rebuilt = RateTable::new(REFERENCE_CURRENCY, STANDARD_RATES);
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_unknown_code() {
        let table = RateTable::standard();
        assert_eq!(table.get("XXX"), None);
        assert!(!table.contains("XXX"));
        // Les codes sont sensibles à la casse
        assert!(!table.contains("usd"));
    }

    #[test]
    fn test_custom_table() {
        let table = RateTable::new("USD", [("USD", 1.0), ("EUR", 0.85)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("EUR"), Some(0.85));
    }

    #[test]
    fn test_rejects_duplicate() {
        let result = RateTable::new("USD", [("USD", 1.0), ("EUR", 0.85), ("EUR", 0.9)]);
        assert_eq!(
            result.unwrap_err(),
            RateTableError::DuplicateCurrency("EUR".to_string())
        );
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        assert!(matches!(
            RateTable::new("USD", [("USD", 1.0), ("EUR", 0.0)]),
            Err(RateTableError::InvalidRate { .. })
        ));
        assert!(matches!(
            RateTable::new("USD", [("USD", 1.0), ("EUR", -2.0)]),
            Err(RateTableError::InvalidRate { .. })
        ));
        assert!(matches!(
            RateTable::new("USD", [("USD", 1.0), ("EUR", f64::NAN)]),
            Err(RateTableError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_reference_rules() {
        assert_eq!(
            RateTable::new("USD", [("EUR", 0.85)]).unwrap_err(),
            RateTableError::MissingReference("USD".to_string())
        );
        assert!(matches!(
            RateTable::new("USD", [("USD", 2.0)]),
            Err(RateTableError::ReferenceNotUnit { .. })
        ));
    }
}
