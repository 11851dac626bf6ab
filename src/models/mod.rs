// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
// ============================================================================

pub mod rates;   // Table des taux de change
pub mod history; // Enregistrements de l'historique
pub mod options; // Précision et mode inverse

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazyconvert::models::rates::RateTable;
// On peut faire : use lazyconvert::models::RateTable;
pub use history::HistoryRecord;
pub use options::{ConversionOptions, Precision};
pub use rates::{RateEntry, RateTable, RateTableError, REFERENCE_CURRENCY, STANDARD_RATES};
