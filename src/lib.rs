// ============================================================================
// LazyConvert - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod models;    // Table des taux, historique, options
pub mod engine;    // Moteur de conversion
pub mod config;    // Configuration de démarrage
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
