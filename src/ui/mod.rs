// ============================================================================
// Module : ui
// ============================================================================
// Couche de présentation : lit l'état de App, ne contient aucune logique
// de conversion
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod converter; // Rendu de l'interface principale
pub mod history;   // Panneau d'historique à onglets

// Re-exports pour simplifier les imports
pub use converter::render;
pub use events::{Event, EventHandler};
