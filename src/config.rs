// ============================================================================
// Configuration
// ============================================================================
// Valeurs de départ de l'interface (montant, devises, précision, mode inverse)
// lues depuis un fichier JSON optionnel
//
// Emplacement :
// - $LAZYCONVERT_CONFIG si la variable est définie
// - sinon <config_dir>/lazyconvert/config.json
//   (Linux : ~/.config/lazyconvert/config.json)
//
// CONCEPTS RUST :
// 1. #[serde(default)] : les champs absents prennent la valeur par défaut
// 2. anyhow::Context : messages d'erreur avec le chemin du fichier
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{ConversionOptions, Precision, RateTable};

/// Variable d'environnement pour forcer le chemin du fichier
pub const CONFIG_ENV_VAR: &str = "LAZYCONVERT_CONFIG";

/// Configuration de l'application
///
/// Exemple de fichier :
/// ```json
/// { "amount": "250", "from": "EUR", "to": "JPY", "precision": 4, "reverse": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Montant initial du champ de saisie
    pub amount: String,

    /// Devise source initiale
    pub from: String,

    /// Devise cible initiale
    pub to: String,

    /// Décimales du montant converti (2 ou 4)
    pub precision: usize,

    /// Conversion inverse activée au démarrage
    pub reverse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            amount: "100".to_string(),
            from: "USD".to_string(),
            to: "EUR".to_string(),
            precision: 2,
            reverse: false,
        }
    }
}

impl Config {
    /// Chemin du fichier de configuration
    ///
    /// CONCEPT RUST : Option chaining
    /// - dirs::config_dir() peut retourner None (environnement minimal)
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("lazyconvert").join("config.json"))
    }

    /// Charge la configuration depuis un fichier
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Configuration invalide dans {}", path.display()))
    }

    /// Parse une configuration JSON
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Échec du parsing JSON de la configuration")
    }

    /// Charge la configuration, ou les valeurs par défaut
    ///
    /// CONCEPT : Configuration non bloquante
    /// - Fichier absent : défauts, sans bruit
    /// - Fichier illisible ou invalide : warning dans les logs + défauts
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!(?path, "No config file, using defaults");
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                info!(?path, "Configuration loaded");
                config
            }
            Err(e) => {
                warn!(?path, error = ?e, "Failed to load configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Remplace les valeurs incohérentes avec la table par les défauts
    ///
    /// - devise inconnue → USD / EUR
    /// - précision autre que 2 ou 4 → 2
    pub fn validated(mut self, rates: &RateTable) -> Self {
        let defaults = Self::default();

        if !rates.contains(&self.from) {
            warn!(currency = %self.from, "Unknown source currency in config");
            self.from = defaults.from;
        }
        if !rates.contains(&self.to) {
            warn!(currency = %self.to, "Unknown target currency in config");
            self.to = defaults.to;
        }
        if Precision::from_decimals(self.precision).is_none() {
            warn!(precision = self.precision, "Unsupported precision in config");
            self.precision = defaults.precision;
        }

        self
    }

    /// Options de conversion correspondantes
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            precision: Precision::from_decimals(self.precision).unwrap_or_default(),
            reverse: self.reverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.amount, "100");
        assert_eq!(config.from, "USD");
        assert_eq!(config.to, "EUR");
        assert_eq!(config.conversion_options(), ConversionOptions::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "to": "JPY", "precision": 4 }"#).unwrap();
        assert_eq!(config.from, "USD");
        assert_eq!(config.to, "JPY");
        assert_eq!(config.conversion_options().precision, Precision::High);
        assert!(!config.reverse);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Config::from_json("{ not json").is_err());
    }

    #[test]
    fn test_validated_replaces_unknown_values() {
        let config = Config {
            from: "XXX".to_string(),
            to: "GBP".to_string(),
            precision: 3,
            ..Config::default()
        }
        .validated(&RateTable::standard());

        assert_eq!(config.from, "USD");
        assert_eq!(config.to, "GBP");
        assert_eq!(config.precision, 2);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/lazyconvert/config.json"));
        assert!(result.is_err());
    }
}
