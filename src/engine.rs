// ============================================================================
// Moteur de conversion
// ============================================================================
// Convertit un montant d'une devise à une autre et tient l'historique
//
// CONCEPTS RUST :
// 1. Erreurs typées avec thiserror : l'UI distingue les cas d'erreur
// 2. Ownership : le moteur possède la table et l'historique
// 3. Aucun état global : tout passe par &self / &mut self
// ============================================================================

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{ConversionOptions, HistoryRecord, Precision, RateTable};

/// Erreurs de conversion
///
/// CONCEPT RUST : thiserror
/// - #[error(...)] génère l'implémentation de Display
/// - Les deux variantes sont récupérables : l'état n'est pas modifié
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Le texte saisi n'est pas un nombre réel fini
    #[error("montant invalide : {0:?}")]
    InvalidAmount(String),

    /// Code devise absent de la table
    #[error("devise inconnue : {0}")]
    UnknownCurrency(String),
}

/// Result spécialisé pour le moteur
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Résultat complet d'une action "Convert"
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    /// Montant saisi
    pub amount: f64,

    /// Montant converti dans la devise cible
    pub converted: f64,

    /// Conversion inverse (cible → source), si le mode inverse est actif
    pub reverse: Option<f64>,

    /// Taux effectif (converti / montant)
    pub effective_rate: f64,

    /// Texte affiché à l'utilisateur (1 ou 2 lignes)
    pub text: String,

    /// Moment de la conversion
    pub timestamp: DateTime<Local>,
}

/// Moteur de conversion : table des taux + historique de session
///
/// CONCEPT RUST : Champs privés
/// - L'UI ne peut pas modifier la table ou l'historique directement
/// - Toutes les modifications passent par les méthodes publiques
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    rates: RateTable,
    history: Vec<HistoryRecord>,
    options: ConversionOptions,
}

impl ConversionEngine {
    /// Crée un moteur avec une table donnée et un historique vide
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates,
            history: Vec::new(),
            options: ConversionOptions::default(),
        }
    }

    /// Crée un moteur avec des options initiales
    pub fn with_options(rates: RateTable, options: ConversionOptions) -> Self {
        Self {
            rates,
            history: Vec::new(),
            options,
        }
    }

    // ========================================================================
    // Table des taux
    // ========================================================================

    /// Liste les devises supportées, dans l'ordre de la table
    pub fn list_supported_currencies(&self) -> Vec<&str> {
        self.rates.codes()
    }

    /// Taux d'une devise par rapport à la référence
    pub fn rate_of(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
    }

    /// Accès en lecture seule à la table
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convertit un montant : (montant / taux source) * taux cible
    ///
    /// Diviser par le taux source exprime le montant en devise de
    /// référence, multiplier par le taux cible l'exprime en devise cible.
    /// Aucun contrôle de signe : zéro et négatifs sont acceptés.
    /// Un résultat non représentable (dépassement f64) est refusé comme
    /// InvalidAmount : le montant est hors limites pour cette paire.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let from_rate = self.rate_of(from)?;
        let to_rate = self.rate_of(to)?;

        if !amount.is_finite() {
            return Err(ConversionError::InvalidAmount(amount.to_string()));
        }

        // Identité exacte, sans aller-retour flottant
        if from == to {
            return Ok(amount);
        }

        let converted = (amount / from_rate) * to_rate;
        if !converted.is_finite() {
            return Err(ConversionError::InvalidAmount(amount.to_string()));
        }

        Ok(converted)
    }

    /// Parse un montant saisi par l'utilisateur
    ///
    /// CONCEPT RUST : str::parse::<f64>()
    /// - Accepte "100", "-3.5", "1e3"
    /// - "inf" et "NaN" sont parsés par Rust mais refusés ici
    pub fn parse_amount(text: &str) -> Result<f64> {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ConversionError::InvalidAmount(text.to_string())),
        }
    }

    /// Convertit un montant saisi sous forme de texte
    pub fn convert_text(&self, amount_text: &str, from: &str, to: &str) -> Result<f64> {
        let amount = Self::parse_amount(amount_text)?;
        self.convert(amount, from, to)
    }

    /// Taux effectif d'une conversion
    ///
    /// Pour un montant nul, le rapport converti / montant n'est pas défini :
    /// on utilise alors directement taux cible / taux source.
    pub fn effective_rate(&self, amount: f64, from: &str, to: &str, converted: f64) -> Result<f64> {
        if amount == 0.0 {
            Ok(self.rate_of(to)? / self.rate_of(from)?)
        } else {
            Ok(converted / amount)
        }
    }

    /// Action complète "Convert" : parse, convertit, enregistre
    ///
    /// CONCEPT : Tout ou rien
    /// - Toutes les étapes faillibles sont faites avant record_history()
    /// - Une erreur laisse l'historique intact
    pub fn perform(
        &mut self,
        amount_text: &str,
        from: &str,
        to: &str,
        timestamp: DateTime<Local>,
    ) -> Result<ConversionOutcome> {
        let amount = Self::parse_amount(amount_text).map_err(|e| {
            warn!(input = %amount_text, "Invalid amount");
            e
        })?;
        let converted = self.convert(amount, from, to)?;
        let effective_rate = self.effective_rate(amount, from, to, converted)?;

        let precision = self.options.precision;
        let mut text = format!(
            "{:.2} {} = {} {}",
            amount,
            from,
            precision.format(converted),
            to
        );

        let reverse = if self.options.reverse {
            let back = self.convert(converted, to, from)?;
            text.push_str(&format!(
                "\nReverse: {} {} = {:.2} {}",
                precision.format(converted),
                to,
                back,
                from
            ));
            Some(back)
        } else {
            None
        };

        self.push_record(amount, from, converted, to, effective_rate, &text, timestamp);

        info!(
            from = %from,
            to = %to,
            amount,
            converted,
            reverse = self.options.reverse,
            "Conversion performed"
        );

        Ok(ConversionOutcome {
            amount,
            converted,
            reverse,
            effective_rate,
            text,
            timestamp,
        })
    }

    // ========================================================================
    // Historique
    // ========================================================================

    /// Ajoute un enregistrement en tête de l'historique (plus récent d'abord)
    pub fn record_history(
        &mut self,
        amount: f64,
        from: &str,
        to: &str,
        converted: f64,
        timestamp: DateTime<Local>,
    ) -> Result<()> {
        let effective_rate = self.effective_rate(amount, from, to, converted)?;
        let text = format!(
            "{:.2} {} = {} {}",
            amount,
            from,
            self.options.precision.format(converted),
            to
        );
        self.push_record(amount, from, converted, to, effective_rate, &text, timestamp);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn push_record(
        &mut self,
        amount: f64,
        from: &str,
        converted: f64,
        to: &str,
        effective_rate: f64,
        text: &str,
        timestamp: DateTime<Local>,
    ) {
        let record = HistoryRecord {
            from_amount: format!("{:.2} {}", amount, from),
            to_amount: format!("{} {}", self.options.precision.format(converted), to),
            rate: format!("{:.4}", effective_rate),
            summary: HistoryRecord::summary_line(&timestamp, text),
            timestamp,
        };

        debug!(summary = %record.summary, "Recording history");
        self.history.insert(0, record);
    }

    /// Historique, du plus récent au plus ancien
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Vide l'historique (idempotent)
    pub fn clear_history(&mut self) {
        info!(records = self.history.len(), "Clearing history");
        self.history.clear();
    }

    // ========================================================================
    // Options
    // ========================================================================

    pub fn options(&self) -> ConversionOptions {
        self.options
    }

    pub fn precision(&self) -> Precision {
        self.options.precision
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.options.precision = precision;
    }

    /// Bascule 2 ↔ 4 décimales
    pub fn toggle_precision(&mut self) {
        self.options.precision = self.options.precision.toggle();
        debug!(decimals = self.options.precision.decimals(), "Precision changed");
    }

    pub fn is_reverse(&self) -> bool {
        self.options.reverse
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        self.options.reverse = reverse;
    }

    /// Active / désactive la conversion inverse
    pub fn toggle_reverse(&mut self) {
        self.options.reverse = !self.options.reverse;
        debug!(reverse = self.options.reverse, "Reverse mode changed");
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new(RateTable::standard())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
