// ============================================================================
// Structure : HistoryRecord
// ============================================================================
// Une entrée de l'historique de session : une conversion réussie
//
// CONCEPTS RUST :
// 1. DateTime<Local> : horodatage dans le fuseau local (affichage HH:MM:SS)
// 2. Champs déjà formatés : l'UI affiche sans refaire de calcul
// ============================================================================

use chrono::{DateTime, Local};

/// Format d'heure de l'historique
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Enregistrement d'une conversion
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    /// Moment de la conversion
    pub timestamp: DateTime<Local>,

    /// Montant source formaté (ex: "100.00 USD")
    pub from_amount: String,

    /// Montant cible formaté avec la précision choisie (ex: "85.00 EUR")
    pub to_amount: String,

    /// Taux effectif, toujours 4 décimales (ex: "0.8500")
    pub rate: String,

    /// Ligne résumée pour l'historique texte
    /// Ex: "14:03:12 - 100.00 USD = 85.00 EUR"
    pub summary: String,
}

impl HistoryRecord {
    /// Heure formatée pour la colonne "Time"
    pub fn time(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }

    /// Construit la ligne résumée à partir du texte de résultat
    ///
    /// Le texte peut contenir plusieurs lignes (mode inverse) :
    /// elles sont jointes avec " | " pour tenir sur une ligne.
    pub fn summary_line(timestamp: &DateTime<Local>, result_text: &str) -> String {
        format!(
            "{} - {}",
            timestamp.format(TIME_FORMAT),
            result_text.replace('\n', " | ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_summary_line_joins_lines() {
        let ts = Local.with_ymd_and_hms(2024, 3, 1, 14, 3, 12).unwrap();
        let line = HistoryRecord::summary_line(
            &ts,
            "100.00 USD = 85.00 EUR\nReverse: 85.00 EUR = 100.00 USD",
        );
        assert_eq!(
            line,
            "14:03:12 - 100.00 USD = 85.00 EUR | Reverse: 85.00 EUR = 100.00 USD"
        );
    }
}
