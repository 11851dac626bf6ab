// ============================================================================
// Options de conversion
// ============================================================================
// Précision d'affichage du montant converti et mode de conversion inverse
// ============================================================================

/// Nombre de décimales du montant converti
///
/// CONCEPT RUST : Enum plutôt qu'un entier libre
/// - Seules deux valeurs sont possibles (2 ou 4)
/// - Impossible de construire une précision invalide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// 2 décimales (défaut)
    #[default]
    Low,
    /// 4 décimales
    High,
}

impl Precision {
    /// Nombre de décimales correspondant
    pub fn decimals(&self) -> usize {
        match self {
            Precision::Low => 2,
            Precision::High => 4,
        }
    }

    /// Construit une précision depuis un nombre de décimales (2 ou 4)
    pub fn from_decimals(decimals: usize) -> Option<Self> {
        match decimals {
            2 => Some(Precision::Low),
            4 => Some(Precision::High),
            _ => None,
        }
    }

    /// Bascule 2 ↔ 4 décimales
    pub fn toggle(&self) -> Self {
        match self {
            Precision::Low => Precision::High,
            Precision::High => Precision::Low,
        }
    }

    /// Label pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            Precision::Low => "2 decimal places",
            Precision::High => "4 decimal places",
        }
    }

    /// Formate un montant avec cette précision
    ///
    /// CONCEPT RUST : précision dynamique dans format!
    /// - {:.*} prend la précision en argument avant la valeur
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }
}

/// Options appliquées par le moteur à chaque conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionOptions {
    /// Précision du montant cible
    pub precision: Precision,

    /// Calcule aussi la conversion inverse (cible → source)
    pub reverse: bool,
}
