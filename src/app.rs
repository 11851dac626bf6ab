// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état de l'interface : champs saisis, sélecteurs, résultat, jauge
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Composition : App possède le ConversionEngine (pas d'état global)
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - La logique métier reste dans le moteur, App ne fait que l'appeler
// ============================================================================

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{ConversionEngine, ConversionError};
use crate::models::{HistoryRecord, RateTable};

/// Texte du résultat avant toute conversion
pub const RESULT_PLACEHOLDER: &str = "Conversion result will appear here";

/// Bornes et pas du sélecteur rapide de montant
pub const SLIDER_MIN: u32 = 1;
pub const SLIDER_MAX: u32 = 10_000;
pub const SLIDER_DEFAULT: u32 = 100;
pub const SLIDER_STEP: u32 = 100;
pub const SLIDER_MAJOR_TICK: u32 = 1_000;

/// Délai avant la remise à zéro de la jauge après une conversion
pub const PROGRESS_RESET_DELAY: Duration = Duration::from_secs(1);

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul mode actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Modes de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : formulaire + historique
    Converter,

    /// Mode saisie du montant (Vim-like)
    /// - Capture les touches pour construire le buffer
    /// - Enter valide et convertit, ESC annule
    InputMode,

    /// Alerte modale (erreur de saisie), fermée par n'importe quelle touche
    Alert,
}

/// Champ du formulaire ayant le focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Slider,
    From,
    To,
}

impl Field {
    /// Ordre de parcours avec ↑↓
    const ORDER: [Field; 4] = [Field::Amount, Field::Slider, Field::From, Field::To];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1).min(Self::ORDER.len() - 1)]
    }

    pub fn previous(&self) -> Self {
        Self::ORDER[self.position().saturating_sub(1)]
    }
}

/// Onglet du panneau d'historique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTab {
    /// Une ligne résumée par conversion, dans l'ordre d'ajout
    Text,
    /// Tableau Time / From / To / Rate, plus récent en premier
    Detailed,
}

impl HistoryTab {
    pub fn toggle(&self) -> Self {
        match self {
            HistoryTab::Text => HistoryTab::Detailed,
            HistoryTab::Detailed => HistoryTab::Text,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            HistoryTab::Text => 0,
            HistoryTab::Detailed => 1,
        }
    }
}

/// Alerte affichée à l'utilisateur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl From<&ConversionError> for Alert {
    fn from(error: &ConversionError) -> Self {
        match error {
            ConversionError::InvalidAmount(_) => Alert {
                title: "Invalid Input".to_string(),
                message: "Please enter a valid number for the amount.".to_string(),
            },
            ConversionError::UnknownCurrency(code) => Alert {
                title: "Unknown Currency".to_string(),
                message: format!("Currency {} is not supported.", code),
            },
        }
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Mode actuel
    pub current_screen: Screen,

    /// Champ ayant le focus
    pub focus: Field,

    /// Texte du champ montant
    pub amount_input: String,

    /// Buffer de saisie en mode Input
    pub input_buffer: String,

    /// Valeur du sélecteur rapide (SLIDER_MIN..=SLIDER_MAX)
    pub slider_value: u32,

    /// Index de la devise source dans `currencies`
    pub from_index: usize,

    /// Index de la devise cible dans `currencies`
    pub to_index: usize,

    /// Texte du résultat (1 ou 2 lignes)
    pub result_text: String,

    /// Jauge de progression (0.0 à 1.0)
    pub progress: f64,

    /// Instant où la jauge a atteint 1.0
    /// CONCEPT : Timer côté présentation
    /// - tick() remet la jauge à 0 une seconde plus tard
    pub progress_completed_at: Option<Instant>,

    /// Onglet d'historique affiché
    pub history_tab: HistoryTab,

    /// Alerte en cours (mode Screen::Alert)
    pub alert: Option<Alert>,

    /// Two-step quit : première pression de 'q' → true
    pub confirm_quit: bool,

    /// Devises proposées par les sélecteurs
    currencies: Vec<String>,

    /// Moteur de conversion (table + historique)
    engine: ConversionEngine,
}

impl App {
    /// Crée une App avec la table standard et la configuration par défaut
    pub fn new() -> Self {
        Self::with_config(RateTable::standard(), Config::default())
    }

    /// Crée une App à partir d'une table de taux et d'une configuration
    ///
    /// Les devises inconnues de la configuration retombent sur les défauts.
    pub fn with_config(rates: RateTable, config: Config) -> Self {
        let config = config.validated(&rates);
        let engine = ConversionEngine::with_options(rates, config.conversion_options());

        let currencies: Vec<String> = engine
            .list_supported_currencies()
            .into_iter()
            .map(String::from)
            .collect();

        let index_of = |code: &str| currencies.iter().position(|c| c == code).unwrap_or(0);
        let from_index = index_of(&config.from);
        let to_index = index_of(&config.to);

        let slider_value = config
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| (v as u32).clamp(SLIDER_MIN, SLIDER_MAX))
            .unwrap_or(SLIDER_DEFAULT);

        Self {
            running: true,
            current_screen: Screen::Converter,
            focus: Field::Amount,
            amount_input: config.amount,
            input_buffer: String::new(),
            slider_value,
            from_index,
            to_index,
            result_text: RESULT_PLACEHOLDER.to_string(),
            progress: 0.0,
            progress_completed_at: None,
            history_tab: HistoryTab::Text,
            alert: None,
            confirm_quit: false,
            currencies,
            engine,
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Tick : appelé à chaque itération de la boucle
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Remet la jauge à zéro si le délai est écoulé
    ///
    /// CONCEPT RUST : Instant::duration_since
    /// - Horloge monotone, insensible aux changements d'heure système
    /// - `now` en paramètre pour pouvoir tester sans attendre
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(completed_at) = self.progress_completed_at {
            if now.duration_since(completed_at) >= PROGRESS_RESET_DELAY {
                debug!("Resetting progress gauge");
                self.progress = 0.0;
                self.progress_completed_at = None;
            }
        }
    }

    // ========================================================================
    // Accès au moteur (lecture seule)
    // ========================================================================

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn history(&self) -> &[HistoryRecord] {
        self.engine.history()
    }

    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    /// Devise source sélectionnée
    pub fn from_currency(&self) -> &str {
        self.currencies
            .get(self.from_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Devise cible sélectionnée
    pub fn to_currency(&self) -> &str {
        self.currencies
            .get(self.to_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    // ========================================================================
    // Actions utilisateur
    // ========================================================================

    /// Bouton "Convert"
    pub fn perform_conversion(&mut self) {
        self.perform_conversion_at(Local::now(), Instant::now());
    }

    /// Conversion avec horodatage explicite
    ///
    /// CONCEPT : Jauge 0.3 → 0.6 → 1.0
    /// - Succès : jauge pleine, remise à zéro différée par tick()
    /// - Échec : jauge à 0, alerte, historique inchangé
    pub fn perform_conversion_at(&mut self, timestamp: DateTime<Local>, now: Instant) {
        self.progress = 0.3;

        let from = self.from_currency().to_string();
        let to = self.to_currency().to_string();

        self.progress = 0.6;

        match self.engine.perform(&self.amount_input, &from, &to, timestamp) {
            Ok(outcome) => {
                self.result_text = outcome.text;
                self.progress = 1.0;
                self.progress_completed_at = Some(now);
            }
            Err(e) => {
                warn!(error = %e, "Conversion failed");
                self.progress = 0.0;
                self.progress_completed_at = None;
                self.show_alert(Alert::from(&e));
            }
        }
    }

    /// Bouton "Clear" : vide le formulaire (pas l'historique)
    ///
    /// Remettre le sélecteur à sa valeur par défaut recopie cette valeur
    /// dans le montant, comme tout déplacement du sélecteur. S'il y est
    /// déjà, le montant reste vide.
    pub fn clear_fields(&mut self) {
        debug!("Clearing fields");
        self.amount_input.clear();
        if self.slider_value != SLIDER_DEFAULT {
            self.set_slider(SLIDER_DEFAULT);
        }
        self.result_text = RESULT_PLACEHOLDER.to_string();
        self.progress = 0.0;
        self.progress_completed_at = None;
    }

    /// Bouton "Swap" : échange source et cible
    pub fn swap_currencies(&mut self) {
        std::mem::swap(&mut self.from_index, &mut self.to_index);
        debug!(from = %self.from_currency(), to = %self.to_currency(), "Swapped currencies");
    }

    /// Bouton "Clear History"
    pub fn clear_history(&mut self) {
        self.engine.clear_history();
    }

    pub fn toggle_precision(&mut self) {
        self.engine.toggle_precision();
    }

    pub fn toggle_reverse(&mut self) {
        self.engine.toggle_reverse();
    }

    pub fn toggle_history_tab(&mut self) {
        self.history_tab = self.history_tab.toggle();
    }

    // ========================================================================
    // Formulaire
    // ========================================================================

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Déplace le sélecteur rapide et recopie sa valeur dans le montant
    ///
    /// CONCEPT RUST : i64 pour le delta signé, clamp pour les bornes
    pub fn adjust_slider(&mut self, delta: i64) {
        let value = (self.slider_value as i64 + delta).clamp(SLIDER_MIN as i64, SLIDER_MAX as i64);
        self.set_slider(value as u32);
    }

    /// Place le sélecteur sur une valeur (bornée)
    pub fn set_slider(&mut self, value: u32) {
        self.slider_value = value.clamp(SLIDER_MIN, SLIDER_MAX);
        self.amount_input = self.slider_value.to_string();
    }

    /// Devise suivante dans le sélecteur qui a le focus
    pub fn next_currency(&mut self) {
        let len = self.currencies.len().max(1);
        match self.focus {
            Field::From => self.from_index = (self.from_index + 1) % len,
            Field::To => self.to_index = (self.to_index + 1) % len,
            _ => {}
        }
    }

    /// Devise précédente dans le sélecteur qui a le focus
    pub fn previous_currency(&mut self) {
        let len = self.currencies.len().max(1);
        match self.focus {
            Field::From => self.from_index = (self.from_index + len - 1) % len,
            Field::To => self.to_index = (self.to_index + len - 1) % len,
            _ => {}
        }
    }

    /// ← / → selon le champ actif
    pub fn adjust_focused(&mut self, forward: bool) {
        match self.focus {
            Field::Slider => {
                let step = SLIDER_STEP as i64;
                self.adjust_slider(if forward { step } else { -step });
            }
            Field::From | Field::To => {
                if forward {
                    self.next_currency();
                } else {
                    self.previous_currency();
                }
            }
            Field::Amount => {}
        }
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode saisie du montant, pré-rempli avec la valeur actuelle
    pub fn start_input(&mut self) {
        self.current_screen = Screen::InputMode;
        self.focus = Field::Amount;
        self.input_buffer = self.amount_input.clone();
    }

    /// Annule la saisie
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Converter;
        self.input_buffer.clear();
    }

    /// Valide la saisie : le buffer devient le montant
    pub fn submit_input(&mut self) {
        self.amount_input = std::mem::take(&mut self.input_buffer);
        self.current_screen = Screen::Converter;
        info!(amount = %self.amount_input, "Amount entered");
    }

    /// Ajoute un caractère au buffer : chiffres, '.' et '-' uniquement
    pub fn append_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.input_buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    pub fn is_on_converter(&self) -> bool {
        self.current_screen == Screen::Converter
    }

    // ========================================================================
    // Alertes
    // ========================================================================

    pub fn show_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
        self.current_screen = Screen::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.current_screen = Screen::Converter;
    }

    pub fn is_showing_alert(&self) -> bool {
        self.current_screen == Screen::Alert
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversionOptions, Precision};
    use chrono::TimeZone;

    fn ts() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 10, 16, 45, 0).unwrap()
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.is_on_converter());
        assert_eq!(app.amount_input, "100");
        assert_eq!(app.from_currency(), "USD");
        assert_eq!(app.to_currency(), "EUR");
        assert_eq!(app.result_text, RESULT_PLACEHOLDER);
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_app_from_config() {
        let config = Config {
            amount: "250".to_string(),
            from: "GBP".to_string(),
            to: "UAH".to_string(),
            precision: 4,
            reverse: true,
        };
        let app = App::with_config(RateTable::standard(), config);
        assert_eq!(app.from_currency(), "GBP");
        assert_eq!(app.to_currency(), "UAH");
        assert_eq!(app.slider_value, 250);
        assert_eq!(
            app.engine().options(),
            ConversionOptions {
                precision: Precision::High,
                reverse: true,
            }
        );
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_successful_conversion() {
        let mut app = App::new();
        app.perform_conversion_at(ts(), Instant::now());

        assert_eq!(app.result_text, "100.00 USD = 85.00 EUR");
        assert_eq!(app.progress, 1.0);
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history()[0].summary, "16:45:00 - 100.00 USD = 85.00 EUR");
    }

    #[test]
    fn test_invalid_amount_shows_alert() {
        let mut app = App::new();
        app.amount_input = "abc".to_string();
        app.perform_conversion_at(ts(), Instant::now());

        assert!(app.is_showing_alert());
        assert_eq!(app.alert.as_ref().unwrap().title, "Invalid Input");
        assert_eq!(app.progress, 0.0);
        assert!(app.history().is_empty());
        assert_eq!(app.result_text, RESULT_PLACEHOLDER);

        app.dismiss_alert();
        assert!(app.is_on_converter());
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_overflowing_amount_shows_alert() {
        let mut app = App::new();
        app.to_index = 3; // JPY
        assert_eq!(app.to_currency(), "JPY");
        app.amount_input = "1e308".to_string();
        app.perform_conversion_at(ts(), Instant::now());

        assert!(app.is_showing_alert());
        assert_eq!(app.alert.as_ref().unwrap().title, "Invalid Input");
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_progress_resets_after_delay() {
        let mut app = App::new();
        let start = Instant::now();
        app.perform_conversion_at(ts(), start);

        app.tick_at(start + Duration::from_millis(500));
        assert_eq!(app.progress, 1.0);

        app.tick_at(start + PROGRESS_RESET_DELAY);
        assert_eq!(app.progress, 0.0);
        assert!(app.progress_completed_at.is_none());
    }

    #[test]
    fn test_swap_currencies() {
        let mut app = App::new();
        app.swap_currencies();
        assert_eq!(app.from_currency(), "EUR");
        assert_eq!(app.to_currency(), "USD");
    }

    #[test]
    fn test_clear_fields_keeps_history() {
        let mut app = App::new();
        app.perform_conversion_at(ts(), Instant::now());
        app.set_slider(4_000);
        app.clear_fields();

        // Le sélecteur revient à 100 et recopie sa valeur dans le montant
        assert_eq!(app.amount_input, "100");
        assert_eq!(app.result_text, RESULT_PLACEHOLDER);
        assert_eq!(app.slider_value, SLIDER_DEFAULT);
        assert_eq!(app.progress, 0.0);
        assert_eq!(app.history().len(), 1);

        // Sélecteur déjà à 100 : le montant reste vide
        app.clear_fields();
        assert!(app.amount_input.is_empty());

        app.clear_history();
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_slider_bounds_and_amount() {
        let mut app = App::new();
        app.adjust_slider(SLIDER_MAJOR_TICK as i64);
        assert_eq!(app.slider_value, 1_100);
        assert_eq!(app.amount_input, "1100");

        app.adjust_slider(100_000);
        assert_eq!(app.slider_value, SLIDER_MAX);

        app.adjust_slider(-100_000);
        assert_eq!(app.slider_value, SLIDER_MIN);
        assert_eq!(app.amount_input, "1");
    }

    #[test]
    fn test_slider_arrow_step() {
        let mut app = App::new();
        app.focus = Field::Slider;

        app.adjust_focused(true);
        assert_eq!(app.slider_value, SLIDER_DEFAULT + SLIDER_STEP);
        assert_eq!(app.amount_input, "200");

        app.adjust_focused(false);
        app.adjust_focused(false);
        assert_eq!(app.slider_value, SLIDER_MIN);
        assert_eq!(app.amount_input, "1");
    }

    #[test]
    fn test_currency_selection_wraps() {
        let mut app = App::new();
        app.focus = Field::From;
        app.previous_currency();
        assert_eq!(app.from_currency(), "UAH");
        app.next_currency();
        assert_eq!(app.from_currency(), "USD");

        app.focus = Field::To;
        app.adjust_focused(true);
        assert_eq!(app.to_currency(), "GBP");
    }

    #[test]
    fn test_focus_navigation() {
        let mut app = App::new();
        assert_eq!(app.focus, Field::Amount);
        app.focus_previous();
        assert_eq!(app.focus, Field::Amount);
        app.focus_next();
        app.focus_next();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus, Field::To);
    }

    #[test]
    fn test_input_mode() {
        let mut app = App::new();
        app.start_input();
        assert!(app.is_in_input_mode());
        assert_eq!(app.input_buffer, "100");

        app.backspace();
        app.backspace();
        app.append_char('5');
        app.submit_input();
        assert_eq!(app.amount_input, "15");
        assert!(app.is_on_converter());

        app.start_input();
        app.append_char('x');
        app.cancel_input();
        assert_eq!(app.amount_input, "15");
    }

    #[test]
    fn test_input_accepts_only_numeric_chars() {
        let mut app = App::new();
        app.start_input();
        app.input_buffer.clear();
        for c in "-1a2.b5e ".chars() {
            app.append_char(c);
        }
        assert_eq!(app.input_buffer, "-12.5");
    }

    #[test]
    fn test_reverse_toggle_updates_result() {
        let mut app = App::new();
        app.toggle_reverse();
        app.perform_conversion_at(ts(), Instant::now());
        assert_eq!(
            app.result_text,
            "100.00 USD = 85.00 EUR\nReverse: 85.00 EUR = 100.00 USD"
        );
        assert_eq!(app.history().len(), 1);
    }
}
