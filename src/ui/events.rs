// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Error handling avec Result
// 3. Pattern matching : if let + matches!
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (remise à zéro de la jauge)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un gestionnaire avec un tick de 250ms
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release :
                // seul Press est gardé pour éviter les doublons
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Vérifie si la touche correspond à l'un des codes donnés
///
/// CONCEPT RUST : slice::contains
/// - Factorise les helpers is_*_event ci-dessous
fn key_in(event: &Event, codes: &[KeyCode]) -> bool {
    if let Event::Key(key) = event {
        codes.contains(&key.code)
    } else {
        false
    }
}

/// 'q' : quitter (two-step)
pub fn is_quit_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('q'), KeyCode::Char('Q')])
}

pub fn is_escape_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Esc])
}

/// Entrée : convertir (ou valider la saisie)
pub fn is_enter_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Enter])
}

pub fn is_backspace_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Backspace])
}

/// Flèche haut ou 'k' (vim) : champ précédent
pub fn is_up_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Up, KeyCode::Char('k'), KeyCode::Char('K')])
}

/// Flèche bas ou 'j' (vim) : champ suivant
pub fn is_down_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('J')])
}

/// Flèche gauche ou 'h' : valeur précédente du champ actif
pub fn is_left_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Left, KeyCode::Char('h')])
}

/// Flèche droite ou 'l' : valeur suivante du champ actif
pub fn is_right_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Right, KeyCode::Char('l')])
}

/// PageUp : +1000 sur le sélecteur rapide
pub fn is_page_up_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::PageUp])
}

/// PageDown : -1000 sur le sélecteur rapide
pub fn is_page_down_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::PageDown])
}

/// 'i' : éditer le montant (Vim-style insert)
pub fn is_edit_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('i'), KeyCode::Char('I')])
}

/// 's' : échanger les devises
pub fn is_swap_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('s'), KeyCode::Char('S')])
}

/// 'c' : vider le formulaire
pub fn is_clear_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('c'), KeyCode::Char('C')])
}

/// 'x' : vider l'historique
pub fn is_clear_history_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('x'), KeyCode::Char('X')])
}

/// 'p' : basculer la précision 2/4
pub fn is_precision_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('p'), KeyCode::Char('P')])
}

/// 'r' : basculer la conversion inverse
pub fn is_reverse_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Char('r'), KeyCode::Char('R')])
}

/// Tab : changer d'onglet d'historique
pub fn is_tab_event(event: &Event) -> bool {
    key_in(event, &[KeyCode::Tab, KeyCode::BackTab])
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_up_event(&key(KeyCode::Up)));
        assert!(is_down_event(&key(KeyCode::Char('j'))));
        assert!(is_left_event(&key(KeyCode::Char('h'))));
        assert!(is_right_event(&key(KeyCode::Right)));
        assert!(is_tab_event(&key(KeyCode::Tab)));
    }

    #[test]
    fn test_get_char() {
        assert_eq!(get_char_from_event(&key(KeyCode::Char('7'))), Some('7'));
        assert_eq!(get_char_from_event(&key(KeyCode::Enter)), None);
        assert_eq!(get_char_from_event(&Event::Tick), None);
    }
}
