// ============================================================================
// LazyConvert - Convertisseur de devises en TUI
// ============================================================================
// Programme TUI : saisie d'un montant, choix des devises, conversion avec
// des taux fixes et historique de session
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Séparation : main.rs traduit les touches en appels sur App
// ============================================================================

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazyconvert::app::App;
use lazyconvert::app::SLIDER_MAJOR_TICK;
use lazyconvert::config::Config;
use lazyconvert::models::RateTable;
use lazyconvert::ui::{events::EventHandler, render, Event};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers ./logs/lazyconvert.log
///
/// # Utilisation
/// ```bash
/// tail -f logs/lazyconvert.log
/// RUST_LOG=lazyconvert=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazyconvert.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour lazyconvert, info pour le reste
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyconvert=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Si le logging échoue, on continue sans
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyConvert starting up");

    let config = Config::load();
    let rates = RateTable::standard();
    info!(currencies = rates.len(), "Rate table loaded");

    let mut app = App::with_config(rates, config);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!(conversions = app.history().len(), "Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Render → Input → Update
// - Pas de thread worker : chaque conversion est synchrone et immédiate
// - Le seul "timer" (remise à zéro de la jauge) est géré par app.tick()
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // 1. RENDER
        terminal
            .draw(|frame| render(frame, app))
            .context("Échec du rendu du terminal")?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }

        // 3. UPDATE
        app.tick();
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT : Event Handler Pattern
// - Traduit chaque touche en un appel explicite sur App
// - Guards (if) pour router selon le mode courant
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: Event) {
    use lazyconvert::ui::events::{
        get_char_from_event, is_backspace_event, is_clear_event, is_clear_history_event,
        is_down_event, is_edit_event, is_enter_event, is_escape_event, is_left_event,
        is_page_down_event, is_page_up_event, is_precision_event, is_quit_event,
        is_reverse_event, is_right_event, is_swap_event, is_tab_event, is_up_event,
    };

    match event {
        Event::Tick => {}

        // ========================================
        // Alerte : n'importe quelle touche ferme
        // ========================================
        Event::Key(_) if app.is_showing_alert() => {
            debug!("User dismissed alert");
            app.dismiss_alert();
        }

        // ========================================
        // Input Mode : saisie du montant
        // ========================================
        Event::Key(_) if is_escape_event(&event) && app.is_in_input_mode() => {
            info!("User cancelled input");
            app.cancel_input();
        }

        // Enter valide la saisie puis convertit
        Event::Key(_) if is_enter_event(&event) && app.is_in_input_mode() => {
            app.submit_input();
            app.perform_conversion();
        }

        Event::Key(_) if is_backspace_event(&event) && app.is_in_input_mode() => {
            app.backspace();
        }

        // Caractères filtrés par App::append_char (chiffres, . et -)
        Event::Key(_) if app.is_in_input_mode() => {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        // ========================================
        // Converter
        // ========================================
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step confirmation pour éviter les quits accidentels
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();

            if is_enter_event(&event) {
                info!(from = %app.from_currency(), to = %app.to_currency(), "User requested conversion");
                app.perform_conversion();
            } else if is_edit_event(&event) {
                app.start_input();
            } else if is_up_event(&event) {
                app.focus_previous();
            } else if is_down_event(&event) {
                app.focus_next();
            } else if is_left_event(&event) {
                app.adjust_focused(false);
            } else if is_right_event(&event) {
                app.adjust_focused(true);
            } else if is_page_up_event(&event) {
                app.adjust_slider(SLIDER_MAJOR_TICK as i64);
            } else if is_page_down_event(&event) {
                app.adjust_slider(-(SLIDER_MAJOR_TICK as i64));
            } else if is_swap_event(&event) {
                info!("User swapped currencies");
                app.swap_currencies();
            } else if is_clear_event(&event) {
                app.clear_fields();
            } else if is_clear_history_event(&event) {
                info!("User cleared history");
                app.clear_history();
            } else if is_precision_event(&event) {
                app.toggle_precision();
            } else if is_reverse_event(&event) {
                app.toggle_reverse();
            } else if is_tab_event(&event) {
                app.toggle_history_tab();
            }
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
