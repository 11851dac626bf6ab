// ============================================================================
// Converter - Rendu de l'interface principale
// ============================================================================
// Dessine le formulaire de conversion, le résultat, la jauge et l'historique
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : Block, Paragraph, Gauge, Clear
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Screen, SLIDER_MAX, SLIDER_MIN};
use crate::models::Precision;
use crate::ui::history;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le formulaire est toujours dessiné
/// - InputMode remplace le footer par la ligne de saisie
/// - Alert ajoute une popup par-dessus
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_options(frame, app, chunks[2]);
    render_progress(frame, app, chunks[3]);
    render_result(frame, app, chunks[4]);
    history::render_history(frame, app, chunks[5]);

    match app.current_screen {
        Screen::Converter => render_footer(frame, app, chunks[6]),
        Screen::InputMode => render_input_footer(frame, app, chunks[6]),
        Screen::Alert => {
            render_footer(frame, app, chunks[6]);
            render_alert(frame, app);
        }
    }
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================

/// Crée le layout principal
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Formulaire : montant, sélecteur, devises
            Constraint::Length(3), // Options
            Constraint::Length(3), // Jauge
            Constraint::Length(4), // Résultat (2 lignes max)
            Constraint::Min(5),    // Historique
            Constraint::Length(4), // Footer (2 lignes de raccourcis)
        ])
        .split(area)
        .to_vec()
}

/// Zone centrée pour la popup d'alerte
///
/// CONCEPT : Layout imbriqué
/// - Découpe verticale puis horizontale en pourcentages
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn cyan_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
}

fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

// ============================================================================
// Header
// ============================================================================

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyConvert ")
        .title_alignment(Alignment::Center);

    let text = Line::from(Span::styled(
        "Currency Converter",
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Formulaire
// ============================================================================

/// Label d'un champ, inversé s'il a le focus
fn field_label(app: &App, field: Field, label: &'static str) -> Span<'static> {
    let style = if app.focus == field && app.is_on_converter() {
        key_style(Color::Yellow).add_modifier(Modifier::REVERSED)
    } else {
        key_style(Color::White)
    };
    Span::styled(label, style)
}

/// Barre du sélecteur rapide : [=====-----]
///
/// CONCEPT RUST : Conversion u32 → f64 pour le ratio
fn slider_bar(value: u32, width: usize) -> String {
    let ratio = (value - SLIDER_MIN) as f64 / (SLIDER_MAX - SLIDER_MIN) as f64;
    let filled = (ratio * width as f64).round() as usize;
    format!(
        "[{}{}]",
        "=".repeat(filled.min(width)),
        "-".repeat(width.saturating_sub(filled))
    )
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let amount = if app.amount_input.is_empty() {
        Span::styled("Enter amount to convert", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.amount_input.as_str(), Style::default().fg(Color::White))
    };

    let lines = vec![
        Line::from(vec![field_label(app, Field::Amount, " Amount: "), Span::raw(" "), amount]),
        Line::from(vec![
            field_label(app, Field::Slider, " Quick Select Amount: "),
            Span::raw(format!(" {} {}", slider_bar(app.slider_value, 30), app.slider_value)),
        ]),
        Line::from(vec![
            field_label(app, Field::From, " From: "),
            Span::styled(format!(" < {} > ", app.from_currency()), key_style(Color::Green)),
            Span::raw("   "),
            field_label(app, Field::To, " To: "),
            Span::styled(format!(" < {} > ", app.to_currency()), key_style(Color::Green)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(cyan_block(" Input ")), area);
}

fn render_options(frame: &mut Frame, app: &App, area: Rect) {
    let options = app.engine().options();
    let radio = |precision: Precision| {
        let mark = if options.precision == precision { "(•)" } else { "( )" };
        format!(" {} {} ", mark, precision.label())
    };

    let line = Line::from(vec![
        Span::raw(radio(Precision::Low)),
        Span::raw(radio(Precision::High)),
        Span::raw("    "),
        Span::raw(format!(
            "[{}] Show reverse conversion",
            if options.reverse { "x" } else { " " }
        )),
    ]);

    frame.render_widget(Paragraph::new(line).block(cyan_block(" Options ")), area);
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .block(cyan_block(" Progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(app.progress.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .result_text
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), key_style(Color::Green))))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(cyan_block(" Conversion Result "))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        vec![Line::from(vec![
            Span::styled("⚠  Press ", key_style(Color::Yellow)),
            Span::styled(
                "[q]",
                key_style(Color::Red).add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                key_style(Color::Yellow),
            ),
        ])]
    } else {
        // Deux lignes : formulaire, puis historique et sortie
        vec![
            Line::from(vec![
                Span::styled("[Enter]", key_style(Color::Green)),
                Span::raw(" Convert  "),
                Span::styled("[i]", key_style(Color::Yellow)),
                Span::raw(" Edit  "),
                Span::styled("[↑↓←→]", key_style(Color::Yellow)),
                Span::raw(" Select  "),
                Span::styled("[s]", key_style(Color::Blue)),
                Span::raw(" Swap  "),
                Span::styled("[c]", key_style(Color::Red)),
                Span::raw(" Clear"),
            ]),
            Line::from(vec![
                Span::styled("[p/r]", key_style(Color::Yellow)),
                Span::raw(" Options  "),
                Span::styled("[Tab]", key_style(Color::Yellow)),
                Span::raw(" History  "),
                Span::styled("[x]", key_style(Color::Red)),
                Span::raw(" Clear History  "),
                Span::styled("[q]", key_style(Color::Yellow)),
                Span::raw(" Quit"),
            ]),
        ]
    };

    let paragraph = Paragraph::new(shortcuts)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Footer en mode saisie : prompt + buffer + curseur
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" [Enter] Convert  [ESC] Cancel ");

    let input_line = Line::from(vec![
        Span::styled("Amount: ", key_style(Color::Cyan)),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let paragraph = Paragraph::new(input_line)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Alerte modale
// ============================================================================

/// Dessine la popup d'alerte par-dessus l'interface
///
/// CONCEPT RATATUI : widget Clear
/// - Efface la zone avant de dessiner la popup
/// - Sans lui, le texte en dessous resterait visible
fn render_alert(frame: &mut Frame, app: &App) {
    let Some(alert) = app.alert.as_ref() else {
        return;
    };

    let area = centered_rect(60, 30, frame.size());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" {} ", alert.title))
        .title_alignment(Alignment::Center);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(alert.message.as_str(), key_style(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Alert;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    /// Dessine l'app dans un terminal virtuel et retourne le texte affiché
    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(SLIDER_MIN, 10), "[----------]");
        assert_eq!(slider_bar(SLIDER_MAX, 10), "[==========]");
    }

    #[test]
    fn test_render_initial_state() {
        let app = App::new();
        let screen = draw(&app);
        assert!(screen.contains("LazyConvert"));
        assert!(screen.contains("Conversion result will appear here"));
        assert!(screen.contains("< USD >"));
        assert!(screen.contains("< EUR >"));
    }

    #[test]
    fn test_render_result_after_conversion() {
        let mut app = App::new();
        app.perform_conversion_at(chrono::Local::now(), Instant::now());
        let screen = draw(&app);
        assert!(screen.contains("100.00 USD = 85.00 EUR"));
    }

    #[test]
    fn test_render_option_labels() {
        let mut app = App::new();
        app.toggle_precision();
        let screen = draw(&app);
        assert!(screen.contains("( ) 2 decimal places"));
        assert!(screen.contains("(•) 4 decimal places"));
    }

    #[test]
    fn test_footer_fits_narrow_terminal() {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("[c] Clear"));
        assert!(screen.contains("[q] Quit"));
    }

    #[test]
    fn test_render_alert() {
        let mut app = App::new();
        app.show_alert(Alert {
            title: "Invalid Input".to_string(),
            message: "Please enter a valid number for the amount.".to_string(),
        });
        let screen = draw(&app);
        assert!(screen.contains("Invalid Input"));
    }
}
