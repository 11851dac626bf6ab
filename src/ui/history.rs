// ============================================================================
// Historique - Panneau à onglets
// ============================================================================
// Deux vues du même historique de session :
// - "Text History" : une ligne résumée par conversion, ordre d'ajout
// - "Detailed History" : tableau Time / From / To / Rate, plus récent d'abord
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::app::{App, HistoryTab};

const TAB_TITLES: [&str; 2] = ["Text History", "Detailed History"];

/// Dessine le panneau d'historique (onglets + contenu)
pub fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(TAB_TITLES.to_vec())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Conversion History "),
        )
        .select(app.history_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, chunks[0]);

    match app.history_tab {
        HistoryTab::Text => render_text_history(frame, app, chunks[1]),
        HistoryTab::Detailed => render_table_history(frame, app, chunks[1]),
    }
}

fn history_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Historique texte : comme une zone de texte où l'on ajoute en bas
///
/// CONCEPT RUST : .rev() sur un slice
/// - L'historique est stocké du plus récent au plus ancien
/// - On l'inverse pour afficher dans l'ordre chronologique
fn render_text_history(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.history();

    if history.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "Conversion history will appear here...",
            Style::default().fg(Color::DarkGray),
        )))
        .block(history_block());
        frame.render_widget(placeholder, area);
        return;
    }

    let lines: Vec<Line> = history
        .iter()
        .rev()
        .map(|record| Line::from(record.summary.as_str()))
        .collect();

    // Défile pour garder les dernières lignes visibles
    let visible = area.height.saturating_sub(2) as usize;
    let offset = lines.len().saturating_sub(visible) as u16;

    let paragraph = Paragraph::new(lines)
        .block(history_block())
        .scroll((offset, 0));

    frame.render_widget(paragraph, area);
}

/// Historique détaillé : tableau à 4 colonnes
fn render_table_history(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Time", "From", "To", "Rate"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .history()
        .iter()
        .map(|record| {
            Row::new(vec![
                record.time(),
                record.from_amount.clone(),
                record.to_amount.clone(),
                record.rate.clone(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Length(20),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(history_block());

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| render_history(frame, app, frame.size()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with_two_conversions() -> App {
        let mut app = App::new();
        let first = Local.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let second = Local.with_ymd_and_hms(2024, 5, 10, 9, 5, 0).unwrap();
        app.perform_conversion_at(first, Instant::now());
        app.amount_input = "110".to_string();
        app.swap_currencies();
        app.perform_conversion_at(second, Instant::now());
        app
    }

    #[test]
    fn test_empty_text_history() {
        let screen = draw(&App::new());
        assert!(screen.contains("Conversion history will appear here..."));
    }

    #[test]
    fn test_text_history_lines() {
        let screen = draw(&app_with_two_conversions());
        assert!(screen.contains("09:00:00 - 100.00 USD = 85.00 EUR"));
        assert!(screen.contains("09:05:00 - 110.00 EUR"));
    }

    #[test]
    fn test_detailed_history_table() {
        let mut app = app_with_two_conversions();
        app.toggle_history_tab();
        let screen = draw(&app);
        assert!(screen.contains("Time"));
        assert!(screen.contains("09:05:00"));
        assert!(screen.contains("100.00 USD"));
        assert!(screen.contains("0.8500"));
    }
}
