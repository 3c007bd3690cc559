use katalab_core::{search, SearchPhase};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::state::AppState;

const IDLE_PLACEHOLDER: &str = "Belum ada pencarian.";
const PENDING_PLACEHOLDER: &str = "Mencari...";
const EMPTY_PLACEHOLDER: &str = "Tidak ada hasil untuk kata ini.";

/// Component for the semantic lab input and results table
pub struct SearchComponent;

impl SearchComponent {
    /// Render the search input box
    pub fn render_input(state: &mut AppState, f: &mut Frame, area: Rect) {
        let focused = state.focused_panel == 0 && !state.chat.is_open();

        if state.search.is_processing() {
            let input = Paragraph::new("Memproses...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Kata "));
            f.render_widget(input, area);
            return;
        }

        let border_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let title = if focused {
            " Kata [FOCUSED] (Enter untuk mencari) "
        } else {
            " Kata "
        };

        let input = Paragraph::new(state.search_input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        f.render_widget(input, area);

        if focused && state.cursor_visible {
            let cursor_col = state.search_input[..state.search_cursor].chars().count() as u16;
            let cursor_x = area.x + 1 + cursor_col;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Render the similarity table, or the placeholder for the phase
    pub fn render_results(state: &mut AppState, f: &mut Frame, area: Rect) {
        let focused = state.focused_panel == 1 && !state.chat.is_open();
        let border_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let title = if focused {
            " Hasil Kemiripan [FOCUSED] "
        } else {
            " Hasil Kemiripan "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        if state.search.phase() != SearchPhase::Loaded {
            let (text, style) = match state.search.phase() {
                SearchPhase::Pending => (
                    PENDING_PLACEHOLDER,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
                SearchPhase::Empty => (EMPTY_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
                SearchPhase::Failed => (
                    search::SEARCH_FAILURE_TEXT,
                    Style::default().fg(Color::Red),
                ),
                _ => (IDLE_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            };
            let placeholder = Paragraph::new(text).style(style).block(block);
            f.render_widget(placeholder, area);
            return;
        }

        let rows: Vec<Row> = state
            .search
            .results()
            .iter()
            .map(|result| Row::new([result.word.clone(), format!("{:.3}", result.score)]))
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Percentage(60), Constraint::Percentage(40)],
        )
        .header(
            Row::new(["Kata", "Skor"]).style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block);

        f.render_widget(table, area);
    }
}
