use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

/// Component for rendering the status line
pub struct StatusComponent;

impl StatusComponent {
    /// Render the status line
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        if let Some((alert, _)) = &state.alert {
            let status = Paragraph::new(alert.as_str()).style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            );
            f.render_widget(status, area);
            return;
        }

        let processing = state.chat.is_processing() || state.search.is_processing();
        let status_text = if processing {
            "● Memproses... | Ctrl+B chatbot | Tab fokus | Esc bersihkan".to_string()
        } else {
            "Siap | Ctrl+B chatbot | Tab fokus | q keluar (di luar input)".to_string()
        };

        let status = Paragraph::new(status_text).style(if processing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Green)
        });

        f.render_widget(status, area);
    }
}
