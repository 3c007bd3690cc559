use katalab_core::{ChatMessage, Sender};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::state::AppState;

/// Component for rendering the floating chatbot overlay
pub struct ChatComponent;

impl ChatComponent {
    /// Render the chatbot overlay on top of the main screen
    pub fn render(state: &mut AppState, f: &mut Frame) {
        let area = f.size();

        // Centered popup, 60% width, 70% height
        let popup_width = area.width * 60 / 100;
        let popup_height = area.height * 70 / 100;
        let popup_x = (area.width - popup_width) / 2;
        let popup_y = (area.height - popup_height) / 2;

        let popup_area = Rect {
            x: popup_x,
            y: popup_y,
            width: popup_width,
            height: popup_height,
        };

        // Clear the background
        f.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
            .split(popup_area);

        Self::render_transcript(state, f, chunks[0]);
        Self::render_input(state, f, chunks[1]);
    }

    fn render_transcript(state: &mut AppState, f: &mut Frame, area: Rect) {
        let available_width = area.width.saturating_sub(4) as usize;
        let should_wrap = available_width >= 10;

        let mut chat_lines = Vec::new();
        for msg in state.chat.messages() {
            Self::render_message(&mut chat_lines, msg, available_width, should_wrap);
            chat_lines.push(Line::from(""));
        }

        // Calculate scroll limits
        let content_height = chat_lines.len();
        let visible_height = area.height.saturating_sub(2) as usize;
        let max_scroll = content_height.saturating_sub(visible_height);

        let scroll_pos = if state.auto_scroll_chat {
            max_scroll
        } else {
            state.chat_scroll.min(max_scroll)
        };
        // Update the stored scroll position to prevent phantom scrolling
        state.chat_scroll = scroll_pos;

        let visible_lines: Vec<Line> = if content_height > visible_height {
            chat_lines
                .into_iter()
                .skip(scroll_pos)
                .take(visible_height)
                .collect()
        } else {
            chat_lines
        };

        let transcript = Paragraph::new(Text::from(visible_lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Chatbot BMKG "),
            )
            .wrap(ratatui::widgets::Wrap { trim: false });

        f.render_widget(transcript, area);

        if content_height > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(max_scroll.max(1)).position(scroll_pos);
            f.render_stateful_widget(
                scrollbar,
                area.inner(&ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    fn render_message(
        chat_lines: &mut Vec<Line>,
        msg: &ChatMessage,
        available_width: usize,
        should_wrap: bool,
    ) {
        let (prefix, style) = match msg.sender {
            Sender::User => ("Anda", Style::default().fg(Color::Cyan)),
            Sender::Bot if msg.pending => (
                "Bot",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            Sender::Bot => ("Bot", Style::default().fg(Color::Green)),
        };

        let content = format!("{}: {}", prefix, msg.text);
        add_wrapped_text(chat_lines, &content, style, available_width, should_wrap);
    }

    fn render_input(state: &AppState, f: &mut Frame, area: Rect) {
        if state.chat.is_processing() {
            let input = Paragraph::new("Memproses...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Pesan "));
            f.render_widget(input, area);
            return;
        }

        let input = Paragraph::new(state.chat_input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pesan (Enter kirim, Esc tutup) "),
        );
        f.render_widget(input, area);

        if state.cursor_visible {
            let cursor_col = state.chat_input[..state.chat_cursor].chars().count() as u16;
            let cursor_x = area.x + 1 + cursor_col;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

fn add_wrapped_text(
    chat_lines: &mut Vec<Line>,
    content: &str,
    style: Style,
    available_width: usize,
    should_wrap: bool,
) {
    if !should_wrap || content.chars().count() <= available_width {
        chat_lines.push(Line::from(Span::styled(content.to_string(), style)));
        return;
    }

    let words: Vec<&str> = content.split_whitespace().collect();
    let mut current_line = String::new();

    for word in words {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + word.chars().count() + 1 <= available_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            chat_lines.push(Line::from(Span::styled(current_line.clone(), style)));
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        chat_lines.push(Line::from(Span::styled(current_line, style)));
    }
}
