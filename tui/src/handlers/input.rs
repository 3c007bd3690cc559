use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use katalab_core::{search, SearchOutcome, SubmitOutcome};

use crate::state::AppState;

/// Handles input events for the application
pub struct InputHandler;

impl InputHandler {
    /// Handle input events (keyboard and mouse)
    pub fn handle_event(state: &mut AppState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::handle_key_event(state, key.code, key.modifiers);
            }
            Event::Mouse(mouse_event) => {
                Self::handle_mouse_event(state, mouse_event);
            }
            _ => {}
        }
    }

    fn handle_key_event(state: &mut AppState, key_code: KeyCode, modifiers: KeyModifiers) {
        // The chatbot overlay captures all input while open
        if state.chat.is_open() {
            Self::handle_chat_key(state, key_code, modifiers);
            return;
        }

        match key_code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                state.should_quit = true;
            }
            KeyCode::Char('b') if modifiers.contains(KeyModifiers::CONTROL) => {
                state.chat.open();
            }
            KeyCode::Tab => {
                // Switch between panels (search input, results, graph)
                state.focused_panel = (state.focused_panel + 1) % 3;
            }
            KeyCode::Char('q') if state.focused_panel != 0 => {
                state.should_quit = true;
            }
            KeyCode::Enter if state.focused_panel == 0 => {
                Self::submit_search(state);
            }
            KeyCode::Char(c) if state.focused_panel == 0 => {
                insert_char(&mut state.search_input, &mut state.search_cursor, c);
            }
            KeyCode::Backspace if state.focused_panel == 0 => {
                delete_char(&mut state.search_input, &mut state.search_cursor);
            }
            KeyCode::Left if state.focused_panel == 0 => {
                move_cursor_left(&state.search_input, &mut state.search_cursor);
            }
            KeyCode::Right if state.focused_panel == 0 => {
                move_cursor_right(&state.search_input, &mut state.search_cursor);
            }
            KeyCode::Home if state.focused_panel == 0 => {
                state.search_cursor = 0;
            }
            KeyCode::End if state.focused_panel == 0 => {
                state.search_cursor = state.search_input.len();
            }
            KeyCode::Esc => {
                state.search_input.clear();
                state.search_cursor = 0;
                state.focused_panel = 0;
            }
            _ => {}
        }
    }

    fn handle_chat_key(state: &mut AppState, key_code: KeyCode, modifiers: KeyModifiers) {
        match key_code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                state.should_quit = true;
            }
            KeyCode::Char('b') if modifiers.contains(KeyModifiers::CONTROL) => {
                state.chat.close();
            }
            KeyCode::Esc => {
                state.chat.close();
            }
            KeyCode::Enter => {
                Self::submit_chat(state);
            }
            KeyCode::Up => {
                state.chat_scroll = state.chat_scroll.saturating_sub(1);
                state.auto_scroll_chat = false;
            }
            KeyCode::Down => {
                state.chat_scroll = state.chat_scroll.saturating_add(1);
            }
            KeyCode::PageDown | KeyCode::End if state.chat_input.is_empty() => {
                // Jump back to the newest message
                state.auto_scroll_chat = true;
            }
            KeyCode::Char(c) => {
                insert_char(&mut state.chat_input, &mut state.chat_cursor, c);
            }
            KeyCode::Backspace => {
                delete_char(&mut state.chat_input, &mut state.chat_cursor);
            }
            KeyCode::Left => {
                move_cursor_left(&state.chat_input, &mut state.chat_cursor);
            }
            KeyCode::Right => {
                move_cursor_right(&state.chat_input, &mut state.chat_cursor);
            }
            KeyCode::Home => {
                state.chat_cursor = 0;
            }
            KeyCode::End => {
                state.chat_cursor = state.chat_input.len();
            }
            _ => {}
        }
    }

    fn handle_mouse_event(state: &mut AppState, mouse_event: MouseEvent) {
        if !state.chat.is_open() {
            return;
        }
        match mouse_event.kind {
            MouseEventKind::ScrollUp => {
                state.chat_scroll = state.chat_scroll.saturating_sub(3);
                state.auto_scroll_chat = false;
            }
            MouseEventKind::ScrollDown => {
                state.chat_scroll = state.chat_scroll.saturating_add(3);
            }
            _ => {}
        }
    }

    fn submit_search(state: &mut AppState) {
        match state.search.search(&state.search_input) {
            SearchOutcome::Started => {
                state.search_input.clear();
                state.search_cursor = 0;
            }
            SearchOutcome::EmptyTerm => {
                state.flash_alert(search::EMPTY_TERM_ALERT);
            }
            SearchOutcome::Busy => {
                state.flash_alert("Pencarian sebelumnya masih berjalan.");
            }
        }
    }

    fn submit_chat(state: &mut AppState) {
        match state.chat.submit(&state.chat_input) {
            SubmitOutcome::Started => {
                state.chat_input.clear();
                state.chat_cursor = 0;
                state.auto_scroll_chat = true;
            }
            // The widget silently ignores empty chat input
            SubmitOutcome::EmptyInput => {}
            SubmitOutcome::Busy => {
                state.flash_alert("Masih memproses pesan sebelumnya.");
            }
        }
    }
}

fn insert_char(input: &mut String, cursor: &mut usize, c: char) {
    input.insert(*cursor, c);
    *cursor += c.len_utf8();
}

fn delete_char(input: &mut String, cursor: &mut usize) {
    if *cursor > 0 {
        let width = input[..*cursor]
            .chars()
            .next_back()
            .map(char::len_utf8)
            .unwrap_or(0);
        *cursor -= width;
        input.remove(*cursor);
    }
}

fn move_cursor_left(input: &str, cursor: &mut usize) {
    if *cursor > 0 {
        *cursor -= input[..*cursor]
            .chars()
            .next_back()
            .map(char::len_utf8)
            .unwrap_or(0);
    }
}

fn move_cursor_right(input: &str, cursor: &mut usize) {
    if *cursor < input.len() {
        *cursor += input[*cursor..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(0);
    }
}
